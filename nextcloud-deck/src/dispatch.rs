//! Routing from a (resource, operation) pair to the matching client call.
//!
//! This layer owns no business logic of its own beyond parameter
//! extraction and the uniform result envelope; every remote interaction
//! lives in the per-resource client modules. Secondary effects that ride
//! along with a primary operation (assigning users or labels right after
//! a card create/update) are best-effort: their outcomes are recorded in
//! the envelope's `side_effects` list and never fail the primary
//! operation.

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::warn;

use crate::client::DeckClient;
use crate::error::{DeckError, Result};
use crate::selector::Selector;
use crate::types::{
    AttachmentCreate, AttachmentKind, BoardCreate, BoardUpdate, CardCreate, CardUpdate,
    CommentCreate, LabelCreate, LabelUpdate, StackCreate, StackUpdate,
};

/// The addressable resource kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Board,
    Stack,
    Card,
    Label,
    Comment,
    Attachment,
}

impl Resource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Board => "board",
            Self::Stack => "stack",
            Self::Card => "card",
            Self::Label => "label",
            Self::Comment => "comment",
            Self::Attachment => "attachment",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "board" => Ok(Self::Board),
            "stack" => Ok(Self::Stack),
            "card" => Ok(Self::Card),
            "label" => Ok(Self::Label),
            "comment" => Ok(Self::Comment),
            "attachment" => Ok(Self::Attachment),
            other => Err(format!("unknown resource '{other}'")),
        }
    }
}

/// Operation tags as the host supplies them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    GetAll,
    Get,
    Create,
    Update,
    Delete,
    UndoDelete,
    AssignUser,
    UnassignUser,
    AssignToCard,
    RemoveFromCard,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GetAll => "getAll",
            Self::Get => "get",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::UndoDelete => "undoDelete",
            Self::AssignUser => "assignUser",
            Self::UnassignUser => "unassignUser",
            Self::AssignToCard => "assignToCard",
            Self::RemoveFromCard => "removeFromCard",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "getAll" => Ok(Self::GetAll),
            "get" => Ok(Self::Get),
            "create" => Ok(Self::Create),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            "undoDelete" => Ok(Self::UndoDelete),
            "assignUser" => Ok(Self::AssignUser),
            "unassignUser" => Ok(Self::UnassignUser),
            "assignToCard" => Ok(Self::AssignToCard),
            "removeFromCard" => Ok(Self::RemoveFromCard),
            other => Err(format!("unknown operation '{other}'")),
        }
    }
}

/// Input parameters for one dispatched operation.
///
/// Identifier parameters accept both selector shapes (a literal value or
/// a `{mode, value}` picker object); extraction resolves them through
/// [`Selector`] so handlers never see the difference.
#[derive(Debug, Clone, Default)]
pub struct Params(Map<String, Value>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build params from a JSON object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Ok(Self::default()),
            other => Err(DeckError::invalid_parameter(
                "params",
                format!("expected a JSON object, got {other}"),
            )),
        }
    }

    /// Insert a parameter (builder style).
    pub fn with(mut self, name: impl Into<String>, value: Value) -> Self {
        self.0.insert(name.into(), value);
        self
    }

    fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name).filter(|v| !v.is_null())
    }

    fn require(&self, name: &str) -> Result<&Value> {
        self.get(name)
            .ok_or_else(|| DeckError::missing_parameter(name))
    }

    /// A required identifier resolved to a numeric ID.
    pub fn numeric_id(&self, name: &str) -> Result<i64> {
        Selector::from_value(self.require(name)?)?.numeric_id()
    }

    /// A required identifier resolved to a string key.
    pub fn string_id(&self, name: &str) -> Result<String> {
        let value = Selector::from_value(self.require(name)?)?
            .string_id()
            .to_string();
        if value.is_empty() {
            return Err(DeckError::missing_parameter(name));
        }
        Ok(value)
    }

    /// An optional identifier resolved to a string key. An empty value
    /// counts as absent, matching hosts that send empty strings for
    /// untouched fields.
    pub fn opt_string_id(&self, name: &str) -> Result<Option<String>> {
        let Some(raw) = self.get(name) else {
            return Ok(None);
        };
        let value = Selector::from_value(raw)?.string_id().to_string();
        Ok(if value.is_empty() { None } else { Some(value) })
    }

    /// An optional list of identifiers resolved to numeric IDs.
    pub fn numeric_id_list(&self, name: &str) -> Result<Vec<i64>> {
        let Some(raw) = self.get(name) else {
            return Ok(Vec::new());
        };
        let Value::Array(items) = raw else {
            return Err(DeckError::invalid_parameter(name, "expected an array"));
        };
        items
            .iter()
            .map(|item| Selector::from_value(item)?.numeric_id())
            .collect()
    }

    /// A required non-empty string.
    pub fn str_required(&self, name: &str) -> Result<String> {
        self.str_opt(name)
            .ok_or_else(|| DeckError::missing_parameter(name))
    }

    /// An optional string; empty counts as absent.
    pub fn str_opt(&self, name: &str) -> Option<String> {
        self.get(name)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(String::from)
    }

    /// An optional integer.
    pub fn i64_opt(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_i64)
    }

    /// Optional binary content, base64-encoded in the parameter map.
    pub fn binary_opt(&self, name: &str) -> Result<Option<Vec<u8>>> {
        let Some(encoded) = self.str_opt(name) else {
            return Ok(None);
        };
        BASE64
            .decode(encoded.as_bytes())
            .map(Some)
            .map_err(|e| DeckError::invalid_parameter(name, format!("invalid base64: {e}")))
    }
}

/// Outcome of one best-effort secondary effect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SideEffect {
    /// What was attempted, e.g. `assignUser`
    pub action: String,
    /// The user or label it was attempted on
    pub target: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SideEffect {
    fn from_result(action: &str, target: impl Into<String>, result: &Result<Value>) -> Self {
        Self {
            action: action.to_string(),
            target: target.into(),
            success: result.is_ok(),
            error: result.as_ref().err().map(|e| e.to_string()),
        }
    }
}

/// Uniform result of every dispatched operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,
    pub resource: String,
    pub operation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Outcomes of best-effort secondary effects, empty for plain
    /// operations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub side_effects: Vec<SideEffect>,
    pub data: Value,
}

impl Envelope {
    fn ok(resource: Resource, operation: Operation, data: Value) -> Self {
        Self {
            success: true,
            resource: resource.to_string(),
            operation: operation.to_string(),
            message: None,
            side_effects: Vec::new(),
            data,
        }
    }

    fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn with_side_effects(mut self, side_effects: Vec<SideEffect>) -> Self {
        self.side_effects = side_effects;
        self
    }
}

/// Dispatch with string tags, as received from a host. Unrecognized tags
/// map to `UnknownOperation` like any unrecognized pair.
pub async fn dispatch_str(
    client: &DeckClient,
    resource: &str,
    operation: &str,
    params: &Params,
) -> Result<Envelope> {
    let unknown = || DeckError::UnknownOperation {
        resource: resource.to_string(),
        operation: operation.to_string(),
    };
    let resource = Resource::from_str(resource).map_err(|_| unknown())?;
    let operation = Operation::from_str(operation).map_err(|_| unknown())?;
    dispatch(client, resource, operation, params).await
}

/// Route one operation to the matching client call and wrap the result.
pub async fn dispatch(
    client: &DeckClient,
    resource: Resource,
    operation: Operation,
    params: &Params,
) -> Result<Envelope> {
    match resource {
        Resource::Board => board(client, operation, params).await,
        Resource::Stack => stack(client, operation, params).await,
        Resource::Card => card(client, operation, params).await,
        Resource::Label => label(client, operation, params).await,
        Resource::Comment => comment(client, operation, params).await,
        Resource::Attachment => attachment(client, operation, params).await,
    }
}

fn unknown(resource: Resource, operation: Operation) -> DeckError {
    DeckError::UnknownOperation {
        resource: resource.to_string(),
        operation: operation.to_string(),
    }
}

async fn board(client: &DeckClient, operation: Operation, params: &Params) -> Result<Envelope> {
    let resource = Resource::Board;
    match operation {
        Operation::GetAll => {
            let boards = client.boards().await?;
            Ok(Envelope::ok(
                resource,
                operation,
                json!({ "boards": boards }),
            ))
        }
        Operation::Get => {
            let board = client.board(params.numeric_id("boardId")?).await?;
            Ok(Envelope::ok(resource, operation, json!({ "board": board })))
        }
        Operation::Create => {
            let board = client
                .create_board(&BoardCreate {
                    title: params.str_required("title")?,
                    color: params.str_required("color")?,
                })
                .await?;
            Ok(Envelope::ok(resource, operation, json!({ "board": board }))
                .with_message("board created"))
        }
        Operation::Update => {
            let board_id = params.numeric_id("boardId")?;
            let update = BoardUpdate {
                title: params.str_opt("title"),
                color: params.str_opt("color"),
            };
            let board = client.update_board(board_id, &update).await?;
            Ok(Envelope::ok(resource, operation, json!({ "board": board }))
                .with_message("board updated"))
        }
        Operation::Delete => {
            let data = client.delete_board(params.numeric_id("boardId")?).await?;
            Ok(Envelope::ok(resource, operation, data).with_message("board deleted"))
        }
        Operation::UndoDelete => {
            let board = client
                .undo_delete_board(params.numeric_id("boardId")?)
                .await?;
            Ok(Envelope::ok(resource, operation, json!({ "board": board }))
                .with_message("board restored"))
        }
        _ => Err(unknown(resource, operation)),
    }
}

async fn stack(client: &DeckClient, operation: Operation, params: &Params) -> Result<Envelope> {
    let resource = Resource::Stack;
    match operation {
        Operation::GetAll => {
            let stacks = client.stacks(params.numeric_id("boardId")?).await?;
            Ok(Envelope::ok(
                resource,
                operation,
                json!({ "stacks": stacks }),
            ))
        }
        Operation::Get => {
            let stack = client
                .stack(params.numeric_id("boardId")?, params.numeric_id("stackId")?)
                .await?;
            Ok(Envelope::ok(resource, operation, json!({ "stack": stack })))
        }
        Operation::Create => {
            let board_id = params.numeric_id("boardId")?;
            let create = StackCreate {
                title: params.str_required("title")?,
                board_id,
                order: params.i64_opt("order"),
            };
            let stack = client.create_stack(board_id, &create).await?;
            Ok(Envelope::ok(resource, operation, json!({ "stack": stack }))
                .with_message("stack created"))
        }
        Operation::Update => {
            let board_id = params.numeric_id("boardId")?;
            let stack_id = params.numeric_id("stackId")?;
            // 0 is the host's "unchanged" sentinel; echo the current
            // order so the update does not silently move the stack.
            let order = match params.i64_opt("order") {
                Some(order) if order != 0 => order,
                _ => client
                    .stack(board_id, stack_id)
                    .await?
                    .order
                    .unwrap_or(0),
            };
            let update = StackUpdate {
                title: params.str_opt("title"),
                board_id,
                order,
            };
            let stack = client.update_stack(board_id, stack_id, &update).await?;
            Ok(Envelope::ok(resource, operation, json!({ "stack": stack }))
                .with_message("stack updated"))
        }
        Operation::Delete => {
            let data = client
                .delete_stack(params.numeric_id("boardId")?, params.numeric_id("stackId")?)
                .await?;
            Ok(Envelope::ok(resource, operation, data).with_message("stack deleted"))
        }
        _ => Err(unknown(resource, operation)),
    }
}

/// Run the optional assign-user and assign-labels secondary effects for
/// a freshly created or updated card.
async fn card_side_effects(
    client: &DeckClient,
    board_id: i64,
    stack_id: i64,
    card_id: i64,
    user: Option<String>,
    labels: Vec<i64>,
) -> Vec<SideEffect> {
    let mut effects = Vec::new();
    if let Some(user_id) = user {
        let result = client
            .assign_user(board_id, stack_id, card_id, &user_id)
            .await;
        if let Err(error) = &result {
            warn!(%card_id, %user_id, %error, "user assignment failed");
        }
        effects.push(SideEffect::from_result("assignUser", user_id, &result));
    }
    for label_id in labels {
        let result = client
            .assign_label(board_id, stack_id, card_id, label_id)
            .await;
        if let Err(error) = &result {
            warn!(%card_id, %label_id, %error, "label assignment failed");
        }
        effects.push(SideEffect::from_result(
            "assignLabel",
            label_id.to_string(),
            &result,
        ));
    }
    effects
}

async fn card(client: &DeckClient, operation: Operation, params: &Params) -> Result<Envelope> {
    let resource = Resource::Card;
    match operation {
        Operation::GetAll => {
            let board_id = params.numeric_id("boardId")?;
            let stack_id = params.numeric_id("stackId")?;
            let cards = client.cards(board_id, stack_id).await?;
            let count = cards.len();
            Ok(Envelope::ok(
                resource,
                operation,
                json!({ "cards": cards, "boardId": board_id, "stackId": stack_id }),
            )
            .with_message(format!("{count} cards found")))
        }
        Operation::Get => {
            let card = client
                .card(
                    params.numeric_id("boardId")?,
                    params.numeric_id("stackId")?,
                    params.numeric_id("cardId")?,
                )
                .await?;
            Ok(Envelope::ok(resource, operation, json!({ "card": card })))
        }
        Operation::Create => {
            let board_id = params.numeric_id("boardId")?;
            let stack_id = params.numeric_id("stackId")?;
            let create = CardCreate {
                title: params.str_required("title")?,
                // "plain" is the server default, so it is not sent
                kind: params.str_opt("type").filter(|t| t != "plain"),
                order: params.i64_opt("order").filter(|order| *order > 0),
                description: params.str_opt("description"),
                duedate: params.str_opt("duedate"),
            };
            let card = client.create_card(board_id, stack_id, &create).await?;

            let mut effects = Vec::new();
            if let Some(card_id) = card.id {
                effects = card_side_effects(
                    client,
                    board_id,
                    stack_id,
                    card_id,
                    params.opt_string_id("assignUser")?,
                    params.numeric_id_list("assignLabels")?,
                )
                .await;
            }
            Ok(Envelope::ok(resource, operation, json!({ "card": card }))
                .with_message("card created")
                .with_side_effects(effects))
        }
        Operation::Update => {
            let board_id = params.numeric_id("boardId")?;
            let stack_id = params.numeric_id("stackId")?;
            let card_id = params.numeric_id("cardId")?;
            let order = match params.i64_opt("order") {
                Some(order) if order != 0 => order,
                _ => client
                    .card(board_id, stack_id, card_id)
                    .await?
                    .order
                    .unwrap_or(0),
            };
            let update = CardUpdate {
                title: params.str_opt("title"),
                description: params.str_opt("description"),
                kind: params.str_opt("type"),
                order,
                duedate: params.str_opt("duedate"),
            };
            let card = client
                .update_card(board_id, stack_id, card_id, &update)
                .await?;

            let effects = card_side_effects(
                client,
                board_id,
                stack_id,
                card_id,
                params.opt_string_id("assignUser")?,
                params.numeric_id_list("assignLabels")?,
            )
            .await;
            Ok(Envelope::ok(resource, operation, json!({ "card": card }))
                .with_message("card updated")
                .with_side_effects(effects))
        }
        Operation::Delete => {
            let data = client
                .delete_card(
                    params.numeric_id("boardId")?,
                    params.numeric_id("stackId")?,
                    params.numeric_id("cardId")?,
                )
                .await?;
            Ok(Envelope::ok(resource, operation, data).with_message("card deleted"))
        }
        Operation::AssignUser => {
            let data = client
                .assign_user(
                    params.numeric_id("boardId")?,
                    params.numeric_id("stackId")?,
                    params.numeric_id("cardId")?,
                    &params.string_id("userId")?,
                )
                .await?;
            Ok(Envelope::ok(resource, operation, data).with_message("user assigned"))
        }
        Operation::UnassignUser => {
            let data = client
                .unassign_user(
                    params.numeric_id("boardId")?,
                    params.numeric_id("stackId")?,
                    params.numeric_id("cardId")?,
                    &params.string_id("userId")?,
                )
                .await?;
            Ok(Envelope::ok(resource, operation, data).with_message("user unassigned"))
        }
        _ => Err(unknown(resource, operation)),
    }
}

async fn label(client: &DeckClient, operation: Operation, params: &Params) -> Result<Envelope> {
    let resource = Resource::Label;
    match operation {
        Operation::GetAll => {
            let board_id = params.numeric_id("boardId")?;
            let labels = client.labels(board_id).await?;
            let count = labels.len();
            Ok(Envelope::ok(
                resource,
                operation,
                json!({ "labels": labels, "boardId": board_id }),
            )
            .with_message(format!("{count} labels found")))
        }
        Operation::Get => {
            let label = client
                .label(params.numeric_id("boardId")?, params.numeric_id("labelId")?)
                .await?;
            Ok(Envelope::ok(resource, operation, json!({ "label": label })))
        }
        Operation::Create => {
            let create = LabelCreate {
                title: params.str_required("title")?,
                // the remote API wants bare hex values
                color: params
                    .str_required("color")?
                    .trim_start_matches('#')
                    .to_string(),
            };
            let label = client
                .create_label(params.numeric_id("boardId")?, &create)
                .await?;
            Ok(Envelope::ok(resource, operation, json!({ "label": label }))
                .with_message("label created"))
        }
        Operation::Update => {
            let update = LabelUpdate {
                title: params.str_opt("title"),
                color: params
                    .str_opt("color")
                    .map(|c| c.trim_start_matches('#').to_string()),
            };
            let label = client
                .update_label(
                    params.numeric_id("boardId")?,
                    params.numeric_id("labelId")?,
                    &update,
                )
                .await?;
            Ok(Envelope::ok(resource, operation, json!({ "label": label }))
                .with_message("label updated"))
        }
        Operation::Delete => {
            let data = client
                .delete_label(params.numeric_id("boardId")?, params.numeric_id("labelId")?)
                .await?;
            Ok(Envelope::ok(resource, operation, data).with_message("label deleted"))
        }
        Operation::AssignToCard => {
            let data = client
                .assign_label(
                    params.numeric_id("boardId")?,
                    params.numeric_id("stackId")?,
                    params.numeric_id("cardId")?,
                    params.numeric_id("labelId")?,
                )
                .await?;
            Ok(Envelope::ok(resource, operation, data).with_message("label assigned to card"))
        }
        Operation::RemoveFromCard => {
            let data = client
                .remove_label(
                    params.numeric_id("boardId")?,
                    params.numeric_id("stackId")?,
                    params.numeric_id("cardId")?,
                    params.numeric_id("labelId")?,
                )
                .await?;
            Ok(Envelope::ok(resource, operation, data).with_message("label removed from card"))
        }
        _ => Err(unknown(resource, operation)),
    }
}

async fn comment(client: &DeckClient, operation: Operation, params: &Params) -> Result<Envelope> {
    let resource = Resource::Comment;
    match operation {
        Operation::GetAll => {
            let card_id = params.numeric_id("cardId")?;
            let comments = client
                .comments(card_id, params.i64_opt("limit"), params.i64_opt("offset"))
                .await?;
            let count = comments.len();
            Ok(Envelope::ok(
                resource,
                operation,
                json!({ "comments": comments, "cardId": card_id }),
            )
            .with_message(format!("{count} comments found")))
        }
        Operation::Get => {
            let comment = client
                .comment(params.numeric_id("cardId")?, params.numeric_id("commentId")?)
                .await?;
            Ok(Envelope::ok(
                resource,
                operation,
                json!({ "comment": comment }),
            ))
        }
        Operation::Create => {
            let create = CommentCreate {
                message: params.str_required("message")?,
                parent_id: None,
            };
            let comment = client
                .create_comment(params.numeric_id("cardId")?, &create)
                .await?;
            Ok(Envelope::ok(
                resource,
                operation,
                json!({ "comment": comment }),
            )
            .with_message("comment created"))
        }
        Operation::Update => {
            let comment = client
                .update_comment(
                    params.numeric_id("cardId")?,
                    params.numeric_id("commentId")?,
                    &params.str_required("message")?,
                )
                .await?;
            Ok(Envelope::ok(
                resource,
                operation,
                json!({ "comment": comment }),
            )
            .with_message("comment updated"))
        }
        Operation::Delete => {
            let data = client
                .delete_comment(
                    params.numeric_id("cardId")?,
                    params.numeric_id("commentId")?,
                )
                .await?;
            Ok(Envelope::ok(resource, operation, data).with_message("comment deleted"))
        }
        _ => Err(unknown(resource, operation)),
    }
}

async fn attachment(
    client: &DeckClient,
    operation: Operation,
    params: &Params,
) -> Result<Envelope> {
    let resource = Resource::Attachment;
    if !matches!(
        operation,
        Operation::GetAll
            | Operation::Get
            | Operation::Create
            | Operation::Update
            | Operation::Delete
    ) {
        return Err(unknown(resource, operation));
    }
    let board_id = params.numeric_id("boardId")?;
    let stack_id = params.numeric_id("stackId")?;
    let card_id = params.numeric_id("cardId")?;
    match operation {
        Operation::GetAll => {
            let attachments = client.attachments(board_id, stack_id, card_id).await?;
            let count = attachments.len();
            Ok(Envelope::ok(
                resource,
                operation,
                json!({
                    "attachments": attachments,
                    "boardId": board_id,
                    "stackId": stack_id,
                    "cardId": card_id,
                }),
            )
            .with_message(format!("{count} attachments found")))
        }
        Operation::Get => {
            let attachment = client
                .attachment(
                    board_id,
                    stack_id,
                    card_id,
                    params.numeric_id("attachmentId")?,
                )
                .await?;
            Ok(Envelope::ok(
                resource,
                operation,
                json!({ "attachment": attachment }),
            ))
        }
        Operation::Create => {
            let kind_tag = params.str_required("type")?;
            let kind = AttachmentKind::parse(&kind_tag).ok_or_else(|| {
                DeckError::invalid_parameter(
                    "type",
                    format!("'{kind_tag}' is not 'deck_file' or 'file'"),
                )
            })?;
            let create = AttachmentCreate {
                kind,
                data: params.str_required("data")?,
                file: params.binary_opt("binary")?,
                file_name: params.str_opt("fileName"),
            };
            let attachment = client
                .create_attachment(board_id, stack_id, card_id, create)
                .await?;
            Ok(Envelope::ok(
                resource,
                operation,
                json!({ "attachment": attachment }),
            )
            .with_message("attachment created"))
        }
        Operation::Update => {
            let attachment = client
                .update_attachment(
                    board_id,
                    stack_id,
                    card_id,
                    params.numeric_id("attachmentId")?,
                    params.str_opt("data").as_deref(),
                )
                .await?;
            Ok(Envelope::ok(
                resource,
                operation,
                json!({ "attachment": attachment }),
            )
            .with_message("attachment updated"))
        }
        Operation::Delete => {
            let data = client
                .delete_attachment(
                    board_id,
                    stack_id,
                    card_id,
                    params.numeric_id("attachmentId")?,
                )
                .await?;
            Ok(Envelope::ok(resource, operation, data).with_message("attachment deleted"))
        }
        _ => Err(unknown(resource, operation)),
    }
}
