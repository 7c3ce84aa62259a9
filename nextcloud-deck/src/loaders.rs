//! Option loaders for interactive pickers.
//!
//! These feed selection lists in a host UI, so they never return an
//! error: any failure or missing prerequisite degrades to a single
//! placeholder entry with an empty value. Failures are logged, not
//! propagated.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use reqwest::Method;

use crate::client::{DeckClient, Surface};
use crate::selector::Selector;

/// Limit on picker entries, matching the sharee search page size.
const MAX_OPTIONS: usize = 50;

/// One entry in a selection list. Placeholder entries carry an empty
/// value and must not be submitted as identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionItem {
    pub name: String,
    pub value: String,
}

impl OptionItem {
    fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    fn placeholder(name: &str) -> Vec<Self> {
        vec![Self::new(name, "")]
    }
}

fn matches_filter(title: &str, filter: Option<&str>) -> bool {
    match filter.map(str::trim).filter(|f| !f.is_empty()) {
        Some(filter) => title.to_lowercase().contains(&filter.to_lowercase()),
        None => true,
    }
}

/// Resolve a raw picker parameter to a numeric ID, or `None` when it is
/// unset or not numeric.
fn resolve_id(raw: Option<&Value>) -> Option<i64> {
    let selector = Selector::from_value(raw?).ok()?;
    selector.numeric_id().ok()
}

/// List boards as picker options.
pub async fn load_boards(client: &DeckClient, filter: Option<&str>) -> Vec<OptionItem> {
    let boards = match client.boards().await {
        Ok(boards) => boards,
        Err(error) => {
            warn!(%error, "board loading failed");
            return OptionItem::placeholder("Could not load boards");
        }
    };
    let options: Vec<OptionItem> = boards
        .into_iter()
        .filter(|board| matches_filter(&board.title, filter))
        .filter_map(|board| Some(OptionItem::new(board.title, board.id?.to_string())))
        .take(MAX_OPTIONS)
        .collect();
    if options.is_empty() {
        return OptionItem::placeholder("No boards found");
    }
    options
}

/// List the stacks of the selected board as picker options.
pub async fn load_stacks(
    client: &DeckClient,
    board: Option<&Value>,
    filter: Option<&str>,
) -> Vec<OptionItem> {
    let Some(board_id) = resolve_id(board) else {
        return OptionItem::placeholder("Select a board first");
    };
    let stacks = match client.stacks(board_id).await {
        Ok(stacks) => stacks,
        Err(error) => {
            warn!(%board_id, %error, "stack loading failed");
            return OptionItem::placeholder("Could not load stacks");
        }
    };
    let options: Vec<OptionItem> = stacks
        .into_iter()
        .filter(|stack| matches_filter(&stack.title, filter))
        .filter_map(|stack| Some(OptionItem::new(stack.title, stack.id?.to_string())))
        .take(MAX_OPTIONS)
        .collect();
    if options.is_empty() {
        return OptionItem::placeholder("No stacks found");
    }
    options
}

/// List the cards of the selected board and stack as picker options.
pub async fn load_cards(
    client: &DeckClient,
    board: Option<&Value>,
    stack: Option<&Value>,
    filter: Option<&str>,
) -> Vec<OptionItem> {
    let (Some(board_id), Some(stack_id)) = (resolve_id(board), resolve_id(stack)) else {
        return OptionItem::placeholder("Select a board and a stack first");
    };
    let cards = match client.cards(board_id, stack_id).await {
        Ok(cards) => cards,
        Err(error) => {
            warn!(%board_id, %stack_id, %error, "card loading failed");
            return OptionItem::placeholder("Could not load cards");
        }
    };
    let options: Vec<OptionItem> = cards
        .into_iter()
        .filter(|card| matches_filter(&card.title, filter))
        .filter_map(|card| Some(OptionItem::new(card.title, card.id?.to_string())))
        .take(MAX_OPTIONS)
        .collect();
    if options.is_empty() {
        return OptionItem::placeholder("No cards found");
    }
    options
}

/// List the labels of the selected board as picker options.
pub async fn load_labels(
    client: &DeckClient,
    board: Option<&Value>,
    filter: Option<&str>,
) -> Vec<OptionItem> {
    let Some(board_id) = resolve_id(board) else {
        return OptionItem::placeholder("Select a board first");
    };
    let labels = match client.labels(board_id).await {
        Ok(labels) => labels,
        Err(error) => {
            warn!(%board_id, %error, "label loading failed");
            return OptionItem::placeholder("Could not load labels");
        }
    };
    let options: Vec<OptionItem> = labels
        .into_iter()
        .filter(|label| matches_filter(&label.title, filter))
        .filter_map(|label| Some(OptionItem::new(label.title, label.id?.to_string())))
        .take(MAX_OPTIONS)
        .collect();
    if options.is_empty() {
        return OptionItem::placeholder("No labels found");
    }
    options
}

#[derive(Debug, Deserialize)]
struct ShareeValue {
    #[serde(rename = "shareWith")]
    share_with: String,
    #[serde(rename = "shareWithDisplayName")]
    share_with_display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ShareeEntry {
    value: ShareeValue,
}

#[derive(Debug, Default, Deserialize)]
struct ShareeResult {
    #[serde(default)]
    users: Vec<ShareeEntry>,
}

#[derive(Debug, Default, Deserialize)]
struct CloudUsersResponse {
    #[serde(default)]
    users: Vec<String>,
}

/// List assignable users as picker options.
///
/// The configured account always comes first. The rest is filled from
/// the sharee search; when that surface is unavailable, the cloud user
/// listing serves as fallback, and when both fail the list degrades to
/// just the current account.
pub async fn load_users(client: &DeckClient, filter: Option<&str>) -> Vec<OptionItem> {
    let current = client.username().to_string();
    let mut options = vec![OptionItem::new(format!("{current} (you)"), current.clone())];

    match sharee_search(client, filter).await {
        Ok(sharees) => {
            for entry in sharees.users {
                let value = entry.value;
                options.push(OptionItem::new(
                    value
                        .share_with_display_name
                        .unwrap_or_else(|| value.share_with.clone()),
                    value.share_with,
                ));
            }
        }
        Err(error) => {
            warn!(%error, "sharee search failed, falling back to user listing");
            match cloud_users(client).await {
                Ok(listing) => {
                    for user_id in listing.users {
                        if matches_filter(&user_id, filter) {
                            options.push(OptionItem::new(user_id.clone(), user_id));
                        }
                    }
                }
                Err(error) => {
                    warn!(%error, "user listing failed, keeping only the current user");
                }
            }
        }
    }

    let mut seen = std::collections::HashSet::new();
    options.retain(|option| seen.insert(option.value.clone()));
    options.truncate(MAX_OPTIONS);
    options
}

async fn sharee_search(
    client: &DeckClient,
    filter: Option<&str>,
) -> crate::error::Result<ShareeResult> {
    let search = urlencoding::encode(filter.unwrap_or(""));
    let path = format!("/sharees?search={search}&itemType=0&perPage={MAX_OPTIONS}");
    let payload = client
        .call(Method::GET, Surface::Sharees, &path, None)
        .await?;
    Ok(serde_json::from_value(payload)?)
}

async fn cloud_users(client: &DeckClient) -> crate::error::Result<CloudUsersResponse> {
    let payload = client
        .call(Method::GET, Surface::CloudUsers, "/users", None)
        .await?;
    Ok(serde_json::from_value(payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filter_matching_is_case_insensitive() {
        assert!(matches_filter("Sprint Backlog", Some("sprint")));
        assert!(matches_filter("Sprint Backlog", Some("BACK")));
        assert!(!matches_filter("Sprint Backlog", Some("done")));
        assert!(matches_filter("Sprint Backlog", None));
        assert!(matches_filter("Sprint Backlog", Some("  ")));
    }

    #[test]
    fn test_resolve_id_handles_both_selector_shapes() {
        assert_eq!(resolve_id(Some(&json!("17"))), Some(17));
        assert_eq!(
            resolve_id(Some(&json!({"mode": "list", "value": "17"}))),
            Some(17)
        );
        assert_eq!(resolve_id(Some(&json!("abc"))), None);
        assert_eq!(resolve_id(None), None);
    }

    #[test]
    fn test_placeholder_entries_carry_empty_value() {
        let options = OptionItem::placeholder("No boards found");
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].name, "No boards found");
        assert_eq!(options[0].value, "");
    }

    #[test]
    fn test_sharee_result_parses_wire_shape() {
        let result: ShareeResult = serde_json::from_value(json!({
            "exact": {"users": []},
            "users": [
                {"label": "John Doe", "value": {"shareWith": "jdoe", "shareWithDisplayName": "John Doe"}}
            ]
        }))
        .unwrap();
        assert_eq!(result.users.len(), 1);
        assert_eq!(result.users[0].value.share_with, "jdoe");
    }
}
