//! Attachment operations on the Deck REST surface.
//!
//! Creation is a multipart upload; everything else is plain JSON. Like
//! comments, there is no get-single endpoint, so single lookups filter
//! the card's attachment collection.

use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde_json::{json, Value};

use crate::client::{DeckClient, Surface};
use crate::error::{DeckError, Result};
use crate::types::{Attachment, AttachmentCreate, AttachmentKind};

impl DeckClient {
    fn attachment_root(board_id: i64, stack_id: i64, card_id: i64) -> String {
        format!("/boards/{board_id}/stacks/{stack_id}/cards/{card_id}/attachments")
    }

    /// List the attachments of a card.
    pub async fn attachments(
        &self,
        board_id: i64,
        stack_id: i64,
        card_id: i64,
    ) -> Result<Vec<Attachment>> {
        let payload = self
            .call(
                Method::GET,
                Surface::Deck,
                &Self::attachment_root(board_id, stack_id, card_id),
                None,
            )
            .await?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Fetch a single attachment by filtering the card's collection.
    pub async fn attachment(
        &self,
        board_id: i64,
        stack_id: i64,
        card_id: i64,
        attachment_id: i64,
    ) -> Result<Attachment> {
        let attachments = self.attachments(board_id, stack_id, card_id).await?;
        attachments
            .into_iter()
            .find(|attachment| attachment.id == Some(attachment_id))
            .ok_or_else(|| DeckError::not_found(format!("attachment {attachment_id}")))
    }

    /// Upload an attachment as a multipart form.
    ///
    /// A `deck_file` attachment references a path inside Nextcloud Files,
    /// so `data` goes as a text field. A `file` attachment carries the
    /// content itself: the binary payload when one was supplied, the
    /// `data` string otherwise.
    pub async fn create_attachment(
        &self,
        board_id: i64,
        stack_id: i64,
        card_id: i64,
        attachment: AttachmentCreate,
    ) -> Result<Attachment> {
        let mut form = Form::new().text("type", attachment.kind.as_str());

        form = match (attachment.kind, attachment.file) {
            (AttachmentKind::File, Some(bytes)) => {
                let file_name = attachment
                    .file_name
                    .unwrap_or_else(|| attachment.data.clone());
                form.part("file", Part::bytes(bytes).file_name(file_name))
            }
            _ => form.text("data", attachment.data),
        };

        let payload = self
            .call_multipart(
                Surface::Deck,
                &Self::attachment_root(board_id, stack_id, card_id),
                form,
            )
            .await?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Update an attachment's data reference. A `None` data leaves the
    /// content untouched.
    pub async fn update_attachment(
        &self,
        board_id: i64,
        stack_id: i64,
        card_id: i64,
        attachment_id: i64,
        data: Option<&str>,
    ) -> Result<Attachment> {
        let path = format!(
            "{}/{attachment_id}",
            Self::attachment_root(board_id, stack_id, card_id)
        );
        let body = match data {
            Some(data) => json!({ "data": data }),
            None => json!({}),
        };
        let payload = self
            .call(Method::PUT, Surface::Deck, &path, Some(&body))
            .await?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Delete an attachment.
    pub async fn delete_attachment(
        &self,
        board_id: i64,
        stack_id: i64,
        card_id: i64,
        attachment_id: i64,
    ) -> Result<Value> {
        let path = format!(
            "{}/{attachment_id}",
            Self::attachment_root(board_id, stack_id, card_id)
        );
        self.call(Method::DELETE, Surface::Deck, &path, None).await
    }
}
