//! Label operations on the Deck REST surface.
//!
//! The remote API has no collection endpoint for labels; the list comes
//! from the owning board entity.

use reqwest::Method;
use serde_json::Value;

use crate::client::{DeckClient, Surface};
use crate::error::Result;
use crate::types::{Label, LabelCreate, LabelUpdate};

impl DeckClient {
    /// List the labels of a board, read from the board entity.
    pub async fn labels(&self, board_id: i64) -> Result<Vec<Label>> {
        let board = self.board(board_id).await?;
        Ok(board.labels)
    }

    /// Fetch a single label.
    pub async fn label(&self, board_id: i64, label_id: i64) -> Result<Label> {
        let payload = self
            .call(
                Method::GET,
                Surface::Deck,
                &format!("/boards/{board_id}/labels/{label_id}"),
                None,
            )
            .await?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Create a label on a board. The color must already be a bare hex
    /// value without a leading `#`.
    pub async fn create_label(&self, board_id: i64, label: &LabelCreate) -> Result<Label> {
        let body = serde_json::to_value(label)?;
        let payload = self
            .call(
                Method::POST,
                Surface::Deck,
                &format!("/boards/{board_id}/labels"),
                Some(&body),
            )
            .await?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Update a label. Only the supplied fields change.
    pub async fn update_label(
        &self,
        board_id: i64,
        label_id: i64,
        update: &LabelUpdate,
    ) -> Result<Label> {
        let body = serde_json::to_value(update)?;
        let payload = self
            .call(
                Method::PUT,
                Surface::Deck,
                &format!("/boards/{board_id}/labels/{label_id}"),
                Some(&body),
            )
            .await?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Delete a label from the board and from every card carrying it.
    pub async fn delete_label(&self, board_id: i64, label_id: i64) -> Result<Value> {
        self.call(
            Method::DELETE,
            Surface::Deck,
            &format!("/boards/{board_id}/labels/{label_id}"),
            None,
        )
        .await
    }
}
