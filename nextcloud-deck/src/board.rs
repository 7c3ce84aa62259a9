//! Board operations on the Deck REST surface.

use reqwest::Method;
use serde_json::Value;

use crate::client::{DeckClient, Surface};
use crate::error::Result;
use crate::types::{Board, BoardCreate, BoardUpdate};

impl DeckClient {
    /// List every board visible to the authenticated user.
    pub async fn boards(&self) -> Result<Vec<Board>> {
        let payload = self
            .call(Method::GET, Surface::Deck, "/boards", None)
            .await?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Fetch a single board with its labels, users and permissions.
    pub async fn board(&self, board_id: i64) -> Result<Board> {
        let payload = self
            .call(Method::GET, Surface::Deck, &format!("/boards/{board_id}"), None)
            .await?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Create a board. The server assigns the ID.
    pub async fn create_board(&self, board: &BoardCreate) -> Result<Board> {
        let body = serde_json::to_value(board)?;
        let payload = self
            .call(Method::POST, Surface::Deck, "/boards", Some(&body))
            .await?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Update a board. Only the supplied fields change.
    pub async fn update_board(&self, board_id: i64, update: &BoardUpdate) -> Result<Board> {
        let body = serde_json::to_value(update)?;
        let payload = self
            .call(
                Method::PUT,
                Surface::Deck,
                &format!("/boards/{board_id}"),
                Some(&body),
            )
            .await?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Soft-delete a board. Reversible via [`DeckClient::undo_delete_board`]
    /// until the server purges it.
    pub async fn delete_board(&self, board_id: i64) -> Result<Value> {
        self.call(
            Method::DELETE,
            Surface::Deck,
            &format!("/boards/{board_id}"),
            None,
        )
        .await
    }

    /// Restore a soft-deleted board.
    pub async fn undo_delete_board(&self, board_id: i64) -> Result<Board> {
        let payload = self
            .call(
                Method::POST,
                Surface::Deck,
                &format!("/boards/{board_id}/undo_delete"),
                None,
            )
            .await?;
        Ok(serde_json::from_value(payload)?)
    }
}
