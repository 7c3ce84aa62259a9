//! Stack operations on the Deck REST surface. All stack paths are
//! board-scoped.

use reqwest::Method;
use serde_json::Value;

use crate::client::{DeckClient, Surface};
use crate::error::Result;
use crate::types::{Stack, StackCreate, StackUpdate};

impl DeckClient {
    /// List the stacks of a board, in board order.
    pub async fn stacks(&self, board_id: i64) -> Result<Vec<Stack>> {
        let payload = self
            .call(
                Method::GET,
                Surface::Deck,
                &format!("/boards/{board_id}/stacks"),
                None,
            )
            .await?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Fetch a single stack, including its cards.
    pub async fn stack(&self, board_id: i64, stack_id: i64) -> Result<Stack> {
        let payload = self
            .call(
                Method::GET,
                Surface::Deck,
                &format!("/boards/{board_id}/stacks/{stack_id}"),
                None,
            )
            .await?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Create a stack on a board.
    pub async fn create_stack(&self, board_id: i64, stack: &StackCreate) -> Result<Stack> {
        let body = serde_json::to_value(stack)?;
        let payload = self
            .call(
                Method::POST,
                Surface::Deck,
                &format!("/boards/{board_id}/stacks"),
                Some(&body),
            )
            .await?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Update a stack. The remote API rejects updates without `order`;
    /// callers that do not want to move the stack must echo the current
    /// order (the dispatch layer does this).
    pub async fn update_stack(
        &self,
        board_id: i64,
        stack_id: i64,
        update: &StackUpdate,
    ) -> Result<Stack> {
        let body = serde_json::to_value(update)?;
        let payload = self
            .call(
                Method::PUT,
                Surface::Deck,
                &format!("/boards/{board_id}/stacks/{stack_id}"),
                Some(&body),
            )
            .await?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Delete a stack and the cards in it.
    pub async fn delete_stack(&self, board_id: i64, stack_id: i64) -> Result<Value> {
        self.call(
            Method::DELETE,
            Surface::Deck,
            &format!("/boards/{board_id}/stacks/{stack_id}"),
            None,
        )
        .await
    }
}
