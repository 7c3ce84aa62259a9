//! Card operations on the Deck REST surface, plus the assignment and
//! label-attachment sub-operations. Card paths carry the full
//! board/stack scope.

use reqwest::Method;
use serde_json::{json, Value};

use crate::client::{DeckClient, Surface};
use crate::error::Result;
use crate::types::{Card, CardCreate, CardUpdate};

impl DeckClient {
    fn card_root(board_id: i64, stack_id: i64) -> String {
        format!("/boards/{board_id}/stacks/{stack_id}/cards")
    }

    /// List the cards of a stack.
    pub async fn cards(&self, board_id: i64, stack_id: i64) -> Result<Vec<Card>> {
        let payload = self
            .call(
                Method::GET,
                Surface::Deck,
                &Self::card_root(board_id, stack_id),
                None,
            )
            .await?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Fetch a single card.
    pub async fn card(&self, board_id: i64, stack_id: i64, card_id: i64) -> Result<Card> {
        let path = format!("{}/{card_id}", Self::card_root(board_id, stack_id));
        let payload = self.call(Method::GET, Surface::Deck, &path, None).await?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Create a card in a stack.
    pub async fn create_card(
        &self,
        board_id: i64,
        stack_id: i64,
        card: &CardCreate,
    ) -> Result<Card> {
        let body = serde_json::to_value(card)?;
        let payload = self
            .call(
                Method::POST,
                Surface::Deck,
                &Self::card_root(board_id, stack_id),
                Some(&body),
            )
            .await?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Update a card. `order` is always sent; callers that do not want to
    /// move the card echo the current order (the dispatch layer does this).
    pub async fn update_card(
        &self,
        board_id: i64,
        stack_id: i64,
        card_id: i64,
        update: &CardUpdate,
    ) -> Result<Card> {
        let path = format!("{}/{card_id}", Self::card_root(board_id, stack_id));
        let body = serde_json::to_value(update)?;
        let payload = self
            .call(Method::PUT, Surface::Deck, &path, Some(&body))
            .await?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Delete a card.
    pub async fn delete_card(&self, board_id: i64, stack_id: i64, card_id: i64) -> Result<Value> {
        let path = format!("{}/{card_id}", Self::card_root(board_id, stack_id));
        self.call(Method::DELETE, Surface::Deck, &path, None).await
    }

    /// Assign a user to a card.
    pub async fn assign_user(
        &self,
        board_id: i64,
        stack_id: i64,
        card_id: i64,
        user_id: &str,
    ) -> Result<Value> {
        let path = format!("{}/{card_id}/assignUser", Self::card_root(board_id, stack_id));
        self.call(
            Method::PUT,
            Surface::Deck,
            &path,
            Some(&json!({ "userId": user_id })),
        )
        .await
    }

    /// Remove a user assignment from a card.
    pub async fn unassign_user(
        &self,
        board_id: i64,
        stack_id: i64,
        card_id: i64,
        user_id: &str,
    ) -> Result<Value> {
        let path = format!(
            "{}/{card_id}/unassignUser",
            Self::card_root(board_id, stack_id)
        );
        self.call(
            Method::PUT,
            Surface::Deck,
            &path,
            Some(&json!({ "userId": user_id })),
        )
        .await
    }

    /// Attach an existing board label to a card.
    pub async fn assign_label(
        &self,
        board_id: i64,
        stack_id: i64,
        card_id: i64,
        label_id: i64,
    ) -> Result<Value> {
        let path = format!(
            "{}/{card_id}/assignLabel",
            Self::card_root(board_id, stack_id)
        );
        self.call(
            Method::PUT,
            Surface::Deck,
            &path,
            Some(&json!({ "labelId": label_id })),
        )
        .await
    }

    /// Detach a label from a card. The label itself stays on the board.
    pub async fn remove_label(
        &self,
        board_id: i64,
        stack_id: i64,
        card_id: i64,
        label_id: i64,
    ) -> Result<Value> {
        let path = format!(
            "{}/{card_id}/removeLabel",
            Self::card_root(board_id, stack_id)
        );
        self.call(
            Method::PUT,
            Surface::Deck,
            &path,
            Some(&json!({ "labelId": label_id })),
        )
        .await
    }
}
