//! Comment operations on the Deck OCS surface.
//!
//! Comments are card-scoped; the board/stack context is not part of the
//! path. There is no get-single endpoint, so single lookups fetch the
//! collection and filter.

use reqwest::Method;
use serde_json::{json, Value};

use crate::client::{DeckClient, Surface};
use crate::error::{DeckError, Result};
use crate::types::{Comment, CommentCreate};

impl DeckClient {
    /// List the comments of a card, newest first, with optional paging.
    pub async fn comments(
        &self,
        card_id: i64,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Comment>> {
        let mut path = format!("/cards/{card_id}/comments");
        let mut query = Vec::new();
        if let Some(limit) = limit {
            query.push(format!("limit={limit}"));
        }
        if let Some(offset) = offset {
            query.push(format!("offset={offset}"));
        }
        if !query.is_empty() {
            path.push('?');
            path.push_str(&query.join("&"));
        }

        let payload = self.call(Method::GET, Surface::DeckOcs, &path, None).await?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Fetch a single comment by filtering the card's comment collection.
    pub async fn comment(&self, card_id: i64, comment_id: i64) -> Result<Comment> {
        let comments = self.comments(card_id, None, None).await?;
        comments
            .into_iter()
            .find(|comment| comment.id == Some(comment_id))
            .ok_or_else(|| DeckError::not_found(format!("comment {comment_id}")))
    }

    /// Create a top-level comment on a card. `parentId` is sent as null;
    /// threaded replies are not exposed.
    pub async fn create_comment(&self, card_id: i64, comment: &CommentCreate) -> Result<Comment> {
        let body = serde_json::to_value(comment)?;
        let payload = self
            .call(
                Method::POST,
                Surface::DeckOcs,
                &format!("/cards/{card_id}/comments"),
                Some(&body),
            )
            .await?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Replace the message of a comment.
    pub async fn update_comment(
        &self,
        card_id: i64,
        comment_id: i64,
        message: &str,
    ) -> Result<Comment> {
        let payload = self
            .call(
                Method::PUT,
                Surface::DeckOcs,
                &format!("/cards/{card_id}/comments/{comment_id}"),
                Some(&json!({ "message": message })),
            )
            .await?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Delete a comment.
    pub async fn delete_comment(&self, card_id: i64, comment_id: i64) -> Result<Value> {
        self.call(
            Method::DELETE,
            Surface::DeckOcs,
            &format!("/cards/{card_id}/comments/{comment_id}"),
            None,
        )
        .await
    }
}
