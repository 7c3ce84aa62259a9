//! Workflow connector for the Nextcloud Deck app.
//!
//! The crate talks to three remote surfaces (the Deck REST API, the
//! OCS-wrapped APIs, and the WebDAV comments tree), resolves host-side
//! picker selectors into plain identifiers, and exposes every Deck
//! operation both as typed calls on [`DeckClient`] and through the
//! string-tag [`dispatch`] entry point that wraps results in a uniform
//! [`Envelope`].
//!
//! ```no_run
//! use nextcloud_deck::{dispatch_str, DeckClient, DeckConfig, Params};
//! use serde_json::json;
//!
//! # async fn run() -> nextcloud_deck::Result<()> {
//! let client = DeckClient::new(DeckConfig::new(
//!     "https://cloud.example.com",
//!     "jane",
//!     "app-password",
//! ));
//! let params = Params::from_value(json!({
//!     "title": "Sprint Backlog",
//!     "color": "0066CC",
//! }))?;
//! let envelope = dispatch_str(&client, "board", "create", &params).await?;
//! assert!(envelope.success);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod loaders;
pub mod selector;
pub mod types;

mod attachment;
mod board;
mod card;
mod comment;
mod label;
mod stack;

pub use client::{unwrap_ocs, DeckClient, Surface, WebDavResponse, WEBDAV_COMMENTS_ROOT};
pub use config::{DeckConfig, HttpConfig};
pub use dispatch::{dispatch, dispatch_str, Envelope, Operation, Params, Resource, SideEffect};
pub use error::{DeckError, Result};
pub use loaders::{
    load_boards, load_cards, load_labels, load_stacks, load_users, OptionItem,
};
pub use selector::Selector;
