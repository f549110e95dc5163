//! Client library for the 1Password Connect vault API.
//!
//! Resolve a vault by name, list and fetch its items, narrow them with
//! filters, and create notes and passwords:
//!
//! ```no_run
//! use opconnect::{ClientConfig, ConnectClient, filter_by_tags, with_tags};
//!
//! # async fn run() -> Result<(), opconnect::ConnectError> {
//! let mut client = ConnectClient::new(ClientConfig::from_env("http://localhost:8080"))?;
//! client.resolve_vault("UIO").await?;
//!
//! let items = client.items()?;
//! let tokens = items.get(&[filter_by_tags(["root_token"])]).await?;
//! let note = items.notes().create("deploy", "notes...", [with_tags(["ops"])]).await?;
//! # let _ = (tokens, note);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod client;
pub mod config;
pub mod document;
pub mod error;
pub mod filter;
pub mod item;
pub mod token;
pub mod vault;

pub use builder::{
    ItemOption, NoteClient, PasswordClient, new_item, with_category, with_fields, with_tags,
    with_vault_id,
};
pub use client::ConnectClient;
pub use config::{ClientConfig, TOKEN_ENV, TokenSource};
pub use document::{Field, Item, ItemCategory, Vault};
pub use error::ConnectError;
pub use filter::{
    Filter, ItemPredicate, apply_filters, filter_by, filter_by_category, filter_by_tags,
    filter_by_title, item_contains_tag,
};
pub use item::ItemClient;
pub use token::AccessToken;
pub use vault::VaultHandle;

/// Path prefix of the Connect REST API version this crate speaks.
pub const API_VERSION_PATH: &str = "/v1";
