//! Item retrieval and submission, scoped to the resolved vault.
//!
//! The list endpoint returns abbreviated records without tags or fields,
//! so [`ItemClient::get`] fetches every item's details before filtering.
//! Detail fetches run one after another, and the first failure aborts the
//! whole call.

use crate::client::{Api, ConnectClient, encode_segment};
use crate::document::Item;
use crate::error::ConnectError;
use crate::filter::{Filter, apply_filters};

/// Item operations for one vault.
#[derive(Debug, Clone, Copy)]
pub struct ItemClient<'a> {
    api: &'a Api,
    vault_id: &'a str,
}

impl ConnectClient {
    /// Item client for the resolved vault.
    pub fn items(&self) -> Result<ItemClient<'_>, ConnectError> {
        Ok(ItemClient {
            api: &self.api,
            vault_id: self.vault.id()?,
        })
    }
}

impl<'a> ItemClient<'a> {
    /// Id of the vault this client is scoped to.
    pub fn vault_id(&self) -> &'a str {
        self.vault_id
    }

    fn items_path(&self) -> String {
        format!("/vaults/{}/items", encode_segment(self.vault_id))
    }

    /// List item summaries in the vault.
    pub async fn list(&self) -> Result<Vec<Item>, ConnectError> {
        self.api.get(&self.items_path()).await
    }

    /// Fetch one item with all of its tags and fields.
    pub async fn get_details(&self, item_id: &str) -> Result<Item, ConnectError> {
        let path = format!("{}/{}", self.items_path(), encode_segment(item_id));
        self.api.get(&path).await
    }

    /// List the vault, expand every summary to its detailed record, then
    /// apply `filters` in order. Output keeps the listing order.
    pub async fn get(&self, filters: &[Filter]) -> Result<Vec<Item>, ConnectError> {
        let summaries = self.list().await?;
        tracing::debug!(
            vault_id = self.vault_id,
            count = summaries.len(),
            "fetching item details"
        );

        let mut detailed = Vec::with_capacity(summaries.len());
        for summary in &summaries {
            detailed.push(self.get_details(summary.id()).await?);
        }
        Ok(apply_filters(detailed, filters))
    }

    /// Submit a new item. Returns the document the server stored, which
    /// carries the server-assigned id.
    pub async fn add(&self, item: &Item) -> Result<Item, ConnectError> {
        self.api.post(&self.items_path(), item).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
