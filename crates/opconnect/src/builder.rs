//! Item construction and creation.
//!
//! [`new_item`] applies [`ItemOption`]s in order: tag and field options
//! append, category and vault options overwrite. The note and password
//! clients pre-seed their required field and then layer caller options on
//! top, so callers can add fields but never drop the seeded one.

use crate::document::{Field, Item, ItemCategory};
use crate::error::ConnectError;
use crate::item::ItemClient;

/// One ordered transform applied while building an item.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemOption {
    /// Append tags after the existing ones.
    Tags(Vec<String>),
    /// Append fields after the existing ones.
    Fields(Vec<Field>),
    /// Replace the category.
    Category(ItemCategory),
    /// Replace the owning vault id.
    VaultId(String),
}

impl ItemOption {
    /// Apply this option to `item`, returning the updated item.
    pub fn apply(self, item: Item) -> Item {
        match self {
            Self::Tags(tags) => item.append_tags(tags),
            Self::Fields(fields) => item.append_fields(fields),
            Self::Category(category) => item.set_category(category),
            Self::VaultId(id) => item.set_vault_id(id),
        }
    }
}

/// Tags to append, in order.
pub fn with_tags<I, S>(tags: I) -> ItemOption
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    ItemOption::Tags(tags.into_iter().map(Into::into).collect())
}

/// Fields to append, in order.
pub fn with_fields(fields: impl IntoIterator<Item = Field>) -> ItemOption {
    ItemOption::Fields(fields.into_iter().collect())
}

/// Category to set. A later category option overrides this one.
pub fn with_category(category: ItemCategory) -> ItemOption {
    ItemOption::Category(category)
}

/// Owning vault to set. A later vault option overrides this one.
pub fn with_vault_id(id: impl Into<String>) -> ItemOption {
    ItemOption::VaultId(id.into())
}

/// Build an item with empty tags and fields, then apply `options` in order.
pub fn new_item(title: impl Into<String>, options: impl IntoIterator<Item = ItemOption>) -> Item {
    options
        .into_iter()
        .fold(Item::new(title), |item, option| option.apply(item))
}

fn notes_field(content: impl Into<String>) -> Field {
    Field::new("notesPlain", "notesPlain", "NOTES", "STRING", content)
}

fn password_field(secret: impl Into<String>) -> Field {
    Field::new("password", "password", "PASSWORD", "CONCEALED", secret)
}

fn seeded_item(
    title: impl Into<String>,
    vault_id: &str,
    category: ItemCategory,
    field: Field,
    options: impl IntoIterator<Item = ItemOption>,
) -> Item {
    let seed = [
        with_vault_id(vault_id),
        with_category(category),
        with_fields([field]),
    ];
    new_item(title, seed.into_iter().chain(options))
}

impl<'a> ItemClient<'a> {
    /// Secure note builder scoped to this vault.
    pub fn notes(&self) -> NoteClient<'a> {
        NoteClient { items: *self }
    }

    /// Password builder scoped to this vault.
    pub fn passwords(&self) -> PasswordClient<'a> {
        PasswordClient { items: *self }
    }
}

/// Builds and creates `SECURE_NOTE` items.
#[derive(Debug, Clone, Copy)]
pub struct NoteClient<'a> {
    items: ItemClient<'a>,
}

impl NoteClient<'_> {
    /// A secure note in the resolved vault holding `content` in its
    /// `notesPlain` field.
    pub fn new_note(
        &self,
        title: impl Into<String>,
        content: impl Into<String>,
        options: impl IntoIterator<Item = ItemOption>,
    ) -> Item {
        seeded_item(
            title,
            self.items.vault_id(),
            ItemCategory::SecureNote,
            notes_field(content),
            options,
        )
    }

    /// Build a note with [`Self::new_note`] and submit it.
    pub async fn create(
        &self,
        title: impl Into<String>,
        content: impl Into<String>,
        options: impl IntoIterator<Item = ItemOption>,
    ) -> Result<Item, ConnectError> {
        let note = self.new_note(title, content, options);
        self.items.add(&note).await
    }
}

/// Builds and creates `PASSWORD` items.
#[derive(Debug, Clone, Copy)]
pub struct PasswordClient<'a> {
    items: ItemClient<'a>,
}

impl PasswordClient<'_> {
    /// A password item in the resolved vault holding `secret` in its
    /// concealed `password` field.
    pub fn new_password(
        &self,
        title: impl Into<String>,
        secret: impl Into<String>,
        options: impl IntoIterator<Item = ItemOption>,
    ) -> Item {
        seeded_item(
            title,
            self.items.vault_id(),
            ItemCategory::Password,
            password_field(secret),
            options,
        )
    }

    /// Build a password with [`Self::new_password`] and submit it.
    pub async fn create(
        &self,
        title: impl Into<String>,
        secret: impl Into<String>,
        options: impl IntoIterator<Item = ItemOption>,
    ) -> Result<Item, ConnectError> {
        let password = self.new_password(title, secret, options);
        self.items.add(&password).await
    }
}
