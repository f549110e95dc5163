//! Vault and item documents.
//!
//! Both are thin wrappers over a JSON object. The Connect schema is loose,
//! so every accessor returns the zero value (`""`, an empty `Vec`, `None`)
//! when a key is missing or holds the wrong type. Unknown keys survive a
//! decode/encode cycle untouched.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The template of an item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ItemCategory {
    Password,
    SecureNote,
    Custom,
    Login,
    ApiCredential,
    Database,
    Server,
    CreditCard,
    Identity,
    Document,
    SshKey,
    /// Any category this crate does not know by name.
    Other(String),
}

impl ItemCategory {
    /// Wire representation used by the Connect API.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Password => "PASSWORD",
            Self::SecureNote => "SECURE_NOTE",
            Self::Custom => "CUSTOM",
            Self::Login => "LOGIN",
            Self::ApiCredential => "API_CREDENTIAL",
            Self::Database => "DATABASE",
            Self::Server => "SERVER",
            Self::CreditCard => "CREDIT_CARD",
            Self::Identity => "IDENTITY",
            Self::Document => "DOCUMENT",
            Self::SshKey => "SSH_KEY",
            Self::Other(s) => s,
        }
    }
}

impl From<&str> for ItemCategory {
    fn from(s: &str) -> Self {
        match s {
            "PASSWORD" => Self::Password,
            "SECURE_NOTE" => Self::SecureNote,
            "CUSTOM" => Self::Custom,
            "LOGIN" => Self::Login,
            "API_CREDENTIAL" => Self::ApiCredential,
            "DATABASE" => Self::Database,
            "SERVER" => Self::Server,
            "CREDIT_CARD" => Self::CreditCard,
            "IDENTITY" => Self::Identity,
            "DOCUMENT" => Self::Document,
            "SSH_KEY" => Self::SshKey,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl FromStr for ItemCategory {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A vault as returned by `GET /v1/vaults`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vault(Map<String, Value>);

impl Vault {
    /// Vault id, or `""` when absent or not a string.
    pub fn id(&self) -> &str {
        str_field(&self.0, "id")
    }

    /// Vault name, or `""` when absent or not a string.
    pub fn name(&self) -> &str {
        str_field(&self.0, "name")
    }

    pub fn description(&self) -> Option<&str> {
        self.0.get("description").and_then(Value::as_str)
    }

    /// The raw document.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for Vault {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// One structured secret field on an item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Field {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Keys this crate does not model (`section`, `entropy`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Field {
    /// A field with id, label, purpose and type set to fixed metadata.
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        purpose: impl Into<String>,
        field_type: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            label: Some(label.into()),
            purpose: Some(purpose.into()),
            field_type: Some(field_type.into()),
            value: Some(value.into()),
            extra: Map::new(),
        }
    }

    fn into_value(self) -> Value {
        let mut map = self.extra;
        let known = [
            ("id", self.id),
            ("label", self.label),
            ("purpose", self.purpose),
            ("type", self.field_type),
            ("value", self.value),
        ];
        for (key, value) in known {
            if let Some(v) = value {
                map.insert(key.to_owned(), Value::String(v));
            }
        }
        Value::Object(map)
    }
}

/// An item document: a summary from a list call, a detailed record, or a
/// new item built locally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item(Map<String, Value>);

impl Item {
    /// A bare item carrying a title and empty tag and field sequences.
    pub fn new(title: impl Into<String>) -> Self {
        let mut map = Map::new();
        map.insert("title".into(), Value::String(title.into()));
        map.insert("tags".into(), Value::Array(Vec::new()));
        map.insert("fields".into(), Value::Array(Vec::new()));
        Self(map)
    }

    /// Item id, or `""` when absent or not a string.
    pub fn id(&self) -> &str {
        str_field(&self.0, "id")
    }

    /// Item title, or `""` when absent or not a string.
    pub fn title(&self) -> &str {
        str_field(&self.0, "title")
    }

    /// Category, or `None` when the document carries no string category.
    pub fn category(&self) -> Option<ItemCategory> {
        self.0
            .get("category")
            .and_then(Value::as_str)
            .map(ItemCategory::from)
    }

    /// Tags in document order. Non-string elements are skipped.
    pub fn tags(&self) -> Vec<String> {
        let Some(Value::Array(values)) = self.0.get("tags") else {
            return Vec::new();
        };
        values
            .iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s.clone()),
                other => {
                    tracing::debug!(item_id = self.id(), "skipping non-string tag: {other}");
                    None
                }
            })
            .collect()
    }

    /// Fields in document order. Elements that are not objects are skipped.
    pub fn fields(&self) -> Vec<Field> {
        let Some(Value::Array(values)) = self.0.get("fields") else {
            return Vec::new();
        };
        values
            .iter()
            .filter(|v| v.is_object())
            .filter_map(|v| Field::deserialize(v).ok())
            .collect()
    }

    /// Value of the first field whose id or label equals `key`.
    pub fn field_value(&self, key: &str) -> Option<String> {
        self.fields()
            .into_iter()
            .find(|f| f.id.as_deref() == Some(key) || f.label.as_deref() == Some(key))
            .and_then(|f| f.value)
    }

    /// Id of the owning vault (`vault.id`).
    pub fn vault_id(&self) -> &str {
        self.0
            .get("vault")
            .and_then(|v| v.get("id"))
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    /// Append `tags` after the existing ones. Existing elements are kept
    /// as they are, including any that are not strings.
    pub fn append_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut current = match self.0.remove("tags") {
            Some(Value::Array(values)) => values,
            _ => Vec::new(),
        };
        current.extend(tags.into_iter().map(|t| Value::String(t.into())));
        self.0.insert("tags".into(), Value::Array(current));
        self
    }

    /// Append `fields` after the existing ones, keeping existing elements raw.
    pub fn append_fields(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        let mut current = match self.0.remove("fields") {
            Some(Value::Array(values)) => values,
            _ => Vec::new(),
        };
        current.extend(fields.into_iter().map(Field::into_value));
        self.0.insert("fields".into(), Value::Array(current));
        self
    }

    /// Replace the category.
    pub fn set_category(mut self, category: ItemCategory) -> Self {
        self.0
            .insert("category".into(), Value::String(category.as_str().to_owned()));
        self
    }

    /// Replace the owning vault with `{"id": vault_id}`.
    pub fn set_vault_id(mut self, vault_id: impl Into<String>) -> Self {
        let mut vault = Map::new();
        vault.insert("id".into(), Value::String(vault_id.into()));
        self.0.insert("vault".into(), Value::Object(vault));
        self
    }

    /// The raw document.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for Item {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn str_field<'a>(map: &'a Map<String, Value>, key: &str) -> &'a str {
    map.get(key).and_then(Value::as_str).unwrap_or("")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
