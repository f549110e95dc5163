//! Item filters.
//!
//! A [`Filter`] selects an order-preserving subsequence of items. Filters
//! are applied left to right by [`apply_filters`], each one narrowing the
//! output of the previous one.

use std::fmt;
use std::sync::Arc;

use crate::document::{Item, ItemCategory};

/// Caller-supplied item predicate used by [`Filter::Custom`].
pub type ItemPredicate = Arc<dyn Fn(&Item) -> bool + Send + Sync>;

/// One selection step over a list of items.
#[derive(Clone)]
pub enum Filter {
    /// Keep items carrying every listed tag.
    Tags(Vec<String>),
    /// Keep items whose title equals this string exactly.
    Title(String),
    /// Keep items of this category.
    Category(ItemCategory),
    /// Keep items for which the predicate returns `true`.
    Custom(ItemPredicate),
}

impl Filter {
    /// Whether `item` survives this filter.
    pub fn matches(&self, item: &Item) -> bool {
        match self {
            Self::Tags(tags) => {
                let item_tags = item.tags();
                tags.iter().all(|t| item_tags.contains(t))
            }
            Self::Title(title) => item.title() == title,
            Self::Category(category) => item.category().as_ref() == Some(category),
            Self::Custom(predicate) => predicate(item),
        }
    }

    /// Keep the matching items, in their original order.
    pub fn apply(&self, items: Vec<Item>) -> Vec<Item> {
        items.into_iter().filter(|i| self.matches(i)).collect()
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tags(tags) => f.debug_tuple("Tags").field(tags).finish(),
            Self::Title(title) => f.debug_tuple("Title").field(title).finish(),
            Self::Category(category) => f.debug_tuple("Category").field(category).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Custom filters are equal only when they share the same predicate.
impl PartialEq for Filter {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Tags(a), Self::Tags(b)) => a == b,
            (Self::Title(a), Self::Title(b)) => a == b,
            (Self::Category(a), Self::Category(b)) => a == b,
            (Self::Custom(a), Self::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Keep items carrying all of `tags`. An empty list keeps everything.
pub fn filter_by_tags<I, S>(tags: I) -> Filter
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Filter::Tags(tags.into_iter().map(Into::into).collect())
}

/// Keep items whose title equals `title` (case-sensitive).
pub fn filter_by_title(title: impl Into<String>) -> Filter {
    Filter::Title(title.into())
}

/// Keep items of `category`. Items without a category never match.
pub fn filter_by_category(category: ItemCategory) -> Filter {
    Filter::Category(category)
}

/// Keep items for which `predicate` returns `true`.
pub fn filter_by<F>(predicate: F) -> Filter
where
    F: Fn(&Item) -> bool + Send + Sync + 'static,
{
    Filter::Custom(Arc::new(predicate))
}

/// Whether `tag` is among the item's tags.
pub fn item_contains_tag(item: &Item, tag: &str) -> bool {
    item.tags().iter().any(|t| t == tag)
}

/// Run `items` through every filter in order. No filters returns `items`
/// unchanged.
pub fn apply_filters(items: Vec<Item>, filters: &[Filter]) -> Vec<Item> {
    filters.iter().fold(items, |items, filter| filter.apply(items))
}
