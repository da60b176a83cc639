use serde::{Deserialize, Serialize};

use super::item::Item;
use super::RegistryError;
use crate::types::identifiers::CategoryKey;

/// Operator-supplied parameters for a category seen for the first time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySpec {
    pub points: u32,
    pub description: String,
    pub is_news: bool,
}

impl CategorySpec {
    pub fn new(
        points: i64,
        description: impl Into<String>,
        is_news: bool,
    ) -> Result<Self, RegistryError> {
        let points = u32::try_from(points).map_err(|_| RegistryError::InvalidPoints(points))?;
        Ok(CategorySpec {
            points,
            description: description.into(),
            is_news,
        })
    }
}

/// A class of links sharing a point value and weighting.
///
/// Created once, then only appended to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(skip)]
    key: CategoryKey,
    points: u32,
    description: String,
    #[serde(default)]
    is_news: bool,
    #[serde(rename = "links", default)]
    items: Vec<Item>,
}

impl Category {
    pub(crate) fn from_spec(key: CategoryKey, spec: CategorySpec) -> Self {
        let description = match spec.description.trim() {
            "" => format!("Category: {key}"),
            trimmed => trimmed.to_string(),
        };
        Category {
            key,
            points: spec.points,
            description,
            is_news: spec.is_news,
            items: Vec::new(),
        }
    }

    /// Snapshots carry the key outside the record.
    pub(crate) fn with_key(mut self, key: CategoryKey) -> Self {
        self.key = key;
        self
    }

    pub fn key(&self) -> &CategoryKey {
        &self.key
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_news(&self) -> bool {
        self.is_news
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn unused_count(&self) -> usize {
        self.items.iter().filter(|item| !item.is_used()).count()
    }

    pub fn used_count(&self) -> usize {
        self.items.len() - self.unused_count()
    }

    pub(crate) fn push(&mut self, item: Item) -> Result<(), RegistryError> {
        if self.items.iter().any(|i| i.reference() == item.reference()) {
            return Err(RegistryError::DuplicateReference {
                category: self.key.as_str().to_string(),
                reference: item.reference().to_string(),
            });
        }
        self.items.push(item);
        Ok(())
    }

    pub(crate) fn item_mut(&mut self, index: usize) -> Option<&mut Item> {
        self.items.get_mut(index)
    }
}
