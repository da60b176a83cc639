pub mod category;
pub mod item;

use std::collections::BTreeMap;

use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::types::identifiers::{CategoryKey, RegistryVersion};
pub use category::{Category, CategorySpec};
pub use item::Item;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Category already exists: {0}")]
    DuplicateCategory(String),
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
    #[error("Points must be a non-negative 32-bit integer, got {0}")]
    InvalidPoints(i64),
    #[error("Reference already recorded in category {category}: {reference}")]
    DuplicateReference { category: String, reference: String },
}

/// Position of an item inside a registry: category slot, then item slot.
///
/// Carried alongside every search candidate so the committer never has to
/// look an item up by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemRef {
    pub category: usize,
    pub item: usize,
}

/// Ordered mapping from category key to category.
///
/// Insertion order is kept for display; selection never depends on it
/// except as the tie-break between items added at the same instant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    categories: Vec<Category>,
    index: BTreeMap<CategoryKey, usize>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from categories in their stored order.
    pub fn from_categories(
        categories: impl IntoIterator<Item = Category>,
    ) -> Result<Self, RegistryError> {
        let mut registry = Registry::new();
        for category in categories {
            if registry.index.contains_key(category.key()) {
                return Err(RegistryError::DuplicateCategory(
                    category.key().as_str().to_string(),
                ));
            }
            registry
                .index
                .insert(category.key().clone(), registry.categories.len());
            registry.categories.push(category);
        }
        Ok(registry)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn get(&self, key: &str) -> Option<&Category> {
        self.index
            .get(&CategoryKey::new(key))
            .map(|&slot| &self.categories[slot])
    }

    pub fn contains(&self, key: &CategoryKey) -> bool {
        self.index.contains_key(key)
    }

    pub fn create_category(
        &mut self,
        key: CategoryKey,
        spec: CategorySpec,
    ) -> Result<&Category, RegistryError> {
        if self.index.contains_key(&key) {
            return Err(RegistryError::DuplicateCategory(key.as_str().to_string()));
        }
        let slot = self.categories.len();
        self.index.insert(key.clone(), slot);
        self.categories.push(Category::from_spec(key, spec));
        Ok(&self.categories[slot])
    }

    pub fn push_item(&mut self, key: &CategoryKey, item: Item) -> Result<(), RegistryError> {
        let slot = *self
            .index
            .get(key)
            .ok_or_else(|| RegistryError::UnknownCategory(key.as_str().to_string()))?;
        self.categories[slot].push(item)
    }

    pub fn category_at(&self, slot: usize) -> Option<&Category> {
        self.categories.get(slot)
    }

    pub fn item(&self, at: ItemRef) -> Option<&Item> {
        self.categories.get(at.category)?.items().get(at.item)
    }

    pub(crate) fn item_mut(&mut self, at: ItemRef) -> Option<&mut Item> {
        self.categories.get_mut(at.category)?.item_mut(at.item)
    }

    /// Content digest over every field, in registry order.
    pub fn version(&self) -> RegistryVersion {
        fn field(hasher: &mut Sha256, bytes: &[u8]) {
            hasher.update((bytes.len() as u64).to_le_bytes());
            hasher.update(bytes);
        }

        let mut hasher = Sha256::new();
        for category in &self.categories {
            field(&mut hasher, category.key().as_str().as_bytes());
            hasher.update(category.points().to_le_bytes());
            field(&mut hasher, category.description().as_bytes());
            hasher.update([u8::from(category.is_news())]);
            hasher.update((category.items().len() as u64).to_le_bytes());
            for item in category.items() {
                field(&mut hasher, item.reference().as_bytes());
                field(&mut hasher, item.added_at().to_rfc3339().as_bytes());
                hasher.update([u8::from(item.is_used())]);
            }
        }
        RegistryVersion::from_digest(&hasher.finalize())
    }
}
