//! Turning raw links into registry items.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::registry::{CategorySpec, Item, Registry, RegistryError};
use crate::types::identifiers::{CategoryKey, Timestamp};

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Malformed link: {0}")]
    MalformedReference(String),
    #[error("No parameters supplied for new category: {0}")]
    UnknownCategory(String),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Category key of a link shaped `scheme://host/channels/<any>/<key>/...`.
pub fn extract_category_key(reference: &str) -> Result<CategoryKey, IngestError> {
    let parts: Vec<&str> = reference.trim().split('/').collect();
    match parts.as_slice() {
        [_, _, _, "channels", _, key, ..] if !key.is_empty() => Ok(CategoryKey::new(*key)),
        _ => Err(IngestError::MalformedReference(reference.trim().to_string())),
    }
}

/// Supplies parameters for a category key seen for the first time.
/// Returning `None` declines, and the link is not recorded.
pub trait CategoryResolver {
    fn resolve(&mut self, key: &CategoryKey) -> Option<CategorySpec>;
}

impl<F> CategoryResolver for F
where
    F: FnMut(&CategoryKey) -> Option<CategorySpec>,
{
    fn resolve(&mut self, key: &CategoryKey) -> Option<CategorySpec> {
        self(key)
    }
}

/// Outcome of a multi-line paste.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockOutcome {
    pub added: usize,
    pub rejected: Vec<String>,
}

pub struct Ingestor<'r, R> {
    registry: &'r mut Registry,
    resolver: R,
}

impl<'r, R: CategoryResolver> Ingestor<'r, R> {
    pub fn new(registry: &'r mut Registry, resolver: R) -> Self {
        Self { registry, resolver }
    }

    pub fn add_reference(&mut self, reference: &str) -> Result<CategoryKey, IngestError> {
        self.add_reference_at(reference, Timestamp::now())
    }

    pub fn add_reference_at(
        &mut self,
        reference: &str,
        added_at: Timestamp,
    ) -> Result<CategoryKey, IngestError> {
        let reference = reference.trim();
        let key = extract_category_key(reference)?;

        if !self.registry.contains(&key) {
            let spec = self
                .resolver
                .resolve(&key)
                .ok_or_else(|| IngestError::UnknownCategory(key.as_str().to_string()))?;
            let category = self.registry.create_category(key.clone(), spec)?;
            info!(
                key = %key,
                points = category.points(),
                is_news = category.is_news(),
                "new category"
            );
        }

        self.registry.push_item(&key, Item::new(reference, added_at))?;
        debug!(key = %key, reference, "link added");
        Ok(key)
    }

    /// One link per non-blank line. Bad lines are skipped and reported back.
    pub fn add_block(&mut self, block: &str) -> BlockOutcome {
        let mut outcome = BlockOutcome::default();
        for line in block.lines().map(str::trim).filter(|l| !l.is_empty()) {
            match self.add_reference(line) {
                Ok(_) => outcome.added += 1,
                Err(err) => {
                    warn!(reference = line, error = %err, "link skipped");
                    outcome.rejected.push(line.to_string());
                }
            }
        }
        outcome
    }
}
