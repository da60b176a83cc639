use serde::{Deserialize, Serialize};

use crate::types::identifiers::Timestamp;

/// One consumable link.
///
/// `used` only ever moves from `false` to `true`; there is no way back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "url")]
    reference: String,
    #[serde(rename = "date_added")]
    added_at: Timestamp,
    #[serde(default)]
    used: bool,
}

impl Item {
    pub fn new(reference: impl Into<String>, added_at: Timestamp) -> Self {
        Item {
            reference: reference.into(),
            added_at,
            used: false,
        }
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn added_at(&self) -> Timestamp {
        self.added_at
    }

    pub fn is_used(&self) -> bool {
        self.used
    }

    /// Returns false if the item was already consumed.
    pub(crate) fn consume(&mut self) -> bool {
        !std::mem::replace(&mut self.used, true)
    }
}
