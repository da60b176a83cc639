use std::fmt;

use serde::de::{Error as _, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::registry::{Category, Registry};
use crate::types::identifiers::CategoryKey;

// Wire format: one JSON object keyed by category key, entries in registry
// order. Missing `is_news` / `used` fields read as false.

impl Serialize for Registry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for category in self.categories() {
            map.serialize_entry(category.key(), category)?;
        }
        map.end()
    }
}

struct RegistryVisitor;

impl<'de> Visitor<'de> for RegistryVisitor {
    type Value = Registry;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of category key to category")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Registry, A::Error> {
        let mut categories = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, category)) = access.next_entry::<CategoryKey, Category>()? {
            categories.push(category.with_key(key));
        }
        Registry::from_categories(categories).map_err(A::Error::custom)
    }
}

impl<'de> Deserialize<'de> for Registry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RegistryVisitor)
    }
}
