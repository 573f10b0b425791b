use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Anything the engine can place in a column.
pub trait Named {
    fn name(&self) -> &str;
}

/// A candidate described by free-form attributes, e.g. a city with nested
/// `education`, `taxes` or `climate` groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    pub name: String,
    #[serde(flatten)]
    pub attributes: BTreeMap<String, Attribute>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Attribute {
    Number(f64),
    Flag(bool),
    Text(String),
    Group(BTreeMap<String, Attribute>),
    Null,
}

impl Named for Alternative {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Alternative {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Builder used mostly by tests and programmatic callers. `path` is dotted;
    /// intermediate groups are created on demand.
    pub fn with(mut self, path: &str, value: f64) -> Self {
        let parts = path.split('.').collect::<Vec<_>>();
        insert_path(&mut self.attributes, &parts, value);
        self
    }

    pub fn lookup(&self, path: &str) -> Option<&Attribute> {
        let mut parts = path.split('.');
        let first = parts.next()?;
        let mut current = self.attributes.get(first)?;
        for part in parts {
            current = match current {
                Attribute::Group(map) => map.get(part)?,
                _ => return None,
            };
        }
        Some(current)
    }
}

fn insert_path(map: &mut BTreeMap<String, Attribute>, path: &[&str], value: f64) {
    match path {
        [] => {}
        [last] => {
            map.insert(last.to_string(), Attribute::Number(value));
        }
        [head, rest @ ..] => {
            let entry = map
                .entry(head.to_string())
                .or_insert_with(|| Attribute::Group(BTreeMap::new()));
            if !matches!(entry, Attribute::Group(_)) {
                *entry = Attribute::Group(BTreeMap::new());
            }
            if let Attribute::Group(inner) = entry {
                insert_path(inner, rest, value);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/alternative.rs"]
mod tests;
