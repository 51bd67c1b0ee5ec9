//! Item actions and batch entries

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Item, ItemId, Result};

/// Operation performed on a single item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
}

impl Action {
    /// Normalize a batch action token
    ///
    /// Matching is ASCII case-insensitive. `Read` has no token and is never
    /// produced here.
    pub fn from_token(token: &str) -> Option<Action> {
        match token.to_ascii_uppercase().as_str() {
            "POST" | "CREATE" | "ADD" => Some(Action::Create),
            "EDIT" | "UPDATE" | "PUT" => Some(Action::Update),
            "DELETE" => Some(Action::Delete),
            _ => None,
        }
    }

    /// Whether the action sends the item as its body
    pub fn carries_body(&self) -> bool {
        matches!(self, Action::Create | Action::Update)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One item plus the action to apply to it
///
/// The reserved keys [`BatchEntry::ID_KEY`] and [`BatchEntry::ACTION_KEY`]
/// live inside the item itself, and the whole map is sent as the body of a
/// create or update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchEntry(Item);

impl BatchEntry {
    pub const ID_KEY: &'static str = "_id";
    pub const ACTION_KEY: &'static str = "__action";

    /// Build an entry from an id, an action token and the item fields
    pub fn new(id: impl Into<ItemId>, action: &str, fields: Item) -> Self {
        let mut item = fields;
        item.insert(Self::ID_KEY.to_string(), Value::from(id.into()));
        item.insert(Self::ACTION_KEY.to_string(), Value::from(action));
        BatchEntry(item)
    }

    /// The entry's id, validated as a string or integer
    pub fn id(&self) -> Result<ItemId> {
        ItemId::from_value(self.0.get(Self::ID_KEY))
    }

    /// Raw action token, if the entry has a string one
    pub fn action_token(&self) -> Option<&str> {
        self.0.get(Self::ACTION_KEY).and_then(Value::as_str)
    }

    pub fn action(&self) -> Option<Action> {
        self.action_token().and_then(Action::from_token)
    }

    pub fn item(&self) -> &Item {
        &self.0
    }

    pub fn into_item(self) -> Item {
        self.0
    }
}

/// Wraps a raw map that already carries the reserved keys
impl From<Item> for BatchEntry {
    fn from(item: Item) -> Self {
        BatchEntry(item)
    }
}

/// Entry that was sent to the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedEntry {
    pub index: usize,
    pub id: ItemId,
    pub action: Action,
}

/// Entry that was skipped because its action was not recognized
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedEntry {
    pub index: usize,
    pub token: Option<String>,
}

/// Outcome of a batch that ran to the end
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub applied: Vec<AppliedEntry>,
    pub skipped: Vec<SkippedEntry>,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.applied.len() + self.skipped.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ItemsError;
    use serde_json::json;

    fn entry(value: Value) -> BatchEntry {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_action_aliases() {
        for token in ["POST", "create", "Add"] {
            assert_eq!(Action::from_token(token), Some(Action::Create));
        }
        for token in ["edit", "UPDATE", "pUt"] {
            assert_eq!(Action::from_token(token), Some(Action::Update));
        }
        assert_eq!(Action::from_token("delete"), Some(Action::Delete));
        assert_eq!(Action::from_token("read"), None);
        assert_eq!(Action::from_token("bogus"), None);
        assert_eq!(Action::from_token(" add"), None);
    }

    #[test]
    fn test_entry_accessors() {
        let e = entry(json!({"_id": 1, "__action": "ADD", "x": 1}));
        assert_eq!(e.id(), Ok(ItemId::Number(1)));
        assert_eq!(e.action_token(), Some("ADD"));
        assert_eq!(e.action(), Some(Action::Create));
        assert_eq!(e.item().len(), 3);
    }

    #[test]
    fn test_entry_without_reserved_keys() {
        let e = entry(json!({"x": 1}));
        assert_eq!(e.id(), Err(ItemsError::EmptyId));
        assert_eq!(e.action_token(), None);
        assert_eq!(e.action(), None);

        let e = entry(json!({"_id": "a", "__action": 5}));
        assert_eq!(e.action_token(), None);
    }

    #[test]
    fn test_entry_new() {
        let mut fields = Item::new();
        fields.insert("title".to_string(), json!("Dune"));
        let e = BatchEntry::new("sku-1", "update", fields);
        assert_eq!(
            serde_json::to_value(&e).unwrap(),
            json!({"_id": "sku-1", "__action": "update", "title": "Dune"})
        );
    }
}
