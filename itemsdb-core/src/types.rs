//! Core data types for itemsdb

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{ItemsError, Result};

/// A single document: field name to value
pub type Item = serde_json::Map<String, Value>;

/// Text the service treats as "not given": empty or `"0"`
pub fn is_blank(text: &str) -> bool {
    text.is_empty() || text == "0"
}

/// Name of a collection on the items service
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CollectionName(String);

impl CollectionName {
    /// Create a collection name, rejecting blank names (`""` and `"0"`)
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if is_blank(&name) {
            return Err(ItemsError::NoName);
        }
        Ok(CollectionName(name))
    }

    /// Get the collection name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CollectionName {
    type Error = ItemsError;

    fn try_from(name: String) -> Result<Self> {
        CollectionName::new(name)
    }
}

impl From<CollectionName> for String {
    fn from(name: CollectionName) -> Self {
        name.0
    }
}

impl std::fmt::Display for CollectionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an item within a collection
///
/// The service accepts both textual and integer ids. Emptiness is checked
/// when an operation runs, not when the id is built, so an empty id can be
/// carried around and rejected with `id empty` at the call site.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Number(i64),
    Text(String),
}

impl ItemId {
    /// Blank text (`""`, `"0"`) and integer zero all count as "no id"
    pub fn is_empty(&self) -> bool {
        match self {
            ItemId::Number(n) => *n == 0,
            ItemId::Text(s) => is_blank(s),
        }
    }

    /// Read an id out of an untyped JSON value
    ///
    /// A missing value or `null` is an empty id. Strings and integers are
    /// accepted; anything else is rejected as invalid.
    pub fn from_value(value: Option<&Value>) -> Result<Self> {
        match value {
            None | Some(Value::Null) => Err(ItemsError::EmptyId),
            Some(Value::String(s)) => Ok(ItemId::Text(s.clone())),
            Some(Value::Number(n)) => {
                if let Some(i) = n.as_i64() {
                    Ok(ItemId::Number(i))
                } else if n.is_u64() {
                    Ok(ItemId::Text(n.to_string()))
                } else {
                    Err(ItemsError::InvalidId(n.to_string()))
                }
            }
            Some(other) => Err(ItemsError::InvalidId(other.to_string())),
        }
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        ItemId::Text(id.to_string())
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        ItemId::Text(id)
    }
}

impl From<&String> for ItemId {
    fn from(id: &String) -> Self {
        ItemId::Text(id.clone())
    }
}

impl From<i64> for ItemId {
    fn from(id: i64) -> Self {
        ItemId::Number(id)
    }
}

impl From<i32> for ItemId {
    fn from(id: i32) -> Self {
        ItemId::Number(id.into())
    }
}

impl From<u32> for ItemId {
    fn from(id: u32) -> Self {
        ItemId::Number(id.into())
    }
}

impl From<ItemId> for Value {
    fn from(id: ItemId) -> Self {
        match id {
            ItemId::Number(n) => Value::from(n),
            ItemId::Text(s) => Value::from(s),
        }
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemId::Number(n) => write!(f, "{}", n),
            ItemId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Body of an item operation
///
/// `NoBody` is the explicit "nothing to send" marker used by read and
/// delete. It is distinct from `Body` with an empty map, which is an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Body(Item),
    NoBody,
}

impl Payload {
    pub fn body(&self) -> Option<&Item> {
        match self {
            Payload::Body(item) => Some(item),
            Payload::NoBody => None,
        }
    }
}

impl From<Item> for Payload {
    fn from(item: Item) -> Self {
        Payload::Body(item)
    }
}

/// Offset and page size for listing items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub from: u64,
    pub size: u64,
}

impl Pagination {
    pub const DEFAULT_SIZE: u64 = 10;

    pub fn new(from: u64, size: u64) -> Self {
        Pagination { from, size }
    }

    /// Build a page window from untyped values
    ///
    /// Each value must be a non-negative JSON integer or a string of decimal
    /// digits. Digit strings are read as numbers, so `"007"` becomes `7`.
    /// Negative or fractional numbers fail with `OutOfRange`, anything else
    /// with `NotNumeric`.
    pub fn from_values(from: &Value, size: &Value) -> Result<Self> {
        Ok(Pagination {
            from: numeric(from, "from")?,
            size: numeric(size, "size")?,
        })
    }

    /// Build a page window from command-line style strings
    pub fn parse(from: &str, size: &str) -> Result<Self> {
        Pagination::from_values(&Value::from(from), &Value::from(size))
    }

    /// Query string carrying the window, without the leading `?`
    pub fn to_query(&self) -> String {
        format!("from={}&size={}", self.from, self.size)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination::new(0, Self::DEFAULT_SIZE)
    }
}

fn numeric(value: &Value, field: &'static str) -> Result<u64> {
    match value {
        Value::Number(n) => n.as_u64().ok_or(ItemsError::OutOfRange { field }),
        Value::String(s) => {
            let s = s.trim();
            if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
                s.parse().map_err(|_| ItemsError::OutOfRange { field })
            } else if s.parse::<f64>().map_or(false, f64::is_finite) {
                Err(ItemsError::OutOfRange { field })
            } else {
                Err(ItemsError::NotNumeric { field })
            }
        }
        _ => Err(ItemsError::NotNumeric { field }),
    }
}
