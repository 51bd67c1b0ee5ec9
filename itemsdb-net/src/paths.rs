//! Request paths on the items service
//!
//! Paths are relative to the service root and carry no leading slash.
//! Collection names and item ids are percent-encoded as single segments.

use std::borrow::Cow;
use itemsdb_core::{CollectionName, ItemId, Pagination};

/// Root of every collection path
pub const ROOT: &str = "items";

/// Sub-path of a collection's scheme
pub const SCHEME: &str = "scheme";

/// Sub-path of a collection's search endpoint
pub const SEARCH: &str = "search";

fn segment(raw: &str) -> Cow<'_, str> {
    urlencoding::encode(raw)
}

/// `items`
pub fn collections() -> String {
    ROOT.to_string()
}

/// `items/{name}`
pub fn collection(name: &CollectionName) -> String {
    format!("{}/{}", ROOT, segment(name.as_str()))
}

/// `items/{name}?from={from}&size={size}`
pub fn page(name: &CollectionName, page: &Pagination) -> String {
    format!("{}?{}", collection(name), page.to_query())
}

/// `items/{name}/scheme`
pub fn scheme(name: &CollectionName) -> String {
    format!("{}/{}", collection(name), SCHEME)
}

/// `items/{name}/search`
pub fn search(name: &CollectionName) -> String {
    format!("{}/{}", collection(name), SEARCH)
}

/// `items/{name}/{id}`
pub fn item(name: &CollectionName, id: &ItemId) -> String {
    format!("{}/{}", collection(name), segment(&id.to_string()))
}
