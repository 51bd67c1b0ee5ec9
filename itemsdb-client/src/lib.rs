//! itemsdb Rust client SDK
//!
//! [`ItemsClient`] is the handle with no collection bound; it can only list
//! collections. Binding a name yields a [`Collection`], which carries every
//! name-scoped operation: lifecycle, scheme, single-item CRUD, paging,
//! search and batches.

pub mod client;
pub mod collection;
pub mod error;
pub mod items;

pub use client::ItemsClient;
pub use collection::Collection;
pub use error::ClientError;

pub use itemsdb_core::{
    Action, BatchEntry, BatchSummary, CollectionName, ContentType, Item, ItemId, ItemsError,
    Pagination, Payload, Scheme,
};
pub use itemsdb_net::{HttpTransport, Transport, TransportError};

pub type Result<T> = std::result::Result<T, ClientError>;
