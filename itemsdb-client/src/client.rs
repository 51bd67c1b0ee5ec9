//! Unbound client handle

use itemsdb_core::CollectionName;
use itemsdb_net::{paths, Request, Transport, Verb};
use serde_json::Value;
use tracing::debug;

use crate::{ClientError, Collection, Result};

/// Client for the items service with no collection bound
///
/// Only operations that need no collection name live here. Use
/// [`ItemsClient::bind`] to get a [`Collection`].
pub struct ItemsClient<T> {
    transport: T,
}

impl<T: Transport> ItemsClient<T> {
    /// Create new client over a transport
    pub fn new(transport: T) -> Self {
        ItemsClient { transport }
    }

    /// Always `None`; the bound name lives on [`Collection`]
    pub fn name(&self) -> Option<&CollectionName> {
        None
    }

    /// Names of every collection on the service
    pub fn list_collections(&self) -> Result<Vec<String>> {
        list_collections(&self.transport)
    }

    /// Bind a collection name. An empty name fails with `no name given`.
    pub fn bind(self, name: impl Into<String>) -> Result<Collection<T>> {
        let name = CollectionName::new(name)?;
        Ok(self.bind_name(name))
    }

    /// Bind an already validated name
    pub fn bind_name(self, name: CollectionName) -> Collection<T> {
        Collection::with_name(self.transport, name)
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }
}

pub(crate) fn list_collections<T: Transport>(transport: &T) -> Result<Vec<String>> {
    let value = send(transport, Request::new(paths::collections(), Verb::Read))?;
    serde_json::from_value(value)
        .map_err(|e| ClientError::InvalidResponse(format!("collection list: {}", e)))
}

/// Execute one request, surfacing transport errors unchanged
pub(crate) fn send<T: Transport>(transport: &T, request: Request) -> Result<Value> {
    debug!(
        "{} {} (locale: {:?})",
        request.verb().method(),
        request.path,
        request.locale
    );
    Ok(transport.execute(request)?)
}
