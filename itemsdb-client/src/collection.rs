//! Bound collection handle and collection lifecycle

use itemsdb_core::{CollectionName, Scheme};
use itemsdb_net::{paths, Request, Transport, Verb};
use serde_json::Value;
use tracing::info;

use crate::client::{list_collections, send};
use crate::{ItemsClient, Result};

/// Client handle bound to one collection
///
/// Every name-scoped operation is defined here, so none of them can run
/// without a name. Item operations are in [`crate::items`].
pub struct Collection<T> {
    pub(crate) transport: T,
    pub(crate) name: CollectionName,
}

impl<T: Transport> Collection<T> {
    /// Create a handle bound to `name`
    pub fn new(transport: T, name: impl Into<String>) -> Result<Self> {
        let name = CollectionName::new(name)?;
        Ok(Self::with_name(transport, name))
    }

    pub fn with_name(transport: T, name: CollectionName) -> Self {
        Collection { transport, name }
    }

    pub fn name(&self) -> &CollectionName {
        &self.name
    }

    /// Rebind to another collection. On error the old name is kept.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        self.name = CollectionName::new(name)?;
        Ok(())
    }

    /// Drop the bound name
    pub fn unbind(self) -> ItemsClient<T> {
        ItemsClient::new(self.transport)
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Names of every collection on the service
    pub fn list_collections(&self) -> Result<Vec<String>> {
        list_collections(&self.transport)
    }

    /// Collection metadata as reported by the service
    pub fn details(&self) -> Result<Value> {
        send(&self.transport, Request::new(paths::collection(&self.name), Verb::Read))
    }

    /// Validate and store the collection's scheme
    ///
    /// Fields with an empty type get `general_auto`. The scheme is rejected,
    /// and nothing is sent, if it is empty or names an unknown type. Returns
    /// the scheme as sent.
    pub fn set_scheme<I, K, V>(&self, fields: I) -> Result<Scheme>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let scheme = Scheme::validate(fields)?;
        self.apply_scheme(&scheme)?;
        Ok(scheme)
    }

    /// Store an already validated scheme
    pub fn apply_scheme(&self, scheme: &Scheme) -> Result<()> {
        let request = Request::new(paths::scheme(&self.name), Verb::Replace).with_json(scheme)?;
        send(&self.transport, request)?;
        info!("Scheme of '{}' set ({} fields)", self.name, scheme.len());
        Ok(())
    }

    /// Delete the collection on the service. The handle stays bound.
    pub fn delete(&self) -> Result<()> {
        send(&self.transport, Request::new(paths::collection(&self.name), Verb::Delete))?;
        info!("Collection '{}' deleted", self.name);
        Ok(())
    }
}
