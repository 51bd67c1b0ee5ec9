//! Item operations and batches

use itemsdb_core::{
    Action, AppliedEntry, BatchEntry, BatchSummary, Item, ItemId, ItemsError, Pagination,
    Payload, SkippedEntry,
};
use itemsdb_net::{paths, Request, Transport, Verb};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::client::send;
use crate::{Collection, Result};

fn verb_for(action: Action) -> Verb {
    match action {
        Action::Create => Verb::Default,
        Action::Read => Verb::Read,
        Action::Update => Verb::Replace,
        Action::Delete => Verb::Delete,
    }
}

impl<T: Transport> Collection<T> {
    /// Send one item operation to `items/{name}/{id}`
    ///
    /// Checks run in order: the id must not be empty, then a body, when
    /// given, must not be empty. Create and update always need a body.
    fn perform_item_operation(&self, id: ItemId, payload: Payload, action: Action) -> Result<Value> {
        if id.is_empty() {
            return Err(ItemsError::EmptyId.into());
        }
        let body = match payload {
            Payload::Body(item) if item.is_empty() => return Err(ItemsError::EmptyItem.into()),
            Payload::Body(item) => Some(item),
            Payload::NoBody if action.carries_body() => return Err(ItemsError::EmptyItem.into()),
            Payload::NoBody => None,
        };

        let mut request = Request::new(paths::item(&self.name, &id), verb_for(action));
        if let Some(item) = &body {
            request = request.with_json(item)?;
        }
        send(&self.transport, request)
    }

    /// Create an item
    pub fn add_item(&self, id: impl Into<ItemId>, item: Item) -> Result<()> {
        self.perform_item_operation(id.into(), Payload::Body(item), Action::Create)?;
        Ok(())
    }

    /// Replace an item
    pub fn update_item(&self, id: impl Into<ItemId>, item: Item) -> Result<()> {
        self.perform_item_operation(id.into(), Payload::Body(item), Action::Update)?;
        Ok(())
    }

    pub fn delete_item(&self, id: impl Into<ItemId>) -> Result<()> {
        self.perform_item_operation(id.into(), Payload::NoBody, Action::Delete)?;
        Ok(())
    }

    pub fn get_item(&self, id: impl Into<ItemId>) -> Result<Value> {
        self.perform_item_operation(id.into(), Payload::NoBody, Action::Read)
    }

    /// One page of items
    ///
    /// `from` and `size` may be non-negative integers or digit strings.
    /// Negative or fractional numbers fail with `{field} should be a
    /// non-negative integer`; anything else fails with `{field} should be
    /// numeric`. Either way no request is made.
    pub fn get_items(&self, from: impl Into<Value>, size: impl Into<Value>) -> Result<Value> {
        let page = Pagination::from_values(&from.into(), &size.into())?;
        self.get_page(page)
    }

    pub fn get_page(&self, page: Pagination) -> Result<Value> {
        send(&self.transport, Request::new(paths::page(&self.name, &page), Verb::Read))
    }

    /// Full-text search
    ///
    /// The query travels in the body as `{"query": ...}` since it is
    /// free-form text of any length.
    pub fn search_items(&self, query: &str, locale: Option<&str>) -> Result<Value> {
        let request = Request::new(paths::search(&self.name), Verb::Default)
            .with_locale(locale.map(String::from))
            .with_json(&json!({ "query": query }))?;
        send(&self.transport, request)
    }

    /// Apply a batch of item operations in order
    ///
    /// Each entry's `__action` picks the operation; create and update send
    /// the whole entry, reserved keys included, as the item. Entries with a
    /// missing or unknown action are skipped and listed in the summary.
    ///
    /// There is no atomicity. The first failing entry aborts the batch and
    /// its error is returned; entries before it stay applied.
    pub fn batch_items<I>(&self, entries: I) -> Result<BatchSummary>
    where
        I: IntoIterator<Item = BatchEntry>,
    {
        let mut summary = BatchSummary::default();

        for (index, entry) in entries.into_iter().enumerate() {
            let Some(action) = entry.action() else {
                let token = entry.item().get(BatchEntry::ACTION_KEY).map(|v| match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                });
                warn!(
                    "Skipping batch entry {} in '{}': unrecognized action {:?}",
                    index, self.name, token
                );
                summary.skipped.push(SkippedEntry { index, token });
                continue;
            };

            let id = entry.id()?;
            match action {
                Action::Create => self.add_item(id.clone(), entry.into_item())?,
                Action::Update => self.update_item(id.clone(), entry.into_item())?,
                Action::Delete => self.delete_item(id.clone())?,
                Action::Read => {
                    self.get_item(id.clone())?;
                }
            }
            summary.applied.push(AppliedEntry { index, id, action });
        }

        debug!(
            "Batch on '{}' done: {} applied, {} skipped",
            self.name,
            summary.applied.len(),
            summary.skipped.len()
        );
        Ok(summary)
    }
}
