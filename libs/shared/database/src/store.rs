use std::marker::PhantomData;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::DatabaseError;
use crate::filter::Filter;

/// One page of raw documents plus the token needed to ask for the next one.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub documents: Vec<Value>,
    pub continuation: Option<String>,
}

/// Read side of a partitioned document database. Implementations must span
/// every partition of the collection.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn fetch_page(
        &self,
        collection: &str,
        filter: &Filter,
        continuation: Option<&str>,
    ) -> Result<Page, DatabaseError>;
}

/// Lazy, paginated result of a filtered query.
///
/// Nothing is fetched until [`next_page`](Self::next_page) or
/// [`drain`](Self::drain) is called.
pub struct DocumentQuery<'a, T> {
    store: &'a dyn DocumentStore,
    collection: String,
    filter: Filter,
    continuation: Option<String>,
    exhausted: bool,
    pages_read: usize,
    _record: PhantomData<fn() -> T>,
}

impl<'a, T: DeserializeOwned> DocumentQuery<'a, T> {
    pub fn new(store: &'a dyn DocumentStore, collection: impl Into<String>, filter: Filter) -> Self {
        Self {
            store,
            collection: collection.into(),
            filter,
            continuation: None,
            exhausted: false,
            pages_read: 0,
            _record: PhantomData,
        }
    }

    pub fn has_more_results(&self) -> bool {
        !self.exhausted
    }

    pub fn pages_read(&self) -> usize {
        self.pages_read
    }

    pub async fn next_page(&mut self) -> Result<Vec<T>, DatabaseError> {
        if self.exhausted {
            return Ok(Vec::new());
        }

        let page = self
            .store
            .fetch_page(&self.collection, &self.filter, self.continuation.as_deref())
            .await?;

        self.pages_read += 1;
        self.continuation = page.continuation.filter(|token| !token.is_empty());
        self.exhausted = self.continuation.is_none();

        debug!(
            collection = %self.collection,
            page = self.pages_read,
            documents = page.documents.len(),
            more = !self.exhausted,
            "Fetched query page"
        );

        page.documents
            .into_iter()
            .map(|document| {
                serde_json::from_value(document).map_err(|e| DatabaseError::Decode {
                    collection: self.collection.clone(),
                    message: e.to_string(),
                })
            })
            .collect()
    }

    /// Reads every remaining page and returns all records in page order.
    pub async fn drain(mut self) -> Result<Vec<T>, DatabaseError> {
        let mut records = Vec::new();
        while self.has_more_results() {
            records.extend(self.next_page().await?);
        }
        Ok(records)
    }
}
