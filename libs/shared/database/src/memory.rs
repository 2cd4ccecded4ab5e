use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::DatabaseError;
use crate::filter::Filter;
use crate::store::{DocumentStore, Page};

/// Document store kept in memory, paging results the way the real database
/// does. Continuation tokens are plain offsets into the filtered result.
pub struct InMemoryDocumentStore {
    collections: RwLock<HashMap<String, Vec<Value>>>,
    page_size: usize,
    pages_served: AtomicUsize,
}

impl InMemoryDocumentStore {
    pub fn new(page_size: usize) -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            page_size: page_size.max(1),
            pages_served: AtomicUsize::new(0),
        }
    }

    pub async fn insert(&self, collection: &str, documents: Vec<Value>) {
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .extend(documents);
    }

    pub fn pages_served(&self) -> usize {
        self.pages_served.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn fetch_page(
        &self,
        collection: &str,
        filter: &Filter,
        continuation: Option<&str>,
    ) -> Result<Page, DatabaseError> {
        let offset = match continuation {
            Some(token) => token.parse::<usize>().map_err(|_| DatabaseError::QueryFailed {
                collection: collection.to_string(),
                status: 400,
                message: format!("invalid continuation token '{}'", token),
            })?,
            None => 0,
        };

        let collections = self.collections.read().await;
        let matching = collections
            .get(collection)
            .map(|docs| docs.iter().filter(|doc| filter.matches(doc)).collect::<Vec<_>>())
            .unwrap_or_default();

        let end = (offset + self.page_size).min(matching.len());
        let documents = matching
            .get(offset..end)
            .map(|slice| slice.iter().map(|doc| (*doc).clone()).collect())
            .unwrap_or_default();

        self.pages_served.fetch_add(1, Ordering::SeqCst);

        Ok(Page {
            documents,
            continuation: (end < matching.len()).then(|| end.to_string()),
        })
    }
}
