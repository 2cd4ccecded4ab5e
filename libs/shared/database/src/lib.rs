//! Read-only access to the document database that holds appointments and
//! member profiles.
//!
//! [`CosmosClient`] talks to the Cosmos DB REST API; [`InMemoryDocumentStore`]
//! stands in for it in tests. Both sit behind [`DocumentStore`], and callers
//! consume results through [`DocumentQuery`], which pages lazily until drained.

pub mod cosmos;
pub mod error;
pub mod filter;
pub mod memory;
pub mod store;

pub use cosmos::CosmosClient;
pub use error::DatabaseError;
pub use filter::{Filter, SqlParameter, SqlQuery};
pub use memory::InMemoryDocumentStore;
pub use store::{DocumentQuery, DocumentStore, Page};
