//! cocktail-vector
//!
//! In-memory flat vector index over the drink documents and the top-k
//! retriever built on it. The index is built once at startup and only read
//! afterwards, so it can be shared across request threads without locking.
pub mod index;
pub mod retriever;

pub use index::FlatIndex;
pub use retriever::{Retriever, DEFAULT_TOP_K};
