//! cocktail-core
//!
//! Shared data model for the cocktail bot: drink records as read from the
//! static JSON collection, the documents derived from them, the traits the
//! embedding, generation and chain crates implement, and the layered
//! configuration used by both binaries.
#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod config;
pub mod data_processor;
pub mod error;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
