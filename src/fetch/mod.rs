//! Resilient catalog fetching.
//!
//! Builds the catalog query, then tries the endpoint directly and through each
//! configured relay until one returns a game list.

mod client;
mod query;
mod report;
mod strategy;

pub use client::*;
pub use query::*;
pub use report::*;
pub use strategy::*;
