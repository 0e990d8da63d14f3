//! Client for the external search index.

pub mod client;
pub mod escape;

pub use client::IndexClient;
pub use escape::escape;
