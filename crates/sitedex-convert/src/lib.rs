//! Bridges to the external text/metadata extraction service.

pub mod client;
pub mod metadata;

pub use client::ConverterClient;
