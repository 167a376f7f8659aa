//! Readers for translation documents.

pub mod properties;
