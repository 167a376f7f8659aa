//! Merge-and-convert pipeline.

pub mod converter;
pub mod filename;
pub mod merge;
pub mod serializer;
pub mod source;
pub mod types;

pub use converter::BundleConverter;
pub use types::{
    BundleError,
    ConversionReport,
    FileFailure,
};
