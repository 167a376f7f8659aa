//! i18n-bundler
//!
//! `.properties` 翻訳ファイルをベースラインとマージし、ロケールごとの JSON / JS バンドルに変換する

pub mod bundle;
pub mod cli;
pub mod config;
pub mod input;
pub mod types;
pub mod watch;

#[cfg(test)]
mod test_utils;

pub use bundle::BundleConverter;
