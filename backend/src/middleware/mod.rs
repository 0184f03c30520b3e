//! Request middleware.
//!
//! Purpose: own cross-cutting response concerns, currently the translation of
//! every failed request into the uniform error envelope.

pub mod error_translator;

pub use error_translator::ErrorTranslator;
