//! Error types for atomik operations.

use thiserror::Error;

/// Errors that can occur while configuring or misusing an engine.
///
/// Ordinary composition never fails: unknown properties and values pass
/// through as-is, so every error here is detected either at
/// [`Css::new`](crate::Css::new) time or at a call that requires a
/// capability the engine was not built with.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid class prefix `{prefix}`: {reason}")]
    InvalidPrefix { prefix: String, reason: String },

    #[error("invalid screen `{name}`: {reason}")]
    InvalidScreen { name: String, reason: String },

    #[error("invalid util `{name}`: {reason}")]
    InvalidUtil { name: String, reason: String },

    #[error("style collection requires an engine created in collect mode")]
    CollectUnavailable,
}

pub type Result<T> = std::result::Result<T, Error>;
