//! HTTP handlers

pub mod documents;
mod error;

pub use error::ApiError;
