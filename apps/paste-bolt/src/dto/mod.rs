//! Request and response bodies

pub mod document;
