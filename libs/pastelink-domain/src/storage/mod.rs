//! Storage port

pub mod ports;

pub use ports::DocumentStore;
