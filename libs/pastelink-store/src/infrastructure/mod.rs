//! Store adapter implementations

mod memory_store;
mod s3_store;

pub use memory_store::MemoryDocumentStore;
pub use s3_store::S3DocumentStore;
