//! Key generation and allocation

mod allocator;
mod generator;

pub use allocator::{KeyAllocator, DEFAULT_MAX_KEY_ATTEMPTS};
pub use generator::{KeyGenerator, PhoneticKeyGenerator, RandomKeyGenerator, DEFAULT_ALPHABET};

#[cfg(test)]
pub use generator::MockKeyGenerator;
