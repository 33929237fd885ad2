#![no_std] // The model carries no I/O; std is only needed by tools and tests

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod book;
pub mod model;

// Re-export core types for convenience
pub use book::Book;
pub use model::*;
