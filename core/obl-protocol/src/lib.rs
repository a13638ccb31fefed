#![no_std] // Types only; the parser and tools bring std

extern crate alloc;

pub mod ids;
pub mod relation;

// Re-export core types for convenience
pub use ids::{RowId, SentenceId, TokenId};
pub use relation::{Deprel, Relabel};

pub mod model;
pub use model::*;
