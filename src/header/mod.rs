//! Header module - block header model, field names, canonical encoding

mod block;
mod canonical;
mod field;

pub use block::*;
pub use canonical::*;
pub use field::*;
