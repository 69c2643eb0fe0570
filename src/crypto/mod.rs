//! Cryptography module - digest values and header digest selection

mod hash;
mod digest;

pub use hash::*;
pub use digest::*;
