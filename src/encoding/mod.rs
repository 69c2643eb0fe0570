//! Field normalization - hex bytes, minimal integers, timestamps

mod hex_field;
mod numeric;
mod timestamp;

pub use hex_field::*;
pub use numeric::*;
pub use timestamp::*;
