//! Chain module - editable blocks, hash cascades, validation, session state

mod editable;
mod cascade;
mod validator;
mod session;

pub use editable::*;
pub use cascade::*;
pub use validator::*;
pub use session::*;
