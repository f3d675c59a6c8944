//! Wire message definitions and validation.

pub mod types;
pub mod validator;
