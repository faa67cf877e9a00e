pub mod convert;
pub mod error;
pub mod proto;

pub use error::*;
