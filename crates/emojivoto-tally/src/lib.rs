#![doc = include_str!("../README.md")]

mod catalog;
mod error;
mod fault;
mod random;
mod sleep;
mod store;

pub use crate::catalog::*;
pub use crate::error::*;
pub use crate::fault::*;
pub use crate::random::*;
pub use crate::sleep::*;
pub use crate::store::*;
