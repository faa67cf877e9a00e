mod interface;
mod lock;
mod validated;

pub use interface::*;
pub use lock::*;
pub use validated::*;
