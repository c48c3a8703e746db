pub mod item;
pub mod session;

pub use item::*;
pub use session::*;
