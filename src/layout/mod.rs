pub mod position;
pub mod sizer;

pub use position::*;
pub use sizer::*;
