pub mod basic;
pub mod print;

pub use basic::*;
pub use print::*;
