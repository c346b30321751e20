pub mod syntax;

pub use syntax::*;
