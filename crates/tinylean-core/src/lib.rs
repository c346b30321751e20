pub mod common;
pub mod declaration;
pub mod equal;
pub mod eval;
pub mod meta;
pub mod rename;
pub mod syn;

pub use common::{HoleId, Id, Ident, Loc};
pub use syn::{RcTerm, Term};
