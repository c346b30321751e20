pub mod elaborator;
pub use elaborator::*;

pub mod error;
pub use error::{Error, Result};

pub mod implicit;
pub mod inductive;

pub mod state;
pub use state::State;
