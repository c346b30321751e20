//! Elaboration errors.

use thiserror::Error;
use tinylean_core::common::Loc;

pub type Result<T> = std::result::Result<T, Error>;

/// The first problem found in a program. Terms are carried in their printed
/// form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("type mismatch:\nwant:\n  {want}\n\ngot:\n  {got}")]
    TypeMismatch { want: String, got: String, loc: Loc },

    /// A hole that nothing constrained.
    #[error("unsolved placeholder:\n  {placeholder}: {ty}\n\ncontext:\n{}", context_lines(.context))]
    UnsolvedPlaceholder {
        placeholder: String,
        context: Vec<String>,
        ty: String,
        loc: Loc,
    },

    #[error("undefined implicit parameter '{name}'")]
    UndefinedImplicitParam { name: String, loc: Loc },

    /// Raised by name resolution; passed along unchanged.
    #[error("undefined variable '{name}'")]
    UndefinedVariable { name: String, loc: Loc },

    /// Raised by name resolution; passed along unchanged.
    #[error("duplicate variable '{name}'")]
    DuplicateVariable { name: String, loc: Loc },
}

fn context_lines(context: &[String]) -> String {
    if context.is_empty() {
        return "  (empty)".to_string();
    }
    context
        .iter()
        .map(|param| format!("  {param}"))
        .collect::<Vec<_>>()
        .join("\n")
}

impl Error {
    pub fn type_mismatch(want: impl ToString, got: impl ToString, loc: Loc) -> Error {
        Error::TypeMismatch {
            want: want.to_string(),
            got: got.to_string(),
            loc,
        }
    }

    pub fn loc(&self) -> Loc {
        match self {
            Error::TypeMismatch { loc, .. }
            | Error::UnsolvedPlaceholder { loc, .. }
            | Error::UndefinedImplicitParam { loc, .. }
            | Error::UndefinedVariable { loc, .. }
            | Error::DuplicateVariable { loc, .. } => *loc,
        }
    }

    /// Render as `file:line:column: message`, locating the error in `text`.
    pub fn report(&self, file: &str, text: &str) -> String {
        let position = self.loc().position(text);
        format!("{file}:{}:{}: {self}", position.line, position.column)
    }
}
