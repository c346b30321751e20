//! Top-level declarations.
//!
//! Declarations are generic over the representation of their types and
//! bodies: the elaborator consumes `Declaration<Expr>` from the name resolver
//! and produces `Declaration<RcTerm>`.

use crate::common::{Ident, Loc};
use crate::syn::Param;
use derive_new::new;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration<T> {
    /// A named definition, visible to every later declaration.
    Definition(Definition<T>),
    /// An anonymous definition, checked and then forgotten.
    Example(Example<T>),
    /// An inductive datatype together with its constructors.
    Data(DataDecl<T>),
    /// A constructor of an inductive datatype.
    Ctor(CtorDecl<T>),
}

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Definition<T> {
    pub loc: Loc,
    pub name: Ident,
    pub params: Vec<Param<T>>,
    pub ret: T,
    pub body: T,
}

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Example<T> {
    pub loc: Loc,
    pub params: Vec<Param<T>>,
    pub ret: T,
    pub body: T,
}

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct DataDecl<T> {
    pub loc: Loc,
    pub name: Ident,
    pub params: Vec<Param<T>>,
    pub ctors: Vec<CtorDecl<T>>,
}

/// A constructor. Each index argument pins one parameter of the owning
/// datatype (left, a reference to that parameter) to a term (right).
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct CtorDecl<T> {
    pub loc: Loc,
    pub name: Ident,
    pub params: Vec<Param<T>>,
    pub index_args: Vec<(T, T)>,
    pub ty_name: Ident,
}

impl<T> Declaration<T> {
    /// The declared name; examples have none.
    pub fn name(&self) -> Option<&Ident> {
        match self {
            Declaration::Definition(def) => Some(&def.name),
            Declaration::Example(_) => None,
            Declaration::Data(data) => Some(&data.name),
            Declaration::Ctor(ctor) => Some(&ctor.name),
        }
    }

    pub fn loc(&self) -> Loc {
        match self {
            Declaration::Definition(def) => def.loc,
            Declaration::Example(example) => example.loc,
            Declaration::Data(data) => data.loc,
            Declaration::Ctor(ctor) => ctor.loc,
        }
    }

    pub fn is_definition(&self) -> bool {
        matches!(self, Declaration::Definition(_))
    }

    pub fn is_data(&self) -> bool {
        matches!(self, Declaration::Data(_))
    }

    pub fn as_definition(&self) -> Option<&Definition<T>> {
        match self {
            Declaration::Definition(def) => Some(def),
            _ => None,
        }
    }

    pub fn as_data(&self) -> Option<&DataDecl<T>> {
        match self {
            Declaration::Data(data) => Some(data),
            _ => None,
        }
    }
}

impl<T> DataDecl<T> {
    /// Find the constructor with the given identity.
    pub fn find_ctor(&self, name: &Ident) -> Option<&CtorDecl<T>> {
        self.ctors.iter().find(|ctor| ctor.name.id == name.id)
    }
}
