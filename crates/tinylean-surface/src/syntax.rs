//! Surface expressions after name resolution.
//!
//! Every identifier already carries the identity the resolver assigned to it,
//! and every node carries the byte offset it was parsed from.

use derive_new::new;
use std::rc::Rc;
use tinylean_core::common::{Ident, Loc};
use tinylean_core::declaration::Declaration;
use tinylean_core::syn::Param;

/// A resolved declaration, ready for elaboration.
pub type Decl = Declaration<Expr>;

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Expr {
    Type(Type),
    Ref(Ref),
    Pi(Box<Pi>),
    Fun(Fun),
    Call(Call),
    Placeholder(Placeholder),
    Nomatch(Nomatch),
}

/// How an argument was supplied at a call site.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub enum ArgKind {
    /// `f x`: implicit parameters before `x` are filled in by the elaborator.
    Ordinary,
    /// The argument is given for an implicit parameter directly.
    ExplicitImplicit,
    /// `f (n := x)`: the argument is for the implicit parameter named `n`.
    Named(Rc<str>),
}

#[derive(Clone, Eq, PartialEq, Debug, new)]
pub struct Type {
    pub loc: Loc,
}

#[derive(Clone, Eq, PartialEq, Debug, new)]
pub struct Ref {
    pub loc: Loc,
    pub name: Ident,
}

#[derive(Clone, Eq, PartialEq, Debug, new)]
pub struct Pi {
    pub loc: Loc,
    pub param: Param<Expr>,
    pub body: Box<Expr>,
}

#[derive(Clone, Eq, PartialEq, Debug, new)]
pub struct Fun {
    pub loc: Loc,
    pub param: Ident,
    pub body: Box<Expr>,
}

#[derive(Clone, Eq, PartialEq, Debug, new)]
pub struct Call {
    pub loc: Loc,
    pub callee: Box<Expr>,
    pub arg: Box<Expr>,
    pub kind: ArgKind,
}

/// `_`, or a hole inserted for an implicit argument.
#[derive(Clone, Eq, PartialEq, Debug, new)]
pub struct Placeholder {
    pub loc: Loc,
    pub user: bool,
}

#[derive(Clone, Eq, PartialEq, Debug, new)]
pub struct Nomatch {
    pub loc: Loc,
    pub arg: Box<Expr>,
}

impl Expr {
    pub fn universe(loc: Loc) -> Expr {
        Expr::Type(Type::new(loc))
    }

    pub fn reference(loc: Loc, name: Ident) -> Expr {
        Expr::Ref(Ref::new(loc, name))
    }

    pub fn pi(loc: Loc, param: Param<Expr>, body: Expr) -> Expr {
        Expr::Pi(Box::new(Pi::new(loc, param, Box::new(body))))
    }

    pub fn fun(loc: Loc, param: Ident, body: Expr) -> Expr {
        Expr::Fun(Fun::new(loc, param, Box::new(body)))
    }

    pub fn call(loc: Loc, callee: Expr, arg: Expr, kind: ArgKind) -> Expr {
        Expr::Call(Call::new(loc, Box::new(callee), Box::new(arg), kind))
    }

    pub fn placeholder(loc: Loc, user: bool) -> Expr {
        Expr::Placeholder(Placeholder::new(loc, user))
    }

    pub fn nomatch(loc: Loc, arg: Expr) -> Expr {
        Expr::Nomatch(Nomatch::new(loc, Box::new(arg)))
    }

    pub fn loc(&self) -> Loc {
        match self {
            Expr::Type(ty) => ty.loc,
            Expr::Ref(r) => r.loc,
            Expr::Pi(pi) => pi.loc,
            Expr::Fun(fun) => fun.loc,
            Expr::Call(call) => call.loc,
            Expr::Placeholder(placeholder) => placeholder.loc,
            Expr::Nomatch(nomatch) => nomatch.loc,
        }
    }
}
