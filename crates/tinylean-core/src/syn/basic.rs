use crate::common::{HoleId, Id, Ident};
use derive_new::new;
use indexmap::IndexMap;
use std::rc::Rc;

pub type RcTerm = Rc<Term>;

/// Arguments of an applied datatype or constructor, keyed by the identity of
/// the parameter they instantiate. Order is only significant for printing.
pub type Args = IndexMap<Id, RcTerm>;

/// A function parameter: a binder, its type, and whether it is implicit.
#[derive(PartialEq, Eq, Debug, Clone, new)]
pub struct Param<T> {
    pub name: Ident,
    pub ty: T,
    pub implicit: bool,
}

impl<T> Param<T> {
    pub fn explicit(name: Ident, ty: T) -> Param<T> {
        Param::new(name, ty, false)
    }

    pub fn implicit(name: Ident, ty: T) -> Param<T> {
        Param::new(name, ty, true)
    }

    /// Keep the binder and flag, replace the type.
    pub fn with_type<U>(&self, ty: U) -> Param<U> {
        Param::new(self.name.clone(), ty, self.implicit)
    }
}

#[derive(PartialEq, Eq, Debug, Clone)]
pub enum Term {
    Universe,
    Variable(Variable),
    Pi(Pi),
    Lambda(Lambda),
    Application(Application),
    Placeholder(Placeholder),
    Data(Data),
    Ctor(Ctor),
    Nomatch,
}

impl Term {
    pub fn universe_rc() -> RcTerm {
        Rc::new(Term::Universe)
    }

    pub fn variable(name: Ident) -> Term {
        Term::Variable(Variable::new(name))
    }

    pub fn variable_rc(name: Ident) -> RcTerm {
        Rc::new(Term::variable(name))
    }

    pub fn pi(param: Param<RcTerm>, body: RcTerm) -> Term {
        Term::Pi(Pi::new(param, body))
    }

    pub fn pi_rc(param: Param<RcTerm>, body: RcTerm) -> RcTerm {
        Rc::new(Term::pi(param, body))
    }

    pub fn lambda(param: Param<RcTerm>, body: RcTerm) -> Term {
        Term::Lambda(Lambda::new(param, body))
    }

    pub fn lambda_rc(param: Param<RcTerm>, body: RcTerm) -> RcTerm {
        Rc::new(Term::lambda(param, body))
    }

    pub fn application(callee: RcTerm, arg: RcTerm) -> Term {
        Term::Application(Application::new(callee, arg))
    }

    pub fn application_rc(callee: RcTerm, arg: RcTerm) -> RcTerm {
        Rc::new(Term::application(callee, arg))
    }

    pub fn placeholder(id: HoleId, user: bool) -> Term {
        Term::Placeholder(Placeholder::new(id, user))
    }

    pub fn placeholder_rc(id: HoleId, user: bool) -> RcTerm {
        Rc::new(Term::placeholder(id, user))
    }

    pub fn data(name: Ident, args: Args) -> Term {
        Term::Data(Data::new(name, args))
    }

    pub fn data_rc(name: Ident, args: Args) -> RcTerm {
        Rc::new(Term::data(name, args))
    }

    pub fn ctor(ty_name: Ident, name: Ident, args: Args) -> Term {
        Term::Ctor(Ctor::new(ty_name, name, args))
    }

    pub fn ctor_rc(ty_name: Ident, name: Ident, args: Args) -> RcTerm {
        Rc::new(Term::ctor(ty_name, name, args))
    }

    pub fn nomatch_rc() -> RcTerm {
        Rc::new(Term::Nomatch)
    }

    /// Fold parameters, outermost first, into nested function types.
    pub fn pis<I>(params: I, body: RcTerm) -> RcTerm
    where
        I: IntoIterator<Item = Param<RcTerm>>,
        I::IntoIter: DoubleEndedIterator,
    {
        params
            .into_iter()
            .rev()
            .fold(body, |body, param| Term::pi_rc(param, body))
    }

    /// Fold parameters, outermost first, into nested functions.
    pub fn lambdas<I>(params: I, body: RcTerm) -> RcTerm
    where
        I: IntoIterator<Item = Param<RcTerm>>,
        I::IntoIter: DoubleEndedIterator,
    {
        params
            .into_iter()
            .rev()
            .fold(body, |body, param| Term::lambda_rc(param, body))
    }

    pub fn is_universe(&self) -> bool {
        matches!(self, Term::Universe)
    }

    /// Is this a function type whose parameter is implicit?
    pub fn is_implicit_pi(&self) -> bool {
        matches!(self, Term::Pi(pi) if pi.param.implicit)
    }
}

#[derive(PartialEq, Eq, Debug, Clone, new)]
pub struct Variable {
    pub name: Ident,
}

/// A dependent function type `(x: A) → B`.
#[derive(PartialEq, Eq, Debug, Clone, new)]
pub struct Pi {
    pub param: Param<RcTerm>,
    pub body: RcTerm,
}

#[derive(PartialEq, Eq, Debug, Clone, new)]
pub struct Lambda {
    pub param: Param<RcTerm>,
    pub body: RcTerm,
}

#[derive(PartialEq, Eq, Debug, Clone, new)]
pub struct Application {
    pub callee: RcTerm,
    pub arg: RcTerm,
}

/// A reference to a hole in the metavariable store. `user` records whether
/// the programmer wrote `_` or the elaborator inserted it.
#[derive(PartialEq, Eq, Debug, Clone, Copy, new)]
pub struct Placeholder {
    pub id: HoleId,
    pub user: bool,
}

/// An inductive type applied to (some of) its parameters.
#[derive(PartialEq, Eq, Debug, Clone, new)]
pub struct Data {
    pub name: Ident,
    pub args: Args,
}

/// A constructor applied to (some of) its own parameters.
#[derive(PartialEq, Eq, Debug, Clone, new)]
pub struct Ctor {
    pub ty_name: Ident,
    pub name: Ident,
    pub args: Args,
}
