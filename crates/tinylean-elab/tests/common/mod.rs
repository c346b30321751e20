//! A small stand-in for the name resolver: programs are written with plain
//! names, and the builder hands out identities and offsets the way the
//! resolver would.

#![allow(dead_code)]

use std::collections::HashMap;
use tinylean_core::common::{Ident, Loc};
use tinylean_core::declaration::{CtorDecl, DataDecl, Declaration, Definition, Example};
use tinylean_core::syn::Param;
use tinylean_elab::{Error, Result};
use tinylean_surface::{ArgKind, Decl, Expr};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// An unresolved expression.
#[derive(Clone, Debug)]
pub enum Sx {
    Type,
    Var(&'static str),
    Pi(P, Box<Sx>),
    Fun(&'static str, Box<Sx>),
    Call(Box<Sx>, Box<Sx>, ArgKind),
    Hole,
    Nomatch(Box<Sx>),
}

/// An unresolved parameter.
#[derive(Clone, Debug)]
pub struct P {
    name: &'static str,
    ty: Box<Sx>,
    implicit: bool,
}

pub fn ty() -> Sx {
    Sx::Type
}

pub fn v(name: &'static str) -> Sx {
    Sx::Var(name)
}

pub fn p(name: &'static str, ty: Sx) -> P {
    P {
        name,
        ty: Box::new(ty),
        implicit: false,
    }
}

pub fn ip(name: &'static str, ty: Sx) -> P {
    P {
        name,
        ty: Box::new(ty),
        implicit: true,
    }
}

/// `(name: param) → body`, or `{name: param} → body` for implicit params.
pub fn pi(param: P, body: Sx) -> Sx {
    Sx::Pi(param, Box::new(body))
}

pub fn fun(name: &'static str, body: Sx) -> Sx {
    Sx::Fun(name, Box::new(body))
}

/// `f a b c`
pub fn app<const N: usize>(f: Sx, args: [Sx; N]) -> Sx {
    args.into_iter().fold(f, |f, arg| {
        Sx::Call(Box::new(f), Box::new(arg), ArgKind::Ordinary)
    })
}

/// `f (name := arg)`
pub fn named(f: Sx, name: &str, arg: Sx) -> Sx {
    Sx::Call(Box::new(f), Box::new(arg), ArgKind::Named(name.into()))
}

pub fn hole() -> Sx {
    Sx::Hole
}

pub fn nomatch(arg: Sx) -> Sx {
    Sx::Nomatch(Box::new(arg))
}

/// An unresolved constructor: its parameters, and the datatype parameters it
/// pins.
pub struct C {
    name: &'static str,
    params: Vec<P>,
    index_args: Vec<(&'static str, Sx)>,
}

pub fn ctor<const N: usize>(
    name: &'static str,
    params: Vec<P>,
    index_args: [(&'static str, Sx); N],
) -> C {
    C {
        name,
        params,
        index_args: index_args.into(),
    }
}

#[derive(Default)]
pub struct Program {
    globals: HashMap<&'static str, Ident>,
    locals: Vec<(&'static str, Ident)>,
    next_loc: usize,
    decls: Vec<Decl>,
}

impl Program {
    pub fn new() -> Program {
        Program::default()
    }

    pub fn decls(&self) -> &[Decl] {
        &self.decls
    }

    /// The identity given to a global name.
    pub fn ident(&self, name: &str) -> Ident {
        self.globals[name].clone()
    }

    pub fn def(&mut self, name: &'static str, params: Vec<P>, ret: Sx, body: Sx) -> Result<&mut Self> {
        let loc = self.loc();
        let (params, ret, body) = self.scoped(|this| {
            let params = this.params(params)?;
            let ret = this.expr(ret)?;
            let body = this.expr(body)?;
            Ok((params, ret, body))
        })?;
        let name = self.global(name, loc)?;
        self.decls.push(Declaration::Definition(Definition::new(
            loc, name, params, ret, body,
        )));
        Ok(self)
    }

    pub fn example(&mut self, params: Vec<P>, ret: Sx, body: Sx) -> Result<&mut Self> {
        let loc = self.loc();
        let (params, ret, body) = self.scoped(|this| {
            let params = this.params(params)?;
            let ret = this.expr(ret)?;
            let body = this.expr(body)?;
            Ok((params, ret, body))
        })?;
        self.decls
            .push(Declaration::Example(Example::new(loc, params, ret, body)));
        Ok(self)
    }

    pub fn data(&mut self, name: &'static str, params: Vec<P>, ctors: Vec<C>) -> Result<&mut Self> {
        let loc = self.loc();
        let ty_name = self.global(name, loc)?;
        let (params, ctors) = self.scoped(|this| {
            let params = this.params(params)?;
            let mut checked = Vec::new();
            for ctor in ctors {
                checked.push(this.ctor(&ty_name, &params, ctor)?);
            }
            Ok((params, checked))
        })?;
        self.decls
            .push(Declaration::Data(DataDecl::new(loc, ty_name, params, ctors)));
        Ok(self)
    }

    fn ctor(&mut self, ty_name: &Ident, owner: &[Param<Expr>], ctor: C) -> Result<CtorDecl<Expr>> {
        let loc = self.loc();
        let name = self.global(ctor.name, loc)?;
        let (params, index_args) = self.scoped(|this| {
            let params = this.params(ctor.params)?;
            let mut index_args = Vec::new();
            for (target, value) in ctor.index_args {
                let target_loc = this.loc();
                let Some(param) = owner.iter().find(|param| &*param.name.text == target) else {
                    return Err(Error::UndefinedVariable {
                        name: target.to_string(),
                        loc: target_loc,
                    });
                };
                let target = Expr::reference(target_loc, param.name.clone());
                index_args.push((target, this.expr(value)?));
            }
            Ok((params, index_args))
        })?;
        Ok(CtorDecl::new(loc, name, params, index_args, ty_name.clone()))
    }

    fn loc(&mut self) -> Loc {
        let loc = Loc(self.next_loc);
        self.next_loc += 1;
        loc
    }

    fn global(&mut self, name: &'static str, loc: Loc) -> Result<Ident> {
        if self.globals.contains_key(name) {
            return Err(Error::DuplicateVariable {
                name: name.to_string(),
                loc,
            });
        }
        let ident = Ident::fresh(name);
        self.globals.insert(name, ident.clone());
        Ok(ident)
    }

    fn scoped<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let depth = self.locals.len();
        let result = f(self);
        self.locals.truncate(depth);
        result
    }

    /// Resolve parameters, leaving them in scope.
    fn params(&mut self, params: Vec<P>) -> Result<Vec<Param<Expr>>> {
        params
            .into_iter()
            .map(|param| {
                let ty = self.expr(*param.ty)?;
                let name = self.bind(param.name);
                Ok(Param::new(name, ty, param.implicit))
            })
            .collect()
    }

    fn bind(&mut self, name: &'static str) -> Ident {
        let ident = if name == "_" {
            Ident::unbound()
        } else {
            Ident::fresh(name)
        };
        self.locals.push((name, ident.clone()));
        ident
    }

    fn lookup(&self, name: &str, loc: Loc) -> Result<Ident> {
        self.locals
            .iter()
            .rev()
            .find(|(local, ident)| *local == name && !ident.is_unbound())
            .map(|(_, ident)| ident.clone())
            .or_else(|| self.globals.get(name).cloned())
            .ok_or_else(|| Error::UndefinedVariable {
                name: name.to_string(),
                loc,
            })
    }

    pub fn expr(&mut self, sx: Sx) -> Result<Expr> {
        let loc = self.loc();
        Ok(match sx {
            Sx::Type => Expr::universe(loc),
            Sx::Var(name) => Expr::reference(loc, self.lookup(name, loc)?),
            Sx::Pi(param, body) => self.scoped(|this| {
                let ty = this.expr(*param.ty)?;
                let name = this.bind(param.name);
                let body = this.expr(*body)?;
                Ok(Expr::pi(loc, Param::new(name, ty, param.implicit), body))
            })?,
            Sx::Fun(name, body) => self.scoped(|this| {
                let name = this.bind(name);
                let body = this.expr(*body)?;
                Ok(Expr::fun(loc, name, body))
            })?,
            Sx::Call(f, x, kind) => {
                let f = self.expr(*f)?;
                let x = self.expr(*x)?;
                Expr::call(loc, f, x, kind)
            }
            Sx::Hole => Expr::placeholder(loc, true),
            Sx::Nomatch(arg) => Expr::nomatch(loc, self.expr(*arg)?),
        })
    }
}
