use crate::implicit::{insert_implicits, with_placeholders};
use crate::inductive::{check_ctor_decl, check_data, ctor_value_and_type, data_value_and_type};
use crate::*;

use tinylean_core::common::Ident;
use tinylean_core::declaration::{self as decl, Declaration};
use tinylean_core::rename::rename;
use tinylean_core::syn::{Param, RcTerm, Term};
use tinylean_surface::{self as surface, Decl, Expr};

/// Elaborate a whole program with a fresh state.
pub fn check_program(decls: &[Decl]) -> Result<Vec<Declaration<RcTerm>>> {
    State::new().run(decls)
}

impl State {
    /// Elaborate each declaration in order, then make sure every hole was
    /// solved along the way.
    pub fn run(&mut self, decls: &[Decl]) -> Result<Vec<Declaration<RcTerm>>> {
        let checked = decls
            .iter()
            .map(|decl| check_declaration(self, decl))
            .collect::<Result<Vec<_>>>()?;
        self.check_solved()?;
        Ok(checked)
    }
}

pub fn check_declaration(state: &mut State, decl: &Decl) -> Result<Declaration<RcTerm>> {
    match decl.name() {
        Some(name) => log::debug!("checking {name} {}", decl.loc()),
        None => log::debug!("checking example {}", decl.loc()),
    }
    match decl {
        Declaration::Definition(def) => {
            let def = check_definition(state, def)?;
            let name = def.name.clone();
            let def = Declaration::Definition(def);
            state.define(&name, def.clone());
            Ok(def)
        }
        Declaration::Example(example) => {
            let example = check_example(state, example)?;
            Ok(Declaration::Example(example))
        }
        Declaration::Data(data) => check_data(state, data).map(Declaration::Data),
        Declaration::Ctor(ctor) => check_ctor_decl(state, ctor).map(Declaration::Ctor),
    }
}

/// Check each parameter type in the scope of the ones before it, leaving
/// them all in scope.
pub fn check_params(state: &mut State, params: &[Param<Expr>]) -> Result<Vec<Param<RcTerm>>> {
    let mut checked = Vec::with_capacity(params.len());
    for param in params {
        let ty = check_type(state, &param.ty, Term::universe_rc())?;
        let param = param.with_type(ty);
        state.bind(param.clone());
        checked.push(param);
    }
    Ok(checked)
}

fn check_definition(
    state: &mut State,
    def: &decl::Definition<Expr>,
) -> Result<decl::Definition<RcTerm>> {
    state.scoped(|state| {
        let params = check_params(state, &def.params)?;
        let ret = check_type(state, &def.ret, Term::universe_rc())?;
        let body = check_type(state, &def.body, ret.clone())?;
        Ok(decl::Definition::new(
            def.loc,
            def.name.clone(),
            params,
            ret,
            body,
        ))
    })
}

fn check_example(state: &mut State, example: &decl::Example<Expr>) -> Result<decl::Example<RcTerm>> {
    state.scoped(|state| {
        let params = check_params(state, &example.params)?;
        let ret = check_type(state, &example.ret, Term::universe_rc())?;
        let body = check_type(state, &example.body, ret.clone())?;
        Ok(decl::Example::new(example.loc, params, ret, body))
    })
}

pub fn check_type(state: &mut State, expr: &Expr, ty: RcTerm) -> Result<RcTerm> {
    log::trace!("check {} : {ty}", expr.loc());
    if let Expr::Fun(fun) = expr {
        return check_fun(state, fun, &ty);
    }

    let checkpoint = state.holes.checkpoint();
    let (value, got) = infer_type(state, expr)?;
    let got = state.normalize(&got);
    if got.is_implicit_pi() {
        // Fill in the implicit argument and try again.
        state.holes.rollback(checkpoint);
        let expr = with_placeholders(expr.clone(), 1);
        return check_type(state, &expr, ty);
    }

    let want = state.normalize(&ty);
    if state.convertible(&got, &want) {
        Ok(value)
    } else {
        Err(Error::type_mismatch(want, got, expr.loc()))
    }
}

fn check_fun(state: &mut State, fun: &surface::Fun, ty: &RcTerm) -> Result<RcTerm> {
    let ty = state.normalize(ty);
    let Term::Pi(pi) = &*ty else {
        return Err(Error::type_mismatch(&ty, "function", fun.loc));
    };
    let ret = state.evaluator().run_with(
        &pi.param.name,
        Term::variable_rc(fun.param.clone()),
        &pi.body,
    );
    let param = Param::new(fun.param.clone(), pi.param.ty.clone(), pi.param.implicit);
    let body = state.with_param(param.clone(), |state| check_type(state, &fun.body, ret))?;
    Ok(Term::lambda_rc(param, body))
}

pub fn infer_type(state: &mut State, expr: &Expr) -> Result<(RcTerm, RcTerm)> {
    log::trace!("infer {}", expr.loc());
    match expr {
        Expr::Type(_) => Ok((Term::universe_rc(), Term::universe_rc())),
        Expr::Ref(r) => infer_ref(state, r),
        Expr::Pi(pi) => infer_pi(state, pi),
        Expr::Fun(fun) => Err(Error::type_mismatch(
            "function type annotation",
            "function",
            fun.loc,
        )),
        Expr::Call(call) => infer_call(state, call),
        Expr::Placeholder(placeholder) => Ok(infer_placeholder(state, placeholder)),
        Expr::Nomatch(nomatch) => infer_nomatch(state, nomatch),
    }
}

fn infer_ref(state: &mut State, r: &surface::Ref) -> Result<(RcTerm, RcTerm)> {
    if let Some(param) = state.lookup_local(&r.name) {
        return Ok((Term::variable_rc(r.name.clone()), param.ty.clone()));
    }
    let (value, ty) = match state.lookup_global(&r.name) {
        Some(Declaration::Definition(def)) => (
            Term::lambdas(def.params.clone(), def.body.clone()),
            Term::pis(def.params.clone(), def.ret.clone()),
        ),
        Some(Declaration::Data(data)) => data_value_and_type(data),
        Some(Declaration::Ctor(ctor)) => {
            let data = state.lookup_data(&ctor.ty_name, r.loc)?;
            ctor_value_and_type(data, ctor)
        }
        Some(Declaration::Example(_)) | None => return Err(undefined(&r.name, r)),
    };
    Ok((rename(&value), rename(&ty)))
}

fn undefined(name: &Ident, r: &surface::Ref) -> Error {
    Error::UndefinedVariable {
        name: name.to_string(),
        loc: r.loc,
    }
}

fn infer_pi(state: &mut State, pi: &surface::Pi) -> Result<(RcTerm, RcTerm)> {
    let ty = check_type(state, &pi.param.ty, Term::universe_rc())?;
    let param = pi.param.with_type(ty);
    let body = state.with_param(param.clone(), |state| {
        check_type(state, &pi.body, Term::universe_rc())
    })?;
    Ok((Term::pi_rc(param, body), Term::universe_rc()))
}

fn infer_call(state: &mut State, call: &surface::Call) -> Result<(RcTerm, RcTerm)> {
    let checkpoint = state.holes.checkpoint();
    let (f, f_ty) = infer_type(state, &call.callee)?;
    let f_ty = state.normalize(&f_ty);
    if let Some(call) = insert_implicits(call, &f_ty)? {
        state.holes.rollback(checkpoint);
        return infer_type(state, &call);
    }

    let Term::Pi(pi) = &*f_ty else {
        return Err(Error::type_mismatch("function", &f_ty, call.callee.loc()));
    };
    let x = check_type(state, &call.arg, pi.param.ty.clone())?;
    let mut eval = state.evaluator();
    let value = eval.apply(f, [x.clone()]);
    let ty = eval.run_with(&pi.param.name, x, &pi.body);
    Ok((value, ty))
}

/// A hole for the type, then a hole of that type for the value.
fn infer_placeholder(state: &mut State, placeholder: &surface::Placeholder) -> (RcTerm, RcTerm) {
    let ty = state.insert_hole(placeholder.loc, placeholder.user, Term::universe_rc());
    let value = state.insert_hole(placeholder.loc, placeholder.user, ty.clone());
    (value, ty)
}

/// Eliminate a value of a datatype without constructors.
fn infer_nomatch(state: &mut State, nomatch: &surface::Nomatch) -> Result<(RcTerm, RcTerm)> {
    let (_, ty) = infer_type(state, &nomatch.arg)?;
    let ty = state.normalize(&ty);
    let empty = match &*ty {
        Term::Data(data) => state
            .lookup_global(&data.name)
            .and_then(Declaration::as_data)
            .is_some_and(|data| data.ctors.is_empty()),
        _ => false,
    };
    if !empty {
        return Err(Error::type_mismatch(
            "empty datatype",
            &ty,
            nomatch.arg.loc(),
        ));
    }
    let result_ty = state.insert_hole(nomatch.loc, false, Term::universe_rc());
    Ok((Term::nomatch_rc(), result_ty))
}
