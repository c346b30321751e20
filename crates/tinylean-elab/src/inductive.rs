//! Inductive datatypes and their constructors.
//!
//! A datatype is used as a function from its parameters to `Type`. A
//! constructor may pin some of its datatype's parameters to particular terms
//! (its index arguments). The parameters it leaves alone become leading
//! implicit parameters of the constructor, so `Nil` in
//!
//! ```text
//! data Vec (A: Type) (n: N)
//! | Nil (n := Z)
//! | Cons {m: N} (a: A) (v: Vec A m) (n := S m)
//! ```
//!
//! has type `{A: Type} → (Vec A Z)`.

use crate::elaborator::{check_params, check_type, infer_type};
use crate::{Error, Result, State};
use indexmap::IndexMap;
use tinylean_core::common::Id;
use tinylean_core::declaration::{CtorDecl, DataDecl, Declaration};
use tinylean_core::syn::{Args, Param, RcTerm, Term};
use tinylean_surface::Expr;

pub fn check_data(state: &mut State, data: &DataDecl<Expr>) -> Result<DataDecl<RcTerm>> {
    let params = state.scoped(|state| check_params(state, &data.params))?;
    // Registered first, so that constructors can mention the datatype.
    let checked = DataDecl::new(data.loc, data.name.clone(), params, vec![]);
    state.define(&data.name, Declaration::Data(checked));
    for ctor in &data.ctors {
        check_ctor_decl(state, ctor)?;
    }
    state.lookup_data(&data.name, data.loc).cloned()
}

/// Check a constructor of an already declared datatype, then register it
/// both globally and on the datatype.
pub fn check_ctor_decl(state: &mut State, ctor: &CtorDecl<Expr>) -> Result<CtorDecl<RcTerm>> {
    let owner = state.lookup_data(&ctor.ty_name, ctor.loc)?.clone();
    let checked = check_ctor(state, &owner, ctor)?;
    state.define(&checked.name, Declaration::Ctor(checked.clone()));
    state.add_ctor(&checked);
    Ok(checked)
}

/// Constructors are checked with every parameter of their datatype in scope.
fn check_ctor(
    state: &mut State,
    owner: &DataDecl<RcTerm>,
    ctor: &CtorDecl<Expr>,
) -> Result<CtorDecl<RcTerm>> {
    state.scoped(|state| {
        for param in &owner.params {
            state.bind(param.clone());
        }
        let params = check_params(state, &ctor.params)?;
        let index_args = ctor
            .index_args
            .iter()
            .map(|(lhs, rhs)| check_index_arg(state, owner, lhs, rhs))
            .collect::<Result<Vec<_>>>()?;
        Ok(CtorDecl::new(
            ctor.loc,
            ctor.name.clone(),
            params,
            index_args,
            ctor.ty_name.clone(),
        ))
    })
}

/// The left side must name a parameter of the datatype; the right side is
/// checked against that parameter's type.
fn check_index_arg(
    state: &mut State,
    owner: &DataDecl<RcTerm>,
    lhs: &Expr,
    rhs: &Expr,
) -> Result<(RcTerm, RcTerm)> {
    let (target, _) = infer_type(state, lhs)?;
    let param = match &*target {
        Term::Variable(var) => owner
            .params
            .iter()
            .find(|param| param.name.id == var.name.id),
        _ => None,
    };
    let Some(param) = param else {
        return Err(Error::type_mismatch("owner parameter", &target, lhs.loc()));
    };
    let value = check_type(state, rhs, param.ty.clone())?;
    Ok((target, value))
}

fn variable_args(params: &[Param<RcTerm>]) -> Args {
    params
        .iter()
        .map(|param| (param.name.id, Term::variable_rc(param.name.clone())))
        .collect()
}

/// `λ params ↦ Data` and `params → Type`.
pub fn data_value_and_type(data: &DataDecl<RcTerm>) -> (RcTerm, RcTerm) {
    let value = Term::lambdas(
        data.params.clone(),
        Term::data_rc(data.name.clone(), variable_args(&data.params)),
    );
    let ty = Term::pis(data.params.clone(), Term::universe_rc());
    (value, ty)
}

pub fn ctor_value_and_type(data: &DataDecl<RcTerm>, ctor: &CtorDecl<RcTerm>) -> (RcTerm, RcTerm) {
    let pinned: IndexMap<Id, RcTerm> = ctor
        .index_args
        .iter()
        .filter_map(|(target, value)| match &**target {
            Term::Variable(var) => Some((var.name.id, value.clone())),
            _ => None,
        })
        .collect();
    let unpinned: Vec<_> = data
        .params
        .iter()
        .filter(|param| !pinned.contains_key(&param.name.id))
        .map(|param| Param::implicit(param.name.clone(), param.ty.clone()))
        .collect();
    let params = || unpinned.iter().chain(&ctor.params).cloned();

    let value = Term::lambdas(
        params(),
        Term::ctor_rc(
            ctor.ty_name.clone(),
            ctor.name.clone(),
            variable_args(&ctor.params),
        ),
    );

    let index_args = data
        .params
        .iter()
        .map(|param| {
            let arg = pinned
                .get(&param.name.id)
                .cloned()
                .unwrap_or_else(|| Term::variable_rc(param.name.clone()));
            (param.name.id, arg)
        })
        .collect();
    let ty = Term::pis(params(), Term::data_rc(data.name.clone(), index_args));
    (value, ty)
}
