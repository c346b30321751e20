//! Implicit-argument insertion.
//!
//! When a function with leading implicit parameters is used, the elaborator
//! rewrites the use to pass an inserted placeholder for each implicit
//! parameter that the program left out, and elaborates the rewritten
//! expression instead.

use crate::{Error, Result};
use tinylean_core::syn::{RcTerm, Term};
use tinylean_surface::{ArgKind, Call, Expr};

/// Apply `expr` to `count` inserted placeholders.
pub fn with_placeholders(expr: Expr, count: usize) -> Expr {
    let loc = expr.loc();
    (0..count).fold(expr, |expr, _| {
        Expr::call(
            loc,
            expr,
            Expr::placeholder(loc, false),
            ArgKind::ExplicitImplicit,
        )
    })
}

/// Rewrite `call` if its callee, of type `callee_ty`, expects implicit
/// arguments before the one supplied. `None` means the call stays as is.
pub fn insert_implicits(call: &Call, callee_ty: &RcTerm) -> Result<Option<Expr>> {
    if !callee_ty.is_implicit_pi() {
        return Ok(None);
    }
    let skipped = match &call.kind {
        ArgKind::ExplicitImplicit => return Ok(None),
        ArgKind::Ordinary => 1,
        ArgKind::Named(name) => count_skipped(callee_ty, name, call)?,
    };
    if skipped == 0 {
        return Ok(None);
    }
    log::trace!("insert {skipped} implicit argument(s) at {}", call.loc);
    let callee = with_placeholders((*call.callee).clone(), skipped);
    Ok(Some(Expr::call(
        call.loc,
        callee,
        (*call.arg).clone(),
        call.kind.clone(),
    )))
}

/// Count the implicit parameters before the one called `name`. Only a chain
/// of leading implicit parameters is searched.
fn count_skipped(ty: &RcTerm, name: &str, call: &Call) -> Result<usize> {
    let mut ty = ty;
    let mut skipped = 0;
    loop {
        match &**ty {
            Term::Pi(pi) if pi.param.implicit => {
                if &*pi.param.name.text == name {
                    return Ok(skipped);
                }
                skipped += 1;
                ty = &pi.body;
            }
            _ => {
                return Err(Error::UndefinedImplicitParam {
                    name: name.to_string(),
                    loc: call.callee.loc(),
                })
            }
        }
    }
}
