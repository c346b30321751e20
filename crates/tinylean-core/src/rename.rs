//! Alpha-renaming: giving every binder of a term a brand new identity.
//!
//! Global definitions are stored once but instantiated at every reference
//! site. Renaming each instance keeps two uses of the same global from
//! sharing binder identities, which would otherwise be captured during
//! substitution.

use crate::common::{Id, Ident};
use crate::syn::{Args, Param, RcTerm, Term};
use std::collections::HashMap;

/// A map from the binders of the original term to their replacements. Only
/// binders whose scope we are currently inside are present.
#[derive(Default)]
pub struct Renamer {
    map: HashMap<Id, Ident>,
}

/// Rename every binder of `term`. Free variables are left untouched.
pub fn rename(term: &RcTerm) -> RcTerm {
    Renamer::new().run(term)
}

impl Renamer {
    pub fn new() -> Renamer {
        Renamer::default()
    }

    pub fn run(&mut self, term: &RcTerm) -> RcTerm {
        match &**term {
            Term::Variable(var) => match self.map.get(&var.name.id) {
                Some(renamed) => Term::variable_rc(renamed.clone()),
                None => term.clone(),
            },
            Term::Pi(pi) => self.under_binder(&pi.param, |renamer, param| {
                Term::pi_rc(param, renamer.run(&pi.body))
            }),
            Term::Lambda(lam) => self.under_binder(&lam.param, |renamer, param| {
                Term::lambda_rc(param, renamer.run(&lam.body))
            }),
            Term::Application(app) => {
                Term::application_rc(self.run(&app.callee), self.run(&app.arg))
            }
            Term::Data(data) => Term::data_rc(data.name.clone(), self.run_args(&data.args)),
            Term::Ctor(ctor) => Term::ctor_rc(
                ctor.ty_name.clone(),
                ctor.name.clone(),
                self.run_args(&ctor.args),
            ),
            Term::Universe | Term::Placeholder(_) | Term::Nomatch => term.clone(),
        }
    }

    /// Argument keys name parameters of a declaration, not variables bound
    /// in this term, so only the values are renamed.
    fn run_args(&mut self, args: &Args) -> Args {
        args.iter()
            .map(|(key, value)| (*key, self.run(value)))
            .collect()
    }

    /// Mint a replacement for the binder of `param`, and run `f` with the
    /// replacement in scope. The parameter type is renamed outside the scope
    /// of its own binder.
    fn under_binder<F>(&mut self, param: &Param<RcTerm>, f: F) -> RcTerm
    where
        F: FnOnce(&mut Renamer, Param<RcTerm>) -> RcTerm,
    {
        let ty = self.run(&param.ty);
        let fresh = param.name.refresh();
        let shadowed = self.map.insert(param.name.id, fresh.clone());
        let result = f(self, Param::new(fresh, ty, param.implicit));
        match shadowed {
            Some(previous) => self.map.insert(param.name.id, previous),
            None => self.map.remove(&param.name.id),
        };
        result
    }
}
