//! Normalization by substitution.
//!
//! The environment maps binder identities to the terms they stand for. A
//! variable found in the environment is replaced by a renamed copy of its
//! value, so that a value substituted at several sites never shares binders
//! between the copies.

use crate::common::{HoleId, Id, Ident};
use crate::meta::Holes;
use crate::rename::rename;
use crate::syn::{self, Args, RcTerm, Term};
use std::collections::HashMap;

pub struct Evaluator<'a> {
    holes: &'a mut Holes,
    env: HashMap<Id, RcTerm>,
}

/// Normalize `term` under an empty environment.
pub fn normalize(holes: &mut Holes, term: &RcTerm) -> RcTerm {
    Evaluator::new(holes).run(term)
}

impl<'a> Evaluator<'a> {
    pub fn new(holes: &'a mut Holes) -> Evaluator<'a> {
        Evaluator {
            holes,
            env: HashMap::new(),
        }
    }

    pub fn run(&mut self, term: &RcTerm) -> RcTerm {
        match &**term {
            Term::Variable(var) => self.run_variable(term, var),
            Term::Pi(pi) => self.run_pi(pi),
            Term::Lambda(lam) => self.run_lambda(lam),
            Term::Application(app) => self.run_application(app),
            Term::Placeholder(placeholder) => self.run_placeholder(term, placeholder.id),
            Term::Data(data) => Term::data_rc(data.name.clone(), self.run_args(&data.args)),
            Term::Ctor(ctor) => Term::ctor_rc(
                ctor.ty_name.clone(),
                ctor.name.clone(),
                self.run_args(&ctor.args),
            ),
            Term::Universe | Term::Nomatch => term.clone(),
        }
    }

    /// Bind `name` to `value`, then normalize `body`.
    pub fn run_with(&mut self, name: &Ident, value: RcTerm, body: &RcTerm) -> RcTerm {
        self.env.insert(name.id, value);
        self.run(body)
    }

    /// Apply `f` to each of `args` in turn, reducing whenever the head is a
    /// function.
    pub fn apply<I>(&mut self, f: RcTerm, args: I) -> RcTerm
    where
        I: IntoIterator<Item = RcTerm>,
    {
        args.into_iter().fold(f, |f, arg| match &*f {
            Term::Lambda(lam) => self.run_with(&lam.param.name, arg, &lam.body),
            _ => Term::application_rc(f, arg),
        })
    }

    fn run_variable(&mut self, term: &RcTerm, var: &syn::Variable) -> RcTerm {
        match self.env.get(&var.name.id) {
            Some(value) => {
                let value = rename(value);
                self.run(&value)
            }
            None => term.clone(),
        }
    }

    fn run_pi(&mut self, pi: &syn::Pi) -> RcTerm {
        let param = pi.param.with_type(self.run(&pi.param.ty));
        Term::pi_rc(param, self.run(&pi.body))
    }

    fn run_lambda(&mut self, lam: &syn::Lambda) -> RcTerm {
        let param = lam.param.with_type(self.run(&lam.param.ty));
        Term::lambda_rc(param, self.run(&lam.body))
    }

    fn run_application(&mut self, app: &syn::Application) -> RcTerm {
        let callee = self.run(&app.callee);
        let arg = self.run(&app.arg);
        match &*callee {
            Term::Lambda(lam) => self.run_with(&lam.param.name, arg, &lam.body),
            _ => Term::application_rc(callee, arg),
        }
    }

    fn run_placeholder(&mut self, term: &RcTerm, id: HoleId) -> RcTerm {
        let Some(hole) = self.holes.get(id) else {
            return term.clone();
        };
        let ty = hole.answer.ty.clone();
        let value = hole.answer.value.clone();

        let ty = self.run(&ty);
        if let Some(hole) = self.holes.get_mut(id) {
            hole.answer.ty = ty;
        }

        match value {
            Some(value) => self.run(&value),
            None => term.clone(),
        }
    }

    fn run_args(&mut self, args: &Args) -> Args {
        args.iter()
            .map(|(key, value)| (*key, self.run(value)))
            .collect()
    }
}
