//! Definitional equality.
//!
//! The converter compares two terms structurally, up to the names of their
//! binders. Unsolved holes unify with whatever they meet: the first side
//! found to be an unsolved hole is assigned the other side. There is no
//! occurs check, so a hole can be solved with a term mentioning itself.

use crate::eval::Evaluator;
use crate::meta::Holes;
use crate::syn::{self, Args, Param, RcTerm, Term};

pub struct Converter<'a> {
    holes: &'a mut Holes,
}

impl<'a> Converter<'a> {
    pub fn new(holes: &'a mut Holes) -> Converter<'a> {
        Converter { holes }
    }

    pub fn eq(&mut self, lhs: &RcTerm, rhs: &RcTerm) -> bool {
        let lhs = self.resolve(lhs);
        let rhs = self.resolve(rhs);

        if let (Term::Placeholder(l), Term::Placeholder(r)) = (&*lhs, &*rhs) {
            if l.id == r.id {
                return true;
            }
        }
        if let Term::Placeholder(l) = &*lhs {
            if self.holes.is_unsolved(l.id) {
                self.holes.solve(l.id, rhs.clone());
                return true;
            }
        }
        if let Term::Placeholder(r) = &*rhs {
            if self.holes.is_unsolved(r.id) {
                self.holes.solve(r.id, lhs.clone());
                return true;
            }
        }

        match (&*lhs, &*rhs) {
            (Term::Universe, Term::Universe) | (Term::Nomatch, Term::Nomatch) => true,
            (Term::Variable(l), Term::Variable(r)) => l.name.id == r.name.id,
            (Term::Application(l), Term::Application(r)) => {
                self.eq(&l.callee, &r.callee) && self.eq(&l.arg, &r.arg)
            }
            (Term::Pi(l), Term::Pi(r)) => self.eq_binders(&l.param, &l.body, &r.param, &r.body),
            (Term::Lambda(l), Term::Lambda(r)) => {
                self.eq_binders(&l.param, &l.body, &r.param, &r.body)
            }
            (Term::Data(l), Term::Data(r)) => {
                l.name.id == r.name.id && self.eq_args(&l.args, &r.args)
            }
            (Term::Ctor(l), Term::Ctor(r)) => self.eq_ctors(l, r),
            _ => false,
        }
    }

    /// Replace a solved hole by its value, following holes solved with other
    /// holes until the head is no longer a solved hole.
    fn resolve(&self, term: &RcTerm) -> RcTerm {
        let mut term = term.clone();
        while let Term::Placeholder(placeholder) = &*term {
            match self.holes.value(placeholder.id) {
                Some(value) => term = value,
                None => break,
            }
        }
        term
    }

    /// Compare two binders: the domains, then the bodies with the right
    /// binder renamed to the left one.
    fn eq_binders(
        &mut self,
        lparam: &Param<RcTerm>,
        lbody: &RcTerm,
        rparam: &Param<RcTerm>,
        rbody: &RcTerm,
    ) -> bool {
        if !self.eq(&lparam.ty, &rparam.ty) {
            return false;
        }
        let rbody = Evaluator::new(self.holes).run_with(
            &rparam.name,
            Term::variable_rc(lparam.name.clone()),
            rbody,
        );
        self.eq(lbody, &rbody)
    }

    fn eq_ctors(&mut self, lhs: &syn::Ctor, rhs: &syn::Ctor) -> bool {
        lhs.ty_name.id == rhs.ty_name.id
            && lhs.name.id == rhs.name.id
            && self.eq_args(&lhs.args, &rhs.args)
    }

    fn eq_args(&mut self, lhs: &Args, rhs: &Args) -> bool {
        if lhs.len() != rhs.len() || lhs.keys().any(|key| !rhs.contains_key(key)) {
            return false;
        }
        lhs.iter()
            .all(|(key, value)| rhs.get(key).is_some_and(|other| self.eq(value, other)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{Id, Ident, Loc};
    use crate::meta::Context;
    use crate::rename::rename;

    fn hole(holes: &mut Holes) -> (RcTerm, crate::common::HoleId) {
        let term = holes.insert(Loc(0), false, Context::new(), Term::universe_rc());
        let Term::Placeholder(placeholder) = &*term else {
            panic!("expected a placeholder");
        };
        let id = placeholder.id;
        (term, id)
    }

    /// `(T: Type) → (a: T) → (p: (v: T) → Type) → (pa: (p a)) → (p a)`
    fn refl_type() -> RcTerm {
        let t = Ident::fresh("T");
        let a = Ident::fresh("a");
        let p = Ident::fresh("p");
        let v = Ident::fresh("v");
        let pa = Ident::fresh("pa");
        let p_a = Term::application_rc(Term::variable_rc(p.clone()), Term::variable_rc(a.clone()));
        Term::pis(
            vec![
                Param::explicit(t.clone(), Term::universe_rc()),
                Param::explicit(a, Term::variable_rc(t.clone())),
                Param::explicit(
                    p,
                    Term::pi_rc(Param::explicit(v, Term::variable_rc(t)), Term::universe_rc()),
                ),
                Param::explicit(pa, p_a.clone()),
            ],
            p_a,
        )
    }

    #[test]
    fn test_reflexive_up_to_renaming() {
        let mut holes = Holes::new();
        let ty = refl_type();
        let x = Ident::fresh("x");
        let lam = Term::lambda_rc(
            Param::explicit(x.clone(), Term::universe_rc()),
            Term::variable_rc(x),
        );
        let mut args = Args::new();
        args.insert(Id::fresh(), lam.clone());
        let data = Term::data_rc(Ident::fresh("Box"), args);

        let mut conv = Converter::new(&mut holes);
        for term in [ty, lam, data, Term::universe_rc(), Term::nomatch_rc()] {
            assert!(conv.eq(&term, &rename(&term)), "{term} is not reflexive");
        }
    }

    #[test]
    fn test_distinct_variables() {
        let mut holes = Holes::new();
        let mut conv = Converter::new(&mut holes);
        let a = Term::variable_rc(Ident::fresh("a"));
        let other_a = Term::variable_rc(Ident::fresh("a"));
        assert!(!conv.eq(&a, &other_a));
        assert!(!conv.eq(&a, &Term::universe_rc()));
    }

    #[test]
    fn test_solve_left_first() {
        let mut holes = Holes::new();
        let (lhs, l) = hole(&mut holes);
        let (rhs, r) = hole(&mut holes);
        let a = Term::variable_rc(Ident::fresh("a"));

        let mut conv = Converter::new(&mut holes);
        assert!(conv.eq(&lhs, &a));
        // The solved hole now stands for `a`; the right one is solved with it.
        assert!(conv.eq(&rhs, &lhs));
        assert!(conv.eq(&lhs, &rhs));
        assert_eq!(holes.value(l), Some(a.clone()));
        assert_eq!(holes.value(r), Some(a));
    }

    #[test]
    fn test_same_hole_is_not_solved() {
        let mut holes = Holes::new();
        let (term, id) = hole(&mut holes);
        assert!(Converter::new(&mut holes).eq(&term, &term));
        assert!(holes.is_unsolved(id));
    }

    #[test]
    fn test_solve_inside_structure() {
        let mut holes = Holes::new();
        let (h, id) = hole(&mut holes);
        let f = Ident::fresh("f");
        let lhs = Term::application_rc(Term::variable_rc(f.clone()), h);
        let rhs = Term::application_rc(Term::variable_rc(f), Term::universe_rc());
        assert!(Converter::new(&mut holes).eq(&lhs, &rhs));
        assert_eq!(holes.value(id), Some(Term::universe_rc()));
    }

    #[test]
    fn test_solve_through_hole_chain() {
        let mut holes = Holes::new();
        let (a, a_id) = hole(&mut holes);
        let (b, b_id) = hole(&mut holes);
        let f = Term::variable_rc(Ident::fresh("f"));
        let call = |x: &RcTerm, y: &RcTerm, z: &RcTerm| {
            Term::application_rc(
                Term::application_rc(Term::application_rc(f.clone(), x.clone()), y.clone()),
                z.clone(),
            )
        };
        let ty = Term::universe_rc();

        // (f ?a Type ?a) against (f ?b ?b Type): ?a := ?b, then ?b := Type,
        // and the last ?a must see through to Type.
        let lhs = call(&a, &ty, &a);
        let rhs = call(&b, &b, &ty);
        assert!(Converter::new(&mut holes).eq(&lhs, &rhs));
        assert_eq!(holes.value(a_id), Some(b));
        assert_eq!(holes.value(b_id), Some(ty));
    }

    #[test]
    fn test_data_args() {
        let mut holes = Holes::new();
        let vec = Ident::fresh("Vec");
        let a = Id::fresh();
        let n = Id::fresh();
        let mut lhs = Args::new();
        lhs.insert(a, Term::universe_rc());
        lhs.insert(n, Term::nomatch_rc());
        let mut rhs = Args::new();
        rhs.insert(n, Term::nomatch_rc());
        rhs.insert(a, Term::universe_rc());
        let mut fewer = Args::new();
        fewer.insert(a, Term::universe_rc());

        let mut conv = Converter::new(&mut holes);
        assert!(conv.eq(&Term::data_rc(vec.clone(), lhs.clone()), &Term::data_rc(vec.clone(), rhs)));
        assert!(!conv.eq(&Term::data_rc(vec.clone(), lhs.clone()), &Term::data_rc(vec, fewer)));
        assert!(!conv.eq(
            &Term::data_rc(Ident::fresh("Vec"), lhs.clone()),
            &Term::data_rc(Ident::fresh("Vec"), lhs)
        ));
    }

    #[test]
    fn test_ctors() {
        let mut holes = Holes::new();
        let nat = Ident::fresh("N");
        let z = Ident::fresh("Z");
        let s = Ident::fresh("S");
        let zero = Term::ctor_rc(nat.clone(), z.clone(), Args::new());
        let mut conv = Converter::new(&mut holes);
        assert!(conv.eq(&zero, &Term::ctor_rc(nat.clone(), z, Args::new())));
        assert!(!conv.eq(&zero, &Term::ctor_rc(nat, s, Args::new())));
    }
}
