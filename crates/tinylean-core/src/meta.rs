//! The metavariable store.

use crate::common::{HoleId, Loc};
use crate::syn::{Param, RcTerm, Term};
use indexmap::IndexMap;

/// The local context: parameters in scope, outermost first.
pub type Context = im::Vector<Param<RcTerm>>;

/// What is known about a hole: its type, and its value once solved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub ty: RcTerm,
    pub value: Option<RcTerm>,
}

impl Answer {
    pub fn is_solved(&self) -> bool {
        self.value.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct Hole {
    pub loc: Loc,
    pub user: bool,
    /// The local context at the point the hole was created.
    pub context: Context,
    pub answer: Answer,
}

/// A position in the store, taken before a speculative elaboration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

#[derive(Debug, Default)]
pub struct Holes {
    holes: IndexMap<HoleId, Hole>,
}

impl Holes {
    pub fn new() -> Holes {
        Holes::default()
    }

    pub fn len(&self) -> usize {
        self.holes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holes.is_empty()
    }

    /// Allocate an unsolved hole of type `ty` and return a placeholder for it.
    pub fn insert(&mut self, loc: Loc, user: bool, context: Context, ty: RcTerm) -> RcTerm {
        let id = HoleId::fresh();
        let answer = Answer { ty, value: None };
        self.holes.insert(
            id,
            Hole {
                loc,
                user,
                context,
                answer,
            },
        );
        log::trace!("new hole {id} at {loc}");
        Term::placeholder_rc(id, user)
    }

    pub fn get(&self, id: HoleId) -> Option<&Hole> {
        self.holes.get(&id)
    }

    pub fn get_mut(&mut self, id: HoleId) -> Option<&mut Hole> {
        self.holes.get_mut(&id)
    }

    /// The value of a solved hole.
    pub fn value(&self, id: HoleId) -> Option<RcTerm> {
        self.holes.get(&id).and_then(|hole| hole.answer.value.clone())
    }

    pub fn is_unsolved(&self, id: HoleId) -> bool {
        self.holes
            .get(&id)
            .is_some_and(|hole| !hole.answer.is_solved())
    }

    /// Assign a value to an unsolved hole. Holes are single-assignment.
    pub fn solve(&mut self, id: HoleId, value: RcTerm) {
        let Some(hole) = self.holes.get_mut(&id) else {
            panic!("solving unknown hole {id}");
        };
        assert!(!hole.answer.is_solved(), "hole {id} is already solved");
        log::trace!("solve hole {id} := {value}");
        hole.answer.value = Some(value);
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.holes.len())
    }

    /// Forget every hole allocated since `checkpoint`.
    pub fn rollback(&mut self, checkpoint: Checkpoint) {
        self.holes.truncate(checkpoint.0);
    }

    /// Holes without a value, in creation order.
    pub fn unsolved(&self) -> impl Iterator<Item = (HoleId, &Hole)> {
        self.holes
            .iter()
            .filter(|(_, hole)| !hole.answer.is_solved())
            .map(|(id, hole)| (*id, hole))
    }

    pub fn iter(&self) -> impl Iterator<Item = (HoleId, &Hole)> {
        self.holes.iter().map(|(id, hole)| (*id, hole))
    }
}
