use crate::{Error, Result};
use indexmap::IndexMap;
use tinylean_core::common::{Id, Ident, Loc};
use tinylean_core::declaration::{CtorDecl, DataDecl, Declaration};
use tinylean_core::equal::Converter;
use tinylean_core::eval::Evaluator;
use tinylean_core::meta::{Context, Holes};
use tinylean_core::syn::{Param, RcTerm};

/// Checked declarations, keyed by the identity of their name, in the order
/// they were declared.
pub type Globals = IndexMap<Id, Declaration<RcTerm>>;

/// Everything the elaborator knows while checking one program.
#[derive(Default)]
pub struct State {
    globals: Globals,
    context: Context,
    pub holes: Holes,
}

impl State {
    pub fn new() -> State {
        State::default()
    }

    pub fn globals(&self) -> &Globals {
        &self.globals
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Look up a parameter in scope, innermost first.
    pub fn lookup_local(&self, name: &Ident) -> Option<&Param<RcTerm>> {
        self.context.iter().rev().find(|param| param.name.id == name.id)
    }

    pub fn lookup_global(&self, name: &Ident) -> Option<&Declaration<RcTerm>> {
        self.globals.get(&name.id)
    }

    /// The datatype named `name`.
    pub fn lookup_data(&self, name: &Ident, loc: Loc) -> Result<&DataDecl<RcTerm>> {
        self.lookup_global(name)
            .and_then(Declaration::as_data)
            .ok_or_else(|| Error::UndefinedVariable {
                name: name.to_string(),
                loc,
            })
    }

    /// Make a checked declaration visible to everything after it.
    pub fn define(&mut self, name: &Ident, decl: Declaration<RcTerm>) {
        log::debug!("define {name} {}", name.id);
        self.globals.insert(name.id, decl);
    }

    /// Record a checked constructor on its datatype.
    pub fn add_ctor(&mut self, ctor: &CtorDecl<RcTerm>) {
        if let Some(Declaration::Data(data)) = self.globals.get_mut(&ctor.ty_name.id) {
            data.ctors.push(ctor.clone());
        }
    }

    /// Run `f`, then drop every parameter it brought into scope.
    pub fn scoped<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut State) -> Result<T>,
    {
        let saved = self.context.clone();
        let result = f(self);
        self.context = saved;
        result
    }

    /// Bring `param` into scope. Only meaningful inside [`State::scoped`].
    pub fn bind(&mut self, param: Param<RcTerm>) {
        self.context.push_back(param);
    }

    /// Run `f` with `param` in scope.
    pub fn with_param<T, F>(&mut self, param: Param<RcTerm>, f: F) -> Result<T>
    where
        F: FnOnce(&mut State) -> Result<T>,
    {
        self.scoped(|state| {
            state.bind(param);
            f(state)
        })
    }

    /// Allocate a hole that remembers the current local context.
    pub fn insert_hole(&mut self, loc: Loc, user: bool, ty: RcTerm) -> RcTerm {
        self.holes.insert(loc, user, self.context.clone(), ty)
    }

    pub fn evaluator(&mut self) -> Evaluator<'_> {
        Evaluator::new(&mut self.holes)
    }

    pub fn normalize(&mut self, term: &RcTerm) -> RcTerm {
        self.evaluator().run(term)
    }

    pub fn convertible(&mut self, lhs: &RcTerm, rhs: &RcTerm) -> bool {
        Converter::new(&mut self.holes).eq(lhs, rhs)
    }

    /// Fail with the first hole that was never solved.
    pub fn check_solved(&mut self) -> Result<()> {
        let Some((id, hole)) = self.holes.unsolved().next() else {
            return Ok(());
        };
        let placeholder = tinylean_core::syn::Term::placeholder(id, hole.user).to_string();
        let context = hole.context.iter().map(ToString::to_string).collect();
        let ty = hole.answer.ty.clone();
        let loc = hole.loc;
        let ty = self.normalize(&ty).to_string();
        Err(Error::UnsolvedPlaceholder {
            placeholder,
            context,
            ty,
            loc,
        })
    }
}
