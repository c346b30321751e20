use std::{
    fmt::{self, Display, Formatter},
    rc::Rc,
    sync::atomic::{AtomicUsize, Ordering},
};

static NEXT_ID: AtomicUsize = AtomicUsize::new(1);

/// Mint a number that has never been handed out before in this process.
fn fresh() -> usize {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// A byte offset into the original source text.
#[derive(Hash, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub struct Loc(pub usize);

/// A line-and-column pair, both starting at 1.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LinePosition {
    /// The line number.
    pub line: usize,
    /// The byte-offset from the start of the line, plus one.
    pub column: usize,
}

impl Loc {
    pub fn new(offset: usize) -> Loc {
        Loc(offset)
    }

    /// Translate this offset to a line and column of `text`. Offsets past the
    /// end are clamped to the end of the text.
    pub fn position(self, text: &str) -> LinePosition {
        let bytes = text.as_bytes();
        let offset = self.0.min(bytes.len());
        let before = &bytes[..offset];
        let line = before.iter().filter(|b| **b == b'\n').count() + 1;
        let line_start = before
            .iter()
            .rposition(|b| *b == b'\n')
            .map_or(0, |newline| newline + 1);
        LinePosition {
            line,
            column: offset - line_start + 1,
        }
    }
}

impl Display for Loc {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

impl From<usize> for Loc {
    fn from(x: usize) -> Loc {
        Loc(x)
    }
}

/// The identity of a binder or a global declaration.
#[derive(Hash, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Id(usize);

impl Id {
    pub fn fresh() -> Id {
        Id(fresh())
    }

    pub fn to_usize(self) -> usize {
        self.0
    }
}

impl Display for Id {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A name as written by the programmer, paired with the identity the name
/// resolver assigned to it. Two identifiers denote the same variable exactly
/// when their ids agree; the text is only used for printing and for matching
/// named implicit arguments.
#[derive(Hash, Clone, PartialEq, Eq, Debug)]
pub struct Ident {
    pub text: Rc<str>,
    pub id: Id,
}

impl Ident {
    /// Create an identifier with a brand new identity.
    pub fn fresh(text: &str) -> Ident {
        Ident {
            text: Rc::from(text),
            id: Id::fresh(),
        }
    }

    /// Create an identifier that shares this one's text but not its identity.
    pub fn refresh(&self) -> Ident {
        Ident {
            text: self.text.clone(),
            id: Id::fresh(),
        }
    }

    /// The name `_`, which can never be referred to.
    pub fn unbound() -> Ident {
        Ident::fresh("_")
    }

    pub fn is_unbound(&self) -> bool {
        &*self.text == "_"
    }
}

impl Display for Ident {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HoleId(usize);

impl HoleId {
    pub fn fresh() -> HoleId {
        HoleId(fresh())
    }

    pub fn to_usize(self) -> usize {
        self.0
    }
}

impl Display for HoleId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
