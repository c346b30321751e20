use crate::syn::{Application, Args, Ctor, Data, Lambda, Param, Pi, Placeholder, RcTerm, Term};
use elegance::{Printer, Render};
use std::fmt::{self, Display, Formatter};

// Printed terms double as error payloads, so the printer never breaks lines.
const COLUMNS: usize = 80;

type StringResult<T> = Result<T, <String as Render>::Error>;

fn render<F>(print: F) -> StringResult<String>
where
    F: FnOnce(&mut Printer<String>) -> StringResult<()>,
{
    let mut p = Printer::new(String::new(), COLUMNS);
    print(&mut p)?;
    p.finish()
}

// Rendering into a `String` cannot fail.
pub fn print_term_to_string(term: &Term) -> String {
    render(|p| term.print(p)).unwrap_or_default()
}

pub fn print_param_to_string(param: &Param<RcTerm>) -> String {
    render(|p| param.print(p)).unwrap_or_default()
}

fn print_args<R>(p: &mut Printer<R>, head: String, args: &Args) -> Result<(), R::Error>
where
    R: Render,
{
    if args.is_empty() {
        return p.text_owned(head);
    }
    p.text("(")?;
    p.text_owned(head)?;
    for arg in args.values() {
        p.text(" ")?;
        arg.print(p)?;
    }
    p.text(")")
}

impl Term {
    fn print<R: Render>(&self, p: &mut Printer<R>) -> Result<(), R::Error> {
        match self {
            Term::Universe => p.text("Type"),
            Term::Variable(var) => p.text_owned(var.name.to_string()),
            Term::Pi(pi) => pi.print(p),
            Term::Lambda(lam) => lam.print(p),
            Term::Application(app) => app.print(p),
            Term::Placeholder(placeholder) => placeholder.print(p),
            Term::Data(data) => data.print(p),
            Term::Ctor(ctor) => ctor.print(p),
            Term::Nomatch => p.text("nomatch"),
        }
    }
}

impl Param<RcTerm> {
    fn print<R: Render>(&self, p: &mut Printer<R>) -> Result<(), R::Error> {
        let (open, close) = if self.implicit { ("{", "}") } else { ("(", ")") };
        p.text(open)?;
        p.text_owned(self.name.to_string())?;
        p.text(": ")?;
        self.ty.print(p)?;
        p.text(close)
    }
}

impl Pi {
    fn print<R: Render>(&self, p: &mut Printer<R>) -> Result<(), R::Error> {
        self.param.print(p)?;
        p.text(" → ")?;
        self.body.print(p)
    }
}

impl Lambda {
    fn print<R: Render>(&self, p: &mut Printer<R>) -> Result<(), R::Error> {
        p.text("λ ")?;
        p.text_owned(self.param.name.to_string())?;
        p.text(" ↦ ")?;
        self.body.print(p)
    }
}

impl Application {
    fn print<R: Render>(&self, p: &mut Printer<R>) -> Result<(), R::Error> {
        p.text("(")?;
        self.callee.print(p)?;
        p.text(" ")?;
        self.arg.print(p)?;
        p.text(")")
    }
}

impl Placeholder {
    fn print<R: Render>(&self, p: &mut Printer<R>) -> Result<(), R::Error> {
        let kind = if self.user { "u" } else { "m" };
        p.text_owned(format!("?{kind}.{}", self.id))
    }
}

impl Data {
    fn print<R: Render>(&self, p: &mut Printer<R>) -> Result<(), R::Error> {
        print_args(p, self.name.to_string(), &self.args)
    }
}

impl Ctor {
    fn print<R: Render>(&self, p: &mut Printer<R>) -> Result<(), R::Error> {
        print_args(p, self.name.to_string(), &self.args)
    }
}

impl Display for Term {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&print_term_to_string(self))
    }
}

impl Display for Param<RcTerm> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&print_param_to_string(self))
    }
}
