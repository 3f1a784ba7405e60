#![deny(unused_crate_dependencies)]

#[cfg(test)]
mod test;

use procdraw_core::Value;
use procdraw_diagnostic::Source;
use procdraw_eval::Interpreter;
pub use procdraw_lex::Balance;
use procdraw_lex::Lexer;
use procdraw_parse::{ParseError, Parser};

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    ParseError(ParseError),
    EvalError(procdraw_eval::Error),
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Error::ParseError(err)
    }
}

impl From<procdraw_eval::Error> for Error {
    fn from(err: procdraw_eval::Error) -> Self {
        Error::EvalError(err)
    }
}

impl Error {
    /// Byte offset into the input, when the error has one.
    pub fn position(&self) -> Option<usize> {
        match self {
            Error::ParseError(err) => Some(err.position()),
            Error::EvalError(_) => None,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Error::ParseError(err) => err.message(),
            Error::EvalError(err) => err.message(),
        }
    }
}

/// Indentation of continuation lines when results are pretty-printed.
pub const INDENT: usize = 2;

pub struct Repl {
    source: Source,
    interpreter: Interpreter,
    margin: Option<usize>,
}

impl Repl {
    /// A fresh interpreter with the builtin library installed.
    pub fn new(source: Source) -> Self {
        let mut interpreter = Interpreter::new();
        procdraw_builtins::install(&mut interpreter);
        Repl {
            source,
            interpreter,
            margin: None,
        }
    }

    /// Pretty-print results to fit `margin` columns, or print each on one line
    /// when `None`.
    pub fn set_margin(&mut self, margin: Option<usize>) {
        self.margin = margin;
    }

    pub fn interpreter(&mut self) -> &mut Interpreter {
        &mut self.interpreter
    }

    pub fn check_balanced(&self, input: &str) -> Balance {
        procdraw_lex::check_balanced(input)
    }

    /// Evaluate every form in `input` and show the value of the last one.
    ///
    /// Returns `None` when `input` holds no forms.
    pub fn eval_show(&mut self, input: &str) -> Result<Option<String>, Error> {
        let mut parser = Parser::new(self.source.clone(), Lexer::new(input));
        let mut last = None;
        loop {
            let heap = self.interpreter.heap_mut();
            match parser.read(heap)? {
                Value::Eof => break,
                form => last = Some(self.interpreter.eval(form)?),
            }
        }
        Ok(last.map(|value| self.show(value)))
    }

    fn show(&self, value: Value) -> String {
        match self.margin {
            Some(margin) => self.interpreter.pretty_print(value, margin, INDENT),
            None => self.interpreter.print(value),
        }
    }

    /// Like `eval_show`, but errors are rendered as their message.
    pub fn do_command(&mut self, input: &str) -> String {
        match self.eval_show(input) {
            Ok(shown) => shown.unwrap_or_default(),
            Err(err) => err.message(),
        }
    }
}
