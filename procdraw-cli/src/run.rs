use procdraw_core::Value;
use procdraw_diagnostic::{Diagnostic, Location, Message, Source};
use procdraw_eval::{self as eval, Interpreter};
use procdraw_lex::Lexer;
use procdraw_parse::{self as parse, Parser};
use procdraw_repl::INDENT;
use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
};

pub struct Config {
    pub filename: String,
    /// Print the value of each top-level form.
    pub print: bool,
    /// Pretty-print printed values within this many columns.
    pub margin: Option<usize>,
    pub stdout: Option<Box<dyn Write>>,
}

#[derive(Debug)]
pub enum InterpreterError {
    ParseError(parse::ParseError),
    EvalError {
        source: Source,
        /// Start of the top-level form that failed.
        pos: usize,
        error: eval::Error,
    },
    FileDoesNotExist(PathBuf),
    IoError(io::Error),
}

impl From<parse::ParseError> for InterpreterError {
    fn from(err: parse::ParseError) -> Self {
        InterpreterError::ParseError(err)
    }
}

impl From<io::Error> for InterpreterError {
    fn from(err: io::Error) -> Self {
        InterpreterError::IoError(err)
    }
}

impl InterpreterError {
    pub fn report(&self, diagnostic: &mut Diagnostic) {
        match self {
            InterpreterError::ParseError(err) => err.report(diagnostic),
            InterpreterError::EvalError { source, pos, error } => diagnostic.item(
                Some(Location {
                    source: source.clone(),
                    offset: Some(*pos),
                }),
                Message {
                    content: error.message(),
                    addendum: None,
                },
            ),
            InterpreterError::FileDoesNotExist(path) => diagnostic.item(
                None,
                Message {
                    content: format!("file {} does not exist", path.to_string_lossy()),
                    addendum: None,
                },
            ),
            InterpreterError::IoError(err) => diagnostic.item(
                None,
                Message {
                    content: err.to_string(),
                    addendum: None,
                },
            ),
        }
    }
}

/// Evaluate every top-level form of a file in order, in one interpreter.
///
/// Evaluation stops at the first error.
pub fn run_interpreter(config: Config) -> Result<(), InterpreterError> {
    let path = PathBuf::from(config.filename.as_str());
    if !path.exists() {
        return Err(InterpreterError::FileDoesNotExist(path));
    }
    let input = fs::read_to_string(&path)?;
    let source = Source::File { path };

    let mut interpreter = Interpreter::new();
    procdraw_builtins::install(&mut interpreter);

    let mut stdout = config.stdout.unwrap_or_else(|| Box::new(io::stdout()));
    let mut parser = Parser::new(source.clone(), Lexer::new(&input));
    loop {
        let pos = parser.position();
        let form = match parser.read(interpreter.heap_mut())? {
            Value::Eof => break,
            form => form,
        };
        let value = interpreter
            .eval(form)
            .map_err(|error| InterpreterError::EvalError {
                source: source.clone(),
                pos,
                error,
            })?;
        if config.print {
            let shown = match config.margin {
                Some(margin) => interpreter.pretty_print(value, margin, INDENT),
                None => interpreter.print(value),
            };
            writeln!(stdout, "{}", shown)?;
        }
    }
    stdout.flush()?;
    Ok(())
}
