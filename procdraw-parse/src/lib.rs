#![deny(unused_crate_dependencies)]


use procdraw_core::{Heap, Value};
use procdraw_diagnostic::{Diagnostic, Location, Message, Source};
use procdraw_lex::{
    token::{self, Token},
    Lexer,
};
use std::collections::BTreeSet;

#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    Unexpected {
        source: Source,
        pos: usize,
        expecting: BTreeSet<token::Name>,
    },
    UnterminatedString {
        source: Source,
        pos: usize,
    },
}

impl ParseError {
    pub fn source(&self) -> Source {
        match self {
            ParseError::Unexpected { source, .. } | ParseError::UnterminatedString { source, .. } => {
                source.clone()
            }
        }
    }

    pub fn position(&self) -> usize {
        match self {
            ParseError::Unexpected { pos, .. } | ParseError::UnterminatedString { pos, .. } => *pos,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ParseError::Unexpected { expecting, .. } => {
                let mut str = String::from("expected one of: ");
                let mut iter = expecting.iter();
                match iter.next() {
                    None => str,
                    Some(token) => {
                        str.push_str(token.render().as_str());
                        for token in iter {
                            str.push_str(", ");
                            str.push_str(token.render().as_str());
                        }
                        str
                    }
                }
            }
            ParseError::UnterminatedString { .. } => String::from("unterminated string"),
        }
    }

    pub fn report(&self, diagnostic: &mut Diagnostic) {
        diagnostic.item(
            Some(Location {
                source: self.source(),
                offset: Some(self.position()),
            }),
            Message {
                content: self.message(),
                addendum: None,
            },
        )
    }
}

/// Reads forms one at a time from a token stream.
pub struct Parser<'input> {
    source: Source,
    current: Option<Token>,
    input: Lexer<'input>,
}

impl<'input> Parser<'input> {
    pub fn new(source: Source, mut input: Lexer<'input>) -> Self {
        let current = input.next();
        Parser {
            source,
            current,
            input,
        }
    }

    fn advance(&mut self) {
        self.current = self.input.next();
    }

    fn current_name(&self) -> token::Name {
        match &self.current {
            Some(token) => token.data.name(),
            None => token::Name::Eof,
        }
    }

    /// Byte offset of the next unread token.
    pub fn position(&self) -> usize {
        match &self.current {
            Some(token) => token.pos,
            None => 0,
        }
    }

    fn unexpected<I>(&self, expecting: I) -> ParseError
    where
        I: IntoIterator<Item = token::Name>,
    {
        let pos = self.position();
        match &self.current {
            Some(Token {
                data: token::Data::UnterminatedString { .. },
                ..
            }) => ParseError::UnterminatedString {
                source: self.source.clone(),
                pos,
            },
            _ => ParseError::Unexpected {
                source: self.source.clone(),
                pos,
                expecting: expecting.into_iter().collect(),
            },
        }
    }

    /// Read the next form.
    ///
    /// Returns [`Value::Eof`] once the input is exhausted, and keeps returning it
    /// on later calls.
    pub fn read(&mut self, heap: &mut Heap) -> Result<Value, ParseError> {
        match self.current_name() {
            token::Name::Eof => Ok(Value::Eof),
            name if name.is_form_start() => self.form(heap),
            _ => Err(self.unexpected(
                token::Name::form_start()
                    .iter()
                    .copied()
                    .chain(std::iter::once(token::Name::Eof)),
            )),
        }
    }

    fn form(&mut self, heap: &mut Heap) -> Result<Value, ParseError> {
        let data = match &self.current {
            Some(token) => token.data.clone(),
            None => token::Data::Eof,
        };
        match data {
            token::Data::LParen => {
                self.advance();
                self.list(heap)
            }
            token::Data::Quote => {
                self.advance();
                self.prefixed(heap, "quote")
            }
            token::Data::Dollar => {
                self.advance();
                self.prefixed(heap, "sigval")
            }
            token::Data::Int { sign, digits, .. } => {
                self.advance();
                // A run of ASCII digits always parses; huge ones become infinity.
                let n = digits.parse::<f64>().unwrap_or(f64::INFINITY);
                Ok(Value::Number(match sign {
                    token::Sign::Negative => -n,
                    token::Sign::None | token::Sign::Positive => n,
                }))
            }
            token::Data::Symbol(name) => {
                self.advance();
                Ok(match &*name {
                    "nil" => Value::Null,
                    "true" => Value::Boolean(true),
                    "false" => Value::Boolean(false),
                    _ => heap.symbol_ref(&name),
                })
            }
            token::Data::String { value, .. } => {
                self.advance();
                Ok(heap.make_string(&value))
            }
            _ => Err(self.unexpected(token::Name::form_start().iter().copied())),
        }
    }

    /// `'x` and `$x` read as `(quote x)` and `(sigval x)`.
    fn prefixed(&mut self, heap: &mut Heap, head: &str) -> Result<Value, ParseError> {
        let form = self.form(heap)?;
        let head = heap.symbol_ref(head);
        Ok(heap.make_list(vec![head, form]))
    }

    /// The elements of a list whose opening parenthesis has been consumed.
    fn list(&mut self, heap: &mut Heap) -> Result<Value, ParseError> {
        let mut items = Vec::new();
        let tail = loop {
            match self.current_name() {
                token::Name::RParen => {
                    self.advance();
                    break Value::Null;
                }
                token::Name::Dot if !items.is_empty() => {
                    self.advance();
                    let tail = self.form(heap)?;
                    if self.current_name() != token::Name::RParen {
                        return Err(self.unexpected(vec![token::Name::RParen]));
                    }
                    self.advance();
                    break tail;
                }
                name if name.is_form_start() => items.push(self.form(heap)?),
                _ => {
                    let mut expecting: BTreeSet<token::Name> =
                        token::Name::form_start().iter().copied().collect();
                    expecting.insert(token::Name::RParen);
                    if !items.is_empty() {
                        expecting.insert(token::Name::Dot);
                    }
                    return Err(self.unexpected(expecting));
                }
            }
        };
        Ok(items
            .into_iter()
            .rev()
            .fold(tail, |rest, item| heap.cons(item, rest)))
    }
}

/// Read the first form in `input`.
pub fn read_str(heap: &mut Heap, source: Source, input: &str) -> Result<Value, ParseError> {
    let mut parser = Parser::new(source, Lexer::new(input));
    parser.read(heap)
}

/// Read every form in `input`, paired with the byte offset it starts at.
pub fn read_all(
    heap: &mut Heap,
    source: Source,
    input: &str,
) -> Result<Vec<(usize, Value)>, ParseError> {
    let mut parser = Parser::new(source, Lexer::new(input));
    let mut forms = Vec::new();
    loop {
        let pos = parser.position();
        match parser.read(heap)? {
            Value::Eof => return Ok(forms),
            form => forms.push((pos, form)),
        }
    }
}
