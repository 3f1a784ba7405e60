#![deny(unused_crate_dependencies)]


pub mod token;

use std::{rc::Rc, str::Chars};
use token::{Sign, Token};

pub struct Lexer<'input> {
    pos: usize,
    current: Option<char>,
    input: Chars<'input>,
    is_eof: bool,
}

fn is_symbol_start(c: char) -> bool {
    c.is_ascii_alphabetic()
}

fn is_symbol_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-'
}

impl<'input> Lexer<'input> {
    pub fn new(input: &str) -> Lexer {
        let mut input = input.chars();
        Lexer {
            pos: 0,
            current: input.next(),
            input,
            is_eof: false,
        }
    }

    fn consume(&mut self) {
        if let Some(c) = self.current {
            self.pos += c.len_utf8();
        }
        self.current = self.input.next();
    }

    fn single(&mut self, data: token::Data, pos: usize) -> Option<Token> {
        self.consume();
        Some(Token { data, pos })
    }

    fn consume_int(&mut self, sign: Sign, pos: usize) -> Option<Token> {
        let mut digits = String::new();
        while let Some(c) = self.current.filter(char::is_ascii_digit) {
            self.consume();
            digits.push(c);
        }
        Some(Token {
            data: token::Data::Int {
                sign,
                digits: Rc::from(digits),
                length: self.pos - pos,
            },
            pos,
        })
    }

    fn consume_string(&mut self, pos: usize) -> Option<Token> {
        // opening quote
        self.consume();

        let mut value = String::new();
        loop {
            match self.current {
                None => {
                    return Some(Token {
                        data: token::Data::UnterminatedString {
                            length: self.pos - pos,
                        },
                        pos,
                    })
                }
                Some('"') => {
                    self.consume();
                    return Some(Token {
                        data: token::Data::String {
                            value,
                            length: self.pos - pos,
                        },
                        pos,
                    });
                }
                Some(c) => {
                    self.consume();
                    value.push(c);
                }
            }
        }
    }

    fn consume_symbol(&mut self, pos: usize) -> Option<Token> {
        let mut name = String::new();
        while let Some(c) = self.current {
            if is_symbol_continue(c) {
                self.consume();
                name.push(c);
            } else {
                break;
            }
        }
        Some(Token {
            data: token::Data::Symbol(Rc::from(name)),
            pos,
        })
    }

    /// `+` and `-` start a number when a digit follows, and are symbols otherwise.
    fn consume_sign(&mut self, c: char, pos: usize) -> Option<Token> {
        self.consume();
        match self.current {
            Some(d) if d.is_ascii_digit() => {
                let sign = if c == '-' {
                    Sign::Negative
                } else {
                    Sign::Positive
                };
                self.consume_int(sign, pos)
            }
            _ => Some(Token {
                data: token::Data::Symbol(Rc::from(c.to_string())),
                pos,
            }),
        }
    }
}

impl<'input> Iterator for Lexer<'input> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        while let Some(c) = self.current {
            if c.is_whitespace() {
                self.consume();
            } else {
                break;
            }
        }

        let pos = self.pos;
        match self.current {
            None => {
                if self.is_eof {
                    None
                } else {
                    self.is_eof = true;
                    Some(Token {
                        data: token::Data::Eof,
                        pos,
                    })
                }
            }
            Some(c) => match c {
                '(' => self.single(token::Data::LParen, pos),
                ')' => self.single(token::Data::RParen, pos),
                '.' => self.single(token::Data::Dot, pos),
                '\'' => self.single(token::Data::Quote, pos),
                '$' => self.single(token::Data::Dollar, pos),
                '"' => self.consume_string(pos),
                '+' | '-' => self.consume_sign(c, pos),
                '*' | '/' => self.single(token::Data::Symbol(Rc::from(c.to_string())), pos),
                '=' => {
                    self.consume();
                    match self.current {
                        Some('>') => self.single(token::Data::Symbol(Rc::from("=>")), pos),
                        _ => Some(Token {
                            data: token::Data::Unexpected('='),
                            pos,
                        }),
                    }
                }
                _ if c.is_ascii_digit() => self.consume_int(Sign::None, pos),
                _ if is_symbol_start(c) => self.consume_symbol(pos),
                _ => self.single(token::Data::Unexpected(c), pos),
            },
        }
    }
}

/// Paren balance of a piece of source text, as seen by an interactive front end
/// deciding whether to keep accumulating input.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Balance {
    Balanced,
    NotClosed,
    TooManyClosingParens,
}

/// Scan `input` for paren balance without reading any values.
///
/// An unterminated string literal counts as not closed. A closing paren that has no
/// matching opener is reported straight away, even if more openers follow.
pub fn check_balanced(input: &str) -> Balance {
    let mut depth: usize = 0;
    for token in Lexer::new(input) {
        match token.data {
            token::Data::LParen => depth += 1,
            token::Data::RParen => {
                if depth == 0 {
                    return Balance::TooManyClosingParens;
                }
                depth -= 1;
            }
            token::Data::UnterminatedString { .. } => return Balance::NotClosed,
            _ => {}
        }
    }
    if depth > 0 {
        Balance::NotClosed
    } else {
        Balance::Balanced
    }
}
