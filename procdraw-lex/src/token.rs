use std::rc::Rc;

#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub enum Name {
    Unexpected,
    LParen,
    RParen,
    Dot,
    Quote,
    Dollar,
    Int,
    Symbol,
    String,
    Eof,
}

impl Name {
    pub fn render(&self) -> String {
        match self {
            Name::Unexpected => String::from("unexpected"),
            Name::LParen => String::from("'('"),
            Name::RParen => String::from("')'"),
            Name::Dot => String::from("'.'"),
            Name::Quote => String::from("quote"),
            Name::Dollar => String::from("'$'"),
            Name::Int => String::from("number"),
            Name::Symbol => String::from("symbol"),
            Name::String => String::from("string"),
            Name::Eof => String::from("end of input"),
        }
    }

    /// The tokens that can begin a form.
    pub fn form_start() -> [Name; 6] {
        [
            Name::LParen,
            Name::Quote,
            Name::Dollar,
            Name::Int,
            Name::Symbol,
            Name::String,
        ]
    }

    pub fn is_form_start(&self) -> bool {
        Name::form_start().contains(self)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub enum Sign {
    None,
    Positive,
    Negative,
}

#[derive(Debug, PartialEq, Eq, Clone, Hash, PartialOrd, Ord)]
pub enum Data {
    Unexpected(char),

    LParen,
    RParen,
    Dot,
    Quote,
    Dollar,

    /// An integer literal. `digits` keeps the literal's text so that values too
    /// large for a machine integer keep their magnitude.
    Int {
        sign: Sign,
        digits: Rc<str>,
        length: usize,
    },
    Symbol(Rc<str>),
    String {
        value: String,
        length: usize,
    },
    /// A string literal that reached the end of input before its closing quote.
    UnterminatedString {
        length: usize,
    },

    Eof,
}

impl Data {
    pub fn render(&self) -> String {
        match self {
            Data::Unexpected(c) => format!("{:?}", c),
            Data::LParen => String::from("'('"),
            Data::RParen => String::from("')'"),
            Data::Dot => String::from("'.'"),
            Data::Quote => String::from("quote"),
            Data::Dollar => String::from("'$'"),
            Data::Int { sign, digits, .. } => match sign {
                Sign::Negative => format!("\"-{}\"", digits),
                Sign::Positive => format!("\"+{}\"", digits),
                Sign::None => format!("\"{}\"", digits),
            },
            Data::Symbol(name) => format!("\"{}\"", name),
            Data::String { value, .. } => format!("{:?}", value),
            Data::UnterminatedString { .. } => String::from("unterminated string"),
            Data::Eof => String::from("end of input"),
        }
    }

    /// Length of the token's text in bytes.
    pub fn length(&self) -> usize {
        match self {
            Data::Unexpected(c) => c.len_utf8(),
            Data::LParen | Data::RParen | Data::Dot | Data::Quote | Data::Dollar => 1,
            Data::Int { length, .. } => *length,
            Data::Symbol(name) => name.len(),
            Data::String { length, .. } => *length,
            Data::UnterminatedString { length } => *length,
            Data::Eof => 0,
        }
    }

    pub fn name(&self) -> Name {
        match self {
            Data::Unexpected(_) => Name::Unexpected,
            Data::LParen => Name::LParen,
            Data::RParen => Name::RParen,
            Data::Dot => Name::Dot,
            Data::Quote => Name::Quote,
            Data::Dollar => Name::Dollar,
            Data::Int { .. } => Name::Int,
            Data::Symbol(_) => Name::Symbol,
            Data::String { .. } | Data::UnterminatedString { .. } => Name::String,
            Data::Eof => Name::Eof,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Token {
    pub data: Data,
    /// Byte offset of the token's first character.
    pub pos: usize,
}
