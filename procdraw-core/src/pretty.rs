//! A line-breaking printer for lists.
//!
//! This is the "inefficient but simple" algorithm from Derek Oppen's
//! *Prettyprinting* (TOPLAS 2(4), 1980). A list is a block: it opens with
//! `Begin`, closes with `End`, and separates its elements with `Blank`s. Tokens are
//! buffered until the outermost block closes, by which point every blank knows
//! how much text follows it before the next blank, and the printer breaks the
//! line at a blank whenever that text won't fit.
//!
//! Continuation lines are indented relative to the column of the block's
//! opening parenthesis.

use crate::{
    printer::{print_atom, sugar_prefix},
    Heap, Value,
};

enum Piece {
    Begin,
    End,
    Blank,
    Text(String),
}

struct Entry {
    piece: Piece,
    size: isize,
}

struct PrettyPrinter {
    margin: isize,
    indent: isize,

    stream: Vec<Entry>,
    stream_len: isize,
    delimiters: Vec<usize>,

    space: isize,
    indents: Vec<isize>,
    out: String,
}

/// Print `value` so that lines fit within `margin` columns where possible.
///
/// Atoms are never split, so a single atom longer than the margin still
/// overflows it.
pub fn pretty_print(heap: &Heap, value: Value, margin: usize, indent: usize) -> String {
    let mut printer = PrettyPrinter {
        margin: margin as isize,
        indent: indent as isize,
        stream: Vec::new(),
        stream_len: 0,
        delimiters: Vec::new(),
        space: margin as isize,
        indents: Vec::new(),
        out: String::new(),
    };
    printer.scan(heap, value);
    printer.out
}

impl PrettyPrinter {
    fn scan(&mut self, heap: &Heap, value: Value) {
        match value {
            Value::Cons(_) => {
                if let Some(prefix) = sugar_prefix(heap, value) {
                    self.emit(Piece::Text(String::from(prefix)));
                    self.scan(heap, heap.cadr(value));
                    return;
                }

                self.emit(Piece::Begin);
                self.emit(Piece::Text(String::from("(")));
                let mut node = value;
                loop {
                    self.scan(heap, heap.car(node));
                    node = heap.cdr(node);
                    match node {
                        Value::Null => break,
                        Value::Cons(_) => self.emit(Piece::Blank),
                        tail => {
                            self.emit(Piece::Text(String::from(" . ")));
                            self.scan(heap, tail);
                            break;
                        }
                    }
                }
                self.emit(Piece::Text(String::from(")")));
                self.emit(Piece::End);
            }
            Value::Expr(_) => {
                let (params, body) = match heap.expr_parts(value) {
                    Ok(parts) => parts,
                    Err(_) => return,
                };
                self.emit(Piece::Begin);
                self.emit(Piece::Text(String::from("(lambda")));
                self.emit(Piece::Blank);
                self.scan(heap, params);
                self.emit(Piece::Blank);
                self.scan(heap, body);
                self.emit(Piece::Text(String::from(")")));
                self.emit(Piece::End);
            }
            _ => {
                if let Some(atom) = print_atom(heap, value) {
                    self.emit(Piece::Text(atom))
                }
            }
        }
    }

    /// Finish measuring a delimiter: its size becomes the length of the text
    /// emitted since it was pushed.
    fn settle(&mut self, ix: usize) {
        self.stream[ix].size += self.stream_len;
    }

    fn emit(&mut self, piece: Piece) {
        match piece {
            Piece::Begin => {
                if self.delimiters.is_empty() {
                    self.stream.clear();
                    self.stream_len = 0;
                }
                self.stream.push(Entry {
                    piece,
                    size: -self.stream_len,
                });
                self.delimiters.push(self.stream.len() - 1);
            }
            Piece::End => {
                self.stream.push(Entry { piece, size: 0 });
                if let Some(ix) = self.delimiters.pop() {
                    self.settle(ix);
                    let closes_blank = matches!(self.stream[ix].piece, Piece::Blank);
                    if closes_blank {
                        if let Some(ix) = self.delimiters.pop() {
                            self.settle(ix);
                        }
                    }
                }
                if self.delimiters.is_empty() {
                    let stream = std::mem::take(&mut self.stream);
                    for entry in &stream {
                        self.print(&entry.piece, entry.size);
                    }
                }
            }
            Piece::Blank => {
                let top = self.delimiters.last().copied();
                if let Some(ix) = top {
                    if matches!(self.stream[ix].piece, Piece::Blank) {
                        self.delimiters.pop();
                        self.settle(ix);
                    }
                }
                self.stream.push(Entry {
                    piece,
                    size: -self.stream_len,
                });
                self.delimiters.push(self.stream.len() - 1);
                self.stream_len += 1;
            }
            Piece::Text(text) => {
                let len = text.chars().count() as isize;
                if self.delimiters.is_empty() {
                    self.print(&Piece::Text(text), len);
                } else {
                    self.stream.push(Entry {
                        piece: Piece::Text(text),
                        size: len,
                    });
                    self.stream_len += len;
                }
            }
        }
    }

    fn print(&mut self, piece: &Piece, len: isize) {
        match piece {
            Piece::Text(text) => {
                self.out.push_str(text);
                self.space -= len;
            }
            Piece::Begin => self.indents.push(self.space),
            Piece::End => {
                self.indents.pop();
            }
            Piece::Blank => {
                if len > self.space {
                    let block_space = self.indents.last().copied().unwrap_or(self.margin);
                    self.space = block_space - self.indent;
                    self.out.push('\n');
                    self.out
                        .push_str(&" ".repeat((self.margin - self.space).max(0) as usize));
                } else {
                    self.out.push(' ');
                    self.space -= 1;
                }
            }
        }
    }
}
