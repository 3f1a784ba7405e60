#![deny(unused_crate_dependencies)]


use std::{
    borrow::Cow,
    collections::HashMap,
    fmt::Write as FmtWrite,
    fs,
    io::{self, Write as IoWrite},
    path::PathBuf,
};

#[derive(PartialEq, Eq, Debug, Hash, Clone)]
pub enum Source {
    File { path: PathBuf },
    Interactive { label: String },
}

impl Source {
    pub fn to_str(&self) -> Cow<str> {
        match self {
            Source::File { path } => path.to_string_lossy(),
            Source::Interactive { label } => Cow::Borrowed(label),
        }
    }
}

#[derive(PartialEq, Eq, Debug, Hash, Clone)]
pub struct Location {
    pub source: Source,
    pub offset: Option<usize>,
}

#[derive(PartialEq, Eq, Debug, Hash, Clone)]
pub struct Message {
    pub content: String,
    pub addendum: Option<String>,
}

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// Find the 1-based line and column of a byte offset, along with the text of
    /// that line (without its newline).
    ///
    /// Offsets past the end of `text` are clamped to the end.
    pub fn locate(text: &str, offset: usize) -> (Position, &str) {
        let mut offset = offset.min(text.len());
        while !text.is_char_boundary(offset) {
            offset -= 1;
        }

        let line_start = text[..offset].rfind('\n').map_or(0, |ix| ix + 1);
        let line_end = text[offset..]
            .find('\n')
            .map_or(text.len(), |ix| offset + ix);

        let line = text[..line_start].matches('\n').count() + 1;
        let column = text[line_start..offset].chars().count() + 1;

        (
            Position { line, column },
            text[line_start..line_end].trim_end_matches('\r'),
        )
    }
}

#[derive(Default)]
pub struct Diagnostic {
    items: Vec<Message>,
    located_items: Vec<(Location, Message)>,
}

impl Diagnostic {
    pub fn new() -> Self {
        Diagnostic {
            items: Vec::new(),
            located_items: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.located_items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len() + self.located_items.len()
    }

    /// Record a message. Located messages are kept sorted by offset so that they're
    /// reported in source order; messages at the same offset keep insertion order.
    pub fn item(&mut self, location: Option<Location>, message: Message) {
        match location {
            None => self.items.push(message),
            Some(location) => {
                let ix = self
                    .located_items
                    .partition_point(|(other, _)| other.offset <= location.offset);
                self.located_items.insert(ix, (location, message))
            }
        }
    }

    pub fn report_error_heading(path: &str, position: Option<Position>, message: &str) -> String {
        let mut str = String::from(path);
        str.push(':');
        if let Some(position) = position {
            let _ = write!(str, "{}:{}:", position.line, position.column);
        }
        str.push_str(" error: ");
        str.push_str(message);
        str
    }

    pub fn report_located_message(
        line: usize,
        column: usize,
        path: &str,
        line_str: &str,
        message: &Message,
    ) -> String {
        let heading =
            Self::report_error_heading(path, Some(Position { line, column }), &message.content);
        let padding = " ".repeat(line.to_string().len());
        let caret = format!("{}^", " ".repeat(column - 1));

        let mut result = [
            heading,
            format!("{} |", padding),
            format!("{} | {}", line, line_str),
            format!("{} | {}", padding, caret),
        ]
        .join("\n");

        if let Some(addendum) = &message.addendum {
            result.push('\n');
            result.push_str(addendum);
        }
        result
    }

    /// Render every message, unlocated ones first.
    ///
    /// File sources are read from disk once each, to show the offending line.
    pub fn render_all(self) -> io::Result<Vec<String>> {
        let mut rendered = Vec::with_capacity(self.len());

        for message in self.items {
            rendered.push(format!("error: {}", message.content));
        }

        let mut files: HashMap<PathBuf, String> = HashMap::new();
        for (location, message) in self.located_items {
            let report = match (&location.source, location.offset) {
                (Source::Interactive { label }, offset) => Self::report_error_heading(
                    label,
                    offset.map(|offset| Position {
                        line: 1,
                        column: offset + 1,
                    }),
                    &message.content,
                ),
                (Source::File { .. }, None) => {
                    Self::report_error_heading(&location.source.to_str(), None, &message.content)
                }
                (Source::File { path }, Some(offset)) => {
                    if !files.contains_key(path) {
                        let contents = fs::read_to_string(path)?;
                        files.insert(path.clone(), contents);
                    }
                    let contents = files.get(path).map(String::as_str).unwrap_or_default();
                    let (position, line_str) = Position::locate(contents, offset);
                    Self::report_located_message(
                        position.line,
                        position.column,
                        &location.source.to_str(),
                        line_str,
                        &message,
                    )
                }
            };
            rendered.push(report);
        }

        Ok(rendered)
    }

    pub fn report_all_to(self, out: &mut dyn IoWrite) -> io::Result<()> {
        for report in self.render_all()? {
            out.write_all(report.as_bytes())?;
            out.write_all(b"\n")?;
        }
        out.flush()
    }

    pub fn report_all(self) -> io::Result<()> {
        self.report_all_to(&mut io::stderr())
    }
}
