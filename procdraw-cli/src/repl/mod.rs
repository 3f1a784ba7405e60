pub mod history;

use procdraw_diagnostic::{Position, Source};
use procdraw_repl::{Balance, Repl};
use std::io::{self, Stdout, Write};
use termion::{
    cursor::DetectCursorPos,
    event::{Event, Key},
    input::TermRead,
    raw::{IntoRawMode, RawTerminal},
};

use crate::version::VERSION;

use self::history::History;

const PROMPT: &str = "> ";
const CONTINUATION_PROMPT: &str = ". ";
const HISTORY_SIZE: usize = 100;

/// The line being edited. `cursor` counts characters, not bytes.
struct InputState {
    terminal_size: (u16, u16),
    cursor_row: u16,
    cursor: usize,
    buffer: String,
}

impl InputState {
    fn new(cursor_current_row: u16) -> io::Result<Self> {
        let terminal_size = termion::terminal_size()?;
        Ok(InputState {
            terminal_size,
            cursor_row: cursor_current_row,
            cursor: 0,
            buffer: String::new(),
        })
    }

    fn set(&mut self, value: &str) {
        self.cursor = value.chars().count();
        self.buffer.clear();
        self.buffer.push_str(value);
    }

    fn reset(&mut self) {
        self.cursor = 0;
        self.buffer.clear();
    }

    fn len(&self) -> usize {
        self.buffer.chars().count()
    }

    fn byte_index(&self, cursor: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(cursor)
            .map_or(self.buffer.len(), |(ix, _)| ix)
    }

    fn left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    fn right(&mut self) {
        if self.cursor < self.len() {
            self.cursor += 1;
        }
    }

    fn home(&mut self) {
        self.cursor = 0;
    }

    fn end(&mut self) {
        self.cursor = self.len();
    }

    fn insert(&mut self, c: char) {
        let ix = self.byte_index(self.cursor);
        self.buffer.insert(ix, c);
        self.cursor += 1;
    }

    fn delete(&mut self) {
        if self.cursor < self.len() {
            let ix = self.byte_index(self.cursor);
            self.buffer.remove(ix);
        }
    }

    fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let ix = self.byte_index(self.cursor);
            self.buffer.remove(ix);
        }
    }

    fn newline(&mut self, stdout: &mut dyn Write) -> io::Result<()> {
        let at_bottom_row = self.cursor_row == self.terminal_size.1;
        writeln!(stdout)?;
        if !at_bottom_row {
            self.cursor_row += 1;
        }
        write!(stdout, "{}", termion::cursor::Goto(1, self.cursor_row))?;
        stdout.flush()
    }

    fn draw(&self, stdout: &mut dyn Write, prompt: &str) -> io::Result<()> {
        let column = prompt.chars().count() + self.cursor + 1;
        write!(
            stdout,
            "{}{}{}{}{}",
            termion::cursor::Goto(1, self.cursor_row),
            termion::clear::AfterCursor,
            prompt,
            self.buffer,
            termion::cursor::Goto(column.min(u16::MAX as usize) as u16, self.cursor_row)
        )?;
        stdout.flush()
    }
}

/*
Raw mode doesn't move the cursor back to the first column on '\n', and the
input row has to follow the output. `Newliner` routes every '\n' written
through `InputState::newline`.
*/
struct Newliner<'a> {
    input_state: &'a mut InputState,
    stdout: &'a mut RawTerminal<Stdout>,
}

impl<'a> Write for Newliner<'a> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut lines = buf.split(|b| *b == b'\n');
        let mut bytes_written = 0;
        if let Some(line) = lines.next() {
            bytes_written += self.stdout.write(line)?;
        }
        lines.try_for_each(|line| {
            self.input_state.newline(self.stdout)?;
            bytes_written += 1;
            bytes_written += self.stdout.write(line)?;
            Ok::<(), io::Error>(())
        })?;
        Ok(bytes_written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }
}

/// Point at `position` in the input that was just entered.
///
/// Each line of `input` was echoed after a prompt of `prompt_width` columns.
/// When the error isn't on the last line, that line is shown again so the
/// caret has something to sit under.
pub(crate) fn render_error(
    stdout: &mut dyn Write,
    prompt_width: usize,
    input: &str,
    position: Option<usize>,
    message: String,
) -> io::Result<()> {
    if let Some(offset) = position {
        let (position, line) = Position::locate(input, offset);
        let last_line = input.trim_end_matches('\n').matches('\n').count() + 1;
        if position.line < last_line {
            writeln!(stdout, "{}{}", " ".repeat(prompt_width), line)?;
        }
        writeln!(
            stdout,
            "{}^",
            " ".repeat(prompt_width + position.column - 1)
        )?;
    }
    write!(stdout, "error: {}", message)
}

pub fn run(margin: Option<usize>) -> io::Result<()> {
    let source = Source::Interactive {
        label: String::from("repl"),
    };

    let mut stdout = io::stdout();
    let mut repl = Repl::new(source);
    repl.set_margin(margin);

    let mut history = History::new(HISTORY_SIZE);
    // Lines of an unfinished form, each followed by '\n'.
    let mut pending = String::new();

    writeln!(
        stdout,
        "procdraw {}\n\nType :quit<ENTER> to quit.\n",
        VERSION
    )?;

    let mut stdout = stdout.into_raw_mode()?;
    let (_, cursor_current_row) = stdout.cursor_pos()?;
    let mut input_state = InputState::new(cursor_current_row)?;

    let mut prompt = PROMPT;
    input_state.draw(&mut stdout, prompt)?;

    let stdin = io::stdin();
    for event in stdin.events() {
        if let Event::Key(key) = event? {
            match key {
                Key::Backspace => input_state.backspace(),
                Key::Delete => input_state.delete(),
                Key::Left => input_state.left(),
                Key::Right => input_state.right(),
                Key::Home | Key::Ctrl('a') => input_state.home(),
                Key::End | Key::Ctrl('e') => input_state.end(),
                Key::Up => {
                    if let Some(entry) = history.older() {
                        input_state.set(entry);
                    }
                }
                Key::Down => match history.newer() {
                    Some(entry) => input_state.set(entry),
                    None => input_state.reset(),
                },
                Key::Ctrl('c') => {
                    if !pending.is_empty() {
                        pending.clear();
                        prompt = PROMPT;
                        input_state.newline(&mut stdout)?;
                    }
                    input_state.reset();
                }
                Key::Ctrl('d') if input_state.buffer.is_empty() && pending.is_empty() => break,
                Key::Char('\n') => {
                    if pending.is_empty() && input_state.buffer.trim() == ":quit" {
                        break;
                    }

                    history.push(&input_state.buffer);
                    input_state.newline(&mut stdout)?;

                    pending.push_str(&input_state.buffer);
                    pending.push('\n');
                    input_state.reset();

                    if let Balance::NotClosed = repl.check_balanced(&pending) {
                        prompt = CONTINUATION_PROMPT;
                    } else {
                        let input = std::mem::take(&mut pending);
                        prompt = PROMPT;

                        let result = repl.eval_show(&input);
                        let mut stdout = Newliner {
                            input_state: &mut input_state,
                            stdout: &mut stdout,
                        };
                        match result {
                            Err(err) => {
                                render_error(
                                    &mut stdout,
                                    PROMPT.len(),
                                    &input,
                                    err.position(),
                                    err.message(),
                                )?;
                                writeln!(stdout)?;
                            }
                            Ok(Some(value)) => {
                                stdout.write_all(value.as_bytes())?;
                                writeln!(stdout)?;
                            }
                            Ok(None) => {}
                        }
                    }
                }
                Key::Char(c) => input_state.insert(c),
                _ => {}
            }
        }

        input_state.draw(&mut stdout, prompt)?;
    }

    write!(stdout, "\r\n")?;
    Ok(())
}
