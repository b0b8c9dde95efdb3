use std::fmt;
use std::io::{self, BufRead, StdinLock, Write};

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

#[derive(Debug)]
pub enum ReadError {
    Interrupted,
    Eof,
    Io(io::Error),
    Editor(ReadlineError),
}

impl ReadError {
    /// True when the read was cut short by a signal rather than failing.
    pub fn is_interrupt(&self) -> bool {
        match self {
            ReadError::Interrupted => true,
            ReadError::Io(e) => e.kind() == io::ErrorKind::Interrupted,
            ReadError::Editor(ReadlineError::Io(e)) => e.kind() == io::ErrorKind::Interrupted,
            _ => false,
        }
    }
}

impl From<io::Error> for ReadError {
    fn from(err: io::Error) -> Self {
        ReadError::Io(err)
    }
}

impl From<ReadlineError> for ReadError {
    fn from(err: ReadlineError) -> Self {
        match err {
            ReadlineError::Interrupted => ReadError::Interrupted,
            ReadlineError::Eof => ReadError::Eof,
            e => ReadError::Editor(e),
        }
    }
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadError::Interrupted => write!(f, "interrupted"),
            ReadError::Eof => write!(f, "end of input"),
            ReadError::Io(e) => write!(f, "{}", e),
            ReadError::Editor(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ReadError {}

pub trait LineReader {
    /// Shows `prompt` and blocks for one line of input.
    fn read_line(&mut self, prompt: &str) -> Result<String, ReadError>;

    /// Drops any partial input left over from an interrupted read.
    fn reset(&mut self) {}
}

/// Reads standard input directly, one `read(2)` at a time, so an
/// `EINTR` reaches the caller instead of being retried.
pub struct StdinReader<R = StdinLock<'static>> {
    input: R,
    pending: Vec<u8>,
}

impl StdinReader {
    pub fn new() -> Self {
        Self::from_reader(io::stdin().lock())
    }
}

impl Default for StdinReader {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: BufRead> StdinReader<R> {
    pub fn from_reader(input: R) -> Self {
        Self {
            input,
            pending: Vec::new(),
        }
    }
}

impl<R: BufRead> LineReader for StdinReader<R> {
    fn read_line(&mut self, prompt: &str) -> Result<String, ReadError> {
        if !prompt.is_empty() {
            let mut stdout = io::stdout().lock();
            stdout.write_all(prompt.as_bytes())?;
            stdout.flush()?;
        }

        loop {
            // fill_buf issues a single read and hands EINTR back unretried
            let available = self.input.fill_buf()?;
            if available.is_empty() {
                if self.pending.is_empty() {
                    return Err(ReadError::Eof);
                }
                break;
            }

            match available.iter().position(|&b| b == b'\n') {
                Some(end) => {
                    self.pending.extend_from_slice(&available[..=end]);
                    self.input.consume(end + 1);
                    break;
                }
                None => {
                    let len = available.len();
                    self.pending.extend_from_slice(available);
                    self.input.consume(len);
                }
            }
        }

        let line = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        Ok(line)
    }

    fn reset(&mut self) {
        self.pending.clear();
    }
}

/// Terminal input through `rustyline`. Ctrl-C arrives as a keystroke in
/// raw mode and is reported as [`ReadError::Interrupted`].
pub struct EditorReader {
    editor: DefaultEditor,
}

impl EditorReader {
    pub fn new() -> Result<Self, ReadlineError> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl LineReader for EditorReader {
    fn read_line(&mut self, prompt: &str) -> Result<String, ReadError> {
        Ok(self.editor.readline(prompt)?)
    }
}
