use std::env;
use std::io::{self, IsTerminal, Write};

use log::{debug, warn};

mod executor;

use crate::{
    core::commands::{CommandExecutor, Status},
    error::ShellError,
    flags::Flags,
    highlight::Palette,
    input::{EditorReader, LineReader, ReadError, StdinReader},
    process::{setup_signal_handlers, InterruptFlag},
};

use executor::LineHandler;

pub struct Shell {
    pub(crate) reader: Box<dyn LineReader>,
    pub(crate) executor: CommandExecutor,
    pub(crate) interrupt: InterruptFlag,
    pub(crate) prompt_palette: Palette,
    pub(crate) error_palette: Palette,
    pub(crate) flags: Flags,
}

fn palette_for(is_terminal: bool) -> Palette {
    if is_terminal {
        Palette::new()
    } else {
        Palette::plain()
    }
}

impl Shell {
    pub fn new(flags: Flags) -> Result<Self, ShellError> {
        let interrupt = InterruptFlag::new();
        setup_signal_handlers(&interrupt)?;

        let reader: Box<dyn LineReader> = if io::stdin().is_terminal() {
            Box::new(EditorReader::new()?)
        } else {
            Box::new(StdinReader::new())
        };
        let executor = CommandExecutor::new(interrupt.clone());

        Ok(Self::with_reader(flags, reader, executor, interrupt))
    }

    /// Assembles a shell without touching signal dispositions.
    pub fn with_reader(
        flags: Flags,
        reader: Box<dyn LineReader>,
        executor: CommandExecutor,
        interrupt: InterruptFlag,
    ) -> Self {
        Shell {
            reader,
            executor,
            interrupt,
            prompt_palette: palette_for(io::stdout().is_terminal()),
            error_palette: palette_for(io::stderr().is_terminal()),
            flags,
        }
    }

    /// Runs until `exit`. Any error returned here is fatal.
    pub fn run(&mut self) -> Result<(), ShellError> {
        loop {
            if self.step()? == Status::Exit {
                return Ok(());
            }
        }
    }

    /// One prompt, read and dispatch. The line and its tokens live only
    /// for the duration of this call.
    pub fn step(&mut self) -> Result<Status, ShellError> {
        let prompt = self.prompt();

        let line = match self.reader.read_line(&prompt) {
            Ok(line) => line,
            Err(err) => return self.recover_read(err),
        };

        self.handle_line(&line)
    }

    fn recover_read(&mut self, err: ReadError) -> Result<Status, ShellError> {
        let interrupted = self.interrupt.take();
        if !interrupted && !err.is_interrupt() {
            return Err(err.into());
        }

        debug!("line read interrupted, prompting again");
        self.reader.reset();

        let mut stdout = io::stdout().lock();
        writeln!(stdout)?;
        stdout.flush()?;
        Ok(Status::Continue)
    }

    fn prompt(&self) -> String {
        if self.flags.is_set("quiet") {
            return String::new();
        }

        match env::current_dir() {
            Ok(cwd) => self.prompt_palette.prompt(Some(&cwd)),
            Err(e) => {
                warn!("cannot determine current directory: {}", e);
                self.prompt_palette.prompt(None)
            }
        }
    }
}
