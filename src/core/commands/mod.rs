use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;

use log::debug;

mod cd;
mod exit;

pub use cd::CdCommand;
pub use exit::ExitCommand;

use crate::input::CommandLine;
use crate::path::{AccountDatabase, AccountError, SystemAccounts};
use crate::process::{InterruptFlag, ProcessError, ProcessExecutor};

/// What the main loop should do after a command ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Continue,
    Exit,
}

#[derive(Debug)]
pub enum CommandError {
    InvalidArguments(String),
    HomeDir(AccountError),
    ChangeDir { path: PathBuf, source: io::Error },
    ProcessError(ProcessError),
}

impl CommandError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, CommandError::ProcessError(e) if e.is_fatal())
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::InvalidArguments(msg) => write!(f, "{}", msg),
            CommandError::HomeDir(err) => write!(f, "cd: {}", err),
            CommandError::ChangeDir { path, source } => {
                write!(f, "cd: cannot change directory to {}: {}", path.display(), source)
            }
            CommandError::ProcessError(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<ProcessError> for CommandError {
    fn from(err: ProcessError) -> Self {
        CommandError::ProcessError(err)
    }
}

impl From<AccountError> for CommandError {
    fn from(err: AccountError) -> Self {
        CommandError::HomeDir(err)
    }
}

pub trait Command {
    /// `args` excludes the command name.
    fn execute(&self, args: &[String]) -> Result<Status, CommandError>;
}

enum CommandType {
    Cd(CdCommand),
    Exit(ExitCommand),
}

impl Command for CommandType {
    fn execute(&self, args: &[String]) -> Result<Status, CommandError> {
        match self {
            CommandType::Cd(cmd) => cmd.execute(args),
            CommandType::Exit(cmd) => cmd.execute(args),
        }
    }
}

/// Routes a command line to a built-in or to a child process.
pub struct CommandExecutor {
    commands: BTreeMap<&'static str, CommandType>,
    process_executor: ProcessExecutor,
}

impl CommandExecutor {
    pub fn new(interrupt: InterruptFlag) -> Self {
        Self::with_accounts(interrupt, Box::new(SystemAccounts))
    }

    pub fn with_accounts(interrupt: InterruptFlag, accounts: Box<dyn AccountDatabase>) -> Self {
        let mut commands = BTreeMap::new();
        commands.insert("cd", CommandType::Cd(CdCommand::new(accounts)));
        commands.insert("exit", CommandType::Exit(ExitCommand::new()));

        Self {
            commands,
            process_executor: ProcessExecutor::new(interrupt),
        }
    }

    pub fn execute(&mut self, command: &CommandLine) -> Result<Status, CommandError> {
        if let Some(cmd) = self.commands.get(command.name()) {
            return cmd.execute(command.args());
        }

        let outcome = self.process_executor.spawn_process(command.argv())?;
        if !outcome.success() {
            debug!("{}: {:?}", command.name(), outcome);
        }
        Ok(Status::Continue)
    }

    pub fn is_builtin(&self, command: &str) -> bool {
        self.commands.contains_key(command)
    }
}

/// Serialises tests that move the process working directory.
#[cfg(test)]
pub(crate) fn cwd_lock() -> std::sync::MutexGuard<'static, ()> {
    static LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
    LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
