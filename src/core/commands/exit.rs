use super::{Command, CommandError, Status};

/// Ends the shell. Arguments are ignored; the exit status is always 0.
#[derive(Clone, Copy)]
pub struct ExitCommand;

impl Default for ExitCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl ExitCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for ExitCommand {
    fn execute(&self, _args: &[String]) -> Result<Status, CommandError> {
        Ok(Status::Exit)
    }
}
