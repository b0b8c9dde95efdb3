use super::{Command, CommandError, Status};
use crate::path::AccountDatabase;
use std::env;
use std::path::PathBuf;

pub struct CdCommand {
    accounts: Box<dyn AccountDatabase>,
}

impl CdCommand {
    pub fn new(accounts: Box<dyn AccountDatabase>) -> Self {
        Self { accounts }
    }

    /// No argument and `~` both mean the caller's passwd home directory.
    fn target(&self, args: &[String]) -> Result<PathBuf, CommandError> {
        match args {
            [] => Ok(self.accounts.current_home()?),
            [path] if path == "~" => Ok(self.accounts.current_home()?),
            [path] => Ok(PathBuf::from(path)),
            _ => Err(CommandError::InvalidArguments(
                "cd: too many arguments".to_string(),
            )),
        }
    }
}

impl Command for CdCommand {
    fn execute(&self, args: &[String]) -> Result<Status, CommandError> {
        let path = self.target(args)?;

        env::set_current_dir(&path)
            .map_err(|source| CommandError::ChangeDir { path, source })?;
        Ok(Status::Continue)
    }
}
