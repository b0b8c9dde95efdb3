use crate::core::commands::Status;
use crate::error::ShellError;
use crate::input::CommandLine;

pub(crate) trait LineHandler {
    fn handle_line(&mut self, line: &str) -> Result<Status, ShellError>;
}

impl LineHandler for super::Shell {
    fn handle_line(&mut self, line: &str) -> Result<Status, ShellError> {
        // Blank input never reaches the tokenizer
        let Some(command) = CommandLine::parse(line) else {
            return Ok(Status::Continue);
        };

        match self.executor.execute(&command) {
            Ok(status) => Ok(status),
            Err(e) if e.is_fatal() => Err(e.into()),
            Err(e) => {
                eprintln!("{}", self.error_palette.error(&format!("brisk: {}", e)));
                Ok(Status::Continue)
            }
        }
    }
}
