/// Splits a raw line on runs of whitespace.
///
/// A trailing newline is dropped along with every other delimiter. No
/// quoting, escaping or substitution happens: `"a b"` is two tokens.
pub fn tokenize(line: &str) -> Vec<String> {
    line.split_whitespace().map(String::from).collect()
}

/// A tokenized command line. Always holds at least the command name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    tokens: Vec<String>,
}

impl CommandLine {
    /// Returns `None` for empty or all-whitespace input, without tokenizing it.
    pub fn parse(line: &str) -> Option<Self> {
        if line.trim().is_empty() {
            return None;
        }

        let tokens = tokenize(line);
        if tokens.is_empty() {
            return None;
        }

        Some(Self { tokens })
    }

    pub fn name(&self) -> &str {
        &self.tokens[0]
    }

    /// Arguments after the command name.
    pub fn args(&self) -> &[String] {
        &self.tokens[1..]
    }

    /// The full vector, command name first.
    pub fn argv(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}
