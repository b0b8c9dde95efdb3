mod reader;
mod tokenizer;

pub use reader::{EditorReader, LineReader, ReadError, StdinReader};
pub use tokenizer::{tokenize, CommandLine};
