pub mod lexer;
pub mod parser;
pub mod sink;
pub mod token;

pub use lexer::{scan, Lexer};
pub use parser::{ParseOutcome, Parser};
pub use sink::{FormatterSink, TokenRecorder};
pub use token::{Token, TokenKind};
