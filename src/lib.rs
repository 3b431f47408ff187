use std::{fs::File, io::Read, path::Path};

use log::warn;

pub mod ast;
pub mod frontend;
pub mod semantic;
pub mod utils;

pub use ast::Program;
pub use frontend::{FormatterSink, ParseOutcome, TokenRecorder};
pub use semantic::analyze;
pub use utils::{Diagnostic, Diagnostics, FrontendError, FrontendResult, Logger, Phase, Severity};

use crate::frontend::Parser;
use crate::utils::config::cli::SOURCE_EXTENSION;

/// Reads a source file. Files without the usual extension are read anyway.
pub fn read(path: &Path) -> FrontendResult<String> {
    if path.extension().map_or(true, |ext| ext != SOURCE_EXTENSION) {
        warn!("{} does not have a .{} extension", path.display(), SOURCE_EXTENSION);
    }
    if path.is_dir() {
        return Err(FrontendError::FileRead(format!("{} is a directory", path.display())));
    }
    let mut file = File::open(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Scans and parses `source`. Scanner and parser diagnostics go to `logger`;
/// consumed tokens and comments go to `formatter` when one is given.
pub fn parse<'a>(
    source: &str,
    logger: &'a mut dyn Logger,
    formatter: Option<&'a mut dyn FormatterSink>,
) -> ParseOutcome {
    Parser::new(source, logger, formatter).parse()
}

pub fn parse_file<'a>(
    path: &Path,
    logger: &'a mut dyn Logger,
    formatter: Option<&'a mut dyn FormatterSink>,
) -> FrontendResult<ParseOutcome> {
    let source = read(path)?;
    Ok(parse(&source, logger, formatter))
}
