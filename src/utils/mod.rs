pub mod config;
pub mod diagnostics;
pub mod errors;

pub use diagnostics::{Diagnostic, Diagnostics, Logger, Phase, Severity};
pub use errors::*;
