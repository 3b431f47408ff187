pub mod analyzer;
pub mod symboltable;
pub mod types;

pub use analyzer::analyze;
pub use symboltable::{Scope, ScopeEntry, SymbolKind, SymbolTable};
pub use types::{DataType, Operand};
