use minipas::frontend::token::{Token, TokenKind};
use minipas::semantic::symboltable::{unused_entries, ScopeEntry, SymbolKind, SymbolTable};
use minipas::semantic::types::DataType;
use minipas::{FrontendError, FrontendResult};
use test_log::test;

fn ident(name: &str, line: usize) -> Token {
    Token::new(TokenKind::Ident, name, line, 1, 0)
}

fn variable(name: &str, line: usize, data_type: DataType) -> ScopeEntry {
    ScopeEntry::variable(ident(name, line), data_type)
}

#[test]
fn test_define_and_lookup() {
    let mut table = SymbolTable::new();
    assert!(table.define("x", variable("x", 1, DataType::Integer)));

    let entry = table.lookup("x").unwrap();
    assert_eq!(entry.kind, SymbolKind::Variable(DataType::Integer));
    assert!(!entry.was_initialized);
    assert!(!entry.was_used);
    assert!(table.lookup("y").is_none());
}

#[test]
fn test_redeclaration_in_same_scope_is_refused() {
    let mut table = SymbolTable::new();
    assert!(table.define("x", variable("x", 1, DataType::Integer)));
    assert!(!table.define("x", variable("x", 2, DataType::Real)));
    // The first declaration wins
    assert_eq!(table.lookup("x").unwrap().token.line, 1);
}

#[test]
fn test_shadowing_outer_scope() -> FrontendResult<()> {
    let mut table = SymbolTable::new();
    table.define("x", variable("x", 1, DataType::Integer));
    table.push_scope();
    assert!(table.define("x", variable("x", 5, DataType::Real)));
    assert_eq!(table.lookup("x").unwrap().data_type(), Some(DataType::Real));

    table.pop_scope()?;
    assert_eq!(table.lookup("x").unwrap().data_type(), Some(DataType::Integer));
    Ok(())
}

#[test]
fn test_lookup_in_current() -> FrontendResult<()> {
    let mut table = SymbolTable::new();
    table.define("g", variable("g", 1, DataType::Integer));
    // With no procedure scope the global scope is current
    assert!(table.lookup_in_current("g").is_some());

    table.push_scope();
    table.define("l", variable("l", 2, DataType::Boolean));
    assert!(table.lookup_in_current("g").is_none());
    assert!(table.lookup_in_current("l").is_some());
    assert!(table.lookup("g").is_some());
    table.pop_scope()?;
    Ok(())
}

#[test]
fn test_define_in_owning_scope_does_not_shadow() -> FrontendResult<()> {
    let mut table = SymbolTable::new();
    table.define("g", variable("g", 1, DataType::Integer));
    table.push_scope();
    table.push_scope();

    let mut updated = table.lookup("g").cloned().unwrap();
    updated.was_used = true;
    assert!(table.define_in_owning_scope("g", updated));
    assert!(table.lookup_in_current("g").is_none());

    table.pop_scope()?;
    table.pop_scope()?;
    assert!(table.global()["g"].was_used);
    Ok(())
}

#[test]
fn test_define_in_owning_scope_never_creates() {
    let mut table = SymbolTable::new();
    assert!(!table.define_in_owning_scope("ghost", variable("ghost", 1, DataType::Real)));
    assert!(table.lookup("ghost").is_none());
}

#[test]
fn test_marks_reach_the_owning_scope() -> FrontendResult<()> {
    let mut table = SymbolTable::new();
    table.define("x", variable("x", 1, DataType::Integer));
    table.push_scope();
    table.define("y", variable("y", 2, DataType::Integer));
    table.push_scope();

    table.mark_initialized("x");
    table.mark_used("y");
    table.mark_used("missing");

    table.pop_scope()?;
    let inner = table.pop_scope()?;
    assert!(inner["y"].was_used);
    assert!(!inner["y"].was_initialized);
    assert!(table.global()["x"].was_initialized);
    assert!(!table.global()["x"].was_used);
    Ok(())
}

#[test]
fn test_pop_scope_returns_the_popped_scope() -> FrontendResult<()> {
    let mut table = SymbolTable::new();
    table.push_scope();
    table.define("a", variable("a", 1, DataType::Integer));
    table.define("b", variable("b", 2, DataType::Real));
    assert_eq!(table.depth(), 1);

    let scope = table.pop_scope()?;
    assert_eq!(table.depth(), 0);
    let names: Vec<_> = scope.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["a", "b"]);
    assert!(table.lookup("a").is_none());
    Ok(())
}

#[test]
fn test_global_scope_cannot_be_popped() {
    let mut table = SymbolTable::new();
    match table.pop_scope() {
        Err(FrontendError::Internal(_)) => {}
        other => panic!("expected an internal error, got {:?}", other),
    }
}

#[test]
fn test_unused_entries_in_declaration_order() {
    let mut table = SymbolTable::new();
    table.define("P", ScopeEntry::program(ident("P", 1)));
    table.define("z", variable("z", 2, DataType::Integer));
    table.define("a", variable("a", 3, DataType::Integer));
    table.define("p", ScopeEntry::procedure(ident("p", 4), vec![DataType::Real]));
    table.mark_used("a");

    let unused: Vec<_> = unused_entries(table.global()).map(|(name, _)| name.as_str()).collect();
    assert_eq!(unused, vec!["z", "p"]);
}

#[test]
fn test_entry_constructors() {
    let program = ScopeEntry::program(ident("P", 1));
    assert!(program.was_used && program.was_initialized);
    assert_eq!(program.data_type(), None);

    let procedure = ScopeEntry::procedure(ident("p", 1), vec![DataType::Integer, DataType::Real]);
    assert!(procedure.is_procedure());
    assert_eq!(procedure.arity(), 2);
    assert!(procedure.was_initialized);
    assert!(!procedure.was_used);

    assert_eq!(variable("x", 1, DataType::Boolean).arity(), 0);
}
