use indexmap::IndexMap;
use log::debug;

use crate::frontend::token::Token;
use crate::semantic::types::DataType;
use crate::utils::{FrontendError, FrontendResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable(DataType),
    Procedure,
    Program,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScopeEntry {
    /// Declaring token, used to position diagnostics about the entry.
    pub token: Token,
    pub kind: SymbolKind,
    /// Parameter types, procedures only.
    pub args: Option<Vec<DataType>>,
    pub was_initialized: bool,
    pub was_used: bool,
}

impl ScopeEntry {
    pub fn variable(token: Token, data_type: DataType) -> Self {
        Self {
            token,
            kind: SymbolKind::Variable(data_type),
            args: None,
            was_initialized: false,
            was_used: false,
        }
    }

    pub fn procedure(token: Token, args: Vec<DataType>) -> Self {
        Self {
            token,
            kind: SymbolKind::Procedure,
            args: Some(args),
            was_initialized: true,
            was_used: false,
        }
    }

    /// The program name can never be unused or uninitialized.
    pub fn program(token: Token) -> Self {
        Self {
            token,
            kind: SymbolKind::Program,
            args: None,
            was_initialized: true,
            was_used: true,
        }
    }

    pub fn data_type(&self) -> Option<DataType> {
        match self.kind {
            SymbolKind::Variable(data_type) => Some(data_type),
            _ => None,
        }
    }

    pub fn is_procedure(&self) -> bool {
        self.kind == SymbolKind::Procedure
    }

    pub fn arity(&self) -> usize {
        self.args.as_ref().map_or(0, Vec::len)
    }
}

/// One lexical scope. Insertion order is kept so unused-name reports follow
/// declaration order.
pub type Scope = IndexMap<String, ScopeEntry>;

/// A global scope with a stack of procedure scopes above it. The innermost
/// active scope is the top of the stack, or the global scope when the stack
/// is empty.
#[derive(Debug, Default)]
pub struct SymbolTable {
    global: Scope,
    stack: Vec<Scope>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_scope(&mut self) {
        self.stack.push(Scope::new());
        debug!("entered scope at depth {}", self.stack.len());
    }

    /// Removes the innermost procedure scope and hands it back so the caller
    /// can inspect what was never used. The global scope cannot be popped.
    pub fn pop_scope(&mut self) -> FrontendResult<Scope> {
        let scope = self
            .stack
            .pop()
            .ok_or_else(|| FrontendError::Internal("cannot pop the global scope".to_string()))?;
        debug!("left scope at depth {} ({} names)", self.stack.len() + 1, scope.len());
        Ok(scope)
    }

    /// Number of procedure scopes currently pushed.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn global(&self) -> &Scope {
        &self.global
    }

    fn current(&self) -> &Scope {
        self.stack.last().unwrap_or(&self.global)
    }

    fn current_mut(&mut self) -> &mut Scope {
        match self.stack.last_mut() {
            Some(scope) => scope,
            None => &mut self.global,
        }
    }

    // Innermost to outermost, global last.
    fn scopes(&self) -> impl Iterator<Item = &Scope> {
        self.stack.iter().rev().chain(std::iter::once(&self.global))
    }

    /// Nearest visible entry for `name`.
    pub fn lookup(&self, name: &str) -> Option<&ScopeEntry> {
        self.scopes().find_map(|scope| scope.get(name))
    }

    pub fn lookup_in_current(&self, name: &str) -> Option<&ScopeEntry> {
        self.current().get(name)
    }

    /// Mutable access to the entry in the scope that owns `name`.
    pub fn lookup_mut(&mut self, name: &str) -> Option<&mut ScopeEntry> {
        if let Some(index) = self.stack.iter().rposition(|scope| scope.contains_key(name)) {
            return self.stack[index].get_mut(name);
        }
        self.global.get_mut(name)
    }

    /// Enters `name` in the innermost scope. Returns `false`, leaving the
    /// existing entry in place, when the name is already taken there.
    pub fn define(&mut self, name: &str, entry: ScopeEntry) -> bool {
        let scope = self.current_mut();
        if scope.contains_key(name) {
            return false;
        }
        scope.insert(name.to_string(), entry);
        true
    }

    /// Replaces the entry for `name` in whichever scope declared it. Never
    /// creates a new entry; returns `false` when `name` is not visible.
    pub fn define_in_owning_scope(&mut self, name: &str, entry: ScopeEntry) -> bool {
        match self.lookup_mut(name) {
            Some(slot) => {
                *slot = entry;
                true
            }
            None => false,
        }
    }

    pub fn mark_used(&mut self, name: &str) {
        if let Some(entry) = self.lookup_mut(name) {
            entry.was_used = true;
        }
    }

    pub fn mark_initialized(&mut self, name: &str) {
        if let Some(entry) = self.lookup_mut(name) {
            entry.was_initialized = true;
        }
    }
}

/// Entries of `scope` that were never used, in declaration order.
pub fn unused_entries(scope: &Scope) -> impl Iterator<Item = (&String, &ScopeEntry)> {
    scope.iter().filter(|(_, entry)| !entry.was_used)
}
