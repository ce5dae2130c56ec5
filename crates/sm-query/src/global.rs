//! Global symbol table
//!
//! Stands in for the page's global object. Installing a namespace binds
//! both of its symbols; `no_conflict` hands the short symbol back to
//! whatever owned it before the first install.

use std::collections::HashMap;

use crate::{Sm, Value};

/// What a global symbol is bound to
#[derive(Debug, Clone)]
pub enum Binding {
    Namespace(Sm),
    Value(Value),
}

impl Binding {
    pub fn as_namespace(&self) -> Option<&Sm> {
        match self {
            Binding::Namespace(sm) => Some(sm),
            Binding::Value(_) => None,
        }
    }
}

impl PartialEq for Binding {
    fn eq(&self, other: &Binding) -> bool {
        match (self, other) {
            (Binding::Namespace(a), Binding::Namespace(b)) => a.ptr_eq(b),
            (Binding::Value(a), Binding::Value(b)) => a == b,
            _ => false,
        }
    }
}

/// Process-wide symbol table
#[derive(Debug, Default)]
pub struct GlobalScope {
    bindings: HashMap<String, Binding>,
}

impl GlobalScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    /// Bind `name`, returning the previous binding
    pub fn set(&mut self, name: &str, binding: Binding) -> Option<Binding> {
        self.bindings.insert(name.to_string(), binding)
    }

    pub fn remove(&mut self, name: &str) -> Option<Binding> {
        self.bindings.remove(name)
    }

    /// Namespace currently bound to `name`
    pub fn namespace(&self, name: &str) -> Option<&Sm> {
        self.get(name).and_then(Binding::as_namespace)
    }
}

impl Sm {
    /// Bind the namespace and global symbols to this namespace
    pub fn install(&self, scope: &mut GlobalScope) {
        let config = self.config();
        self.save_previous_binding(scope.get(&config.global_symbol).cloned());
        scope.set(&config.namespace_symbol, Binding::Namespace(self.clone()));
        scope.set(&config.global_symbol, Binding::Namespace(self.clone()));
        tracing::debug!(
            "Installed namespace as {} and {}",
            config.namespace_symbol,
            config.global_symbol
        );
    }

    /// Give the global symbol back to its previous owner, if there was
    /// one, and return this namespace
    pub fn no_conflict(&self, scope: &mut GlobalScope) -> Sm {
        if let Some(previous) = self.previous_binding() {
            tracing::debug!("Restoring previous {} binding", self.config().global_symbol);
            scope.set(&self.config().global_symbol, previous.clone());
        }
        self.clone()
    }
}
