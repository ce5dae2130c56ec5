//! Iteration utilities
//!
//! `each` and `map` walk either the indices of an array-like or the keys of
//! a mapping. Which of the two applies is decided once per call, up front,
//! by the collection's [`Enumeration`].

use std::ops::ControlFlow;

use sm_dom::NodeId;

use crate::{Collection, Value};

/// Position of an entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Index(usize),
    Name(String),
}

impl Key {
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Key::Index(i) => Some(*i),
            Key::Name(_) => None,
        }
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Key::Index(i) => write!(f, "{i}"),
            Key::Name(name) => f.write_str(name),
        }
    }
}

/// How a collection's entries are enumerated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Enumeration {
    /// `0..len`
    Indices(usize),
    /// Own keys, in order
    Keys(Vec<String>),
}

impl Enumeration {
    pub(crate) fn keys(self) -> Box<dyn Iterator<Item = Key>> {
        match self {
            Enumeration::Indices(len) => Box::new((0..len).map(Key::Index)),
            Enumeration::Keys(names) => Box::new(names.into_iter().map(Key::Name)),
        }
    }
}

/// Something `each`/`map` can walk
pub trait Iterable {
    type Item;

    fn enumeration(&self) -> Enumeration;

    /// Entry at `key`; `None` skips the slot
    fn item(&self, key: &Key) -> Option<Self::Item>;
}

impl<T: Clone> Iterable for [T] {
    type Item = T;

    fn enumeration(&self) -> Enumeration {
        Enumeration::Indices(self.len())
    }

    fn item(&self, key: &Key) -> Option<T> {
        key.as_index().and_then(|i| self.get(i)).cloned()
    }
}

impl<T: Clone> Iterable for Vec<T> {
    type Item = T;

    fn enumeration(&self) -> Enumeration {
        self.as_slice().enumeration()
    }

    fn item(&self, key: &Key) -> Option<T> {
        self.as_slice().item(key)
    }
}

impl Iterable for Collection {
    type Item = NodeId;

    fn enumeration(&self) -> Enumeration {
        Enumeration::Indices(self.len())
    }

    fn item(&self, key: &Key) -> Option<NodeId> {
        self.as_slice().item(key)
    }
}

impl Iterable for Value {
    type Item = Value;

    /// Arrays, strings, collections and objects with a numeric `length`
    /// are array-likes; other objects enumerate their keys. A `length` that
    /// is fractional or larger than the object's entry count does not make
    /// it array-like.
    fn enumeration(&self) -> Enumeration {
        match self {
            Value::Array(items) => Enumeration::Indices(items.len()),
            Value::String(s) => Enumeration::Indices(s.chars().count()),
            Value::Collection(c) => Enumeration::Indices(c.len()),
            Value::Object(o) => match o.get("length") {
                Some(Value::Number(n)) if *n >= 0.0 && n.fract() == 0.0 && *n <= o.len() as f64 => {
                    Enumeration::Indices(*n as usize)
                }
                _ => Enumeration::Keys(o.keys().cloned().collect()),
            },
            _ => Enumeration::Keys(Vec::new()),
        }
    }

    fn item(&self, key: &Key) -> Option<Value> {
        let value = match (self, key) {
            (Value::Array(items), Key::Index(i)) => items.get(*i).cloned(),
            (Value::String(s), Key::Index(i)) => s.chars().nth(*i).map(|c| Value::String(c.to_string())),
            (Value::Collection(c), Key::Index(i)) => c.as_slice().get(*i).copied().map(Value::Node),
            (Value::Object(o), Key::Index(i)) => o.get(&i.to_string()).cloned(),
            (Value::Object(o), Key::Name(name)) => o.get(name).cloned(),
            _ => None,
        };
        Some(value.unwrap_or_default())
    }
}

fn walk<I: Iterable + ?Sized>(collection: &I, mut visit: impl FnMut(Key, I::Item)) {
    for key in collection.enumeration().keys() {
        if let Some(item) = collection.item(&key) {
            visit(key, item);
        }
    }
}

/// Call `f(key, value, collection)` for every entry
pub fn each<I: Iterable + ?Sized>(collection: &I, mut f: impl FnMut(Key, I::Item, &I)) {
    walk(collection, |key, item| f(key, item, collection));
}

/// Collect `f(value, key, collection)` for every entry, dropping `None`
pub fn map<I: Iterable + ?Sized, U>(collection: &I, mut f: impl FnMut(I::Item, Key, &I) -> Option<U>) -> Vec<U> {
    let mut results = Vec::new();
    walk(collection, |key, item| results.extend(f(item, key, collection)));
    results
}

/// Return value of a `Collection::each` callback. Only an explicit
/// `false` (or `ControlFlow::Break`) stops the walk.
pub trait EachResult {
    fn should_continue(self) -> bool;
}

impl EachResult for () {
    fn should_continue(self) -> bool {
        true
    }
}

impl EachResult for bool {
    fn should_continue(self) -> bool {
        self
    }
}

impl<B> EachResult for ControlFlow<B> {
    fn should_continue(self) -> bool {
        self.is_continue()
    }
}
