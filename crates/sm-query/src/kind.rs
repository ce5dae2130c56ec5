//! Type Oracle
//!
//! Classifies any [`Value`] into a small set of kind names. `null` and
//! `undefined` are their own kinds; everything else goes through its class
//! tag, and tags outside the boxed-type table (elements, the document, the
//! window, collections) are plain objects.

use serde::Serialize;

use crate::Value;

/// Coarse value kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Undefined,
    Null,
    Number,
    Boolean,
    String,
    Object,
    Function,
    Array,
    Date,
    RegExp,
    Error,
}

impl Kind {
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Undefined => "undefined",
            Kind::Null => "null",
            Kind::Number => "number",
            Kind::Boolean => "boolean",
            Kind::String => "string",
            Kind::Object => "object",
            Kind::Function => "function",
            Kind::Array => "array",
            Kind::Date => "date",
            Kind::RegExp => "regexp",
            Kind::Error => "error",
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Class tag → kind, for the nine boxed types
const CLASS_KINDS: [(&str, Kind); 9] = [
    ("[object Number]", Kind::Number),
    ("[object Boolean]", Kind::Boolean),
    ("[object String]", Kind::String),
    ("[object Object]", Kind::Object),
    ("[object Function]", Kind::Function),
    ("[object Array]", Kind::Array),
    ("[object Date]", Kind::Date),
    ("[object RegExp]", Kind::RegExp),
    ("[object Error]", Kind::Error),
];

/// Classify a value. Total: unknown class tags are `object`.
pub fn kind_of(value: &Value) -> Kind {
    match value {
        Value::Undefined => Kind::Undefined,
        Value::Null => Kind::Null,
        other => {
            let tag = other.class_tag();
            CLASS_KINDS
                .iter()
                .find(|(known, _)| *known == tag)
                .map_or(Kind::Object, |(_, kind)| *kind)
        }
    }
}

pub fn is_array(value: &Value) -> bool {
    kind_of(value) == Kind::Array
}

pub fn is_function(value: &Value) -> bool {
    kind_of(value) == Kind::Function
}

pub fn is_object(value: &Value) -> bool {
    kind_of(value) == Kind::Object
}

/// The global object: the only object whose `window` refers back to itself
pub fn is_window(value: &Value) -> bool {
    is_object(value) && matches!(value, Value::Window)
}

/// Object carrying the document node type
pub fn is_document(value: &Value) -> bool {
    is_object(value) && value.as_node().is_some_and(|id| id.is_document())
}

/// Object that is neither the window nor a DOM node
pub fn is_plain_object(value: &Value) -> bool {
    is_object(value) && !is_window(value) && value.as_node().is_none()
}

pub fn is_collection(value: &Value) -> bool {
    matches!(value, Value::Collection(_))
}

/// No own enumerable keys. Only objects and arrays can have any.
pub fn is_empty_object(value: &Value) -> bool {
    match value {
        Value::Object(o) => o.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::String(s) => s.is_empty(),
        _ => true,
    }
}
