//! Dynamic values
//!
//! `Value` is what the constructor dispatches on and what the generic
//! `each`/`map` helpers walk. It mirrors the handful of shapes a page
//! script passes around: primitives, arrays, string-keyed objects,
//! callbacks, DOM nodes, the global object and wrapped collections.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use sm_dom::NodeId;

use crate::{Collection, Sm};

/// String-keyed object; keys enumerate in sorted order
pub type Object = BTreeMap<String, Value>;

/// A callable value. The only callbacks the engine invokes are ready
/// callbacks, which receive the namespace.
#[derive(Clone)]
pub struct Function(Rc<dyn Fn(&Sm)>);

impl Function {
    pub fn new(f: impl Fn(&Sm) + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, sm: &Sm) {
        (self.0)(sm)
    }

    /// Identity comparison
    pub fn ptr_eq(&self, other: &Function) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Function")
    }
}

/// Dynamic value
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(Object),
    Function(Function),
    /// Milliseconds since the epoch
    Date(f64),
    /// Pattern source
    RegExp(String),
    /// Error message
    Error(String),
    /// An element or the document node
    Node(NodeId),
    /// The global object
    Window,
    Collection(Collection),
}

impl Value {
    /// Internal class tag, as `Object.prototype.toString` would report it
    pub fn class_tag(&self) -> &'static str {
        match self {
            Value::Undefined => "[object Undefined]",
            Value::Null => "[object Null]",
            Value::Bool(_) => "[object Boolean]",
            Value::Number(_) => "[object Number]",
            Value::String(_) => "[object String]",
            Value::Array(_) => "[object Array]",
            Value::Object(_) => "[object Object]",
            Value::Function(_) => "[object Function]",
            Value::Date(_) => "[object Date]",
            Value::RegExp(_) => "[object RegExp]",
            Value::Error(_) => "[object Error]",
            Value::Node(id) if id.is_document() => "[object HTMLDocument]",
            Value::Node(_) => "[object HTMLElement]",
            Value::Window => "[object Window]",
            Value::Collection(_) => "[object SM]",
        }
    }

    /// `null` or `undefined`
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Null | Value::Undefined)
    }

    /// Truthiness, used where an optional argument counts as "supplied"
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            _ => true,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<NodeId> {
        match self {
            Value::Node(id) => Some(*id),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Property lookup on objects and arrays (`"0"`, `"1"`, ... index arrays)
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(o) => o.get(key),
            Value::Array(a) => key.parse::<usize>().ok().and_then(|i| a.get(i)),
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Array(a) => f.debug_list().entries(a).finish(),
            Value::Object(o) => f.debug_map().entries(o).finish(),
            Value::Function(func) => fmt::Debug::fmt(func, f),
            Value::Date(ms) => write!(f, "Date({ms})"),
            Value::RegExp(src) => write!(f, "/{src}/"),
            Value::Error(msg) => write!(f, "Error({msg:?})"),
            Value::Node(id) => write!(f, "Node({id})"),
            Value::Window => f.write_str("Window"),
            Value::Collection(c) => fmt::Debug::fmt(c, f),
        }
    }
}

impl PartialEq for Value {
    /// Structural for data, identity for functions and collections
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined)
            | (Value::Null, Value::Null)
            | (Value::Window, Value::Window) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) | (Value::Date(a), Value::Date(b)) => a == b,
            (Value::String(a), Value::String(b))
            | (Value::RegExp(a), Value::RegExp(b))
            | (Value::Error(a), Value::Error(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (Value::Node(a), Value::Node(b)) => a == b,
            (Value::Collection(a), Value::Collection(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::String(s.clone())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n.into())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<NodeId> for Value {
    fn from(id: NodeId) -> Self {
        Value::Node(id)
    }
}

impl From<Vec<NodeId>> for Value {
    fn from(ids: Vec<NodeId>) -> Self {
        Value::Array(ids.into_iter().map(Value::Node).collect())
    }
}

impl From<&[NodeId]> for Value {
    fn from(ids: &[NodeId]) -> Self {
        Value::Array(ids.iter().copied().map(Value::Node).collect())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Object> for Value {
    fn from(o: Object) -> Self {
        Value::Object(o)
    }
}

impl From<Function> for Value {
    fn from(f: Function) -> Self {
        Value::Function(f)
    }
}

impl From<Collection> for Value {
    fn from(c: Collection) -> Self {
        Value::Collection(c)
    }
}

impl From<&Collection> for Value {
    fn from(c: &Collection) -> Self {
        Value::Collection(c.clone())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Undefined, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            serde_json::Value::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}
