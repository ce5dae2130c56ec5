//! SM Query - element collections over an HTML document
//!
//! A namespace ([`Sm`]) bound to one document turns selectors, markup,
//! nodes, arrays and ready callbacks into [`Collection`]s, and collections
//! into new collections by walking the tree.
//!
//! ```
//! use sm_query::Sm;
//!
//! let sm = Sm::from_html(r#"<ul id="list"><li>a</li><li class="on">b</li></ul>"#)?;
//! let items = sm.query("#list")?.children(None)?;
//! assert_eq!(items.len(), 2);
//! assert_eq!(items.find(None)?.len(), 0);
//! assert_eq!(sm.query(".on")?.prev(None)?.text(), "a");
//! # Ok::<(), sm_query::Error>(())
//! ```

mod collection;
mod config;
mod construct;
mod error;
mod global;
mod iter;
mod kind;
mod manipulation;
mod namespace;
mod resolve;
mod traversal;
mod util;
mod value;

pub use collection::Collection;
pub use config::Config;
pub use error::{Error, Result};
pub use global::{Binding, GlobalScope};
pub use iter::{EachResult, Enumeration, Iterable, Key, each, map};
pub use kind::{
    Kind, is_array, is_collection, is_document, is_empty_object, is_function, is_object,
    is_plain_object, is_window, kind_of,
};
pub use manipulation::CssValue;
pub use namespace::Sm;
pub use resolve::{MatchPredicate, SelectorResolver, matches};
pub use util::{extend, parse, trim};
pub use value::{Function, Object, Value};

// Re-export the collaborator crates
pub use sm_css as css;
pub use sm_dom as dom;
pub use sm_html as html;

pub use sm_dom::{Document, NodeId, ReadyState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
