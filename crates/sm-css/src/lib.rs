//! SM CSS - Selectors and inline style
//!
//! The general selector evaluator the query engine falls back to for
//! anything that is not a single id/class/tag selector, plus the
//! inline-style declaration handling behind `css()`.

mod matcher;
mod parser;
mod selectors;
mod simple;
mod style;

pub use matcher::{matches, matches_list, query_all, query_first};
pub use parser::parse_selector;
pub use selectors::{
    AttributeMatcher, AttributeSelector, Combinator, ComplexSelector, CompoundSelector,
    NthExpression, PseudoClass, SelectorComponent, SelectorList,
};
pub use simple::{SimpleSelector, is_simple};
pub use style::{InlineStyle, camel_case, camel_connector};

/// Selector parsing error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("Empty selector")]
    Empty,

    #[error("Unexpected character {ch:?} at offset {offset} in {selector:?}")]
    UnexpectedChar {
        selector: String,
        offset: usize,
        ch: char,
    },

    #[error("Unexpected end of selector {0:?}")]
    UnexpectedEnd(String),

    #[error("Unsupported pseudo-class :{0}")]
    UnknownPseudoClass(String),

    #[error("Pseudo-elements never match elements: ::{0}")]
    PseudoElement(String),

    #[error("Invalid An+B expression {0:?}")]
    InvalidNth(String),
}

/// Inline style error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CssError {
    #[error("Parse error in style declarations: {message}")]
    ParseError { message: String },
}
