//! SM HTML
//!
//! Markup materialization built on html5ever: whole documents, single
//! detached elements built from a fragment, and serialization back to
//! markup for `html()`.

mod fragment;
mod markup;
mod parser;
mod serializer;

pub use fragment::FragmentBuilder;
pub use markup::{first_tag_name, looks_like_markup};
pub use parser::HtmlParser;
pub use serializer::HtmlSerializer;

/// Parse an HTML string into a Document
pub fn parse(html: &str) -> Result<sm_dom::Document, HtmlError> {
    HtmlParser::new().parse(html)
}

/// HTML error
#[derive(Debug, thiserror::Error)]
pub enum HtmlError {
    #[error("Failed to read markup: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to attach parsed node: {0}")]
    Dom(#[from] sm_dom::DomError),
}
