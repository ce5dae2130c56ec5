//! Query engine errors

use sm_css::{CssError, SelectorError};
use sm_dom::DomError;
use sm_html::HtmlError;
use thiserror::Error;

/// Errors surfaced by collaborators. The engine itself never fails on
/// unrecognized input; it builds an empty collection instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid selector: {0}")]
    Selector(#[from] SelectorError),

    #[error("Invalid inline style: {0}")]
    Css(#[from] CssError),

    #[error("Markup error: {0}")]
    Html(#[from] HtmlError),

    #[error("DOM error: {0}")]
    Dom(#[from] DomError),

    #[error("Invalid JSON: {0}")]
    Data(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
