//! Single simple selectors
//!
//! A selector made only of word characters and hyphens, optionally
//! prefixed by `#` or `.`, can be answered by a plain id, class or tag
//! lookup instead of the general matcher.

/// A selector eligible for a direct id/class/tag lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimpleSelector<'a> {
    /// `#name`
    Id(&'a str),
    /// `.name`
    Class(&'a str),
    /// `name`
    Tag(&'a str),
}

impl<'a> SimpleSelector<'a> {
    /// Classify selector text; `None` means it needs the general evaluator.
    ///
    /// The name part may be empty (`""`, `"#"`, `"."`), which callers treat
    /// as matching nothing.
    pub fn classify(selector: &'a str) -> Option<Self> {
        let (make, name): (fn(&'a str) -> Self, &'a str) = match selector.as_bytes().first() {
            Some(b'#') => (Self::Id, &selector[1..]),
            Some(b'.') => (Self::Class, &selector[1..]),
            _ => (Self::Tag, selector),
        };
        is_word(name).then(|| make(name))
    }

    /// The bare name without its prefix
    pub fn name(&self) -> &'a str {
        match *self {
            Self::Id(name) | Self::Class(name) | Self::Tag(name) => name,
        }
    }
}

/// Whether the selector takes the fast lookup path
pub fn is_simple(selector: &str) -> bool {
    SimpleSelector::classify(selector).is_some()
}

fn is_word(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}
