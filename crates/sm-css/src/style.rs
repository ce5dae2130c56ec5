//! Inline style declarations
//!
//! The `style` attribute is parsed with lightningcss into an ordered list
//! of `name: value` pairs; edits are made on that list and written back
//! as text.

use lightningcss::declaration::DeclarationBlock;
use lightningcss::stylesheet::{ParserOptions, PrinterOptions};

use crate::CssError;

/// One `name: value` pair
#[derive(Debug, Clone, PartialEq, Eq)]
struct Declaration {
    name: String,
    value: String,
    important: bool,
}

/// Parsed contents of a `style` attribute
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineStyle {
    declarations: Vec<Declaration>,
}

impl InlineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse declaration text such as `color: red; width: 10px`
    pub fn parse(text: &str) -> Result<Self, CssError> {
        if text.trim().is_empty() {
            return Ok(Self::new());
        }

        let block = DeclarationBlock::parse_string(text, ParserOptions::default()).map_err(|e| {
            CssError::ParseError {
                message: format!("{:?}", e),
            }
        })?;

        let mut declarations = Vec::with_capacity(
            block.declarations.len() + block.important_declarations.len(),
        );
        let all = block
            .declarations
            .iter()
            .map(|p| (p, false))
            .chain(block.important_declarations.iter().map(|p| (p, true)));
        for (property, important) in all {
            let value = property
                .value_to_css_string(PrinterOptions::default())
                .map_err(|e| CssError::ParseError {
                    message: format!("{:?}", e),
                })?;
            declarations.push(Declaration {
                name: property.property_id().name().to_string(),
                value,
                important,
            });
        }

        Ok(Self { declarations })
    }

    /// Value of a property; `name` may be camelCase or kebab-case
    pub fn get(&self, name: &str) -> Option<&str> {
        let name = property_name(name);
        self.declarations
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.value.as_str())
    }

    /// Set or replace a property, keeping its position if already present
    pub fn set(&mut self, name: &str, value: &str) {
        let name = property_name(name);
        let value = value.trim();
        let (value, important) = match value.strip_suffix("!important") {
            Some(rest) => (rest.trim_end(), true),
            None => (value, false),
        };

        if let Some(existing) = self.declarations.iter_mut().find(|d| d.name == name) {
            existing.value = value.to_string();
            existing.important = important;
            return;
        }
        self.declarations.push(Declaration {
            name,
            value: value.to_string(),
            important,
        });
    }

    /// Remove a property; returns whether it was present
    pub fn remove(&mut self, name: &str) -> bool {
        let name = property_name(name);
        let before = self.declarations.len();
        self.declarations.retain(|d| d.name != name);
        self.declarations.len() != before
    }

    /// Property names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.declarations.iter().map(|d| d.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Serialize back to `style` attribute text
    pub fn to_css_text(&self) -> String {
        self.declarations
            .iter()
            .map(|d| {
                if d.important {
                    format!("{}: {} !important", d.name, d.value)
                } else {
                    format!("{}: {}", d.name, d.value)
                }
            })
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Normalize a property name to lowercase kebab-case (custom properties untouched)
fn property_name(name: &str) -> String {
    let name = name.trim();
    if name.starts_with("--") {
        name.to_string()
    } else {
        camel_connector(name).to_ascii_lowercase()
    }
}

/// `font-size` → `fontSize`; runs of hyphens collapse
pub fn camel_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '-' {
            while chars.peek() == Some(&'-') {
                chars.next();
            }
            match chars.next() {
                Some(next) => result.extend(next.to_uppercase()),
                // Trailing hyphens have nothing to capitalize
                None => result.push('-'),
            }
        } else {
            result.push(c);
        }
    }
    result
}

/// `fontSize` → `font-size`; only a lowercase letter followed by an
/// uppercase one is split
pub fn camel_connector(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev: Option<char> = None;
    for c in s.chars() {
        match prev {
            Some(p) if p.is_ascii_lowercase() && c.is_ascii_uppercase() => {
                result.push('-');
                result.push(c.to_ascii_lowercase());
                // The lowered letter cannot start another split
                prev = None;
                continue;
            }
            _ => result.push(c),
        }
        prev = Some(c);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_helpers() {
        assert_eq!(camel_case("font-size"), "fontSize");
        assert_eq!(camel_case("a--b-c"), "aBC");
        assert_eq!(camel_case("plain"), "plain");
        assert_eq!(camel_connector("fontSize"), "font-size");
        assert_eq!(camel_connector("borderTopWidth"), "border-top-width");
        assert_eq!(camel_connector("already-kebab"), "already-kebab");
    }

    #[test]
    fn test_parse_and_get() {
        let style = InlineStyle::parse("display: none; width: 10px").unwrap();
        assert_eq!(style.len(), 2);
        assert_eq!(style.get("display"), Some("none"));
        assert_eq!(style.get("width"), Some("10px"));
        assert_eq!(style.get("height"), None);
    }

    #[test]
    fn test_empty_text() {
        let style = InlineStyle::parse("   ").unwrap();
        assert!(style.is_empty());
        assert_eq!(style.to_css_text(), "");
    }

    #[test]
    fn test_set_keeps_position() {
        let mut style = InlineStyle::new();
        style.set("display", "block");
        style.set("zIndex", "3");
        style.set("display", "none");
        assert_eq!(style.names().collect::<Vec<_>>(), vec!["display", "z-index"]);
        assert_eq!(style.to_css_text(), "display: none; z-index: 3");
    }

    #[test]
    fn test_important_and_remove() {
        let mut style = InlineStyle::new();
        style.set("color", "blue !important");
        assert_eq!(style.get("color"), Some("blue"));
        assert_eq!(style.to_css_text(), "color: blue !important");
        assert!(style.remove("color"));
        assert!(!style.remove("color"));
    }

    #[test]
    fn test_written_text_parses_back() {
        let mut style = InlineStyle::new();
        style.set("width", "10px");
        style.set("display", "block");
        let reparsed = InlineStyle::parse(&style.to_css_text()).unwrap();
        assert_eq!(reparsed.get("width"), Some("10px"));
        assert_eq!(reparsed.get("display"), Some("block"));
    }
}
