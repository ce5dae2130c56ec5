//! Selector syntax tree
//!
//! `SelectorList` → `ComplexSelector` (compounds joined by combinators)
//! → `CompoundSelector` (components that must all match one element).

/// Comma-separated list; an element matches if any entry matches
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorList(pub Vec<ComplexSelector>);

/// Compound selectors joined by combinators.
///
/// `combinators[i]` sits between `compounds[i]` and `compounds[i + 1]`,
/// so the rightmost compound is the subject.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexSelector {
    pub compounds: Vec<CompoundSelector>,
    pub combinators: Vec<Combinator>,
}

impl ComplexSelector {
    /// The compound the matched element itself must satisfy
    pub fn subject(&self) -> Option<&CompoundSelector> {
        self.compounds.last()
    }
}

/// Components that must all hold for one element
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompoundSelector(pub Vec<SelectorComponent>);

/// Relationship between two compounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// `a b`
    Descendant,
    /// `a > b`
    Child,
    /// `a + b`
    NextSibling,
    /// `a ~ b`
    SubsequentSibling,
}

/// A component of a compound selector
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorComponent {
    /// Universal selector *
    Universal,
    /// Type selector (tag name)
    Type(String),
    /// ID selector #id
    Id(String),
    /// Class selector .class
    Class(String),
    /// Attribute selector [attr], [attr=value], etc.
    Attribute(AttributeSelector),
    /// Pseudo-class :first-child, :not(), etc.
    PseudoClass(PseudoClass),
}

/// Attribute selector
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSelector {
    pub name: String,
    pub matcher: Option<AttributeMatcher>,
    pub case_insensitive: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeMatcher {
    /// [attr=value] - exact match
    Exact(String),
    /// [attr~=value] - whitespace-separated list contains
    Contains(String),
    /// [attr|=value] - exact or prefix with hyphen
    DashMatch(String),
    /// [attr^=value] - starts with
    Prefix(String),
    /// [attr$=value] - ends with
    Suffix(String),
    /// [attr*=value] - contains substring
    Substring(String),
}

impl AttributeSelector {
    /// Check if an attribute value matches
    pub fn matches(&self, value: Option<&str>) -> bool {
        let (Some(matcher), Some(value)) = (&self.matcher, value) else {
            return self.matcher.is_none() && value.is_some();
        };

        let fold = |s: &str| {
            if self.case_insensitive {
                s.to_lowercase()
            } else {
                s.to_string()
            }
        };
        let value = fold(value);

        match matcher {
            AttributeMatcher::Exact(expected) => value == fold(expected),
            AttributeMatcher::Contains(expected) => {
                let expected = fold(expected);
                !expected.is_empty() && value.split_whitespace().any(|w| w == expected)
            }
            AttributeMatcher::DashMatch(expected) => {
                let expected = fold(expected);
                value == expected || value.starts_with(&format!("{expected}-"))
            }
            // Empty operands never match for the substring family
            AttributeMatcher::Prefix(expected) => {
                !expected.is_empty() && value.starts_with(&fold(expected))
            }
            AttributeMatcher::Suffix(expected) => {
                !expected.is_empty() && value.ends_with(&fold(expected))
            }
            AttributeMatcher::Substring(expected) => {
                !expected.is_empty() && value.contains(&fold(expected))
            }
        }
    }
}

/// Supported pseudo-classes
#[derive(Debug, Clone, PartialEq)]
pub enum PseudoClass {
    // Tree-structural
    Root,
    Empty,
    FirstChild,
    LastChild,
    OnlyChild,
    FirstOfType,
    LastOfType,
    OnlyOfType,
    NthChild(NthExpression),
    NthLastChild(NthExpression),
    NthOfType(NthExpression),
    NthLastOfType(NthExpression),

    // Logical
    Not(SelectorList),
    Is(SelectorList),

    // Attribute-backed input states
    Checked,
    Disabled,
    Enabled,
}

/// An+B expression for :nth-* selectors
#[derive(Debug, Clone, PartialEq)]
pub struct NthExpression {
    /// Coefficient (A in An+B)
    pub a: i32,
    /// Offset (B in An+B)
    pub b: i32,
}

impl NthExpression {
    /// Create "odd" expression (2n+1)
    pub fn odd() -> Self {
        Self { a: 2, b: 1 }
    }

    /// Create "even" expression (2n)
    pub fn even() -> Self {
        Self { a: 2, b: 0 }
    }

    /// Create a simple index (0n+b)
    pub fn index(n: i32) -> Self {
        Self { a: 0, b: n }
    }

    /// Create An+B expression
    pub fn new(a: i32, b: i32) -> Self {
        Self { a, b }
    }

    /// Parse from string like "2n+1", "odd", "even", "3"
    pub fn parse(s: &str) -> Option<Self> {
        let s: String = s.split_whitespace().collect::<String>().to_ascii_lowercase();

        match s.as_str() {
            "odd" => return Some(Self::odd()),
            "even" => return Some(Self::even()),
            _ => {}
        }

        if let Ok(n) = s.parse::<i32>() {
            return Some(Self::index(n));
        }

        let n_pos = s.find('n')?;
        let a = match &s[..n_pos] {
            "" | "+" => 1,
            "-" => -1,
            a => a.parse().ok()?,
        };
        let rest = &s[n_pos + 1..];
        let b = if rest.is_empty() {
            0
        } else if rest.starts_with('+') || rest.starts_with('-') {
            rest.trim_start_matches('+').parse().ok()?
        } else {
            return None;
        };

        Some(Self::new(a, b))
    }

    /// Check if index n (1-based) matches this expression
    pub fn matches(&self, n: i32) -> bool {
        if self.a == 0 {
            return n == self.b;
        }

        let diff = n - self.b;
        diff % self.a == 0 && diff / self.a >= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nth_expression_odd() {
        let expr = NthExpression::odd();
        assert!(expr.matches(1));
        assert!(!expr.matches(2));
        assert!(expr.matches(3));
        assert!(!expr.matches(4));
    }

    #[test]
    fn test_nth_expression_negative_a() {
        // -n+3 selects the first three
        let expr = NthExpression::new(-1, 3);
        assert!(expr.matches(1));
        assert!(expr.matches(3));
        assert!(!expr.matches(4));
    }

    #[test]
    fn test_nth_expression_parse() {
        assert_eq!(NthExpression::parse("odd"), Some(NthExpression::odd()));
        assert_eq!(NthExpression::parse(" EVEN "), Some(NthExpression::even()));
        assert_eq!(NthExpression::parse("3"), Some(NthExpression::index(3)));
        assert_eq!(NthExpression::parse("2n"), Some(NthExpression::new(2, 0)));
        assert_eq!(NthExpression::parse("2n + 1"), Some(NthExpression::new(2, 1)));
        assert_eq!(NthExpression::parse("-n+3"), Some(NthExpression::new(-1, 3)));
        assert_eq!(NthExpression::parse("n-1"), Some(NthExpression::new(1, -1)));
        assert_eq!(NthExpression::parse("2n1"), None);
        assert_eq!(NthExpression::parse("x"), None);
    }

    #[test]
    fn test_attribute_selector_exact() {
        let sel = AttributeSelector {
            name: "type".to_string(),
            matcher: Some(AttributeMatcher::Exact("text".to_string())),
            case_insensitive: false,
        };

        assert!(sel.matches(Some("text")));
        assert!(!sel.matches(Some("TEXT")));
        assert!(!sel.matches(None));
    }

    #[test]
    fn test_attribute_selector_case_insensitive() {
        let sel = AttributeSelector {
            name: "type".to_string(),
            matcher: Some(AttributeMatcher::Exact("text".to_string())),
            case_insensitive: true,
        };
        assert!(sel.matches(Some("TeXt")));
    }

    #[test]
    fn test_attribute_selector_family() {
        let make = |matcher| AttributeSelector {
            name: "class".to_string(),
            matcher: Some(matcher),
            case_insensitive: false,
        };

        assert!(make(AttributeMatcher::Prefix("btn-".into())).matches(Some("btn-primary")));
        assert!(!make(AttributeMatcher::Prefix("".into())).matches(Some("btn")));
        assert!(make(AttributeMatcher::Suffix("ary".into())).matches(Some("primary")));
        assert!(make(AttributeMatcher::Substring("im".into())).matches(Some("primary")));
        assert!(make(AttributeMatcher::Contains("b".into())).matches(Some("a b c")));
        assert!(!make(AttributeMatcher::Contains("b".into())).matches(Some("abc")));
        assert!(make(AttributeMatcher::DashMatch("en".into())).matches(Some("en-US")));
        assert!(!make(AttributeMatcher::DashMatch("en".into())).matches(Some("english")));
    }

    #[test]
    fn test_existence() {
        let sel = AttributeSelector {
            name: "hidden".to_string(),
            matcher: None,
            case_insensitive: false,
        };
        assert!(sel.matches(Some("")));
        assert!(!sel.matches(None));
    }
}
