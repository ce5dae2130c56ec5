//! Selector parser
//!
//! Recursive-descent parser over the selector text. Only the grammar the
//! matcher understands is accepted; anything else is an error so that
//! invalid selectors surface to the caller instead of silently matching
//! nothing.

use crate::SelectorError;
use crate::selectors::{
    AttributeMatcher, AttributeSelector, Combinator, ComplexSelector, CompoundSelector,
    NthExpression, PseudoClass, SelectorComponent, SelectorList,
};

/// Parse a selector list such as `ul > li.item:first-child, #main a[href]`
pub fn parse_selector(selector: &str) -> Result<SelectorList, SelectorError> {
    let mut parser = Parser::new(selector);
    let list = parser.parse_list()?;
    parser.skip_whitespace();
    match parser.peek() {
        None => Ok(list),
        Some(ch) => Err(parser.unexpected(ch)),
    }
}

struct Parser<'a> {
    source: &'a str,
    chars: Vec<(usize, char)>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).map(|&(_, c)| c)
    }

    fn peek_at(&self, ahead: usize) -> Option<char> {
        self.chars.get(self.pos + ahead).map(|&(_, c)| c)
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        Some(ch)
    }

    fn offset(&self) -> usize {
        self.chars
            .get(self.pos)
            .map(|&(offset, _)| offset)
            .unwrap_or(self.source.len())
    }

    fn unexpected(&self, ch: char) -> SelectorError {
        SelectorError::UnexpectedChar {
            selector: self.source.to_string(),
            offset: self.offset(),
            ch,
        }
    }

    fn end(&self) -> SelectorError {
        SelectorError::UnexpectedEnd(self.source.to_string())
    }

    fn expect(&mut self, expected: char) -> Result<(), SelectorError> {
        match self.bump() {
            Some(ch) if ch == expected => Ok(()),
            Some(ch) => {
                self.pos -= 1;
                Err(self.unexpected(ch))
            }
            None => Err(self.end()),
        }
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn parse_list(&mut self) -> Result<SelectorList, SelectorError> {
        let mut selectors = vec![self.parse_complex()?];
        loop {
            self.skip_whitespace();
            if self.peek() != Some(',') {
                break;
            }
            self.bump();
            selectors.push(self.parse_complex()?);
        }
        Ok(SelectorList(selectors))
    }

    fn parse_complex(&mut self) -> Result<ComplexSelector, SelectorError> {
        self.skip_whitespace();
        let mut compounds = vec![self.parse_compound()?];
        let mut combinators = Vec::new();

        loop {
            let had_space = self.skip_whitespace();
            let combinator = match self.peek() {
                Some('>') => Combinator::Child,
                Some('+') => Combinator::NextSibling,
                Some('~') => Combinator::SubsequentSibling,
                Some(',') | Some(')') | None => break,
                Some(_) if had_space => {
                    compounds.push(self.parse_compound()?);
                    combinators.push(Combinator::Descendant);
                    continue;
                }
                Some(ch) => return Err(self.unexpected(ch)),
            };
            self.bump();
            self.skip_whitespace();
            compounds.push(self.parse_compound()?);
            combinators.push(combinator);
        }

        Ok(ComplexSelector {
            compounds,
            combinators,
        })
    }

    fn parse_compound(&mut self) -> Result<CompoundSelector, SelectorError> {
        let mut components = Vec::new();

        match self.peek() {
            Some('*') => {
                self.bump();
                components.push(SelectorComponent::Universal);
            }
            Some(ch) if is_ident_start(ch) => {
                let name = self.parse_ident()?;
                components.push(SelectorComponent::Type(name.to_ascii_lowercase()));
            }
            _ => {}
        }

        loop {
            match self.peek() {
                Some('#') => {
                    self.bump();
                    components.push(SelectorComponent::Id(self.parse_ident()?));
                }
                Some('.') => {
                    self.bump();
                    components.push(SelectorComponent::Class(self.parse_ident()?));
                }
                Some('[') => {
                    self.bump();
                    components.push(SelectorComponent::Attribute(self.parse_attribute()?));
                }
                Some(':') => {
                    self.bump();
                    components.push(SelectorComponent::PseudoClass(self.parse_pseudo()?));
                }
                _ => break,
            }
        }

        if components.is_empty() {
            return Err(match self.peek() {
                Some(ch) => self.unexpected(ch),
                None if self.source.trim().is_empty() => SelectorError::Empty,
                None => self.end(),
            });
        }
        Ok(CompoundSelector(components))
    }

    fn parse_ident(&mut self) -> Result<String, SelectorError> {
        let mut ident = String::new();

        // A leading hyphen is allowed, but not on its own
        if self.peek() == Some('-') {
            ident.push('-');
            self.bump();
        }
        match self.peek() {
            Some('\\') => {}
            Some(ch) if is_ident_start(ch) || (ident == "-" && ch == '-') => {}
            Some(ch) => return Err(self.unexpected(ch)),
            None => return Err(self.end()),
        }

        while let Some(ch) = self.peek() {
            if ch == '\\' {
                self.bump();
                ident.push(self.bump().ok_or_else(|| self.end())?);
            } else if is_ident_char(ch) {
                ident.push(ch);
                self.bump();
            } else {
                break;
            }
        }
        Ok(ident)
    }

    fn parse_attribute(&mut self) -> Result<AttributeSelector, SelectorError> {
        self.skip_whitespace();
        let name = self.parse_ident()?.to_ascii_lowercase();
        self.skip_whitespace();

        let operator = match self.peek() {
            Some(']') => {
                self.bump();
                return Ok(AttributeSelector {
                    name,
                    matcher: None,
                    case_insensitive: false,
                });
            }
            Some('=') => None,
            Some(op @ ('~' | '|' | '^' | '$' | '*')) if self.peek_at(1) == Some('=') => {
                self.bump();
                Some(op)
            }
            Some(ch) => return Err(self.unexpected(ch)),
            None => return Err(self.end()),
        };
        self.expect('=')?;
        self.skip_whitespace();

        let value = match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.bump();
                self.parse_string(quote)?
            }
            Some(_) => self.parse_ident()?,
            None => return Err(self.end()),
        };
        self.skip_whitespace();

        let case_insensitive = match self.peek() {
            Some('i' | 'I') => {
                self.bump();
                self.skip_whitespace();
                true
            }
            Some('s' | 'S') => {
                self.bump();
                self.skip_whitespace();
                false
            }
            _ => false,
        };
        self.expect(']')?;

        let matcher = match operator {
            None => AttributeMatcher::Exact(value),
            Some('~') => AttributeMatcher::Contains(value),
            Some('|') => AttributeMatcher::DashMatch(value),
            Some('^') => AttributeMatcher::Prefix(value),
            Some('$') => AttributeMatcher::Suffix(value),
            Some(_) => AttributeMatcher::Substring(value),
        };

        Ok(AttributeSelector {
            name,
            matcher: Some(matcher),
            case_insensitive,
        })
    }

    fn parse_string(&mut self, quote: char) -> Result<String, SelectorError> {
        let mut value = String::new();
        loop {
            match self.bump() {
                Some(ch) if ch == quote => return Ok(value),
                Some('\\') => value.push(self.bump().ok_or_else(|| self.end())?),
                Some(ch) => value.push(ch),
                None => return Err(self.end()),
            }
        }
    }

    fn parse_pseudo(&mut self) -> Result<PseudoClass, SelectorError> {
        if self.peek() == Some(':') {
            self.bump();
            let name = self.parse_ident()?;
            return Err(SelectorError::PseudoElement(name));
        }

        let name = self.parse_ident()?.to_ascii_lowercase();
        let pseudo = match name.as_str() {
            "root" => PseudoClass::Root,
            "empty" => PseudoClass::Empty,
            "first-child" => PseudoClass::FirstChild,
            "last-child" => PseudoClass::LastChild,
            "only-child" => PseudoClass::OnlyChild,
            "first-of-type" => PseudoClass::FirstOfType,
            "last-of-type" => PseudoClass::LastOfType,
            "only-of-type" => PseudoClass::OnlyOfType,
            "checked" => PseudoClass::Checked,
            "disabled" => PseudoClass::Disabled,
            "enabled" => PseudoClass::Enabled,
            "nth-child" => PseudoClass::NthChild(self.parse_nth_argument()?),
            "nth-last-child" => PseudoClass::NthLastChild(self.parse_nth_argument()?),
            "nth-of-type" => PseudoClass::NthOfType(self.parse_nth_argument()?),
            "nth-last-of-type" => PseudoClass::NthLastOfType(self.parse_nth_argument()?),
            "not" => PseudoClass::Not(self.parse_list_argument()?),
            "is" | "where" | "matches" => PseudoClass::Is(self.parse_list_argument()?),
            "before" | "after" | "first-line" | "first-letter" => {
                return Err(SelectorError::PseudoElement(name));
            }
            _ => return Err(SelectorError::UnknownPseudoClass(name)),
        };
        Ok(pseudo)
    }

    fn parse_nth_argument(&mut self) -> Result<NthExpression, SelectorError> {
        self.expect('(')?;
        let mut raw = String::new();
        loop {
            match self.bump() {
                Some(')') => break,
                Some(ch) => raw.push(ch),
                None => return Err(self.end()),
            }
        }
        NthExpression::parse(&raw).ok_or(SelectorError::InvalidNth(raw))
    }

    fn parse_list_argument(&mut self) -> Result<SelectorList, SelectorError> {
        self.expect('(')?;
        let list = self.parse_list()?;
        self.skip_whitespace();
        self.expect(')')?;
        Ok(list)
    }
}

fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || !ch.is_ascii()
}

fn is_ident_char(ch: char) -> bool {
    is_ident_start(ch) || ch.is_ascii_digit() || ch == '-'
}
