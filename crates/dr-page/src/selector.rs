//! Compound CSS selectors: `tag`, `*`, `.class`, `#id`, `[attr]`, `[attr="v"]`.
//! Combinators, pseudo-classes and selector lists are rejected.

use dr_core::{DrError, Result};
use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use crate::element::Element;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrMatch {
    Exists(String),
    Equals(String, String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selector {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: Vec<AttrMatch>,
    source: String,
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_' || (!c.is_ascii() && !c.is_whitespace())
}

fn read_ident(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut out = String::new();
    while let Some(&c) = chars.peek() {
        if !is_ident_char(c) {
            break;
        }
        out.push(c);
        chars.next();
    }
    out
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self> {
        let source = input.trim();
        let invalid = |why: &str| DrError::InvalidSelector(format!("{source:?}: {why}"));
        if source.is_empty() {
            return Err(invalid("empty"));
        }

        let mut sel = Selector { source: source.to_string(), ..Default::default() };
        let mut chars = source.chars().peekable();

        if chars.peek() == Some(&'*') {
            chars.next();
        } else {
            let tag = read_ident(&mut chars);
            if !tag.is_empty() {
                sel.tag = Some(tag.to_ascii_lowercase());
            }
        }

        while let Some(c) = chars.next() {
            match c {
                '.' => {
                    let class = read_ident(&mut chars);
                    if class.is_empty() {
                        return Err(invalid("empty class"));
                    }
                    sel.classes.push(class);
                }
                '#' => {
                    let id = read_ident(&mut chars);
                    if id.is_empty() {
                        return Err(invalid("empty id"));
                    }
                    sel.id = Some(id);
                }
                '[' => sel.attributes.push(Self::parse_attr(&mut chars).ok_or_else(|| invalid("bad attribute"))?),
                c if c.is_whitespace() || c == '>' || c == '+' || c == '~' => {
                    return Err(invalid("combinators are not supported"));
                }
                ',' => return Err(invalid("selector lists are not supported")),
                ':' => return Err(invalid("pseudo-classes are not supported")),
                other => return Err(invalid(&format!("unexpected {other:?}"))),
            }
        }
        Ok(sel)
    }

    fn parse_attr(chars: &mut Peekable<Chars<'_>>) -> Option<AttrMatch> {
        let name = read_ident(chars);
        if name.is_empty() {
            return None;
        }
        match chars.next()? {
            ']' => Some(AttrMatch::Exists(name)),
            '=' => {
                let first = *chars.peek()?;
                let value = match first {
                    q @ ('"' | '\'') => {
                        chars.next();
                        let mut v = String::new();
                        loop {
                            let c = chars.next()?;
                            if c == q {
                                break;
                            }
                            v.push(c);
                        }
                        v
                    }
                    _ => read_ident(chars),
                };
                (chars.next()? == ']').then_some(AttrMatch::Equals(name, value))
            }
            _ => None,
        }
    }

    pub fn matches(&self, el: &Element) -> bool {
        if let Some(tag) = &self.tag {
            if !el.tag.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if el.id.as_deref() != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|c| el.has_class(c)) {
            return false;
        }
        self.attributes.iter().all(|a| match a {
            AttrMatch::Exists(name) => el.attribute(name).is_some(),
            AttrMatch::Equals(name, value) => el.attribute(name) == Some(value.as_str()),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl std::str::FromStr for Selector {
    type Err = DrError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
