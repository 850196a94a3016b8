//! Query parsing: a line of words separated by `and`/`or` into AND-groups joined by OR.

use std::fmt;

use crate::error::SyntaxError;
use crate::tokenizer::{is_alphabetic, normalize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connector {
    And,
    Or,
}

impl Connector {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "and" => Some(Connector::And),
            "or" => Some(Connector::Or),
            _ => None,
        }
    }
}

impl fmt::Display for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Connector::And => "and",
            Connector::Or => "or",
        })
    }
}

/// A validated query: non-empty groups of normalized terms. Terms within a
/// group are AND'd, groups are OR'd.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    groups: Vec<Vec<String>>,
}

impl Query {
    pub fn groups(&self) -> &[Vec<String>] { &self.groups }

    /// Every term in query order, including repeats.
    pub fn terms(&self) -> impl Iterator<Item = &str> + '_ {
        self.groups.iter().flatten().map(String::as_str)
    }
}

/// Renders the normalized query, e.g. `cat and dog or bird`.
impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (g, group) in self.groups.iter().enumerate() {
            if g > 0 { f.write_str(" or ")?; }
            for (t, term) in group.iter().enumerate() {
                if t > 0 { f.write_str(" and ")?; }
                f.write_str(term)?;
            }
        }
        Ok(())
    }
}

/// Parse and validate one query line.
///
/// Returns `Ok(None)` for a blank line. Connectors are matched after
/// case-folding, so `AND` and `Or` are connectors too.
pub fn parse(line: &str) -> Result<Option<Query>, SyntaxError> {
    let mut tokens = Vec::new();
    for token in line.split_whitespace() {
        if !is_alphabetic(token) {
            let bad = token.chars().find(|c| !c.is_ascii_alphabetic()).unwrap_or_default();
            return Err(SyntaxError::InvalidCharacter(bad));
        }
        tokens.push(normalize(token));
    }
    let (first, last) = match (tokens.first(), tokens.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Ok(None),
    };
    if let Some(c) = Connector::from_token(first) {
        return Err(SyntaxError::LeadingConnector(c));
    }
    if let Some(c) = Connector::from_token(last) {
        return Err(SyntaxError::TrailingConnector(c));
    }

    let mut groups = Vec::new();
    let mut current = Vec::new();
    let mut prev: Option<Connector> = None;
    for token in tokens.iter() {
        match Connector::from_token(token) {
            Some(conn) => {
                if let Some(p) = prev {
                    return Err(SyntaxError::AdjacentConnectors(p, conn));
                }
                if conn == Connector::Or {
                    groups.push(std::mem::take(&mut current));
                }
                prev = Some(conn);
            }
            None => {
                current.push(token.clone());
                prev = None;
            }
        }
    }
    groups.push(current);
    debug_assert!(groups.iter().all(|g| !g.is_empty()));
    Ok(Some(Query { groups }))
}
