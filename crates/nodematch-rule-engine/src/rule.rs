//! Rule line grammar and compiled conditions
//!
//! A rule line has the shape `<key><operator><value>`:
//!
//! | operator | meaning                                   |
//! |----------|-------------------------------------------|
//! | `==`     | value equals                              |
//! | `!=`     | value does not equal (or is absent)       |
//! | `!!`     | attribute is absent                       |
//! | `~~`     | attribute is present, any value           |
//! | `=~`     | value fully matches a regex               |
//! | `!~`     | value does not fully match (or is absent) |
//!
//! The key is the shortest prefix followed by an operator token, so a key
//! that itself contains `==`, `!!` and so on cannot be expressed.

use crate::constants::{MAX_REGEX_LENGTH, REGEX_DFA_SIZE_LIMIT, REGEX_SIZE_LIMIT};
use crate::{Result, RuleError};
use regex::Regex;
use regex_automata::meta;
use regex_syntax::hir::{Hir, Look};
use std::fmt;
use std::sync::LazyLock;

static RULE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<key>.+?)(?P<op>==|!=|=~|!~|!!|~~)(?P<val>.*)$")
        .expect("rule line grammar is a valid regex")
});

/// Comparison operator of a rule line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Equals,
    NotEquals,
    Absent,
    Present,
    RegexMatch,
    RegexNotMatch,
}

impl Operator {
    /// Parses an operator token.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "==" => Some(Self::Equals),
            "!=" => Some(Self::NotEquals),
            "!!" => Some(Self::Absent),
            "~~" => Some(Self::Present),
            "=~" => Some(Self::RegexMatch),
            "!~" => Some(Self::RegexNotMatch),
            _ => None,
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            Self::Equals => "==",
            Self::NotEquals => "!=",
            Self::Absent => "!!",
            Self::Present => "~~",
            Self::RegexMatch => "=~",
            Self::RegexNotMatch => "!~",
        }
    }

    /// `!!` and `~~` take no operand.
    pub fn takes_operand(&self) -> bool {
        !matches!(self, Self::Absent | Self::Present)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// One parsed rule line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleLine {
    pub key: String,
    pub operator: Operator,
    pub operand: String,
}

impl RuleLine {
    /// Parses a single line. Returns `None` when the line does not follow
    /// the grammar, including a non-empty operand after `!!` or `~~`.
    ///
    /// Keys and operands are taken verbatim; surrounding whitespace is part
    /// of them.
    pub fn parse(line: &str) -> Option<Self> {
        let caps = RULE_LINE.captures(line)?;
        let operator = Operator::from_token(&caps["op"])?;
        let operand = &caps["val"];

        if !operator.takes_operand() && !operand.is_empty() {
            return None;
        }

        Some(Self {
            key: caps["key"].to_string(),
            operator,
            operand: operand.to_string(),
        })
    }

    /// Compiles the line's predicate.
    ///
    /// Fails only for `=~` / `!~` operands that are not valid regexes.
    pub fn compile(&self) -> Result<Condition> {
        Ok(match self.operator {
            Operator::Equals => Condition::Equals(self.operand.clone()),
            Operator::NotEquals => Condition::NotEquals(self.operand.clone()),
            Operator::Absent => Condition::Absent,
            Operator::Present => Condition::Present,
            Operator::RegexMatch => Condition::Matches(compile_full_match(&self.operand)?),
            Operator::RegexNotMatch => Condition::NotMatches(compile_full_match(&self.operand)?),
        })
    }
}

impl fmt::Display for RuleLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.key, self.operator, self.operand)
    }
}

/// A compiled predicate over an attribute value, where `None` means the
/// attribute is absent. Absent is never treated as the empty string.
#[derive(Debug, Clone)]
pub enum Condition {
    Equals(String),
    NotEquals(String),
    Absent,
    Present,
    Matches(meta::Regex),
    NotMatches(meta::Regex),
}

impl Condition {
    pub fn test(&self, value: Option<&str>) -> bool {
        match self {
            Self::Equals(expected) => value == Some(expected.as_str()),
            Self::NotEquals(expected) => value != Some(expected.as_str()),
            Self::Absent => value.is_none(),
            Self::Present => value.is_some(),
            Self::Matches(regex) => value.is_some_and(|v| regex.is_match(v)),
            Self::NotMatches(regex) => !value.is_some_and(|v| regex.is_match(v)),
        }
    }
}

/// Compile a regex that must match the whole attribute value
///
/// Adds the same limits as every other user supplied pattern:
/// - Pattern length limit (500 chars)
/// - Compiled regex size limit (10MB)
/// - DFA size limit (2MB)
fn compile_full_match(pattern: &str) -> Result<meta::Regex> {
    if pattern.len() > MAX_REGEX_LENGTH {
        return Err(RuleError::InvalidPattern(format!(
            "Pattern exceeds maximum length of {} characters",
            MAX_REGEX_LENGTH
        )));
    }

    // Anchors go on the parsed tree; `(?x)` comments may run to end of text
    let hir = regex_syntax::Parser::new()
        .parse(pattern)
        .map_err(|e| RuleError::InvalidPattern(e.to_string()))?;
    let anchored = Hir::concat(vec![Hir::look(Look::Start), hir, Hir::look(Look::End)]);

    meta::Builder::new()
        .configure(
            meta::Config::new()
                .nfa_size_limit(Some(REGEX_SIZE_LIMIT))
                .hybrid_cache_capacity(REGEX_DFA_SIZE_LIMIT),
        )
        .build_from_hir(&anchored)
        .map_err(|e| RuleError::InvalidPattern(e.to_string()))
}
