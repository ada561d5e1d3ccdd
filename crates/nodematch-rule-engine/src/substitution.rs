//! `${name}` placeholder expansion

use nodematch_core::AttributeSet;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is a valid regex"));

/// Expands every `${name}` in `template` with the attribute of that name.
///
/// Unknown names expand to the empty string. Unterminated `${` is left as
/// is. Expansion is a single pass: a value that itself contains `${...}` is
/// inserted literally.
pub fn substitute(attributes: &AttributeSet, template: &str) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            attributes.get(&caps[1]).cloned().unwrap_or_default()
        })
        .into_owned()
}
