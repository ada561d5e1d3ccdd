//! Limits applied while compiling user supplied rule text
//!
//! Rule operands for `=~` and `!~` are arbitrary regular expressions typed
//! into configuration, so compilation is bounded:
//! - Pattern length
//! - Compiled program size
//! - Lazy DFA cache size

/// Maximum regex pattern length (500 characters)
///
/// Rationale: Attribute patterns are short (`us-east-.*`, `web\d+`).
/// Longer patterns are almost always a pasted mistake.
pub const MAX_REGEX_LENGTH: usize = 500;

/// Compiled regex size limit (10MB)
///
/// Applied as the NFA size limit when building `=~` / `!~` matchers.
pub const REGEX_SIZE_LIMIT: usize = 10_000_000; // 10MB

/// Regex DFA size limit (2MB)
///
/// Limits the size of the lazy DFA cache used while matching
/// attribute values.
pub const REGEX_DFA_SIZE_LIMIT: usize = 2_000_000; // 2MB
