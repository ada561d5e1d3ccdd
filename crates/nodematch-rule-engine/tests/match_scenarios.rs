//! Integration tests for rule matching
//!
//! These tests exercise the public matching API with the rule texts users
//! actually write: mixed operators, repeated keys, CRLF input and broken
//! lines.

use nodematch_core::AttributeSet;
use nodematch_rule_engine::{matches, RuleError, RuleSet};
use proptest::prelude::*;

fn attrs(pairs: &[(&str, &str)]) -> AttributeSet {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// ============================================================================
// Documented scenarios
// ============================================================================

#[test]
fn test_equality_with_negated_regex() {
    let node = attrs(&[("env", "prod"), ("region", "eu-west-1")]);
    assert!(matches(&node, "env==prod\nregion!~us-.*").unwrap());

    let us_node = attrs(&[("env", "prod"), ("region", "us-east-1")]);
    assert!(!matches(&us_node, "env==prod\nregion!~us-.*").unwrap());
}

#[test]
fn test_absent_operator() {
    assert!(matches(&attrs(&[]), "tier!!").unwrap());
    assert!(!matches(&attrs(&[("tier", "x")]), "tier!!").unwrap());
    assert!(!matches(&attrs(&[("tier", "")]), "tier!!").unwrap());
}

#[test]
fn test_present_operator() {
    assert!(matches(&attrs(&[("tier", "")]), "tier~~").unwrap());
    assert!(matches(&attrs(&[("tier", "db")]), "tier~~").unwrap());
    assert!(!matches(&attrs(&[]), "tier~~").unwrap());
}

#[test]
fn test_two_rules_same_key() {
    let node = attrs(&[("zone", "us-east-1a")]);
    assert!(matches(&node, "zone==us-east-1a\nzone=~us-east.*").unwrap());

    let other = attrs(&[("zone", "us-east-1b")]);
    assert!(!matches(&other, "zone==us-east-1a\nzone=~us-east.*").unwrap());
}

#[test]
fn test_contradictory_rules_never_match() {
    let rules = RuleSet::parse("tier!!\ntier~~").unwrap();
    assert!(!rules.matches(&attrs(&[])));
    assert!(!rules.matches(&attrs(&[("tier", "x")])));
}

#[test]
fn test_empty_rules_match_everything() {
    assert!(matches(&attrs(&[]), "").unwrap());
    assert!(matches(&attrs(&[("a", "b")]), "\n").unwrap());
}

#[test]
fn test_regex_anchored_to_whole_value() {
    let node = attrs(&[("hostname", "web01.example.com")]);
    assert!(!matches(&node, "hostname=~web\\d+").unwrap());
    assert!(matches(&node, "hostname=~web\\d+\\..*").unwrap());
}

#[test]
fn test_equality_against_absent_attribute() {
    // Absent never equals, not even the empty string
    assert!(!matches(&attrs(&[]), "env==").unwrap());
    assert!(matches(&attrs(&[("env", "")]), "env==").unwrap());
    assert!(matches(&attrs(&[]), "env!=").unwrap());
}

#[test]
fn test_malformed_regex_is_a_config_error() {
    let err = matches(&attrs(&[("env", "prod")]), "env=~(prod").unwrap_err();
    assert!(matches!(err, RuleError::InvalidPattern(_)));
    assert!(err.to_string().starts_with("Invalid pattern"));
}

#[test]
fn test_windows_line_endings() {
    let node = attrs(&[("env", "prod"), ("os", "windows")]);
    assert!(matches(&node, "env==prod\r\nos=~win.*\r\n").unwrap());
}

// ============================================================================
// Properties
// ============================================================================

fn key() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_.]{0,8}"
}

fn value() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 _.-]{0,10}"
}

proptest! {
    #[test]
    fn malformed_line_never_matches(
        k in key(),
        v in value(),
        garbage in "[a-z ]{1,12}",
    ) {
        let node = attrs(&[(k.as_str(), v.as_str())]);
        let rules = format!("{}=={}\n{}", k, v, garbage);
        prop_assert!(!matches(&node, &rules).unwrap());
    }

    #[test]
    fn not_equals_is_complement_of_equals(
        k in key(),
        expected in value(),
        actual in proptest::option::of(value()),
    ) {
        let node = match &actual {
            Some(a) => attrs(&[(k.as_str(), a.as_str())]),
            None => attrs(&[]),
        };
        let eq = matches(&node, &format!("{}=={}", k, expected)).unwrap();
        let ne = matches(&node, &format!("{}!={}", k, expected)).unwrap();
        prop_assert_ne!(eq, ne);
    }

    #[test]
    fn rule_set_is_and_of_lines(
        k1 in key(),
        v1 in value(),
        k2 in key(),
        v2 in value(),
        node_v1 in value(),
        node_v2 in value(),
    ) {
        let mut node = attrs(&[(k1.as_str(), node_v1.as_str())]);
        node.insert(k2.clone(), node_v2.clone());

        let first = format!("{}=={}", k1, v1);
        let second = format!("{}!={}", k2, v2);
        let combined = matches(&node, &format!("{}\n{}", first, second)).unwrap();
        let separate = matches(&node, &first).unwrap() && matches(&node, &second).unwrap();
        prop_assert_eq!(combined, separate);
    }
}
