//! Flat `{"Name":"value"}` strings as stored in the page's text columns.
//!
//! The stored shape is JSON-like but is not guaranteed to be valid JSON, so
//! the required-field names are extracted by splitting rather than by a JSON
//! parser. Values containing commas, colons or nested objects are split
//! naively and yield whatever fragments that produces.

use std::collections::BTreeMap;

use super::EMAIL_FIELD;

/// Stored `Required` value assumed when the page has none
pub const DEFAULT_REQUIRED: &str = r#"{"Email":"1"}"#;

/// Extract the required field names from a stored `Required` string.
///
/// Never fails: empty fragments are dropped, fragments without a colon are
/// taken whole, and `Email` is appended when missing. Each name appears once.
pub fn parse_required_field_names(stored: &str) -> Vec<String> {
    let body = stored.trim().trim_matches(|c: char| c == '{' || c == '}');

    let mut names: Vec<String> = Vec::new();
    for fragment in body.split(',') {
        let key = fragment
            .split_once(':')
            .map(|(key, _)| key)
            .unwrap_or(fragment);
        let name = key.trim().trim_matches('"').trim();
        if !name.is_empty() && !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }

    if !names.iter().any(|n| n == EMAIL_FIELD) {
        names.push(EMAIL_FIELD.to_string());
    }
    names
}

/// Serialize a flat string map into its stored form
pub fn encode_flat_map(map: &BTreeMap<String, String>) -> String {
    serde_json::to_string(map).unwrap_or_else(|_| "{}".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email_count(names: &[String]) -> usize {
        names.iter().filter(|n| n.as_str() == EMAIL_FIELD).count()
    }

    #[quickcheck_macros::quickcheck]
    fn email_is_always_present_exactly_once(stored: String) -> bool {
        email_count(&parse_required_field_names(&stored)) == 1
    }

    #[test]
    fn default_value_requires_only_email() {
        assert_eq!(vec!["Email"], parse_required_field_names(DEFAULT_REQUIRED));
    }

    #[test]
    fn empty_and_blank_values_require_only_email() {
        for stored in ["", "   ", "{}", "{ }", ",,,", ":"] {
            assert_eq!(
                vec!["Email"],
                parse_required_field_names(stored),
                "stored value was {:?}",
                stored
            );
        }
    }

    #[test]
    fn names_keep_stored_order_and_email_is_appended() {
        let names = parse_required_field_names(r#"{"Surname":"1","FirstName":"1"}"#);
        assert_eq!(vec!["Surname", "FirstName", "Email"], names);
    }

    #[test]
    fn stored_email_is_not_repeated() {
        let names = parse_required_field_names(r#"{"FirstName":"1","Email":"1","Email":"1"}"#);
        assert_eq!(vec!["FirstName", "Email"], names);
    }

    #[test]
    fn whitespace_around_keys_is_ignored() {
        let names = parse_required_field_names(r#" { "Email":"1", "Surname" : "1" } "#);
        assert_eq!(vec!["Email", "Surname"], names);
    }

    #[test]
    fn fragments_without_colon_are_taken_whole() {
        let names = parse_required_field_names(r#"{"Surname"}"#);
        assert_eq!(vec!["Surname", "Email"], names);
    }

    #[test]
    fn malformed_fragments_are_skipped() {
        let names = parse_required_field_names(r#"{"":"1",  ,"Salutation":"1"}"#);
        assert_eq!(vec!["Salutation", "Email"], names);
    }

    #[test]
    fn encoded_maps_round_trip_through_the_parser() {
        let mut map = BTreeMap::new();
        map.insert("Email".to_string(), "1".to_string());
        map.insert("Surname".to_string(), "1".to_string());

        let stored = encode_flat_map(&map);

        assert_eq!(r#"{"Email":"1","Surname":"1"}"#, stored);
        assert_eq!(vec!["Email", "Surname"], parse_required_field_names(&stored));
    }
}
