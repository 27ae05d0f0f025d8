use super::EMAIL_FIELD;

/// Split the stored comma-separated `Fields` value into field names.
///
/// Blank fragments and repeated names are dropped; an absent or empty value
/// selects `Email` only.
pub fn parse_field_names(stored: Option<&str>) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for name in stored.unwrap_or_default().split(',').map(str::trim) {
        if !name.is_empty() && !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }

    if names.is_empty() {
        vec![EMAIL_FIELD.to_string()]
    } else {
        names
    }
}

/// Join field names into the stored comma-separated form
pub fn join_field_names<S: AsRef<str>>(names: &[S]) -> String {
    names
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(",")
}
