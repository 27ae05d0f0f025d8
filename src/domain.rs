mod email_address;
mod field_selection;
mod required_fields;

pub use email_address::EmailAddress;
pub use field_selection::{join_field_names, parse_field_names};
pub use required_fields::{encode_flat_map, parse_required_field_names, DEFAULT_REQUIRED};

/// The recipient's identifier; always shown on the form and always required
pub const EMAIL_FIELD: &str = "Email";
