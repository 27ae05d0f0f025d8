mod field;
mod field_list;
mod requirements;

pub use field::{CheckboxSet, CheckboxSetWithExtra, Choice, CompositeField, ExtraColumn, ExtraKind, FormField, Tab, TabSet};
pub use field_list::FieldList;
pub use requirements::Requirements;

/// Cell name of the checkbox column in a [`CheckboxSetWithExtra`] row
pub const VALUE_CELL: &str = "Value";
