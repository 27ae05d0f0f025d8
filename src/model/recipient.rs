use crate::domain::EMAIL_FIELD;
use crate::forms::{FieldList, FormField};

/// Supplies the recipient fields a subscription form may show
pub trait RecipientFieldSource: Send + Sync {
    fn front_end_fields(&self) -> FieldList;
}

/// The subscriber entity
#[derive(Debug, Clone, Copy, Default)]
pub struct Recipient;

impl RecipientFieldSource for Recipient {
    fn front_end_fields(&self) -> FieldList {
        vec![
            FormField::email(EMAIL_FIELD, "Email"),
            FormField::text("FirstName", "First Name", None),
            FormField::text("MiddleName", "Middle Name", None),
            FormField::text("Surname", "Surname", None),
            FormField::text("Salutation", "Salutation", None),
        ]
        .into_iter()
        .collect()
    }
}
