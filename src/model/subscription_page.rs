use std::collections::BTreeMap;

use uuid::Uuid;

use crate::domain::{self, EmailAddress, DEFAULT_REQUIRED};
use crate::forms::FieldList;

use super::Page;

const DEFAULT_SUBMISSION_BUTTON_TEXT: &str = "Submit";

/// A newsletter subscription landing page
///
/// The map-like columns (`required`, `custom_label`, `validation_message`)
/// hold flat `{"FieldName":"value"}` text, `mailing_lists` a JSON array of
/// mailing list ids and `fields` a comma separated list of field names.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SubscriptionPage {
    #[sqlx(flatten)]
    pub page: Page,
    pub fields: Option<String>,
    pub required: Option<String>,
    pub customised_heading: Option<String>,
    pub custom_label: Option<String>,
    pub validation_message: Option<String>,
    pub mailing_lists: Option<String>,
    pub submission_button_text: String,
    pub send_notification: bool,
    pub notification_email_subject: Option<String>,
    pub notification_email_from: Option<String>,
    pub on_complete_message: Option<String>,
}

impl SubscriptionPage {
    pub fn new(page: Page) -> Self {
        Self {
            page,
            fields: Some(domain::EMAIL_FIELD.into()),
            required: None,
            customised_heading: None,
            custom_label: None,
            validation_message: None,
            mailing_lists: None,
            submission_button_text: DEFAULT_SUBMISSION_BUTTON_TEXT.into(),
            send_notification: false,
            notification_email_subject: None,
            notification_email_from: None,
            on_complete_message: None,
        }
    }

    /// The stored `Required` value, or `{"Email":"1"}` when nothing is stored
    pub fn required(&self) -> &str {
        match self.required.as_deref() {
            None | Some("") => DEFAULT_REQUIRED,
            Some(stored) => stored,
        }
    }

    /// Names of required fields; always contains `Email` exactly once
    pub fn required_field_names(&self) -> Vec<String> {
        domain::parse_required_field_names(self.required())
    }

    /// Selected field names in their stored order, `Email` when none are stored
    pub fn selected_field_names(&self) -> Vec<String> {
        domain::parse_field_names(self.fields.as_deref())
    }

    /// The selected fields out of `front_end_fields`, in the stored order.
    ///
    /// Names that do not resolve to a field are skipped.
    pub fn frontend_field_list(&self, front_end_fields: &FieldList) -> FieldList {
        self.selected_field_names()
            .iter()
            .filter_map(|name| front_end_fields.field_by_name(name))
            .cloned()
            .collect()
    }

    /// Per-field label overrides
    pub fn custom_labels(&self) -> BTreeMap<String, String> {
        parse_flat_map("CustomLabel", self.custom_label.as_deref())
    }

    /// Per-field validation message overrides
    pub fn validation_messages(&self) -> BTreeMap<String, String> {
        parse_flat_map("ValidationMessage", self.validation_message.as_deref())
    }

    /// Ids of the mailing lists offered on this page
    pub fn mailing_list_ids(&self) -> Vec<Uuid> {
        let stored = match self.mailing_lists.as_deref().map(str::trim) {
            None | Some("") => return Vec::new(),
            Some(stored) => stored,
        };

        if let Ok(ids) = serde_json::from_str::<Vec<Uuid>>(stored) {
            return ids;
        }

        tracing::warn!(
            page.id = %self.page.id,
            "Stored mailing lists are not a JSON array, falling back to a comma split: {}",
            stored
        );
        stored
            .trim_matches(|c: char| matches!(c, '[' | ']' | '{' | '}'))
            .split(',')
            .filter_map(|id| id.trim().trim_matches('"').parse().ok())
            .collect()
    }
}

fn parse_flat_map(column: &str, stored: Option<&str>) -> BTreeMap<String, String> {
    let stored = match stored.map(str::trim) {
        None | Some("") => return BTreeMap::new(),
        Some(stored) => stored,
    };
    serde_json::from_str(stored).unwrap_or_else(|error| {
        tracing::warn!(
            error.cause_chain = ?error,
            "Ignoring malformed {} value: {}",
            column,
            stored
        );
        BTreeMap::new()
    })
}

/// Values needed to create a page
#[derive(Debug, Clone)]
pub struct NewSubscriptionPage {
    pub title: String,
    pub url_segment: String,
    pub show_in_menus: bool,
    pub send_notification: bool,
}

impl NewSubscriptionPage {
    /// The page created for a fresh site
    pub fn default_page() -> Self {
        Self {
            title: "Newsletter Subscription".into(),
            url_segment: "newsletter-subscription".into(),
            show_in_menus: false,
            send_notification: true,
        }
    }
}

/// Subscription settings as saved from the editing form, already in their stored shape
#[derive(Debug, Clone)]
pub struct SubscriptionSettings {
    pub customised_heading: Option<String>,
    pub fields: String,
    pub required: String,
    pub custom_label: String,
    pub validation_message: String,
    pub mailing_lists: String,
    pub submission_button_text: String,
    pub send_notification: bool,
    pub notification_email_subject: Option<String>,
    pub notification_email_from: Option<EmailAddress>,
    pub on_complete_message: Option<String>,
}
