use std::collections::BTreeMap;

use serde::Serialize;

use url::Url;

use crate::domain::EMAIL_FIELD;
use crate::error::Result;
use crate::forms::{
    CheckboxSet, CheckboxSetWithExtra, Choice, CompositeField, ExtraColumn, ExtraKind, FieldList,
    FormField, Requirements, Tab, VALUE_CELL,
};
use crate::i18n::Translations;
use crate::model::{MailingListSource, RecipientFieldSource, SubscriptionPage};
use crate::settings::MIN_DAYS_VERIFICATION_LINK_ALIVE;

/// Tab holding the subscription settings, under the `Root` tab set
pub const SUBSCRIPTION_TAB: &str = "SubscriptionForm";

const CUSTOM_LABEL_COLUMN: &str = "CustomLabel";
const VALIDATION_MESSAGE_COLUMN: &str = "ValidationMessage";
const REQUIRED_COLUMN: &str = "Required";

const JAVASCRIPT: &str = "client/javascript/SubscriptionPage.js";
const CSS: &str = "client/css/SubscriptionPage.css";

/// Services the editing form is assembled from
pub struct CmsContext<'a> {
    pub recipient_fields: &'a dyn RecipientFieldSource,
    pub mailing_lists: &'a dyn MailingListSource,
    pub translations: &'a Translations,
    pub days_verification_link_alive: u32,
    pub mailing_list_admin_link: &'a Url,
}

/// Site-wide editing settings, shared across requests
#[derive(Debug, Clone)]
pub struct CmsSettings {
    pub translations: Translations,
    pub days_verification_link_alive: u32,
    pub mailing_list_admin_link: Url,
}

impl CmsSettings {
    pub fn context<'a>(
        &'a self,
        recipient_fields: &'a dyn RecipientFieldSource,
        mailing_lists: &'a dyn MailingListSource,
    ) -> CmsContext<'a> {
        CmsContext {
            recipient_fields,
            mailing_lists,
            translations: &self.translations,
            days_verification_link_alive: self.days_verification_link_alive,
            mailing_list_admin_link: &self.mailing_list_admin_link,
        }
    }
}

/// Editing form of a page along with the assets it needs
#[derive(Debug, Clone, Serialize)]
pub struct CmsForm {
    pub fields: FieldList,
    pub requirements: Requirements,
}

/// Build the editing form of a subscription page.
///
/// The base page fields are extended with a `SubscriptionForm` tab holding
/// the field selection, the mailing list selection, the notification panel
/// and the completion message.
#[tracing::instrument(name = "Assemble subscription page form", skip_all, fields(page.id = %page.page.id))]
pub async fn subscription_page_fields(
    page: &SubscriptionPage,
    ctx: &CmsContext<'_>,
) -> Result<CmsForm> {
    let t = ctx.translations;
    let mut requirements = Requirements::default();

    let mut tab = Tab::new(
        SUBSCRIPTION_TAB,
        t.t("Newsletter.SUBSCRIPTIONFORM", "SubscriptionForm"),
    );

    tab.push(FormField::Header {
        name: "SubscriptionFormConfig".into(),
        title: t.t(
            "Newsletter.SUBSCRIPTIONFORMCONFIGURATION",
            "Subscription Form Configuration",
        ),
    });
    tab.push(FormField::text(
        "CustomisedHeading",
        &t.t("Newsletter.CustomisedHeading", "Heading at the top of the form"),
        page.customised_heading.as_deref(),
    ));

    tab.push(FormField::CheckboxSetWithExtra(fields_selection(
        page,
        &ctx.recipient_fields.front_end_fields(),
        t,
    )));

    tab.push(mailing_list_selection(page, ctx).await?);

    tab.push(FormField::text(
        "SubmissionButtonText",
        &t.t("Newsletter.SubmissionButtonText", "Submit Button Text"),
        Some(page.submission_button_text.as_str()),
    ));

    let days = ctx
        .days_verification_link_alive
        .max(MIN_DAYS_VERIFICATION_LINK_ALIVE);
    let validity = t
        .t(
            "Newsletter.DaysVerificationIsValid",
            "Validation for verification email is %d days",
        )
        .replace("%d", &days.to_string());
    tab.push(FormField::literal(
        "DaysVerificationIsValid",
        format!(r#"<div id="DaysVerificationIsValid">{}<br/></div>"#, validity),
    ));

    requirements.javascript(JAVASCRIPT);
    requirements.css(CSS);

    tab.push(FormField::literal(
        "BottomTaskSelection",
        format!(
            concat!(
                r#"<div id="SendNotificationControlls" class="field actions">"#,
                r#"<label class="left">{}</label>"#,
                r#"<ul><li class="ss-ui-button no" data-panel="no">{}</li>"#,
                r#"<li class="ss-ui-button yes" data-panel="yes">{}</li>"#,
                "</ul></div>"
            ),
            t.t("Newsletter.SendNotif", "Send notification email to the subscriber"),
            t.t("Newsletter.No", "No"),
            t.t("Newsletter.Yes", "Yes"),
        ),
    ));

    tab.push(FormField::Composite(notification_panel(page, t)));

    tab.push(FormField::HtmlEditor {
        name: "OnCompleteMessage".into(),
        title: t.t(
            "Newsletter.OnCompletion",
            "Message shown on subscription completion",
        ),
        value: page.on_complete_message.clone(),
    });

    let mut fields = page.page.cms_fields();
    fields.add_tab("Root", tab);

    Ok(CmsForm {
        fields,
        requirements,
    })
}

/// Selectable recipient fields: the selected ones first in their stored
/// order, then the rest in the order the source lists them.
pub fn field_candidates(selected: &[String], front_end_fields: &FieldList) -> Vec<Choice> {
    let data_fields = front_end_fields.data_fields();
    let mut candidates: Vec<Choice> = Vec::with_capacity(data_fields.len());

    let mut push = |field: &FormField| {
        if let Some(name) = field.name() {
            if !candidates.iter().any(|c| c.value == name) {
                candidates.push(Choice::new(name, field.label()));
            }
        }
    };

    for name in selected {
        if let Some(field) = data_fields.iter().find(|f| f.name() == Some(name.as_str())) {
            push(*field);
        }
    }
    for field in &data_fields {
        push(*field);
    }

    candidates
}

fn fields_selection(
    page: &SubscriptionPage,
    front_end_fields: &FieldList,
    t: &Translations,
) -> CheckboxSetWithExtra {
    let selected = page.selected_field_names();
    let candidates = field_candidates(&selected, front_end_fields);

    let checked: Vec<String> = selected
        .into_iter()
        .filter(|name| candidates.iter().any(|c| &c.value == name))
        .collect();

    let required: BTreeMap<String, String> = page
        .required_field_names()
        .into_iter()
        .map(|name| (name, "1".to_string()))
        .collect();

    let mut extra_values = BTreeMap::new();
    extra_values.insert(CUSTOM_LABEL_COLUMN.to_string(), page.custom_labels());
    extra_values.insert(
        VALIDATION_MESSAGE_COLUMN.to_string(),
        page.validation_messages(),
    );
    extra_values.insert(REQUIRED_COLUMN.to_string(), required);

    let extra = vec![
        ExtraColumn {
            name: CUSTOM_LABEL_COLUMN.into(),
            kind: ExtraKind::Varchar,
        },
        ExtraColumn {
            name: VALIDATION_MESSAGE_COLUMN.into(),
            kind: ExtraKind::Varchar,
        },
        ExtraColumn {
            name: REQUIRED_COLUMN.into(),
            kind: ExtraKind::Boolean,
        },
    ];

    let mut selection = CheckboxSetWithExtra::new(
        "Fields",
        t.t(
            "Newsletter.SelectFields",
            "Select the fields to display on the subscription form",
        ),
        candidates,
        checked,
        extra,
        extra_values,
    );
    // Email identifies the recipient, so it is always shown and required
    selection.set_cell_disabled(EMAIL_FIELD, &[VALUE_CELL, REQUIRED_COLUMN]);
    selection
}

async fn mailing_list_selection(
    page: &SubscriptionPage,
    ctx: &CmsContext<'_>,
) -> Result<FormField> {
    let lists = ctx.mailing_lists.mailing_lists().await?;

    if lists.is_empty() {
        let message = ctx
            .translations
            .t(
                "Newsletter.NoMailingList",
                "You haven't defined any mailing list yet, please go to \
                 <a href=\"%s\">the newsletter administration area</a> to define a mailing list.",
            )
            .replace("%s", ctx.mailing_list_admin_link.as_str());
        return Ok(FormField::literal(
            "NoMailingList",
            format!("<p>{}</p>", message),
        ));
    }

    let associated = page.mailing_list_ids();
    let checked = lists
        .iter()
        .filter(|list| associated.contains(&list.id))
        .map(|list| list.id.to_string())
        .collect();
    let source = lists
        .iter()
        .map(|list| Choice::new(list.id.to_string(), list.full_title()))
        .collect();

    Ok(FormField::CheckboxSet(CheckboxSet {
        name: "MailingLists".into(),
        title: ctx
            .translations
            .t("Newsletter.SubscribeTo", "Newsletters to subscribe to"),
        source,
        checked,
    }))
}

fn notification_panel(page: &SubscriptionPage, t: &Translations) -> CompositeField {
    let send_notification = if page.send_notification { "1" } else { "0" };

    CompositeField::new(vec![
        FormField::Hidden {
            name: "SendNotification".into(),
            value: send_notification.into(),
        },
        FormField::text(
            "NotificationEmailSubject",
            &t.t(
                "Newsletter.NotifSubject",
                "Notification Email Subject Line",
            ),
            page.notification_email_subject.as_deref(),
        ),
        FormField::text(
            "NotificationEmailFrom",
            &t.t(
                "Newsletter.FromNotif",
                "From Email Address for Notification Email",
            ),
            page.notification_email_from.as_deref(),
        ),
    ])
    .add_extra_class("SendNotificationControlledPanel")
    .hidden(!page.send_notification)
}
