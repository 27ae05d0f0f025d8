use std::collections::BTreeMap;

use actix_web::dev::HttpServiceFactory;
use actix_web::{get, put, web, HttpResponse, Responder};

use serde::{Deserialize, Serialize};

use sqlx::PgPool;

use uuid::Uuid;

use crate::cms::{self, CmsSettings};
use crate::domain::{self, EmailAddress, EMAIL_FIELD};
use crate::error::{Error, RestError, RestResult};
use crate::forms::{Choice, FieldList, FormField};
use crate::model::{
    MailingList, Recipient, RecipientFieldSource, SubscriptionPage, SubscriptionSettings,
};
use crate::repo::{MailingListRepo, SubscriptionPageRepo};

const DEFAULT_SUBMISSION_BUTTON_TEXT: &str = "Submit";

/// One row of the field selection as submitted by the editor
#[derive(Debug, Deserialize)]
pub struct FieldSettings {
    name: String,
    #[serde(default)]
    required: bool,
    custom_label: Option<String>,
    validation_message: Option<String>,
}

/// JSON body of the save endpoint
#[derive(Debug, Deserialize)]
pub struct SubscriptionPageForm {
    customised_heading: Option<String>,
    /// Selected fields, in display order
    #[serde(default)]
    fields: Vec<FieldSettings>,
    #[serde(default)]
    mailing_lists: Vec<Uuid>,
    submission_button_text: Option<String>,
    #[serde(default)]
    send_notification: bool,
    notification_email_subject: Option<String>,
    notification_email_from: Option<String>,
    on_complete_message: Option<String>,
}

impl SubscriptionPageForm {
    /// Validate the submitted values and encode them in their stored shape.
    ///
    /// `Email` is always kept selected and required.
    pub fn into_settings(
        self,
        front_end_fields: &FieldList,
    ) -> crate::error::Result<SubscriptionSettings> {
        let mut names: Vec<String> = Vec::with_capacity(self.fields.len() + 1);
        let mut required = BTreeMap::new();
        let mut custom_labels = BTreeMap::new();
        let mut validation_messages = BTreeMap::new();

        for field in self.fields {
            let name = field.name.trim().to_string();
            if front_end_fields.field_by_name(&name).is_none() {
                return Err(Error::ParsingError(format!("Unknown field {}", name)));
            }
            if names.contains(&name) {
                continue;
            }
            if field.required {
                required.insert(name.clone(), "1".to_string());
            }
            if let Some(label) = non_blank(field.custom_label) {
                custom_labels.insert(name.clone(), label);
            }
            if let Some(message) = non_blank(field.validation_message) {
                validation_messages.insert(name.clone(), message);
            }
            names.push(name);
        }

        if !names.iter().any(|name| name == EMAIL_FIELD) {
            names.push(EMAIL_FIELD.to_string());
        }
        required.insert(EMAIL_FIELD.to_string(), "1".to_string());

        let mut mailing_lists: Vec<Uuid> = Vec::with_capacity(self.mailing_lists.len());
        for list_id in self.mailing_lists {
            if !mailing_lists.contains(&list_id) {
                mailing_lists.push(list_id);
            }
        }

        let notification_email_from = non_blank(self.notification_email_from)
            .map(|email| email.parse::<EmailAddress>())
            .transpose()?;

        Ok(SubscriptionSettings {
            customised_heading: non_blank(self.customised_heading),
            fields: domain::join_field_names(&names),
            required: domain::encode_flat_map(&required),
            custom_label: domain::encode_flat_map(&custom_labels),
            validation_message: domain::encode_flat_map(&validation_messages),
            mailing_lists: serde_json::to_string(&mailing_lists)
                .map_err(|e| Error::ParsingError(e.to_string()))?,
            submission_button_text: non_blank(self.submission_button_text)
                .unwrap_or_else(|| DEFAULT_SUBMISSION_BUTTON_TEXT.into()),
            send_notification: self.send_notification,
            notification_email_subject: non_blank(self.notification_email_subject),
            notification_email_from,
            on_complete_message: non_blank(self.on_complete_message),
        })
    }

    fn mailing_list_ids(&self) -> &[Uuid] {
        &self.mailing_lists
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// A field of the public subscription form
#[derive(Debug, Serialize)]
pub struct PublicField {
    pub field: FormField,
    pub label: String,
    pub required: bool,
    pub validation_message: Option<String>,
}

/// View model of the public subscription form
#[derive(Debug, Serialize)]
pub struct SubscriptionFormView {
    pub title: String,
    pub heading: String,
    pub content: String,
    pub fields: Vec<PublicField>,
    pub mailing_lists: Vec<Choice>,
    pub submission_button_text: String,
    pub on_complete_message: Option<String>,
}

impl SubscriptionFormView {
    pub fn new(
        page: &SubscriptionPage,
        front_end_fields: &FieldList,
        mailing_lists: &[MailingList],
    ) -> Self {
        let required = page.required_field_names();
        let labels = page.custom_labels();
        let messages = page.validation_messages();

        let fields = page
            .frontend_field_list(front_end_fields)
            .iter()
            .filter_map(|field| {
                let name = field.name()?;
                Some(PublicField {
                    label: labels
                        .get(name)
                        .cloned()
                        .unwrap_or_else(|| field.label().to_string()),
                    required: required.iter().any(|r| r == name),
                    validation_message: messages.get(name).cloned(),
                    field: field.clone(),
                })
            })
            .collect();

        Self {
            title: page.page.title.clone(),
            heading: page
                .customised_heading
                .clone()
                .unwrap_or_else(|| page.page.title.clone()),
            content: page.page.content.clone(),
            fields,
            mailing_lists: mailing_lists
                .iter()
                .map(|list| Choice::new(list.id.to_string(), list.full_title()))
                .collect(),
            submission_button_text: page.submission_button_text.clone(),
            on_complete_message: page.on_complete_message.clone(),
        }
    }
}

/// Editing form of a subscription page
#[tracing::instrument(name = "Edit a subscription page", skip(pool, cms_settings))]
#[get("/{id}/edit")]
async fn edit(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    cms_settings: web::Data<CmsSettings>,
) -> RestResult<impl Responder> {
    let id = path.into_inner();
    let pool = pool.get_ref();

    let page = SubscriptionPageRepo::fetch_by_id(pool, id)
        .await?
        .ok_or_else(|| RestError::NotFound(format!("Subscription page {}", id)))?;

    let ctx = cms_settings.context(&Recipient, pool);
    let form = cms::subscription_page_fields(&page, &ctx).await?;

    Ok(HttpResponse::Ok().json(form))
}

/// Save the subscription settings of a page
#[tracing::instrument(name = "Update a subscription page", skip(pool, body))]
#[put("/{id}")]
async fn update(
    path: web::Path<Uuid>,
    body: web::Json<SubscriptionPageForm>,
    pool: web::Data<PgPool>,
) -> RestResult<impl Responder> {
    let id = path.into_inner();
    let pool = pool.get_ref();
    let form = body.into_inner();

    let known = MailingListRepo::fetch_by_ids(pool, form.mailing_list_ids()).await?;
    if let Some(unknown) = form
        .mailing_list_ids()
        .iter()
        .find(|list_id| !known.iter().any(|list| &list.id == *list_id))
    {
        return Err(RestError::ParseError(format!("Unknown mailing list {}", unknown)));
    }

    let settings = form.into_settings(&Recipient.front_end_fields())?;

    if !SubscriptionPageRepo::update_settings(pool, id, &settings).await? {
        return Err(RestError::NotFound(format!("Subscription page {}", id)));
    }

    Ok(HttpResponse::Ok())
}

/// Public subscription form of a published page
#[tracing::instrument(name = "Show a subscription form", skip(pool))]
#[get("/{url_segment}")]
async fn show(path: web::Path<String>, pool: web::Data<PgPool>) -> RestResult<impl Responder> {
    let url_segment = path.into_inner();
    let pool = pool.get_ref();

    let page = SubscriptionPageRepo::fetch_published_by_url_segment(pool, &url_segment)
        .await?
        .ok_or_else(|| RestError::NotFound(format!("Subscription page {}", url_segment)))?;

    let mailing_lists = MailingListRepo::fetch_by_ids(pool, &page.mailing_list_ids()).await?;
    let view = SubscriptionFormView::new(&page, &Recipient.front_end_fields(), &mailing_lists);

    Ok(HttpResponse::Ok().json(view))
}

/// CMS endpoints for subscription pages
pub fn admin_scope() -> impl HttpServiceFactory {
    web::scope("/admin/subscription-pages")
        .service(edit)
        .service(update)
}

/// Public subscription form endpoints
pub fn public_scope() -> impl HttpServiceFactory {
    web::scope("/subscribe").service(show)
}
