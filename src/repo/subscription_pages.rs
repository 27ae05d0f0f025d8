use sqlx::PgExecutor;

use uuid::Uuid;

use crate::model::{NewSubscriptionPage, SubscriptionPage, SubscriptionSettings};

const COLUMNS: &str = "id, title, url_segment, content, show_in_menus, published_at, \
    created_at, updated_at, fields, required, customised_heading, custom_label, \
    validation_message, mailing_lists, submission_button_text, send_notification, \
    notification_email_subject, notification_email_from, on_complete_message";

/// Repository for the `subscription_pages` table
pub struct SubscriptionPageRepo;

impl SubscriptionPageRepo {
    #[tracing::instrument(name = "Count subscription pages", skip(executor))]
    pub async fn count<'con>(executor: impl PgExecutor<'con>) -> sqlx::Result<i64> {
        sqlx::query_scalar::<_, i64>("select count(*) from subscription_pages")
            .fetch_one(executor)
            .await
    }

    /// Insert a draft page; `None` when the URL segment is already taken
    #[tracing::instrument(name = "Insert subscription page", skip(executor))]
    pub async fn insert<'con>(
        executor: impl PgExecutor<'con>,
        new_page: &NewSubscriptionPage,
    ) -> sqlx::Result<Option<Uuid>> {
        sqlx::query_scalar::<_, Uuid>(
            r#"
            insert into subscription_pages(title, url_segment, show_in_menus, send_notification)
            values ($1, $2, $3, $4)
            on conflict (url_segment) do nothing
            returning id
            "#,
        )
        .bind(&new_page.title)
        .bind(&new_page.url_segment)
        .bind(new_page.show_in_menus)
        .bind(new_page.send_notification)
        .fetch_optional(executor)
        .await
    }

    #[tracing::instrument(name = "Publish subscription page", skip(executor))]
    pub async fn publish<'con>(executor: impl PgExecutor<'con>, id: Uuid) -> sqlx::Result<bool> {
        let result = sqlx::query(
            "update subscription_pages set published_at = now(), updated_at = now() where id = $1",
        )
        .bind(id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    #[tracing::instrument(name = "Fetch subscription page by id", skip(executor))]
    pub async fn fetch_by_id<'con>(
        executor: impl PgExecutor<'con>,
        id: Uuid,
    ) -> sqlx::Result<Option<SubscriptionPage>> {
        sqlx::query_as::<_, SubscriptionPage>(&format!(
            "select {} from subscription_pages where id = $1",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(executor)
        .await
    }

    #[tracing::instrument(name = "Fetch published subscription page", skip(executor))]
    pub async fn fetch_published_by_url_segment<'con>(
        executor: impl PgExecutor<'con>,
        url_segment: &str,
    ) -> sqlx::Result<Option<SubscriptionPage>> {
        sqlx::query_as::<_, SubscriptionPage>(&format!(
            "select {} from subscription_pages where url_segment = $1 and published_at is not null",
            COLUMNS
        ))
        .bind(url_segment)
        .fetch_optional(executor)
        .await
    }

    /// Save the subscription settings of a page; `false` when no such page exists
    #[tracing::instrument(name = "Update subscription settings", skip(executor, settings))]
    pub async fn update_settings<'con>(
        executor: impl PgExecutor<'con>,
        id: Uuid,
        settings: &SubscriptionSettings,
    ) -> sqlx::Result<bool> {
        let result = sqlx::query(
            r#"
            update subscription_pages set
                customised_heading = $2,
                fields = $3,
                required = $4,
                custom_label = $5,
                validation_message = $6,
                mailing_lists = $7,
                submission_button_text = $8,
                send_notification = $9,
                notification_email_subject = $10,
                notification_email_from = $11,
                on_complete_message = $12,
                updated_at = now()
            where id = $1
            "#,
        )
        .bind(id)
        .bind(&settings.customised_heading)
        .bind(&settings.fields)
        .bind(&settings.required)
        .bind(&settings.custom_label)
        .bind(&settings.validation_message)
        .bind(&settings.mailing_lists)
        .bind(&settings.submission_button_text)
        .bind(settings.send_notification)
        .bind(&settings.notification_email_subject)
        .bind(settings.notification_email_from.as_ref().map(|e| e.as_ref().to_string()))
        .bind(&settings.on_complete_message)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
