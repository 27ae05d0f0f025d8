use sqlx::{PgExecutor, PgPool};

use uuid::Uuid;

use crate::error::Result;
use crate::model::{MailingList, MailingListSource};

/// Repository for the `mailing_lists` table
pub struct MailingListRepo;

impl MailingListRepo {
    #[tracing::instrument(name = "Insert mailing list", skip(executor))]
    pub async fn insert<'con>(executor: impl PgExecutor<'con>, title: &str) -> sqlx::Result<Uuid> {
        sqlx::query_scalar::<_, Uuid>("insert into mailing_lists(title) values ($1) returning id")
            .bind(title)
            .fetch_one(executor)
            .await
    }

    #[tracing::instrument(name = "Fetch all mailing lists", skip(executor))]
    pub async fn fetch_all<'con>(
        executor: impl PgExecutor<'con>,
    ) -> sqlx::Result<Vec<MailingList>> {
        sqlx::query_as::<_, MailingList>(
            "select id, title, created_at from mailing_lists order by title, created_at",
        )
        .fetch_all(executor)
        .await
    }

    #[tracing::instrument(name = "Fetch mailing lists by id", skip(executor))]
    pub async fn fetch_by_ids<'con>(
        executor: impl PgExecutor<'con>,
        ids: &[Uuid],
    ) -> sqlx::Result<Vec<MailingList>> {
        sqlx::query_as::<_, MailingList>(
            "select id, title, created_at from mailing_lists where id = any($1) order by title, created_at",
        )
        .bind(ids)
        .fetch_all(executor)
        .await
    }
}

#[async_trait::async_trait]
impl MailingListSource for PgPool {
    async fn mailing_lists(&self) -> Result<Vec<MailingList>> {
        Ok(MailingListRepo::fetch_all(self).await?)
    }
}
