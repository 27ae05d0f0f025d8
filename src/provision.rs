use sqlx::PgPool;

use uuid::Uuid;

use crate::model::NewSubscriptionPage;
use crate::repo::SubscriptionPageRepo;

/// Create and publish the default subscription page on a fresh site.
///
/// Does nothing when default pages are disabled or any subscription page
/// already exists. Returns the id of the page it created.
#[tracing::instrument(name = "Provision default subscription page", skip(pool))]
pub async fn require_default_records(
    pool: &PgPool,
    create_default_pages: bool,
) -> sqlx::Result<Option<Uuid>> {
    if !create_default_pages {
        return Ok(None);
    }

    let mut tx = pool.begin().await?;

    if SubscriptionPageRepo::count(&mut *tx).await? > 0 {
        return Ok(None);
    }

    // A concurrent provisioner may have claimed the URL segment first
    let id = match SubscriptionPageRepo::insert(&mut *tx, &NewSubscriptionPage::default_page())
        .await?
    {
        Some(id) => id,
        None => return Ok(None),
    };
    SubscriptionPageRepo::publish(&mut *tx, id).await?;

    tx.commit().await?;

    tracing::info!(page.id = %id, "Newsletter subscription page created");
    Ok(Some(id))
}
