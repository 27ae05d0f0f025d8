use std::net::TcpListener;

use anyhow::Context;

use sqlx::PgPool;

use subscription_page::settings::Settings;
use subscription_page::{app, provision, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = telemetry::create_subscriber("info", std::io::stdout);
    telemetry::set_subscriber(subscriber)?;

    let settings = Settings::load()?;
    let cms_settings = settings.cms_settings()?;

    let pool = PgPool::connect_with(settings.database.with_db())
        .await
        .context("Failed to connect to the database")?;

    sqlx::migrate!()
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    provision::require_default_records(&pool, settings.newsletter.create_default_pages)
        .await
        .context("Failed to provision default content")?;

    let listener = TcpListener::bind(settings.app.addr())?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    app::run(listener, pool, cms_settings)?
        .await
        .context("Failed to run app")
}
