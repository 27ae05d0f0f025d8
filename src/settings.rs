use std::collections::HashMap;
use std::env;
use std::path::Path;

use anyhow::Context;

use config::{Config, Environment, File};

use secrecy::Secret;

use serde::Deserialize;
use serde_aux::prelude::*;

use sqlx::postgres::{PgConnectOptions, PgSslMode};

use url::Url;

use crate::cms::CmsSettings;
use crate::i18n::Translations;

/// Shortest verification link validity the page will ever advertise, in days
pub const MIN_DAYS_VERIFICATION_LINK_ALIVE: u32 = 2;

/// Runtime environment, either `Dev` for local development, or `Prod` for release
#[derive(Debug)]
pub enum Runtime {
    Dev,
    Prod,
}

impl Runtime {
    pub fn as_str(&self) -> &str {
        match self {
            Runtime::Dev => "dev",
            Runtime::Prod => "prod",
        }
    }
}

impl TryFrom<String> for Runtime {
    type Error = anyhow::Error;

    fn try_from(s: String) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "dev" => Ok(Self::Dev),
            "prod" => Ok(Self::Prod),
            other => anyhow::bail!("{} is not a valid runtime environment", other),
        }
    }
}

/// Application settings wrapper
#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: ApplicationSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub newsletter: NewsletterSettings,
    #[serde(default)]
    pub i18n: I18nSettings,
}

impl Settings {
    /// Load application settings from the settings directory
    pub fn load() -> anyhow::Result<Self> {
        let path = env::current_dir()?.join("settings");
        // `APP_ENV` picks the runtime, `Dev` when unset
        let runtime: Runtime = env::var("APP_ENV")
            .unwrap_or_else(|_| "dev".into())
            .try_into()?;

        Self::load_from(runtime, &path)
    }
    /// Load application settings from a specified path and runtime
    pub fn load_from(runtime: Runtime, base_path: &Path) -> anyhow::Result<Self> {
        Config::builder()
            .add_source(File::from(base_path.join("base")).required(true))
            .add_source(File::from(base_path.join(runtime.as_str())).required(true))
            // Environment overrides take the form `APP_<section>__<setting>`
            .add_source(
                Environment::with_prefix("app")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
            .context("Failed to load/deserialize settings")
    }

    /// Link to the mailing list administration screen
    pub fn mailing_list_admin_link(&self) -> anyhow::Result<Url> {
        self.app
            .base_url()?
            .join(self.newsletter.mailing_list_admin_path.trim_start_matches('/'))
            .context("Failed to build mailing list admin link")
    }

    /// Settings the CMS editing form is assembled with
    pub fn cms_settings(&self) -> anyhow::Result<CmsSettings> {
        Ok(CmsSettings {
            translations: self.i18n.translations(),
            days_verification_link_alive: self.newsletter.days_verification_link_alive(),
            mailing_list_admin_link: self.mailing_list_admin_link()?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ApplicationSettings {
    host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    port: u16,

    base_url: String,
}

impl ApplicationSettings {
    /// The application address to bind to
    pub fn addr(&self) -> (&str, u16) {
        (&self.host, self.port)
    }
    /// Public base URL, always ending in a slash so relative links nest under it
    pub fn base_url(&self) -> anyhow::Result<Url> {
        let mut base_url = self.base_url.clone();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Url::parse(&base_url).with_context(|| format!("Invalid base URL {}", self.base_url))
    }
}

#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    port: u16,
    host: String,
    name: String,
    username: String,
    password: Secret<String>,
    require_ssl: bool,
}

impl DatabaseSettings {
    /// The database connection options, without specifying the database name
    pub fn without_db(&self) -> PgConnectOptions {
        use secrecy::ExposeSecret;

        let ssl_mode = if self.require_ssl {
            PgSslMode::Require
        } else {
            PgSslMode::Prefer
        };

        PgConnectOptions::new()
            .port(self.port)
            .host(&self.host)
            .ssl_mode(ssl_mode)
            .username(&self.username)
            .password(self.password.expose_secret())
    }
    /// The database connection options, with the database name
    pub fn with_db(&self) -> PgConnectOptions {
        self.without_db().database(&self.name)
    }
}

#[derive(Debug, Deserialize)]
pub struct NewsletterSettings {
    #[serde(
        default = "default_days_verification_link_alive",
        deserialize_with = "deserialize_number_from_string"
    )]
    days_verification_link_alive: u32,
    #[serde(
        default = "default_create_default_pages",
        deserialize_with = "deserialize_bool_from_anything"
    )]
    pub create_default_pages: bool,
    #[serde(default = "default_mailing_list_admin_path")]
    pub mailing_list_admin_path: String,
}

impl NewsletterSettings {
    /// Days a verification link stays valid, never less than two
    pub fn days_verification_link_alive(&self) -> u32 {
        self.days_verification_link_alive
            .max(MIN_DAYS_VERIFICATION_LINK_ALIVE)
    }
}

impl Default for NewsletterSettings {
    fn default() -> Self {
        Self {
            days_verification_link_alive: default_days_verification_link_alive(),
            create_default_pages: default_create_default_pages(),
            mailing_list_admin_path: default_mailing_list_admin_path(),
        }
    }
}

fn default_days_verification_link_alive() -> u32 {
    MIN_DAYS_VERIFICATION_LINK_ALIVE
}

fn default_create_default_pages() -> bool {
    true
}

fn default_mailing_list_admin_path() -> String {
    "admin/newsletter/mailing-lists".into()
}

/// Translation overrides, `namespace -> entity -> text`
#[derive(Debug, Default, Deserialize)]
pub struct I18nSettings {
    #[serde(default)]
    overrides: HashMap<String, HashMap<String, String>>,
}

impl I18nSettings {
    pub fn translations(&self) -> Translations {
        Translations::new(self.overrides.clone())
    }
}
