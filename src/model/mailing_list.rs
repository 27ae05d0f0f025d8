use chrono::{DateTime, Utc};

use serde::Serialize;

use uuid::Uuid;

use crate::error::Result;

/// A named collection recipients can opt into
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct MailingList {
    pub id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

impl MailingList {
    pub fn new(title: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            created_at: Utc::now(),
        }
    }

    /// Label shown when offering the list for subscription
    pub fn full_title(&self) -> &str {
        &self.title
    }
}

/// Enumerates the mailing lists a page may offer
#[async_trait::async_trait]
pub trait MailingListSource: Send + Sync {
    async fn mailing_lists(&self) -> Result<Vec<MailingList>>;
}

#[async_trait::async_trait]
impl MailingListSource for Vec<MailingList> {
    async fn mailing_lists(&self) -> Result<Vec<MailingList>> {
        Ok(self.clone())
    }
}
