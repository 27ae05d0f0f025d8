use chrono::{DateTime, Utc};

use serde::Serialize;

use uuid::Uuid;

use crate::forms::{FieldList, FormField, Tab};

/// Columns every page type shares
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Page {
    pub id: Uuid,
    pub title: String,
    pub url_segment: String,
    pub content: String,
    pub show_in_menus: bool,
    /// `None` while the page is a draft
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Page {
    /// An unsaved draft page
    pub fn new(title: &str, url_segment: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            url_segment: url_segment.into(),
            content: String::new(),
            show_in_menus: true,
            published_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_published(&self) -> bool {
        self.published_at.is_some()
    }

    /// Base editing fields: a `Root` tab set with the `Main` tab
    pub fn cms_fields(&self) -> FieldList {
        let mut main = Tab::new("Main", "Main");
        main.push(FormField::text("Title", "Page name", Some(&self.title)));
        main.push(FormField::text("URLSegment", "URL segment", Some(&self.url_segment)));
        main.push(FormField::Checkbox {
            name: "ShowInMenus".into(),
            title: "Show in menus?".into(),
            value: self.show_in_menus,
        });
        main.push(FormField::HtmlEditor {
            name: "Content".into(),
            title: "Content".into(),
            value: Some(self.content.clone()),
        });

        let mut fields = FieldList::new();
        fields.add_tab("Root", main);
        fields
    }
}
