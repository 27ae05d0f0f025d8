use std::net::TcpListener;

use lazy_static::lazy_static;

use reqwest::{Client, Method, Response};

use serde_json::Value;

use sqlx::PgPool;

use url::Url;

use uuid::Uuid;

use subscription_page::app;
use subscription_page::cms::CmsSettings;
use subscription_page::i18n::Translations;
use subscription_page::model::NewSubscriptionPage;
use subscription_page::repo::SubscriptionPageRepo;
use subscription_page::telemetry::{create_subscriber, set_subscriber};

pub const ADMIN_LINK: &str = "http://127.0.0.1/admin/newsletter/mailing-lists";

lazy_static! {
    static ref TRACING: () = {
        let filter = "debug";
        // Set `TEST_LOG` to see application logs while testing
        if std::env::var("TEST_LOG").is_ok() {
            let subscriber = create_subscriber(filter, std::io::stdout);
            set_subscriber(subscriber).expect("Failed to set subscriber");
        } else {
            let subscriber = create_subscriber(filter, std::io::sink);
            set_subscriber(subscriber).expect("Failed to set subscriber");
        }
    };
}

pub struct TestApp {
    addr: String,

    pub client: Client,
    pub pool: PgPool,
}

impl TestApp {
    pub async fn spawn(pool: &PgPool) -> Self {
        lazy_static::initialize(&TRACING);

        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to listen on random port");
        let port = listener.local_addr().unwrap().port();

        let addr = format!("http://127.0.0.1:{}", port);

        let cms_settings = CmsSettings {
            translations: Translations::default(),
            days_verification_link_alive: 2,
            mailing_list_admin_link: Url::parse(ADMIN_LINK).expect("Failed to parse admin link"),
        };

        let server = app::run(listener, pool.clone(), cms_settings)
            .expect("Failed to spawn app instance");
        let _ = tokio::spawn(server);

        Self {
            addr,
            client: Client::new(),
            pool: pool.clone(),
        }
    }

    pub fn request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", &self.addr, url);
        self.client.request(method, url)
    }

    pub async fn health_check(&self) -> reqwest::Result<Response> {
        self.request(Method::GET, "health_check").send().await
    }

    pub async fn edit_form(&self, id: Uuid) -> reqwest::Result<Response> {
        self.request(Method::GET, &format!("admin/subscription-pages/{}/edit", id))
            .send()
            .await
    }

    pub async fn update_page(&self, id: Uuid, body: &Value) -> reqwest::Result<Response> {
        self.request(Method::PUT, &format!("admin/subscription-pages/{}", id))
            .json(body)
            .send()
            .await
    }

    pub async fn subscribe_form(&self, url_segment: &str) -> reqwest::Result<Response> {
        self.request(Method::GET, &format!("subscribe/{}", url_segment))
            .send()
            .await
    }

    /// Insert a page, publishing it when asked
    pub async fn create_page(&self, url_segment: &str, publish: bool) -> Uuid {
        let new_page = NewSubscriptionPage {
            title: "Join our newsletter".into(),
            url_segment: url_segment.into(),
            show_in_menus: true,
            send_notification: false,
        };
        let id = SubscriptionPageRepo::insert(&self.pool, &new_page)
            .await
            .expect("Failed to insert page")
            .expect("URL segment already taken");
        if publish {
            SubscriptionPageRepo::publish(&self.pool, id)
                .await
                .expect("Failed to publish page");
        }
        id
    }
}

/// Find a named node anywhere in a serialized field tree
pub fn find_field<'a>(tree: &'a Value, name: &str) -> Option<&'a Value> {
    match tree {
        Value::Object(map) => {
            if map.get("name").and_then(Value::as_str) == Some(name) && map.contains_key("type") {
                return Some(tree);
            }
            map.values().find_map(|value| find_field(value, name))
        }
        Value::Array(values) => values.iter().find_map(|value| find_field(value, name)),
        _ => None,
    }
}
