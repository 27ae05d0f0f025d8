use reqwest::StatusCode;

use serde_json::{json, Value};

use sqlx::PgPool;

use uuid::Uuid;

use subscription_page::repo::{MailingListRepo, SubscriptionPageRepo};

use crate::helpers::{find_field, TestApp, ADMIN_LINK};

#[sqlx::test]
async fn edit_form_is_served_for_existing_pages(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;
    let id = app.create_page("join", false).await;

    let res = app.edit_form(id).await.expect("Failed to execute request");
    assert_eq!(StatusCode::OK, res.status());

    let body: Value = res.json().await.expect("Failed to parse response");
    assert_eq!(
        json!(["client/javascript/SubscriptionPage.js"]),
        body["requirements"]["javascript"]
    );
    assert_eq!(json!(["client/css/SubscriptionPage.css"]), body["requirements"]["css"]);

    let fields = find_field(&body["fields"], "Fields").expect("Fields control is missing");
    assert_eq!("checkbox_set_with_extra", fields["type"]);
    assert_eq!(json!(["Email"]), fields["checked"]);
    assert_eq!(json!(["Value", "Required"]), fields["disabled_cells"]["Email"]);

    let no_lists = find_field(&body["fields"], "NoMailingList").expect("Literal is missing");
    assert!(no_lists["content"].as_str().unwrap().contains(ADMIN_LINK));

    Ok(())
}

#[sqlx::test]
async fn edit_form_offers_existing_mailing_lists(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;
    let id = app.create_page("join", false).await;
    let weekly = MailingListRepo::insert(&pool, "Weekly").await?;

    let body: Value = app
        .edit_form(id)
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");

    let lists = find_field(&body["fields"], "MailingLists").expect("Mailing lists are missing");
    assert_eq!(
        json!([{ "value": weekly.to_string(), "label": "Weekly" }]),
        lists["source"]
    );
    assert!(find_field(&body["fields"], "NoMailingList").is_none());

    Ok(())
}

#[sqlx::test]
async fn edit_form_for_unknown_page_is_not_found(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    let res = app
        .edit_form(Uuid::new_v4())
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::NOT_FOUND, res.status());

    Ok(())
}

#[sqlx::test]
async fn saving_persists_normalized_settings(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;
    let id = app.create_page("join", false).await;
    let weekly = MailingListRepo::insert(&pool, "Weekly").await?;

    let body = json!({
        "customised_heading": "Stay in touch",
        "fields": [
            { "name": "Surname", "required": true, "custom_label": "Family name" },
            { "name": "FirstName" }
        ],
        "mailing_lists": [weekly],
        "send_notification": true,
        "notification_email_subject": "Welcome",
        "notification_email_from": "News@Example.com"
    });
    let res = app
        .update_page(id, &body)
        .await
        .expect("Failed to execute request");
    assert_eq!(StatusCode::OK, res.status());

    let page = SubscriptionPageRepo::fetch_by_id(&pool, id)
        .await?
        .expect("Page is missing");
    assert_eq!(Some("Surname,FirstName,Email"), page.fields.as_deref());
    assert_eq!(vec!["Email", "Surname"], page.required_field_names());
    assert_eq!(vec![weekly], page.mailing_list_ids());
    assert_eq!(Some("news@example.com"), page.notification_email_from.as_deref());
    assert!(page.send_notification);

    Ok(())
}

#[sqlx::test]
async fn saving_rejects_invalid_values(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;
    let id = app.create_page("join", false).await;

    let test_cases = vec![
        json!({ "fields": [{ "name": "FavouriteColour" }] }),
        json!({ "notification_email_from": "not an email" }),
        json!({ "mailing_lists": [Uuid::new_v4()] }),
    ];

    for body in test_cases {
        let res = app
            .update_page(id, &body)
            .await
            .expect("Failed to execute request");

        assert_eq!(StatusCode::BAD_REQUEST, res.status(), "body was {}", body);
    }

    Ok(())
}

#[sqlx::test]
async fn saving_an_unknown_page_is_not_found(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    let res = app
        .update_page(Uuid::new_v4(), &json!({}))
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::NOT_FOUND, res.status());

    Ok(())
}

#[sqlx::test]
async fn public_form_is_only_served_for_published_pages(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;
    app.create_page("draft", false).await;
    app.create_page("live", true).await;

    let draft = app
        .subscribe_form("draft")
        .await
        .expect("Failed to execute request");
    assert_eq!(StatusCode::NOT_FOUND, draft.status());

    let missing = app
        .subscribe_form("missing")
        .await
        .expect("Failed to execute request");
    assert_eq!(StatusCode::NOT_FOUND, missing.status());

    let live = app
        .subscribe_form("live")
        .await
        .expect("Failed to execute request");
    assert_eq!(StatusCode::OK, live.status());

    let body: Value = live.json().await.expect("Failed to parse response");
    assert_eq!("Join our newsletter", body["heading"]);
    assert_eq!("Submit", body["submission_button_text"]);
    assert_eq!(1, body["fields"].as_array().unwrap().len());
    assert_eq!("Email", body["fields"][0]["field"]["name"]);
    assert_eq!(true, body["fields"][0]["required"]);

    Ok(())
}
