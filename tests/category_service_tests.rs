use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use reader_client::services::{category_color, category_name};
use reader_client::{ApiError, Category, ClientConfig, ReaderClient};

fn client_for(server: &MockServer) -> ReaderClient {
    ReaderClient::new(&ClientConfig::new(server.uri()))
}

fn category(id: i64, name: &str, color: &str) -> Category {
    Category {
        id,
        name: name.to_string(),
        color: color.to_string(),
    }
}

#[tokio::test]
async fn load_categories_replaces_the_container() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"ID": 1, "Name": "News", "Color": "#ff0000"},
            {"ID": 2, "Name": "Tech", "Color": "#00ff00"},
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let loaded = client.categories.load_categories().await.unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(client.state.categories.get()[1].name, "Tech");
}

#[tokio::test]
async fn create_appends_with_the_default_color() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/categories"))
        .and(body_json(json!({"name": "News", "color": "#3b82f6"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"ID": 3, "Name": "News", "Color": "#3b82f6"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.state.categories.set(vec![category(1, "Old", "#111111")]);

    let created = client.categories.create_category("News", None).await.unwrap();
    assert_eq!(created.id, 3);

    let categories = client.state.categories.get();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[1].id, 3, "created category is appended");
}

#[tokio::test]
async fn create_rejects_blank_names_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/categories"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.categories.create_category("  ", None).await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));
}

#[tokio::test]
async fn update_patches_the_matching_category_in_place() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/categories"))
        .and(query_param("id", "2"))
        .and(query_param("name", "Renamed"))
        .and(query_param("color", "#123456"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.state.categories.set(vec![
        category(1, "News", "#ff0000"),
        category(2, "Tech", "#00ff00"),
    ]);

    client
        .categories
        .update_category(2, "Renamed", "#123456")
        .await
        .unwrap();

    let categories = client.state.categories.get();
    assert_eq!(categories[0], category(1, "News", "#ff0000"));
    assert_eq!(categories[1], category(2, "Renamed", "#123456"));
}

#[tokio::test]
async fn delete_drops_exactly_that_category() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/categories"))
        .and(query_param("id", "1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.state.categories.set(vec![
        category(1, "News", "#ff0000"),
        category(2, "Tech", "#00ff00"),
    ]);

    client.categories.delete_category(1).await.unwrap();
    assert_eq!(
        client.state.categories.get(),
        vec![category(2, "Tech", "#00ff00")]
    );
}

#[tokio::test]
async fn failed_load_sets_the_category_error_slot() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/categories"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.state.categories.set(vec![category(1, "Kept", "#111111")]);

    client.categories.load_categories().await.unwrap_err();
    assert_eq!(client.state.categories.get().len(), 1);
    assert!(client.state.errors.categories.get().is_some());
    assert!(!client.state.loading.categories.get());
}

#[test]
fn lookups_fall_back_for_missing_and_dangling_references() {
    let categories = vec![category(1, "News", "#ff0000")];

    assert_eq!(category_name(Some(1), &categories), "News");
    assert_eq!(category_name(None, &categories), "Uncategorized");
    assert_eq!(category_name(Some(99), &categories), "Unknown Category");

    assert_eq!(category_color(Some(1), &categories), "#ff0000");
    assert_eq!(category_color(None, &categories), "#64748b");
    assert_eq!(category_color(Some(99), &categories), "#64748b");
}
