#![allow(clippy::unwrap_used)]
// Integration tests for `ApartmentClient` using wiremock.

use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use roost_api::{ApartmentBody, ApartmentClient, Error, PriceSort};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApartmentClient) {
    let server = MockServer::start().await;
    let client = ApartmentClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

fn body(name: &str, rooms: i64, price: f64) -> ApartmentBody {
    ApartmentBody {
        name: name.into(),
        rooms,
        price,
        description: String::new(),
    }
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_list_apartments_sends_sort_without_rooms() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/apartments"))
        .and(query_param("priceSort", "asc"))
        .and(query_param_is_missing("rooms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "a", "name": "Studio", "rooms": 1, "price": 300, "description": "" },
            { "id": "b", "name": "Flat", "rooms": 2, "price": 650.5, "description": "balcony" },
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let list = client.list_apartments(PriceSort::Asc, None).await.unwrap();

    assert_eq!(list.len(), 2);
    assert_eq!(list[0].id, "a");
    assert_eq!(list[1].description, "balcony");
}

#[tokio::test]
async fn test_list_apartments_with_rooms_filter() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/apartments"))
        .and(query_param("priceSort", "desc"))
        .and(query_param("rooms", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "b", "name": "Flat", "rooms": 2, "price": 650, "description": "" },
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let list = client.list_apartments(PriceSort::Desc, Some(2)).await.unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].rooms, 2);
}

#[tokio::test]
async fn test_base_url_with_prefix_path() {
    let server = MockServer::start().await;
    let client =
        ApartmentClient::from_reqwest(&format!("{}/api/v1", server.uri()), reqwest::Client::new())
            .unwrap();

    Mock::given(method("GET"))
        .and(path("/api/v1/apartments/xyz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "xyz", "name": "Loft", "rooms": 3, "price": 1200, "description": "river view"
        })))
        .mount(&server)
        .await;

    let apt = client.get_apartment("xyz").await.unwrap();
    assert_eq!(apt.name, "Loft");
    assert!(client.base_url().as_str().ends_with("/api/v1/"));
}

#[tokio::test]
async fn test_create_apartment_posts_draft() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/apartments"))
        .and(body_json(json!({
            "name": "Studio", "rooms": 1, "price": 300.0, "description": ""
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "new-1", "name": "Studio", "rooms": 1, "price": 300, "description": ""
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = client.create_apartment(&body("Studio", 1, 300.0)).await.unwrap();
    assert_eq!(created.id, "new-1");
}

#[tokio::test]
async fn test_update_apartment_puts_to_item() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/apartments/a"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "a", "name": "Renamed", "rooms": 1, "price": 350, "description": ""
        })))
        .expect(1)
        .mount(&server)
        .await;

    let updated = client
        .update_apartment("a", &body("Renamed", 1, 350.0))
        .await
        .unwrap();
    assert_eq!(updated.name, "Renamed");
}

#[tokio::test]
async fn test_delete_accepts_204_and_200() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/apartments/a"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/apartments/b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(true)))
        .mount(&server)
        .await;

    client.delete_apartment("a").await.unwrap();
    client.delete_apartment("b").await.unwrap();
}

#[tokio::test]
async fn test_item_id_is_percent_encoded() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/apartments/a%2Fb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "a/b", "name": "Odd", "rooms": 1, "price": 1, "description": ""
        })))
        .mount(&server)
        .await;

    let apt = client.get_apartment("a/b").await.unwrap();
    assert_eq!(apt.id, "a/b");
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/apartments/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Apartment not found" })))
        .mount(&server)
        .await;

    let err = client.delete_apartment("gone").await.unwrap_err();
    assert!(err.is_not_found(), "expected not found, got: {err:?}");
    match err {
        Error::Api { status, messages } => {
            assert_eq!(status, 404);
            assert_eq!(messages, vec!["Apartment not found".to_owned()]);
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_validation_rejection_array_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/apartments"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!([
            "name should not be empty",
            "price must be a positive number"
        ])))
        .mount(&server)
        .await;

    let err = client.create_apartment(&body("", 1, 0.0)).await.unwrap_err();
    match err {
        Error::Api { status, messages } => {
            assert_eq!(status, 400);
            assert_eq!(messages.len(), 2);
            assert_eq!(messages[1], "price must be a positive number");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_success_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/apartments"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client.list_apartments(PriceSort::Asc, None).await.unwrap_err();
    assert!(
        matches!(err, Error::Deserialization { ref body, .. } if body.contains("oops")),
        "expected Deserialization error, got: {err:?}"
    );
}

#[tokio::test]
async fn test_connection_refused_is_unreachable() {
    // Bind then drop a listener so the port is known to be closed.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client =
        ApartmentClient::from_reqwest(&format!("http://127.0.0.1:{port}"), reqwest::Client::new())
            .unwrap();

    let err = client.list_apartments(PriceSort::Asc, None).await.unwrap_err();
    assert!(err.is_unreachable(), "expected unreachable, got: {err:?}");
    assert_eq!(err.status(), None);
}

#[test]
fn test_invalid_base_url() {
    let result = ApartmentClient::from_reqwest("not a url", reqwest::Client::new());
    assert!(matches!(result, Err(Error::InvalidUrl(_))));
}
