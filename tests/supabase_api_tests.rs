// Wire-level tests for the Supabase client against a mock PostgREST server

use carmatch::models::CarFilter;
use carmatch::services::supabase::{SupabaseClient, SupabaseError, SupabaseTables};
use mockito::Matcher;

fn client_for(server: &mockito::ServerGuard) -> SupabaseClient {
    SupabaseClient::new(
        server.url(),
        "test-service-key".to_string(),
        SupabaseTables {
            cars: "cars".to_string(),
            car_requests: "car_requests".to_string(),
            admins: "admins".to_string(),
        },
    )
}

#[tokio::test]
async fn test_latest_request_parses_first_row() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/rest/v1/car_requests")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("user_id".into(), "eq.u1".into()),
            Matcher::UrlEncoded("order".into(), "created_at.desc".into()),
            Matcher::UrlEncoded("limit".into(), "1".into()),
        ]))
        .match_header("apikey", "test-service-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[{
                "id": "r1",
                "user_id": "u1",
                "first_name": "Dana",
                "last_name": "Reyes",
                "email": "dana@example.com",
                "make": "Toyota",
                "model": "Corolla",
                "year": 2021,
                "max_price": 25000,
                "status": "pending",
                "created_at": "2026-08-01T10:00:00Z"
            }]"#,
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let request = client.latest_request_for("u1").await.unwrap();

    mock.assert_async().await;

    let request = request.expect("expected a request");
    assert_eq!(request.id, "r1");
    assert_eq!(request.make, "Toyota");
    assert_eq!(request.max_price, Some(25_000.0));
}

#[tokio::test]
async fn test_latest_request_none_on_empty() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/rest/v1/car_requests")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;

    let client = client_for(&server);
    let request = client.latest_request_for("nobody").await.unwrap();

    assert!(request.is_none());
}

#[tokio::test]
async fn test_visible_cars_pushes_down_filters() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/rest/v1/cars")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("is_visible".into(), "eq.true".into()),
            Matcher::UrlEncoded("make".into(), "eq.Toyota".into()),
            Matcher::UrlEncoded("price".into(), "lte.30000".into()),
            Matcher::UrlEncoded("order".into(), "is_featured.desc,created_at.desc".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[{
                "id": "c1",
                "make": "Toyota",
                "model": "Corolla",
                "year": 2021,
                "price": 24000,
                "is_visible": true,
                "is_featured": false
            }]"#,
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let filter = CarFilter {
        make: Some("Toyota".to_string()),
        max_price: Some(30_000.0),
        ..Default::default()
    };

    let cars = client.visible_cars(&filter, None).await.unwrap();

    mock.assert_async().await;
    assert_eq!(cars.len(), 1);
    assert_eq!(cars[0].id, "c1");
}

#[tokio::test]
async fn test_missing_car_maps_to_not_found() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/rest/v1/cars")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;

    let client = client_for(&server);
    let result = client.get_visible_car("ghost").await;

    assert!(matches!(result, Err(SupabaseError::NotFound(_))));
}

#[tokio::test]
async fn test_unauthorized_status_maps_to_unauthorized() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/rest/v1/cars")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body(r#"{"message": "bad key"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let result = client.visible_cars(&CarFilter::default(), None).await;

    assert!(matches!(result, Err(SupabaseError::Unauthorized)));
}
