use std::sync::Arc;

use palate_core::{MatchRequest, MatchType, NewRestaurant, RestaurantStore, StoreError};
use palate_hasura::{HasuraClient, HasuraError, HasuraRestaurantStore};
use palate_resolver::ResolutionService;
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer, secret: Option<&str>) -> HasuraClient {
    HasuraClient::new(&format!("{}/v1/graphql", server.uri()), secret, 5)
        .expect("client construction should not fail")
        .with_retry(2, 0)
}

fn row(id: &str, external_id: &str, title: &str, lat: f64, lng: f64) -> Value {
    json!({
        "id": id,
        "external_id": external_id,
        "title": title,
        "slug": "joes-diner",
        "address": "12 Main St, Springfield, IL",
        "city": "Springfield",
        "state": "IL",
        "postal_code": null,
        "country": "US",
        "latitude": lat,
        "longitude": lng,
        "image_url": null,
        "price_level": 2,
        "rating": 4.5,
        "review_count": 31,
        "created_at": "2025-03-01T12:00:00+00:00"
    })
}

#[tokio::test]
async fn find_by_external_id_sends_secret_and_maps_row() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/graphql"))
        .and(header("x-hasura-admin-secret", "s3cret"))
        .and(body_partial_json(json!({ "variables": { "externalId": "abc123" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "restaurants": [row(
                "7f1c5a52-6a7e-4c3e-9d3f-2b1d1c1e0a01", "abc123", "Joe's Diner", 39.78, -89.65
            )] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = HasuraRestaurantStore::new(test_client(&server, Some("s3cret")));
    let record = store
        .find_by_external_id("abc123")
        .await
        .expect("lookup should succeed")
        .expect("record should be returned");

    assert_eq!(record.external_id.as_deref(), Some("abc123"));
    assert_eq!(record.title, "Joe's Diner");
    assert_eq!(record.coordinates(), Some((39.78, -89.65)));
    assert_eq!(record.review_count, 31);
    assert_eq!(record.rating.map(|r| r.to_string()).as_deref(), Some("4.5"));
}

#[tokio::test]
async fn empty_result_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "restaurants": [] } })),
        )
        .mount(&server)
        .await;

    let store = HasuraRestaurantStore::new(test_client(&server, None));
    let found = store
        .find_by_external_id("missing")
        .await
        .expect("lookup should succeed");
    assert!(found.is_none());
}

#[tokio::test]
async fn search_passes_ilike_patterns() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "variables": { "title": "%Joe's Diner%", "address": "%12 Main St%" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "restaurants": [row(
                "7f1c5a52-6a7e-4c3e-9d3f-2b1d1c1e0a02", "x1", "Joe's Diner Downtown", 39.78, -89.65
            )] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = HasuraRestaurantStore::new(test_client(&server, None));
    let rows = store
        .search_by_name_and_address("%Joe's Diner%", "%12 Main St%")
        .await
        .expect("search should succeed");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "Joe's Diner Downtown");
}

#[tokio::test]
async fn graphql_errors_surface_as_graphql_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [{ "message": "field 'restaurants' not found in type: 'query_root'" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server, None);
    let err = client
        .execute::<Value, _>("Probe", "query Probe { restaurants { id } }", &json!({}))
        .await
        .unwrap_err();
    match err {
        HasuraError::GraphQl(message) => assert!(message.contains("not found")),
        other => panic!("expected GraphQl error, got {other:?}"),
    }
}

#[tokio::test]
async fn retries_server_errors_then_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "restaurants": [] } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let store = HasuraRestaurantStore::new(test_client(&server, None));
    let rows = store
        .list_with_coordinates()
        .await
        .expect("second attempt should succeed");
    assert!(rows.is_empty());
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400))
        .expect(1)
        .mount(&server)
        .await;

    let store = HasuraRestaurantStore::new(test_client(&server, None));
    assert!(store.list_with_coordinates().await.is_err());
}

#[tokio::test]
async fn insert_sends_object_and_returns_record() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "variables": { "object": {
                "external_id": "new-1",
                "title": "Joe's Diner",
                "slug": "joes-diner",
                "latitude": 39.78
            } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "insert_restaurants_one": row(
                "7f1c5a52-6a7e-4c3e-9d3f-2b1d1c1e0a03", "new-1", "Joe's Diner", 39.78, -89.65
            ) }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = HasuraRestaurantStore::new(test_client(&server, None));
    let record = store
        .insert(&NewRestaurant {
            external_id: Some("new-1".to_string()),
            title: "Joe's Diner".to_string(),
            latitude: Some(39.78),
            longitude: Some(-89.65),
            ..NewRestaurant::default()
        })
        .await
        .expect("insert should succeed");
    assert_eq!(record.external_id.as_deref(), Some("new-1"));
}

#[tokio::test]
async fn uniqueness_violation_on_insert_is_a_conflict() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [{
                "message": "Uniqueness violation. duplicate key value violates unique constraint \"restaurants_external_id_key\"",
                "extensions": { "path": "$.selectionSet.insert_restaurants_one.args.object", "code": "constraint-violation" }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = HasuraRestaurantStore::new(test_client(&server, None));
    let result = store
        .insert(&NewRestaurant {
            external_id: Some("dup-1".to_string()),
            title: "Joe's Diner".to_string(),
            ..NewRestaurant::default()
        })
        .await;
    match result {
        Err(StoreError::Conflict(message)) => assert!(message.contains("Uniqueness violation")),
        other => panic!("expected Conflict, got {other:?}"),
    }
}

#[tokio::test]
async fn ping_round_trips_typename() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "query": "query Ping { __typename }" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": { "__typename": "query_root" } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let store = HasuraRestaurantStore::new(test_client(&server, None));
    store.ping().await.expect("ping should succeed");
}

#[tokio::test]
async fn resolver_matches_through_hasura() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "variables": { "externalId": "abc123" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "restaurants": [row(
                "7f1c5a52-6a7e-4c3e-9d3f-2b1d1c1e0a04", "abc123", "Joe's Diner", 39.78, -89.65
            )] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = HasuraRestaurantStore::new(test_client(&server, None));
    let service = ResolutionService::new(Arc::new(store));
    let result = service
        .resolve(MatchRequest {
            place_id: Some("abc123".to_string()),
            latitude: Some(39.78),
            longitude: Some(-89.65),
            ..MatchRequest::default()
        })
        .await
        .expect("resolve should succeed");

    assert!(result.matched());
    assert_eq!(result.match_type(), MatchType::ExternalId);
}
