use googlecore::{
    collect_pages, Arguments, ClientConfig, ErrorKind, GoogleApiClient, GoogleCoreError, MAPS,
};
use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn maps_client(server: &MockServer) -> GoogleApiClient<googlecore::googlecore_api::Client> {
    GoogleApiClient::connect_with_base_url(&MAPS, &server.uri(), ClientConfig::new("test-key"))
        .unwrap()
}

#[tokio::test]
async fn geocode_ok() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocode/json"))
        .and(query_param("address", "1600 Amphitheatre Parkway"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "results": [{ "place_id": "abc" }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = maps_client(&mock_server).await;
    let resp = client
        .call(
            "get_geocode",
            &Arguments::new().with("address", "1600 Amphitheatre Parkway"),
        )
        .await
        .unwrap();
    assert_eq!(resp.as_value()["results"][0]["place_id"], "abc");
}

#[tokio::test]
async fn request_denied_becomes_typed_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocode/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid."
        })))
        .mount(&mock_server)
        .await;

    let client = maps_client(&mock_server).await;
    let err = client
        .call("get_geocode", &Arguments::new().with("address", "x"))
        .await
        .unwrap_err();

    let api_err = err.api_error().unwrap();
    assert_eq!(api_err.kind(), ErrorKind::RequestDenied);
    assert_eq!(
        api_err.error_message(),
        Some("The provided API key is invalid.")
    );
    assert_eq!(
        err.to_string(),
        r#"API error: RequestDeniedError(error_message="The provided API key is invalid.")"#
    );
}

#[tokio::test]
async fn http_failure_is_a_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocode/json"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&mock_server)
        .await;

    let client = maps_client(&mock_server).await;
    let err = client
        .call("get_geocode", &Arguments::new().with("address", "x"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        GoogleCoreError::Transport(googlecore::googlecore_api::Error::HttpStatus { status: 503, .. })
    ));
}

#[tokio::test]
async fn nearby_search_paginates_over_http() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/place/nearbysearch/json"))
        .and(query_param("location", "-33.8670522,151.1957362"))
        .and(query_param_is_missing("pagetoken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "results": [{ "name": "one" }],
            "next_page_token": "T1"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/place/nearbysearch/json"))
        .and(query_param("pagetoken", "T1"))
        .and(query_param("key", "test-key"))
        .and(query_param_is_missing("location"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "results": [{ "name": "two" }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = maps_client(&mock_server).await;
    let args = Arguments::new()
        .with("location", "-33.8670522,151.1957362")
        .with("radius", 500);
    let pages = collect_pages(client.paginate("get_nearby_search", &args, 3).unwrap())
        .await
        .unwrap();

    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].as_value()["results"][0]["name"], "one");
    assert_eq!(pages[1].as_value()["results"][0]["name"], "two");
}

#[tokio::test]
async fn async_variant_runs_in_background() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/elevation/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "results": [{ "elevation": 1608.6 }]
        })))
        .mount(&mock_server)
        .await;

    let client = maps_client(&mock_server).await;
    let handles: Vec<_> = (0..3)
        .map(|_| {
            client
                .submit(
                    "async_get_elevation",
                    &Arguments::new().with("locations", "39.7391536,-104.9847034"),
                )
                .unwrap()
        })
        .collect();

    for handle in handles {
        let resp = handle.await.unwrap().unwrap();
        assert_eq!(resp.status(), Some("OK"));
    }
}
