use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::StreamExt;
use googlecore::googlecore_api::{self, HttpMethod, WorkerPool};
use googlecore::{
    collect_pages, ApiDefinition, ApiMethod, Arguments, ClientConfig, ErrorKind, GoogleApiClient,
    GoogleCoreError, Response, Status, StatusPolicy, Transport,
};
use serde_json::{json, Value};

static THINGS: ApiDefinition = ApiDefinition {
    name: "things",
    base_url: "https://things.invalid",
    methods: &[
        ApiMethod {
            name: "get_things",
            http_method: HttpMethod::Get,
            path: "/things",
            required_args: &["q"],
            optional_args: &["limit"],
            paginated: true,
            doc: "List things matching a query.",
        },
        ApiMethod {
            name: "get_thing",
            http_method: HttpMethod::Get,
            path: "/thing",
            required_args: &["id"],
            optional_args: &[],
            paginated: false,
            doc: "Fetch one thing.",
        },
    ],
};

type Calls = Arc<Mutex<Vec<(String, Arguments)>>>;

/// Replays canned response bodies and records every call it receives.
struct FakeTransport {
    bodies: Mutex<VecDeque<Value>>,
    calls: Calls,
    pool: WorkerPool,
}

impl FakeTransport {
    fn new(bodies: Vec<Value>) -> (Self, Calls) {
        let calls = Calls::default();
        let transport = Self {
            bodies: Mutex::new(bodies.into()),
            calls: Arc::clone(&calls),
            pool: WorkerPool::new(4).unwrap(),
        };
        (transport, calls)
    }
}

#[async_trait]
impl Transport for FakeTransport {
    fn definition(&self) -> &'static ApiDefinition {
        &THINGS
    }

    async fn call(
        &self,
        method: &ApiMethod,
        args: &Arguments,
    ) -> Result<Response, googlecore_api::Error> {
        self.calls
            .lock()
            .unwrap()
            .push((method.name.to_string(), args.clone()));
        let body = self
            .bodies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| json!({ "status": "OK" }));
        Ok(Response::new(body))
    }

    fn pool(&self) -> &WorkerPool {
        &self.pool
    }
}

fn client(bodies: Vec<Value>) -> (GoogleApiClient<FakeTransport>, Calls) {
    let (transport, calls) = FakeTransport::new(bodies);
    let client = GoogleApiClient::new(transport, ClientConfig::new("secret")).unwrap();
    (client, calls)
}

#[tokio::test]
async fn ok_response_is_returned_unchanged_and_key_injected() {
    let body = json!({ "status": "OK", "results": [{ "id": 1 }] });
    let (client, calls) = client(vec![body.clone()]);

    let args = Arguments::new().with("q", "cats");
    let resp = client.call("get_things", &args).await.unwrap();
    assert_eq!(resp, Response::new(body));

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "get_things");
    assert_eq!(calls[0].1.get("key"), Some("secret"));
    assert_eq!(calls[0].1.get("q"), Some("cats"));
}

#[tokio::test]
async fn every_error_status_raises_its_kind() {
    for status in Status::errors() {
        let (client, _) = client(vec![json!({
            "status": status.as_str(),
            "error_message": "boom"
        })]);
        let args = Arguments::new().with("id", "7");
        let err = client.call("get_thing", &args).await.unwrap_err();

        let api_err = err.api_error().expect("status error");
        assert_eq!(Some(api_err.kind()), status.error_kind());
        assert_eq!(api_err.method_name(), "get_thing");
        assert_eq!(api_err.arguments(), &args);
        assert!(!api_err.arguments().contains("key"));
        assert_eq!(api_err.error_message(), Some("boom"));
        assert_eq!(api_err.response().status(), Some(status.as_str()));
    }
}

#[tokio::test]
async fn caller_supplied_key_is_overridden_and_hidden() {
    let (client, calls) = client(vec![json!({ "status": "NOT_FOUND" })]);
    let args = Arguments::new().with("id", "7").with("key", "other");
    let err = client.call("get_thing", &args).await.unwrap_err();

    assert!(!err.api_error().unwrap().arguments().contains("key"));
    assert_eq!(calls.lock().unwrap()[0].1.get("key"), Some("secret"));
}

#[tokio::test]
async fn status_matching_ignores_case() {
    for raw in ["NOT_FOUND", "not_found", "Not_Found"] {
        let (client, _) = client(vec![json!({ "status": raw })]);
        let err = client
            .call("get_thing", &Arguments::new().with("id", "1"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::NotFound));
    }
}

#[tokio::test]
async fn missing_or_unknown_status_is_success_by_default() {
    let (client, _) = client(vec![json!({ "results": [] }), json!({ "status": "WHATEVER" })]);
    let args = Arguments::new().with("id", "1");
    assert!(client.call("get_thing", &args).await.is_ok());
    assert!(client.call("get_thing", &args).await.is_ok());
}

#[tokio::test]
async fn strict_policy_rejects_unknown_status() {
    let (transport, _) = FakeTransport::new(vec![json!({ "status": "WHATEVER" })]);
    let config = ClientConfig::new("secret").with_status_policy(StatusPolicy::Strict);
    let client = GoogleApiClient::new(transport, config).unwrap();

    let err = client
        .call("get_thing", &Arguments::new().with("id", "1"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::UnknownError));
}

#[tokio::test]
async fn unknown_method_is_rejected() {
    let (client, calls) = client(vec![]);
    let err = client
        .call("get_nothing", &Arguments::new())
        .await
        .unwrap_err();
    assert!(matches!(err, GoogleCoreError::UnknownMethod(ref name) if name == "get_nothing"));
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn empty_key_is_a_config_error() {
    let (transport, _) = FakeTransport::new(vec![]);
    let err = GoogleApiClient::new(transport, ClientConfig::new("")).unwrap_err();
    assert!(matches!(err, GoogleCoreError::Config(_)));
}

#[tokio::test]
async fn wrappers_keep_name_and_doc() {
    let (client, _) = client(vec![]);
    let names: Vec<_> = client.methods().map(|m| m.name().to_string()).collect();
    assert_eq!(
        names,
        vec!["async_get_thing", "async_get_things", "get_thing", "get_things"]
    );

    let sync = client.method("get_things").unwrap();
    assert!(!sync.is_async());
    assert_eq!(sync.doc(), "List things matching a query.");

    let background = client.method("async_get_things").unwrap();
    assert!(background.is_async());
    assert_eq!(background.target(), "get_things");
    assert_eq!(background.doc(), sync.doc());
}

#[tokio::test]
async fn submit_runs_on_the_pool() {
    let (client, calls) = client(vec![json!({ "status": "OK", "n": 1 })]);
    let handle = client
        .submit("async_get_thing", &Arguments::new().with("id", "1"))
        .unwrap();
    let resp = handle.await.unwrap().unwrap();
    assert_eq!(resp.get("n"), Some(&json!(1)));
    assert_eq!(calls.lock().unwrap()[0].1.get("key"), Some("secret"));
}

#[tokio::test]
async fn submitted_errors_surface_on_await() {
    let (client, _) = client(vec![json!({ "status": "OVER_QUERY_LIMIT" })]);
    let handle = client
        .submit("async_get_thing", &Arguments::new().with("id", "1"))
        .unwrap();
    let err = handle.await.unwrap().unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::OverQueryLimit));
}

#[tokio::test]
async fn calling_async_name_awaits_the_result() {
    let (client, _) = client(vec![json!({ "status": "OK", "n": 2 })]);
    let resp = client
        .call("async_get_thing", &Arguments::new().with("id", "1"))
        .await
        .unwrap();
    assert_eq!(resp.get("n"), Some(&json!(2)));
}

#[tokio::test]
async fn paginate_binds_only_the_token_after_the_first_page() {
    let (client, calls) = client(vec![
        json!({ "status": "OK", "next_page_token": "T1" }),
        json!({ "status": "OK", "next_page_token": "T2" }),
        json!({ "status": "OK" }),
    ]);
    let args = Arguments::new().with("q", "cats").with("limit", 5);
    let pages = collect_pages(client.paginate("get_things", &args, 3).unwrap())
        .await
        .unwrap();
    assert_eq!(pages.len(), 3);

    let calls = calls.lock().unwrap();
    assert_eq!(calls[0].1, args.clone().with("key", "secret"));
    assert_eq!(
        calls[1].1,
        Arguments::page_token("T1").with("key", "secret")
    );
    assert_eq!(
        calls[2].1,
        Arguments::page_token("T2").with("key", "secret")
    );
}

#[tokio::test]
async fn paginate_retries_continuation_invalid_request() {
    tokio::time::pause();
    let (client, calls) = client(vec![
        json!({ "status": "OK", "next_page_token": "T1" }),
        json!({ "status": "INVALID_REQUEST" }),
        json!({ "status": "OK" }),
    ]);
    let pages: Vec<_> = client
        .paginate("get_things", &Arguments::new().with("q", "cats"), 3)
        .unwrap()
        .collect()
        .await;

    assert_eq!(pages.len(), 2);
    assert!(pages.iter().all(Result::is_ok));
    assert_eq!(calls.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn paginate_does_not_retry_first_page() {
    let (client, calls) = client(vec![json!({ "status": "INVALID_REQUEST" })]);
    let result = collect_pages(
        client
            .paginate("get_things", &Arguments::new().with("q", "cats"), 3)
            .unwrap(),
    )
    .await;

    assert_eq!(result.unwrap_err().kind(), Some(ErrorKind::InvalidRequest));
    assert_eq!(calls.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn debug_output_hides_the_key() {
    let (client, _) = client(vec![]);
    let out = format!("{:?}", client);
    assert!(!out.contains("secret"));
}
