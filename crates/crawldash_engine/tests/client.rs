use crawldash_engine::{
    ApiErrorKind, ClientSettings, CrawlApi, ReqwestCrawlApi, StatusReply, SubmitReply,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api() -> ReqwestCrawlApi {
    ReqwestCrawlApi::new(&ClientSettings::default()).expect("client")
}

fn urls(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn submit_posts_json_batch_with_limit() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/crawl"))
        .and(query_param("limit", "25"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!(["https://v.example/1", "https://v.example/2"])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(true)))
        .expect(1)
        .mount(&server)
        .await;

    let reply = api()
        .submit(
            &server.uri(),
            &urls(&["https://v.example/1", "https://v.example/2"]),
            25,
        )
        .await
        .expect("submit ok");

    assert_eq!(
        reply,
        SubmitReply {
            http_status: None,
            outcome: Ok(true),
        }
    );
}

#[tokio::test]
async fn submit_null_reply_is_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/crawl"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("null", "application/json"))
        .mount(&server)
        .await;

    let reply = api()
        .submit(&server.uri(), &urls(&["https://v.example/1"]), 1000)
        .await
        .expect("submit ok");

    assert_eq!(reply.outcome, Ok(false));
    assert_eq!(reply.http_status, None);
}

#[tokio::test]
async fn submit_error_status_still_reads_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/crawl"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!(false)))
        .mount(&server)
        .await;

    let reply = api()
        .submit(&server.uri(), &urls(&["https://v.example/1"]), 1000)
        .await
        .expect("body parsed despite status");

    assert_eq!(
        reply,
        SubmitReply {
            http_status: Some(503),
            outcome: Ok(false),
        }
    );
}

#[tokio::test]
async fn submit_non_json_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/crawl"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    let reply = api()
        .submit(&server.uri(), &urls(&["https://v.example/1"]), 1000)
        .await
        .expect("response arrived");

    assert_eq!(reply.http_status, None);
    assert_eq!(reply.outcome.unwrap_err().kind, ApiErrorKind::MalformedResponse);
}

#[tokio::test]
async fn submit_error_page_keeps_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/crawl"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let reply = api()
        .submit(&server.uri(), &urls(&["https://v.example/1"]), 1000)
        .await
        .expect("response arrived");

    assert_eq!(reply.http_status, Some(500));
    assert_eq!(reply.outcome.unwrap_err().kind, ApiErrorKind::MalformedResponse);
}

#[tokio::test]
async fn submit_unreachable_host_is_network_failure() {
    let err = api()
        .submit("http://127.0.0.1:1", &urls(&["https://v.example/1"]), 1000)
        .await
        .unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Network);
}

#[tokio::test]
async fn status_returns_rows_untouched() {
    let server = MockServer::start().await;
    let rows = json!([
        {"details": {"title": "A"}, "_comments": 12, "_captions": 0},
        {"status": "Done", "comments": 7, "captions": 2}
    ]);
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rows.clone()))
        .mount(&server)
        .await;

    let reply = api().status(&server.uri()).await.expect("status ok");
    let serde_json::Value::Array(expected) = rows else {
        unreachable!()
    };
    assert_eq!(reply, StatusReply::Rows(expected));
}

#[tokio::test]
async fn status_non_array_is_reported_as_such() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"detail": "busy"})))
        .mount(&server)
        .await;

    let reply = api().status(&server.uri()).await.expect("status ok");
    assert_eq!(reply, StatusReply::NotAnArray);
}

#[tokio::test]
async fn status_does_not_follow_redirects() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("Location", format!("{}/login", server.uri())),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let err = api().status(&server.uri()).await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::UnexpectedRedirect(302));
}

#[tokio::test]
async fn status_garbage_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy</html>"))
        .mount(&server)
        .await;

    let err = api().status(&server.uri()).await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::MalformedResponse);
}

#[tokio::test]
async fn request_timeout_is_reported_as_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(std::time::Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let settings = ClientSettings {
        connect_timeout: None,
        request_timeout: Some(std::time::Duration::from_millis(50)),
    };
    let api = ReqwestCrawlApi::new(&settings).expect("client");
    let err = api.status(&server.uri()).await.unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Timeout);
}
