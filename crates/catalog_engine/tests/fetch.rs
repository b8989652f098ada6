use std::time::Duration;

use catalog_engine::{FailureKind, FetchSettings, Fetcher, ReqwestFetcher, Source};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn fetcher_returns_json_body_and_metadata() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/videos.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("[]", "application/json"))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default());
    let url = format!("{}/data/videos.json", server.uri());

    let output = fetcher
        .fetch(&Source::parse(&url))
        .await
        .expect("fetch ok");
    assert_eq!(output.metadata.location, url);
    assert_eq!(output.metadata.final_location, output.metadata.location);
    assert_eq!(output.metadata.status, Some(200));
    assert!(output
        .metadata
        .content_type
        .unwrap()
        .starts_with("application/json"));
    assert_eq!(output.bytes, b"[]");
}

#[tokio::test]
async fn fetcher_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default());
    let url = format!("{}/missing.json", server.uri());

    let err = fetcher.fetch(&Source::parse(&url)).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(404));
}

#[tokio::test]
async fn fetcher_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_raw("[]", "application/json"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        request_timeout: Duration::from_millis(50),
        ..FetchSettings::default()
    };
    let fetcher = ReqwestFetcher::new(settings);
    let url = format!("{}/slow.json", server.uri());

    let err = fetcher.fetch(&Source::parse(&url)).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn fetcher_rejects_html_responses() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/videos.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html></html>", "text/html"))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default());
    let url = format!("{}/videos.json", server.uri());

    let err = fetcher.fetch(&Source::parse(&url)).await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::UnsupportedContentType {
            content_type: "text/html".to_string()
        }
    );
}

#[tokio::test]
async fn fetcher_rejects_too_large_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/large.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "application/json")
                .insert_header("Content-Length", "11")
                .set_body_string("[0,1,2,3,4]"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        max_bytes: 10,
        ..FetchSettings::default()
    };
    let fetcher = ReqwestFetcher::new(settings);
    let url = format!("{}/large.json", server.uri());

    let err = fetcher.fetch(&Source::parse(&url)).await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 10,
            actual: Some(11)
        }
    );
}

#[tokio::test]
async fn fetcher_reads_local_files() {
    let dir = tempfile::TempDir::new().unwrap();
    let file = dir.path().join("rating.json");
    std::fs::write(&file, r#"[{"rank":1}]"#).unwrap();

    let fetcher = ReqwestFetcher::new(FetchSettings::default());
    let output = fetcher.fetch(&Source::File(file)).await.unwrap();
    assert_eq!(output.bytes, br#"[{"rank":1}]"#);
    assert_eq!(output.metadata.status, None);

    let missing = dir.path().join("nope.json");
    let err = fetcher.fetch(&Source::File(missing)).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::NotFound);
}

#[test]
fn source_parse_distinguishes_urls_from_paths() {
    assert_eq!(
        Source::parse(" HTTPS://example.com/a.json "),
        Source::Http("HTTPS://example.com/a.json".into())
    );
    assert_eq!(
        Source::parse("docs/data/videos.json"),
        Source::File("docs/data/videos.json".into())
    );
}

#[tokio::test]
async fn fetcher_follows_redirects_up_to_the_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/old.json"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", "/new.json"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/new.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("[]", "application/json"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/loop.json"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/loop.json"))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings {
        redirect_limit: 2,
        ..FetchSettings::default()
    });

    let moved = format!("{}/old.json", server.uri());
    let output = fetcher.fetch(&Source::parse(&moved)).await.expect("fetch ok");
    assert_eq!(output.metadata.location, moved);
    assert_eq!(
        output.metadata.final_location,
        format!("{}/new.json", server.uri())
    );

    let looping = format!("{}/loop.json", server.uri());
    let err = fetcher.fetch(&Source::parse(&looping)).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::RedirectLimitExceeded);
}
