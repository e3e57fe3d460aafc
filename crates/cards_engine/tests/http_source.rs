use std::time::Duration;

use cards_engine::{CardSource, FailureKind, HttpCardSource, SourceSettings};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn source_for(server: &MockServer) -> HttpCardSource {
    HttpCardSource::new(SourceSettings {
        base_url: format!("{}/api/", server.uri()),
        ..SourceSettings::default()
    })
}

fn card_json(filename: &str, podcast: Option<&str>) -> serde_json::Value {
    json!({
        "filename": filename,
        "title": "Steel Ladle",
        "summary": {
            "en": { "short": "short en", "detailed": "detailed en" },
            "th": { "short": "short th", "detailed": "detailed th" }
        },
        "insights": { "en": ["one", "two"], "th": ["หนึ่ง", "สอง"] },
        "podcast_file": podcast,
        "mtime": 1717171717.5,
        "processed_at": "2024-05-31T12:00:00.123456"
    })
}

async fn mount(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/api/knowledge-cards"))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn fetches_cards_and_ignores_unknown_fields() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "cards": [card_json("a.pdf", Some("a.wav")), card_json("b.pdf", None)],
            "total": 2
        })),
    )
    .await;

    let cards = source_for(&server).fetch_cards().await.expect("cards");
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].filename, "a.pdf");
    assert_eq!(cards[0].podcast_file.as_deref(), Some("a.wav"));
    assert_eq!(cards[0].insights["th"], vec!["หนึ่ง", "สอง"]);
    assert_eq!(
        cards[0].processed_at.as_deref(),
        Some("2024-05-31T12:00:00.123456")
    );
    assert_eq!(cards[1].podcast_file, None);
    assert!(!cards[1].error);
}

#[tokio::test]
async fn endpoint_joins_base_url_without_double_slash() {
    let source = HttpCardSource::new(SourceSettings {
        base_url: "http://localhost:8080/api/".to_string(),
        ..SourceSettings::default()
    });
    assert_eq!(source.endpoint(), "http://localhost:8080/api/knowledge-cards");
}

#[tokio::test]
async fn empty_card_list_is_a_success() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "success": true, "cards": [] })),
    )
    .await;

    let cards = source_for(&server).fetch_cards().await.expect("cards");
    assert!(cards.is_empty());
}

#[tokio::test]
async fn unsuccessful_payload_is_a_failure() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(json!({ "success": false, "error": "KB folder missing" })),
    )
    .await;

    let err = source_for(&server).fetch_cards().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Unsuccessful);
    assert_eq!(err.message, "KB folder missing");
}

#[tokio::test]
async fn success_without_cards_is_malformed() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "success": true })),
    )
    .await;

    let err = source_for(&server).fetch_cards().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Malformed);
}

#[tokio::test]
async fn non_json_body_is_malformed() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200).set_body_raw("<html>oops</html>", "text/html"),
    )
    .await;

    let err = source_for(&server).fetch_cards().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Malformed);
}

#[tokio::test]
async fn server_error_status_is_a_failure() {
    let server = MockServer::start().await;
    mount(&server, ResponseTemplate::new(500)).await;

    let err = source_for(&server).fetch_cards().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
}

#[tokio::test]
async fn slow_server_times_out() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200)
            .set_delay(Duration::from_millis(250))
            .set_body_json(json!({ "success": true, "cards": [] })),
    )
    .await;

    let source = HttpCardSource::new(SourceSettings {
        base_url: format!("{}/api", server.uri()),
        request_timeout: Duration::from_millis(50),
        ..SourceSettings::default()
    });
    let err = source.fetch_cards().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn oversized_response_is_rejected() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(json!({ "success": true, "cards": [card_json("a.pdf", None)] })),
    )
    .await;

    let source = HttpCardSource::new(SourceSettings {
        base_url: format!("{}/api", server.uri()),
        max_bytes: 16,
        ..SourceSettings::default()
    });
    let err = source.fetch_cards().await.unwrap_err();
    assert!(matches!(err.kind, FailureKind::TooLarge { max_bytes: 16, .. }));
}

#[tokio::test]
async fn count_prefers_reported_total() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "cards": [card_json("a.pdf", None)],
            "total": 3
        })),
    )
    .await;

    assert_eq!(source_for(&server).count().await, Ok(3));
}

#[tokio::test]
async fn count_falls_back_to_card_list_length() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "cards": [card_json("a.pdf", None), card_json("b.pdf", None)]
        })),
    )
    .await;

    assert_eq!(source_for(&server).count().await, Ok(2));
}

#[tokio::test]
async fn unreachable_server_is_a_network_failure() {
    let source = HttpCardSource::new(SourceSettings {
        base_url: "http://127.0.0.1:9/api".to_string(),
        connect_timeout: Duration::from_millis(200),
        ..SourceSettings::default()
    });
    let err = source.fetch_cards().await.unwrap_err();
    assert!(matches!(err.kind, FailureKind::Network | FailureKind::Timeout));
}
