//! End-to-end tests for the probe session.
//!
//! These tests drive the full lifecycle - submit, classify, bookkeep,
//! persist - against a local mock HTTP server, plus the file-backed store
//! for cross-session persistence.

use http_probe::formatter::format_body;
use http_probe::storage::{FileStore, MemoryStore, SESSION_STATE_KEY};
use http_probe::KeyValueStore;
use http_probe::{ExecuteError, HttpMethod, ProbeSession, RequestOutcome, SessionState};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_test_env() {
    let _ = env_logger::builder().is_test(true).try_init();
}

async fn json_server(body: &str, status: u16) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body.to_string()))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn empty_url_changes_nothing() {
    init_test_env();
    let mut session = ProbeSession::open(MemoryStore::new());

    let result = session.submit(HttpMethod::GET, "   ").await;

    assert_eq!(result, Err(ExecuteError::EmptyUrl));
    assert!(session.history().is_empty());
    assert_eq!(session.stats().total(), 0);
    assert!(session
        .store()
        .read(SESSION_STATE_KEY)
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn json_response_is_classified_and_highlighted() {
    init_test_env();
    let server = json_server(r#"{"a":1,"ok":true}"#, 200).await;
    let mut session = ProbeSession::open(MemoryStore::new());

    let outcome = session
        .submit(HttpMethod::GET, &format!("{}/data", server.uri()))
        .await
        .unwrap();

    let success = match outcome {
        RequestOutcome::Success(success) => success,
        other => panic!("expected Success, got {:?}", other),
    };
    assert_eq!(success.status, 200);
    assert!(success.ok);

    let entry = session.select_history(0);
    assert_eq!(entry.method, HttpMethod::GET);
    assert!(entry.ok);
    assert_eq!(entry.status, 200);

    let body = format_body(&success.body_text);
    assert!(body.is_json());
    let markup = body.display_text();
    assert!(markup.contains(r#"<span class="json-key">"a"</span>"#));
    assert!(markup.contains(r#"<span class="json-num">1</span>"#));
    assert!(markup.contains(r#"<span class="json-bool">true</span>"#));

    assert_eq!(session.stats().total(), 1);
    assert_eq!(session.stats().ok(), 1);
    assert_eq!(session.stats().sample_count(), 1);
}

#[tokio::test]
async fn non_json_body_falls_back_to_verbatim_text() {
    init_test_env();
    let server = json_server("hello, not json", 200).await;
    let mut session = ProbeSession::open(MemoryStore::new());

    let outcome = session
        .submit(HttpMethod::GET, &format!("{}/data", server.uri()))
        .await
        .unwrap();

    match outcome {
        RequestOutcome::Success(success) => {
            let body = format_body(&success.body_text);
            assert!(!body.is_json());
            assert_eq!(body.display_text(), "hello, not json");
        }
        other => panic!("expected Success, got {:?}", other),
    }
}

#[tokio::test]
async fn non_2xx_is_success_with_ok_false() {
    init_test_env();
    let server = json_server(r#"{"error":"missing"}"#, 404).await;
    let mut session = ProbeSession::open(MemoryStore::new());

    let outcome = session
        .submit(HttpMethod::GET, &format!("{}/data", server.uri()))
        .await
        .unwrap();

    let success = match outcome {
        RequestOutcome::Success(success) => success,
        other => panic!("expected Success, got {:?}", other),
    };
    assert_eq!(success.status, 404);
    assert!(!success.ok);

    // Counted per the ok classification, but still a real response: the
    // body renders and the latency window gains a sample.
    let entry = session.select_history(0);
    assert!(!entry.ok);
    assert_eq!(entry.status, 404);
    assert_eq!(session.stats().err(), 1);
    assert_eq!(session.stats().ok(), 0);
    assert_eq!(session.stats().sample_count(), 1);
    assert!(format_body(&success.body_text).is_json());
}

#[tokio::test]
async fn unusual_status_code_defaults_status_text() {
    init_test_env();
    // 299 has no canonical reason phrase.
    let server = json_server("{}", 299).await;
    let mut session = ProbeSession::open(MemoryStore::new());

    let outcome = session
        .submit(HttpMethod::GET, &format!("{}/data", server.uri()))
        .await
        .unwrap();

    match outcome {
        RequestOutcome::Success(success) => {
            assert_eq!(success.status, 299);
            assert_eq!(success.status_text, "OK");
            assert!(success.ok);
        }
        other => panic!("expected Success, got {:?}", other),
    }
}

#[tokio::test]
async fn unreachable_host_is_recorded_without_latency_sample() {
    init_test_env();
    let mut session = ProbeSession::open(MemoryStore::new());

    let outcome = session
        .submit(HttpMethod::GET, "http://127.0.0.1:1/")
        .await
        .unwrap();

    assert!(matches!(outcome, RequestOutcome::NetworkFailure { .. }));
    let entry = session.select_history(0);
    assert!(!entry.ok);
    assert_eq!(entry.status, 0);
    assert_eq!(session.stats().err(), 1);
    assert_eq!(session.stats().sample_count(), 0);
}

#[tokio::test]
async fn eleventh_request_evicts_only_the_oldest() {
    init_test_env();
    let server = MockServer::start().await;
    for i in 0..11 {
        Mock::given(method("GET"))
            .and(path(format!("/r/{}", i)))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
    }
    let mut session = ProbeSession::open(MemoryStore::new());

    for i in 0..11 {
        session
            .submit(HttpMethod::GET, &format!("{}/r/{}", server.uri(), i))
            .await
            .unwrap();
    }

    assert_eq!(session.history().len(), 10);
    // The very first request was evicted; the second is now the oldest.
    assert_eq!(
        session.select_history(9).url,
        format!("{}/r/1", server.uri())
    );
    assert_eq!(
        session.select_history(0).url,
        format!("{}/r/10", server.uri())
    );
    // The counters keep counting past the history cap.
    assert_eq!(session.stats().total(), 11);
}

#[tokio::test]
async fn latency_window_caps_at_fifty_samples() {
    init_test_env();
    let server = json_server("{}", 200).await;
    let mut session = ProbeSession::open(MemoryStore::new());
    let url = format!("{}/data", server.uri());

    for _ in 0..55 {
        session.submit(HttpMethod::GET, &url).await.unwrap();
    }

    assert_eq!(session.stats().total(), 55);
    assert_eq!(session.stats().ok(), 55);
    assert_eq!(session.stats().sample_count(), 50);
    assert!(session.stats().average().is_some());
    assert_eq!(session.history().len(), 10);
}

#[tokio::test]
async fn clear_resets_state_and_persisted_record() {
    init_test_env();
    let server = json_server("{}", 200).await;
    let mut session = ProbeSession::open(MemoryStore::new());

    session
        .submit(HttpMethod::GET, &format!("{}/data", server.uri()))
        .await
        .unwrap();
    session.clear();

    assert!(session.history().is_empty());
    assert_eq!(session.stats().total(), 0);
    assert_eq!(session.stats().average(), None);

    let blob = session.store().read(SESSION_STATE_KEY).unwrap().unwrap();
    let persisted: SessionState = serde_json::from_str(&blob).unwrap();
    assert_eq!(persisted, SessionState::default());
}

#[tokio::test]
async fn state_survives_across_sessions_on_disk() {
    init_test_env();
    let dir = tempfile::tempdir().unwrap();
    let server = json_server(r#"{"n":1}"#, 200).await;
    let url = format!("{}/data", server.uri());

    {
        let mut session = ProbeSession::open(FileStore::with_dir(dir.path()));
        assert!(session.started_from_defaults());
        session.submit(HttpMethod::GET, &url).await.unwrap();
        session.submit(HttpMethod::GET, "http://127.0.0.1:1/").await.unwrap();
    }

    let reopened = ProbeSession::open(FileStore::with_dir(dir.path()));
    assert!(!reopened.started_from_defaults());
    assert_eq!(reopened.history().len(), 2);
    assert_eq!(reopened.select_history(1).url, url);
    assert_eq!(reopened.stats().total(), 2);
    assert_eq!(reopened.stats().ok(), 1);
    assert_eq!(reopened.stats().err(), 1);
    assert_eq!(reopened.stats().sample_count(), 1);
}

#[tokio::test]
async fn corrupt_state_on_disk_defaults_and_self_heals() {
    init_test_env();
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(format!("{}.json", SESSION_STATE_KEY)),
        "definitely { not json",
    )
    .unwrap();
    let server = json_server("{}", 200).await;

    let mut session = ProbeSession::open(FileStore::with_dir(dir.path()));
    assert!(session.started_from_defaults());
    assert!(session.history().is_empty());

    // The first write-through save repairs the record.
    session
        .submit(HttpMethod::GET, &format!("{}/data", server.uri()))
        .await
        .unwrap();

    let reopened = ProbeSession::open(FileStore::with_dir(dir.path()));
    assert!(!reopened.started_from_defaults());
    assert_eq!(reopened.history().len(), 1);
}

#[tokio::test]
async fn methods_are_sent_and_recorded_as_chosen() {
    init_test_env();
    let server = MockServer::start().await;
    for m in ["POST", "PUT", "DELETE", "PATCH"] {
        Mock::given(method(m))
            .and(path("/verb"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
    }
    let mut session = ProbeSession::open(MemoryStore::new());
    let url = format!("{}/verb", server.uri());

    for m in [
        HttpMethod::POST,
        HttpMethod::PUT,
        HttpMethod::DELETE,
        HttpMethod::PATCH,
    ] {
        let outcome = session.submit(m, &url).await.unwrap();
        assert!(outcome.is_ok(), "{} should get a 2xx", m);
        assert_eq!(session.select_history(0).method, m);
    }

    assert_eq!(session.stats().total(), 4);
    assert_eq!(session.stats().ok(), 4);
}
