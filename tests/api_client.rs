//! `ArenaClient` request shaping and response decoding against a mock server.

use std::time::Duration;

use arena::api::types::{CommitRequest, Difficulty, RankingPeriod, RankingType, RegisterRequest};
use arena::api::{ApiError, ArenaClient};
use arena::strategy::Move;
use mockito::Matcher;
use serde_json::json;

fn client_for(server: &mockito::ServerGuard) -> ArenaClient {
    ArenaClient::new(&server.url(), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn register_posts_json_without_key() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/agents")
        .match_header("accept", "application/json")
        .match_header("content-type", "application/json")
        .match_header("x-agent-key", Matcher::Missing)
        .match_body(Matcher::Json(json!({"name": "MyBot-001", "authorEmail": "me@x.io"})))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"agentId":"agent-mybot-001","apiKey":"ak_live_abc","status":"REGISTERED"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let res = client
        .register(&RegisterRequest::new("MyBot-001", Some("me@x.io"), None))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(res["apiKey"], "ak_live_abc");
}

#[tokio::test]
async fn trailing_slash_in_base_is_ignored() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/health")
        .with_status(200)
        .with_body(r#"{"status":"ok"}"#)
        .create_async()
        .await;

    let client = ArenaClient::new(&format!("{}/", server.url()), Duration::from_secs(5)).unwrap();
    let res = client.health().await.unwrap();

    mock.assert_async().await;
    assert_eq!(res, json!({"status": "ok"}));
}

#[tokio::test]
async fn qualify_start_sends_key_and_difficulty() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/agents/me/qualify")
        .match_header("x-agent-key", "ak_live_abc")
        .match_body(Matcher::Json(json!({"difficulty": "medium"})))
        .with_status(200)
        .with_body(r#"{"qualMatchId":"q-1","status":"IN_PROGRESS"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let res = client.qualify_start("ak_live_abc", Difficulty::Medium).await.unwrap();

    mock.assert_async().await;
    assert_eq!(res["qualMatchId"], "q-1");
}

#[tokio::test]
async fn qualify_round_uses_round_path_and_uppercase_move() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/agents/me/qualify/q-1/rounds/3")
        .match_body(Matcher::Json(json!({"move": "SCISSORS"})))
        .with_status(200)
        .with_body(r#"{"roundNo":3,"qualStatus":"IN_PROGRESS"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    client
        .qualify_round("k", "q-1", 3, Move::Scissors)
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn join_queue_sends_no_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/queue")
        .match_header("x-agent-key", "k")
        .match_header("content-type", Matcher::Missing)
        .with_status(201)
        .with_body(r#"{"status":"QUEUED","position":1}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let res = client.join_queue("k").await.unwrap();

    mock.assert_async().await;
    assert_eq!(res["position"], 1);
}

#[tokio::test]
async fn leave_queue_uses_delete() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("DELETE", "/api/queue")
        .match_header("x-agent-key", "k")
        .with_status(200)
        .with_body(r#"{"status":"LEFT"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    client.leave_queue("k").await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn matches_is_public_get() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/matches")
        .match_header("accept", "application/json")
        .match_header("x-agent-key", Matcher::Missing)
        .match_header("content-type", Matcher::Missing)
        .with_status(200)
        .with_body(r#"{"matches":[{"id":"m-1","status":"RUNNING"}]}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let res = client.matches().await.unwrap();

    mock.assert_async().await;
    assert_eq!(res["matches"][0]["id"], "m-1");
}

#[tokio::test]
async fn get_match_encodes_id_in_path() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/matches/m%2F1%3Fx")
        .match_header("x-agent-key", Matcher::Missing)
        .with_status(200)
        .with_body(r#"{"id":"m/1?x","rounds":[]}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let res = client.get_match("m/1?x").await.unwrap();

    mock.assert_async().await;
    assert_eq!(res["id"], "m/1?x");
}

#[tokio::test]
async fn ready_posts_with_key_and_no_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/matches/m-1/ready")
        .match_header("x-agent-key", "ak_live_abc")
        .match_header("content-type", Matcher::Missing)
        .match_body("")
        .with_status(200)
        .with_body(r#"{"status":"READY"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let res = client.ready("ak_live_abc", "m-1").await.unwrap();

    mock.assert_async().await;
    assert_eq!(res["status"], "READY");
}

#[tokio::test]
async fn empty_success_body_becomes_ok_marker() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/queue/me")
        .with_status(204)
        .create_async()
        .await;

    let client = client_for(&server);
    assert_eq!(client.queue_me("k").await.unwrap(), json!({"ok": true}));
}

#[tokio::test]
async fn non_json_success_body_is_wrapped_raw() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/time")
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let client = client_for(&server);
    assert_eq!(client.time().await.unwrap(), json!({"raw": "not json"}));
}

#[tokio::test]
async fn error_status_carries_json_payload() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/agents")
        .with_status(409)
        .with_body(r#"{"error":"NAME_TAKEN","message":"An agent with this name already exists"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .register(&RegisterRequest::new("Taken", None, None))
        .await
        .unwrap_err();

    match err {
        ApiError::Status { status, payload } => {
            assert_eq!(status, 409);
            assert_eq!(payload["error"], "NAME_TAKEN");
        }
        other => panic!("expected Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn error_status_without_body_uses_http_code() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/queue")
        .with_status(503)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.queue().await.unwrap_err();
    match err {
        ApiError::Status { status, payload } => {
            assert_eq!(status, 503);
            assert_eq!(payload, json!({"error": "HTTP_503"}));
        }
        other => panic!("expected Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn error_status_with_text_body_keeps_raw() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/rules")
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.rules().await.unwrap_err();
    match err {
        ApiError::Status { payload, .. } => {
            assert_eq!(payload, json!({"error": "HTTP_500", "raw": "boom"}));
        }
        other => panic!("expected Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn rankings_passes_type_and_period() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/rankings")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("type".into(), "viewers".into()),
            Matcher::UrlEncoded("period".into(), "season".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"type":"viewers","period":"season","rankings":[]}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    client
        .rankings(RankingType::Viewers, RankingPeriod::Season)
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn match_ids_are_percent_encoded() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/matches/m%201/rounds/2/commit")
        .match_body(Matcher::Json(json!({"hash": "abc", "prediction": "ROCK"})))
        .with_status(200)
        .with_body(r#"{"status":"COMMITTED","waitingFor":"opponent"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let req = CommitRequest {
        hash: "abc".to_string(),
        prediction: Some(Move::Rock),
    };
    client.commit("k", "m 1", 2, &req).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    // Bind then drop a listener so the port is very likely closed.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client =
        ArenaClient::new(&format!("http://127.0.0.1:{port}"), Duration::from_secs(2)).unwrap();
    let err = client.queue().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
    assert_eq!(err.status(), None);
}
