use mockito::{Matcher, Server};
use serde_json::json;
use trip_planner_rs::{
    AnthropicClient, GenerationError, GenerationRequest, GenerationService, InboundRequest,
    ItineraryHandler,
};

fn messages_reply(text: &str) -> String {
    json!({
        "id": "msg_01",
        "type": "message",
        "role": "assistant",
        "model": "claude-haiku-4-5",
        "content": [{"type": "text", "text": text}],
        "stop_reason": "end_turn",
        "usage": {"input_tokens": 120, "output_tokens": 480}
    })
    .to_string()
}

fn client_for(server: &Server) -> AnthropicClient {
    AnthropicClient::new().with_base_url(format!("{}/v1", server.url()))
}

#[tokio::test]
async fn test_generate_sends_messages_request() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/messages")
        .match_header("x-api-key", "sk-test")
        .match_header("anthropic-version", "2023-06-01")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "model": "claude-haiku-4-5",
            "max_tokens": 2560,
            "messages": [{"role": "user", "content": "Plan three days in Rome"}]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(messages_reply("[{\"day\": 1}]"))
        .create_async()
        .await;

    let request = GenerationRequest::new("claude-haiku-4-5", "Plan three days in Rome")
        .with_max_tokens(2560);
    let text = client_for(&server)
        .generate("sk-test", &request)
        .await
        .unwrap();

    assert_eq!(text, "[{\"day\": 1}]");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_error_status_maps_to_upstream() {
    for (status, kind, message) in [
        (529, "overloaded_error", "Overloaded"),
        (429, "rate_limit_error", "Number of request tokens has exceeded your rate limit"),
        (401, "authentication_error", "invalid x-api-key"),
    ] {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/messages")
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(
                json!({"type": "error", "error": {"type": kind, "message": message}}).to_string(),
            )
            .create_async()
            .await;

        let err = client_for(&server)
            .generate("sk-test", &GenerationRequest::new("claude-haiku-4-5", "hi"))
            .await
            .unwrap_err();

        match err {
            GenerationError::Upstream {
                status: got_status,
                message: got_message,
                details,
            } => {
                assert_eq!(got_status, Some(status as u16));
                assert_eq!(got_message.as_deref(), Some(message));
                assert_eq!(details["error"]["type"], kind);
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_non_json_error_body_is_preserved() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/messages")
        .with_status(502)
        .with_body("<html>Bad Gateway</html>")
        .create_async()
        .await;

    let err = client_for(&server)
        .generate("sk-test", &GenerationRequest::new("claude-haiku-4-5", "hi"))
        .await
        .unwrap_err();

    match err {
        GenerationError::Upstream {
            status,
            message,
            details,
        } => {
            assert_eq!(status, Some(502));
            assert!(message.is_none());
            assert_eq!(details, json!("<html>Bad Gateway</html>"));
        }
        other => panic!("expected upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_success_is_rejected() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/messages")
        .with_status(200)
        .with_body(json!({"id": "msg_01", "content": []}).to_string())
        .create_async()
        .await;

    let err = client_for(&server)
        .generate("sk-test", &GenerationRequest::new("claude-haiku-4-5", "hi"))
        .await
        .unwrap_err();
    assert!(matches!(err, GenerationError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_unreachable_service_is_transport_error() {
    let client = AnthropicClient::new().with_base_url("http://127.0.0.1:1/v1");
    let err = client
        .generate("sk-test", &GenerationRequest::new("claude-haiku-4-5", "hi"))
        .await
        .unwrap_err();
    assert!(matches!(err, GenerationError::Transport(_)));
}

#[tokio::test]
async fn test_handler_against_mock_service() {
    let itinerary = json!([
        {
            "day": 1,
            "title": "Day 1 - Ancient Rome",
            "hotel": "Hotel Raphael (4★)",
            "activities": [
                {"when": "Morning", "what": "Colosseum", "notes": "Book ahead"},
                {"when": "Afternoon", "what": "Roman Forum"}
            ]
        }
    ]);

    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/messages")
        .match_header("x-api-key", "sk-live")
        .match_body(Matcher::PartialJson(json!({"max_tokens": 1536})))
        .with_status(200)
        .with_body(messages_reply(&format!(
            "```json\n{}\n```",
            serde_json::to_string_pretty(&itinerary).unwrap()
        )))
        .expect(1)
        .create_async()
        .await;

    let handler = ItineraryHandler::new(
        std::sync::Arc::new(client_for(&server)),
        Some("sk-live".to_string()),
    );
    let response = handler
        .handle(InboundRequest::post_json(&json!({
            "destination": "Rome, Italy",
            "days": 1,
            "budget": "luxury",
            "tripType": "solo",
            "interests": ["history"]
        })))
        .await;

    assert!(response.is_success());
    assert_eq!(response.body["itinerary"], itinerary);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_handler_mirrors_service_overload() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/messages")
        .with_status(529)
        .with_body(
            json!({"type": "error", "error": {"type": "overloaded_error", "message": "Overloaded"}})
                .to_string(),
        )
        .create_async()
        .await;

    let handler = ItineraryHandler::new(
        std::sync::Arc::new(client_for(&server)),
        Some("sk-live".to_string()),
    );
    let response = handler
        .handle(InboundRequest::post_json(&json!({
            "destination": "Rome",
            "days": 2,
            "budget": "budget",
            "tripType": "friends"
        })))
        .await;

    assert_eq!(response.status.as_u16(), 529);
    assert_eq!(response.error_message(), Some("Overloaded"));
    assert_eq!(response.body["details"]["error"]["type"], "overloaded_error");
}
