//! Integration tests for `GeminiClient` and `Advisor` using wiremock HTTP mocks.

use std::time::Duration;

use efarmer_advisor::{
    Advisor, AdvisorSettings, ChatSession, GeminiClient, FALLBACK_REPLY, REPHRASE_REPLY,
    STANDBY_REPLY,
};
use efarmer_core::Language;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/models/gemini-3-flash-preview:generateContent";

fn advisor_for(server: &MockServer, timeout_secs: u64) -> Advisor<GeminiClient> {
    let client = GeminiClient::with_base_url("test-key", timeout_secs, &server.uri())
        .expect("client construction should not fail");
    Advisor::new(Some(client), AdvisorSettings::default())
}

fn text_response(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [
            {
                "content": { "role": "model", "parts": [ { "text": text } ] },
                "finishReason": "STOP"
            }
        ]
    })
}

#[tokio::test]
async fn returns_generated_text_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(text_response("Plant simsim when the rains settle.")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let reply = advisor_for(&server, 30)
        .get_advice("When should I plant simsim?", "en")
        .await;

    assert_eq!(reply, "Plant simsim when the rains settle.");
}

#[tokio::test]
async fn request_body_carries_prompt_instruction_and_temperature() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(body_partial_json(serde_json::json!({
            "contents": [
                {
                    "role": "user",
                    "parts": [ { "text": "User language: ach. Question: Pii tye awene?" } ]
                }
            ],
            "generationConfig": { "temperature": 0.6 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response("Eyo")))
        .expect(1)
        .mount(&server)
        .await;

    let reply = advisor_for(&server, 30)
        .get_advice("Pii tye awene?", "ach")
        .await;
    assert_eq!(reply, "Eyo");

    let requests = server.received_requests().await.expect("recording enabled");
    let body: serde_json::Value =
        serde_json::from_slice(&requests[0].body).expect("request body is json");
    let instruction = body["systemInstruction"]["parts"][0]["text"]
        .as_str()
        .expect("system instruction text");
    assert!(instruction.contains("Aki"));
    assert!(instruction.contains("Village Extension Officer"));
}

#[tokio::test]
async fn server_error_returns_fallback_reply_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .expect(1)
        .mount(&server)
        .await;

    let reply = advisor_for(&server, 30).get_advice("Is my cow sick?", "en").await;
    assert_eq!(reply, FALLBACK_REPLY);
}

#[tokio::test]
async fn malformed_body_returns_fallback_reply() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let reply = advisor_for(&server, 30).get_advice("hello", "en").await;
    assert_eq!(reply, FALLBACK_REPLY);
}

#[tokio::test]
async fn timeout_returns_fallback_reply() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(text_response("too late"))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let reply = advisor_for(&server, 1).get_advice("hello", "en").await;
    assert_eq!(reply, FALLBACK_REPLY);
}

#[tokio::test]
async fn empty_candidates_return_rephrase_reply() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": []
        })))
        .mount(&server)
        .await;

    let reply = advisor_for(&server, 30).get_advice("???", "en").await;
    assert_eq!(reply, REPHRASE_REPLY);
}

#[tokio::test]
async fn empty_text_returns_rephrase_reply() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response("")))
        .mount(&server)
        .await;

    let reply = advisor_for(&server, 30).get_advice("???", "en").await;
    assert_eq!(reply, REPHRASE_REPLY);
}

#[tokio::test]
async fn standby_advisor_makes_no_requests() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response("unused")))
        .expect(0)
        .mount(&server)
        .await;

    let base_url = server.uri();
    let advisor = Advisor::connect(None, AdvisorSettings::default(), |key| {
        GeminiClient::with_base_url(key, 30, &base_url)
    })
    .expect("standby construction cannot fail");

    assert!(advisor.is_standby());
    assert_eq!(advisor.get_advice("hello", "en").await, STANDBY_REPLY);
}

#[tokio::test]
async fn chat_session_over_http_grows_by_two_per_round() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response("Weed early.")))
        .expect(3)
        .mount(&server)
        .await;

    let advisor = advisor_for(&server, 30);
    let mut session = ChatSession::new(Language::Acholi);

    for question in ["one", "two", "three"] {
        session.ask(&advisor, question).await;
    }

    assert_eq!(session.len(), 7);
    assert_eq!(session.messages()[6].text, "Weed early.");
}
