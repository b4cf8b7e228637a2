//! Integration tests for the OpenAI-compatible inference client.
//!
//! A throwaway axum server stands in for the gateway so the real
//! `OpenAIProvider` is exercised over HTTP: request shape, status mapping,
//! and the assessment pipeline on top of it.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use http::{HeaderMap, StatusCode};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use neurolearn::adapters::ai::{OpenAIConfig, OpenAIProvider};
use neurolearn::adapters::memory::{InMemoryAssessmentResponseRepository, InMemoryLearningProfileRepository};
use neurolearn::application::{RetryPolicy, RunAssessmentCommand, RunAssessmentHandler};
use neurolearn::domain::assessment::{
    AssessmentError, ProfileType, Questionnaire, ResponseCollector, INITIAL_SCREENING,
};
use neurolearn::domain::foundation::{CommandMetadata, UserId};
use neurolearn::ports::{AIError, AIProvider, CompletionRequest, MessageRole, RequestMetadata};

// =============================================================================
// Fake gateway
// =============================================================================

#[derive(Clone, Default)]
struct Gateway {
    replies: Arc<Mutex<VecDeque<(StatusCode, Value)>>>,
    seen: Arc<Mutex<Vec<(HeaderMap, Value)>>>,
}

impl Gateway {
    fn reply(&self, status: StatusCode, body: Value) -> &Self {
        self.replies.lock().unwrap().push_back((status, body));
        self
    }

    fn reply_content(&self, content: &str) -> &Self {
        self.reply(
            StatusCode::OK,
            json!({
                "model": "google/gemini-2.5-flash",
                "choices": [{
                    "message": { "role": "assistant", "content": content },
                    "finish_reason": "stop"
                }],
                "usage": { "prompt_tokens": 120, "completion_tokens": 80 }
            }),
        )
    }

    fn requests(&self) -> Vec<(HeaderMap, Value)> {
        self.seen.lock().unwrap().clone()
    }
}

async fn chat_completions(State(gateway): State<Gateway>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    gateway.seen.lock().unwrap().push((headers, body));
    let (status, reply) = gateway
        .replies
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or((StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": "no scripted reply" })));

    let mut response = (status, Json(reply)).into_response();
    if status == StatusCode::TOO_MANY_REQUESTS {
        response
            .headers_mut()
            .insert("retry-after", http::HeaderValue::from_static("7"));
    }
    response
}

/// Serves the gateway on an ephemeral port and returns a client for it.
async fn start(gateway: &Gateway) -> OpenAIProvider {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new()
        .route("/v1/chat/completions", post(chat_completions))
        .with_state(gateway.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    OpenAIProvider::new(
        OpenAIConfig::new("test-gateway-key")
            .with_base_url(format!("http://{}/v1", addr))
            .with_timeout(Duration::from_secs(5)),
    )
    .unwrap()
}

fn request(text: &str) -> CompletionRequest {
    CompletionRequest::new(RequestMetadata::new(UserId::new("learner-1").unwrap(), "assistant", "corr-1"))
        .with_system_prompt("You are a patient tutor.")
        .with_message(MessageRole::User, text)
}

fn adhd_analysis() -> Value {
    json!({
        "profileType": "adhd",
        "confidence": 78,
        "scores": {
            "attention": 35,
            "processing_speed": 70,
            "working_memory": 48,
            "reading_fluency": 66,
            "executive_function": 40
        },
        "recommendations": {
            "reading_speed": "medium",
            "font_preference": "standard",
            "color_scheme": "high_contrast",
            "break_frequency": "high",
            "content_chunking": "small"
        },
        "strengths": ["Hands-on learning"],
        "challenges": ["Sustained attention"],
        "summary": "Learns best through short, active sessions."
    })
}

fn assessment_command() -> RunAssessmentCommand {
    let questionnaire = Questionnaire::initial_screening();
    let answers: Vec<String> = questionnaire.questions().iter().map(|q| q.options[0].clone()).collect();
    RunAssessmentCommand {
        responses: ResponseCollector::replay(questionnaire, answers).unwrap(),
        assessment_type: INITIAL_SCREENING.to_string(),
    }
}

struct Pipeline {
    handler: RunAssessmentHandler,
    responses: InMemoryAssessmentResponseRepository,
    profiles: InMemoryLearningProfileRepository,
}

fn pipeline(provider: OpenAIProvider) -> Pipeline {
    let responses = InMemoryAssessmentResponseRepository::new();
    let profiles = InMemoryLearningProfileRepository::new();
    let handler = RunAssessmentHandler::new(
        Arc::new(responses.clone()),
        Arc::new(profiles.clone()),
        Arc::new(provider),
    );
    Pipeline {
        handler,
        responses,
        profiles,
    }
}

fn metadata() -> CommandMetadata {
    CommandMetadata::new(UserId::new("learner-1").unwrap())
}

// =============================================================================
// Wire format
// =============================================================================

#[tokio::test]
async fn sends_bearer_key_model_and_messages() {
    let gateway = Gateway::default();
    gateway.reply_content("Start with one paragraph.");
    let provider = start(&gateway).await;

    let response = provider.complete(request("How do I start?")).await.unwrap();

    assert_eq!(response.content, "Start with one paragraph.");
    assert_eq!(response.usage.prompt_tokens, 120);

    let (headers, body) = gateway.requests().remove(0);
    assert_eq!(headers["authorization"], "Bearer test-gateway-key");
    assert_eq!(body["model"], "google/gemini-2.5-flash");
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][1]["role"], "user");
    assert_eq!(body["messages"][1]["content"], "How do I start?");
    assert!(body.get("response_format").is_none());
}

#[tokio::test]
async fn json_object_requests_set_response_format() {
    let gateway = Gateway::default();
    gateway.reply_content("{}");
    let provider = start(&gateway).await;

    provider.complete(request("as json").json_object()).await.unwrap();

    let (_, body) = gateway.requests().remove(0);
    assert_eq!(body["response_format"]["type"], "json_object");
}

// =============================================================================
// Status mapping
// =============================================================================

#[tokio::test]
async fn server_error_is_unavailable() {
    let gateway = Gateway::default();
    gateway.reply(StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": "boom" }));
    let provider = start(&gateway).await;

    let err = provider.complete(request("hi")).await.unwrap_err();

    assert!(matches!(err, AIError::Unavailable { .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn too_many_requests_is_rate_limited_with_retry_after() {
    let gateway = Gateway::default();
    gateway.reply(StatusCode::TOO_MANY_REQUESTS, json!({ "error": "slow down" }));
    let provider = start(&gateway).await;

    let err = provider.complete(request("hi")).await.unwrap_err();
    assert_eq!(err, AIError::rate_limited(7));
}

#[tokio::test]
async fn payment_required_is_credits_exhausted() {
    let gateway = Gateway::default();
    gateway.reply(StatusCode::PAYMENT_REQUIRED, json!({ "error": "add credits" }));
    let provider = start(&gateway).await;

    let err = provider.complete(request("hi")).await.unwrap_err();

    assert_eq!(err, AIError::CreditsExhausted);
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn empty_choices_is_parse_error() {
    let gateway = Gateway::default();
    gateway.reply(StatusCode::OK, json!({ "choices": [] }));
    let provider = start(&gateway).await;

    let err = provider.complete(request("hi")).await.unwrap_err();
    assert!(matches!(err, AIError::Parse(_)));
}

// =============================================================================
// Assessment pipeline over HTTP
// =============================================================================

#[tokio::test]
async fn fenced_analysis_becomes_profile() {
    let gateway = Gateway::default();
    gateway.reply_content(&format!("```json\n{}\n```", adhd_analysis()));
    let p = pipeline(start(&gateway).await);

    let result = p.handler.handle(assessment_command(), metadata()).await.unwrap();

    assert_eq!(result.analysis.profile_type, ProfileType::Adhd);
    assert_eq!(result.profile.profile_type, ProfileType::Adhd);
    assert_eq!(p.responses.count().await, 1);
    assert_eq!(p.profiles.count().await, 1);

    let (_, body) = gateway.requests().remove(0);
    assert_eq!(body["response_format"]["type"], "json_object");
    let user_prompt = body["messages"][1]["content"].as_str().unwrap();
    assert!(user_prompt.contains("How long can you typically focus on a task without a break?"));
}

#[tokio::test]
async fn gateway_500_fails_transport_but_keeps_raw_row() {
    let gateway = Gateway::default();
    gateway.reply(StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": "boom" }));
    let p = pipeline(start(&gateway).await);

    let err = p.handler.handle(assessment_command(), metadata()).await.unwrap_err();

    assert!(matches!(err, AssessmentError::InferenceTransportFailure(_)));
    assert_eq!(p.responses.count().await, 1);
    assert_eq!(p.profiles.count().await, 0);
}

#[tokio::test]
async fn retry_policy_recovers_from_transient_500() {
    let gateway = Gateway::default();
    gateway
        .reply(StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": "boom" }))
        .reply_content(&adhd_analysis().to_string());
    let p = pipeline(start(&gateway).await);
    let handler = p
        .handler
        .with_retry_policy(RetryPolicy::new(2, Duration::from_millis(10)));

    let result = handler.handle(assessment_command(), metadata()).await.unwrap();

    assert_eq!(result.profile.profile_type, ProfileType::Adhd);
    assert_eq!(gateway.requests().len(), 2);
    assert_eq!(p.responses.count().await, 1);
}

#[tokio::test]
async fn missing_summary_is_validation_failure() {
    let gateway = Gateway::default();
    let mut analysis = adhd_analysis();
    analysis.as_object_mut().unwrap().remove("summary");
    gateway.reply_content(&analysis.to_string());
    let p = pipeline(start(&gateway).await);

    let err = p.handler.handle(assessment_command(), metadata()).await.unwrap_err();

    assert!(matches!(err, AssessmentError::InferenceValidationFailure(_)));
    assert_eq!(p.profiles.count().await, 0);
}
