//! Integration tests for the HTTP surface.
//!
//! These drive the full router (auth middleware, assessment and learning
//! routes) against in-memory stores and a scripted AI provider:
//! 1. A completed questionnaire becomes a stored profile
//! 2. Inference failures surface as 502 while the raw submission survives
//! 3. Content adaptation and the assistant read the stored profile

use std::sync::Arc;

use axum::body::Body;
use axum::Router;
use http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use neurolearn::adapters::ai::{MockAIProvider, MockError};
use neurolearn::adapters::auth::MockSessionValidator;
use neurolearn::adapters::http::{app_router, AssessmentHandlers, LearningHandlers, RouterConfig};
use neurolearn::adapters::memory::{InMemoryAssessmentResponseRepository, InMemoryLearningProfileRepository};
use neurolearn::application::{
    AdaptContentHandler, AskAssistantHandler, GetLearningProfileHandler, ListAssessmentResponsesHandler,
    RunAssessmentHandler,
};
use neurolearn::domain::assessment::{Questionnaire, INITIAL_SCREENING};
use neurolearn::ports::{AssessmentResponseRepository, LearningProfileRepository, ResponseFormat};

// =============================================================================
// Test Infrastructure
// =============================================================================

const TOKEN: &str = "learner-token";
const LEARNER: &str = "8a1f4d3e-0b6c-4c59-9f0e-3f2d1c7b5a90";

struct TestApp {
    router: Router,
    responses: InMemoryAssessmentResponseRepository,
    profiles: InMemoryLearningProfileRepository,
    ai: MockAIProvider,
}

impl TestApp {
    fn new(ai: MockAIProvider) -> Self {
        let responses = InMemoryAssessmentResponseRepository::new();
        let profiles = InMemoryLearningProfileRepository::new();

        let response_store: Arc<dyn AssessmentResponseRepository> = Arc::new(responses.clone());
        let profile_store: Arc<dyn LearningProfileRepository> = Arc::new(profiles.clone());
        let provider = Arc::new(ai.clone());

        let assessment = AssessmentHandlers::new(
            Arc::new(RunAssessmentHandler::new(
                response_store.clone(),
                profile_store.clone(),
                provider.clone(),
            )),
            Arc::new(GetLearningProfileHandler::new(profile_store.clone())),
            Arc::new(ListAssessmentResponsesHandler::new(response_store)),
            Questionnaire::initial_screening(),
            INITIAL_SCREENING,
        );
        let learning = LearningHandlers::new(
            Arc::new(AdaptContentHandler::new(profile_store.clone(), provider.clone())),
            Arc::new(AskAssistantHandler::new(profile_store, provider)),
        );
        let validator = Arc::new(MockSessionValidator::new().with_test_user(TOKEN, LEARNER));

        Self {
            router: app_router(assessment, learning, validator, &RouterConfig::default()),
            responses,
            profiles,
            ai,
        }
    }

    /// Queues another scripted reply; the router shares the provider's queue.
    fn queue_reply(&self, reply: impl Into<String>) {
        let _ = self.ai.clone().with_response(reply);
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", TOKEN))
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", TOKEN))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }
}

fn first_options() -> Vec<String> {
    Questionnaire::initial_screening()
        .questions()
        .iter()
        .map(|q| q.options[0].clone())
        .collect()
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

/// An app whose learner already completed the screening.
async fn assessed_app(ai: MockAIProvider) -> TestApp {
    let app = TestApp::new(ai.with_response(adhd_analysis().to_string()));
    let (status, _) = app
        .post("/api/assessment", json!({ "answers": first_options() }))
        .await;
    assert_eq!(status, StatusCode::OK);
    app
}

// =============================================================================
// Health and authentication
// =============================================================================

#[tokio::test]
async fn health_needs_no_token() {
    let app = TestApp::new(MockAIProvider::new());
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn api_without_token_is_unauthorized() {
    let app = TestApp::new(MockAIProvider::new());
    let request = Request::builder()
        .method("POST")
        .uri("/api/assessment")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "answers": first_options() }).to_string()))
        .unwrap();

    let (status, _) = app.send(request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.responses.count().await, 0);
    assert_eq!(app.ai.call_count(), 0);
}

#[tokio::test]
async fn api_with_unknown_token_is_unauthorized() {
    let app = TestApp::new(MockAIProvider::new());
    let request = Request::builder()
        .uri("/api/profile")
        .header(header::AUTHORIZATION, "Bearer someone-else")
        .body(Body::empty())
        .unwrap();

    let (status, _) = app.send(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Assessment pipeline
// =============================================================================

#[tokio::test]
async fn questionnaire_lists_five_questions() {
    let app = TestApp::new(MockAIProvider::new());

    let (status, body) = app.get("/api/assessment/questionnaire").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["assessment_type"], INITIAL_SCREENING);
    assert_eq!(body["questions"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn completed_questionnaire_becomes_profile() {
    let app = TestApp::new(MockAIProvider::new().with_response(adhd_analysis().to_string()));

    let (status, body) = app
        .post("/api/assessment", json!({ "answers": first_options() }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["analysis"], adhd_analysis());
    assert_eq!(app.responses.count().await, 1);
    assert_eq!(app.profiles.count().await, 1);

    let calls = app.ai.get_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].response_format, ResponseFormat::JsonObject);
    assert!(calls[0].messages[0]
        .content
        .contains("Visual demonstrations and diagrams"));

    let (status, profile) = app.get("/api/profile").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["profile_type"], "adhd");
    assert_eq!(profile["preferences"]["color_scheme"], "high_contrast");
    assert_eq!(profile["cognitive_metrics"], adhd_analysis()["scores"]);
}

#[tokio::test]
async fn resubmission_replaces_profile() {
    let mut dyslexia = adhd_analysis();
    dyslexia["profileType"] = "dyslexia".into();
    let app = assessed_app(MockAIProvider::new().with_response(dyslexia.to_string())).await;
    let (_, first) = app.get("/api/profile").await;

    // assessed_app queued its reply after ours, so the first submission got
    // the dyslexia analysis and this one gets the adhd analysis.
    let (status, _) = app
        .post("/api/assessment", json!({ "answers": first_options() }))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, second) = app.get("/api/profile").await;
    assert_eq!(first["profile_type"], "dyslexia");
    assert_eq!(second["profile_type"], "adhd");
    assert_eq!(second["id"], first["id"]);
    assert_eq!(app.profiles.count().await, 1);
    assert_eq!(app.responses.count().await, 2);
}

#[tokio::test]
async fn incomplete_answers_are_rejected_before_anything_runs() {
    let app = TestApp::new(MockAIProvider::new());
    let mut answers = first_options();
    answers.truncate(2);

    let (status, body) = app.post("/api/assessment", json!({ "answers": answers })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_ANSWERS");
    assert_eq!(app.responses.count().await, 0);
    assert_eq!(app.ai.call_count(), 0);
}

#[tokio::test]
async fn answer_outside_options_is_rejected() {
    let app = TestApp::new(MockAIProvider::new());
    let mut answers = first_options();
    answers[2] = "All day long".to_string();

    let (status, _) = app.post("/api/assessment", json!({ "answers": answers })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.responses.count().await, 0);
}

#[tokio::test]
async fn gateway_failure_is_502_and_keeps_raw_submission() {
    let app = TestApp::new(MockAIProvider::new().with_error(MockError::Unavailable {
        message: "Server error 500".into(),
    }));

    let (status, body) = app
        .post("/api/assessment", json!({ "answers": first_options() }))
        .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "INFERENCE_TRANSPORT_FAILURE");
    assert_eq!(app.responses.count().await, 1);
    assert_eq!(app.profiles.count().await, 0);

    let (status, _) = app.get("/api/profile").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unparseable_analysis_is_502() {
    let app = TestApp::new(MockAIProvider::new().with_response("I think you are a visual learner."));

    let (status, body) = app
        .post("/api/assessment", json!({ "answers": first_options() }))
        .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "INFERENCE_PARSE_FAILURE");
    assert_eq!(app.responses.count().await, 1);
    assert_eq!(app.profiles.count().await, 0);
}

#[tokio::test]
async fn history_lists_raw_submissions() {
    let app = assessed_app(MockAIProvider::new()).await;

    let (status, body) = app.get("/api/assessment/responses").await;

    assert_eq!(status, StatusCode::OK);
    let responses = body["responses"].as_array().unwrap();
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0]["assessment_type"], INITIAL_SCREENING);
    assert_eq!(responses[0]["responses"]["questions"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn profile_before_assessment_is_404() {
    let app = TestApp::new(MockAIProvider::new());

    let (status, _) = app.get("/api/profile").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Content adaptation and assistant
// =============================================================================

#[tokio::test]
async fn simplify_returns_text() {
    let app = assessed_app(MockAIProvider::new()).await;
    app.queue_reply("Plants use light to make food.");

    let (status, body) = app
        .post(
            "/api/content/adapt",
            json!({ "content": "Photosynthesis converts light energy...", "action": "simplify" }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], "Plants use light to make food.");
    let last = app.ai.get_calls().pop().unwrap();
    assert!(last.system_prompt.unwrap().contains("adhd"));
}

#[tokio::test]
async fn suggest_activities_returns_list() {
    let app = assessed_app(MockAIProvider::new()).await;
    let activities = json!({
        "activities": [{
            "title": "Leaf sketch",
            "description": "Draw a leaf and label where light is absorbed.",
            "duration": "10 minutes",
            "difficulty": "easy",
            "type": "creative"
        }]
    });
    app.queue_reply(activities.to_string());

    let (status, body) = app
        .post(
            "/api/content/adapt",
            json!({ "content": "Photosynthesis converts light energy...", "action": "suggest_activities" }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"][0]["title"], "Leaf sketch");
    assert_eq!(body["result"][0]["type"], "creative");
}

#[tokio::test]
async fn adaptation_without_profile_is_404() {
    let app = TestApp::new(MockAIProvider::new());

    let (status, _) = app
        .post("/api/content/adapt", json!({ "content": "Cells divide.", "action": "simplify" }))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(app.ai.call_count(), 0);
}

#[tokio::test]
async fn blank_content_is_400() {
    let app = assessed_app(MockAIProvider::new()).await;

    let (status, _) = app
        .post("/api/content/adapt", json!({ "content": "   ", "action": "simplify" }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn assistant_answers_without_profile() {
    let app = TestApp::new(MockAIProvider::new().with_response("Try breaking it into steps."));

    let (status, body) = app
        .post("/api/assistant", json!({ "message": "How do I start my essay?" }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reply"], "Try breaking it into steps.");
    let call = &app.ai.get_calls()[0];
    assert!(call.system_prompt.as_deref().unwrap().contains("Not assessed yet"));
}

#[tokio::test]
async fn assistant_gateway_failure_is_502() {
    let app = TestApp::new(MockAIProvider::new().with_error(MockError::RateLimited { retry_after_secs: 5 }));

    let (status, _) = app
        .post("/api/assistant", json!({ "message": "Explain fractions" }))
        .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
}
