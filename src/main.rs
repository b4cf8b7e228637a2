//! NeuroLearn API server.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use neurolearn::adapters::ai::{OpenAIConfig, OpenAIProvider};
use neurolearn::adapters::auth::{JwtConfig, JwtSessionValidator};
use neurolearn::adapters::http::{app_router, AssessmentHandlers, LearningHandlers, RouterConfig};
use neurolearn::adapters::memory::{InMemoryAssessmentResponseRepository, InMemoryLearningProfileRepository};
use neurolearn::adapters::postgres::{PostgresAssessmentResponseRepository, PostgresLearningProfileRepository};
use neurolearn::application::{
    AdaptContentHandler, AskAssistantHandler, GetLearningProfileHandler, ListAssessmentResponsesHandler,
    RetryPolicy, RunAssessmentHandler,
};
use neurolearn::config::{AppConfig, ServerConfig, ValidationError};
use neurolearn::domain::assessment::Questionnaire;
use neurolearn::ports::{AIProvider, AssessmentResponseRepository, LearningProfileRepository, SessionValidator};

type Stores = (Arc<dyn AssessmentResponseRepository>, Arc<dyn LearningProfileRepository>);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let (responses, profiles) = build_stores(&config).await?;

    let api_key = config
        .ai
        .api_key()
        .ok_or(ValidationError::MissingRequired("AI__API_KEY"))?;
    let ai_provider: Arc<dyn AIProvider> = Arc::new(OpenAIProvider::new(
        OpenAIConfig::new(api_key)
            .with_base_url(&config.ai.base_url)
            .with_model(&config.ai.model)
            .with_timeout(config.ai.timeout()),
    )?);
    let retry = RetryPolicy::new(config.ai.max_attempts, config.ai.retry_backoff());

    let run_handler = RunAssessmentHandler::new(responses.clone(), profiles.clone(), ai_provider.clone())
        .with_retry_policy(retry)
        .with_write_mode(config.assessment.profile_write_mode);
    let assessment = AssessmentHandlers::new(
        Arc::new(run_handler),
        Arc::new(GetLearningProfileHandler::new(profiles.clone())),
        Arc::new(ListAssessmentResponsesHandler::new(responses)),
        Questionnaire::initial_screening(),
        config.assessment.assessment_type.clone(),
    );
    let learning = LearningHandlers::new(
        Arc::new(AdaptContentHandler::new(profiles.clone(), ai_provider.clone()).with_retry_policy(retry)),
        Arc::new(AskAssistantHandler::new(profiles, ai_provider).with_retry_policy(retry)),
    );

    let validator: Arc<dyn SessionValidator> = Arc::new(JwtSessionValidator::new(jwt_config(&config)?));

    let router_config = RouterConfig {
        cors_origins: config.server.cors_origins_list(),
        request_timeout: config.server.request_timeout(),
    };
    let app = app_router(assessment, learning, validator, &router_config);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        model = %config.ai.model,
        write_mode = ?config.assessment.profile_write_mode,
        "NeuroLearn API listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// JSON logs in production, human-readable otherwise. `RUST_LOG` overrides
/// `server.log_level`.
fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    if server.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn build_stores(config: &AppConfig) -> Result<Stores, sqlx::Error> {
    if !config.database.is_configured() {
        tracing::warn!("No database URL configured, using in-memory stores");
        return Ok((
            Arc::new(InMemoryAssessmentResponseRepository::new()),
            Arc::new(InMemoryLearningProfileRepository::new()),
        ));
    }

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;
    tracing::info!("Connected to PostgreSQL");

    Ok((
        Arc::new(PostgresAssessmentResponseRepository::new(pool.clone())),
        Arc::new(PostgresLearningProfileRepository::new(pool)),
    ))
}

fn jwt_config(config: &AppConfig) -> Result<JwtConfig, ValidationError> {
    let secret = config
        .auth
        .jwt_secret()
        .ok_or(ValidationError::MissingRequired("AUTH__JWT_SECRET"))?;

    let mut jwt = JwtConfig::new(secret);
    if let Some(issuer) = &config.auth.issuer {
        jwt = jwt.with_issuer(issuer);
    }
    if let Some(audience) = &config.auth.audience {
        jwt = jwt.with_audience(audience);
    }
    Ok(jwt)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
