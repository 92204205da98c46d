use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, warn};

use crate::sql::GenerateError;
use crate::web::state::AppState;

const SERVICE_NAME: &str = "Groq SQL Generator";

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SqlResponse {
    pub sql: String,
    pub success: bool,
    pub error: Option<String>,
}

impl SqlResponse {
    fn generated(sql: String) -> Self {
        Self {
            sql,
            success: true,
            error: None,
        }
    }

    fn failed(message: String) -> Self {
        Self {
            sql: String::new(),
            success: false,
            error: Some(message),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Endpoints {
    pub generate_sql: &'static str,
    pub health: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub service: &'static str,
    pub status: &'static str,
    pub groq_configured: bool,
    pub model: String,
    pub endpoints: Endpoints,
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub groq_available: bool,
}

impl GenerateError {
    fn status_code(&self) -> StatusCode {
        match self {
            GenerateError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            GenerateError::EmptyGeneration | GenerateError::ForbiddenOperation { .. } => {
                StatusCode::BAD_REQUEST
            }
            GenerateError::Llm(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for GenerateError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            GenerateError::Llm(e) => error!("SQL generation failed: {}", e),
            other => warn!("SQL generation rejected ({}): {}", status, other),
        }

        (status, Json(SqlResponse::failed(self.to_string()))).into_response()
    }
}

pub async fn root(State(state): State<Arc<AppState>>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: SERVICE_NAME,
        status: "running",
        groq_configured: state.groq_configured(),
        model: state.config.llm.model.clone(),
        endpoints: Endpoints {
            generate_sql: "/generate-sql",
            health: "/health",
        },
    })
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy",
        groq_available: state.groq_configured(),
    })
}

pub async fn generate_sql(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!("Rejected /generate-sql request body: {}", rejection.body_text());
            let status = rejection.status();
            return (status, Json(SqlResponse::failed(rejection.body_text()))).into_response();
        }
    };

    match state.generator.generate(&payload.query).await {
        Ok(sql) => Json(SqlResponse::generated(sql)).into_response(),
        Err(e) => e.into_response(),
    }
}
