//! Axum route handlers for the Canvas API.
//!
//! One submission is two calls: `generate` runs the LLM and returns the raw
//! markup (displayed by the form shell) plus the suggested file name;
//! `document` turns previously generated markup into the downloadable .docx.
//! Nothing is persisted between the two — the shell carries the markup back.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::canvas::extractor::extract_blocks;
use crate::canvas::prompts::{build_prompt, GENERATION_SYSTEM};
use crate::canvas::{BusinessProfile, SupplementaryFields};
use crate::document::{assemble, DOCX_CONTENT_TYPE};
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateCanvasRequest {
    pub profile: BusinessProfile,
    #[serde(default)]
    pub fields: SupplementaryFields,
}

#[derive(Debug, Serialize)]
pub struct GenerateCanvasResponse {
    /// Raw generated markup, for display and for the document call.
    pub markup: String,
    /// Suggested download file name for the eventual document.
    pub filename: String,
}

#[derive(Debug, Deserialize)]
pub struct CanvasDocumentRequest {
    pub profile: BusinessProfile,
    pub markup: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/canvas/generate
///
/// Builds the category metaprompt + instructions + supplementary fields into
/// one payload and runs the single generation call. Any failure aborts the
/// run with one user-facing error; no document is produced.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateCanvasRequest>,
) -> Result<Json<GenerateCanvasResponse>, AppError> {
    if request.profile.name.trim().is_empty() {
        return Err(AppError::Validation(
            "business name cannot be empty".to_string(),
        ));
    }

    info!(
        "Generating canvas for '{}' (category {:?})",
        request.profile.name, request.profile.category
    );

    let prompt = build_prompt(&request.profile, &request.fields);
    let markup = state
        .llm
        .generate(&prompt, GENERATION_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("canvas generation failed: {e}")))?;

    Ok(Json(GenerateCanvasResponse {
        filename: request.profile.document_filename(),
        markup,
    }))
}

/// POST /api/v1/canvas/document
///
/// Extracts the nine blocks from previously generated markup and returns the
/// assembled .docx. Blocks the generator omitted render with an empty body —
/// that is normal, not exceptional.
pub async fn handle_document(
    State(_state): State<AppState>,
    Json(request): Json<CanvasDocumentRequest>,
) -> Result<Response, AppError> {
    if request.profile.name.trim().is_empty() {
        return Err(AppError::Validation(
            "business name cannot be empty".to_string(),
        ));
    }

    let blocks = extract_blocks(&request.markup);
    let bytes = assemble(&request.profile, &blocks)?;
    let filename = request.profile.document_filename();

    info!(
        "Assembled canvas document '{}' ({} bytes)",
        filename,
        bytes.len()
    );

    let headers = [
        (header::CONTENT_TYPE, DOCX_CONTENT_TYPE.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ),
    ];

    Ok((headers, bytes).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::Router;
    use chrono::NaiveDate;
    use serde_json::{json, Value};

    use crate::canvas::BusinessCategory;
    use crate::config::Config;
    use crate::llm_client::LlmClient;

    /// State wired to a local stand-in for the generation endpoint.
    async fn state_with_failing_generator() -> AppState {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let stub = Router::new().route(
            "/v1/chat/completions",
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": {"message": "upstream unavailable"}})),
                )
            }),
        );
        tokio::spawn(async move { axum::serve(listener, stub).await.unwrap() });

        AppState {
            llm: LlmClient::with_api_url(
                "test-key".to_string(),
                format!("http://{addr}/v1/chat/completions"),
            ),
            config: Config {
                openai_api_key: "test-key".to_string(),
                port: 0,
                rust_log: "info".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn test_generation_failure_surfaces_one_error_and_no_markup() {
        let state = state_with_failing_generator().await;
        let request = GenerateCanvasRequest {
            profile: BusinessProfile {
                name: "Acme".to_string(),
                category: BusinessCategory::Startup,
                date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            },
            fields: SupplementaryFields::default(),
        };

        let err = handle_generate(State(state), Json(request))
            .await
            .err()
            .expect("a failed generation call must abort the run");

        // The caller gets exactly one generic error and nothing to download.
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "LLM_ERROR");
        assert_eq!(
            body["error"]["message"],
            "Erreur lors de la génération du contenu"
        );
    }

    #[test]
    fn test_generate_request_deserializes_with_default_fields() {
        let json = serde_json::json!({
            "profile": {"name": "Acme", "category": "Startup", "date": "2026-01-15"}
        });
        let request: GenerateCanvasRequest = serde_json::from_value(json).unwrap();
        assert_eq!(request.profile.name, "Acme");
        assert_eq!(request.profile.category, BusinessCategory::Startup);
        assert_eq!(request.fields.partenaires_cles, "");
    }

    #[test]
    fn test_document_request_deserializes() {
        let json = serde_json::json!({
            "profile": {"name": "Acme", "category": "PME", "date": "2026-01-15"},
            "markup": "<h2>Partenaires clés</h2><p>ok</p>"
        });
        let request: CanvasDocumentRequest = serde_json::from_value(json).unwrap();
        assert!(request.markup.contains("Partenaires"));
    }
}
