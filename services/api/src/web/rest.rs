//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.
//!
//! Each session endpoint maps 1:1 onto a user action of the interaction
//! controller: generate a summary, ask a question, end the Q&A session.

use crate::web::state::{AppState, SessionHandle};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;
use video_summarizer_core::{
    ActionError, AskOutcome, QaEntry, SessionPhase, SessionState, DEFAULT_INSTRUCTION,
};

type HandlerError = (StatusCode, String);

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        create_session_handler,
        get_session_handler,
        delete_session_handler,
        generate_summary_handler,
        ask_question_handler,
        end_session_handler,
        list_models_handler,
    ),
    components(
        schemas(
            CreateSessionResponse,
            SessionView,
            QaEntryView,
            GenerateSummaryRequest,
            AskQuestionRequest,
            AskQuestionResponse,
            ModelsResponse,
        )
    ),
    tags(
        (name = "Video Summarizer API", description = "Summarize a video's captions and ask questions about the summary.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

/// The response payload sent after successfully creating a session.
#[derive(Serialize, ToSchema)]
pub struct CreateSessionResponse {
    session_id: Uuid,
}

/// One answered question, numbered from 1 for the most recent entry.
#[derive(Serialize, ToSchema)]
pub struct QaEntryView {
    number: usize,
    question: String,
    answer: String,
    asked_at: DateTime<Utc>,
}

/// A snapshot of a session's state.
#[derive(Serialize, ToSchema)]
pub struct SessionView {
    session_id: Uuid,
    #[schema(value_type = String, example = "qa_active")]
    phase: SessionPhase,
    qa_active: bool,
    summary: Option<String>,
    model: Option<String>,
    /// Most recent first.
    history: Vec<QaEntryView>,
}

impl SessionView {
    fn new(session_id: Uuid, state: &SessionState) -> Self {
        Self {
            session_id,
            phase: state.phase(),
            qa_active: state.qa_active(),
            summary: state.summary().map(str::to_string),
            model: state.model().map(str::to_string),
            history: state
                .history_newest_first()
                .enumerate()
                .map(|(i, entry)| QaEntryView::new(i + 1, entry))
                .collect(),
        }
    }
}

impl QaEntryView {
    fn new(number: usize, entry: &QaEntry) -> Self {
        Self {
            number,
            question: entry.question.clone(),
            answer: entry.answer.clone(),
            asked_at: entry.asked_at,
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct GenerateSummaryRequest {
    /// A `youtu.be` or `youtube.com/watch?v=` link.
    #[serde(default)]
    url: String,
    /// Instruction for the summary. Defaults to "Summarize this video for a blog post."
    prompt: Option<String>,
    /// One of the configured models. Defaults to the first one.
    model: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct AskQuestionRequest {
    #[serde(default)]
    question: String,
    /// Overrides the model that produced the summary.
    model: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct AskQuestionResponse {
    /// Absent when the question was blank and therefore ignored.
    answer: Option<QaEntryView>,
    session: SessionView,
}

#[derive(Serialize, ToSchema)]
pub struct ModelsResponse {
    models: Vec<String>,
    default_model: String,
}

//=========================================================================================
// Helpers
//=========================================================================================

async fn find_session(app_state: &AppState, session_id: Uuid) -> Result<SessionHandle, HandlerError> {
    app_state.sessions.get(session_id).await.ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            format!("Session {} not found", session_id),
        )
    })
}

fn check_model(app_state: &AppState, model: &str) -> Result<(), HandlerError> {
    if app_state.config.is_allowed_model(model) {
        Ok(())
    } else {
        Err((
            StatusCode::BAD_REQUEST,
            format!(
                "Unsupported model '{}'. Choose one of: {}",
                model,
                app_state.config.allowed_models.join(", ")
            ),
        ))
    }
}

/// Maps a failed action onto a status code. The message is shown to the user as-is.
fn action_error_response(session_id: Uuid, err: ActionError) -> HandlerError {
    warn!(%session_id, error = %err, "Action failed");
    let status = match &err {
        ActionError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        ActionError::Port(_) => StatusCode::BAD_GATEWAY,
    };
    (status, err.to_string())
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Start a new interactive session.
#[utoipa::path(
    post,
    path = "/sessions",
    responses(
        (status = 201, description = "Session created", body = CreateSessionResponse)
    )
)]
pub async fn create_session_handler(State(app_state): State<Arc<AppState>>) -> impl IntoResponse {
    let session_id = app_state.sessions.create().await;
    info!(%session_id, "Session created");
    (StatusCode::CREATED, Json(CreateSessionResponse { session_id }))
}

/// Show the current summary, Q&A status and history of a session.
#[utoipa::path(
    get,
    path = "/sessions/{id}",
    params(("id" = Uuid, Path, description = "The session ID.")),
    responses(
        (status = 200, description = "Session state", body = SessionView),
        (status = 404, description = "Unknown session")
    )
)]
pub async fn get_session_handler(
    State(app_state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionView>, HandlerError> {
    let handle = find_session(&app_state, session_id).await?;
    let state = handle.lock().await;
    Ok(Json(SessionView::new(session_id, &state)))
}

/// Terminate a session and discard its state.
#[utoipa::path(
    delete,
    path = "/sessions/{id}",
    params(("id" = Uuid, Path, description = "The session ID.")),
    responses(
        (status = 204, description = "Session terminated"),
        (status = 404, description = "Unknown session")
    )
)]
pub async fn delete_session_handler(
    State(app_state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, HandlerError> {
    if app_state.sessions.remove(session_id).await {
        info!(%session_id, "Session terminated");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((
            StatusCode::NOT_FOUND,
            format!("Session {} not found", session_id),
        ))
    }
}

/// Fetch the video's captions and generate a summary. Activates Q&A.
#[utoipa::path(
    post,
    path = "/sessions/{id}/summary",
    params(("id" = Uuid, Path, description = "The session ID.")),
    request_body = GenerateSummaryRequest,
    responses(
        (status = 200, description = "Summary generated", body = SessionView),
        (status = 400, description = "Empty or malformed URL, or unsupported model"),
        (status = 404, description = "Unknown session"),
        (status = 502, description = "Transcript unavailable or LLM request failed")
    )
)]
pub async fn generate_summary_handler(
    State(app_state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<GenerateSummaryRequest>,
) -> Result<Json<SessionView>, HandlerError> {
    let handle = find_session(&app_state, session_id).await?;

    let model = payload
        .model
        .unwrap_or_else(|| app_state.config.default_model().to_string());
    check_model(&app_state, &model)?;
    let instruction = payload
        .prompt
        .unwrap_or_else(|| DEFAULT_INSTRUCTION.to_string());

    let mut state = handle.lock().await;
    app_state
        .controller
        .generate_summary(&mut state, &payload.url, &instruction, &model)
        .await
        .map_err(|e| action_error_response(session_id, e))?;

    Ok(Json(SessionView::new(session_id, &state)))
}

/// Ask a question about the current summary.
#[utoipa::path(
    post,
    path = "/sessions/{id}/questions",
    params(("id" = Uuid, Path, description = "The session ID.")),
    request_body = AskQuestionRequest,
    responses(
        (status = 200, description = "Question answered, or ignored when blank", body = AskQuestionResponse),
        (status = 400, description = "Unsupported model"),
        (status = 404, description = "Unknown session"),
        (status = 409, description = "Q&A is not active for this session"),
        (status = 502, description = "LLM request failed")
    )
)]
pub async fn ask_question_handler(
    State(app_state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<AskQuestionRequest>,
) -> Result<Json<AskQuestionResponse>, HandlerError> {
    let handle = find_session(&app_state, session_id).await?;
    if let Some(model) = payload.model.as_deref() {
        check_model(&app_state, model)?;
    }

    let mut state = handle.lock().await;
    let outcome = app_state
        .controller
        .ask_question(&mut state, &payload.question, payload.model.as_deref())
        .await
        .map_err(|e| action_error_response(session_id, e))?;

    let answer = match outcome {
        AskOutcome::Answered(entry) => Some(QaEntryView::new(1, &entry)),
        AskOutcome::IgnoredBlank => None,
        AskOutcome::Inactive => {
            return Err((
                StatusCode::CONFLICT,
                "Q&A is not active for this session. Generate a summary first.".to_string(),
            ))
        }
    };

    Ok(Json(AskQuestionResponse {
        answer,
        session: SessionView::new(session_id, &state),
    }))
}

/// End the Q&A session: clears the history and keeps the summary.
#[utoipa::path(
    post,
    path = "/sessions/{id}/end",
    params(("id" = Uuid, Path, description = "The session ID.")),
    responses(
        (status = 200, description = "Q&A ended", body = SessionView),
        (status = 404, description = "Unknown session"),
        (status = 409, description = "Q&A is not active for this session")
    )
)]
pub async fn end_session_handler(
    State(app_state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionView>, HandlerError> {
    let handle = find_session(&app_state, session_id).await?;
    let mut state = handle.lock().await;

    if !app_state.controller.end_session(&mut state) {
        return Err((
            StatusCode::CONFLICT,
            "Q&A is not active for this session.".to_string(),
        ));
    }

    Ok(Json(SessionView::new(session_id, &state)))
}

/// List the models a summary can be generated with.
#[utoipa::path(
    get,
    path = "/models",
    responses(
        (status = 200, description = "Configured models", body = ModelsResponse)
    )
)]
pub async fn list_models_handler(State(app_state): State<Arc<AppState>>) -> Json<ModelsResponse> {
    Json(ModelsResponse {
        models: app_state.config.allowed_models.clone(),
        default_model: app_state.config.default_model().to_string(),
    })
}
