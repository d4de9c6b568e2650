pub mod rest;
pub mod state;

use axum::{
    http::{
        header::{ACCEPT, CONTENT_TYPE},
        Method,
    },
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Re-export the handlers to make them easily accessible
// to the binary that builds the web server router.
pub use rest::{
    ask_question_handler, create_session_handler, delete_session_handler, end_session_handler,
    generate_summary_handler, get_session_handler, list_models_handler, ApiDoc,
};
pub use state::AppState;

/// Builds the complete application: the session API plus the Swagger UI forms.
pub fn router(app_state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, ACCEPT]);

    let api_router = Router::new()
        .route("/models", get(list_models_handler))
        .route("/sessions", post(create_session_handler))
        .route(
            "/sessions/{id}",
            get(get_session_handler).delete(delete_session_handler),
        )
        .route("/sessions/{id}/summary", post(generate_summary_handler))
        .route("/sessions/{id}/questions", post(ask_question_handler))
        .route("/sessions/{id}/end", post(end_session_handler))
        .layer(cors)
        .with_state(app_state);

    // Merge the API router with the Swagger UI router for a complete application.
    Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
