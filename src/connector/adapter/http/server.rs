use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use tokio::net::TcpListener;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::application::DispatchChatUseCase;
use crate::domain::DomainError;

use super::payload::{ChatRequest, ChatResponse, ErrorResponse};

pub const CHAT_ROUTE: &str = "/api/chat";

/// Shared, immutable handler state. Nothing in here changes per request.
#[derive(Clone)]
pub struct AppState {
    use_case: Arc<DispatchChatUseCase>,
}

impl AppState {
    pub fn new(use_case: Arc<DispatchChatUseCase>) -> Self {
        Self { use_case }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route(CHAT_ROUTE, post(chat))
        .with_state(state)
}

/// Serve the chat endpoint on an already-bound listener until the process exits.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("Chat endpoint listening on http://{addr}{CHAT_ROUTE}");
    }
    axum::serve(listener, app(state)).await
}

async fn chat(State(state): State<AppState>, Json(request): Json<ChatRequest>) -> Response {
    let provider = request.provider_selection();
    let span = info_span!(
        "chat",
        request_id = %Uuid::new_v4(),
        provider = provider.label()
    );

    async move {
        match state.use_case.execute(request.into_command()).await {
            Ok(outcome) => (StatusCode::OK, Json(ChatResponse::from(outcome))).into_response(),
            Err(DomainError::InvalidInput(reason)) => {
                warn!("Rejected chat request: {reason}");
                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::empty_prompt(provider)),
                )
                    .into_response()
            }
            Err(e) => {
                error!("{} API error: {e}", provider.label());
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::provider_failure(provider)),
                )
                    .into_response()
            }
        }
    }
    .instrument(span)
    .await
}
