//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use tracing::{error, info, warn};

use super::responses::{
    ApiResponse, FolderRequest, FoldersResponse, HealthResponse, StartRequest, StatusResponse,
};
use crate::{
    error::AppError,
    services::{imaging::load_and_fit, pictures::folder_tree},
    state::{Action, AppState},
};

fn status_for(err: &AppError) -> StatusCode {
    match err {
        AppError::FolderNotFound(_) | AppError::NoPicture => StatusCode::NOT_FOUND,
        AppError::FolderOutsideBase(_) => StatusCode::BAD_REQUEST,
        AppError::LoopClosed => StatusCode::SERVICE_UNAVAILABLE,
        AppError::Image(_) | AppError::Io(_) | AppError::Join(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

async fn run_action(state: &AppState, action: Action) -> Result<Json<ApiResponse>, StatusCode> {
    let name = action.name();
    match state.dispatch(action).await {
        Ok((outcome, session)) => {
            info!("{} endpoint called - {}", name, outcome.message());
            Ok(Json(ApiResponse::from_outcome(&outcome, session)))
        }
        Err(e) => {
            error!("Failed to run {} action: {}", name, e);
            Err(status_for(&e))
        }
    }
}

/// Handle POST /start - Show a new picture and start a fresh countdown
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
    body: Option<Json<StartRequest>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    run_action(
        &state,
        Action::Start {
            amount: request.amount,
            unit: request.unit,
        },
    )
    .await
}

/// Handle POST /pause - Pause the countdown and show the folder picker
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    run_action(&state, Action::Pause).await
}

/// Handle POST /resume - Resume the countdown and show the picture
pub async fn resume_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    run_action(&state, Action::Resume).await
}

/// Handle POST /toggle - The pause/resume button
pub async fn toggle_pause_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    run_action(&state, Action::TogglePause).await
}

/// Handle POST /view/toggle - Flip between picker and picture
pub async fn toggle_view_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    run_action(&state, Action::ToggleView).await
}

/// Handle PUT /folder - Choose the scope pictures are drawn from
pub async fn folder_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FolderRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let selection = match state.pictures.resolve(request.path.as_deref()) {
        Ok(selection) => selection,
        Err(e) => {
            warn!("Rejected folder selection: {}", e);
            return Err(status_for(&e));
        }
    };
    run_action(&state, Action::SelectFolder(selection)).await
}

/// Handle GET /folders - Folder tree for the picker
pub async fn folders_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FoldersResponse>, StatusCode> {
    let base = state.pictures.base().to_path_buf();
    let scan_base = base.clone();

    let folders = tokio::task::spawn_blocking(move || folder_tree(&scan_base))
        .await
        .map_err(|e| {
            let err = AppError::from(e);
            error!("Failed to scan folders: {}", err);
            status_for(&err)
        })?;

    Ok(Json(FoldersResponse {
        base: base.to_string_lossy().into_owned(),
        folders,
    }))
}

/// Handle GET /picture - Current picture fitted to the display box, as PNG
pub async fn picture_handler(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, StatusCode> {
    let Some(path) = state.snapshot().picture else {
        return Err(status_for(&AppError::NoPicture));
    };
    let (max_width, max_height) = (state.max_width, state.max_height);

    let fitted = tokio::task::spawn_blocking(move || load_and_fit(&path, max_width, max_height))
        .await
        .map_err(AppError::from)
        .and_then(|result| result);

    match fitted {
        Ok(bytes) => Ok(([(header::CONTENT_TYPE, "image/png")], bytes)),
        Err(e) => {
            error!("Failed to load picture: {}", e);
            Err(status_for(&e))
        }
    }
}

/// Handle GET /status - Return current session status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        session: state.snapshot(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
