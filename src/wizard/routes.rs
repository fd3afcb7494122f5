//! REST endpoints for the two wizard flows.
//!
//! Two entry routes (`/api/kyc/sessions`, `/api/kyb/sessions`) each mount an
//! independent wizard instance; everything after creation is addressed by
//! session id, so the remaining endpoints are shared between the flows.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SessionError;
use crate::notify::Notice;

use super::manager::WizardManager;
use super::reducer::{Action, Outcome};
use super::state::{DocumentFile, DocumentSlot, DocumentType, WizardState};

/// Shared state for wizard routes.
#[derive(Clone)]
pub struct WizardRouteState {
    pub kyc: Arc<WizardManager>,
    pub kyb: Arc<WizardManager>,
}

impl WizardRouteState {
    fn managers(&self) -> [&Arc<WizardManager>; 2] {
        [&self.kyc, &self.kyb]
    }

    /// Apply an action to whichever flow owns the session.
    async fn apply(&self, id: Uuid, action: Action) -> Result<SessionResponse, StatusCode> {
        for manager in self.managers() {
            match manager.apply(id, action.clone()).await {
                Ok(outcome) => return Ok(respond(manager, id, outcome)),
                Err(SessionError::NotFound { .. }) => continue,
            }
        }
        Err(StatusCode::NOT_FOUND)
    }
}

/// Progress of the session within its flow, 1-based.
#[derive(Debug, Serialize)]
pub struct Progress {
    pub step_index: usize,
    pub step_count: usize,
}

/// Session snapshot returned by every endpoint.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub state: WizardState,
    pub progress: Progress,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

fn respond(manager: &WizardManager, id: Uuid, outcome: Outcome) -> SessionResponse {
    let (step_index, step_count) = manager.progress(&outcome.state);
    SessionResponse {
        session_id: id,
        state: outcome.state,
        progress: Progress {
            step_index,
            step_count,
        },
        notice: outcome.notice,
    }
}

async fn create_session(manager: &WizardManager) -> (StatusCode, Json<SessionResponse>) {
    let (id, state) = manager.create_session().await;
    let response = respond(
        manager,
        id,
        Outcome {
            state,
            notice: None,
        },
    );
    (StatusCode::CREATED, Json(response))
}

/// POST /api/kyc/sessions
async fn create_kyc(State(state): State<WizardRouteState>) -> (StatusCode, Json<SessionResponse>) {
    create_session(&state.kyc).await
}

/// POST /api/kyb/sessions
async fn create_kyb(State(state): State<WizardRouteState>) -> (StatusCode, Json<SessionResponse>) {
    create_session(&state.kyb).await
}

/// GET /api/sessions/{id}
async fn get_session(
    State(state): State<WizardRouteState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, StatusCode> {
    for manager in state.managers() {
        if let Ok(snapshot) = manager.get(id).await {
            return Ok(Json(respond(
                manager,
                id,
                Outcome {
                    state: snapshot,
                    notice: None,
                },
            )));
        }
    }
    Err(StatusCode::NOT_FOUND)
}

#[derive(Debug, Deserialize)]
struct SetFieldRequest {
    name: String,
    value: String,
}

/// POST /api/sessions/{id}/fields
async fn set_field(
    State(state): State<WizardRouteState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SetFieldRequest>,
) -> Result<Json<SessionResponse>, StatusCode> {
    state
        .apply(
            id,
            Action::SetField {
                name: req.name,
                value: req.value,
            },
        )
        .await
        .map(Json)
}

#[derive(Debug, Deserialize)]
struct SetDocumentRequest {
    slot: DocumentSlot,
    /// Display name of the picked file; `null` models an aborted picker.
    file_name: Option<String>,
}

/// POST /api/sessions/{id}/documents
async fn set_document(
    State(state): State<WizardRouteState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SetDocumentRequest>,
) -> Result<Json<SessionResponse>, StatusCode> {
    state
        .apply(
            id,
            Action::SetDocument {
                slot: req.slot,
                file: req.file_name.map(DocumentFile::new),
            },
        )
        .await
        .map(Json)
}

#[derive(Debug, Deserialize)]
struct SetDocumentTypeRequest {
    document_type: DocumentType,
}

/// POST /api/sessions/{id}/document-type
async fn set_document_type(
    State(state): State<WizardRouteState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SetDocumentTypeRequest>,
) -> Result<Json<SessionResponse>, StatusCode> {
    state
        .apply(
            id,
            Action::SetDocumentType {
                document_type: req.document_type,
            },
        )
        .await
        .map(Json)
}

#[derive(Debug, Deserialize)]
struct SetRewardsRequest {
    wants_rewards: bool,
}

/// POST /api/sessions/{id}/rewards
async fn set_rewards(
    State(state): State<WizardRouteState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SetRewardsRequest>,
) -> Result<Json<SessionResponse>, StatusCode> {
    state
        .apply(
            id,
            Action::SetWantsRewards {
                wants_rewards: req.wants_rewards,
            },
        )
        .await
        .map(Json)
}

#[derive(Debug, Deserialize)]
struct SetWalletRequest {
    address: String,
}

/// POST /api/sessions/{id}/wallet — manual address entry.
async fn set_wallet(
    State(state): State<WizardRouteState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SetWalletRequest>,
) -> Result<Json<SessionResponse>, StatusCode> {
    state
        .apply(id, Action::SetWalletAddress { address: req.address })
        .await
        .map(Json)
}

/// POST /api/sessions/{id}/next
async fn go_next(
    State(state): State<WizardRouteState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, StatusCode> {
    state.apply(id, Action::GoNext).await.map(Json)
}

/// POST /api/sessions/{id}/back
async fn go_back(
    State(state): State<WizardRouteState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, StatusCode> {
    state.apply(id, Action::GoBack).await.map(Json)
}

/// POST /api/sessions/{id}/connect-wallet
async fn connect_wallet(
    State(state): State<WizardRouteState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, StatusCode> {
    for manager in state.managers() {
        match manager.connect_wallet(id).await {
            Ok(outcome) => return Ok(Json(respond(manager, id, outcome))),
            Err(SessionError::NotFound { .. }) => continue,
        }
    }
    Err(StatusCode::NOT_FOUND)
}

/// DELETE /api/sessions/{id} — abandon the wizard.
async fn remove_session(
    State(state): State<WizardRouteState>,
    Path(id): Path<Uuid>,
) -> StatusCode {
    for manager in state.managers() {
        if manager.remove_session(id).await {
            return StatusCode::NO_CONTENT;
        }
    }
    StatusCode::NOT_FOUND
}

/// Build the wizard REST routes.
pub fn wizard_routes(state: WizardRouteState) -> Router {
    Router::new()
        .route("/api/kyc/sessions", post(create_kyc))
        .route("/api/kyb/sessions", post(create_kyb))
        .route("/api/sessions/{id}", get(get_session).delete(remove_session))
        .route("/api/sessions/{id}/fields", post(set_field))
        .route("/api/sessions/{id}/documents", post(set_document))
        .route("/api/sessions/{id}/document-type", post(set_document_type))
        .route("/api/sessions/{id}/rewards", post(set_rewards))
        .route("/api/sessions/{id}/wallet", post(set_wallet))
        .route("/api/sessions/{id}/next", post(go_next))
        .route("/api/sessions/{id}/back", post(go_back))
        .route("/api/sessions/{id}/connect-wallet", post(connect_wallet))
        .with_state(state)
}
