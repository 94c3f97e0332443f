/**
 * Contact Routes
 * Public contact form and the admin inbox
 */
use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::routes::auth::AdminSession;
use crate::routes::extract::{parse_id, ValidatedJson};
use crate::routes::MessageResponse;
use crate::state::AppState;
use crate::store::models::{ContactMessage, NewContactMessage};

#[derive(Debug, Serialize, Deserialize)]
pub struct ContactResponse {
    pub success: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessagesResponse {
    pub messages: Vec<ContactMessage>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageReadResponse {
    pub message: String,
    pub contact_message: ContactMessage,
}

#[derive(Debug, Default, Deserialize)]
pub struct MarkReadRequest {
    pub read: Option<bool>,
}

const NOT_FOUND: ApiError = ApiError::NotFound("Message");

/// POST /api/contact
pub async fn submit_contact(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NewContactMessage>,
) -> Json<ContactResponse> {
    let message = state.store.save_contact_message(payload).await;
    tracing::info!(id = message.id, "Contact message received");
    Json(ContactResponse { success: true })
}

/// GET /api/admin/messages
pub async fn list_messages(
    _session: AdminSession,
    State(state): State<AppState>,
) -> Json<MessagesResponse> {
    Json(MessagesResponse {
        messages: state.store.contact_messages().await,
    })
}

/// PUT /api/admin/messages/{id}/read
///
/// The body is optional; without one the message is marked read.
pub async fn mark_read(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<MessageReadResponse>> {
    let id = parse_id(&id, NOT_FOUND)?;
    let request = if body.iter().all(u8::is_ascii_whitespace) {
        MarkReadRequest::default()
    } else {
        serde_json::from_slice::<MarkReadRequest>(&body)
            .map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {}", e)))?
    };
    let read = request.read.unwrap_or(true);

    let contact_message = state.store.set_message_read(id, read).await.ok_or(NOT_FOUND)?;
    let message = if read {
        "Message marked as read"
    } else {
        "Message marked as unread"
    };
    Ok(Json(MessageReadResponse {
        message: message.to_string(),
        contact_message,
    }))
}

/// DELETE /api/admin/messages/{id}
pub async fn delete_message(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_id(&id, NOT_FOUND)?;
    if !state.store.delete_contact_message(id).await {
        return Err(NOT_FOUND);
    }
    tracing::info!(id, "Contact message deleted");
    Ok(Json(MessageResponse::new("Message deleted successfully")))
}
