use axum::extract::ws::{Message as WsFrame, WebSocket};
use axum::{
    extract::{rejection::JsonRejection, Extension, Path, Query, WebSocketUpgrade},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use friendlychat_core::error::Error as WireError;
use friendlychat_core::{
    FeedEvent, ListMessagesQuery, ListMessagesResponse, Message, PushMessageResponse,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;

use crate::error::{ApiError, Result};
use crate::store::SetOutcome;
use crate::AppState;

/// Rejects messages that would render as nothing: no image and no non-blank text.
fn ensure_has_content(message: &Message) -> Result<()> {
    let has_text = message.text().map_or(false, |t| !t.trim().is_empty());
    if has_text || message.image_url().is_some() {
        Ok(())
    } else {
        Err(ApiError::EmptyMessage)
    }
}

/// Handler for GET /api/messages
pub async fn list_messages(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<ListMessagesQuery>,
) -> Result<Json<ListMessagesResponse>> {
    let messages = state.store.list(query.limit).await?;
    Ok(Json(ListMessagesResponse { messages }))
}

/// Handler for POST /api/messages
pub async fn push_message(
    Extension(state): Extension<Arc<AppState>>,
    body: std::result::Result<Json<Message>, JsonRejection>,
) -> Result<(StatusCode, Json<PushMessageResponse>)> {
    let Json(message) = body?;
    ensure_has_content(&message)?;
    let message = state.store.push(message).await?;
    tracing::info!(id = ?message.id(), name = message.name(), "message pushed");

    state.feed.publish(&FeedEvent::ChildAdded(message.clone()));
    Ok((StatusCode::CREATED, Json(PushMessageResponse { message })))
}

/// Handler for GET /api/messages/:id
pub async fn get_message(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Message>> {
    match state.store.get(&id).await? {
        Some(message) => Ok(Json(message)),
        None => Err(ApiError::NotFound(id)),
    }
}

/// Handler for PUT /api/messages/:id
///
/// The key in the path is the id; an id in the body is ignored.
pub async fn set_message(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
    body: std::result::Result<Json<Message>, JsonRejection>,
) -> Result<Json<Message>> {
    let Json(message) = body?;
    ensure_has_content(&message)?;
    let (message, outcome) = state.store.set(&id, message).await?;
    tracing::info!(id = %id, ?outcome, "message set");

    let event = match outcome {
        SetOutcome::Created => FeedEvent::ChildAdded(message.clone()),
        SetOutcome::Replaced => FeedEvent::ChildChanged(message.clone()),
    };
    state.feed.publish(&event);
    Ok(Json(message))
}

/// Handler for /ws
pub async fn ws_handler(
    Extension(state): Extension<Arc<AppState>>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (session_id, mut rx) = state.feed.subscribe();
    tracing::info!(%session_id, "feed session opened");

    let (mut sender, mut receiver) = socket.split();

    // Task: forward feed events -> websocket
    let forward_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            if sender.send(WsFrame::Text(event)).await.is_err() {
                break;
            }
        }
    });

    // The feed is read-only: writes go through the HTTP API.
    while let Some(Ok(frame)) = receiver.next().await {
        match frame {
            WsFrame::Text(_) | WsFrame::Binary(_) => {
                let err = WireError::new("read_only", "the feed does not accept messages, use the HTTP API");
                state.feed.send_to(&session_id, &FeedEvent::Error(err));
            }
            WsFrame::Close(_) => break,
            _ => {}
        }
    }

    // dropping the sender ends the forward task
    state.feed.unsubscribe(&session_id);
    let _ = forward_task.await;
    tracing::info!(%session_id, "feed session closed");
}
