use sage_core::api::{ApiError, ChatReply, SageClient};
use sage_core::attachment::PendingAttachment;
use tokio_util::sync::CancellationToken;

use crate::events::{ChatUiEvent, UiEvent};
use crate::input::SendKind;

/// Posts a chat message. Resolves to `Cancelled` as soon as `cancel` fires.
pub async fn chat_send(
    client: SageClient,
    message: String,
    cancel: Option<CancellationToken>,
) -> UiEvent {
    let request = async { client.send_chat(&message).await };
    run_cancellable(SendKind::Chat, request, cancel).await
}

/// Uploads the attachment with its caption.
pub async fn file_upload(
    client: SageClient,
    attachment: PendingAttachment,
    message: String,
    cancel: Option<CancellationToken>,
) -> UiEvent {
    let request = async { client.upload(&attachment, &message).await };
    run_cancellable(SendKind::Upload, request, cancel).await
}

async fn run_cancellable<F>(kind: SendKind, request: F, cancel: Option<CancellationToken>) -> UiEvent
where
    F: Future<Output = Result<ChatReply, ApiError>>,
{
    let result = match cancel {
        Some(token) => {
            tokio::select! {
                () = token.cancelled() => {
                    tracing::debug!(?kind, "send cancelled");
                    return UiEvent::Chat(ChatUiEvent::Cancelled);
                }
                result = request => result,
            }
        }
        None => request.await,
    };

    let event = match result {
        Ok(reply) => ChatUiEvent::Replied { kind, reply },
        Err(e) => {
            tracing::warn!(?kind, error = %e, "send failed");
            ChatUiEvent::Failed { kind }
        }
    };
    UiEvent::Chat(event)
}
