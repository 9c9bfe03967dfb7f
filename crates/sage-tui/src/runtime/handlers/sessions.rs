use sage_core::api::SageClient;

use crate::events::{SessionUiEvent, UiEvent};

pub async fn session_list_load(client: SageClient) -> UiEvent {
    let event = match client.list_sessions().await {
        Ok(list) => SessionUiEvent::ListLoaded {
            sessions: list.sessions,
            current_session_id: list.current_session_id,
        },
        Err(e) => {
            tracing::warn!(error = %e, "failed to load sessions");
            SessionUiEvent::ListFailed
        }
    };
    UiEvent::Session(event)
}

pub async fn session_load(client: SageClient, id: i64) -> UiEvent {
    let event = match client.get_session(id).await {
        Ok(messages) => SessionUiEvent::Loaded { id, messages },
        Err(e) => {
            tracing::warn!(id, error = %e, "failed to load session");
            SessionUiEvent::LoadFailed { id }
        }
    };
    UiEvent::Session(event)
}

pub async fn session_delete(client: SageClient, id: i64) -> UiEvent {
    let event = match client.delete_session(id).await {
        Ok(()) => SessionUiEvent::Deleted { id },
        Err(e) => {
            tracing::warn!(id, error = %e, "failed to delete session");
            SessionUiEvent::DeleteFailed { id }
        }
    };
    UiEvent::Session(event)
}

pub async fn new_chat(client: SageClient) -> UiEvent {
    let event = match client.new_chat().await {
        Ok(()) => SessionUiEvent::NewChatStarted,
        Err(e) => {
            tracing::warn!(error = %e, "failed to start new chat");
            SessionUiEvent::NewChatFailed
        }
    };
    UiEvent::Session(event)
}
