use std::path::PathBuf;

use sage_core::attachment;

use crate::events::{AttachmentUiEvent, UiEvent};

/// Stats and sniffs a picked file. Validation is left to the reducer.
pub async fn file_inspect(path: PathBuf) -> UiEvent {
    let event = match attachment::inspect_file(&path).await {
        Ok(candidate) => AttachmentUiEvent::Inspected { candidate },
        Err(rejection) => {
            tracing::warn!(path = %path.display(), %rejection, "cannot inspect file");
            AttachmentUiEvent::InspectFailed { rejection }
        }
    };
    UiEvent::Attachment(event)
}
