use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::types::{
    ChatReply, ChatRequest, ErrorBody, Health, SessionList, SessionMessages, StoredMessage,
};
use crate::attachment::PendingAttachment;
use crate::config::Config;

/// Form `message` sent with an upload when the caption is empty.
pub const DEFAULT_UPLOAD_PROMPT: &str = "Please analyze this.";

/// HTTP client for the Sage backend.
///
/// Cheap to clone; clones share the connection pool and cookie jar.
#[derive(Clone)]
pub struct SageClient {
    http: reqwest::Client,
    base_url: String,
}

impl SageClient {
    /// Builds a client from configuration (base URL, timeout, cookie).
    ///
    /// # Errors
    /// Returns `InvalidRequest` if the base URL or cookie is malformed, or
    /// the HTTP client cannot be constructed.
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        let base_url = config.effective_base_url().to_string();
        url::Url::parse(&base_url)
            .map_err(|e| ApiError::InvalidRequest(format!("base_url '{base_url}': {e}")))?;

        let mut headers = HeaderMap::new();
        if let Some(cookie) = config.effective_session_cookie() {
            let value = HeaderValue::from_str(cookie)
                .map_err(|e| ApiError::InvalidRequest(format!("session_cookie: {e}")))?;
            headers.insert(COOKIE, value);
        }

        let mut builder = reqwest::Client::builder()
            .cookie_store(true)
            .default_headers(headers);
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ApiError::InvalidRequest(format!("http client: {e}")))?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /api/sessions`
    pub async fn list_sessions(&self) -> Result<SessionList, ApiError> {
        let path = "/api/sessions";
        let response = self.send(path, self.request(Method::GET, path)).await?;
        decode(path, response).await
    }

    /// `GET /api/sessions/{id}`
    pub async fn get_session(&self, id: i64) -> Result<Vec<StoredMessage>, ApiError> {
        let path = format!("/api/sessions/{id}");
        let response = self.send(&path, self.request(Method::GET, &path)).await?;
        let body: SessionMessages = decode(&path, response).await?;
        Ok(body.messages)
    }

    /// `DELETE /api/sessions/{id}`
    pub async fn delete_session(&self, id: i64) -> Result<(), ApiError> {
        let path = format!("/api/sessions/{id}");
        self.send(&path, self.request(Method::DELETE, &path))
            .await?;
        Ok(())
    }

    /// `POST /api/new-chat`
    pub async fn new_chat(&self) -> Result<(), ApiError> {
        let path = "/api/new-chat";
        self.send(path, self.request(Method::POST, path)).await?;
        Ok(())
    }

    /// `POST /api/chat` with `{message}`.
    pub async fn send_chat(&self, message: &str) -> Result<ChatReply, ApiError> {
        let path = "/api/chat";
        let request = self
            .request(Method::POST, path)
            .json(&ChatRequest { message });
        let response = self.send(path, request).await?;
        decode(path, response).await
    }

    /// `POST /api/upload` with multipart `{file, message}`.
    ///
    /// The file is read from disk here; an empty caption is replaced with
    /// [`DEFAULT_UPLOAD_PROMPT`].
    pub async fn upload(
        &self,
        attachment: &PendingAttachment,
        message: &str,
    ) -> Result<ChatReply, ApiError> {
        let path = "/api/upload";
        let bytes = tokio::fs::read(&attachment.path)
            .await
            .map_err(|source| ApiError::Io {
                path: attachment.path.display().to_string(),
                source,
            })?;

        let part = Part::bytes(bytes)
            .file_name(attachment.name.clone())
            .mime_str(&attachment.mime_type)
            .map_err(|e| ApiError::InvalidRequest(format!("mime type: {e}")))?;
        let caption = if message.trim().is_empty() {
            DEFAULT_UPLOAD_PROMPT.to_string()
        } else {
            message.to_string()
        };
        let form = Form::new().part("file", part).text("message", caption);

        let response = self
            .send(path, self.request(Method::POST, path).multipart(form))
            .await?;
        decode(path, response).await
    }

    /// `GET /health`
    pub async fn health(&self) -> Result<Health, ApiError> {
        let path = "/health";
        let response = self.send(path, self.request(Method::GET, path)).await?;
        decode(path, response).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{}", self.base_url, path))
    }

    /// Sends a request and maps transport failures and non-2xx statuses.
    async fn send(&self, path: &str, request: RequestBuilder) -> Result<Response, ApiError> {
        tracing::debug!(path, "sending request");
        let response = request.send().await.map_err(|source| ApiError::Transport {
            path: path.to_string(),
            source,
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .map(|body| body.error);
        Err(ApiError::Status {
            path: path.to_string(),
            status,
            message,
        })
    }
}

async fn decode<T: DeserializeOwned>(path: &str, response: Response) -> Result<T, ApiError> {
    response.json().await.map_err(|source| ApiError::Decode {
        path: path.to_string(),
        source,
    })
}
