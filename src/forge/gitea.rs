//! forge::gitea
//!
//! Gitea forge implementation using the v1 REST API.
//!
//! # Design
//!
//! This module implements the `Forge` trait for Gitea servers (Door43 runs
//! one). File content moves through the contents API
//! (`/api/v1/repos/{owner}/{repo}/contents/{path}`) as base64 payloads;
//! repository creation goes through the organization endpoint.
//!
//! # Authentication
//!
//! A personal access token is passed as `Authorization: token <t>` when
//! present. Read access to public catalogs works unauthenticated; writes
//! and repository creation require a token.
//!
//! # Example
//!
//! ```ignore
//! use scriptorium::forge::gitea::GiteaForge;
//! use scriptorium::forge::{Forge, RepoRef};
//!
//! let forge = GiteaForge::new(Some("gta_xxx".to_string()));
//! let repo = RepoRef::new("Door43-Catalog", "en_tn");
//! let manifest = forge.fetch_manifest(&repo).await?;
//! ```

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;

use super::traits::{FileState, Forge, ForgeError, RepoRef, RepoSettings};

/// Default Gitea server (the Door43 content service).
const DEFAULT_SERVER: &str = "https://git.door43.org";

/// User-Agent header value for API requests.
const USER_AGENT_VALUE: &str = "scriptorium-cli";

/// Gitea forge implementation.
///
/// Implements the `Forge` trait against a Gitea server's v1 REST API.
/// The server base URL is configurable so tests can point the client at a
/// local mock server.
pub struct GiteaForge {
    /// HTTP client for making requests
    client: Client,
    /// Personal access token, if any
    token: Option<String>,
    /// Server base URL (no trailing slash)
    server: String,
}

// Custom Debug to avoid exposing the token
impl std::fmt::Debug for GiteaForge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GiteaForge")
            .field("has_token", &self.token.is_some())
            .field("server", &self.server)
            .finish()
    }
}

/// File payload from the contents API.
#[derive(Debug, Deserialize)]
struct ContentsPayload {
    name: String,
    path: String,
    sha: Option<String>,
    html_url: Option<String>,
    content: Option<String>,
    encoding: Option<String>,
}

/// Envelope around write responses from the contents API.
#[derive(Debug, Deserialize)]
struct FileEnvelope {
    content: ContentsPayload,
}

/// Repository payload from the repos API.
#[derive(Debug, Deserialize)]
struct RepoPayload {
    name: String,
    owner: OwnerPayload,
}

/// Owner section of a repository payload.
#[derive(Debug, Deserialize)]
struct OwnerPayload {
    login: String,
}

/// Error body returned by the Gitea API.
#[derive(Debug, Deserialize)]
struct GiteaErrorResponse {
    message: String,
}

impl GiteaForge {
    /// Create a Gitea forge against the default Door43 server.
    pub fn new(token: Option<String>) -> Self {
        Self::with_server(DEFAULT_SERVER, token)
    }

    /// Create a Gitea forge against a specific server.
    ///
    /// # Arguments
    ///
    /// * `server` - Base URL, e.g. `https://git.door43.org`
    /// * `token` - Personal access token, if any
    pub fn with_server(server: impl Into<String>, token: Option<String>) -> Self {
        let mut server = server.into();
        while server.ends_with('/') {
            server.pop();
        }
        Self {
            client: Client::new(),
            token,
            server,
        }
    }

    /// Get the server base URL.
    pub fn server(&self) -> &str {
        &self.server
    }

    /// Build common headers for API requests.
    fn headers(&self) -> Result<HeaderMap, ForgeError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &self.token {
            let value = HeaderValue::from_str(&format!("token {}", token)).map_err(|_| {
                ForgeError::AuthFailed("token contains invalid header characters".into())
            })?;
            headers.insert(AUTHORIZATION, value);
        }
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        Ok(headers)
    }

    /// Build the contents API URL for a file.
    fn contents_url(&self, repo: &RepoRef, path: &str) -> String {
        format!(
            "{}/api/v1/repos/{}/{}/contents/{}",
            self.server, repo.owner, repo.name, path
        )
    }

    /// Handle API response, mapping errors appropriately.
    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: Response,
    ) -> Result<T, ForgeError> {
        let status = response.status();
        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| ForgeError::UnexpectedResponse(format!("bad response body: {}", e)))
        } else {
            self.handle_error_response(response, status).await
        }
    }

    /// Handle an error response from the API.
    async fn handle_error_response<T>(
        &self,
        response: Response,
        status: StatusCode,
    ) -> Result<T, ForgeError> {
        let message = match response.json::<GiteaErrorResponse>().await {
            Ok(err) => err.message,
            Err(_) => "unknown error".to_string(),
        };

        Err(match status {
            StatusCode::UNAUTHORIZED => ForgeError::AuthFailed("invalid or expired token".into()),
            StatusCode::FORBIDDEN => {
                if self.token.is_none() {
                    ForgeError::AuthRequired
                } else {
                    ForgeError::AuthFailed(format!("permission denied: {}", message))
                }
            }
            StatusCode::NOT_FOUND => ForgeError::NotFound(message),
            StatusCode::TOO_MANY_REQUESTS => ForgeError::RateLimited,
            _ => ForgeError::ApiError {
                status: status.as_u16(),
                message,
            },
        })
    }

    /// Convert a contents payload into a `FileState`, decoding base64.
    ///
    /// Write responses sometimes omit the content body; `fallback_content`
    /// supplies the text we already hold in that case.
    fn file_state(
        &self,
        repo: &RepoRef,
        payload: ContentsPayload,
        fallback_content: Option<&str>,
    ) -> Result<FileState, ForgeError> {
        let content = match (&payload.content, payload.encoding.as_deref()) {
            (Some(raw), Some("base64")) | (Some(raw), None) => {
                // Gitea wraps base64 bodies with newlines
                let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
                let bytes = BASE64.decode(cleaned.as_bytes()).map_err(|e| {
                    ForgeError::UnexpectedResponse(format!("invalid base64 content: {}", e))
                })?;
                String::from_utf8(bytes).map_err(|e| {
                    ForgeError::UnexpectedResponse(format!("file is not valid UTF-8: {}", e))
                })?
            }
            (Some(raw), Some(encoding)) => {
                return Err(ForgeError::UnexpectedResponse(format!(
                    "unsupported content encoding '{}' ({} bytes)",
                    encoding,
                    raw.len()
                )))
            }
            (None, _) => match fallback_content {
                Some(text) => text.to_string(),
                None => {
                    return Err(ForgeError::UnexpectedResponse(
                        "response carried no file content".into(),
                    ))
                }
            },
        };

        let html_url = payload.html_url.unwrap_or_else(|| {
            format!(
                "{}/{}/{}/src/branch/master/{}",
                self.server, repo.owner, repo.name, payload.path
            )
        });

        Ok(FileState {
            path: payload.path,
            name: payload.name,
            content,
            html_url,
            sha: payload.sha,
        })
    }

    /// Create a file through the contents API.
    async fn create_file(
        &self,
        repo: &RepoRef,
        path: &str,
        content: &str,
        message: &str,
    ) -> Result<FileState, ForgeError> {
        let body = serde_json::json!({
            "content": BASE64.encode(content),
            "message": message,
        });
        let response = self
            .client
            .post(self.contents_url(repo, path))
            .headers(self.headers()?)
            .json(&body)
            .send()
            .await
            .map_err(|e| ForgeError::NetworkError(e.to_string()))?;
        let envelope: FileEnvelope = self.handle_response(response).await?;
        self.file_state(repo, envelope.content, Some(content))
    }

    /// Update an existing file through the contents API.
    async fn update_file(
        &self,
        repo: &RepoRef,
        path: &str,
        content: &str,
        message: &str,
        sha: &str,
    ) -> Result<FileState, ForgeError> {
        let body = serde_json::json!({
            "content": BASE64.encode(content),
            "message": message,
            "sha": sha,
        });
        let response = self
            .client
            .put(self.contents_url(repo, path))
            .headers(self.headers()?)
            .json(&body)
            .send()
            .await
            .map_err(|e| ForgeError::NetworkError(e.to_string()))?;
        let envelope: FileEnvelope = self.handle_response(response).await?;
        self.file_state(repo, envelope.content, Some(content))
    }
}

#[async_trait]
impl Forge for GiteaForge {
    fn name(&self) -> &'static str {
        "gitea"
    }

    async fn fetch_file(
        &self,
        repo: &RepoRef,
        path: &str,
        default_content: Option<&str>,
    ) -> Result<FileState, ForgeError> {
        let response = self
            .client
            .get(self.contents_url(repo, path))
            .headers(self.headers()?)
            .send()
            .await
            .map_err(|e| ForgeError::NetworkError(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return match default_content {
                Some(default) => {
                    self.create_file(repo, path, default, &format!("Create {}", path))
                        .await
                }
                None => Err(ForgeError::NotFound(format!(
                    "{}:{}",
                    repo.full_name(),
                    path
                ))),
            };
        }

        let payload: ContentsPayload = self.handle_response(response).await?;
        self.file_state(repo, payload, None)
    }

    async fn save_file(
        &self,
        repo: &RepoRef,
        path: &str,
        content: &str,
        message: &str,
    ) -> Result<FileState, ForgeError> {
        // Updates need the current content SHA; absent files are created.
        let existing_sha = match self.fetch_file(repo, path, None).await {
            Ok(state) => state.sha,
            Err(ForgeError::NotFound(_)) => None,
            Err(e) => return Err(e),
        };
        match existing_sha {
            Some(sha) => self.update_file(repo, path, content, message, &sha).await,
            None => self.create_file(repo, path, content, message).await,
        }
    }

    async fn create_repository(
        &self,
        owner: &str,
        name: &str,
        settings: RepoSettings,
    ) -> Result<RepoRef, ForgeError> {
        let body = serde_json::json!({
            "name": name,
            "description": settings.description,
            "private": settings.private,
            "auto_init": settings.auto_init,
            "default_branch": settings.default_branch,
        });
        let response = self
            .client
            .post(format!("{}/api/v1/orgs/{}/repos", self.server, owner))
            .headers(self.headers()?)
            .json(&body)
            .send()
            .await
            .map_err(|e| ForgeError::NetworkError(e.to_string()))?;
        let payload: RepoPayload = self.handle_response(response).await?;
        Ok(RepoRef::new(payload.owner.login, payload.name))
    }
}
