use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderValue};
use serde_json::Value;
use tracing::debug;
use url::Url;
use youtrack_mcp_application::IssueTracker;
use youtrack_mcp_core::{AppError, AppResult, RemoteError, RemoteResult};

/// Request timeout applied when none is configured.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for a YouTrack instance.
#[derive(Debug, Clone)]
pub struct YouTrackClientConfig {
    /// Instance URL without the `/api` suffix; empty for cloud instances.
    pub url: String,
    /// Permanent API token sent as a bearer token.
    pub api_token: String,
    /// Whether the instance is hosted on youtrack.cloud.
    pub cloud: bool,
    /// Whether TLS certificates are verified.
    pub verify_ssl: bool,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl YouTrackClientConfig {
    /// Returns whether requests go to a youtrack.cloud workspace.
    #[must_use]
    pub fn is_cloud_instance(&self) -> bool {
        self.cloud || self.url.trim().is_empty()
    }

    /// Resolves the REST API base URL.
    ///
    /// Self-hosted instances use `<url>/api`. Cloud instances derive the
    /// workspace from a `perm:<user>.<workspace>.<secret>` token.
    pub fn base_url(&self) -> AppResult<Url> {
        if self.api_token.trim().is_empty() {
            return Err(AppError::Configuration(
                "YouTrack API token is required; set YOUTRACK_API_TOKEN".to_owned(),
            ));
        }

        let base = if self.is_cloud_instance() {
            let workspace = self
                .api_token
                .strip_prefix("perm:")
                .and_then(|rest| rest.split('.').nth(1))
                .filter(|workspace| !workspace.is_empty())
                .ok_or_else(|| {
                    AppError::Configuration(
                        "could not determine workspace from API token; cloud tokens look like \
                         perm:username.workspace.12345..."
                            .to_owned(),
                    )
                })?;
            format!("https://{workspace}.youtrack.cloud/api")
        } else {
            format!("{}/api", self.url.trim_end_matches('/'))
        };

        Url::parse(&base).map_err(|error| {
            AppError::Configuration(format!("invalid YouTrack URL '{base}': {error}"))
        })
    }
}

/// [`IssueTracker`] adapter over the YouTrack REST API.
#[derive(Debug, Clone)]
pub struct YouTrackHttpClient {
    http_client: reqwest::Client,
    base_url: Url,
    api_token: String,
}

impl YouTrackHttpClient {
    /// Builds a client with a shared connection pool.
    pub fn new(config: &YouTrackClientConfig) -> AppResult<Self> {
        let base_url = config.base_url()?;
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .danger_accept_invalid_certs(!config.verify_ssl)
            .build()
            .map_err(|error| {
                AppError::Configuration(format!("failed to build YouTrack HTTP client: {error}"))
            })?;

        Ok(Self {
            http_client,
            base_url,
            api_token: config.api_token.clone(),
        })
    }

    /// Returns the resolved REST API base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> RemoteResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                RemoteError::Transport(format!("base URL '{}' cannot take a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        Ok(url)
    }

    fn request(&self, method: reqwest::Method, url: Url) -> reqwest::RequestBuilder {
        self.http_client
            .request(method, url)
            .bearer_auth(&self.api_token)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
    }

    async fn execute(&self, builder: reqwest::RequestBuilder) -> RemoteResult<String> {
        let response = builder
            .send()
            .await
            .map_err(|error| RemoteError::Transport(error.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<response body unavailable>".to_owned());

        if status.is_success() {
            Ok(body)
        } else {
            debug!(status = status.as_u16(), "tracker returned an error status");
            Err(RemoteError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }

    async fn execute_json(&self, builder: reqwest::RequestBuilder) -> RemoteResult<Value> {
        let body = self.execute(builder).await?;
        parse_body(&body)
    }

    async fn get(&self, segments: &[&str], query: &[(&str, &str)]) -> RemoteResult<Value> {
        let url = self.endpoint(segments, query)?;
        debug!(%url, "GET");
        self.execute_json(self.request(reqwest::Method::GET, url))
            .await
    }

    async fn post(
        &self,
        segments: &[&str],
        fields: &str,
        payload: &Value,
    ) -> RemoteResult<Value> {
        let url = self.endpoint(segments, &[("fields", fields)])?;
        debug!(%url, "POST");
        self.execute_json(self.request(reqwest::Method::POST, url).json(payload))
            .await
    }
}

fn parse_body(body: &str) -> RemoteResult<Value> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(body).map_err(|error| RemoteError::Decode(error.to_string()))
}

#[async_trait]
impl IssueTracker for YouTrackHttpClient {
    async fn fetch_issue(&self, issue_id: &str, fields: &str) -> RemoteResult<Value> {
        self.get(&["issues", issue_id], &[("fields", fields)]).await
    }

    async fn list_work_items(
        &self,
        issue_id: &str,
        fields: &str,
        top: Option<u32>,
    ) -> RemoteResult<Value> {
        let top = top.map(|top| top.to_string());
        let mut query = vec![("fields", fields)];
        if let Some(top) = top.as_deref() {
            query.push(("$top", top));
        }

        self.get(&["issues", issue_id, "timeTracking", "workItems"], &query)
            .await
    }

    async fn fetch_work_item(
        &self,
        issue_id: &str,
        work_item_id: &str,
        fields: &str,
    ) -> RemoteResult<Value> {
        self.get(
            &["issues", issue_id, "timeTracking", "workItems", work_item_id],
            &[("fields", fields)],
        )
        .await
    }

    async fn create_work_item(
        &self,
        issue_id: &str,
        payload: &Value,
        fields: &str,
    ) -> RemoteResult<Value> {
        self.post(
            &["issues", issue_id, "timeTracking", "workItems"],
            fields,
            payload,
        )
        .await
    }

    async fn update_work_item(
        &self,
        issue_id: &str,
        work_item_id: &str,
        payload: &Value,
        fields: &str,
    ) -> RemoteResult<Value> {
        self.post(
            &["issues", issue_id, "timeTracking", "workItems", work_item_id],
            fields,
            payload,
        )
        .await
    }

    async fn delete_work_item(&self, issue_id: &str, work_item_id: &str) -> RemoteResult<()> {
        let url = self.endpoint(
            &["issues", issue_id, "timeTracking", "workItems", work_item_id],
            &[],
        )?;
        debug!(%url, "DELETE");
        self.execute(self.request(reqwest::Method::DELETE, url))
            .await?;
        Ok(())
    }

    async fn search_issues(&self, query: &str, limit: u32, fields: &str) -> RemoteResult<Value> {
        let limit = limit.to_string();
        self.get(
            &["issues"],
            &[("query", query), ("$top", limit.as_str()), ("fields", fields)],
        )
        .await
    }

    async fn fetch_project(&self, project_id: &str, fields: &str) -> RemoteResult<Value> {
        self.get(&["admin", "projects", project_id], &[("fields", fields)])
            .await
    }

    async fn fetch_current_user(&self, fields: &str) -> RemoteResult<Value> {
        self.get(&["users", "me"], &[("fields", fields)]).await
    }
}
