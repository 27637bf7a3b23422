use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing_subscriber::EnvFilter;
use youtrack_mcp_application::ValidationPolicy;
use youtrack_mcp_core::AppError;
use youtrack_mcp_domain::{IndeterminatePolicy, MalformedAllowListPolicy};
use youtrack_mcp_infrastructure::{
    DEFAULT_ALLOW_LIST_PATH, DEFAULT_REQUEST_TIMEOUT, YouTrackClientConfig,
};

use crate::cli::Cli;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub server_name: String,
    pub server_description: String,
    pub api_host: String,
    pub api_port: u16,
    pub log_level: String,
    pub youtrack: YouTrackClientConfig,
    pub parent_tickets_file: PathBuf,
    pub allow_list_policy: MalformedAllowListPolicy,
    pub validation_policy: ValidationPolicy,
}

impl ApiConfig {
    pub fn load(cli: &Cli) -> Result<Self, AppError> {
        Self::from_lookup(cli, |name| env::var(name).ok())
    }

    fn from_lookup(cli: &Cli, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let api_token = cli
            .api_token
            .clone()
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| {
                AppError::Configuration(
                    "YouTrack API token is required; set YOUTRACK_API_TOKEN or pass --api-token"
                        .to_owned(),
                )
            })?;

        let url = cli
            .youtrack_url
            .as_deref()
            .map(|url| url.trim().trim_end_matches('/').to_owned())
            .unwrap_or_default();
        let cloud = flag(lookup("YOUTRACK_CLOUD"), false);
        if !cloud && url.is_empty() {
            return Err(AppError::Configuration(
                "YouTrack URL is required for self-hosted instances; set YOUTRACK_URL or \
                 YOUTRACK_CLOUD=true"
                    .to_owned(),
            ));
        }

        let verify_ssl = cli
            .verify_ssl_override()
            .unwrap_or_else(|| flag(lookup("YOUTRACK_VERIFY_SSL"), true));

        let timeout = match lookup("YOUTRACK_TIMEOUT_SECS") {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|seconds| *seconds > 0)
                .map(Duration::from_secs)
                .ok_or_else(|| {
                    AppError::Configuration(format!(
                        "YOUTRACK_TIMEOUT_SECS must be a positive number of seconds, got '{value}'"
                    ))
                })?,
            None => DEFAULT_REQUEST_TIMEOUT,
        };

        let allow_list_policy = if flag(lookup("YOUTRACK_ALLOWLIST_FAIL_CLOSED"), false) {
            MalformedAllowListPolicy::DenyAll
        } else {
            MalformedAllowListPolicy::AllowAll
        };
        let validation_policy = ValidationPolicy {
            unknown_capability: IndeterminatePolicy::from_affirm_flag(flag(
                lookup("YOUTRACK_CAPABILITY_UNKNOWN_AS_ENABLED"),
                false,
            )),
            unknown_resolution: IndeterminatePolicy::from_affirm_flag(flag(
                lookup("YOUTRACK_RESOLUTION_UNKNOWN_AS_RESOLVED"),
                false,
            )),
        };

        Ok(Self {
            server_name: lookup("MCP_SERVER_NAME").unwrap_or_else(|| "youtrack-mcp".to_owned()),
            server_description: lookup("MCP_SERVER_DESCRIPTION")
                .unwrap_or_else(|| "YouTrack MCP Server".to_owned()),
            api_host: cli.host.clone(),
            api_port: cli.port,
            log_level: cli.log_level.clone(),
            youtrack: YouTrackClientConfig {
                url,
                api_token,
                cloud,
                verify_ssl,
                timeout,
            },
            parent_tickets_file: lookup("YOUTRACK_PARENT_TICKETS_FILE")
                .filter(|path| !path.trim().is_empty())
                .map_or_else(|| PathBuf::from(DEFAULT_ALLOW_LIST_PATH), PathBuf::from),
            allow_list_policy,
            validation_policy,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Configuration(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing(default_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn flag(value: Option<String>, default: bool) -> bool {
    value.map_or(default, |value| {
        matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "yes"
        )
    })
}
