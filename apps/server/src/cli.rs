use clap::Parser;

/// YouTrack MCP tool server.
#[derive(Debug, Parser)]
#[command(name = "youtrack-mcp-server", about = "YouTrack MCP Server", version)]
pub struct Cli {
    /// Host to bind the server to
    #[arg(long, env = "API_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind the server to
    #[arg(long, env = "API_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Logging level: trace, debug, info, warning, error or critical
    #[arg(long, default_value = "info", value_parser = parse_log_level)]
    pub log_level: String,

    /// YouTrack instance URL (not required for YouTrack Cloud)
    #[arg(long, env = "YOUTRACK_URL")]
    pub youtrack_url: Option<String>,

    /// YouTrack API token for authentication
    #[arg(long, env = "YOUTRACK_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Verify SSL certificates (default)
    #[arg(long, conflicts_with = "no_verify_ssl")]
    pub verify_ssl: bool,

    /// Disable SSL certificate verification
    #[arg(long)]
    pub no_verify_ssl: bool,
}

impl Cli {
    /// Explicit TLS verification choice, if either flag was given.
    pub fn verify_ssl_override(&self) -> Option<bool> {
        if self.no_verify_ssl {
            Some(false)
        } else if self.verify_ssl {
            Some(true)
        } else {
            None
        }
    }
}

/// Maps user-facing level names onto `tracing` filter directives.
fn parse_log_level(value: &str) -> Result<String, String> {
    let level = match value.trim().to_ascii_lowercase().as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "info" => "info",
        "warn" | "warning" => "warn",
        "error" | "critical" => "error",
        other => return Err(format!("unsupported log level '{other}'")),
    };

    Ok(level.to_owned())
}
