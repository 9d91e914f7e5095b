mod payload;
mod settings;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use gns_client::Client;
use gns_config::{ConfigLoader, GnsConfig};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

/// Send a notification through the GNS API.
///
/// Connection settings come from flags, then `GNS_*` environment variables,
/// then `config.yml`/`config.toml` in the GNS config directory.
#[derive(Parser, Debug)]
#[command(name = "gns-notify", version, about)]
struct Cli {
    /// API base URL [env: GNS_API_URL] (default http://localhost:8080)
    #[arg(long)]
    api_url: Option<String>,

    /// API token [env: GNS_API_TOKEN]
    #[arg(long)]
    token: Option<String>,

    /// Task to notify [env: GNS_TASK_ID]
    #[arg(long)]
    task_id: Option<String>,

    /// Priority override (default High)
    #[arg(long)]
    priority: Option<String>,

    /// Template variable as key=value; repeatable. Replaces the sample data.
    #[arg(long = "data", value_name = "KEY=VALUE", value_parser = payload::parse_field)]
    data: Vec<(String, Value)>,

    /// File to attach; repeatable
    #[arg(long = "attach", value_name = "PATH")]
    attachments: Vec<PathBuf>,

    /// Request timeout in seconds, at least 1 [env: GNS_TIMEOUT_SECS]
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Directory holding config.yml or config.toml [env: GNS_CONFIG_DIR]
    #[arg(long)]
    config_dir: Option<PathBuf>,

    /// Call the health endpoint instead of sending
    #[arg(long)]
    health: bool,

    /// Log level when RUST_LOG is unset; falls back to the config file, then warn
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn apply_to(&self, config: &mut GnsConfig) {
        if let Some(url) = &self.api_url {
            config.api_url = url.clone();
        }
        if let Some(token) = &self.token {
            config.api_token = Some(token.clone());
        }
        if let Some(task_id) = &self.task_id {
            config.task_id = Some(task_id.clone());
        }
        if let Some(secs) = self.timeout {
            config.timeout_secs = secs;
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let loader = match &cli.config_dir {
        Some(dir) => ConfigLoader::with_dir(dir),
        None => ConfigLoader::new(),
    };
    let mut config = loader.load_with_env()?;
    cli.apply_to(&mut config);

    let level = settings::log_level(cli.log_level.as_deref(), &config);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if cli.health {
        let token = match settings::require_token(&config) {
            Ok(token) => token,
            Err(msg) => {
                println!("{msg}");
                return Ok(ExitCode::SUCCESS);
            }
        };
        let client = Client::builder(config.api_url.as_str(), token)
            .timeout(config.timeout())
            .build()?;
        let health = client.health().await?;
        println!("{}", serde_json::to_string_pretty(&health)?);
        return Ok(ExitCode::SUCCESS);
    }

    let (token, task_id) = match settings::resolve(&config) {
        Ok(resolved) => resolved,
        Err(msg) => {
            println!("{msg}");
            return Ok(ExitCode::SUCCESS);
        }
    };

    let client = Client::builder(config.api_url.as_str(), token)
        .timeout(config.timeout())
        .build()?;

    println!("Sending notification for Task: {task_id}...");

    let request = payload::build_request(&task_id, cli.data, &cli.attachments, cli.priority)?;

    match client.send_notification(&request).await {
        Ok(response) => {
            println!("✅ Notification Sent Successfully!");
            println!("Response: {}", serde_json::to_string_pretty(&response)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            tracing::error!(task_id = %task_id, status = ?e.status(), "notification failed");
            eprintln!("❌ Failed to send notification: {e}");
            Ok(ExitCode::FAILURE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config_values() {
        let cli = Cli::parse_from([
            "gns-notify",
            "--api-url",
            "http://flag.example.com",
            "--task-id",
            "task-7",
            "--timeout",
            "2",
        ]);
        let mut config = GnsConfig {
            api_url: "http://file.example.com".to_string(),
            api_token: Some("file-token".to_string()),
            ..GnsConfig::default()
        };

        cli.apply_to(&mut config);

        assert_eq!(config.api_url, "http://flag.example.com");
        assert_eq!(config.api_token.as_deref(), Some("file-token"));
        assert_eq!(config.task_id.as_deref(), Some("task-7"));
        assert_eq!(config.timeout_secs, 2);
    }

    #[test]
    fn repeated_data_flags_collect_in_order() {
        let cli = Cli::parse_from(["gns-notify", "--data", "a=1", "--data", "b=two"]);
        assert_eq!(
            cli.data,
            vec![
                ("a".to_string(), Value::from(1)),
                ("b".to_string(), Value::from("two")),
            ]
        );
    }

    #[test]
    fn malformed_data_flag_is_rejected() {
        assert!(Cli::try_parse_from(["gns-notify", "--data", "oops"]).is_err());
    }

    #[test]
    fn zero_timeout_flag_is_rejected() {
        assert!(Cli::try_parse_from(["gns-notify", "--timeout", "0"]).is_err());
        assert!(Cli::try_parse_from(["gns-notify", "--timeout", "1"]).is_ok());
    }

    #[test]
    fn log_level_flag_defers_to_config_when_absent() {
        let config = GnsConfig {
            log_level: Some("debug".to_string()),
            ..GnsConfig::default()
        };

        let cli = Cli::parse_from(["gns-notify"]);
        assert_eq!(cli.log_level, None);
        assert_eq!(
            settings::log_level(cli.log_level.as_deref(), &config),
            "debug"
        );

        let cli = Cli::parse_from(["gns-notify", "--log-level", "trace"]);
        assert_eq!(
            settings::log_level(cli.log_level.as_deref(), &config),
            "trace"
        );
    }
}
