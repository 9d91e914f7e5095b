use gns_config::GnsConfig;

pub const MISSING_TOKEN: &str = "Please set GNS_API_TOKEN environment variable";
pub const MISSING_TASK_ID: &str = "Please set GNS_TASK_ID environment variable";

const DEFAULT_LOG_LEVEL: &str = "warn";

/// The API token, or the message to print when it is unset or empty.
pub fn require_token(config: &GnsConfig) -> Result<String, &'static str> {
    non_empty(config.api_token.as_deref()).ok_or(MISSING_TOKEN)
}

/// Token and task id, checked in that order.
pub fn resolve(config: &GnsConfig) -> Result<(String, String), &'static str> {
    let token = require_token(config)?;
    let task_id = non_empty(config.task_id.as_deref()).ok_or(MISSING_TASK_ID)?;
    Ok((token, task_id))
}

/// Filter used when `RUST_LOG` is unset: `--log-level`, then the config
/// file's `log_level`, then `warn`.
pub fn log_level<'a>(flag: Option<&'a str>, config: &'a GnsConfig) -> &'a str {
    flag.or(config.log_level.as_deref())
        .unwrap_or(DEFAULT_LOG_LEVEL)
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}
