use std::collections::HashMap;

pub const DEFAULT_PATH: &str = "sendpost.toml";
const ENV_PREFIX: &str = "SENDPOST";

/// Settings key holding the sub-account API key. With the env prefix,
/// this is the SENDPOST_SUB_ACCOUNT_API_KEY environment variable.
pub const API_KEY_SETTING: &str = "sub_account_api_key";

/// Loads client config from an optional TOML file, merged with any
/// environment variables prefixed with SENDPOST_.
pub fn load_config(path: Option<&str>) -> HashMap<String, String> {
    let mut settings = config::Config::default();

    let file = config::File::with_name(path.unwrap_or(DEFAULT_PATH)).required(false);

    if let Err(e) = settings.merge(file) {
        log::warn!("Failed to read config file: {}", e);
    }

    if let Err(e) = settings.merge(config::Environment::with_prefix(ENV_PREFIX)) {
        log::warn!("Failed to read environment: {}", e);
    }

    settings.try_into::<HashMap<String, String>>().unwrap_or_default()
}

/// Returns the sub-account API key, if set to a non-empty value.
pub fn api_key(settings: &HashMap<String, String>) -> Option<&str> {
    settings
        .get(API_KEY_SETTING)
        .map(|k| k.as_str())
        .filter(|k| !k.is_empty())
}
