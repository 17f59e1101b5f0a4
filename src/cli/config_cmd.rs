//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::{AppConfig, FfmpegConfig};
use crate::domain::error::ConfigError;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;
    validate_config_value(key, value)?;

    let mut config = store.load().await?;
    apply_value(&mut config, key, value)?;
    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let config = store.load().await?;
    presenter.output(lookup_value(&config, key).as_deref().unwrap_or(NOT_SET));

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        presenter.key_value(key, lookup_value(&config, key).as_deref().unwrap_or(NOT_SET));
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn check_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        return Ok(());
    }
    Err(ConfigError::ValidationError {
        key: key.to_string(),
        message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
    })
}

/// Store a validated value under its key
fn apply_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "output_root" => config.output_root = Some(value.to_string()),
        "directory_name" => config.directory_name = Some(value.to_string()),
        "notify" => config.notify = Some(bool_value(key, value)?),
        "permission_prompt" => config.permission_prompt = Some(bool_value(key, value)?),
        _ => {
            let ffmpeg = config.ffmpeg.get_or_insert_with(FfmpegConfig::default);
            match key {
                "ffmpeg.input_format" => ffmpeg.input_format = Some(value.to_string()),
                "ffmpeg.input_device" => ffmpeg.input_device = Some(value.to_string()),
                "ffmpeg.bitrate" => ffmpeg.bitrate = Some(value.to_string()),
                _ => unreachable!(), // Already validated
            }
        }
    }
    Ok(())
}

/// Read the stored value for a key
fn lookup_value(config: &AppConfig, key: &str) -> Option<String> {
    let ffmpeg = config.ffmpeg.as_ref();
    match key {
        "output_root" => config.output_root.clone(),
        "directory_name" => config.directory_name.clone(),
        "notify" => config.notify.map(|b| b.to_string()),
        "permission_prompt" => config.permission_prompt.map(|b| b.to_string()),
        "ffmpeg.input_format" => ffmpeg.and_then(|f| f.input_format.clone()),
        "ffmpeg.input_device" => ffmpeg.and_then(|f| f.input_device.clone()),
        "ffmpeg.bitrate" => ffmpeg.and_then(|f| f.bitrate.clone()),
        _ => None,
    }
}

/// Validate a config value based on key type
fn validate_config_value(key: &str, value: &str) -> Result<(), ConfigError> {
    let invalid = |message: &str| ConfigError::ValidationError {
        key: key.to_string(),
        message: message.to_string(),
    };

    match key {
        "notify" | "permission_prompt" => {
            bool_value(key, value)?;
        }
        "directory_name" => {
            if value.is_empty() || value == "." || value == ".." {
                return Err(invalid("Value must be a directory name"));
            }
            if value.contains('/') || value.contains('\\') {
                return Err(invalid("Value must not contain path separators"));
            }
        }
        "ffmpeg.bitrate" => {
            let digits = value
                .strip_suffix('k')
                .or_else(|| value.strip_suffix('K'))
                .unwrap_or(value);
            if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
                return Err(invalid("Value must be a bitrate such as 128k"));
            }
        }
        "output_root" | "ffmpeg.input_format" | "ffmpeg.input_device" => {
            if value.trim().is_empty() {
                return Err(invalid("Value must not be empty"));
            }
        }
        _ => {}
    }
    Ok(())
}

fn bool_value(key: &str, value: &str) -> Result<bool, ConfigError> {
    parse_bool(value).map_err(|_| ConfigError::ValidationError {
        key: key.to_string(),
        message: "Value must be 'true' or 'false'".to_string(),
    })
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ()> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(()),
    }
}
