//! Loading [`StateTaxConfig`] documents from TOML.
//!
//! A document is parsed, then validated; nothing reaches the registry
//! until both steps pass. Six documents ship inside the binary (see
//! [`BUILTIN_CONFIGS`]) and more can be loaded from a directory.

use std::fs;
use std::path::{Path, PathBuf};

use tax_core::state::{StateConfigError, StateRegistry, StateTaxConfig};
use thiserror::Error;
use tracing::{debug, info};

/// Embedded documents as `(file name, contents)`.
pub const BUILTIN_CONFIGS: [(&str, &str); 6] = [
    ("il.toml", include_str!("../configs/il.toml")),
    ("in.toml", include_str!("../configs/in.toml")),
    ("ma.toml", include_str!("../configs/ma.toml")),
    ("nc.toml", include_str!("../configs/nc.toml")),
    ("oh.toml", include_str!("../configs/oh.toml")),
    ("va.toml", include_str!("../configs/va.toml")),
];

#[derive(Debug, Error)]
pub enum StateConfigLoadError {
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse state document '{origin}': {source}")]
    Parse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid state document '{origin}': {source}")]
    Invalid {
        origin: String,
        #[source]
        source: StateConfigError,
    },
}

/// Parses and validates one document. `origin` names it in errors.
pub fn parse_state_config(
    text: &str,
    origin: &str,
) -> Result<StateTaxConfig, StateConfigLoadError> {
    let config: StateTaxConfig =
        toml::from_str(text).map_err(|source| StateConfigLoadError::Parse {
            origin: origin.to_string(),
            source,
        })?;
    config
        .validate()
        .map_err(|source| StateConfigLoadError::Invalid {
            origin: origin.to_string(),
            source,
        })?;
    debug!(
        origin,
        state = %config.state_code,
        tax_year = config.tax_year,
        "state document loaded"
    );
    Ok(config)
}

/// Every embedded document, parsed and validated.
pub fn builtin_configs() -> Result<Vec<StateTaxConfig>, StateConfigLoadError> {
    BUILTIN_CONFIGS
        .iter()
        .map(|(name, text)| parse_state_config(text, name))
        .collect()
}

/// Every `*.toml` file in `dir`, in file-name order.
pub fn load_config_dir(dir: &Path) -> Result<Vec<StateTaxConfig>, StateConfigLoadError> {
    let io_error = |source| StateConfigLoadError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.extension().is_some_and(|ext| ext == "toml") {
            paths.push(path);
        }
    }
    paths.sort();

    paths
        .iter()
        .map(|path| {
            let text = fs::read_to_string(path).map_err(|source| StateConfigLoadError::Io {
                path: path.clone(),
                source,
            })?;
            parse_state_config(&text, &path.display().to_string())
        })
        .collect()
}

/// The hand-written calculators plus the embedded documents, plus any
/// documents in `extra_dir`. A document for a state and year that is
/// already registered replaces it.
pub fn build_registry(extra_dir: Option<&Path>) -> Result<StateRegistry, StateConfigLoadError> {
    let mut registry = StateRegistry::with_builtin_states();
    let mut configs = builtin_configs()?;
    if let Some(dir) = extra_dir {
        configs.extend(load_config_dir(dir)?);
    }
    let count = configs.len();
    for config in configs {
        let origin = config.state_code.clone();
        registry
            .register_config(config)
            .map_err(|source| StateConfigLoadError::Invalid { origin, source })?;
    }
    info!(
        documents = count,
        states = registry.available_states().len(),
        "state registry ready"
    );
    Ok(registry)
}
