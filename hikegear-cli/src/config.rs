//! Settings loaded from the TOML config file and environment.
//!
//! Priority: env vars > config file > built-in defaults.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use hikegear_import::ImportLimits;
use hikegear_scraper::FetchOptions;
use hikegear_sheet::SheetOptions;

use crate::error::CliError;

pub(crate) const ENV_MAX_ATTEMPTS: &str = "HIKEGEAR_MAX_ATTEMPTS";
pub(crate) const ENV_TIMEOUT_SECS: &str = "HIKEGEAR_TIMEOUT_SECS";
pub(crate) const ENV_IMPORT_LABEL: &str = "HIKEGEAR_IMPORT_LABEL";

/// Where a setting's value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SettingSource {
    EnvVar(&'static str),
    ConfigFile,
    Default,
}

impl fmt::Display for SettingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

/// TOML config file format.
#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    import: Option<ImportSection>,
    fetch: Option<FetchSection>,
}

#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
#[serde(deny_unknown_fields)]
struct ImportSection {
    name_max_len: Option<usize>,
    description_max_len: Option<usize>,
    max_weight: Option<u32>,
    max_rows: Option<usize>,
    category_label: Option<String>,
    category_keyword: Option<String>,
}

#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
#[serde(deny_unknown_fields)]
struct FetchSection {
    max_attempts: Option<u32>,
    timeout_secs: Option<u64>,
    user_agent: Option<String>,
}

/// Effective settings for all commands.
#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub limits: ImportLimits,
    pub sheet: SheetOptions,
    pub fetch: FetchOptions,
    /// Provenance of each named setting, in display order.
    pub sources: Vec<(&'static str, String, SettingSource)>,
}

/// Return the default config file path.
pub(crate) fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("hikegear").join("config.toml"))
}

fn load_config_file(path: &Path) -> Result<ConfigFile, CliError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(ConfigFile::default()),
        Err(e) => return Err(e.into()),
    };
    toml::from_str(&text)
        .map_err(|e| CliError::config(format!("{}: {}", path.display(), e)))
}

fn env_parsed<T: std::str::FromStr>(var: &'static str) -> Result<Option<T>, CliError> {
    match std::env::var(var) {
        Ok(v) => v
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| CliError::config(format!("${} has an invalid value '{}'", var, v))),
        Err(_) => Ok(None),
    }
}

/// Pick the highest-priority value and remember where it came from.
fn resolve<T>(
    env: Option<(T, &'static str)>,
    file: Option<T>,
    default: T,
) -> (T, SettingSource) {
    match (env, file) {
        (Some((v, var)), _) => (v, SettingSource::EnvVar(var)),
        (None, Some(v)) => (v, SettingSource::ConfigFile),
        (None, None) => (default, SettingSource::Default),
    }
}

impl Settings {
    /// Load settings from `path`, or the default config path when `None`.
    /// A missing file means defaults.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self, CliError> {
        let path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => config_path(),
        };
        let file = match &path {
            Some(p) => load_config_file(p)?,
            None => ConfigFile::default(),
        };
        let env = Overrides {
            max_attempts: env_parsed(ENV_MAX_ATTEMPTS)?,
            timeout_secs: env_parsed(ENV_TIMEOUT_SECS)?,
            import_label: env_parsed(ENV_IMPORT_LABEL)?,
        };
        Self::from_parts(file, env)
    }

    fn from_parts(file: ConfigFile, env: Overrides) -> Result<Self, CliError> {
        let import = file.import.unwrap_or_default();
        let fetch = file.fetch.unwrap_or_default();
        let limit_defaults = ImportLimits::default();
        let fetch_defaults = FetchOptions::default();
        let mut sources = Vec::new();

        let mut track = |name: &'static str, value: String, source: SettingSource| {
            sources.push((name, value, source));
        };

        let (item_name_max, src) = resolve(None, import.name_max_len, limit_defaults.item_name_max);
        track("import.name_max_len", item_name_max.to_string(), src);

        let (item_description_max, src) = resolve(
            None,
            import.description_max_len,
            limit_defaults.item_description_max,
        );
        track("import.description_max_len", item_description_max.to_string(), src);

        let (item_max_weight, src) =
            resolve(None, import.max_weight, limit_defaults.item_max_weight);
        track("import.max_weight", item_max_weight.to_string(), src);

        let (max_rows, src) = resolve(None, import.max_rows, limit_defaults.max_rows);
        if max_rows == 0 || max_rows > limit_defaults.max_rows {
            return Err(CliError::config(format!(
                "import.max_rows must be between 1 and {}",
                limit_defaults.max_rows
            )));
        }
        track("import.max_rows", max_rows.to_string(), src);

        let (import_category_name, src) = resolve(
            env.import_label.map(|v| (v, ENV_IMPORT_LABEL)),
            import.category_label,
            limit_defaults.import_category_name.clone(),
        );
        track("import.category_label", import_category_name.clone(), src);

        let (category_keyword, src) = resolve(
            None,
            import.category_keyword,
            SheetOptions::default().category_keyword,
        );
        if category_keyword.trim().is_empty() {
            return Err(CliError::config("import.category_keyword must not be empty"));
        }
        track("import.category_keyword", category_keyword.clone(), src);

        let (max_attempts, src) = resolve(
            env.max_attempts.map(|v| (v, ENV_MAX_ATTEMPTS)),
            fetch.max_attempts,
            fetch_defaults.max_attempts,
        );
        if max_attempts == 0 {
            return Err(CliError::config("fetch.max_attempts must be at least 1"));
        }
        track("fetch.max_attempts", max_attempts.to_string(), src);

        let (timeout_secs, src) = resolve(
            env.timeout_secs.map(|v| (v, ENV_TIMEOUT_SECS)),
            fetch.timeout_secs,
            fetch_defaults.timeout.as_secs(),
        );
        track("fetch.timeout_secs", timeout_secs.to_string(), src);

        let (user_agent, src) = resolve(None, fetch.user_agent, fetch_defaults.user_agent.clone());
        track("fetch.user_agent", user_agent.clone(), src);

        Ok(Self {
            limits: ImportLimits {
                item_name_max,
                item_description_max,
                item_max_weight,
                max_rows,
                import_category_name,
                ..limit_defaults
            },
            sheet: SheetOptions { category_keyword },
            fetch: FetchOptions {
                max_attempts,
                timeout: Duration::from_secs(timeout_secs),
                user_agent,
                ..fetch_defaults
            },
            sources,
        })
    }
}

/// Values taken from environment variables.
#[derive(Debug, Default)]
struct Overrides {
    max_attempts: Option<u32>,
    timeout_secs: Option<u64>,
    import_label: Option<String>,
}
