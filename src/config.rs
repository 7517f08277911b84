use std::fs;
use std::path::Path;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid pattern: {0}")]
    Regex(#[from] regex::Error),

    #[error("OpenAI API key not found! Please provide the OPENAI_API_KEY environment variable.")]
    MissingApiKey,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub llm: LlmConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Production mode tolerates a missing API key at startup
    #[serde(default)]
    pub production: bool,
    #[serde(default)]
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
    #[serde(default = "default_allowed_origin_regex")]
    pub allowed_origin_regex: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Overrides the provider's default API root
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_translate_params")]
    pub translate: CompletionParams,
    #[serde(default = "default_judge_params")]
    pub judge: CompletionParams,
}

/// Fixed generation parameters for one operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionParams {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_true")]
    pub json_mode: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_allowed_origins() -> Vec<String> {
    [
        "http://localhost:5173",
        "http://localhost:4173",
        "http://localhost:3000",
        "http://localhost:8000",
        "http://localhost:8080",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_allowed_origin_regex() -> Option<String> {
    Some(r"^https://.*-[a-z0-9]+\.run\.app$".to_string())
}

fn default_provider() -> String {
    "openai_llm".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_max_tokens() -> u32 {
    800
}

fn default_temperature() -> f32 {
    1.0
}

fn default_true() -> bool {
    true
}

fn default_translate_params() -> CompletionParams {
    CompletionParams {
        model: default_model(),
        max_tokens: 800,
        temperature: default_temperature(),
        json_mode: true,
    }
}

fn default_judge_params() -> CompletionParams {
    CompletionParams {
        model: default_model(),
        max_tokens: 500,
        temperature: default_temperature(),
        json_mode: true,
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            production: false,
            cors: CorsConfig::default(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
            allowed_origin_regex: default_allowed_origin_regex(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            base_url: None,
            api_key: None,
            translate: default_translate_params(),
            judge: default_judge_params(),
        }
    }
}

/// Replace `${VAR_NAME}` with the variable's value; unknown variables are left as is
pub fn substitute_env_vars<F>(content: &str, lookup: F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let pattern = Regex::new(r"\$\{(\w+)\}")?;
    let replaced = pattern.replace_all(content, |caps: &Captures<'_>| {
        lookup(&caps[1]).unwrap_or_else(|| caps[0].to_string())
    });
    Ok(replaced.into_owned())
}

/// Interpret an environment flag; unset-like values are false
fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_lowercase().as_str(),
        "" | "0" | "false" | "no" | "off"
    )
}

impl Config {
    /// Load configuration from a YAML or JSON file
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        let content = substitute_env_vars(&content, |name| std::env::var(name).ok())?;
        Self::parse(path, &content)
    }

    /// Determine the format by extension, YAML unless `.json`
    pub fn parse(path: &str, content: &str) -> Result<Self, ConfigError> {
        let is_json = Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if is_json {
            Ok(serde_json::from_str(content)?)
        } else if content.trim().is_empty() {
            Ok(Self::default())
        } else {
            Ok(serde_yaml::from_str(content)?)
        }
    }

    /// Build configuration from `CONFIG_PATH` (if set) and the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match std::env::var("CONFIG_PATH") {
            Ok(path) => {
                let config = Self::load(&path)?;
                info!("Loaded configuration from: {}", path);
                config
            }
            Err(_) => Self::default(),
        };
        config.apply_env_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("OPENAI_API_KEY").filter(|k| !k.trim().is_empty()) {
            self.llm.api_key = Some(key);
        }
        if let Some(url) = lookup("OPENAI_BASE_URL").filter(|u| !u.trim().is_empty()) {
            self.llm.base_url = Some(url);
        }
        if let Some(provider) = lookup("LLM_PROVIDER").filter(|p| !p.trim().is_empty()) {
            self.llm.provider = provider;
        }
        if let Some(host) = lookup("HOST").filter(|h| !h.trim().is_empty()) {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            match port.trim().parse() {
                Ok(port) => self.server.port = port,
                Err(_) => warn!("Ignoring invalid PORT value: {}", port),
            }
        }
        if let Some(flag) = lookup("PRODUCTION") {
            self.server.production = parse_flag(&flag);
        }
        if let Some(origins) = lookup("CORS_ALLOWED_ORIGINS") {
            self.server.cors.allowed_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect();
        }
    }

    /// A missing API key is fatal outside production
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(pattern) = &self.server.cors.allowed_origin_regex {
            Regex::new(pattern)?;
        }

        let has_key = self
            .llm
            .api_key
            .as_deref()
            .map(|k| !k.trim().is_empty() && !k.starts_with("${"))
            .unwrap_or(false);
        if !has_key {
            warn!("OpenAI API key not found!");
            warn!("Please provide the OPENAI_API_KEY environment variable.");
            if !self.server.production {
                return Err(ConfigError::MissingApiKey);
            }
        }
        Ok(())
    }

    pub fn environment_name(&self) -> &'static str {
        if self.server.production {
            "Production"
        } else {
            "Development"
        }
    }
}
