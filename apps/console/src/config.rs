use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::models::PersonaId;
use crate::reveal::{RevealSettings, DEFAULT_CADENCE, DEFAULT_INITIAL_VISIBLE};

const DEFAULT_CALL_TICK_MS: u64 = 1_000;
const DEFAULT_AGENT_NAME: &str = "You";
const MIN_REVEAL_CADENCE_MS: u64 = 250;
const MIN_CALL_TICK_MS: u64 = 100;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum AppProfile {
    Dev,
    Prod,
}

impl AppProfile {
    pub fn from_env(value: Option<String>) -> Self {
        match value.as_deref() {
            Some("prod") | Some("production") => Self::Prod,
            _ => Self::Dev,
        }
    }

    /// Dev builds also show reveal ticks and stale tickets.
    pub fn log_level(self) -> tracing::Level {
        match self {
            Self::Dev => tracing::Level::DEBUG,
            Self::Prod => tracing::Level::INFO,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    pub profile: AppProfile,
    pub reveal_cadence: Duration,
    pub initial_reveal: usize,
    pub call_tick: Duration,
    pub agent_name: String,
    pub default_persona: PersonaId,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            profile: AppProfile::Dev,
            reveal_cadence: DEFAULT_CADENCE,
            initial_reveal: DEFAULT_INITIAL_VISIBLE,
            call_tick: Duration::from_millis(DEFAULT_CALL_TICK_MS),
            agent_name: DEFAULT_AGENT_NAME.to_string(),
            default_persona: PersonaId::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        crate::config::load_dotenv();

        Self::from_lookup(read_env)
    }

    /// Builds a config from any key lookup; unset or unparsable keys keep
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        config.profile = AppProfile::from_env(lookup("CONSOLE_PROFILE"));

        if let Some(ms) =
            lookup("CONSOLE_REVEAL_CADENCE_MS").and_then(|value| value.trim().parse::<u64>().ok())
        {
            config.reveal_cadence = Duration::from_millis(ms.max(MIN_REVEAL_CADENCE_MS));
        }

        if let Some(count) =
            lookup("CONSOLE_INITIAL_REVEAL").and_then(|value| value.trim().parse::<usize>().ok())
        {
            config.initial_reveal = count;
        }

        if let Some(ms) =
            lookup("CONSOLE_CALL_TICK_MS").and_then(|value| value.trim().parse::<u64>().ok())
        {
            config.call_tick = Duration::from_millis(ms.max(MIN_CALL_TICK_MS));
        }

        if let Some(name) = lookup("CONSOLE_AGENT_NAME") {
            let trimmed = name.trim();
            if !trimmed.is_empty() {
                config.agent_name = trimmed.to_string();
            }
        }

        if let Some(raw) = lookup("CONSOLE_DEFAULT_PERSONA") {
            match PersonaId::from_slug(&raw) {
                Some(persona) => config.default_persona = persona,
                None => tracing::warn!(value = %raw, "unknown CONSOLE_DEFAULT_PERSONA, keeping default"),
            }
        }

        config
    }

    pub fn reveal_settings(&self) -> RevealSettings {
        RevealSettings {
            initial_visible: self.initial_reveal,
            cadence: self.reveal_cadence,
        }
    }

    pub fn call_tick_ms(&self) -> u32 {
        u32::try_from(self.call_tick.as_millis()).unwrap_or(u32::MAX)
    }
}

fn read_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .or_else(|| option_env_from_build(key).map(|s| s.to_string()))
}

fn option_env_from_build(key: &str) -> Option<&'static str> {
    match key {
        "CONSOLE_PROFILE" => option_env!("CONSOLE_PROFILE"),
        "CONSOLE_REVEAL_CADENCE_MS" => option_env!("CONSOLE_REVEAL_CADENCE_MS"),
        "CONSOLE_INITIAL_REVEAL" => option_env!("CONSOLE_INITIAL_REVEAL"),
        "CONSOLE_CALL_TICK_MS" => option_env!("CONSOLE_CALL_TICK_MS"),
        "CONSOLE_AGENT_NAME" => option_env!("CONSOLE_AGENT_NAME"),
        "CONSOLE_DEFAULT_PERSONA" => option_env!("CONSOLE_DEFAULT_PERSONA"),
        _ => None,
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_dotenv() {
    if let Err(err) = dotenvy::dotenv() {
        if !matches!(err, dotenvy::Error::Io(ref io_err) if io_err.kind() == std::io::ErrorKind::NotFound)
        {
            tracing::warn!("failed to load .env: {err}");
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[inline]
pub fn load_dotenv() {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_match_scripted_playback() {
        let config = config_from(&[]);
        assert_eq!(config.profile, AppProfile::Dev);
        assert_eq!(config.profile.log_level(), tracing::Level::DEBUG);
        assert_eq!(config.reveal_cadence, Duration::from_secs(4));
        assert_eq!(config.initial_reveal, 2);
        assert_eq!(config.call_tick_ms(), 1_000);
        assert_eq!(config.agent_name, "You");
        assert_eq!(config.default_persona, PersonaId::FrontlineCsr);
    }

    #[test]
    fn overrides_are_applied_and_clamped() {
        let config = config_from(&[
            ("CONSOLE_PROFILE", "production"),
            ("CONSOLE_REVEAL_CADENCE_MS", "10"),
            ("CONSOLE_INITIAL_REVEAL", "4"),
            ("CONSOLE_CALL_TICK_MS", "5"),
            ("CONSOLE_AGENT_NAME", "  Dana  "),
            ("CONSOLE_DEFAULT_PERSONA", "supervisor"),
        ]);
        assert_eq!(config.profile, AppProfile::Prod);
        assert_eq!(config.profile.log_level(), tracing::Level::INFO);
        assert_eq!(config.reveal_cadence, Duration::from_millis(250));
        assert_eq!(config.reveal_settings().initial_visible, 4);
        assert_eq!(config.call_tick, Duration::from_millis(100));
        assert_eq!(config.agent_name, "Dana");
        assert_eq!(config.default_persona, PersonaId::Supervisor);
    }

    #[test]
    fn garbage_values_keep_defaults() {
        let config = config_from(&[
            ("CONSOLE_REVEAL_CADENCE_MS", "fast"),
            ("CONSOLE_INITIAL_REVEAL", "-1"),
            ("CONSOLE_AGENT_NAME", "   "),
            ("CONSOLE_DEFAULT_PERSONA", "janitor"),
        ]);
        assert_eq!(config.reveal_cadence, DEFAULT_CADENCE);
        assert_eq!(config.initial_reveal, DEFAULT_INITIAL_VISIBLE);
        assert_eq!(config.agent_name, DEFAULT_AGENT_NAME);
        assert_eq!(config.default_persona, PersonaId::FrontlineCsr);
    }
}
