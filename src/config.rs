use std::{path::PathBuf, str::FromStr, time::Duration};

use thiserror::Error;

use crate::{
    audio::config::{AudioConfig, EngineKind},
    task::simulator::GenerationConfig,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: `{value}` ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub audio: AudioConfig,
    pub generation: GenerationConfig,
}

impl AppConfig {
    /// Defaults overridden by `MUSICGPT_*` variables. Call after `.env` is loaded.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let env = Env { lookup: &lookup };

        if let Some(ms) = env.parse::<u64>("MUSICGPT_TICK_MS")? {
            config.generation.tick = Duration::from_millis(ms);
        }
        if let Some(min) = env.parse::<u32>("MUSICGPT_QUEUE_MIN")? {
            config.generation.queue_range.start = min;
        }
        if let Some(max) = env.parse::<u32>("MUSICGPT_QUEUE_MAX")? {
            config.generation.queue_range.end = max;
        }
        if let Some(words) = env.parse::<usize>("MUSICGPT_TITLE_WORDS")? {
            config.generation.title_words = words;
        }

        if let Some(engine) = env.parse::<EngineKind>("MUSICGPT_ENGINE")? {
            config.audio.engine = engine;
        }
        if let Some(dir) = lookup("MUSICGPT_MEDIA_DIR") {
            config.audio.media_dir = PathBuf::from(dir);
        }
        if let Some(volume) = env.parse::<u8>("MUSICGPT_VOLUME")? {
            config.audio.volume = volume;
        }
        if let Some(ms) = env.parse::<u64>("MUSICGPT_CLOSE_GRACE_MS")? {
            config.audio.close_grace = Duration::from_millis(ms);
        }
        if let Some(ms) = env.parse::<u64>("MUSICGPT_READY_DELAY_MS")? {
            config.audio.ready_delay = Duration::from_millis(ms);
        }
        if let Some(secs) = env.parse::<u64>("MUSICGPT_SILENT_TRACK_SECS")? {
            config.audio.silent_track_length = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let generation = &self.generation;
        if generation.tick.is_zero() {
            return Err(invalid("MUSICGPT_TICK_MS", "0", "must be positive"));
        }
        if generation.queue_range.is_empty() {
            return Err(invalid(
                "MUSICGPT_QUEUE_MAX",
                &generation.queue_range.end.to_string(),
                "must be greater than MUSICGPT_QUEUE_MIN",
            ));
        }
        if generation.title_words == 0 {
            return Err(invalid("MUSICGPT_TITLE_WORDS", "0", "must be at least 1"));
        }
        if self.audio.volume > 100 {
            return Err(invalid(
                "MUSICGPT_VOLUME",
                &self.audio.volume.to_string(),
                "must be within 0..=100",
            ));
        }
        Ok(())
    }
}

struct Env<'a, F> {
    lookup: &'a F,
}

impl<F> Env<'_, F>
where
    F: Fn(&str) -> Option<String>,
{
    fn parse<T>(&self, key: &'static str) -> Result<Option<T>, ConfigError>
    where
        T: FromStr,
        T::Err: ToString,
    {
        match (self.lookup)(key) {
            None => Ok(None),
            Some(raw) => raw
                .trim()
                .parse()
                .map(Some)
                .map_err(|e: T::Err| invalid(key, &raw, &e.to_string())),
        }
    }
}

fn invalid(key: &'static str, value: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_overrides() {
        let config = load(&[]).unwrap();

        assert_eq!(config.generation.tick, Duration::from_millis(100));
        assert_eq!(config.generation.queue_range, 15_000..25_000);
        assert_eq!(config.generation.title_words, 4);
        assert_eq!(config.audio.close_grace, Duration::from_millis(500));
        assert_eq!(config.audio.engine, EngineKind::Rodio);
    }

    #[test]
    fn overrides_are_applied() {
        let config = load(&[
            ("MUSICGPT_TICK_MS", "5"),
            ("MUSICGPT_TITLE_WORDS", "3"),
            ("MUSICGPT_ENGINE", " Silent "),
            ("MUSICGPT_MEDIA_DIR", "/tmp/media"),
            ("MUSICGPT_QUEUE_MIN", "10"),
            ("MUSICGPT_QUEUE_MAX", "20"),
        ])
        .unwrap();

        assert_eq!(config.generation.tick, Duration::from_millis(5));
        assert_eq!(config.generation.title_words, 3);
        assert_eq!(config.generation.queue_range, 10..20);
        assert_eq!(config.audio.engine, EngineKind::Silent);
        assert_eq!(config.audio.media_dir, PathBuf::from("/tmp/media"));
    }

    #[test]
    fn unparseable_value_is_rejected() {
        let err = load(&[("MUSICGPT_TICK_MS", "fast")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "MUSICGPT_TICK_MS", .. }));

        let err = load(&[("MUSICGPT_ENGINE", "alsa")]).unwrap_err();
        assert!(err.to_string().contains("unknown engine"));
    }

    #[test]
    fn inconsistent_values_are_rejected() {
        assert!(load(&[("MUSICGPT_QUEUE_MIN", "30000")]).is_err());
        assert!(load(&[("MUSICGPT_TITLE_WORDS", "0")]).is_err());
        assert!(load(&[("MUSICGPT_VOLUME", "150")]).is_err());
        assert!(load(&[("MUSICGPT_TICK_MS", "0")]).is_err());
    }
}
