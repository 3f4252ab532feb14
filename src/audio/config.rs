use std::{path::PathBuf, str::FromStr, time::Duration};

use crate::util::log::get_data_dir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineKind {
    Rodio,
    Silent,
}

impl FromStr for EngineKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rodio" => Ok(Self::Rodio),
            "silent" => Ok(Self::Silent),
            other => Err(format!("unknown engine `{other}`")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AudioConfig {
    pub engine: EngineKind,
    pub media_dir: PathBuf,
    pub volume: u8,
    pub close_grace: Duration,
    pub ready_delay: Duration,
    pub silent_track_length: Duration,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            engine: EngineKind::Rodio,
            media_dir: get_data_dir().join("media"),
            volume: 100,
            close_grace: Duration::from_millis(500),
            ready_delay: Duration::from_millis(250),
            silent_track_length: Duration::from_secs(30),
        }
    }
}
