use std::{fs, path::Path};

use anyhow::{Context, ensure};
use libgame::Rule;
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub width: usize,
    pub height: usize,

    /// Chance for each cell to start out alive when the board is seeded.
    pub alive_probability: f64,

    /// Seed for the board generator, a random one is picked (and logged) when missing.
    pub seed: Option<u64>,

    pub rule: Rule,

    /// Time between two generations while the ticker runs.
    pub tick_millis: u64,
    pub target_fps: u64,

    /// Whether to start ticking right away instead of waiting for a `run` command.
    pub autostart: bool,

    pub alive_glyph: char,
    pub empty_glyph: char,
    pub bold_alive: bool,

    /// Tracing filter, e.g. "info" or "libgame=debug,client=debug".
    pub log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 64,
            height: 32,
            alive_probability: 0.2,
            seed: None,
            rule: Rule::default(),
            tick_millis: 100,
            target_fps: 30,
            autostart: true,
            alive_glyph: '+',
            empty_glyph: '.',
            bold_alive: true,
            log: "info".to_owned(),
        }
    }
}

impl Config {
    pub fn load<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();

        let config_serialized =
            fs::read(path).with_context(|| format!("Reading config {}", path.display()))?;
        let config: Self = serde_json::from_slice(&config_serialized)
            .with_context(|| format!("Deserializing config {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn log_filter(&self) -> anyhow::Result<EnvFilter> {
        EnvFilter::try_new(&self.log)
            .with_context(|| format!("Invalid log filter {:?}", self.log))
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.width > 0 && self.height > 0,
            "Board must be at least 1x1, got {}x{}",
            self.width,
            self.height
        );
        ensure!(
            (0.0..=1.0).contains(&self.alive_probability),
            "alive_probability must be within 0..=1, got {}",
            self.alive_probability
        );
        ensure!(self.tick_millis > 0, "tick_millis must be positive");
        ensure!(self.target_fps > 0, "target_fps must be positive");
        self.log_filter()?;

        Ok(())
    }
}
