use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct SimConfig {
    pub sim: SimSection,
    pub world: WorldSection,
    pub logging: LoggingSection,
    #[serde(default)]
    pub economy: EconomySection,
    #[serde(default)]
    pub spawners: Vec<SpawnerSection>,
}

#[derive(Debug, Deserialize)]
pub struct SimSection {
    pub ticks: u64,
    pub seed: u64,
    /// Ticks between population/economy report lines. 0 = disabled.
    #[serde(default = "default_report_interval")]
    pub report_interval: u64,
}

fn default_report_interval() -> u64 {
    100
}

#[derive(Debug, Deserialize)]
pub struct WorldSection {
    pub width: i32,
    pub height: i32,
    /// Blocked rectangles as `[x0, y0, x1, y1]`, inclusive tile bounds.
    #[serde(default)]
    pub walls: Vec<[i32; 4]>,
}

#[derive(Debug, Deserialize)]
pub struct LoggingSection {
    pub level: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct EconomySection {
    #[serde(default)]
    pub wood: f32,
    #[serde(default)]
    pub stone: f32,
    #[serde(default)]
    pub iron: f32,
    #[serde(default)]
    pub food: f32,
}

#[derive(Debug, Deserialize)]
pub struct SpawnerSection {
    pub kind: String,
    pub x: f32,
    pub y: f32,
    pub capacity: u32,
    pub interval: u64,
}

impl SimConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }
}
