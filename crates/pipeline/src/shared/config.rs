use contracts::shared::charts::Dimensions;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub data_source: DataSourceConfig,
    #[serde(default)]
    pub charts: ChartConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DataSourceConfig {
    pub base_url: String,
    /// Transport timeout. Absent means the client never times out.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct ChartConfig {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    pub min_bar_height: f64,
    /// Inner radius as a fraction of the outer one; 0 draws pies
    pub donut_inner_ratio: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 320.0,
            padding: 40.0,
            min_bar_height: 2.0,
            donut_inner_ratio: 0.6,
        }
    }
}

impl ChartConfig {
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height, self.padding)
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[data_source]
base_url = "http://localhost:3000"

[charts]
width = 640.0
height = 320.0
padding = 40.0
min_bar_height = 2.0
donut_inner_ratio = 0.6
"#;

/// Load configuration from config.toml
///
/// Search order:
/// 1. Next to the executable
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                return parse_config(&contents);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    Ok(config)
}
