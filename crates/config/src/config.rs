use derive_more::{Display, From};
use serde::Deserialize;
use serde_valid::yaml::FromYamlStr;
use serde_valid::Validate;

const DEFAULT_DEGENERACY_TOLERANCE: f64 = 1e-12;
const DEFAULT_REPORT_PRECISION: usize = 4;
const DEFAULT_PLOT_LABEL_PRECISION: usize = 2;

// Config Type
#[derive(Debug, Clone)]
pub struct Config {
    // Numeric settings for the least-squares fit.
    pub fit: FitConfig,
    // How fit results are rendered as text.
    pub report: ReportConfig,
    // HTTP API configuration, only needed when serving.
    pub server: Option<ServerConfig>,
}

impl Config {
    pub fn from_file(file_path: &str) -> Result<Self, ConfigError> {
        let config_file_content = std::fs::read_to_string(file_path)?;
        Self::from_yaml_str(&config_file_content)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let raw_config = RawConfig::from_yaml_str(s)?;

        // The plot legend is a rounded view of the reported equation.
        if raw_config.report.plot_label_precision > raw_config.report.precision {
            return Err(ConfigError::PlotPrecisionExceedsReport(
                raw_config.report.plot_label_precision,
                raw_config.report.precision,
            ));
        }

        Ok(Config { fit: raw_config.fit, report: raw_config.report, server: raw_config.server })
    }

    pub fn server(&self) -> Result<&ServerConfig, ConfigError> {
        self.server.as_ref().ok_or(ConfigError::ServerNotConfigured)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config { fit: FitConfig::default(), report: ReportConfig::default(), server: None }
    }
}

#[derive(Debug, From, Display)]
pub enum ConfigError {
    #[display("Plot label precision {} exceeds report precision {}", _0, _1)]
    #[from(ignore)]
    PlotPrecisionExceedsReport(usize, usize),

    #[display("Server section is missing from the configuration")]
    #[from(ignore)]
    ServerNotConfigured,

    #[display("Serde Error: {}", _0)]
    SerdeError(serde_valid::Error<serde_yaml::Error>),

    #[display("Error Reading Config File: {}", _0)]
    IoError(std::io::Error),
}

// Intermediate Config Type as Deserialization Target
#[derive(Debug, Deserialize, Validate)]
pub struct RawConfig {
    #[serde(default)]
    #[validate]
    pub fit: FitConfig,
    #[serde(default)]
    #[validate]
    pub report: ReportConfig,
    #[serde(default)]
    #[validate]
    pub server: Option<ServerConfig>,
}

#[derive(Debug, Deserialize, Validate, Clone, PartialEq)]
pub struct FitConfig {
    // Relative tolerance below which the normal-equation denominator counts as zero
    #[validate(exclusive_minimum = 0.0)]
    #[validate(maximum = 1e-3)]
    pub degeneracy_tolerance: f64,
}

impl Default for FitConfig {
    fn default() -> Self {
        FitConfig { degeneracy_tolerance: DEFAULT_DEGENERACY_TOLERANCE }
    }
}

#[derive(Debug, Deserialize, Validate, Clone, PartialEq)]
pub struct ReportConfig {
    // Decimal places used for slope, intercept and RMSE
    #[serde(default = "default_report_precision")]
    #[validate(maximum = 12)]
    pub precision: usize,
    // Decimal places used in the plot legend
    #[serde(default = "default_plot_label_precision")]
    #[validate(maximum = 12)]
    pub plot_label_precision: usize,
}

fn default_report_precision() -> usize {
    DEFAULT_REPORT_PRECISION
}

fn default_plot_label_precision() -> usize {
    DEFAULT_PLOT_LABEL_PRECISION
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            precision: DEFAULT_REPORT_PRECISION,
            plot_label_precision: DEFAULT_PLOT_LABEL_PRECISION,
        }
    }
}

#[derive(Debug, Deserialize, Validate, Clone, PartialEq)]
pub struct ServerConfig {
    // The port the server will listen on
    #[validate(minimum = 1)]
    pub port: u16,

    // The host the server will listen on
    #[validate(min_length = 1)]
    pub host: String,
}

pub fn get_sample_config() -> Config {
    Config::from_file("../../config.yaml.example").unwrap()
}
