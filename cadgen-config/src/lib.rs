use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// 指定配置文件路径的环境变量。
pub const CONFIG_ENV: &str = "CADGEN_CONFIG";

/// 应用配置的根结构。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
}

impl AppConfig {
    /// 从显式路径加载配置。
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// 自动发现配置文件：优先读取环境变量 `CADGEN_CONFIG`，否则寻找 `./config/default.toml`。
    /// 若文件缺失，则返回默认配置。
    pub fn discover() -> Result<Self, ConfigError> {
        if let Some(path) = env::var_os(CONFIG_ENV) {
            return Self::from_file(PathBuf::from(path));
        }

        let current = env::current_dir().map_err(|source| ConfigError::Context {
            message: "获取当前工作目录失败".to_string(),
            source,
        })?;
        Self::discover_in(current)
    }

    /// 在给定目录下寻找 `config/default.toml`。
    pub fn discover_in(root: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let default_path = root.as_ref().join("config").join("default.toml");
        if default_path.exists() {
            Self::from_file(default_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.layout.view_gap.is_finite() && self.layout.view_gap >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "layout.view_gap 必须是非负数，当前为 {}",
                self.layout.view_gap
            )));
        }
        if self.output.svg_width == 0 || self.output.svg_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "预览尺寸必须大于 0，当前为 {}x{}",
                self.output.svg_width, self.output.svg_height
            )));
        }
        Ok(())
    }
}

/// 日志配置，支持设置默认等级。
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_string()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
        }
    }
}

/// 产物输出配置。
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "OutputConfig::default_directory")]
    pub directory: PathBuf,
    /// 是否同时写出 SVG 预览。
    #[serde(default = "OutputConfig::enabled")]
    pub svg_preview: bool,
    /// 是否写出 STL 三维模型（房间不支持，会被跳过）。
    #[serde(default)]
    pub stl_model: bool,
    /// 是否写出 JSON 生成记录。
    #[serde(default = "OutputConfig::enabled")]
    pub record: bool,
    #[serde(default = "OutputConfig::default_svg_width")]
    pub svg_width: u32,
    #[serde(default = "OutputConfig::default_svg_height")]
    pub svg_height: u32,
}

impl OutputConfig {
    fn default_directory() -> PathBuf {
        PathBuf::from("output")
    }

    fn enabled() -> bool {
        true
    }

    fn default_svg_width() -> u32 {
        800
    }

    fn default_svg_height() -> u32 {
        600
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: Self::default_directory(),
            svg_preview: true,
            stl_model: false,
            record: true,
            svg_width: Self::default_svg_width(),
            svg_height: Self::default_svg_height(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LayoutConfig {
    /// 合成图纸中视图之间的间距（厘米）。
    #[serde(default = "LayoutConfig::default_view_gap")]
    pub view_gap: f64,
}

impl LayoutConfig {
    fn default_view_gap() -> f64 {
        60.0
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            view_gap: Self::default_view_gap(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("读取配置文件 {path:?} 失败: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("解析配置文件 {path:?} 失败: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("配置无效: {0}")]
    Invalid(String),
    #[error("{message}")]
    Context {
        message: String,
        #[source]
        source: std::io::Error,
    },
}
