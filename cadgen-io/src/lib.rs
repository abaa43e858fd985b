//! 图纸与实体模型的输出编码，以及参数文件读取与产物落盘。

use std::fs;
use std::path::{Path, PathBuf};

use cadgen_core::sink::Drawing;
use cadgen_engine::RawParameters;
use cadgen_engine::extrude::SolidModel;
use thiserror::Error;
use tracing::debug;

pub mod artifacts;
pub mod dxf;
pub mod stl;
pub mod svg;

pub use artifacts::ArtifactSet;
pub use dxf::DxfWriter;
pub use stl::StlWriter;
pub use svg::SvgPreview;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("failed to read file {path:?}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write file {path:?}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid parameter file {path:?}: {source}")]
    InvalidParameters {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode mesh: {0}")]
    Mesh(#[source] std::io::Error),
    #[error("failed to format output: {0}")]
    Format(#[from] std::fmt::Error),
}

/// 把二维图纸编码为某种文本格式。
pub trait DrawingEncoder {
    /// 产物文件扩展名（不含点）。
    fn extension(&self) -> &'static str;

    fn encode(&self, drawing: &Drawing) -> Result<String, IoError>;
}

/// 把三维实体模型编码为网格格式。
pub trait SolidEncoder {
    fn extension(&self) -> &'static str;

    fn encode(&self, model: &SolidModel) -> Result<Vec<u8>, IoError>;
}

/// 读取 JSON 参数文件。单位换算与默认值由 [`RawParameters::normalize`] 负责。
pub fn load_parameters(path: &Path) -> Result<RawParameters, IoError> {
    let data = fs::read_to_string(path).map_err(|source| IoError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    let raw = parse_parameters(&data).map_err(|source| IoError::InvalidParameters {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), shape = ?raw.shape_type, "已读取参数文件");
    Ok(raw)
}

pub fn parse_parameters(data: &str) -> Result<RawParameters, serde_json::Error> {
    serde_json::from_str(data)
}
