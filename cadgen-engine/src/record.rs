//! 生成记录：一次成功生成的可序列化摘要，供调用方写入历史。

use std::collections::BTreeMap;

use cadgen_core::layer::StandardLayer;
use serde::Serialize;

use crate::generate::ViewSet;
use crate::params::{Opening, ShapeParameters};
use crate::shapes::ShapeKind;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRecord {
    /// 实际使用的生成器。
    pub shape: ShapeKind,
    /// 调用方给出的原始类型名（可能是别名或未知名称）。
    pub requested_type: String,
    pub dimensions: BTreeMap<&'static str, f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub doors: Vec<Opening>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub windows: Vec<Opening>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub entity_counts: BTreeMap<StandardLayer, usize>,
    /// 已写出的产物文件名。
    pub artifacts: Vec<String>,
}

impl GenerationRecord {
    pub fn new(params: &ShapeParameters, views: &ViewSet) -> Self {
        Self {
            shape: views.kind,
            requested_type: params.shape_type.clone(),
            dimensions: params.summary(views.kind),
            doors: params.doors.clone(),
            windows: params.windows.clone(),
            description: params.description.clone(),
            entity_counts: views.layer_counts(),
            artifacts: Vec::new(),
        }
    }

    pub fn with_artifacts<I, S>(mut self, artifacts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.artifacts = artifacts.into_iter().map(Into::into).collect();
        self
    }

    #[inline]
    pub fn total_entities(&self) -> usize {
        self.entity_counts.values().sum()
    }
}
