//! 参数 → 三视图 → 编码 → 原子落盘。

use std::path::PathBuf;

use anyhow::Context;
use cadgen_config::AppConfig;
use cadgen_engine::extrude::extrude;
use cadgen_engine::record::GenerationRecord;
use cadgen_engine::{EngineError, ShapeParameters, ViewLayout, generate};
use cadgen_io::{
    ArtifactSet, DrawingEncoder, DxfWriter, SolidEncoder, StlWriter, SvgPreview,
};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub directory: PathBuf,
    pub name: Option<String>,
    pub svg_preview: bool,
    pub stl_model: bool,
    pub record: bool,
    pub preview: SvgPreview,
    pub layout: ViewLayout,
}

impl OutputOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            directory: config.output.directory.clone(),
            name: None,
            svg_preview: config.output.svg_preview,
            stl_model: config.output.stl_model,
            record: config.output.record,
            preview: SvgPreview::new(config.output.svg_width, config.output.svg_height),
            layout: ViewLayout::with_gap(config.layout.view_gap),
        }
    }
}

#[derive(Debug)]
pub struct Outcome {
    pub record: GenerationRecord,
    pub written: Vec<PathBuf>,
}

/// 所有编码都在内存中完成后才开始写文件，失败时不会留下任何产物。
pub fn run(params: &ShapeParameters, options: &OutputOptions) -> anyhow::Result<Outcome> {
    let views = generate(params).context("生成三视图失败")?;
    let sheet = views.compose(&options.layout);
    let name = options
        .name
        .clone()
        .unwrap_or_else(|| views.kind.key().to_string());

    let mut artifacts = ArtifactSet::new(&options.directory, &name);
    let dxf = DxfWriter.encode(&sheet).context("DXF 编码失败")?;
    artifacts.add(DxfWriter.extension(), dxf);

    if options.svg_preview {
        let svg = options.preview.encode(&sheet).context("SVG 预览编码失败")?;
        artifacts.add(options.preview.extension(), svg);
    }

    if options.stl_model {
        match extrude(params) {
            Ok(model) => {
                let writer = StlWriter::default();
                let stl = writer.encode(&model).context("STL 编码失败")?;
                artifacts.add(writer.extension(), stl);
            }
            Err(EngineError::ExtrusionUnsupported(kind)) => {
                warn!(shape = %kind, "该形状没有三维模型，跳过 STL");
            }
            Err(err) => return Err(err).context("构建三维模型失败"),
        }
    }

    let record = GenerationRecord::new(params, &views).with_artifacts(artifacts.file_names());
    if options.record {
        let json = serde_json::to_vec_pretty(&record).context("生成记录序列化失败")?;
        artifacts.add("json", json);
    }

    let written = artifacts.commit().context("写出产物失败")?;
    info!(
        shape = %record.shape,
        entities = record.total_entities(),
        files = written.len(),
        "生成完成"
    );
    Ok(Outcome { record, written })
}
