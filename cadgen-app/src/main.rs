use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use cadgen_config::{AppConfig, ConfigError};
use cadgen_engine::params::{LengthUnit, RawOpening};
use cadgen_engine::{RawParameters, registry};
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

mod pipeline;

use pipeline::OutputOptions;

/// 根据形状参数生成三视图 CAD 图纸（DXF），并可附带 SVG 预览与 STL 模型。
#[derive(Parser, Debug)]
#[command(name = "cadgen", version, about, long_about = None)]
struct Args {
    /// JSON 参数文件；命令行给出的字段会覆盖文件中的值
    #[arg(long, value_name = "FILE")]
    params: Option<PathBuf>,

    /// 形状类型或别名，例如 chair、kursi、meja、ruangan
    #[arg(long)]
    shape: Option<String>,

    #[arg(long)]
    width: Option<f64>,

    #[arg(long, alias = "depth")]
    length: Option<f64>,

    #[arg(long)]
    height: Option<f64>,

    #[arg(long)]
    diameter: Option<f64>,

    #[arg(long)]
    radius: Option<f64>,

    /// 输入长度单位：mm、cm（默认）或 m
    #[arg(long, value_parser = parse_unit)]
    unit: Option<LengthUnit>,

    /// 门：`WALL[:WIDTH[:OFFSET]]`，可重复
    #[arg(long = "door", value_name = "WALL[:WIDTH[:OFFSET]]", value_parser = parse_opening)]
    doors: Vec<RawOpening>,

    /// 窗：`WALL[:WIDTH[:OFFSET]]`，可重复
    #[arg(long = "window", value_name = "WALL[:WIDTH[:OFFSET]]", value_parser = parse_opening)]
    windows: Vec<RawOpening>,

    #[arg(long)]
    description: Option<String>,

    /// 配置文件路径（默认读取 CADGEN_CONFIG 或 ./config/default.toml）
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// 产物目录，覆盖配置中的 output.directory
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// 产物文件名主干，默认为解析后的形状名
    #[arg(long)]
    name: Option<String>,

    /// 不写 SVG 预览
    #[arg(long)]
    no_svg: bool,

    /// 额外写出 STL 模型
    #[arg(long)]
    stl: bool,

    /// 不写 JSON 生成记录
    #[arg(long)]
    no_record: bool,

    /// 列出已注册的形状及别名后退出
    #[arg(long)]
    list_shapes: bool,
}

impl Args {
    /// 参数文件打底，命令行字段逐项覆盖。
    fn raw_parameters(&self) -> anyhow::Result<RawParameters> {
        let mut raw = match &self.params {
            Some(path) => cadgen_io::load_parameters(path)?,
            None => RawParameters::default(),
        };
        if let Some(shape) = &self.shape {
            raw.shape_type = Some(shape.clone());
        }
        if self.unit.is_some() {
            raw.unit = self.unit;
        }
        for (slot, value) in [
            (&mut raw.width, self.width),
            (&mut raw.length, self.length),
            (&mut raw.height, self.height),
            (&mut raw.diameter, self.diameter),
            (&mut raw.radius, self.radius),
        ] {
            if value.is_some() {
                *slot = value;
            }
        }
        if !self.doors.is_empty() {
            raw.doors = Some(self.doors.clone());
        }
        if !self.windows.is_empty() {
            raw.windows = Some(self.windows.clone());
        }
        if let Some(description) = &self.description {
            raw.description = Some(description.clone());
        }
        Ok(raw)
    }

    fn output_options(&self, config: &AppConfig) -> OutputOptions {
        let mut options = OutputOptions::from_config(config);
        if let Some(dir) = &self.output_dir {
            options.directory = dir.clone();
        }
        options.name = self.name.clone();
        options.svg_preview &= !self.no_svg;
        options.stl_model |= self.stl;
        options.record &= !self.no_record;
        options
    }
}

fn parse_unit(raw: &str) -> Result<LengthUnit, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "mm" => Ok(LengthUnit::Millimeter),
        "cm" => Ok(LengthUnit::Centimeter),
        "m" => Ok(LengthUnit::Meter),
        other => Err(format!("未知单位 `{other}`，可选 mm、cm、m")),
    }
}

fn parse_opening(raw: &str) -> Result<RawOpening, String> {
    let mut parts = raw.split(':');
    let wall = parts
        .next()
        .map(str::trim)
        .filter(|wall| !wall.is_empty())
        .ok_or_else(|| "缺少墙体方位".to_string())?;
    let mut number = |label: &str| -> Result<Option<f64>, String> {
        parts
            .next()
            .map(|value| {
                value
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| format!("{label} `{value}` 不是数字"))
            })
            .transpose()
    };
    let width = number("宽度")?;
    let offset = number("偏移")?;
    Ok(RawOpening {
        wall: Some(wall.to_string()),
        width,
        offset,
    })
}

fn main() -> ExitCode {
    let args = Args::parse();
    let config = load_configuration(args.config.clone());
    init_logging(&config);

    if args.list_shapes {
        for (kind, aliases) in registry::registry().available_shapes() {
            println!("{kind}: {}", aliases.join(", "));
        }
        return ExitCode::SUCCESS;
    }

    match run(&args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %format!("{err:#}"), "生成失败");
            eprintln!("错误：{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, config: &AppConfig) -> anyhow::Result<()> {
    let params = args
        .raw_parameters()?
        .normalize()
        .context("参数规范化失败")?;
    info!(shape = %params.shape_type, "启动 cadgen 生成");

    let outcome = pipeline::run(&params, &args.output_options(config))?;
    for path in &outcome.written {
        println!("{}", path.display());
    }
    Ok(())
}

fn load_configuration(override_path: Option<PathBuf>) -> AppConfig {
    match override_path {
        Some(path) => AppConfig::from_file(&path).unwrap_or_else(|err| {
            warn!(path = %path.display(), error = %err, "加载指定配置失败，使用默认配置");
            AppConfig::default()
        }),
        None => match AppConfig::discover() {
            Ok(cfg) => cfg,
            Err(err) => {
                match &err {
                    ConfigError::Io { path, .. } | ConfigError::Parse { path, .. } => {
                        warn!(path = %path.display(), error = %err, "加载默认配置失败，使用内建默认值");
                    }
                    ConfigError::Invalid(_) | ConfigError::Context { .. } => {
                        warn!(error = %err, "加载默认配置失败，使用内建默认值");
                    }
                }
                AppConfig::default()
            }
        },
    }
}

fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_new(config.logging.level.clone()).unwrap_or_else(|_| EnvFilter::new("info"));
    // 标准输出只留给产物路径
    let subscriber = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if subscriber.try_init().is_err() {
        // 已初始化，忽略
    }
}
