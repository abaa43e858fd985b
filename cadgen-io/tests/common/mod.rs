//! 把写出的 DXF 文本读回来做计数校验。

use std::collections::BTreeMap;

use cadgen_core::layer::StandardLayer;

/// 读出全部 `组码 / 值` 对。组码无法解析或缺少值行时报告行号。
pub fn read_pairs(source: &str) -> Result<Vec<(i32, String)>, String> {
    let mut lines = source.lines().enumerate();
    let mut pairs = Vec::new();
    while let Some((index, code_line)) = lines.next() {
        let Some((_, value_line)) = lines.next() else {
            return Err(format!("第 {} 行的组码缺少值行", index + 1));
        };
        let code = code_line
            .trim()
            .parse::<i32>()
            .map_err(|_| format!("第 {} 行的组码 \"{}\" 无法解析", index + 1, code_line.trim()))?;
        pairs.push((code, value_line.trim_end_matches('\r').to_string()));
    }
    Ok(pairs)
}

/// 图层表与 `ENTITIES` 段中每种实体在各图层的数量。
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DxfSummary {
    pub insunits: Option<i32>,
    pub layers: BTreeMap<String, i32>,
    pub entities: BTreeMap<(String, String), usize>,
}

impl DxfSummary {
    pub fn count(&self, kind: &str, layer: StandardLayer) -> usize {
        self.entities
            .get(&(kind.to_string(), layer.name().to_string()))
            .copied()
            .unwrap_or(0)
    }

    pub fn total(&self, kind: &str) -> usize {
        self.entities
            .iter()
            .filter(|((entity_kind, _), _)| entity_kind == kind)
            .map(|(_, count)| count)
            .sum()
    }
}

pub fn summarize(source: &str) -> DxfSummary {
    let pairs = read_pairs(source).expect("well-formed group pairs");
    let mut summary = DxfSummary::default();
    let mut section = String::new();
    let mut pending_variable: Option<String> = None;
    let mut current: Option<String> = None;
    let mut layer_name: Option<String> = None;

    for (code, value) in pairs {
        if code == 2 && current.as_deref() == Some("SECTION") {
            section = value;
            current = None;
            continue;
        }
        match (code, section.as_str()) {
            (0, _) => current = Some(value),
            (9, "HEADER") => pending_variable = Some(value),
            (70, "HEADER") if pending_variable.as_deref() == Some("$INSUNITS") => {
                summary.insunits = value.trim().parse().ok();
            }
            (2, "TABLES") if current.as_deref() == Some("LAYER") => layer_name = Some(value),
            (62, "TABLES") if current.as_deref() == Some("LAYER") => {
                if let Some(name) = layer_name.take() {
                    let color = value.trim().parse().expect("integer layer colour");
                    summary.layers.insert(name, color);
                }
            }
            (8, "ENTITIES") => {
                if let Some(kind) = current.as_deref() {
                    if kind != "VERTEX" && kind != "SEQEND" {
                        *summary
                            .entities
                            .entry((kind.to_string(), value))
                            .or_default() += 1;
                    }
                }
            }
            _ => {}
        }
    }
    summary
}

#[test]
fn malformed_group_pairs_are_rejected() {
    assert!(read_pairs("  0\nSECTION\n  2\n").is_err());
    assert!(read_pairs("abc\nSECTION\n").is_err());
}
