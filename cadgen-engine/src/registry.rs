//! 形状注册表：规范键到生成器、别名到规范键的两级查找。
//!
//! 标准注册表在首次访问时构建一次，此后只读，可在线程间无锁共享。

use std::collections::{BTreeMap, HashMap};

use once_cell::sync::Lazy;
use tracing::{debug, warn};

use crate::errors::EngineError;
use crate::shapes::{BoxShape, CadObject, ChairShape, CylinderShape, RoomShape, ShapeKind};

/// 无法识别的形状统一回退到箱体。
static FALLBACK: BoxShape = BoxShape;

static STANDARD: Lazy<ShapeRegistry> = Lazy::new(ShapeRegistry::standard);

const STANDARD_ALIASES: &[(&str, ShapeKind)] = &[
    ("kotak", ShapeKind::Box),
    ("persegi", ShapeKind::Box),
    ("meja", ShapeKind::Box),
    ("table", ShapeKind::Box),
    ("lemari", ShapeKind::Box),
    ("kabinet", ShapeKind::Box),
    ("cabinet", ShapeKind::Box),
    // L 形房间/家具没有专门的生成器，按箱体处理
    ("l_shape", ShapeKind::Box),
    ("silinder", ShapeKind::Cylinder),
    ("bundar", ShapeKind::Cylinder),
    ("bulat", ShapeKind::Cylinder),
    ("tiang", ShapeKind::Cylinder),
    ("pipa", ShapeKind::Cylinder),
    ("pillar", ShapeKind::Cylinder),
    ("pipe", ShapeKind::Cylinder),
    ("kursi", ShapeKind::Chair),
    ("bangku", ShapeKind::Chair),
    ("stool", ShapeKind::Chair),
    ("seat", ShapeKind::Chair),
    ("ruangan", ShapeKind::Room),
    ("ruang", ShapeKind::Room),
    ("kamar", ShapeKind::Room),
    ("bedroom", ShapeKind::Room),
];

/// 名称规范化：去首尾空白、转小写，`-` 与空格替换为 `_`。
pub fn normalize_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|ch| if ch == '-' || ch == ' ' { '_' } else { ch })
        .collect()
}

pub struct ShapeRegistry {
    generators: HashMap<ShapeKind, Box<dyn CadObject>>,
    aliases: HashMap<String, ShapeKind>,
}

impl ShapeRegistry {
    pub fn empty() -> Self {
        Self {
            generators: HashMap::new(),
            aliases: HashMap::new(),
        }
    }

    /// 内置四种形状及全部别名。
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register(BoxShape);
        registry.register(CylinderShape);
        registry.register(ChairShape);
        registry.register(RoomShape);
        for (alias, kind) in STANDARD_ALIASES {
            registry.register_alias(alias, *kind);
        }
        debug!(
            shapes = registry.generators.len(),
            aliases = registry.aliases.len(),
            "形状注册表已构建"
        );
        registry
    }

    pub fn register<G: CadObject + 'static>(&mut self, generator: G) {
        self.generators.insert(generator.kind(), Box::new(generator));
    }

    pub fn register_alias(&mut self, alias: &str, kind: ShapeKind) {
        self.aliases.insert(normalize_name(alias), kind);
    }

    /// 先查规范键，再查别名；只有对应生成器已注册时才算命中。
    pub fn lookup(&self, name: &str) -> Option<ShapeKind> {
        let key = normalize_name(name);
        ShapeKind::from_key(&key)
            .or_else(|| self.aliases.get(&key).copied())
            .filter(|kind| self.generators.contains_key(kind))
    }

    pub fn get(&self, kind: ShapeKind) -> Option<&dyn CadObject> {
        self.generators.get(&kind).map(|generator| generator.as_ref())
    }

    pub fn try_resolve(&self, name: &str) -> Result<&dyn CadObject, EngineError> {
        self.lookup(name)
            .and_then(|kind| self.get(kind))
            .ok_or_else(|| EngineError::UnknownShape(name.trim().to_string()))
    }

    /// 总能返回生成器：未知名称记录警告后回退到箱体。
    pub fn resolve(&self, name: &str) -> &dyn CadObject {
        match self.try_resolve(name) {
            Ok(generator) => generator,
            Err(err) => {
                warn!(requested = name, error = %err, "未知形状类型，回退为 box");
                self.get(ShapeKind::Box).unwrap_or(&FALLBACK)
            }
        }
    }

    /// 已注册的规范键，以及指向它们的别名（按字母序）。
    pub fn available_shapes(&self) -> BTreeMap<ShapeKind, Vec<&str>> {
        let mut shapes: BTreeMap<ShapeKind, Vec<&str>> = self
            .generators
            .keys()
            .map(|kind| (*kind, Vec::new()))
            .collect();
        for (alias, kind) in &self.aliases {
            if let Some(list) = shapes.get_mut(kind) {
                list.push(alias.as_str());
            }
        }
        for list in shapes.values_mut() {
            list.sort_unstable();
        }
        shapes
    }
}

impl Default for ShapeRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for ShapeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShapeRegistry")
            .field("shapes", &self.generators.len())
            .field("aliases", &self.aliases.len())
            .finish()
    }
}

/// 进程级标准注册表。
#[inline]
pub fn registry() -> &'static ShapeRegistry {
    &STANDARD
}

#[inline]
pub fn resolve(name: &str) -> &'static dyn CadObject {
    STANDARD.resolve(name)
}

/// 名称对应的规范形状，未知名称返回 `None`（不回退）。
#[inline]
pub fn canonical_kind(name: &str) -> Option<ShapeKind> {
    STANDARD.lookup(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive_and_alias_aware() {
        let registry = ShapeRegistry::standard();
        assert_eq!(registry.lookup("Chair"), Some(ShapeKind::Chair));
        assert_eq!(registry.lookup("  KURSI "), Some(ShapeKind::Chair));
        assert_eq!(registry.lookup("bangku"), Some(ShapeKind::Chair));
        assert_eq!(registry.lookup("Ruangan"), Some(ShapeKind::Room));
        assert_eq!(registry.lookup("meja"), Some(ShapeKind::Box));
        assert_eq!(registry.lookup("tiang"), Some(ShapeKind::Cylinder));
        assert_eq!(registry.lookup("L-Shape"), Some(ShapeKind::Box));
        assert_eq!(registry.lookup("spaceship"), None);
    }

    #[test]
    fn unknown_names_fall_back_to_box() {
        let registry = ShapeRegistry::standard();
        assert_eq!(registry.resolve("spaceship").kind(), ShapeKind::Box);
        assert_eq!(registry.resolve("").kind(), ShapeKind::Box);
        match registry.try_resolve("spaceship") {
            Err(EngineError::UnknownShape(name)) => assert_eq!(name, "spaceship"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn empty_registry_still_resolves_to_box() {
        let registry = ShapeRegistry::empty();
        assert_eq!(registry.lookup("chair"), None);
        assert_eq!(registry.resolve("chair").kind(), ShapeKind::Box);
    }

    #[test]
    fn custom_alias_can_be_registered() {
        let mut registry = ShapeRegistry::standard();
        registry.register_alias("Drum Stool", ShapeKind::Cylinder);
        assert_eq!(registry.lookup("drum-stool"), Some(ShapeKind::Cylinder));
    }

    #[test]
    fn available_shapes_lists_aliases() {
        let shapes = registry().available_shapes();
        assert_eq!(shapes.len(), 4);
        assert!(shapes[&ShapeKind::Chair].contains(&"kursi"));
        assert!(shapes[&ShapeKind::Room].contains(&"kamar"));
    }
}
