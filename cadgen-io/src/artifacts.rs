//! 一次生成的全部产物要么全部落盘，要么一个都不留。
//!
//! 内容先在内存中编码完毕，再写入 `<文件>.partial`，全部成功后统一改名。
//! 目标位置上已有的同名文件先挪到 `<文件>.previous`，失败时原样恢复。

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::IoError;

const PARTIAL_SUFFIX: &str = "partial";
const PREVIOUS_SUFFIX: &str = "previous";

#[derive(Debug)]
struct PendingArtifact {
    file_name: String,
    contents: Vec<u8>,
}

#[derive(Debug)]
pub struct ArtifactSet {
    directory: PathBuf,
    stem: String,
    pending: Vec<PendingArtifact>,
}

impl ArtifactSet {
    pub fn new(directory: impl Into<PathBuf>, name: &str) -> Self {
        Self {
            directory: directory.into(),
            stem: artifact_stem(name),
            pending: Vec::new(),
        }
    }

    /// 以 `<stem>.<extension>` 为文件名登记一个产物，同名扩展会被覆盖。
    pub fn add(&mut self, extension: &str, contents: impl Into<Vec<u8>>) -> &mut Self {
        let file_name = format!("{}.{extension}", self.stem);
        let contents = contents.into();
        match self
            .pending
            .iter_mut()
            .find(|artifact| artifact.file_name == file_name)
        {
            Some(existing) => existing.contents = contents,
            None => self.pending.push(PendingArtifact {
                file_name,
                contents,
            }),
        }
        self
    }

    pub fn file_names(&self) -> Vec<String> {
        self.pending
            .iter()
            .map(|artifact| artifact.file_name.clone())
            .collect()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// 写出全部产物并返回最终路径。
    ///
    /// 任何一步失败都会清理本次写出的文件，并把被替换的旧产物还原。
    pub fn commit(self) -> Result<Vec<PathBuf>, IoError> {
        fs::create_dir_all(&self.directory).map_err(|source| IoError::WriteError {
            path: self.directory.clone(),
            source,
        })?;

        let mut progress = Progress::default();
        for artifact in &self.pending {
            let target = self.directory.join(&artifact.file_name);
            let partial = sibling_path(&target, PARTIAL_SUFFIX);
            if let Err(source) = fs::write(&partial, &artifact.contents) {
                // 写入失败的文件可能已部分存在
                remove_quietly(&partial);
                progress.rollback();
                return Err(IoError::WriteError {
                    path: partial,
                    source,
                });
            }
            progress.partials.push((partial, target));
        }

        let partials = std::mem::take(&mut progress.partials);
        for (index, (partial, target)) in partials.iter().enumerate() {
            if let Err(err) = progress.set_aside(target) {
                progress.partials = partials[index..].to_vec();
                progress.rollback();
                return Err(err);
            }
            if let Err(source) = fs::rename(partial, target) {
                progress.partials = partials[index..].to_vec();
                progress.rollback();
                return Err(IoError::WriteError {
                    path: target.clone(),
                    source,
                });
            }
            progress.committed.push(target.clone());
        }

        for (previous, _) in &progress.previous {
            remove_quietly(previous);
        }
        info!(
            directory = %self.directory.display(),
            files = progress.committed.len(),
            replaced = progress.previous.len(),
            "产物已写出"
        );
        Ok(progress.committed)
    }
}

/// 提交过程中的文件状态，用于失败时回滚。
#[derive(Debug, Default)]
struct Progress {
    partials: Vec<(PathBuf, PathBuf)>,
    committed: Vec<PathBuf>,
    /// `(挪开后的路径, 原路径)`
    previous: Vec<(PathBuf, PathBuf)>,
}

impl Progress {
    /// 目标处若已有普通文件，先改名挪开。
    fn set_aside(&mut self, target: &Path) -> Result<(), IoError> {
        let is_file = fs::symlink_metadata(target)
            .map(|meta| meta.is_file())
            .unwrap_or(false);
        if !is_file {
            return Ok(());
        }
        let previous = sibling_path(target, PREVIOUS_SUFFIX);
        fs::rename(target, &previous).map_err(|source| IoError::WriteError {
            path: previous.clone(),
            source,
        })?;
        self.previous.push((previous, target.to_path_buf()));
        Ok(())
    }

    fn rollback(&self) {
        warn!(
            partial = self.partials.len(),
            committed = self.committed.len(),
            restored = self.previous.len(),
            "产物写出失败，正在清理"
        );
        for (partial, _) in &self.partials {
            remove_quietly(partial);
        }
        for path in &self.committed {
            remove_quietly(path);
        }
        for (previous, target) in &self.previous {
            if let Err(err) = fs::rename(previous, target) {
                warn!(path = %target.display(), error = %err, "无法还原旧产物");
            }
        }
    }
}

fn sibling_path(target: &Path, suffix: &str) -> PathBuf {
    let mut name = target.as_os_str().to_os_string();
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

fn remove_quietly(path: &Path) {
    if let Err(err) = fs::remove_file(path) {
        if err.kind() != std::io::ErrorKind::NotFound {
            warn!(path = %path.display(), error = %err, "无法删除临时产物");
        }
    }
}

/// 把任意名称变为安全的文件名主干：只保留字母数字、`-` 与 `_`。
pub fn artifact_stem(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                ch
            } else {
                '_'
            }
        })
        .collect();
    if stem.trim_matches('_').is_empty() {
        "drawing".to_string()
    } else {
        stem
    }
}
