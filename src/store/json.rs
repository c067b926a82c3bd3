//! # JSON 文件存储
//!
//! 将整个存储序列化为单个 JSON 文件。打开时整体读入，
//! 落盘时先写临时文件再重命名，保证文件内容始终完整。
//!
//! ## 依赖关系
//! - 被 `commands/mod.rs` 使用
//! - 使用 `store/memory.rs` 保存内容

use super::memory::{MemoryStore, StoreData};
use super::{QueryFilter, RecordStore};
use crate::error::{GdtError, Result};
use crate::models::{DataKind, Group, Record, StoredRecord};

use std::fs;
use std::path::{Path, PathBuf};

/// 基于 JSON 文件的存储句柄
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    inner: MemoryStore,
    dirty: bool,
}

impl JsonStore {
    /// 打开存储文件，文件不存在时视为空存储
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let data = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| GdtError::FileReadError {
                path: path.display().to_string(),
                source: e,
            })?;
            let data: StoreData = serde_json::from_str(&content)?;
            log::debug!(
                "opened store {} ({} records, {} groups)",
                path.display(),
                data.records.len(),
                data.groups.len()
            );
            data
        } else {
            log::debug!("store {} does not exist yet, starting empty", path.display());
            StoreData::default()
        };

        Ok(JsonStore {
            path,
            inner: MemoryStore::from_data(data),
            dirty: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 落盘并释放句柄
    pub fn close(mut self) -> Result<()> {
        self.flush()
    }

    fn write_atomic(&self) -> Result<()> {
        let write_err = |path: &Path, e: std::io::Error| GdtError::FileWriteError {
            path: path.display().to_string(),
            source: e,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| write_err(parent, e))?;
            }
        }

        let content = serde_json::to_string_pretty(self.inner.data())?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, content).map_err(|e| write_err(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| write_err(&self.path, e))?;

        log::debug!("flushed store to {}", self.path.display());
        Ok(())
    }

    fn mark<T>(&mut self, result: Result<T>) -> Result<T> {
        if result.is_ok() {
            self.dirty = true;
        }
        result
    }
}

impl RecordStore for JsonStore {
    fn query(&self, kind: DataKind, filter: &QueryFilter) -> Result<Vec<StoredRecord>> {
        self.inner.query(kind, filter)
    }

    fn create(&mut self, record: Record) -> Result<StoredRecord> {
        let result = self.inner.create(record);
        self.mark(result)
    }

    fn get(&self, pk: u64) -> Result<StoredRecord> {
        self.inner.get(pk)
    }

    fn create_group(&mut self, group: Group) -> Result<()> {
        let result = self.inner.create_group(group);
        self.mark(result)
    }

    fn group(&self, name: &str) -> Result<Group> {
        self.inner.group(name)
    }

    fn groups(&self) -> Result<Vec<Group>> {
        self.inner.groups()
    }

    fn add_to_group(&mut self, name: &str, pk: u64) -> Result<bool> {
        let result = self.inner.add_to_group(name, pk);
        self.mark(result)
    }

    fn remove_from_group(&mut self, name: &str, pk: u64) -> Result<bool> {
        let result = self.inner.remove_from_group(name, pk);
        self.mark(result)
    }

    fn flush(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        self.write_atomic()?;
        self.dirty = false;
        Ok(())
    }
}
