//! Table storage with whole-snapshot persistence.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::store::error::{StoreError, StoreResult};

/// A row that can live in a `Database` table.
pub trait Record: Clone + Serialize + DeserializeOwned {
    /// Unique identifier within the table.
    fn id(&self) -> &str;

    /// Textual value of a named field, if the record has one.
    fn field(&self, name: &str) -> Option<&str>;
}

/// Substring filter over record fields.
///
/// A record matches when ANY term's field contains the term's substring
/// (case-sensitive). An empty filter matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    terms: Vec<(String, String)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `field contains needle` term.
    pub fn field(mut self, name: impl Into<String>, needle: impl Into<String>) -> Self {
        self.terms.push((name.into(), needle.into()));
        self
    }

    pub fn matches<R: Record>(&self, record: &R) -> bool {
        self.terms.iter().any(|(name, needle)| {
            record
                .field(name)
                .is_some_and(|value| value.contains(needle.as_str()))
        })
    }
}

/// In-memory tables mirrored to a single JSON file.
#[derive(Debug, Clone)]
pub struct Database<R> {
    path: PathBuf,
    tables: BTreeMap<String, Vec<R>>,
}

impl<R: Record> Database<R> {
    /// Open the store backed by `path`.
    ///
    /// A missing or unreadable file yields an empty store. A readable file
    /// that does not decode is rejected so it is never overwritten blindly.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let tables = match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
                path: path.clone(),
                source,
            })?,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(path = ?path, error = %e, "Snapshot unreadable, starting empty");
                }
                BTreeMap::new()
            }
        };

        let db = Self { path, tables };
        tracing::info!(
            path = ?db.path,
            tables = db.tables.len(),
            "Loaded record store"
        );
        Ok(db)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All records of `table` in insertion order, optionally filtered.
    pub fn select(&self, table: &str, filter: Option<&Filter>) -> Vec<R> {
        let Some(rows) = self.tables.get(table) else {
            return Vec::new();
        };

        rows.iter()
            .filter(|row| filter.map_or(true, |f| f.matches(*row)))
            .cloned()
            .collect()
    }

    /// Exact id lookup.
    pub fn find(&self, table: &str, id: &str) -> Option<&R> {
        self.tables.get(table)?.iter().find(|row| row.id() == id)
    }

    /// Number of records in `table`.
    pub fn len(&self, table: &str) -> usize {
        self.tables.get(table).map_or(0, Vec::len)
    }

    /// Append a record and persist.
    pub fn insert(&mut self, table: &str, record: R) -> StoreResult<()> {
        self.mutate(table, |rows| rows.push(record))
    }

    /// Replace the record with `id` in place and persist.
    /// Unknown ids leave the table unchanged.
    pub fn update(&mut self, table: &str, id: &str, record: R) -> StoreResult<()> {
        self.mutate(table, |rows| {
            if let Some(slot) = rows.iter_mut().find(|row| row.id() == id) {
                *slot = record;
            }
        })
    }

    /// Remove the record with `id` and persist.
    /// Unknown ids leave the table unchanged.
    pub fn delete(&mut self, table: &str, id: &str) -> StoreResult<()> {
        self.mutate(table, |rows| {
            if let Some(index) = rows.iter().position(|row| row.id() == id) {
                rows.remove(index);
            }
        })
    }

    /// Apply a change to one table, then write the snapshot.
    /// If the write fails the table is restored, keeping memory and disk in step.
    fn mutate<F>(&mut self, table: &str, apply: F) -> StoreResult<()>
    where
        F: FnOnce(&mut Vec<R>),
    {
        let previous = self.tables.get(table).cloned();
        apply(self.tables.entry(table.to_string()).or_default());

        if let Err(err) = self.persist() {
            match previous {
                Some(rows) => {
                    self.tables.insert(table.to_string(), rows);
                }
                None => {
                    self.tables.remove(table);
                }
            }
            return Err(err);
        }
        Ok(())
    }

    /// Rewrite the whole snapshot file.
    ///
    /// The snapshot goes to a sibling temp file which is synced and then
    /// renamed over the live file, so a failed write leaves the previous
    /// snapshot intact.
    fn persist(&self) -> StoreResult<()> {
        let tmp = self.temp_path();
        if let Err(err) = self.write_snapshot(&tmp) {
            let _ = fs::remove_file(&tmp);
            return Err(err);
        }

        fs::rename(&tmp, &self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        tracing::debug!(path = ?self.path, "Persisted record store");
        Ok(())
    }

    fn write_snapshot(&self, path: &Path) -> StoreResult<()> {
        let io_err = |source: std::io::Error| StoreError::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.tables)?;
        writer.flush().map_err(io_err)?;
        writer.get_ref().sync_all().map_err(io_err)?;
        Ok(())
    }

    /// `<path>.tmp`, in the same directory so the rename stays atomic.
    fn temp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}
