//! Genesis document I/O: load, alloc merge, atomic write-back.
use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};
use tempfile::NamedTempFile;

use crate::account::AccountAlloc;

/// The loaded base document. Top-level fields other than `alloc` pass
/// through untouched; `alloc` is guaranteed present as an object after load.
#[derive(Debug, Clone, PartialEq)]
pub struct GenesisDocument {
    fields: Map<String, Value>,
}

impl GenesisDocument {
    /// Load and validate a genesis document.
    ///
    /// The top level must be a JSON object. A missing `alloc` is normalized
    /// to an empty object; a present non-object `alloc` is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let value: Value = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse {} as JSON", path.display()))?;
        let mut fields = match value {
            Value::Object(map) => map,
            _ => bail!(
                "{}: expected a JSON object at the top level",
                path.display()
            ),
        };
        match fields.get("alloc") {
            None => {
                fields.insert("alloc".to_string(), Value::Object(Map::new()));
            }
            Some(Value::Object(_)) => {}
            Some(_) => bail!("{}: \"alloc\" must be a JSON object", path.display()),
        }
        Ok(Self { fields })
    }

    /// Compact serialized length, the baseline for the size estimate.
    pub fn serialized_len(&self) -> Result<usize> {
        let serialized =
            serde_json::to_string(&self.fields).context("failed to serialize genesis document")?;
        Ok(serialized.len())
    }

    /// Number of entries currently in `alloc`.
    pub fn alloc_len(&self) -> usize {
        self.fields
            .get("alloc")
            .and_then(Value::as_object)
            .map_or(0, Map::len)
    }

    /// Merge generated accounts into `alloc`. Generated entries win on
    /// address collision with pre-existing ones.
    pub fn merge_alloc(&mut self, generated: AccountAlloc) -> Result<()> {
        let alloc = self
            .fields
            .get_mut("alloc")
            .and_then(Value::as_object_mut)
            .context("genesis document has no alloc object")?;
        for (address, record) in generated {
            alloc.insert(
                address,
                serde_json::to_value(record).context("failed to convert generated account")?,
            );
        }
        Ok(())
    }

    /// Write the document as pretty-printed JSON, all-or-nothing.
    ///
    /// Serializes into a temp file in the destination directory, then renames
    /// it over `path`, so a failure mid-write never leaves a partial output.
    /// Returns the on-disk byte size.
    pub fn write_atomic(&self, path: &Path) -> Result<u64> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)
            .with_context(|| format!("failed to create temp file in {}", dir.display()))?;
        serde_json::to_writer_pretty(&mut tmp, &self.fields)
            .with_context(|| format!("failed to serialize genesis document for {}", path.display()))?;
        tmp.flush()
            .with_context(|| format!("failed to flush temp file for {}", path.display()))?;
        let file = tmp
            .persist(path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        let size = file
            .metadata()
            .with_context(|| format!("failed to stat {}", path.display()))?
            .len();
        Ok(size)
    }
}
