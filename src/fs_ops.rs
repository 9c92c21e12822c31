//! fsOps - whole-file JSON persistence shared by the learning store and task list
//! - write_json_file: 4-space pretty JSON, parent directory created on demand
//! - read_optional: file contents, or None when the file does not exist

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Serialize `value` as pretty JSON with four-space indentation
pub fn to_json_pretty<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut ser)
        .context("Failed to serialize JSON")?;
    Ok(buf)
}

/// Write `value` to `path`, replacing any existing content
pub fn write_json_file<T: Serialize + ?Sized>(path: impl AsRef<Path>, value: &T) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .context(format!("Failed to create parent directory: {:?}", parent))?;
        }
    }

    let json = to_json_pretty(value)?;
    fs::write(path, json).context(format!("Failed to write file: {:?}", path))?;

    Ok(())
}

/// Read a file, mapping "not found" to `None`
pub fn read_optional(path: impl AsRef<Path>) -> Result<Option<Vec<u8>>> {
    let path = path.as_ref();
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).context(format!("Failed to read file: {:?}", path)),
    }
}
