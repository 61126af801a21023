//! JSON file operations with schema validation
//!
//! Records are read with serde validation and written atomically.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{KoiflowError, Result};
use crate::schemas::{Config, Member, Order};

use super::paths::{ensure_safe_id, get_config_path, get_member_path, get_order_path};

/// Read and deserialize a JSON file.
///
/// # Errors
/// * `NotFound` - If the file does not exist
/// * `InvalidJson` - If the file is not valid JSON for `T`
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            KoiflowError::NotFound(format!("File not found: {}", path.display()))
        } else {
            KoiflowError::Io(e)
        }
    })?;

    serde_json::from_str(&content).map_err(|e| {
        KoiflowError::InvalidJson(format!("Invalid JSON in file {}: {}", path.display(), e))
    })
}

/// Read a JSON file, mapping a missing file to `None`.
pub fn read_json_opt<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match read_json(path) {
        Ok(value) => Ok(Some(value)),
        Err(KoiflowError::NotFound(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Write a value to a JSON file with pretty formatting.
///
/// Uses atomic write (write to temp file, then rename) to avoid partial writes.
pub fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let content =
        serde_json::to_string_pretty(data).map_err(|e| KoiflowError::InvalidJson(e.to_string()))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("json.tmp");
    let mut file = fs::File::create(&temp_path)?;
    file.write_all(content.as_bytes())?;
    file.write_all(b"\n")?;
    file.sync_all()?;
    drop(file);

    fs::rename(&temp_path, path)?;

    Ok(())
}

/// Read config.json from the data directory, or defaults if absent.
pub fn read_config(root: &Path) -> Result<Config> {
    Ok(read_json_opt(&get_config_path(root))?.unwrap_or_default())
}

pub fn read_order(root: &Path, id: &str) -> Result<Option<Order>> {
    ensure_safe_id(id)?;
    read_json_opt(&get_order_path(root, id))
}

pub fn write_order(root: &Path, order: &Order) -> Result<()> {
    ensure_safe_id(&order.id)?;
    write_json(&get_order_path(root, &order.id), order)
}

pub fn read_member(root: &Path, id: &str) -> Result<Option<Member>> {
    ensure_safe_id(id)?;
    read_json_opt(&get_member_path(root, id))
}

pub fn write_member(root: &Path, member: &Member) -> Result<()> {
    ensure_safe_id(&member.id)?;
    write_json(&get_member_path(root, &member.id), member)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::{PaymentTerms, SellingStatus};
    use tempfile::TempDir;

    #[test]
    fn test_read_json_file_not_found() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nonexistent.json");

        let result: Result<Order> = read_json(&path);
        assert!(matches!(result.unwrap_err(), KoiflowError::NotFound(_)));
    }

    #[test]
    fn test_read_json_invalid_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("invalid.json");
        fs::write(&path, "not valid json {").unwrap();

        let result: Result<Order> = read_json(&path);
        assert!(matches!(result.unwrap_err(), KoiflowError::InvalidJson(_)));
    }

    #[test]
    fn test_write_json_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("dir").join("sale.json");

        write_json(&path, &Order::new("sale-001", "member-001", PaymentTerms::Card)).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_read_config_default_when_missing() {
        let temp = TempDir::new().unwrap();
        let config = read_config(temp.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_read_write_order() {
        let temp = TempDir::new().unwrap();
        let order = Order::new("sale-001", "member-001", PaymentTerms::Transfer).with_status(SellingStatus::Order);

        write_order(temp.path(), &order).unwrap();
        let read = read_order(temp.path(), "sale-001").unwrap().unwrap();
        assert_eq!(read, order);
        assert!(read_order(temp.path(), "sale-404").unwrap().is_none());
    }

    #[test]
    fn test_read_write_member() {
        let temp = TempDir::new().unwrap();
        let member = Member::new("member-001", "Somchai");

        write_member(temp.path(), &member).unwrap();
        assert_eq!(read_member(temp.path(), "member-001").unwrap(), Some(member));
    }

    #[test]
    fn test_rejects_path_escaping_ids() {
        let temp = TempDir::new().unwrap();
        assert!(read_order(temp.path(), "../config").is_err());
    }
}
