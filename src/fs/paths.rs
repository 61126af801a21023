//! Path resolution for the koiflow data directory
//!
//! Layout:
//!
//! ```text
//! <data-dir>/
//!   config.json
//!   orders/<order-id>.json
//!   members/<member-id>.json
//!   slips/<order-id>/<payment|shipping>.<ext>
//! ```

use std::path::{Path, PathBuf};

use crate::errors::{KoiflowError, Result};
use crate::schemas::SlipKind;

/// Resolve the data directory, optionally using an override.
pub fn resolve_data_dir(data_dir_option: Option<&Path>) -> PathBuf {
    match data_dir_option {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

/// Reject ids that would escape their directory.
pub fn ensure_safe_id(id: &str) -> Result<()> {
    let unsafe_id = id.is_empty()
        || id == "."
        || id == ".."
        || id.contains(['/', '\\'])
        || id.chars().any(char::is_control);
    if unsafe_id {
        return Err(KoiflowError::wrap(
            format!("{:?} is not a valid record id", id),
            "Invalid id",
        ));
    }
    Ok(())
}

pub fn get_config_path(root: &Path) -> PathBuf {
    root.join("config.json")
}

pub fn get_orders_dir(root: &Path) -> PathBuf {
    root.join("orders")
}

pub fn get_order_path(root: &Path, id: &str) -> PathBuf {
    get_orders_dir(root).join(format!("{}.json", id))
}

pub fn get_members_dir(root: &Path) -> PathBuf {
    root.join("members")
}

pub fn get_member_path(root: &Path, id: &str) -> PathBuf {
    get_members_dir(root).join(format!("{}.json", id))
}

/// Directory holding the uploaded slips of one order
pub fn get_slip_dir(root: &Path, order_id: &str) -> PathBuf {
    root.join("slips").join(order_id)
}

/// Candidate slip file for one extension
pub fn get_slip_path(root: &Path, order_id: &str, kind: SlipKind, extension: &str) -> PathBuf {
    get_slip_dir(root, order_id).join(format!("{}.{}", kind, extension))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_paths() {
        let root = PathBuf::from("/data");
        assert_eq!(get_config_path(&root), PathBuf::from("/data/config.json"));
        assert_eq!(get_order_path(&root, "sale-001"), PathBuf::from("/data/orders/sale-001.json"));
        assert_eq!(get_member_path(&root, "member-001"), PathBuf::from("/data/members/member-001.json"));
    }

    #[test]
    fn test_slip_paths() {
        let root = PathBuf::from("/data");
        assert_eq!(get_slip_dir(&root, "sale-001"), PathBuf::from("/data/slips/sale-001"));
        assert_eq!(
            get_slip_path(&root, "sale-001", SlipKind::Shipping, "png"),
            PathBuf::from("/data/slips/sale-001/shipping.png")
        );
    }

    #[test]
    fn test_ensure_safe_id() {
        assert!(ensure_safe_id("sale-001").is_ok());
        assert!(ensure_safe_id("").is_err());
        assert!(ensure_safe_id("..").is_err());
        assert!(ensure_safe_id("../etc/passwd").is_err());
        assert!(ensure_safe_id("a\\b").is_err());
    }

    #[test]
    fn test_resolve_data_dir_with_override() {
        let path = PathBuf::from("/custom/data");
        assert_eq!(resolve_data_dir(Some(&path)), path);
    }

    #[test]
    fn test_resolve_data_dir_without_override() {
        assert!(!resolve_data_dir(None).as_os_str().is_empty());
    }
}
