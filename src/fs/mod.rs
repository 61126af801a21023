//! File system utilities for koiflow
//!
//! Provides the data directory layout, JSON record files, the JSON-backed
//! repositories and the slip probe.

mod json;
mod paths;
mod probe;
mod store;

pub use json::{
    read_config, read_json, read_json_opt, read_member, read_order, write_json, write_member,
    write_order,
};
pub use paths::{
    ensure_safe_id, get_config_path, get_member_path, get_members_dir, get_order_path,
    get_orders_dir, get_slip_dir, get_slip_path, resolve_data_dir,
};
pub use probe::FsSlipProbe;
pub use store::JsonStore;
