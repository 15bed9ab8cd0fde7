//! Conventions shared by every generated entity

/// Width of the string primary key column
pub const ID_WIDTH: u32 = 32;

/// `status` of an enabled record, the column default
pub const STATUS_ENABLED: i32 = 1;

/// `status` of a disabled record
pub const STATUS_DISABLED: i32 = 0;

/// Columns every entity carries in addition to its business fields
pub const SYSTEM_FIELDS: [&str; 4] = ["id", "status", "created_at", "updated_at"];

/// Whether `name` is one of [`SYSTEM_FIELDS`]
#[must_use]
pub fn is_system_field(name: &str) -> bool {
    SYSTEM_FIELDS.contains(&name)
}
