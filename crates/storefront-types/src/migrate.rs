use crate::errors::LoadError;

/// Apply document migrations from `from_version` to `to_version`.
///
/// Migrations run on the raw JSON so old field layouts never need a Rust type.
/// Version 1 is the only version so far.
pub fn migrate(
    building: serde_json::Value,
    from_version: u32,
    to_version: u32,
) -> Result<serde_json::Value, LoadError> {
    if from_version != to_version {
        return Err(LoadError::MigrationFailed {
            from: from_version,
            to: to_version,
            reason: format!(
                "no migration path from v{} to v{}",
                from_version, to_version
            ),
        });
    }
    Ok(building)
}
