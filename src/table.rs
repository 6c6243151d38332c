use std::path::Path;

use anyhow::{Context, Result};

use crate::record::OutputTable;

/// Write header and rows to `path`, replacing any existing file.
pub fn write_table(path: &Path, table: &OutputTable) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    writer.write_record(table.header_row())?;
    for row in table.rows() {
        writer.write_record(&row)?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
