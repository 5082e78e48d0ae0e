use std::path::Path;

use anyhow::{Context, Result};

use crate::models::listing::Listing;

/// Indented JSON array mirroring the CSV field set, absent fields as nulls.
pub fn to_pretty_json(listings: &[Listing]) -> Result<String> {
    let json = serde_json::to_string_pretty(listings)?;
    Ok(json)
}

pub fn write_json_file(path: &Path, listings: &[Listing]) -> Result<()> {
    let json = to_pretty_json(listings)?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
