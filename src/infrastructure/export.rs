// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::kitespot::Kitespot;
use anyhow::Context;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

/// 将记录以缩进JSON数组的形式写入文件。
pub fn write_json(spots: &[Kitespot], path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, spots)
        .with_context(|| format!("Failed to write JSON to {}", path.display()))?;
    info!("Wrote {} spots to {}", spots.len(), path.display());
    Ok(())
}

/// 将记录以带表头的CSV形式写入文件。空字段输出为空串。
pub fn write_csv(spots: &[Kitespot], path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = csv::Writer::from_writer(BufWriter::new(file));
    for spot in spots {
        writer
            .serialize(spot)
            .with_context(|| format!("Failed to write CSV row for {}", spot.name))?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to flush CSV to {}", path.display()))?;
    info!("Wrote {} spots to {}", spots.len(), path.display());
    Ok(())
}

#[cfg(test)]
#[path = "export_test.rs"]
mod tests;
