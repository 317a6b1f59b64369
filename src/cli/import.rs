use std::fs::File;
use std::path::Path;

use anyhow::{Context as _, Result};

use glasstock::InventoryError;
use glasstock_sheet::csv_dir::parse_csv;

use super::Context;

pub fn run(ctx: &Context, file: &Path) -> Result<()> {
    ctx.session.require_auth()?;

    let input = File::open(file)
        .map_err(InventoryError::from)
        .with_context(|| format!("Failed to open import file {}", file.display()))?;
    let Some(sheet) = parse_csv(input, file)
        .with_context(|| format!("Failed to read import file {}", file.display()))?
    else {
        println!("{} is empty. Nothing imported.", file.display());
        return Ok(());
    };

    let (_, report) = ctx.reconciler.import(&sheet)?;
    println!(
        "Imported {} rows from {}. The inventory now holds {} records.",
        report.imported,
        file.display(),
        report.total
    );
    Ok(())
}
