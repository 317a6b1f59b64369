use std::collections::BTreeSet;

use anyhow::Result;

use glasstock::model::{Record, RecordId};
use glasstock::session::RequestOutcome;
use glasstock::{grid, search};

use super::{Context, confirm};

pub fn run(ctx: &mut Context, prefixes: &[String], yes: bool) -> Result<()> {
    ctx.session.require_auth()?;

    let mut selected: Vec<&Record> = Vec::new();
    for prefix in prefixes {
        let record = search::find_by_prefix(&ctx.table, prefix)?;
        if !selected.iter().any(|r| r.id == record.id) {
            selected.push(record);
        }
    }
    let selection: BTreeSet<RecordId> = selected.iter().map(|r| r.id.clone()).collect();

    if ctx.session.request_delete(selection) == RequestOutcome::NothingSelected {
        println!("Nothing selected.");
        return Ok(());
    }

    if !yes {
        println!("Will delete {} records:", selected.len());
        print!("{}", grid::render(&selected));
        println!();
        if !confirm("Continue?")? {
            ctx.session.cancel_delete();
            println!("Aborted. Nothing deleted.");
            return Ok(());
        }
    }

    if let Some(table) = ctx.session.confirm_delete(&ctx.reconciler)? {
        println!(
            "Deleted {} records. {} remain.",
            ctx.table.len().saturating_sub(table.len()),
            table.len()
        );
        ctx.table = table;
    }
    Ok(())
}
