use anyhow::Result;

use glasstock::grid::{self, CellEdit};
use glasstock::reconcile::SaveOutcome;
use glasstock::search;

use super::Context;

pub fn run(ctx: &Context, prefix: &str, edits: &[String]) -> Result<()> {
    ctx.session.require_auth()?;

    let edits = edits
        .iter()
        .map(|input| grid::parse_edit(input))
        .collect::<Result<Vec<CellEdit>, _>>()?;
    let target = search::find_by_prefix(&ctx.table, prefix)?;
    let handle = grid::short_id(target).to_owned();

    let mut edited = ctx.table.clone();
    if let Some(record) = edited.get_mut(&target.id) {
        for edit in &edits {
            edit.apply(record);
        }
    }

    match ctx.reconciler.reconcile_edit(&ctx.table, &edited)? {
        SaveOutcome::Unchanged => println!("No changes to record {handle}."),
        SaveOutcome::Saved(diff) => println!("Saved record {handle} ({diff})."),
    }
    Ok(())
}
