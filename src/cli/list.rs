use anyhow::Result;
use serde::Serialize;

use glasstock::format::OutputFormat;
use glasstock::model::Record;
use glasstock::{grid, search};

use super::Context;

/// Envelope for `glasstock list --format json` output.
#[derive(Serialize)]
struct ListEnvelope<'a> {
    worksheet: &'a str,
    total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<&'a str>,
    records: Vec<&'a Record>,
}

pub fn run(ctx: &mut Context, query: Option<&str>, format: OutputFormat) -> Result<()> {
    ctx.session.require_auth()?;
    ctx.session.search = query.unwrap_or_default().to_owned();

    let rows = search::filter(&ctx.table, &ctx.session.search);
    match format {
        OutputFormat::Text => {
            print!("{}", grid::render(&rows));
            if rows.len() == ctx.table.len() {
                println!("{} records", rows.len());
            } else {
                println!("{} of {} records match", rows.len(), ctx.table.len());
            }
        }
        OutputFormat::Json => {
            let envelope = ListEnvelope {
                worksheet: ctx.reconciler.worksheet(),
                total: ctx.table.len(),
                search: query.filter(|q| !q.trim().is_empty()),
                records: rows,
            };
            println!("{}", format.serialize(&envelope)?);
        }
    }
    Ok(())
}
