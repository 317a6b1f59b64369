use std::io::{self, BufRead as _, Write as _};
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::Subcommand;
use tracing::debug;

use glasstock::config::{BackendKind, GlasstockConfig};
use glasstock::format::OutputFormat;
use glasstock::model::Table;
use glasstock::session::{PasswordGate, Session};
use glasstock::{InventoryError, Reconciler};
use glasstock_sheet::{CachedStore, CsvDirStore, MemoryStore, SheetStore};

mod delete;
mod import;
mod list;
mod set;

/// Env var consulted before prompting for the shared password.
const PASSWORD_ENV: &str = "GLASSTOCK_PASSWORD";

#[derive(Subcommand)]
pub enum InventoryCommands {
    /// Show the inventory as a grid
    ///
    /// Each row starts with a short handle: the first characters of the
    /// record's id. Pass a handle (or any unique id prefix) to `set` and
    /// `delete`. Use `--format json` to see full ids.
    List {
        /// Only show rows where any field contains this text (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,

        /// Output format: text or json
        #[arg(long)]
        format: Option<OutputFormat>,

        /// Shorthand for --format json
        #[arg(long, hide = true, conflicts_with = "format")]
        json: bool,
    },

    /// Append every row of a CSV file to the inventory
    ///
    /// Every row becomes a new record with a new id, even when an identical
    /// row already exists. Headers are matched case-insensitively; the Dutch
    /// names (Locatie, Aantal, Breedte, Hoogte, Omschrijving, Spouw,
    /// Bestelling) are accepted too. Unknown columns are ignored.
    Import {
        /// CSV file with a header row
        file: PathBuf,
    },

    /// Edit fields of one record
    ///
    /// Nothing is written when the edit leaves the record unchanged
    /// (after normalization, e.g. Quantity=4,0 equals 4).
    ///
    /// Example: glasstock set 3fa9c2 Quantity=4 "Location=Rek 2"
    Set {
        /// Id or id prefix of the record
        id: String,

        /// Edits as Field=value
        #[arg(required = true)]
        edits: Vec<String>,
    },

    /// Delete records
    ///
    /// Shows the selected rows and asks for confirmation before deleting.
    Delete {
        /// Ids or id prefixes of the records to delete
        #[arg(required = true)]
        ids: Vec<String>,

        /// Delete without asking
        #[arg(short, long)]
        yes: bool,
    },
}

/// Everything a command needs: the engine, the authenticated session, and
/// the inventory as loaded at startup.
pub struct Context {
    pub reconciler: Reconciler<Box<dyn SheetStore>>,
    pub session: Session,
    pub table: Table,
}

pub fn run(cmd: InventoryCommands, config_path: &Path) -> Result<()> {
    let mut ctx = open(config_path)?;
    match cmd {
        InventoryCommands::List {
            search,
            format,
            json,
        } => {
            let format = OutputFormat::resolve(format, json);
            list::run(&mut ctx, search.as_deref(), format)
        }
        InventoryCommands::Import { file } => import::run(&ctx, &file),
        InventoryCommands::Set { id, edits } => set::run(&ctx, &id, &edits),
        InventoryCommands::Delete { ids, yes } => delete::run(&mut ctx, &ids, yes),
    }
}

/// Load config, build the store, pass the password gate, and load the
/// inventory.
fn open(config_path: &Path) -> Result<Context> {
    let config = GlasstockConfig::load(config_path).map_err(InventoryError::from)?;
    debug!(
        backend = %config.store.backend,
        path = %config.store.path.display(),
        worksheet = %config.store.worksheet,
        "configuration loaded"
    );

    let mut session = Session::new();
    let gate = PasswordGate::new(config.access.password.clone());
    authenticate(&mut session, &gate)?;

    let store: Box<dyn SheetStore> = match config.store.backend {
        BackendKind::CsvDir => Box::new(CachedStore::new(
            CsvDirStore::new(&config.store.path),
            config.store.cache_ttl(),
        )),
        BackendKind::Memory => Box::new(MemoryStore::new()),
    };
    let reconciler = Reconciler::new(store, config.store.worksheet);
    let table = reconciler
        .load_and_persist_ids()
        .context("Failed to store ids assigned to the inventory")?;

    Ok(Context {
        reconciler,
        session,
        table,
    })
}

fn authenticate(session: &mut Session, gate: &PasswordGate) -> Result<()> {
    if gate.is_open() {
        session.login(gate, "");
        return Ok(());
    }
    let attempt = match std::env::var(PASSWORD_ENV) {
        Ok(value) => value,
        Err(_) => prompt_password()?,
    };
    if session.login(gate, &attempt) {
        Ok(())
    } else {
        Err(InventoryError::AccessDenied.into())
    }
}

fn prompt_password() -> Result<String> {
    eprint!("Password: ");
    io::stderr().flush()?;
    let mut input = String::new();
    io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read password")?;
    Ok(input.trim_end_matches(['\r', '\n']).to_owned())
}

/// Ask a yes/no question on stdout. Anything but `y` is a no.
pub fn confirm(question: &str) -> Result<bool> {
    print!("{question} [y/N] ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}
