use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use sau_portal_core::models::{
    Audit, CalendarFile, CaseStudy, CollectionKind, Feedback, Holiday, LibraryItem, MgnregsEntry,
    PmaygIssue, TourDiaryEntry,
};
use sau_portal_core::utils::truncate_string;
use sau_portal_core::{Entity, Portal, Record, RecordId, VerifyOutcome};
use tracing::debug;

/// Width of the title column in `list` output
const TITLE_WIDTH: usize = 72;

pub const USAGE: &str = "\
Usage: sau-portal <command> [args]

Commands:
  list <collection> [--json]     Show the records in a collection
  add <collection> <json>        Add a record from its fields (no id)
  update <collection> <json>     Replace the record with the same id
  delete <collection> <id>       Delete a record by id
  keys                           List storage keys
  clear                          Remove every stored collection
  otp <email>                    Issue a code and verify it from stdin
  help                           Show this message

Collections: feedback, holidays, calendars, audits, case-studies, library,
             mgnregs, pmayg, tour-diary";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    List { kind: CollectionKind, json: bool },
    Add { kind: CollectionKind, json: String },
    Update { kind: CollectionKind, json: String },
    Delete { kind: CollectionKind, id: RecordId },
    Keys,
    Clear,
    Otp { email: String },
    Help,
}

impl Command {
    pub fn parse(args: &[String]) -> Result<Self> {
        let kind = |i: usize| -> Result<CollectionKind> {
            arg(args, i, "collection name")?
                .parse::<CollectionKind>()
                .map_err(anyhow::Error::msg)
        };

        let Some(name) = args.first() else {
            return Ok(Command::Help);
        };
        let command = match name.as_str() {
            "list" => Command::List {
                kind: kind(1)?,
                json: args.iter().skip(2).any(|a| a == "--json"),
            },
            "add" => Command::Add {
                kind: kind(1)?,
                json: arg(args, 2, "record JSON")?.to_string(),
            },
            "update" => Command::Update {
                kind: kind(1)?,
                json: arg(args, 2, "record JSON")?.to_string(),
            },
            "delete" => Command::Delete {
                kind: kind(1)?,
                id: arg(args, 2, "record id")?
                    .parse()
                    .context("Record id must be a number")?,
            },
            "keys" => Command::Keys,
            "clear" => Command::Clear,
            "otp" => Command::Otp {
                email: arg(args, 1, "email address")?.to_string(),
            },
            "help" | "--help" | "-h" => Command::Help,
            other => bail!("Unknown command '{}'", other),
        };
        Ok(command)
    }
}

fn arg<'a>(args: &'a [String], i: usize, what: &str) -> Result<&'a str> {
    args.get(i)
        .map(String::as_str)
        .with_context(|| format!("Missing {}", what))
}

pub fn run(portal: &Portal, command: Command) -> Result<()> {
    match command {
        Command::List { kind, json } => dispatch(portal, kind, Action::List { json }),
        Command::Add { kind, json } => dispatch(portal, kind, Action::Add(json)),
        Command::Update { kind, json } => dispatch(portal, kind, Action::Update(json)),
        Command::Delete { kind, id } => dispatch(portal, kind, Action::Delete(id)),
        Command::Keys => {
            for key in portal.context().storage().keys()? {
                println!("{}", key);
            }
            Ok(())
        }
        Command::Clear => {
            if !portal.clear_storage() {
                bail!("Failed to clear storage, see log for details");
            }
            println!("Storage cleared");
            Ok(())
        }
        Command::Otp { email } => run_otp(portal, &email),
        Command::Help => {
            println!("{}", USAGE);
            Ok(())
        }
    }
}

enum Action {
    List { json: bool },
    Add(String),
    Update(String),
    Delete(RecordId),
}

fn dispatch(portal: &Portal, kind: CollectionKind, action: Action) -> Result<()> {
    match kind {
        CollectionKind::Feedback => apply::<Feedback>(portal, action),
        CollectionKind::Holidays => apply::<Holiday>(portal, action),
        CollectionKind::Calendars => apply::<CalendarFile>(portal, action),
        CollectionKind::Audits => apply::<Audit>(portal, action),
        CollectionKind::CaseStudies => apply::<CaseStudy>(portal, action),
        CollectionKind::Library => apply::<LibraryItem>(portal, action),
        CollectionKind::Mgnregs => apply::<MgnregsEntry>(portal, action),
        CollectionKind::Pmayg => apply::<PmaygIssue>(portal, action),
        CollectionKind::TourDiary => apply::<TourDiaryEntry>(portal, action),
    }
}

fn apply<T: Entity>(portal: &Portal, action: Action) -> Result<()> {
    let mut store = portal.open::<T>();
    debug!(key = store.key(), count = store.len(), "Opened collection");

    match action {
        Action::List { json: true } => {
            println!("{}", serde_json::to_string_pretty(store.list())?);
        }
        Action::List { json: false } => {
            for record in store.list() {
                println!(
                    "{:>14}  {}",
                    record.id,
                    truncate_string(&record.title(), TITLE_WIDTH)
                );
            }
            println!("{} record(s)", store.len());
        }
        Action::Add(json) => {
            let fields: T = serde_json::from_str(&json)
                .with_context(|| format!("Invalid {} record", store.key()))?;
            let record = store.add(fields);
            println!("Added {}", record.id);
        }
        Action::Update(json) => {
            let record: Record<T> = serde_json::from_str(&json)
                .with_context(|| format!("Invalid {} record", store.key()))?;
            if store.get(record.id).is_none() {
                bail!("No record with id {} in {}", record.id, store.key());
            }
            let id = record.id;
            store.update(record);
            println!("Updated {}", id);
        }
        Action::Delete(id) => {
            if store.get(id).is_none() {
                println!("No record with id {}, nothing deleted", id);
            } else {
                store.delete(id);
                println!("Deleted {}", id);
            }
        }
    }
    Ok(())
}

fn run_otp(portal: &Portal, email: &str) -> Result<()> {
    let otp = portal.otp();
    let issued = otp.send(email)?;
    // Email delivery is not wired up here, so show the code directly
    println!(
        "Code for {}: {} (valid until {})",
        issued.email,
        issued.code,
        issued.expires_at.format("%H:%M:%S UTC")
    );

    let stdin = io::stdin();
    loop {
        print!("Enter code: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            bail!("No code entered");
        }

        let outcome = otp.verify(&issued.email, line.trim());
        println!("{}", outcome);
        match outcome {
            VerifyOutcome::Mismatch => continue,
            VerifyOutcome::Verified => return Ok(()),
            VerifyOutcome::Expired | VerifyOutcome::NotFound => bail!("Verification failed"),
        }
    }
}
