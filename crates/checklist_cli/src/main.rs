//! Line-driven checklist host.
//!
//! # Responsibility
//! - Stand in for the form surface: read one command per line from stdin,
//!   turn it into a `UiEvent`, and print the visible list afterwards.
//! - Wire storage, slot and logging flags into `checklist_core`.

use checklist_core::db::{open_db, open_db_in_memory};
use checklist_core::{
    default_log_level, init_logging, ItemAction, ItemStore, ListController, NoChange, Outcome,
    SlotStorage, SqliteSlotStorage, StoreConfig, UiEvent, DEFAULT_SLOT_KEY,
};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "checklist")]
#[command(about = "Keep a short checklist in local storage", long_about = None)]
#[command(version)]
struct Cli {
    /// SQLite file holding the storage slots. In-memory when omitted.
    #[arg(long)]
    db: Option<PathBuf>,

    #[arg(long, default_value = DEFAULT_SLOT_KEY)]
    slot: String,

    /// Absolute directory for rolling log files. Logging is off when omitted.
    #[arg(long)]
    log_dir: Option<String>,

    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Event(UiEvent),
    List,
    Help,
    Quit,
}

const HELP: &str = "\
commands:
  add <text>        create an item
  done <id>         toggle done
  edit <id>         open the edit form
  save <text>       submit the edit form
  cancel            close the edit form
  rm <id>           delete an item
  search [text]     show items whose title contains text
  clear             clear the search
  filter <mode>     all | done | todo
  list              print visible items
  quit";

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir)?;
    }

    let conn = match cli.db.as_ref() {
        Some(path) => open_db(path),
        None => open_db_in_memory(),
    }
    .map_err(|err| err.to_string())?;

    let config = StoreConfig::with_slot_key(cli.slot);
    let store = ItemStore::with_config(SqliteSlotStorage::new(&conn), &config);
    let mut controller = ListController::open(store);

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    print_list(&mut stdout, &controller).map_err(|err| err.to_string())?;

    for line in stdin.lock().lines() {
        let line = line.map_err(|err| err.to_string())?;
        let written = match parse_command(&line) {
            Ok(None) => continue,
            Ok(Some(Command::Quit)) => break,
            Ok(Some(Command::Help)) => writeln!(stdout, "{HELP}"),
            Ok(Some(Command::List)) => print_list(&mut stdout, &controller),
            Ok(Some(Command::Event(event))) => {
                let outcome = controller.handle(event);
                report(&mut stdout, outcome)
                    .and_then(|()| print_list(&mut stdout, &controller))
            }
            Err(message) => writeln!(stdout, "{message}"),
        };
        written.map_err(|err| err.to_string())?;
    }

    Ok(())
}

fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim_start();
    if line.trim().is_empty() {
        return Ok(None);
    }
    let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));
    let verb = verb.trim();

    let item = |action: ItemAction| {
        let id = rest.trim();
        if id.is_empty() {
            Err(format!("`{verb}` needs an item id"))
        } else {
            Ok(Command::Event(UiEvent::Item(action, id.into())))
        }
    };

    let command = match verb {
        "add" => Command::Event(UiEvent::SubmitCreate(rest.to_string())),
        "done" => item(ItemAction::ToggleDone)?,
        "edit" => item(ItemAction::Edit)?,
        "rm" => item(ItemAction::Delete)?,
        "save" => Command::Event(UiEvent::SubmitEdit(rest.to_string())),
        "cancel" => Command::Event(UiEvent::CancelEdit),
        "search" => Command::Event(UiEvent::SearchInput(rest.to_string())),
        "clear" => Command::Event(UiEvent::ClearSearch),
        "filter" => Command::Event(UiEvent::FilterSelected(rest.trim().to_string())),
        "list" => Command::List,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command `{other}`; try `help`")),
    };
    Ok(Some(command))
}

fn report(out: &mut impl Write, outcome: Outcome) -> io::Result<()> {
    let note = match outcome {
        Outcome::Applied => return Ok(()),
        Outcome::Unchanged(NoChange::BlankText) => "nothing to save: text is blank",
        Outcome::Unchanged(NoChange::UnknownItem) => "no item with that id",
        Outcome::Unchanged(NoChange::NotEditing) => "not editing",
        Outcome::Unchanged(NoChange::UnknownFilter) => "filter must be all, done or todo",
        Outcome::Unchanged(NoChange::StorageUnavailable) => "storage unavailable; nothing changed",
    };
    writeln!(out, "({note})")
}

fn print_list<S: SlotStorage>(
    out: &mut impl Write,
    controller: &ListController<S>,
) -> io::Result<()> {
    let session = controller.session();
    if let Some(id) = session.pending() {
        return writeln!(out, "editing {id}: {}", session.edit_field());
    }

    let mut shown = 0;
    for node in controller.visible() {
        let marker = if node.done { 'x' } else { ' ' };
        writeln!(out, "[{marker}] {}  {}", node.id, node.title)?;
        shown += 1;
    }
    writeln!(
        out,
        "-- {shown} of {} shown (filter: {}, search: {:?})",
        controller.view().len(),
        controller.visibility().filter(),
        controller.visibility().search_text()
    )
}

#[cfg(test)]
mod tests {
    use super::{parse_command, print_list, Command};
    use checklist_core::{ItemAction, ItemStore, ListController, MemorySlotStorage, UiEvent};

    #[test]
    fn parses_item_commands() {
        assert_eq!(
            parse_command("done 17").unwrap(),
            Some(Command::Event(UiEvent::Item(ItemAction::ToggleDone, "17".into())))
        );
        assert!(parse_command("rm").unwrap_err().contains("needs an item id"));
    }

    #[test]
    fn keeps_raw_text_for_forms() {
        assert_eq!(
            parse_command("add   Buy milk ").unwrap(),
            Some(Command::Event(UiEvent::SubmitCreate("  Buy milk ".to_string())))
        );
        assert_eq!(
            parse_command("search").unwrap(),
            Some(Command::Event(UiEvent::SearchInput(String::new())))
        );
        assert_eq!(parse_command("   ").unwrap(), None);
        assert!(parse_command("frobnicate").is_err());
    }

    #[test]
    fn prints_visible_items_with_markers() {
        let mut controller = ListController::open(ItemStore::new(MemorySlotStorage::new()));
        controller.create("Buy milk").unwrap();
        let id = controller.view().nodes()[0].id.clone();
        controller.toggle_done(&id).unwrap();

        let mut out = Vec::new();
        print_list(&mut out, &controller).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(&format!("[x] {id}  Buy milk")));
        assert!(text.contains("1 of 1 shown"));
    }
}
