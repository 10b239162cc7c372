use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wardbed_core::config::{load_ward_table, seed_from_env_value};
use wardbed_core::constants::{SEED_ENV, WARDS_FILE_ENV};
use wardbed_core::{
    AvailabilityFlag, BedSelectionController, ClickOutcome, CoreConfig, RandomWardProvider,
    WardDataProvider, WardTable,
};

#[derive(Parser)]
#[command(name = "wardbed")]
#[command(about = "Ward bed selection for inpatient transfers")]
struct Cli {
    /// YAML ward table (defaults to $WARDBED_WARDS_FILE, then the built-in demo wards)
    #[arg(long, global = true)]
    wards: Option<PathBuf>,
    /// Seed for reproducible occupancy (defaults to $WARDBED_SEED)
    #[arg(long, global = true)]
    seed: Option<u64>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List configured wards
    Wards,
    /// Show the bed grid of one ward
    Show {
        /// Ward name as shown in the ward list
        ward: String,
        /// Print the view as JSON
        #[arg(long)]
        json: bool,
    },
    /// Drive the bed selector interactively from stdin
    Session {
        /// Print views and form fields as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Resolve configuration once at startup: flags first, then environment, then defaults.
fn resolve_config(cli: &Cli) -> anyhow::Result<CoreConfig> {
    let wards_file = cli
        .wards
        .clone()
        .or_else(|| std::env::var(WARDS_FILE_ENV).ok().map(PathBuf::from));

    let ward_table = match wards_file {
        Some(path) => load_ward_table(&path)
            .with_context(|| format!("loading ward table from {}", path.display()))?,
        None => WardTable::default_table(),
    };

    let seed = match cli.seed {
        Some(seed) => Some(seed),
        None => seed_from_env_value(std::env::var(SEED_ENV).ok())?,
    };

    Ok(CoreConfig::new(ward_table, seed)?)
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("wardbed=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let cfg = resolve_config(&cli)?;
    tracing::debug!(
        wards = cfg.ward_table().len(),
        seeded = cfg.seed().is_some(),
        "configuration resolved"
    );

    match cli.command {
        Some(Commands::Wards) => {
            for ward in cfg.ward_table().iter() {
                println!(
                    "{} ({}): {} beds, {} occupied",
                    ward.name(),
                    ward.prefix(),
                    ward.total_beds(),
                    ward.occupied_beds()
                );
            }
        }
        Some(Commands::Show { ward, json }) => {
            let provider = RandomWardProvider::from_seed(cfg.ward_table().clone(), cfg.seed());
            let controller = open_ward(provider, &ward);
            print_view(&controller, json)?;
        }
        Some(Commands::Session { json }) => {
            let provider = RandomWardProvider::from_seed(cfg.ward_table().clone(), cfg.seed());
            run_session(BedSelectionController::new(provider), json)?;
        }
        None => {
            println!("Use 'wardbed --help' for commands");
        }
    }

    Ok(())
}

/// Display `ward` in a fresh controller. An unknown ward is not fatal: the controller is left
/// in its "not configured" state so the caller can show that view.
fn open_ward<P: WardDataProvider>(provider: P, ward: &str) -> BedSelectionController<P> {
    let mut controller = BedSelectionController::new(provider);
    if let Err(e) = controller.on_ward_changed(ward) {
        tracing::warn!(ward, error = %e, "showing ward as not configured");
    }
    controller
}

/// One line of session input.
#[derive(Debug, PartialEq, Eq)]
enum SessionCommand {
    Ward(String),
    Click(String),
    Available(AvailabilityFlag),
    Show,
    Form,
    Help,
    Quit,
}

fn parse_session_command(line: &str) -> anyhow::Result<Option<SessionCommand>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map(|(v, r)| (v, r.trim()))
        .unwrap_or((line, ""));

    let command = match verb.to_ascii_lowercase().as_str() {
        "ward" => SessionCommand::Ward(rest.to_string()),
        "click" if !rest.is_empty() => SessionCommand::Click(rest.to_string()),
        "click" => anyhow::bail!("usage: click <bed-id>"),
        "available" => SessionCommand::Available(rest.parse()?),
        "show" => SessionCommand::Show,
        "form" => SessionCommand::Form,
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" => SessionCommand::Quit,
        other => anyhow::bail!("unknown command '{other}' (try 'help')"),
    };
    Ok(Some(command))
}

const SESSION_HELP: &str = "\
commands:
  ward <name>         display a ward (blank name clears)
  click <bed-id>      select an available bed
  available yes|no    set the bed availability answer
  show                print the bed grid
  form                print the form fields
  quit                leave the session";

fn run_session<P: WardDataProvider>(
    mut controller: BedSelectionController<P>,
    json: bool,
) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    writeln!(stdout, "{SESSION_HELP}")?;

    for line in stdin.lock().lines() {
        let line = line?;
        let command = match parse_session_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(stdout, "error: {e}")?;
                continue;
            }
        };

        match command {
            SessionCommand::Ward(ward) => {
                if let Err(e) = controller.on_ward_changed(&ward) {
                    tracing::warn!(ward = %ward, error = %e, "ward not displayed");
                }
                print_view(&controller, json)?;
            }
            SessionCommand::Click(bed) => match controller.on_bed_clicked_str(&bed) {
                Ok(ClickOutcome::Selected(_)) => print_view(&controller, json)?,
                Ok(ClickOutcome::Ignored(reason)) => writeln!(stdout, "ignored: {reason}")?,
                Err(e) => writeln!(stdout, "error: {e}")?,
            },
            SessionCommand::Available(flag) => {
                controller.on_availability_flag_changed(flag);
                print_form(&controller, json)?;
            }
            SessionCommand::Show => print_view(&controller, json)?,
            SessionCommand::Form => print_form(&controller, json)?,
            SessionCommand::Help => writeln!(stdout, "{SESSION_HELP}")?,
            SessionCommand::Quit => break,
        }
    }

    Ok(())
}

fn print_view<P: WardDataProvider>(
    controller: &BedSelectionController<P>,
    json: bool,
) -> anyhow::Result<()> {
    let view = controller.render();
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        println!("{view}");
    }
    Ok(())
}

fn print_form<P: WardDataProvider>(
    controller: &BedSelectionController<P>,
    json: bool,
) -> anyhow::Result<()> {
    let fields = controller.form_fields();
    if json {
        println!("{}", serde_json::to_string_pretty(&fields)?);
    } else {
        println!("Destination ward: {}", fields.destination_ward);
        println!("Bed number: {}", fields.bed_number);
        println!(
            "Bed available: {}",
            fields
                .is_bed_available
                .map(|f| f.to_string())
                .unwrap_or_else(|| "-".into())
        );
        println!(
            "Waiting list: {}",
            if fields.waiting_list_visible {
                "shown"
            } else {
                "hidden"
            }
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wardbed_core::{WidgetPhase, WidgetView};

    #[test]
    fn test_parses_session_commands() {
        assert_eq!(
            parse_session_command("ward General Medicine").unwrap(),
            Some(SessionCommand::Ward("General Medicine".into()))
        );
        assert_eq!(
            parse_session_command("  click GM-03 ").unwrap(),
            Some(SessionCommand::Click("GM-03".into()))
        );
        assert_eq!(
            parse_session_command("available no").unwrap(),
            Some(SessionCommand::Available(AvailabilityFlag::No))
        );
        assert_eq!(
            parse_session_command("ward").unwrap(),
            Some(SessionCommand::Ward(String::new()))
        );
        assert_eq!(parse_session_command("").unwrap(), None);
    }

    #[test]
    fn test_unknown_ward_shows_not_configured_view() {
        let provider = RandomWardProvider::seeded(WardTable::default_table(), 1);
        let controller = open_ward(provider, "Maternity");

        assert_eq!(controller.phase(), WidgetPhase::WardNotConfigured);
        assert_eq!(
            controller.render(),
            WidgetView::WardNotConfigured {
                ward: "Maternity".into()
            }
        );
        assert_eq!(
            controller.render().to_string(),
            "Ward 'Maternity' is not configured; no beds to show."
        );
    }

    #[test]
    fn test_known_ward_shows_grid() {
        let provider = RandomWardProvider::seeded(WardTable::default_table(), 1);
        let controller = open_ward(provider, "General Medicine");
        assert!(matches!(controller.render(), WidgetView::Grid(_)));
    }

    #[test]
    fn test_rejects_bad_session_commands() {
        assert!(parse_session_command("click").is_err());
        assert!(parse_session_command("available maybe").is_err());
        assert!(parse_session_command("dance").is_err());
    }
}
