use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command, crate_version, value_parser};
use crossterm::style::Stylize;
use log::{error, info};
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;
use swapi_browser::logging::{clear_log_file, init_logging, log_file_path};
use swapi_browser::ui::{EventHandler, TerminalGuard, Tui, init_panic_hook, init_tui};
use swapi_browser::{DEFAULT_BASE_URL, Fetcher, Navigator, SwapiClient};

/// How often the input thread checks whether it should stop.
const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(100);

fn main() -> ExitCode
{
    match run()
    {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) =>
        {
            // The terminal guard is gone by now, so this lands on a normal screen
            error!("Session ended with error: {err:#}");
            eprintln!("{} {err:#}", "Error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

/// Parses arguments, then runs the browser until the user exits.
///
/// # Errors
///
/// Returns the first error from setup or from any screen.
fn run() -> Result<()>
{
    let log_path = log_file_path()?;
    let matches = command(&log_path).get_matches();

    if matches.get_flag("clear-log")
    {
        clear_log_file(&log_path)?;
        println!("Removed {}", log_path.display());
        return Ok(());
    }

    init_logging(&log_path)?;
    init_panic_hook();

    let base_url = matches
        .get_one::<String>("base-url")
        .map_or(DEFAULT_BASE_URL, String::as_str);
    let timeout = matches
        .get_one::<u64>("timeout")
        .copied()
        .map(Duration::from_secs);

    info!("Starting against {base_url} (timeout: {timeout:?})");
    let fetcher = Fetcher::new(SwapiClient::new(timeout));

    {
        // Use RAII to ensure terminal cleanup happens, also on errors
        let _terminal_guard = TerminalGuard::new().context("Failed to set up the terminal")?;
        let terminal = init_tui().context("Failed to set up the terminal")?;
        let tui = Tui::new(terminal, EventHandler::new(EVENT_POLL_INTERVAL));

        let mut navigator = Navigator::new(fetcher, tui, base_url);
        navigator.run()?;

        info!(
            "Session finished with {} cached resources",
            navigator.fetcher().cached_len()?
        );
    }

    println!("\n{}\n", "Goodbye!".green());
    Ok(())
}

/// Command line definition.
fn command(log_path: &Path) -> Command
{
    Command::new("swapi_browser")
        .version(crate_version!())
        .about("Browse Star Wars films, characters, planets and starships in the terminal")
        .after_help(format!(
            "Navigate with the arrow keys or j/k and press Enter to select.\nLogs are written to: {}",
            log_path.display()
        ))
        .arg(
            Arg::new("base-url")
                .long("base-url")
                .value_name("URL")
                .help("Base URL of the Star Wars API")
                .default_value(DEFAULT_BASE_URL),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .short('t')
                .value_name("SECONDS")
                .help("Give up on a request after this many seconds (default: wait forever)")
                .value_parser(value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new("clear-log")
                .long("clear-log")
                .help("Remove the log file and exit")
                .action(ArgAction::SetTrue),
        )
}
