mod render;

use std::io::{Stderr, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use skycast_core::{AppError, Config, UnitSystem};
use skycast_services::{JsonFileStore, Presenter, Session};

const USAGE: &str = "\
Usage:
  skycast [--metric | --imperial] <city>
  skycast favorites [list]
  skycast favorites add <city>
  skycast favorites remove <label>
  skycast favorites show <label>

Set the API key in the config file or with SKYCAST_WEATHER__API_KEY.";

/// Writes the loading indicator and errors to a terminal stream.
#[derive(Debug)]
struct TerminalPresenter<W: Write = Stderr> {
    out: W,
    loading_shown: bool,
    error_shown: bool,
}

impl<W: Write> TerminalPresenter<W> {
    fn new(out: W) -> Self {
        Self {
            out,
            loading_shown: false,
            error_shown: false,
        }
    }

    /// Show a failed command's error unless a search already showed it.
    fn report_failure(&mut self, err: &anyhow::Error) {
        if self.error_shown {
            return;
        }
        match err.downcast_ref::<AppError>() {
            Some(app_err) => self.show_error(app_err.user_message()),
            None => self.show_error(&format!("{:#}", err)),
        }
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn set_loading(&mut self, loading: bool) {
        if loading {
            let _ = write!(self.out, "Loading...");
            self.loading_shown = true;
        } else if self.loading_shown {
            let _ = write!(self.out, "\r          \r");
            self.loading_shown = false;
        }
        let _ = self.out.flush();
    }

    fn show_error(&mut self, message: &str) {
        let _ = writeln!(self.out, "error: {}", message);
        self.error_shown = true;
    }

    fn clear_error(&mut self) {
        self.error_shown = false;
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Help,
    Search { city: String, unit: Option<UnitSystem> },
    ListFavorites,
    AddFavorite { city: String },
    RemoveFavorite { label: String },
    ShowFavorite { label: String },
}

fn parse_args(args: &[String]) -> Result<Command> {
    let Some(first) = args.first() else {
        return Ok(Command::Help);
    };

    if first == "favorites" || first == "fav" {
        let (action, operand) = match args.get(1) {
            None => ("list", String::new()),
            Some(action) => (action.as_str(), args[2..].join(" ")),
        };
        return match action {
            "list" => Ok(Command::ListFavorites),
            "add" => Ok(Command::AddFavorite { city: operand }),
            "remove" | "rm" => Ok(Command::RemoveFavorite { label: operand }),
            "show" => Ok(Command::ShowFavorite { label: operand }),
            other => anyhow::bail!("unknown favorites action: {}\n\n{}", other, USAGE),
        };
    }

    let mut unit = None;
    let mut words = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "--metric" => unit = Some(UnitSystem::Metric),
            "--imperial" => unit = Some(UnitSystem::Imperial),
            "-u" | "--units" => {
                let value = iter.next().context("--units needs a value")?;
                unit = Some(value.parse().map_err(anyhow::Error::msg)?);
            }
            _ => words.push(arg.as_str()),
        }
    }

    Ok(Command::Search {
        city: words.join(" "),
        unit,
    })
}

async fn run<W: Write>(
    command: Command,
    config: &Config,
    presenter: &mut TerminalPresenter<W>,
) -> Result<()> {
    let store = JsonFileStore::new(config.favorites_path());
    let mut session = Session::new(config, store)?;

    match command {
        Command::Help => println!("{}", USAGE),
        Command::Search { city, unit } => {
            if let Some(unit) = unit {
                session.set_unit(unit, presenter).await?;
            }
            let report = session.search(&city, presenter).await?;
            print!("{}", render::render_report(report));
        }
        Command::ListFavorites => {
            print!("{}", render::render_favorites(session.favorites()));
        }
        Command::AddFavorite { city } => {
            session.search(&city, presenter).await?;
            let label = session.add_current_to_favorites()?;
            println!("Added {} to favorites", label);
        }
        Command::RemoveFavorite { label } => {
            if session.remove_favorite(&label)? {
                println!("Removed {} from favorites", label);
            } else {
                println!("{} is not a favorite", label);
            }
        }
        Command::ShowFavorite { label } => {
            let report = session.search_favorite(&label, presenter).await?;
            print!("{}", render::render_report(report));
        }
    }

    Ok(())
}

async fn execute(args: &[String], presenter: &mut TerminalPresenter) -> Result<()> {
    let command = parse_args(args)?;
    if command == Command::Help {
        println!("{}", USAGE);
        return Ok(());
    }

    let (config, _) = Config::load_validated()?;
    run(command, &config, presenter).await
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    if let Err(e) = skycast_core::init() {
        eprintln!("error: failed to initialize logging: {:#}", e);
        return ExitCode::FAILURE;
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut presenter = TerminalPresenter::new(std::io::stderr());

    match execute(&args, &mut presenter).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            presenter.report_failure(&e);
            tracing::debug!("Command failed: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
