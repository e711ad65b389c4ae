use anyhow::{Context, Result};
use chrono::Local;
use jotter::cli::{self, Args, Command};
use jotter::config::Config;
use jotter::context::{AppContext, StandardContext};
use jotter::model::{CaptureRecord, ReferenceYear, parse_capture};
use jotter::notes;
use jotter::vault::LocalVault;
use simplelog::{LevelFilter, WriteLogger};
use std::env;
use std::fs::OpenOptions;

fn init_logging(ctx: &dyn AppContext, verbose: bool) -> Result<()> {
    let path = ctx.get_log_file_path()?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    WriteLogger::init(level, simplelog::Config::default(), file)?;
    Ok(())
}

/// Text from the command line, or from the capture prompt when none was given.
fn capture_or_parse(text: Option<String>, title: &str) -> Result<Option<CaptureRecord>> {
    match text {
        Some(text) => {
            let now = Local::now().naive_local();
            Ok(Some(parse_capture(&text, &ReferenceYear::from_date(now.date()), now)))
        }
        None => interactive_capture(title),
    }
}

#[cfg(feature = "tui")]
fn interactive_capture(title: &str) -> Result<Option<CaptureRecord>> {
    jotter::tui::capture(title)
}

#[cfg(not(feature = "tui"))]
fn interactive_capture(_title: &str) -> Result<Option<CaptureRecord>> {
    anyhow::bail!("Interactive capture needs the 'tui' feature; pass the text as arguments")
}

fn run(args: Args) -> Result<()> {
    let ctx = StandardContext::new(args.root);
    if let Err(e) = init_logging(&ctx, args.verbose) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    // Only the writing commands touch the config file and the vault
    let open_vault = || -> Result<(Config, LocalVault)> {
        let config = Config::load_or_init(&ctx)?;
        let vault = LocalVault::open(&ctx, &config)?;
        Ok((config, vault))
    };

    match args.command {
        Command::Help => cli::print_help("jotter"),
        Command::Parse(text) => {
            println!("{}", cli::parse_output(&text, Local::now().naive_local())?);
        }
        Command::Intention(text) => {
            let (config, vault) = open_vault()?;
            if let Some(record) = capture_or_parse(text, "Describe intention")? {
                let file_name = notes::create_intention(&vault, &config, &record, Local::now())?;
                println!("Created {}/{}", config.intention_path, file_name);
            }
        }
        Command::Log(text) => {
            let (config, vault) = open_vault()?;
            if let Some(record) = capture_or_parse(text, "Create daily log")? {
                let path =
                    notes::append_daily_log(&vault, &config, &record.description, Local::now())?;
                println!("Appended to {}", path);
            }
        }
        Command::Link(selection) => {
            let (config, vault) = open_vault()?;
            let link =
                notes::create_intention_from_selection(&vault, &config, &selection, Local::now())?;
            println!("{}", link);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let raw: Vec<String> = env::args().skip(1).collect();
    let args = match cli::parse_args(&raw) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}\n", e);
            cli::print_help("jotter");
            std::process::exit(2);
        }
    };

    if args.command == Command::Help {
        cli::print_help("jotter");
        return Ok(());
    }

    run(args)
}
