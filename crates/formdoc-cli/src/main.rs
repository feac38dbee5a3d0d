//! `formdoc` command-line entry point.

use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use chrono::{Local, Utc};
use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use formdoc_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg, RoleArg};
use formdoc_cli::commands::{
    Session, run_add_field, run_add_section, run_answer, run_company, run_edit, run_list, run_move, run_new,
    run_outline, run_publish, run_remove, run_render, run_submit, run_validate,
};
use formdoc_cli::config::Config;
use formdoc_cli::logging::{LogConfig, LogFormat, init_logging};
use formdoc_cli::summary::{
    print_company, print_edited, print_forms, print_outline, print_rendered, print_submission, print_validation,
};
use formdoc_model::Role;
use formdoc_store::JsonDirectoryStore;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: Cli) -> Result<i32> {
    let config = Config::load(cli.config.as_deref())?;
    let store_dir = config.store_dir(cli.store.as_deref());
    let store = JsonDirectoryStore::open(&store_dir)
        .with_context(|| format!("open store {}", store_dir.display()))?;
    let role = match cli.role {
        RoleArg::Employee => Role::Employee,
        RoleArg::Manager => Role::Manager,
        RoleArg::Admin => Role::Admin,
    };
    let session = Session::new(store, role, config.layout_options());

    match cli.command {
        Command::New(args) => print_outline(&run_new(&session, &args)?),
        Command::List => print_forms(&run_list(&session)?),
        Command::Outline(args) => print_outline(&run_outline(&session, &args)?),
        Command::AddSection(args) => print_edited(&run_add_section(&session, &args)?),
        Command::AddField(args) => print_edited(&run_add_field(&session, &args)?),
        Command::Edit(args) => print_edited(&run_edit(&session, &args)?),
        Command::Remove(args) => print_edited(&run_remove(&session, &args)?),
        Command::Move(args) => print_edited(&run_move(&session, &args)?),
        Command::Publish(args) => {
            let form = run_publish(&session, &args)?;
            println!("Published '{}' as revision {}", form.title, form.revision);
        }
        Command::Answer(args) => {
            let answers = run_answer(&session, &args)?;
            println!("Saved {} answers for {}", answers.len(), args.user);
        }
        Command::Validate(args) => {
            let report = run_validate(&session, &args)?;
            print_validation(&report);
            if report.gate.blocked {
                return Ok(1);
            }
        }
        Command::Submit(args) => {
            let outcome = run_submit(&session, &args, Utc::now())?;
            print_submission(&outcome);
            if outcome.submission.is_none() {
                return Ok(1);
            }
        }
        Command::Render(args) => {
            let today = Local::now().date_naive();
            print_rendered(&run_render(&session, &args, today)?);
        }
        Command::Company(args) => print_company(run_company(&session, &args)?.as_ref()),
    }
    Ok(0)
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
