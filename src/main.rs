use clap::Parser;
use log::{debug, error};

mod args;
mod rollcall;

use partisan_tally::Chamber;

use crate::args::Args;
use crate::rollcall::config_reader::*;
use crate::rollcall::RollCallResult;

// Command-line values take precedence over the configuration file.
fn build_config(args: &Args) -> RollCallResult<RollCallConfig> {
    let mut config = match &args.config {
        Some(p) => read_config(p)?,
        None => {
            let chamber = match &args.chamber {
                Some(c) => c.clone(),
                None => snafu::whatever!("Either --config or --chamber must be provided"),
            };
            RollCallConfig {
                output_settings: OutputSettings::default(),
                source: SourceSettings {
                    chamber,
                    congress: None,
                    session: None,
                    vote_number: None,
                    year: None,
                    file_path: None,
                },
                roster: None,
                rules: None,
            }
        }
    };

    let source = &mut config.source;
    if let Some(c) = &args.chamber {
        source.chamber = c.clone();
    }
    source.congress = args.congress.or(source.congress);
    source.session = args.session.or(source.session);
    source.vote_number = args.vote_num.or(source.vote_number);
    source.year = args.year.or(source.year);
    if args.input.is_some() {
        source.file_path = args.input.clone();
    }

    if args.roster.is_some() || args.roster_type.is_some() {
        let previous = config.roster.take();
        let provider = args
            .roster_type
            .clone()
            .or_else(|| previous.as_ref().map(|r| r.provider.clone()))
            .unwrap_or_else(|| {
                let chamber = parse_chamber(&config.source.chamber).unwrap_or(Chamber::House);
                rollcall::io_roster::default_provider(chamber).to_string()
            });
        config.roster = Some(RosterSettings {
            provider,
            file_path: args
                .roster
                .clone()
                .or_else(|| previous.and_then(|r| r.file_path)),
        });
    }

    if args.out.is_some() {
        config.output_settings.output_directory = args.out.clone();
    }
    if args.bucket.is_some() {
        config.output_settings.bucket = args.bucket.clone();
    }
    if args.close_margin.is_some() {
        config.rules = Some(RulesSettings {
            close_margin: args.close_margin,
        });
    }
    Ok(config)
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_env("RUST_LOG")
        .init();
    debug!("args: {:?}", args);

    let res = build_config(&args).and_then(|config| rollcall::run_vote(&config, args.reference.clone()));
    if let Err(e) = res {
        error!("{}", e);
        std::process::exit(1);
    }
}
