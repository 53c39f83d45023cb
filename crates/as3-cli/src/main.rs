use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};

use as3_core::{RuleOverrides, RuleSet, Translator};

mod driver;

fn main() -> Result<()> {
    // Parse command line arguments
    let matches = Command::new("java2as3")
        .version(as3_core::VERSION)
        .about("Translates parsed Java program trees into ActionScript 3 source")
        .arg(
            Arg::new("input")
                .value_name("INPUT")
                .help("Program tree (.json) file or directory")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("output")
                .value_name("OUTPUT")
                .help("Output .as file or directory (defaults to a sibling of the input)")
                .index(2),
        )
        .arg(
            Arg::new("rules")
                .long("rules")
                .value_name("FILE")
                .help("JSON rule overrides, layered on top of the defaults"),
        )
        .arg(
            Arg::new("no-defaults")
                .long("no-defaults")
                .help("Start from an empty rule set instead of the default mutations")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("force-sprite")
                .long("force-sprite")
                .help("Classes without a supertype extend flash.display.Sprite")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("force-movie-clip")
                .long("force-movie-clip")
                .help("Classes without a supertype extend flash.display.MovieClip")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Translator log level (off, error, warn, info, debug)")
                .default_value("warn"),
        )
        .get_matches();

    let level = matches.get_one::<String>("log-level").unwrap();
    tracing_subscriber::fmt()
        .with_env_filter(format!("as3_core={level},java2as3={level}"))
        .with_writer(std::io::stderr)
        .init();

    let input = PathBuf::from(matches.get_one::<String>("input").unwrap());
    let output = matches.get_one::<String>("output").map(PathBuf::from);

    // Assemble the rule set: defaults unless suppressed, then the rule
    // file, then the force flags.
    let mut builder = if matches.get_flag("no-defaults") {
        RuleSet::builder()
    } else {
        RuleSet::builder().with_defaults()
    };
    if let Some(rules_path) = matches.get_one::<String>("rules") {
        let text = fs::read_to_string(rules_path)
            .with_context(|| format!("reading rule file {rules_path}"))?;
        let overrides: RuleOverrides = serde_json::from_str(&text)
            .with_context(|| format!("parsing rule file {rules_path}"))?;
        builder = builder.apply(&overrides);
    }
    if matches.get_flag("force-sprite") {
        builder = builder.force_sprite(true);
    }
    if matches.get_flag("force-movie-clip") {
        builder = builder.force_movie_clip(true);
    }

    let translator = Translator::new(builder.build()?);

    let stats = driver::compile_path(&translator, &input, output.as_deref())?;
    println!(
        "translated {} unit(s): {} warning(s), {} error(s)",
        stats.units, stats.warnings, stats.errors
    );
    Ok(())
}
