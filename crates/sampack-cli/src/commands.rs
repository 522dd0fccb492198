use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use colored::Colorize;
use sampack_pack::{PackConfig, PackError, Package};
use sampack_types::RngSource;
use tracing::debug;

use crate::cli::*;

/// How a command finished when it did not fail outright.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::Failure => ExitCode::FAILURE,
        }
    }
}

pub fn run_command(cli: Cli) -> anyhow::Result<Outcome> {
    let config = load_config(cli.config.as_deref())?;
    debug!(?config, "resolved pack config");
    let mut out = std::io::stdout().lock();
    match cli.command {
        Command::Pack(args) => cmd_pack(args, config, &mut out),
        Command::Unpack(args) => cmd_unpack(args, &mut out),
        Command::Show(args) => cmd_show(args, &mut out),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<PackConfig> {
    match path {
        Some(path) => PackConfig::load(path)
            .with_context(|| format!("reading config {}", path.display())),
        None => Ok(PackConfig::default()),
    }
}

fn cmd_pack(
    args: PackArgs,
    mut config: PackConfig,
    out: &mut impl Write,
) -> anyhow::Result<Outcome> {
    if let Some(format) = args.format {
        config.format = format.into();
    }
    if let Some(angles) = args.angles {
        config.angles_per_content = angles;
    }

    let mut package = Package::from_config(&config);
    let mut source = match args.seed {
        Some(seed) => RngSource::seeded(seed),
        None => RngSource::from_entropy(),
    };
    let count = package.generate(&mut source, args.count, config.angles_per_content);

    if !args.quiet {
        for (j, c) in package.iter().enumerate() {
            writeln!(out, "{j} {} {}", c.length(), c.angle())?;
        }
    }

    package
        .save_as(&args.path, config.format)
        .with_context(|| format!("saving {}", args.path.display()))?;
    writeln!(out, "serialized: {} contents", count.to_string().bold())?;
    Ok(Outcome::Success)
}

fn cmd_unpack(args: UnpackArgs, out: &mut impl Write) -> anyhow::Result<Outcome> {
    let mut package = Package::default();
    if let Err(e) = package.load(&args.path) {
        eprintln!(
            "{} loading {}: {e}",
            "error:".red().bold(),
            args.path.display()
        );
    }
    if !package.loaded() {
        return Ok(Outcome::Failure);
    }

    writeln!(out, "Package loaded: {}", package.len().to_string().bold())?;
    writeln!(out, "{}", package.params())?;
    if args.list {
        for c in package.iter() {
            writeln!(out, "{}  {}", c.id().dimmed(), c)?;
        }
    }
    Ok(Outcome::Success)
}

fn cmd_show(args: ShowArgs, out: &mut impl Write) -> anyhow::Result<Outcome> {
    let package = Package::open(&args.path)
        .with_context(|| format!("loading {}", args.path.display()))?;
    match package.get(&args.id) {
        Ok(c) => {
            writeln!(out, "id:         {}", c.id().yellow())?;
            writeln!(out, "length:     {}", c.length())?;
            writeln!(out, "angle:      {}", c.angle())?;
            writeln!(out, "frozen_id:  {}", c.frozen_id())?;
            let siblings = package.store().by_frozen_id(c.frozen_id()).len() - 1;
            writeln!(out, "siblings:   {siblings}")?;
            Ok(Outcome::Success)
        }
        Err(PackError::SampleNotFound(id)) => {
            eprintln!(
                "{} no sample with id {}",
                "error:".red().bold(),
                id.yellow()
            );
            Ok(Outcome::Failure)
        }
        Err(e) => Err(e.into()),
    }
}
