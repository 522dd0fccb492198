use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use sampack_pack::ArchiveFormat;

#[derive(Parser)]
#[command(
    name = "sampack",
    about = "sampack: generate, pack and unpack synthetic sample archives",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// TOML file overriding the default pack settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum FormatArg {
    Binary,
    Text,
}

impl From<FormatArg> for ArchiveFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Binary => ArchiveFormat::Binary,
            FormatArg::Text => ArchiveFormat::Text,
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate samples and write them to an archive
    Pack(PackArgs),
    /// Read an archive and report its size and parameters
    Unpack(UnpackArgs),
    /// Print a single sample of an archive by id
    Show(ShowArgs),
}

#[derive(Args)]
pub struct PackArgs {
    pub path: PathBuf,
    /// Number of base contents to generate
    pub count: usize,
    /// Seed for reproducible generation
    #[arg(long)]
    pub seed: Option<u64>,
    #[arg(long)]
    pub format: Option<FormatArg>,
    /// Angle variants per base content
    #[arg(long)]
    pub angles: Option<usize>,
    /// Skip printing the generated samples
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Args)]
pub struct UnpackArgs {
    pub path: PathBuf,
    /// Also list every sample with its id
    #[arg(short, long)]
    pub list: bool,
}

#[derive(Args)]
pub struct ShowArgs {
    pub path: PathBuf,
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_pack() {
        let cli = Cli::try_parse_from(["sampack", "pack", "out.pack", "10"]).unwrap();
        if let Command::Pack(args) = cli.command {
            assert_eq!(args.path, PathBuf::from("out.pack"));
            assert_eq!(args.count, 10);
            assert!(args.seed.is_none());
            assert!(args.format.is_none());
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_pack_with_options() {
        let cli = Cli::try_parse_from([
            "sampack", "pack", "out.json", "3", "--seed", "42", "--format", "text", "--angles", "2",
            "-q",
        ])
        .unwrap();
        if let Command::Pack(args) = cli.command {
            assert_eq!(args.seed, Some(42));
            assert!(matches!(args.format, Some(FormatArg::Text)));
            assert_eq!(args.angles, Some(2));
            assert!(args.quiet);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn pack_requires_count() {
        assert!(Cli::try_parse_from(["sampack", "pack", "out.pack"]).is_err());
    }

    #[test]
    fn pack_rejects_non_numeric_count() {
        assert!(Cli::try_parse_from(["sampack", "pack", "out.pack", "many"]).is_err());
    }

    #[test]
    fn parse_unpack() {
        let cli = Cli::try_parse_from(["sampack", "unpack", "in.pack", "--list"]).unwrap();
        if let Command::Unpack(args) = cli.command {
            assert_eq!(args.path, PathBuf::from("in.pack"));
            assert!(args.list);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn unpack_requires_path() {
        assert!(Cli::try_parse_from(["sampack", "unpack"]).is_err());
    }

    #[test]
    fn parse_show() {
        let cli = Cli::try_parse_from(["sampack", "show", "in.pack", "1~2-3"]).unwrap();
        if let Command::Show(args) = cli.command {
            assert_eq!(args.id, "1~2-3");
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn missing_subcommand_is_an_error() {
        assert!(Cli::try_parse_from(["sampack"]).is_err());
    }

    #[test]
    fn parse_global_flags() {
        let cli =
            Cli::try_parse_from(["sampack", "--verbose", "--config", "s.toml", "unpack", "x"])
                .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("s.toml")));
    }

    #[test]
    fn format_arg_maps_to_archive_format() {
        assert_eq!(ArchiveFormat::from(FormatArg::Text), ArchiveFormat::Text);
        assert_eq!(ArchiveFormat::from(FormatArg::Binary), ArchiveFormat::Binary);
    }
}
