use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "tribute",
    about = "Find dependency license files and export attribution data",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Project path to scan
    #[arg(long, global = true, default_value = ".")]
    pub path: PathBuf,

    /// Config file [default: ./.tribute/config.toml, fallback ~/.config/tribute/config.toml]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Only print results, no progress or summary lines
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Display list of libraries and licenses found in project
    List {
        #[command(flatten)]
        scan: ScanArgs,
    },

    /// Export license information for project
    Export {
        /// File the licenses are written to; stdout when omitted
        output: Option<PathBuf>,

        #[command(flatten)]
        scan: ScanArgs,

        /// Libraries to include even if their license is not recognized
        #[arg(long, value_name = "LIBRARY", value_delimiter = ',')]
        allow: Vec<String>,

        /// Output format: text, json or xml [default: inferred from template or output file]
        #[arg(long, value_name = "FORMAT")]
        format: Option<String>,

        /// Template string, or path to a template file. Placeholders: $name, $type,
        /// $text, $start, $end, $separator
        #[arg(long, value_name = "TEMPLATE")]
        template: Option<String>,
    },

    /// Check that an exported licenses file mentions every library
    Check {
        /// Licenses file to compare against the libraries found in the project
        licenses_file: PathBuf,

        #[command(flatten)]
        scan: ScanArgs,
    },

    /// Check that all licenses are recognized and none is unsupported
    CheckUnsupported {
        #[command(flatten)]
        scan: ScanArgs,

        /// License families considered unsupported [default: AGPL, LGPL, GPL]
        #[arg(long, value_name = "FAMILY", value_delimiter = ',')]
        unsupported: Vec<String>,
    },
}

/// Options shared by every command that scans the project.
#[derive(Args, Debug, Clone, Default)]
pub struct ScanArgs {
    /// Paths to exclude from the library search (relative, glob syntax allowed)
    #[arg(long, value_name = "GLOB", value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Libraries to leave out, e.g. build tools that are not shipped
    #[arg(long, value_name = "LIBRARY", value_delimiter = ',')]
    pub skip: Vec<String>,

    /// Swift Package Manager cache where downloaded packages live
    #[arg(long = "spmcache", value_name = "DIR")]
    pub spm_cache: Option<PathBuf>,
}
