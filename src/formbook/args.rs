use clap::builder::PossibleValuesParser;
use clap::{Args, Parser, Subcommand};
use formbook::model::PROVINCES;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "formbook")]
#[command(about = "A contact entry book for the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the entry data (defaults to the platform data dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
}

/// Entry fields shared by `add` and `edit`. For `edit`, omitted flags keep
/// the stored value.
#[derive(Args, Debug, Default)]
pub struct EntryFields {
    /// Full name
    #[arg(long)]
    pub name: Option<String>,

    /// Email address
    #[arg(long)]
    pub email: Option<String>,

    /// Phone number (digits only, at least 7)
    #[arg(long)]
    pub phone: Option<String>,

    /// Date of birth
    #[arg(long)]
    pub dob: Option<String>,

    /// Address: city
    #[arg(long)]
    pub city: Option<String>,

    /// Address: district
    #[arg(long)]
    pub district: Option<String>,

    /// Address: province
    #[arg(long, value_parser = PossibleValuesParser::new(PROVINCES))]
    pub province: Option<String>,

    /// Profile picture path (must be a .png)
    #[arg(long, value_name = "FILE")]
    pub picture: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new entry
    #[command(alias = "a")]
    Add {
        #[command(flatten)]
        fields: EntryFields,
    },

    /// List entries
    #[command(alias = "ls")]
    List {
        /// Page to show (1-based)
        #[arg(short, long)]
        page: Option<usize>,
    },

    /// Show one entry in full
    #[command(alias = "v")]
    Show {
        /// Position of the entry (1-based, as listed)
        position: usize,
    },

    /// Edit an entry, keeping any field not given a flag
    #[command(alias = "e")]
    Edit {
        /// Position of the entry (1-based, as listed)
        position: usize,

        #[command(flatten)]
        fields: EntryFields,
    },

    /// Delete an entry
    #[command(alias = "rm")]
    Delete {
        /// Position of the entry (1-based, as listed)
        position: usize,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (e.g., page-size)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Print the data file path
    Path,
}
