use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "codewallet", bin_name = "codewallet", version)]
#[command(about = "A wallet for tagged code fragments", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the wallet records (overrides config)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a fragment (body from --body, --file or stdin)
    #[command(alias = "n", display_order = 1)]
    Add {
        /// Title of the fragment
        title: String,

        /// Fragment body
        #[arg(short, long, conflicts_with = "file")]
        body: Option<String>,

        /// Read the body from a file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Tags to attach (repeatable, or comma separated)
        #[arg(short, long = "tag", value_delimiter = ',')]
        tags: Vec<String>,
    },

    /// List fragments
    #[command(alias = "ls", display_order = 2)]
    List {
        /// Only fragments carrying this tag
        #[arg(short, long)]
        tag: Option<String>,
    },

    /// Search titles, bodies and tags
    #[command(display_order = 3)]
    Search {
        /// Search words (joined with spaces)
        #[arg(trailing_var_arg = true)]
        term: Vec<String>,
    },

    /// Show one or more fragments in full
    #[command(alias = "v", display_order = 10)]
    Show {
        /// Indexes, ranges (1-3) or ids of the fragments
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },

    /// Change a fragment's title, body or tags
    #[command(alias = "e", display_order = 11)]
    Edit {
        /// Index or id of the fragment
        index: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New body
        #[arg(short, long, conflicts_with = "file")]
        body: Option<String>,

        /// Read the new body from a file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Replace the tag list (comma separated; empty clears it)
        #[arg(short, long, value_delimiter = ',', num_args = 0..)]
        tags: Option<Vec<String>>,
    },

    /// Delete fragments
    #[command(alias = "rm", display_order = 12)]
    Delete {
        /// Indexes, ranges (1-3) or ids of the fragments
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },

    /// Import files or directories as fragments
    #[command(display_order = 20)]
    Import {
        #[arg(required = true, num_args = 1..)]
        paths: Vec<PathBuf>,
    },

    /// Manage tags
    #[command(display_order = 30)]
    Tags {
        #[command(subcommand)]
        action: Option<TagCommands>,
    },

    /// Show or change the theme
    #[command(display_order = 40)]
    Theme {
        #[command(subcommand)]
        action: Option<ThemeCommands>,
    },

    /// Check and repair the stored records
    #[command(display_order = 41)]
    Doctor,
}

#[derive(Subcommand, Debug)]
pub enum TagCommands {
    /// List tags with usage counts
    #[command(alias = "ls")]
    List,

    /// Register a tag
    Add {
        name: String,

        /// Display color, e.g. "#3572A5"
        #[arg(short, long)]
        color: Option<String>,
    },

    /// Remove tags from the registry and from every fragment
    #[command(alias = "rm")]
    Remove {
        #[arg(required = true, num_args = 1..)]
        names: Vec<String>,
    },

    /// Rename a tag everywhere
    #[command(alias = "mv")]
    Rename {
        old: String,
        new: String,

        /// Allow renaming onto an existing tag, merging the two
        #[arg(long)]
        merge: bool,
    },

    /// Set a tag's display color
    Color { name: String, color: String },

    /// Find tags by name
    Search { term: String },
}

#[derive(Subcommand, Debug)]
pub enum ThemeCommands {
    /// Switch between dark and light
    Toggle,
    /// Use the dark theme
    Dark,
    /// Use the light theme
    Light,
}
