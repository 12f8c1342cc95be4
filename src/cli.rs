use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "chartfeed",
    author,
    version,
    about = "Export the iTunes top 100 albums to csv and upload files over ftp",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate file(s) based on the iTunes API
    Generate(GenerateArgs),
    /// Transfer a file to an ftp server
    Transfer(TransferArgs),
}

#[derive(Debug, Args)]
#[command(after_help = GENERATE_AFTER_HELP)]
pub struct GenerateArgs {
    #[command(subcommand)]
    pub command: Option<GenerateCommands>,
}

#[derive(Debug, Subcommand)]
pub enum GenerateCommands {
    /// Generate a csv based on the top 100 albums
    List(ListArgs),
    /// Generate a csv of album image links based on the top 100 albums
    ListImages(ListArgs),
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// File name for the generated csv; the extension is added at runtime
    #[arg(long = "filename", value_name = "STRING")]
    pub filename: Option<String>,
    /// Existing directory where the generated csv will be placed
    #[arg(long = "path", value_name = "STRING")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct TransferArgs {
    /// Local file to upload
    #[arg(value_name = "FILE-PATH")]
    pub file: Option<PathBuf>,
    /// Ftp server address as host:port [default: test.rebex.net:21]
    #[arg(long = "server", value_name = "HOST:PORT")]
    pub server: Option<String>,
    /// Username used to authenticate with the ftp server
    #[arg(long = "user", value_name = "STRING")]
    pub user: Option<String>,
    /// Password used to authenticate with the ftp server
    #[arg(long = "password", value_name = "STRING")]
    pub password: Option<String>,
    /// File name to save as on the ftp server [default: the local file name]
    #[arg(long = "filename", value_name = "STRING")]
    pub filename: Option<String>,
}

const GENERATE_AFTER_HELP: &str = "\
Generate csv file of top 100:

  $ chartfeed generate list

Please see the individual subcommand help for detailed usage information.";

/// Long flags that may also be spelled with a single dash (`-path=out`).
pub const SINGLE_DASH_LONG_FLAGS: &[&str] = &[
    "filename", "path", "server", "user", "password", "help", "version",
];
