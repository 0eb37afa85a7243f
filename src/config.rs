// ⚙️ Configuration - CLI flags with environment fallbacks
//
// swift-codes [--database PATH] [--bind ADDR] [serve | import [PATH] [--no-serve]]

use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Data file shipped with the repository
pub const DEFAULT_DATA_FILE: &str = "data/swift_codes.csv";

#[derive(Parser, Debug)]
#[command(name = "swift-codes")]
#[command(about = "SWIFT/BIC code lookup service", long_about = None, version)]
pub struct Cli {
    /// SQLite database file (":memory:" for a throwaway database)
    #[arg(long, global = true, env = "SWIFT_CODES_DB", default_value = "swift_codes.db")]
    pub database: PathBuf,

    /// Address the HTTP server listens on
    #[arg(long, global = true, env = "SWIFT_CODES_BIND", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start the server without importing
    Serve,
    /// Import a CSV file, then start the server
    Import(ImportArgs),
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ImportArgs {
    /// CSV file to import
    #[arg(default_value = DEFAULT_DATA_FILE)]
    pub path: PathBuf,

    /// Exit after the import instead of serving
    #[arg(long, default_value_t = false)]
    pub no_serve: bool,
}

/// What the process should do, resolved from the CLI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Serve,
    ImportThenServe(PathBuf),
    ImportOnly(PathBuf),
}

impl Cli {
    pub fn mode(&self) -> Mode {
        match &self.command {
            None | Some(Command::Serve) => Mode::Serve,
            Some(Command::Import(args)) if args.no_serve => Mode::ImportOnly(args.path.clone()),
            Some(Command::Import(args)) => Mode::ImportThenServe(args.path.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_default_mode_is_serve() {
        assert_eq!(parse(&["swift-codes"]).mode(), Mode::Serve);
        assert_eq!(parse(&["swift-codes", "serve"]).mode(), Mode::Serve);
    }

    #[test]
    fn test_import_uses_bundled_file_by_default() {
        assert_eq!(
            parse(&["swift-codes", "import"]).mode(),
            Mode::ImportThenServe(PathBuf::from(DEFAULT_DATA_FILE))
        );
    }

    #[test]
    fn test_import_path_override_and_no_serve() {
        assert_eq!(
            parse(&["swift-codes", "import", "/tmp/codes.csv", "--no-serve"]).mode(),
            Mode::ImportOnly(PathBuf::from("/tmp/codes.csv"))
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["swift-codes", "serve", "--database", "test.db", "--bind", "127.0.0.1:9000"]);
        assert_eq!(cli.database, PathBuf::from("test.db"));
        assert_eq!(cli.bind.port(), 9000);
    }

    #[test]
    fn test_invalid_bind_address_is_rejected() {
        assert!(Cli::try_parse_from(["swift-codes", "--bind", "not-an-address"]).is_err());
    }
}
