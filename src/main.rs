use anyhow::Result;
use clap::{Args, FromArgMatches};
use endpoint_cli::utils;
use std::io::IsTerminal;

mod cmd;

use cmd::format::{StyleOptions, render};

/// Flags shared by every generated subcommand.
#[derive(Args, Debug)]
struct GlobalArgs {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Silence all non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Print the result as JSON
    #[arg(long, global = true)]
    json: bool,
}

/// Endpoint CLI - subcommands generated from endpoint signatures
///
/// Command layout (from src/cmd/endpoints.yaml):
///   endpoint-cli list dir   [--path DIR] [--all]
///   endpoint-cli list files [--path DIR] [--ext EXT]
///   endpoint-cli echo MESSAGE [--upper] [KEY=VALUE ...]
///
/// Global flags / env:
///   -v / -vv        Increase verbosity
///   -q / --quiet    Errors only
///   --json          Print the endpoint result as JSON
///   RUST_LOG        Overrides -v / -q when set
///
/// A path that stops at a group (`endpoint-cli list`) is a usage error (exit 2).
fn main() -> Result<()> {
    let parser = cmd::build_parser()?;

    let matches = GlobalArgs::augment_args(parser.command()).get_matches();
    let globals = GlobalArgs::from_arg_matches(&matches)?;

    // Initialize logging
    let level = utils::derive_level(globals.verbose, globals.quiet);
    utils::init_logging(level);

    let parsed = parser.parse_matches(&matches);
    tracing::debug!(path = %parsed.path, "parsed command line");

    let result = parser.call(parsed)?;

    let style = if std::io::stdout().is_terminal() {
        StyleOptions::detect()
    } else {
        StyleOptions::plain()
    };
    if let Some(out) = render(&result, globals.json, &style) {
        println!("{out}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn globals_attach_to_generated_tree() {
        let cmd = GlobalArgs::augment_args(cmd::build_parser().unwrap().command());
        cmd.clone().debug_assert();
        let matches = cmd
            .try_get_matches_from(["endpoint-cli", "echo", "hi", "-vv", "--json"])
            .unwrap();
        let globals = GlobalArgs::from_arg_matches(&matches).unwrap();
        assert_eq!(globals.verbose, 2);
        assert!(globals.json);
        assert!(!globals.quiet);
    }
}
