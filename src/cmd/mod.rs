/*!
Built-in endpoints of the `endpoint-cli` binary.

Signatures live in `endpoints.yaml` (embedded at build time); this module
pairs each manifest path with its handler and registers both.

  src/cmd/
    mod.rs          (this file: manifest loading + registration)
    endpoints.yaml  (signatures, keyed by endpoint path)
    list.rs         (list.dir, list.files)
    echo.rs         (echo)
    format.rs       (result rendering)

Conventions:
  - Handlers are plain `fn(CallArgs) -> anyhow::Result<Value>`.
  - Every manifest entry must have a handler, and vice versa.
*/

pub mod echo;
pub mod format;
pub mod list;

use anyhow::{Context, Result, bail};
use endpoint_cli::signature::load_manifest_yaml;
use endpoint_cli::{CallArgs, EndpointParser, FnEndpoint};
use serde_json::Value;

const MANIFEST: &str = include_str!("endpoints.yaml");

type Handler = fn(CallArgs) -> Result<Value>;

const HANDLERS: &[(&str, Handler)] = &[
    ("list.dir", list::list_dir),
    ("list.files", list::list_files),
    ("echo", echo::echo),
];

fn handler_for(path: &str) -> Option<Handler> {
    HANDLERS
        .iter()
        .find(|(p, _)| *p == path)
        .map(|(_, h)| *h)
}

/// Build the parser with every built-in endpoint registered.
pub fn build_parser() -> Result<EndpointParser> {
    let manifest = load_manifest_yaml(MANIFEST).context("built-in endpoint manifest is invalid")?;

    let mut parser = EndpointParser::new("endpoint-cli")
        .about("Endpoint CLI - subcommands generated from endpoint signatures")
        .version(env!("CARGO_PKG_VERSION"));

    parser.add_group("list", Some("Listing commands"));

    for (path, signature) in manifest {
        let Some(handler) = handler_for(&path) else {
            bail!("no handler for manifest endpoint '{path}'");
        };
        parser.add_endpoint(path.as_str(), FnEndpoint::new(signature, handler));
    }

    for (path, _) in HANDLERS {
        if parser.root().find(&(*path).into()).and_then(|n| n.callable()).is_none() {
            bail!("handler '{path}' has no manifest entry");
        }
    }

    Ok(parser)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builtin_tree_is_complete() {
        let parser = build_parser().unwrap();
        parser.command().debug_assert();
        let list = parser.root().child("list").unwrap();
        assert!(list.callable().is_none());
        assert!(list.child("dir").unwrap().callable().is_some());
        assert!(list.child("files").unwrap().callable().is_some());
    }

    #[test]
    fn echo_round_trip_through_parser() {
        let parser = build_parser().unwrap();
        let parsed = parser.parse_line("echo hello --upper lang=rust").unwrap();
        let out = parser.try_call(parsed).unwrap();
        assert_eq!(out, json!({"message": "HELLO", "lang": "rust"}));
    }
}
