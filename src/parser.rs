/*!
parser.rs - `EndpointParser`, the public facade over the tree.

```ignore
let mut parser = EndpointParser::new("app");
parser.add_endpoint("list.dir", endpoint(sig, list_dir));
parser.add_group("list", Some("Listing commands"));
let result = parser.parse_and_call(std::env::args())?;
```

Registration happens first; parsing and dispatch only read the tree.
*/

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{ArgMatches, Command};
use serde_json::{Map, Value};
use std::ffi::OsString;

use crate::dispatch::{self, ParsedArgs};
use crate::endpoint::Endpoint;
use crate::error::EndpointError;
use crate::spec::{ArgOverrides, autospec};
use crate::tree::{CommandNode, EndpointPath};

pub struct EndpointParser {
    name: String,
    about: Option<String>,
    version: Option<String>,
    root: CommandNode,
}

impl EndpointParser {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            about: None,
            version: None,
            root: CommandNode::default(),
        }
    }

    pub fn about(mut self, about: impl Into<String>) -> Self {
        self.about = Some(about.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &CommandNode {
        &self.root
    }

    /* ---- Registration ---- */

    /// Resolve (creating as needed) the node for `path`.
    pub fn get_endpoint_parser(&mut self, path: impl Into<EndpointPath>) -> &mut CommandNode {
        self.root.resolve(&path.into())
    }

    /// Resolve `path`, optionally derive its arguments from `endpoint`, bind
    /// it, and stamp the endpoint marker. Grouping nodes pass `None`.
    pub fn register(
        &mut self,
        path: impl Into<EndpointPath>,
        endpoint: Option<Box<dyn Endpoint>>,
        auto_generate: bool,
        overrides: Option<&ArgOverrides>,
    ) -> &mut CommandNode {
        let path = path.into();
        let node = self.root.resolve(&path);
        if let Some(endpoint) = endpoint {
            if auto_generate {
                autospec(node, endpoint.signature(), overrides);
            }
            node.bind(endpoint);
        }
        tracing::debug!(
            endpoint = %path,
            bound = node.callable().is_some(),
            "registered endpoint"
        );
        node.endpoint = Some(path);
        node
    }

    pub fn add_endpoint(
        &mut self,
        path: impl Into<EndpointPath>,
        endpoint: impl Endpoint + 'static,
    ) -> &mut CommandNode {
        self.register(path, Some(Box::new(endpoint)), true, None)
    }

    pub fn add_endpoint_with(
        &mut self,
        path: impl Into<EndpointPath>,
        endpoint: impl Endpoint + 'static,
        overrides: &ArgOverrides,
    ) -> &mut CommandNode {
        self.register(path, Some(Box::new(endpoint)), true, Some(overrides))
    }

    /// Register a pure grouping node.
    pub fn add_group(
        &mut self,
        path: impl Into<EndpointPath>,
        description: Option<&str>,
    ) -> &mut CommandNode {
        let node = self.register(path, None, false, None);
        if let Some(description) = description {
            node.description = Some(description.to_string());
        }
        node
    }

    /// Register under the path derived from the signature's qualified name.
    pub fn add_endpoint_auto(
        &mut self,
        endpoint: impl Endpoint + 'static,
    ) -> Result<&mut CommandNode, EndpointError> {
        let signature = endpoint.signature();
        let qualname = signature
            .qualname
            .as_deref()
            .ok_or_else(|| EndpointError::MissingQualname(signature.name.clone()))?;
        let path = EndpointPath::from_qualname(qualname);
        Ok(self.add_endpoint(path, endpoint))
    }

    /* ---- Parsing ---- */

    /// The clap command for the whole tree.
    pub fn command(&self) -> Command {
        let mut cmd = self
            .root
            .to_command(self.name.clone())
            .disable_help_subcommand(true);
        if let Some(about) = &self.about {
            cmd = cmd.about(about.clone());
        }
        if let Some(version) = &self.version {
            cmd = cmd.version(version.clone()).propagate_version(true);
        }
        cmd
    }

    pub fn parse_matches(&self, matches: &ArgMatches) -> ParsedArgs {
        dispatch::collect(&self.root, matches)
    }

    pub fn try_parse_from<I, T>(&self, argv: I) -> Result<ParsedArgs, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self.command().try_get_matches_from(argv)?;
        Ok(self.parse_matches(&matches))
    }

    /// Like `try_parse_from`, but usage errors print and exit.
    pub fn parse_from<I, T>(&self, argv: I) -> ParsedArgs
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self.command().get_matches_from(argv);
        self.parse_matches(&matches)
    }

    /// Split one command line with shell quoting rules and parse it.
    /// The program name is implied.
    pub fn parse_line(&self, line: &str) -> Result<ParsedArgs> {
        let words = shell_words::split(line)
            .with_context(|| format!("failed to split command line: {line}"))?;
        let argv = std::iter::once(self.name.clone()).chain(words);
        Ok(self.try_parse_from(argv)?)
    }

    /* ---- Dispatch ---- */

    /// Dispatch parsed arguments; errors (including an unbound endpoint) are
    /// returned to the caller.
    pub fn try_call(&self, parsed: ParsedArgs) -> Result<Value> {
        dispatch::dispatch(&self.root, parsed)
    }

    /// Dispatch parsed arguments. An unbound endpoint is reported as a usage
    /// error and the process exits with status 2.
    pub fn call(&self, parsed: ParsedArgs) -> Result<Value> {
        let path = parsed.path.clone();
        match self.try_call(parsed) {
            Err(e) if matches!(
                e.downcast_ref::<EndpointError>(),
                Some(EndpointError::UnrecognizedEndpoint(_))
            ) =>
            {
                self.usage_error(&path, "Invalid endpoint").exit()
            }
            other => other,
        }
    }

    pub fn parse_and_call<I, T>(&self, argv: I) -> Result<Value>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let parsed = self.parse_from(argv);
        self.call(parsed)
    }

    /// Call the endpoint at `path` with a prepared value map.
    pub fn call_with(
        &self,
        path: impl Into<EndpointPath>,
        values: Map<String, Value>,
    ) -> Result<Value> {
        let path = path.into();
        let node = self
            .root
            .find(&path)
            .ok_or_else(|| EndpointError::UnknownPath(path.to_string()))?;
        let endpoint = node
            .callable()
            .ok_or_else(|| EndpointError::UnrecognizedEndpoint(path.to_string()))?;
        dispatch::invoke(endpoint, values)
    }

    /// A clap usage error rendered against the node at `path`.
    pub fn usage_error(&self, path: &EndpointPath, message: impl std::fmt::Display) -> clap::Error {
        let mut bin_name = self.name.clone();
        for segment in path.segments() {
            bin_name.push(' ');
            bin_name.push_str(segment);
        }
        let mut cmd = match self.root.find(path) {
            Some(node) if !path.is_empty() => node.to_command(node.name.clone()),
            _ => self.command(),
        }
        .bin_name(bin_name);
        cmd.error(ErrorKind::InvalidSubcommand, message)
    }
}
