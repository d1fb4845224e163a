/*!
tree.rs - the endpoint tree.

Nodes are keyed by lowercase path segment and created on first reference.
`resolve("list.dir")`, `resolve("list dir")` and `resolve(["list", "dir"])`
all land on the same node. The empty path is the root.

The whole tree renders to a `clap::Command`, one subcommand per child.
*/

use clap::Command;
use std::fmt;

use crate::endpoint::Endpoint;
use crate::spec::ArgSpec;

/* ---- Paths ---- */

/// Ordered, lowercase, non-empty path segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct EndpointPath(Vec<String>);

impl EndpointPath {
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse `a.b.c` or `a b c`. A string without dots is split on whitespace.
    pub fn parse(raw: &str) -> Self {
        let dotted: Vec<&str> = raw.split('.').collect();
        if dotted.len() == 1 {
            Self::from_segments(raw.split_whitespace())
        } else {
            Self::from_segments(dotted)
        }
    }

    /// Build from already-split segments (trimmed, lowercased, empties dropped).
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            segments
                .into_iter()
                .map(|s| s.as_ref().trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        )
    }

    /// Derive a path from a qualified name such as `Foo._Bar.baz`.
    pub fn from_qualname(qualname: &str) -> Self {
        Self(clear_qualname(qualname))
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for EndpointPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

impl From<&str> for EndpointPath {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<String> for EndpointPath {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<&[&str]> for EndpointPath {
    fn from(segments: &[&str]) -> Self {
        Self::from_segments(segments)
    }
}

impl<const N: usize> From<[&str; N]> for EndpointPath {
    fn from(segments: [&str; N]) -> Self {
        Self::from_segments(segments)
    }
}

impl From<Vec<String>> for EndpointPath {
    fn from(segments: Vec<String>) -> Self {
        Self::from_segments(segments)
    }
}

impl From<&EndpointPath> for EndpointPath {
    fn from(path: &EndpointPath) -> Self {
        path.clone()
    }
}

fn is_scope_marker(segment: &str) -> bool {
    (segment.starts_with('<') && segment.ends_with('>'))
        || (segment.starts_with('{') && segment.ends_with('}'))
}

/// Turn a qualified name into clean lowercase segments.
///
/// Splits on `.` and `::`, drops synthetic scope markers (`<locals>`,
/// `{{closure}}`), strips surrounding underscores.
pub fn clear_qualname(qualname: &str) -> Vec<String> {
    qualname
        .split("::")
        .flat_map(|part| part.split('.'))
        .filter(|seg| !is_scope_marker(seg))
        .map(|seg| seg.trim_matches('_').to_lowercase())
        .filter(|seg| !seg.is_empty())
        .collect()
}

/* ---- Nodes ---- */

#[derive(Default)]
pub struct CommandNode {
    pub name: String,
    /// Full path of the last resolution that reached this node.
    pub path: Vec<String>,
    /// Endpoint marker stamped on registration.
    pub endpoint: Option<EndpointPath>,
    pub description: Option<String>,
    pub args: Vec<ArgSpec>,
    callable: Option<Box<dyn Endpoint>>,
    children: Option<Vec<CommandNode>>,
}

impl fmt::Debug for CommandNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandNode")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("endpoint", &self.endpoint)
            .field("description", &self.description)
            .field("args", &self.args)
            .field(
                "callable",
                &self.callable.as_ref().map(|c| c.signature().name.as_str()),
            )
            .field("children", &self.children)
            .finish()
    }
}

impl CommandNode {
    fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Find or create the node for `path`, stamping its recorded path.
    pub fn resolve(&mut self, path: &EndpointPath) -> &mut CommandNode {
        if path.is_empty() {
            return self;
        }

        let mut node = self;
        for segment in path.segments() {
            let children = node.children.get_or_insert_with(Vec::new);
            let idx = match children.iter().position(|c| &c.name == segment) {
                Some(idx) => idx,
                None => {
                    tracing::trace!(segment = %segment, "creating command node");
                    children.push(CommandNode::named(segment));
                    children.len() - 1
                }
            };
            node = &mut children[idx];
        }
        node.path = path.segments().to_vec();
        node
    }

    /// Read-only lookup; never creates nodes.
    pub fn find(&self, path: &EndpointPath) -> Option<&CommandNode> {
        path.segments()
            .iter()
            .try_fold(self, |node, segment| node.child(segment))
    }

    pub fn child(&self, name: &str) -> Option<&CommandNode> {
        self.children()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    pub fn children(&self) -> impl Iterator<Item = &CommandNode> {
        self.children.iter().flatten()
    }

    /// Whether a child table has been created (even if empty).
    pub fn has_child_table(&self) -> bool {
        self.children.is_some()
    }

    pub fn callable(&self) -> Option<&dyn Endpoint> {
        self.callable.as_deref()
    }

    pub fn bind(&mut self, endpoint: Box<dyn Endpoint>) {
        self.callable = Some(endpoint);
    }

    /// Render this node and its subtree as a clap command.
    pub fn to_command(&self, name: impl Into<String>) -> Command {
        let mut cmd = Command::new(name.into());
        if let Some(about) = &self.description {
            cmd = cmd.about(about.clone());
        }
        for spec in &self.args {
            cmd = cmd.arg(spec.to_arg());
        }
        for child in self.children() {
            cmd = cmd.subcommand(child.to_command(child.name.clone()));
        }
        cmd
    }
}
