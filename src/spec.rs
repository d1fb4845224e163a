/*!
spec.rs - signature -> argument specification translation.

Each declared parameter becomes one [`ArgSpec`]:

  - no default        -> required positional
  - default (bool)    -> zero-arg toggle that flips the default
  - default (other)   -> `--name` option carrying the default
  - `**kwargs`        -> trailing optional positional of KEY=VALUE tokens
  - `*args`, receiver -> not exposed

Help text comes from the doc comment's `:param` records, falling back to the
parameter name. [`ArgOverrides`] are applied last.
*/

use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches};
use serde_json::Value;
use std::collections::HashMap;

use crate::doc::{DocRecord, parse_docstring};
use crate::signature::{Param, Signature, Variadic};
use crate::tree::CommandNode;

/// Help shown for the variadic keyword bucket, whatever the docs say.
pub const KWARGS_HELP: &str = "Optional keyword arguments. Specify them as key=value";

#[derive(Debug, Clone, PartialEq)]
pub enum ArgKind {
    Positional,
    Option { default: Value },
    Toggle { default: bool },
    KeyValues,
}

impl ArgKind {
    fn from_default(default: Value) -> Self {
        match default {
            Value::Bool(b) => ArgKind::Toggle { default: b },
            other => ArgKind::Option { default: other },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArgSpec {
    pub id: String,
    pub help: String,
    pub kind: ArgKind,
    pub value_name: Option<String>,
    pub short: Option<char>,
}

/// Caller-supplied adjustments for a single parameter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArgOverride {
    pub help: Option<String>,
    pub default: Option<Value>,
    pub value_name: Option<String>,
    pub short: Option<char>,
}

impl ArgOverride {
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn default_value(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn value_name(mut self, name: impl Into<String>) -> Self {
        self.value_name = Some(name.into());
        self
    }

    pub fn short(mut self, c: char) -> Self {
        self.short = Some(c);
        self
    }
}

/// Parameter name -> override.
pub type ArgOverrides = HashMap<String, ArgOverride>;

fn base_spec(param: &Param, doc: &DocRecord) -> Option<ArgSpec> {
    if param.is_receiver() {
        return None;
    }

    let mut help = doc
        .param(&param.name)
        .and_then(|d| d.description.clone())
        .unwrap_or_else(|| param.name.clone());

    let kind = match (param.variadic, &param.default) {
        (Some(Variadic::Positional), _) => return None,
        (Some(Variadic::Keyword), _) => {
            help = KWARGS_HELP.to_string();
            ArgKind::KeyValues
        }
        (None, Some(default)) => ArgKind::from_default(default.clone()),
        (None, None) => ArgKind::Positional,
    };

    Some(ArgSpec {
        id: param.name.clone(),
        help,
        kind,
        value_name: None,
        short: None,
    })
}

fn apply_override(spec: &mut ArgSpec, ov: &ArgOverride) {
    if let Some(help) = &ov.help {
        spec.help = help.clone();
    }
    if let Some(default) = &ov.default
        && spec.kind != ArgKind::KeyValues
    {
        spec.kind = ArgKind::from_default(default.clone());
    }
    if ov.value_name.is_some() {
        spec.value_name = ov.value_name.clone();
    }
    if ov.short.is_some() {
        spec.short = ov.short;
    }
}

/// Derive the argument specs of a signature, in declaration order.
pub fn derive_specs(
    signature: &Signature,
    doc: &DocRecord,
    overrides: Option<&ArgOverrides>,
) -> Vec<ArgSpec> {
    let mut specs: Vec<ArgSpec> = signature
        .params
        .iter()
        .filter_map(|p| base_spec(p, doc))
        .collect();

    if let Some(overrides) = overrides {
        for (name, ov) in overrides {
            match specs.iter_mut().find(|s| &s.id == name) {
                Some(spec) => apply_override(spec, ov),
                None => tracing::debug!(
                    endpoint = %signature.name,
                    param = %name,
                    "override names no exposed parameter; ignored"
                ),
            }
        }
    }
    specs
}

/// Configure `node` from a signature: description plus one spec per parameter.
pub fn autospec(node: &mut CommandNode, signature: &Signature, overrides: Option<&ArgOverrides>) {
    let doc = parse_docstring(signature.doc.as_deref());
    node.args = derive_specs(signature, &doc, overrides);
    node.description = Some(doc.description).filter(|d| !d.is_empty());
    tracing::debug!(
        endpoint = %signature.name,
        args = node.args.len(),
        "derived argument specs"
    );
}

fn render_default(default: &Value) -> Option<String> {
    match default {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

impl ArgSpec {
    pub fn is_flag_style(&self) -> bool {
        matches!(self.kind, ArgKind::Option { .. } | ArgKind::Toggle { .. })
    }

    /// Render as a clap argument.
    pub fn to_arg(&self) -> Arg {
        let mut arg = Arg::new(self.id.clone()).help(self.help.clone());
        arg = match &self.kind {
            ArgKind::Positional => arg.required(true).action(ArgAction::Set),
            ArgKind::Option { default } => {
                let arg = arg.long(self.id.clone()).action(ArgAction::Set);
                match render_default(default) {
                    Some(shown) => arg.default_value(shown),
                    None => arg,
                }
            }
            ArgKind::Toggle { default: true } => {
                arg.long(self.id.clone()).action(ArgAction::SetFalse)
            }
            ArgKind::Toggle { default: false } => {
                arg.long(self.id.clone()).action(ArgAction::SetTrue)
            }
            ArgKind::KeyValues => arg
                .required(false)
                .num_args(1..)
                .action(ArgAction::Append)
                .value_name("KEY=VALUE"),
        };
        if let Some(name) = &self.value_name {
            arg = arg.value_name(name.clone());
        }
        if let Some(c) = self.short
            && self.is_flag_style()
        {
            arg = arg.short(c);
        }
        arg
    }

    /// Read this argument's value back out of clap matches.
    pub fn read(&self, matches: &ArgMatches) -> Value {
        match &self.kind {
            ArgKind::Positional => matches
                .get_one::<String>(&self.id)
                .cloned()
                .map(Value::String)
                .unwrap_or(Value::Null),
            ArgKind::Option { default } => {
                let given = matches!(
                    matches.value_source(&self.id),
                    Some(src) if src != ValueSource::DefaultValue
                );
                if given {
                    matches
                        .get_one::<String>(&self.id)
                        .cloned()
                        .map(Value::String)
                        .unwrap_or_else(|| default.clone())
                } else {
                    default.clone()
                }
            }
            ArgKind::Toggle { .. } => Value::Bool(matches.get_flag(&self.id)),
            ArgKind::KeyValues => Value::Array(
                matches
                    .get_many::<String>(&self.id)
                    .map(|vals| vals.cloned().map(Value::String).collect())
                    .unwrap_or_default(),
            ),
        }
    }
}
