//! Callables that can be bound to tree nodes.

use anyhow::Result;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::signature::Signature;

/// A callable with a declared signature.
pub trait Endpoint {
    fn signature(&self) -> &Signature;

    fn call(&self, args: CallArgs) -> Result<Value>;
}

/// Arguments rebuilt for one call: declared parameters by position, the rest
/// by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArgs {
    pub positional: Vec<Value>,
    pub keywords: Map<String, Value>,
}

impl CallArgs {
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keywords.is_empty()
    }

    /// Value of a declared parameter, by position first, then by name.
    pub fn get(&self, index: usize, name: &str) -> Option<&Value> {
        self.positional.get(index).or_else(|| self.keywords.get(name))
    }

    pub fn str(&self, index: usize, name: &str) -> Option<&str> {
        self.get(index, name).and_then(Value::as_str)
    }

    /// Toggle value; absent or non-boolean reads as `false`.
    pub fn flag(&self, index: usize, name: &str) -> bool {
        self.get(index, name)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Keyword arguments rendered as plain strings, minus `declared` names.
    pub fn string_keywords(&self, declared: &[&str]) -> BTreeMap<String, String> {
        self.keywords
            .iter()
            .filter(|(k, _)| !declared.contains(&k.as_str()))
            .map(|(k, v)| {
                let s = match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (k.clone(), s)
            })
            .collect()
    }
}

/// An [`Endpoint`] backed by a closure or fn pointer.
pub struct FnEndpoint<F> {
    signature: Signature,
    handler: F,
}

impl<F> FnEndpoint<F>
where
    F: Fn(CallArgs) -> Result<Value>,
{
    pub fn new(signature: Signature, handler: F) -> Self {
        Self { signature, handler }
    }
}

impl<F> Endpoint for FnEndpoint<F>
where
    F: Fn(CallArgs) -> Result<Value>,
{
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn call(&self, args: CallArgs) -> Result<Value> {
        (self.handler)(args)
    }
}

/// Shorthand for [`FnEndpoint::new`].
pub fn endpoint<F>(signature: Signature, handler: F) -> FnEndpoint<F>
where
    F: Fn(CallArgs) -> Result<Value>,
{
    FnEndpoint::new(signature, handler)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accessors_fall_back_to_keywords() {
        let mut args = CallArgs {
            positional: vec![json!("a")],
            keywords: Map::new(),
        };
        args.keywords.insert("verbose".into(), json!(true));
        args.keywords.insert("color".into(), json!("red"));
        args.keywords.insert("n".into(), json!(3));

        assert_eq!(args.str(0, "name"), Some("a"));
        assert!(args.flag(1, "verbose"));
        assert!(!args.flag(2, "missing"));

        let extras = args.string_keywords(&["verbose"]);
        assert_eq!(extras.len(), 2);
        assert_eq!(extras["color"], "red");
        assert_eq!(extras["n"], "3");
    }

    #[test]
    fn fn_endpoint_forwards_result() {
        let ep = endpoint(Signature::new("len"), |args: CallArgs| {
            Ok(json!(args.positional.len()))
        });
        assert_eq!(ep.signature().name, "len");
        let out = ep
            .call(CallArgs {
                positional: vec![json!(1), json!(2)],
                keywords: Map::new(),
            })
            .unwrap();
        assert_eq!(out, json!(2));
    }
}
