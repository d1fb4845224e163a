/*!
dispatch.rs - from parsed arguments back to a call.

Flow:
  1. `collect`              clap matches -> ParsedArgs (path taken + raw values)
  2. `clear_internal_keys`  drop bookkeeping keys, expand the KEY=VALUE bucket
  3. `get_func_arguments`   declared params by position, extras by name
  4. `Endpoint::call`       result returned unchanged

Keys a signature does not declare are forwarded only when it declares a
`**kwargs`-style parameter; otherwise they are dropped (logged at debug).
The bucket is expanded once; a token whose key equals the bucket name is an
ordinary keyword afterwards.
*/

use anyhow::Result;
use clap::ArgMatches;
use serde_json::{Map, Value};

use crate::endpoint::{CallArgs, Endpoint};
use crate::error::EndpointError;
use crate::signature::Signature;
use crate::tree::{CommandNode, EndpointPath};

/// Bookkeeping keys that never reach a callable.
pub const INTERNAL_KEYS: &[&str] = &["__func__", "__endpoint__"];

/// Result of matching argv against the tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedArgs {
    /// Subcommand segments actually taken.
    pub path: EndpointPath,
    /// Endpoint marker of the node reached, if it was registered.
    pub endpoint: Option<EndpointPath>,
    pub values: Map<String, Value>,
}

/// Walk the subcommand chain of `matches` and read the reached node's args.
pub fn collect(root: &CommandNode, matches: &ArgMatches) -> ParsedArgs {
    let mut node = root;
    let mut current = matches;
    let mut taken = Vec::new();
    while let Some((name, sub)) = current.subcommand() {
        let Some(child) = node.child(name) else {
            break;
        };
        taken.push(name.to_string());
        node = child;
        current = sub;
    }

    let values = node
        .args
        .iter()
        .map(|spec| (spec.id.clone(), spec.read(current)))
        .collect();

    ParsedArgs {
        path: EndpointPath::from_segments(taken),
        endpoint: node.endpoint.clone(),
        values,
    }
}

fn split_token(token: &str) -> Result<(String, Value), EndpointError> {
    let (key, value) = token
        .split_once('=')
        .ok_or_else(|| EndpointError::MalformedKeyValue(token.to_string()))?;
    Ok((key.to_string(), Value::String(value.to_string())))
}

/// Merge a keyword bucket (`["k=v", ...]` or `{k: v}`) into `into`.
fn expand_bucket(bucket: Value, into: &mut Map<String, Value>) -> Result<(), EndpointError> {
    match bucket {
        Value::Null => {}
        Value::Object(entries) => into.extend(entries),
        Value::Array(items) => {
            for item in items {
                let (k, v) = match item {
                    Value::String(token) => split_token(&token)?,
                    other => split_token(&other.to_string())?,
                };
                into.insert(k, v);
            }
        }
        Value::String(token) => {
            let (k, v) = split_token(&token)?;
            into.insert(k, v);
        }
        other => return Err(EndpointError::MalformedKeyValue(other.to_string())),
    }
    Ok(())
}

/// Strip bookkeeping keys and flatten the `bucket` entry into the map.
/// Expanded entries overwrite keys already present. Without a bucket the
/// map keeps every other key as-is.
pub fn clear_internal_keys(
    mut values: Map<String, Value>,
    bucket: Option<&str>,
) -> Result<Map<String, Value>, EndpointError> {
    for key in INTERNAL_KEYS {
        values.remove(*key);
    }
    if let Some(items) = bucket.and_then(|b| values.remove(b)) {
        expand_bucket(items, &mut values)?;
    }
    Ok(values)
}

/// Rebuild call arguments for `signature` from a flat value map.
///
/// Declared parameters fill positions in order until the first one missing;
/// after that gap they are passed by name. An entry named after the
/// `**kwargs` parameter is treated as its bucket and expanded.
pub fn get_func_arguments(
    signature: &Signature,
    values: Map<String, Value>,
) -> Result<CallArgs, EndpointError> {
    bind_arguments(signature, values, true)
}

fn bind_arguments(
    signature: &Signature,
    mut values: Map<String, Value>,
    expand: bool,
) -> Result<CallArgs, EndpointError> {
    for key in INTERNAL_KEYS {
        values.remove(*key);
    }

    let mut args = CallArgs::default();
    let mut contiguous = true;
    for param in signature.bindable() {
        match values.remove(&param.name) {
            Some(v) if contiguous => args.positional.push(v),
            Some(v) => {
                args.keywords.insert(param.name.clone(), v);
            }
            None => contiguous = false,
        }
    }

    match signature.var_keyword() {
        Some(var) => {
            if expand && let Some(bucket) = values.remove(&var.name) {
                expand_bucket(bucket, &mut args.keywords)?;
            }
            args.keywords.extend(values);
        }
        None if !values.is_empty() => {
            let dropped: Vec<&String> = values.keys().collect();
            tracing::debug!(
                endpoint = %signature.name,
                ?dropped,
                "dropping arguments the endpoint does not declare"
            );
        }
        None => {}
    }
    Ok(args)
}

/// Clean `values` and call `endpoint`, returning its result unchanged.
pub fn invoke(endpoint: &dyn Endpoint, values: Map<String, Value>) -> Result<Value> {
    let signature = endpoint.signature();
    let bucket = signature.var_keyword().map(|p| p.name.as_str());
    let values = clear_internal_keys(values, bucket)?;
    let args = bind_arguments(signature, values, false)?;
    tracing::debug!(
        endpoint = %signature.name,
        positional = args.positional.len(),
        keywords = args.keywords.len(),
        "invoking endpoint"
    );
    endpoint.call(args)
}

/// Dispatch parsed arguments to the callable bound at `parsed.path`.
pub fn dispatch(root: &CommandNode, parsed: ParsedArgs) -> Result<Value> {
    let node = root
        .find(&parsed.path)
        .ok_or_else(|| EndpointError::UnknownPath(parsed.path.to_string()))?;
    let Some(endpoint) = node.callable() else {
        return Err(EndpointError::UnrecognizedEndpoint(parsed.path.to_string()).into());
    };
    invoke(endpoint, parsed.values)
}
