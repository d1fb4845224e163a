//! `echo MESSAGE [--upper] [KEY=VALUE ...]`

use anyhow::Result;
use endpoint_cli::CallArgs;
use serde_json::{Map, Value};

pub fn echo(args: CallArgs) -> Result<Value> {
    let message = args.str(0, "message").unwrap_or_default();
    let message = if args.flag(1, "upper") {
        message.to_uppercase()
    } else {
        message.to_string()
    };

    let extras = args.string_keywords(&["message", "upper"]);
    if extras.is_empty() {
        return Ok(Value::String(message));
    }

    let mut out = Map::new();
    out.insert("message".into(), Value::String(message));
    for (k, v) in extras {
        out.insert(k, Value::String(v));
    }
    Ok(Value::Object(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_message() {
        let args = CallArgs {
            positional: vec![json!("hi"), json!(true)],
            ..Default::default()
        };
        assert_eq!(echo(args).unwrap(), json!("HI"));
    }

    #[test]
    fn extras_are_attached() {
        let mut args = CallArgs {
            positional: vec![json!("hi"), json!(false)],
            ..Default::default()
        };
        args.keywords.insert("color".into(), json!("red"));
        assert_eq!(echo(args).unwrap(), json!({"message": "hi", "color": "red"}));
    }
}
