/*!
format.rs - rendering endpoint results for the terminal.

  --json  -> pretty JSON, never colored
  default -> strings verbatim, arrays one item per line, objects as
             `key: value` lines, null prints nothing

Color follows NO_COLOR and is off when stdout is not a terminal.
*/

use serde_json::Value;

#[derive(Debug, Clone)]
pub struct StyleOptions {
    pub use_color: bool,
}

impl StyleOptions {
    pub fn detect() -> Self {
        StyleOptions {
            use_color: std::env::var_os("NO_COLOR").is_none(),
        }
    }

    pub fn plain() -> Self {
        StyleOptions { use_color: false }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Role {
    Key,
    Dim,
}

pub fn color(role: Role, text: impl AsRef<str>, style: &StyleOptions) -> String {
    if !style.use_color {
        return text.as_ref().to_string();
    }
    let code = match role {
        Role::Key => "38;5;45",
        Role::Dim => "2",
    };
    format!("\x1b[{code}m{}\x1b[0m", text.as_ref())
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Render a result; `None` means nothing should be printed.
pub fn render(value: &Value, json: bool, style: &StyleOptions) -> Option<String> {
    if json {
        return Some(serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()));
    }
    match value {
        Value::Null => None,
        Value::Array(items) => Some(items.iter().map(scalar).collect::<Vec<_>>().join("\n")),
        Value::Object(map) => Some(
            map.iter()
                .map(|(k, v)| {
                    let shown = match v {
                        Value::Object(_) | Value::Array(_) => color(Role::Dim, v.to_string(), style),
                        other => scalar(other),
                    };
                    format!("{}: {shown}", color(Role::Key, k, style))
                })
                .collect::<Vec<_>>()
                .join("\n"),
        ),
        other => Some(scalar(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_rendering() {
        let style = StyleOptions::plain();
        assert_eq!(render(&Value::Null, false, &style), None);
        assert_eq!(render(&json!("hi"), false, &style).as_deref(), Some("hi"));
        assert_eq!(render(&json!(["a", 1]), false, &style).as_deref(), Some("a\n1"));
        assert_eq!(
            render(&json!({"a": "x", "b": {"c": 1}}), false, &style).as_deref(),
            Some("a: x\nb: {\"c\":1}")
        );
    }

    #[test]
    fn json_rendering_ignores_color() {
        let style = StyleOptions { use_color: true };
        let out = render(&json!({"a": 1}), true, &style).unwrap();
        assert_eq!(out, "{\n  \"a\": 1\n}");
        assert_eq!(color(Role::Dim, "x", &StyleOptions::plain()), "x");
    }
}
