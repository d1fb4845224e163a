/*!
doc.rs - `:param` doc comment parsing.

A doc comment is split into a leading free-text description and a list of
parameter records:

```text
List a directory.

:param str path: directory to list
    continuation lines join the previous record
:param all: include hidden entries
:rtype: list
```

Tag lines other than `:param` are ignored. Missing comments parse to an
empty record.
*/

use regex::Regex;
use std::sync::OnceLock;

/// One `:param [TYPE] NAME: DESCRIPTION` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamDoc {
    pub ty: Option<String>,
    pub name: String,
    pub description: Option<String>,
}

/// Parsed doc comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocRecord {
    pub description: String,
    pub params: Vec<ParamDoc>,
}

impl DocRecord {
    /// Exact-name lookup of a parameter record.
    pub fn param(&self, name: &str) -> Option<&ParamDoc> {
        self.params.iter().find(|p| p.name == name)
    }
}

fn param_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^:param\s+(?:(?P<type>[^:]+?)\s+)?(?P<name>[^:]+?):(?P<description>.+)?$")
            .expect("static :param pattern")
    })
}

fn parse_param_line(line: &str) -> Option<ParamDoc> {
    let caps = param_line().captures(line)?;
    let trimmed = |group: &str| {
        caps.name(group)
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| !s.is_empty())
    };
    Some(ParamDoc {
        ty: trimmed("type"),
        name: trimmed("name")?,
        description: trimmed("description"),
    })
}

/// Parse a doc comment into its description and `:param` records.
pub fn parse_docstring(doc: Option<&str>) -> DocRecord {
    let Some(doc) = doc else {
        return DocRecord::default();
    };

    let mut lines = doc.lines().map(str::trim).filter(|l| !l.is_empty()).peekable();

    let mut description = Vec::new();
    while let Some(line) = lines.next_if(|l| !l.starts_with(':')) {
        description.push(line);
    }

    let mut params: Vec<ParamDoc> = Vec::new();
    for line in lines {
        if !line.starts_with(':') {
            if let Some(last) = params.last_mut() {
                match last.description.as_mut() {
                    Some(d) => {
                        d.push('\n');
                        d.push_str(line);
                    }
                    None => last.description = Some(line.to_string()),
                }
            }
            continue;
        }
        if let Some(p) = parse_param_line(line) {
            params.push(p);
        }
    }

    DocRecord {
        description: description.join("\n"),
        params,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_doc_is_empty() {
        assert_eq!(parse_docstring(None), DocRecord::default());
        assert_eq!(parse_docstring(Some("")), DocRecord::default());
    }

    #[test]
    fn description_without_tags() {
        let rec = parse_docstring(Some("\n  First line.\n\n  Second line.\n"));
        assert_eq!(rec.description, "First line.\nSecond line.");
        assert!(rec.params.is_empty());
    }

    #[test]
    fn continuation_appends_to_last_param() {
        let rec = parse_docstring(Some(
            "Does things.\n:param int foo: does a thing\n    more text\n",
        ));
        assert_eq!(rec.description, "Does things.");
        assert_eq!(rec.params.len(), 1);
        let foo = rec.param("foo").unwrap();
        assert_eq!(foo.ty.as_deref(), Some("int"));
        assert_eq!(foo.description.as_deref(), Some("does a thing\nmore text"));
    }

    #[test]
    fn type_is_optional() {
        let rec = parse_docstring(Some(":param path: where to look"));
        let p = rec.param("path").unwrap();
        assert_eq!(p.ty, None);
        assert_eq!(p.description.as_deref(), Some("where to look"));
    }

    #[test]
    fn description_is_optional() {
        let rec = parse_docstring(Some(":param str name:\n  filled by continuation"));
        let p = rec.param("name").unwrap();
        assert_eq!(p.ty.as_deref(), Some("str"));
        assert_eq!(p.description.as_deref(), Some("filled by continuation"));
    }

    #[test]
    fn other_tags_are_ignored() {
        let rec = parse_docstring(Some(
            "Summary\n:param dict|Namespace args: raw args\n:rtype: dict\n:param b: second",
        ));
        let names: Vec<_> = rec.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["args", "b"]);
        assert_eq!(rec.params[0].ty.as_deref(), Some("dict|Namespace"));
        assert_eq!(rec.params[0].description.as_deref(), Some("raw args"));
    }

    #[test]
    fn text_after_tags_without_params_is_dropped() {
        let rec = parse_docstring(Some("Summary\n:rtype: str\nstray line"));
        assert_eq!(rec.description, "Summary");
        assert!(rec.params.is_empty());
    }
}
