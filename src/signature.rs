//! Declarative callable signatures.
//!
//! A [`Signature`] is the statically known parameter list of an endpoint plus
//! its doc comment. It can be built in code or decoded from an endpoint
//! manifest:
//!
//! ```yaml
//! list.dir:
//!   name: dir
//!   qualname: List.dir
//!   doc: |
//!     List a directory.
//!     :param str path: directory to list
//!   params:
//!     - name: path
//!       default: "."
//!     - name: all
//!       default: false
//! ```
//!
//! In manifests a `null` default reads as "no default"; use
//! [`Param::optional`] with `Value::Null` for a real null default.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::Result;

/// Parameter names bound implicitly to the receiver; never exposed.
pub const RECEIVER_NAMES: &[&str] = &["self", "cls"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variadic {
    /// Collects any number of extra positional values (`*args`).
    Positional,
    /// Collects any number of extra `key=value` pairs (`**kwargs`).
    Keyword,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variadic: Option<Variadic>,
}

impl Param {
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
            variadic: None,
        }
    }

    pub fn optional(name: impl Into<String>, default: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            default: Some(default.into()),
            variadic: None,
        }
    }

    pub fn var_positional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
            variadic: Some(Variadic::Positional),
        }
    }

    pub fn var_keyword(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
            variadic: Some(Variadic::Keyword),
        }
    }

    pub fn is_receiver(&self) -> bool {
        RECEIVER_NAMES.contains(&self.name.as_str())
    }

    pub fn is_variadic(&self) -> bool {
        self.variadic.is_some()
    }
}

/// Parameter list and documentation of one callable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Signature {
    pub name: String,
    /// Dotted owner chain (`Foo._Bar.baz`) used for automatic paths.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    #[serde(default)]
    pub params: Vec<Param>,
}

impl Signature {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn qualname(mut self, qualname: impl Into<String>) -> Self {
        self.qualname = Some(qualname.into());
        self
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    /// Parameters that can be filled by position or name, in declared order.
    pub fn bindable(&self) -> impl Iterator<Item = &Param> {
        self.params
            .iter()
            .filter(|p| !p.is_receiver() && !p.is_variadic())
    }

    /// The `**kwargs`-style parameter, if declared.
    pub fn var_keyword(&self) -> Option<&Param> {
        self.params
            .iter()
            .find(|p| p.variadic == Some(Variadic::Keyword))
    }
}

/// Endpoint path -> signature, in path order.
pub type Manifest = BTreeMap<String, Signature>;

pub fn load_manifest_yaml(raw: &str) -> Result<Manifest> {
    Ok(serde_yaml::from_str(raw)?)
}

pub fn load_manifest_json(raw: &str) -> Result<Manifest> {
    Ok(serde_json::from_str(raw)?)
}
