/*!
endpoint-cli: build a subcommand tree from endpoint signatures.

Each endpoint declares a [`Signature`] (parameter list + doc comment). The
parser turns every parameter into a clap argument, nests endpoints by path
(`list.dir` -> `list dir`) and rebuilds the call from the parsed input.

Layout:
  doc.rs        `:param` doc comment parsing
  signature.rs  declarative signatures + YAML/JSON manifests
  spec.rs       signature -> clap argument specs
  tree.rs       endpoint paths and the command node tree
  endpoint.rs   Endpoint trait, FnEndpoint, CallArgs
  dispatch.rs   parsed values -> positional/keyword call
  parser.rs     EndpointParser facade
  utils/        logging setup
*/

pub mod dispatch;
pub mod doc;
pub mod endpoint;
pub mod error;
pub mod parser;
pub mod signature;
pub mod spec;
pub mod tree;
pub mod utils;

pub use dispatch::{ParsedArgs, clear_internal_keys, get_func_arguments};
pub use doc::{DocRecord, ParamDoc, parse_docstring};
pub use endpoint::{CallArgs, Endpoint, FnEndpoint, endpoint};
pub use error::EndpointError;
pub use parser::EndpointParser;
pub use signature::{Manifest, Param, Signature, Variadic};
pub use spec::{ArgKind, ArgOverride, ArgOverrides, ArgSpec, autospec};
pub use tree::{CommandNode, EndpointPath, clear_qualname};
