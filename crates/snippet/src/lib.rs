//! # httpgen Snippet
//!
//! In-memory model of `.http` request templates and the line-oriented text
//! codec that reads and writes them.
//!
//! ## Format
//!
//! ```text
//! ###
//! POST {{Api_HostAddress}}/order?dryRun=false
//! Accept: application/json
//! Content-Type: application/json
//!
//! {
//!   "id": 0
//! }
//!
//! ```
//!
//! ## Example
//!
//! ```rust
//! use httpgen_snippet::{parse, serialize, HttpMethod};
//!
//! let text = "###\nGET {{host}}/customer?guid=42\nAccept: application/json\n\n";
//! let snippets = parse(text);
//!
//! assert_eq!(snippets[0].method, HttpMethod::Get);
//! assert_eq!(snippets[0].path(), "{{host}}/customer");
//! assert_eq!(snippets[0].query["guid"], "42");
//! assert_eq!(parse(&serialize(&snippets)), snippets);
//! ```

mod error;
mod parser;
mod query;
mod serializer;
mod types;

pub use error::{Result, SnippetError};
pub use parser::{parse, parse_file, SNIPPET_MARKER};
pub use query::{build_query, parse_query, split_path};
pub use serializer::serialize;
pub use types::{HttpMethod, RouteKey, Snippet};
