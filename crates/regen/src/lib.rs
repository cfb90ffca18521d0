//! # httpgen Regen
//!
//! Writes one `.http` file per controller group and keeps what the user
//! changed since the last run.
//!
//! Fresh snippets decide which requests exist and how they are shaped. A
//! stored snippet with the same route key contributes its query values and,
//! for body-carrying methods, its body values through the JSON merge.
//!
//! ```
//! use httpgen_regen::{MemoryStore, Outcome, Regenerator};
//! use httpgen_descriptor::SnippetGroup;
//! use httpgen_snippet::{HttpMethod, Snippet};
//!
//! let mut store = MemoryStore::new();
//! store.insert("Order.http", "###\nGET /order?page=7\n\n\n");
//!
//! let group = SnippetGroup {
//!     name: "Order".to_string(),
//!     snippets: vec![Snippet::new(HttpMethod::Get, "/order?page=1&pageSize=25")],
//! };
//! let mut regen = Regenerator::new(store);
//! let report = regen.run(&[group]);
//!
//! assert_eq!(report.outcome("Order.http"), Some(&Outcome::Updated));
//! assert_eq!(
//!     regen.store().text("Order.http"),
//!     Some("###\nGET /order?page=7&pageSize=25\n\n\n")
//! );
//! ```

mod error;
mod orchestrator;
mod report;
mod scaffold;
mod store;

pub use error::{RegenError, Result};
pub use orchestrator::{reconcile, Regenerator};
pub use report::{Outcome, ReportEntry, RunReport};
pub use scaffold::{ScaffoldTemplates, ENV_FILE, PRIVATE_ENV_FILE, USER_ENV_FILE};
pub use store::{DirectoryStore, MemoryStore, SnippetStore};
