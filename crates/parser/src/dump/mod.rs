//! Provider schema dumps
//!
//! Every dialect writes its schema with the host SDK's `schema.Schema` field
//! names, so one model covers them all. `terraform-plugin-sdk` v2 dropped
//! `PromoteSingle` and `Removed`; when a dump is read as `sdk-2` those fields
//! are cleared at load and report as unset.
//!
//! ## Format
//! ```json
//! {
//!   "Schema": { "region": { "Type": "TypeString", "Required": true } },
//!   "ResourcesMap": {
//!     "example_bucket": {
//!       "Schema": { "tags": { "Type": "TypeMap", "Elem": "TypeString" } },
//!       "Timeouts": { "Create": "20m" }
//!     }
//!   },
//!   "DataSourcesMap": {}
//! }
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use tfschema_extractor_parser::dump::DumpParser;
//!
//! let provider = DumpParser::from_file("aws.json", Dialect::Sdk)?.parse()?;
//! ```

mod adaptor;
mod parser;
mod types;

pub use adaptor::DumpProvider;
pub use parser::DumpParser;
pub use types::*;
