//! Structured variable header embedded at the top of a template.
//!
//! The header is a template comment whose body is YAML:
//!
//! ```text
//! {#---
//! vars:
//!   host:
//!     desc: "Server hostname"
//!     required: true
//!   port:
//!     type: int
//!     default: 22
//! ---#}
//! ```
//!
//! Since the markers form a comment, the header never reaches rendered output.

pub mod parser;
pub mod types;

pub use parser::{HeaderParseError, extract, find_header_block, parse_header};
pub use types::{HeaderDoc, VarDecl};
