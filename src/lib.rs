//! apidoc: API reference extraction and documentation checks for shell
//! libraries.
//!
//! - **extract**: scan `[function] name()` definitions and the `#` comments
//!   above them, render one markdown reference ([`reference::Assembler`])
//! - **enhance**: insert an introduction ahead of the table of contents
//!   ([`enhance`])
//! - **check links**: validate every inline link in a docs tree
//!   ([`links::LinkChecker`])
//! - **validate**: structural completeness of API docs
//!   ([`structure::StructureValidator`])

pub mod config;
pub mod console;
pub mod enhance;
pub mod error;
pub mod links;
pub mod logging;
pub mod markdown;
pub mod model;
pub mod parser;
pub mod reference;
pub mod render;
pub mod report;
pub mod structure;
pub mod toc;

pub use error::{Error, Result};
pub use model::{DefinitionEntry, DocFragment, Finding, Link, LinkKind, Severity, SourceModule};
pub use report::{Report, Sink};
