#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

//! Fill the variables of a Jinja-style template and render it.
//!
//! The pipeline lives in [`driver`]; the pieces it is built from are usable
//! on their own.

pub mod config;
pub mod context;
pub mod driver;
pub mod header;
pub mod session;
pub mod templates;
pub mod vars;
