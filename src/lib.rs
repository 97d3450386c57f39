//! # wraith
#![allow(clippy::uninlined_format_args)]
//!
//! Fluent builder for CasperJS automation scripts.
//!
//! A [`Casper`] session accumulates browser-automation steps (navigate,
//! click, fill forms, capture screenshots, wait for conditions) as rendered
//! CasperJS fragments, runs the `casperjs` binary against the generated
//! script, and parses its output back into structured results: visited
//! URLs, the page title, and captured log lines.
//!
//! ## Usage
//!
//! ```no_run
//! use wraith::Casper;
//!
//! fn main() -> wraith::Result<()> {
//!     let mut casper = Casper::new();
//!     casper
//!         .start(Some("https://example.com"))
//!         .click("a.more")
//!         .wait(1)
//!         .echo_title();
//!     casper.run(false)?;
//!
//!     println!("landed on {:?}", casper.current_url());
//!     for line in casper.output() {
//!         println!("{}", line);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Methods with structural constraints on their arguments validate eagerly
//! and return [`Result`], before any script text is emitted:
//!
//! ```no_run
//! use serde_json::json;
//! use wraith::Casper;
//!
//! # fn main() -> wraith::Result<()> {
//! let mut casper = Casper::new();
//! casper.start(Some("https://example.com"));
//! casper.capture(
//!     "shot.png",
//!     Some(json!({"top": 0, "left": 0, "width": 1280, "height": 720})),
//!     None,
//! )?;
//! casper.run(false)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Provisioning
//!
//! The engine binaries are installed once, outside the runtime builder,
//! either through the `wraith install` CLI or [`provision::Provisioner`].
//! The builder only consumes the shared binary directory via `PATH`.

/// Fluent script builder, session state, and process runner
pub mod casper;

/// Crate error type
pub mod errors;

/// Engine output-line interpretation
pub mod output;

/// One-time engine download and installation
pub mod provision;

/// Script buffer and argument serialization
pub mod script;

/// Session enums and parsed-record types
pub mod types;

pub use casper::Casper;
pub use errors::{Result, WraithError};
pub use types::{Engine, LogLevel, NavigationRecord, OptionValue};
