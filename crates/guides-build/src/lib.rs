//! Parallel parse-and-render of guide source trees.
//!
//! A [`Builder`] takes resolved [`guides_config::Config`], discovers every
//! source file, and for each one parses the markup with a fresh parser,
//! renders it through the configured format, and writes the result under
//! the output directory with the format's extension.
//!
//! Documents are processed on the rayon thread pool unless
//! `build.parallel` is off. What happens to a failing document follows
//! `build.on_error`.
//!
//! # Example
//!
//! ```no_run
//! use guides_build::Builder;
//! use guides_config::Config;
//!
//! let config = Config::load(None, None)?;
//! let report = Builder::new(&config).build()?;
//! println!("{} documents written", report.documents.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod builder;
mod discover;
mod error;

pub use builder::{BuildReport, Builder, BuiltDocument, SkippedDocument};
pub use discover::{SourceFile, discover_sources};
pub use error::BuildError;
