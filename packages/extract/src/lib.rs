#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Record extraction from film exhibition bulletins.
//!
//! Bulletin tables arrive as loosely structured text: no delimiters, no
//! fixed column widths, and titles with arbitrary internal whitespace. The
//! only dependable structure is the film registration code printed in every
//! row, so extraction works line by line:
//!
//! 1. [`classify`] keeps lines that start with a four-digit year
//! 2. [`split`] cuts the line around the registration code into a title
//!    zone and a metadata zone
//! 3. [`build`] derives a [`Record`](cinedata_bulletin_models::Record) from
//!    the two zones, or a [`SkipReason`](build::SkipReason)
//!
//! [`scan`] drives that pipeline over pages and documents, isolating
//! document-level failures, and [`cache`] memoizes whole batches by content
//! hash.

pub mod build;
pub mod cache;
pub mod classify;
pub mod config;
pub mod numeric;
pub mod progress;
pub mod scan;
pub mod split;

pub use build::{SkipReason, parse_line};
pub use config::{AnchorFormat, BulletinLayout, ConfigError, NumberFormat};
pub use scan::{DocumentReadError, ScanReport, ScanStats, ScanStatus, scan_documents};
