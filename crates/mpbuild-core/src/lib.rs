//! # mpbuild-core
//!
//! Resolution and command-synthesis engine: turns a board/variant (or a
//! raw make invocation plus location context) into the literal container
//! command that builds it, and runs that command.
//!
//! Data flows leaf-first through:
//! - [`registry`]: port/variant to build container image.
//! - [`resolver`]: board/variant lookup against the catalog.
//! - [`location`]: port and make path inference for pass-through mode.
//! - [`invocation`]: the fully resolved build attempt.
//! - [`command`]: container command line synthesis.
//! - [`exec`]: synchronous execution and post-build reporting.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod command;
pub mod exec;
pub mod host;
pub mod invocation;
pub mod location;
pub mod panel;
pub mod registry;
pub mod resolver;
