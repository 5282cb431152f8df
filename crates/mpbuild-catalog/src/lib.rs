//! # mpbuild-catalog
//!
//! Loads the board catalog of a MicroPython source tree into typed
//! [`Port`](board::Port), [`Board`](board::Board) and
//! [`Variant`](board::Variant) entities.
//!
//! - [`root`]: locating the source tree root from any directory inside it.
//! - [`database`]: scanning `ports/*/boards/*/board.json` into a queryable catalog.
//! - [`audit`]: checking that every board's photos exist and are small enough.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod audit;
pub mod board;
pub mod database;
pub mod root;

pub use board::{Board, Port, Variant};
pub use database::Database;
