//! SQLite persistence of converted song lists.

pub mod db;
pub mod error;
pub mod operations;
pub(crate) mod schema;
