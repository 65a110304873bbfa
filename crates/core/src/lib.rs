//! Domain logic for the dinosaur service.
//!
//! Everything in this crate is pure: payload validation, path parameter
//! parsing and the column allow-list used to build updates. No I/O.

pub mod dinosaur;
pub mod error;
pub mod types;
