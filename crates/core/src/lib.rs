//! Domain types and workflows for LabSlot.
//!
//! This crate has no knowledge of HTTP or SQL. Storage is reached through the
//! traits in [`repositories`], which `labslot-db` implements.

pub mod accounts;
pub mod booking;
pub mod errors;
pub mod models;
pub mod repositories;
