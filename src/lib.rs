//! The `todoforge` library crate.
//!
//! Contains the business logic for the to-do API: token-based session
//! management, the ownership-scoped todo repository, request/response
//! models, routing configuration and error handling. The binary in
//! `main.rs` assembles these into the running server.

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod repo;
pub mod response;
pub mod routes;
