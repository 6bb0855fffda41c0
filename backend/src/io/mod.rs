//! # IO Module
//!
//! Adapter layer between presentation clients and the domain. Currently a
//! REST API only.

pub mod rest;

pub use rest::todo_apis::*;
