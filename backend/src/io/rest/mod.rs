//! # REST API Interface Layer
//!
//! HTTP endpoints exposing the todo service to presentation clients.
//! Handlers translate requests into service calls and [`AppError`]s into
//! status codes with a `{ title, message }` body.
//!
//! [`AppError`]: crate::domain::errors::AppError

pub mod mappers;
pub mod todo_apis;
