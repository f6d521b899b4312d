//! HTTP front end for the 2048 engine: one shared game behind a small JSON API.

pub mod app;
pub mod args;
pub mod config;
pub mod error;
pub mod routes;
pub mod session;
