//! KeyKit Library
//!
//! Core of a software keyboard: faces made of rows of keys, a geometry
//! provider that maps points to keys, a multi-touch tracking engine that
//! turns touches into key activations and repeats, and a dispatcher that
//! applies keys to a text document under shift, caps lock and the
//! double-space period shortcut.
//!
//! [`controller::KeyboardController`] ties these together for a host; with
//! the `runtime` feature, [`runtime::run`] drives it from a tokio channel.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod controller;
pub mod dispatch;
pub mod models;
#[cfg(feature = "runtime")]
pub mod runtime;
pub mod services;
pub mod tracking;
