//! Odyssey - operator dashboard for the Odyssey ROV simulator
//!
//! The crate keeps one live telemetry snapshot in a [`store::TelemetryStore`],
//! fed by a WebSocket [`session::Session`], and derives everything an
//! operator sees from it in [`view`]. Commands flow back through the same
//! store to whichever session is open.
//!
//! # Modules
//!
//! - [`wire`] - Telemetry, command and mission log payloads
//! - [`store`] - Shared telemetry state with selector subscriptions
//! - [`session`] - WebSocket session lifecycle and command sink
//! - [`view`] - Pure projections of a snapshot into display values
//! - [`client`] / [`mission_log`] - One-shot HTTP endpoints
//! - [`config`] / [`logging`] - Ambient configuration and tracing setup
//! - [`cli`] - The `odyssey` command-line surfaces

pub mod cli;
pub mod client;
pub mod config;
pub mod logging;
pub mod mission_log;
pub mod session;
pub mod store;
pub mod view;
pub mod wire;
