//! Core library for the ExtraTaff staffing marketplace.
//!
//! The crate hosts the mission-talent matching engine, the hiring
//! application state machine with its rating sub-flow, and the service
//! plumbing (config, telemetry, HTTP router) shared by the API binary.

pub mod config;
pub mod error;
pub mod staffing;
pub mod telemetry;
