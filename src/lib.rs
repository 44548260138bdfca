//! Crate root: public surface and shared aliases for the bounded model checker.
//!
//! This module is the single canonical entry-point for downstream users of the
//! library. It re-exports the submodules that implement the design:
//!
//! - [`model`] — wire-format request/response types (`serde`-derived).
//! - [`backend`] — the propositional SAT decision procedure adapter.
//! - [`formula`] — pure formula constructors over a symbolic trace.
//! - [`trace`] — the trace encoder that ties `model`/`formula`/`backend` together.
//! - [`validate`] — structural request validation, run before any symbolic work.
//! - [`shape`] — extraction of a concrete counterexample trace from a SAT model.
//! - [`config`] — runtime configuration (trace length, timeouts, policy).
//! - [`error`] — the error taxonomy and its HTTP mapping.
//!
//! ## Invariants
//!
//! - **No shared state across requests.** Every [`trace::solve`] call builds a
//!   fresh [`backend::CadicalBackend`] and a fresh [`trace::Trace`]; nothing
//!   outlives the call.
//! - **Validation precedes symbolic work.** [`validate::validate`] rejects a
//!   malformed [`model::SolverRequest`] before a single Boolean variable is
//!   minted.
//! - **Determinism.** For a fixed `K`, encoding a given [`model::SolverRequest`]
//!   always asserts the same formula family in the same order; the verdict
//!   (`passed`/`failed`) is a function of the request and `K` alone.

#![deny(rust_2018_idioms)]

/// Runtime configuration (trace length `K`, bind address, timeouts, policy).
pub mod config;
/// Error taxonomy shared by validation, encoding, and the HTTP layer.
pub mod error;
/// Wire-format data types for the `SolverRequest` / `SolverResponse` schema.
pub mod model;
/// Propositional SAT backend adapter (`cadical`).
pub mod backend;
/// Pure formula constructors over a symbolic trace.
pub mod formula;
/// Trace encoder: owns the symbolic trace, drives `formula`, dispatches to `backend`.
pub mod trace;
/// Structural request validation (spec §4.4 / §7).
pub mod validate;
/// Response shaping from a satisfying model (spec §4.5).
pub mod shape;

pub use config::Config;
pub use error::{ApiError, ValidationError};
pub use model::{
    Branch, Clause, Cnf, Literal, PbtAssertion, SolverRequest, SolverResponse, Transition,
};
pub use trace::solve;

/// Default bounded-trace length `K`, used when [`Config`] does not override it.
pub const DEFAULT_TRACE_LEN: usize = 5;
