//! Runtime configuration, loaded from the environment the way the teacher's
//! `tinyzkp_api` binary reads `TINYZKP_ADDR` and friends.

use std::net::SocketAddr;
use std::time::Duration;

use crate::DEFAULT_TRACE_LEN;

/// How an `Unknown` backend verdict (solver interrupted or inconclusive)
/// should be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownPolicy {
    /// Treat it like `Unsat`: report `passed`. The conservative default —
    /// an inconclusive search isn't evidence of a counterexample.
    Pass,
    /// Treat it like a backend error: fail the request with a 500.
    Fail,
}

impl UnknownPolicy {
    fn from_env_str(s: &str) -> Option<Self> {
        match s {
            "pass" => Some(UnknownPolicy::Pass),
            "fail" => Some(UnknownPolicy::Fail),
            _ => None,
        }
    }
}

/// Process-wide settings for the solver and its HTTP surface.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bounded trace length `K`. Must be at least 1; enforced by
    /// [`crate::validate`] against the config the request was solved under,
    /// not against the request body itself.
    pub trace_len: usize,
    /// Address the HTTP server binds to.
    pub addr: SocketAddr,
    /// Wall-clock budget for a single `solve()` call before the request is
    /// failed with a timeout.
    pub solver_timeout: Duration,
    /// What to report when the backend returns `Unknown`.
    pub unknown_policy: UnknownPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trace_len: DEFAULT_TRACE_LEN,
            addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            solver_timeout: Duration::from_secs(10),
            unknown_policy: if cfg!(feature = "fail-closed-unknown") {
                UnknownPolicy::Fail
            } else {
                UnknownPolicy::Pass
            },
        }
    }
}

impl Config {
    /// Builds a [`Config`] from the process environment, falling back to
    /// [`Config::default`] field-by-field for anything unset or unparsable.
    ///
    /// | Variable                        | Meaning                          |
    /// |----------------------------------|----------------------------------|
    /// | `PAGETRACE_TRACE_LEN`            | bounded trace length `K`         |
    /// | `PAGETRACE_ADDR`                 | HTTP bind address                |
    /// | `PAGETRACE_SOLVER_TIMEOUT_MS`    | per-request solver timeout       |
    /// | `PAGETRACE_UNKNOWN_POLICY`       | `pass` or `fail`                 |
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            trace_len: std::env::var("PAGETRACE_TRACE_LEN")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(default.trace_len),
            addr: std::env::var("PAGETRACE_ADDR")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(default.addr),
            solver_timeout: std::env::var("PAGETRACE_SOLVER_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(default.solver_timeout),
            unknown_policy: std::env::var("PAGETRACE_UNKNOWN_POLICY")
                .ok()
                .and_then(|s| UnknownPolicy::from_env_str(&s))
                .unwrap_or(default.unknown_policy),
        }
    }
}
