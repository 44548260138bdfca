//! The trace encoder: owns the symbolic `K`-state trace and drives
//! [`crate::formula`] and [`crate::backend`] to decide a
//! [`crate::model::SolverRequest`] (spec §4.3).

use std::collections::HashMap;

use tracing::{debug, info};

use crate::backend::{BackendError, CadicalBackend, CheckResult, Sym};
use crate::config::{Config, UnknownPolicy};
use crate::error::ApiError;
use crate::formula;
use crate::model::{SolverRequest, SolverResponse};
use crate::shape;

/// A symbolic `K`-state execution: one fresh boolean variable per
/// `(state index, state variable)` pair, plus one fresh boolean variable per
/// PBT variable (trace-wide, not per-state — see [`formula::render`]).
pub struct Trace {
    k: usize,
    state_vars: Vec<String>,
    pbt_vars: Vec<String>,
    state_syms: Vec<HashMap<String, Sym>>,
    pbt_syms: HashMap<String, Sym>,
}

impl Trace {
    /// Mints every symbolic variable the trace will ever need, up front, in
    /// `backend`. Mirrors the teacher's `scheduler::Prover` pattern of doing
    /// all bookkeeping in one constructor rather than lazily.
    pub fn new(
        backend: &mut CadicalBackend,
        k: usize,
        state_vars: &[String],
        pbt_vars: &[String],
    ) -> Self {
        let state_syms = (0..k)
            .map(|i| {
                state_vars
                    .iter()
                    .map(|name| (name.clone(), backend.fresh_bool(&format!("state[{i}].{name}"))))
                    .collect()
            })
            .collect();
        let pbt_syms = pbt_vars
            .iter()
            .map(|name| (name.clone(), backend.fresh_bool(&format!("pbt.{name}"))))
            .collect();
        Self { k, state_vars: state_vars.to_vec(), pbt_vars: pbt_vars.to_vec(), state_syms, pbt_syms }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn state_vars(&self) -> &[String] {
        &self.state_vars
    }

    pub fn pbt_vars(&self) -> &[String] {
        &self.pbt_vars
    }

    /// The symbol standing for `name`'s truth value in state `i`.
    ///
    /// # Panics
    /// Panics if `i >= k()` or `name` was not a declared state variable —
    /// both are validated away before a `Trace` is ever constructed.
    pub fn state_sym(&self, i: usize, name: &str) -> Sym {
        *self
            .state_syms
            .get(i)
            .and_then(|m| m.get(name))
            .unwrap_or_else(|| panic!("state variable `{name}` at index {i} was never minted"))
    }

    /// The symbol standing for the trace-wide PBT variable `name`.
    ///
    /// # Panics
    /// Panics if `name` was not a declared PBT variable.
    pub fn pbt_sym(&self, name: &str) -> Sym {
        *self
            .pbt_syms
            .get(name)
            .unwrap_or_else(|| panic!("pbt variable `{name}` was never minted"))
    }
}

/// Decides `req` against trace length `cfg.trace_len`, returning the
/// verdict and, on failure, a witnessing counterexample trace.
///
/// Does not validate `req`'s shape — callers run [`crate::validate::validate`]
/// first, per the crate's "validation precedes symbolic work" invariant.
pub fn solve(req: &SolverRequest, cfg: &Config) -> Result<SolverResponse, ApiError> {
    let k = cfg.trace_len;
    crate::validate::validate_trace_len(k)?;
    debug!(k, branches = req.branches.len(), "encoding request");

    let mut backend = CadicalBackend::new();
    let trace = Trace::new(&mut backend, k, &req.state_variables, &req.pbt_variables);

    // Preconditionals hold at the start of the trace (index 0).
    backend.assert(&formula::cnf_at(&trace, 0, &req.preconditionals));

    // The step relation ties every consecutive pair of states together.
    for i in 0..k.saturating_sub(1) {
        backend.assert(&formula::step(&trace, i, &req.branches));
    }

    // The search objective: does the final state, once rendered, satisfy
    // the assertion we're trying to falsify?
    let last = k - 1;
    backend.assert(&formula::violates(&trace, last, &req.branches, &req.pbt_assertion));

    let result = backend.check();
    info!(?result, "solve complete");

    match result {
        CheckResult::Unsat => Ok(SolverResponse::passed()),
        CheckResult::Sat => {
            let states = shape::extract_states(&backend, &trace)?;
            Ok(SolverResponse::failed(states, req.pbt_assertion.name.clone()))
        }
        CheckResult::Unknown => match cfg.unknown_policy {
            UnknownPolicy::Pass => Ok(SolverResponse::passed()),
            UnknownPolicy::Fail => Err(ApiError::Backend(BackendError::NoModel)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Branch, Literal, PbtAssertion, Transition};

    fn cfg(k: usize) -> Config {
        Config { trace_len: k, ..Config::default() }
    }

    #[test]
    fn empty_specification_never_fails() {
        let req = SolverRequest {
            state_variables: vec!["x".into()],
            pbt_variables: vec!["y".into()],
            branches: vec![],
            preconditionals: vec![],
            pbt_assertion: PbtAssertion { name: "nothing".into(), cnf: vec![vec![Literal::new("y", true)]] },
        };
        // No branch ever implies `y`, so the assertion is unreachable regardless of K.
        let resp = solve(&req, &cfg(5)).unwrap();
        assert_eq!(resp.result, crate::model::Verdict::Passed);
    }

    #[test]
    fn single_step_toggle_is_found() {
        let req = SolverRequest {
            state_variables: vec!["dark_mode".into()],
            pbt_variables: vec!["shows_dark_bg".into()],
            branches: vec![Branch {
                conditions: vec![],
                implications: vec![Literal::new("shows_dark_bg", true)],
                transitions: vec![Transition { name: "dark_mode".into(), assignments: vec![true, false] }],
            }],
            preconditionals: vec![vec![Literal::new("dark_mode", false)]],
            pbt_assertion: PbtAssertion {
                name: "dark_bg_shown".into(),
                cnf: vec![vec![Literal::new("shows_dark_bg", true)]],
            },
        };
        let resp = solve(&req, &cfg(2)).unwrap();
        assert_eq!(resp.result, crate::model::Verdict::Failed);
        assert_eq!(resp.violated_pbt, "dark_bg_shown");
        assert_eq!(resp.states.len(), 2);
    }
}
