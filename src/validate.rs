//! Structural request validation (spec §4.4), run before any symbolic work.

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::model::{Cnf, SolverRequest};

/// `K` must be at least 1 — a zero-length trace has no final state for
/// [`crate::formula::violates`] to assert against. Checked separately from
/// [`validate`] since `K` lives in [`crate::config::Config`], not in the
/// request body.
pub fn validate_trace_len(k: usize) -> Result<(), ValidationError> {
    if k < 1 {
        Err(ValidationError::TraceTooShort(k))
    } else {
        Ok(())
    }
}

/// Rejects a [`SolverRequest`] that references undeclared names, declares a
/// name in both the state and PBT variable sets, contains an empty clause,
/// or declares a transition with a malformed endpoint set. An empty CNF
/// (including an empty `pbt_assertion.cnf`) is vacuously true, per the data
/// model, and is not itself a defect.
pub fn validate(req: &SolverRequest) -> Result<(), ValidationError> {
    let state_names: HashSet<&str> = req.state_variables.iter().map(String::as_str).collect();
    let pbt_names: HashSet<&str> = req.pbt_variables.iter().map(String::as_str).collect();

    if let Some(&dup) = state_names.intersection(&pbt_names).next() {
        return Err(ValidationError::DuplicateName(dup.to_string()));
    }

    for branch in &req.branches {
        check_cnf_against(&branch.conditions, &state_names)?;
        for lit in &branch.implications {
            if !pbt_names.contains(lit.name.as_str()) {
                return Err(ValidationError::UndeclaredName(lit.name.clone()));
            }
        }
        for transition in &branch.transitions {
            if !state_names.contains(transition.name.as_str()) {
                return Err(ValidationError::UndeclaredName(transition.name.clone()));
            }
            if transition.assignments.is_empty() {
                return Err(ValidationError::EmptyTransition { name: transition.name.clone() });
            }
            let distinct: HashSet<bool> = transition.assignments.iter().copied().collect();
            if distinct.len() != transition.assignments.len() || transition.assignments.len() > 2 {
                return Err(ValidationError::TooManyEndpoints {
                    name: transition.name.clone(),
                    count: transition.assignments.len(),
                });
            }
        }
    }

    check_cnf_against(&req.preconditionals, &state_names)?;
    check_cnf_against(&req.pbt_assertion.cnf, &pbt_names)?;

    Ok(())
}

/// Every clause in `cnf` is nonempty, and every literal names a variable in
/// `declared`.
fn check_cnf_against(cnf: &Cnf, declared: &HashSet<&str>) -> Result<(), ValidationError> {
    for (idx, clause) in cnf.iter().enumerate() {
        if clause.is_empty() {
            return Err(ValidationError::EmptyClause(idx));
        }
        for lit in clause {
            if !declared.contains(lit.name.as_str()) {
                return Err(ValidationError::UndeclaredName(lit.name.clone()));
            }
        }
    }
    Ok(())
}
