//! Wire-format data types for `SolverRequest` / `SolverResponse` (spec §3, §6).
//!
//! These mirror the canonical JSON schema field-for-field so that
//! `serde_json` round-trips without custom (de)serialization code. Semantic
//! validation (declared-name checks, clause shape, transition shape) lives in
//! [`crate::validate`], not here — this module only fixes the shape.

use serde::{Deserialize, Serialize};

/// A pair `(name, polarity)`. True at a state iff the named variable equals
/// `assignment` in that state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Literal {
    pub name: String,
    pub assignment: bool,
}

impl Literal {
    pub fn new(name: impl Into<String>, assignment: bool) -> Self {
        Self { name: name.into(), assignment }
    }
}

/// A nonempty disjunction of literals. Serialized as a bare JSON array of
/// [`Literal`], matching the request schema's `[[{"name":...,"assignment":...}, …], …]` shape.
pub type Clause = Vec<Literal>;

/// An ordered conjunction of [`Clause`]s. An empty `Cnf` is vacuously true.
pub type Cnf = Vec<Clause>;

/// A single-variable transition rule: `name` is a declared state variable,
/// `assignments` is its endpoint set (`1..=2` values drawn from `{true,false}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub name: String,
    pub assignments: Vec<bool>,
}

/// A declarative case of the rendering function: a condition over state
/// variables, the observables implied when that condition holds, and the
/// transitions enabled there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub conditions: Cnf,
    pub implications: Vec<Literal>,
    pub transitions: Vec<Transition>,
}

/// The unsafe property: satisfiability of `cnf` (a CNF over PBT variables),
/// together with the rendering implications, constitutes a test failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PbtAssertion {
    pub name: String,
    pub cnf: Cnf,
}

/// The incoming request body for `POST /solve/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverRequest {
    pub state_variables: Vec<String>,
    pub pbt_variables: Vec<String>,
    pub branches: Vec<Branch>,
    pub preconditionals: Cnf,
    pub pbt_assertion: PbtAssertion,
}

/// One symbolic state's concrete assignment, in declared `state_variables` order.
pub type StateAssignment = Vec<Literal>;

/// The response body for `POST /solve/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverResponse {
    pub result: Verdict,
    pub states: Vec<StateAssignment>,
    pub violated_pbt: String,
}

impl SolverResponse {
    /// The canonical `passed` response: empty trace, empty assertion name.
    pub fn passed() -> Self {
        Self { result: Verdict::Passed, states: Vec::new(), violated_pbt: String::new() }
    }

    /// A `failed` response carrying the witnessing trace and assertion name.
    pub fn failed(states: Vec<StateAssignment>, violated_pbt: String) -> Self {
        Self { result: Verdict::Failed, states, violated_pbt }
    }
}

/// The verdict of a solve: whether a counterexample trace within `K` steps exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Passed,
    Failed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_json_round_trip() {
        let lit = Literal::new("isLoading", false);
        let json = serde_json::to_string(&lit).unwrap();
        let back: Literal = serde_json::from_str(&json).unwrap();
        assert_eq!(lit, back);
    }

    #[test]
    fn verdict_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Verdict::Passed).unwrap(), "\"passed\"");
        assert_eq!(serde_json::to_string(&Verdict::Failed).unwrap(), "\"failed\"");
    }

    #[test]
    fn passed_response_has_empty_shape() {
        let r = SolverResponse::passed();
        assert_eq!(r.result, Verdict::Passed);
        assert!(r.states.is_empty());
        assert_eq!(r.violated_pbt, "");
    }

    #[test]
    fn request_schema_round_trips_from_canonical_json() {
        let raw = r#"{
            "state_variables": ["x"],
            "pbt_variables": ["y"],
            "branches": [
                {"conditions": [[{"name":"x","assignment":true}]],
                 "implications": [{"name":"y","assignment":true}],
                 "transitions": [{"name":"x","assignments":[true,false]}]}
            ],
            "preconditionals": [[{"name":"x","assignment":false}]],
            "pbt_assertion": {"name":"y_true","cnf":[[{"name":"y","assignment":true}]]}
        }"#;
        let req: SolverRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(req.state_variables, vec!["x".to_string()]);
        assert_eq!(req.branches.len(), 1);
        assert_eq!(req.branches[0].transitions[0].assignments, vec![true, false]);
    }
}
