//! Extracts a concrete counterexample trace from a satisfying model (spec §4.5).

use crate::backend::CadicalBackend;
use crate::error::ApiError;
use crate::model::{Literal, StateAssignment};
use crate::trace::Trace;

/// Reads every state variable's value out of `backend`'s last model, one
/// [`StateAssignment`] per trace index, in declared `state_variables` order.
pub fn extract_states(
    backend: &CadicalBackend,
    trace: &Trace,
) -> Result<Vec<StateAssignment>, ApiError> {
    (0..trace.k())
        .map(|i| {
            trace
                .state_vars()
                .iter()
                .map(|name| {
                    let sym = trace.state_sym(i, name);
                    let assignment = backend.model_value(sym)?;
                    Ok(Literal::new(name.clone(), assignment))
                })
                .collect::<Result<StateAssignment, ApiError>>()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Formula;

    #[test]
    fn extracts_one_assignment_per_state_per_variable() {
        let mut backend = CadicalBackend::new();
        let trace = Trace::new(&mut backend, 2, &["x".to_string()], &[]);
        backend.assert(&Formula::lit(trace.state_sym(0, "x")));
        backend.assert(&Formula::not_lit(trace.state_sym(1, "x")));
        assert_eq!(backend.check(), crate::backend::CheckResult::Sat);

        let states = extract_states(&backend, &trace).unwrap();
        assert_eq!(states.len(), 2);
        assert_eq!(states[0], vec![Literal::new("x", true)]);
        assert_eq!(states[1], vec![Literal::new("x", false)]);
    }
}
