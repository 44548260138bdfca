//! Pure formula constructors over a symbolic [`crate::trace::Trace`] (spec §4.2).
//!
//! Every function here is a pure tree-builder: given a trace's variable maps
//! and a piece of the request, it returns a [`crate::backend::Formula`].
//! Nothing in this module touches the backend directly — `trace::solve` is
//! the only caller that asserts anything.

use crate::backend::Formula;
use crate::model::{Branch, Cnf, Literal, PbtAssertion, Transition};
use crate::trace::Trace;

/// `lit` evaluated against state `i`: true iff the named state variable
/// equals `lit.assignment` in that state.
pub fn lit_at(trace: &Trace, i: usize, lit: &Literal) -> Formula {
    let sym = trace.state_sym(i, &lit.name);
    if lit.assignment {
        Formula::lit(sym)
    } else {
        Formula::not_lit(sym)
    }
}

/// A clause (disjunction of literals) evaluated against state `i`.
fn clause_at(trace: &Trace, i: usize, clause: &[Literal]) -> Formula {
    Formula::or(clause.iter().map(|l| lit_at(trace, i, l)).collect())
}

/// A CNF (conjunction of clauses) evaluated against state `i`. An empty CNF
/// is vacuously true.
pub fn cnf_at(trace: &Trace, i: usize, cnf: &Cnf) -> Formula {
    Formula::and(cnf.iter().map(|c| clause_at(trace, i, c)).collect())
}

/// `lit` evaluated against the trace-wide PBT variable it names. PBT
/// variables have no per-state copy: they describe what the final rendered
/// state looks like, set once by [`render`].
pub fn pbt_lit(trace: &Trace, lit: &Literal) -> Formula {
    let sym = trace.pbt_sym(&lit.name);
    if lit.assignment {
        Formula::lit(sym)
    } else {
        Formula::not_lit(sym)
    }
}

fn pbt_clause(trace: &Trace, clause: &[Literal]) -> Formula {
    Formula::or(clause.iter().map(|l| pbt_lit(trace, l)).collect())
}

/// A CNF over PBT variables, independent of any particular state index.
pub fn pbt_cnf(trace: &Trace, cnf: &Cnf) -> Formula {
    Formula::and(cnf.iter().map(|c| pbt_clause(trace, c)).collect())
}

/// `v` holds its value from state `i` to state `i + 1`.
fn frozen_var(trace: &Trace, i: usize, v: &str) -> Formula {
    let pre = Formula::lit(trace.state_sym(i, v));
    let post = Formula::lit(trace.state_sym(i + 1, v));
    Formula::eq(pre, post)
}

/// Every variable in `vars` holds its value from state `i` to state `i + 1`.
fn frozen<'a>(trace: &Trace, i: usize, vars: impl Iterator<Item = &'a String>) -> Formula {
    Formula::and(vars.map(|v| frozen_var(trace, i, v)).collect())
}

/// The next-state constraint `transition` imposes, given that its branch is
/// active at state `i`: either `t.name` stutters (keeps its state-`i` value),
/// or it jumps to one of `transition.assignments` at state `i + 1`.
pub fn transition_step(trace: &Trace, i: usize, transition: &Transition) -> Formula {
    let stutter = frozen_var(trace, i, &transition.name);
    let jump = Formula::or(
        transition
            .assignments
            .iter()
            .map(|&endpoint| {
                lit_at(
                    trace,
                    i + 1,
                    &Literal { name: transition.name.clone(), assignment: endpoint },
                )
            })
            .collect(),
    );
    Formula::or(vec![stutter, jump])
}

/// One branch's contribution to the `i -> i+1` step relation: if its
/// conditions hold at state `i`, every one of its transitions constrains
/// state `i + 1`, and every state variable the branch does not transition
/// holds its value (the `frozen` case, which is every state variable when
/// `branch.transitions` is empty — a terminal branch holds the whole state).
pub fn branch_step(trace: &Trace, i: usize, branch: &Branch) -> Formula {
    let guard = cnf_at(trace, i, &branch.conditions);
    let touched: std::collections::HashSet<&str> =
        branch.transitions.iter().map(|t| t.name.as_str()).collect();
    let untouched = trace.state_vars().iter().filter(|v| !touched.contains(v.as_str()));

    let mut content: Vec<Formula> =
        branch.transitions.iter().map(|t| transition_step(trace, i, t)).collect();
    content.push(frozen(trace, i, untouched));

    Formula::and(vec![guard, Formula::and(content)])
}

/// The full step relation from state `i` to state `i + 1`: some branch's
/// conditions hold at state `i` and that branch's step constraints are
/// satisfied. With no branches at all this is the empty disjunction —
/// `false` — so no `i -> i+1` step is ever possible.
pub fn step(trace: &Trace, i: usize, branches: &[Branch]) -> Formula {
    Formula::or(branches.iter().map(|b| branch_step(trace, i, b)).collect())
}

/// What the UI renders at state `i`: for every declared PBT variable, a
/// biconditional tying its truth value to the disjunction of guards of the
/// branches that assert it true at state `i`. A PBT variable no branch ever
/// implies true defaults to false — exactly the empty-disjunction case of
/// [`Formula::or`].
///
/// Deliberately asymmetric with [`step`]: PBT variables are not per-state,
/// so `render` is only ever meaningful — and only ever asserted by
/// `trace::solve` — at the final state of the trace. Calling it at an
/// intermediate index would silently overwrite the same PBT variables with a
/// different state's implications; don't generalize this to "render at
/// every index."
pub fn render(trace: &Trace, i: usize, branches: &[Branch]) -> Formula {
    Formula::and(
        trace
            .pbt_vars()
            .iter()
            .map(|var| {
                let activating_guards = branches
                    .iter()
                    .filter(|b| {
                        b.implications.iter().any(|lit| lit.name == *var && lit.assignment)
                    })
                    .map(|b| cnf_at(trace, i, &b.conditions))
                    .collect();
                Formula::eq(pbt_lit(trace, &Literal::new(var.clone(), true)), Formula::or(activating_guards))
            })
            .collect(),
    )
}

/// The search objective: the final state (index `i`, rendered via
/// [`render`]) satisfies `assertion`'s CNF. Satisfiability of this formula,
/// conjoined with the step relation and preconditionals, is exactly a
/// counterexample trace.
pub fn violates(trace: &Trace, i: usize, branches: &[Branch], assertion: &PbtAssertion) -> Formula {
    Formula::and(vec![render(trace, i, branches), pbt_cnf(trace, &assertion.cnf)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{CadicalBackend, CheckResult};
    use crate::model::SolverRequest;

    fn trivial_trace(k: usize) -> (CadicalBackend, Trace, SolverRequest) {
        let req = SolverRequest {
            state_variables: vec!["x".into()],
            pbt_variables: vec!["y".into()],
            branches: vec![],
            preconditionals: vec![],
            pbt_assertion: PbtAssertion { name: "always_ok".into(), cnf: vec![] },
        };
        let mut backend = CadicalBackend::new();
        let trace = Trace::new(&mut backend, k, &req.state_variables, &req.pbt_variables);
        (backend, trace, req)
    }

    #[test]
    fn lit_at_respects_polarity() {
        let (mut backend, trace, _req) = trivial_trace(1);
        let sym = trace.state_sym(0, "x");
        backend.assert(&Formula::not_lit(sym));
        let f = lit_at(&trace, 0, &Literal::new("x", false));
        backend.assert(&f);
        assert_eq!(backend.check(), CheckResult::Sat);
    }

    #[test]
    fn empty_cnf_at_is_vacuously_true() {
        let (mut backend, trace, _req) = trivial_trace(1);
        backend.assert(&cnf_at(&trace, 0, &vec![]));
        assert_eq!(backend.check(), CheckResult::Sat);
    }

    #[test]
    fn transition_step_permits_stutter() {
        let (mut backend, trace, _req) = trivial_trace(2);
        let t = Transition { name: "x".into(), assignments: vec![true] };
        backend.assert(&transition_step(&trace, 0, &t));
        backend.assert(&Formula::not_lit(trace.state_sym(0, "x")));
        backend.assert(&Formula::not_lit(trace.state_sym(1, "x")));
        assert_eq!(backend.check(), CheckResult::Sat);
    }

    #[test]
    fn transition_step_permits_jump_to_endpoint() {
        let (mut backend, trace, _req) = trivial_trace(2);
        let t = Transition { name: "x".into(), assignments: vec![true] };
        backend.assert(&transition_step(&trace, 0, &t));
        backend.assert(&Formula::not_lit(trace.state_sym(0, "x")));
        backend.assert(&Formula::lit(trace.state_sym(1, "x")));
        assert_eq!(backend.check(), CheckResult::Sat);
    }

    #[test]
    fn transition_step_rejects_jump_off_the_endpoint_set() {
        let (mut backend, trace, _req) = trivial_trace(2);
        let t = Transition { name: "x".into(), assignments: vec![true] };
        backend.assert(&transition_step(&trace, 0, &t));
        backend.assert(&Formula::lit(trace.state_sym(0, "x")));
        backend.assert(&Formula::not_lit(trace.state_sym(1, "x")));
        assert_eq!(backend.check(), CheckResult::Unsat);
    }

    #[test]
    fn step_with_no_branches_admits_no_transition() {
        let (mut backend, trace, _req) = trivial_trace(2);
        backend.assert(&step(&trace, 0, &[]));
        assert_eq!(backend.check(), CheckResult::Unsat);
    }
}
