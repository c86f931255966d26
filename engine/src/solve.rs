use std::collections::BTreeSet;

use clingo::{Control, Part, SolveMode, SolveResult};
use muse_core::{Error, Literal, LiteralSymbolMap, Result, Symbol};

/// Result of solving a grounded program under a set of assumption literals.
pub enum SolveOutcome {
    Sat,
    /// The unsat core clingo returned, restricted to the given assumptions.
    Unsat(BTreeSet<Literal>),
}

/// A grounded `clingo::Control` plus the `literal ↔ symbol` map built once
/// from its symbolic atoms right after grounding, per the data model's
/// "built once per grounded control" invariant.
///
/// Every solve happens under a scoped handle (`begin_solve … end_solve`
/// semantics): the handle is opened, the verdict is read, and it is closed
/// before this method returns, so no solver iterator outlives a single
/// solve step.
pub struct GroundedProgram {
    control: Control,
    literal_map: LiteralSymbolMap,
}

impl GroundedProgram {
    /// Grounds `program_text` under the `base` part, optionally passing
    /// `#const` bindings collected by the preprocessor as `-c` arguments.
    pub fn ground(program_text: &str, const_bindings: &[(String, String)]) -> Result<Self> {
        let args: Vec<String> = const_bindings
            .iter()
            .map(|(name, value)| format!("-c{name}={value}"))
            .collect();
        let mut control = Control::new(args).map_err(Error::from)?;
        control.add("base", &[], program_text).map_err(Error::from)?;
        control
            .ground(&[Part::new("base", vec![]).map_err(Error::from)?])
            .map_err(Error::from)?;
        let literal_map = build_literal_map(&mut control)?;
        Ok(GroundedProgram { control, literal_map })
    }

    pub fn literal_map(&self) -> &LiteralSymbolMap {
        &self.literal_map
    }

    pub fn control_mut(&mut self) -> &mut Control {
        &mut self.control
    }

    /// Solves under `assumptions`, returning the unsat core (restricted to
    /// `assumptions`) when the result is UNSAT.
    pub fn solve_under(&mut self, assumptions: &[Literal]) -> Result<SolveOutcome> {
        let clingo_assumptions: Vec<clingo::Literal> = assumptions.iter().map(Literal::as_clingo).collect();
        let mut handle = self
            .control
            .solve(SolveMode::empty(), &clingo_assumptions)
            .map_err(Error::from)?;
        let result = handle.get().map_err(Error::from)?;
        let outcome = if result.contains(SolveResult::UNSATISFIABLE) {
            let core = handle.core().map_err(Error::from)?;
            SolveOutcome::Unsat(core.iter().map(|&l| Literal::from_clingo(l)).collect())
        } else if result.contains(SolveResult::SATISFIABLE) {
            SolveOutcome::Sat
        } else {
            handle.close().map_err(Error::from)?;
            return Err(Error::SolverError("solve returned neither SAT nor UNSAT".to_string()));
        };
        handle.close().map_err(Error::from)?;
        Ok(outcome)
    }
}

fn build_literal_map(control: &mut Control) -> Result<LiteralSymbolMap> {
    let mut map = LiteralSymbolMap::new();
    let atoms = control.symbolic_atoms().map_err(Error::from)?;
    for atom in atoms.iter().map_err(Error::from)? {
        let symbol = Symbol::from_clingo(atom.symbol().map_err(Error::from)?);
        let literal = Literal::from_clingo(atom.literal().map_err(Error::from)?);
        map.insert(symbol, literal);
    }
    Ok(map)
}
