use std::collections::BTreeSet;
use std::fmt::Write as _;

use clingo::{Control, Part, SolveMode, SolveResult};
use env_param::EnvParam;
use itertools::Itertools;
use muse_core::Literal;

use super::{Exploration, Explorer};

/// Whether the meta-program nudges the solver toward trying larger
/// candidates first, via a `#heuristic` directive on every indicator atom.
/// This only biases model order (which candidate is found first among
/// several admissible ones); it never changes which candidates exist, so
/// enumeration soundness and non-redundancy are unaffected either way.
static BIAS_TOWARD_LARGER_CANDIDATES: EnvParam<bool> = EnvParam::new("MUSE_ASP_ORACLE_BIAS_LARGER", "true");

/// Drives candidate proposal with a small meta-program over indicator atoms
/// `a(1)..a(n)`, one per universe literal, instead of enumerating subsets in
/// Rust.
///
/// Each call to [`next_candidate`](Explorer::next_candidate) grounds a fresh
/// `Control` from the accumulated program text and solves it once; no solve
/// handle is kept open between calls, so no solver iterator outlives a
/// single step. `add_sat`/`add_mus` append an integrity constraint that
/// blocks the relevant region of the search space on every future solve,
/// the textual analogue of `MapSolver::block_down`/`block_up`.
pub struct AspOracleExplorer {
    universe: Vec<Literal>,
    blocking_rules: String,
    sat_sets: Vec<BTreeSet<Literal>>,
    mus_sets: Vec<BTreeSet<Literal>>,
    exhausted: bool,
}

impl AspOracleExplorer {
    pub fn new(universe: impl IntoIterator<Item = Literal>) -> Self {
        AspOracleExplorer {
            universe: universe.into_iter().collect(),
            blocking_rules: String::new(),
            sat_sets: Vec::new(),
            mus_sets: Vec::new(),
            exhausted: false,
        }
    }

    fn index_of(&self, literal: Literal) -> usize {
        self.universe
            .iter()
            .position(|&u| u == literal)
            .expect("blocked subset must be drawn from this explorer's universe")
            + 1
    }

    fn meta_program(&self) -> String {
        let n = self.universe.len();
        let mut program = format!("universe(1..{n}).\n{{ a(I) : universe(I) }}.\n");
        if BIAS_TOWARD_LARGER_CANDIDATES.get() {
            program.push_str("#heuristic a(I) : universe(I). [1@1, true]\n");
        }
        program.push_str(&self.blocking_rules);
        program
    }

    fn decode(&self, symbol: clingo::Symbol) -> Option<Literal> {
        let args = symbol.arguments().ok()?;
        let index = args.first()?.number().ok()?;
        self.universe.get((index - 1) as usize).copied()
    }
}

impl Explorer for AspOracleExplorer {
    fn next_candidate(&mut self) -> Option<BTreeSet<Literal>> {
        if self.exhausted {
            return None;
        }
        let program = self.meta_program();
        let control_args = if BIAS_TOWARD_LARGER_CANDIDATES.get() {
            vec!["--heuristic=Domain".to_string()]
        } else {
            Vec::new()
        };
        let mut control = Control::new(control_args).ok()?;
        control.add("base", &[], &program).ok()?;
        control.ground(&[Part::new("base", vec![]).ok()?]).ok()?;

        let mut handle = control.solve(SolveMode::empty(), &[]).ok()?;
        let result = handle.get().ok()?;
        if !result.contains(SolveResult::SATISFIABLE) {
            let _ = handle.close();
            self.exhausted = true;
            return None;
        }
        let model = handle.model().ok().flatten()?;
        let atoms = model.symbols(clingo::ShowType::SHOWN).ok()?;
        let candidate: BTreeSet<Literal> = atoms
            .into_iter()
            .filter(|s| s.name().ok() == Some("a"))
            .filter_map(|s| self.decode(s))
            .collect();
        let _ = handle.close();
        Some(candidate)
    }

    fn add_sat(&mut self, subset: BTreeSet<Literal>) {
        // block_down: forbid every subset of `subset` by requiring at least
        // one literal outside it to be chosen.
        let outside: Vec<usize> = self
            .universe
            .iter()
            .filter(|u| !subset.contains(u))
            .map(|&u| self.index_of(u))
            .collect();
        if outside.is_empty() {
            // `subset` is the whole universe: nothing proper to block.
            self.sat_sets.push(subset);
            return;
        }
        let body = outside.iter().map(|i| format!("not a({i})")).join(", ");
        let _ = writeln!(self.blocking_rules, ":- {body}.");
        self.sat_sets.push(subset);
    }

    fn add_mus(&mut self, mus: BTreeSet<Literal>) {
        // block_up: forbid every superset of `mus` by requiring at least one
        // literal of `mus` to be absent.
        let indices: Vec<usize> = mus.iter().map(|&u| self.index_of(u)).collect();
        let body = indices.iter().map(|i| format!("a({i})")).join(", ");
        let _ = writeln!(self.blocking_rules, ":- {body}.");
        self.mus_sets.push(mus);
    }

    fn explored(&self, subset: &BTreeSet<Literal>) -> Exploration {
        if self.sat_sets.iter().any(|sat| subset.is_subset(sat)) {
            Exploration::Satisfiable
        } else if self.mus_sets.iter().any(|mus| mus.is_subset(subset)) {
            Exploration::Unsatisfiable
        } else {
            Exploration::Unknown
        }
    }

    fn reset(&mut self) {
        self.blocking_rules.clear();
        self.sat_sets.clear();
        self.mus_sets.clear();
        self.exhausted = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(i: i32) -> Literal {
        Literal::new(i)
    }

    #[test]
    fn blocking_a_sat_set_records_it() {
        let mut explorer = AspOracleExplorer::new([lit(1), lit(2)]);
        let full: BTreeSet<Literal> = [lit(1), lit(2)].into_iter().collect();
        explorer.add_sat(full.clone());
        assert!(matches!(explorer.explored(&full), Exploration::Satisfiable));
    }

    #[test]
    fn blocking_a_mus_records_it() {
        let mut explorer = AspOracleExplorer::new([lit(1), lit(2)]);
        let mus: BTreeSet<Literal> = [lit(1)].into_iter().collect();
        explorer.add_mus(mus.clone());
        let superset: BTreeSet<Literal> = [lit(1), lit(2)].into_iter().collect();
        assert!(matches!(explorer.explored(&superset), Exploration::Unsatisfiable));
    }

    #[test]
    fn reset_clears_blocking_rules_and_bookkeeping() {
        let mut explorer = AspOracleExplorer::new([lit(1)]);
        explorer.add_mus([lit(1)].into_iter().collect());
        explorer.reset();
        assert!(explorer.blocking_rules.is_empty());
        assert!(matches!(
            explorer.explored(&[lit(1)].into_iter().collect()),
            Exploration::Unknown
        ));
    }
}
