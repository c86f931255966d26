use std::collections::HashMap;

use clingo::{Assignment, PropagateControl, PropagateInit, Propagator};
use muse_core::{DecisionBatch, DecisionRecord, Error, Literal, LiteralSymbolMap, Symbol};

/// What a [`DecisionSink`] is told about: either a batch of freshly observed
/// decisions (each with the literals it immediately entails), or a batch of
/// decisions the solver just backtracked past.
pub enum DecisionEvent {
    Decisions(Vec<DecisionBatch>),
    Undo(Vec<DecisionBatch>),
}

/// A consumer of [`DecisionEvent`]s. Blanket-implemented for any
/// `FnMut(DecisionEvent)` closure so callers rarely need to name a type.
pub trait DecisionSink {
    fn on_event(&mut self, event: DecisionEvent);
}

impl<F: FnMut(DecisionEvent)> DecisionSink for F {
    fn on_event(&mut self, event: DecisionEvent) {
        self(event)
    }
}

/// A `clingo::Propagator` that reports the solver's decision stack as it
/// grows and shrinks, without ever touching solver state.
///
/// Grounded on the decision/entailment extraction loop in the original
/// `propagator_solver_decisions.py`: walk `Assignment::decision(level)` for
/// every level up to `decision_level()`, and for each level look past the
/// decision literal itself into the rest of that level's trail segment for
/// literals it entails. By default (`use_diff = true`) only the delta
/// against the previously observed stack is reported on each propagate
/// call, matching that implementation's `use_diff=True` default.
pub struct DecisionObserver<S> {
    literal_map: LiteralSymbolMap,
    signatures: Vec<(String, usize)>,
    show_internal: bool,
    use_diff: bool,
    last_seen: HashMap<u32, Vec<DecisionBatch>>,
    sink: S,
}

impl<S: DecisionSink> DecisionObserver<S> {
    pub fn new(sink: S) -> Self {
        DecisionObserver {
            literal_map: LiteralSymbolMap::new(),
            signatures: Vec::new(),
            show_internal: true,
            use_diff: true,
            last_seen: HashMap::new(),
            sink,
        }
    }

    /// Restricts which atoms are watched (and, in turn, ever reported) to
    /// the given `(name, arity)` signatures. An empty list (the default)
    /// watches every atom.
    pub fn with_signatures(mut self, signatures: Vec<(String, usize)>) -> Self {
        self.signatures = signatures;
        self
    }

    /// Whether decisions over internal literals (no mapped symbol) are
    /// reported. Defaults to `true`.
    pub fn show_internal(mut self, show: bool) -> Self {
        self.show_internal = show;
        self
    }

    /// Reports the full current stack on every propagate call instead of
    /// just the delta against what was last reported.
    pub fn without_diff(mut self) -> Self {
        self.use_diff = false;
        self
    }

    fn to_record(&self, literal: Literal) -> DecisionRecord {
        DecisionRecord::new(literal, self.literal_map.symbol_of(literal))
    }

    fn watch_filter(&self, symbol: &Symbol) -> bool {
        self.signatures.is_empty() || self.signatures.iter().any(|(n, a)| symbol.matches_signature(n, *a))
    }

    fn report_filter(&self, record: &DecisionRecord) -> bool {
        self.signatures.is_empty() || record.matches_any(&self.signatures, self.show_internal)
    }

    fn current_batches(&self, assignment: &Assignment) -> Vec<DecisionBatch> {
        decisions_and_entailments(assignment)
            .into_iter()
            .map(|(decision, entailed)| DecisionBatch {
                decision: self.to_record(decision),
                entailed: entailed.into_iter().map(|l| self.to_record(l)).collect(),
            })
            .filter(|batch| self.report_filter(&batch.decision))
            .collect()
    }

    fn try_init(&mut self, init: &mut PropagateInit) -> muse_core::Result<()> {
        let atoms = init.symbolic_atoms().map_err(Error::from)?;

        for atom in atoms.iter().map_err(Error::from)? {
            let symbol = Symbol::from_clingo(atom.symbol().map_err(Error::from)?);
            let program_literal = atom.literal().map_err(Error::from)?;
            let solver_literal = Literal::from_clingo(init.solver_literal(program_literal).map_err(Error::from)?);
            self.literal_map.insert(symbol, solver_literal);
        }

        for atom in atoms.iter().map_err(Error::from)? {
            let symbol = Symbol::from_clingo(atom.symbol().map_err(Error::from)?);
            if !self.watch_filter(&symbol) {
                continue;
            }
            let program_literal = atom.literal().map_err(Error::from)?;
            let solver_literal = Literal::from_clingo(init.solver_literal(program_literal).map_err(Error::from)?);
            init.add_watch(solver_literal.as_clingo()).map_err(Error::from)?;
            init.add_watch((-solver_literal).as_clingo()).map_err(Error::from)?;
        }
        Ok(())
    }
}

impl<S: DecisionSink> Propagator for DecisionObserver<S> {
    fn init(&mut self, init: &mut PropagateInit) -> bool {
        self.try_init(init).is_ok()
    }

    fn propagate(&mut self, control: &mut PropagateControl, _changes: &[clingo::Literal]) -> bool {
        let thread_id = control.thread_id();
        let current = self.current_batches(control.assignment());

        let last = self.last_seen.entry(thread_id).or_default();
        let emitted = if self.use_diff { diff_batches(last, &current) } else { current.clone() };
        *last = current;

        if !emitted.is_empty() {
            self.sink.on_event(DecisionEvent::Decisions(emitted));
        }
        true
    }

    fn undo(&mut self, control: &PropagateControl, _changes: &[clingo::Literal]) {
        let thread_id = control.thread_id();
        let current = self.current_batches(control.assignment());

        let last = self.last_seen.entry(thread_id).or_default();
        let popped: Vec<DecisionBatch> = last
            .iter()
            .filter(|b| !current.iter().any(|c| c.decision.literal == b.decision.literal))
            .cloned()
            .collect();
        *last = current;

        if !popped.is_empty() {
            self.sink.on_event(DecisionEvent::Undo(popped));
        }
    }
}

/// `current[i]` for every index where it differs from `last.get(i)` (or has
/// no counterpart in `last` at all).
fn diff_batches(last: &[DecisionBatch], current: &[DecisionBatch]) -> Vec<DecisionBatch> {
    current
        .iter()
        .enumerate()
        .filter(|(i, batch)| last.get(*i).map(|prev| prev != *batch).unwrap_or(true))
        .map(|(_, batch)| batch.clone())
        .collect()
}

/// For every decision level up to the assignment's current
/// `decision_level()`, the decision literal at that level plus any literals
/// the trail shows were entailed alongside it (the trail segment for a
/// level past its first, decision, entry).
fn decisions_and_entailments(assignment: &Assignment) -> Vec<(Literal, Vec<Literal>)> {
    let max_level = assignment.decision_level();
    let mut result = Vec::new();
    for level in 0..=max_level {
        let Ok(decision) = assignment.decision(level) else {
            continue;
        };
        let mut entailed = Vec::new();
        if let Ok(trail) = assignment.trail() {
            if let (Ok(begin), Ok(end)) = (trail.begin(level), trail.end(level)) {
                for offset in (begin + 1)..end {
                    if let Ok(lit) = trail.at(offset) {
                        entailed.push(Literal::from_clingo(lit));
                    }
                }
            }
        }
        result.push((Literal::from_clingo(decision), entailed));
    }
    result
}
