use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::Path;

use clingo::{Control, Part, SolveMode};
use muse_core::{ConstraintRecord, Error, Result};
use muse_rewrite::classify::atom_signature;
use muse_rewrite::constants::DEFAULT_CONSTRAINT_HEAD;
use muse_rewrite::{ConstraintTagger, FactTransformer, OptimizationRemover};

/// Tags every integrity constraint, then asks the solver for a
/// minimum-cardinality set of tags that must fire, reporting the
/// constraints those tags point back to.
///
/// `file` on a returned location is authoritative only when the program was
/// supplied through [`parse_files`](Self::parse_files); a program given
/// through [`parse_string`](Self::parse_string) carries the synthetic
/// `"<string>"` file the statement splitter assigns.
pub struct UnsatConstraintLocator {
    head_symbol: String,
    tagged_program: Option<String>,
    records: HashMap<u32, ConstraintRecord>,
}

impl UnsatConstraintLocator {
    pub fn new() -> Self {
        UnsatConstraintLocator::with_head_symbol(DEFAULT_CONSTRAINT_HEAD)
    }

    pub fn with_head_symbol(head_symbol: impl Into<String>) -> Self {
        UnsatConstraintLocator {
            head_symbol: head_symbol.into(),
            tagged_program: None,
            records: HashMap::new(),
        }
    }

    pub fn parse_string(&mut self, text: &str) {
        let mut tagger = ConstraintTagger::new(self.head_symbol.clone(), true);
        let tagged = tagger.process_string(text);
        self.store(tagger, tagged);
    }

    pub fn parse_files<P: AsRef<Path>>(&mut self, paths: &[P]) -> Result<()> {
        let mut tagger = ConstraintTagger::new(self.head_symbol.clone(), true);
        let tagged = tagger.process_files(paths)?;
        self.store(tagger, tagged);
        Ok(())
    }

    fn store(&mut self, tagger: ConstraintTagger, tagged_program: String) {
        self.records = tagger.records().map(|r| (r.constraint_id, r.clone())).collect();
        self.tagged_program = Some(tagged_program);
    }

    /// Computes the minimum-cardinality witness of tags that must fire,
    /// optionally under an assumption fingerprint (a space-separated list of
    /// atoms asserted as facts in place of any competing fact of the same
    /// signature).
    pub fn get_unsat_constraints(&self, fingerprint: Option<&str>) -> Result<Vec<ConstraintRecord>> {
        let Some(tagged_program) = &self.tagged_program else {
            return Err(Error::LocatorUninitialised);
        };

        let mut program = OptimizationRemover.process_string(tagged_program);

        if let Some(fingerprint) = fingerprint {
            let atoms: Vec<&str> = fingerprint.split_whitespace().collect();
            let signatures: HashSet<(String, usize)> = atoms.iter().filter_map(|a| atom_signature(a)).collect();
            program = FactTransformer::new(signatures).process_string(&program);
            for atom in atoms {
                program.push_str(&format!("\n{atom}.\n"));
            }
        }

        program.push_str(&format!("\n#minimize {{ 1,X : {}(X) }}.\n", self.head_symbol));

        let tag_ids = solve_for_minimal_tags(&program, &self.head_symbol)?;
        let mut witness: Vec<ConstraintRecord> = tag_ids
            .into_iter()
            .filter_map(|id| self.records.get(&id).cloned())
            .collect();
        witness.sort_by_key(|r| r.constraint_id);
        Ok(witness)
    }
}

impl Default for UnsatConstraintLocator {
    fn default() -> Self {
        UnsatConstraintLocator::new()
    }
}

/// Grounds `program` and solves under `SolveMode::YIELD`, returning the tag
/// ids of the last (optimal) model found. If the program is satisfiable
/// without any tag firing, or unconditionally satisfiable, the returned set
/// is empty.
fn solve_for_minimal_tags(program: &str, head_symbol: &str) -> Result<BTreeSet<u32>> {
    let mut control = Control::new(vec![]).map_err(Error::from)?;
    control.add("base", &[], program).map_err(Error::from)?;
    control
        .ground(&[Part::new("base", vec![]).map_err(Error::from)?])
        .map_err(Error::from)?;

    let mut handle = control.solve(SolveMode::YIELD, &[]).map_err(Error::from)?;
    let mut best: BTreeSet<u32> = BTreeSet::new();
    loop {
        handle.resume().map_err(Error::from)?;
        match handle.model().map_err(Error::from)? {
            Some(model) => {
                let atoms = model.symbols(clingo::ShowType::SHOWN).map_err(Error::from)?;
                best = atoms
                    .into_iter()
                    .filter(|s| s.name().ok() == Some(head_symbol))
                    .filter_map(|s| s.arguments().ok()?.first().copied()?.number().ok())
                    .map(|n| n as u32)
                    .collect();
            }
            None => break,
        }
    }
    handle.close().map_err(Error::from)?;
    Ok(best)
}
