use clingo::{Control, Part};

use muse_core::{Error, Symbol};

/// Grounds a single fact-rule statement (plus any already-known `#const`
/// bindings) in a throwaway control, returning the symbols of the resulting
/// facts in a stable order.
///
/// This is the "one-shot grounding" the rewrite rule calls for: it is how a
/// pooled or interval-bearing fact head (`num(1..5).`, `p(1;2;3).`) turns
/// into its individual ground instances without this crate re-implementing
/// pooling or interval expansion itself.
pub fn ground_fact_instances(
    fact_statement: &str,
    constants: &[(String, String)],
) -> Result<Vec<Symbol>, Error> {
    let args: Vec<String> = constants
        .iter()
        .map(|(name, value)| format!("-c{name}={value}"))
        .collect();
    let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();

    let mut control = Control::new(arg_refs.iter().map(|s| s.to_string()).collect())
        .map_err(|e| Error::SolverError(e.to_string()))?;
    control
        .add("base", &[], fact_statement)
        .map_err(|e| Error::SolverError(e.to_string()))?;
    control
        .ground(&[Part::new("base", vec![]).map_err(|e| Error::SolverError(e.to_string()))?])
        .map_err(|e| Error::SolverError(e.to_string()))?;

    let atoms = control.symbolic_atoms().map_err(Error::from)?;
    let mut symbols = Vec::new();
    for atom in atoms.iter().map_err(Error::from)? {
        if atom.is_fact().map_err(Error::from)? {
            symbols.push(Symbol::from_clingo(atom.symbol().map_err(Error::from)?));
        }
    }
    symbols.sort_by_key(|s| s.to_string());
    Ok(symbols)
}
