//! Command line interface.

use std::path::PathBuf;

use clap::Parser;
use clingo::{Control, Part, SolveMode};
use muse_core::{Error as CoreError, Literal, Symbol};
use muse_engine::{Deadline, Explorer, GroundedProgram, MusEngine, PowersetExplorer};
use muse_locate::UnsatConstraintLocator;
use muse_observe::{DecisionEvent, DecisionObserver};
use muse_pattern::Filter;
use muse_preprocess::AssumptionPreprocessor;

/// `name/arity`, e.g. `a/1`.
fn parse_signature(raw: &str) -> Result<(String, usize), String> {
    let (name, arity) = raw
        .split_once('/')
        .ok_or_else(|| format!("expected name/arity, got `{raw}`"))?;
    let arity: usize = arity
        .parse()
        .map_err(|_| format!("`{arity}` is not a valid arity in `{raw}`"))?;
    Ok((name.to_string(), arity))
}

/// `name=value`, e.g. `n=5`.
fn parse_const(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got `{raw}`"))?;
    Ok((name.to_string(), value.to_string()))
}

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Diagnoses why an answer-set program has no solution.",
    long_about = None
)]
pub struct Args {
    /// Compute minimal unsatisfiable subsets of the assumption set.
    #[arg(long)]
    pub mus: bool,

    /// Locate the integrity constraints responsible for unsatisfiability.
    #[arg(long)]
    pub unsat_constraints: bool,

    /// Stream the solver's decision stack as it explores the search space.
    #[arg(long)]
    pub show_decisions: bool,

    /// Restrict which facts become assumptions (repeatable).
    #[arg(long = "assumption-signature", value_name = "NAME/ARITY", value_parser = parse_signature)]
    pub assumption_signatures: Vec<(String, usize)>,

    /// Restrict which atoms are reported by --show-decisions (repeatable).
    #[arg(long = "decision-signature", value_name = "NAME/ARITY", value_parser = parse_signature)]
    pub decision_signatures: Vec<(String, usize)>,

    /// Bind a `#const` of the grounded program (repeatable).
    #[arg(short = 'c', value_name = "NAME=VALUE", value_parser = parse_const)]
    pub constants: Vec<(String, String)>,

    /// Cap the number of MUSes enumerated; 0 means unlimited. A single MUS
    /// (the default) is computed by direct shrinking rather than enumeration.
    #[arg(long, default_value_t = 1)]
    pub models: u32,

    /// ASP source files.
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,
}

/// Return command line args.
pub fn parse_args() -> Args {
    Args::parse()
}

/// Runs the pipelines selected by `args`' mode flags against its input files.
pub fn run(args: &Args) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if args.mus || args.unsat_constraints {
        run_mus_and_locate(args)?;
    }
    if args.show_decisions {
        run_show_decisions(args)?;
    }
    Ok(())
}

fn run_mus_and_locate(args: &Args) -> anyhow::Result<()> {
    let mut preprocessor = if args.assumption_signatures.is_empty() {
        AssumptionPreprocessor::new()
    } else {
        let filters = args
            .assumption_signatures
            .iter()
            .map(|(name, arity)| Filter::by_signature(name.clone(), *arity))
            .collect();
        AssumptionPreprocessor::with_filters(filters)
    };
    let processed = preprocessor.process_files(&args.files)?;
    let assumptions = preprocessor.assumptions()?.to_vec();

    let mut const_bindings: Vec<(String, String)> = preprocessor.constants()?.clone().into_iter().collect();
    const_bindings.extend(args.constants.iter().cloned());

    let mut mus_fingerprint: Option<String> = None;

    if args.mus {
        let program = GroundedProgram::ground(&processed, &const_bindings)?;
        let mut engine = MusEngine::new(program);

        if args.models == 1 {
            let mus = engine.shrink(&assumptions, None)?;
            let literals: Vec<Literal> = mus.literals().iter().copied().collect();
            println!("{}", render_mus(&engine, &literals));
            mus_fingerprint = Some(fingerprint_of(&engine, &literals));
        } else {
            let max_mus = if args.models == 0 { None } else { Some(args.models as usize) };
            let universe = engine.resolve_assumptions(&assumptions)?;
            let mut explorer = PowersetExplorer::new(universe);
            let found: Vec<Vec<Literal>> = {
                let deadline: Option<Deadline> = None;
                let mut results = Vec::new();
                let mut enumerator = engine.enumerate(&assumptions, &mut explorer as &mut dyn Explorer, max_mus, deadline)?;
                for mus in enumerator.by_ref() {
                    results.push(mus?.literals().iter().copied().collect());
                }
                results
            };
            for (index, literals) in found.iter().enumerate() {
                println!("{}: {}", index + 1, render_mus(&engine, literals));
            }
            if let Some(first) = found.first() {
                mus_fingerprint = Some(fingerprint_of(&engine, first));
            }
        }
    }

    if args.unsat_constraints {
        let mut locator = UnsatConstraintLocator::new();
        locator.parse_files(&args.files)?;
        let fingerprint = mus_fingerprint.as_deref();
        for record in locator.get_unsat_constraints(fingerprint)? {
            println!("{}: {}", record.location, record.text);
        }
    }

    Ok(())
}

fn run_show_decisions(args: &Args) -> anyhow::Result<()> {
    let text: String = args
        .files
        .iter()
        .map(std::fs::read_to_string)
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| CoreError::ParseError {
            location: "<show-decisions>".to_string(),
            message: e.to_string(),
        })?
        .join("\n");

    let signatures = args.decision_signatures.clone();
    let mut observer = DecisionObserver::new(|event: DecisionEvent| {
        if let DecisionEvent::Decisions(batches) = event {
            for batch in batches {
                print_decision_line(&batch.decision);
                for entailed in &batch.entailed {
                    print_decision_line(entailed);
                }
            }
        }
    })
    .with_signatures(signatures);

    let const_args: Vec<String> = args.constants.iter().map(|(n, v)| format!("-c{n}={v}")).collect();
    let mut control = Control::new(const_args).map_err(CoreError::from)?;
    control
        .register_propagator(&mut observer, false)
        .map_err(CoreError::from)?;
    control.add("base", &[], &text).map_err(CoreError::from)?;
    control
        .ground(&[Part::new("base", vec![]).map_err(CoreError::from)?])
        .map_err(CoreError::from)?;

    let mut handle = control.solve(SolveMode::empty(), &[]).map_err(CoreError::from)?;
    handle.get().map_err(CoreError::from)?;
    handle.close().map_err(CoreError::from)?;

    Ok(())
}

fn print_decision_line(record: &muse_core::DecisionRecord) {
    let sign = if record.positive { "+" } else { "-" };
    match &record.symbol {
        Some(symbol) => println!("{sign} {symbol}"),
        None => println!("{sign} <internal>"),
    }
}

/// Renders a MUS as a space-separated list of its atoms, falling back to
/// the bare literal id for any solver-internal literal with no mapped
/// symbol.
fn render_mus(engine: &MusEngine, literals: &[Literal]) -> String {
    let map = engine.program().literal_map();
    literals
        .iter()
        .map(|literal| match map.symbol_of(*literal) {
            Some(symbol) => atom_text(*literal, &symbol),
            None => literal.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn atom_text(literal: Literal, symbol: &Symbol) -> String {
    if literal.is_positive() {
        symbol.to_string()
    } else {
        format!("not {symbol}")
    }
}

/// The locator fingerprint a MUS implies: only its positively assumed
/// atoms, since those are the facts the locator is asked to reassert (an
/// assumption held false has nothing to reassert as a fact).
fn fingerprint_of(engine: &MusEngine, literals: &[Literal]) -> String {
    let map = engine.program().literal_map();
    literals
        .iter()
        .filter(|l| l.is_positive())
        .filter_map(|l| map.symbol_of(*l))
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
