use std::collections::BTreeSet;

use muse_core::{Assumption, Literal, Symbol};
use muse_engine::{GroundedProgram, MusEngine, PowersetExplorer};

fn assumption(i: i32) -> Assumption {
    Assumption::positive(Symbol::function("a", &[Symbol::number(i)], true).unwrap())
}

fn universe_of(program: &GroundedProgram, assumptions: &[Assumption]) -> Vec<Literal> {
    assumptions
        .iter()
        .map(|a| program.literal_map().literal_of(a.symbol).expect("atom must be grounded"))
        .collect()
}

fn literals_of(core: &BTreeSet<Literal>) -> Vec<i32> {
    let mut v: Vec<i32> = core.iter().map(Literal::get).collect();
    v.sort();
    v
}

#[test]
fn scenario_1_shrink_finds_the_planted_triple() {
    let program = GroundedProgram::ground("a(1..5). :- a(1), a(4), a(5).", &[]).unwrap();
    let assumptions: Vec<Assumption> = (1..=5).map(assumption).collect();
    let mut engine = MusEngine::new(program);
    let mus = engine.shrink(&assumptions, None).unwrap();
    assert!(mus.minimal);
    assert_eq!(literals_of(mus.literals()), vec![1, 4, 5]);
}

#[test]
fn scenario_2_shrink_finds_the_single_offending_fact() {
    let program = GroundedProgram::ground("a(1..5). :- a(3).", &[]).unwrap();
    let assumptions: Vec<Assumption> = (1..=5).map(assumption).collect();
    let mut engine = MusEngine::new(program);
    let mus = engine.shrink(&assumptions, None).unwrap();
    assert!(mus.minimal);
    assert_eq!(literals_of(mus.literals()), vec![3]);
}

#[test]
fn scenario_3_enumeration_yields_all_three_singleton_muses() {
    let program = GroundedProgram::ground("a(1..10). :- a(3). :- a(5). :- a(9).", &[]).unwrap();
    let assumptions: Vec<Assumption> = (1..=10).map(assumption).collect();
    let universe = universe_of(&program, &assumptions);
    let mut engine = MusEngine::new(program);
    let mut explorer = PowersetExplorer::new(universe);
    let muses: Vec<_> = engine
        .enumerate(&assumptions, &mut explorer, None, None)
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    let mut found: Vec<Vec<i32>> = muses.iter().map(|m| literals_of(m.literals())).collect();
    found.sort();
    assert_eq!(found, vec![vec![3], vec![5], vec![9]]);
}

#[test]
fn scenario_4_enumeration_yields_exactly_the_three_witness_sets() {
    let program = GroundedProgram::ground(
        "a(1..10). :- a(3),a(9),a(5). :- a(5),a(1),a(2). :- a(9),a(2),a(7).",
        &[],
    )
    .unwrap();
    let assumptions: Vec<Assumption> = (1..=10).map(assumption).collect();
    let universe = universe_of(&program, &assumptions);
    let mut engine = MusEngine::new(program);
    let mut explorer = PowersetExplorer::new(universe);
    let muses: Vec<_> = engine
        .enumerate(&assumptions, &mut explorer, None, None)
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    let mut found: Vec<Vec<i32>> = muses.iter().map(|m| literals_of(m.literals())).collect();
    found.sort();
    assert_eq!(found, vec![vec![1, 2, 5], vec![2, 7, 9], vec![3, 5, 9]]);
}

#[test]
fn scenario_5_shrink_short_circuits_on_satisfiable_input() {
    let program = GroundedProgram::ground("a(1..5).", &[]).unwrap();
    let assumptions: Vec<Assumption> = (1..=5).map(assumption).collect();
    let mut engine = MusEngine::new(program);
    let mus = engine.shrink(&assumptions, None).unwrap();
    assert!(mus.is_empty());
}

#[test]
fn empty_assumption_set_returns_empty_without_erroring() {
    let program = GroundedProgram::ground("a(1..5).", &[]).unwrap();
    let mut engine = MusEngine::new(program);
    let mus = engine.shrink(&[], None).unwrap();
    assert!(mus.is_empty());
}
