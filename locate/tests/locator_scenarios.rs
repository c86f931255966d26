use muse_locate::UnsatConstraintLocator;

#[test]
fn scenario_6_fingerprint_deterministically_blames_the_first_constraint() {
    // `{a}.` mirrors what the assumption preprocessor leaves behind for a
    // declared soft fact: a free choice, not a hard fact. Asserting the
    // fingerprint atom back as a fact removes the choice and forces exactly
    // one of the two competing constraints to fire.
    let program = "% two competing constraints over one assumable atom\n{a}.\n:- a.\n:- not a.\n";
    let mut locator = UnsatConstraintLocator::new();
    locator.parse_string(program);

    let witness = locator.get_unsat_constraints(Some("a")).unwrap();
    assert_eq!(witness.len(), 1);
    assert_eq!(witness[0].location.begin_line, 3);
    assert_eq!(witness[0].text, ":- a.");
}

#[test]
fn no_fingerprint_still_returns_a_minimum_cardinality_witness() {
    let program = "{a}.\n:- a.\n:- not a.\n";
    let mut locator = UnsatConstraintLocator::new();
    locator.parse_string(program);

    // Both constraints are equally minimal candidates here (exactly one of
    // them must fire whichever way the solver resolves the free choice);
    // the contract only guarantees minimum cardinality, not which one.
    let witness = locator.get_unsat_constraints(None).unwrap();
    assert_eq!(witness.len(), 1);
    assert!(witness[0].text == ":- a." || witness[0].text == ":- not a.");
}

#[test]
fn constraint_forced_by_a_hard_fact_is_the_unique_witness() {
    let program = "a.\n:- a.\n";
    let mut locator = UnsatConstraintLocator::new();
    locator.parse_string(program);

    let witness = locator.get_unsat_constraints(None).unwrap();
    assert_eq!(witness.len(), 1);
    assert_eq!(witness[0].text, ":- a.");
}

#[test]
fn satisfiable_program_returns_an_empty_witness() {
    let mut locator = UnsatConstraintLocator::new();
    locator.parse_string("a.\nb :- a.\n");
    let witness = locator.get_unsat_constraints(None).unwrap();
    assert!(witness.is_empty());
}

#[test]
fn querying_before_parsing_raises_locator_uninitialised() {
    let locator = UnsatConstraintLocator::new();
    let result = locator.get_unsat_constraints(None);
    assert!(matches!(result, Err(muse_core::Error::LocatorUninitialised)));
}
