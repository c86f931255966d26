use std::cell::RefCell;
use std::rc::Rc;

use clingo::{Control, Part, SolveMode};
use muse_observe::{DecisionEvent, DecisionObserver};

#[test]
fn observes_at_least_one_decision_over_a_program_with_a_real_choice() {
    let seen = Rc::new(RefCell::new(0usize));
    let seen_in_closure = Rc::clone(&seen);
    let observer = DecisionObserver::new(move |event: DecisionEvent| {
        if let DecisionEvent::Decisions(batches) = event {
            *seen_in_closure.borrow_mut() += batches.len();
        }
    });
    let mut observer = observer;

    let mut control = Control::new(vec![]).unwrap();
    control.register_propagator(&mut observer, false).unwrap();
    control.add("base", &[], "{a; b}. :- not a, not b.").unwrap();
    control.ground(&[Part::new("base", vec![]).unwrap()]).unwrap();

    let mut handle = control.solve(SolveMode::empty(), &[]).unwrap();
    let _ = handle.get().unwrap();
    handle.close().unwrap();

    assert!(*seen.borrow() > 0);
}
