use std::fs::File;
use std::io::Read;

use grammata::turing_machine::{ComputeOutcome, RunOutcome, TuringMachine};

fn example_machine() -> TuringMachine<String, String> {
    let mut file = File::open("demos/unary_addition.tm").unwrap();
    let mut contents = String::new();
    let _ = file.read_to_string(&mut contents);
    contents.parse().unwrap()
}

fn word(s: &str) -> Vec<String> {
    s.chars().map(|c| c.to_string()).collect()
}

#[test]
fn adds_unary_numbers() {
    let tm = example_machine();

    assert_eq!(
        tm.compute(&word("111+11"), 1000),
        ComputeOutcome::Output(word("11111"))
    );
    assert_eq!(
        tm.compute(&word("1+1"), 1000),
        ComputeOutcome::Output(word("11"))
    );
}

#[test]
fn accepts_and_rejects() {
    let tm = example_machine();

    assert_eq!(tm.run(&word("1+1"), 1000), RunOutcome::Accepted);
    assert_eq!(tm.run(&word("1+1+1"), 1000), RunOutcome::Rejected);
}

#[test]
fn an_exhausted_budget_is_reported() {
    let tm = example_machine();

    assert_eq!(tm.run(&word("111+11"), 2), RunOutcome::Exceeded);
}

#[test]
fn the_textual_form_round_trips() {
    let tm = example_machine();
    let reparsed: TuringMachine<String, String> = tm.to_string().parse().unwrap();

    assert_eq!(tm, reparsed);
}
