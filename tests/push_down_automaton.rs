use std::fs::File;
use std::io::Read;

use grammata::push_down_automaton::{PushDownAutomaton, RecognitionOutcome};

fn example_automaton() -> PushDownAutomaton<String, String, String> {
    let mut file = File::open("demos/balanced_parens.pda").unwrap();
    let mut contents = String::new();
    let _ = file.read_to_string(&mut contents);
    contents.parse().unwrap()
}

fn word(s: &str) -> Vec<String> {
    s.chars().map(|c| c.to_string()).collect()
}

#[test]
fn recognises_balanced_brackets() {
    let pda = example_automaton();

    for accepted in &["", "()", "()()", "(())", "(()())"] {
        assert_eq!(
            pda.recognise(&word(accepted), 1000),
            RecognitionOutcome::Accept,
            "word: {}",
            accepted
        );
    }
    for rejected in &["(", ")", ")(", "(()", "())"] {
        assert_eq!(
            pda.recognise(&word(rejected), 1000),
            RecognitionOutcome::Reject,
            "word: {}",
            rejected
        );
    }
}

#[test]
fn an_exhausted_budget_is_reported() {
    let pda = example_automaton();

    assert_eq!(
        pda.recognise(&word("(())"), 1),
        RecognitionOutcome::Inconclusive
    );
}

#[test]
fn the_verdict_is_reproducible() {
    let pda = example_automaton();

    let first = pda.recognise(&word("(()())"), 1000);
    let second = pda.recognise(&word("(()())"), 1000);
    assert_eq!(first, second);
}

#[test]
fn the_textual_form_round_trips() {
    let pda = example_automaton();
    let reparsed: PushDownAutomaton<String, String, String> =
        pda.to_string().parse().unwrap();

    assert_eq!(pda, reparsed);
}
