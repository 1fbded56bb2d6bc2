use std::fs::File;
use std::io::Read;

use grammata::finite_automaton::FiniteAutomaton;

fn example_automaton() -> FiniteAutomaton<String, String> {
    let mut file = File::open("demos/ends_in_ab.fa").unwrap();
    let mut contents = String::new();
    let _ = file.read_to_string(&mut contents);
    contents.parse().unwrap()
}

fn word(s: &str) -> Vec<String> {
    s.chars().map(|c| c.to_string()).collect()
}

#[test]
fn recognises_words_ending_in_ab() {
    let nfa = example_automaton();

    for accepted in &["ab", "aab", "bab", "abab", "bbab"] {
        assert!(nfa.recognise(&word(accepted)), "word: {}", accepted);
    }
    for rejected in &["", "a", "b", "ba", "abb", "aba"] {
        assert!(!nfa.recognise(&word(rejected)), "word: {}", rejected);
    }
}

#[test]
fn determinisation_yields_an_equivalent_dfa() {
    let nfa = example_automaton();
    let dfa = nfa.determinise();

    assert!(dfa.is_deterministic());
    for input in &["", "a", "b", "ab", "ba", "aab", "abb", "abab", "bbab"] {
        assert_eq!(
            nfa.recognise(&word(input)),
            dfa.recognise(&word(input)),
            "word: {}",
            input
        );
    }
}

#[test]
fn minimisation_reaches_a_fixed_size() {
    let minimal = example_automaton().determinise().minimise().unwrap();
    let minimal_again = minimal.minimise().unwrap();

    assert_eq!(minimal.states().len(), minimal_again.states().len());
    assert_eq!(minimal, minimal_again);
}

#[test]
fn the_textual_form_round_trips() {
    let nfa = example_automaton();
    let reparsed: FiniteAutomaton<String, String> = nfa.to_string().parse().unwrap();

    assert_eq!(nfa, reparsed);
}
