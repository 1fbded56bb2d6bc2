use crate::cfg::Cfg;
use crate::finite_automaton::FiniteAutomaton;
use crate::push_down_automaton::{PushDownAutomaton, RecognitionOutcome};
use crate::turing_machine::{RunOutcome, TuringMachine};

fn word(s: &str) -> Vec<String> {
    s.chars().map(|c| c.to_string()).collect()
}

#[test]
fn determinise_then_minimise_preserves_the_language() {
    // ends in ab
    let nfa: FiniteAutomaton<String, String> = "initial: q0\n\
         final: [q2]\n\
         q0, a → [q0, q1]\n\
         q0, b → [q0]\n\
         q1, b → [q2]\n"
        .parse()
        .unwrap();

    let minimal = nfa.determinise().minimise().unwrap();

    let alphabet = vec!["a", "b"];
    let mut words: Vec<Vec<String>> = vec![Vec::new()];
    for _ in 0..4 {
        let mut next = Vec::new();
        for w in &words {
            for t in &alphabet {
                let mut w = w.clone();
                w.push(t.to_string());
                next.push(w);
            }
        }
        words.extend(next);
    }

    for w in words {
        assert_eq!(nfa.recognise(&w), minimal.recognise(&w), "word: {:?}", w);
    }
}

#[test]
fn minimised_automata_survive_a_display_round_trip() {
    let nfa: FiniteAutomaton<String, String> = "initial: q0\n\
         final: [q1]\n\
         q0, a → [q0, q1]\n"
        .parse()
        .unwrap();

    let minimal = nfa.determinise().minimise().unwrap();
    let reparsed: FiniteAutomaton<usize, String> = minimal.to_string().parse().unwrap();

    assert_eq!(minimal, reparsed);
}

#[test]
fn pda_and_cyk_agree_on_a_n_b_n() {
    let pda: PushDownAutomaton<String, String, String> = "initial: q0\n\
         stack: Z\n\
         final: [q1]\n\
         q0, a, Z → q0, [A, Z]\n\
         q0, a, A → q0, [A, A]\n\
         q0, b, A → q2, []\n\
         q2, b, A → q2, []\n\
         q2, ε, Z → q1, [Z]\n"
        .parse()
        .unwrap();

    let grammar: Cfg<String, String> = "initial: S\n\
         S → [Nt A, Nt B]\n\
         A → [T a]\n\
         B → [Nt S, Nt B]\n\
         B → [T b]\n"
        .parse()
        .unwrap();

    for input in &["ab", "aabb", "aaabbb", "aab", "abb", "ba", "a", "b"] {
        let w = word(input);
        let by_pda = pda.recognise(&w, 10000) == RecognitionOutcome::Accept;
        let by_cyk = grammar.cyk_recognise(&w).unwrap();
        assert_eq!(by_pda, by_cyk, "word: {:?}", w);
    }
}

#[test]
fn turing_machine_decides_what_the_dfa_decides() {
    // an even number of a's
    let dfa: FiniteAutomaton<String, String> = "initial: q0\n\
         final: [q0]\n\
         q0, a → [q1]\n\
         q1, a → [q0]\n"
        .parse()
        .unwrap();

    let tm: TuringMachine<String, String> = "initial: q0\n\
         blank: _\n\
         accept: qa\n\
         reject: qr\n\
         q0, a → q1, a, R\n\
         q0, _ → qa, _, R\n\
         q1, a → q0, a, R\n\
         q1, _ → qr, _, R\n"
        .parse()
        .unwrap();

    for n in 0..6 {
        let w: Vec<String> = (0..n).map(|_| String::from("a")).collect();
        let by_dfa = dfa.recognise(&w);
        let by_tm = tm.run(&w, 1000) == RunOutcome::Accepted;
        assert_eq!(by_dfa, by_tm, "word: {:?}", w);
    }
}
