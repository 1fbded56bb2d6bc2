use clap::{App, Arg, ArgMatches, SubCommand};
use log::info;
use std::fs::File;
use std::io::prelude::*;
use time::PreciseTime;

use grammata::cfg::Cfg;
use grammata::finite_automaton::FiniteAutomaton;
use grammata::push_down_automaton::PushDownAutomaton;
use grammata::turing_machine::{ComputeOutcome, TuringMachine};

fn main() {
    env_logger::init();

    let budget_arg = || {
        Arg::with_name("budget")
            .help("maximal number of steps or configurations to try")
            .short("b")
            .long("budget")
            .default_value("1000000")
            .required(false)
    };
    let file_arg = |help| Arg::with_name("file").help(help).index(1).required(true);

    let matches = App::new("grammata")
        .version("0.1")
        .about("Analyses finite automata, push-down automata, Turing machines, and context-free grammars")
        .subcommand(
            SubCommand::with_name("fa")
                .about("functions related to finite automata")
                .subcommand(
                    SubCommand::with_name("recognise")
                        .about("recognises words from stdin, one word per line")
                        .arg(file_arg("automaton file to use")),
                )
                .subcommand(
                    SubCommand::with_name("determinise")
                        .about("prints the result of the subset construction")
                        .arg(file_arg("automaton file to use")),
                )
                .subcommand(
                    SubCommand::with_name("minimise")
                        .about("prints the minimal equivalent deterministic automaton")
                        .arg(file_arg("automaton file to use")),
                ),
        )
        .subcommand(
            SubCommand::with_name("pda")
                .about("functions related to push-down automata")
                .subcommand(
                    SubCommand::with_name("recognise")
                        .about("recognises words from stdin with a bounded search")
                        .arg(file_arg("automaton file to use"))
                        .arg(budget_arg()),
                ),
        )
        .subcommand(
            SubCommand::with_name("tm")
                .about("functions related to Turing machines")
                .subcommand(
                    SubCommand::with_name("run")
                        .about("runs the machine on words from stdin")
                        .arg(file_arg("machine file to use"))
                        .arg(budget_arg()),
                )
                .subcommand(
                    SubCommand::with_name("compute")
                        .about("runs the machine and prints the resulting tape")
                        .arg(file_arg("machine file to use"))
                        .arg(budget_arg()),
                ),
        )
        .subcommand(
            SubCommand::with_name("cfg")
                .about("functions related to context-free grammars")
                .subcommand(
                    SubCommand::with_name("analyse")
                        .about("prints nullable nonterminals, FIRST sets, and FOLLOW sets")
                        .arg(file_arg("grammar file to use")),
                )
                .subcommand(
                    SubCommand::with_name("table")
                        .about("prints the LL(1) table or its conflicts")
                        .arg(file_arg("grammar file to use")),
                )
                .subcommand(
                    SubCommand::with_name("parse")
                        .about("parses words from stdin with the LL(1) table")
                        .arg(file_arg("grammar file to use")),
                )
                .subcommand(
                    SubCommand::with_name("cyk")
                        .about("decides membership of words from stdin with the CYK algorithm")
                        .arg(file_arg("grammar file to use")),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        ("fa", Some(fa_matches)) => handle_fa_subcommand(fa_matches),
        ("pda", Some(pda_matches)) => handle_pda_subcommand(pda_matches),
        ("tm", Some(tm_matches)) => handle_tm_subcommand(tm_matches),
        ("cfg", Some(cfg_matches)) => handle_cfg_subcommand(cfg_matches),
        _ => (),
    }
}

fn read_file(matches: &ArgMatches) -> String {
    let file_name = matches.value_of("file").unwrap();
    let mut file = File::open(file_name).unwrap();
    let mut contents = String::new();
    let _ = file.read_to_string(&mut contents);
    contents
}

fn read_budget(matches: &ArgMatches) -> usize {
    matches.value_of("budget").unwrap().parse().unwrap()
}

/// One word per line on stdin; the symbols of a word are separated by
/// whitespace.
fn words_from_stdin() -> Vec<Vec<String>> {
    let mut corpus = String::new();
    let _ = std::io::stdin().read_to_string(&mut corpus);
    corpus
        .lines()
        .map(|line| line.split_whitespace().map(String::from).collect())
        .collect()
}

fn handle_fa_subcommand(fa_matches: &ArgMatches) {
    match fa_matches.subcommand() {
        ("recognise", Some(recognise_matches)) => {
            let automaton: FiniteAutomaton<String, String> =
                read_file(recognise_matches).parse().unwrap();

            for word in words_from_stdin() {
                let start = PreciseTime::now();
                let accepted = automaton.recognise(&word);
                let end = PreciseTime::now();
                info!("recognition took {}", start.to(end));
                println!("{}", accepted);
            }
        }
        ("determinise", Some(determinise_matches)) => {
            let automaton: FiniteAutomaton<String, String> =
                read_file(determinise_matches).parse().unwrap();
            print!("{}", automaton.determinise());
        }
        ("minimise", Some(minimise_matches)) => {
            let automaton: FiniteAutomaton<String, String> =
                read_file(minimise_matches).parse().unwrap();
            match automaton.determinise().minimise() {
                Ok(minimal) => print!("{}", minimal),
                Err(e) => eprintln!("{}", e),
            }
        }
        _ => (),
    }
}

fn handle_pda_subcommand(pda_matches: &ArgMatches) {
    if let ("recognise", Some(recognise_matches)) = pda_matches.subcommand() {
        let automaton: PushDownAutomaton<String, String, String> =
            read_file(recognise_matches).parse().unwrap();
        let budget = read_budget(recognise_matches);

        for word in words_from_stdin() {
            let start = PreciseTime::now();
            let outcome = automaton.recognise(&word, budget);
            let end = PreciseTime::now();
            info!("recognition took {}", start.to(end));
            println!("{}", outcome);
        }
    }
}

fn handle_tm_subcommand(tm_matches: &ArgMatches) {
    match tm_matches.subcommand() {
        ("run", Some(run_matches)) => {
            let machine: TuringMachine<String, String> = read_file(run_matches).parse().unwrap();
            let budget = read_budget(run_matches);

            for word in words_from_stdin() {
                let start = PreciseTime::now();
                let outcome = machine.run(&word, budget);
                let end = PreciseTime::now();
                info!("run took {}", start.to(end));
                println!("{}", outcome);
            }
        }
        ("compute", Some(compute_matches)) => {
            let machine: TuringMachine<String, String> =
                read_file(compute_matches).parse().unwrap();
            let budget = read_budget(compute_matches);

            for word in words_from_stdin() {
                match machine.compute(&word, budget) {
                    ComputeOutcome::Output(output) => println!("{}", output.join(" ")),
                    ComputeOutcome::Rejected => println!("rejected"),
                    ComputeOutcome::Exceeded => println!("exceeded"),
                }
            }
        }
        _ => (),
    }
}

fn handle_cfg_subcommand(cfg_matches: &ArgMatches) {
    match cfg_matches.subcommand() {
        ("analyse", Some(analyse_matches)) => {
            let grammar: Cfg<String, String> = read_file(analyse_matches).parse().unwrap();

            let nullable: Vec<String> = grammar.nullable().into_iter().collect();
            println!("nullable: [{}]", nullable.join(", "));

            for (nonterminal, items) in grammar.first_sets() {
                let items: Vec<String> = items.into_iter().map(|i| i.to_string()).collect();
                println!("first({}) = [{}]", nonterminal, items.join(", "));
            }
            for (nonterminal, items) in grammar.follow_sets() {
                let items: Vec<String> = items.into_iter().map(|i| i.to_string()).collect();
                println!("follow({}) = [{}]", nonterminal, items.join(", "));
            }
        }
        ("table", Some(table_matches)) => {
            let grammar: Cfg<String, String> = read_file(table_matches).parse().unwrap();

            match grammar.ll1_table() {
                Ok(table) => {
                    for (nonterminal, lookahead, rule) in table.entries() {
                        println!(
                            "({}, {}) → {}",
                            nonterminal, lookahead, grammar.rules()[rule]
                        );
                    }
                }
                Err(conflicts) => {
                    for conflict in conflicts {
                        eprintln!("conflict: {}", conflict);
                    }
                }
            }
        }
        ("parse", Some(parse_matches)) => {
            let grammar: Cfg<String, String> = read_file(parse_matches).parse().unwrap();
            let table = grammar.ll1_table().unwrap();

            for word in words_from_stdin() {
                let start = PreciseTime::now();
                let result = grammar.parse(&table, &word);
                let end = PreciseTime::now();
                info!("parsing took {}", start.to(end));
                match result {
                    Ok(tree) => println!("{:?}", tree),
                    Err(e) => println!("syntax error: {}", e),
                }
            }
        }
        ("cyk", Some(cyk_matches)) => {
            let grammar: Cfg<String, String> = read_file(cyk_matches).parse().unwrap();

            for word in words_from_stdin() {
                let start = PreciseTime::now();
                let result = grammar.cyk_recognise(&word);
                let end = PreciseTime::now();
                info!("recognition took {}", start.to(end));
                match result {
                    Ok(member) => println!("{}", member),
                    Err(e) => {
                        eprintln!("{}", e);
                        break;
                    }
                }
            }
        }
        _ => (),
    }
}
