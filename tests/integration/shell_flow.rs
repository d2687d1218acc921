//! Text commands driven through the shell.

use dice::feedback::Feedback;
use dice::session::Session;
use dice::shell::{Command, Shell, Step};

use crate::scripted_source::ScriptedSource;

fn shell_with(draws: &[f64]) -> Shell {
    Shell::new(
        Session::new(),
        Feedback::new(true),
        Box::new(ScriptedSource::new(draws)),
    )
}

fn run(shell: &mut Shell, input: &str) -> String {
    let command: Command = input.parse().unwrap();
    match shell.execute(command) {
        Step::Output(output) => output,
        Step::Rolling { pending, output } => format!("{output}\n{}", shell.finish_roll(pending)),
        Step::Quit => "quit".to_string(),
    }
}

#[test]
fn test_scripted_game() {
    let mut shell = shell_with(&[0.2, 0.9]);

    run(&mut shell, "under");
    run(&mut shell, "target 25");
    run(&mut shell, "bet 40");

    // 20.00 < 25 wins at 99/25 = 3.96x
    let first = run(&mut shell, "roll");
    assert!(first.contains("WIN rolled 20.00"), "{first}");
    assert!(first.contains("payout=158"), "{first}");
    assert_eq!(shell.session().balance(), 1118);

    let second = run(&mut shell, "roll");
    assert!(second.contains("LOSS rolled 90.00"), "{second}");
    assert_eq!(shell.session().balance(), 1078);

    let stats = run(&mut shell, "stats");
    assert!(stats.contains("profit=+78"), "{stats}");
    assert!(stats.contains("rounds=2"), "{stats}");

    let history = run(&mut shell, "history");
    assert_eq!(history.lines().count(), 2);
}

#[test]
fn test_nudges_clamp() {
    let mut shell = shell_with(&[]);
    assert!(run(&mut shell, "target +100").starts_with("target=97"));
    assert!(run(&mut shell, "target -200").starts_with("target=3"));
    assert!(run(&mut shell, "bet 5000").starts_with("bet=1000"));
    assert!(run(&mut shell, "bet -2000").starts_with("bet=0"));
}

#[test]
fn test_zero_bet_cannot_roll() {
    let mut shell = shell_with(&[]);
    run(&mut shell, "bet 0");
    let out = run(&mut shell, "roll");
    assert!(out.starts_with("Can't roll"), "{out}");
    assert!(shell.session().history().is_empty());
}

#[test]
fn test_broke_then_deposit() {
    let mut shell = shell_with(&[0.1]);
    run(&mut shell, "max");
    run(&mut shell, "roll");
    assert_eq!(shell.session().balance(), 0);

    let out = run(&mut shell, "deposit");
    assert!(out.contains("balance=100"), "{out}");
    assert!(run(&mut shell, "deposit 0").starts_with("Deposit refused"));
}

#[test]
fn test_graph_after_rounds() {
    let mut shell = shell_with(&[0.9, 0.1, 0.9]);
    assert_eq!(run(&mut shell, "graph"), "No games played yet");
    for _ in 0..3 {
        run(&mut shell, "roll");
    }
    let graph = run(&mut shell, "graph");
    let sparkline = graph.lines().next().unwrap();
    assert_eq!(sparkline.chars().count(), 3);
    assert!(graph.contains("profit=+8"), "{graph}");
}

#[test]
fn test_bad_input_is_an_error() {
    assert!("jump".parse::<Command>().is_err());
    assert!("bet".parse::<Command>().is_err());
    assert!("target fifty".parse::<Command>().is_err());
    assert!("".parse::<Command>().is_err());
}
