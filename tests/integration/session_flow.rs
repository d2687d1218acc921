//! Session rounds from slip to history.

use dice::engine::{compute_odds, SeededSource};
use dice::session::{BetSlip, Session};
use dice::types::{DiceError, Direction, HISTORY_CAP, INITIAL_BALANCE};

use crate::scripted_source::ScriptedSource;

#[test]
fn test_default_over_win() {
    let mut session = Session::new();
    let mut rng = ScriptedSource::new(&[0.60]);

    let record = session.roll(&mut rng).unwrap();
    assert_eq!(record.payout, 19);
    assert_eq!(session.balance(), 1009);
    assert_eq!(session.history().len(), 1);
    assert_eq!(session.history().stats().total_profit, 9);
}

#[test]
fn test_under_loss() {
    let mut session = Session::with_slip(BetSlip {
        bet_amount: 50,
        target: 30,
        direction: Direction::Under,
    });
    let mut rng = ScriptedSource::new(&[0.42]);

    let record = session.roll(&mut rng).unwrap();
    assert_eq!(record.payout, 0);
    assert_eq!(session.balance(), 950);
    assert_eq!(record.profit(), -50);
}

#[test]
fn test_long_shot_over_95() {
    let mut session = Session::with_slip(BetSlip {
        bet_amount: 100,
        target: 95,
        direction: Direction::Over,
    });
    let odds = session.odds();
    assert!((odds.multiplier - 19.8).abs() < 1e-9);

    let mut rng = ScriptedSource::new(&[0.9612]);
    let record = session.roll(&mut rng).unwrap();
    assert_eq!(record.payout, 1980);
    assert_eq!(session.balance(), 2880);
}

#[test]
fn test_roll_on_target_loses_both_ways() {
    for direction in [Direction::Over, Direction::Under] {
        let mut session = Session::with_slip(BetSlip {
            bet_amount: 10,
            target: 50,
            direction,
        });
        let mut rng = ScriptedSource::constant(0.5);
        let record = session.roll(&mut rng).unwrap();
        assert_eq!(record.payout, 0, "{direction} on the target must lose");
    }
}

#[test]
fn test_insufficient_balance_refused_without_draw() {
    let mut session = Session::new();
    session.set_bet(2000);
    assert_eq!(session.slip().bet_amount, INITIAL_BALANCE);

    // Drain the balance to 5 via a forced slip.
    let mut session = Session::with_slip(BetSlip {
        bet_amount: 995,
        target: 50,
        direction: Direction::Over,
    });
    let mut rng = ScriptedSource::constant(0.1);
    session.roll(&mut rng).unwrap();
    assert_eq!(session.balance(), 5);

    let served = rng.served();
    let err = session.roll(&mut rng).unwrap_err();
    assert_eq!(
        err,
        DiceError::InsufficientBalance {
            needed: 995,
            available: 5
        }
    );
    assert_eq!(rng.served(), served);
    assert_eq!(session.history().len(), 1);
    assert!(!session.can_roll());
}

#[test]
fn test_second_roll_refused_while_in_flight() {
    let mut session = Session::new();
    let pending = session.begin_roll().unwrap();
    assert!(session.is_rolling());
    assert_eq!(session.begin_roll().unwrap_err(), DiceError::RollInFlight);

    let mut rng = ScriptedSource::new(&[0.99]);
    session.settle(pending, &mut rng).unwrap();
    assert!(!session.is_rolling());
    assert!(session.begin_roll().is_ok());
}

#[test]
fn test_history_capped_at_fifty() {
    let mut session = Session::new();
    let mut rng = ScriptedSource::constant(0.75);

    let mut first_id = None;
    for i in 0..=HISTORY_CAP {
        let record = session.roll(&mut rng).unwrap();
        if i == 0 {
            first_id = Some(record.id);
        }
    }

    let history = session.history();
    assert_eq!(history.len(), HISTORY_CAP);
    assert!(history.iter().all(|r| Some(r.id) != first_id));
    // Balance keeps every round even though the log dropped one.
    assert_eq!(session.balance(), INITIAL_BALANCE + 9 * (HISTORY_CAP as u64 + 1));
}

#[test]
fn test_balance_conserved_across_mixed_rounds() {
    let mut session = Session::new();
    let draws = [0.1, 0.9, 0.55, 0.3, 0.8, 0.02, 0.97];
    let mut rng = ScriptedSource::new(&draws);

    let mut expected = INITIAL_BALANCE as i64;
    for (i, _) in draws.iter().enumerate() {
        if i % 2 == 1 {
            session.set_direction(Direction::Under);
        } else {
            session.set_direction(Direction::Over);
        }
        let record = session.roll(&mut rng).unwrap();
        expected += record.profit();
        assert_eq!(session.balance() as i64, expected);
    }

    let series = session.history().profit_series();
    assert_eq!(series.len(), draws.len());
    assert_eq!(
        series.last().unwrap().cumulative_profit,
        expected - INITIAL_BALANCE as i64
    );
}

#[test]
fn test_seeded_sessions_replay_identically() {
    let play = |seed: u64| {
        let mut session = Session::new();
        let mut rng = SeededSource::new(seed);
        (0..20)
            .map(|_| session.roll(&mut rng).unwrap().roll)
            .collect::<Vec<f64>>()
    };
    assert_eq!(play(7), play(7));
    assert_ne!(play(7), play(8));
}

#[test]
fn test_deposit_restores_ability_to_roll() {
    let mut session = Session::with_slip(BetSlip {
        bet_amount: 1000,
        target: 50,
        direction: Direction::Over,
    });
    let mut rng = ScriptedSource::constant(0.2);
    session.roll(&mut rng).unwrap();
    assert_eq!(session.balance(), 0);
    assert!(!session.can_roll());

    assert_eq!(session.deposit(0).unwrap_err(), DiceError::InvalidDeposit);
    assert_eq!(session.deposit(250).unwrap(), 250);
    session.set_bet(100);
    assert!(session.can_roll());
}

#[test]
fn test_odds_match_session_potential_win() {
    let mut session = Session::new();
    for target in [3, 25, 50, 75, 97] {
        session.set_target(target);
        for direction in [Direction::Over, Direction::Under] {
            session.set_direction(direction);
            let odds = compute_odds(target as u8, direction).unwrap();
            assert_eq!(session.potential_win(), odds.potential_win(10));
        }
    }
}

#[test]
fn test_stats_on_empty_history() {
    let session = Session::new();
    let stats = session.history().stats();
    assert_eq!(stats.rounds, 0);
    assert_eq!(stats.total_profit, 0);
    assert_eq!(stats.win_rate(), 0.0);
    assert!(session.history().profit_series().is_empty());
}
