use crawler_core::{LogEvent, RandomSource, Session, SessionStatus, session_rng};

/// Plays a seeded random walk and records the outcome of every turn.
fn run_trace(room_count: usize, seed: u64) -> (Vec<String>, u64) {
    let mut session = Session::new_game(room_count, seed).expect("valid room count");
    let mut walker = session_rng(seed ^ 0xA5A5_A5A5);
    let mut trace = Vec::new();

    for _ in 0..500 {
        let outcome = session.enter_current_room().expect("session in progress");
        trace.push(format!("{}:{outcome:?}", session.player().location));
        if session.is_over() {
            break;
        }
        let exits = session.exits().to_vec();
        let next = exits[walker.below(exits.len())];
        session.move_to(next).expect("exit is adjacent");
    }
    (trace, session.snapshot_hash())
}

#[test]
fn identical_seeds_produce_identical_runs() {
    for seed in [1_u64, 42, 12_345, 987_654] {
        assert_eq!(run_trace(30, seed), run_trace(30, seed), "seed {seed} diverged");
    }
}

#[test]
fn different_seeds_produce_different_dungeons() {
    let first = Session::new_game(30, 123).unwrap();
    let second = Session::new_game(30, 456).unwrap();
    assert_ne!(
        first.snapshot_hash(),
        second.snapshot_hash(),
        "different seeds should almost surely give different dungeons"
    );
}

#[test]
fn random_walks_end_in_victory_or_defeat() {
    for seed in 0..40_u64 {
        let mut session = Session::new_game(12, seed).unwrap();
        let mut walker = session_rng(seed + 1_000);
        for _ in 0..10_000 {
            let outcome = session.enter_current_room().unwrap();
            if outcome.ends_session() {
                break;
            }
            let exits = session.exits().to_vec();
            session.move_to(exits[walker.below(exits.len())]).unwrap();
        }
        assert_ne!(
            session.status(),
            SessionStatus::InProgress,
            "seed {seed}: a walk of 10k steps over 12 rooms should reach the treasure or die"
        );
        if session.status() == SessionStatus::Victory {
            assert!(matches!(session.log().last(), Some(LogEvent::TreasureFound { .. })));
        }
    }
}
