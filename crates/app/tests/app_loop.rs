use std::fs;
use std::io::Cursor;
use std::path::Path;

use crawler::app_loop::{AppCompletion, run};
use crawler::ui_text::INVALID_INPUT_TEXT;
use crawler_core::{
    Dungeon, Monster, MonsterKind, Player, RoomContent, Session, SessionStatus, load, session_rng,
};
use rand_chacha::ChaCha8Rng;
use tempfile::tempdir;

/// Rooms 0 - 1 - 2 in a line, treasure at the far end.
fn corridor(middle: RoomContent) -> Dungeon {
    let mut dungeon = Dungeon::with_rooms(3);
    dungeon.connect(0, 1);
    dungeon.connect(1, 2);
    dungeon.set_content(1, middle);
    dungeon.set_content(2, RoomContent::Treasure);
    dungeon
}

fn session(player: Player, dungeon: Dungeon) -> Session<ChaCha8Rng> {
    Session::with_rng(player, dungeon, session_rng(7))
}

fn play(
    session: &mut Session<ChaCha8Rng>,
    script: &str,
    save_path: &Path,
) -> (AppCompletion, String) {
    let mut input = Cursor::new(script.as_bytes().to_vec());
    let mut output = Vec::new();
    let completion = run(session, &mut input, &mut output, save_path).expect("loop runs");
    (completion, String::from_utf8(output).expect("utf-8 output"))
}

#[test]
fn invalid_choices_reprompt_without_using_a_turn() {
    let dir = tempdir().unwrap();
    let mut session = session(Player::new(0), corridor(RoomContent::Empty));

    let (completion, output) =
        play(&mut session, "2\nnorth\n1\n2\n", &dir.path().join("unused.sav"));

    assert_eq!(completion, AppCompletion::Victory);
    assert_eq!(output.matches(INVALID_INPUT_TEXT).count(), 2);
    assert_eq!(session.turns(), 3);
    assert!(output.contains("You are in room 0."));
    assert!(output.contains("Exits: 0, 2"));
    assert!(output.contains("You found the treasure!"));
}

#[test]
fn save_and_quit_uses_default_path_on_empty_answer() {
    let dir = tempdir().unwrap();
    let default_path = dir.path().join("saves").join("dungeon.sav");
    let mut session = session(Player::new(0), corridor(RoomContent::Empty));

    let (completion, output) = play(&mut session, "1\n-1\n\n", &default_path);

    assert_eq!(completion, AppCompletion::SavedAndQuit(default_path.clone()));
    assert!(output.contains("Game saved to"));
    let (player, dungeon) = load(&default_path).unwrap();
    assert_eq!(player.location, 1);
    assert_eq!(&dungeon, session.dungeon());
}

#[test]
fn save_and_quit_accepts_a_typed_path() {
    let dir = tempdir().unwrap();
    let typed = dir.path().join("typed.sav");
    let mut session = session(Player::new(0), corridor(RoomContent::Empty));

    let script = format!("-1\n{}\n", typed.display());
    let (completion, _) = play(&mut session, &script, &dir.path().join("default.sav"));

    assert_eq!(completion, AppCompletion::SavedAndQuit(typed.clone()));
    assert!(typed.exists());
    assert!(!dir.path().join("default.sav").exists());
}

#[test]
fn failed_save_reports_and_prompts_again() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    fs::write(&blocker, b"x").unwrap();
    let default_path = dir.path().join("ok.sav");
    let mut session = session(Player::new(0), corridor(RoomContent::Empty));

    let script = format!("-1\n{}\n-1\n\n", blocker.join("nested.sav").display());
    let (completion, output) = play(&mut session, &script, &default_path);

    assert!(output.contains("Could not save to"));
    assert_eq!(completion, AppCompletion::SavedAndQuit(default_path.clone()));
    assert!(default_path.exists());
}

#[test]
fn defeat_ends_the_loop_without_a_save() {
    let dir = tempdir().unwrap();
    let default_path = dir.path().join("never.sav");
    let brute = Monster::wounded(MonsterKind::Troll, 100, 100);
    let mut session =
        session(Player { location: 0, hp: 1, damage: 1 }, corridor(RoomContent::Monster(brute)));

    let (completion, output) = play(&mut session, "1\n-1\n\n", &default_path);

    assert_eq!(completion, AppCompletion::Defeated);
    assert_eq!(session.status(), SessionStatus::Defeated);
    assert!(output.contains("The Troll has slain you."));
    assert!(!default_path.exists());
}

#[test]
fn end_of_input_quits_without_saving() {
    let dir = tempdir().unwrap();
    let default_path = dir.path().join("never.sav");
    let mut session = session(Player::new(0), corridor(RoomContent::Empty));

    let (completion, output) = play(&mut session, "", &default_path);

    assert_eq!(completion, AppCompletion::InputClosed);
    assert_eq!(session.status(), SessionStatus::InProgress);
    assert!(output.contains("leaving without saving"));
    assert!(!default_path.exists());
}

#[test]
fn generated_game_plays_to_an_ending() {
    let dir = tempdir().unwrap();
    let mut session = Session::new_game(6, 2024).unwrap();
    let mut script = String::new();
    // Non-adjacent picks are rejected; the script runs out if nothing else ends the game.
    for _ in 0..40 {
        script.push_str("0\n1\n2\n3\n4\n5\n");
    }

    let (completion, _) = play(&mut session, &script, &dir.path().join("walk.sav"));

    assert!(matches!(
        completion,
        AppCompletion::Victory | AppCompletion::Defeated | AppCompletion::InputClosed
    ));
}
