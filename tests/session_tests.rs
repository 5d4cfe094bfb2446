//! Integration tests for the session object: level registration and
//! transitions, NPC registration and ticking, config sections.

use std::io::Write;
use tatami::{
    Board, BoardConfig, BoardItem, Direction, Game, GameConfig, MoveOutcome, PatternActuator,
    Position, TatamiError,
};

fn board_with_start(width: u32, height: u32, start: Position) -> Board {
    Board::new(BoardConfig {
        width,
        height,
        player_starting_position: start,
        ..BoardConfig::default()
    })
    .expect("board construction should succeed")
}

fn seeded_game() -> Game {
    Game::new(GameConfig {
        seed: Some(42),
        ..GameConfig::default()
    })
}

fn hero() -> BoardItem {
    BoardItem::player("hero".to_string(), "@".to_string())
}

/// Level changes need a player first.
#[test]
fn test_change_level_requires_player() {
    let mut game = seeded_game();
    game.add_board(1, board_with_start(5, 5, Position::origin()));

    assert!(matches!(
        game.change_level(1),
        Err(TatamiError::UndefinedPlayer)
    ));
}

/// Level changes need a registered level.
#[test]
fn test_change_level_requires_registered_level() {
    let mut game = seeded_game();
    game.set_player(hero()).expect("player is valid");

    assert!(matches!(
        game.change_level(7),
        Err(TatamiError::InvalidLevel(_))
    ));
}

/// Entering a level places the player at the board's starting position.
#[test]
fn test_change_level_places_player_at_start() {
    let mut game = seeded_game();
    game.add_board(1, board_with_start(5, 5, Position::new(2, 3)));
    game.set_player(hero()).expect("player is valid");

    game.change_level(1).expect("level change should succeed");

    assert_eq!(game.current_level(), Some(1));
    assert_eq!(game.player_position(), Some(Position::new(2, 3)));
    let board = game.current_board().expect("current board exists");
    let occupant = board.item(Position::new(2, 3)).expect("in bounds");
    assert_eq!(occupant.name, "hero");
}

/// Switching levels clears the player's cell on the board it was actually
/// on, then re-homes it.
#[test]
fn test_change_level_clears_previous_board() {
    let mut game = seeded_game();
    game.add_board(1, board_with_start(5, 5, Position::origin()));
    game.add_board(2, board_with_start(6, 4, Position::new(3, 2)));
    game.set_player(hero()).expect("player is valid");
    game.change_level(1).expect("level change should succeed");

    game.change_level(2).expect("level change should succeed");

    let first = game.board(1).expect("level 1 exists");
    assert!(first.item(Position::origin()).expect("in bounds").is_void());
    assert!(first.movables().is_empty());
    assert_eq!(game.current_level(), Some(2));
    assert_eq!(game.player_position(), Some(Position::new(3, 2)));
}

/// Replacing the player removes the old one from its board.
#[test]
fn test_set_player_replaces_previous() {
    let mut game = seeded_game();
    game.add_board(1, board_with_start(5, 5, Position::origin()));
    game.set_player(hero()).expect("player is valid");
    game.change_level(1).expect("level change should succeed");

    game.set_player(BoardItem::player("newcomer".to_string(), "&".to_string()))
        .expect("player is valid");

    let board = game.board(1).expect("level 1 exists");
    assert!(board.item(Position::origin()).expect("in bounds").is_void());
    assert_eq!(
        game.player().map(|item| item.name.as_str()),
        Some("newcomer")
    );
    assert_eq!(game.player_position(), None);
}

/// Moving the player through the session updates position and score.
#[test]
fn test_move_player_collects_treasure() {
    let mut game = seeded_game();
    let mut board = board_with_start(5, 5, Position::origin());
    board
        .place_item(
            BoardItem::treasure("gem".to_string(), "*".to_string(), 50),
            Position::new(1, 0),
        )
        .expect("treasure placement should succeed");
    game.add_board(1, board);
    game.set_player(hero()).expect("player is valid");
    game.change_level(1).expect("level change should succeed");

    let outcome = game
        .move_player(Direction::Right, 1)
        .expect("move should resolve");

    assert_eq!(outcome, MoveOutcome::PickedUp(Position::new(1, 0)));
    let stats = game.player_stats().expect("player is set");
    assert_eq!(stats.inventory_value, 50);
    assert_eq!(stats.name, "hero");
}

/// Moving before any level change is a usage error.
#[test]
fn test_move_player_requires_placement() {
    let mut game = seeded_game();
    game.set_player(hero()).expect("player is valid");

    assert!(matches!(
        game.move_player(Direction::Right, 1),
        Err(TatamiError::InvalidType(_))
    ));
}

/// Registration fills in the default step and actuator.
#[test]
fn test_add_npc_applies_defaults() {
    let mut game = seeded_game();
    game.add_board(1, board_with_start(5, 5, Position::origin()));

    game.add_npc(
        1,
        BoardItem::npc("rat".to_string(), "r".to_string()),
        Some(Position::new(2, 2)),
    )
    .expect("npc registration should succeed");

    let npcs = game.npcs(1).expect("level 1 exists");
    assert_eq!(npcs.len(), 1);
    let character = npcs[0].as_character().expect("npc is a character");
    assert_eq!(character.step, Some(1));
    assert!(character.actuator.is_some());
}

/// Only NPC characters can be registered as NPCs.
#[test]
fn test_add_npc_rejects_non_npcs() {
    let mut game = seeded_game();
    game.add_board(1, board_with_start(5, 5, Position::origin()));

    assert!(matches!(
        game.add_npc(1, hero(), None),
        Err(TatamiError::InvalidType(_))
    ));
}

/// Random placement finds the single remaining empty cell, and a full
/// board refuses further registration.
#[test]
fn test_add_npc_random_placement_fills_last_cell() {
    let mut game = seeded_game();
    let mut board = board_with_start(2, 2, Position::origin());
    for position in [Position::new(0, 0), Position::new(1, 0), Position::new(0, 1)] {
        board
            .place_item(BoardItem::wall("#".to_string()), position)
            .expect("wall placement should succeed");
    }
    game.add_board(1, board);

    let id = game
        .add_npc(1, BoardItem::npc("rat".to_string(), "r".to_string()), None)
        .expect("one empty cell remains");
    assert_eq!(
        game.board(1).expect("level 1 exists").position_of(id),
        Some(Position::new(1, 1))
    );

    let result = game.add_npc(1, BoardItem::npc("crow".to_string(), "c".to_string()), None);
    assert!(matches!(result, Err(TatamiError::NoSpaceAvailable(_))));
}

/// Each tick consults the actuator once and moves by the configured step.
#[test]
fn test_actuate_npcs_follows_pattern() {
    let mut game = seeded_game();
    game.add_board(1, board_with_start(5, 5, Position::origin()));
    let npc = BoardItem::npc("rat".to_string(), "r".to_string()).with_actuator(Box::new(
        PatternActuator::new(vec![Direction::Right, Direction::Right, Direction::Down]),
    ));
    let id = game
        .add_npc(1, npc, Some(Position::new(2, 2)))
        .expect("npc registration should succeed");

    let expected = [
        Position::new(3, 2),
        Position::new(4, 2),
        Position::new(4, 3),
    ];
    for position in expected {
        game.actuate_npcs(1).expect("tick should succeed");
        assert_eq!(
            game.board(1).expect("level 1 exists").position_of(id),
            Some(position)
        );
    }
}

/// NPCs tick in registration order: the first one registered moves first
/// and can be blocked by the second before it moves away.
#[test]
fn test_actuate_npcs_in_registration_order() {
    let mut game = seeded_game();
    game.add_board(1, board_with_start(5, 5, Position::origin()));
    let first = game
        .add_npc(
            1,
            BoardItem::npc("first".to_string(), "1".to_string())
                .with_actuator(Box::new(PatternActuator::new(vec![Direction::Right]))),
            Some(Position::new(0, 0)),
        )
        .expect("npc registration should succeed");
    let second = game
        .add_npc(
            1,
            BoardItem::npc("second".to_string(), "2".to_string())
                .with_actuator(Box::new(PatternActuator::new(vec![Direction::Right]))),
            Some(Position::new(1, 0)),
        )
        .expect("npc registration should succeed");

    game.actuate_npcs(1).expect("tick should succeed");

    let board = game.board(1).expect("level 1 exists");
    assert_eq!(board.position_of(first), Some(Position::new(0, 0)));
    assert_eq!(board.position_of(second), Some(Position::new(2, 0)));
}

/// Config files load into named, opaque sections.
#[test]
fn test_load_config_sections() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file should be created");
    write!(file, r#"{{"difficulty": "hard", "lives": 3}}"#).expect("write should succeed");

    let mut game = seeded_game();
    game.load_config(file.path(), "main")
        .expect("config should load");

    let section = game.config_section("main").expect("section exists");
    assert_eq!(section["difficulty"], "hard");
    assert_eq!(section["lives"], 3);
    assert!(game.config_section("controls").is_none());
}

/// A missing config file surfaces as an I/O error.
#[test]
fn test_load_config_missing_file() {
    let mut game = seeded_game();
    let result = game.load_config("/nonexistent/tatami.json", "main");
    assert!(matches!(result, Err(TatamiError::Io(_))));
}
