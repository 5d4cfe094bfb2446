//! # Tatami Demo
//!
//! Builds a small level, runs a few scripted turns, and prints the board
//! after each one. Mostly useful as a smoke test and a reading example for
//! the library API.

use clap::Parser;
use log::info;
use tatami::{
    render_board, render_player_stats, Activable, Actuator, Board, BoardConfig, BoardItem,
    Direction, Game, GameConfig, PatternActuator, Permission, Position, TatamiResult,
};

/// Command line arguments for the demo.
#[derive(Parser, Debug)]
#[command(name = "tatami")]
#[command(about = "A 2D grid engine for turn-based games")]
#[command(version)]
struct Args {
    /// Random seed for NPC placement and movement
    #[arg(short, long)]
    seed: Option<u64>,

    /// Board width in cells
    #[arg(long, default_value_t = 10)]
    width: u32,

    /// Board height in cells
    #[arg(long, default_value_t = 10)]
    height: u32,

    /// Number of turns to simulate
    #[arg(short, long, default_value_t = 12)]
    turns: u32,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Demo gate that announces activations in the log.
#[derive(Debug)]
struct AnnouncedGate;

impl Activable for AnnouncedGate {
    fn activate(&mut self) {
        info!("the gate clicks open");
    }
}

fn main() -> TatamiResult<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(
            args.log_level
                .parse()
                .unwrap_or(log::LevelFilter::Info),
        )
        .init();

    info!("Starting tatami demo v{}", tatami::VERSION);

    let mut game = build_demo_game(&args)?;

    // The player walks a fixed loop; the NPCs wander on their own.
    let mut script = PatternActuator::new(vec![
        Direction::Right,
        Direction::Right,
        Direction::Down,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ]);

    for turn in 1..=args.turns {
        let outcome = game.move_player(script.next_move(), 1)?;
        info!("turn {}: player move resolved as {:?}", turn, outcome);
        game.actuate_npcs(1)?;

        println!("{}", render_board(game.current_board()?)?);
        println!("{}\n", render_player_stats(&game, "=", "-"));
    }

    Ok(())
}

/// Assembles a single-level game: bordering walls, some loot, a gate, the
/// player, and a couple of NPCs.
fn build_demo_game(args: &Args) -> TatamiResult<Game> {
    let mut game = Game::new(GameConfig {
        name: "demo".to_string(),
        seed: args.seed,
        ..GameConfig::default()
    });

    let mut board = Board::new(BoardConfig {
        name: "courtyard".to_string(),
        width: args.width,
        height: args.height,
        player_starting_position: Position::new(1, 1),
        ..BoardConfig::default()
    })?;

    let width = args.width as i32;
    let height = args.height as i32;
    for x in 0..width {
        board.place_item(BoardItem::wall("#".to_string()), Position::new(x, 0))?;
        board.place_item(BoardItem::wall("#".to_string()), Position::new(x, height - 1))?;
    }
    for y in 1..height - 1 {
        board.place_item(BoardItem::wall("#".to_string()), Position::new(0, y))?;
        board.place_item(BoardItem::wall("#".to_string()), Position::new(width - 1, y))?;
    }

    board.place_item(
        BoardItem::treasure("gem".to_string(), "*".to_string(), 50),
        Position::new(3, 1),
    )?;
    board.place_item(
        BoardItem::treasure("coin".to_string(), "o".to_string(), 10),
        Position::new(2, 3),
    )?;
    board.place_item(
        BoardItem::actionnable(
            "gate".to_string(),
            "+".to_string(),
            Permission::PlayerAuthorized,
            false,
            Box::new(AnnouncedGate),
        ),
        Position::new(4, 2),
    )?;

    game.add_board(1, board);
    game.set_player(BoardItem::player("hero".to_string(), "@".to_string()))?;
    game.change_level(1)?;

    game.add_npc(1, BoardItem::npc("rat".to_string(), "r".to_string()), None)?;
    game.add_npc(
        1,
        BoardItem::npc("crow".to_string(), "c".to_string()).with_step(1),
        None,
    )?;

    Ok(game)
}
