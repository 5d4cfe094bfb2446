//! # Display Module
//!
//! Board and stat formatting helpers.

use crate::config;
use crate::game::board::Board;
use crate::game::session::Game;
use crate::{Position, TatamiResult};

/// Formats a board as text, borders included, one line per row.
///
/// Each cell contributes its item's display model; border strings are
/// assumed to render one cell wide, like models.
///
/// # Examples
///
/// ```
/// use tatami::{render_board, Board, BoardConfig};
///
/// let board = Board::new(BoardConfig {
///     width: 3,
///     height: 1,
///     ..BoardConfig::default()
/// })
/// .unwrap();
/// assert_eq!(render_board(&board).unwrap(), "-----\n|   |\n-----\n");
/// ```
pub fn render_board(board: &Board) -> TatamiResult<String> {
    let width = board.width() as usize;
    let mut out = String::new();

    out.push_str(&board.ui_border_top.repeat(width + 2));
    out.push('\n');
    for y in 0..board.height() {
        out.push_str(&board.ui_border_left);
        for x in 0..board.width() {
            out.push_str(&board.item(Position::new(x as i32, y as i32))?.model);
        }
        out.push_str(&board.ui_border_right);
        out.push('\n');
    }
    out.push_str(&board.ui_border_bottom.repeat(width + 2));
    out.push('\n');
    Ok(out)
}

/// Formats the player's name, a proportional health bar, and the inventory
/// score.
///
/// The bar is [`config::STAT_BAR_WIDTH`] cells wide: `life_model` glyphs for
/// the filled portion, `void_model` for the rest. Returns an empty string
/// when no player is set.
pub fn render_player_stats(game: &Game, life_model: &str, void_model: &str) -> String {
    let stats = match game.player_stats() {
        Some(stats) => stats,
        None => return String::new(),
    };
    let width = config::STAT_BAR_WIDTH;
    let filled = if stats.max_hp > 0 {
        (((stats.hp as f64 / stats.max_hp as f64) * width as f64) as usize).min(width)
    } else {
        0
    };
    format!(
        " {} [{}{}]     Score: {}",
        stats.name,
        life_model.repeat(filled),
        void_model.repeat(width - filled),
        stats.inventory_value
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::BoardConfig;
    use crate::game::items::BoardItem;
    use crate::game::session::GameConfig;

    #[test]
    fn test_render_board_with_items() {
        let mut board = Board::new(BoardConfig {
            width: 3,
            height: 2,
            ..BoardConfig::default()
        })
        .unwrap();
        board
            .place_item(BoardItem::wall("#".to_string()), Position::new(1, 0))
            .unwrap();
        assert_eq!(render_board(&board).unwrap(), "-----\n| # |\n|   |\n-----\n");
    }

    #[test]
    fn test_stats_bar_is_proportional() {
        let mut game = Game::new(GameConfig::default());
        game.set_player(
            BoardItem::player("hero".to_string(), "@".to_string()).with_hp(50, 100),
        )
        .unwrap();
        let line = render_player_stats(&game, "=", "-");
        assert_eq!(line, " hero [==========----------]     Score: 0");
    }

    #[test]
    fn test_stats_without_player_is_empty() {
        let game = Game::new(GameConfig::default());
        assert_eq!(render_player_stats(&game, "=", "-"), "");
    }
}
