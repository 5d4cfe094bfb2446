//! # Session Module
//!
//! The top-level game object: a registry of numbered levels, the player, and
//! the per-tick driving of autonomous entities.
//!
//! Boards own whatever is placed on them, the player included. The session
//! therefore tracks the player as either a not-yet-placed item or a
//! `(level, id)` handle into the hosting board, and level changes move the
//! item itself between boards — exactly one board hosts the player at any
//! time, by construction.

use crate::game::actuators::RandomActuator;
use crate::game::board::{Board, MoveOutcome};
use crate::game::items::{BoardItem, Role};
use crate::game::{Direction, ItemId, Position};
use crate::{config, TatamiError, TatamiResult};
use log::{debug, info};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Construction parameters for a [`Game`], with documented defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Session name, surfaced in logs
    pub name: String,
    /// Seed for random NPC placement and default actuators; `None` seeds
    /// from entropy
    pub seed: Option<u64>,
    /// Random placement attempts before scanning for empty cells
    pub placement_retry_budget: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            name: "Game".to_string(),
            seed: None,
            placement_retry_budget: config::DEFAULT_PLACEMENT_RETRY_BUDGET,
        }
    }
}

/// Player stat summary consumed by renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub name: String,
    pub hp: i64,
    pub max_hp: i64,
    pub inventory_value: i64,
}

/// Where the player currently lives.
#[derive(Debug)]
enum PlayerSlot {
    /// Set but not yet placed on any board
    Unplaced(BoardItem),
    /// Hosted by the board of `level` under `id`
    OnBoard { level: u32, id: ItemId },
}

#[derive(Debug)]
struct LevelSlot {
    board: Board,
    npcs: Vec<ItemId>,
}

/// The session object coordinating levels, the player, and NPCs.
///
/// # Examples
///
/// ```
/// use tatami::{Board, BoardConfig, BoardItem, Game, GameConfig};
///
/// let mut game = Game::new(GameConfig::default());
/// game.add_board(1, Board::new(BoardConfig::default()).unwrap());
/// game.set_player(BoardItem::player("hero".to_string(), "@".to_string())).unwrap();
/// game.change_level(1).unwrap();
/// assert_eq!(game.current_level(), Some(1));
/// ```
#[derive(Debug)]
pub struct Game {
    /// Session name
    pub name: String,
    levels: HashMap<u32, LevelSlot>,
    current_level: Option<u32>,
    player: Option<PlayerSlot>,
    rng: StdRng,
    placement_retry_budget: u32,
    sections: HashMap<String, serde_json::Value>,
}

impl Game {
    /// Creates a session from the given configuration.
    pub fn new(game_config: GameConfig) -> Self {
        let rng = match game_config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            name: game_config.name,
            levels: HashMap::new(),
            current_level: None,
            player: None,
            rng,
            placement_retry_budget: game_config.placement_retry_budget,
            sections: HashMap::new(),
        }
    }

    /// Registers a board under a level number, with an empty NPC list.
    /// Re-registering a level replaces its board and NPCs.
    pub fn add_board(&mut self, level: u32, board: Board) {
        self.levels.insert(
            level,
            LevelSlot {
                board,
                npcs: Vec::new(),
            },
        );
    }

    /// The board registered under `level`.
    pub fn board(&self, level: u32) -> TatamiResult<&Board> {
        self.levels
            .get(&level)
            .map(|slot| &slot.board)
            .ok_or_else(|| Self::unregistered(level))
    }

    /// Mutable access to the board registered under `level`.
    pub fn board_mut(&mut self, level: u32) -> TatamiResult<&mut Board> {
        self.levels
            .get_mut(&level)
            .map(|slot| &mut slot.board)
            .ok_or_else(|| Self::unregistered(level))
    }

    /// The level the player is currently on, if any.
    pub fn current_level(&self) -> Option<u32> {
        self.current_level
    }

    /// The board of the current level.
    pub fn current_board(&self) -> TatamiResult<&Board> {
        match self.current_level {
            Some(level) => self.board(level),
            None => Err(TatamiError::InvalidLevel(
                "no current level is set".to_string(),
            )),
        }
    }

    /// Mutable access to the board of the current level.
    pub fn current_board_mut(&mut self) -> TatamiResult<&mut Board> {
        match self.current_level {
            Some(level) => self.board_mut(level),
            None => Err(TatamiError::InvalidLevel(
                "no current level is set".to_string(),
            )),
        }
    }

    /// Sets the player for this session.
    ///
    /// Fails with `InvalidType` unless the item is a player character. A
    /// previously placed player is removed from its board first.
    pub fn set_player(&mut self, player: BoardItem) -> TatamiResult<()> {
        match player.as_character() {
            Some(character) if character.role == Role::Player => {}
            _ => {
                return Err(TatamiError::InvalidType(
                    "the player must be a player character".to_string(),
                ))
            }
        }
        if let Some(PlayerSlot::OnBoard { level, id }) = self.player.take() {
            if let Some(slot) = self.levels.get_mut(&level) {
                let _ = slot.board.take_item_by_id(id);
            }
        }
        self.player = Some(PlayerSlot::Unplaced(player));
        Ok(())
    }

    /// The player item, wherever it currently lives.
    pub fn player(&self) -> Option<&BoardItem> {
        match self.player.as_ref()? {
            PlayerSlot::Unplaced(item) => Some(item),
            PlayerSlot::OnBoard { level, id } => {
                let slot = self.levels.get(level)?;
                let position = slot.board.position_of(*id)?;
                slot.board.item(position).ok()
            }
        }
    }

    /// Mutable access to the player item.
    pub fn player_mut(&mut self) -> Option<&mut BoardItem> {
        match self.player.as_mut()? {
            PlayerSlot::Unplaced(item) => Some(item),
            PlayerSlot::OnBoard { level, id } => {
                let (level, id) = (*level, *id);
                let slot = self.levels.get_mut(&level)?;
                let position = slot.board.position_of(id)?;
                slot.board.item_mut(position).ok()
            }
        }
    }

    /// The player's position on its hosting board, if placed.
    pub fn player_position(&self) -> Option<Position> {
        self.player().and_then(|item| item.position())
    }

    /// Player stat summary for renderers.
    pub fn player_stats(&self) -> Option<PlayerStats> {
        let item = self.player()?;
        let character = item.as_character()?;
        Some(PlayerStats {
            name: item.name.clone(),
            hp: character.hp,
            max_hp: character.max_hp,
            inventory_value: character
                .inventory
                .as_ref()
                .map(|inventory| inventory.value())
                .unwrap_or(0),
        })
    }

    /// Makes `level` current and relocates the player to its starting
    /// position.
    ///
    /// Fails with `UndefinedPlayer` when no player is set and with
    /// `InvalidLevel` when the level is not registered. The player's cell on
    /// whichever board actually hosts it is cleared before placement on the
    /// new board.
    pub fn change_level(&mut self, level: u32) -> TatamiResult<()> {
        if self.player.is_none() {
            return Err(TatamiError::UndefinedPlayer);
        }
        let start = {
            let board = self.board(level)?;
            let start = board.player_starting_position();
            if !board.contains(start) {
                return Err(TatamiError::OutOfBounds {
                    x: start.x,
                    y: start.y,
                    width: board.width(),
                    height: board.height(),
                });
            }
            start
        };

        let mut player_item = match self.player.take() {
            None => return Err(TatamiError::UndefinedPlayer),
            Some(PlayerSlot::Unplaced(item)) => item,
            Some(PlayerSlot::OnBoard { level: hosting, id }) => match self
                .levels
                .get_mut(&hosting)
                .map(|slot| slot.board.take_item_by_id(id))
            {
                Some(Ok(item)) => item,
                Some(Err(error)) => {
                    self.player = Some(PlayerSlot::OnBoard { level: hosting, id });
                    return Err(error);
                }
                None => {
                    self.player = Some(PlayerSlot::OnBoard { level: hosting, id });
                    return Err(Self::unregistered(hosting));
                }
            },
        };
        player_item.clear_position();

        let slot = match self.levels.get_mut(&level) {
            Some(slot) => slot,
            None => {
                self.player = Some(PlayerSlot::Unplaced(player_item));
                return Err(Self::unregistered(level));
            }
        };
        let id = slot.board.place_item(player_item, start)?;
        self.current_level = Some(level);
        self.player = Some(PlayerSlot::OnBoard { level, id });
        info!("player entered level {} at ({},{})", level, start.x, start.y);
        Ok(())
    }

    /// Moves the player on its hosting board.
    pub fn move_player(&mut self, direction: Direction, step: u32) -> TatamiResult<MoveOutcome> {
        match &self.player {
            None => Err(TatamiError::UndefinedPlayer),
            Some(PlayerSlot::Unplaced(_)) => Err(TatamiError::InvalidType(
                "the player is not on a board yet; call change_level first".to_string(),
            )),
            Some(PlayerSlot::OnBoard { level, id }) => {
                let (level, id) = (*level, *id);
                let slot = self
                    .levels
                    .get_mut(&level)
                    .ok_or_else(|| Self::unregistered(level))?;
                slot.board.move_item(id, direction, step)
            }
        }
    }

    /// Registers an NPC on a level's board and appends it to that level's
    /// tick list.
    ///
    /// With no position, an empty cell is chosen at random: a bounded number
    /// of random probes first, then a scan of the remaining empty cells; a
    /// board with no empty cell fails with `NoSpaceAvailable`. An NPC
    /// without a step gets 1, and one without an actuator gets a random
    /// actuator over the cardinal directions.
    pub fn add_npc(
        &mut self,
        level: u32,
        mut npc: BoardItem,
        position: Option<Position>,
    ) -> TatamiResult<ItemId> {
        match npc.as_character() {
            Some(character) if character.role == Role::Npc => {}
            _ => {
                return Err(TatamiError::InvalidType(
                    "the npc must be an npc character".to_string(),
                ))
            }
        }
        if !self.levels.contains_key(&level) {
            return Err(Self::unregistered(level));
        }

        if let Some(character) = npc.as_character_mut() {
            if character.step.is_none() {
                character.step = Some(config::DEFAULT_NPC_STEP);
            }
            if character.actuator.is_none() {
                let seed = self.rng.gen();
                character.actuator = Some(Box::new(RandomActuator::with_seed(
                    Direction::cardinal(),
                    seed,
                )));
            }
        }

        let target = match position {
            Some(position) => position,
            None => self.find_empty_position(level)?,
        };
        let slot = self
            .levels
            .get_mut(&level)
            .ok_or_else(|| Self::unregistered(level))?;
        debug!(
            "placing npc '{}' at ({},{}) on board '{}'",
            npc.name,
            target.x,
            target.y,
            slot.board.name()
        );
        let id = slot.board.place_item(npc, target)?;
        slot.npcs.push(id);
        Ok(id)
    }

    /// The NPCs registered on a level, in registration order.
    pub fn npcs(&self, level: u32) -> TatamiResult<Vec<&BoardItem>> {
        let slot = self
            .levels
            .get(&level)
            .ok_or_else(|| Self::unregistered(level))?;
        Ok(slot
            .npcs
            .iter()
            .filter_map(|id| slot.board.position_of(*id))
            .filter_map(|position| slot.board.item(position).ok())
            .collect())
    }

    /// Queries each NPC's actuator and moves it, in registration order.
    pub fn actuate_npcs(&mut self, level: u32) -> TatamiResult<()> {
        let ids = self
            .levels
            .get(&level)
            .ok_or_else(|| Self::unregistered(level))?
            .npcs
            .clone();
        for id in ids {
            let slot = self
                .levels
                .get_mut(&level)
                .ok_or_else(|| Self::unregistered(level))?;
            let board = &mut slot.board;
            let position = match board.position_of(id) {
                Some(position) => position,
                None => {
                    debug!("npc {} is no longer on board '{}'", id, board.name());
                    continue;
                }
            };
            let (direction, step) = {
                let item = board.item_mut(position)?;
                let character = match item.as_character_mut() {
                    Some(character) => character,
                    None => continue,
                };
                let step = character.step.unwrap_or(config::DEFAULT_NPC_STEP);
                match character.actuator.as_mut() {
                    Some(actuator) => (actuator.next_move(), step),
                    None => continue,
                }
            };
            board.move_item(id, direction, step)?;
        }
        Ok(())
    }

    /// Loads a JSON file into a named, opaque configuration section.
    ///
    /// The engine does not interpret the contents; they are for the
    /// surrounding application to read back via
    /// [`Game::config_section`].
    pub fn load_config<P: AsRef<Path>>(&mut self, path: P, section: &str) -> TatamiResult<()> {
        let text = std::fs::read_to_string(path)?;
        let value: serde_json::Value = serde_json::from_str(&text)?;
        self.sections.insert(section.to_string(), value);
        Ok(())
    }

    /// A previously loaded configuration section.
    pub fn config_section(&self, section: &str) -> Option<&serde_json::Value> {
        self.sections.get(section)
    }

    fn find_empty_position(&mut self, level: u32) -> TatamiResult<Position> {
        let board = &self
            .levels
            .get(&level)
            .ok_or_else(|| Self::unregistered(level))?
            .board;
        let (width, height) = board.size();
        for _ in 0..self.placement_retry_budget {
            let candidate = Position::new(
                self.rng.gen_range(0..width as i32),
                self.rng.gen_range(0..height as i32),
            );
            if board.item(candidate)?.is_void() {
                return Ok(candidate);
            }
        }
        let empties = board.empty_cells();
        if empties.is_empty() {
            return Err(TatamiError::NoSpaceAvailable(board.name().to_string()));
        }
        Ok(empties[self.rng.gen_range(0..empties.len())])
    }

    fn unregistered(level: u32) -> TatamiError {
        TatamiError::InvalidLevel(format!("level {} is not registered", level))
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
