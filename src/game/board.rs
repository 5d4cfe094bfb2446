//! # Board Module
//!
//! Grid storage and the movement resolution algorithm.
//!
//! A board owns a total grid — every cell holds exactly one [`BoardItem`],
//! with void placeholders filling the gaps — plus two membership lists
//! (movable and immovable occupants) and an id-to-position index. The grid
//! is authoritative; lists and index are synchronized views maintained by
//! the placement and extraction entry points.

use crate::game::items::{BoardItem, ItemKind};
use crate::game::{Direction, ItemId, Position};
use crate::{config, TatamiError, TatamiResult};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Construction parameters for a [`Board`], with documented defaults.
///
/// # Examples
///
/// ```
/// use tatami::BoardConfig;
///
/// let config = BoardConfig::default();
/// assert_eq!((config.width, config.height), (10, 10));
/// assert_eq!(config.ui_board_void_cell, " ");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Board name, surfaced in errors and logs
    pub name: String,
    /// Number of columns, positive
    pub width: u32,
    /// Number of rows, positive
    pub height: u32,
    /// Where the session places the player on level entry
    pub player_starting_position: Position,
    /// Left border string, one cell wide when rendered
    pub ui_border_left: String,
    /// Right border string
    pub ui_border_right: String,
    /// Top border string
    pub ui_border_top: String,
    /// Bottom border string
    pub ui_border_bottom: String,
    /// Display model for empty cells
    pub ui_board_void_cell: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            name: "Board".to_string(),
            width: config::DEFAULT_BOARD_WIDTH,
            height: config::DEFAULT_BOARD_HEIGHT,
            player_starting_position: Position::origin(),
            ui_border_left: "|".to_string(),
            ui_border_right: "|".to_string(),
            ui_border_top: "-".to_string(),
            ui_border_bottom: "-".to_string(),
            ui_board_void_cell: " ".to_string(),
        }
    }
}

impl BoardConfig {
    /// Sets all four borders to the same string.
    pub fn with_borders(mut self, border: &str) -> Self {
        self.ui_border_left = border.to_string();
        self.ui_border_right = border.to_string();
        self.ui_border_top = border.to_string();
        self.ui_border_bottom = border.to_string();
        self
    }
}

/// What a call to [`Board::move_item`] did.
///
/// Exactly one outcome applies per call; positions carried by the moving
/// variants are where the mover ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// Walked onto an overlappable occupant
    Moved(Position),
    /// Collected the occupant into the mover's inventory and moved
    PickedUp(Position),
    /// Triggered a non-overlappable actionnable; the mover stayed put
    Triggered,
    /// Triggered an overlappable actionnable and walked onto it
    TriggeredAndMoved(Position),
    /// The occupant blocked the move (or refused the mover's role)
    Blocked,
    /// The target fell outside the board; nothing happened
    OutOfBounds,
}

impl MoveOutcome {
    /// The mover's new position, when the outcome relocated it.
    pub fn moved_to(&self) -> Option<Position> {
        match self {
            MoveOutcome::Moved(position)
            | MoveOutcome::PickedUp(position)
            | MoveOutcome::TriggeredAndMoved(position) => Some(*position),
            _ => None,
        }
    }
}

/// A single level's grid and occupant state.
///
/// # Examples
///
/// ```
/// use tatami::{Board, BoardConfig, BoardItem, Position};
///
/// let mut board = Board::new(BoardConfig::default()).unwrap();
/// let id = board
///     .place_item(BoardItem::wall("#".to_string()), Position::new(3, 4))
///     .unwrap();
/// assert_eq!(board.item(Position::new(3, 4)).unwrap().id(), id);
/// ```
#[derive(Debug)]
pub struct Board {
    name: String,
    width: u32,
    height: u32,
    grid: Vec<Vec<BoardItem>>,
    movables: Vec<ItemId>,
    immovables: Vec<ItemId>,
    index: HashMap<ItemId, Position>,
    void_model: String,
    player_starting_position: Position,
    /// Border strings consumed by the renderer
    pub ui_border_left: String,
    pub ui_border_right: String,
    pub ui_border_top: String,
    pub ui_border_bottom: String,
}

impl Board {
    /// Creates a board full of void cells from the given configuration.
    ///
    /// Fails with `InvalidType` when either dimension is zero. Dimensions
    /// above 80 are accepted with a warning; older terminals will not
    /// render them comfortably.
    pub fn new(board_config: BoardConfig) -> TatamiResult<Self> {
        if board_config.width == 0 || board_config.height == 0 {
            return Err(TatamiError::InvalidType(format!(
                "board dimensions must be positive, got {}x{}",
                board_config.width, board_config.height
            )));
        }
        if board_config.width > config::MAX_COMFORTABLE_DIMENSION
            || board_config.height > config::MAX_COMFORTABLE_DIMENSION
        {
            warn!(
                "board '{}' is {}x{}; dimensions above {} render poorly on older terminals",
                board_config.name,
                board_config.width,
                board_config.height,
                config::MAX_COMFORTABLE_DIMENSION
            );
        }

        let grid = (0..board_config.height)
            .map(|y| {
                (0..board_config.width)
                    .map(|x| {
                        let mut void = BoardItem::void_cell(board_config.ui_board_void_cell.clone());
                        void.set_position(Position::new(x as i32, y as i32));
                        void
                    })
                    .collect()
            })
            .collect();

        Ok(Self {
            name: board_config.name,
            width: board_config.width,
            height: board_config.height,
            grid,
            movables: Vec::new(),
            immovables: Vec::new(),
            index: HashMap::new(),
            void_model: board_config.ui_board_void_cell,
            player_starting_position: board_config.player_starting_position,
            ui_border_left: board_config.ui_border_left,
            ui_border_right: board_config.ui_border_right,
            ui_border_top: board_config.ui_border_top,
            ui_border_bottom: board_config.ui_border_bottom,
        })
    }

    /// Board name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)` in cells.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Where the session places the player on level entry.
    pub fn player_starting_position(&self) -> Position {
        self.player_starting_position
    }

    /// Display model used for empty cells.
    pub fn void_model(&self) -> &str {
        &self.void_model
    }

    /// Whether a position lies within the board, each coordinate checked
    /// against its own axis.
    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as u32) < self.width
            && (position.y as u32) < self.height
    }

    /// Bounds-checked read of the item at `position`.
    pub fn item(&self, position: Position) -> TatamiResult<&BoardItem> {
        if !self.contains(position) {
            return Err(self.out_of_bounds(position));
        }
        Ok(&self.grid[position.y as usize][position.x as usize])
    }

    /// Bounds-checked mutable access to the item at `position`.
    ///
    /// Lets callers adjust item state (models, character stats) in place;
    /// relocating an item goes through [`Board::place_item`] and the
    /// extraction methods instead.
    pub fn item_mut(&mut self, position: Position) -> TatamiResult<&mut BoardItem> {
        if !self.contains(position) {
            return Err(self.out_of_bounds(position));
        }
        Ok(&mut self.grid[position.y as usize][position.x as usize])
    }

    /// Current position of a placed item.
    pub fn position_of(&self, id: ItemId) -> Option<Position> {
        self.index.get(&id).copied()
    }

    /// Places an item at `position`, stamping the item's own position and
    /// registering it in the matching membership list.
    ///
    /// Whatever occupied the cell is dropped, and its membership entries
    /// with it. Returns the placed item's id.
    pub fn place_item(&mut self, mut item: BoardItem, position: Position) -> TatamiResult<ItemId> {
        if !self.contains(position) {
            return Err(self.out_of_bounds(position));
        }
        let id = item.id();
        item.set_position(position);

        let cell = &mut self.grid[position.y as usize][position.x as usize];
        let previous = std::mem::replace(cell, item);
        if !previous.is_void() {
            self.detach(previous.id());
        }

        match self.grid[position.y as usize][position.x as usize].kind() {
            ItemKind::Character(_) => {
                self.movables.push(id);
                self.index.insert(id, position);
            }
            ItemKind::Structure | ItemKind::Actionnable { .. } => {
                self.immovables.push(id);
                self.index.insert(id, position);
            }
            ItemKind::Void => {}
        }
        Ok(id)
    }

    /// Removes whatever occupies `position` and leaves a fresh void cell.
    pub fn clear_cell(&mut self, position: Position) -> TatamiResult<()> {
        self.take_item(position).map(|_| ())
    }

    /// Extracts the item at `position`, leaving a void cell behind.
    ///
    /// The extracted item keeps its last position stamped; callers that
    /// shelve it off-board should clear it.
    pub fn take_item(&mut self, position: Position) -> TatamiResult<BoardItem> {
        if !self.contains(position) {
            return Err(self.out_of_bounds(position));
        }
        let mut void = BoardItem::void_cell(self.void_model.clone());
        void.set_position(position);
        let taken =
            std::mem::replace(&mut self.grid[position.y as usize][position.x as usize], void);
        if !taken.is_void() {
            self.detach(taken.id());
        }
        Ok(taken)
    }

    /// Extracts an item by identity, wherever it currently sits.
    pub fn take_item_by_id(&mut self, id: ItemId) -> TatamiResult<BoardItem> {
        let position = self.position_of(id).ok_or_else(|| {
            TatamiError::InvalidType(format!("item {} is not placed on board '{}'", id, self.name))
        })?;
        self.take_item(position)
    }

    /// All movable occupants, in placement order.
    pub fn movables(&self) -> Vec<&BoardItem> {
        self.members(&self.movables)
    }

    /// All immovable occupants, in placement order.
    pub fn immovables(&self) -> Vec<&BoardItem> {
        self.members(&self.immovables)
    }

    /// Positions of every void cell, in row-major order.
    pub fn empty_cells(&self) -> Vec<Position> {
        let mut empties = Vec::new();
        for row in &self.grid {
            for item in row {
                if item.is_void() {
                    if let Some(position) = item.position() {
                        empties.push(position);
                    }
                }
            }
        }
        empties
    }

    /// Moves an item `step` cells in `direction`, resolving whatever
    /// occupies the target cell.
    ///
    /// The mover must be a character that can currently move, else the call
    /// fails with `NotMovable`. A target beyond the board edge is a silent
    /// no-op reported as [`MoveOutcome::OutOfBounds`]. Otherwise the target
    /// occupant decides, first match wins:
    ///
    /// 1. overlappable actionnable — authorized role: trigger, then walk
    ///    onto it (the actionnable is consumed); wrong role: blocked.
    /// 2. overlappable — walk onto it.
    /// 3. pickable — mover with an inventory collects it and moves; a mover
    ///    without one is blocked.
    /// 4. non-overlappable actionnable — authorized role: trigger without
    ///    moving; wrong role: blocked.
    /// 5. anything else — blocked.
    ///
    /// A successful relocation always leaves a void cell at the origin. All
    /// predicates are checked before any mutation: the call either applies
    /// its full outcome or none of it.
    ///
    /// # Examples
    ///
    /// ```
    /// use tatami::{Board, BoardConfig, BoardItem, Direction, MoveOutcome, Position};
    ///
    /// let mut board = Board::new(BoardConfig::default()).unwrap();
    /// let id = board
    ///     .place_item(
    ///         BoardItem::player("hero".to_string(), "@".to_string()),
    ///         Position::origin(),
    ///     )
    ///     .unwrap();
    /// let outcome = board.move_item(id, Direction::Right, 1).unwrap();
    /// assert_eq!(outcome, MoveOutcome::Moved(Position::new(1, 0)));
    /// ```
    pub fn move_item(
        &mut self,
        id: ItemId,
        direction: Direction,
        step: u32,
    ) -> TatamiResult<MoveOutcome> {
        if step == 0 {
            return Err(TatamiError::InvalidType(
                "step must be a positive integer".to_string(),
            ));
        }
        let origin = self.position_of(id).ok_or_else(|| {
            TatamiError::InvalidType(format!("item {} is not placed on board '{}'", id, self.name))
        })?;

        let (role, has_inventory) = {
            let mover = self.item(origin)?;
            match mover.kind() {
                ItemKind::Character(character) if character.can_move() => {
                    (character.role, character.has_inventory())
                }
                _ => return Err(TatamiError::NotMovable(mover.name.clone())),
            }
        };

        let delta = direction.to_delta();
        let target = Position::new(
            origin.x + delta.x * step as i32,
            origin.y + delta.y * step as i32,
        );
        if !self.contains(target) {
            debug!(
                "move from ({},{}) toward {:?} lands outside board '{}'",
                origin.x, origin.y, direction, self.name
            );
            return Ok(MoveOutcome::OutOfBounds);
        }

        let (overlappable, pickable, perm) = {
            let occupant = self.item(target)?;
            let perm = match occupant.kind() {
                ItemKind::Actionnable { perm, .. } => Some(*perm),
                _ => None,
            };
            (occupant.is_overlappable(), occupant.is_pickable(), perm)
        };

        match (overlappable, pickable, perm) {
            // Overlappable actionnable: trigger, then walk onto it.
            (true, _, Some(perm)) => {
                if perm.allows(role) {
                    self.activate_at(target);
                    self.relocate(origin, target)?;
                    Ok(MoveOutcome::TriggeredAndMoved(target))
                } else {
                    Ok(MoveOutcome::Blocked)
                }
            }
            // Plain overlappable occupant.
            (true, _, None) => {
                self.relocate(origin, target)?;
                Ok(MoveOutcome::Moved(target))
            }
            // Pickable occupant: collected only by movers with an inventory.
            (false, true, _) => {
                if has_inventory {
                    let mut picked = self.take_item(target)?;
                    picked.clear_position();
                    self.relocate(origin, target)?;
                    if let Some(character) = self.grid[target.y as usize][target.x as usize]
                        .as_character_mut()
                    {
                        if let Some(inventory) = character.inventory.as_mut() {
                            inventory.add_item(picked);
                        }
                    }
                    Ok(MoveOutcome::PickedUp(target))
                } else {
                    Ok(MoveOutcome::Blocked)
                }
            }
            // Barrier that can be triggered but not walked through.
            (false, false, Some(perm)) => {
                if perm.allows(role) {
                    self.activate_at(target);
                    Ok(MoveOutcome::Triggered)
                } else {
                    Ok(MoveOutcome::Blocked)
                }
            }
            // Solid, non-interactive occupant.
            (false, false, None) => Ok(MoveOutcome::Blocked),
        }
    }

    fn members(&self, ids: &[ItemId]) -> Vec<&BoardItem> {
        ids.iter()
            .filter_map(|id| self.position_of(*id))
            .filter_map(|position| self.item(position).ok())
            .collect()
    }

    fn relocate(&mut self, origin: Position, target: Position) -> TatamiResult<()> {
        let mover = self.take_item(origin)?;
        self.place_item(mover, target)?;
        Ok(())
    }

    fn activate_at(&mut self, position: Position) {
        let cell = &mut self.grid[position.y as usize][position.x as usize];
        if let ItemKind::Actionnable { effect, .. } = cell.kind_mut() {
            effect.activate();
        }
    }

    fn detach(&mut self, id: ItemId) {
        self.movables.retain(|member| *member != id);
        self.immovables.retain(|member| *member != id);
        self.index.remove(&id);
    }

    fn out_of_bounds(&self, position: Position) -> TatamiError {
        TatamiError::OutOfBounds {
            x: position.x,
            y: position.y,
            width: self.width,
            height: self.height,
        }
    }
}
