//! # Items Module
//!
//! Everything that can occupy a board cell, from the empty-cell placeholder
//! to the player itself.
//!
//! Instead of a class hierarchy, capabilities live in two places: a pair of
//! flags (`overlappable`, `pickable`) fixed at construction, and a closed
//! [`ItemKind`] tag carrying variant data. Movement resolution dispatches on
//! both with a single pattern match.

use crate::config;
use crate::game::actuators::Actuator;
use crate::game::inventory::Inventory;
use crate::game::{new_item_id, ItemId, Permission, Position};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A triggerable side effect attached to an actionnable item.
///
/// Implementations are free to do anything when walked onto or into:
/// toggle a door, count activations, teleport the player via shared state.
/// The engine only promises to call [`Activable::activate`] exactly once per
/// successful trigger.
pub trait Activable: fmt::Debug + Send {
    /// Fires the side effect.
    fn activate(&mut self);
}

/// Role of a character, used to match actionnable permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Player,
    Npc,
}

/// A movable entity: the player or an autonomous NPC.
#[derive(Debug)]
pub struct Character {
    /// Role used for permission matching
    pub role: Role,
    /// Current health
    pub hp: i64,
    /// Maximum health
    pub max_hp: i64,
    /// Movement speed in cells per move; NPCs without one get a default at
    /// registration
    pub step: Option<u32>,
    /// A paralyzed character fails movement resolution with `NotMovable`
    pub paralyzed: bool,
    /// Carried items; entities without an inventory cannot pick things up
    pub inventory: Option<Inventory>,
    /// Behavior source queried once per tick; NPCs without one get a random
    /// actuator at registration
    pub actuator: Option<Box<dyn Actuator>>,
}

impl Character {
    /// Whether this character can currently move.
    pub fn can_move(&self) -> bool {
        !self.paralyzed
    }

    /// Whether this character can carry picked-up items.
    pub fn has_inventory(&self) -> bool {
        self.inventory.is_some()
    }
}

/// Closed tag describing what an item *is*, with per-variant data.
#[derive(Debug)]
pub enum ItemKind {
    /// Placeholder for empty cells
    Void,
    /// Static, non-interactive scenery
    Structure,
    /// Static item with a triggerable side effect, gated by a permission
    Actionnable {
        perm: Permission,
        effect: Box<dyn Activable>,
    },
    /// A movable entity
    Character(Character),
}

/// Any entity placeable on a board, including the empty-cell placeholder.
///
/// The two capability flags are immutable after construction; what an item
/// does beyond blocking or yielding is carried by its [`ItemKind`].
///
/// # Examples
///
/// ```
/// use tatami::BoardItem;
///
/// let wall = BoardItem::wall("#".to_string());
/// assert!(!wall.is_overlappable());
/// assert!(!wall.is_pickable());
///
/// let gem = BoardItem::treasure("gem".to_string(), "*".to_string(), 50);
/// assert!(gem.is_pickable());
/// assert_eq!(gem.value(), 50);
/// ```
#[derive(Debug)]
pub struct BoardItem {
    id: ItemId,
    /// Human-readable name
    pub name: String,
    /// Display model, one cell wide when rendered
    pub model: String,
    position: Option<Position>,
    overlappable: bool,
    pickable: bool,
    value: i64,
    kind: ItemKind,
}

impl BoardItem {
    /// Creates an item from explicit capability flags and kind.
    ///
    /// The convenience constructors below cover the common cases; this is the
    /// escape hatch for anything else.
    pub fn new(
        name: String,
        model: String,
        overlappable: bool,
        pickable: bool,
        value: i64,
        kind: ItemKind,
    ) -> Self {
        Self {
            id: new_item_id(),
            name,
            model,
            position: None,
            overlappable,
            pickable,
            value,
            kind,
        }
    }

    /// The empty-cell placeholder. Always overlappable, never pickable.
    pub fn void_cell(model: String) -> Self {
        Self::new("void_cell".to_string(), model, true, false, 0, ItemKind::Void)
    }

    /// A solid, non-interactive structure.
    pub fn wall(model: String) -> Self {
        Self::new("wall".to_string(), model, false, false, 0, ItemKind::Structure)
    }

    /// Scenery a mover can walk through.
    pub fn tree(model: String) -> Self {
        Self::new("tree".to_string(), model, true, false, 0, ItemKind::Structure)
    }

    /// An open passage a mover can walk onto.
    pub fn door(model: String) -> Self {
        Self::new("door".to_string(), model, true, false, 0, ItemKind::Structure)
    }

    /// A collectible item worth `value` inventory points.
    pub fn treasure(name: String, model: String, value: i64) -> Self {
        Self::new(name, model, false, true, value, ItemKind::Structure)
    }

    /// A static item that fires `effect` when triggered by an authorized
    /// role. Overlappable actionnables are consumed by the mover walking
    /// onto them; non-overlappable ones persist and block.
    pub fn actionnable(
        name: String,
        model: String,
        perm: Permission,
        overlappable: bool,
        effect: Box<dyn Activable>,
    ) -> Self {
        Self::new(
            name,
            model,
            overlappable,
            false,
            0,
            ItemKind::Actionnable { perm, effect },
        )
    }

    /// The player character, with a default inventory and step of 1.
    pub fn player(name: String, model: String) -> Self {
        Self::new(
            name,
            model,
            false,
            false,
            0,
            ItemKind::Character(Character {
                role: Role::Player,
                hp: config::DEFAULT_PLAYER_HEALTH,
                max_hp: config::DEFAULT_PLAYER_HEALTH,
                step: Some(1),
                paralyzed: false,
                inventory: Some(Inventory::new()),
                actuator: None,
            }),
        )
    }

    /// An autonomous NPC. Step and actuator may be left unset; the session
    /// fills in defaults at registration.
    pub fn npc(name: String, model: String) -> Self {
        Self::new(
            name,
            model,
            false,
            false,
            0,
            ItemKind::Character(Character {
                role: Role::Npc,
                hp: config::DEFAULT_PLAYER_HEALTH,
                max_hp: config::DEFAULT_PLAYER_HEALTH,
                step: None,
                paralyzed: false,
                inventory: None,
                actuator: None,
            }),
        )
    }

    /// Sets the inventory point value, for collectibles.
    pub fn with_value(mut self, value: i64) -> Self {
        self.value = value;
        self
    }

    /// Sets the movement speed of a character item; no-op on other kinds.
    pub fn with_step(mut self, step: u32) -> Self {
        if let ItemKind::Character(character) = &mut self.kind {
            character.step = Some(step);
        }
        self
    }

    /// Sets the actuator of a character item; no-op on other kinds.
    pub fn with_actuator(mut self, actuator: Box<dyn Actuator>) -> Self {
        if let ItemKind::Character(character) = &mut self.kind {
            character.actuator = Some(actuator);
        }
        self
    }

    /// Sets current and maximum health of a character item; no-op on other
    /// kinds.
    pub fn with_hp(mut self, hp: i64, max_hp: i64) -> Self {
        if let ItemKind::Character(character) = &mut self.kind {
            character.hp = hp;
            character.max_hp = max_hp;
        }
        self
    }

    /// Unique, stable identity of this item.
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Current position, or `None` while the item is off-board.
    pub fn position(&self) -> Option<Position> {
        self.position
    }

    /// Whether a mover can walk onto this item.
    pub fn is_overlappable(&self) -> bool {
        self.overlappable
    }

    /// Whether a mover with an inventory collects this item on contact.
    pub fn is_pickable(&self) -> bool {
        self.pickable
    }

    /// Inventory point value.
    pub fn value(&self) -> i64 {
        self.value
    }

    /// What this item is.
    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    /// Whether this item is the empty-cell placeholder.
    pub fn is_void(&self) -> bool {
        matches!(self.kind, ItemKind::Void)
    }

    /// The character data of this item, if it is one.
    pub fn as_character(&self) -> Option<&Character> {
        match &self.kind {
            ItemKind::Character(character) => Some(character),
            _ => None,
        }
    }

    /// Mutable character data of this item, if it is one.
    pub fn as_character_mut(&mut self) -> Option<&mut Character> {
        match &mut self.kind {
            ItemKind::Character(character) => Some(character),
            _ => None,
        }
    }

    pub(crate) fn kind_mut(&mut self) -> &mut ItemKind {
        &mut self.kind
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = Some(position);
    }

    pub(crate) fn clear_position(&mut self) {
        self.position = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_void_capabilities() {
        let void = BoardItem::void_cell(" ".to_string());
        assert!(void.is_void());
        assert!(void.is_overlappable());
        assert!(!void.is_pickable());
        assert_eq!(void.position(), None);
    }

    #[test]
    fn test_player_defaults() {
        let player = BoardItem::player("hero".to_string(), "@".to_string());
        let character = player.as_character().unwrap();
        assert_eq!(character.role, Role::Player);
        assert_eq!(character.step, Some(1));
        assert!(character.has_inventory());
        assert!(character.can_move());
    }

    #[test]
    fn test_npc_defaults() {
        let npc = BoardItem::npc("rat".to_string(), "r".to_string());
        let character = npc.as_character().unwrap();
        assert_eq!(character.role, Role::Npc);
        assert_eq!(character.step, None);
        assert!(character.actuator.is_none());
        assert!(!character.has_inventory());
    }

    #[test]
    fn test_paralysis_blocks_movement() {
        let mut player = BoardItem::player("hero".to_string(), "@".to_string());
        player.as_character_mut().unwrap().paralyzed = true;
        assert!(!player.as_character().unwrap().can_move());
    }

    #[test]
    fn test_builder_step_and_hp() {
        let npc = BoardItem::npc("ogre".to_string(), "O".to_string())
            .with_step(2)
            .with_hp(40, 80);
        let character = npc.as_character().unwrap();
        assert_eq!(character.step, Some(2));
        assert_eq!(character.hp, 40);
        assert_eq!(character.max_hp, 80);
    }

    #[test]
    fn test_builder_noop_on_structures() {
        let wall = BoardItem::wall("#".to_string()).with_step(3);
        assert!(wall.as_character().is_none());
    }
}
