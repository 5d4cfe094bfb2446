//! # Inventory Module
//!
//! Carried-item storage for entities that can pick things up.

use crate::game::items::BoardItem;
use crate::game::ItemId;
use std::collections::HashMap;

/// An owned mapping of collected items with a derived total value.
///
/// Created empty; the board's pick-up branch is the only mutation path
/// during play. The total value is the usual "score" surfaced next to the
/// player's health bar.
///
/// # Examples
///
/// ```
/// use tatami::{BoardItem, Inventory};
///
/// let mut inventory = Inventory::new();
/// inventory.add_item(BoardItem::treasure("gem".to_string(), "*".to_string(), 50));
/// inventory.add_item(BoardItem::treasure("coin".to_string(), "o".to_string(), 10));
/// assert_eq!(inventory.value(), 60);
/// assert_eq!(inventory.size(), 2);
/// ```
#[derive(Debug, Default)]
pub struct Inventory {
    items: HashMap<ItemId, BoardItem>,
}

impl Inventory {
    /// Creates an empty inventory.
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
        }
    }

    /// Adds an item, returning its id for later lookup.
    pub fn add_item(&mut self, item: BoardItem) -> ItemId {
        let id = item.id();
        self.items.insert(id, item);
        id
    }

    /// Total value of all contained items.
    pub fn value(&self) -> i64 {
        self.items.values().map(|item| item.value()).sum()
    }

    /// Number of contained items.
    pub fn size(&self) -> usize {
        self.items.len()
    }

    /// Whether the inventory holds nothing.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks up a contained item by id.
    pub fn get(&self, id: ItemId) -> Option<&BoardItem> {
        self.items.get(&id)
    }

    /// Iterates over the contained items in no particular order.
    pub fn items(&self) -> impl Iterator<Item = &BoardItem> {
        self.items.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_inventory_is_empty() {
        let inventory = Inventory::new();
        assert!(inventory.is_empty());
        assert_eq!(inventory.size(), 0);
        assert_eq!(inventory.value(), 0);
    }

    #[test]
    fn test_value_sums_contained_items() {
        let mut inventory = Inventory::new();
        inventory.add_item(BoardItem::treasure(
            "gem".to_string(),
            "*".to_string(),
            50,
        ));
        inventory.add_item(BoardItem::treasure(
            "coin".to_string(),
            "o".to_string(),
            10,
        ));
        assert_eq!(inventory.value(), 60);
        assert_eq!(inventory.size(), 2);
    }

    #[test]
    fn test_get_by_id() {
        let mut inventory = Inventory::new();
        let id = inventory.add_item(BoardItem::treasure(
            "gem".to_string(),
            "*".to_string(),
            50,
        ));
        assert_eq!(inventory.get(id).map(|item| item.name.as_str()), Some("gem"));
    }
}
