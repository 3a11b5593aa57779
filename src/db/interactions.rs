use std::collections::{HashMap, HashSet};

use crate::models::{Interaction, ItemId, UserId};

/// Read-only table of observed interactions
#[derive(Debug, Clone)]
pub struct InteractionStore {
    interactions: Vec<Interaction>,
    /// Distinct item ids in order of first appearance
    items: Vec<ItemId>,
    by_user: HashMap<UserId, HashSet<ItemId>>,
}

impl InteractionStore {
    pub fn new(interactions: Vec<Interaction>) -> Self {
        let mut items = Vec::new();
        let mut seen = HashSet::new();
        let mut by_user: HashMap<UserId, HashSet<ItemId>> = HashMap::new();

        for interaction in &interactions {
            if seen.insert(interaction.item_id) {
                items.push(interaction.item_id);
            }
            by_user
                .entry(interaction.user_id)
                .or_default()
                .insert(interaction.item_id);
        }

        Self {
            interactions,
            items,
            by_user,
        }
    }

    /// Every item observed in any interaction.
    ///
    /// This is the whole candidate universe; there is no catalog beyond it.
    pub fn all_item_ids(&self) -> &[ItemId] {
        &self.items
    }

    /// Items the user has interacted with (empty for unknown users)
    pub fn items_interacted_by(&self, user_id: UserId) -> HashSet<ItemId> {
        self.by_user.get(&user_id).cloned().unwrap_or_default()
    }

    pub fn interactions(&self) -> &[Interaction] {
        &self.interactions
    }

    pub fn len(&self) -> usize {
        self.interactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interactions.is_empty()
    }
}
