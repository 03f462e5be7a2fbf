//! The learner's (or author's) current word-to-role placements.

pub mod components;

use hecs::{Entity, World};
use tracing::trace;

use components::{Placement, WordChip};
use cumle_protocol::{Assignment, Role};

pub struct Board {
    world: World,
    next_seq: u64,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self { world: World::new(), next_seq: 0 }
    }

    /// Expose the inner hecs World for external checks
    pub fn inner(&self) -> &World {
        &self.world
    }

    /// Put `word` into `role`. A chip with the same text in any box is taken
    /// out first, so a word is never in two boxes at once.
    pub fn place(&mut self, role: Role, word: &str) -> Entity {
        let previous = self.chips_matching(|chip, _| chip.text == word);
        for entity in previous {
            let _ = self.world.despawn(entity);
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        trace!(%role, word, seq, "placing word");

        self.world.spawn((WordChip { text: word.to_string() }, Placement { role, seq }))
    }

    /// Take `word` out of `role`. Returns false when it was not there.
    pub fn remove(&mut self, role: Role, word: &str) -> bool {
        let found = self.chips_matching(|chip, placement| placement.role == role && chip.text == word);
        let removed = !found.is_empty();
        for entity in found {
            let _ = self.world.despawn(entity);
        }
        trace!(%role, word, removed, "removing word");
        removed
    }

    /// Words in `role`, in the order they were placed.
    pub fn words_for(&self, role: Role) -> Vec<String> {
        let mut chips: Vec<(u64, String)> = self
            .world
            .query::<(&WordChip, &Placement)>()
            .iter()
            .filter(|(_, (_, placement))| placement.role == role)
            .map(|(_, (chip, placement))| (placement.seq, chip.text.clone()))
            .collect();
        chips.sort_by_key(|(seq, _)| *seq);
        chips.into_iter().map(|(_, text)| text).collect()
    }

    /// Every placed word, box by box in role order.
    pub fn all_assigned_words(&self) -> Vec<String> {
        self.assignment().into_values().flatten().collect()
    }

    /// The role currently holding `word`, if any.
    pub fn role_of(&self, word: &str) -> Option<Role> {
        self.world
            .query::<(&WordChip, &Placement)>()
            .iter()
            .find(|(_, (chip, _))| chip.text == word)
            .map(|(_, (_, placement))| placement.role)
    }

    /// Snapshot of all non-empty boxes.
    pub fn assignment(&self) -> Assignment {
        let mut assignment = Assignment::new();
        for role in Role::ALL {
            let words = self.words_for(role);
            if !words.is_empty() {
                assignment.insert(role, words);
            }
        }
        assignment
    }

    pub fn len(&self) -> usize {
        self.world.len() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Empty every box (the active sentence changed).
    pub fn clear(&mut self) {
        self.world.clear();
        self.next_seq = 0;
    }

    fn chips_matching<F>(&self, mut pred: F) -> Vec<Entity>
    where
        F: FnMut(&WordChip, &Placement) -> bool,
    {
        self.world
            .query::<(&WordChip, &Placement)>()
            .iter()
            .filter(|(_, (chip, placement))| pred(*chip, *placement))
            .map(|(entity, _)| entity)
            .collect()
    }
}
