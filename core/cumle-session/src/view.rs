use cumle_board::Board;
use cumle_lexer::tokenize;
use cumle_protocol::{Role, SentenceIndex};
use serde::Serialize;

use crate::store::ExerciseSet;

/// Everything needed to draw the exercise screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SentenceView {
    pub index: SentenceIndex,
    pub total: usize,
    pub text: String,
    pub tokens: Vec<TokenView>,
    pub boxes: Vec<RoleBox>,
    pub can_prev: bool,
    pub can_next: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenView {
    pub text: String,
    pub placed_in: Option<Role>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleBox {
    pub role: Role,
    pub words: Vec<String>,
}

impl SentenceView {
    pub fn build(set: &ExerciseSet, board: &Board) -> Self {
        let item = set.current();
        Self {
            index: SentenceIndex::new(set.cursor() as u32),
            total: set.len(),
            text: item.text.clone(),
            tokens: tokenize(&item.text)
                .into_iter()
                .map(|word| TokenView { text: word.to_string(), placed_in: board.role_of(word) })
                .collect(),
            boxes: Role::ALL
                .into_iter()
                .map(|role| RoleBox { role, words: board.words_for(role) })
                .collect(),
            can_prev: set.can_prev(),
            can_next: set.can_next(),
        }
    }
}
