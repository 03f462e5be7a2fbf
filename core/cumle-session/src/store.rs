//! The ordered list of exercises and the cursor over it.

use std::collections::HashMap;
use std::fmt;

use cumle_lexer::tokenize;
use cumle_protocol::{Bundle, Role, SentenceItem};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::Placeholders;
use crate::error::{ImportError, Result, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Previous,
    Next,
}

/// Exercise set with a cursor. Never empty: when the last real sentence
/// goes away a placeholder takes its place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseSet {
    sentences: Vec<SentenceItem>,
    cursor: usize,
    placeholders: Placeholders,
}

#[derive(Serialize)]
struct ExportDocument<'a> {
    sentences: &'a [SentenceItem],
}

impl ExerciseSet {
    pub fn from_items(items: Vec<SentenceItem>, placeholders: Placeholders) -> Self {
        let mut set = Self { sentences: items, cursor: 0, placeholders };
        set.fill_if_empty();
        set
    }

    /// A set holding only the load-failure placeholder.
    pub fn load_failed(placeholders: Placeholders) -> Self {
        let item = SentenceItem::placeholder(placeholders.load_failure.clone());
        Self { sentences: vec![item], cursor: 0, placeholders }
    }

    /// Reads the startup document. Failure is not fatal: the set is replaced
    /// by a single placeholder sentence.
    pub fn load(json: &str, placeholders: Placeholders) -> Self {
        match parse_document(json.as_bytes()) {
            Ok(items) => {
                info!(sentences = items.len(), "exercise set loaded");
                Self::from_items(items, placeholders)
            }
            Err(e) => {
                warn!(error = %e, "could not load exercise set");
                Self::load_failed(placeholders)
            }
        }
    }

    /// Like [`ExerciseSet::load`], for a binary bundle.
    pub fn load_bundle(bytes: &[u8], placeholders: Placeholders) -> Self {
        match Bundle::from_bytes(bytes) {
            Ok(bundle) => {
                let items = bundle.into_items();
                info!(sentences = items.len(), "exercise bundle loaded");
                Self::from_items(items, placeholders)
            }
            Err(e) => {
                warn!(error = %e, "could not load exercise bundle");
                Self::load_failed(placeholders)
            }
        }
    }

    pub fn current(&self) -> &SentenceItem {
        &self.sentences[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    pub fn items(&self) -> &[SentenceItem] {
        &self.sentences
    }

    pub fn can_prev(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_next(&self) -> bool {
        self.cursor + 1 < self.sentences.len()
    }

    /// Moves one step. Returns false (and stays put) at either end.
    pub fn navigate(&mut self, direction: Direction) -> bool {
        let moved = match direction {
            Direction::Previous if self.can_prev() => {
                self.cursor -= 1;
                true
            }
            Direction::Next if self.can_next() => {
                self.cursor += 1;
                true
            }
            _ => false,
        };
        debug!(?direction, cursor = self.cursor, moved, "navigate");
        moved
    }

    /// Appends `item` and makes it current.
    pub fn add(&mut self, item: SentenceItem) -> usize {
        self.sentences.push(item);
        self.cursor = self.sentences.len() - 1;
        debug!(cursor = self.cursor, "sentence added");
        self.cursor
    }

    /// Overwrites the item at `index` and makes it current.
    pub fn replace(&mut self, index: usize, item: SentenceItem) -> Result<()> {
        let len = self.sentences.len();
        let slot = self
            .sentences
            .get_mut(index)
            .ok_or(StoreError::OutOfRange { index, len })?;
        *slot = item;
        self.cursor = index;
        debug!(cursor = index, "sentence replaced");
        Ok(())
    }

    /// Removes the current item and returns it.
    pub fn delete_current(&mut self) -> SentenceItem {
        let removed = self.sentences.remove(self.cursor);
        self.fill_if_empty();
        if self.cursor >= self.sentences.len() {
            self.cursor = self.sentences.len() - 1;
        }
        debug!(cursor = self.cursor, remaining = self.sentences.len(), "sentence deleted");
        removed
    }

    /// Pretty-printed JSON in the load format.
    pub fn export(&self) -> Result<String> {
        let document = ExportDocument { sentences: &self.sentences };
        Ok(serde_json::to_string_pretty(&document)?)
    }

    /// Replaces the whole set from an exported document and rewinds to the
    /// first sentence. On error nothing changes.
    pub fn import(&mut self, bytes: &[u8]) -> Result<(), ImportError> {
        let items = parse_document(bytes)?;
        info!(sentences = items.len(), "exercise set imported");
        self.sentences = items;
        self.cursor = 0;
        self.fill_if_empty();
        Ok(())
    }

    /// Sanity report: answer-key words that are not tokens of the sentence,
    /// and tokens that no role covers.
    pub fn validate(&self) -> Vec<Issue> {
        self.sentences
            .iter()
            .enumerate()
            .flat_map(|(index, item)| check_item(item).into_iter().map(move |kind| Issue { index, kind }))
            .collect()
    }

    pub fn placeholders(&self) -> &Placeholders {
        &self.placeholders
    }

    /// Swaps the stand-in texts. A placeholder sentence already on screen
    /// is rewritten with the new text.
    pub fn set_placeholders(&mut self, placeholders: Placeholders) {
        if let [only] = self.sentences.as_mut_slice() {
            if only.analysis.is_empty() {
                if only.text == self.placeholders.empty_set {
                    only.text = placeholders.empty_set.clone();
                } else if only.text == self.placeholders.load_failure {
                    only.text = placeholders.load_failure.clone();
                }
            }
        }
        self.placeholders = placeholders;
    }

    fn fill_if_empty(&mut self) {
        if self.sentences.is_empty() {
            self.sentences
                .push(SentenceItem::placeholder(self.placeholders.empty_set.clone()));
            self.cursor = 0;
        }
    }
}

/// Parses and shape-checks a `{ "sentences": [...] }` document.
pub fn parse_document(bytes: &[u8]) -> Result<Vec<SentenceItem>, ImportError> {
    let value: Value = serde_json::from_slice(bytes).map_err(ImportError::Malformed)?;
    let list = match value {
        Value::Object(mut map) => map.remove("sentences"),
        _ => None,
    };
    let list = match list {
        Some(Value::Array(list)) => list,
        Some(_) => return Err(ImportError::NotAList),
        None => return Err(ImportError::MissingSentences),
    };

    list.into_iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value(value).map_err(|source| ImportError::InvalidItem { index, source })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    /// The answer key lists a word the sentence does not contain (or lists
    /// it more often than it occurs).
    ForeignWord { role: Role, word: String },
    /// No role covers this token.
    Unassigned { word: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub index: usize,
    pub kind: IssueKind,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            IssueKind::ForeignWord { role, word } => {
                write!(f, "#{}: {} lists {:?}, which is not a word of the sentence", self.index, role, word)
            }
            IssueKind::Unassigned { word } => {
                write!(f, "#{}: {:?} has no role", self.index, word)
            }
        }
    }
}

fn check_item(item: &SentenceItem) -> Vec<IssueKind> {
    let tokens = tokenize(&item.text);
    let mut available: HashMap<&str, usize> = HashMap::new();
    for token in &tokens {
        *available.entry(*token).or_default() += 1;
    }

    let mut issues = Vec::new();
    for (role, entry) in item.analysed_words() {
        for word in tokenize(entry) {
            match available.get_mut(word) {
                Some(count) if *count > 0 => *count -= 1,
                _ => issues.push(IssueKind::ForeignWord { role, word: word.to_string() }),
            }
        }
    }

    for token in tokens {
        if let Some(count) = available.get_mut(token) {
            if *count > 0 {
                *count -= 1;
                issues.push(IssueKind::Unassigned { word: token.to_string() });
            }
        }
    }
    issues
}
