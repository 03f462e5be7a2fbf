use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use crate::roles::Role;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Reference analysis: the words each role holds, in sentence order.
pub type Analysis = BTreeMap<Role, Vec<String>>;

/// Snapshot of a learner's placements, keyed the same way as [`Analysis`].
pub type Assignment = BTreeMap<Role, Vec<String>>;

/// One exercise: a sentence and its answer key.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct SentenceItem {
    pub text: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub analysis: Analysis,
}

impl SentenceItem {
    pub fn new(text: impl Into<String>, analysis: Analysis) -> Self {
        Self { text: text.into(), analysis }
    }

    /// An item with no answer key, shown when there is nothing real to practise.
    pub fn placeholder(text: impl Into<String>) -> Self {
        Self { text: text.into(), analysis: Analysis::new() }
    }

    /// Every word of the answer key, role by role.
    pub fn analysed_words(&self) -> impl Iterator<Item = (Role, &str)> {
        self.analysis
            .iter()
            .flat_map(|(role, words)| words.iter().map(move |w| (*role, w.as_str())))
    }
}

/// The `{ "sentences": [...] }` document used for loading, import and export.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct ExerciseFile {
    pub sentences: Vec<SentenceItem>,
}
