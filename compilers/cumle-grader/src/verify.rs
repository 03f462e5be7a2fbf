use cumle_board::Board;
use cumle_lexer::tokenize;
use cumle_protocol::{Assignment, SentenceItem};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Verdict {
    /// Fewer (or more) words placed than the sentence has.
    MissingWords,
    /// Right number of words, but some box holds the wrong ones.
    Mismatch,
    Correct,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerificationResult {
    pub ok: bool,
    pub verdict: Verdict,
}

impl From<Verdict> for VerificationResult {
    fn from(verdict: Verdict) -> Self {
        Self { ok: verdict == Verdict::Correct, verdict }
    }
}

fn normalize(word: &str) -> String {
    word.trim().to_lowercase()
}

/// Words of one box, lower-cased and re-split on spaces so that multi-word
/// entries compare word by word. An empty box yields `[""]`.
fn role_words(words: &[String]) -> Vec<String> {
    let joined = words.join(" ").to_lowercase();
    tokenize(&joined).into_iter().map(str::to_owned).collect()
}

/// Grades an attempt against the answer key.
///
/// Completeness is a count check: the number of placed words must equal the
/// number of tokens. Each reference role then has to hold the same set of
/// words in both directions; order and repetition inside a box are ignored.
/// Boxes the reference does not mention are not inspected.
pub fn verify(attempt: &Assignment, reference: &SentenceItem) -> VerificationResult {
    let assigned: Vec<String> = attempt.values().flatten().map(|w| normalize(w)).collect();
    let original: Vec<String> = tokenize(&reference.text).into_iter().map(normalize).collect();

    if assigned.len() != original.len() {
        debug!(assigned = assigned.len(), expected = original.len(), "word count differs");
        return Verdict::MissingWords.into();
    }

    for (role, words) in &reference.analysis {
        let correct = role_words(words);
        let user = role_words(attempt.get(role).map(Vec::as_slice).unwrap_or_default());

        if !correct.iter().all(|w| user.contains(w)) || !user.iter().all(|w| correct.contains(w)) {
            debug!(%role, ?correct, ?user, "role mismatch");
            return Verdict::Mismatch.into();
        }
    }

    Verdict::Correct.into()
}

/// [`verify`] over the live board.
pub fn verify_board(board: &Board, reference: &SentenceItem) -> VerificationResult {
    verify(&board.assignment(), reference)
}
