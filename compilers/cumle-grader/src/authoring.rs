use cumle_lexer::tokenize;
use cumle_protocol::{Analysis, Role, RoleSelection, SentenceItem, TokenIndex};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthoringError {
    #[error("{selections} role selections given for a sentence of {tokens} words")]
    TooManySelections { tokens: usize, selections: usize },
}

/// A candidate answer key built from per-word selections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub text: String,
    pub tokens: Vec<String>,
    pub analysis: Analysis,
    /// True when every word has a role.
    pub complete: bool,
}

impl Draft {
    /// One line per filled role: the role and its words joined by spaces.
    pub fn preview(&self) -> Vec<(Role, String)> {
        self.analysis
            .iter()
            .map(|(role, words)| (*role, words.join(" ")))
            .collect()
    }

    pub fn into_item(self) -> SentenceItem {
        SentenceItem::new(self.text, self.analysis)
    }
}

/// Builds an analysis by asking `role_of` for the role of every token.
pub fn build_analysis_with<F>(text: &str, mut role_of: F) -> Draft
where
    F: FnMut(TokenIndex, &str) -> RoleSelection,
{
    let tokens = tokenize(text);
    let mut analysis = Analysis::new();
    let mut complete = true;

    for (i, word) in tokens.iter().copied().enumerate() {
        match role_of(TokenIndex::new(i as u32), word) {
            RoleSelection::Unselected => complete = false,
            RoleSelection::Role(role) => analysis.entry(role).or_default().push(word.to_string()),
        }
    }

    debug!(words = tokens.len(), roles = analysis.len(), complete, "built analysis");
    Draft {
        text: text.to_string(),
        tokens: tokens.into_iter().map(str::to_owned).collect(),
        analysis,
        complete,
    }
}

/// Builds an analysis from one selection per token, in token order. Missing
/// trailing selections count as unselected.
pub fn build_analysis(text: &str, selections: &[RoleSelection]) -> Result<Draft, AuthoringError> {
    let tokens = tokenize(text).len();
    if selections.len() > tokens {
        return Err(AuthoringError::TooManySelections { tokens, selections: selections.len() });
    }
    Ok(build_analysis_with(text, |index, _| {
        selections.get(index.get()).copied().unwrap_or_default()
    }))
}

/// Pre-selects a role for every token of an existing item, for editing.
///
/// Each word of the answer key is matched to at most one token, so repeated
/// words come back with the right count. Tokens that match no remaining
/// word fall back to [`legacy_role_for`].
pub fn reconstruct_roles(item: &SentenceItem) -> Vec<RoleSelection> {
    let mut pools: Vec<(Role, Vec<&str>)> = item
        .analysis
        .iter()
        .map(|(role, words)| (*role, words.iter().flat_map(|w| tokenize(w)).collect()))
        .collect();

    let mut selections = Vec::new();
    'tokens: for token in tokenize(&item.text) {
        for (role, pool) in pools.iter_mut() {
            if let Some(pos) = pool.iter().position(|w| *w == token) {
                pool.swap_remove(pos);
                selections.push(RoleSelection::Role(*role));
                continue 'tokens;
            }
        }
        let fallback = if token.is_empty() {
            RoleSelection::Unselected
        } else {
            legacy_role_for(&item.analysis, token)
        };
        selections.push(fallback);
    }
    selections
}

/// The editor's old pre-selection rule: a role matches when it lists the
/// token or its joined words contain the token; the last matching role wins.
pub fn legacy_role_for(analysis: &Analysis, token: &str) -> RoleSelection {
    analysis
        .iter()
        .filter(|(_, words)| words.iter().any(|w| w == token) || words.join(" ").contains(token))
        .map(|(role, _)| RoleSelection::Role(*role))
        .last()
        .unwrap_or_default()
}

/// [`legacy_role_for`] applied to every token.
pub fn legacy_reconstruct_roles(item: &SentenceItem) -> Vec<RoleSelection> {
    tokenize(&item.text)
        .into_iter()
        .map(|token| legacy_role_for(&item.analysis, token))
        .collect()
}
