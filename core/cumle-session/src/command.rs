use cumle_grader::Verdict;
use cumle_protocol::{Role, RoleSelection, SentenceIndex};
use serde::{Deserialize, Serialize};

use crate::store::Direction;
use crate::view::SentenceView;

/// Everything a front-end can ask the session to do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    Navigate { direction: Direction },
    PlaceWord { role: Role, word: String },
    RemoveWord { role: Role, word: String },
    Verify,
    /// Open the editor for a new sentence.
    BeginAdd,
    /// Open the editor on the current sentence, roles pre-selected.
    BeginEdit,
    Preview { text: String, roles: Vec<RoleSelection> },
    Save { text: String, roles: Vec<RoleSelection>, target: SaveTarget },
    /// Remove the current sentence. Front-ends confirm before sending it.
    Delete,
    Export,
    Import { bytes: Vec<u8> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveTarget {
    New,
    Replace(SentenceIndex),
}

/// What the front-end should do after a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    Render { view: SentenceView },
    ShowResult { ok: bool, verdict: Verdict, message: String },
    HideResult,
    OpenEditor { draft: EditorDraft },
    CloseEditor,
    Preview { preview: AnalysisPreview },
    Download { file_name: String, contents: String },
    Alert { message: String },
}

/// Initial state of the authoring dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditorDraft {
    pub text: String,
    pub tokens: Vec<String>,
    /// One selection per token.
    pub roles: Vec<RoleSelection>,
    pub target: SaveTarget,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisPreview {
    pub tokens: Vec<String>,
    pub lines: Vec<PreviewLine>,
    pub complete: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewLine {
    pub role: Role,
    pub words: String,
}
