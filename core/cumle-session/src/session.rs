//! The exercise screen as an explicit state machine.
//!
//! A [`Session`] owns the exercise set, the board and the texts. Front-ends
//! turn user actions into [`Command`]s and carry out the returned
//! [`Effect`]s; they never touch the state directly.

use cumle_board::Board;
use cumle_grader::{build_analysis, reconstruct_roles, verify_board};
use cumle_lexer::tokenize;
use cumle_protocol::{Role, RoleSelection, SentenceIndex, SentenceItem};
use tracing::{debug, warn};

use crate::command::{AnalysisPreview, Command, EditorDraft, Effect, PreviewLine, SaveTarget};
use crate::config::SessionConfig;
use crate::store::{Direction, ExerciseSet};
use crate::view::SentenceView;

pub struct Session {
    set: ExerciseSet,
    board: Board,
    config: SessionConfig,
}

impl Session {
    pub fn new(set: ExerciseSet, config: SessionConfig) -> Self {
        Self { set, board: Board::new(), config }
    }

    /// Starts from a JSON document, falling back to a placeholder on error.
    pub fn load(json: &str, config: SessionConfig) -> Self {
        let set = ExerciseSet::load(json, config.placeholders.clone());
        Self::new(set, config)
    }

    pub fn set(&self) -> &ExerciseSet {
        &self.set
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Replaces the texts, including the stand-in sentences of the set.
    pub fn configure(&mut self, config: SessionConfig) {
        self.set.set_placeholders(config.placeholders.clone());
        self.config = config;
    }

    pub fn view(&self) -> SentenceView {
        SentenceView::build(&self.set, &self.board)
    }

    pub fn dispatch(&mut self, command: Command) -> Vec<Effect> {
        debug!(?command, "dispatch");
        match command {
            Command::Navigate { direction } => self.navigate(direction),
            Command::PlaceWord { role, word } => self.place_word(role, word),
            Command::RemoveWord { role, word } => self.remove_word(role, &word),
            Command::Verify => self.verify(),
            Command::BeginAdd => self.begin_add(),
            Command::BeginEdit => self.begin_edit(),
            Command::Preview { text, roles } => self.preview(&text, &roles),
            Command::Save { text, roles, target } => self.save(&text, &roles, target),
            Command::Delete => self.delete(),
            Command::Export => self.export(),
            Command::Import { bytes } => self.import(&bytes),
        }
    }

    fn render(&self) -> Effect {
        Effect::Render { view: self.view() }
    }

    fn alert(message: &str) -> Vec<Effect> {
        vec![Effect::Alert { message: message.to_string() }]
    }

    /// The active sentence changed: empty the boxes and redraw.
    fn reset(&mut self) -> Vec<Effect> {
        self.board.clear();
        vec![Effect::HideResult, self.render()]
    }

    fn navigate(&mut self, direction: Direction) -> Vec<Effect> {
        if self.set.navigate(direction) {
            self.reset()
        } else {
            Vec::new()
        }
    }

    fn place_word(&mut self, role: Role, word: String) -> Vec<Effect> {
        if !tokenize(&self.set.current().text).contains(&word.as_str()) {
            debug!(word, "word is not part of the sentence");
            return Self::alert(&self.config.messages.unknown_word);
        }
        self.board.place(role, &word);
        vec![Effect::HideResult, self.render()]
    }

    fn remove_word(&mut self, role: Role, word: &str) -> Vec<Effect> {
        if self.board.remove(role, word) {
            vec![self.render()]
        } else {
            Vec::new()
        }
    }

    fn verify(&self) -> Vec<Effect> {
        let result = verify_board(&self.board, self.set.current());
        debug!(verdict = ?result.verdict, "verified attempt");
        vec![Effect::ShowResult {
            ok: result.ok,
            verdict: result.verdict,
            message: self.config.messages.for_verdict(result.verdict).to_string(),
        }]
    }

    fn begin_add(&self) -> Vec<Effect> {
        vec![Effect::OpenEditor {
            draft: EditorDraft {
                text: String::new(),
                tokens: Vec::new(),
                roles: Vec::new(),
                target: SaveTarget::New,
            },
        }]
    }

    fn begin_edit(&self) -> Vec<Effect> {
        let current = self.set.current();
        // Save trims, so the editor must show the tokens Save will see.
        let item = SentenceItem::new(current.text.trim(), current.analysis.clone());
        vec![Effect::OpenEditor {
            draft: EditorDraft {
                tokens: tokenize(&item.text).into_iter().map(str::to_owned).collect(),
                roles: reconstruct_roles(&item),
                text: item.text,
                target: SaveTarget::Replace(SentenceIndex::new(self.set.cursor() as u32)),
            },
        }]
    }

    fn preview(&self, text: &str, roles: &[RoleSelection]) -> Vec<Effect> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }
        match build_analysis(text, roles) {
            Ok(draft) => vec![Effect::Preview {
                preview: AnalysisPreview {
                    lines: draft
                        .preview()
                        .into_iter()
                        .map(|(role, words)| PreviewLine { role, words })
                        .collect(),
                    tokens: draft.tokens,
                    complete: draft.complete,
                },
            }],
            Err(e) => {
                warn!(error = %e, "preview selections do not fit the text");
                Self::alert(&self.config.messages.selection_mismatch)
            }
        }
    }

    fn save(&mut self, text: &str, roles: &[RoleSelection], target: SaveTarget) -> Vec<Effect> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }

        let draft = match build_analysis(text, roles) {
            Ok(draft) if draft.complete => draft,
            Ok(_) => return Self::alert(&self.config.messages.incomplete_authoring),
            Err(e) => {
                warn!(error = %e, "save selections do not fit the text");
                return Self::alert(&self.config.messages.selection_mismatch);
            }
        };

        let item = draft.into_item();
        match target {
            SaveTarget::New => {
                self.set.add(item);
            }
            SaveTarget::Replace(index) => {
                if let Err(e) = self.set.replace(index.get(), item) {
                    warn!(error = %e, "could not save sentence");
                    return Self::alert(&e.to_string());
                }
            }
        }

        let mut effects = vec![Effect::CloseEditor];
        effects.extend(self.reset());
        effects
    }

    fn delete(&mut self) -> Vec<Effect> {
        self.set.delete_current();
        self.reset()
    }

    fn export(&self) -> Vec<Effect> {
        match self.set.export() {
            Ok(contents) => vec![Effect::Download {
                file_name: self.config.export_file_name.clone(),
                contents,
            }],
            Err(e) => {
                warn!(error = %e, "export failed");
                Self::alert(&e.to_string())
            }
        }
    }

    fn import(&mut self, bytes: &[u8]) -> Vec<Effect> {
        match self.set.import(bytes) {
            Ok(()) => self.reset(),
            Err(e) => {
                warn!(error = %e, "import rejected");
                Self::alert(&self.config.messages.invalid_import)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cumle_grader::Verdict;

    const SAMPLE: &str = r#"{"sentences": [
        {"text": "Ali okula gitti",
         "analysis": {"Özne": ["Ali"], "Yüklem": ["gitti"], "Dolaylı Tümleç": ["okula"]}},
        {"text": "Kuşlar uçtu", "analysis": {"Özne": ["Kuşlar"], "Yüklem": ["uçtu"]}}
    ]}"#;

    fn session() -> Session {
        Session::load(SAMPLE, SessionConfig::default())
    }

    fn place(session: &mut Session, role: Role, word: &str) -> Vec<Effect> {
        session.dispatch(Command::PlaceWord { role, word: word.to_string() })
    }

    fn verdict(effects: &[Effect]) -> Verdict {
        match effects {
            [Effect::ShowResult { verdict, .. }] => *verdict,
            other => panic!("expected a single ShowResult, got {:?}", other),
        }
    }

    #[test]
    fn test_place_then_verify() {
        let mut s = session();
        place(&mut s, Role::Subject, "Ali");
        place(&mut s, Role::Predicate, "gitti");
        assert_eq!(verdict(&s.dispatch(Command::Verify)), Verdict::MissingWords);

        let effects = place(&mut s, Role::IndirectComplement, "okula");
        assert_eq!(effects[0], Effect::HideResult);
        assert_eq!(verdict(&s.dispatch(Command::Verify)), Verdict::Correct);
    }

    #[test]
    fn test_verify_message_comes_from_config() {
        let mut config = SessionConfig::default();
        config.messages.missing_words = "eksik".to_string();
        let mut s = Session::load(SAMPLE, config);
        match s.dispatch(Command::Verify).as_slice() {
            [Effect::ShowResult { ok, message, .. }] => {
                assert!(!ok);
                assert_eq!(message, "eksik");
            }
            other => panic!("unexpected effects {:?}", other),
        }
    }

    #[test]
    fn test_unknown_word_is_refused() {
        let mut s = session();
        let effects = place(&mut s, Role::Subject, "Veli");
        assert!(matches!(effects.as_slice(), [Effect::Alert { .. }]));
        assert!(s.board().is_empty());
    }

    #[test]
    fn test_navigation_clears_board() {
        let mut s = session();
        place(&mut s, Role::Subject, "Ali");
        assert!(s.dispatch(Command::Navigate { direction: Direction::Previous }).is_empty());
        assert_eq!(s.board().len(), 1);

        let effects = s.dispatch(Command::Navigate { direction: Direction::Next });
        assert_eq!(effects.len(), 2);
        assert!(s.board().is_empty());
        match &effects[1] {
            Effect::Render { view } => {
                assert_eq!(view.text, "Kuşlar uçtu");
                assert!(view.can_prev);
                assert!(!view.can_next);
            }
            other => panic!("expected Render, got {:?}", other),
        }
    }

    #[test]
    fn test_remove_word() {
        let mut s = session();
        place(&mut s, Role::Subject, "Ali");
        let remove = |s: &mut Session| {
            s.dispatch(Command::RemoveWord { role: Role::Subject, word: "Ali".to_string() })
        };
        assert_eq!(remove(&mut s).len(), 1);
        assert!(remove(&mut s).is_empty());
    }

    #[test]
    fn test_edit_prefills_roles() {
        let mut s = session();
        match s.dispatch(Command::BeginEdit).as_slice() {
            [Effect::OpenEditor { draft }] => {
                assert_eq!(draft.text, "Ali okula gitti");
                assert_eq!(draft.target, SaveTarget::Replace(SentenceIndex::new(0)));
                assert_eq!(
                    draft.roles,
                    vec![
                        RoleSelection::Role(Role::Subject),
                        RoleSelection::Role(Role::IndirectComplement),
                        RoleSelection::Role(Role::Predicate),
                    ]
                );
            }
            other => panic!("unexpected effects {:?}", other),
        }
    }

    #[test]
    fn test_save_new_sentence() {
        let mut s = session();
        let roles = vec![Role::Subject.into(), Role::Predicate.into()];
        let effects = s.dispatch(Command::Save {
            text: "  Kar yağdı ".to_string(),
            roles,
            target: SaveTarget::New,
        });

        assert_eq!(effects[0], Effect::CloseEditor);
        assert_eq!(s.set().len(), 3);
        assert_eq!(s.set().cursor(), 2);
        assert_eq!(s.set().current().text, "Kar yağdı");
    }

    #[test]
    fn test_save_requires_every_word() {
        let mut s = session();
        let effects = s.dispatch(Command::Save {
            text: "Kar yağdı".to_string(),
            roles: vec![Role::Subject.into(), RoleSelection::Unselected],
            target: SaveTarget::New,
        });
        assert_eq!(
            effects,
            vec![Effect::Alert { message: s.config().messages.incomplete_authoring.clone() }]
        );
        assert_eq!(s.set().len(), 2);

        assert!(s
            .dispatch(Command::Save { text: "   ".to_string(), roles: vec![], target: SaveTarget::New })
            .is_empty());
    }

    #[test]
    fn test_extra_selections_get_their_own_message() {
        let mut s = session();
        let roles: Vec<RoleSelection> =
            vec![Role::Subject.into(), Role::Predicate.into(), Role::Predicate.into()];
        let expected = vec![Effect::Alert { message: s.config().messages.selection_mismatch.clone() }];

        assert_eq!(s.preview("Kar yağdı", &roles), expected);
        let effects =
            s.dispatch(Command::Save { text: "Kar yağdı".to_string(), roles, target: SaveTarget::New });
        assert_eq!(effects, expected);
        assert_ne!(s.config().messages.selection_mismatch, s.config().messages.incomplete_authoring);
        assert_eq!(s.set().len(), 2);
    }

    #[test]
    fn test_configure_reaches_the_placeholders() {
        let mut s = session();
        let mut config = SessionConfig::default();
        config.placeholders.empty_set = "YENI".to_string();
        config.messages.correct = "Harika!".to_string();
        s.configure(config);

        s.dispatch(Command::Delete);
        s.dispatch(Command::Delete);
        assert_eq!(s.set().len(), 1);
        assert_eq!(s.set().current().text, "YENI");
        assert_eq!(s.config().messages.correct, "Harika!");
    }

    #[test]
    fn test_preview() {
        let s = session();
        let effects = s.preview("Kar yağdı", &[Role::Predicate.into()]);
        match effects.as_slice() {
            [Effect::Preview { preview }] => {
                assert!(!preview.complete);
                assert_eq!(preview.tokens, vec!["Kar", "yağdı"]);
                assert_eq!(
                    preview.lines,
                    vec![PreviewLine { role: Role::Predicate, words: "Kar".to_string() }]
                );
            }
            other => panic!("unexpected effects {:?}", other),
        }
    }

    #[test]
    fn test_failed_import_keeps_state() {
        let mut s = session();
        s.dispatch(Command::Navigate { direction: Direction::Next });
        let effects = s.dispatch(Command::Import { bytes: b"{\"sentences\": 3}".to_vec() });
        assert_eq!(
            effects,
            vec![Effect::Alert { message: s.config().messages.invalid_import.clone() }]
        );
        assert_eq!(s.set().cursor(), 1);
        assert_eq!(s.set().len(), 2);
    }

    #[test]
    fn test_export_effect() {
        let s = session();
        match s.export().as_slice() {
            [Effect::Download { file_name, contents }] => {
                assert_eq!(file_name, "sentences.json");
                assert!(contents.contains("Dolaylı Tümleç"));
            }
            other => panic!("unexpected effects {:?}", other),
        }
    }
}
