//! Exercise store, configuration and the command reducer that front-ends
//! (terminal, browser) drive.

pub mod command;
pub mod config;
pub mod error;
pub mod session;
pub mod store;
pub mod view;

pub use command::{AnalysisPreview, Command, EditorDraft, Effect, PreviewLine, SaveTarget};
pub use config::{Messages, Placeholders, SessionConfig};
pub use error::{ConfigError, ImportError, StoreError};
pub use session::Session;
pub use store::{parse_document, Direction, ExerciseSet, Issue, IssueKind};
pub use view::{RoleBox, SentenceView, TokenView};
