#![no_std] // Shared with the WASM front-end

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod bundle;
pub mod ids;
pub mod model;
pub mod roles;

pub use bundle::{Bundle, BundleError, BundledSentence};
pub use ids::{SentenceIndex, TokenIndex};
pub use model::*;
pub use roles::{Role, RoleSelection, UnknownRole, ROLE_OPTIONS, UNSELECTED_LABEL};
