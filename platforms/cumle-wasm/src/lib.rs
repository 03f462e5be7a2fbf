use cumle_protocol::ROLE_OPTIONS;
use cumle_session::{Command, Effect, ExerciseSet, Session, SessionConfig};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Options for the authoring `<select>`s, sentinel first.
#[wasm_bindgen]
pub fn role_options() -> Vec<JsValue> {
    ROLE_OPTIONS.iter().map(|label| JsValue::from_str(label)).collect()
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}

/// The exercise screen running in the browser.
///
/// JS forwards every user action as a command object, e.g.
/// `{ type: "place_word", role: "Özne", word: "Ali" }`, and applies the
/// returned effects (`render`, `show_result`, `download`, `alert`, ...).
#[wasm_bindgen]
pub struct CumleEngine {
    session: Session,
}

#[wasm_bindgen]
impl CumleEngine {
    /// Starts from the fetched `sentences.json` text. A failed fetch can pass
    /// an empty string: the engine then shows the load-failure placeholder.
    #[wasm_bindgen(constructor)]
    pub fn new(json: &str) -> CumleEngine {
        Self { session: Session::load(json, SessionConfig::default()) }
    }

    /// Starts from a binary bundle produced by `cumle bundle`.
    pub fn from_bundle(data: Vec<u8>) -> CumleEngine {
        let config = SessionConfig::default();
        let set = ExerciseSet::load_bundle(&data, config.placeholders.clone());
        Self { session: Session::new(set, config) }
    }

    /// Overrides the user-facing texts with a TOML document.
    pub fn configure(&mut self, toml: &str) -> Result<(), JsValue> {
        let config = SessionConfig::from_toml_str(toml).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.session.configure(config);
        Ok(())
    }

    pub fn view(&self) -> Result<JsValue, JsValue> {
        to_js(&self.session.view())
    }

    /// Runs one command and returns the effects as an array.
    pub fn dispatch(&mut self, command: JsValue) -> Result<JsValue, JsValue> {
        let command: Command = serde_wasm_bindgen::from_value(command)?;
        let effects: Vec<Effect> = self.session.dispatch(command);
        to_js(&effects)
    }

    /// Import helper for `FileReader.readAsText` results.
    pub fn import_text(&mut self, contents: &str) -> Result<JsValue, JsValue> {
        let effects = self.session.dispatch(Command::Import { bytes: contents.as_bytes().to_vec() });
        to_js(&effects)
    }

    pub fn confirm_delete_message(&self) -> String {
        self.session.config().messages.confirm_delete.clone()
    }
}
