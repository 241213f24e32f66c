use std::sync::LazyLock;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;

macro_rules! keymap_source {
    () => {
        include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/keymap/default.keymap.json"
        ))
    };
}

/// What the runtime does for a bound key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyAction {
    Submit,
    Quit,
    ResetStatus,
    FieldStep(i32),
}

/// Which bindings apply: a popup owns every key it does not explicitly share.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum KeymapContext {
    Form,
    Popup,
}

impl KeymapContext {
    fn from_str(raw: &str) -> Option<Self> {
        match raw {
            "form" => Some(KeymapContext::Form),
            "popup" => Some(KeymapContext::Popup),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct RawEntry {
    id: String,
    description: String,
    contexts: Vec<String>,
    action: RawAction,
    combos: Vec<String>,
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
enum RawAction {
    Submit,
    Quit,
    ResetStatus,
    FieldStep { delta: i32 },
    /// Shown in the help line only; the focused field handles the key.
    Hint,
}

impl RawAction {
    fn into_action(self) -> Option<KeyAction> {
        match self {
            RawAction::Submit => Some(KeyAction::Submit),
            RawAction::Quit => Some(KeyAction::Quit),
            RawAction::ResetStatus => Some(KeyAction::ResetStatus),
            RawAction::FieldStep { delta } => Some(KeyAction::FieldStep(delta)),
            RawAction::Hint => None,
        }
    }
}

struct KeyBinding {
    action: Option<KeyAction>,
    contexts: Vec<KeymapContext>,
    combos: Vec<KeyPattern>,
    snippet: String,
}

impl KeyBinding {
    fn from_raw(raw: RawEntry) -> Result<Self, String> {
        let contexts = raw
            .contexts
            .iter()
            .map(|ctx| {
                KeymapContext::from_str(ctx)
                    .ok_or_else(|| format!("{}: unknown context '{ctx}'", raw.id))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if contexts.is_empty() {
            return Err(format!("{}: at least one context is required", raw.id));
        }
        let combos = raw
            .combos
            .iter()
            .map(|combo| {
                KeyPattern::parse(combo).map_err(|err| format!("{}: combo '{combo}': {err}", raw.id))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if combos.is_empty() {
            return Err(format!("{}: at least one combo is required", raw.id));
        }
        let combos_display = combos
            .iter()
            .map(|pattern| pattern.display.as_str())
            .collect::<Vec<_>>()
            .join("/");
        Ok(Self {
            action: raw.action.into_action(),
            contexts,
            snippet: format!("{combos_display} {}", raw.description),
            combos,
        })
    }

    fn matches(&self, key: &KeyEvent, context: KeymapContext) -> Option<KeyAction> {
        let action = self.action?;
        if !self.contexts.contains(&context) {
            return None;
        }
        self.combos
            .iter()
            .any(|pattern| pattern.matches(key))
            .then_some(action)
    }
}

struct KeyPattern {
    code: KeyCode,
    required: KeyModifiers,
    display: String,
}

impl KeyPattern {
    fn parse(spec: &str) -> Result<Self, String> {
        let display = spec.trim().to_string();
        let mut tokens = display
            .split('+')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .collect::<Vec<_>>();
        let Some(key_token) = tokens.pop() else {
            return Err("combo must contain a key".into());
        };
        let code = parse_code(key_token)?;
        let mut required = KeyModifiers::empty();
        for token in tokens {
            match token.to_lowercase().as_str() {
                "ctrl" | "control" => required |= KeyModifiers::CONTROL,
                "shift" => required |= KeyModifiers::SHIFT,
                "alt" => required |= KeyModifiers::ALT,
                other => return Err(format!("unsupported modifier '{other}'")),
            }
        }
        Ok(Self {
            code,
            required,
            display,
        })
    }

    fn matches(&self, key: &KeyEvent) -> bool {
        let code_matches = match (self.code, key.code) {
            (KeyCode::Char(expected), KeyCode::Char(actual)) => {
                actual.to_ascii_lowercase() == expected
            }
            (expected, actual) => expected == actual,
        };
        if !code_matches || !key.modifiers.contains(self.required) {
            return false;
        }
        // Terminals report BackTab and upper-case letters with an extra SHIFT.
        let extra = key.modifiers.difference(self.required);
        extra.is_empty()
            || (extra == KeyModifiers::SHIFT
                && matches!(self.code, KeyCode::Char(_) | KeyCode::BackTab))
    }
}

fn parse_code(token: &str) -> Result<KeyCode, String> {
    let normalized = token.to_lowercase();
    let code = match normalized.as_str() {
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "enter" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => KeyCode::Char(ch),
                _ => return Err(format!("unsupported key '{token}'")),
            }
        }
    };
    Ok(code)
}

fn parse_keymap(source: &str) -> Result<Vec<KeyBinding>, String> {
    let raw_entries: Vec<RawEntry> =
        serde_json::from_str(source).map_err(|err| format!("invalid keymap: {err}"))?;
    raw_entries.into_iter().map(KeyBinding::from_raw).collect()
}

static KEYMAP: LazyLock<Vec<KeyBinding>> = LazyLock::new(|| {
    parse_keymap(keymap_source!()).expect("keymap/default.keymap.json is valid")
});

pub(crate) fn classify_key(key: &KeyEvent, context: KeymapContext) -> Option<KeyAction> {
    KEYMAP
        .iter()
        .find_map(|binding| binding.matches(key, context))
}

pub(crate) fn help_text(context: KeymapContext) -> Option<String> {
    let snippets = KEYMAP
        .iter()
        .filter(|binding| binding.contexts.contains(&context))
        .map(|binding| binding.snippet.as_str())
        .collect::<Vec<_>>();
    if snippets.is_empty() {
        None
    } else {
        Some(snippets.join(" • "))
    }
}
