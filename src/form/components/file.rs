use std::path::Path;

use crossterm::event::{KeyCode, KeyEvent};

use super::FieldComponent;
use super::helpers::{dismisses_popup, opens_popup, printable};
use crate::domain::normalize_extension;
use crate::form::events::{ComponentContext, FieldEvent, FieldEvents};
use crate::form::popup::{ListenerId, PopupLifetime};
use crate::presentation::PopupView;

const MEDIA_EXTENSIONS: [(&str, &[&str]); 4] = [
    ("image", &["png", "jpg", "jpeg", "gif", "bmp", "webp", "svg", "tiff", "ico"]),
    ("audio", &["mp3", "wav", "ogg", "flac", "aac", "m4a"]),
    ("video", &["mp4", "mov", "avi", "mkv", "webm"]),
    ("text", &["txt", "csv", "md", "html", "css"]),
];

/// Parsed `accept` attribute: `.ext`, `type/*` and `type/subtype` tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcceptFilter {
    extensions: Vec<String>,
}

impl AcceptFilter {
    pub fn parse(accept: Option<&str>) -> Self {
        let mut extensions = Vec::new();
        for token in accept.unwrap_or_default().split(',').map(str::trim) {
            if token.is_empty() || token == "*" || token == "*/*" {
                continue;
            }
            if token.starts_with('.') {
                extensions.push(normalize_extension(token));
                continue;
            }
            let Some((media, subtype)) = token.split_once('/') else {
                extensions.push(normalize_extension(token));
                continue;
            };
            if subtype == "*" {
                if let Some((_, known)) = MEDIA_EXTENSIONS
                    .iter()
                    .find(|(name, _)| name.eq_ignore_ascii_case(media))
                {
                    extensions.extend(known.iter().map(|ext| ext.to_string()));
                }
            } else {
                extensions.push(normalize_extension(subtype));
            }
        }
        extensions.dedup();
        Self { extensions }
    }

    pub fn is_unrestricted(&self) -> bool {
        self.extensions.is_empty()
    }

    pub fn allows(&self, file_name: &str) -> bool {
        if self.is_unrestricted() {
            return true;
        }
        let extension = Path::new(file_name)
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        self.extensions.iter().any(|allowed| {
            *allowed == extension || (allowed == "jpeg" && extension == "jpg")
        })
    }

    pub fn describe(&self) -> String {
        if self.is_unrestricted() {
            "any file".to_string()
        } else {
            self.extensions
                .iter()
                .map(|ext| format!(".{ext}"))
                .collect::<Vec<_>>()
                .join(", ")
        }
    }
}

/// Styled trigger in front of a path prompt that plays the native picker.
///
/// Only the selected file's name is reported; nothing is read or uploaded.
#[derive(Debug, Default)]
pub struct FileComponent {
    filter: AcceptFilter,
    popup: PopupLifetime,
    prompt: String,
    rejected: bool,
}

impl FileComponent {
    pub fn new(accept: Option<&str>) -> Self {
        Self {
            filter: AcceptFilter::parse(accept),
            ..Self::default()
        }
    }

    pub fn filter(&self) -> &AcceptFilter {
        &self.filter
    }

    /// Report a file chosen through a host dialog.
    pub fn select_path(&mut self, path: &Path, events: &mut FieldEvents) -> bool {
        let Some(name) = path.file_name().map(|name| name.to_string_lossy().into_owned()) else {
            return false;
        };
        if !self.filter.allows(&name) {
            tracing::debug!(%name, accept = %self.filter.describe(), "file rejected by accept filter");
            self.rejected = true;
            return false;
        }
        events.push(FieldEvent::Change(name));
        self.close();
        true
    }

    fn open(&mut self, ctx: &ComponentContext<'_>, events: &mut FieldEvents) {
        self.popup.begin(ctx.listeners);
        self.prompt.clear();
        self.rejected = false;
        events.push(FieldEvent::Focus);
    }

    fn close(&mut self) -> bool {
        self.prompt.clear();
        self.rejected = false;
        self.popup.end()
    }

    fn commit(&mut self, events: &mut FieldEvents) {
        let path = self.prompt.trim().to_string();
        if path.is_empty() {
            self.close();
            return;
        }
        self.select_path(Path::new(&path), events);
    }
}

impl FieldComponent for FileComponent {
    fn handle_key(
        &mut self,
        ctx: &ComponentContext<'_>,
        key: &KeyEvent,
        events: &mut FieldEvents,
    ) -> bool {
        if !self.popup.is_open() {
            if opens_popup(key) {
                self.open(ctx, events);
                return true;
            }
            if matches!(key.code, KeyCode::Delete | KeyCode::Backspace) && !ctx.value.is_empty() {
                events.push(FieldEvent::Change(String::new()));
                return true;
            }
            return false;
        }

        match key.code {
            KeyCode::Enter => self.commit(events),
            KeyCode::Backspace => {
                self.prompt.pop();
                self.rejected = false;
            }
            _ if dismisses_popup(key) => {
                self.close();
            }
            _ => {
                if let Some(ch) = printable(key) {
                    self.prompt.push(ch);
                    self.rejected = false;
                }
            }
        }
        true
    }

    fn popup_open(&self) -> bool {
        self.popup.is_open()
    }

    fn open_popup(&mut self, ctx: &ComponentContext<'_>, events: &mut FieldEvents) -> bool {
        if self.popup.is_open() {
            return false;
        }
        self.open(ctx, events);
        true
    }

    fn dismiss_popup(&mut self, _events: &mut FieldEvents) -> bool {
        self.close()
    }

    fn listener_id(&self) -> Option<ListenerId> {
        self.popup.listener_id()
    }

    fn set_popup_regions(&self, regions: Vec<ratatui::layout::Rect>) {
        self.popup.set_regions(regions);
    }

    fn default_placeholder(&self) -> Option<&'static str> {
        Some("Choose file...")
    }

    fn popup_view(&self, _ctx: &ComponentContext<'_>) -> Option<PopupView> {
        if !self.popup.is_open() {
            return None;
        }
        Some(PopupView::Prompt {
            title: "Choose file".to_string(),
            input: self.prompt.clone(),
            hint: format!("Accepts {}", self.filter.describe()),
            rejected: self.rejected,
        })
    }
}
