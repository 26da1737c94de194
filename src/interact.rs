use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use tracing::warn;

use crate::index::TreeIndex;
use crate::overlay::{MenuAction, Overlays, ToastKind};
use crate::prefs::{PreferenceStore, VIEW_MODE_KEY};
use crate::render::{HitRegion, HitTarget};
use crate::state::{SelectionKey, ViewMode, ViewState};

/// Quiet period after the last search keystroke before the query is applied.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Two clicks on the same item within this window count as a double click.
pub const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(400);

/// Seam for the host clipboard so tests and headless hosts can observe the
/// writes. Failures must reach the user; the controller toasts them.
pub trait ClipboardPort {
    fn write_text(&mut self, text: &str) -> Result<(), String>;
}

/// System clipboard via arboard. The handle is created lazily per write since
/// some platforms drop ownership when the handle dies.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardPort for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), String> {
        arboard::Clipboard::new()
            .and_then(|mut clipboard| clipboard.set_text(text.to_string()))
            .map_err(|err| err.to_string())
    }
}

/// Owns the view state and overlays and mutates them in response to input.
/// Nothing else in the crate writes to either.
pub struct Controller {
    pub view: ViewState,
    pub overlays: Overlays,
    pub search_input: String,
    pub search_focused: bool,
    pub should_quit: bool,
    cursor: Option<SelectionKey>,
    prefs: Box<dyn PreferenceStore>,
    clipboard: Box<dyn ClipboardPort>,
    search_deadline: Option<Instant>,
    last_click: Option<(SelectionKey, Instant)>,
}

impl Controller {
    /// The persisted view mode is read once here; everything else starts
    /// fresh each session.
    pub fn new(index: &TreeIndex, prefs: Box<dyn PreferenceStore>, clipboard: Box<dyn ClipboardPort>) -> Self {
        let view_mode = prefs
            .get(VIEW_MODE_KEY)
            .as_deref()
            .and_then(ViewMode::parse)
            .unwrap_or(ViewMode::Grid);
        Self {
            view: ViewState::new(index, view_mode),
            overlays: Overlays::default(),
            search_input: String::new(),
            search_focused: false,
            should_quit: false,
            cursor: None,
            prefs,
            clipboard,
            search_deadline: None,
            last_click: None,
        }
    }

    pub fn cursor(&self) -> Option<&SelectionKey> {
        self.cursor.as_ref()
    }

    /// Drive time-based work: the search debounce deadline and toast expiry.
    pub fn tick(&mut self, now: Instant) {
        if let Some(deadline) = self.search_deadline {
            if now >= deadline {
                self.search_deadline = None;
                self.view.set_search(self.search_input.clone());
            }
        }
        self.overlays.prune_toasts(now);
    }

    pub fn handle_key(&mut self, index: &TreeIndex, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char('c')) {
            self.should_quit = true;
            return;
        }

        // Escape clears selection and closes any open overlay in one stroke,
        // except while typing in the search box (where it just leaves it).
        if key.code == KeyCode::Esc && !self.search_focused {
            self.overlays.close_all();
            self.view.clear_selection();
            return;
        }

        if self.overlays.modal.is_some() {
            self.handle_modal_key(index, key);
            return;
        }
        if self.overlays.context_menu.is_some() {
            // Menu is mouse-driven; keys other than Escape are swallowed.
            return;
        }
        if self.search_focused {
            self.handle_search_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('/') => self.search_focused = true,
            KeyCode::Char('g') => {
                let mode = self.view.view_mode.toggled();
                self.apply_view_mode(mode);
            }
            KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.view.select_all(index);
            }
            KeyCode::Char('s') => {
                let key = self.view.sort_key;
                self.view.toggle_sort(key);
            }
            KeyCode::Up | KeyCode::Left => self.move_cursor(index, -1),
            KeyCode::Down | KeyCode::Right => self.move_cursor(index, 1),
            KeyCode::Enter => self.activate_cursor(index),
            KeyCode::Char(' ') => {
                if let Some(key) = self.cursor.clone() {
                    self.view.toggle_selection(key);
                }
            }
            KeyCode::Backspace => {
                self.cursor = None;
                self.view.navigate_up(index);
            }
            _ => {}
        }
    }

    fn handle_modal_key(&mut self, index: &TreeIndex, key: KeyEvent) {
        let file_id = match self.overlays.modal.as_ref() {
            Some(modal) => modal.file_id.clone(),
            None => return,
        };
        match key.code {
            KeyCode::Char('q') => self.overlays.close_modal(),
            KeyCode::Char('c') => self.copy_url(index, &file_id),
            KeyCode::Char('d') => self.download(index, &file_id),
            _ => {}
        }
    }

    /// While the search box is focused, keystrokes edit the pending input and
    /// arm the debounce; select-all and other shortcuts are suppressed.
    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.search_focused = false;
                if key.code == KeyCode::Enter {
                    // Commit immediately, skipping the rest of the quiet window.
                    self.search_deadline = None;
                    self.view.set_search(self.search_input.clone());
                }
            }
            KeyCode::Backspace => {
                self.search_input.pop();
                self.arm_debounce();
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search_input.push(ch);
                self.arm_debounce();
            }
            _ => {}
        }
    }

    fn arm_debounce(&mut self) {
        self.search_deadline = Some(Instant::now() + SEARCH_DEBOUNCE);
    }

    pub fn handle_mouse(&mut self, index: &TreeIndex, event: MouseEvent, regions: &[HitRegion]) {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.on_left_click(index, event, regions);
            }
            MouseEventKind::Down(MouseButton::Right) => {
                self.on_right_click(index, event, regions);
            }
            _ => {}
        }
    }

    /// Topmost region under the pointer; later regions are drawn above
    /// earlier ones, so scan back to front.
    fn hit<'r>(regions: &'r [HitRegion], x: u16, y: u16) -> Option<&'r HitTarget> {
        regions
            .iter()
            .rev()
            .find(|region| region.contains(x, y))
            .map(|region| &region.target)
    }

    fn on_left_click(&mut self, index: &TreeIndex, event: MouseEvent, regions: &[HitRegion]) {
        let target = Self::hit(regions, event.column, event.row).cloned();

        if self.overlays.modal.is_some() {
            match target {
                Some(HitTarget::ModalCopyUrl) | Some(HitTarget::ModalDownload) | Some(HitTarget::ModalClose) => {
                    let file_id = self.overlays.modal.as_ref().map(|m| m.file_id.clone());
                    if let Some(file_id) = file_id {
                        match target {
                            Some(HitTarget::ModalCopyUrl) => self.copy_url(index, &file_id),
                            Some(HitTarget::ModalDownload) => self.download(index, &file_id),
                            _ => self.overlays.close_modal(),
                        }
                    }
                }
                Some(HitTarget::ModalBody) => {}
                // Backdrop: anywhere outside the modal closes it.
                _ => self.overlays.close_modal(),
            }
            return;
        }

        if self.overlays.context_menu.is_some() {
            if let Some(HitTarget::MenuEntry(action)) = target {
                let file_id = self
                    .overlays
                    .context_menu
                    .as_ref()
                    .map(|m| m.file_id.clone());
                self.overlays.close_menu();
                if let Some(file_id) = file_id {
                    self.run_menu_action(index, action, &file_id);
                }
                return;
            }
            // Clicking outside an open menu closes it first; the click then
            // proceeds normally.
            self.overlays.close_menu();
        }

        let Some(target) = target else {
            self.search_focused = false;
            return;
        };

        match target {
            HitTarget::Item { key, checkbox } => {
                self.search_focused = false;
                let multi = checkbox || event.modifiers.contains(KeyModifiers::CONTROL);
                if multi {
                    self.cursor = Some(key.clone());
                    self.view.toggle_selection(key);
                    self.last_click = None;
                    return;
                }
                let now = Instant::now();
                let is_double = self
                    .last_click
                    .as_ref()
                    .is_some_and(|(last, at)| *last == key && now.duration_since(*at) <= DOUBLE_CLICK_WINDOW);
                if is_double {
                    self.last_click = None;
                    self.activate(index, &key);
                } else {
                    self.cursor = Some(key.clone());
                    self.view.select_only(key.clone());
                    self.last_click = Some((key, now));
                }
            }
            HitTarget::Crumb { folder_id } => {
                self.cursor = None;
                self.view.navigate_to(index, &folder_id);
            }
            HitTarget::SortHeader(sort_key) => self.view.toggle_sort(sort_key),
            HitTarget::ViewToggle => {
                let mode = self.view.view_mode.toggled();
                self.apply_view_mode(mode);
            }
            HitTarget::SearchBox => self.search_focused = true,
            HitTarget::SearchClear => {
                // The dedicated clear control skips the debounce entirely.
                self.search_input.clear();
                self.search_deadline = None;
                self.search_focused = false;
                self.view.clear_search();
            }
            HitTarget::SelectionCopy => self.copy_selection_urls(index),
            HitTarget::SelectionClear => self.view.clear_selection(),
            HitTarget::MenuEntry(_)
            | HitTarget::ModalBody
            | HitTarget::ModalCopyUrl
            | HitTarget::ModalDownload
            | HitTarget::ModalClose => {}
        }
    }

    fn on_right_click(&mut self, index: &TreeIndex, event: MouseEvent, regions: &[HitRegion]) {
        if self.overlays.modal.is_some() {
            return;
        }
        match Self::hit(regions, event.column, event.row) {
            Some(HitTarget::Item {
                key: SelectionKey::File(file_id),
                ..
            }) => {
                let file_id = file_id.clone();
                if index.file(&file_id).is_some() {
                    // Replaces any open menu.
                    self.overlays.open_menu(file_id, (event.column, event.row));
                }
            }
            _ => self.overlays.close_menu(),
        }
    }

    /// Double-click / Enter semantics: folders navigate, files preview.
    fn activate(&mut self, index: &TreeIndex, key: &SelectionKey) {
        match key {
            SelectionKey::Folder(id) => {
                self.cursor = None;
                self.view.navigate_to(index, id);
            }
            SelectionKey::File(id) => {
                if index.file(id).is_some() {
                    self.overlays.open_modal(id.clone());
                }
            }
        }
    }

    fn activate_cursor(&mut self, index: &TreeIndex) {
        if let Some(key) = self.cursor.clone() {
            self.activate(index, &key);
        }
    }

    /// Keyboard embedding of the click rules: the cursor lands with plain
    /// click semantics (selection collapses to the item under it).
    fn move_cursor(&mut self, index: &TreeIndex, delta: isize) {
        let keys = self.view.visible_keys(index);
        if keys.is_empty() {
            return;
        }
        let next = match self.cursor.as_ref().and_then(|c| keys.iter().position(|k| k == c)) {
            Some(i) => {
                let i = i as isize + delta;
                i.clamp(0, keys.len() as isize - 1) as usize
            }
            None => {
                if delta < 0 {
                    keys.len() - 1
                } else {
                    0
                }
            }
        };
        let key = keys[next].clone();
        self.cursor = Some(key.clone());
        self.view.select_only(key);
    }

    fn run_menu_action(&mut self, index: &TreeIndex, action: MenuAction, file_id: &str) {
        match action {
            MenuAction::Preview => {
                if index.file(file_id).is_some() {
                    self.overlays.open_modal(file_id.to_string());
                }
            }
            MenuAction::CopyUrl => self.copy_url(index, file_id),
            MenuAction::Download => self.download(index, file_id),
        }
    }

    fn apply_view_mode(&mut self, mode: ViewMode) {
        self.view.set_view_mode(mode);
        if let Err(err) = self.prefs.set(VIEW_MODE_KEY, mode.as_str()) {
            warn!(%err, "view mode preference not persisted");
            self.overlays
                .push_toast(ToastKind::Error, "View preference could not be saved");
        }
    }

    fn copy_url(&mut self, index: &TreeIndex, file_id: &str) {
        let Some(file) = index.file(file_id) else {
            return;
        };
        let url = file.url.clone();
        self.copy_text(&url, "URL copied");
    }

    /// Download has no terminal-native analog; hand the URL to the clipboard
    /// so the host browser can fetch it.
    fn download(&mut self, index: &TreeIndex, file_id: &str) {
        let Some(file) = index.file(file_id) else {
            return;
        };
        let url = file.url.clone();
        self.copy_text(&url, "URL copied — open it in your browser to download");
    }

    fn copy_selection_urls(&mut self, index: &TreeIndex) {
        let urls: Vec<String> = index
            .files()
            .iter()
            .filter(|f| self.view.selection.contains(&SelectionKey::File(f.id.clone())))
            .map(|f| f.url.clone())
            .collect();
        if urls.is_empty() {
            self.overlays
                .push_toast(ToastKind::Info, "No file URLs in selection");
            return;
        }
        let count = urls.len();
        self.copy_text(&urls.join("\n"), &format!("{count} URLs copied"));
    }

    fn copy_text(&mut self, text: &str, success: &str) {
        match self.clipboard.write_text(text) {
            Ok(()) => self.overlays.push_toast(ToastKind::Success, success),
            Err(err) => {
                warn!(%err, "clipboard write failed");
                self.overlays
                    .push_toast(ToastKind::Error, format!("Copy failed: {err}"));
            }
        }
    }
}
