use std::time::{Duration, Instant};

use ratatui::layout::Rect;

/// How long a toast stays on screen.
pub const TOAST_TTL: Duration = Duration::from_millis(2500);

/// Actions offered by a file's context menu and the preview footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Preview,
    CopyUrl,
    Download,
}

impl MenuAction {
    pub const ALL: [MenuAction; 3] = [MenuAction::Preview, MenuAction::CopyUrl, MenuAction::Download];

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::Preview => "Preview",
            MenuAction::CopyUrl => "Copy URL",
            MenuAction::Download => "Download",
        }
    }
}

/// A context menu anchored at the invoking click.
#[derive(Debug, Clone)]
pub struct ContextMenu {
    pub file_id: String,
    pub anchor: (u16, u16),
}

/// The preview modal for a single file.
#[derive(Debug, Clone)]
pub struct Modal {
    pub file_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub expires_at: Instant,
}

/// Transient UI outside the main listing. Context menu and modal are owned
/// singletons (opening replaces the previous instance); toasts stack freely
/// and expire on the event-loop tick.
#[derive(Debug, Default)]
pub struct Overlays {
    pub context_menu: Option<ContextMenu>,
    pub modal: Option<Modal>,
    pub toasts: Vec<Toast>,
}

impl Overlays {
    pub fn open_menu(&mut self, file_id: String, anchor: (u16, u16)) {
        self.context_menu = Some(ContextMenu { file_id, anchor });
    }

    pub fn close_menu(&mut self) {
        self.context_menu = None;
    }

    pub fn open_modal(&mut self, file_id: String) {
        self.context_menu = None;
        self.modal = Some(Modal { file_id });
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    /// Close the menu and modal. Toasts are independent and keep running.
    pub fn close_all(&mut self) {
        self.context_menu = None;
        self.modal = None;
    }

    pub fn any_open(&self) -> bool {
        self.context_menu.is_some() || self.modal.is_some()
    }

    pub fn push_toast(&mut self, kind: ToastKind, message: impl Into<String>) {
        self.toasts.push(Toast {
            message: message.into(),
            kind,
            expires_at: Instant::now() + TOAST_TTL,
        });
    }

    /// Drop expired toasts. Driven by the event-loop tick.
    pub fn prune_toasts(&mut self, now: Instant) {
        self.toasts.retain(|t| t.expires_at > now);
    }
}

/// Place a menu of the given size anchored below-left of `anchor`, flipped
/// above when it would run past the bottom edge and shifted left to stay
/// inside the viewport.
pub fn place_menu(anchor: (u16, u16), width: u16, height: u16, viewport: Rect) -> Rect {
    let width = width.min(viewport.width);
    let height = height.min(viewport.height);
    let right = viewport.x + viewport.width;
    let bottom = viewport.y + viewport.height;

    let (ax, ay) = anchor;
    let mut x = ax.max(viewport.x);
    let mut y = ay.saturating_add(1);

    if y + height > bottom {
        y = ay.saturating_sub(height).max(viewport.y);
    }
    if y + height > bottom {
        y = bottom.saturating_sub(height);
    }
    if x + width > right {
        x = right.saturating_sub(width);
    }

    Rect::new(x.max(viewport.x), y.max(viewport.y), width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_is_singleton() {
        let mut overlays = Overlays::default();
        overlays.open_menu("a".into(), (1, 1));
        overlays.open_menu("b".into(), (2, 2));
        assert_eq!(overlays.context_menu.as_ref().unwrap().file_id, "b");
    }

    #[test]
    fn test_modal_replaces_and_closes_menu() {
        let mut overlays = Overlays::default();
        overlays.open_menu("a".into(), (1, 1));
        overlays.open_modal("a".into());
        assert!(overlays.context_menu.is_none());
        overlays.open_modal("b".into());
        assert_eq!(overlays.modal.as_ref().unwrap().file_id, "b");
    }

    #[test]
    fn test_toasts_stack_and_survive_close_all() {
        let mut overlays = Overlays::default();
        overlays.push_toast(ToastKind::Info, "one");
        overlays.push_toast(ToastKind::Error, "two");
        overlays.open_modal("a".into());
        overlays.close_all();
        assert!(!overlays.any_open());
        assert_eq!(overlays.toasts.len(), 2);
    }

    #[test]
    fn test_toast_expiry() {
        let mut overlays = Overlays::default();
        overlays.push_toast(ToastKind::Success, "done");
        overlays.prune_toasts(Instant::now());
        assert_eq!(overlays.toasts.len(), 1);
        overlays.prune_toasts(Instant::now() + TOAST_TTL + Duration::from_millis(10));
        assert!(overlays.toasts.is_empty());
    }

    #[test]
    fn test_menu_placement_below_anchor() {
        let viewport = Rect::new(0, 0, 80, 24);
        let rect = place_menu((10, 5), 14, 5, viewport);
        assert_eq!((rect.x, rect.y), (10, 6));
    }

    #[test]
    fn test_menu_flips_above_near_bottom() {
        let viewport = Rect::new(0, 0, 80, 24);
        let rect = place_menu((10, 22), 14, 5, viewport);
        assert_eq!(rect.y, 17); // 22 - 5, fully above the anchor
        assert!(rect.y + rect.height <= 24);
    }

    #[test]
    fn test_menu_shifts_left_near_right_edge() {
        let viewport = Rect::new(0, 0, 80, 24);
        let rect = place_menu((75, 5), 14, 5, viewport);
        assert_eq!(rect.x, 66); // 80 - 14
        assert!(rect.x + rect.width <= 80);
    }

    #[test]
    fn test_menu_never_leaves_tiny_viewport() {
        let viewport = Rect::new(0, 0, 10, 3);
        let rect = place_menu((9, 2), 14, 5, viewport);
        assert!(rect.x + rect.width <= 10);
        assert!(rect.y + rect.height <= 3);
    }
}
