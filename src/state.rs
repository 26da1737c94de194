use std::collections::HashSet;
use std::fmt;

use crate::breadcrumb::{breadcrumb_path, Crumb};
use crate::index::{TreeIndex, ROOT_ID};
use crate::query::{child_files, child_folders};

/// Type-tagged selection identifier. A folder and a file may share a raw id,
/// so the two id spaces never mix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SelectionKey {
    Folder(String),
    File(String),
}

impl fmt::Display for SelectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionKey::Folder(id) => write!(f, "folder:{id}"),
            SelectionKey::File(id) => write!(f, "file:{id}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Size,
    Kind,
}

impl SortKey {
    pub fn label(self) -> &'static str {
        match self {
            SortKey::Name => "Name",
            SortKey::Size => "Size",
            SortKey::Kind => "Kind",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn marker(self) -> &'static str {
        match self {
            SortOrder::Asc => "▲",
            SortOrder::Desc => "▼",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Grid,
    List,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Grid => ViewMode::List,
            ViewMode::List => ViewMode::Grid,
        }
    }

    /// Stable string form used for the persisted preference.
    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Grid => "grid",
            ViewMode::List => "list",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "grid" => Some(ViewMode::Grid),
            "list" => Some(ViewMode::List),
            _ => None,
        }
    }
}

/// The single mutable source of truth for what is on screen. Created once at
/// initialization and mutated only by the interaction controller; the renderer
/// and queries read it, nothing more.
#[derive(Debug)]
pub struct ViewState {
    pub current_folder_id: String,
    pub selection: HashSet<SelectionKey>,
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
    pub search_query: String,
    pub view_mode: ViewMode,
    pub breadcrumbs: Vec<Crumb>,
}

impl ViewState {
    pub fn new(index: &TreeIndex, view_mode: ViewMode) -> Self {
        Self {
            current_folder_id: ROOT_ID.to_string(),
            selection: HashSet::new(),
            sort_key: SortKey::Name,
            sort_order: SortOrder::Asc,
            search_query: String::new(),
            view_mode,
            breadcrumbs: breadcrumb_path(index, ROOT_ID),
        }
    }

    /// Enter a folder: selection clears and breadcrumbs are recomputed. An
    /// unresolvable id degrades to the root view.
    pub fn navigate_to(&mut self, index: &TreeIndex, folder_id: &str) {
        let target = if index.contains_folder(folder_id) {
            folder_id
        } else {
            ROOT_ID
        };
        self.current_folder_id = target.to_string();
        self.selection.clear();
        self.breadcrumbs = breadcrumb_path(index, target);
    }

    /// Navigate to the parent of the current folder, if any.
    pub fn navigate_up(&mut self, index: &TreeIndex) {
        if self.breadcrumbs.len() < 2 {
            return;
        }
        let parent_id = self.breadcrumbs[self.breadcrumbs.len() - 2].id.clone();
        self.navigate_to(index, &parent_id);
    }

    /// Plain click: selection becomes exactly this item.
    pub fn select_only(&mut self, key: SelectionKey) {
        self.selection.clear();
        self.selection.insert(key);
    }

    /// Modifier/checkbox click: toggle membership, leaving the rest alone.
    pub fn toggle_selection(&mut self, key: SelectionKey) {
        if !self.selection.remove(&key) {
            self.selection.insert(key);
        }
    }

    /// Select everything visible in the current folder (honoring the active
    /// search filter). Not recursive into subfolders.
    pub fn select_all(&mut self, index: &TreeIndex) {
        for key in self.visible_keys(index) {
            self.selection.insert(key);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Header click: same key flips direction, a new key resets to ascending.
    pub fn toggle_sort(&mut self, key: SortKey) {
        if self.sort_key == key {
            self.sort_order = self.sort_order.toggled();
        } else {
            self.sort_key = key;
            self.sort_order = SortOrder::Asc;
        }
    }

    pub fn set_search(&mut self, query: String) {
        self.search_query = query;
    }

    pub fn clear_search(&mut self) {
        self.search_query.clear();
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    /// Everything currently visible in the active folder, folders first, files
    /// in display order. This is the order keyboard navigation walks.
    pub fn visible_keys(&self, index: &TreeIndex) -> Vec<SelectionKey> {
        let mut keys: Vec<SelectionKey> = child_folders(index, &self.current_folder_id)
            .iter()
            .map(|f| SelectionKey::Folder(f.id.clone()))
            .collect();
        keys.extend(
            child_files(
                index,
                &self.current_folder_id,
                &self.search_query,
                self.sort_key,
                self.sort_order,
            )
            .iter()
            .map(|f| SelectionKey::File(f.id.clone())),
        );
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LibraryConfig, RawFile, RawFolder};
    use crate::ingest::build_index;

    fn sample_index() -> TreeIndex {
        let config = LibraryConfig {
            folders: vec![RawFolder {
                id: Some("f1".into()),
                name: Some("Logos".into()),
                parent_id: Some("root".into()),
                color: None,
            }],
            files: vec![
                RawFile {
                    id: Some("a".into()),
                    name: Some("logo.png".into()),
                    url: Some("u".into()),
                    folder_id: Some("f1".into()),
                    ..Default::default()
                },
                RawFile {
                    id: Some("b".into()),
                    name: Some("banner.png".into()),
                    url: Some("u".into()),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        build_index(&config)
    }

    #[test]
    fn test_navigation_resets_selection_and_crumbs() {
        let index = sample_index();
        let mut view = ViewState::new(&index, ViewMode::Grid);
        view.select_only(SelectionKey::File("b".into()));

        view.navigate_to(&index, "f1");
        assert!(view.selection.is_empty());
        let ids: Vec<&str> = view.breadcrumbs.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["root", "f1"]);
    }

    #[test]
    fn test_navigation_to_unknown_folder_degrades_to_root() {
        let index = sample_index();
        let mut view = ViewState::new(&index, ViewMode::Grid);
        view.navigate_to(&index, "ghost");
        assert_eq!(view.current_folder_id, ROOT_ID);
        assert_eq!(view.breadcrumbs.len(), 1);
    }

    #[test]
    fn test_navigate_up() {
        let index = sample_index();
        let mut view = ViewState::new(&index, ViewMode::Grid);
        view.navigate_to(&index, "f1");
        view.navigate_up(&index);
        assert_eq!(view.current_folder_id, ROOT_ID);
        view.navigate_up(&index); // at root: no-op
        assert_eq!(view.current_folder_id, ROOT_ID);
    }

    #[test]
    fn test_plain_click_collapses_selection() {
        let index = sample_index();
        let mut view = ViewState::new(&index, ViewMode::Grid);
        view.toggle_selection(SelectionKey::File("a".into()));
        view.toggle_selection(SelectionKey::Folder("f1".into()));
        view.select_only(SelectionKey::File("b".into()));
        assert_eq!(view.selection.len(), 1);
        assert!(view.selection.contains(&SelectionKey::File("b".into())));
    }

    #[test]
    fn test_toggle_never_disturbs_others() {
        let index = sample_index();
        let mut view = ViewState::new(&index, ViewMode::Grid);
        view.toggle_selection(SelectionKey::File("a".into()));
        view.toggle_selection(SelectionKey::File("b".into()));
        view.toggle_selection(SelectionKey::File("a".into())); // off again
        assert!(view.selection.contains(&SelectionKey::File("b".into())));
        assert!(!view.selection.contains(&SelectionKey::File("a".into())));
    }

    #[test]
    fn test_folder_and_file_ids_do_not_collide() {
        let mut view = ViewState {
            current_folder_id: ROOT_ID.into(),
            selection: HashSet::new(),
            sort_key: SortKey::Name,
            sort_order: SortOrder::Asc,
            search_query: String::new(),
            view_mode: ViewMode::Grid,
            breadcrumbs: Vec::new(),
        };
        view.toggle_selection(SelectionKey::Folder("x".into()));
        view.toggle_selection(SelectionKey::File("x".into()));
        assert_eq!(view.selection.len(), 2);
    }

    #[test]
    fn test_select_all_then_clear_is_empty() {
        let index = sample_index();
        let mut view = ViewState::new(&index, ViewMode::Grid);
        view.select_all(&index);
        // root: folder f1 + file b
        assert_eq!(view.selection.len(), 2);
        view.clear_selection();
        assert!(view.selection.is_empty());
    }

    #[test]
    fn test_select_all_honors_search_filter() {
        let index = sample_index();
        let mut view = ViewState::new(&index, ViewMode::Grid);
        view.navigate_to(&index, "f1");
        view.set_search("xyz".into());
        view.select_all(&index);
        assert!(view.selection.is_empty());
        view.set_search("log".into());
        view.select_all(&index);
        assert!(view.selection.contains(&SelectionKey::File("a".into())));
    }

    #[test]
    fn test_sort_toggle_rules() {
        let index = sample_index();
        let mut view = ViewState::new(&index, ViewMode::Grid);
        assert_eq!(view.sort_order, SortOrder::Asc);
        view.toggle_sort(SortKey::Name);
        assert_eq!(view.sort_order, SortOrder::Desc);
        view.toggle_sort(SortKey::Size);
        assert_eq!(view.sort_key, SortKey::Size);
        assert_eq!(view.sort_order, SortOrder::Asc);
        view.toggle_sort(SortKey::Size);
        view.toggle_sort(SortKey::Size);
        assert_eq!(view.sort_order, SortOrder::Asc);
    }

    #[test]
    fn test_view_mode_round_trips_through_pref_string() {
        for mode in [ViewMode::Grid, ViewMode::List] {
            assert_eq!(ViewMode::parse(mode.as_str()), Some(mode));
        }
        assert_eq!(ViewMode::parse("mosaic"), None);
    }
}
