use std::collections::HashSet;

use tracing::debug;

use crate::config::LibraryConfig;
use crate::index::{FileEntry, Folder, TreeIndex, ROOT_ID};
use crate::mime::mime_for_name;

/// Build the session index from raw config. Never fails wholesale: records
/// missing required fields are dropped, dangling parent references resolve to
/// root, and files without an id get a deterministic generated one.
pub fn build_index(config: &LibraryConfig) -> TreeIndex {
    let root_name = config.title.as_deref().unwrap_or("Library");
    let mut index = TreeIndex::new(root_name);

    for raw in &config.folders {
        let (Some(id), Some(name)) = (raw.id.as_deref(), raw.name.as_deref()) else {
            debug!(?raw, "dropping folder record missing id or name");
            continue;
        };
        if id == ROOT_ID {
            debug!(name, "ignoring folder record claiming the root id");
            continue;
        }
        if index.contains_folder(id) {
            debug!(id, "ignoring duplicate folder id");
            continue;
        }
        index.insert_folder(Folder {
            id: id.to_string(),
            name: name.to_string(),
            parent_id: raw.parent_id.clone(),
            color: raw.color.clone(),
        });
    }

    // Second pass: parents must point at folders that survived the first pass.
    // Anything else (absent, dangling, self-referential) becomes a root child.
    let known: HashSet<String> = index.folders().map(|f| f.id.clone()).collect();
    for folder in index.folders_mut() {
        if folder.id == ROOT_ID {
            continue;
        }
        let resolved = match folder.parent_id.as_deref() {
            Some(parent) if parent != folder.id && known.contains(parent) => parent.to_string(),
            _ => ROOT_ID.to_string(),
        };
        folder.parent_id = Some(resolved);
    }

    let mut used_ids: HashSet<String> = HashSet::new();
    let mut counter = 0usize;
    for raw in &config.files {
        let (Some(name), Some(url)) = (raw.name.as_deref(), raw.url.as_deref()) else {
            debug!(?raw, "dropping file record missing name or url");
            continue;
        };
        let id = match raw.id.as_deref() {
            Some(id) if used_ids.insert(id.to_string()) => id.to_string(),
            _ => next_generated_id(&mut counter, &mut used_ids),
        };
        let folder_id = match raw.folder_id.as_deref() {
            Some(folder) if index.contains_folder(folder) => folder.to_string(),
            _ => ROOT_ID.to_string(),
        };
        index.push_file(FileEntry {
            id,
            name: name.to_string(),
            url: url.to_string(),
            folder_id,
            mime_type: mime_for_name(name).to_string(),
            description: raw.description.clone().unwrap_or_default(),
            size: raw.size,
        });
    }

    debug!(
        folders = index.folder_count(),
        files = index.files().len(),
        "library index built"
    );
    index
}

/// Session-monotonic ids (`file-1`, `file-2`, …) in input order, so identical
/// input yields identical ids on every ingestion.
fn next_generated_id(counter: &mut usize, used: &mut HashSet<String>) -> String {
    loop {
        *counter += 1;
        let candidate = format!("file-{counter}");
        if used.insert(candidate.clone()) {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RawFile, RawFolder};

    fn folder(id: &str, name: &str, parent: Option<&str>) -> RawFolder {
        RawFolder {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            parent_id: parent.map(str::to_string),
            color: None,
        }
    }

    fn file(id: Option<&str>, name: &str, folder: Option<&str>) -> RawFile {
        RawFile {
            id: id.map(str::to_string),
            name: Some(name.to_string()),
            url: Some(format!("https://cdn/{name}")),
            folder_id: folder.map(str::to_string),
            description: None,
            size: None,
        }
    }

    #[test]
    fn test_root_is_synthesized() {
        let index = build_index(&LibraryConfig::default());
        let root = index.folder(ROOT_ID).unwrap();
        assert_eq!(root.parent_id, None);
        assert_eq!(index.folder_count(), 1);
    }

    #[test]
    fn test_incomplete_records_are_dropped() {
        let config = LibraryConfig {
            folders: vec![
                folder("f1", "Logos", Some("root")),
                RawFolder {
                    id: Some("f2".into()),
                    ..Default::default()
                },
            ],
            files: vec![
                file(Some("a"), "logo.png", Some("f1")),
                RawFile {
                    name: Some("no-url.png".into()),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let index = build_index(&config);
        assert_eq!(index.folder_count(), 2); // root + f1
        assert_eq!(index.files().len(), 1);
    }

    #[test]
    fn test_dangling_references_fall_back_to_root() {
        let config = LibraryConfig {
            folders: vec![
                folder("f1", "Orphan", Some("missing")),
                folder("f2", "SelfRef", Some("f2")),
            ],
            files: vec![file(Some("a"), "x.png", Some("nowhere"))],
            ..Default::default()
        };
        let index = build_index(&config);
        assert_eq!(index.folder("f1").unwrap().parent_id.as_deref(), Some(ROOT_ID));
        assert_eq!(index.folder("f2").unwrap().parent_id.as_deref(), Some(ROOT_ID));
        assert_eq!(index.file("a").unwrap().folder_id, ROOT_ID);
    }

    #[test]
    fn test_generated_ids_are_deterministic() {
        let config = LibraryConfig {
            files: vec![
                file(None, "a.png", None),
                file(None, "b.png", None),
                file(Some("file-3"), "c.png", None),
                file(None, "d.png", None),
            ],
            ..Default::default()
        };
        let first: Vec<String> = build_index(&config).files().iter().map(|f| f.id.clone()).collect();
        let second: Vec<String> = build_index(&config).files().iter().map(|f| f.id.clone()).collect();
        assert_eq!(first, second);
        // Generated ids never collide with explicit ones.
        assert_eq!(first, vec!["file-1", "file-2", "file-3", "file-4"]);
    }

    #[test]
    fn test_duplicate_file_id_gets_regenerated() {
        let config = LibraryConfig {
            files: vec![file(Some("a"), "x.png", None), file(Some("a"), "y.png", None)],
            ..Default::default()
        };
        let index = build_index(&config);
        let ids: Vec<&str> = index.files().iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "file-1"]);
    }

    #[test]
    fn test_root_cannot_be_displaced() {
        let config = LibraryConfig {
            title: Some("Assets".into()),
            folders: vec![folder(ROOT_ID, "Impostor", Some("f1"))],
            ..Default::default()
        };
        let index = build_index(&config);
        let root = index.folder(ROOT_ID).unwrap();
        assert_eq!(root.name, "Assets");
        assert_eq!(root.parent_id, None);
    }

    #[test]
    fn test_mime_derived_from_name() {
        let config = LibraryConfig {
            files: vec![file(Some("a"), "logo.PNG", None), file(Some("b"), "notes", None)],
            ..Default::default()
        };
        let index = build_index(&config);
        assert_eq!(index.file("a").unwrap().mime_type, "image/png");
        assert_eq!(index.file("b").unwrap().mime_type, "application/octet-stream");
    }
}
