use std::cmp::Ordering;

use crate::index::{FileEntry, Folder, TreeIndex, ROOT_ID};
use crate::state::{SortKey, SortOrder};

/// Case-insensitive name comparison (`a.png` sorts before `B.png`). Names that
/// differ only by case compare equal so stable sorting preserves input order.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Folders whose parent is `folder_id`, in name order. The root never appears
/// as a child, not even of itself.
pub fn child_folders<'a>(index: &'a TreeIndex, folder_id: &str) -> Vec<&'a Folder> {
    let mut out: Vec<&Folder> = index
        .folders()
        .filter(|f| f.id != ROOT_ID && f.parent_id.as_deref() == Some(folder_id))
        .collect();
    // The folder map is unordered; sort by name with an id tiebreak so the
    // listing is stable across renders.
    out.sort_by(|a, b| compare_names(&a.name, &b.name).then_with(|| a.id.cmp(&b.id)));
    out
}

/// Files of a folder, filtered by a case-insensitive substring match on the
/// name when `query` is non-empty, then stably sorted per `(key, order)`.
/// Whitespace in the query is significant, like any other character.
pub fn child_files<'a>(
    index: &'a TreeIndex,
    folder_id: &str,
    query: &str,
    key: SortKey,
    order: SortOrder,
) -> Vec<&'a FileEntry> {
    let needle = query.to_lowercase();
    let mut out: Vec<&FileEntry> = index
        .files()
        .iter()
        .filter(|f| f.folder_id == folder_id)
        .filter(|f| needle.is_empty() || f.name.to_lowercase().contains(&needle))
        .collect();
    out.sort_by(|a, b| {
        let ord = compare_files(a, b, key);
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
    out
}

/// Entries lacking the active sort field fall back to name comparison.
fn compare_files(a: &FileEntry, b: &FileEntry, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => compare_names(&a.name, &b.name),
        SortKey::Kind => compare_names(&a.mime_type, &b.mime_type),
        SortKey::Size => match (a.size, b.size) {
            (Some(x), Some(y)) => x.cmp(&y),
            _ => compare_names(&a.name, &b.name),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LibraryConfig, RawFile, RawFolder};
    use crate::ingest::build_index;

    fn index_from(folders: &[(&str, &str, &str)], files: &[(&str, &str, &str)]) -> TreeIndex {
        let config = LibraryConfig {
            folders: folders
                .iter()
                .map(|(id, name, parent)| RawFolder {
                    id: Some(id.to_string()),
                    name: Some(name.to_string()),
                    parent_id: Some(parent.to_string()),
                    color: None,
                })
                .collect(),
            files: files
                .iter()
                .map(|(id, name, folder)| RawFile {
                    id: Some(id.to_string()),
                    name: Some(name.to_string()),
                    url: Some(format!("https://cdn/{name}")),
                    folder_id: Some(folder.to_string()),
                    description: None,
                    size: None,
                })
                .collect(),
            ..Default::default()
        };
        build_index(&config)
    }

    #[test]
    fn test_root_never_its_own_child() {
        let index = index_from(&[("f1", "Logos", "root")], &[]);
        for folder_id in ["root", "f1", "missing"] {
            assert!(child_folders(&index, folder_id).iter().all(|f| f.id != ROOT_ID));
        }
    }

    #[test]
    fn test_child_folders_of_root() {
        let index = index_from(&[("f1", "Logos", "root"), ("f2", "Banners", "root"), ("f3", "Sub", "f1")], &[]);
        let names: Vec<&str> = child_folders(&index, "root").iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Banners", "Logos"]);
    }

    #[test]
    fn test_search_filters_case_insensitively() {
        let index = index_from(
            &[("f1", "Logos", "root")],
            &[("a", "logo.png", "f1"), ("b", "banner.jpg", "f1")],
        );
        let hits = child_files(&index, "f1", "LOG", SortKey::Name, SortOrder::Asc);
        assert_eq!(hits.iter().map(|f| f.id.as_str()).collect::<Vec<_>>(), vec!["a"]);
        assert!(child_files(&index, "f1", "xyz", SortKey::Name, SortOrder::Asc).is_empty());
    }

    #[test]
    fn test_search_whitespace_is_significant() {
        let index = index_from(
            &[],
            &[("a", "logo 2.png", "root"), ("b", "logo.png", "root")],
        );
        let hits = child_files(&index, "root", "o ", SortKey::Name, SortOrder::Asc);
        assert_eq!(hits.iter().map(|f| f.id.as_str()).collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn test_sort_is_case_insensitive() {
        let index = index_from(&[], &[("b", "B.png", "root"), ("a", "a.png", "root")]);
        let names: Vec<&str> = child_files(&index, "root", "", SortKey::Name, SortOrder::Asc)
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["a.png", "B.png"]);
    }

    #[test]
    fn test_sort_round_trip() {
        let index = index_from(
            &[],
            &[("1", "c.png", "root"), ("2", "a.png", "root"), ("3", "b.png", "root")],
        );
        let asc: Vec<&str> = child_files(&index, "root", "", SortKey::Name, SortOrder::Asc)
            .iter()
            .map(|f| f.id.as_str())
            .collect();
        let desc: Vec<&str> = child_files(&index, "root", "", SortKey::Name, SortOrder::Desc)
            .iter()
            .map(|f| f.id.as_str())
            .collect();
        let asc_again: Vec<&str> = child_files(&index, "root", "", SortKey::Name, SortOrder::Asc)
            .iter()
            .map(|f| f.id.as_str())
            .collect();
        assert_eq!(asc, vec!["2", "3", "1"]);
        assert_eq!(desc, vec!["1", "3", "2"]);
        assert_eq!(asc, asc_again);
    }

    #[test]
    fn test_equal_keys_preserve_input_order() {
        // Same name modulo case: the comparator treats them as equal, so the
        // stable sort must keep ingestion order.
        let index = index_from(
            &[],
            &[("1", "Logo.png", "root"), ("2", "logo.png", "root"), ("3", "LOGO.png", "root")],
        );
        let ids: Vec<&str> = child_files(&index, "root", "", SortKey::Name, SortOrder::Asc)
            .iter()
            .map(|f| f.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_size_sort_falls_back_to_name_when_absent() {
        let config = LibraryConfig {
            files: vec![
                RawFile {
                    id: Some("big".into()),
                    name: Some("zz.png".into()),
                    url: Some("u".into()),
                    size: Some(100),
                    ..Default::default()
                },
                RawFile {
                    id: Some("small".into()),
                    name: Some("aa.png".into()),
                    url: Some("u".into()),
                    size: Some(1),
                    ..Default::default()
                },
                RawFile {
                    id: Some("nosize".into()),
                    name: Some("mm.png".into()),
                    url: Some("u".into()),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let index = build_index(&config);
        let ids: Vec<&str> = child_files(&index, "root", "", SortKey::Size, SortOrder::Asc)
            .iter()
            .map(|f| f.id.as_str())
            .collect();
        // Pairs with sizes compare numerically; the sizeless entry compares by
        // name against both, landing between aa and zz.
        assert_eq!(ids, vec!["small", "nosize", "big"]);
    }

    #[test]
    fn test_files_scoped_to_folder() {
        let index = index_from(
            &[("f1", "Logos", "root")],
            &[("a", "x.png", "f1"), ("b", "y.png", "root")],
        );
        let ids: Vec<&str> = child_files(&index, "f1", "", SortKey::Name, SortOrder::Asc)
            .iter()
            .map(|f| f.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a"]);
    }
}
