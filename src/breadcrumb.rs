use std::collections::HashSet;

use crate::index::{TreeIndex, ROOT_ID};

/// One entry of the root→current navigation path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub id: String,
    pub name: String,
}

/// Reconstruct the root→target path by walking parent pointers. Upstream
/// folder data is free-form, so the walk tracks visited ids and bails out to
/// the single root entry on a repeated id; an unresolvable target degrades the
/// same way. Always terminates.
pub fn breadcrumb_path(index: &TreeIndex, folder_id: &str) -> Vec<Crumb> {
    let Some(target) = index.folder(folder_id) else {
        return vec![root_crumb(index)];
    };

    let mut crumbs = vec![Crumb {
        id: target.id.clone(),
        name: target.name.clone(),
    }];
    let mut visited: HashSet<&str> = HashSet::new();
    visited.insert(target.id.as_str());

    let mut cursor = target.parent_id.as_deref();
    while let Some(id) = cursor {
        if !visited.insert(id) {
            return vec![root_crumb(index)];
        }
        let Some(folder) = index.folder(id) else {
            return vec![root_crumb(index)];
        };
        crumbs.insert(
            0,
            Crumb {
                id: folder.id.clone(),
                name: folder.name.clone(),
            },
        );
        cursor = folder.parent_id.as_deref();
    }
    crumbs
}

fn root_crumb(index: &TreeIndex) -> Crumb {
    Crumb {
        id: ROOT_ID.to_string(),
        name: index
            .folder(ROOT_ID)
            .map(|f| f.name.clone())
            .unwrap_or_else(|| "Library".to_string()),
    }
}
