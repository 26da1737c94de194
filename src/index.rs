use std::collections::HashMap;

/// Id of the synthetic root folder. It always exists and is never a child of
/// any folder, including itself.
pub const ROOT_ID: &str = "root";

/// A validated folder node. `parent_id` is `None` only for the root; for every
/// other folder it resolves to an existing folder after ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
    pub id: String,
    pub name: String,
    pub parent_id: Option<String>,
    pub color: Option<String>,
}

/// A validated file leaf. `folder_id` always resolves after ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub id: String,
    pub name: String,
    pub url: String,
    pub folder_id: String,
    pub mime_type: String,
    pub description: String,
    pub size: Option<u64>,
}

/// In-memory index of the folder/file tree. Built once at startup and
/// immutable for the rest of the session.
#[derive(Debug)]
pub struct TreeIndex {
    folders: HashMap<String, Folder>,
    files: Vec<FileEntry>,
}

impl TreeIndex {
    /// Create an index seeded with the synthetic root folder.
    pub fn new(root_name: &str) -> Self {
        let mut folders = HashMap::new();
        folders.insert(
            ROOT_ID.to_string(),
            Folder {
                id: ROOT_ID.to_string(),
                name: root_name.to_string(),
                parent_id: None,
                color: None,
            },
        );
        Self {
            folders,
            files: Vec::new(),
        }
    }

    pub fn folder(&self, id: &str) -> Option<&Folder> {
        self.folders.get(id)
    }

    pub fn file(&self, id: &str) -> Option<&FileEntry> {
        self.files.iter().find(|f| f.id == id)
    }

    pub fn folders(&self) -> impl Iterator<Item = &Folder> {
        self.folders.values()
    }

    /// Files in ingestion order.
    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    pub fn folder_count(&self) -> usize {
        self.folders.len()
    }

    pub fn contains_folder(&self, id: &str) -> bool {
        self.folders.contains_key(id)
    }

    pub(crate) fn insert_folder(&mut self, folder: Folder) {
        self.folders.insert(folder.id.clone(), folder);
    }

    pub(crate) fn push_file(&mut self, file: FileEntry) {
        self.files.push(file);
    }

    pub(crate) fn folders_mut(&mut self) -> impl Iterator<Item = &mut Folder> {
        self.folders.values_mut()
    }
}
