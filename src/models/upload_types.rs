use serde::Serialize;

/// A CSV file picked for one submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub media_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn info(&self) -> SelectedFileInfo {
        SelectedFileInfo {
            name: self.name.clone(),
            size: self.size(),
            size_label: format!("{:.1} KB", self.size() as f64 / 1024.0),
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct SelectedFileInfo {
    pub name: String,
    pub size: u64,
    pub size_label: String,
}
