use crate::entities::data_url::DataUrl;

/// A file handed over by a picker or a drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl FileCandidate {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        FileCandidate {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    pub fn to_data_url(&self) -> String {
        DataUrl::encode(&self.mime_type, &self.bytes)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEvent {
    Enter,
    Over,
    Leave,
}

/// State behind the Upload tab.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadPanel {
    /// Data URL of the previewed file.
    pub selected: Option<String>,
    pub drag_active: bool,
    pub uploading: bool,
    pub error: Option<String>,
}

impl UploadPanel {
    pub fn drag(&mut self, event: DragEvent) {
        self.drag_active = matches!(event, DragEvent::Enter | DragEvent::Over);
    }

    /// Non-image files are ignored and keep whatever was selected before.
    pub fn select_file(&mut self, file: &FileCandidate) -> bool {
        if !file.is_image() {
            tracing::debug!(name = %file.name, mime = %file.mime_type, "Ignoring non-image file");
            return false;
        }

        self.selected = Some(file.to_data_url());
        true
    }

    pub fn drop_files(&mut self, files: &[FileCandidate]) -> bool {
        self.drag_active = false;
        files.first().is_some_and(|file| self.select_file(file))
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn can_upload(&self) -> bool {
        self.selected.is_some() && !self.uploading
    }

    /// Returns the payload to post, or `None` while the action is disabled.
    pub fn begin_upload(&mut self) -> Option<String> {
        if !self.can_upload() {
            return None;
        }

        self.error = None;
        self.uploading = true;
        self.selected.clone()
    }

    pub fn upload_succeeded(&mut self) {
        self.selected = None;
        self.uploading = false;
    }

    pub fn upload_failed(&mut self, message: String) {
        self.error = Some(message);
        self.uploading = false;
    }

    pub fn button_label(&self) -> &'static str {
        if self.uploading { "Uploading..." } else { "Upload" }
    }
}
