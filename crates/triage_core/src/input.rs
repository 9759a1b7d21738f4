use crate::ValidationError;

/// Largest file accepted for analysis (2 MiB).
pub const MAX_FILE_BYTES: u64 = 2 * 1024 * 1024;

/// File types the classifier accepts, keyed by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Text,
    Pdf,
}

impl FileKind {
    /// Case-insensitive lookup by the extension of `name`.
    pub fn from_name(name: &str) -> Option<Self> {
        let (_, extension) = name.rsplit_once('.')?;
        if extension.eq_ignore_ascii_case("txt") {
            Some(FileKind::Text)
        } else if extension.eq_ignore_ascii_case("pdf") {
            Some(FileKind::Pdf)
        } else {
            None
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            FileKind::Text => "text/plain",
            FileKind::Pdf => "application/pdf",
        }
    }
}

/// A picked or dropped file.
///
/// `size` is the size reported by the source. For oversized candidates the
/// contents are never read, so `contents` may be shorter than `size`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    name: String,
    size: u64,
    contents: Vec<u8>,
}

impl FileHandle {
    pub fn new(name: impl Into<String>, contents: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            size: contents.len() as u64,
            contents,
        }
    }

    /// A candidate known only by name and size.
    pub fn metadata_only(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            contents: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn contents(&self) -> &[u8] {
        &self.contents
    }

    pub fn kind(&self) -> Option<FileKind> {
        FileKind::from_name(&self.name)
    }
}

/// Checks the size limit first, then the extension.
pub fn validate_candidate(candidate: &FileHandle) -> Result<(), ValidationError> {
    if candidate.size() > MAX_FILE_BYTES {
        return Err(ValidationError::FileTooLarge {
            size: candidate.size(),
            max: MAX_FILE_BYTES,
        });
    }
    if candidate.kind().is_none() {
        return Err(ValidationError::UnsupportedFileType {
            name: candidate.name().to_string(),
        });
    }
    Ok(())
}

/// The single source of truth for user-provided email content.
///
/// `file` only ever holds a candidate that passed [`validate_candidate`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputSource {
    text: String,
    file: Option<FileHandle>,
}

impl InputSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn file(&self) -> Option<&FileHandle> {
        self.file.as_ref()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Stores `candidate` if it is valid. On rejection the current file is kept.
    pub fn set_file(&mut self, candidate: FileHandle) -> Result<&FileHandle, ValidationError> {
        validate_candidate(&candidate)?;
        Ok(self.file.insert(candidate))
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.file = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_of_size(name: &str, size: u64) -> FileHandle {
        FileHandle::metadata_only(name, size)
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        assert_eq!(FileKind::from_name("mail.TXT"), Some(FileKind::Text));
        assert_eq!(FileKind::from_name("scan.Pdf"), Some(FileKind::Pdf));
        assert_eq!(FileKind::from_name("archive.txt.zip"), None);
        assert_eq!(FileKind::from_name("README"), None);
    }

    #[test]
    fn size_limit_is_inclusive() {
        let mut input = InputSource::new();
        assert!(input
            .set_file(file_of_size("edge.txt", MAX_FILE_BYTES))
            .is_ok());
        let err = input
            .set_file(file_of_size("big.txt", MAX_FILE_BYTES + 1))
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::FileTooLarge {
                size: MAX_FILE_BYTES + 1,
                max: MAX_FILE_BYTES
            }
        );
        assert_eq!(input.file().map(FileHandle::name), Some("edge.txt"));
    }

    #[test]
    fn oversized_wrong_type_reports_size_first() {
        let err = validate_candidate(&file_of_size("movie.mkv", MAX_FILE_BYTES * 4)).unwrap_err();
        assert!(matches!(err, ValidationError::FileTooLarge { .. }));
    }

    #[test]
    fn rejected_type_leaves_file_absent() {
        let mut input = InputSource::new();
        let err = input.set_file(file_of_size("photo.png", 10)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnsupportedFileType {
                name: "photo.png".to_string()
            }
        );
        assert!(input.file().is_none());
    }

    #[test]
    fn clear_is_idempotent() {
        let mut input = InputSource::new();
        input.set_text("hello");
        input
            .set_file(FileHandle::new("a.txt", b"body".to_vec()))
            .unwrap();

        input.clear();
        let once = input.clone();
        input.clear();

        assert_eq!(input, once);
        assert_eq!(input.text(), "");
        assert!(input.file().is_none());
    }
}
