const ALLOWED_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Why an upload was refused.
#[derive(Debug, PartialEq, Eq)]
pub enum UploadError {
    Empty,
    InvalidType(String),
    NoExtension,
    InvalidExtension(String),
    TooLarge { max_size: u64 },
}

impl UploadError {
    pub fn message(&self) -> String {
        match self {
            Self::Empty => "Cannot upload empty file".into(),
            Self::InvalidType(mime) => format!(
                "Invalid file type '{mime}'. Allowed types: {}",
                ALLOWED_MIME_TYPES.join(", ")
            ),
            Self::NoExtension => "File has no extension".into(),
            Self::InvalidExtension(ext) => format!(
                "Invalid file extension '{ext}'. Allowed extensions: {}",
                ALLOWED_EXTENSIONS.join(", ")
            ),
            Self::TooLarge { max_size } => format!(
                "File size exceeds maximum limit of {}MB",
                max_size / (1024 * 1024)
            ),
        }
    }
}

/// Check an uploaded image and return its lowercased extension.
///
/// Checks run in a fixed order: emptiness, declared MIME type, presence of an
/// extension, allowed extension, then size.
pub fn validate_upload(
    original_filename: Option<&str>,
    content_type: Option<&str>,
    size: u64,
    max_size: u64,
) -> Result<String, UploadError> {
    if size == 0 {
        return Err(UploadError::Empty);
    }

    let mime = content_type
        .map(|ct| ct.split(';').next().unwrap_or_default().trim().to_ascii_lowercase())
        .unwrap_or_default();
    if !ALLOWED_MIME_TYPES.contains(&mime.as_str()) {
        return Err(UploadError::InvalidType(mime));
    }

    let extension = original_filename
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.trim())
        .filter(|ext| !ext.is_empty())
        .ok_or(UploadError::NoExtension)?
        .to_ascii_lowercase();
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(UploadError::InvalidExtension(extension));
    }

    if size > max_size {
        return Err(UploadError::TooLarge { max_size });
    }

    Ok(extension)
}

/// `Content-Type` for serving a stored object, derived from the key's extension only.
pub fn content_type_for(key: &str) -> String {
    mime_guess::from_path(key)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}
