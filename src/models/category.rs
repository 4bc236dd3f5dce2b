use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;
use utoipa::ToSchema;

/// Display label used for names without an extension.
pub const UNKNOWN_LABEL: &str = "Unknown";
pub const UNKNOWN_ICON: &str = "📁";
pub const UNKNOWN_COLOR: &str = "#999999";

/// Fixed file categories, in lookup priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    AudioVideo,
    Document,
    Image,
    Other,
}

struct CategoryInfo {
    label: &'static str,
    icon: &'static str,
    color: &'static str,
    extensions: &'static [&'static str],
    previewable: &'static [&'static str],
}

const AUDIO_VIDEO: CategoryInfo = CategoryInfo {
    label: "Audio/Video",
    icon: "🎬",
    color: "#ff6b6b",
    extensions: &[
        "mp4", "avi", "mov", "mkv", "flv", "wmv", "m4v", "3gp", "webm", "mp3", "wav", "flac",
        "aac", "ogg", "m4a", "wma",
    ],
    previewable: &[
        "mp4", "avi", "mov", "mkv", "webm", "mp3", "wav", "flac", "aac", "ogg", "m4a",
    ],
};

const DOCUMENT: CategoryInfo = CategoryInfo {
    label: "Document",
    icon: "📄",
    color: "#4ecdc4",
    extensions: &[
        "pdf", "doc", "docx", "txt", "rtf", "odt", "pages", "xls", "xlsx", "csv", "ods", "ppt",
        "pptx", "odp", "key",
    ],
    previewable: &[],
};

const IMAGE: CategoryInfo = CategoryInfo {
    label: "Image",
    icon: "🖼️",
    color: "#45b7d1",
    extensions: &["jpg", "jpeg", "png", "gif", "bmp", "tiff", "svg", "webp"],
    previewable: &["jpg", "jpeg", "png", "gif", "bmp", "svg", "webp"],
};

const OTHER: CategoryInfo = CategoryInfo {
    label: "Other",
    icon: "📦",
    color: "#96ceb4",
    extensions: &[
        "zip", "rar", "7z", "tar", "gz", "bz2", "js", "py", "html", "css", "json", "xml", "java",
        "cpp", "c",
    ],
    previewable: &[],
};

impl Category {
    pub const ALL: [Category; 4] = [
        Category::AudioVideo,
        Category::Document,
        Category::Image,
        Category::Other,
    ];

    fn info(self) -> &'static CategoryInfo {
        match self {
            Category::AudioVideo => &AUDIO_VIDEO,
            Category::Document => &DOCUMENT,
            Category::Image => &IMAGE,
            Category::Other => &OTHER,
        }
    }

    pub fn label(self) -> &'static str {
        self.info().label
    }

    pub fn icon(self) -> &'static str {
        self.info().icon
    }

    pub fn color(self) -> &'static str {
        self.info().color
    }

    pub fn extensions(self) -> &'static [&'static str] {
        self.info().extensions
    }

    /// Extensions a browser can render inline.
    pub fn previewable_extensions(self) -> &'static [&'static str] {
        self.info().previewable
    }

    pub fn is_previewable(self, extension: &str) -> bool {
        self.info().previewable.contains(&extension)
    }

    fn contains(self, extension: &str) -> bool {
        self.info().extensions.contains(&extension)
    }
}

/// Lower-cased text after the last `.`, if there is any.
pub fn extension_of(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}

/// Maps a filename to its category.
///
/// Names without an extension are unknown (`None`). Extensions missing from
/// every table fall back to [`Category::Other`].
pub fn classify(filename: &str) -> Option<Category> {
    let ext = extension_of(filename)?;
    let found = Category::ALL.into_iter().find(|c| c.contains(&ext));
    Some(found.unwrap_or(Category::Other))
}

/// True only when the extension is listed in one of the category tables.
pub fn is_supported(filename: &str) -> bool {
    extension_of(filename).is_some_and(|ext| Category::ALL.iter().any(|c| c.contains(&ext)))
}

/// True when the file can be shown in the page's preview modal.
pub fn is_previewable(filename: &str) -> bool {
    match (classify(filename), extension_of(filename)) {
        (Some(category), Some(ext)) => category.is_previewable(&ext),
        _ => false,
    }
}

pub fn label_for(category: Option<Category>) -> &'static str {
    category.map(Category::label).unwrap_or(UNKNOWN_LABEL)
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("extension '{extension}' is listed under both {first:?} and {second:?}")]
pub struct CategoryOverlap {
    pub extension: &'static str,
    pub first: Category,
    pub second: Category,
}

/// Checks that no extension is claimed by two categories.
pub fn verify_category_table() -> Result<(), CategoryOverlap> {
    verify_tables(Category::ALL.iter().map(|c| (*c, c.extensions())))
}

fn verify_tables<'a>(
    tables: impl IntoIterator<Item = (Category, &'a [&'static str])>,
) -> Result<(), CategoryOverlap> {
    let mut seen: HashMap<&'static str, Category> = HashMap::new();
    for (category, extensions) in tables {
        for &ext in extensions {
            if let Some(first) = seen.insert(ext, category)
                && first != category
            {
                return Err(CategoryOverlap {
                    extension: ext,
                    first,
                    second: category,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_extensions() {
        assert_eq!(classify("movie.mp4"), Some(Category::AudioVideo));
        assert_eq!(classify("song.flac"), Some(Category::AudioVideo));
        assert_eq!(classify("report.pdf"), Some(Category::Document));
        assert_eq!(classify("slides.key"), Some(Category::Document));
        assert_eq!(classify("photo.jpeg"), Some(Category::Image));
        assert_eq!(classify("bundle.7z"), Some(Category::Other));
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(classify("MOVIE.MP4"), Some(Category::AudioVideo));
        assert_eq!(classify("Photo.JpG"), Some(Category::Image));
    }

    #[test]
    fn test_classify_uses_last_dot() {
        assert_eq!(classify("archive.tar.gz"), Some(Category::Other));
        assert_eq!(classify("notes.pdf.png"), Some(Category::Image));
    }

    #[test]
    fn test_classify_fallback_and_unknown() {
        assert_eq!(classify("binary.exe"), Some(Category::Other));
        assert_eq!(classify("README"), None);
        assert_eq!(classify("trailing."), None);
        assert_eq!(label_for(classify("README")), UNKNOWN_LABEL);
    }

    #[test]
    fn test_every_table_entry_classifies_to_its_category() {
        for category in Category::ALL {
            for ext in category.extensions() {
                assert_eq!(classify(&format!("file.{}", ext)), Some(category));
                assert_eq!(
                    classify(&format!("file.{}", ext.to_uppercase())),
                    Some(category)
                );
            }
        }
    }

    #[test]
    fn test_is_supported() {
        assert!(is_supported("a.mp3"));
        assert!(is_supported("a.DOCX"));
        assert!(is_supported("a.json"));
        assert!(!is_supported("a.exe"));
        assert!(!is_supported("noext"));
        assert!(!is_supported(""));
    }

    #[test]
    fn test_is_previewable() {
        assert!(is_previewable("clip.webm"));
        assert!(is_previewable("pic.PNG"));
        assert!(!is_previewable("clip.wmv"));
        assert!(!is_previewable("pic.tiff"));
        assert!(!is_previewable("doc.pdf"));
        assert!(!is_previewable("noext"));
    }

    #[test]
    fn test_category_table_has_no_overlap() {
        assert_eq!(verify_category_table(), Ok(()));
    }

    #[test]
    fn test_overlap_is_detected() {
        let first: &[&'static str] = &["mp4", "png"];
        let second: &[&'static str] = &["png"];
        let err = verify_tables([(Category::AudioVideo, first), (Category::Image, second)])
            .unwrap_err();
        assert_eq!(err.extension, "png");
        assert_eq!(err.first, Category::AudioVideo);
        assert_eq!(err.second, Category::Image);
    }
}
