//! Upload preview helper
//!
//! Mirrors the custom file-input behavior of the upload form: the label
//! shows the chosen file name (or `No file selected`), images get an
//! inline data-URI preview, and everything else gets a coarse file-type
//! tag derived from the MIME type first and the extension second.

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::model::{Row, RowSet};
use crate::core::render::{RenderConfig, Renderer};

/// Label used when the preview target does not exist
pub const NO_FILE_LABEL: &str = "No file selected";

/// Coarse file type tag for non-image uploads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewKind {
    Csv,
    Json,
    Excel,
    Generic,
}

impl PreviewKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PreviewKind::Csv => "csv",
            PreviewKind::Json => "json",
            PreviewKind::Excel => "excel",
            PreviewKind::Generic => "generic",
        }
    }
}

/// Detect the coarse file type: MIME substring first, then filename
/// extension. Unknown types fall back to `generic` rather than erroring.
pub fn detect_kind(mime: Option<&str>, file_name: &str) -> PreviewKind {
    if let Some(mime) = mime {
        let mime = mime.to_lowercase();
        if mime.contains("csv") {
            return PreviewKind::Csv;
        }
        if mime.contains("json") {
            return PreviewKind::Json;
        }
        if mime.contains("excel") {
            return PreviewKind::Excel;
        }
    }

    let name = file_name.to_lowercase();
    if name.ends_with(".csv") {
        PreviewKind::Csv
    } else if name.ends_with(".json") {
        PreviewKind::Json
    } else if name.ends_with(".xlsx") || name.ends_with(".xls") {
        PreviewKind::Excel
    } else {
        PreviewKind::Generic
    }
}

/// Whether the upload should get an inline image preview
pub fn is_image(mime: Option<&str>, file_name: &str) -> bool {
    if let Some(mime) = mime {
        return mime.to_lowercase().starts_with("image/");
    }
    image_mime_for(file_name).is_some()
}

/// MIME type guessed from an image file extension
fn image_mime_for(file_name: &str) -> Option<&'static str> {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())?
        .to_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}

/// Encode image bytes as an inline data URI
pub fn image_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, BASE64.encode(bytes))
}

/// Run the preview command
pub fn run_preview(
    root: &Path,
    path: &Path,
    mime: Option<&str>,
    render_config: RenderConfig,
) -> Result<()> {
    let full = if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    };

    let mut rows = RowSet::new();

    if !full.exists() {
        rows.push(Row::preview(
            NO_FILE_LABEL,
            serde_json::json!({ "file_type": PreviewKind::Generic.as_str() }),
        ));
    } else {
        let label = full
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| full.display().to_string());

        if is_image(mime, &label) {
            let mime = mime
                .map(str::to_string)
                .or_else(|| image_mime_for(&label).map(str::to_string))
                .unwrap_or_else(|| "image/png".to_string());
            let bytes = fs::read(&full)
                .with_context(|| format!("cannot read image {}", full.display()))?;
            rows.push(Row::preview(
                label,
                serde_json::json!({
                    "mime": mime,
                    "data_uri": image_data_uri(&mime, &bytes),
                }),
            ));
        } else {
            let kind = detect_kind(mime, &label);
            rows.push(Row::preview(
                label,
                serde_json::json!({ "file_type": kind.as_str() }),
            ));
        }
    }

    let renderer = Renderer::with_config(render_config);
    println!("{}", renderer.render(&rows));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_takes_precedence_over_extension() {
        assert_eq!(detect_kind(Some("text/csv"), "data.bin"), PreviewKind::Csv);
        assert_eq!(
            detect_kind(Some("application/json"), "data.csv"),
            PreviewKind::Json
        );
    }

    #[test]
    fn test_extension_fallback() {
        assert_eq!(detect_kind(None, "data.csv"), PreviewKind::Csv);
        assert_eq!(detect_kind(None, "data.JSON"), PreviewKind::Json);
        assert_eq!(detect_kind(None, "report.xlsx"), PreviewKind::Excel);
        assert_eq!(detect_kind(None, "legacy.xls"), PreviewKind::Excel);
    }

    #[test]
    fn test_unknown_type_is_generic() {
        assert_eq!(detect_kind(None, "archive.tar.gz"), PreviewKind::Generic);
        assert_eq!(detect_kind(Some("application/pdf"), "doc.pdf"), PreviewKind::Generic);
    }

    #[test]
    fn test_is_image() {
        assert!(is_image(Some("image/png"), "whatever.bin"));
        assert!(is_image(None, "photo.JPG"));
        assert!(!is_image(None, "data.csv"));
        assert!(!is_image(Some("text/csv"), "photo.png"));
    }

    #[test]
    fn test_image_mime_for_extension() {
        assert_eq!(image_mime_for("a.png"), Some("image/png"));
        assert_eq!(image_mime_for("a.jpeg"), Some("image/jpeg"));
        assert_eq!(image_mime_for("a.txt"), None);
        assert_eq!(image_mime_for("noext"), None);
    }

    #[test]
    fn test_image_data_uri() {
        let uri = image_data_uri("image/png", b"abc");
        assert_eq!(uri, "data:image/png;base64,YWJj");
    }
}
