use std::path::Path;

use crate::domain::TargetFormat;

/// Sanitize filename to remove invalid characters
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            _ => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Lowercased extension straight off the filename, unnormalized. The
/// service refuses a conversion on the raw formats, so jpg -> jpeg is a
/// real conversion and must not be treated as a no-op.
pub fn raw_source_format_of(path: &Path) -> Option<String> {
    Some(path.extension()?.to_str()?.to_lowercase())
}

/// Lowercased extension of the input file, with "jpg" normalized to "jpeg"
/// the way the service does once a conversion is accepted.
pub fn source_format_of(path: &Path) -> Option<String> {
    let ext = raw_source_format_of(path)?;
    Some(if ext == "jpg" { "jpeg".to_string() } else { ext })
}

/// Filename to suggest in the save dialog. PDF pages converted to an image
/// format come back as a zip archive of one image per page, so the
/// suggestion is a .zip in that case.
pub fn suggested_output_filename(input: &Path, target: TargetFormat) -> String {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("converted");

    let extension = if source_format_of(input).as_deref() == Some("pdf") && target.is_image() {
        "zip"
    } else {
        target.extension()
    };

    format!(
        "{}.{}",
        sanitize_filename(stem).trim_matches(|c| c == '.' || c == ' '),
        extension
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("test/file.pdf"), "test_file.pdf");
        assert_eq!(sanitize_filename("normal-name.pdf"), "normal-name.pdf");
    }

    #[test]
    fn test_raw_source_format_keeps_jpg() {
        assert_eq!(
            raw_source_format_of(Path::new("photo.JPG")).as_deref(),
            Some("jpg")
        );
        assert_eq!(
            raw_source_format_of(Path::new("photo.jpeg")).as_deref(),
            Some("jpeg")
        );
    }

    #[test]
    fn test_source_format_normalizes_jpg() {
        assert_eq!(
            source_format_of(Path::new("photo.JPG")).as_deref(),
            Some("jpeg")
        );
        assert_eq!(
            source_format_of(Path::new("doc.docx")).as_deref(),
            Some("docx")
        );
        assert_eq!(source_format_of(Path::new("noext")), None);
    }

    #[test]
    fn test_suggested_output_filename() {
        let input = PathBuf::from("/tmp/rapport final.docx");
        assert_eq!(
            suggested_output_filename(&input, TargetFormat::Pdf),
            "rapport final.pdf"
        );
    }

    #[test]
    fn test_pdf_to_image_suggests_zip() {
        let input = PathBuf::from("scan.pdf");
        assert_eq!(
            suggested_output_filename(&input, TargetFormat::Png),
            "scan.zip"
        );
        // docx to image is not the archive case
        assert_eq!(
            suggested_output_filename(Path::new("a.docx"), TargetFormat::Png),
            "a.png"
        );
    }
}
