use std::fmt;
use std::path::PathBuf;

/// Output formats the conversion service accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetFormat {
    Png,
    Jpeg,
    Bmp,
    Tiff,
    Gif,
    Webp,
    Ico,
    Docx,
    Odt,
    Txt,
    Xlsx,
    Pptx,
    Pdf,
}

impl TargetFormat {
    pub const ALL: [TargetFormat; 13] = [
        TargetFormat::Png,
        TargetFormat::Jpeg,
        TargetFormat::Bmp,
        TargetFormat::Tiff,
        TargetFormat::Gif,
        TargetFormat::Webp,
        TargetFormat::Ico,
        TargetFormat::Docx,
        TargetFormat::Odt,
        TargetFormat::Txt,
        TargetFormat::Xlsx,
        TargetFormat::Pptx,
        TargetFormat::Pdf,
    ];

    pub fn extension(&self) -> &'static str {
        match self {
            TargetFormat::Png => "png",
            TargetFormat::Jpeg => "jpeg",
            TargetFormat::Bmp => "bmp",
            TargetFormat::Tiff => "tiff",
            TargetFormat::Gif => "gif",
            TargetFormat::Webp => "webp",
            TargetFormat::Ico => "ico",
            TargetFormat::Docx => "docx",
            TargetFormat::Odt => "odt",
            TargetFormat::Txt => "txt",
            TargetFormat::Xlsx => "xlsx",
            TargetFormat::Pptx => "pptx",
            TargetFormat::Pdf => "pdf",
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(
            self,
            TargetFormat::Png
                | TargetFormat::Jpeg
                | TargetFormat::Bmp
                | TargetFormat::Tiff
                | TargetFormat::Gif
                | TargetFormat::Webp
                | TargetFormat::Ico
        )
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension().to_uppercase())
    }
}

/// One conversion request: built fresh per submission, consumed by the
/// coordinator, never stored.
#[derive(Debug, Clone)]
pub struct ConversionPlan {
    pub input_file: PathBuf,
    pub target_format: TargetFormat,
}

/// Validated result of a conversion request. The service reports either a
/// download location or a human-readable failure message, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    Success { download_url: String },
    Failure { message: String },
}
