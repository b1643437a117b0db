use std::path::Path;

/// Audio containers the transcription provider accepts
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AudioFormat {
    Mp3,
    Flac,
    M4a,
    Mp4,
    Mpeg,
    Mpga,
    Oga,
    Ogg,
    Wav,
    Webm,
}

impl AudioFormat {
    /// Every accepted format, in display order
    pub const ALL: [Self; 10] = [
        Self::Mp3,
        Self::Flac,
        Self::M4a,
        Self::Mp4,
        Self::Mpeg,
        Self::Mpga,
        Self::Oga,
        Self::Ogg,
        Self::Wav,
        Self::Webm,
    ];

    /// Detect the format from a client-supplied filename
    ///
    /// Only the text after the last `.` is considered, compared
    /// case-insensitively against the whole extension.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, extension) = filename.rsplit_once('.')?;
        extension.parse().ok()
    }

    /// Detect the format of a file on disk from its extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()?.to_str()?.parse().ok()
    }

    /// Canonical lower-case extension, without the dot
    pub fn extension(self) -> &'static str {
        self.into()
    }

    /// MIME type sent alongside the file
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Mp3 | Self::Mpeg | Self::Mpga => "audio/mpeg",
            Self::Flac => "audio/flac",
            Self::M4a | Self::Mp4 => "audio/mp4",
            Self::Oga | Self::Ogg => "audio/ogg",
            Self::Wav => "audio/wav",
            Self::Webm => "audio/webm",
        }
    }

    /// The allow-list rendered as `[mp3 flac ...]`
    pub fn allowed_list() -> String {
        let names: Vec<&'static str> = Self::ALL.into_iter().map(Self::extension).collect();
        format!("[{}]", names.join(" "))
    }
}
