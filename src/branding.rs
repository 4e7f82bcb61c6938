use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use crate::{AppErr, Result};

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";
const JPEG_SOI: &[u8] = &[0xFF, 0xD8];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Unknown,
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ImageFormat::Png => "PNG",
            ImageFormat::Jpeg => "JPEG",
            ImageFormat::Gif => "GIF",
            ImageFormat::Unknown => "image",
        };
        write!(f, "{s}")
    }
}

/// A static image shown for branding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    pub path: PathBuf,
    pub format: ImageFormat,
    /// Width and height in pixels, when the header could be read.
    pub dimensions: Option<(u32, u32)>,
    pub size: usize,
}

impl ImageAsset {
    /// Reads the image at `path` and sniffs its format and dimensions.
    ///
    /// # Errors
    /// Returns `AppErr::Asset` if the file cannot be read.
    pub fn open(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|source| AppErr::Asset {
            path: path.to_path_buf(),
            source,
        })?;

        let (format, dimensions) = sniff(&bytes);
        Ok(Self {
            path: path.to_path_buf(),
            format,
            dimensions,
            size: bytes.len(),
        })
    }

    /// A one line description, e.g. `logo.png · PNG 640×200`.
    pub fn caption(&self) -> String {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string());

        match self.dimensions {
            Some((w, h)) => format!("{name} · {} {w}×{h}", self.format),
            None => format!("{name} · {} ({} bytes)", self.format, self.size),
        }
    }
}

fn sniff(bytes: &[u8]) -> (ImageFormat, Option<(u32, u32)>) {
    if bytes.starts_with(PNG_SIGNATURE) {
        // IHDR is always the first chunk.
        let dims = be_u32(bytes, 16).zip(be_u32(bytes, 20));
        return (ImageFormat::Png, dims);
    }

    if bytes.starts_with(JPEG_SOI) {
        return (ImageFormat::Jpeg, jpeg_dimensions(bytes));
    }

    if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        let dims = le_u16(bytes, 6).zip(le_u16(bytes, 8));
        return (
            ImageFormat::Gif,
            dims.map(|(w, h)| (u32::from(w), u32::from(h))),
        );
    }

    (ImageFormat::Unknown, None)
}

fn jpeg_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    let mut pos = JPEG_SOI.len();

    while pos + 4 <= bytes.len() {
        if bytes[pos] != 0xFF {
            return None;
        }

        let marker = bytes[pos + 1];
        if marker == 0xFF {
            pos += 1;
            continue;
        }

        let len = usize::from(be_u16(bytes, pos + 2)?);
        let is_sof = matches!(marker, 0xC0..=0xCF) && !matches!(marker, 0xC4 | 0xC8 | 0xCC);
        if is_sof {
            let h = be_u16(bytes, pos + 5)?;
            let w = be_u16(bytes, pos + 7)?;
            return Some((u32::from(w), u32::from(h)));
        }

        pos += 2 + len;
    }

    None
}

fn be_u32(bytes: &[u8], at: usize) -> Option<u32> {
    let raw: [u8; 4] = bytes.get(at..at + 4)?.try_into().ok()?;
    Some(u32::from_be_bytes(raw))
}

fn be_u16(bytes: &[u8], at: usize) -> Option<u16> {
    let raw: [u8; 2] = bytes.get(at..at + 2)?.try_into().ok()?;
    Some(u16::from_be_bytes(raw))
}

fn le_u16(bytes: &[u8], at: usize) -> Option<u16> {
    let raw: [u8; 2] = bytes.get(at..at + 2)?.try_into().ok()?;
    Some(u16::from_le_bytes(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(w: u32, h: u32) -> Vec<u8> {
        let mut bytes = PNG_SIGNATURE.to_vec();
        bytes.extend_from_slice(&13u32.to_be_bytes());
        bytes.extend_from_slice(b"IHDR");
        bytes.extend_from_slice(&w.to_be_bytes());
        bytes.extend_from_slice(&h.to_be_bytes());
        bytes.extend_from_slice(&[8, 6, 0, 0, 0]);
        bytes
    }

    #[test]
    fn reads_png_dimensions() {
        assert_eq!(sniff(&png(640, 200)), (ImageFormat::Png, Some((640, 200))));
    }

    #[test]
    fn reads_jpeg_dimensions_after_app_segments() {
        let mut bytes = vec![0xFF, 0xD8];
        // APP0 with a 4 byte payload
        bytes.extend_from_slice(&[0xFF, 0xE0, 0x00, 0x06, 1, 2, 3, 4]);
        // SOF0: len, precision, height, width
        bytes.extend_from_slice(&[0xFF, 0xC0, 0x00, 0x11, 0x08, 0x01, 0x2C, 0x01, 0x90]);

        assert_eq!(sniff(&bytes), (ImageFormat::Jpeg, Some((400, 300))));
    }

    #[test]
    fn unknown_bytes_have_no_dimensions() {
        assert_eq!(sniff(b"hello"), (ImageFormat::Unknown, None));
    }

    #[test]
    fn missing_file_is_an_asset_error() {
        let err = ImageAsset::open(Path::new("/no/such/logo.png")).unwrap_err();
        assert!(matches!(err, AppErr::Asset { .. }));
    }

    #[test]
    fn caption_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        fs::write(&path, png(16, 16)).unwrap();

        let asset = ImageAsset::open(&path).unwrap();
        assert_eq!(asset.caption(), "logo.png · PNG 16×16");
    }
}
