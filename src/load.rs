use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::string::String;

use crate::{Banner, Font};

impl Font<String> {
    /// Read a font file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| LoadError::Unavailable {
            path: path.to_path_buf(),
            source,
        })?;
        let text = String::from_utf8(bytes).map_err(|_| LoadError::Encoding {
            path: path.to_path_buf(),
        })?;
        log::debug!("loaded font {} ({} bytes)", path.display(), text.len());
        Ok(Self::new(text))
    }

    /// Read the font file for `banner` from `dir`.
    pub fn load(dir: impl AsRef<Path>, banner: Banner) -> Result<Self, LoadError> {
        Self::open(dir.as_ref().join(banner.file_name()))
    }
}

#[derive(Debug)]
pub enum LoadError {
    /// The font file could not be read
    Unavailable { path: PathBuf, source: io::Error },
    /// The font file is not UTF-8
    Encoding { path: PathBuf },
}

impl LoadError {
    pub fn path(&self) -> &Path {
        match self {
            LoadError::Unavailable { path, .. } | LoadError::Encoding { path } => path,
        }
    }
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        match self {
            LoadError::Unavailable { path, source } => {
                write!(f, "font {} unavailable: {}", path.display(), source)
            }
            LoadError::Encoding { path } => write!(f, "font {} is not valid UTF-8", path.display()),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Unavailable { source, .. } => Some(source),
            LoadError::Encoding { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::string::ToString;

    use super::*;

    fn fonts() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("fonts")
    }

    #[test]
    fn bundled_fonts_load() {
        for banner in Banner::ALL {
            let font = Font::load(fonts(), banner).unwrap();
            assert!(font.covers('~'), "{} misses printable ASCII", banner);
        }
    }

    #[test]
    fn missing_font() {
        let err = Font::load(fonts().join("nowhere"), Banner::Shadow).unwrap_err();
        assert!(matches!(err, LoadError::Unavailable { .. }));
        assert!(err.path().ends_with("nowhere/shadow.txt"));
        assert!(err.to_string().contains("unavailable"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
