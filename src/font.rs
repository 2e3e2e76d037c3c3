use std::{
    borrow::Borrow,
    path::{Path, PathBuf},
    sync::Arc,
};

use skrifa::raw::FontRef;

use crate::error::Error;

/// A memory-mapped font file.
pub struct FontFile {
    path: PathBuf,
    data: SharedFontData,
}

impl FontFile {
    /// Maps the file at `path`.
    ///
    /// A missing file is reported as [`Error::InputNotFound`] before any
    /// pipeline stage runs.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref().to_owned();
        if !path.is_file() {
            return Err(Error::InputNotFound(path));
        }
        let file = std::fs::File::open(&path)?;
        let data = SharedFontData(Arc::new(unsafe { memmap2::Mmap::map(&file)? }));
        Ok(Self { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bytes(&self) -> &[u8] {
        self.data.0.as_ref()
    }

    pub fn size(&self) -> u64 {
        self.bytes().len() as u64
    }

    /// Parses the mapped bytes as a single SFNT font.
    pub fn font(&self) -> Result<FontRef<'_>, Error> {
        FontRef::new(self.bytes()).map_err(|source| Error::Decode {
            path: self.path.clone(),
            source,
        })
    }
}

#[derive(Clone)]
pub struct SharedFontData(Arc<memmap2::Mmap>);

impl Borrow<[u8]> for SharedFontData {
    fn borrow(&self) -> &[u8] {
        self.0.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_input_not_found() {
        let missing = Path::new("definitely/not/a/real/font.ttf");
        assert!(matches!(
            FontFile::load(missing),
            Err(Error::InputNotFound(p)) if p == missing
        ));
    }
}
