use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use cosmic_text::fontdb;

use crate::error::{TextError, TextResult};

/// A font database that manages available fonts.
pub struct FontDatabase {
    inner: fontdb::Database,
}

impl FontDatabase {
    /// Create a new font database with system fonts loaded.
    pub fn new() -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        Self { inner: db }
    }

    /// Create an empty font database.
    ///
    /// Faces from a [`FontSet`] are loaded into it on first use.
    pub fn empty() -> Self {
        Self {
            inner: fontdb::Database::new(),
        }
    }

    /// Load a font from bytes.
    pub fn load_font_data(&mut self, data: Vec<u8>) {
        self.inner
            .load_font_source(fontdb::Source::Binary(Arc::new(data)));
    }

    /// Returns true if the font family is available.
    pub fn has_family(&self, family: &str) -> bool {
        has_family(&self.inner, family)
    }

    /// List all available font families, sorted.
    pub fn list_families(&self) -> Vec<String> {
        let mut families: Vec<String> = self
            .inner
            .faces()
            .flat_map(|face| face.families.iter().map(|(family, _)| family.clone()))
            .collect();
        families.sort();
        families.dedup();
        families
    }

    /// Get the number of fonts loaded.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if the database is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for FontDatabase {
    fn default() -> Self {
        Self::empty()
    }
}

fn has_family(db: &fontdb::Database, family: &str) -> bool {
    db.faces()
        .any(|face| face.families.iter().any(|(f, _)| f == family))
}

/// Font management system shared by rasterizers.
#[derive(Clone)]
pub struct FontSystem {
    inner: Arc<RwLock<cosmic_text::FontSystem>>,
}

impl FontSystem {
    /// Create a new font system with the given font database.
    pub fn new(db: FontDatabase) -> Self {
        let cosmic_font_system = cosmic_text::FontSystem::new_with_locale_and_db(
            sys_locale::get_locale().unwrap_or_else(|| String::from("en-US")),
            db.inner,
        );
        Self {
            inner: Arc::new(RwLock::new(cosmic_font_system)),
        }
    }

    /// Create a new font system with system fonts.
    pub fn with_system_fonts() -> Self {
        Self::new(FontDatabase::new())
    }

    /// Returns true if the family has been loaded.
    pub fn has_family(&self, family: &str) -> TextResult<bool> {
        let font_system = self.inner.read()?;
        Ok(has_family(font_system.db(), family))
    }

    /// Make sure the face's family is available, loading its source if needed.
    pub fn ensure_face(&self, face: &FontFace) -> TextResult<()> {
        if self.has_family(&face.family)? {
            return Ok(());
        }

        let data = face.source.read()?;
        match FontFormat::detect(&data) {
            FontFormat::Unknown => {
                return Err(TextError::InvalidFontData(format!(
                    "{} has unrecognized format",
                    face.source.display()
                )));
            }
            format => {
                tracing::debug!(
                    "Loading font '{}' ({}) from {}",
                    face.family,
                    format.extension(),
                    face.source.display()
                );
            }
        }

        let mut font_system = self.inner.write()?;
        font_system
            .db_mut()
            .load_font_source(fontdb::Source::Binary(Arc::new(data)));

        if has_family(font_system.db(), &face.family) {
            Ok(())
        } else {
            Err(TextError::FontLoadError(format!(
                "{} does not provide family '{}'",
                face.source.display(),
                face.family
            )))
        }
    }

    pub(crate) fn inner(&self) -> Arc<RwLock<cosmic_text::FontSystem>> {
        self.inner.clone()
    }
}

impl Default for FontSystem {
    fn default() -> Self {
        Self::new(FontDatabase::empty())
    }
}

/// Where a face's font data comes from.
#[derive(Debug, Clone)]
pub enum FontSource {
    /// A `.ttf`/`.otf`/... file on disk.
    File(PathBuf),
    /// Font bytes already in memory.
    Memory { name: String, data: Arc<[u8]> },
}

impl FontSource {
    fn read(&self) -> TextResult<Vec<u8>> {
        match self {
            FontSource::File(path) => std::fs::read(path).map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    TextError::FontFileNotFound(path.clone())
                } else {
                    e.into()
                }
            }),
            FontSource::Memory { data, .. } => Ok(data.to_vec()),
        }
    }

    /// Human readable origin, for logs and errors.
    pub fn display(&self) -> String {
        match self {
            FontSource::File(path) => path.display().to_string(),
            FontSource::Memory { name, .. } => format!("<memory:{}>", name),
        }
    }
}

/// One entry of a [`FontSet`]: a family name and where to load it from.
#[derive(Debug, Clone)]
pub struct FontFace {
    pub family: String,
    pub source: FontSource,
}

impl FontFace {
    pub fn from_file(family: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            family: family.into(),
            source: FontSource::File(path.into()),
        }
    }

    pub fn from_memory(family: impl Into<String>, data: impl Into<Arc<[u8]>>) -> Self {
        let family = family.into();
        Self {
            source: FontSource::Memory {
                name: family.clone(),
                data: data.into(),
            },
            family,
        }
    }
}

/// The fixed set of fonts a text group may be drawn with.
///
/// One face is picked uniformly at random for every rasterization.
#[derive(Debug, Clone, Default)]
pub struct FontSet {
    faces: Vec<FontFace>,
}

impl FontSet {
    pub fn new(faces: Vec<FontFace>) -> Self {
        Self { faces }
    }

    /// Sniglet and Chewy, laid out as `<dir>/<Family>/<Family>-Regular.ttf`.
    pub fn reference(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(
            ["Sniglet", "Chewy"]
                .into_iter()
                .map(|family| {
                    FontFace::from_file(
                        family,
                        dir.join(family).join(format!("{}-Regular.ttf", family)),
                    )
                })
                .collect(),
        )
    }

    pub fn get(&self, index: usize) -> Option<&FontFace> {
        self.faces.get(index)
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FontFace> {
        self.faces.iter()
    }
}

/// Detected font file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFormat {
    /// TrueType font (.ttf)
    TrueType,
    /// OpenType font (.otf)
    OpenType,
    /// Web Open Font Format (.woff)
    Woff,
    /// Web Open Font Format 2 (.woff2)
    Woff2,
    /// TrueType Collection (.ttc)
    TrueTypeCollection,
    /// Unknown format
    Unknown,
}

impl FontFormat {
    /// Detect font format from the magic bytes.
    pub fn detect(data: &[u8]) -> Self {
        if data.len() < 4 {
            return FontFormat::Unknown;
        }

        match &data[0..4] {
            [0x00, 0x01, 0x00, 0x00] | [b't', b'r', b'u', b'e'] => FontFormat::TrueType,
            [b'O', b'T', b'T', b'O'] => FontFormat::OpenType,
            [b'w', b'O', b'F', b'F'] => FontFormat::Woff,
            [b'w', b'O', b'F', b'2'] => FontFormat::Woff2,
            [b't', b't', b'c', b'f'] => FontFormat::TrueTypeCollection,
            _ => FontFormat::Unknown,
        }
    }

    /// Get the typical file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            FontFormat::TrueType => "ttf",
            FontFormat::OpenType => "otf",
            FontFormat::Woff => "woff",
            FontFormat::Woff2 => "woff2",
            FontFormat::TrueTypeCollection => "ttc",
            FontFormat::Unknown => "bin",
        }
    }
}
