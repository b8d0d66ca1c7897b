//! Font registry for font discovery and caching
//!
//! Uses fontdb to resolve fonts by family name or generic category.

use std::sync::Arc;

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use rustc_hash::FxHashMap;

use crate::font::TtfFont;
use crate::{Result, TextError};

/// Generic font category for fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GenericFont {
    /// Default system UI font
    #[default]
    System,
    /// Monospace font for code
    Monospace,
    /// Serif font
    Serif,
    /// Sans-serif font
    SansSerif,
}

impl GenericFont {
    fn family(self) -> Family<'static> {
        match self {
            GenericFont::System | GenericFont::SansSerif => Family::SansSerif,
            GenericFont::Monospace => Family::Monospace,
            GenericFont::Serif => Family::Serif,
        }
    }
}

/// Font registry that resolves and caches faces
pub struct FontRegistry {
    db: Database,
    /// Cached faces (Some = found, None = not found)
    faces: FxHashMap<String, Option<Arc<TtfFont>>>,
}

impl FontRegistry {
    /// Create a registry over the system fonts
    pub fn new() -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "loaded system fonts");
        Self::with_database(db)
    }

    /// Create a registry with no fonts; add some with
    /// [`load_font_data`](Self::load_font_data)
    pub fn empty() -> Self {
        Self::with_database(Database::new())
    }

    pub fn with_database(db: Database) -> Self {
        Self {
            db,
            faces: FxHashMap::default(),
        }
    }

    /// Register in-memory font data
    pub fn load_font_data(&mut self, data: Vec<u8>) {
        self.db.load_font_data(data);
        // Earlier misses may resolve now.
        self.faces.retain(|_, face| face.is_some());
    }

    /// Number of faces known to the database
    pub fn face_count(&self) -> usize {
        self.db.len()
    }

    /// Load a font by family name (e.g. "Inter", "Fira Code")
    pub fn load_font(&mut self, name: &str) -> Result<Arc<TtfFont>> {
        let key = format!("{name}:w400:n");
        self.load_cached(key, Family::Name(name), name)
    }

    /// Load a generic font category
    pub fn load_generic(&mut self, generic: GenericFont) -> Result<Arc<TtfFont>> {
        let key = format!("__generic_{generic:?}:w400:n");
        self.load_cached(key, generic.family(), &format!("{generic:?}"))
    }

    /// Load a font by name, falling back to a generic category
    pub fn load_with_fallback(
        &mut self,
        name: Option<&str>,
        generic: GenericFont,
    ) -> Result<Arc<TtfFont>> {
        if let Some(name) = name {
            match self.load_font(name) {
                Ok(face) => return Ok(face),
                Err(e) => tracing::warn!("{e}, falling back to {generic:?}"),
            }
        }
        self.load_generic(generic)
    }

    /// Get a cached font by name without loading it
    pub fn get_cached(&self, name: &str) -> Option<Arc<TtfFont>> {
        self.faces
            .get(&format!("{name}:w400:n"))
            .and_then(|face| face.clone())
    }

    fn load_cached(
        &mut self,
        key: String,
        family: Family<'_>,
        label: &str,
    ) -> Result<Arc<TtfFont>> {
        // Failed lookups are cached as None
        if let Some(cached) = self.faces.get(&key) {
            return cached
                .clone()
                .ok_or_else(|| TextError::FontNotFound(format!("{label} (cached)")));
        }

        let families = [family];
        let query = Query {
            families: &families,
            weight: Weight::NORMAL,
            style: Style::Normal,
            stretch: Stretch::Normal,
        };
        let Some(id) = self.db.query(&query) else {
            self.faces.insert(key, None);
            return Err(TextError::FontNotFound(label.to_string()));
        };

        let face = self
            .db
            .with_face_data(id, |data, index| TtfFont::from_data_with_index(data, index))
            .ok_or_else(|| TextError::FontLoad(format!("{label}: font source unavailable")))??;
        let face = Arc::new(face);
        tracing::debug!(font = label, "loaded font");

        self.faces.insert(key, Some(Arc::clone(&face)));
        Ok(face)
    }
}

impl Default for FontRegistry {
    fn default() -> Self {
        Self::new()
    }
}
