use std::fs;
use std::path::PathBuf;

use ab_glyph::{FontVec, InvalidFont};
use font_kit::family_name::FamilyName;
use font_kit::handle::Handle;
use font_kit::properties::{Properties, Weight};
use font_kit::source::SystemSource;
use log::{debug, warn};

pub const DEFAULT_FONT_FAMILY: &str = "FreeSerif";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FontSpec {
    /// System font family, resolved to its bold face.
    Family(String),
    /// Font file loaded as is.
    File(PathBuf),
}

impl Default for FontSpec {
    fn default() -> Self {
        FontSpec::Family(DEFAULT_FONT_FAMILY.to_owned())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("no installed font matches family {0:?}")]
    NotFound(String),
    #[error("failed to read font file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid font data: {0}")]
    Invalid(#[from] InvalidFont),
}

pub fn load_font(spec: &FontSpec) -> Result<FontVec, FontError> {
    match spec {
        FontSpec::Family(name) => load_family(name),
        FontSpec::File(path) => load_file(path.clone(), 0),
    }
}

fn load_family(name: &str) -> Result<FontVec, FontError> {
    let source = SystemSource::new();
    let mut properties = Properties::new();
    properties.weight(Weight::BOLD);

    let families = [FamilyName::Title(name.to_owned()), FamilyName::Serif];
    for (index, family) in families.iter().enumerate() {
        match source.select_best_match(std::slice::from_ref(family), &properties) {
            Ok(handle) => {
                if index > 0 {
                    warn!("font family {name:?} not found, falling back to {family:?}");
                }
                return font_from_handle(handle);
            },
            Err(err) => debug!("no match for font family {family:?}: {err}"),
        }
    }

    Err(FontError::NotFound(name.to_owned()))
}

fn font_from_handle(handle: Handle) -> Result<FontVec, FontError> {
    match handle {
        Handle::Path { path, font_index } => load_file(path, font_index),
        Handle::Memory { bytes, font_index } => {
            Ok(FontVec::try_from_vec_and_index(bytes.to_vec(), font_index)?)
        },
    }
}

fn load_file(path: PathBuf, font_index: u32) -> Result<FontVec, FontError> {
    let data = match fs::read(&path) {
        Ok(data) => data,
        Err(source) => return Err(FontError::Io { path, source }),
    };
    debug!("loaded font {} (face {font_index})", path.display());
    Ok(FontVec::try_from_vec_and_index(data, font_index)?)
}
