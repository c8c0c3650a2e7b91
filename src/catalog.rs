//! Lamp and pole asset definitions.
//!
//! A catalog is plain text, one definition per line:
//!
//! ```text
//! # name, scale, model, material[, model, material ...]
//! classic, 0.01, LampsModels/street_lamp.mdl, LampsMaterials/metal.xml, LampsModels/glass.mdl, LampsMaterials/glass.xml
//! ```
//!
//! Empty lines and lines starting with `#` are skipped.

use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::CatalogError;

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
/// One renderable part of a lamp: a model file and the material applied to it.
pub struct ModelPart {
    pub model: String,
    pub material: String,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
/// A lamp the scene layer can instantiate.
pub struct LampModel {
    /// Name shown in the lamp picker.
    pub name: String,
    /// Uniform scale applied to every part when placed.
    pub scale: f32,
    /// Parts in the order they are attached to the lamp node.
    pub parts: Vec<ModelPart>,
}

#[derive(PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct LampCatalog {
    lamps: Vec<LampModel>,
}

impl LampCatalog {
    pub fn load(path: &Path) -> Result<LampCatalog, CatalogError> {
        let text = fs::read_to_string(path)?;
        let catalog = LampCatalog::parse(&text)?;
        debug!("loaded {} lamp models from {:?}", catalog.len(), path);
        Ok(catalog)
    }

    pub fn parse(text: &str) -> Result<LampCatalog, CatalogError> {
        let mut lamps: Vec<LampModel> = Vec::new();
        for (index, raw) in text.lines().enumerate() {
            let line = index + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let lamp = parse_line(line, trimmed)?;
            if lamps.iter().any(|l| l.name == lamp.name) {
                return Err(CatalogError::DuplicateName {
                    line,
                    name: lamp.name,
                });
            }
            lamps.push(lamp);
        }
        Ok(LampCatalog { lamps })
    }

    pub fn get(&self, name: &str) -> Option<&LampModel> {
        self.lamps.iter().find(|l| l.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LampModel> {
        self.lamps.iter()
    }

    pub fn len(&self) -> usize {
        self.lamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lamps.is_empty()
    }
}

fn parse_line(line: usize, text: &str) -> Result<LampModel, CatalogError> {
    let fields: Vec<&str> = text.split(',').map(str::trim).collect();
    if fields.len() < 4 || fields.len() % 2 != 0 {
        return Err(CatalogError::FieldCount {
            line,
            fields: fields.len(),
        });
    }

    let name = non_empty(line, "name", fields[0])?;
    let scale = fields[1]
        .parse::<f32>()
        .ok()
        .filter(|s| s.is_finite() && *s > 0.)
        .ok_or_else(|| CatalogError::Scale {
            line,
            value: fields[1].to_string(),
        })?;
    let parts = fields[2..]
        .chunks(2)
        .map(|pair| -> Result<ModelPart, CatalogError> {
            Ok(ModelPart {
                model: non_empty(line, "model", pair[0])?,
                material: non_empty(line, "material", pair[1])?,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(LampModel { name, scale, parts })
}

fn non_empty(line: usize, field: &'static str, value: &str) -> Result<String, CatalogError> {
    if value.is_empty() {
        Err(CatalogError::EmptyField { line, field })
    } else {
        Ok(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = "\
# street lamps
classic, 0.01, LampsModels/street_lamp.mdl, LampsMaterials/metal.xml, LampsModels/glass.mdl, LampsMaterials/glass.xml

modern,0.02,LampsModels/modern.mdl,LampsMaterials/steel.xml
";

    #[test]
    fn parses_definitions() {
        let catalog = LampCatalog::parse(CATALOG).unwrap();
        assert_eq!(catalog.len(), 2);

        let classic = catalog.get("classic").unwrap();
        assert_eq!(classic.scale, 0.01);
        assert_eq!(classic.parts.len(), 2);
        assert_eq!(classic.parts[1].model, "LampsModels/glass.mdl");
        assert_eq!(classic.parts[1].material, "LampsMaterials/glass.xml");

        let names: Vec<&str> = catalog.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["classic", "modern"]);
        assert!(catalog.get("missing").is_none());
    }

    #[test]
    fn field_count_is_validated() {
        let err = LampCatalog::parse("classic, 0.01, model.mdl").unwrap_err();
        assert!(matches!(err, CatalogError::FieldCount { line: 1, fields: 3 }));

        let err = LampCatalog::parse("# header\nclassic, 0.01, a.mdl, a.xml, b.mdl").unwrap_err();
        assert!(matches!(err, CatalogError::FieldCount { line: 2, fields: 5 }));
    }

    #[test]
    fn scale_must_be_positive() {
        for bad in ["abc", "-1", "0", "inf"] {
            let text = format!("classic, {}, a.mdl, a.xml", bad);
            let err = LampCatalog::parse(&text).unwrap_err();
            assert!(matches!(err, CatalogError::Scale { line: 1, .. }), "{}", bad);
        }
    }

    #[test]
    fn empty_and_duplicate_fields() {
        let err = LampCatalog::parse("classic, 0.01, , a.xml").unwrap_err();
        assert!(matches!(err, CatalogError::EmptyField { field: "model", .. }));

        let err = LampCatalog::parse("a, 1, m, x\na, 2, m, x").unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateName { line: 2, .. }));
    }

    #[test]
    fn empty_text_is_an_empty_catalog() {
        let catalog = LampCatalog::parse("\n# nothing here\n").unwrap();
        assert!(catalog.is_empty());
    }
}
