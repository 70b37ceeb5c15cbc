pub mod beerxml;
pub mod config;
pub mod error;
pub mod labels;
pub mod model;
pub mod observer;
pub mod xml;

use std::path::Path;

use log::debug;

pub use beerxml::{
    fermentables_to_xml, parse_fermentable, parse_fermentable_with, parse_fermentables,
    parse_fermentables_with, serialize_fermentable,
};
pub use config::{ParseConfig, TypePolicy};
pub use error::FermentableError;
pub use labels::{EnglishLabels, MapLabels, TypeLabels};
pub use model::{sort_unique, Fermentable, FermentableType, BEERXML_VERSION, SUCROSE_YIELD_PCT};
pub use observer::{FermentableField, FermentableObserver, ObjectId, ObserverHandle};
pub use xml::XmlElement;

/// Read every fermentable from a BeerXML file.
pub fn load_fermentables(
    path: &Path,
    config: &ParseConfig,
) -> Result<Vec<Fermentable>, FermentableError> {
    let content = std::fs::read_to_string(path)?;
    debug!("Read {} bytes from {}", content.len(), path.display());
    parse_fermentables_with(&content, config)
}

/// Write fermentables to a BeerXML file, replacing its contents.
pub fn save_fermentables(path: &Path, fermentables: &[Fermentable]) -> Result<(), FermentableError> {
    let document = fermentables_to_xml(fermentables)?;
    std::fs::write(path, document)?;
    debug!("Wrote {} fermentables to {}", fermentables.len(), path.display());
    Ok(())
}

/// Total sucrose-equivalent mass of a set of fermentables.
pub fn total_equiv_sucrose_kg(fermentables: &[Fermentable]) -> f64 {
    fermentables.iter().map(Fermentable::equiv_sucrose_kg).sum()
}
