//! BeerXML (version 1) reading and writing of fermentable records.
//!
//! One `<FERMENTABLE>` element per record with one child element per
//! attribute. `IS_MASHED` is an extension tag; BeerXML readers ignore tags
//! they do not know, and so does this one.

use log::{debug, warn};

use crate::config::{ParseConfig, TypePolicy};
use crate::error::FermentableError;
use crate::model::{Fermentable, FermentableType, BEERXML_VERSION};
use crate::xml::XmlElement;

pub const FERMENTABLE_TAG: &str = "FERMENTABLE";
pub const FERMENTABLES_TAG: &str = "FERMENTABLES";

/// Parse one `<FERMENTABLE>` node with the default configuration.
pub fn parse_fermentable(node: &XmlElement) -> Result<Fermentable, FermentableError> {
    parse_fermentable_with(node, &ParseConfig::default())
}

/// Parse one `<FERMENTABLE>` node. Missing or empty elements keep their defaults.
///
/// Text fields are taken verbatim; numbers, booleans and tokens are trimmed.
pub fn parse_fermentable_with(
    node: &XmlElement,
    config: &ParseConfig,
) -> Result<Fermentable, FermentableError> {
    if !node.is_named(FERMENTABLE_TAG) {
        return Err(FermentableError::Format(format!(
            "expected <{}>, found <{}>",
            FERMENTABLE_TAG, node.name
        )));
    }

    let record_name = node.child_text("NAME").unwrap_or_default();
    let mut f = Fermentable::default();
    for child in &node.children {
        let tag = child.name.to_ascii_uppercase();
        let value = child.text.as_str();
        match tag.as_str() {
            "NAME" => f.name = value.to_string(),
            "VERSION" => check_version(value, config)?,
            "TYPE" => f.kind = parse_type(value, record_name, config)?,
            "AMOUNT" => f.amount_kg = parse_real(&tag, value, f.amount_kg)?,
            "YIELD" => f.yield_pct = parse_real(&tag, value, f.yield_pct)?,
            "COLOR" => f.color_srm = parse_real(&tag, value, f.color_srm)?,
            "ADD_AFTER_BOIL" => f.add_after_boil = parse_bool(&tag, value, f.add_after_boil)?,
            "ORIGIN" => f.origin = value.to_string(),
            "SUPPLIER" => f.supplier = value.to_string(),
            "NOTES" => f.notes = value.to_string(),
            "COARSE_FINE_DIFF" => {
                f.coarse_fine_diff_pct = parse_real(&tag, value, f.coarse_fine_diff_pct)?
            }
            "MOISTURE" => f.moisture_pct = parse_real(&tag, value, f.moisture_pct)?,
            "DIASTATIC_POWER" => {
                f.diastatic_power_lintner = parse_real(&tag, value, f.diastatic_power_lintner)?
            }
            "PROTEIN" => f.protein_pct = parse_real(&tag, value, f.protein_pct)?,
            "MAX_IN_BATCH" => f.max_in_batch_pct = parse_real(&tag, value, f.max_in_batch_pct)?,
            "RECOMMEND_MASH" => f.recommend_mash = parse_bool(&tag, value, f.recommend_mash)?,
            "IBU_GAL_PER_LB" => f.ibu_gal_per_lb = parse_real(&tag, value, f.ibu_gal_per_lb)?,
            "IS_MASHED" => f.is_mashed = parse_bool(&tag, value, f.is_mashed)?,
            _ => debug!("Ignoring <{}> in <{}>", child.name, FERMENTABLE_TAG),
        }
    }

    debug!("Parsed fermentable {:?} ({})", f.name, f.kind);
    Ok(f)
}

/// Append a `<FERMENTABLE>` node for `f` to `parent` and return it.
pub fn serialize_fermentable<'a>(f: &Fermentable, parent: &'a mut XmlElement) -> &'a mut XmlElement {
    let node = parent.push(XmlElement::new(FERMENTABLE_TAG));
    node.push_text_child("NAME", f.name());
    node.push_text_child("VERSION", f.version().to_string());
    node.push_text_child("TYPE", f.type_string());
    node.push_text_child("AMOUNT", f.amount_kg().to_string());
    node.push_text_child("YIELD", f.yield_pct().to_string());
    node.push_text_child("COLOR", f.color_srm().to_string());
    node.push_text_child("ADD_AFTER_BOIL", bool_token(f.add_after_boil()));
    node.push_text_child("ORIGIN", f.origin());
    node.push_text_child("SUPPLIER", f.supplier());
    node.push_text_child("NOTES", f.notes());
    node.push_text_child("COARSE_FINE_DIFF", f.coarse_fine_diff_pct().to_string());
    node.push_text_child("MOISTURE", f.moisture_pct().to_string());
    node.push_text_child("DIASTATIC_POWER", f.diastatic_power_lintner().to_string());
    node.push_text_child("PROTEIN", f.protein_pct().to_string());
    node.push_text_child("MAX_IN_BATCH", f.max_in_batch_pct().to_string());
    node.push_text_child("RECOMMEND_MASH", bool_token(f.recommend_mash()));
    node.push_text_child("IBU_GAL_PER_LB", f.ibu_gal_per_lb().to_string());
    node.push_text_child("IS_MASHED", bool_token(f.is_mashed()));
    node
}

/// Parse a `<FERMENTABLES>` document, or a document holding a single
/// `<FERMENTABLE>`, with the default configuration.
pub fn parse_fermentables(input: &str) -> Result<Vec<Fermentable>, FermentableError> {
    parse_fermentables_with(input, &ParseConfig::default())
}

pub fn parse_fermentables_with(
    input: &str,
    config: &ParseConfig,
) -> Result<Vec<Fermentable>, FermentableError> {
    let root = XmlElement::parse(input)?;

    if root.is_named(FERMENTABLE_TAG) {
        return Ok(vec![parse_fermentable_with(&root, config)?]);
    }
    if !root.is_named(FERMENTABLES_TAG) {
        return Err(FermentableError::Format(format!(
            "expected <{}> or <{}> as the root element, found <{}>",
            FERMENTABLES_TAG, FERMENTABLE_TAG, root.name
        )));
    }

    let mut fermentables = Vec::with_capacity(root.children.len());
    for child in &root.children {
        if child.is_named(FERMENTABLE_TAG) {
            fermentables.push(parse_fermentable_with(child, config)?);
        } else {
            debug!("Ignoring <{}> in <{}>", child.name, FERMENTABLES_TAG);
        }
    }
    debug!("Parsed {} fermentables", fermentables.len());
    Ok(fermentables)
}

/// Write `fermentables` as a `<FERMENTABLES>` document.
pub fn fermentables_to_xml(fermentables: &[Fermentable]) -> Result<String, FermentableError> {
    let mut root = XmlElement::new(FERMENTABLES_TAG);
    for f in fermentables {
        serialize_fermentable(f, &mut root);
    }
    root.to_xml_string()
}

fn bool_token(value: bool) -> &'static str {
    if value {
        "TRUE"
    } else {
        "FALSE"
    }
}

fn parse_bool(tag: &str, value: &str, default: bool) -> Result<bool, FermentableError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(default);
    }
    if value.eq_ignore_ascii_case("true") || value == "1" {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") || value == "0" {
        Ok(false)
    } else {
        Err(FermentableError::Format(format!(
            "<{}> is not a boolean: {:?}",
            tag, value
        )))
    }
}

fn parse_real(tag: &str, value: &str, default: f64) -> Result<f64, FermentableError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(default);
    }
    value
        .parse::<f64>()
        .map_err(|_| FermentableError::Format(format!("<{}> is not a number: {:?}", tag, value)))
}

fn check_version(value: &str, config: &ParseConfig) -> Result<(), FermentableError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(());
    }
    let version: i32 = value
        .parse()
        .map_err(|_| FermentableError::Format(format!("<VERSION> is not an integer: {:?}", value)))?;
    if version == BEERXML_VERSION {
        return Ok(());
    }
    if config.strict_version {
        return Err(FermentableError::Format(format!(
            "unsupported {} version {} (expected {})",
            FERMENTABLE_TAG, version, BEERXML_VERSION
        )));
    }
    warn!(
        "{} says it is version {}, reading it as version {}",
        FERMENTABLE_TAG, version, BEERXML_VERSION
    );
    Ok(())
}

fn parse_type(
    value: &str,
    name: &str,
    config: &ParseConfig,
) -> Result<FermentableType, FermentableError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(FermentableType::default());
    }
    match value.parse::<FermentableType>() {
        Ok(kind) => Ok(kind),
        Err(err) => match config.type_policy {
            TypePolicy::Reject => Err(err),
            TypePolicy::Fallback => {
                warn!(
                    "{:?} is not a valid fermentable type for {:?}, using {}",
                    value,
                    name,
                    FermentableType::default()
                );
                Ok(FermentableType::default())
            }
        },
    }
}
