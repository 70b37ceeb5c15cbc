use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;

use crate::error::FermentableError;
use crate::labels::TypeLabels;
use crate::observer::{
    FermentableField, FermentableObserver, ObjectId, ObserverHandle, ObserverList,
};

/// Schema revision written to and expected in every BeerXML record
pub const BEERXML_VERSION: i32 = 1;

/// Yield of pure sucrose, the reference for sucrose-equivalent mass
pub const SUCROSE_YIELD_PCT: f64 = 100.0;

/// Classification of a fermentable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
pub enum FermentableType {
    #[default]
    Grain,
    Sugar,
    Extract,
    #[serde(rename = "Dry Extract")]
    DryExtract,
    Adjunct,
}

impl FermentableType {
    pub const ALL: [FermentableType; 5] = [
        FermentableType::Grain,
        FermentableType::Sugar,
        FermentableType::Extract,
        FermentableType::DryExtract,
        FermentableType::Adjunct,
    ];

    /// Canonical BeerXML token
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grain => "Grain",
            Self::Sugar => "Sugar",
            Self::Extract => "Extract",
            Self::DryExtract => "Dry Extract",
            Self::Adjunct => "Adjunct",
        }
    }
}

impl fmt::Display for FermentableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FermentableType {
    type Err = FermentableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == token)
            .ok_or_else(|| FermentableError::InvalidClassification(s.to_string()))
    }
}

/// One fermentable ingredient of a recipe.
///
/// Equality and ordering only look at `name` and then `type`: two records
/// are equal when both match, and sort by name first, then by type in
/// declaration order. Use [`Fermentable::same_values`] to compare every
/// persisted attribute.
///
/// Setters never validate ranges; percentages outside [0,100] and negative
/// amounts are stored as given.
#[derive(Debug, Serialize)]
pub struct Fermentable {
    #[serde(skip)]
    id: ObjectId,
    #[serde(skip)]
    observers: ObserverList,

    pub(crate) name: String,
    #[serde(rename = "type")]
    pub(crate) kind: FermentableType,
    pub(crate) amount_kg: f64,
    pub(crate) yield_pct: f64,
    pub(crate) color_srm: f64,
    pub(crate) add_after_boil: bool,
    pub(crate) origin: String,
    pub(crate) supplier: String,
    pub(crate) notes: String,
    pub(crate) coarse_fine_diff_pct: f64,
    pub(crate) moisture_pct: f64,
    pub(crate) diastatic_power_lintner: f64,
    pub(crate) protein_pct: f64,
    pub(crate) max_in_batch_pct: f64,
    pub(crate) recommend_mash: bool,
    pub(crate) ibu_gal_per_lb: f64,
    pub(crate) is_mashed: bool,
}

impl Default for Fermentable {
    fn default() -> Self {
        Self {
            id: ObjectId::next(),
            observers: ObserverList::default(),
            name: String::new(),
            kind: FermentableType::Grain,
            amount_kg: 0.0,
            yield_pct: 0.0,
            color_srm: 0.0,
            add_after_boil: false,
            origin: String::new(),
            supplier: String::new(),
            notes: String::new(),
            coarse_fine_diff_pct: 0.0,
            moisture_pct: 0.0,
            diastatic_power_lintner: 0.0,
            protein_pct: 0.0,
            max_in_batch_pct: 100.0,
            recommend_mash: false,
            ibu_gal_per_lb: 0.0,
            is_mashed: false,
        }
    }
}

/// Copies every attribute into a new instance with its own identity.
/// Observers stay with the source.
impl Clone for Fermentable {
    fn clone(&self) -> Self {
        Self {
            id: ObjectId::next(),
            observers: ObserverList::default(),
            name: self.name.clone(),
            kind: self.kind,
            amount_kg: self.amount_kg,
            yield_pct: self.yield_pct,
            color_srm: self.color_srm,
            add_after_boil: self.add_after_boil,
            origin: self.origin.clone(),
            supplier: self.supplier.clone(),
            notes: self.notes.clone(),
            coarse_fine_diff_pct: self.coarse_fine_diff_pct,
            moisture_pct: self.moisture_pct,
            diastatic_power_lintner: self.diastatic_power_lintner,
            protein_pct: self.protein_pct,
            max_in_batch_pct: self.max_in_batch_pct,
            recommend_mash: self.recommend_mash,
            ibu_gal_per_lb: self.ibu_gal_per_lb,
            is_mashed: self.is_mashed,
        }
    }
}

impl PartialEq for Fermentable {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.kind == other.kind
    }
}

impl Eq for Fermentable {}

impl PartialOrd for Fermentable {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fermentable {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.kind.cmp(&other.kind))
    }
}

/// Stores `value` in `slot` and reports whether anything changed.
fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

impl Fermentable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>, kind: FermentableType) -> Self {
        Self {
            name: name.into(),
            kind,
            ..Self::default()
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    // Observers

    pub fn attach(&mut self, observer: Arc<dyn FermentableObserver>) -> ObserverHandle {
        self.observers.attach(observer)
    }

    pub fn detach(&mut self, handle: ObserverHandle) -> bool {
        self.observers.detach(handle)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn notify(&self, field: FermentableField) {
        self.observers.notify(self.id, field);
    }

    // Getters

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> i32 {
        BEERXML_VERSION
    }

    pub fn kind(&self) -> FermentableType {
        self.kind
    }

    pub fn type_string(&self) -> &'static str {
        self.kind.as_str()
    }

    /// Display label for the type, looked up in `labels`.
    pub fn type_string_tr(&self, labels: &dyn TypeLabels) -> String {
        labels.label(self.kind).into_owned()
    }

    pub fn amount_kg(&self) -> f64 {
        self.amount_kg
    }

    pub fn yield_pct(&self) -> f64 {
        self.yield_pct
    }

    pub fn color_srm(&self) -> f64 {
        self.color_srm
    }

    pub fn add_after_boil(&self) -> bool {
        self.add_after_boil
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn supplier(&self) -> &str {
        &self.supplier
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn coarse_fine_diff_pct(&self) -> f64 {
        self.coarse_fine_diff_pct
    }

    pub fn moisture_pct(&self) -> f64 {
        self.moisture_pct
    }

    pub fn diastatic_power_lintner(&self) -> f64 {
        self.diastatic_power_lintner
    }

    pub fn protein_pct(&self) -> f64 {
        self.protein_pct
    }

    pub fn max_in_batch_pct(&self) -> f64 {
        self.max_in_batch_pct
    }

    pub fn recommend_mash(&self) -> bool {
        self.recommend_mash
    }

    pub fn ibu_gal_per_lb(&self) -> f64 {
        self.ibu_gal_per_lb
    }

    pub fn is_mashed(&self) -> bool {
        self.is_mashed
    }

    /// Mass of sucrose giving the same fermentable sugar as this ingredient.
    pub fn equiv_sucrose_kg(&self) -> f64 {
        self.amount_kg * (self.yield_pct / SUCROSE_YIELD_PCT)
    }

    // Setters. Each one notifies only when the stored value changes.

    pub fn set_name(&mut self, name: impl Into<String>) {
        if replace(&mut self.name, name.into()) {
            self.notify(FermentableField::Name);
        }
    }

    pub fn set_kind(&mut self, kind: FermentableType) {
        if replace(&mut self.kind, kind) {
            self.notify(FermentableField::Type);
        }
    }

    /// Sets the type from its BeerXML token. Unknown tokens leave the type as is.
    pub fn set_type_str(&mut self, token: &str) -> Result<(), FermentableError> {
        let kind = token.parse()?;
        self.set_kind(kind);
        Ok(())
    }

    pub fn set_amount_kg(&mut self, amount: f64) {
        if replace(&mut self.amount_kg, amount) {
            self.notify(FermentableField::Amount);
        }
    }

    pub fn set_yield_pct(&mut self, pct: f64) {
        if replace(&mut self.yield_pct, pct) {
            self.notify(FermentableField::Yield);
        }
    }

    pub fn set_color_srm(&mut self, srm: f64) {
        if replace(&mut self.color_srm, srm) {
            self.notify(FermentableField::Color);
        }
    }

    pub fn set_add_after_boil(&mut self, after_boil: bool) {
        if replace(&mut self.add_after_boil, after_boil) {
            self.notify(FermentableField::AfterBoil);
        }
    }

    pub fn set_origin(&mut self, origin: impl Into<String>) {
        if replace(&mut self.origin, origin.into()) {
            self.notify(FermentableField::Origin);
        }
    }

    pub fn set_supplier(&mut self, supplier: impl Into<String>) {
        if replace(&mut self.supplier, supplier.into()) {
            self.notify(FermentableField::Supplier);
        }
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        if replace(&mut self.notes, notes.into()) {
            self.notify(FermentableField::Notes);
        }
    }

    pub fn set_coarse_fine_diff_pct(&mut self, pct: f64) {
        if replace(&mut self.coarse_fine_diff_pct, pct) {
            self.notify(FermentableField::CoarseFineDiff);
        }
    }

    pub fn set_moisture_pct(&mut self, pct: f64) {
        if replace(&mut self.moisture_pct, pct) {
            self.notify(FermentableField::Moisture);
        }
    }

    pub fn set_diastatic_power_lintner(&mut self, lintner: f64) {
        if replace(&mut self.diastatic_power_lintner, lintner) {
            self.notify(FermentableField::DiastaticPower);
        }
    }

    pub fn set_protein_pct(&mut self, pct: f64) {
        if replace(&mut self.protein_pct, pct) {
            self.notify(FermentableField::Protein);
        }
    }

    pub fn set_max_in_batch_pct(&mut self, pct: f64) {
        if replace(&mut self.max_in_batch_pct, pct) {
            self.notify(FermentableField::MaxInBatch);
        }
    }

    pub fn set_recommend_mash(&mut self, recommend: bool) {
        if replace(&mut self.recommend_mash, recommend) {
            self.notify(FermentableField::RecommendMash);
        }
    }

    pub fn set_ibu_gal_per_lb(&mut self, ibu: f64) {
        if replace(&mut self.ibu_gal_per_lb, ibu) {
            self.notify(FermentableField::IbuGalPerLb);
        }
    }

    pub fn set_is_mashed(&mut self, mashed: bool) {
        if replace(&mut self.is_mashed, mashed) {
            self.notify(FermentableField::IsMashed);
        }
    }

    /// Compares every persisted attribute, not just the ordering key.
    pub fn same_values(&self, other: &Self) -> bool {
        self.name == other.name
            && self.kind == other.kind
            && self.amount_kg == other.amount_kg
            && self.yield_pct == other.yield_pct
            && self.color_srm == other.color_srm
            && self.add_after_boil == other.add_after_boil
            && self.origin == other.origin
            && self.supplier == other.supplier
            && self.notes == other.notes
            && self.coarse_fine_diff_pct == other.coarse_fine_diff_pct
            && self.moisture_pct == other.moisture_pct
            && self.diastatic_power_lintner == other.diastatic_power_lintner
            && self.protein_pct == other.protein_pct
            && self.max_in_batch_pct == other.max_in_batch_pct
            && self.recommend_mash == other.recommend_mash
            && self.ibu_gal_per_lb == other.ibu_gal_per_lb
            && self.is_mashed == other.is_mashed
    }
}

/// Sorts by (name, type) and drops later duplicates of the same key.
pub fn sort_unique(mut fermentables: Vec<Fermentable>) -> Vec<Fermentable> {
    fermentables.sort();
    fermentables.dedup();
    fermentables
}
