//! Display labels for fermentable types.
//!
//! The canonical BeerXML tokens never change; what a user sees may be
//! translated. [`TypeLabels`] is the lookup the model asks for a label.

use std::borrow::Cow;
use std::collections::HashMap;

use log::warn;

use crate::error::FermentableError;
use crate::model::FermentableType;

pub trait TypeLabels {
    fn label(&self, kind: FermentableType) -> Cow<'_, str>;
}

/// Built-in English labels
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishLabels;

impl TypeLabels for EnglishLabels {
    fn label(&self, kind: FermentableType) -> Cow<'_, str> {
        Cow::Borrowed(match kind {
            FermentableType::Grain => "Grain",
            FermentableType::Sugar => "Sugar",
            FermentableType::Extract => "Extract",
            FermentableType::DryExtract => "Dry Extract",
            FermentableType::Adjunct => "Adjunct",
        })
    }
}

/// Table-driven labels, falling back to English for missing entries
#[derive(Debug, Clone, Default)]
pub struct MapLabels {
    labels: HashMap<FermentableType, String>,
}

impl MapLabels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: FermentableType, label: impl Into<String>) {
        self.labels.insert(kind, label.into());
    }

    /// Build from `(token, label)` pairs keyed by canonical BeerXML token.
    pub fn from_tokens<I, K, V>(pairs: I) -> Result<Self, FermentableError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut labels = Self::new();
        for (token, label) in pairs {
            let kind = token.as_ref().parse()?;
            labels.insert(kind, label);
        }
        Ok(labels)
    }

    /// Like `from_tokens`, but tokens match case-insensitively (config keys
    /// may arrive lowercased) and unknown tokens are skipped with a warning.
    pub fn from_config(map: &HashMap<String, String>) -> Self {
        let mut labels = Self::new();
        for (token, label) in map {
            let kind = FermentableType::ALL
                .iter()
                .copied()
                .find(|t| t.as_str().eq_ignore_ascii_case(token.trim()));
            match kind {
                Some(kind) => labels.insert(kind, label.clone()),
                None => warn!("Ignoring label for unknown fermentable type {:?}", token),
            }
        }
        labels
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl TypeLabels for MapLabels {
    fn label(&self, kind: FermentableType) -> Cow<'_, str> {
        match self.labels.get(&kind) {
            Some(label) => Cow::Borrowed(label.as_str()),
            None => EnglishLabels.label(kind),
        }
    }
}
