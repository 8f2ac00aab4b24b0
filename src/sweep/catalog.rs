// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Option variants, dataset types and their isovalues

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::types::{DatasetType, OptionVariant};
use crate::errors::HarnessError;

/// Append-only catalog, populated once at startup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationCatalog {
    #[serde(default)]
    variants: Vec<OptionVariant>,
    #[serde(default)]
    dataset_types: Vec<DatasetType>,
}

impl ConfigurationCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog used when no catalog file is given
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog.register_variant("lnd", ["-lindstrom"]);
        catalog.register_variant("lnd2", ["-lindstrom2"]);
        catalog.register_dataset_type("annulus", ["10.1", "10.2", "10.4", "10.5", "10.7"]);
        catalog.register_dataset_type("two_cubes", ["15.1", "15.2", "15.5", "15.8"]);
        catalog
    }

    /// Load a catalog from a TOML file with `[[variants]]` and `[[dataset_types]]` tables
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read catalog file: {:?}", path.as_ref()))?;
        let catalog: ConfigurationCatalog = toml::from_str(&content)
            .with_context(|| format!("Failed to parse catalog file: {:?}", path.as_ref()))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Append a variant; registration order is report column order
    pub fn register_variant<I, S>(&mut self, name: impl Into<String>, flags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.variants.push(OptionVariant {
            name: name.into(),
            flags: flags.into_iter().map(Into::into).collect(),
        });
    }

    pub fn register_dataset_type<I, S>(&mut self, name: impl Into<String>, isovalues: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dataset_types.push(DatasetType {
            name: name.into(),
            isovalues: isovalues.into_iter().map(Into::into).collect(),
        });
    }

    pub fn isovalues_for(&self, dataset_type: &str) -> Result<&[String], HarnessError> {
        self.dataset_types
            .iter()
            .find(|t| t.name == dataset_type)
            .map(|t| t.isovalues.as_slice())
            .ok_or_else(|| HarnessError::UnknownDatasetType(dataset_type.to_string()))
    }

    pub fn variants(&self) -> &[OptionVariant] {
        &self.variants
    }

    pub fn variant_names(&self) -> Vec<String> {
        self.variants.iter().map(|v| v.name.clone()).collect()
    }

    pub fn dataset_types(&self) -> &[DatasetType] {
        &self.dataset_types
    }

    /// Reject catalogs the reports cannot render unambiguously
    pub fn validate(&self) -> Result<(), HarnessError> {
        if self.variants.is_empty() {
            return Err(HarnessError::InvalidCatalog(
                "at least one variant is required".to_string(),
            ));
        }
        for (i, variant) in self.variants.iter().enumerate() {
            if self.variants[..i].iter().any(|v| v.name == variant.name) {
                return Err(HarnessError::InvalidCatalog(format!(
                    "duplicate variant `{}`",
                    variant.name
                )));
            }
        }
        for (i, dataset) in self.dataset_types.iter().enumerate() {
            if self.dataset_types[..i].iter().any(|d| d.name == dataset.name) {
                return Err(HarnessError::InvalidCatalog(format!(
                    "duplicate dataset type `{}`",
                    dataset.name
                )));
            }
        }
        Ok(())
    }
}
