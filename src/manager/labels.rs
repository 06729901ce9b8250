//! Label lifecycle.
//!
//! Bulk operations stop at the first failing request. Labels already
//! deleted or created before the failure stay that way.

use std::collections::HashSet;

use serde_json::Value;
use tracing::info;

use super::RepositoryManager;
use crate::error::Error;
use crate::transport::encode_segment;
use crate::types::{Label, LabelCatalog};

impl RepositoryManager {
    /// List every label on the repository.
    ///
    /// # Errors
    ///
    /// Returns an error if any page fails.
    pub async fn get_labels(&self) -> Result<Vec<Label>, Error> {
        self.transport.get_paginated(&self.path("/labels"), &[]).await
    }

    /// Create one label.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` if a label with that name already exists.
    pub async fn create_label(&self, label: &Label) -> Result<(), Error> {
        let _: Value = self
            .transport
            .request("POST", &self.path("/labels"), None, Some(label))
            .await?;

        info!(repo = %self.full_name(), label = %label.name, "label created");
        Ok(())
    }

    /// Delete one label by name.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the label does not exist.
    pub async fn delete_label(&self, name: &str) -> Result<(), Error> {
        let _: Value = self
            .transport
            .request(
                "DELETE",
                &self.path(&format!("/labels/{}", encode_segment(name))),
                None,
                None::<&()>,
            )
            .await?;

        info!(repo = %self.full_name(), label = name, "label deleted");
        Ok(())
    }

    /// Delete every label on the repository, one at a time.
    ///
    /// # Errors
    ///
    /// Returns the first failure; labels after it are left in place.
    pub async fn clear_all_labels(&self) -> Result<(), Error> {
        let labels = self.get_labels().await?;

        for label in &labels {
            self.delete_label(&label.name).await?;
        }

        Ok(())
    }

    /// Create every label of `catalog`, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns the first failure (typically `Conflict` for a label that
    /// already exists); labels after it are not attempted.
    pub async fn create_labels(&self, catalog: &LabelCatalog) -> Result<(), Error> {
        for label in catalog.iter() {
            self.create_label(label).await?;
        }

        Ok(())
    }

    /// Create the release workflow's label catalog.
    ///
    /// # Errors
    ///
    /// See [`create_labels`](Self::create_labels).
    pub async fn create_required_labels(&self) -> Result<(), Error> {
        self.create_labels(&LabelCatalog::required()).await
    }

    /// Create only the catalog labels the repository is missing.
    ///
    /// Returns the names of the labels created. Existing labels are not
    /// recoloured.
    ///
    /// # Errors
    ///
    /// Returns the first failure.
    pub async fn ensure_labels(&self, catalog: &LabelCatalog) -> Result<Vec<String>, Error> {
        let existing: HashSet<String> = self
            .get_labels()
            .await?
            .into_iter()
            .map(|label| label.name)
            .collect();

        let mut created = Vec::new();
        for label in catalog.iter().filter(|l| !existing.contains(&l.name)) {
            self.create_label(label).await?;
            created.push(label.name.clone());
        }

        Ok(created)
    }
}
