//! File-backed plan store.
//!
//! Writes the versioned plan document as pretty JSON, one file per game
//! day, using a temp-file-and-rename so a failed write never clobbers an
//! existing plan.

use super::error::StoreError;
use super::format::PlanDocument;
use super::PLAN_VERSION;
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

pub struct PlanStore {
    dir: PathBuf,
}

impl PlanStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        PlanStore { dir: dir.into() }
    }

    /// Path of the plan file for a game day.
    pub fn plan_path(&self, game_date: NaiveDate) -> PathBuf {
        self.dir.join(format!("rotation_{}.json", game_date))
    }

    /// Persist the document for its game day, returning the final path.
    pub fn save(&self, document: &PlanDocument) -> Result<PathBuf, StoreError> {
        let path = self.plan_path(document.game_date);
        Self::save_to_path(&path, document)?;
        Ok(path)
    }

    /// Load the document for a game day.
    pub fn load(&self, game_date: NaiveDate) -> Result<PlanDocument, StoreError> {
        Self::load_from_path(&self.plan_path(game_date))
    }

    pub fn save_to_path(path: &Path, document: &PlanDocument) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(document)?;

        // Write to a sibling temp file first, then rename into place.
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, path)?;

        log::info!(
            "Saved {}-inning rotation plan to {}",
            document.innings.len(),
            path.display()
        );
        Ok(())
    }

    pub fn load_from_path(path: &Path) -> Result<PlanDocument, StoreError> {
        if !path.exists() {
            return Err(StoreError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let json = fs::read_to_string(path)?;
        let document: PlanDocument = serde_json::from_str(&json)?;
        if document.version != PLAN_VERSION {
            return Err(StoreError::VersionMismatch {
                found: document.version,
                expected: PLAN_VERSION,
            });
        }
        log::info!("Loaded rotation plan from {}", path.display());
        Ok(document)
    }
}
