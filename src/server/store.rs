//! Storage behind the development `/foods` server.
//!
//! Plates live in memory. When a database path is given, the collection is
//! loaded from it at startup and rewritten after every change, using the
//! json-server layout:
//! ```text
//! { "foods": [ { "id": 1, "name": "...", ... } ] }
//! ```

use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::models::{FoodPlate, NewFoodPlate};

/// On-disk layout of the database file.
#[derive(Debug, Serialize, Deserialize, Default)]
struct Database {
    #[serde(default)]
    foods: Vec<FoodPlate>,
}

/// Errors that can occur during store operations.
#[derive(Debug)]
pub enum StoreError {
    /// No plate with this id.
    NotFound(u64),
    /// The submitted plate was rejected.
    Invalid(String),
    /// I/O error reading or writing the database file.
    IoError(PathBuf, io::Error),
    /// The database file is not valid JSON.
    ParseError(PathBuf, serde_json::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NotFound(id) => write!(f, "Food plate {} not found", id),
            StoreError::Invalid(reason) => write!(f, "{}", reason),
            StoreError::IoError(path, e) => {
                write!(f, "I/O error for {}: {}", path.display(), e)
            }
            StoreError::ParseError(path, e) => {
                write!(f, "Failed to parse database {}: {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for StoreError {}

/// The `/foods` collection, optionally backed by a JSON file.
#[derive(Debug, Default)]
pub struct FoodStore {
    foods: Vec<FoodPlate>,
    path: Option<PathBuf>,
}

impl FoodStore {
    /// Creates a store that never touches the disk.
    pub fn in_memory(foods: Vec<FoodPlate>) -> Self {
        Self { foods, path: None }
    }

    /// Opens a file-backed store. A missing file starts an empty collection.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let foods = match fs::read_to_string(&path) {
            Ok(contents) => {
                let db: Database = serde_json::from_str(&contents)
                    .map_err(|e| StoreError::ParseError(path.clone(), e))?;
                db.foods
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(StoreError::IoError(path, e)),
        };

        Ok(Self {
            foods,
            path: Some(path),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn list(&self) -> &[FoodPlate] {
        &self.foods
    }

    pub fn get(&self, id: u64) -> Option<&FoodPlate> {
        self.foods.iter().find(|f| f.id == id)
    }

    /// Adds a plate under the next free id (one past the highest in use).
    pub fn insert(&mut self, new: NewFoodPlate) -> Result<FoodPlate, StoreError> {
        Self::validate(&new)?;

        let id = self.foods.iter().map(|f| f.id).max().unwrap_or(0) + 1;
        let plate = FoodPlate {
            available: new.available,
            ..FoodPlate::from_input(id, new.fields)
        };

        let mut foods = self.foods.clone();
        foods.push(plate.clone());
        self.commit(foods)?;
        Ok(plate)
    }

    /// Replaces every field of plate `id` except the id itself.
    pub fn replace(&mut self, id: u64, new: NewFoodPlate) -> Result<FoodPlate, StoreError> {
        Self::validate(&new)?;

        let mut foods = self.foods.clone();
        let entry = foods
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or(StoreError::NotFound(id))?;
        *entry = FoodPlate {
            available: new.available,
            ..FoodPlate::from_input(id, new.fields)
        };

        let plate = entry.clone();
        self.commit(foods)?;
        Ok(plate)
    }

    pub fn remove(&mut self, id: u64) -> Result<FoodPlate, StoreError> {
        let pos = self
            .foods
            .iter()
            .position(|f| f.id == id)
            .ok_or(StoreError::NotFound(id))?;

        let mut foods = self.foods.clone();
        let plate = foods.remove(pos);
        self.commit(foods)?;
        Ok(plate)
    }

    fn validate(new: &NewFoodPlate) -> Result<(), StoreError> {
        if new.fields.name.trim().is_empty() {
            return Err(StoreError::Invalid("name cannot be empty".to_string()));
        }
        Ok(())
    }

    /// Saves `foods` and only then makes it the live collection, so a failed
    /// write leaves memory and disk in agreement.
    fn commit(&mut self, foods: Vec<FoodPlate>) -> Result<(), StoreError> {
        self.persist(&foods)?;
        self.foods = foods;
        Ok(())
    }

    /// Writes a collection to the database file, if there is one.
    fn persist(&self, foods: &[FoodPlate]) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::IoError(parent.to_path_buf(), e))?;
        }

        let db = Database {
            foods: foods.to_vec(),
        };
        let bytes = serde_json::to_vec_pretty(&db)
            .map_err(|e| StoreError::ParseError(path.clone(), e))?;

        // Write atomically using temp file + rename
        let temp_path = path.with_extension("json.tmp");

        let mut file =
            File::create(&temp_path).map_err(|e| StoreError::IoError(temp_path.clone(), e))?;
        file.write_all(&bytes)
            .map_err(|e| StoreError::IoError(temp_path.clone(), e))?;
        file.sync_all()
            .map_err(|e| StoreError::IoError(temp_path.clone(), e))?;

        fs::rename(&temp_path, path).map_err(|e| StoreError::IoError(path.clone(), e))?;

        Ok(())
    }
}
