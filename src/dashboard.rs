//! The menu dashboard: an in-memory mirror of `/foods` plus the form state
//! around it.
//!
//! The remote resource is the source of truth. Every write goes to the server
//! first and the local collection is patched only once the call has
//! succeeded, so the dashboard never shows a state the server has not
//! confirmed. Two writes racing each other resolve as last-settled-wins.

use std::collections::HashSet;

use thiserror::Error;

use crate::alerts::{Alerts, ConfirmOutcome, Confirmation, Notice};
use crate::api::{ApiError, FoodsApi};
use crate::models::{FoodPlate, FoodPlateInput};

/// Where the initial fetch of the collection stands.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready,
    /// The initial fetch failed; carries the error message.
    Failed(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DashboardError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("No food plate selected for editing")]
    NothingSelected,

    #[error("Food plate {0} is not on the dashboard")]
    UnknownFood(u64),
}

/// How a delete request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The user declined the confirmation.
    Kept,
    /// The confirmation closed without an answer.
    Dismissed,
}

/// View state: the collection, the form visibility flags and the plate
/// targeted by the edit form.
#[derive(Debug, Clone, Default)]
struct DashboardState {
    foods: Vec<FoodPlate>,
    load_state: LoadState,
    add_visible: bool,
    edit_visible: bool,
    editing: Option<FoodPlate>,
}

impl DashboardState {
    fn foods(&self) -> &[FoodPlate] {
        &self.foods
    }

    fn find(&self, id: u64) -> Option<&FoodPlate> {
        self.foods.iter().find(|f| f.id == id)
    }

    fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    fn is_add_visible(&self) -> bool {
        self.add_visible
    }

    fn is_edit_visible(&self) -> bool {
        self.edit_visible
    }

    fn editing(&self) -> Option<&FoodPlate> {
        self.editing.as_ref()
    }

    /// Replaces the whole collection, keeping the first entry for any
    /// repeated id.
    fn populate(&mut self, foods: Vec<FoodPlate>) {
        let mut seen = HashSet::new();
        let before = foods.len();
        self.foods = foods.into_iter().filter(|f| seen.insert(f.id)).collect();

        if self.foods.len() != before {
            tracing::warn!(
                "Dropped {} food plate(s) with duplicate ids",
                before - self.foods.len()
            );
        }
    }

    /// Appends a plate. An existing entry with the same id is replaced in
    /// place instead.
    fn append(&mut self, plate: FoodPlate) {
        match self.foods.iter_mut().find(|f| f.id == plate.id) {
            Some(existing) => *existing = plate,
            None => self.foods.push(plate),
        }
    }

    /// Swaps the entry with `id` for `plate`. Returns false when no entry has
    /// that id.
    fn replace(&mut self, id: u64, plate: FoodPlate) -> bool {
        if !self.foods.iter().any(|f| f.id == id) {
            return false;
        }
        if plate.id != id {
            self.foods.retain(|f| f.id != plate.id);
        }

        match self.foods.iter_mut().find(|f| f.id == id) {
            Some(existing) => {
                *existing = plate;
                true
            }
            None => false,
        }
    }

    fn remove(&mut self, id: u64) -> Option<FoodPlate> {
        let pos = self.foods.iter().position(|f| f.id == id)?;
        Some(self.foods.remove(pos))
    }
}

/// Controller for one mounted dashboard.
///
/// Build one per view: [`Dashboard::mount`] fetches the collection, the
/// `request_*` methods perform user actions, and dropping the value discards
/// the state.
pub struct Dashboard<A, P> {
    api: A,
    alerts: P,
    state: DashboardState,
}

impl<A: FoodsApi, P: Alerts> Dashboard<A, P> {
    pub fn new(api: A, alerts: P) -> Self {
        Self {
            api,
            alerts,
            state: DashboardState::default(),
        }
    }

    pub fn foods(&self) -> &[FoodPlate] {
        self.state.foods()
    }

    pub fn find(&self, id: u64) -> Option<&FoodPlate> {
        self.state.find(id)
    }

    pub fn load_state(&self) -> &LoadState {
        self.state.load_state()
    }

    pub fn editing(&self) -> Option<&FoodPlate> {
        self.state.editing()
    }

    pub fn is_add_visible(&self) -> bool {
        self.state.is_add_visible()
    }

    pub fn is_edit_visible(&self) -> bool {
        self.state.is_edit_visible()
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn alerts(&self) -> &P {
        &self.alerts
    }

    /// Fetches the collection from the server.
    ///
    /// On failure the dashboard moves to [`LoadState::Failed`], keeps its
    /// previous collection and shows an error notice.
    pub async fn mount(&mut self) -> Result<(), DashboardError> {
        self.state.load_state = LoadState::Loading;

        match self.api.list_all().await {
            Ok(foods) => {
                self.state.populate(foods);
                self.state.load_state = LoadState::Ready;
                tracing::info!("Loaded {} food plate(s)", self.state.foods.len());
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Failed to load food plates: {}", e);
                self.state.load_state = LoadState::Failed(e.to_string());
                self.alerts.notify_error(format!("Error! {}", e));
                Err(e.into())
            }
        }
    }

    /// Creates a plate on the server and appends the server's copy.
    pub async fn request_add(&mut self, input: FoodPlateInput) -> Result<FoodPlate, DashboardError> {
        let name = input.name.clone();

        match self.api.create(input).await {
            Ok(created) => {
                tracing::info!("Created food plate {} ({})", created.id, created.name);
                self.state.append(created.clone());
                self.alerts
                    .notify_success(format!("Plate {} added successfully!", name));
                Ok(created)
            }
            Err(e) => Err(self.report(e)),
        }
    }

    /// Saves the edit form over the selected plate.
    ///
    /// The body sent is the selected plate with the form fields laid over it;
    /// the entry is then replaced by whatever the server returned.
    pub async fn request_update(
        &mut self,
        input: FoodPlateInput,
    ) -> Result<FoodPlate, DashboardError> {
        let Some(selected) = self.state.editing.clone() else {
            let err = DashboardError::NothingSelected;
            self.alerts.notify_error(format!("Error! {}", err));
            return Err(err);
        };

        match self.api.update(selected.id, selected.merged_with(&input)).await {
            Ok(updated) => {
                tracing::info!("Updated food plate {}", selected.id);
                if !self.state.replace(selected.id, updated.clone()) {
                    tracing::warn!(
                        "Food plate {} vanished from the dashboard before its update settled",
                        selected.id
                    );
                }
                self.state.editing = Some(updated.clone());
                self.alerts
                    .notify_success(format!("Plate {} updated successfully!", input.name));
                Ok(updated)
            }
            Err(e) => Err(self.report(e)),
        }
    }

    /// Asks for confirmation, then deletes the plate on the server and drops
    /// it locally.
    pub async fn request_delete(&mut self, id: u64) -> Result<DeleteOutcome, DashboardError> {
        let outcome = self
            .alerts
            .confirm_destructive(&Confirmation::delete_food())
            .await;

        match outcome {
            ConfirmOutcome::Confirmed => {}
            ConfirmOutcome::Cancelled => {
                self.alerts.notify(
                    Notice::success("Not deleted")
                        .with_body("Your record is safe")
                        .sticky(),
                );
                return Ok(DeleteOutcome::Kept);
            }
            ConfirmOutcome::Dismissed => return Ok(DeleteOutcome::Dismissed),
        }

        if let Err(e) = self.api.remove(id).await {
            return Err(self.report(e));
        }

        tracing::info!("Deleted food plate {}", id);
        self.state.remove(id);
        if self.state.editing.as_ref().is_some_and(|f| f.id == id) {
            self.state.editing = None;
        }
        self.alerts.notify(Notice::destructive("Plate deleted!"));
        Ok(DeleteOutcome::Deleted)
    }

    /// Flips the availability of a plate on the server, then mirrors the
    /// server's answer.
    pub async fn toggle_available(&mut self, id: u64) -> Result<FoodPlate, DashboardError> {
        let Some(current) = self.state.find(id).cloned() else {
            let err = DashboardError::UnknownFood(id);
            self.alerts.notify_error(format!("Error! {}", err));
            return Err(err);
        };

        match self.api.update(id, current.toggled()).await {
            Ok(updated) => {
                tracing::info!(
                    "Food plate {} is now {}",
                    id,
                    if updated.available {
                        "available"
                    } else {
                        "unavailable"
                    }
                );
                self.state.replace(id, updated.clone());
                Ok(updated)
            }
            Err(e) => Err(self.report(e)),
        }
    }

    /// Targets `plate` with the edit form and opens it.
    pub fn select_for_edit(&mut self, plate: FoodPlate) {
        self.state.editing = Some(plate);
        self.state.edit_visible = true;
    }

    /// Like [`Dashboard::select_for_edit`], looking the plate up by id.
    pub fn select_for_edit_by_id(&mut self, id: u64) -> Result<(), DashboardError> {
        let plate = self
            .state
            .find(id)
            .cloned()
            .ok_or(DashboardError::UnknownFood(id))?;
        self.select_for_edit(plate);
        Ok(())
    }

    pub fn toggle_add(&mut self) {
        self.state.add_visible = !self.state.add_visible;
    }

    pub fn toggle_edit(&mut self) {
        self.state.edit_visible = !self.state.edit_visible;
    }

    /// Shows a failed write to the user and hands the error back.
    fn report(&self, e: ApiError) -> DashboardError {
        tracing::warn!("Request failed: {}", e);
        self.alerts.notify_error(format!("Error! {}", e));
        e.into()
    }
}
