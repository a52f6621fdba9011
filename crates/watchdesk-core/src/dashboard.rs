//! Dashboard view state and its update function.
//!
//! All mutation goes through [`DashboardState::update`]: the front end turns
//! input into an [`Intent`], the state applies it, and outward effects
//! (navigation, delete requests) go to the injected collaborator. The derived
//! view is re-derived in full after every change to records or criteria.

use crate::confirm::confirm_dialog;
use crate::error::{LoadError, StoreError};
use crate::filter::{derive_view, FilterCriteria, FilterField};
use crate::navigation::{DeleteSink, Navigator};
use crate::selection::DetailModal;
use crate::source::Dataset;
use crate::store::IncidentStore;
use crate::summary::StatCard;
use crate::types::{IncidentId, IncidentRecord, Status, Subject};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    /// Load failed; shown until dismissed. Distinct from a ready, empty list.
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletePrompt {
    pub visible: bool,
    pub target: Option<Subject>,
}

#[derive(Debug)]
pub enum Intent {
    Loaded(Result<Dataset, LoadError>),
    DismissLoadError,
    SetFilter(FilterField, String),
    CycleFilter(FilterField),
    ResetFilters,
    ToggleStatus(IncidentId),
    OpenDetail(IncidentId),
    CloseDetail,
    ViewDetails,
    RequestDelete(Option<Subject>),
    ConfirmDelete,
    CancelDelete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Unchanged,
    ViewChanged,
    StatusChanged(IncidentId, Status),
    Navigated,
    DeleteConfirmed,
    Rejected(StoreError),
}

#[derive(Debug, Clone)]
pub struct DashboardState {
    store: IncidentStore,
    summary: Vec<StatCard>,
    subjects: Vec<Subject>,
    criteria: FilterCriteria,
    view: Vec<IncidentId>,
    modal: DetailModal,
    delete: DeletePrompt,
    load: LoadState,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(FilterCriteria::default())
    }
}

impl DashboardState {
    pub fn new(criteria: FilterCriteria) -> Self {
        Self {
            store: IncidentStore::default(),
            summary: Vec::new(),
            subjects: Vec::new(),
            criteria,
            view: Vec::new(),
            modal: DetailModal::Closed,
            delete: DeletePrompt::default(),
            load: LoadState::Loading,
        }
    }

    pub fn store(&self) -> &IncidentStore {
        &self.store
    }

    pub fn summary(&self) -> &[StatCard] {
        &self.summary
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn modal(&self) -> DetailModal {
        self.modal
    }

    pub fn delete_prompt(&self) -> &DeletePrompt {
        &self.delete
    }

    pub fn view_ids(&self) -> &[IncidentId] {
        &self.view
    }

    /// Records of the derived view, in source order.
    pub fn view(&self) -> impl Iterator<Item = &IncidentRecord> {
        self.view.iter().filter_map(|id| self.store.get(*id))
    }

    pub fn view_len(&self) -> usize {
        self.view.len()
    }

    /// Resolves a row of the derived view to its record id.
    pub fn id_at_row(&self, row: usize) -> Result<IncidentId, StoreError> {
        self.view.get(row).copied().ok_or(StoreError::RowOutOfRange {
            row,
            len: self.view.len(),
        })
    }

    pub fn detail_record(&self) -> Option<&IncidentRecord> {
        self.modal.record(&self.store)
    }

    pub fn subject_for_reporter(&self, reporter: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.full_name() == reporter)
    }

    pub fn update<C>(&mut self, intent: Intent, fx: &mut C) -> Outcome
    where
        C: Navigator + DeleteSink,
    {
        match intent {
            Intent::Loaded(Ok(dataset)) => {
                tracing::info!(
                    "Loaded {} incident records, {} summary cards",
                    dataset.records.len(),
                    dataset.summary.len()
                );
                self.store = IncidentStore::from_records(dataset.records);
                self.summary = dataset.summary;
                self.subjects = dataset.subjects;
                self.load = LoadState::Ready;
                self.modal.close();
                self.recompute();
                Outcome::ViewChanged
            }
            Intent::Loaded(Err(e)) => {
                tracing::error!("Error fetching data: {}", e);
                self.store = IncidentStore::default();
                self.summary.clear();
                self.subjects.clear();
                self.modal.close();
                self.delete = DeletePrompt::default();
                self.load = LoadState::Failed(e.to_string());
                self.recompute();
                Outcome::ViewChanged
            }
            Intent::DismissLoadError => {
                if matches!(self.load, LoadState::Failed(_)) {
                    self.load = LoadState::Ready;
                    Outcome::ViewChanged
                } else {
                    Outcome::Unchanged
                }
            }
            Intent::SetFilter(field, value) => {
                self.criteria.set(field, value);
                self.recompute();
                Outcome::ViewChanged
            }
            Intent::CycleFilter(field) => {
                let options = match field {
                    FilterField::Month => crate::filter::Month::codes(),
                    other => self.store.distinct(other),
                };
                self.criteria.cycle(field, &options);
                self.recompute();
                Outcome::ViewChanged
            }
            Intent::ResetFilters => {
                self.criteria.reset();
                self.recompute();
                Outcome::ViewChanged
            }
            Intent::ToggleStatus(id) => match self.store.toggle_status(id) {
                Ok(status) => {
                    self.recompute();
                    Outcome::StatusChanged(id, status)
                }
                Err(e) => {
                    tracing::warn!("Status toggle rejected: {}", e);
                    Outcome::Rejected(e)
                }
            },
            Intent::OpenDetail(id) => {
                if self.store.get(id).is_none() {
                    return Outcome::Rejected(StoreError::UnknownIncident(id));
                }
                self.modal.open(id);
                Outcome::ViewChanged
            }
            Intent::CloseDetail => {
                self.modal.close();
                Outcome::ViewChanged
            }
            Intent::ViewDetails => {
                if self.modal.view_details(&self.store, fx) {
                    Outcome::Navigated
                } else {
                    Outcome::Unchanged
                }
            }
            Intent::RequestDelete(target) => {
                self.delete = DeletePrompt {
                    visible: true,
                    target,
                };
                Outcome::ViewChanged
            }
            Intent::ConfirmDelete => {
                let prompt = std::mem::take(&mut self.delete);
                let confirmed = confirm_dialog(
                    prompt.visible,
                    prompt.target.as_ref(),
                    |id| fx.delete_confirmed(id),
                    || {},
                )
                .map(|dialog| dialog.confirm())
                .unwrap_or(false);
                if confirmed {
                    Outcome::DeleteConfirmed
                } else {
                    // a guarded confirm leaves the dialog up for the user to cancel
                    self.delete = prompt;
                    Outcome::Unchanged
                }
            }
            Intent::CancelDelete => {
                let prompt = std::mem::take(&mut self.delete);
                if let Some(dialog) = confirm_dialog(prompt.visible, prompt.target.as_ref(), |_| {}, || {}) {
                    dialog.cancel();
                }
                Outcome::ViewChanged
            }
        }
    }

    fn recompute(&mut self) {
        self.view = derive_view(self.store.iter(), &self.criteria);
        tracing::trace!("Derived view has {} of {} records", self.view.len(), self.store.len());
    }
}
