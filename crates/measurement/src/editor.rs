use std::{error, fmt};

use chrono::Utc;
use model::{
    group::{Group, GroupColor},
    measure::{Measure, MeasureKind},
    point::PointLocation,
    WithId,
};
use utility::id::Id;

use crate::{
    database::{
        Database, DatabaseError, DatabaseTransaction, GroupRepo, MeasureRepo,
    },
    notify::{ChangeEvent, ChangeNotifier},
};

/// Rejected editor input. Raised before anything is written, so a failed
/// save never leaves a partially applied record behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyName,
    NoPoints,
    TooFewPoints {
        kind: MeasureKind,
        required: usize,
        actual: usize,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyName => write!(f, "a name is required"),
            ValidationError::NoPoints => {
                write!(f, "at least one point must be selected")
            }
            ValidationError::TooFewPoints { kind, required, .. } => {
                write!(f, "{:?} needs {} points at least", kind, required)
            }
        }
    }
}

impl error::Error for ValidationError {}

#[derive(Debug)]
pub enum SaveError {
    Validation(ValidationError),
    Database(DatabaseError),
}

impl From<ValidationError> for SaveError {
    fn from(why: ValidationError) -> Self {
        SaveError::Validation(why)
    }
}

impl From<DatabaseError> for SaveError {
    fn from(why: DatabaseError) -> Self {
        SaveError::Database(why)
    }
}

/// Input for creating a measure.
#[derive(Debug, Clone)]
pub struct MeasureDraft {
    pub name: String,
    pub group_id: Id<Group>,
    pub kind: MeasureKind,
    pub points: Vec<PointLocation>,
}

impl MeasureDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.points.is_empty() {
            return Err(ValidationError::NoPoints);
        }
        let required = self.kind.min_points();
        if self.points.len() < required {
            return Err(ValidationError::TooFewPoints {
                kind: self.kind,
                required,
                actual: self.points.len(),
            });
        }
        Ok(())
    }
}

/// Input for editing an existing measure. The kind is not part of it: a
/// measure keeps the kind it was created with.
#[derive(Debug, Clone)]
pub struct MeasureEdit {
    pub name: String,
    pub group_id: Id<Group>,
    pub points: Vec<PointLocation>,
}

impl MeasureEdit {
    fn into_draft(self, kind: MeasureKind) -> MeasureDraft {
        MeasureDraft {
            name: self.name,
            group_id: self.group_id,
            kind,
            points: self.points,
        }
    }
}

/// Input for creating or editing a group.
#[derive(Debug, Clone)]
pub struct GroupDraft {
    pub name: String,
    pub color: GroupColor,
}

impl GroupDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(())
    }
}

/// The write side of the system: validates drafts, keeps derived metrics in
/// step with every mutation, persists, and notifies registered listeners
/// once a change has been committed.
pub struct Editor<D: Database> {
    database: D,
    notifier: ChangeNotifier,
}

impl<D: Database> Editor<D> {
    pub fn new(database: D) -> Self {
        Self {
            database,
            notifier: ChangeNotifier::default(),
        }
    }

    /// Registers a listener for persisted changes.
    pub fn on_change<F>(&mut self, listener: F)
    where
        F: Fn(&ChangeEvent) + Send + Sync + 'static,
    {
        self.notifier.subscribe(listener);
    }

    pub async fn create_measure(
        &self,
        draft: MeasureDraft,
    ) -> Result<WithId<Measure>, SaveError> {
        draft.validate()?;
        let measure =
            Measure::new(draft.name, draft.group_id, draft.kind, draft.points);
        let mut tx = self.database.transaction().await?;
        let saved = tx.insert_measure(measure).await?;
        tx.commit().await?;
        log::debug!("created measure {}", saved.id);
        self.notifier
            .notify(&ChangeEvent::MeasureSaved(saved.id.clone()));
        Ok(saved)
    }

    pub async fn update_measure(
        &self,
        id: &Id<Measure>,
        edit: MeasureEdit,
    ) -> Result<WithId<Measure>, SaveError> {
        let mut tx = self.database.transaction().await?;
        let mut measure = tx.measure(id).await?;
        // the kind is fixed at creation, so the minimum point count is
        // checked against the stored one
        let draft = edit.into_draft(measure.content.kind);
        draft.validate()?;
        measure.content.name = draft.name;
        measure.content.group_id = draft.group_id;
        measure.content.set_points(draft.points);
        measure.content.updated_at = Utc::now();
        let saved = tx.put_measure(measure).await?;
        tx.commit().await?;
        log::debug!("updated measure {}", saved.id);
        self.notifier
            .notify(&ChangeEvent::MeasureSaved(saved.id.clone()));
        Ok(saved)
    }

    pub async fn delete_measure(
        &self,
        id: &Id<Measure>,
    ) -> Result<(), SaveError> {
        self.database.auto().delete_measure(id).await?;
        log::debug!("deleted measure {}", id);
        self.notifier.notify(&ChangeEvent::MeasureDeleted(id.clone()));
        Ok(())
    }

    pub async fn create_group(
        &self,
        draft: GroupDraft,
    ) -> Result<WithId<Group>, SaveError> {
        draft.validate()?;
        let group = Group::new(draft.name, draft.color);
        let saved = self.database.auto().insert_group(group).await?;
        log::debug!("created group {}", saved.id);
        self.notifier
            .notify(&ChangeEvent::GroupSaved(saved.id.clone()));
        Ok(saved)
    }

    pub async fn update_group(
        &self,
        id: &Id<Group>,
        draft: GroupDraft,
    ) -> Result<WithId<Group>, SaveError> {
        draft.validate()?;
        let mut tx = self.database.transaction().await?;
        let mut group = tx.group(id).await?;
        group.content.name = draft.name;
        group.content.color = draft.color;
        group.content.updated_at = Utc::now();
        let saved = tx.put_group(group).await?;
        tx.commit().await?;
        log::debug!("updated group {}", saved.id);
        self.notifier
            .notify(&ChangeEvent::GroupSaved(saved.id.clone()));
        Ok(saved)
    }

    pub async fn delete_group(&self, id: &Id<Group>) -> Result<(), SaveError> {
        self.database.auto().delete_group(id).await?;
        log::debug!("deleted group {}", id);
        self.notifier.notify(&ChangeEvent::GroupDeleted(id.clone()));
        Ok(())
    }
}
