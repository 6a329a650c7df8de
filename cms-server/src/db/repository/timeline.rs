//! Timeline Repository
//!
//! Sections are ordered across the whole table; phases are ordered per
//! section, so every phase operation builds its partition from the owning
//! section record.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::sql::Thing;

use super::{BaseRepository, RepoError, RepoResult, make_thing, strip_table_prefix};
use crate::db::models::{
    TimelinePhase, TimelinePhaseCreate, TimelinePhaseUpdate, TimelineSection,
    TimelineSectionCreate, TimelineSectionUpdate, TimelineView,
};
use crate::ordering::{OrderedCollection, Partition, Tx, UNORDERED};
use crate::utils::now_millis;

const SECTION_TABLE: &str = "timeline_section";
const PHASE_TABLE: &str = "timeline_phase";

#[derive(Clone)]
pub struct TimelineRepository {
    base: BaseRepository,
}

impl TimelineRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { base: BaseRepository::new(db) }
    }

    fn sections(&self) -> OrderedCollection<'_, TimelineSection> {
        OrderedCollection::new(self.base.db(), Partition::all())
    }

    // `section` is stored as its "table:id" string form; the partition
    // binding must compare strings, not record pointers
    fn phases_of(&self, section: &Thing) -> OrderedCollection<'_, TimelinePhase> {
        OrderedCollection::new(
            self.base.db(),
            Partition::new(
                "is_active = true AND section = $section",
                Some("is_active = false AND section = $section"),
            )
            .bind("section", section.to_string()),
        )
    }

    // ==================== Public reads ====================

    /// Everything the journey page needs: active sections in order plus all
    /// active phases in order (the frontend groups them by section).
    pub async fn find_view(&self) -> RepoResult<TimelineView> {
        let sections = self.find_active_sections().await?;
        let phases: Vec<TimelinePhase> = self
            .base
            .db()
            .query("SELECT * FROM timeline_phase WHERE is_active = true ORDER BY sort_order ASC")
            .await?
            .take(0)?;
        Ok(TimelineView { sections, phases })
    }

    pub async fn find_active_sections(&self) -> RepoResult<Vec<TimelineSection>> {
        let sections: Vec<TimelineSection> = self
            .base
            .db()
            .query("SELECT * FROM timeline_section WHERE is_active = true ORDER BY sort_order ASC")
            .await?
            .take(0)?;
        Ok(sections)
    }

    pub async fn find_section_phases(&self, section_id: &str, admin: bool) -> RepoResult<Vec<TimelinePhase>> {
        let section = self.require_section(section_id).await?;
        let manager = self.phases_of(&section);
        if admin {
            Ok(manager.list_admin().await?)
        } else {
            Ok(manager.list_ordered().await?)
        }
    }

    // ==================== Sections ====================

    pub async fn find_all_sections(&self) -> RepoResult<Vec<TimelineSection>> {
        Ok(self.sections().list_ordered().await?)
    }

    pub async fn find_section(&self, id: &str) -> RepoResult<Option<TimelineSection>> {
        self.base.get(SECTION_TABLE, id).await
    }

    pub async fn create_section(&self, data: TimelineSectionCreate) -> RepoResult<TimelineSection> {
        let sort_order = self.sections().next_order().await?;
        self.base
            .create(SECTION_TABLE, data.into_section(sort_order, now_millis()))
            .await
    }

    pub async fn update_section(&self, id: &str, data: TimelineSectionUpdate) -> RepoResult<TimelineSection> {
        if self.find_section(id).await?.is_none() {
            return Err(RepoError::NotFound(format!("Timeline section {id} not found")));
        }
        self.base.merge(SECTION_TABLE, id, &data, now_millis()).await
    }

    /// Delete a section together with its phases, compacting the section
    /// ordering — one atomic script, since a failure in between would
    /// orphan phases.
    pub async fn delete_section(&self, id: &str) -> RepoResult<()> {
        let pure_id = strip_table_prefix(SECTION_TABLE, id);
        if self.find_section(pure_id).await?.is_none() {
            return Err(RepoError::NotFound(format!("Timeline section {id} not found")));
        }

        let rec = make_thing(SECTION_TABLE, pure_id);
        let tx = Tx::new()
            .stmt("LET $victim = (SELECT * FROM $rec)[0]")
            .stmt("IF $victim == NONE { THROW \"conflict: record vanished\" }")
            .stmt("DELETE timeline_phase WHERE section = $section")
            .stmt("DELETE $rec")
            .stmt(format!(
                "IF $victim.sort_order != {UNORDERED} {{ \
                 UPDATE timeline_section SET sort_order -= 1 \
                 WHERE sort_order != -1 AND sort_order > $victim.sort_order }}"
            ))
            .bind("section", rec.to_string())
            .bind("rec", rec);
        tx.run(self.base.db()).await.map_err(RepoError::from)
    }

    pub async fn reorder_section(&self, id: &str, target: i64) -> RepoResult<Vec<TimelineSection>> {
        self.sections()
            .reorder(strip_table_prefix(SECTION_TABLE, id), target)
            .await?;
        self.find_all_sections().await
    }

    // ==================== Phases ====================

    async fn require_section(&self, id: &str) -> RepoResult<Thing> {
        let section: Option<TimelineSection> = self.base.get(SECTION_TABLE, id).await?;
        section
            .and_then(|s| s.id)
            .ok_or_else(|| RepoError::NotFound(format!("Timeline section {id} not found")))
    }

    async fn require_phase(&self, id: &str) -> RepoResult<TimelinePhase> {
        let phase: Option<TimelinePhase> = self.base.get(PHASE_TABLE, id).await?;
        phase.ok_or_else(|| RepoError::NotFound(format!("Timeline phase {id} not found")))
    }

    pub async fn find_phase(&self, id: &str) -> RepoResult<Option<TimelinePhase>> {
        self.base.get(PHASE_TABLE, id).await
    }

    pub async fn create_phase(&self, data: TimelinePhaseCreate) -> RepoResult<TimelinePhase> {
        let section = self.require_section(&data.section).await?;
        let manager = self.phases_of(&section);
        let active = data.is_active.unwrap_or(true);
        let sort_order = if active { manager.next_order().await? } else { UNORDERED };
        self.base
            .create(PHASE_TABLE, data.into_phase(section, sort_order, now_millis()))
            .await
    }

    pub async fn update_phase(&self, id: &str, data: TimelinePhaseUpdate) -> RepoResult<TimelinePhase> {
        self.require_phase(id).await?;
        self.base.merge(PHASE_TABLE, id, &data, now_millis()).await
    }

    pub async fn toggle_phase(&self, id: &str) -> RepoResult<Vec<TimelinePhase>> {
        let phase = self.require_phase(id).await?;
        let manager = self.phases_of(&phase.section);
        manager
            .toggle_active(strip_table_prefix(PHASE_TABLE, id), now_millis())
            .await?;
        Ok(manager.list_admin().await?)
    }

    pub async fn reorder_phase(&self, id: &str, target: i64) -> RepoResult<Vec<TimelinePhase>> {
        let phase = self.require_phase(id).await?;
        let manager = self.phases_of(&phase.section);
        manager
            .reorder(strip_table_prefix(PHASE_TABLE, id), target)
            .await?;
        Ok(manager.list_admin().await?)
    }

    /// Delete a phase and compact its section's ordering. Returns the
    /// deleted phase so the caller can release its hosted image.
    pub async fn delete_phase(&self, id: &str) -> RepoResult<TimelinePhase> {
        let phase = self.require_phase(id).await?;
        self.phases_of(&phase.section)
            .compact_delete(strip_table_prefix(PHASE_TABLE, id))
            .await?;
        Ok(phase)
    }
}
