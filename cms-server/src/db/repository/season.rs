//! Season Repository
//!
//! Seasons are the embedded-array variant of the ordering protocol: board
//! members and highlights live inside the season document, so their shift
//! sets are computed in memory with [`crate::ordering::sequence`] and the
//! whole document is persisted as the atomic unit. Both arrays are
//! re-sorted by `sort_order` on every load.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, strip_table_prefix};
use crate::db::models::{
    BoardMember, BoardMemberCreate, BoardMemberUpdate, Highlight, HighlightCreate,
    HighlightUpdate, MediaRef, Season, SeasonCreate, SeasonUpdate,
};
use crate::ordering::{OrderedCollection, Partition, sequence};
use crate::utils::now_millis;
use crate::utils::validation::MAX_BOARD_MEMBERS;

const TABLE: &str = "season";

#[derive(Clone)]
pub struct SeasonRepository {
    base: BaseRepository,
}

impl SeasonRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { base: BaseRepository::new(db) }
    }

    /// Seasons are ordered across the whole table; `is_active` only gates
    /// public visibility.
    fn ordered(&self) -> OrderedCollection<'_, Season> {
        OrderedCollection::new(self.base.db(), Partition::all())
    }

    fn sort_embedded(mut season: Season) -> Season {
        sequence::sort(&mut season.board_members);
        sequence::sort(&mut season.highlights);
        season
    }

    // ==================== Season CRUD ====================

    pub async fn find_active(&self) -> RepoResult<Vec<Season>> {
        let seasons: Vec<Season> = self
            .base
            .db()
            .query("SELECT * FROM season WHERE is_active = true ORDER BY sort_order ASC")
            .await?
            .take(0)?;
        Ok(seasons.into_iter().map(Self::sort_embedded).collect())
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Season>> {
        let seasons = self.ordered().list_ordered().await?;
        Ok(seasons.into_iter().map(Self::sort_embedded).collect())
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Season>> {
        let season: Option<Season> = self.base.get(TABLE, id).await?;
        Ok(season.map(Self::sort_embedded))
    }

    pub async fn find_by_year(&self, academic_year: &str) -> RepoResult<Option<Season>> {
        let seasons: Vec<Season> = self
            .base
            .db()
            .query("SELECT * FROM season WHERE academic_year = $year AND is_active = true LIMIT 1")
            .bind(("year", academic_year.to_string()))
            .await?
            .take(0)?;
        Ok(seasons.into_iter().next().map(Self::sort_embedded))
    }

    async fn year_taken(&self, academic_year: &str) -> RepoResult<bool> {
        let mut response = self
            .base
            .db()
            .query("SELECT count() FROM season WHERE academic_year = $year GROUP ALL")
            .bind(("year", academic_year.to_string()))
            .await?;
        let count: Option<i64> = response.take((0, "count"))?;
        Ok(count.unwrap_or(0) > 0)
    }

    pub async fn create(&self, data: SeasonCreate) -> RepoResult<Season> {
        if self.year_taken(&data.academic_year).await? {
            return Err(RepoError::Duplicate(format!(
                "Season '{}' already exists",
                data.academic_year
            )));
        }
        if data.board_members.len() > MAX_BOARD_MEMBERS {
            return Err(RepoError::Validation(format!(
                "A season may have at most {MAX_BOARD_MEMBERS} board members"
            )));
        }

        let now = now_millis();
        let sort_order = self.ordered().next_order().await?;

        // inline arrays keep their payload positions; a second leader flag
        // loses to the first
        let mut board_members: Vec<BoardMember> = data
            .board_members
            .into_iter()
            .enumerate()
            .map(|(i, m)| m.into_member(i as i64))
            .collect();
        if let Some(first_leader) = board_members.iter().position(|m| m.is_leader) {
            sequence::set_exclusive(&mut board_members, first_leader, |m, v| m.is_leader = v);
        }
        let highlights: Vec<Highlight> = data
            .highlights
            .into_iter()
            .enumerate()
            .map(|(i, h)| h.into_highlight(i as i64))
            .collect();

        let season = Season {
            id: None,
            academic_year: data.academic_year,
            theme: data.theme,
            description: data.description.unwrap_or_default(),
            cover_image: MediaRef::default(),
            badge_color: data.badge_color.unwrap_or_else(|| "#606161".to_string()),
            is_active: data.is_active.unwrap_or(true),
            sort_order,
            board_members,
            highlights,
            created_at: now,
            updated_at: now,
        };
        self.base.create(TABLE, season).await
    }

    pub async fn update(&self, id: &str, data: SeasonUpdate) -> RepoResult<Season> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Season {id} not found")))?;

        if let Some(year) = &data.academic_year
            && *year != existing.academic_year
            && self.year_taken(year).await?
        {
            return Err(RepoError::Duplicate(format!("Season '{year}' already exists")));
        }

        let season: Season = self.base.merge(TABLE, id, &data, now_millis()).await?;
        Ok(Self::sort_embedded(season))
    }

    /// Delete a season and compact the remaining ordering. Returns the
    /// deleted document so the caller can release its hosted media.
    pub async fn delete(&self, id: &str) -> RepoResult<Season> {
        let season = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Season {id} not found")))?;
        self.ordered()
            .compact_delete(strip_table_prefix(TABLE, id))
            .await?;
        Ok(season)
    }

    pub async fn reorder(&self, id: &str, target: i64) -> RepoResult<Vec<Season>> {
        self.ordered()
            .reorder(strip_table_prefix(TABLE, id), target)
            .await?;
        self.find_all().await
    }

    /// Persist a whole season document — the atomic unit for every embedded
    /// array mutation.
    async fn save(&self, id: &str, mut season: Season) -> RepoResult<Season> {
        let pure_id = strip_table_prefix(TABLE, id).to_string();
        season.id = None;
        season.updated_at = now_millis();
        let saved: Option<Season> = self
            .base
            .db()
            .update((TABLE, pure_id))
            .content(season)
            .await?;
        saved
            .map(Self::sort_embedded)
            .ok_or_else(|| RepoError::NotFound(format!("Season {id} not found")))
    }

    async fn load(&self, id: &str) -> RepoResult<Season> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Season {id} not found")))
    }

    pub async fn set_cover_image(&self, id: &str, image: MediaRef) -> RepoResult<(Season, MediaRef)> {
        let mut season = self.load(id).await?;
        let old = std::mem::replace(&mut season.cover_image, image);
        let saved = self.save(id, season).await?;
        Ok((saved, old))
    }

    // ==================== Board members ====================

    pub async fn add_member(&self, id: &str, data: BoardMemberCreate) -> RepoResult<BoardMember> {
        let mut season = self.load(id).await?;
        if season.board_members.len() >= MAX_BOARD_MEMBERS {
            return Err(RepoError::Validation(format!(
                "A season may have at most {MAX_BOARD_MEMBERS} board members"
            )));
        }

        let member = data.into_member(sequence::next_order(&season.board_members));
        let member_id = member.id.clone();
        let is_leader = member.is_leader;
        season.board_members.push(member);
        if is_leader {
            let last = season.board_members.len() - 1;
            sequence::set_exclusive(&mut season.board_members, last, |m, v| m.is_leader = v);
        }
        let saved = self.save(id, season).await?;
        saved
            .board_members
            .into_iter()
            .find(|m| m.id == member_id)
            .ok_or_else(|| RepoError::Database("Created board member missing after save".to_string()))
    }

    pub async fn update_member(
        &self,
        id: &str,
        member_id: &str,
        data: BoardMemberUpdate,
    ) -> RepoResult<BoardMember> {
        let mut season = self.load(id).await?;
        let index = member_index(&season.board_members, member_id)?;

        {
            let member = &mut season.board_members[index];
            if let Some(name) = data.name {
                member.name = name;
            }
            if let Some(position) = data.position {
                member.position = position;
            }
            if let Some(bio) = data.bio {
                member.bio = bio;
            }
            if let Some(url) = data.profile_url {
                member.profile_url = url;
            }
            if let Some(is_leader) = data.is_leader {
                member.is_leader = is_leader;
            }
        }
        if season.board_members[index].is_leader {
            season.board_members[index].position = "Team Leader".to_string();
            sequence::set_exclusive(&mut season.board_members, index, |m, v| m.is_leader = v);
        }

        let saved = self.save(id, season).await?;
        saved
            .board_members
            .into_iter()
            .find(|m| m.id == member_id)
            .ok_or_else(|| RepoError::Database("Board member missing after save".to_string()))
    }

    /// Make exactly one member the leader (array positions untouched).
    pub async fn set_leader(&self, id: &str, member_id: &str) -> RepoResult<Season> {
        let mut season = self.load(id).await?;
        let index = member_index(&season.board_members, member_id)?;
        sequence::set_exclusive(&mut season.board_members, index, |m, v| m.is_leader = v);
        season.board_members[index].position = "Team Leader".to_string();
        self.save(id, season).await
    }

    /// Remove a member and close the gap in the array ordering. Returns the
    /// removed member so the caller can release its avatar.
    pub async fn remove_member(&self, id: &str, member_id: &str) -> RepoResult<BoardMember> {
        let mut season = self.load(id).await?;
        let index = member_index(&season.board_members, member_id)?;
        let removed = season.board_members.remove(index);
        sequence::compact_after(&mut season.board_members, removed.sort_order);
        self.save(id, season).await?;
        Ok(removed)
    }

    pub async fn move_member(&self, id: &str, member_id: &str, target: i64) -> RepoResult<Vec<BoardMember>> {
        let mut season = self.load(id).await?;
        let index = member_index(&season.board_members, member_id)?;
        sequence::move_to(&mut season.board_members, index, target)
            .map_err(|e| RepoError::Validation(e.to_string()))?;
        Ok(self.save(id, season).await?.board_members)
    }

    pub async fn set_member_avatar(
        &self,
        id: &str,
        member_id: &str,
        avatar: MediaRef,
    ) -> RepoResult<(BoardMember, MediaRef)> {
        let mut season = self.load(id).await?;
        let index = member_index(&season.board_members, member_id)?;
        let old = std::mem::replace(&mut season.board_members[index].avatar, avatar);
        let saved = self.save(id, season).await?;
        let member = saved
            .board_members
            .into_iter()
            .find(|m| m.id == member_id)
            .ok_or_else(|| RepoError::Database("Board member missing after save".to_string()))?;
        Ok((member, old))
    }

    // ==================== Highlights ====================

    pub async fn add_highlight(&self, id: &str, data: HighlightCreate) -> RepoResult<Highlight> {
        let mut season = self.load(id).await?;
        let highlight = data.into_highlight(sequence::next_order(&season.highlights));
        let highlight_id = highlight.id.clone();
        season.highlights.push(highlight);
        let saved = self.save(id, season).await?;
        saved
            .highlights
            .into_iter()
            .find(|h| h.id == highlight_id)
            .ok_or_else(|| RepoError::Database("Created highlight missing after save".to_string()))
    }

    pub async fn update_highlight(
        &self,
        id: &str,
        highlight_id: &str,
        data: HighlightUpdate,
    ) -> RepoResult<Highlight> {
        let mut season = self.load(id).await?;
        let index = highlight_index(&season.highlights, highlight_id)?;
        {
            let highlight = &mut season.highlights[index];
            if let Some(title) = data.title {
                highlight.title = title;
            }
            if let Some(url) = data.url {
                highlight.url = url;
            }
            if let Some(description) = data.description {
                highlight.description = description;
            }
        }
        let saved = self.save(id, season).await?;
        saved
            .highlights
            .into_iter()
            .find(|h| h.id == highlight_id)
            .ok_or_else(|| RepoError::Database("Highlight missing after save".to_string()))
    }

    pub async fn remove_highlight(&self, id: &str, highlight_id: &str) -> RepoResult<Highlight> {
        let mut season = self.load(id).await?;
        let index = highlight_index(&season.highlights, highlight_id)?;
        let removed = season.highlights.remove(index);
        sequence::compact_after(&mut season.highlights, removed.sort_order);
        self.save(id, season).await?;
        Ok(removed)
    }

    pub async fn move_highlight(&self, id: &str, highlight_id: &str, target: i64) -> RepoResult<Vec<Highlight>> {
        let mut season = self.load(id).await?;
        let index = highlight_index(&season.highlights, highlight_id)?;
        sequence::move_to(&mut season.highlights, index, target)
            .map_err(|e| RepoError::Validation(e.to_string()))?;
        Ok(self.save(id, season).await?.highlights)
    }

    pub async fn set_highlight_image(
        &self,
        id: &str,
        highlight_id: &str,
        image: MediaRef,
    ) -> RepoResult<(Highlight, MediaRef)> {
        let mut season = self.load(id).await?;
        let index = highlight_index(&season.highlights, highlight_id)?;
        let old = std::mem::replace(&mut season.highlights[index].image, image);
        let saved = self.save(id, season).await?;
        let highlight = saved
            .highlights
            .into_iter()
            .find(|h| h.id == highlight_id)
            .ok_or_else(|| RepoError::Database("Highlight missing after save".to_string()))?;
        Ok((highlight, old))
    }
}

fn member_index(members: &[BoardMember], member_id: &str) -> RepoResult<usize> {
    members
        .iter()
        .position(|m| m.id == member_id)
        .ok_or_else(|| RepoError::NotFound(format!("Board member {member_id} not found")))
}

fn highlight_index(highlights: &[Highlight], highlight_id: &str) -> RepoResult<usize> {
    highlights
        .iter()
        .position(|h| h.id == highlight_id)
        .ok_or_else(|| RepoError::NotFound(format!("Highlight {highlight_id} not found")))
}
