//! Season embedded-array tests
//!
//! Board members and highlights are ordered inside the season document;
//! the whole document is the atomic unit. Covers the leader singleton and
//! the member cap.

use cms_server::db::DbService;
use cms_server::db::models::{
    BoardMember, BoardMemberCreate, BoardMemberUpdate, HighlightCreate, Season, SeasonCreate,
};
use cms_server::db::repository::{RepoError, SeasonRepository};

fn member(name: &str, leader: bool) -> BoardMemberCreate {
    BoardMemberCreate {
        name: name.to_string(),
        position: "Member".to_string(),
        is_leader: Some(leader),
        bio: None,
        profile_url: None,
    }
}

fn highlight(title: &str) -> HighlightCreate {
    HighlightCreate { title: title.to_string(), url: None, description: None }
}

fn season_payload(year: &str) -> SeasonCreate {
    SeasonCreate {
        academic_year: year.to_string(),
        theme: "Growth".to_string(),
        description: None,
        badge_color: None,
        is_active: None,
        board_members: Vec::new(),
        highlights: Vec::new(),
    }
}

async fn repo() -> SeasonRepository {
    let db = DbService::memory().await.unwrap();
    SeasonRepository::new(db.db)
}

fn key(season: &Season) -> String {
    season.id.as_ref().unwrap().id.to_string()
}

fn member_names(members: &[BoardMember]) -> Vec<String> {
    members.iter().map(|m| m.name.clone()).collect()
}

fn assert_dense_orders(orders: Vec<i64>) {
    let expected: Vec<i64> = (0..orders.len() as i64).collect();
    assert_eq!(orders, expected);
}

#[tokio::test]
async fn seasons_append_and_duplicate_year_rejected() {
    let repo = repo().await;
    let first = repo.create(season_payload("2023-2024")).await.unwrap();
    let second = repo.create(season_payload("2024-2025")).await.unwrap();
    assert_eq!(first.sort_order, 0);
    assert_eq!(second.sort_order, 1);

    assert!(matches!(
        repo.create(season_payload("2023-2024")).await,
        Err(RepoError::Duplicate(_))
    ));
}

#[tokio::test]
async fn inline_members_keep_payload_positions_and_single_leader() {
    let repo = repo().await;
    let mut payload = season_payload("2023-2024");
    // two leaders in the payload: the first one wins
    payload.board_members = vec![member("ana", true), member("bo", true), member("cy", false)];
    payload.highlights = vec![highlight("first win"), highlight("second win")];

    let season = repo.create(payload).await.unwrap();

    assert_dense_orders(season.board_members.iter().map(|m| m.sort_order).collect());
    assert_dense_orders(season.highlights.iter().map(|h| h.sort_order).collect());

    let leaders: Vec<&BoardMember> =
        season.board_members.iter().filter(|m| m.is_leader).collect();
    assert_eq!(leaders.len(), 1);
    assert_eq!(leaders[0].name, "ana");
}

#[tokio::test]
async fn added_member_is_appended() {
    let repo = repo().await;
    let season = repo.create(season_payload("2023-2024")).await.unwrap();
    let id = key(&season);

    repo.add_member(&id, member("ana", false)).await.unwrap();
    let second = repo.add_member(&id, member("bo", false)).await.unwrap();
    assert_eq!(second.sort_order, 1);
}

#[tokio::test]
async fn member_cap_is_enforced() {
    let repo = repo().await;
    let season = repo.create(season_payload("2023-2024")).await.unwrap();
    let id = key(&season);

    for i in 0..10 {
        repo.add_member(&id, member(&format!("m{i}"), false)).await.unwrap();
    }
    assert!(matches!(
        repo.add_member(&id, member("overflow", false)).await,
        Err(RepoError::Validation(_))
    ));
}

#[tokio::test]
async fn set_leader_clears_all_other_members() {
    let repo = repo().await;
    let mut payload = season_payload("2023-2024");
    payload.board_members = vec![member("ana", true), member("bo", false)];
    let season = repo.create(payload).await.unwrap();
    let id = key(&season);
    let bo_id = season.board_members[1].id.clone();

    let updated = repo.set_leader(&id, &bo_id).await.unwrap();

    let flags: Vec<bool> = updated.board_members.iter().map(|m| m.is_leader).collect();
    assert_eq!(flags, vec![false, true]);
    assert_eq!(updated.board_members[1].position, "Team Leader");
    // array ordering unaffected
    assert_eq!(member_names(&updated.board_members), vec!["ana", "bo"]);
}

#[tokio::test]
async fn promoting_via_update_also_demotes_the_rest() {
    let repo = repo().await;
    let mut payload = season_payload("2023-2024");
    payload.board_members = vec![member("ana", true), member("bo", false)];
    let season = repo.create(payload).await.unwrap();
    let id = key(&season);
    let bo_id = season.board_members[1].id.clone();

    let update = BoardMemberUpdate {
        name: None,
        position: None,
        is_leader: Some(true),
        bio: None,
        profile_url: None,
    };
    let bo = repo.update_member(&id, &bo_id, update).await.unwrap();
    assert!(bo.is_leader);
    assert_eq!(bo.position, "Team Leader");

    let season = repo.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(
        season.board_members.iter().filter(|m| m.is_leader).count(),
        1
    );
}

#[tokio::test]
async fn removing_a_member_compacts_the_array() {
    let repo = repo().await;
    let mut payload = season_payload("2023-2024");
    payload.board_members = vec![member("ana", false), member("bo", false), member("cy", false)];
    let season = repo.create(payload).await.unwrap();
    let id = key(&season);
    let bo_id = season.board_members[1].id.clone();

    let removed = repo.remove_member(&id, &bo_id).await.unwrap();
    assert_eq!(removed.name, "bo");

    let season = repo.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(member_names(&season.board_members), vec!["ana", "cy"]);
    assert_dense_orders(season.board_members.iter().map(|m| m.sort_order).collect());
}

#[tokio::test]
async fn moving_a_member_shifts_only_the_range() {
    let repo = repo().await;
    let mut payload = season_payload("2023-2024");
    payload.board_members = vec![
        member("ana", false),
        member("bo", false),
        member("cy", false),
        member("di", false),
    ];
    let season = repo.create(payload).await.unwrap();
    let id = key(&season);
    let di_id = season.board_members[3].id.clone();

    let members = repo.move_member(&id, &di_id, 0).await.unwrap();
    assert_eq!(member_names(&members), vec!["di", "ana", "bo", "cy"]);

    // out-of-range target is rejected, array untouched
    assert!(matches!(
        repo.move_member(&id, &di_id, 4).await,
        Err(RepoError::Validation(_))
    ));
    let season = repo.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(member_names(&season.board_members), vec!["di", "ana", "bo", "cy"]);
}

#[tokio::test]
async fn highlight_removal_and_moves_mirror_members() {
    let repo = repo().await;
    let mut payload = season_payload("2023-2024");
    payload.highlights = vec![highlight("a"), highlight("b"), highlight("c")];
    let season = repo.create(payload).await.unwrap();
    let id = key(&season);
    let b_id = season.highlights[1].id.clone();

    repo.remove_highlight(&id, &b_id).await.unwrap();
    let season = repo.find_by_id(&id).await.unwrap().unwrap();
    let titles: Vec<&str> = season.highlights.iter().map(|h| h.title.as_str()).collect();
    assert_eq!(titles, vec!["a", "c"]);
    assert_dense_orders(season.highlights.iter().map(|h| h.sort_order).collect());

    let c_id = season.highlights[1].id.clone();
    let highlights = repo.move_highlight(&id, &c_id, 0).await.unwrap();
    let titles: Vec<&str> = highlights.iter().map(|h| h.title.as_str()).collect();
    assert_eq!(titles, vec!["c", "a"]);
}

#[tokio::test]
async fn unknown_member_is_not_found() {
    let repo = repo().await;
    let season = repo.create(season_payload("2023-2024")).await.unwrap();
    assert!(matches!(
        repo.remove_member(&key(&season), "missing").await,
        Err(RepoError::NotFound(_))
    ));
}
