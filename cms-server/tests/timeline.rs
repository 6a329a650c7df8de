//! Timeline partition tests
//!
//! Phases are ordered per section: operations in one section must never
//! disturb another section's sequence.

use cms_server::db::DbService;
use cms_server::db::models::{TimelinePhase, TimelinePhaseCreate, TimelineSection, TimelineSectionCreate};
use cms_server::db::repository::{RepoError, TimelineRepository};

fn section_payload(title: &str) -> TimelineSectionCreate {
    TimelineSectionCreate {
        title: title.to_string(),
        subtitle: None,
        background_color: None,
        line_color: None,
        node_color: None,
        text_color: None,
        is_active: None,
    }
}

fn phase_payload(headline: &str, section: &str) -> TimelinePhaseCreate {
    TimelinePhaseCreate {
        year: "2024".to_string(),
        headline: headline.to_string(),
        description: "a milestone".to_string(),
        image_url: None,
        image_alt: None,
        background_color: None,
        text_color: None,
        accent_color: None,
        position: None,
        is_active: None,
        section: section.to_string(),
        expandable: None,
    }
}

async fn repo() -> TimelineRepository {
    let db = DbService::memory().await.unwrap();
    TimelineRepository::new(db.db)
}

fn key(section: &TimelineSection) -> String {
    section.id.as_ref().unwrap().id.to_string()
}

fn phase_key(phase: &TimelinePhase) -> String {
    phase.id.as_ref().unwrap().id.to_string()
}

fn headlines(phases: &[TimelinePhase]) -> Vec<String> {
    phases.iter().map(|p| p.headline.clone()).collect()
}

#[tokio::test]
async fn phases_are_ordered_per_section() {
    let repo = repo().await;
    let journey = repo.create_section(section_payload("Our Journey")).await.unwrap();
    let future = repo.create_section(section_payload("The Future")).await.unwrap();

    let j = key(&journey);
    let f = key(&future);

    let j0 = repo.create_phase(phase_payload("founded", &j)).await.unwrap();
    let _j1 = repo.create_phase(phase_payload("first event", &j)).await.unwrap();
    let f0 = repo.create_phase(phase_payload("expansion", &f)).await.unwrap();

    // each section starts its own dense sequence at zero
    assert_eq!(j0.sort_order, 0);
    assert_eq!(f0.sort_order, 0);

    let j_phases = repo.find_section_phases(&j, false).await.unwrap();
    assert_eq!(headlines(&j_phases), vec!["founded", "first event"]);
}

#[tokio::test]
async fn deleting_a_phase_compacts_only_its_section() {
    let repo = repo().await;
    let journey = repo.create_section(section_payload("Our Journey")).await.unwrap();
    let future = repo.create_section(section_payload("The Future")).await.unwrap();
    let j = key(&journey);
    let f = key(&future);

    let j0 = repo.create_phase(phase_payload("j0", &j)).await.unwrap();
    let _j1 = repo.create_phase(phase_payload("j1", &j)).await.unwrap();
    let _f0 = repo.create_phase(phase_payload("f0", &f)).await.unwrap();
    let f1 = repo.create_phase(phase_payload("f1", &f)).await.unwrap();

    repo.delete_phase(&phase_key(&j0)).await.unwrap();

    let j_phases = repo.find_section_phases(&j, false).await.unwrap();
    assert_eq!(headlines(&j_phases), vec!["j1"]);
    assert_eq!(j_phases[0].sort_order, 0);

    // the other section's sequence is untouched
    let f_phases = repo.find_section_phases(&f, false).await.unwrap();
    assert_eq!(headlines(&f_phases), vec!["f0", "f1"]);
    assert_eq!(f1.sort_order, 1);
}

#[tokio::test]
async fn phase_toggle_parks_and_reappends_within_its_section() {
    let repo = repo().await;
    let journey = repo.create_section(section_payload("Our Journey")).await.unwrap();
    let j = key(&journey);

    let p0 = repo.create_phase(phase_payload("p0", &j)).await.unwrap();
    let _p1 = repo.create_phase(phase_payload("p1", &j)).await.unwrap();
    let _p2 = repo.create_phase(phase_payload("p2", &j)).await.unwrap();

    repo.toggle_phase(&phase_key(&p0)).await.unwrap();
    let active = repo.find_section_phases(&j, false).await.unwrap();
    assert_eq!(headlines(&active), vec!["p1", "p2"]);
    assert_eq!(
        active.iter().map(|p| p.sort_order).collect::<Vec<_>>(),
        vec![0, 1]
    );

    repo.toggle_phase(&phase_key(&p0)).await.unwrap();
    let active = repo.find_section_phases(&j, false).await.unwrap();
    assert_eq!(headlines(&active), vec!["p1", "p2", "p0"]);
}

#[tokio::test]
async fn phase_reorder_is_scoped_to_the_section() {
    let repo = repo().await;
    let journey = repo.create_section(section_payload("Our Journey")).await.unwrap();
    let j = key(&journey);

    let p0 = repo.create_phase(phase_payload("p0", &j)).await.unwrap();
    let _p1 = repo.create_phase(phase_payload("p1", &j)).await.unwrap();

    // the section only holds two phases: target 2 is out of range even
    // though other sections exist
    assert!(matches!(
        repo.reorder_phase(&phase_key(&p0), 2).await,
        Err(RepoError::Validation(_))
    ));

    repo.reorder_phase(&phase_key(&p0), 1).await.unwrap();
    let phases = repo.find_section_phases(&j, false).await.unwrap();
    assert_eq!(headlines(&phases), vec!["p1", "p0"]);
}

#[tokio::test]
async fn deleting_a_section_removes_its_phases_and_compacts_sections() {
    let repo = repo().await;
    let s0 = repo.create_section(section_payload("s0")).await.unwrap();
    let s1 = repo.create_section(section_payload("s1")).await.unwrap();
    let s2 = repo.create_section(section_payload("s2")).await.unwrap();

    let p = repo.create_phase(phase_payload("orphan-to-be", &key(&s1))).await.unwrap();

    repo.delete_section(&key(&s1)).await.unwrap();

    let sections = repo.find_all_sections().await.unwrap();
    let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["s0", "s2"]);
    assert_eq!(
        sections.iter().map(|s| s.sort_order).collect::<Vec<_>>(),
        vec![0, 1]
    );
    assert_eq!(s0.sort_order, 0);
    assert_eq!(s2.sort_order, 2, "pre-delete order");

    // the phase went with its section
    assert!(repo.find_phase(&phase_key(&p)).await.unwrap().is_none());
}

#[tokio::test]
async fn creating_a_phase_for_a_missing_section_is_not_found() {
    let repo = repo().await;
    assert!(matches!(
        repo.create_phase(phase_payload("lost", "missing-section")).await,
        Err(RepoError::NotFound(_))
    ));
}

#[tokio::test]
async fn public_view_combines_active_sections_and_phases() {
    let repo = repo().await;
    let s = repo.create_section(section_payload("Our Journey")).await.unwrap();
    let sid = key(&s);
    repo.create_phase(phase_payload("p0", &sid)).await.unwrap();
    let p1 = repo.create_phase(phase_payload("p1", &sid)).await.unwrap();
    repo.toggle_phase(&phase_key(&p1)).await.unwrap();

    let view = repo.find_view().await.unwrap();
    assert_eq!(view.sections.len(), 1);
    // parked phases are not part of the public view
    assert_eq!(headlines(&view.phases), vec!["p0"]);
}
