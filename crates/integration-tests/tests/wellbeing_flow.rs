//! Moods, journal sharing and psychologist/patient assignment

mod common;

use chrono::Duration;
use common::Harness;
use mindful_core::domain::{DomainError, JournalDraft};
use mindful_core::AppError;

fn draft(title: &str) -> JournalDraft {
    JournalDraft {
        title: title.to_string(),
        text: "Slept well, long walk in the afternoon.".to_string(),
        tags: Some("sleep,walk".to_string()),
    }
}

#[tokio::test]
async fn test_one_mood_per_day() {
    let h = Harness::new().await;
    let pat = h.register_patient("alex").await;

    let first = h.moods.submit_mood(pat, 7).await.unwrap();
    assert_eq!(first.value, 7);

    let err = h.moods.submit_mood(pat, 3).await.unwrap_err();
    match err {
        AppError::Conflict(msg) => assert!(msg.contains("2030-01-10"), "{}", msg),
        other => panic!("expected Conflict, got {:?}", other),
    }

    h.clock.advance(Duration::days(1));
    h.moods.submit_mood(pat, 4).await.unwrap();

    let history = h.moods.mood_history(pat).await.unwrap();
    let values: Vec<i32> = history.iter().map(|m| m.value).collect();
    assert_eq!(values, vec![7, 4]);
}

#[tokio::test]
async fn test_mood_value_bounds() {
    let h = Harness::new().await;
    let pat = h.register_patient("alex").await;

    for value in [0, 11, -1] {
        let err = h.moods.submit_mood(pat, value).await.unwrap_err();
        assert!(
            matches!(err, AppError::Domain(DomainError::InvalidMoodValue(v)) if v == value),
            "value {} should be rejected",
            value
        );
    }

    h.moods.submit_mood(pat, 1).await.unwrap();
    h.clock.advance(Duration::days(1));
    h.moods.submit_mood(pat, 10).await.unwrap();
}

#[tokio::test]
async fn test_today_mood() {
    let h = Harness::new().await;
    let pat = h.register_patient("alex").await;

    assert!(h.moods.today_mood(pat).await.unwrap().is_none());
    h.moods.submit_mood(pat, 6).await.unwrap();
    assert_eq!(h.moods.today_mood(pat).await.unwrap().unwrap().value, 6);

    h.clock.advance(Duration::days(1));
    assert!(h.moods.today_mood(pat).await.unwrap().is_none());
}

#[tokio::test]
async fn test_journal_crud() {
    let h = Harness::new().await;
    let pat = h.register_patient("alex").await;

    let entry = h.journals.create_entry(pat, draft("Monday")).await.unwrap();
    assert!(!entry.allow_psychologist);

    h.clock.advance(Duration::hours(2));
    let updated = h
        .journals
        .update_entry(pat, entry.id, draft("Monday, revised"))
        .await
        .unwrap();
    assert_eq!(updated.title, "Monday, revised");
    assert!(updated.date > entry.date);

    let listed = h.journals.list_entries(pat).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].title, "Monday, revised");

    h.journals.delete_entry(pat, entry.id).await.unwrap();
    let err = h.journals.get_entry(pat, entry.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_journal_entries_are_private_to_owner() {
    let h = Harness::new().await;
    let alex = h.register_patient("alex").await;
    let blake = h.register_patient("blake").await;

    let entry = h.journals.create_entry(alex, draft("Mine")).await.unwrap();

    let err = h.journals.get_entry(blake, entry.id).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let err = h
        .journals
        .update_entry(blake, entry.id, draft("Hijacked"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let err = h.journals.delete_entry(blake, entry.id).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    assert_eq!(h.journals.get_entry(alex, entry.id).await.unwrap().title, "Mine");
}

#[tokio::test]
async fn test_sharing_requires_assignment() {
    let h = Harness::new().await;
    let pat = h.register_patient("alex").await;
    let entry = h.journals.create_entry(pat, draft("Alone")).await.unwrap();

    let err = h.journals.share_entry(pat, entry.id).await.unwrap_err();
    match err {
        AppError::Validation(msg) => assert!(msg.contains("not assigned")),
        other => panic!("expected Validation, got {:?}", other),
    }
}

#[tokio::test]
async fn test_shared_entries_visible_to_own_psychologist_only() {
    let h = Harness::new().await;
    let (psy, pat) = h.pair("dr.kowalski", "alex").await;
    let other_psy = h.register_psychologist("dr.other").await;

    let shared = h.journals.create_entry(pat, draft("Shared")).await.unwrap();
    h.journals.create_entry(pat, draft("Private")).await.unwrap();
    h.journals.share_entry(pat, shared.id).await.unwrap();

    let visible = h.journals.shared_entries(psy).await.unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].title, "Shared");

    assert!(h.journals.shared_entries(other_psy).await.unwrap().is_empty());

    h.journals.unshare_entry(pat, shared.id).await.unwrap();
    assert!(h.journals.shared_entries(psy).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_assignment_is_exclusive() {
    let h = Harness::new().await;
    let (psy, pat) = h.pair("dr.kowalski", "alex").await;
    let other_psy = h.register_psychologist("dr.other").await;

    // Re-assigning to the same psychologist is fine
    h.patients.assign_patient(psy, pat).await.unwrap();

    let err = h.patients.assign_patient(other_psy, pat).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let assigned = h.patients.assigned_patients(psy).await.unwrap();
    assert_eq!(assigned.len(), 1);
    assert!(h.patients.unassigned_patients().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_patient_cannot_be_assigned() {
    let h = Harness::new().await;
    let psy = h.register_psychologist("dr.kowalski").await;

    let err = h.patients.assign_patient(psy, 999).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_psychologist_reads_moods_of_own_patient() {
    let h = Harness::new().await;
    let (psy, pat) = h.pair("dr.kowalski", "alex").await;
    let other_psy = h.register_psychologist("dr.other").await;
    h.moods.submit_mood(pat, 5).await.unwrap();

    let moods = h.patients.patient_moods(psy, pat).await.unwrap();
    assert_eq!(moods.len(), 1);

    let err = h.patients.patient_moods(other_psy, pat).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}
