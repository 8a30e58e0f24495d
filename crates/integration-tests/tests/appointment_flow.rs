//! Booking rules: assignment, overlap detection and status transitions

mod common;

use common::{at, Harness};
use mindful_core::application::appointment::BookAppointmentRequest;
use mindful_core::domain::{AppointmentStatus, DomainError, Principal, Role};
use mindful_core::AppError;

fn slot(patient_id: i64, day: u32, from: (u32, u32), to: (u32, u32)) -> BookAppointmentRequest {
    BookAppointmentRequest {
        patient_id,
        start_time: Some(at(day, from.0, from.1)),
        end_time: Some(at(day, to.0, to.1)),
    }
}

fn as_patient(id: i64) -> Principal {
    Principal {
        user_id: id,
        username: "alex".to_string(),
        role: Role::Patient,
    }
}

fn as_psychologist(id: i64) -> Principal {
    Principal {
        user_id: id,
        username: "dr.kowalski".to_string(),
        role: Role::Psychologist,
    }
}

#[tokio::test]
async fn test_book_for_assigned_patient() {
    let h = Harness::new().await;
    let (psy, pat) = h.pair("dr.kowalski", "alex").await;

    let appointment = h
        .appointments
        .book(psy, slot(pat, 15, (9, 0), (10, 0)))
        .await
        .unwrap();

    assert_eq!(appointment.status, AppointmentStatus::Booked);
    assert_eq!(appointment.psychologist_id, psy);
    assert_eq!(appointment.patient_id, pat);

    let mine = h.appointments.for_patient(pat).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].psychologist_last_name, "Kowalski");
}

#[tokio::test]
async fn test_cannot_book_unassigned_patient() {
    let h = Harness::new().await;
    let psy = h.register_psychologist("dr.kowalski").await;
    let pat = h.register_patient("alex").await;

    let err = h
        .appointments
        .book(psy, slot(pat, 15, (9, 0), (10, 0)))
        .await
        .unwrap_err();

    match err {
        AppError::Forbidden(msg) => assert!(msg.contains(&pat.to_string())),
        other => panic!("expected Forbidden, got {:?}", other),
    }
}

#[tokio::test]
async fn test_overlapping_slot_rejected() {
    let h = Harness::new().await;
    let (psy, pat) = h.pair("dr.kowalski", "alex").await;

    h.appointments
        .book(psy, slot(pat, 15, (9, 0), (10, 0)))
        .await
        .unwrap();

    for (from, to) in [((9, 30), (10, 30)), ((8, 30), (9, 1)), ((9, 15), (9, 45))] {
        let err = h
            .appointments
            .book(psy, slot(pat, 15, from, to))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)), "{:?}-{:?}", from, to);
    }

    assert_eq!(h.appointments.for_patient(pat).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_touching_slots_allowed() {
    let h = Harness::new().await;
    let (psy, pat) = h.pair("dr.kowalski", "alex").await;

    h.appointments
        .book(psy, slot(pat, 15, (9, 0), (10, 0)))
        .await
        .unwrap();
    h.appointments
        .book(psy, slot(pat, 15, (10, 0), (11, 0)))
        .await
        .unwrap();
    h.appointments
        .book(psy, slot(pat, 15, (8, 0), (9, 0)))
        .await
        .unwrap();

    let booked = h.appointments.booked_for_psychologist(psy).await.unwrap();
    assert_eq!(booked.len(), 3);
}

#[tokio::test]
async fn test_other_psychologist_schedule_is_independent() {
    let h = Harness::new().await;
    let (psy_a, pat_a) = h.pair("dr.a", "alex").await;
    let (psy_b, pat_b) = h.pair("dr.b", "blake").await;

    h.appointments
        .book(psy_a, slot(pat_a, 15, (9, 0), (10, 0)))
        .await
        .unwrap();
    h.appointments
        .book(psy_b, slot(pat_b, 15, (9, 0), (10, 0)))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_cancelled_slot_can_be_rebooked() {
    let h = Harness::new().await;
    let (psy, pat) = h.pair("dr.kowalski", "alex").await;

    let first = h
        .appointments
        .book(psy, slot(pat, 15, (9, 0), (10, 0)))
        .await
        .unwrap();
    h.appointments
        .cancel(&as_patient(pat), first.id)
        .await
        .unwrap();

    h.appointments
        .book(psy, slot(pat, 15, (9, 0), (10, 0)))
        .await
        .unwrap();

    let cancelled = h
        .appointments
        .for_psychologist(psy, Some(AppointmentStatus::Cancelled))
        .await
        .unwrap();
    assert_eq!(cancelled.len(), 1);
    assert_eq!(cancelled[0].id, first.id);

    let all = h.appointments.for_psychologist(psy, None).await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn test_past_and_inverted_slots_rejected() {
    let h = Harness::new().await;
    let (psy, pat) = h.pair("dr.kowalski", "alex").await;

    // Clock is at 2030-01-10 08:00
    let err = h
        .appointments
        .book(psy, slot(pat, 9, (9, 0), (10, 0)))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Domain(DomainError::ValidationError(_))));

    let err = h
        .appointments
        .book(psy, slot(pat, 15, (10, 0), (9, 0)))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Domain(DomainError::ValidationError(_))));

    let err = h
        .appointments
        .book(
            psy,
            BookAppointmentRequest {
                patient_id: pat,
                start_time: Some(at(15, 9, 0)),
                end_time: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_status_transitions() {
    let h = Harness::new().await;
    let (psy, pat) = h.pair("dr.kowalski", "alex").await;

    let held = h
        .appointments
        .book(psy, slot(pat, 15, (9, 0), (10, 0)))
        .await
        .unwrap();
    let completed = h.appointments.complete(psy, held.id).await.unwrap();
    assert_eq!(completed.status, AppointmentStatus::Completed);

    let err = h
        .appointments
        .cancel(&as_psychologist(psy), held.id)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Domain(DomainError::InvalidStatusTransition { .. })
    ));

    let dropped = h
        .appointments
        .book(psy, slot(pat, 16, (9, 0), (10, 0)))
        .await
        .unwrap();
    h.appointments
        .cancel(&as_psychologist(psy), dropped.id)
        .await
        .unwrap();
    let err = h.appointments.complete(psy, dropped.id).await.unwrap_err();
    assert!(matches!(
        err,
        AppError::Domain(DomainError::InvalidStatusTransition { .. })
    ));
}

#[tokio::test]
async fn test_only_parties_may_cancel() {
    let h = Harness::new().await;
    let (psy, pat) = h.pair("dr.kowalski", "alex").await;
    let outsider = h.register_patient("blake").await;
    let other_psy = h.register_psychologist("dr.other").await;

    let appointment = h
        .appointments
        .book(psy, slot(pat, 15, (9, 0), (10, 0)))
        .await
        .unwrap();

    let err = h
        .appointments
        .cancel(&as_patient(outsider), appointment.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let err = h
        .appointments
        .complete(other_psy, appointment.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let err = h
        .appointments
        .cancel(&as_patient(pat), 9999)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_concurrent_bookings_for_same_slot() {
    let h = Harness::new().await;
    let (psy, pat) = h.pair("dr.kowalski", "alex").await;

    let mut handles = Vec::new();
    for _ in 0..5 {
        let service = h.appointments.clone();
        handles.push(tokio::spawn(async move {
            service.book(psy, slot(pat, 15, (9, 0), (10, 0))).await
        }));
    }

    let mut booked = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => booked += 1,
            Err(AppError::Conflict(_)) => conflicts += 1,
            Err(other) => panic!("unexpected error: {:?}", other),
        }
    }

    assert_eq!(booked, 1);
    assert_eq!(conflicts, 4);
    assert_eq!(
        h.appointments
            .booked_for_psychologist(psy)
            .await
            .unwrap()
            .len(),
        1
    );
}
