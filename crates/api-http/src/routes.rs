//! Route table

use crate::handler;
use crate::state::SharedState;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the full application router
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(handler::health))
        // auth
        .route("/auth/register/patient", post(handler::register_patient))
        .route(
            "/auth/register/psychologist",
            post(handler::register_psychologist),
        )
        .route("/auth/login", post(handler::login))
        .route("/auth/logout", post(handler::logout))
        .route("/auth/me", get(handler::me))
        // mood
        .route("/mood", post(handler::submit_mood).get(handler::mood_history))
        .route("/mood/today", get(handler::today_mood))
        // journal
        .route(
            "/journal",
            get(handler::list_journal).post(handler::create_journal),
        )
        .route("/journal/shared", get(handler::shared_journal))
        .route(
            "/journal/{id}",
            get(handler::get_journal)
                .put(handler::update_journal)
                .delete(handler::delete_journal),
        )
        .route(
            "/journal/{id}/share",
            put(handler::share_journal).delete(handler::unshare_journal),
        )
        // psychologist workspace
        .route(
            "/psychologists/me/patients/unassigned",
            get(handler::unassigned_patients),
        )
        .route(
            "/psychologists/me/patients/assigned",
            get(handler::assigned_patients),
        )
        .route(
            "/psychologists/me/patients/{patient_id}",
            post(handler::assign_patient),
        )
        .route(
            "/psychologists/me/patients/{patient_id}/moods",
            get(handler::patient_moods),
        )
        .route(
            "/psychologists/me/appointments",
            get(handler::psychologist_appointments).post(handler::book_appointment),
        )
        .route(
            "/psychologists/me/appointments/{id}/cancel",
            post(handler::psychologist_cancel_appointment),
        )
        .route(
            "/psychologists/me/appointments/{id}/complete",
            post(handler::complete_appointment),
        )
        .route("/appointments", get(handler::booked_appointments))
        // patient workspace
        .route(
            "/patients/me/appointments",
            get(handler::patient_appointments),
        )
        .route(
            "/patients/me/appointments/{id}/cancel",
            post(handler::patient_cancel_appointment),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
