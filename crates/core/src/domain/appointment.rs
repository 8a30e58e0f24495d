// Appointment Domain Model

use super::error::{DomainError, Result};
use super::patient::PatientId;
use super::psychologist::PsychologistId;
use chrono::{NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};

pub type AppointmentId = i64;

/// Appointment Status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Booked,
    Cancelled,
    Completed,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Booked => "BOOKED",
            AppointmentStatus::Cancelled => "CANCELLED",
            AppointmentStatus::Completed => "COMPLETED",
        }
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AppointmentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "BOOKED" => Ok(AppointmentStatus::Booked),
            "CANCELLED" => Ok(AppointmentStatus::Cancelled),
            "COMPLETED" => Ok(AppointmentStatus::Completed),
            other => Err(DomainError::ValidationError(format!(
                "Unknown appointment status: {}",
                other
            ))),
        }
    }
}

/// Half-open interval `[start, end)`, truncated to whole seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimeSlot {
    /// Validate a future slot relative to `now`
    ///
    /// The past check uses the requested start as given; the stored slot is
    /// truncated to whole seconds.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime, now: NaiveDateTime) -> Result<Self> {
        if start < now {
            return Err(DomainError::ValidationError(
                "startTime must be in the future".to_string(),
            ));
        }

        let start = start.trunc_subsecs(0);
        let end = end.trunc_subsecs(0);
        if start >= end {
            return Err(DomainError::ValidationError(
                "startTime must be before endTime".to_string(),
            ));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }
}

/// Appointment Entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: AppointmentId,
    pub psychologist_id: PsychologistId,
    pub patient_id: PatientId,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub status: AppointmentStatus,
}

impl Appointment {
    pub fn involves_psychologist(&self, psychologist_id: PsychologistId) -> bool {
        self.psychologist_id == psychologist_id
    }

    pub fn involves_patient(&self, patient_id: PatientId) -> bool {
        self.patient_id == patient_id
    }

    /// BOOKED -> CANCELLED
    pub fn cancel(&mut self) -> Result<()> {
        self.transition(AppointmentStatus::Cancelled)
    }

    /// BOOKED -> COMPLETED
    pub fn complete(&mut self) -> Result<()> {
        self.transition(AppointmentStatus::Completed)
    }

    fn transition(&mut self, to: AppointmentStatus) -> Result<()> {
        if self.status != AppointmentStatus::Booked {
            return Err(DomainError::InvalidStatusTransition {
                from: self.status.to_string(),
                to: to.to_string(),
            });
        }
        self.status = to;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub psychologist_id: PsychologistId,
    pub patient_id: PatientId,
    pub slot: TimeSlot,
}

/// Appointment joined with the names of both parties
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentView {
    pub id: AppointmentId,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub status: AppointmentStatus,
    pub patient_id: PatientId,
    pub patient_first_name: String,
    pub patient_last_name: String,
    pub psychologist_id: PsychologistId,
    pub psychologist_first_name: String,
    pub psychologist_last_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2030, 1, 15)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn booked() -> Appointment {
        Appointment {
            id: 1,
            psychologist_id: 10,
            patient_id: 20,
            start_time: at(9, 0),
            end_time: at(10, 0),
            status: AppointmentStatus::Booked,
        }
    }

    #[test]
    fn test_slot_rejects_inverted_and_empty() {
        let now = at(8, 0);
        assert!(TimeSlot::new(at(10, 0), at(9, 0), now).is_err());
        assert!(TimeSlot::new(at(9, 0), at(9, 0), now).is_err());
    }

    #[test]
    fn test_slot_rejects_past_start() {
        let now = at(9, 30);
        let err = TimeSlot::new(at(9, 0), at(10, 0), now).unwrap_err();
        assert!(err.to_string().contains("future"));
    }

    #[test]
    fn test_slot_accepts_start_later_in_same_second() {
        let now = at(9, 0) + Duration::milliseconds(600);
        let start = at(9, 0) + Duration::milliseconds(900);

        let slot = TimeSlot::new(start, at(10, 0), now).unwrap();
        assert_eq!(slot.start(), at(9, 0));

        let earlier = at(9, 0) + Duration::milliseconds(300);
        assert!(TimeSlot::new(earlier, at(10, 0), now).is_err());
    }

    #[test]
    fn test_slot_truncates_subseconds() {
        let start = at(9, 0) + Duration::milliseconds(750);
        let slot = TimeSlot::new(start, at(10, 0), at(8, 0)).unwrap();
        assert_eq!(slot.start(), at(9, 0));
    }

    #[test]
    fn test_cancel_only_from_booked() {
        let mut appointment = booked();
        assert!(appointment.cancel().is_ok());
        assert_eq!(appointment.status, AppointmentStatus::Cancelled);

        let err = appointment.complete().unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidStatusTransition {
                from: "CANCELLED".to_string(),
                to: "COMPLETED".to_string(),
            }
        );
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(
            "booked".parse::<AppointmentStatus>().unwrap(),
            AppointmentStatus::Booked
        );
        assert!("pending".parse::<AppointmentStatus>().is_err());
    }
}
