//! Patient health summary

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Appointment, CareGap, Medication, Patient};

/// Active medications at or below this many refills are flagged
const LOW_REFILL_THRESHOLD: u32 = 1;

/// Dashboard view of a patient's current care
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthSummary {
    pub patient_id: String,
    pub overall_status: String,
    pub active_conditions: Vec<String>,
    pub active_medications: usize,
    pub upcoming_appointments: usize,
    pub open_care_gaps: usize,
    pub critical_alerts: Vec<String>,
    pub last_updated: DateTime<Utc>,
}

impl HealthSummary {
    /// Build a summary from raw store scans.
    ///
    /// Filters to active medications, upcoming appointments and unresolved
    /// gaps before counting.
    pub fn build(
        patient: &Patient,
        medications: &[Medication],
        appointments: &[Appointment],
        care_gaps: &[CareGap],
        now: DateTime<Utc>,
    ) -> Self {
        let active: Vec<&Medication> = medications.iter().filter(|m| m.is_active()).collect();
        let upcoming = appointments.iter().filter(|a| a.is_upcoming(now)).count();
        let open: Vec<&CareGap> = care_gaps.iter().filter(|g| !g.resolved).collect();

        let mut critical_alerts = Vec::new();

        let high_gaps = open.iter().filter(|g| g.severity.is_high_priority()).count();
        if high_gaps > 0 {
            critical_alerts.push(format!("{} high-priority care gaps need attention", high_gaps));
        }

        let low_refill = active
            .iter()
            .filter(|m| m.refills_remaining <= LOW_REFILL_THRESHOLD)
            .count();
        if low_refill > 0 {
            critical_alerts.push(format!("{} medications need refill soon", low_refill));
        }

        let overall_status = if critical_alerts.len() < 2 {
            "Stable - Active Monitoring"
        } else {
            "Needs Attention"
        };

        Self {
            patient_id: patient.id.clone(),
            overall_status: overall_status.to_string(),
            active_conditions: patient.conditions.clone(),
            active_medications: active.len(),
            upcoming_appointments: upcoming,
            open_care_gaps: open.len(),
            critical_alerts,
            last_updated: now,
        }
    }
}
