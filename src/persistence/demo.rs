//! Demo dataset: one multi-chronic-condition patient
//!
//! Dates are computed relative to `now` so the scheduled appointments are
//! always upcoming.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::domain::{
    Appointment, AppointmentStatus, CareGap, CareGapSeverity, Medication, MedicationStatus,
    Patient, PatientStatus,
};

pub const DEMO_PATIENT_ID: &str = "patient-001";

/// Seed records for the in-memory store
#[derive(Debug, Clone, Default)]
pub struct DemoDataset {
    pub patients: Vec<Patient>,
    pub medications: Vec<Medication>,
    pub appointments: Vec<Appointment>,
    pub care_gaps: Vec<CareGap>,
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn dataset(now: DateTime<Utc>) -> DemoDataset {
    let today = now.date_naive();

    let patient = Patient {
        id: DEMO_PATIENT_ID.to_string(),
        first_name: "Eleanor".to_string(),
        last_name: "Thompson".to_string(),
        date_of_birth: date(1952, 3, 15),
        gender: "female".to_string(),
        email: Some("eleanor.thompson@email.com".to_string()),
        phone: Some("+1-555-0123".to_string()),
        address: Some("123 Oak Street, Springfield, IL 62701".to_string()),
        emergency_contact: Some("Michael Thompson (Son): +1-555-0124".to_string()),
        status: PatientStatus::Active,
        conditions: strings(&[
            "Type 2 Diabetes Mellitus",
            "Essential Hypertension",
            "Chronic Heart Failure (Stage B)",
            "Major Depressive Disorder",
            "Osteoarthritis (Bilateral Knees)",
        ]),
        allergies: strings(&["Penicillin", "Sulfa drugs"]),
        created_at: now,
    };

    let medication = |id: &str,
                      name: &str,
                      dosage: &str,
                      frequency: &str,
                      prescriber: &str,
                      specialty: &str,
                      start_date: NaiveDate,
                      instructions: &str,
                      side_effects: &[&str],
                      interactions: &[&str],
                      refills_remaining: u32| Medication {
        id: id.to_string(),
        patient_id: DEMO_PATIENT_ID.to_string(),
        name: name.to_string(),
        dosage: dosage.to_string(),
        frequency: frequency.to_string(),
        prescriber: prescriber.to_string(),
        specialty: specialty.to_string(),
        start_date,
        end_date: None,
        status: MedicationStatus::Active,
        instructions: Some(instructions.to_string()),
        side_effects: strings(side_effects),
        interactions: strings(interactions),
        refills_remaining,
    };

    let medications = vec![
        medication(
            "med-001",
            "Metformin",
            "1000mg",
            "Twice daily with meals",
            "Dr. Sarah Chen",
            "Endocrinology",
            date(2020, 1, 15),
            "Take with food to reduce stomach upset",
            &["Nausea", "Diarrhea"],
            &["May interact with contrast dye"],
            3,
        ),
        medication(
            "med-002",
            "Lisinopril",
            "20mg",
            "Once daily in morning",
            "Dr. James Wilson",
            "Cardiology",
            date(2019, 6, 1),
            "Monitor for dry cough",
            &["Dry cough", "Dizziness"],
            &["Potassium supplements may cause hyperkalemia"],
            2,
        ),
        medication(
            "med-003",
            "Carvedilol",
            "12.5mg",
            "Twice daily",
            "Dr. James Wilson",
            "Cardiology",
            date(2021, 3, 10),
            "Take with food, do not stop suddenly",
            &["Fatigue", "Dizziness", "Weight gain"],
            &["May mask hypoglycemia symptoms in diabetics"],
            1,
        ),
        medication(
            "med-004",
            "Sertraline",
            "100mg",
            "Once daily in morning",
            "Dr. Emily Rodriguez",
            "Psychiatry",
            date(2022, 8, 20),
            "May take 4-6 weeks for full effect",
            &["Nausea", "Insomnia", "Sexual dysfunction"],
            &["Avoid MAOIs, caution with NSAIDs"],
            4,
        ),
        medication(
            "med-005",
            "Furosemide",
            "40mg",
            "Once daily in morning",
            "Dr. James Wilson",
            "Cardiology",
            date(2023, 1, 5),
            "Take early in day to avoid nighttime urination",
            &["Frequent urination", "Electrolyte imbalance"],
            &["May increase lithium levels, potassium loss with steroids"],
            2,
        ),
    ];

    let appointment = |id: &str,
                       provider: &str,
                       specialty: &str,
                       facility: &str,
                       offset_days: i64,
                       duration_minutes: u32,
                       status: AppointmentStatus,
                       reason: &str,
                       telehealth: bool| Appointment {
        id: id.to_string(),
        patient_id: DEMO_PATIENT_ID.to_string(),
        provider_name: provider.to_string(),
        specialty: specialty.to_string(),
        facility: facility.to_string(),
        appointment_date: now + Duration::days(offset_days),
        duration_minutes,
        status,
        reason: reason.to_string(),
        notes: None,
        telehealth,
    };

    let mut annual_visit = appointment(
        "apt-004",
        "Dr. Michael Park",
        "Primary Care",
        "Springfield Family Medicine",
        -30,
        30,
        AppointmentStatus::Completed,
        "Annual wellness visit",
        false,
    );
    annual_visit.notes =
        Some("Blood pressure slightly elevated. Referred to cardiology.".to_string());

    let appointments = vec![
        appointment(
            "apt-001",
            "Dr. Sarah Chen",
            "Endocrinology",
            "Springfield Diabetes Center",
            7,
            30,
            AppointmentStatus::Scheduled,
            "Quarterly A1C check and diabetes management review",
            false,
        ),
        appointment(
            "apt-002",
            "Dr. James Wilson",
            "Cardiology",
            "Heart Health Associates",
            14,
            45,
            AppointmentStatus::Scheduled,
            "Heart failure monitoring and medication adjustment",
            true,
        ),
        appointment(
            "apt-003",
            "Dr. Emily Rodriguez",
            "Psychiatry",
            "Behavioral Health Center",
            21,
            30,
            AppointmentStatus::Scheduled,
            "Depression follow-up and medication review",
            true,
        ),
        annual_visit,
    ];

    let gap = |id: &str,
               title: &str,
               description: &str,
               severity: CareGapSeverity,
               category: &str,
               guideline: &str,
               action: &str,
               due_in_days: i64| CareGap {
        id: id.to_string(),
        patient_id: DEMO_PATIENT_ID.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        severity,
        category: category.to_string(),
        guideline_reference: guideline.to_string(),
        recommended_action: action.to_string(),
        due_date: Some(today + Duration::days(due_in_days)),
        detected_at: now,
        resolved: false,
        resolved_at: None,
    };

    let care_gaps = vec![
        gap(
            "gap-001",
            "Overdue Diabetic Eye Exam",
            "Last retinal exam was 18 months ago. HEDIS guidelines recommend annual diabetic retinopathy screening.",
            CareGapSeverity::High,
            "Preventive Care",
            "HEDIS Comprehensive Diabetes Care - Eye Exam",
            "Schedule dilated eye exam with ophthalmologist within 30 days",
            30,
        ),
        gap(
            "gap-002",
            "Missing Foot Exam",
            "No documented foot exam in the past year. Diabetic patients require annual comprehensive foot exams.",
            CareGapSeverity::Medium,
            "Diabetes Management",
            "ADA Standards of Medical Care - Comprehensive Foot Exam",
            "Request foot exam at next endocrinology appointment",
            7,
        ),
        gap(
            "gap-003",
            "Depression Screening Due",
            "PHQ-9 assessment not completed in past 6 months. Regular monitoring recommended for patients on antidepressants.",
            CareGapSeverity::Medium,
            "Mental Health",
            "USPSTF Depression Screening Recommendation",
            "Complete PHQ-9 questionnaire before next psychiatry visit",
            14,
        ),
        gap(
            "gap-004",
            "Flu Vaccination Needed",
            "No flu vaccination record for current season. Strongly recommended for patients with heart failure and diabetes.",
            CareGapSeverity::High,
            "Immunization",
            "CDC ACIP Influenza Vaccination Recommendations",
            "Schedule flu shot at pharmacy or next doctor visit",
            14,
        ),
    ];

    DemoDataset {
        patients: vec![patient],
        medications,
        appointments,
        care_gaps,
    }
}
