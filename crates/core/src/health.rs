//! Sample patient record and the summaries derived from it.
//!
//! The record is illustrative: vitals are drawn from fixed-seed normal
//! distributions so every run shows the same chart, and labs, conditions
//! and medications are static. Alerts are plain threshold checks.

use crate::error::{Error, Result};
use chrono::{Months, NaiveDate};
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, f64::consts::TAU, fmt};

/// Systolic pressure above this raises an alert (mmHg).
pub const HIGH_SYSTOLIC: f64 = 140.0;
/// Diastolic reference line (mmHg).
pub const HIGH_DIASTOLIC: f64 = 90.0;
/// Resting heart rate above this is high (bpm).
pub const HIGH_HEART_RATE: f64 = 100.0;
/// Resting heart rate below this is low (bpm).
pub const LOW_HEART_RATE: f64 = 60.0;
/// Fasting blood sugar reference for pre-diabetes (mg/dL).
pub const PREDIABETES_SUGAR: f64 = 100.0;
/// Blood sugar above this raises an alert (mg/dL).
pub const DIABETES_SUGAR: f64 = 126.0;

const SAMPLE_SEED: u64 = 42;
const CHOLESTEROL_PANEL: [&str; 4] = ["Cholesterol", "HDL", "LDL", "Triglycerides"];

/// Demographics shown in the sidebar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    /// Display name.
    pub name: String,
    /// Age in years.
    pub age: u32,
    /// Gender as recorded.
    pub gender: String,
    /// ABO group and Rh factor, e.g. `A+`.
    pub blood_type: String,
    /// Height in centimetres.
    pub height_cm: u32,
    /// Weight in kilograms at intake.
    pub weight_kg: u32,
    /// Body mass index.
    pub bmi: f64,
}

/// One monthly vital-sign reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    /// Day the reading was taken.
    pub date: NaiveDate,
    /// Systolic blood pressure, mmHg.
    pub systolic: f64,
    /// Diastolic blood pressure, mmHg.
    pub diastolic: f64,
    /// Beats per minute.
    pub heart_rate: f64,
    /// Body temperature, °F.
    pub temperature: f64,
    /// Weight in kilograms.
    pub weight: f64,
    /// Fasting blood sugar, mg/dL.
    pub blood_sugar: f64,
}

/// Interpretation of a lab value against its reference range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabStatus {
    Normal,
    Low,
    High,
    BorderlineHigh,
}

impl LabStatus {
    /// Whether the value warrants an alert.
    pub fn is_elevated(self) -> bool {
        matches!(self, Self::High | Self::BorderlineHigh)
    }
}

impl fmt::Display for LabStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Normal => "Normal",
            Self::Low => "Low",
            Self::High => "High",
            Self::BorderlineHigh => "Borderline High",
        })
    }
}

/// A single laboratory measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabResult {
    /// Test name, e.g. `HbA1c`.
    pub test: String,
    /// Measured value in `unit`.
    pub value: f64,
    /// Unit of `value`.
    pub unit: String,
    /// Normal range as printed on the report.
    pub reference_range: String,
    /// Interpretation of `value`.
    pub status: LabStatus,
}

/// Clinical state of a diagnosed condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionStatus {
    Ongoing,
    Controlled,
    Managed,
    Resolved,
}

impl ConditionStatus {
    /// Ongoing and controlled conditions count as active.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Ongoing | Self::Controlled)
    }
}

/// An entry in the medical history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    /// Date of diagnosis.
    pub date: NaiveDate,
    /// Diagnosis.
    pub name: String,
    /// Current clinical state.
    pub status: ConditionStatus,
    /// Treatment prescribed for it.
    pub medication: String,
}

/// An active prescription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medication {
    /// Drug name.
    pub name: String,
    /// Dose per intake, e.g. `10mg`.
    pub dosage: String,
    /// How often it is taken.
    pub frequency: String,
    /// First day of the prescription.
    pub start_date: NaiveDate,
    /// What it treats.
    pub purpose: String,
    /// Guidance from [`medication_note`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Direction of the blood pressure trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Increasing,
    Stable,
}

/// Headline figures for the overview tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insights {
    /// Systolic trend across the reading history.
    pub bp_trend: Trend,
    /// Last weight minus first weight, kilograms.
    pub weight_change: f64,
    /// Number of recorded conditions.
    pub conditions: usize,
    /// Number of current medications.
    pub medications: usize,
}

/// What triggered an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    BloodPressure,
    BloodSugar,
    Lab,
}

/// A health alert with its display text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// What triggered it.
    pub kind: AlertKind,
    /// Text shown to the patient.
    pub message: String,
}

/// Everything on the overview tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    /// Whose record this is.
    pub patient: Patient,
    /// Latest reading as `systolic/diastolic`.
    pub blood_pressure: String,
    /// Latest heart rate, beats per minute.
    pub heart_rate: f64,
    /// Latest weight, kilograms.
    pub weight: f64,
    /// Ongoing or controlled conditions.
    pub active_conditions: usize,
    /// Headline figures.
    pub insights: Insights,
    /// Empty when there is nothing critical.
    pub alerts: Vec<Alert>,
}

/// A patient's full record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Demographics.
    pub patient: Patient,
    /// Readings in ascending date order.
    pub vitals: Vec<Vitals>,
    /// Most recent lab panel.
    pub labs: Vec<LabResult>,
    /// Medical history.
    pub conditions: Vec<Condition>,
    /// Current prescriptions.
    pub medications: Vec<Medication>,
}

impl Record {
    /// Build the sample record.
    pub fn sample() -> Self {
        Self {
            patient: Patient {
                name: "Ali".into(),
                age: 45,
                gender: "Male".into(),
                blood_type: "A+".into(),
                height_cm: 175,
                weight_kg: 78,
                bmi: 25.5,
            },
            vitals: sample_vitals(SAMPLE_SEED),
            labs: sample_labs(),
            conditions: sample_conditions(),
            medications: sample_medications(),
        }
    }

    /// Most recent vital reading.
    pub fn latest(&self) -> Option<&Vitals> {
        self.vitals.last()
    }

    /// Threshold alerts for the latest vitals and every elevated lab.
    pub fn alerts(&self) -> Vec<Alert> {
        let mut alerts = Vec::new();
        if let Some(latest) = self.latest() {
            if latest.systolic > HIGH_SYSTOLIC {
                alerts.push(Alert {
                    kind: AlertKind::BloodPressure,
                    message: "High blood pressure detected [Please consult physician]".into(),
                });
            }
            if latest.blood_sugar > DIABETES_SUGAR {
                alerts.push(Alert {
                    kind: AlertKind::BloodSugar,
                    message: "Elevated blood sugar [Please monitor closely]".into(),
                });
            }
        }
        alerts.extend(
            self.labs
                .iter()
                .filter(|lab| lab.status.is_elevated())
                .map(|lab| Alert {
                    kind: AlertKind::Lab,
                    message: format!("{} - {} - {} {}", lab.test, lab.status, lab.value, lab.unit),
                }),
        );
        alerts
    }

    /// Trend and count summaries.
    pub fn insights(&self) -> Insights {
        let systolic: Vec<f64> = self.vitals.iter().map(|v| v.systolic).collect();
        let head = mean(&systolic[..systolic.len().min(3)]);
        let tail = mean(&systolic[systolic.len().saturating_sub(3)..]);
        let bp_trend = if tail > head {
            Trend::Increasing
        } else {
            Trend::Stable
        };

        Insights {
            bp_trend,
            weight_change: self.weight_change(),
            conditions: self.conditions.len(),
            medications: self.medications.len(),
        }
    }

    /// Last weight minus first weight.
    pub fn weight_change(&self) -> f64 {
        match (self.vitals.first(), self.vitals.last()) {
            (Some(first), Some(last)) => last.weight - first.weight,
            _ => 0.0,
        }
    }

    /// Number of ongoing or controlled conditions.
    pub fn active_conditions(&self) -> usize {
        self.conditions
            .iter()
            .filter(|c| c.status.is_active())
            .count()
    }

    /// Conditions, newest diagnosis first.
    pub fn timeline(&self) -> Vec<&Condition> {
        let mut timeline: Vec<_> = self.conditions.iter().collect();
        timeline.sort_by(|a, b| b.date.cmp(&a.date));
        timeline
    }

    /// How many conditions are in each status.
    pub fn condition_status_counts(&self) -> BTreeMap<ConditionStatus, usize> {
        let mut counts = BTreeMap::new();
        for condition in &self.conditions {
            *counts.entry(condition.status).or_default() += 1;
        }
        counts
    }

    /// How many labs are in each status.
    pub fn lab_status_counts(&self) -> BTreeMap<LabStatus, usize> {
        let mut counts = BTreeMap::new();
        for lab in &self.labs {
            *counts.entry(lab.status).or_default() += 1;
        }
        counts
    }

    /// Lipid panel subset of the labs.
    pub fn cholesterol_panel(&self) -> Vec<&LabResult> {
        self.labs
            .iter()
            .filter(|lab| CHOLESTEROL_PANEL.contains(&lab.test.as_str()))
            .collect()
    }

    /// Readings whose date falls within `from..=to`.
    pub fn vitals_between(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<&Vitals>> {
        if from > to {
            return Err(Error::Validation { field: "date range" });
        }
        Ok(self
            .vitals
            .iter()
            .filter(|v| v.date >= from && v.date <= to)
            .collect())
    }

    /// Assemble the overview tab.
    pub fn overview(&self) -> Overview {
        let (blood_pressure, heart_rate, weight) = self
            .latest()
            .map(|v| {
                (
                    format!("{:.0}/{:.0}", v.systolic, v.diastolic),
                    v.heart_rate,
                    v.weight,
                )
            })
            .unwrap_or_default();

        Overview {
            patient: self.patient.clone(),
            blood_pressure,
            heart_rate,
            weight,
            active_conditions: self.active_conditions(),
            insights: self.insights(),
            alerts: self.alerts(),
        }
    }
}

/// Patient guidance for a known medication.
pub fn medication_note(name: &str) -> Option<&'static str> {
    if name.contains("Lisinopril") {
        Some("Monitor blood pressure regularly. Report any persistent cough.")
    } else if name.contains("Metformin") {
        Some("Take with food. Monitor blood sugar levels.")
    } else if name.contains("Atorvastatin") {
        Some("Take in the evening. Annual liver function tests recommended.")
    } else if name.contains("Sertraline") {
        Some("May take 4-6 weeks for full effect. Monitor mood changes.")
    } else {
        None
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Box-Muller sample from N(mean, std_dev).
fn normal(rng: &mut StdRng, mean: f64, std_dev: f64) -> f64 {
    let u1 = 1.0 - rng.random::<f64>();
    let u2 = rng.random::<f64>();
    mean + std_dev * (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// Month-end dates from January 2023 through December 2024.
fn month_ends() -> impl Iterator<Item = NaiveDate> {
    (2023..=2024)
        .flat_map(|year| (1..=12).map(move |month| (year, month)))
        .filter_map(|(year, month)| {
            NaiveDate::from_ymd_opt(year, month, 1)?
                .checked_add_months(Months::new(1))?
                .pred_opt()
        })
}

fn sample_vitals(seed: u64) -> Vec<Vitals> {
    let mut rng = StdRng::seed_from_u64(seed);
    month_ends()
        .map(|date| Vitals {
            date,
            systolic: normal(&mut rng, 130.0, 15.0),
            diastolic: normal(&mut rng, 85.0, 10.0),
            heart_rate: normal(&mut rng, 75.0, 8.0),
            temperature: normal(&mut rng, 98.6, 0.5),
            weight: normal(&mut rng, 78.0, 2.0),
            blood_sugar: normal(&mut rng, 100.0, 20.0),
        })
        .collect()
}

fn sample_labs() -> Vec<LabResult> {
    [
        ("Hemoglobin", 14.2, "g/dL", "13.5-17.5", LabStatus::Normal),
        ("White Blood Cells", 6.8, "10³/μL", "4.0-11.0", LabStatus::Normal),
        ("Cholesterol", 195.0, "mg/dL", "<200", LabStatus::BorderlineHigh),
        ("HDL", 45.0, "mg/dL", ">40", LabStatus::Low),
        ("LDL", 125.0, "mg/dL", "<100", LabStatus::High),
        ("Triglycerides", 150.0, "mg/dL", "<150", LabStatus::Normal),
        ("Creatinine", 1.1, "mg/dL", "0.7-1.3", LabStatus::Normal),
        ("BUN", 18.0, "mg/dL", "7-20", LabStatus::Normal),
    ]
    .into_iter()
    .map(|(test, value, unit, reference_range, status)| LabResult {
        test: test.into(),
        value,
        unit: unit.into(),
        reference_range: reference_range.into(),
        status,
    })
    .collect()
}

fn sample_conditions() -> Vec<Condition> {
    [
        (date(2023, 3, 15), "Hypertension", ConditionStatus::Ongoing, "Lisinopril 10mg"),
        (date(2022, 11, 20), "Type 2 Diabetes", ConditionStatus::Controlled, "Metformin 500mg"),
        (date(2023, 8, 10), "High Cholesterol", ConditionStatus::Ongoing, "Atorvastatin 20mg"),
        (date(2024, 1, 5), "Anxiety", ConditionStatus::Managed, "Sertraline 50mg"),
    ]
    .into_iter()
    .map(|(date, name, status, medication)| Condition {
        date,
        name: name.into(),
        status,
        medication: medication.into(),
    })
    .collect()
}

fn sample_medications() -> Vec<Medication> {
    [
        ("Lisinopril", "10mg", "Once daily", date(2023, 3, 15), "Blood pressure control"),
        ("Metformin", "500mg", "Twice daily", date(2022, 11, 20), "Blood sugar control"),
        ("Atorvastatin", "20mg", "Once daily", date(2023, 8, 10), "Cholesterol management"),
        ("Sertraline", "50mg", "Once daily", date(2024, 1, 5), "Anxiety management"),
    ]
    .into_iter()
    .map(|(name, dosage, frequency, start_date, purpose)| Medication {
        name: name.into(),
        dosage: dosage.into(),
        frequency: frequency.into(),
        start_date,
        purpose: purpose.into(),
        note: medication_note(name).map(Into::into),
    })
    .collect()
}
