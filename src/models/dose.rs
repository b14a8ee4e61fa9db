use super::{frequency::Frequency, medication_type::MedicationType};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Optional prescription metadata, copied verbatim onto every dose.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Prescription {
    pub doctor_name: Option<String>,
    pub rx_number: Option<String>,
    pub pharmacy_name: Option<String>,
    pub pharmacy_phone: Option<String>,
    pub instructions: Option<String>,
}

impl Prescription {
    pub fn is_empty(&self) -> bool {
        self.doctor_name.is_none()
            && self.rx_number.is_none()
            && self.pharmacy_name.is_none()
            && self.pharmacy_phone.is_none()
            && self.instructions.is_none()
    }
}

/// One scheduled dose instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoseOccurrence {
    pub id: i64,                   // ⇔ doses.id (0 = not persisted yet)
    pub name: String,              // ⇔ doses.name
    pub dosage: i32,               // ⇔ doses.dosage
    pub frequency_label: String,   // ⇔ doses.frequency ("Every 2 Days")
    pub start_date: NaiveDate,     // ⇔ doses.start_date (TEXT "YYYY-MM-DD")
    pub end_date: NaiveDate,       // ⇔ doses.end_date (TEXT "YYYY-MM-DD")
    pub taken: bool,               // ⇔ doses.taken (INT 0/1)
    pub dose_time: NaiveDateTime,  // ⇔ doses.dose_time (TEXT "YYYY-MM-DD HH:MM")
    pub med_type: MedicationType,  // ⇔ doses.med_type
    pub prescription: Prescription, // ⇔ doctor_name, rx_number, pharmacy_*, instructions
}

impl DoseOccurrence {
    /// Canonical frequency recovered from the stored label.
    pub fn frequency(&self) -> Frequency {
        Frequency::from_localized_string(&self.frequency_label)
    }

    pub fn is_persisted(&self) -> bool {
        self.id > 0
    }

    pub fn dose_date(&self) -> NaiveDate {
        self.dose_time.date()
    }

    pub fn dose_time_str(&self) -> String {
        self.dose_time.format("%Y-%m-%d %H:%M").to_string()
    }

    /// Text shown by a reminder for this dose.
    pub fn reminder_message(&self) -> String {
        let unit = self.med_type.unit(self.dosage);

        match &self.prescription.instructions {
            Some(text) if !text.trim().is_empty() => {
                format!("Take {} {} of {} ({})", self.dosage, unit, self.name, text)
            }
            _ => format!("Take {} {} of {}", self.dosage, unit, self.name),
        }
    }
}
