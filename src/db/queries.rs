use crate::errors::{AppError, AppResult};
use crate::models::dose::{DoseOccurrence, Prescription};
use crate::models::medication_type::MedicationType;
use chrono::{Local, NaiveDate, NaiveDateTime};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub const DATE_FMT: &str = "%Y-%m-%d";
pub const DOSE_TIME_FMT: &str = "%Y-%m-%d %H:%M";

/// Row filter for [`load_doses`]. Bounds are inclusive calendar dates.
#[derive(Debug, Clone, Default)]
pub struct DoseFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub pending_only: bool,
}

fn conversion_error(idx: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}

pub fn map_row(row: &Row) -> Result<DoseOccurrence> {
    let start_str: String = row.get("start_date")?;
    let end_str: String = row.get("end_date")?;
    let time_str: String = row.get("dose_time")?;
    let type_str: String = row.get("med_type")?;

    let start_date = NaiveDate::parse_from_str(&start_str, DATE_FMT)
        .map_err(|_| conversion_error(0, AppError::InvalidDate(start_str.clone())))?;

    let end_date = NaiveDate::parse_from_str(&end_str, DATE_FMT)
        .map_err(|_| conversion_error(0, AppError::InvalidDate(end_str.clone())))?;

    let dose_time = NaiveDateTime::parse_from_str(&time_str, DOSE_TIME_FMT)
        .map_err(|_| conversion_error(0, AppError::InvalidTime(time_str.clone())))?;

    let med_type = MedicationType::from_db_str(&type_str)
        .ok_or_else(|| conversion_error(0, AppError::InvalidMedicationType(type_str.clone())))?;

    Ok(DoseOccurrence {
        id: row.get("id")?,
        name: row.get("name")?,
        dosage: row.get("dosage")?,
        frequency_label: row.get("frequency")?,
        start_date,
        end_date,
        taken: row.get::<_, i32>("taken")? == 1,
        dose_time,
        med_type,
        prescription: Prescription {
            doctor_name: row.get("doctor_name")?,
            rx_number: row.get("rx_number")?,
            pharmacy_name: row.get("pharmacy_name")?,
            pharmacy_phone: row.get("pharmacy_phone")?,
            instructions: row.get("instructions")?,
        },
    })
}

/// Insert a single dose and return its new id. `dose.id` is ignored.
fn insert_dose(conn: &Connection, dose: &DoseOccurrence) -> AppResult<i64> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO doses (name, dosage, frequency, start_date, end_date, taken, dose_time,
                            med_type, doctor_name, rx_number, pharmacy_name, pharmacy_phone,
                            instructions, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
    )?;

    stmt.execute(params![
        dose.name,
        dose.dosage,
        dose.frequency_label,
        dose.start_date.format(DATE_FMT).to_string(),
        dose.end_date.format(DATE_FMT).to_string(),
        if dose.taken { 1 } else { 0 },
        dose.dose_time.format(DOSE_TIME_FMT).to_string(),
        dose.med_type.to_db_str(),
        dose.prescription.doctor_name,
        dose.prescription.rx_number,
        dose.prescription.pharmacy_name,
        dose.prescription.pharmacy_phone,
        dose.prescription.instructions,
        Local::now().to_rfc3339(),
    ])?;

    Ok(conn.last_insert_rowid())
}

/// Update a dose (all fields except id). Fails with `NotFound` if the row
/// does not exist.
pub fn update_dose(conn: &Connection, dose: &DoseOccurrence) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE doses
         SET name = ?1, dosage = ?2, frequency = ?3,
             start_date = ?4, end_date = ?5, taken = ?6,
             dose_time = ?7, med_type = ?8,
             doctor_name = ?9, rx_number = ?10, pharmacy_name = ?11,
             pharmacy_phone = ?12, instructions = ?13
         WHERE id = ?14",
        params![
            dose.name,
            dose.dosage,
            dose.frequency_label,
            dose.start_date.format(DATE_FMT).to_string(),
            dose.end_date.format(DATE_FMT).to_string(),
            if dose.taken { 1 } else { 0 },
            dose.dose_time.format(DOSE_TIME_FMT).to_string(),
            dose.med_type.to_db_str(),
            dose.prescription.doctor_name,
            dose.prescription.rx_number,
            dose.prescription.pharmacy_name,
            dose.prescription.pharmacy_phone,
            dose.prescription.instructions,
            dose.id,
        ],
    )?;

    if changed == 0 {
        return Err(AppError::NotFound(dose.id));
    }
    Ok(())
}

/// Insert a batch of doses on `conn`, which is usually an open
/// transaction. The returned doses carry their assigned ids, in input order.
pub fn insert_batch(conn: &Connection, doses: &[DoseOccurrence]) -> AppResult<Vec<DoseOccurrence>> {
    let mut saved = Vec::with_capacity(doses.len());
    for dose in doses {
        let id = insert_dose(conn, dose)?;
        saved.push(DoseOccurrence {
            id,
            ..dose.clone()
        });
    }
    Ok(saved)
}

/// Insert a batch of doses in one transaction.
///
/// Either every dose is stored or none is.
pub fn insert_doses(
    conn: &mut Connection,
    doses: &[DoseOccurrence],
) -> AppResult<Vec<DoseOccurrence>> {
    let tx = conn.transaction()?;
    let saved = insert_batch(&tx, doses)?;
    tx.commit()?;
    Ok(saved)
}

/// Update `updated` and insert `added` on `conn`. Returns the updated dose
/// followed by the inserted ones.
pub fn store_edit(
    conn: &Connection,
    updated: &DoseOccurrence,
    added: &[DoseOccurrence],
) -> AppResult<Vec<DoseOccurrence>> {
    update_dose(conn, updated)?;

    let mut saved = Vec::with_capacity(added.len() + 1);
    saved.push(updated.clone());
    saved.extend(insert_batch(conn, added)?);
    Ok(saved)
}

/// [`store_edit`] in one transaction.
pub fn save_edit(
    conn: &mut Connection,
    updated: &DoseOccurrence,
    added: &[DoseOccurrence],
) -> AppResult<Vec<DoseOccurrence>> {
    let tx = conn.transaction()?;
    let saved = store_edit(&tx, updated, added)?;
    tx.commit()?;
    Ok(saved)
}

pub fn get_dose_by_id(conn: &Connection, id: i64) -> AppResult<Option<DoseOccurrence>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM doses WHERE id = ?1")?;
    let dose = stmt.query_row([id], map_row).optional()?;
    Ok(dose)
}

/// Load doses ordered by dose time (then id).
pub fn load_doses(conn: &Connection, filter: &DoseFilter) -> AppResult<Vec<DoseOccurrence>> {
    let mut clauses: Vec<&str> = Vec::new();
    let mut values: Vec<String> = Vec::new();

    if let Some(from) = filter.from {
        clauses.push("substr(dose_time, 1, 10) >= ?");
        values.push(from.format(DATE_FMT).to_string());
    }
    if let Some(to) = filter.to {
        clauses.push("substr(dose_time, 1, 10) <= ?");
        values.push(to.format(DATE_FMT).to_string());
    }
    if filter.pending_only {
        clauses.push("taken = 0");
    }

    let where_sql = if clauses.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", clauses.join(" AND "))
    };

    let sql = format!(
        "SELECT * FROM doses {} ORDER BY dose_time ASC, id ASC",
        where_sql
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(rusqlite::params_from_iter(values.iter()), map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn set_taken(conn: &Connection, id: i64, taken: bool) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE doses SET taken = ?1 WHERE id = ?2",
        params![if taken { 1 } else { 0 }, id],
    )?;

    if changed == 0 {
        return Err(AppError::NotFound(id));
    }
    Ok(())
}

pub fn delete_dose(conn: &Connection, id: i64) -> AppResult<()> {
    let changed = conn.execute("DELETE FROM doses WHERE id = ?1", [id])?;

    if changed == 0 {
        return Err(AppError::NotFound(id));
    }
    Ok(())
}

/// Delete every dose. Returns the number of rows removed.
pub fn delete_all_doses(conn: &Connection) -> AppResult<usize> {
    let removed = conn.execute("DELETE FROM doses", [])?;
    Ok(removed)
}
