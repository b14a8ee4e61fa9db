use rdose::core::add::AddLogic;
use rdose::core::del::DeleteLogic;
use rdose::core::edit::{DoseChanges, EditLogic};
use rdose::core::expander::{CyclePolicy, ScheduleRequest, generate};
use rdose::core::reminders::{ReminderQueue, ReminderScheduler};
use rdose::core::take::TakeLogic;
use rdose::db::migrate::{is_applied, run_pending_migrations};
use rdose::db::queries::{
    DoseFilter, get_dose_by_id, insert_doses, load_doses, save_edit, set_taken, update_dose,
};
use rdose::db::pool::DbPool;
use rdose::errors::{AppError, AppResult};
use rdose::models::dose::{DoseOccurrence, Prescription};
use rdose::models::frequency::Frequency;
use rdose::models::medication_type::MedicationType;

mod common;
use common::{d, dt, memory_pool, t};

fn weekly_plan() -> ScheduleRequest {
    ScheduleRequest::with_frequency(
        "Vitamin D",
        1,
        Frequency::EveryWeek,
        d(2024, 1, 1),
        d(2024, 1, 14),
        vec![t(8, 0), t(20, 0)],
    )
    .med_type(MedicationType::Drops)
    .prescription(Prescription {
        instructions: Some("after breakfast".into()),
        ..Prescription::default()
    })
}

fn count(pool: &DbPool, table: &str) -> i64 {
    pool.conn
        .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| r.get(0))
        .unwrap()
}

fn edit(pool: &mut DbPool, id: i64, changes: &DoseChanges) -> AppResult<Vec<DoseOccurrence>> {
    EditLogic::apply(pool, id, changes, CyclePolicy::WholeCycles, "-")
}

/// Makes every write to `reminders` fail, as a broken reminder store would.
fn break_reminders(pool: &DbPool) {
    pool.conn
        .execute_batch(
            "CREATE TRIGGER reminders_offline BEFORE INSERT ON reminders
             BEGIN SELECT RAISE(ABORT, 'reminder store offline'); END;",
        )
        .unwrap();
}

fn all(pool: &DbPool) -> Vec<DoseOccurrence> {
    load_doses(&pool.conn, &DoseFilter::default()).unwrap()
}

#[test]
fn fresh_database_reports_every_migration() {
    let pool = DbPool::in_memory().unwrap();

    let applied = run_pending_migrations(&pool.conn).unwrap();

    let versions: Vec<&str> = applied.iter().map(|(v, _)| *v).collect();
    assert_eq!(
        versions,
        vec!["0001_create_doses", "0002_dose_time_index", "0003_create_reminders"]
    );
}

#[test]
fn migrations_run_once() {
    let pool = memory_pool();

    assert!(is_applied(&pool.conn, "0001_create_doses").unwrap());
    assert!(is_applied(&pool.conn, "0003_create_reminders").unwrap());
    assert!(!is_applied(&pool.conn, "9999_unknown").unwrap());

    assert!(run_pending_migrations(&pool.conn).unwrap().is_empty());
}

#[test]
fn insert_assigns_ids_and_round_trips() {
    let mut pool = memory_pool();
    let doses = generate(&weekly_plan(), None);

    let saved = insert_doses(&mut pool.conn, &doses).unwrap();

    assert_eq!(saved.len(), 4);
    assert!(saved.iter().all(|o| o.is_persisted()));
    let mut ids: Vec<i64> = saved.iter().map(|o| o.id).collect();
    ids.dedup();
    assert_eq!(ids.len(), 4);

    let loaded = all(&pool);
    assert_eq!(loaded, saved);

    let first = get_dose_by_id(&pool.conn, saved[0].id).unwrap().unwrap();
    assert_eq!(first.med_type, MedicationType::Drops);
    assert_eq!(first.prescription.instructions.as_deref(), Some("after breakfast"));
    assert_eq!(first.frequency(), Frequency::EveryWeek);
}

#[test]
fn failed_batch_stores_nothing() {
    let mut pool = memory_pool();
    let mut doses = generate(&weekly_plan(), None);
    // violates CHECK(length(name) > 0)
    doses[2].name = String::new();

    let err = insert_doses(&mut pool.conn, &doses).unwrap_err();

    assert!(matches!(err, AppError::Db(_)));
    assert_eq!(count(&pool, "doses"), 0);
}

#[test]
fn update_of_missing_dose_is_not_found() {
    let pool = memory_pool();
    let mut dose = generate(&weekly_plan(), None).remove(0);
    dose.id = 77;

    assert!(matches!(update_dose(&pool.conn, &dose), Err(AppError::NotFound(77))));
    assert!(matches!(set_taken(&pool.conn, 77, true), Err(AppError::NotFound(77))));
    assert!(get_dose_by_id(&pool.conn, 77).unwrap().is_none());
}

#[test]
fn filters_by_day_and_pending() {
    let mut pool = memory_pool();
    let saved = insert_doses(&mut pool.conn, &generate(&weekly_plan(), None)).unwrap();
    set_taken(&pool.conn, saved[0].id, true).unwrap();

    let first_week = DoseFilter {
        from: Some(d(2024, 1, 1)),
        to: Some(d(2024, 1, 7)),
        pending_only: false,
    };
    let out = load_doses(&pool.conn, &first_week).unwrap();
    assert_eq!(out.len(), 2);
    assert!(out[0].taken);

    let pending = DoseFilter {
        pending_only: true,
        ..DoseFilter::default()
    };
    let out = load_doses(&pool.conn, &pending).unwrap();
    assert_eq!(out.len(), 3);
    assert!(out.iter().all(|o| !o.taken));

    let later = DoseFilter {
        from: Some(d(2024, 1, 8)),
        to: Some(d(2024, 1, 8)),
        pending_only: false,
    };
    let out = load_doses(&pool.conn, &later).unwrap();
    assert_eq!(
        out.iter().map(|o| o.dose_time).collect::<Vec<_>>(),
        vec![dt(2024, 1, 8, 8, 0), dt(2024, 1, 8, 20, 0)]
    );
}

#[test]
fn save_edit_updates_and_inserts_together() {
    let mut pool = memory_pool();
    let saved = insert_doses(&mut pool.conn, &generate(&weekly_plan(), None)).unwrap();

    let mut updated = saved[1].clone();
    updated.dosage = 3;
    let added = generate(
        &ScheduleRequest::with_frequency(
            "Vitamin D",
            3,
            Frequency::Everyday,
            d(2024, 1, 1),
            d(2024, 1, 2),
            vec![t(12, 0)],
        ),
        None,
    );

    let out = save_edit(&mut pool.conn, &updated, &added).unwrap();

    assert_eq!(out.len(), 3);
    assert_eq!(out[0].id, saved[1].id);
    assert!(out[1..].iter().all(|o| o.id > saved[3].id));
    assert_eq!(count(&pool, "doses"), 6);
    assert_eq!(get_dose_by_id(&pool.conn, saved[1].id).unwrap().unwrap().dosage, 3);
}

#[test]
fn save_edit_of_missing_dose_rolls_back() {
    let mut pool = memory_pool();
    let mut ghost = generate(&weekly_plan(), None).remove(0);
    ghost.id = 500;
    let added = generate(&weekly_plan(), None);

    assert!(matches!(
        save_edit(&mut pool.conn, &ghost, &added),
        Err(AppError::NotFound(500))
    ));
    assert_eq!(count(&pool, "doses"), 0);
}

#[test]
fn scheduling_is_idempotent() {
    let mut pool = memory_pool();
    let saved = insert_doses(&mut pool.conn, &generate(&weekly_plan(), None)).unwrap();

    let mut queue = ReminderQueue::new(&pool.conn);
    assert_eq!(queue.schedule_all(&saved).unwrap(), 4);
    assert_eq!(queue.schedule_all(&saved).unwrap(), 4);

    let pending = queue.pending().unwrap();
    assert_eq!(pending.len(), 4);
    assert_eq!(pending[0].dose_id, saved[0].id);
    assert_eq!(pending[0].fire_at, dt(2024, 1, 1, 8, 0));
    assert_eq!(pending[0].message, "Take 1 drop of Vitamin D (after breakfast)");
}

#[test]
fn unsaved_dose_cannot_be_scheduled() {
    let pool = memory_pool();
    let dose = generate(&weekly_plan(), None).remove(0);

    let mut queue = ReminderQueue::new(&pool.conn);
    assert!(matches!(queue.schedule(&dose), Err(AppError::InvalidArgument(_))));
    assert!(queue.pending().unwrap().is_empty());
}

#[test]
fn taken_doses_get_no_reminder() {
    let mut pool = memory_pool();
    let mut doses = generate(&weekly_plan(), None);
    doses[0].taken = true;
    let saved = insert_doses(&mut pool.conn, &doses).unwrap();

    let mut queue = ReminderQueue::new(&pool.conn);
    assert_eq!(queue.schedule_all(&saved).unwrap(), 3);
    assert!(queue.pending().unwrap().iter().all(|r| r.dose_id != saved[0].id));

    assert!(queue.cancel(saved[1].id).unwrap());
    assert!(!queue.cancel(saved[1].id).unwrap());
    assert_eq!(queue.pending().unwrap().len(), 2);
}

#[test]
fn due_reminders_stop_at_now() {
    let mut pool = memory_pool();
    let saved = insert_doses(&mut pool.conn, &generate(&weekly_plan(), None)).unwrap();
    let mut queue = ReminderQueue::new(&pool.conn);
    queue.schedule_all(&saved).unwrap();

    assert!(queue.due(dt(2023, 12, 31, 23, 59)).unwrap().is_empty());
    assert_eq!(queue.due(dt(2024, 1, 1, 8, 0)).unwrap().len(), 1);
    assert_eq!(queue.due(dt(2024, 1, 8, 12, 0)).unwrap().len(), 3);
}

#[test]
fn deleting_a_dose_drops_its_reminder() {
    let mut pool = memory_pool();
    let saved = insert_doses(&mut pool.conn, &generate(&weekly_plan(), None)).unwrap();
    ReminderQueue::new(&pool.conn).schedule_all(&saved).unwrap();

    pool.conn
        .execute("DELETE FROM doses WHERE id = ?1", [saved[0].id])
        .unwrap();

    assert_eq!(count(&pool, "reminders"), 3);
}

#[test]
fn add_stores_doses_and_reminders() {
    let mut pool = memory_pool();

    let saved = AddLogic::apply(&mut pool, &weekly_plan(), false, "-").unwrap();

    assert_eq!(saved.len(), 4);
    assert_eq!(all(&pool), saved);
    assert_eq!(count(&pool, "reminders"), 4);

    let audits: i64 = pool
        .conn
        .query_row(
            "SELECT COUNT(*) FROM log WHERE operation = 'add' AND target = 'Vitamin D'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(audits, 1);
}

#[test]
fn add_dry_run_writes_nothing() {
    let mut pool = memory_pool();

    let preview = AddLogic::apply(&mut pool, &weekly_plan(), true, "-").unwrap();

    assert_eq!(preview.len(), 4);
    assert!(preview.iter().all(|o| o.id == 0));
    assert_eq!(count(&pool, "doses"), 0);
    assert_eq!(count(&pool, "reminders"), 0);
}

#[test]
fn add_with_empty_range_succeeds_without_rows() {
    let mut pool = memory_pool();
    let req = ScheduleRequest::with_frequency(
        "Vitamin D",
        1,
        Frequency::Everyday,
        d(2024, 1, 10),
        d(2024, 1, 1),
        vec![t(8, 0)],
    );

    let out = AddLogic::apply(&mut pool, &req, false, "-").unwrap();

    assert!(out.is_empty());
    assert_eq!(count(&pool, "doses"), 0);
}

#[test]
fn edit_updates_first_slot_and_adds_the_rest() {
    let mut pool = memory_pool();
    let saved = AddLogic::apply(&mut pool, &weekly_plan(), false, "-").unwrap();
    let target = &saved[2]; // 2024-01-08 08:00
    TakeLogic::apply(&mut pool, target.id, false).unwrap();

    let changes = DoseChanges {
        dosage: Some(2),
        times: vec![t(9, 30), t(21, 30)],
        ..DoseChanges::default()
    };
    let out = edit(&mut pool, target.id, &changes).unwrap();

    // 1 updated + 2 weekly cycles of the extra slot
    assert_eq!(out.len(), 3);
    let edited = get_dose_by_id(&pool.conn, target.id).unwrap().unwrap();
    assert_eq!(edited.dose_time, dt(2024, 1, 8, 9, 30));
    assert_eq!(edited.dosage, 2);
    assert!(edited.taken);
    assert_eq!(edited.frequency(), Frequency::EveryWeek);
    assert_eq!(edited.prescription.instructions.as_deref(), Some("after breakfast"));

    assert_eq!(count(&pool, "doses"), 6);
    // 3 untouched + 2 new, the taken dose has none
    assert_eq!(count(&pool, "reminders"), 5);
}

#[test]
fn edit_can_change_frequency_and_clear_fields() {
    let mut pool = memory_pool();
    let saved = AddLogic::apply(&mut pool, &weekly_plan(), false, "-").unwrap();

    let changes = DoseChanges {
        name: Some("Vitamin D3".into()),
        frequency: Some("EVERY_2_DAYS".into()),
        instructions: Some(String::new()),
        ..DoseChanges::default()
    };
    let out = edit(&mut pool, saved[0].id, &changes).unwrap();

    assert_eq!(out.len(), 1);
    let edited = get_dose_by_id(&pool.conn, saved[0].id).unwrap().unwrap();
    assert_eq!(edited.name, "Vitamin D3");
    assert_eq!(edited.frequency_label, "Every 2 Days");
    assert_eq!(edited.dose_time, dt(2024, 1, 1, 8, 0));
    assert!(edited.prescription.instructions.is_none());
}

#[test]
fn edit_rejects_bad_input() {
    let mut pool = memory_pool();
    let saved = AddLogic::apply(&mut pool, &weekly_plan(), false, "-").unwrap();

    let missing = edit(&mut pool, 999, &DoseChanges::default());
    assert!(matches!(missing, Err(AppError::NotFound(999))));

    let bad_freq = DoseChanges {
        frequency: Some("HOURLY".into()),
        ..DoseChanges::default()
    };
    let err = edit(&mut pool, saved[0].id, &bad_freq);
    assert!(matches!(err, Err(AppError::InvalidArgument(_))));

    let no_name = DoseChanges {
        name: Some("  ".into()),
        ..DoseChanges::default()
    };
    let err = edit(&mut pool, saved[0].id, &no_name);
    assert!(matches!(err, Err(AppError::InvalidArgument(_))));

    assert_eq!(all(&pool), saved);
}

#[test]
fn take_and_undo_keep_reminder_in_sync() {
    let mut pool = memory_pool();
    let saved = AddLogic::apply(&mut pool, &weekly_plan(), false, "-").unwrap();
    let id = saved[0].id;

    let taken = TakeLogic::apply(&mut pool, id, false).unwrap();
    assert!(taken.taken);
    assert_eq!(count(&pool, "reminders"), 3);

    // already taken: no change
    TakeLogic::apply(&mut pool, id, false).unwrap();
    assert_eq!(count(&pool, "reminders"), 3);

    let undone = TakeLogic::apply(&mut pool, id, true).unwrap();
    assert!(!undone.taken);
    assert_eq!(count(&pool, "reminders"), 4);

    assert!(matches!(TakeLogic::apply(&mut pool, 999, false), Err(AppError::NotFound(999))));
}

#[test]
fn delete_one_and_all() {
    let mut pool = memory_pool();
    let saved = AddLogic::apply(&mut pool, &weekly_plan(), false, "-").unwrap();

    DeleteLogic::delete_one(&mut pool, saved[0].id).unwrap();
    assert_eq!(count(&pool, "doses"), 3);
    assert_eq!(count(&pool, "reminders"), 3);

    assert!(matches!(
        DeleteLogic::delete_one(&mut pool, saved[0].id),
        Err(AppError::NotFound(_))
    ));

    assert_eq!(DeleteLogic::delete_all(&mut pool).unwrap(), 3);
    assert_eq!(count(&pool, "doses"), 0);
    assert_eq!(count(&pool, "reminders"), 0);
}

#[test]
fn add_keeps_nothing_when_reminders_fail() {
    let mut pool = memory_pool();
    break_reminders(&pool);

    let err = AddLogic::apply(&mut pool, &weekly_plan(), false, "-").unwrap_err();

    assert!(matches!(err, AppError::Db(_)));
    assert_eq!(count(&pool, "doses"), 0);
    assert_eq!(count(&pool, "reminders"), 0);
}

#[test]
fn edit_keeps_nothing_when_reminders_fail() {
    let mut pool = memory_pool();
    let saved = AddLogic::apply(&mut pool, &weekly_plan(), false, "-").unwrap();
    break_reminders(&pool);

    let changes = DoseChanges {
        dosage: Some(5),
        times: vec![t(9, 0), t(13, 0)],
        ..DoseChanges::default()
    };
    assert!(matches!(edit(&mut pool, saved[0].id, &changes), Err(AppError::Db(_))));

    assert_eq!(all(&pool), saved);
    assert_eq!(count(&pool, "reminders"), 4);
}

#[test]
fn undo_keeps_dose_taken_when_reminder_fails() {
    let mut pool = memory_pool();
    let saved = AddLogic::apply(&mut pool, &weekly_plan(), false, "-").unwrap();
    TakeLogic::apply(&mut pool, saved[0].id, false).unwrap();
    break_reminders(&pool);

    assert!(TakeLogic::apply(&mut pool, saved[0].id, true).is_err());

    let dose = get_dose_by_id(&pool.conn, saved[0].id).unwrap().unwrap();
    assert!(dose.taken);
}
