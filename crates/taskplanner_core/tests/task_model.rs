use taskplanner_core::{
    format_date, DateError, Task, TaskDraft, TaskPatch, TaskValidationError,
};

#[test]
fn new_builds_a_fully_populated_task() {
    let draft = TaskDraft {
        notes: "bring the printed figures".to_string(),
        completed: true,
        ..TaskDraft::new("Quarterly report", "15-03-2026", 90)
    };

    let task = Task::new(7, &draft).unwrap();
    assert_eq!(task.id, 7);
    assert_eq!(task.title, "Quarterly report");
    assert_eq!(format_date(task.deadline), "15-03-2026");
    assert_eq!(task.estimated_minutes, 90);
    assert_eq!(task.notes, "bring the printed figures");
    assert!(task.completed);
}

#[test]
fn new_trims_the_title() {
    let task = Task::new(1, &TaskDraft::new("  Buy groceries  ", "01-01-2025", 30)).unwrap();
    assert_eq!(task.title, "Buy groceries");
}

#[test]
fn new_rejects_empty_and_whitespace_titles() {
    for title in ["", "   ", "\t\n"] {
        let err = Task::new(1, &TaskDraft::new(title, "01-01-2025", 30)).unwrap_err();
        assert_eq!(err, TaskValidationError::EmptyTitle);
    }
}

#[test]
fn new_rejects_invalid_deadlines_with_date_detail() {
    let err = Task::new(1, &TaskDraft::new("Call dentist", "31-02-2021", 15)).unwrap_err();
    assert_eq!(
        err,
        TaskValidationError::InvalidDeadline(DateError::OutOfRange {
            day: 31,
            month: 2,
            year: 2021,
        })
    );

    let err = Task::new(1, &TaskDraft::new("Call dentist", "soon", 15)).unwrap_err();
    assert!(matches!(
        err,
        TaskValidationError::InvalidDeadline(DateError::Malformed { .. })
    ));
}

#[test]
fn new_rejects_negative_estimates() {
    let err = Task::new(1, &TaskDraft::new("Stretch", "01-01-2025", -30)).unwrap_err();
    assert_eq!(err, TaskValidationError::EstimateOutOfRange { minutes: -30 });
}

#[test]
fn new_accepts_zero_minutes() {
    let task = Task::new(1, &TaskDraft::new("Instant win", "01-01-2025", 0)).unwrap();
    assert_eq!(task.estimated_minutes, 0);
}

#[test]
fn validation_checks_title_before_deadline_and_estimate() {
    let err = Task::new(1, &TaskDraft::new("  ", "not a date", -1)).unwrap_err();
    assert_eq!(err, TaskValidationError::EmptyTitle);

    let err = Task::new(1, &TaskDraft::new("ok", "not a date", -1)).unwrap_err();
    assert!(matches!(err, TaskValidationError::InvalidDeadline(_)));
}

#[test]
fn apply_changes_only_the_patched_fields() {
    let original = Task::new(3, &TaskDraft::new("Draft slides", "10-06-2026", 120)).unwrap();

    let updated = original
        .apply(&TaskPatch {
            title: Some("Final slides".to_string()),
            completed: Some(true),
            ..TaskPatch::default()
        })
        .unwrap();

    assert_eq!(updated.id, 3);
    assert_eq!(updated.title, "Final slides");
    assert!(updated.completed);
    assert_eq!(updated.deadline, original.deadline);
    assert_eq!(updated.estimated_minutes, 120);
    assert_eq!(updated.notes, original.notes);

    // The source record is untouched.
    assert_eq!(original.title, "Draft slides");
    assert!(!original.completed);
}

#[test]
fn apply_rejects_invalid_changes_without_touching_the_original() {
    let original = Task::new(3, &TaskDraft::new("Draft slides", "10-06-2026", 120)).unwrap();

    let err = original
        .apply(&TaskPatch {
            deadline: Some("99-99-9999".to_string()),
            ..TaskPatch::default()
        })
        .unwrap_err();
    assert!(matches!(err, TaskValidationError::InvalidDeadline(_)));
    assert_eq!(format_date(original.deadline), "10-06-2026");

    let err = original
        .apply(&TaskPatch {
            estimated_minutes: Some(-5),
            ..TaskPatch::default()
        })
        .unwrap_err();
    assert_eq!(err, TaskValidationError::EstimateOutOfRange { minutes: -5 });
}

#[test]
fn identity_is_id_equality_not_field_equality() {
    let left = Task::new(9, &TaskDraft::new("Water plants", "01-01-2025", 5)).unwrap();
    let mut right = left.clone();
    right.title = "Water the plants".to_string();
    right.completed = true;

    assert!(left.same_task(&right));
    assert_ne!(left, right);

    let other = Task::new(10, &TaskDraft::new("Water plants", "01-01-2025", 5)).unwrap();
    assert!(!left.same_task(&other));
}

#[test]
fn serialization_uses_expected_wire_fields() {
    let draft = TaskDraft {
        notes: "gate B7".to_string(),
        completed: false,
        ..TaskDraft::new("Book flight", "24-08-2026", 45)
    };
    let task = Task::new(2, &draft).unwrap();

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["id"], 2);
    assert_eq!(json["title"], "Book flight");
    assert_eq!(json["deadline"], "24-08-2026");
    assert_eq!(json["estimated_minutes"], 45);
    assert_eq!(json["notes"], "gate B7");
    assert_eq!(json["completed"], false);
    assert_eq!(json.as_object().unwrap().len(), 6);

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);
}

#[test]
fn deserialization_rejects_invalid_deadline_strings() {
    let value = serde_json::json!({
        "id": 1,
        "title": "Corrupt",
        "deadline": "2026-08-24",
        "estimated_minutes": 10,
        "notes": "",
        "completed": false
    });

    let err = serde_json::from_value::<Task>(value).unwrap_err();
    assert!(
        err.to_string().contains("DD-MM-YYYY"),
        "unexpected error: {err}"
    );
}
