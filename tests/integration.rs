//! Integration tests for the course engine.
//!
//! This test suite covers the end-to-end pipelines:
//! - Configuration -> schedule generation -> workload
//! - Roll-call records -> attendance summaries -> classified report
//! - Interview responses and incidents -> breakdown tables
//! - Wire shapes consumed by report exporters
//! - Scheduling, attendance and breakdown properties

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};
use proptest::prelude::*;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;

use course_engine::calculation::{
    NO_SESSIONS_WARNING, breakdown, build_attendance_report, classify, compute_workload_hours,
    generate_schedule, generate_schedule_excluding, generate_schedule_with_topic,
    hours_per_session, incident_breakdown, interview_breakdowns, summarize, summarize_grouped,
    validate_schedule,
};
use course_engine::config::ConfigLoader;
use course_engine::models::{
    AnswerValue, AttendancePolicy, AttendanceRecord, AttendanceStatus, BandSet, Holiday, Incident,
    IncidentDimension, InterviewResponse, Question, QuestionKind, ScheduleSpec, SubjectAttendance,
    WEEK_ORDER, WeekdaySet,
};

// =============================================================================
// Test Helpers
// =============================================================================

fn make_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

fn make_time(time_str: &str) -> NaiveTime {
    NaiveTime::parse_from_str(time_str, "%H:%M").unwrap()
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn make_spec(start: &str, end: &str, weekdays: &[Weekday], from: &str, to: &str) -> ScheduleSpec {
    ScheduleSpec {
        start_date: make_date(start),
        end_date: make_date(end),
        weekdays: weekdays.iter().copied().collect(),
        start_time: make_time(from),
        end_time: make_time(to),
    }
}

fn record(student: &str, session: &str, status: AttendanceStatus) -> AttendanceRecord {
    AttendanceRecord {
        student_id: student.to_string(),
        session_id: session.to_string(),
        course_id: None,
        status,
    }
}

fn weekdays_from_mask(mask: u8) -> WeekdaySet {
    WEEK_ORDER
        .iter()
        .enumerate()
        .filter(|(i, _)| mask & (1 << i) != 0)
        .map(|(_, day)| *day)
        .collect()
}

// =============================================================================
// Schedule Pipeline
// =============================================================================

#[test]
fn test_course_form_preview_from_json() {
    let loader = ConfigLoader::load("./config/default").expect("Failed to load config");

    let spec: ScheduleSpec = serde_json::from_value(json!({
        "start_date": "2024-03-04",
        "end_date": "2024-03-08",
        "weekdays": ["segunda", "quarta-feira", "Friday"],
        "start_time": "19:00",
        "end_time": "21:00"
    }))
    .unwrap();

    let sessions = generate_schedule_with_topic(&spec, &loader.config().default_session_topic);
    let dates: Vec<String> = sessions.iter().map(|s| s.date.to_string()).collect();
    assert_eq!(dates, vec!["2024-03-04", "2024-03-06", "2024-03-08"]);
    assert!(sessions.iter().all(|s| s.topic == "Conteúdo a definir"));

    assert_eq!(compute_workload_hours(&spec, sessions.len()), dec("6"));
    assert!(validate_schedule(&spec).is_empty());

    let wire = serde_json::to_value(&sessions[0]).unwrap();
    assert_eq!(
        wire,
        json!({
            "date": "2024-03-04",
            "start_time": "19:00",
            "end_time": "21:00",
            "topic": "Conteúdo a definir"
        })
    );
}

#[test]
fn test_single_day_outside_pattern_is_empty() {
    let spec = make_spec("2024-03-05", "2024-03-05", &[Weekday::Mon], "19:00", "21:00");

    assert!(generate_schedule(&spec).is_empty());
    assert_eq!(compute_workload_hours(&spec, 0), Decimal::ZERO);
}

#[test]
fn test_semester_with_holidays() {
    // Tuesdays and Thursdays, first semester of 2024
    let spec = make_spec(
        "2024-02-01",
        "2024-06-28",
        &[Weekday::Tue, Weekday::Thu],
        "08:00",
        "10:30",
    );
    let holidays = vec![
        Holiday {
            date: make_date("2024-02-13"),
            name: "Carnaval".to_string(),
        },
        Holiday {
            date: make_date("2024-05-30"),
            name: "Corpus Christi".to_string(),
        },
        Holiday {
            date: make_date("2024-04-21"),
            name: "Tiradentes".to_string(),
        },
    ];

    let all = generate_schedule(&spec);
    let meeting = generate_schedule_excluding(&spec, &holidays);

    // Tiradentes falls on a Sunday in 2024
    assert_eq!(all.len() - meeting.len(), 2);
    assert!(meeting.iter().all(|s| s.date != make_date("2024-02-13")));
    assert_eq!(hours_per_session(&spec), dec("2.5"));
    assert_eq!(
        compute_workload_hours(&spec, meeting.len()),
        Decimal::from(meeting.len() as u64) * dec("2.5")
    );
}

// =============================================================================
// Attendance Pipeline
// =============================================================================

#[test]
fn test_attendance_report_with_loaded_bands() {
    let loader = ConfigLoader::load("./config/default").unwrap();
    let bands = loader.attendance_bands().unwrap();

    let spec = make_spec(
        "2024-03-04",
        "2024-03-15",
        &[Weekday::Mon, Weekday::Wed, Weekday::Fri],
        "19:00",
        "21:00",
    );
    let sessions = generate_schedule(&spec);
    assert_eq!(sessions.len(), 6);

    let session_ids: Vec<String> = sessions.iter().map(|s| s.date.to_string()).collect();
    let ana: Vec<AttendanceRecord> = session_ids
        .iter()
        .map(|id| record("ana", id, AttendanceStatus::Present))
        .collect();
    let bia: Vec<AttendanceRecord> = session_ids
        .iter()
        .enumerate()
        .map(|(i, id)| {
            let status = if i < 3 {
                AttendanceStatus::Present
            } else {
                AttendanceStatus::Justified
            };
            record("bia", id, status)
        })
        .collect();

    let subjects = vec![
        SubjectAttendance {
            subject_id: "ana".to_string(),
            total_sessions: sessions.len() as u32,
            records: ana,
        },
        SubjectAttendance {
            subject_id: "bia".to_string(),
            total_sessions: sessions.len() as u32,
            records: bia,
        },
        SubjectAttendance {
            subject_id: "caio".to_string(),
            total_sessions: 0,
            records: vec![],
        },
    ];

    let report = build_attendance_report(&subjects, bands, loader.config().attendance_policy);
    assert_eq!(report.band_set, "attendance");
    assert_eq!(report.rows.len(), 3);
    assert_eq!(report.rows[0].classification.label, "Excelente");
    assert_eq!(report.rows[1].summary.attendance_percent, 50);
    assert_eq!(report.rows[1].classification.label, "Crítica");
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].code, NO_SESSIONS_WARNING);
    assert_eq!(report.warnings[0].subject_id, "caio");

    let lenient = build_attendance_report(&subjects, bands, AttendancePolicy::PresentAndJustified);
    assert_eq!(lenient.rows[1].summary.attendance_percent, 100);
    assert_ne!(lenient.report_id, report.report_id);
}

#[test]
fn test_eighty_percent_is_boa() {
    let mut records: Vec<AttendanceRecord> = (0..8)
        .map(|i| record("s1", &format!("a{}", i), AttendanceStatus::Present))
        .collect();
    records.push(record("s1", "a8", AttendanceStatus::Absent));
    records.push(record("s1", "a9", AttendanceStatus::Justified));

    let summary = summarize(&records, 10, AttendancePolicy::PresentOnly);
    assert_eq!(summary.present_count, 8);
    assert_eq!(summary.absent_count, 1);
    assert_eq!(summary.justified_count, 1);
    assert_eq!(summary.attendance_percent, 80);

    let classification = classify(summary.attendance_percent, &BandSet::attendance());
    assert_eq!(classification.label, "Boa");
    assert_eq!(classification.color, "orange");
}

#[test]
fn test_records_from_reporting_endpoint() {
    let payload = json!([
        {"student_id": "ana", "session_id": "a1", "course_id": "informatica", "status": "presente"},
        {"student_id": "ana", "session_id": "a2", "course_id": "informatica", "status": "falta"},
        {"student_id": "ana", "session_id": "c1", "course_id": "costura", "status": "P"},
        {"student_id": "ana", "session_id": "c2", "course_id": "costura", "status": "atrasado"}
    ]);
    let records: Vec<AttendanceRecord> = serde_json::from_value(payload).unwrap();
    assert_eq!(records[3].status, AttendanceStatus::Unknown);

    let by_course = summarize_grouped(
        &records,
        |r| r.course_id.clone().unwrap_or_default(),
        |_| 4,
        AttendancePolicy::PresentOnly,
    );
    assert_eq!(by_course["informatica"].present_count, 1);
    assert_eq!(by_course["informatica"].absent_count, 1);
    assert_eq!(by_course["costura"].present_count, 1);
    assert_eq!(by_course["costura"].unrecorded_count(), 3);
    assert_eq!(by_course["costura"].attendance_percent, 25);

    let wire: Value = serde_json::to_value(by_course["informatica"]).unwrap();
    assert_eq!(
        wire,
        json!({
            "total_sessions": 4,
            "present_count": 1,
            "absent_count": 1,
            "justified_count": 0,
            "attendance_percent": 25
        })
    );
}

// =============================================================================
// Breakdown Pipeline
// =============================================================================

#[test]
fn test_interview_dashboard() {
    let questions: Vec<Question> = serde_json::from_value(json!([
        {"key": "trabalha", "label": "Trabalha atualmente?", "kind": "boolean"},
        {"key": "turno", "label": "Turno preferido", "kind": "single-select",
         "options": ["Manhã", "Tarde", "Noite"]},
        {"key": "cursos", "label": "Cursos de interesse", "kind": "multi_select"},
        {"key": "obs", "label": "Observações", "kind": "free_text"}
    ]))
    .unwrap();

    let responses: Vec<InterviewResponse> = serde_json::from_value(json!([
        {"student_id": "s1", "answers": {"trabalha": true, "turno": "Noite",
            "cursos": ["Informática", "Costura"], "obs": "Precisa de transporte"}},
        {"student_id": "s2", "answers": {"trabalha": "não", "turno": "Noite",
            "cursos": ["Informática"]}},
        {"student_id": "s3", "answers": {"trabalha": null, "turno": "Manhã",
            "cursos": []}},
        {"student_id": "s4", "answers": {"trabalha": false, "turno": {"bad": 1}}}
    ]))
    .unwrap();

    let tables = interview_breakdowns(&questions, &responses);
    assert_eq!(tables.len(), 4);

    let trabalha = &tables[0].breakdown;
    assert_eq!(trabalha.item("Sim").unwrap().count, 1);
    assert_eq!(trabalha.item("Não").unwrap().count, 2);
    assert_eq!(trabalha.item("Não informado").unwrap().count, 1);
    assert_eq!(trabalha.count_sum(), trabalha.total_responses);

    let turno = &tables[1].breakdown;
    let labels: Vec<&str> = turno.items.iter().map(|i| i.label.as_str()).collect();
    assert_eq!(labels, vec!["Manhã", "Tarde", "Noite"]);
    assert_eq!(turno.item("Noite").unwrap().percentage, 67);
    assert_eq!(turno.skipped_responses, 1);
    assert_eq!(turno.total_responses, 3);

    let cursos = &tables[2].breakdown;
    assert_eq!(cursos.item("Informática").unwrap().percentage, 50);
    assert_eq!(cursos.item("Não informado").unwrap().count, 2);

    let obs = &tables[3].breakdown;
    assert!(obs.items.is_empty());
    assert_eq!(obs.total_responses, 4);

    let wire = serde_json::to_value(&tables[0]).unwrap();
    assert_eq!(wire["breakdown"]["items"][0], json!({"label": "Sim", "count": 1, "percentage": 25}));
}

#[test]
fn test_multi_select_informatica_costura() {
    let mut answers = vec![AnswerValue::Many(vec!["Informática".into(), "Costura".into()]); 2];
    answers.extend(vec![AnswerValue::Many(vec!["Informática".into()]); 4]);
    answers.extend(vec![AnswerValue::Many(vec!["Costura".into()]); 2]);
    answers.extend(vec![AnswerValue::Missing; 2]);

    let result = breakdown(&answers, QuestionKind::MultiSelect);
    assert_eq!(result.total_responses, 10);
    assert_eq!(result.item("Informática").unwrap().count, 6);
    assert_eq!(result.item("Informática").unwrap().percentage, 60);
    assert_eq!(result.item("Costura").unwrap().count, 4);
    assert_eq!(result.item("Costura").unwrap().percentage, 40);
}

#[test]
fn test_incident_statistics() {
    let incidents: Vec<Incident> = serde_json::from_value(json!([
        {"id": "1", "student_id": "s1", "occurred_on": "2024-04-02",
         "category": "Comportamento", "severity": "Alta", "resolved": true},
        {"id": "2", "student_id": "s2", "occurred_on": "2024-04-03",
         "category": "Atraso", "severity": "Baixa", "resolved": false},
        {"id": "3", "student_id": "s1", "occurred_on": "2024-04-09",
         "category": "Comportamento", "severity": "Baixa"},
        {"id": "4", "student_id": "s3", "occurred_on": "2024-04-10",
         "category": "Comportamento", "severity": "Média", "resolved": true}
    ]))
    .unwrap();

    let by_category = incident_breakdown(&incidents, IncidentDimension::Category);
    assert_eq!(by_category.item("Comportamento").unwrap().count, 3);
    assert_eq!(by_category.item("Comportamento").unwrap().percentage, 75);

    let by_severity = incident_breakdown(&incidents, IncidentDimension::Severity);
    assert_eq!(by_severity.item("Baixa").unwrap().count, 2);
    assert_eq!(by_severity.count_sum(), 4);

    let by_resolution = incident_breakdown(&incidents, IncidentDimension::Resolved);
    assert_eq!(by_resolution.item("Sim").unwrap().percentage, 50);
    assert_eq!(by_resolution.item("Não informado").unwrap().count, 1);
}

// =============================================================================
// Properties
// =============================================================================

fn schedule_spec_strategy() -> impl Strategy<Value = ScheduleSpec> {
    (0i64..1200, -10i64..420, 0u8..128, 0u32..80, 1u32..16).prop_map(
        |(offset, span, mask, start_quarter, length_quarters)| {
            let start_date = make_date("2023-01-01") + Duration::days(offset);
            let start_minutes = start_quarter * 15;
            let end_minutes = start_minutes + length_quarters * 15;
            ScheduleSpec {
                start_date,
                end_date: start_date + Duration::days(span),
                weekdays: weekdays_from_mask(mask),
                start_time: NaiveTime::from_hms_opt(start_minutes / 60, start_minutes % 60, 0)
                    .unwrap(),
                end_time: NaiveTime::from_hms_opt(end_minutes / 60, end_minutes % 60, 0).unwrap(),
            }
        },
    )
}

fn status_strategy() -> impl Strategy<Value = AttendanceStatus> {
    prop_oneof![
        Just(AttendanceStatus::Present),
        Just(AttendanceStatus::Absent),
        Just(AttendanceStatus::Justified),
        Just(AttendanceStatus::NotRecorded),
        Just(AttendanceStatus::Unknown),
    ]
}

fn single_answer_strategy() -> impl Strategy<Value = AnswerValue> {
    prop_oneof![
        Just(AnswerValue::Missing),
        Just(AnswerValue::Text(String::new())),
        Just(AnswerValue::Unsupported),
        prop::sample::select(vec!["A", "B", "C", "D"]).prop_map(AnswerValue::from),
    ]
}

fn boolean_answer_strategy() -> impl Strategy<Value = AnswerValue> {
    prop_oneof![
        Just(AnswerValue::Missing),
        Just(AnswerValue::Unsupported),
        any::<bool>().prop_map(AnswerValue::Bool),
        prop::sample::select(vec!["sim", "não", "nao", "true", "false", "talvez"])
            .prop_map(AnswerValue::from),
    ]
}

fn multi_answer_strategy() -> impl Strategy<Value = AnswerValue> {
    prop_oneof![
        Just(AnswerValue::Missing),
        prop::collection::vec(prop::sample::select(vec!["A", "B", "C"]), 0..5)
            .prop_map(|items| AnswerValue::Many(items.into_iter().map(String::from).collect())),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_sessions_stay_in_range_and_pattern(spec in schedule_spec_strategy()) {
        for session in generate_schedule(&spec) {
            prop_assert!(spec.contains_date(session.date));
            prop_assert!(spec.weekdays.contains(session.date.weekday()));
        }
    }

    #[test]
    fn prop_session_count_matches_qualifying_dates(spec in schedule_spec_strategy()) {
        let span = (spec.end_date - spec.start_date).num_days();
        let expected = (0..=span)
            .map(|i| spec.start_date + Duration::days(i))
            .filter(|date| spec.weekdays.contains(date.weekday()))
            .count();

        let sessions = generate_schedule(&spec);
        prop_assert_eq!(sessions.len(), expected);
        prop_assert!(sessions.windows(2).all(|pair| pair[0].date < pair[1].date));
    }

    #[test]
    fn prop_generation_is_idempotent(spec in schedule_spec_strategy()) {
        prop_assert_eq!(generate_schedule(&spec), generate_schedule(&spec));
    }

    #[test]
    fn prop_workload_is_sessions_times_hours(spec in schedule_spec_strategy()) {
        let count = generate_schedule(&spec).len();
        let minutes = (spec.end_time - spec.start_time).num_minutes();
        let expected = Decimal::from(count as u64) * Decimal::from(minutes) / Decimal::from(60);
        prop_assert_eq!(compute_workload_hours(&spec, count), expected);
    }

    #[test]
    fn prop_summary_counts_never_exceed_total(
        statuses in prop::collection::vec(status_strategy(), 0..60),
        total in 0u32..80,
        lenient in any::<bool>(),
    ) {
        let records: Vec<AttendanceRecord> = statuses
            .iter()
            .enumerate()
            .map(|(i, status)| record("s1", &format!("a{}", i), *status))
            .collect();
        let policy = if lenient {
            AttendancePolicy::PresentAndJustified
        } else {
            AttendancePolicy::PresentOnly
        };

        let summary = summarize(&records, total, policy);
        prop_assert!(summary.recorded_count() <= summary.total_sessions);
        prop_assert!(summary.total_sessions >= total);
        prop_assert!(summary.attendance_percent <= 100);
    }

    #[test]
    fn prop_percent_grows_with_presence(total in 1u32..120, present in 0u32..120) {
        let present = present.min(total - 1);
        let with = |count: u32| -> Vec<AttendanceRecord> {
            (0..count)
                .map(|i| record("s1", &format!("a{}", i), AttendanceStatus::Present))
                .collect()
        };

        let lower = summarize(&with(present), total, AttendancePolicy::PresentOnly);
        let higher = summarize(&with(present + 1), total, AttendancePolicy::PresentOnly);
        prop_assert!(lower.attendance_percent <= higher.attendance_percent);
    }

    #[test]
    fn prop_single_select_reconciles(answers in prop::collection::vec(single_answer_strategy(), 0..80)) {
        let result = breakdown(&answers, QuestionKind::SingleSelect);
        prop_assert_eq!(result.count_sum(), result.total_responses);
        prop_assert_eq!(
            result.total_responses + result.skipped_responses,
            answers.len() as u32
        );
    }

    #[test]
    fn prop_boolean_reconciles(answers in prop::collection::vec(boolean_answer_strategy(), 0..80)) {
        let result = breakdown(&answers, QuestionKind::Boolean);
        prop_assert_eq!(result.count_sum(), result.total_responses);
    }

    #[test]
    fn prop_multi_select_buckets_bounded(answers in prop::collection::vec(multi_answer_strategy(), 0..80)) {
        let result = breakdown(&answers, QuestionKind::MultiSelect);
        prop_assert!(result.count_sum() >= result.total_responses);
        for item in &result.items {
            prop_assert!(item.count <= result.total_responses);
            prop_assert!(item.percentage <= 100);
        }
    }
}
