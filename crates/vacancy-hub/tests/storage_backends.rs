use std::fs;
use std::path::Path;

use vacancy_hub::storage::{
    AnyStore, BackendKind, Criteria, CsvStore, JsonStore, ListingField, SpreadsheetCodec,
    SpreadsheetStore, StorageError, TextStore, VacancyField, VacancyStorage,
};
use vacancy_hub::vacancy::{ListingRow, VacancyRecord};

fn sample_record(title: &str, from: Option<u64>, to: Option<u64>) -> VacancyRecord {
    VacancyRecord::new(title, "https://hh.ru/vacancy/100")
        .with_salary(from, to, "RUR")
        .with_employer("ООО Ромашка")
        .with_snippet("Опыт работы от 3 лет", "Разработка сервисов")
}

fn sample_row(id: i64, title: &str, salary: &str) -> ListingRow {
    ListingRow {
        id: Some(id),
        title: title.to_string(),
        link: format!("https://hh.ru/vacancy/{id}"),
        salary: salary.to_string(),
        description: "Опыт работы от 3 лет".to_string(),
    }
}

fn assert_flat_round_trip<S, F>(path: &Path, open: F)
where
    S: VacancyStorage<Record = ListingRow>,
    F: Fn(&Path) -> S,
{
    let rows = vec![
        sample_row(1, "Вакансия 1", "100000-200000 RUR"),
        sample_row(2, "Вакансия 2", "not specified"),
    ];
    {
        let mut store = open(path);
        for row in &rows {
            store.add(row.clone()).expect("add row");
        }
    }

    let reopened = open(path);
    assert_eq!(reopened.query(None), rows);
}

#[test]
fn json_store_round_trips_structured_records() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("vacancies.json");
    let record = sample_record("Вакансия 1", Some(100_000), None);

    {
        let mut store = JsonStore::open(&path).expect("open");
        store.add(record.clone()).expect("add");
    }

    let reopened = JsonStore::open(&path).expect("reopen");
    assert_eq!(reopened.query(None), vec![record.with_id(1)]);

    let raw: serde_json::Value =
        serde_json::from_slice(&fs::read(&path).expect("read")).expect("json");
    assert_eq!(raw[0]["salary_from"], serde_json::json!(100_000));
    assert_eq!(raw[0]["salary_to"], serde_json::json!(0));
}

#[test]
fn csv_store_round_trips_flat_rows() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("vacancies.csv");
    assert_flat_round_trip(&path, |path| CsvStore::open(path).expect("open"));

    let text = fs::read_to_string(&path).expect("read");
    assert!(text.starts_with("id,title,link,salary,description\n"));
}

#[test]
fn spreadsheet_store_round_trips_flat_rows() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("vacancies.xlsx");
    assert_flat_round_trip(&path, |path| {
        SpreadsheetStore::open_with(path, SpreadsheetCodec::new("Вакансии")).expect("open")
    });
}

#[test]
fn text_store_round_trips_flat_rows() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("vacancies.txt");
    assert_flat_round_trip(&path, |path| TextStore::open(path).expect("open"));
}

#[test]
fn json_scenario_find_then_delete() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("vacancies.json");
    {
        let mut store = JsonStore::open(&path).expect("open");
        store
            .add(sample_record("Вакансия 1", Some(50), Some(80)))
            .expect("add first");
        store
            .add(sample_record("Вакансия 2", None, None))
            .expect("add second");
    }

    let mut store = JsonStore::open(&path).expect("reopen");
    let criteria = Criteria::new().with(VacancyField::Title, "Вакансия 2");
    let found = store.query(Some(&criteria));
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "Вакансия 2");

    let id = found[0].id.expect("persisted id");
    store.delete(id).expect("delete");
    let remaining = store.query(None);
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].title, "Вакансия 1");

    let reopened = JsonStore::open(&path).expect("reopen after delete");
    assert_eq!(reopened.query(None), remaining);
}

#[test]
fn query_by_id_and_repeat_queries_agree() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = CsvStore::open(dir.path().join("v.csv")).expect("open");
    store.add(sample_row(1, "A", "1-2 RUR")).expect("add");
    store.add(sample_row(2, "B", "3-4 RUR")).expect("add");
    store.add(sample_row(1, "C", "5-6 RUR")).expect("add");

    let criteria = Criteria::new().with(ListingField::Id, 1_i64);
    let first = store.query(Some(&criteria));
    let second = store.query(Some(&criteria));
    assert_eq!(first, second);
    assert_eq!(
        first.iter().map(|row| row.title.as_str()).collect::<Vec<_>>(),
        ["A", "C"]
    );

    let titles: Vec<_> = store.query(None).into_iter().map(|row| row.title).collect();
    assert_eq!(titles, ["A", "B", "C"]);

    let none = Criteria::new().with(ListingField::Title, "a");
    assert!(store.query(Some(&none)).is_empty());
}

#[test]
fn deleting_unknown_id_changes_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("v.txt");
    let mut store = TextStore::open(&path).expect("open");
    store.add(sample_row(1, "A", "not specified")).expect("add");
    let before = store.query(None);
    let written = fs::read(&path).expect("read");

    store.delete(42).expect("delete unknown");
    assert_eq!(store.query(None), before);
    assert_eq!(fs::read(&path).expect("read"), written);
}

#[test]
fn delimiter_inside_a_field_breaks_reload() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("v.txt");
    {
        let mut store = TextStore::open(&path).expect("open");
        store
            .add(sample_row(1, "Rust; remote", "not specified"))
            .expect("add writes verbatim");
    }

    let error = TextStore::open(&path).expect_err("reload must fail");
    assert!(matches!(error, StorageError::Format { .. }));
}

#[test]
fn corrupt_files_fail_closed_for_every_backend() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cases = [
        (BackendKind::Json, "v.json", "[{\"title\": "),
        (BackendKind::Csv, "v.csv", "id,title\n1,A\n"),
        (BackendKind::Spreadsheet, "v.xlsx", "not a workbook"),
        (BackendKind::Text, "v.txt", "one;two\n"),
    ];

    for (kind, name, contents) in cases {
        let path = dir.path().join(name);
        fs::write(&path, contents).expect("seed");
        let error = AnyStore::open(kind, &path, "Vacancies").expect_err("corrupt store");
        assert!(
            matches!(error, StorageError::Format { .. }),
            "{kind}: unexpected error {error:?}"
        );
    }
}

#[test]
fn missing_files_open_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    for kind in [
        BackendKind::Json,
        BackendKind::Csv,
        BackendKind::Spreadsheet,
        BackendKind::Text,
    ] {
        let path = dir.path().join(format!("absent.{}", kind.label()));
        let store = AnyStore::open(kind, &path, "Vacancies").expect("open");
        assert!(store.list().is_empty());
        assert!(!path.exists());
    }
}

#[test]
fn any_store_round_trips_every_backend() {
    let dir = tempfile::tempdir().expect("tempdir");
    for kind in [
        BackendKind::Json,
        BackendKind::Csv,
        BackendKind::Spreadsheet,
        BackendKind::Text,
    ] {
        let path = dir.path().join(format!("store.{}", kind.label()));
        {
            let mut store = AnyStore::open(kind, &path, "Vacancies").expect("open");
            store
                .add_vacancy(&sample_record("Вакансия 1", Some(100), Some(200)))
                .expect("add");
        }

        let store = AnyStore::open(kind, &path, "Vacancies").expect("reopen");
        let listed = store.list();
        assert_eq!(listed.len(), 1, "{kind}");
        assert_eq!(listed[0].id(), Some(1), "{kind}");
        assert_eq!(listed[0].title(), "Вакансия 1", "{kind}");
        assert_eq!(listed[0].salary_label(), "100-200 RUR", "{kind}");
        assert_eq!(store.find("title", "Вакансия 1").expect("find").len(), 1);
    }
}

#[test]
fn spreadsheet_refuses_ids_it_cannot_store_exactly() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("v.xlsx");
    let mut store = SpreadsheetStore::open(&path).expect("open");
    store
        .add(sample_row(9_007_199_254_740_992, "edge", "not specified"))
        .expect("2^53 is exact");

    let error = store
        .add(sample_row(9_007_199_254_740_993, "too big", "not specified"))
        .expect_err("id would be rounded");
    assert!(matches!(error, StorageError::Encode { .. }));

    let reopened = SpreadsheetStore::open(&path).expect("reopen");
    let ids: Vec<_> = reopened.query(None).into_iter().map(|row| row.id).collect();
    assert_eq!(ids, [Some(9_007_199_254_740_992)]);
}
