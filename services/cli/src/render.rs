use vacancy_hub::error::AppError;
use vacancy_hub::ingest::IngestReport;
use vacancy_hub::storage::StoredVacancy;

pub(crate) fn print_records(records: &[StoredVacancy], as_json: bool) -> Result<(), AppError> {
    if as_json {
        println!("{}", to_json(records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No vacancies found.");
        return Ok(());
    }

    for record in records {
        println!("{}", render_record(record));
        println!();
    }
    Ok(())
}

pub(crate) fn print_report(report: &IngestReport, as_json: bool) -> Result<(), AppError> {
    if as_json {
        println!("{}", to_json(report)?);
    } else {
        println!(
            "Fetched {} listings: stored {}, rejected {}",
            report.fetched, report.stored, report.rejected
        );
    }
    Ok(())
}

fn render_record(record: &StoredVacancy) -> String {
    let heading = match record.id() {
        Some(id) => format!("#{id}"),
        None => "#-".to_string(),
    };
    match record {
        StoredVacancy::Structured(vacancy) => format!("{heading}\n{vacancy}"),
        StoredVacancy::Flat(row) => format!(
            "{heading}\nTitle: {}\nSalary: {}\nLink: {}\nDescription: {}",
            row.title, row.salary, row.link, row.description
        ),
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(AppError::Output)
}
