use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use rust_xlsxwriter::Workbook;

use super::{Codec, CodecError, LISTING_COLUMNS};
use crate::vacancy::ListingRow;

pub const DEFAULT_SHEET_NAME: &str = "Vacancies";

/// Largest id a numeric cell holds exactly.
const MAX_CELL_ID: i64 = 1 << 53;

/// Flat rows in a single named worksheet of an `.xlsx` workbook.
///
/// Ids are written as numeric cells and every other column as text, so a
/// reload restores the types without any caller-side coercion.
#[derive(Debug, Clone)]
pub struct SpreadsheetCodec {
    sheet_name: String,
}

impl SpreadsheetCodec {
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
        }
    }
}

impl Default for SpreadsheetCodec {
    fn default() -> Self {
        Self::new(DEFAULT_SHEET_NAME)
    }
}

impl Codec for SpreadsheetCodec {
    type Record = ListingRow;

    fn decode(&self, bytes: &[u8]) -> Result<Vec<ListingRow>, CodecError> {
        let mut workbook: Xlsx<_> =
            Xlsx::new(Cursor::new(bytes)).map_err(CodecError::malformed)?;
        let range = workbook
            .worksheet_range(&self.sheet_name)
            .map_err(CodecError::malformed)?;

        let mut rows = range.rows();
        let header: Vec<String> = rows
            .next()
            .map(|cells| cells.iter().map(|cell| cell.to_string()).collect())
            .unwrap_or_default();
        if header.iter().map(String::as_str).ne(LISTING_COLUMNS) {
            return Err(CodecError::malformed(format!(
                "sheet '{}' has header {:?}, expected {}",
                self.sheet_name,
                header,
                LISTING_COLUMNS.join(",")
            )));
        }

        rows.enumerate()
            .map(|(index, cells)| decode_row(index + 2, cells))
            .collect()
    }

    fn encode(&self, rows: &[ListingRow]) -> Result<Vec<u8>, CodecError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(&self.sheet_name)
            .map_err(CodecError::encode)?;

        for (column, name) in LISTING_COLUMNS.iter().enumerate() {
            worksheet
                .write_string(0, column as u16, *name)
                .map_err(CodecError::encode)?;
        }

        for (index, row) in rows.iter().enumerate() {
            let line = u32::try_from(index + 1).map_err(CodecError::encode)?;
            if let Some(id) = row.id {
                if id.unsigned_abs() > MAX_CELL_ID as u64 {
                    return Err(CodecError::encode(format!(
                        "row {}: id {id} does not fit a numeric cell exactly",
                        line + 1
                    )));
                }
                worksheet
                    .write_number(line, 0, id as f64)
                    .map_err(CodecError::encode)?;
            }
            let texts = [&row.title, &row.link, &row.salary, &row.description];
            for (offset, text) in texts.into_iter().enumerate() {
                if text.is_empty() {
                    continue;
                }
                worksheet
                    .write_string(line, offset as u16 + 1, text.as_str())
                    .map_err(CodecError::encode)?;
            }
        }

        workbook.save_to_buffer().map_err(CodecError::encode)
    }
}

fn decode_row(line: usize, cells: &[Data]) -> Result<ListingRow, CodecError> {
    let cell = |column: usize| cells.get(column).unwrap_or(&Data::Empty);

    Ok(ListingRow {
        id: decode_id(line, cell(0))?,
        title: decode_text(cell(1)),
        link: decode_text(cell(2)),
        salary: decode_text(cell(3)),
        description: decode_text(cell(4)),
    })
}

fn decode_id(line: usize, cell: &Data) -> Result<Option<i64>, CodecError> {
    match cell {
        Data::Empty => Ok(None),
        Data::Int(value) => Ok(Some(*value)),
        Data::Float(value) if value.fract() == 0.0 => Ok(Some(*value as i64)),
        other => Err(CodecError::malformed(format!(
            "row {line}: id '{other}' is not an integer"
        ))),
    }
}

fn decode_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(text) => text.clone(),
        other => other.to_string(),
    }
}
