use super::{Codec, CodecError, LISTING_COLUMNS};
use crate::vacancy::ListingRow;

pub const TEXT_DELIMITER: char = ';';

/// One row per line, fields joined by `;` in `id;title;link;salary;description`
/// order.
///
/// Values are written verbatim: a delimiter or line break inside a field makes
/// that line unreadable on the next load.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextCodec;

impl Codec for TextCodec {
    type Record = ListingRow;

    fn decode(&self, bytes: &[u8]) -> Result<Vec<ListingRow>, CodecError> {
        let text = std::str::from_utf8(bytes).map_err(CodecError::malformed)?;
        text.lines()
            .enumerate()
            .map(|(index, line)| decode_line(index + 1, line))
            .collect()
    }

    fn encode(&self, rows: &[ListingRow]) -> Result<Vec<u8>, CodecError> {
        let delimiter = TEXT_DELIMITER.to_string();
        let mut out = String::new();
        for row in rows {
            let id = row.id.map(|id| id.to_string()).unwrap_or_default();
            let fields = [
                id.as_str(),
                row.title.as_str(),
                row.link.as_str(),
                row.salary.as_str(),
                row.description.as_str(),
            ];
            out.push_str(&fields.join(delimiter.as_str()));
            out.push('\n');
        }
        Ok(out.into_bytes())
    }
}

fn decode_line(line_number: usize, line: &str) -> Result<ListingRow, CodecError> {
    let parts: Vec<&str> = line.split(TEXT_DELIMITER).collect();
    let [id, title, link, salary, description] = parts[..] else {
        return Err(CodecError::malformed(format!(
            "line {line_number}: expected {} fields separated by '{TEXT_DELIMITER}', found {}",
            LISTING_COLUMNS.len(),
            parts.len()
        )));
    };

    let id = id.trim().parse::<i64>().map_err(|_| {
        CodecError::malformed(format!("line {line_number}: id '{id}' is not an integer"))
    })?;

    Ok(ListingRow {
        id: Some(id),
        title: title.to_string(),
        link: link.to_string(),
        salary: salary.to_string(),
        description: description.to_string(),
    })
}
