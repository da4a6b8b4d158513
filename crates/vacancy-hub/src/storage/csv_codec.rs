use super::{Codec, CodecError, LISTING_COLUMNS};
use crate::vacancy::ListingRow;

/// Flat rows under a fixed `id,title,link,salary,description` header.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvCodec;

impl Codec for CsvCodec {
    type Record = ListingRow;

    fn decode(&self, bytes: &[u8]) -> Result<Vec<ListingRow>, CodecError> {
        if bytes.is_empty() {
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new().from_reader(bytes);
        let headers = reader.headers().map_err(CodecError::malformed)?;
        if headers.iter().ne(LISTING_COLUMNS) {
            return Err(CodecError::malformed(format!(
                "unexpected header {:?}, expected {}",
                headers.iter().collect::<Vec<_>>(),
                LISTING_COLUMNS.join(",")
            )));
        }

        reader
            .deserialize::<ListingRow>()
            .map(|row| row.map_err(CodecError::malformed))
            .collect()
    }

    fn encode(&self, rows: &[ListingRow]) -> Result<Vec<u8>, CodecError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());

        writer
            .write_record(LISTING_COLUMNS)
            .map_err(CodecError::encode)?;
        for row in rows {
            writer.serialize(row).map_err(CodecError::encode)?;
        }

        writer
            .into_inner()
            .map_err(|err| CodecError::encode(err.error()))
    }
}
