use super::{Codec, CodecError};
use crate::vacancy::VacancyRecord;

/// Structured records as one pretty-printed JSON array.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    type Record = VacancyRecord;

    fn decode(&self, bytes: &[u8]) -> Result<Vec<VacancyRecord>, CodecError> {
        serde_json::from_slice(bytes).map_err(CodecError::malformed)
    }

    fn encode(&self, records: &[VacancyRecord]) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec_pretty(records).map_err(CodecError::encode)
    }
}
