//! Mapping between `shimdns_domain` types and their `hickory_proto` counterparts.

use hickory_proto::rr::rdata::{A, AAAA, MX, TXT};
use hickory_proto::rr::{Name, RData, Record, RecordType as HickoryRecordType};
use shimdns_domain::{DnsRecord, DomainError, QueryType, RecordData, RecordType};

/// Maximum length of a single TXT character-string.
const TXT_CHUNK_LEN: usize = 255;

pub struct RecordTypeMapper;

impl RecordTypeMapper {
    /// Convert domain QueryType → hickory RecordType (for building queries)
    pub fn to_hickory(query_type: &QueryType) -> HickoryRecordType {
        match query_type {
            QueryType::Record(RecordType::A) => HickoryRecordType::A,
            QueryType::Record(RecordType::AAAA) => HickoryRecordType::AAAA,
            QueryType::Record(RecordType::MX) => HickoryRecordType::MX,
            QueryType::Record(RecordType::TXT) => HickoryRecordType::TXT,
            QueryType::Any => HickoryRecordType::ANY,
            QueryType::Other(code) => HickoryRecordType::from(*code),
        }
    }

    /// Convert hickory RecordType → domain QueryType (for incoming queries)
    ///
    /// Types without a local representation map to `QueryType::Other`.
    pub fn from_hickory(hickory_type: HickoryRecordType) -> QueryType {
        match hickory_type {
            HickoryRecordType::A => QueryType::Record(RecordType::A),
            HickoryRecordType::AAAA => QueryType::Record(RecordType::AAAA),
            HickoryRecordType::MX => QueryType::Record(RecordType::MX),
            HickoryRecordType::TXT => QueryType::Record(RecordType::TXT),
            HickoryRecordType::ANY => QueryType::Any,
            other => QueryType::Other(u16::from(other)),
        }
    }

    /// Build the answer record for a local record.
    pub fn to_record(record: &DnsRecord) -> Result<Record, DomainError> {
        let name = Self::name_from_str(&record.name)?;

        let rdata = match &record.data {
            RecordData::A(ip) => RData::A(A(*ip)),
            RecordData::AAAA(ip) => RData::AAAA(AAAA(*ip)),
            RecordData::MX {
                preference,
                exchange,
            } => RData::MX(MX::new(*preference, Self::name_from_str(exchange)?)),
            RecordData::TXT(text) => {
                let mut chunks: Vec<&[u8]> = text.as_bytes().chunks(TXT_CHUNK_LEN).collect();
                if chunks.is_empty() {
                    chunks.push(b"");
                }
                RData::TXT(TXT::from_bytes(chunks))
            }
        };

        Ok(Record::from_rdata(name, record.ttl, rdata))
    }

    /// Build a fully qualified name from dotted text, taking each label's bytes
    /// as-is so that data such as `Hola Mundo Test` survives unescaped.
    pub fn name_from_str(name: &str) -> Result<Name, DomainError> {
        let trimmed = name.strip_suffix('.').unwrap_or(name);
        Name::from_labels(trimmed.split('.').map(str::as_bytes)).map_err(|e| {
            DomainError::Serialization(format!("Invalid domain name '{}': {}", name, e))
        })
    }

    /// Render a name as dotted text without escaping, e.g. `example.com`.
    pub fn name_to_string(name: &Name) -> String {
        name.iter()
            .map(String::from_utf8_lossy)
            .collect::<Vec<_>>()
            .join(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_type_round_trip_through_hickory() {
        for qt in [
            QueryType::Record(RecordType::A),
            QueryType::Record(RecordType::AAAA),
            QueryType::Record(RecordType::MX),
            QueryType::Record(RecordType::TXT),
            QueryType::Any,
        ] {
            assert_eq!(RecordTypeMapper::from_hickory(RecordTypeMapper::to_hickory(&qt)), qt);
        }
    }

    #[test]
    fn test_unsupported_type_maps_to_other() {
        assert_eq!(
            RecordTypeMapper::from_hickory(HickoryRecordType::CNAME),
            QueryType::Other(5)
        );
    }

    #[test]
    fn test_name_with_spaces_is_kept_verbatim() {
        let name = RecordTypeMapper::name_from_str("Hola Mundo Test").unwrap();
        assert_eq!(name.num_labels(), 1);
        assert_eq!(RecordTypeMapper::name_to_string(&name), "Hola Mundo Test");
    }

    #[test]
    fn test_name_trailing_dot_is_optional() {
        let a = RecordTypeMapper::name_from_str("example.com").unwrap();
        let b = RecordTypeMapper::name_from_str("example.com.").unwrap();
        assert_eq!(a, b);
        assert!(a.is_fqdn());
    }

    #[test]
    fn test_long_txt_is_split_into_character_strings() {
        let text = "x".repeat(600);
        let record = DnsRecord::new("t.example", RecordData::TXT(text.into()), 5).unwrap();
        let hickory = RecordTypeMapper::to_record(&record).unwrap();
        match hickory.data() {
            RData::TXT(txt) => {
                let lens: Vec<usize> = txt.iter().map(|s| s.len()).collect();
                assert_eq!(lens, vec![255, 255, 90]);
            }
            other => panic!("unexpected rdata {:?}", other),
        }
    }
}
