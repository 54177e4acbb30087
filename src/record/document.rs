//! Named-field view of a record, handed to the backend client for insertion.

use crate::record::{Header, Record};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Ordered name/value pairs built from a header and a record.
///
/// Header names that repeat keep only their first occurrence, matching
/// [`Header::position`]. Header names past the end of the record map to the
/// empty string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    entries: Vec<(String, String)>,
}

impl Document {
    pub fn from_record(header: &Header, record: &Record) -> Self {
        let mut entries: Vec<(String, String)> = Vec::with_capacity(header.len());
        for name in header.names() {
            if entries.iter().any(|(n, _)| n == name) {
                continue;
            }
            let value = record.retrieve_by_name(header, name).to_string();
            entries.push((name.clone(), value));
        }
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_from_record() {
        let header = Header::new(["id", "name", "id", "email"]);
        let record = Record::from_fields(["1", "Alice", "9"]);
        let doc = record.to_document(&header);

        assert_eq!(doc.len(), 3);
        assert_eq!(doc.get("id"), Some("1"));
        assert_eq!(doc.get("name"), Some("Alice"));
        assert_eq!(doc.get("email"), Some(""));
        assert_eq!(doc.get("phone"), None);

        let names: Vec<_> = doc.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["id", "name", "email"]);
    }

    #[test]
    fn test_document_serializes_as_ordered_map() -> anyhow::Result<()> {
        let header = Header::new(["name", "age"]);
        let record = Record::from_fields(["Bob", "30"]);
        let json = serde_json::to_string(&record.to_document(&header))?;
        assert_eq!(json, r#"{"name":"Bob","age":"30"}"#);
        Ok(())
    }
}
