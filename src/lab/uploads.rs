use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Metadata for one received upload. The lab never stores file content,
/// only what the client declared about it.
#[derive(Clone, Debug, Serialize)]
pub struct UploadRecord {
    pub id: String,
    pub field_name: String,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: usize,
    pub received_at: DateTime<Utc>,
}

/// In-memory log of uploads received since startup
#[derive(Debug, Default)]
pub struct UploadLog {
    records: Vec<UploadRecord>,
}

impl UploadLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &mut self,
        field_name: &str,
        file_name: &str,
        content_type: &str,
        size_bytes: usize,
    ) -> UploadRecord {
        let record = UploadRecord {
            id: Uuid::new_v4().to_string(),
            field_name: field_name.to_string(),
            file_name: file_name.to_string(),
            content_type: content_type.to_string(),
            size_bytes,
            received_at: Utc::now(),
        };
        self.records.push(record.clone());
        record
    }

    pub fn records(&self) -> &[UploadRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn total_bytes(&self) -> usize {
        self.records.iter().map(|r| r.size_bytes).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_insertion_order() {
        let mut log = UploadLog::new();
        log.record("file", "a.txt", "text/plain", 10);
        log.record("file", "b.png", "image/png", 20);
        assert_eq!(log.len(), 2);
        assert_eq!(log.records()[0].file_name, "a.txt");
        assert_eq!(log.records()[1].file_name, "b.png");
    }

    #[test]
    fn test_total_bytes() {
        let mut log = UploadLog::new();
        log.record("file", "a.txt", "text/plain", 10);
        log.record("file", "b.txt", "text/plain", 32);
        assert_eq!(log.total_bytes(), 42);
    }

    #[test]
    fn test_records_get_unique_ids() {
        let mut log = UploadLog::new();
        let a = log.record("file", "a.txt", "text/plain", 1);
        let b = log.record("file", "a.txt", "text/plain", 1);
        assert_ne!(a.id, b.id);
    }
}
