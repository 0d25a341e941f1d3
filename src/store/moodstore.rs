use async_trait::async_trait;

use crate::models::moodmodel::{AnalysisResult, MoodRecord};
use crate::store::kv::{StoreClient, StoreError, LAST_ANALYSIS_KEY, LAST_CHECKIN_KEY, RECORDS_KEY};

#[async_trait]
pub trait MoodStoreExt {
    async fn load_records(&self) -> Result<Vec<MoodRecord>, StoreError>;
    async fn save_records(&self, records: &[MoodRecord]) -> Result<(), StoreError>;

    /// Records are append-only; existing entries are never rewritten.
    async fn append_record(&self, record: MoodRecord) -> Result<(), StoreError>;

    async fn load_last_analysis(&self) -> Result<Option<AnalysisResult>, StoreError>;
    async fn save_last_analysis(&self, analysis: &AnalysisResult) -> Result<(), StoreError>;

    async fn load_last_checkin_ms(&self) -> Result<Option<i64>, StoreError>;
    async fn save_last_checkin_ms(&self, timestamp_ms: i64) -> Result<(), StoreError>;
}

#[async_trait]
impl MoodStoreExt for StoreClient {
    async fn load_records(&self) -> Result<Vec<MoodRecord>, StoreError> {
        Ok(self.load_json(RECORDS_KEY).await?.unwrap_or_default())
    }

    async fn save_records(&self, records: &[MoodRecord]) -> Result<(), StoreError> {
        self.save_json(RECORDS_KEY, &records).await
    }

    async fn append_record(&self, record: MoodRecord) -> Result<(), StoreError> {
        let mut records = self.load_records().await?;
        records.push(record);
        self.save_records(&records).await
    }

    async fn load_last_analysis(&self) -> Result<Option<AnalysisResult>, StoreError> {
        self.load_json(LAST_ANALYSIS_KEY).await
    }

    async fn save_last_analysis(&self, analysis: &AnalysisResult) -> Result<(), StoreError> {
        self.save_json(LAST_ANALYSIS_KEY, analysis).await
    }

    async fn load_last_checkin_ms(&self) -> Result<Option<i64>, StoreError> {
        self.load_json(LAST_CHECKIN_KEY).await
    }

    async fn save_last_checkin_ms(&self, timestamp_ms: i64) -> Result<(), StoreError> {
        self.save_json(LAST_CHECKIN_KEY, &timestamp_ms).await
    }
}
