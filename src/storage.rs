use crate::errors::StoreError;
use crate::models::Record;
use std::{
    env,
    path::{Path, PathBuf},
};
use tokio::fs;

/// CSV header, in file order. Matches the `Record` field names so serde
/// can map rows without extra renaming.
pub const COLUMNS: [&str; 7] = [
    "date",
    "coins_before",
    "coins_after",
    "coins_earned",
    "play_count",
    "tsum_used",
    "memo",
];

// The file is UTF-8 with a signature so spreadsheet imports pick the
// right encoding.
const BOM: &[u8] = b"\xef\xbb\xbf";

pub fn resolve_store_path() -> PathBuf {
    if let Ok(path) = env::var("COIN_LOG_PATH") {
        return PathBuf::from(path);
    }

    PathBuf::from("data/tsum_coin_log.csv")
}

/// The persisted record table: one CSV file, read in full and replaced in
/// full. Swapping the backend means replacing this struct; callers only
/// see `Vec<Record>`.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates a header-only file on first run. Safe to call on every
    /// startup.
    pub async fn ensure_exists(&self) -> Result<(), StoreError> {
        if fs::try_exists(&self.path).await? {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        self.save_all(&[]).await
    }

    /// Reads every row in file order. A row that does not match the
    /// seven-column shape fails the whole load.
    pub async fn load_all(&self) -> Result<Vec<Record>, StoreError> {
        let bytes = fs::read(&self.path).await?;
        let bytes = bytes.strip_prefix(BOM).unwrap_or(&bytes);

        let mut reader = csv::Reader::from_reader(bytes);
        let headers = reader.headers()?.clone();
        if headers.iter().ne(COLUMNS) {
            return Err(StoreError::Header(
                headers.iter().collect::<Vec<_>>().join(","),
            ));
        }

        let mut records = Vec::new();
        for row in reader.deserialize() {
            records.push(row?);
        }
        Ok(records)
    }

    /// Rewrites the whole file: header plus the given rows, one write.
    pub async fn save_all(&self, records: &[Record]) -> Result<(), StoreError> {
        let mut body = Vec::new();
        {
            // The header row is written explicitly below; stop `serialize`
            // from emitting a second one.
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(&mut body);
            writer.write_record(COLUMNS)?;
            for record in records {
                writer.serialize(record)?;
            }
            writer.flush()?;
        }

        let mut payload = Vec::with_capacity(BOM.len() + body.len());
        payload.extend_from_slice(BOM);
        payload.extend_from_slice(&body);
        fs::write(&self.path, payload).await?;
        Ok(())
    }

    /// Exactly one new row per call.
    pub async fn append(&self, record: Record) -> Result<(), StoreError> {
        let mut records = self.load_all().await?;
        records.push(record);
        self.save_all(&records).await
    }
}
