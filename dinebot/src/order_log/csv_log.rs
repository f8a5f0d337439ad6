//! Append-only CSV order log.
//!
//! One row per placed order. The header is written when the file is created
//! (or found empty); fields are quoted per RFC 4180 when they contain a comma,
//! quote or line break.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use super::{OrderLogError, OrderRecord, OrderSink};

pub const CSV_HEADER: &str =
    "order_number,user_id,timestamp,items,total_cost,delivery_address,status";

fn quote(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn to_row(r: &OrderRecord) -> String {
    let fields = [
        r.order_number.to_string(),
        quote(&r.user_id),
        quote(&r.timestamp),
        quote(&r.items),
        format!("{:.2}", r.total_cost.as_dollars()),
        quote(&r.delivery_address),
        r.status.to_string(),
    ];
    fields.join(",")
}

/// CSV file sink. Appends are serialized so concurrent turns never interleave rows.
#[derive(Debug)]
pub struct CsvOrderLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl CsvOrderLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl OrderSink for CsvOrderLog {
    async fn append(&self, record: &OrderRecord) -> Result<(), OrderLogError> {
        let _guard = self.lock.lock().await;
        let needs_header = match tokio::fs::metadata(&self.path).await {
            Ok(m) => m.len() == 0,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => true,
            Err(e) => return Err(e.into()),
        };

        let mut out = String::new();
        if needs_header {
            out.push_str(CSV_HEADER);
            out.push_str("\r\n");
        }
        out.push_str(&to_row(record));
        out.push_str("\r\n");

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(out.as_bytes()).await?;
        file.flush().await?;
        tracing::info!(
            order_number = record.order_number,
            path = %self.path.display(),
            "order logged"
        );
        Ok(())
    }
}
