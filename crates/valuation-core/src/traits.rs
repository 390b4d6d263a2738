use crate::{FinancialMetricsSnapshot, ValuationError};
use async_trait::async_trait;

/// Seam to the external market-data collaborator. The engine consumes
/// this trait; it never fetches anything itself.
#[async_trait]
pub trait SnapshotProvider: Send + Sync {
    async fn fetch_snapshot(&self, ticker: &str)
        -> Result<FinancialMetricsSnapshot, ValuationError>;

    /// Annual revenues ordered most recent first. An empty vector means
    /// no usable history; the growth estimator falls back accordingly.
    async fn fetch_annual_revenues(&self, ticker: &str) -> Result<Vec<f64>, ValuationError>;
}
