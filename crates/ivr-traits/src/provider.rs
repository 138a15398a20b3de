//! Market data provider abstraction.

use async_trait::async_trait;

use crate::{RawFinancials, Result};

/// A source of per-ticker fundamentals and daily closes.
///
/// Implementations should tolerate missing individual fields (leaving them
/// `None`) and only fail when the snapshot is unusable as a whole, such as
/// when no price history exists. Transient failures should be reported
/// with a recoverable [`crate::IvrError`] variant so callers can retry.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Provider name used in logs.
    fn name(&self) -> &str;

    /// Fetches a fresh snapshot for one ticker.
    async fn fetch(&self, symbol: &str) -> Result<RawFinancials>;
}
