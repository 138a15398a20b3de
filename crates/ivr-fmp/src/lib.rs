//! Financial Modeling Prep (FMP) data provider for the IVR screener.
//!
//! [`FmpClient`] implements [`ivr_traits::DataProvider`]: one `fetch` pulls
//! about 400 days of daily closes plus the profile, quote, TTM ratios, TTM
//! key metrics, latest annual growth and statements, and the industry P/E,
//! and maps them into a [`ivr_traits::RawFinancials`] snapshot.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ivr_fmp::FmpClient;
//! use ivr_traits::DataProvider;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FmpClient::from_env()?;
//!
//!     // Full snapshot, ready for scoring
//!     let data = client.fetch("AAPL").await?;
//!
//!     // Individual endpoints
//!     let ratios = client.ratios_ttm("AAPL").await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Environment Variables
//!
//! Set `FMP_API_KEY` in your environment or `.env` file:
//!
//! ```bash
//! FMP_API_KEY=your_api_key_here
//! ```

mod client;
mod error;
mod types;

pub use client::FmpClient;
pub use error::FmpError;
pub use types::*;

/// Result type for FMP operations.
pub type Result<T> = std::result::Result<T, FmpError>;
