//! Pair Scan Module
//!
//! Screens every unordered pair of an instrument universe with the dynamic
//! hedge ratio pipeline and ranks them by leveraged strategy return.
//!
//! # Example
//!
//! ```ignore
//! use kalman_pairs::data::TiingoClient;
//! use kalman_pairs::discovery::{run_scan, ScanConfig};
//!
//! let client = TiingoClient::from_env()?;
//! let results = run_scan(&client, &ScanConfig::default(), chrono::Utc::now()).await?;
//! ```

pub mod config;
pub mod report;
pub mod scanner;

pub use config::{ScanConfig, DEFAULT_CANDIDATES};
pub use report::{render_table, to_rows, write_csv, ScanRow};
pub use scanner::{enumerate_pairs, fetch_universe, rank_results, run_scan, scan_pairs, PairScanResult};
