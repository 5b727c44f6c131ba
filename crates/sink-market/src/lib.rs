//! Market boundary between facilities and the clearing process.
//!
//! Each period a trader submits request portfolios for every resource
//! kind it deals in. The matcher turns those into trades, bounded by the
//! capacity constraints carried on each portfolio, and hands the filled
//! resources back to the requester.
//!
//! # Flow
//!
//! ```text
//! TimeListener::tick()
//!   → Trader::material_requests() / generic_requests()
//!   → [external matcher] → Vec<TradeResponse<R>>
//!   → Trader::accept_material_trades() / accept_generic_trades()
//! TimeListener::tock()
//! ```

pub mod portfolio;
pub mod trade;
pub mod traits;

pub use portfolio::{CapacityConstraint, Portfolios, Request, RequestPortfolio};
pub use trade::{Trade, TradeResponse};
pub use traits::{TimeListener, Trader};
