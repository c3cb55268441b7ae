//! Return metrics: simple ROI, annualized ROI and IRR

pub mod roi;
pub mod irr;
mod summary;

pub use roi::{roi, annualized_roi};
pub use irr::{irr, irr_with_config, net_present_value, IrrConfig};
pub use summary::{summarize, ReturnSummary};
