//! Portfolio Adapters

mod paper;

pub use paper::{PaperPortfolio, PortfolioError};
