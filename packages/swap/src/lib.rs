#![no_std]

pub mod types;
pub mod quote;
pub mod engine;

// Re-export types
pub use types::{QuoteContext, SwapParams, SwapResult, SwapState, SwapStop};

// Re-export engine functions
pub use engine::{default_price_limit, engine_swap, quote_swap};
pub use quote::compute_step_quote;
