//! Quote store - domain models, service, and traits.

mod quotes_constants;
mod quotes_model;
mod quotes_service;
mod quotes_traits;


pub use quotes_constants::*;
pub use quotes_model::{
    distinct_categories, pick_random, LocalChanges, NewQuote, Quote, QuoteSource,
    RemoteApplyResult, SyncState,
};
pub use quotes_service::QuoteService;
pub use quotes_traits::QuoteServiceTrait;
