//! Quote domain.
//!
//! - [`entities::Quote`]: a stored quotation with optional source and tags
//! - [`entities::NewQuote`]: a validated quote that has not been stored yet
//! - [`message::parse_message`]: split a free-form message into quote, URL and tags
//! - [`query::QuoteFilter`] / [`query::CollectionStats`]: listings and summaries
//! - [`text`]: length limits and tag normalisation

pub mod entities;
pub mod message;
pub mod query;
pub mod text;
