//! # spana-accesslog
//!
//! Upstream I/O boundary of the estimator: the fixed access-line grammar and
//! line-oriented input sources (plain or gzip-compressed). Lines that do not
//! match the grammar are not errors — webservers log plenty of traffic that
//! is not a content fetch — so parsing yields an `Option`.

mod error;
mod line;
mod source;

pub use error::AccessLogError;
pub use line::AccessLine;
pub use source::LineSource;
