//! Date candidate filtering and normalisation for French administrative text.

pub mod candidates;
pub mod months;
pub mod normalizer;
pub mod types;

pub use candidates::{
    encode_candidate_list, filter_dates, parse_candidate_list, render_candidate_list,
};
pub use normalizer::{DateNormalizer, DateSpan};
pub use types::*;

pub const TARGET_DATES: &str = "dates";
