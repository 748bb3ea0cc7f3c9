pub mod bands;
pub mod submission;
pub mod summary;

pub use bands::{Assessment, RiskBand};
pub use submission::{header, write_csv, Submission};
pub use summary::{parse_score_cell, summarize, ScaleSummary, Summary};
