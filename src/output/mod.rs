pub mod formatter;

pub use formatter::{
    format_scales_list, format_score, format_scores_table, format_summary_table,
    should_use_colors,
};
