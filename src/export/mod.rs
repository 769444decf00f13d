//! Export module for the expense tracker
//!
//! Produces the two shareable artifacts:
//! - PDF: the expense table, paginated for US Letter
//! - SVG: the category pie chart

pub mod chart;
pub mod pdf;

use std::path::{Path, PathBuf};

pub use chart::{pie_chart_svg, render_pie_chart, save_pie_chart, ChartOutcome, CHART_TITLE};
pub use pdf::{export_expenses_pdf, render_pdf, ExportOutcome, PageLayout};

/// Append `extension` when the path has none
pub fn with_default_extension(path: &Path, extension: &str) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_extension() {
        assert_eq!(
            with_default_extension(Path::new("report"), "pdf"),
            PathBuf::from("report.pdf")
        );
        assert_eq!(
            with_default_extension(Path::new("out/report.PDF"), "pdf"),
            PathBuf::from("out/report.PDF")
        );
    }
}
