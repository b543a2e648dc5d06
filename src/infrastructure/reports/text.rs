use crate::application::{
    ApplicationResult,
    dto::{Orientation, ReportDocument},
    ports::reports::ReportRenderer,
};
use std::fmt::Write as _;

/// Fixed-width plain-text report, one block per page separated by form feeds.
#[derive(Debug, Clone, Copy)]
pub struct TextReportRenderer {
    portrait_width: usize,
    landscape_width: usize,
}

impl Default for TextReportRenderer {
    fn default() -> Self {
        Self {
            portrait_width: 80,
            landscape_width: 132,
        }
    }
}

impl TextReportRenderer {
    fn page_width(&self, orientation: Orientation) -> usize {
        match orientation {
            Orientation::Portrait => self.portrait_width,
            Orientation::Landscape => self.landscape_width,
        }
    }
}

fn fit(value: &str, width: usize) -> String {
    let flat: String = value
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    let count = flat.chars().count();
    if count <= width {
        format!("{flat:<width$}")
    } else if width > 1 {
        let mut cut: String = flat.chars().take(width - 1).collect();
        cut.push('~');
        cut
    } else {
        flat.chars().take(width).collect()
    }
}

impl ReportRenderer for TextReportRenderer {
    fn content_type(&self) -> &'static str {
        "text/plain; charset=utf-8"
    }

    fn file_extension(&self) -> &'static str {
        "txt"
    }

    fn render(&self, report: &ReportDocument) -> ApplicationResult<Vec<u8>> {
        let width = self.page_width(report.orientation);
        let columns = report.columns.len().max(1);
        let cell = (width.saturating_sub(columns - 1) / columns).max(4);
        let total_pages = report.pages.len().max(1);

        let mut out = String::new();
        let header = |out: &mut String, number: usize| {
            let _ = writeln!(out, "{}", report.title);
            let mut period = String::new();
            if let Some(from) = report.date_from {
                let _ = write!(period, "from {from} ");
            }
            if let Some(to) = report.date_to {
                let _ = write!(period, "to {to} ");
            }
            let _ = writeln!(
                out,
                "{period}generated {} | page {number} of {total_pages}",
                report.generated_at.format("%Y-%m-%d %H:%M UTC")
            );
            let labels: Vec<String> = report.columns.iter().map(|c| fit(&c.label, cell)).collect();
            let _ = writeln!(out, "{}", labels.join(" ").trim_end());
            let _ = writeln!(out, "{}", "-".repeat(width));
        };

        if report.pages.is_empty() {
            header(&mut out, 1);
            out.push_str("(no records)\n");
        }
        for (index, page) in report.pages.iter().enumerate() {
            if index > 0 {
                out.push('\u{0C}');
            }
            header(&mut out, page.number);
            for row in &page.rows {
                let cells: Vec<String> = row.iter().map(|v| fit(v, cell)).collect();
                let _ = writeln!(out, "{}", cells.join(" ").trim_end());
            }
        }

        Ok(out.into_bytes())
    }
}
