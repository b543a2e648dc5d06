mod text;

pub use text::TextReportRenderer;
