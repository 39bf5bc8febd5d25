//! core/report/mod.rs
//!
//! PDF report of a scan (and, when present, its Last.fm comparison).
//!
//! Two steps:
//! - [`build`] lays the report out as pages of draw operations (A4, mm,
//!   origin top-left, like a sheet of paper)
//! - [`pdf::render`] turns that page model into PDF bytes
//!
//! Both are pure: the same input always gives the same bytes. The only
//! time-dependent text is the "Generated on" date, which is passed in.

pub mod layout;
pub mod pdf;

use std::path::Path;

use chrono::NaiveDate;

use super::error::ReportError;
use super::types::{LastFmComparison, Track};

pub use layout::build;

pub const PAGE_WIDTH: f64 = 210.0;
pub const PAGE_HEIGHT: f64 = 297.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// How a closed shape is painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Fill(Rgb),
    Stroke { color: Rgb, width: f64 },
}

/// One drawing primitive. Coordinates in millimetres from the top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        fill: Rgb,
    },
    RoundedRect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        radius: f64,
        paint: Paint,
    },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        color: Rgb,
        width: f64,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        fill: Rgb,
    },
    /// `y` is the text baseline. `size` is in points.
    Text {
        x: f64,
        y: f64,
        size: f64,
        color: Rgb,
        align: Align,
        text: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    pub pages: Vec<Page>,
}

/// `Music-Collection-Analysis-YYYY-MM-DD.pdf`
pub fn file_name(date: NaiveDate) -> String {
    format!("Music-Collection-Analysis-{}.pdf", date.format("%Y-%m-%d"))
}

/// Lay out, render, and write the report to `path`.
pub fn export(
    path: &Path,
    tracks: &[Track],
    comparison: Option<&LastFmComparison>,
    generated_on: NaiveDate,
) -> Result<(), ReportError> {
    let report = build(tracks, comparison, generated_on);
    let bytes = pdf::render(&report);

    std::fs::write(path, &bytes).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(
        "Wrote {} page report to {} ({} bytes)",
        report.pages.len(),
        path.display(),
        bytes.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 9).unwrap();
        assert_eq!(file_name(date), "Music-Collection-Analysis-2025-01-09.pdf");
    }

    #[test]
    fn export_writes_a_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.pdf");
        let date = NaiveDate::from_ymd_opt(2025, 1, 9).unwrap();

        export(&path, &[], None, date).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.4"));
    }

    #[test]
    fn export_reports_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("report.pdf");
        let date = NaiveDate::from_ymd_opt(2025, 1, 9).unwrap();

        let err = export(&path, &[], None, date).unwrap_err();
        assert!(err.to_string().starts_with("Failed to write report"));
    }
}
