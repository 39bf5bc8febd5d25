//! Minimal PDF 1.4 writer for the report page model.
//!
//! One font (the built-in Helvetica, WinAnsi encoding), uncompressed
//! content streams, no metadata. Output depends only on the input.

use std::fmt::Write as _;

use super::{Align, DrawOp, PAGE_HEIGHT, PAGE_WIDTH, Page, Paint, Report, Rgb};

/// Points per millimetre.
const PT_PER_MM: f64 = 72.0 / 25.4;

/// Bezier control distance for a quarter circle of radius 1.
const KAPPA: f64 = 0.552_284_8;

/// Helvetica advance widths (1/1000 em) for 0x20..=0x7E.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0x30
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // 0x40
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 0x50
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // 0x60
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 0x70
];

/// Width used for bytes outside the ASCII table.
const FALLBACK_WIDTH: u16 = 556;

/// Serialize a report to PDF bytes.
pub fn render(report: &Report) -> Vec<u8> {
    let mut w = PdfWriter::default();

    // 1: catalog, 2: page tree, 3: font, then (page, content) pairs.
    let page_ids: Vec<usize> = (0..report.pages.len()).map(|i| 4 + i * 2).collect();

    w.object(1, b"<< /Type /Catalog /Pages 2 0 R >>");

    let kids = page_ids
        .iter()
        .map(|id| format!("{id} 0 R"))
        .collect::<Vec<_>>()
        .join(" ");
    w.object(
        2,
        format!(
            "<< /Type /Pages /Kids [{kids}] /Count {} >>",
            report.pages.len()
        )
        .as_bytes(),
    );

    w.object(
        3,
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>",
    );

    let media = format!("[0 0 {} {}]", num(mm(PAGE_WIDTH)), num(mm(PAGE_HEIGHT)));

    for (page, &id) in report.pages.iter().zip(&page_ids) {
        let content_id = id + 1;

        w.object(
            id,
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox {media} \
                 /Resources << /Font << /F1 3 0 R >> >> /Contents {content_id} 0 R >>"
            )
            .as_bytes(),
        );

        let stream = content_stream(page);
        let mut body = format!("<< /Length {} >>\nstream\n", stream.len()).into_bytes();
        body.extend_from_slice(&stream);
        body.extend_from_slice(b"\nendstream");
        w.object(content_id, &body);
    }

    w.finish(1)
}

/// Byte buffer that remembers object offsets for the xref table.
#[derive(Default)]
struct PdfWriter {
    buf: Vec<u8>,
    offsets: Vec<(usize, usize)>,
}

impl PdfWriter {
    fn object(&mut self, id: usize, body: &[u8]) {
        if self.buf.is_empty() {
            // Binary marker comment tells transfer tools the file is not text.
            self.buf.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");
        }
        self.offsets.push((id, self.buf.len()));
        self.buf.extend_from_slice(format!("{id} 0 obj\n").as_bytes());
        self.buf.extend_from_slice(body);
        self.buf.extend_from_slice(b"\nendobj\n");
    }

    fn finish(mut self, root: usize) -> Vec<u8> {
        self.offsets.sort_unstable();
        let size = self.offsets.len() + 1;
        let xref_at = self.buf.len();

        let mut xref = format!("xref\n0 {size}\n0000000000 65535 f \n");
        for (_, offset) in &self.offsets {
            let _ = writeln!(xref, "{offset:010} 00000 n ");
        }
        let _ = write!(
            xref,
            "trailer\n<< /Size {size} /Root {root} 0 R >>\nstartxref\n{xref_at}\n%%EOF\n"
        );

        self.buf.extend_from_slice(xref.as_bytes());
        self.buf
    }
}

fn mm(v: f64) -> f64 {
    v * PT_PER_MM
}

/// Page-space x in points.
fn px(x: f64) -> f64 {
    mm(x)
}

/// Page-space y in points (PDF origin is bottom-left).
fn py(y: f64) -> f64 {
    mm(PAGE_HEIGHT - y)
}

/// Compact decimal: two places, trailing zeros trimmed.
fn num(v: f64) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

fn color(c: Rgb) -> String {
    let f = |v: u8| num(f64::from(v) / 255.0);
    format!("{} {} {}", f(c.0), f(c.1), f(c.2))
}

fn content_stream(page: &Page) -> Vec<u8> {
    let mut out = Vec::new();
    for op in &page.ops {
        draw(&mut out, op);
    }
    out
}

fn draw(out: &mut Vec<u8>, op: &DrawOp) {
    let mut s = String::new();

    match op {
        DrawOp::Rect { x, y, w, h, fill } => {
            let _ = writeln!(
                s,
                "{} rg {} {} {} {} re f",
                color(*fill),
                num(px(*x)),
                num(py(y + h)),
                num(mm(*w)),
                num(mm(*h))
            );
        }
        DrawOp::RoundedRect {
            x,
            y,
            w,
            h,
            radius,
            paint,
        } => {
            s.push_str(&paint_prefix(*paint));
            rounded_path(&mut s, *x, *y, *w, *h, *radius);
            s.push_str(match paint {
                Paint::Fill(_) => "f\n",
                Paint::Stroke { .. } => "S\n",
            });
        }
        DrawOp::Line {
            from,
            to,
            color: c,
            width,
        } => {
            let _ = writeln!(
                s,
                "{} w {} RG {} {} m {} {} l S",
                num(mm(*width)),
                color(*c),
                num(px(from.0)),
                num(py(from.1)),
                num(px(to.0)),
                num(py(to.1))
            );
        }
        DrawOp::Circle { cx, cy, r, fill } => {
            let _ = writeln!(s, "{} rg", color(*fill));
            circle_path(&mut s, *cx, *cy, *r);
            s.push_str("f\n");
        }
        DrawOp::Text {
            x,
            y,
            size,
            color: c,
            align,
            text,
        } => {
            let bytes = win_ansi(text);
            let width_pt = text_width(&bytes, *size);
            let left = match align {
                Align::Left => px(*x),
                Align::Center => px(*x) - width_pt / 2.0,
                Align::Right => px(*x) - width_pt,
            };

            let _ = write!(
                s,
                "BT /F1 {} Tf {} rg {} {} Td (",
                num(*size),
                color(*c),
                num(left),
                num(py(*y))
            );
            out.extend_from_slice(s.as_bytes());
            out.extend_from_slice(&escape(&bytes));
            out.extend_from_slice(b") Tj ET\n");
            return;
        }
    }

    out.extend_from_slice(s.as_bytes());
}

fn paint_prefix(paint: Paint) -> String {
    match paint {
        Paint::Fill(c) => format!("{} rg\n", color(c)),
        Paint::Stroke { color: c, width } => format!("{} w {} RG\n", num(mm(width)), color(c)),
    }
}

/// Closed rounded-rectangle path in page space (mm in, points out).
fn rounded_path(s: &mut String, x: f64, y: f64, w: f64, h: f64, r: f64) {
    let r = r.min(w / 2.0).min(h / 2.0);
    let k = r * KAPPA;

    // Corners clockwise from the top-left, in top-left-origin mm.
    let (l, t, rt, b) = (x, y, x + w, y + h);

    let mut pts = String::new();
    let p = |x: f64, y: f64| format!("{} {}", num(px(x)), num(py(y)));

    let _ = writeln!(pts, "{} m", p(l + r, t));
    let _ = writeln!(pts, "{} l", p(rt - r, t));
    let _ = writeln!(pts, "{} {} {} c", p(rt - r + k, t), p(rt, t + r - k), p(rt, t + r));
    let _ = writeln!(pts, "{} l", p(rt, b - r));
    let _ = writeln!(pts, "{} {} {} c", p(rt, b - r + k), p(rt - r + k, b), p(rt - r, b));
    let _ = writeln!(pts, "{} l", p(l + r, b));
    let _ = writeln!(pts, "{} {} {} c", p(l + r - k, b), p(l, b - r + k), p(l, b - r));
    let _ = writeln!(pts, "{} l", p(l, t + r));
    let _ = writeln!(pts, "{} {} {} c", p(l, t + r - k), p(l + r - k, t), p(l + r, t));
    pts.push_str("h\n");

    s.push_str(&pts);
}

fn circle_path(s: &mut String, cx: f64, cy: f64, r: f64) {
    rounded_path(s, cx - r, cy - r, 2.0 * r, 2.0 * r, r);
}

/// Map text to WinAnsi bytes; unmappable chars become '?'.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch {
            ' '..='~' => ch as u8,
            '\u{A0}'..='\u{FF}' => ch as u32 as u8,
            '€' => 0x80,
            '‚' => 0x82,
            '„' => 0x84,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            _ => b'?',
        })
        .collect()
}

/// Rendered width in points of WinAnsi bytes at `size` pt.
fn text_width(bytes: &[u8], size: f64) -> f64 {
    let units: u32 = bytes
        .iter()
        .map(|&b| match b {
            0x20..=0x7E => u32::from(HELVETICA_WIDTHS[usize::from(b - 0x20)]),
            _ => u32::from(FALLBACK_WIDTH),
        })
        .sum();
    f64::from(units) * size / 1000.0
}

/// Escape a PDF literal string body.
fn escape(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    for &b in bytes {
        match b {
            b'(' | b')' | b'\\' => {
                out.push(b'\\');
                out.push(b);
            }
            0x20..=0x7E => out.push(b),
            _ => out.extend_from_slice(format!("\\{b:03o}").as_bytes()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Report {
        Report {
            pages: vec![
                Page {
                    ops: vec![
                        DrawOp::Rect {
                            x: 0.0,
                            y: 0.0,
                            w: 210.0,
                            h: 60.0,
                            fill: Rgb(30, 30, 30),
                        },
                        DrawOp::Text {
                            x: 105.0,
                            y: 25.0,
                            size: 24.0,
                            color: Rgb(220, 38, 127),
                            align: Align::Center,
                            text: "Björk (Live)".into(),
                        },
                    ],
                },
                Page::default(),
            ],
        }
    }

    #[test]
    fn output_is_deterministic() {
        assert_eq!(render(&sample()), render(&sample()));
    }

    #[test]
    fn document_structure() {
        let bytes = render(&sample());
        let text = String::from_utf8_lossy(&bytes);

        assert!(bytes.starts_with(b"%PDF-1.4"));
        assert!(text.trim_end().ends_with("%%EOF"));
        assert!(text.contains("/Count 2"));
        assert!(text.contains("/Kids [4 0 R 6 0 R]"));
        assert!(text.contains("/BaseFont /Helvetica"));
    }

    #[test]
    fn xref_offsets_point_at_objects() {
        let bytes = render(&sample());

        // The header carries non-UTF-8 marker bytes, so work on byte slices.
        let tail = String::from_utf8_lossy(&bytes[bytes.len() - 32..]).into_owned();
        let start: usize = tail
            .rsplit("startxref\n")
            .next()
            .and_then(|t| t.lines().next())
            .unwrap()
            .parse()
            .unwrap();
        assert!(bytes[start..].starts_with(b"xref"));

        // entry for object 3 (font)
        let xref = String::from_utf8_lossy(&bytes[start..]).into_owned();
        let entry = xref.lines().nth(5).unwrap();
        let offset: usize = entry[..10].parse().unwrap();
        assert!(bytes[offset..].starts_with(b"3 0 obj"));
    }

    #[test]
    fn text_is_escaped_and_encoded() {
        assert_eq!(escape(&win_ansi("a(b)\\")), b"a\\(b\\)\\\\".to_vec());
        assert_eq!(escape(&win_ansi("ö")), b"\\366".to_vec());
        assert_eq!(win_ansi("日"), b"?".to_vec());
    }

    #[test]
    fn helvetica_widths() {
        // "Hi" = 722 + 222 units
        assert!((text_width(b"Hi", 10.0) - 9.44).abs() < 1e-9);
        assert_eq!(HELVETICA_WIDTHS[usize::from(b'~' - 0x20)], 584);
    }

    #[test]
    fn numbers_are_compact() {
        assert_eq!(num(1.0), "1");
        assert_eq!(num(0.5), "0.5");
        assert_eq!(num(-0.001), "0");
        assert_eq!(num(841.889), "841.89");
    }

    #[test]
    fn y_axis_is_flipped() {
        assert!((py(0.0) - mm(PAGE_HEIGHT)).abs() < 1e-9);
        assert!(py(PAGE_HEIGHT).abs() < 1e-9);
    }
}
