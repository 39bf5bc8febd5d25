//! Report layout: scan + comparison -> pages of draw operations.
//!
//! A single vertical cursor `y` walks down the page. Sections check the
//! space they need and start a new page (cursor back to the top margin)
//! when it doesn't fit.

use chrono::NaiveDate;

use super::super::stats::{
    ArtistGroup, CollectionStats, group_by_artist_sorted, group_thousands, top_artists,
};
use super::super::types::{LastFmComparison, MissingTrack, NewSong, Track};
use super::{Align, DrawOp, PAGE_HEIGHT, PAGE_WIDTH, Page, Paint, Report, Rgb};

const TOP_MARGIN: f64 = 30.0;
const FIRST_SECTION_Y: f64 = 80.0;

/// A section header only starts on the current page above this line.
const SECTION_START_LIMIT: f64 = 220.0;
/// Lowest point an artist header block may reach.
const ARTIST_BLOCK_LIMIT: f64 = PAGE_HEIGHT - 50.0;
/// Lowest point a list row may reach.
const ROW_LIMIT: f64 = PAGE_HEIGHT - 30.0;

const ARTIST_BLOCK_HEIGHT: f64 = 25.0;
const ROW_HEIGHT: f64 = 12.0;

const TOP_ARTISTS: usize = 3;

const DARK: Rgb = Rgb(30, 30, 30);
const WHITE: Rgb = Rgb(255, 255, 255);
const ACCENT: Rgb = Rgb(220, 38, 127);
const VIOLET: Rgb = Rgb(139, 92, 246);
const GOLD: Rgb = Rgb(255, 215, 0);
const TEXT: Rgb = Rgb(60, 60, 60);
const MUTED: Rgb = Rgb(120, 120, 120);
const SUBTLE: Rgb = Rgb(100, 100, 100);
const LIGHT: Rgb = Rgb(180, 180, 180);

const BADGES: [Rgb; TOP_ARTISTS] = [ACCENT, Rgb(100, 100, 100), Rgb(139, 69, 19)];

/// Lay out the full report.
pub fn build(
    tracks: &[Track],
    comparison: Option<&LastFmComparison>,
    generated_on: NaiveDate,
) -> Report {
    let mut c = Canvas::new();

    title_band(&mut c, generated_on);
    c.y = FIRST_SECTION_Y;

    let top = top_artists(tracks, TOP_ARTISTS);
    if !top.is_empty() {
        top_artists_section(&mut c, &top);
    }

    overview(&mut c, &CollectionStats::from_tracks(tracks));

    match comparison {
        Some(cmp) => {
            if !cmp.missing_tracks.is_empty() {
                missing_section(&mut c, &cmp.missing_tracks);
            }
            if !cmp.new_songs.is_empty() {
                songs_section(&mut c, &cmp.new_songs);
            }
            summary_page(&mut c, cmp);
        }
        None => ready_box(&mut c),
    }

    c.finish()
}

/// Page list + cursor.
struct Canvas {
    pages: Vec<Page>,
    y: f64,
}

impl Canvas {
    fn new() -> Self {
        Self {
            pages: vec![Page::default()],
            y: TOP_MARGIN,
        }
    }

    fn add_page(&mut self) {
        self.pages.push(Page::default());
        self.y = TOP_MARGIN;
    }

    /// New page if `height` more millimetres would cross `limit`.
    fn ensure(&mut self, height: f64, limit: f64) {
        if self.y + height > limit {
            self.add_page();
        }
    }

    fn push(&mut self, op: DrawOp) {
        // `pages` is never empty: `new` seeds one page.
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: Rgb) {
        self.push(DrawOp::Rect { x, y, w, h, fill });
    }

    fn rounded(&mut self, x: f64, y: f64, w: f64, h: f64, radius: f64, paint: Paint) {
        self.push(DrawOp::RoundedRect {
            x,
            y,
            w,
            h,
            radius,
            paint,
        });
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgb, width: f64) {
        self.push(DrawOp::Line {
            from,
            to,
            color,
            width,
        });
    }

    fn circle(&mut self, cx: f64, cy: f64, r: f64, fill: Rgb) {
        self.push(DrawOp::Circle { cx, cy, r, fill });
    }

    fn text(&mut self, x: f64, y: f64, size: f64, color: Rgb, align: Align, text: impl Into<String>) {
        self.push(DrawOp::Text {
            x,
            y,
            size,
            color,
            align,
            text: text.into(),
        });
    }

    fn finish(self) -> Report {
        Report { pages: self.pages }
    }
}

/// Keep the first `keep` chars and append "..." when longer than `max`.
fn truncate(s: &str, max: usize, keep: usize) -> String {
    if s.chars().count() > max {
        let mut out: String = s.chars().take(keep).collect();
        out.push_str("...");
        out
    } else {
        s.to_string()
    }
}

fn plural(n: usize, word: &str) -> String {
    if n > 1 {
        format!("{n} {word}s")
    } else {
        format!("{n} {word}")
    }
}

fn title_band(c: &mut Canvas, generated_on: NaiveDate) {
    let mid = PAGE_WIDTH / 2.0;

    c.rect(0.0, 0.0, PAGE_WIDTH, 60.0, DARK);
    c.text(mid, 25.0, 24.0, ACCENT, Align::Center, "MUSIC COLLECTION");
    c.text(mid, 40.0, 20.0, WHITE, Align::Center, "ANALYSIS REPORT");
    c.text(
        mid,
        52.0,
        10.0,
        LIGHT,
        Align::Center,
        format!("Generated on {}", generated_on.format("%A, %B %-d, %Y")),
    );
}

fn top_artists_section(c: &mut Canvas, top: &[(String, usize)]) {
    let y = c.y;

    c.rounded(15.0, y - 5.0, PAGE_WIDTH - 30.0, 30.0, 5.0, Paint::Fill(Rgb(255, 250, 250)));
    c.line((20.0, y - 2.0), (80.0, y - 2.0), ACCENT, 3.0);
    c.text(25.0, y + 12.0, 18.0, ACCENT, Align::Left, "Top Artists in Your Collection");

    c.y += 40.0;

    for (i, (artist, count)) in top.iter().enumerate() {
        let row = c.y + i as f64 * 30.0;

        c.rounded(20.0, row - 5.0, PAGE_WIDTH - 40.0, 25.0, 5.0, Paint::Fill(Rgb(250, 250, 250)));
        c.rounded(
            20.0,
            row - 5.0,
            PAGE_WIDTH - 40.0,
            25.0,
            5.0,
            Paint::Stroke {
                color: Rgb(220, 220, 220),
                width: 0.5,
            },
        );

        c.circle(35.0, row + 7.5, 10.0, BADGES[i % BADGES.len()]);
        c.text(35.0, row + 11.0, 14.0, WHITE, Align::Center, (i + 1).to_string());

        c.text(55.0, row + 11.0, 14.0, TEXT, Align::Left, truncate(artist, 35, 35));
        c.text(
            PAGE_WIDTH - 30.0,
            row + 11.0,
            12.0,
            MUTED,
            Align::Right,
            format!("{count} tracks"),
        );

        if i == 0 {
            c.text(PAGE_WIDTH - 55.0, row + 11.0, 10.0, GOLD, Align::Left, "TOP");
        }
    }

    c.y += top.len() as f64 * 30.0 + 20.0;
}

fn overview(c: &mut Canvas, stats: &CollectionStats) {
    let y = c.y;

    c.rounded(15.0, y - 5.0, PAGE_WIDTH - 30.0, 45.0, 5.0, Paint::Fill(Rgb(45, 45, 45)));
    c.text(25.0, y + 10.0, 16.0, ACCENT, Align::Left, "COLLECTION OVERVIEW");

    let n = |v: usize| group_thousands(v as u64);
    c.text(
        30.0,
        y + 25.0,
        12.0,
        WHITE,
        Align::Left,
        format!("Total Tracks: {}", n(stats.total_tracks)),
    );
    c.text(
        30.0,
        y + 35.0,
        12.0,
        WHITE,
        Align::Left,
        format!("Total Artists: {}", n(stats.total_artists)),
    );
    c.text(
        PAGE_WIDTH - 30.0,
        y + 25.0,
        12.0,
        WHITE,
        Align::Right,
        format!("Total Albums: {}", n(stats.total_albums)),
    );

    c.y += 60.0;
}

/// Colours of one list section (missing tracks / trending singles).
struct SectionStyle {
    accent: Rgb,
    header_fill: Rgb,
    artist_fill: Rgb,
    /// Green channel of the alternating row fill.
    row_green: u8,
}

const MISSING_STYLE: SectionStyle = SectionStyle {
    accent: ACCENT,
    header_fill: Rgb(245, 245, 245),
    artist_fill: Rgb(250, 248, 255),
    row_green: 252,
};

const SONGS_STYLE: SectionStyle = SectionStyle {
    accent: VIOLET,
    header_fill: Rgb(252, 248, 255),
    artist_fill: Rgb(250, 245, 255),
    row_green: 248,
};

fn section_header(c: &mut Canvas, style: &SectionStyle, title: &str, subtitle: String) {
    if c.y > SECTION_START_LIMIT {
        c.add_page();
    }

    let y = c.y;
    c.rounded(15.0, y - 5.0, PAGE_WIDTH - 30.0, 30.0, 5.0, Paint::Fill(style.header_fill));
    c.line((20.0, y - 2.0), (60.0, y - 2.0), style.accent, 2.0);
    c.text(25.0, y + 8.0, 16.0, style.accent, Align::Left, title);
    c.text(25.0, y + 18.0, 10.0, SUBTLE, Align::Left, subtitle);

    c.y += 35.0;
}

fn artist_header(c: &mut Canvas, style: &SectionStyle, artist: &str, badge: String) {
    c.ensure(ARTIST_BLOCK_HEIGHT, ARTIST_BLOCK_LIMIT);

    let y = c.y;
    c.rounded(20.0, y - 2.0, PAGE_WIDTH - 40.0, 20.0, 3.0, Paint::Fill(style.artist_fill));
    c.text(25.0, y + 10.0, 12.0, style.accent, Align::Left, artist);
    c.text(PAGE_WIDTH - 25.0, y + 10.0, 9.0, MUTED, Align::Right, badge);

    c.y += 22.0;
}

/// One list row: bullet, title on the left, optional note on the right.
fn row(c: &mut Canvas, style: &SectionStyle, index: usize, title: &str, note: Option<String>) {
    c.ensure(ROW_HEIGHT, ROW_LIMIT);

    let y = c.y;
    let red = if index % 2 == 0 { 252 } else { 248 };
    c.rounded(
        25.0,
        y - 2.0,
        PAGE_WIDTH - 50.0,
        ROW_HEIGHT,
        2.0,
        Paint::Fill(Rgb(red, style.row_green, 255)),
    );
    c.circle(30.0, y + 4.0, 2.0, style.accent);
    c.text(35.0, y + 6.0, 9.0, TEXT, Align::Left, truncate(title, 40, 37));

    if let Some(note) = note {
        c.text(PAGE_WIDTH - 25.0, y + 6.0, 8.0, MUTED, Align::Right, note);
    }

    c.y += ROW_HEIGHT;
}

fn album_note(album: &str) -> Option<String> {
    if album.is_empty() || album == "Unknown" {
        None
    } else {
        Some(format!("from: {}", truncate(album, 25, 22)))
    }
}

fn missing_section(c: &mut Canvas, missing: &[MissingTrack]) {
    let style = &MISSING_STYLE;
    section_header(
        c,
        style,
        "Missing Tracks to Complete Your Collection",
        format!("{} popular tracks you might want to add", missing.len()),
    );

    let groups: Vec<ArtistGroup<MissingTrack>> =
        group_by_artist_sorted(missing, |t| t.artist.as_str());
    for group in groups {
        artist_header(c, style, &group.artist, plural(group.items.len(), "missing track"));

        for (i, t) in group.items.iter().enumerate() {
            row(c, style, i, &t.track, album_note(&t.album));
        }

        c.y += 8.0;
    }
}

fn songs_section(c: &mut Canvas, songs: &[NewSong]) {
    let style = &SONGS_STYLE;
    section_header(
        c,
        style,
        "Popular Singles & Trending Tracks",
        format!("{} trending tracks to add to your collection", songs.len()),
    );

    let groups: Vec<ArtistGroup<NewSong>> = group_by_artist_sorted(songs, |s| s.artist.as_str());
    for group in groups {
        artist_header(c, style, &group.artist, plural(group.items.len(), "popular song"));

        for (i, s) in group.items.iter().enumerate() {
            let plays = format!("{} plays", group_thousands(s.playcount));
            row(c, style, i, &s.track, Some(plays));
        }

        c.y += 8.0;
    }
}

fn summary_page(c: &mut Canvas, cmp: &LastFmComparison) {
    let mid = PAGE_WIDTH / 2.0;

    c.add_page();
    c.rect(0.0, 0.0, PAGE_WIDTH, 50.0, DARK);
    c.text(mid, 30.0, 22.0, ACCENT, Align::Center, "ANALYSIS COMPLETE");

    c.y = 70.0;

    let items = [
        ("M", "Missing Tracks Found", cmp.missing_tracks.len(), ACCENT),
        ("S", "Hot Singles Identified", cmp.new_songs.len(), VIOLET),
    ];

    for (i, (icon, label, value, color)) in items.into_iter().enumerate() {
        let y = c.y + i as f64 * 40.0;

        c.rounded(20.0, y - 5.0, PAGE_WIDTH - 40.0, 30.0, 5.0, Paint::Fill(Rgb(40, 40, 40)));
        c.circle(35.0, y + 10.0, 12.0, color);
        c.text(35.0, y + 14.0, 14.0, WHITE, Align::Center, icon);
        c.text(55.0, y + 8.0, 14.0, WHITE, Align::Left, label);
        c.text(
            PAGE_WIDTH - 30.0,
            y + 12.0,
            18.0,
            color,
            Align::Right,
            group_thousands(value as u64),
        );
    }

    c.y += 150.0;
    let y = c.y;
    c.text(mid, y, 14.0, LIGHT, Align::Center, "Keep expanding your music collection!");
    c.text(
        mid,
        PAGE_HEIGHT - 20.0,
        10.0,
        SUBTLE,
        Align::Center,
        "Generated by Music Scan Pro - Music Collection Analysis Tool",
    );
}

fn ready_box(c: &mut Canvas) {
    let mid = PAGE_WIDTH / 2.0;
    let y = c.y;

    c.rounded(15.0, y, PAGE_WIDTH - 30.0, 80.0, 10.0, Paint::Fill(Rgb(60, 60, 60)));
    c.text(mid, y + 30.0, 18.0, ACCENT, Align::Center, "Ready to Analyze Your Collection?");
    c.text(mid, y + 45.0, 12.0, LIGHT, Align::Center, "No Last.fm analysis performed yet.");
    c.text(
        mid,
        y + 60.0,
        12.0,
        LIGHT,
        Align::Center,
        "Run \"Analyze with Last.fm\" to discover missing tracks and new releases!",
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    fn track(artist: &str, album: &str, title: &str) -> Track {
        Track {
            artist: artist.into(),
            album: album.into(),
            track: title.into(),
            file: None,
        }
    }

    fn missing(artist: &str, album: &str, title: &str) -> MissingTrack {
        MissingTrack {
            artist: artist.into(),
            album: album.into(),
            track: title.into(),
            year: None,
        }
    }

    fn texts(page: &Page) -> Vec<&str> {
        page.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn all_texts(report: &Report) -> Vec<&str> {
        report.pages.iter().flat_map(texts).collect()
    }

    #[test]
    fn header_carries_long_date() {
        let report = build(&[], None, date());
        assert!(all_texts(&report).contains(&"Generated on Tuesday, March 5, 2024"));
    }

    #[test]
    fn without_comparison_single_page_with_prompt() {
        let tracks = vec![track("A", "X", "1")];
        let report = build(&tracks, None, date());

        assert_eq!(report.pages.len(), 1);
        let t = all_texts(&report);
        assert!(t.contains(&"Ready to Analyze Your Collection?"));
        assert!(!t.contains(&"ANALYSIS COMPLETE"));
    }

    #[test]
    fn empty_collection_skips_top_artists() {
        let report = build(&[], None, date());
        let t = all_texts(&report);
        assert!(!t.contains(&"Top Artists in Your Collection"));
        assert!(t.contains(&"Total Tracks: 0"));
    }

    #[test]
    fn top_artists_ranked_with_ties_in_first_appearance_order() {
        let tracks = vec![
            track("B", "x", "1"),
            track("A", "x", "1"),
            track("C", "x", "1"),
            track("C", "x", "2"),
            track("D", "x", "1"),
        ];
        let report = build(&tracks, None, date());
        let t = all_texts(&report);

        let pos = |s: &str| t.iter().position(|x| *x == s).unwrap();
        assert!(pos("C") < pos("B"));
        assert!(pos("B") < pos("A"));
        assert!(!t.contains(&"D"));
        assert!(t.contains(&"2 tracks"));
    }

    #[test]
    fn summary_page_is_last_and_counts() {
        let cmp = LastFmComparison {
            missing_tracks: vec![missing("A", "X", "t")],
            ..Default::default()
        };
        let report = build(&[track("A", "X", "u")], Some(&cmp), date());

        let last = texts(report.pages.last().unwrap());
        assert!(last.contains(&"ANALYSIS COMPLETE"));
        assert!(last.contains(&"1"));
        assert!(last.contains(&"0"));
    }

    #[test]
    fn missing_artists_alphabetical_rows_in_input_order() {
        let cmp = LastFmComparison {
            missing_tracks: vec![
                missing("Zeta", "Z1", "z-a"),
                missing("Alpha", "A1", "a-1"),
                missing("Alpha", "A2", "a-2"),
                missing("Alpha", "A1", "a-3"),
            ],
            ..Default::default()
        };
        let report = build(&[], Some(&cmp), date());
        let t = all_texts(&report);

        let pos = |s: &str| t.iter().position(|x| *x == s).unwrap();
        assert!(pos("Alpha") < pos("Zeta"));
        assert!(pos("a-1") < pos("a-2"));
        assert!(pos("a-2") < pos("a-3"));
        assert!(t.contains(&"3 missing tracks"));
        assert!(t.contains(&"1 missing track"));
    }

    #[test]
    fn missing_rows_are_not_regrouped_by_album() {
        let cmp = LastFmComparison {
            missing_tracks: vec![
                missing("A", "X", "t1"),
                missing("A", "Y", "t2"),
                missing("A", "X", "t3"),
            ],
            ..Default::default()
        };
        let report = build(&[], Some(&cmp), date());
        let rows: Vec<_> = all_texts(&report)
            .into_iter()
            .filter(|t| t.starts_with('t') && t.len() == 2)
            .collect();
        assert_eq!(rows, vec!["t1", "t2", "t3"]);
    }

    #[test]
    fn unknown_album_has_no_from_note() {
        let cmp = LastFmComparison {
            missing_tracks: vec![missing("A", "Unknown", "t1"), missing("A", "", "t2")],
            ..Default::default()
        };
        let report = build(&[], Some(&cmp), date());
        assert!(!all_texts(&report).iter().any(|t| t.starts_with("from:")));
    }

    #[test]
    fn long_missing_list_paginates_within_limits() {
        let missing_tracks: Vec<_> = (0..120)
            .map(|i| missing(&format!("Artist {:02}", i / 7), "Album", &format!("Track {i}")))
            .collect();
        let cmp = LastFmComparison {
            missing_tracks,
            new_songs: vec![NewSong {
                artist: "S".into(),
                track: "Single".into(),
                playcount: 12345,
                year: None,
            }],
            ..Default::default()
        };
        let report = build(&[track("X", "Y", "Z")], Some(&cmp), date());

        assert!(report.pages.len() > 2);

        for page in &report.pages {
            for op in &page.ops {
                if let DrawOp::RoundedRect { y, h, .. } = op {
                    if *h == ROW_HEIGHT {
                        // row drawn at cursor - 2 with a 12 mm box
                        assert!(y + 2.0 + ROW_HEIGHT <= ROW_LIMIT);
                    }
                }
            }
        }

        assert!(all_texts(&report).contains(&"12,345 plays"));
        assert!(texts(report.pages.last().unwrap()).contains(&"ANALYSIS COMPLETE"));
    }

    #[test]
    fn titles_and_albums_truncate() {
        assert_eq!(truncate(&"x".repeat(40), 40, 37), "x".repeat(40));
        assert_eq!(truncate(&"x".repeat(41), 40, 37), format!("{}...", "x".repeat(37)));
        assert_eq!(
            album_note("The Rise and Fall of Ziggy Stardust").as_deref(),
            Some("from: The Rise and Fall of Z...")
        );
    }

    #[test]
    fn layout_is_deterministic() {
        let cmp = LastFmComparison {
            missing_tracks: vec![missing("A", "X", "t")],
            ..Default::default()
        };
        let tracks = vec![track("A", "X", "u")];
        assert_eq!(
            build(&tracks, Some(&cmp), date()),
            build(&tracks, Some(&cmp), date())
        );
    }
}
