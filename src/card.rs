//! Fits a record's text inside a card cell: word-boundary wrapping for the
//! artist and title, a large centered year, and the tier mark near the bottom
//! edge. All lines are centered horizontally; the vertical stacking rules keep
//! the block visually balanced for 1, 2, or 3 wrapped lines.

use crate::colour::{colours, Colour};
use crate::document::Document;
use crate::font::Font;
use crate::page::{Page, SpanFont, SpanLayout};
use crate::record::Record;
use crate::rect::Rect;
use crate::units::Pt;
use id_arena::Id;

/// Size of the artist/title/tier text
pub const SMALL_SIZE: Pt = Pt(18.0);
/// Size of the year
pub const LARGE_SIZE: Pt = Pt(44.0);
/// Horizontal room reserved inside the cell; wrapped lines never render wider
/// than the cell side minus this
pub const TEXT_MARGIN: Pt = Pt(30.0);
/// Extra space between stacked lines, on top of the font size
const LINE_SPACING: Pt = Pt(2.0);

/// The two faces every card is set in, passed around explicitly rather than
/// registered in any global state
#[derive(Debug, Copy, Clone)]
pub struct CardFonts {
    /// Used for artist, title and the tier mark
    pub regular: SpanFont,
    /// Used for the year
    pub heavy: SpanFont,
}

impl CardFonts {
    pub fn new(regular: Id<Font>, heavy: Id<Font>) -> CardFonts {
        CardFonts {
            regular: SpanFont {
                id: regular,
                size: SMALL_SIZE,
            },
            heavy: SpanFont {
                id: heavy,
                size: LARGE_SIZE,
            },
        }
    }
}

/// Wrap `text` into lines no wider than `max_width`, breaking only at word
/// boundaries. A word that is wider than `max_width` on its own is kept intact
/// on its own line. Empty input yields exactly one empty line.
pub fn wrap_to_width<F: Fn(&str) -> Pt>(text: &str, max_width: Pt, measure: F) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate = format!("{current} {word}");
        if measure(&candidate) > max_width {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        } else {
            current = candidate;
        }
    }

    lines.push(current);
    lines
}

/// Baseline of the first artist line. Artist text hangs from near the top of
/// the cell, nudged by half a line when it wraps to exactly 1 or 3 lines.
pub fn artist_start(cell: &Rect, line_count: usize) -> Pt {
    let mut y = cell.y1 + cell.height() - SMALL_SIZE * 2.0 + Pt(5.0);
    if line_count == 1 {
        y -= SMALL_SIZE / 2.0;
    }
    if line_count == 3 {
        y += SMALL_SIZE / 2.0;
    }
    y
}

/// Baseline of the first title line. Title lines stack upward from near the
/// bottom of the cell, so the start rises with the number of wrapped lines.
pub fn title_start(cell: &Rect, line_count: usize) -> Pt {
    let mut y = cell.y1 + SMALL_SIZE * line_count as f32 + Pt(10.0);
    if line_count == 1 {
        y += SMALL_SIZE / 2.0;
    }
    if line_count == 3 {
        y -= SMALL_SIZE / 2.0;
        y += Pt(3.0);
    }
    y
}

/// Baseline of the year, vertically centered in the cell
pub fn year_baseline(cell: &Rect) -> Pt {
    cell.y1 + cell.height() / 2.0 - LARGE_SIZE / 2.0 + Pt(10.0)
}

/// Baseline of the tier mark, just above the bottom edge
pub fn tier_baseline(cell: &Rect) -> Pt {
    cell.y1 + Pt(5.0)
}

fn centered_x(cell: &Rect, line: &str, font: &Font, size: Pt) -> Pt {
    cell.x1 + (cell.width() - font.width_of(line, size)) / 2.0
}

/// Lay out one record's text block inside `cell`, adding the spans to `page`.
/// Never draws outside the cell horizontally except for a single word wider
/// than the usable width, which is kept intact.
pub fn layout_card_text(
    doc: &Document,
    page: &mut Page,
    cell: &Rect,
    record: &Record,
    fonts: &CardFonts,
) {
    let regular = &doc.fonts[fonts.regular.id];
    let heavy = &doc.fonts[fonts.heavy.id];
    let usable = cell.width() - TEXT_MARGIN;

    let artist_lines = wrap_to_width(&record.artist, usable, |s| {
        regular.width_of(s, SMALL_SIZE)
    });
    let title_lines = wrap_to_width(&record.title, usable, |s| {
        regular.width_of(s, SMALL_SIZE)
    });

    let mut y = artist_start(cell, artist_lines.len());
    for line in &artist_lines {
        page.add_span(SpanLayout {
            text: line.clone(),
            font: fonts.regular,
            colour: colours::BLACK,
            coords: (centered_x(cell, line, regular, SMALL_SIZE), y),
        });
        y -= SMALL_SIZE + LINE_SPACING;
    }

    let mut y = title_start(cell, title_lines.len());
    for line in &title_lines {
        page.add_span(SpanLayout {
            text: line.clone(),
            font: fonts.regular,
            colour: colours::BLACK,
            coords: (centered_x(cell, line, regular, SMALL_SIZE), y),
        });
        y -= SMALL_SIZE + LINE_SPACING;
    }

    page.add_span(SpanLayout {
        text: record.year.clone(),
        font: fonts.heavy,
        colour: colours::BLACK,
        coords: (
            centered_x(cell, &record.year, heavy, LARGE_SIZE),
            year_baseline(cell),
        ),
    });

    let tier = record.tier.symbol();
    page.add_span(SpanLayout {
        text: tier.to_string(),
        font: fonts.regular,
        colour: colours::BLACK,
        coords: (centered_x(cell, tier, regular, SMALL_SIZE), tier_baseline(cell)),
    });
}

/// Stroke a thin rectangle around the cell as a cutting guide. The code pass
/// uses a white stroke, the text pass a faint grey one, so the two sides can
/// be told apart when assembling the physical cards.
pub fn stroke_cell_border(page: &mut Page, cell: &Rect, colour: Colour) {
    let mut content = pdf_writer::Content::new();
    match colour {
        Colour::RGB { r, g, b } => {
            content.set_stroke_rgb(r, g, b);
        }
        Colour::Grey { g } => {
            content.set_stroke_gray(g);
        }
    }
    content.set_line_width(1.0);
    content.rect(
        cell.x1.into(),
        cell.y1.into(),
        cell.width().into(),
        cell.height().into(),
    );
    content.stroke();
    page.add_content(content);
}

#[cfg(test)]
mod tests {
    use super::*;

    // measures every character as one point wide, so widths read as char counts
    fn char_width(s: &str) -> Pt {
        Pt(s.chars().count() as f32)
    }

    #[test]
    fn empty_text_wraps_to_one_empty_line() {
        let lines = wrap_to_width("", Pt(10.0), char_width);
        assert_eq!(lines, vec![String::new()]);
    }

    #[test]
    fn short_text_stays_on_one_line() {
        let lines = wrap_to_width("ab cd", Pt(10.0), char_width);
        assert_eq!(lines, vec!["ab cd".to_string()]);
    }

    #[test]
    fn wraps_only_at_word_boundaries() {
        let lines = wrap_to_width("aaaa bbbb cccc", Pt(9.0), char_width);
        assert_eq!(lines, vec!["aaaa bbbb".to_string(), "cccc".to_string()]);
        for line in &lines {
            assert!(char_width(line) <= Pt(9.0));
        }
    }

    #[test]
    fn overlong_word_is_kept_intact() {
        let lines = wrap_to_width("a extraordinarily b", Pt(6.0), char_width);
        assert_eq!(
            lines,
            vec![
                "a".to_string(),
                "extraordinarily".to_string(),
                "b".to_string()
            ]
        );
    }

    #[test]
    fn collapses_runs_of_whitespace() {
        let lines = wrap_to_width("a   b\t c", Pt(100.0), char_width);
        assert_eq!(lines, vec!["a b c".to_string()]);
    }

    fn cell() -> Rect {
        Rect {
            x1: Pt(0.0),
            y1: Pt(0.0),
            x2: Pt(184.0),
            y2: Pt(184.0),
        }
    }

    #[test]
    fn artist_block_is_nudged_for_odd_line_counts() {
        let c = cell();
        let two = artist_start(&c, 2);
        assert_eq!(artist_start(&c, 1), two - SMALL_SIZE / 2.0);
        assert_eq!(artist_start(&c, 3), two + SMALL_SIZE / 2.0);
    }

    #[test]
    fn title_block_rises_with_line_count() {
        let c = cell();
        assert!(title_start(&c, 2) > title_start(&c, 1) - SMALL_SIZE);
        assert!(title_start(&c, 3) > title_start(&c, 2));
        // all variants stay within the bottom half of the cell
        for n in 1..=3 {
            assert!(title_start(&c, n) < c.y1 + c.height() / 2.0);
            assert!(title_start(&c, n) > c.y1);
        }
    }

    #[test]
    fn year_sits_in_the_vertical_middle() {
        let c = cell();
        let y = year_baseline(&c);
        assert!(y > c.y1 + c.height() / 4.0);
        assert!(y < c.y1 + c.height() * 3.0 / 4.0);
    }

    #[test]
    fn tier_sits_just_above_the_bottom_edge() {
        let c = cell();
        assert_eq!(tier_baseline(&c), c.y1 + Pt(5.0));
    }
}
