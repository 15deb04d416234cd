//! Canned graphics demo scenes.
//!
//! Seven self-contained scenes exercising the display: text in several
//! font sizes, word-wrapped text flow, text alignment, rectangle and
//! line primitives, circles, an animated progress bar, and a full-frame
//! logo image. The firmware plays the reel once at boot as a display
//! self-test; each scene is also reachable individually through
//! [`View::Demo`].
//!
//! [`View::Demo`]: roomsense::readings::View

use core::fmt::Write;

use embedded_graphics::{
    image::{Image, ImageRaw},
    mono_font::{
        ascii::{FONT_10X20, FONT_6X10, FONT_9X15},
        MonoTextStyle,
    },
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Circle, Line, PrimitiveStyle, Rectangle},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};
use heapless::String;

/// Number of demo scenes. Kept in lock-step with the shared state crate
/// so `View::Demo` indices always resolve to a scene.
pub const SCENE_COUNT: usize = 7;

const _: () = assert!(SCENE_COUNT == roomsense::readings::DEMO_SCENE_COUNT);

/// A canned demo scene.
///
/// The scene table ([`DemoScene::ALL`]) replaces the classic
/// function-pointer array: scene selection is an index into `ALL`, and
/// [`render`](DemoScene::render) dispatches to the scene's draw routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DemoScene {
    /// "Hello world" in three font sizes.
    FontSizes,
    /// Word-wrapped paragraph of filler text.
    TextFlow,
    /// Left-, centre-, and right-aligned text.
    Alignment,
    /// Pixels, rectangles, and straight lines.
    Shapes,
    /// Concentric and filled circles.
    Circles,
    /// Animated progress bar with a percentage label.
    ProgressBar,
    /// Full-frame droplet logo.
    Logo,
}

impl DemoScene {
    /// All scenes in reel order. `ALL[i]` is the scene for
    /// `View::Demo(i)`.
    pub const ALL: [DemoScene; SCENE_COUNT] = [
        DemoScene::FontSizes,
        DemoScene::TextFlow,
        DemoScene::Alignment,
        DemoScene::Shapes,
        DemoScene::Circles,
        DemoScene::ProgressBar,
        DemoScene::Logo,
    ];

    /// Look up a scene by reel index.
    pub fn from_index(index: usize) -> Option<DemoScene> {
        Self::ALL.get(index).copied()
    }

    /// Short name for logging.
    pub fn title(self) -> &'static str {
        match self {
            DemoScene::FontSizes => "font sizes",
            DemoScene::TextFlow => "text flow",
            DemoScene::Alignment => "alignment",
            DemoScene::Shapes => "shapes",
            DemoScene::Circles => "circles",
            DemoScene::ProgressBar => "progress bar",
            DemoScene::Logo => "logo",
        }
    }

    /// Render this scene into a cleared frame buffer.
    ///
    /// `frame` is a monotonically increasing tick counter; only the
    /// progress bar uses it (one percent step every 5 frames).
    pub fn render<D>(self, display: &mut D, frame: u32) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        match self {
            DemoScene::FontSizes => draw_font_sizes(display),
            DemoScene::TextFlow => draw_text_flow(display),
            DemoScene::Alignment => draw_alignment(display),
            DemoScene::Shapes => draw_shapes(display),
            DemoScene::Circles => draw_circles(display),
            DemoScene::ProgressBar => draw_progress_bar(display, progress_percent(frame)),
            DemoScene::Logo => draw_logo(display),
        }
    }
}

/// Progress bar position for a given frame counter: one step every 5
/// frames, wrapping at 100.
pub fn progress_percent(frame: u32) -> u32 {
    (frame / 5) % 100
}

// ---------------------------------------------------------------------------
// Scene draw routines
// ---------------------------------------------------------------------------

fn draw_font_sizes<D>(display: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let top_left = TextStyleBuilder::new().baseline(Baseline::Top).build();

    Text::with_text_style(
        "Hello world",
        Point::new(0, 0),
        MonoTextStyle::new(&FONT_6X10, BinaryColor::On),
        top_left,
    )
    .draw(display)?;
    Text::with_text_style(
        "Hello world",
        Point::new(0, 10),
        MonoTextStyle::new(&FONT_9X15, BinaryColor::On),
        top_left,
    )
    .draw(display)?;
    Text::with_text_style(
        "Hello world",
        Point::new(0, 26),
        MonoTextStyle::new(&FONT_10X20, BinaryColor::On),
        top_left,
    )
    .draw(display)?;
    Ok(())
}

const FLOW_TEXT: &str = "Lorem ipsum dolor sit amet, consetetur sadipscing \
                         elitr, sed diam nonumy eirmod tempor invidunt ut labore.";

/// Characters per line at FONT_6X10 on a 128 px display.
const FLOW_LINE_CHARS: usize = 21;

fn draw_text_flow<D>(display: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
    let top_left = TextStyleBuilder::new().baseline(Baseline::Top).build();

    for (i, line) in wrap_text(FLOW_TEXT, FLOW_LINE_CHARS).enumerate() {
        // Anything past the bottom edge is clipped anyway; stop early.
        let y = i as i32 * 10;
        if y >= 64 {
            break;
        }
        Text::with_text_style(line, Point::new(0, y), style, top_left).draw(display)?;
    }
    Ok(())
}

fn draw_alignment<D>(display: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
    let aligned = |alignment| {
        TextStyleBuilder::new()
            .alignment(alignment)
            .baseline(Baseline::Top)
            .build()
    };

    Text::with_text_style(
        "Left aligned (0,10)",
        Point::new(0, 10),
        style,
        aligned(Alignment::Left),
    )
    .draw(display)?;
    Text::with_text_style(
        "Center aligned (64,22)",
        Point::new(64, 22),
        style,
        aligned(Alignment::Center),
    )
    .draw(display)?;
    Text::with_text_style(
        "Right aligned (128,33)",
        Point::new(128, 33),
        style,
        aligned(Alignment::Right),
    )
    .draw(display)?;
    Ok(())
}

fn draw_shapes<D>(display: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let stroke = PrimitiveStyle::with_stroke(BinaryColor::On, 1);
    let fill = PrimitiveStyle::with_fill(BinaryColor::On);

    // Two crossing diagonals drawn pixel by pixel.
    for i in 0..10 {
        Pixel(Point::new(i, i), BinaryColor::On).draw(display)?;
        Pixel(Point::new(10 - i, i), BinaryColor::On).draw(display)?;
    }

    Rectangle::new(Point::new(12, 12), Size::new(20, 20))
        .into_styled(stroke)
        .draw(display)?;
    Rectangle::new(Point::new(14, 14), Size::new(17, 17))
        .into_styled(fill)
        .draw(display)?;

    Line::new(Point::new(0, 40), Point::new(19, 40))
        .into_styled(stroke)
        .draw(display)?;
    Line::new(Point::new(40, 0), Point::new(40, 19))
        .into_styled(stroke)
        .draw(display)?;
    Ok(())
}

fn draw_circles<D>(display: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    for i in 1..8u32 {
        // Concentric rings on the left half.
        Circle::with_center(Point::new(32, 32), i * 6)
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(display)?;

        // Shrinking filled discs on the right, alternating on/off so the
        // overlap produces rings.
        let fill_color = if i % 2 == 0 {
            BinaryColor::Off
        } else {
            BinaryColor::On
        };
        Circle::with_center(Point::new(96, 32), (32 - i * 3) * 2)
            .into_styled(PrimitiveStyle::with_fill(fill_color))
            .draw(display)?;
    }
    Ok(())
}

fn draw_progress_bar<D>(display: &mut D, percent: u32) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    // Outline 120×10 with a 2 px inset fill.
    Rectangle::new(Point::new(0, 32), Size::new(120, 10))
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(display)?;
    let fill_width = 116 * percent / 100;
    if fill_width > 0 {
        Rectangle::new(Point::new(2, 34), Size::new(fill_width, 6))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(display)?;
    }

    let mut label: String<8> = String::new();
    let _ = write!(label, "{}%", percent);
    Text::with_text_style(
        label.as_str(),
        Point::new(64, 15),
        MonoTextStyle::new(&FONT_6X10, BinaryColor::On),
        TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Top)
            .build(),
    )
    .draw(display)?;
    Ok(())
}

fn draw_logo<D>(display: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let raw = ImageRaw::<BinaryColor>::new(LOGO_DATA, LOGO_WIDTH);
    // Centred on the 128×64 frame.
    Image::new(&raw, Point::new(48, 16)).draw(display)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Word wrapping
// ---------------------------------------------------------------------------

/// Greedy word wrap over space-separated text.
///
/// Yields successive line slices of at most `max_chars` characters,
/// breaking at spaces where possible. Words longer than a full line are
/// hard-split.
pub fn wrap_text(text: &str, max_chars: usize) -> WrappedLines<'_> {
    WrappedLines {
        rest: text,
        max_chars,
    }
}

/// Iterator returned by [`wrap_text`].
pub struct WrappedLines<'a> {
    rest: &'a str,
    max_chars: usize,
}

impl<'a> Iterator for WrappedLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let rest = self.rest.trim_start();
        if rest.is_empty() {
            return None;
        }

        // Byte length of the window holding at most `max_chars`
        // characters. At least one character per line, so the iterator
        // always makes progress. Counting chars keeps the split on a
        // UTF-8 boundary.
        let max_chars = self.max_chars.max(1);
        let mut window_end = rest.len();
        let mut chars = 0;
        for (pos, _) in rest.char_indices() {
            if chars == max_chars {
                window_end = pos;
                break;
            }
            chars += 1;
        }

        if window_end == rest.len() {
            self.rest = "";
            return Some(rest);
        }

        // Break at the last space that still fits (a space just past a
        // full line also counts); hard-split if none does.
        let split = if rest[window_end..].starts_with(' ') {
            window_end
        } else {
            match rest[..window_end].rfind(' ') {
                Some(pos) if pos > 0 => pos,
                _ => window_end,
            }
        };

        let (line, remainder) = rest.split_at(split);
        self.rest = remainder;
        Some(line.trim_end())
    }
}

// ---------------------------------------------------------------------------
// Logo bitmap
// ---------------------------------------------------------------------------

/// Width in pixels of the droplet logo (rows are 4 bytes, MSB first).
const LOGO_WIDTH: u32 = 32;

/// 32×32 1-bit droplet, drawn centred for the logo scene.
#[rustfmt::skip]
const LOGO_DATA: &[u8] = &[
    0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00,
    0x00, 0x01, 0x80, 0x00,
    0x00, 0x01, 0x80, 0x00,
    0x00, 0x03, 0xC0, 0x00,
    0x00, 0x03, 0xC0, 0x00,
    0x00, 0x07, 0xE0, 0x00,
    0x00, 0x07, 0xE0, 0x00,
    0x00, 0x0F, 0xF0, 0x00,
    0x00, 0x0F, 0xF0, 0x00,
    0x00, 0x1F, 0xF8, 0x00,
    0x00, 0x1F, 0xF8, 0x00,
    0x00, 0x3F, 0xFC, 0x00,
    0x00, 0x7F, 0xFE, 0x00,
    0x00, 0xFF, 0xFF, 0x00,
    0x01, 0xFF, 0xFF, 0x80,
    0x01, 0xFF, 0xFF, 0x80,
    0x01, 0xFF, 0xFF, 0x80,
    0x01, 0xE3, 0xFF, 0x80,
    0x03, 0xC1, 0xFF, 0xC0,
    0x01, 0xC1, 0xFF, 0x80,
    0x01, 0xC1, 0xFF, 0x80,
    0x01, 0xE3, 0xFF, 0x80,
    0x01, 0xFF, 0xFF, 0x80,
    0x00, 0xFF, 0xFF, 0x00,
    0x00, 0x7F, 0xFE, 0x00,
    0x00, 0x3F, 0xFC, 0x00,
    0x00, 0x1F, 0xF8, 0x00,
    0x00, 0x07, 0xE0, 0x00,
    0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00,
];

// ── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_table_matches_indices() {
        for (i, scene) in DemoScene::ALL.iter().enumerate() {
            assert_eq!(DemoScene::from_index(i), Some(*scene));
        }
        assert_eq!(DemoScene::from_index(SCENE_COUNT), None);
    }

    #[test]
    fn scene_titles_are_distinct() {
        for (i, a) in DemoScene::ALL.iter().enumerate() {
            for b in &DemoScene::ALL[i + 1..] {
                assert_ne!(a.title(), b.title());
            }
        }
    }

    #[test]
    fn progress_steps_every_five_frames() {
        assert_eq!(progress_percent(0), 0);
        assert_eq!(progress_percent(4), 0);
        assert_eq!(progress_percent(5), 1);
        assert_eq!(progress_percent(499), 99);
        // Wraps to 0, never reaches 100.
        assert_eq!(progress_percent(500), 0);
    }

    #[test]
    fn wrap_text_breaks_at_spaces() {
        let lines: heapless::Vec<&str, 8> = wrap_text("the quick brown fox", 10).collect();
        assert_eq!(lines.as_slice(), &["the quick", "brown fox"]);
    }

    #[test]
    fn wrap_text_short_input_is_one_line() {
        let lines: heapless::Vec<&str, 8> = wrap_text("hello", 21).collect();
        assert_eq!(lines.as_slice(), &["hello"]);
    }

    #[test]
    fn wrap_text_hard_splits_long_words() {
        let lines: heapless::Vec<&str, 8> = wrap_text("abcdefghij", 4).collect();
        assert_eq!(lines.as_slice(), &["abcd", "efgh", "ij"]);
    }

    #[test]
    fn wrap_text_splits_multibyte_on_char_boundaries() {
        let lines: heapless::Vec<&str, 8> = wrap_text("añejo viejo", 2).collect();
        assert_eq!(lines.as_slice(), &["añ", "ej", "o", "vi", "ej", "o"]);
    }

    #[test]
    fn wrap_text_zero_width_still_progresses() {
        // Degenerate width falls back to one character per line rather
        // than looping forever.
        let lines: heapless::Vec<&str, 8> = wrap_text("ab", 0).collect();
        assert_eq!(lines.as_slice(), &["a", "b"]);
    }

    #[test]
    fn wrap_text_breaks_on_space_just_past_full_line() {
        // A 9-char word followed by a space wraps cleanly at width 9.
        let lines: heapless::Vec<&str, 8> = wrap_text("the quick brown fox", 9).collect();
        assert_eq!(lines.as_slice(), &["the quick", "brown fox"]);
    }

    #[test]
    fn wrap_text_empty_input() {
        assert_eq!(wrap_text("", 10).count(), 0);
        assert_eq!(wrap_text("   ", 10).count(), 0);
    }

    #[test]
    fn wrap_text_respects_limit() {
        for line in wrap_text(FLOW_TEXT, FLOW_LINE_CHARS) {
            assert!(line.len() <= FLOW_LINE_CHARS, "line too long: {:?}", line);
        }
    }

    #[test]
    fn flow_text_fits_on_screen_budget() {
        // 6 rows of FONT_6X10 fit in 64 px; the paragraph must not need
        // more than that at the configured width.
        assert!(wrap_text(FLOW_TEXT, FLOW_LINE_CHARS).count() <= 6);
    }

    #[test]
    fn logo_dimensions() {
        assert_eq!(LOGO_DATA.len(), (LOGO_WIDTH as usize / 8) * 32);
    }
}
