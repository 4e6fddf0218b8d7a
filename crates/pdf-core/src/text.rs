//! Text rendering and line wrapping utilities

use crate::{Align, StandardFont};

/// Context for rendering text
pub struct TextRenderContext {
    /// PDF font resource name (e.g., "F1")
    pub font_name: String,
    /// Font size in points
    pub font_size: f32,
    /// Text width in points (for alignment)
    pub text_width: f64,
}

/// Calculate X offset for text alignment
///
/// # Arguments
/// * `text_width` - Width of text in points
/// * `container_width` - Available width for alignment
/// * `align` - Desired alignment
pub fn calculate_x_offset(text_width: f64, container_width: f64, align: Align) -> f64 {
    match align {
        Align::Left => 0.0,
        Align::Center => (container_width - text_width) / 2.0,
        Align::Right => container_width - text_width,
    }
}

/// Generate PDF operators for text insertion
///
/// Creates the PDF text operators (BT, rg, Tf, Td, Tj, ET) to render text
/// at a specific position. `x` is the alignment anchor: the left edge for
/// `Left`, the middle for `Center`, the right edge for `Right`.
///
/// # Arguments
/// * `text_hex` - Hex-encoded text (e.g., "<486F6C61>")
/// * `x` - X coordinate in points (PDF coordinates, from left)
/// * `y` - Y coordinate in points (PDF coordinates, from bottom)
/// * `align` - Text alignment
/// * `ctx` - Text rendering context
pub fn generate_text_operators(
    text_hex: &str,
    x: f64,
    y: f64,
    align: Align,
    ctx: &TextRenderContext,
) -> Vec<u8> {
    let mut ops = String::new();

    let final_x = x - calculate_x_offset(0.0, ctx.text_width, align);

    ops.push_str("BT\n");
    // Black fill
    ops.push_str("0 0 0 rg\n");
    ops.push_str(&format!("/{} {} Tf\n", ctx.font_name, ctx.font_size));
    ops.push_str(&format!("{final_x} {y} Td\n"));
    ops.push_str(&format!("{text_hex} Tj\n"));
    ops.push_str("ET\n");

    ops.into_bytes()
}

/// Splits a line of text into sub-lines that fit a maximum width
///
/// Implementations own the glyph metrics; callers only deal in widths.
pub trait TextWrap {
    /// Wrap `text` so no sub-line is wider than `max_width` points
    /// when set in `font` at `font_size`.
    ///
    /// Always returns at least one (possibly empty) sub-line.
    fn wrap(&self, text: &str, max_width: f64, font: StandardFont, font_size: f32) -> Vec<String>;
}

/// Wrapping driven by the standard font metrics
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricWrap;

impl TextWrap for MetricWrap {
    fn wrap(&self, text: &str, max_width: f64, font: StandardFont, font_size: f32) -> Vec<String> {
        wrap_to_width(text, max_width, |s| font.text_width_points(s, font_size))
    }
}

/// Greedy word wrap against a width function
///
/// Words are separated by single spaces, so runs of spaces (used to lay out
/// signature columns) are kept. A word wider than the line is split into
/// character chunks.
///
/// # Arguments
/// * `text` - Text to split (no newlines)
/// * `max_width` - Maximum line width, in the unit `measure` returns
/// * `measure` - Width of a string
pub fn wrap_to_width<F>(text: &str, max_width: f64, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f64,
{
    let mut lines = Vec::new();
    if text.is_empty() {
        lines.push(String::new());
        return lines;
    }

    let space_width = measure(" ");
    let mut current: Option<(String, f64)> = None;

    for word in text.split(' ') {
        let word_width = measure(word);

        if let Some((line, width)) = current.as_mut() {
            if *width + space_width + word_width <= max_width {
                line.push(' ');
                line.push_str(word);
                *width += space_width + word_width;
                continue;
            }
            if let Some((line, _)) = current.take() {
                lines.push(line);
            }
        }

        current = Some(start_line(word, word_width, max_width, &measure, &mut lines));
    }

    if let Some((line, _)) = current {
        lines.push(line);
    }

    lines
}

/// Begin a new line with `word`, pushing full chunks if the word itself overflows
fn start_line<F>(
    word: &str,
    word_width: f64,
    max_width: f64,
    measure: &F,
    lines: &mut Vec<String>,
) -> (String, f64)
where
    F: Fn(&str) -> f64,
{
    if word_width <= max_width {
        return (word.to_string(), word_width);
    }

    let mut chunk = String::new();
    let mut chunk_width = 0.0;
    let mut buf = [0u8; 4];

    for c in word.chars() {
        let char_width = measure(&*c.encode_utf8(&mut buf));
        if !chunk.is_empty() && chunk_width + char_width > max_width {
            lines.push(std::mem::take(&mut chunk));
            chunk_width = 0.0;
        }
        chunk.push(c);
        chunk_width += char_width;
    }

    (chunk, chunk_width)
}
