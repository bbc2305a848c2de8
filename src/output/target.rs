//! Scrolling target indicator.
//!
//! Animates a short pulse glyph across a fixed label, synchronized to
//! elapsed wall-clock time instead of transfer progress. The field stays
//! alive even when the server reports no total size, and the scroll rate
//! is independent of terminal width: a label of length L completes one
//! sweep in roughly `L / 40 * (L - pulse_len)` seconds at speed 1.0.
//!
//! Plugged into an [`indicatif`] template as a custom key via
//! [`ProgressStyle::with_key`](indicatif::ProgressStyle::with_key).

use std::fmt;
use std::time::Instant;

use console::Style;
use indicatif::style::ProgressTracker;
use indicatif::ProgressState;

/// Shown when no target text was configured.
const PLACEHOLDER: &str = "<unspecified>";

/// Compute the cursor position for the pulse glyph.
///
/// Deterministic in `(elapsed_secs, speed, text_len, pulse_len)`; the
/// result is always in `[0, text_len - pulse_len)`. The step interval
/// scales with the label length so short and long labels sweep at a
/// similar visual pace.
pub(crate) fn cursor_position(
    elapsed_secs: f64,
    speed: f64,
    text_len: usize,
    pulse_len: usize,
) -> usize {
    let span = text_len.saturating_sub(pulse_len).max(1);
    let steps = ((elapsed_secs * speed) / (text_len as f64 / 40.0)).floor();
    if !steps.is_finite() || steps <= 0.0 {
        return 0;
    }
    (steps as u64 % span as u64) as usize
}

fn byte_offset(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

fn char_slice(text: &str, start: usize, end: usize) -> &str {
    let s = byte_offset(text, start);
    let e = byte_offset(text, end.max(start));
    &text[s..e]
}

/// Split the label into (front, covered, rear) around the cursor.
///
/// `covered` is the slice of the label the cursor replaces: `pulse_len`
/// characters, or a single character when the pulse glyph is empty (the
/// degenerate case renders that character itself in the pulse style).
pub(crate) fn split_at_cursor(
    text: &str,
    pulse_len: usize,
    position: usize,
) -> (&str, &str, &str) {
    let len = text.chars().count();
    let consumed = pulse_len.max(1);
    let start = position.min(len);
    let end = (position + consumed).min(len);
    (
        char_slice(text, 0, start),
        char_slice(text, start, end),
        char_slice(text, end, len),
    )
}

/// Time-synchronized scrolling label for a progress-bar template key.
#[derive(Clone)]
pub struct TargetIndicator {
    text: String,
    pulse: String,
    speed: f64,
    text_style: Style,
    pulse_style: Style,
    started: Option<Instant>,
    rendered: String,
}

impl TargetIndicator {
    /// Create an indicator for the given label and pulse glyph.
    pub fn new(text: impl Into<String>, pulse: impl Into<String>) -> Self {
        let mut text = text.into();
        if text.is_empty() {
            text = PLACEHOLDER.to_string();
        }
        let mut indicator = Self {
            text,
            pulse: pulse.into(),
            speed: 1.0,
            text_style: Style::new(),
            pulse_style: Style::new(),
            started: None,
            rendered: String::new(),
        };
        indicator.rendered = indicator.render(0.0, false);
        indicator
    }

    /// Scroll speed multiplier, 1.0 by default.
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self.rendered = self.render(0.0, false);
        self
    }

    /// Styles for the label text and the pulse glyph.
    pub fn with_styles(mut self, text_style: Style, pulse_style: Style) -> Self {
        self.text_style = text_style;
        self.pulse_style = pulse_style;
        self.rendered = self.render(0.0, false);
        self
    }

    fn render(&self, elapsed_secs: f64, finished: bool) -> String {
        // A finished transfer shows the plain label, no borders, no pulse.
        if finished {
            return self.text_style.apply_to(&self.text).to_string();
        }

        let len = self.text.chars().count();
        let pulse_len = self.pulse.chars().count();
        let position = cursor_position(elapsed_secs, self.speed, len, pulse_len);
        let (front, covered, rear) = split_at_cursor(&self.text, pulse_len, position);
        // Without a pulse glyph the covered character stands in for it,
        // keeping the label's own style.
        let cursor = if pulse_len == 0 {
            self.text_style.apply_to(covered)
        } else {
            self.pulse_style.apply_to(self.pulse.as_str())
        };

        format!(
            "[{}{}{}]",
            self.text_style.apply_to(front),
            cursor,
            self.text_style.apply_to(rear)
        )
    }
}

impl ProgressTracker for TargetIndicator {
    fn clone_box(&self) -> Box<dyn ProgressTracker> {
        Box::new(self.clone())
    }

    fn tick(&mut self, state: &ProgressState, now: Instant) {
        // The reference time is the first render, not bar creation.
        let started = *self.started.get_or_insert(now);
        let elapsed = now.saturating_duration_since(started).as_secs_f64();
        self.rendered = self.render(elapsed, state.is_finished());
    }

    fn reset(&mut self, _state: &ProgressState, now: Instant) {
        self.started = Some(now);
    }

    fn write(&self, state: &ProgressState, w: &mut dyn fmt::Write) {
        if state.is_finished() {
            let _ = w.write_str(&self.render(0.0, true));
        } else {
            let _ = w.write_str(&self.rendered);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_is_deterministic() {
        let a = cursor_position(10.0, 1.0, 20, 3);
        let b = cursor_position(10.0, 1.0, 20, 3);
        assert_eq!(a, b);
    }

    #[test]
    fn test_position_formula() {
        // L=20, P=3, speed 1.0: one step per 0.5s, wrapping at 17.
        assert_eq!(cursor_position(0.0, 1.0, 20, 3), 0);
        assert_eq!(cursor_position(0.5, 1.0, 20, 3), 1);
        assert_eq!(cursor_position(1.2, 1.0, 20, 3), 2);
        assert_eq!(cursor_position(10.0, 1.0, 20, 3), 20 % 17);
    }

    #[test]
    fn test_position_scales_with_speed() {
        assert_eq!(
            cursor_position(5.0, 2.0, 20, 3),
            cursor_position(10.0, 1.0, 20, 3)
        );
    }

    #[test]
    fn test_position_stays_in_range() {
        for tenths in 0..1000 {
            let pos = cursor_position(tenths as f64 / 10.0, 1.3, 24, 3);
            assert!(pos < 24 - 3);
        }
    }

    #[test]
    fn test_position_pulse_longer_than_text() {
        assert_eq!(cursor_position(42.0, 1.0, 2, 5), 0);
    }

    #[test]
    fn test_split_replaces_pulse_len_chars() {
        let (front, covered, rear) = split_at_cursor("consumption.csv", 3, 4);
        assert_eq!(front, "cons");
        assert_eq!(covered, "ump");
        assert_eq!(rear, "tion.csv");
    }

    #[test]
    fn test_split_degenerate_pulse_covers_one_char() {
        let (front, covered, rear) = split_at_cursor("data.csv", 0, 2);
        assert_eq!(front, "da");
        assert_eq!(covered, "t");
        assert_eq!(rear, "a.csv");
    }

    #[test]
    fn test_split_clamps_at_end() {
        let (front, covered, rear) = split_at_cursor("abc", 3, 2);
        assert_eq!(front, "ab");
        assert_eq!(covered, "c");
        assert_eq!(rear, "");
    }

    #[test]
    fn test_split_is_char_safe() {
        let (front, covered, rear) = split_at_cursor("héllo", 1, 1);
        assert_eq!(front, "h");
        assert_eq!(covered, "é");
        assert_eq!(rear, "llo");
    }

    #[test]
    fn test_render_unfinished_has_borders_and_pulse() {
        let indicator = TargetIndicator::new("consumption.csv", ">");
        let rendered = indicator.render(0.0, false);
        assert_eq!(rendered, "[>onsumption.csv]");
    }

    #[test]
    fn test_render_finished_is_plain_text() {
        let indicator = TargetIndicator::new("consumption.csv", ">");
        assert_eq!(indicator.render(123.0, true), "consumption.csv");
    }

    #[test]
    fn test_render_preserves_label_width() {
        let indicator = TargetIndicator::new("L1-em_data.csv", "|=|");
        let rendered = indicator.render(3.7, false);
        // borders plus the label with three chars replaced by the pulse
        assert_eq!(rendered.chars().count(), "L1-em_data.csv".chars().count() + 2);
    }

    #[test]
    fn test_degenerate_pulse_keeps_text_style() {
        let pulse_style = Style::new().red().force_styling(true);

        // No pulse glyph: the covered character renders in the label's
        // style, so the forced pulse style must leave no trace.
        let without_pulse =
            TargetIndicator::new("data.csv", "").with_styles(Style::new(), pulse_style.clone());
        assert!(!without_pulse.render(0.0, false).contains('\u{1b}'));

        let with_pulse =
            TargetIndicator::new("data.csv", ">").with_styles(Style::new(), pulse_style);
        assert!(with_pulse.render(0.0, false).contains('\u{1b}'));
    }

    #[test]
    fn test_empty_text_uses_placeholder() {
        let indicator = TargetIndicator::new("", ">");
        assert_eq!(indicator.render(0.0, true), "<unspecified>");
    }
}
