//! Text helpers for the sheet layout.
//!
//! Widths are estimated from font size; the layout never needs real glyph
//! metrics, only enough to truncate and wrap conservatively.

use chrono::{Datelike, NaiveDate};

const AVG_GLYPH_EM: f32 = 0.58;
const ELLIPSIS: char = '…';

const MONTHS_ES: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
];

/// Estimated advance width of `text` in pixels.
pub fn approx_text_width(text: &str, font_size: f32, letter_spacing: f32) -> f32 {
    let n = text.chars().count() as f32;
    n * (font_size * AVG_GLYPH_EM + letter_spacing)
}

/// Cut `text` so that it fits `max_width`, ending with an ellipsis when shortened.
pub fn truncate_to_width(text: &str, max_width: f32, font_size: f32, letter_spacing: f32) -> String {
    if approx_text_width(text, font_size, letter_spacing) <= max_width + 1e-3 {
        return text.to_string();
    }
    let per_char = font_size * AVG_GLYPH_EM + letter_spacing;
    let fit = ((max_width / per_char).floor() as usize).saturating_sub(1);
    let mut out: String = text.chars().take(fit).collect();
    out.truncate(out.trim_end().len());
    out.push(ELLIPSIS);
    out
}

/// Split on explicit newlines, then greedily wrap each paragraph at `max_chars`.
///
/// Empty paragraphs are kept as empty lines; words longer than a line are split.
pub fn wrap_lines(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let paragraph = paragraph.trim_end_matches('\r');
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut current = String::new();
        let mut current_len = 0usize;
        for word in paragraph.split_whitespace() {
            let mut chars: Vec<char> = word.chars().collect();
            while chars.len() > max_chars {
                if current_len > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                let rest = chars.split_off(max_chars);
                lines.push(chars.into_iter().collect());
                chars = rest;
            }
            let word_len = chars.len();
            if word_len == 0 {
                continue;
            }
            let needed = if current_len == 0 { word_len } else { current_len + 1 + word_len };
            if needed > max_chars {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.extend(chars);
            current_len += word_len;
        }
        if current_len > 0 {
            lines.push(current);
        }
    }
    lines
}

/// Format an ISO date as `DD mmm YYYY` with Spanish month abbreviations.
///
/// Anything that does not parse is shown as typed.
pub fn format_match_date(iso: &str) -> String {
    match NaiveDate::parse_from_str(iso.trim(), "%Y-%m-%d") {
        Ok(date) => format!("{:02} {} {}", date.day(), MONTHS_ES[date.month0() as usize], date.year()),
        Err(_) => iso.to_string(),
    }
}

pub fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_match_date() {
        assert_eq!(format_match_date("2023-10-12"), "12 oct 2023");
        assert_eq!(format_match_date("2024-09-01"), "01 sept 2024");
        assert_eq!(format_match_date("mañana"), "mañana");
        assert_eq!(format_match_date(""), "");
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("Muné", 100.0, 10.0, 0.0), "Muné");
        let cut = truncate_to_width("Nicolás Canavessio Rodríguez", 60.0, 10.0, 0.0);
        assert!(cut.ends_with('…'));
        assert!(approx_text_width(&cut, 10.0, 0.0) <= 60.0);
    }

    #[test]
    fn test_truncate_keeps_exact_fit() {
        let name = "Libertad de Sunchales";
        let size = 110.0 / approx_text_width(name, 1.0, 0.0);
        assert_eq!(truncate_to_width(name, 110.0, size, 0.0), name);
    }

    #[test]
    fn test_wrap_lines_keeps_breaks_and_wraps() {
        let lines = wrap_lines("uno dos tres\n\ncuatro", 7);
        assert_eq!(lines, vec!["uno dos", "tres", "", "cuatro"]);
    }

    #[test]
    fn test_wrap_lines_splits_long_words() {
        let lines = wrap_lines("abcdefghij k", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij k"]);
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("A & B <c> \"d\""), "A &amp; B &lt;c&gt; &quot;d&quot;");
    }
}
