//! Static font metrics and page geometry for exported playbooks.
//!
//! Character widths are the standard Helvetica AFM advances in thousandths of
//! an em. Builtin PDF fonts are written in WinAnsiEncoding, so the encodable
//! set is Windows-1252: ASCII, the Latin-1 letters and the typographic
//! punctuation in 0x80..=0x9F (curly quotes, dashes, bullet, euro).

const PT_TO_MM: f32 = 25.4 / 72.0;

// ────────────────────────────────────────────────────────────────────────────
// Page geometry
// ────────────────────────────────────────────────────────────────────────────

/// Fixed geometry of an exported playbook. All lengths in millimetres.
#[derive(Debug, Clone)]
pub struct PageSetup {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_mm: f32,
    /// Distance from the bottom edge that triggers a page break.
    pub break_margin_mm: f32,
    /// Inner padding on each side of a paragraph cell.
    pub cell_padding_mm: f32,
    pub line_height_mm: f32,
    pub font_size_pt: f32,
}

/// A4 portrait, 10 mm margins, Helvetica 12pt on 10 mm lines.
pub fn default_page_setup() -> PageSetup {
    PageSetup {
        page_width_mm: 210.0,
        page_height_mm: 297.0,
        margin_mm: 10.0,
        break_margin_mm: 20.0,
        cell_padding_mm: 1.0,
        line_height_mm: 10.0,
        font_size_pt: 12.0,
    }
}

impl PageSetup {
    /// Width available to text inside a full-width cell.
    pub fn text_width_mm(&self) -> f32 {
        self.page_width_mm - 2.0 * self.margin_mm - 2.0 * self.cell_padding_mm
    }

    pub fn text_x_mm(&self) -> f32 {
        self.margin_mm + self.cell_padding_mm
    }

    pub fn font_size_mm(&self) -> f32 {
        self.font_size_pt * PT_TO_MM
    }

    /// Lowest y (from the top) a row may end at before breaking the page.
    pub fn page_break_y_mm(&self) -> f32 {
        self.page_height_mm - self.break_margin_mm
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Windows-1252 characters outside Latin-1, with their Helvetica widths.
const WIN_ANSI_EXTRAS: [(char, u16); 27] = [
    ('€', 556),
    ('‚', 222),
    ('ƒ', 556),
    ('„', 333),
    ('…', 1000),
    ('†', 556),
    ('‡', 556),
    ('ˆ', 333),
    ('‰', 1000),
    ('Š', 667),
    ('‹', 333),
    ('Œ', 1000),
    ('Ž', 611),
    ('‘', 222),
    ('’', 222),
    ('“', 333),
    ('”', 333),
    ('•', 350),
    ('–', 556),
    ('—', 1000),
    ('˜', 333),
    ('™', 1000),
    ('š', 500),
    ('›', 333),
    ('œ', 944),
    ('ž', 500),
    ('Ÿ', 667),
];

fn win_ansi_extra_width(c: char) -> Option<u16> {
    WIN_ANSI_EXTRAS
        .iter()
        .find(|(extra, _)| *extra == c)
        .map(|(_, width)| *width)
}

/// Width table for a single-byte PDF font.
///
/// `widths[i]` = advance of ASCII character `(i + 32)` in 1/1000 em.
pub struct FontMetricTable {
    widths: [u16; 95],
    pub average_char_width: u16,
}

impl FontMetricTable {
    /// Advance of one character, in millimetres at `font_size_pt`.
    pub fn char_width_mm(&self, c: char, font_size_pt: f32) -> f32 {
        let code = c as usize;
        let units = if (32..=126).contains(&code) {
            self.widths[code - 32]
        } else {
            win_ansi_extra_width(c).unwrap_or(self.average_char_width)
        };
        units as f32 / 1000.0 * font_size_pt * PT_TO_MM
    }

    /// Whether WinAnsiEncoding can carry `c`. Control characters other than
    /// tab are refused.
    pub fn can_encode(&self, c: char) -> bool {
        if c == '\t' {
            return true;
        }
        if c.is_control() {
            return false;
        }
        (c as u32) <= 0xFF || win_ansi_extra_width(c).is_some()
    }

    #[cfg(test)]
    pub fn measure_mm(&self, s: &str, font_size_pt: f32) -> f32 {
        s.chars().map(|c| self.char_width_mm(c, font_size_pt)).sum()
    }
}

/// Helvetica — the PDF base-14 sans-serif.
pub static HELVETICA: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0    1    2    3    4    5    6    7    8    9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        278, 278, 584, 584, 584, 556, 1015,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        278, 278, 278, 469, 556, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
        // {    |    }    ~
        334, 260, 334, 584,
    ],
    average_char_width: 556,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a4_text_width() {
        let setup = default_page_setup();
        assert!((setup.text_width_mm() - 188.0).abs() < f32::EPSILON);
        assert!((setup.text_x_mm() - 11.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_narrow_and_wide_characters() {
        let i = HELVETICA.char_width_mm('i', 12.0);
        let m = HELVETICA.char_width_mm('M', 12.0);
        assert!(m > 3.0 * i);
    }

    #[test]
    fn test_measure_is_sum_of_chars() {
        let total = HELVETICA.measure_mm("ab", 12.0);
        let parts = HELVETICA.char_width_mm('a', 12.0) + HELVETICA.char_width_mm('b', 12.0);
        assert!((total - parts).abs() < 1e-5);
    }

    #[test]
    fn test_zero_digit_at_12pt() {
        // 556/1000 em × 12pt × 0.3528 mm/pt ≈ 2.354 mm
        let w = HELVETICA.char_width_mm('0', 12.0);
        assert!((w - 2.354).abs() < 0.01, "got {w}");
    }

    #[test]
    fn test_encoding_range() {
        assert!(HELVETICA.can_encode('a'));
        assert!(HELVETICA.can_encode('é'));
        assert!(HELVETICA.can_encode('\t'));
        assert!(!HELVETICA.can_encode('❌'));
        assert!(!HELVETICA.can_encode('✅'));
        assert!(!HELVETICA.can_encode('\u{7}'));
        assert!(!HELVETICA.can_encode('\u{92}'));
    }

    #[test]
    fn test_typographic_punctuation_is_encodable() {
        for c in ['’', '‘', '“', '”', '—', '–', '•', '…', '€', '™'] {
            assert!(HELVETICA.can_encode(c), "{c:?} should be encodable");
        }
    }

    #[test]
    fn test_typographic_widths_come_from_afm() {
        let em_dash = HELVETICA.char_width_mm('—', 12.0);
        let hyphen = HELVETICA.char_width_mm('-', 12.0);
        assert!(em_dash > 2.0 * hyphen);
        // 222/1000 em, narrower than the 556 fallback.
        let apostrophe = HELVETICA.char_width_mm('’', 12.0);
        assert!((apostrophe - 0.9398).abs() < 0.01, "got {apostrophe}");
    }
}
