//! Static width tables for the two PDF base fonts the report uses.
//!
//! Widths are the Adobe Helvetica / Helvetica-Bold AFM advance widths in
//! thousandths of an em. Both tables cover ASCII 0x20..=0x7E (95 printable
//! characters), index = (char as usize) - 32. Accented Latin letters measure
//! as their base letter; typographic punctuation has explicit entries.

use serde::Serialize;
use unicode_normalization::UnicodeNormalization;

// ────────────────────────────────────────────────────────────────────────────
// Font faces
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FontFace {
    Regular,
    Bold,
}

// ────────────────────────────────────────────────────────────────────────────
// Page configuration
// ────────────────────────────────────────────────────────────────────────────

/// Geometry and type sizes for rendered reports, in PDF points.
#[derive(Debug, Clone, Serialize)]
pub struct PageConfig {
    pub width_pt: f32,
    pub height_pt: f32,
    pub margin_pt: f32,
    pub title_size: f32,
    pub heading_size: f32,
    pub body_size: f32,
    pub footer_size: f32,
    /// Baseline-to-baseline distance as a multiple of the font size.
    pub line_spacing: f32,
    pub bar_width_pt: f32,
    pub bar_height_pt: f32,
}

impl PageConfig {
    pub fn text_width_pt(&self) -> f32 {
        self.width_pt - 2.0 * self.margin_pt
    }
}

/// A4 portrait with 48pt margins.
pub fn default_page_config() -> PageConfig {
    PageConfig {
        width_pt: 595.28,
        height_pt: 841.89,
        margin_pt: 48.0,
        title_size: 18.0,
        heading_size: 13.0,
        body_size: 11.0,
        footer_size: 9.0,
        line_spacing: 1.4,
        bar_width_pt: 140.0,
        bar_height_pt: 8.0,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

pub struct FontMetricTable {
    widths: [u16; 95],
    /// Fallback for characters with no entry and no ASCII base letter.
    pub average_char_width: u16,
}

impl FontMetricTable {
    fn char_width(&self, c: char) -> u16 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            return self.widths[code - 32];
        }
        match c {
            '•' => 350,
            '–' => 556,
            '—' | '…' => 1000,
            '‘' | '’' => 222,
            '“' | '”' => 333,
            '\u{a0}' => self.widths[0],
            _ => c
                .nfd()
                .next()
                .filter(char::is_ascii_graphic)
                .map(|base| self.widths[base as usize - 32])
                .unwrap_or(self.average_char_width),
        }
    }

    /// Rendered width of `s` in points at `size`.
    pub fn measure_str(&self, s: &str, size: f32) -> f32 {
        let units: u32 = s.chars().map(|c| self.char_width(c) as u32).sum();
        units as f32 * size / 1000.0
    }

    /// Greedy word wrap at `max_width` points. Words wider than a line are
    /// hard-broken at character boundaries.
    pub fn wrap(&self, s: &str, size: f32, max_width: f32) -> Vec<String> {
        let space = self.measure_str(" ", size);
        let mut lines = Vec::new();
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        let pieces = s
            .split_whitespace()
            .flat_map(|word| self.break_word(word, size, max_width));
        for word in pieces {
            let word_width = self.measure_str(word, size);
            if current.is_empty() {
                current.push_str(word);
                current_width = word_width;
            } else if current_width + space + word_width > max_width {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_width;
            } else {
                current.push(' ');
                current.push_str(word);
                current_width += space + word_width;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }

    /// Splits `word` into pieces no wider than `max_width`. Each piece holds at least one char.
    fn break_word<'w>(&self, word: &'w str, size: f32, max_width: f32) -> Vec<&'w str> {
        if self.measure_str(word, size) <= max_width {
            return vec![word];
        }
        let mut pieces = Vec::new();
        let mut start = 0;
        let mut width = 0.0_f32;
        for (index, c) in word.char_indices() {
            let char_width = self.char_width(c) as f32 * size / 1000.0;
            if index > start && width + char_width > max_width {
                pieces.push(&word[start..index]);
                start = index;
                width = 0.0;
            }
            width += char_width;
        }
        pieces.push(&word[start..]);
        pieces
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables
// ────────────────────────────────────────────────────────────────────────────

static HELVETICA: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp  !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0-9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :   ;    <    =    >    ?    @
        278, 278, 584, 584, 584, 556, 1015,
        // A   B    C    D    E    F    G    H    I    J    K    L    M
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
        // N   O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [   \    ]    ^    _    `
        278, 278, 278, 469, 556, 333,
        // a   b    c    d    e    f    g    h    i    j    k    l    m
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
        // n   o    p    q    r    s    t    u    v    w    x    y    z
        556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
        // {   |    }    ~
        334, 260, 334, 584,
    ],
    average_char_width: 556,
};

static HELVETICA_BOLD: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp  !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0-9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :   ;    <    =    >    ?    @
        333, 333, 584, 584, 584, 611, 975,
        // A   B    C    D    E    F    G    H    I    J    K    L    M
        722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
        // N   O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [   \    ]    ^    _    `
        333, 278, 333, 584, 556, 333,
        // a   b    c    d    e    f    g    h    i    j    k    l    m
        556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
        // n   o    p    q    r    s    t    u    v    w    x    y    z
        611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
        // {   |    }    ~
        389, 280, 389, 584,
    ],
    average_char_width: 611,
};

pub fn get_metrics(face: FontFace) -> &'static FontMetricTable {
    match face {
        FontFace::Regular => &HELVETICA,
        FontFace::Bold => &HELVETICA_BOLD,
    }
}
