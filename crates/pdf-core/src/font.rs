//! Standard PDF fonts (Helvetica family) and their glyph metrics

use lopdf::{dictionary, Dictionary};

/// Font weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

/// Font style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

/// One of the standard Type1 Helvetica faces every PDF viewer ships with
///
/// No font program is embedded; text is written in WinAnsiEncoding, which
/// covers the Latin-1 range (á, é, í, ó, ú, ñ, ü, ¿, ¡, º, ª).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StandardFont {
    #[default]
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
}

/// Helvetica advance widths for codes 32..=126 (1/1000 em)
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // 32-47
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0-9
    278, 278, 584, 584, 584, 556, 1015, // :;<=>?@
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A-M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N-Z
    278, 278, 278, 469, 556, 333, // [\]^_`
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a-m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n-z
    334, 260, 334, 584, // {|}~
];

/// Helvetica-Bold advance widths for codes 32..=126 (1/1000 em)
const HELVETICA_BOLD_ASCII: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // 32-47
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0-9
    333, 333, 584, 584, 584, 611, 975, // :;<=>?@
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // A-M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N-Z
    333, 278, 333, 584, 556, 333, // [\]^_`
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // a-m
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // n-z
    389, 280, 389, 584, // {|}~
];

/// Width used for anything the tables do not describe
const DEFAULT_WIDTH: u16 = 556;

impl StandardFont {
    /// Pick the face for a weight/style combination
    pub fn from_variant(weight: FontWeight, style: FontStyle) -> Self {
        match (weight, style) {
            (FontWeight::Regular, FontStyle::Normal) => Self::Helvetica,
            (FontWeight::Bold, FontStyle::Normal) => Self::HelveticaBold,
            (FontWeight::Regular, FontStyle::Italic) => Self::HelveticaOblique,
            (FontWeight::Bold, FontStyle::Italic) => Self::HelveticaBoldOblique,
        }
    }

    pub fn weight(self) -> FontWeight {
        match self {
            Self::HelveticaBold | Self::HelveticaBoldOblique => FontWeight::Bold,
            Self::Helvetica | Self::HelveticaOblique => FontWeight::Regular,
        }
    }

    pub fn style(self) -> FontStyle {
        match self {
            Self::HelveticaOblique | Self::HelveticaBoldOblique => FontStyle::Italic,
            Self::Helvetica | Self::HelveticaBold => FontStyle::Normal,
        }
    }

    /// PostScript name written to `/BaseFont`
    pub fn base_font(self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica",
            Self::HelveticaBold => "Helvetica-Bold",
            Self::HelveticaOblique => "Helvetica-Oblique",
            Self::HelveticaBoldOblique => "Helvetica-BoldOblique",
        }
    }

    /// Advance width of a single character in 1/1000 em
    ///
    /// Oblique faces share the metrics of their upright counterparts.
    pub fn glyph_width(self, c: char) -> u16 {
        let bold = self.weight() == FontWeight::Bold;
        let code = win_ansi_code(c);

        if (32..=126).contains(&code) {
            let table = if bold {
                &HELVETICA_BOLD_ASCII
            } else {
                &HELVETICA_ASCII
            };
            return table[(code - 32) as usize];
        }

        match code {
            0x85 | 0x97 => 1000, // … —
            0x96 => 556,         // –
            0x91 | 0x92 | 0x82 => {
                if bold {
                    278
                } else {
                    222
                }
            }
            0x93 | 0x94 | 0x84 => {
                if bold {
                    500
                } else {
                    333
                }
            }
            0x95 => 350,
            0xA0 => 278,
            0xA1 => 333,
            0xAA => 370,
            0xBA => 365,
            0xB0 => 400,
            0xBF => 611,
            0xD7 | 0xF7 => 584,
            0xEC..=0xEF => 278, // ì í î ï are wider than dotted i in the regular face
            _ => match fold_accent(c) {
                Some(base) => self.glyph_width(base),
                None => DEFAULT_WIDTH,
            },
        }
    }

    /// Width of a string in font units (1/1000 em)
    pub fn text_width(self, text: &str) -> u32 {
        text.chars().map(|c| self.glyph_width(c) as u32).sum()
    }

    /// Width of a string in points at the given size
    pub fn text_width_points(self, text: &str, font_size: f32) -> f64 {
        self.text_width(text) as f64 * font_size as f64 / 1000.0
    }

    /// Encode text as a PDF hex string in WinAnsiEncoding (e.g. "<486F6C61>")
    ///
    /// Characters outside the encoding are written as '?'.
    pub fn encode_text_hex(self, text: &str) -> String {
        let mut hex = String::with_capacity(text.len() * 2 + 2);
        hex.push('<');
        for c in text.chars() {
            hex.push_str(&format!("{:02X}", win_ansi_code(c)));
        }
        hex.push('>');
        hex
    }

    /// Font dictionary for a page's `/Resources /Font` entry
    pub fn to_pdf_dictionary(self) -> Dictionary {
        dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => self.base_font(),
            "Encoding" => "WinAnsiEncoding",
        }
    }
}

/// Map a character to its WinAnsiEncoding byte, '?' when unmapped
fn win_ansi_code(c: char) -> u8 {
    match c {
        ' '..='~' => c as u8,
        '\u{A0}'..='\u{FF}' => c as u32 as u8,
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
        '\t' => b' ',
        _ => b'?',
    }
}

/// Base letter of an accented Latin-1 letter (accents do not change advance width)
fn fold_accent(c: char) -> Option<char> {
    let base = match c {
        'À'..='Å' => 'A',
        'Ç' => 'C',
        'È'..='Ë' => 'E',
        'Ì'..='Ï' => 'I',
        'Ñ' => 'N',
        'Ò'..='Ö' => 'O',
        'Ù'..='Ü' => 'U',
        'Ý' => 'Y',
        'à'..='å' => 'a',
        'ç' => 'c',
        'è'..='ë' => 'e',
        'ñ' => 'n',
        'ò'..='ö' => 'o',
        'ù'..='ü' => 'u',
        'ý' | 'ÿ' => 'y',
        _ => return None,
    };
    Some(base)
}
