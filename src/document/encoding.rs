//! Text encoding tag and byte conversion.
//!
//! The editor works on UTF-8 internally. Files are decoded on load and
//! encoded back on save through `encoding_rs`.

use std::borrow::Cow;

/// Supported file encodings.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// UTF-8 (default)
    #[default]
    Utf8,
    /// Latin-1 / Windows-1252, 8-bit safe
    Latin1,
    /// Shift-JIS (Japanese)
    ShiftJis,
    /// EUC-KR (Korean)
    EucKr,
    /// GB18030 (Chinese)
    Gb18030,
}

impl Encoding {
    /// Name used in config files and on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Utf8 => "utf8",
            Self::Latin1 => "latin1",
            Self::ShiftJis => "shift-jis",
            Self::EucKr => "euc-kr",
            Self::Gb18030 => "gb18030",
        }
    }

    /// Parse a config/CLI name, accepting common aliases.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Some(Self::Utf8),
            "latin1" | "iso-8859-1" | "windows-1252" | "cp1252" => Some(Self::Latin1),
            "shift-jis" | "shift_jis" | "sjis" => Some(Self::ShiftJis),
            "euc-kr" => Some(Self::EucKr),
            "gb18030" | "gbk" => Some(Self::Gb18030),
            _ => None,
        }
    }

    fn to_encoding_rs(self) -> &'static encoding_rs::Encoding {
        match self {
            Self::Utf8 => encoding_rs::UTF_8,
            Self::Latin1 => encoding_rs::WINDOWS_1252,
            Self::ShiftJis => encoding_rs::SHIFT_JIS,
            Self::EucKr => encoding_rs::EUC_KR,
            Self::Gb18030 => encoding_rs::GB18030,
        }
    }

    /// Decode file bytes. The flag is true when malformed input was replaced.
    pub fn decode(self, bytes: &[u8]) -> (Cow<'_, str>, bool) {
        self.to_encoding_rs().decode_without_bom_handling(bytes)
    }

    /// Encode text for writing. The flag is true when some characters were
    /// not representable and got substituted.
    pub fn encode(self, text: &str) -> (Cow<'_, [u8]>, bool) {
        let (bytes, _, had_errors) = self.to_encoding_rs().encode(text);
        (bytes, had_errors)
    }
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_accepts_aliases() {
        assert_eq!(Encoding::from_name("UTF-8"), Some(Encoding::Utf8));
        assert_eq!(Encoding::from_name("cp1252"), Some(Encoding::Latin1));
        assert_eq!(Encoding::from_name("sjis"), Some(Encoding::ShiftJis));
        assert_eq!(Encoding::from_name("ebcdic"), None);
    }

    #[test]
    fn test_name_round_trips_through_from_name() {
        for enc in [
            Encoding::Utf8,
            Encoding::Latin1,
            Encoding::ShiftJis,
            Encoding::EucKr,
            Encoding::Gb18030,
        ] {
            assert_eq!(Encoding::from_name(enc.name()), Some(enc));
        }
    }

    #[test]
    fn test_latin1_round_trips_printable_bytes() {
        let bytes: Vec<u8> = (0x20..=0x7e).chain(0xa0..=0xff).collect();
        let (text, had_errors) = Encoding::Latin1.decode(&bytes);
        assert!(!had_errors);
        let (back, lossy) = Encoding::Latin1.encode(&text);
        assert!(!lossy);
        assert_eq!(back.as_ref(), bytes.as_slice());
    }

    #[test]
    fn test_utf8_reports_malformed_input() {
        let (_, had_errors) = Encoding::Utf8.decode(b"ok \xff");
        assert!(had_errors);
        let (text, had_errors) = Encoding::Utf8.decode("héllo".as_bytes());
        assert!(!had_errors);
        assert_eq!(text, "héllo");
    }
}
