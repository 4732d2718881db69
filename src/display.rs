//! display: value rendering modes (string/base64/base58/hex).
//!
//! Pure formatting over bytes that were already read; nothing here touches
//! the store.

use std::fmt;
use std::str::FromStr;

use base64::Engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// UTF-8 text (invalid sequences replaced).
    #[default]
    Raw,
    Base64,
    Base58,
    Hex,
}

impl DisplayMode {
    /// All modes in settings-menu order.
    pub const ALL: [DisplayMode; 4] = [
        DisplayMode::Raw,
        DisplayMode::Base64,
        DisplayMode::Base58,
        DisplayMode::Hex,
    ];

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|m| *m == self).unwrap_or(0)
    }

    pub fn from_index(i: usize) -> Self {
        Self::ALL.get(i).copied().unwrap_or_default()
    }

    /// Short lowercase name, as accepted by `FromStr` and the HTTP `encoding` parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            DisplayMode::Raw => "string",
            DisplayMode::Base64 => "base64",
            DisplayMode::Base58 => "base58",
            DisplayMode::Hex => "hex",
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DisplayMode::Raw => "String",
            DisplayMode::Base64 => "Base64",
            DisplayMode::Base58 => "Base58",
            DisplayMode::Hex => "Hex",
        };
        f.write_str(s)
    }
}

impl FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "string" | "raw" | "text" => Ok(DisplayMode::Raw),
            "base64" | "b64" => Ok(DisplayMode::Base64),
            "base58" | "b58" => Ok(DisplayMode::Base58),
            "hex" => Ok(DisplayMode::Hex),
            other => Err(format!(
                "unknown display mode '{}' (expected string|base64|base58|hex)",
                other
            )),
        }
    }
}

/// Render `bytes` according to `mode`.
pub fn format_value(bytes: &[u8], mode: DisplayMode) -> String {
    match mode {
        DisplayMode::Raw => String::from_utf8_lossy(bytes).into_owned(),
        DisplayMode::Base64 => base64::engine::general_purpose::STANDARD.encode(bytes),
        DisplayMode::Base58 => to_base58(bytes),
        DisplayMode::Hex => to_hex(bytes),
    }
}

pub fn to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        s.push_str(&format!("{:02x}", b));
    }
    s
}

const B58_ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Bitcoin-alphabet base58; each leading zero byte becomes a leading '1'.
pub fn to_base58(bytes: &[u8]) -> String {
    let zeros = bytes.iter().take_while(|&&b| b == 0).count();

    // little-endian base58 digits
    let mut digits: Vec<u8> = Vec::with_capacity(bytes.len() * 138 / 100 + 1);
    for &b in &bytes[zeros..] {
        let mut carry = b as u32;
        for d in digits.iter_mut() {
            carry += (*d as u32) << 8;
            *d = (carry % 58) as u8;
            carry /= 58;
        }
        while carry > 0 {
            digits.push((carry % 58) as u8);
            carry /= 58;
        }
    }

    let mut out = String::with_capacity(zeros + digits.len());
    out.extend(std::iter::repeat('1').take(zeros));
    out.extend(digits.iter().rev().map(|&d| B58_ALPHABET[d as usize] as char));
    out
}
