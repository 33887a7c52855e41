use crate::error::ParseError;
use crate::model::Rgb;

/// The syntactic form a color code was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorCode {
    Hex,
    Decimal,
}

impl ColorCode {
    /// Classify already-trimmed input.
    ///
    /// Any whitespace or comma means a decimal triplet; everything else is
    /// treated as hex so that typos report a hex error.
    pub fn detect(trimmed: &str) -> Self {
        if trimmed.contains(is_separator) {
            Self::Decimal
        } else {
            Self::Hex
        }
    }
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == ','
}

/// Parse user input into an [`Rgb`].
///
/// Surrounding whitespace is ignored. Hex input is case-insensitive and may
/// carry a `#` or `0x` prefix.
pub fn parse(text: &str) -> Result<Rgb, ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }

    match ColorCode::detect(trimmed) {
        ColorCode::Hex => parse_hex(trimmed),
        ColorCode::Decimal => parse_decimal(trimmed),
    }
}

fn hex_prefix_len(s: &str) -> usize {
    if s.starts_with('#') {
        1
    } else if s.starts_with("0x") || s.starts_with("0X") {
        2
    } else {
        0
    }
}

fn parse_hex(s: &str) -> Result<Rgb, ParseError> {
    let offset = hex_prefix_len(s);
    let digits = &s[offset..];

    let found = digits.chars().count();
    if found != 6 {
        return Err(ParseError::HexLength { found });
    }

    let mut packed = 0u32;
    for (index, c) in digits.char_indices() {
        let value = c.to_digit(16).ok_or(ParseError::HexDigit {
            index: offset + index,
        })?;
        packed = (packed << 4) | value;
    }

    Ok(Rgb::new(
        ((packed >> 16) & 0xFF) as u8,
        ((packed >> 8) & 0xFF) as u8,
        (packed & 0xFF) as u8,
    ))
}

fn parse_decimal(s: &str) -> Result<Rgb, ParseError> {
    let parts: Vec<&str> = s.split(is_separator).filter(|p| !p.is_empty()).collect();
    if parts.len() != 3 {
        return Err(ParseError::ComponentCount { found: parts.len() });
    }

    let mut components = [0i64; 3];
    for (slot, part) in components.iter_mut().zip(&parts) {
        *slot = parse_component(part)?;
    }

    Rgb::try_from_components(components)
}

/// An optional `-` followed by ASCII digits. Magnitudes beyond `i64`
/// saturate so they still report as out of range.
fn parse_component(part: &str) -> Result<i64, ParseError> {
    let negative = part.starts_with('-');
    let digits = if negative { &part[1..] } else { part };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::NotANumber {
            component: part.to_string(),
        });
    }

    let saturated = if negative { i64::MIN } else { i64::MAX };
    Ok(part.parse().unwrap_or(saturated))
}
