//! Length units for page geometry
//!
//! All geometry is stored in PDF points. Configuration files may spell
//! lengths with a CSS unit suffix (`"12pt"`, `"0.5in"`, `"10mm"`).

use crate::types::*;

/// Points per inch
pub const POINTS_PER_INCH: f32 = 72.0;

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = POINTS_PER_INCH / 25.4;

/// Points per CSS pixel (96 px per inch)
pub const POINTS_PER_PX: f32 = POINTS_PER_INCH / 96.0;

/// Points per pica
pub const POINTS_PER_PICA: f32 = 12.0;

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

/// Convert points to millimeters
#[inline]
pub fn pt_to_mm(pt: f32) -> f32 {
    pt / POINTS_PER_MM
}

/// Parse a length such as `"12pt"` or `"1.5in"` into points.
///
/// A bare number is taken as points.
pub fn parse_length(input: &str) -> Result<f32> {
    let trimmed = input.trim();
    let number = trimmed.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    let unit = &trimmed[number.len()..];

    let value: f32 = number
        .trim()
        .parse()
        .map_err(|_| PaginationError::Config(format!("Invalid length \"{}\"", input)))?;

    let factor = match unit.to_ascii_lowercase().as_str() {
        "" | "pt" => 1.0,
        "px" => POINTS_PER_PX,
        "pc" => POINTS_PER_PICA,
        "in" => POINTS_PER_INCH,
        "mm" => POINTS_PER_MM,
        "cm" => POINTS_PER_MM * 10.0,
        other => {
            return Err(PaginationError::Config(format!(
                "Unknown unit \"{}\" in length \"{}\"",
                other, input
            )));
        }
    };

    Ok(value * factor)
}

/// Serde adapter: lengths serialize as points and deserialize from either
/// a number of points or a string with a unit.
#[cfg(feature = "serde")]
pub(crate) mod serde_length {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawLength {
        Points(f32),
        Text(String),
    }

    pub fn serialize<S>(value: &f32, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f32(*value)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f32, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawLength::deserialize(deserializer)? {
            RawLength::Points(pt) => Ok(pt),
            RawLength::Text(text) => {
                super::parse_length(&text).map_err(|e| serde::de::Error::custom(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_points() {
        assert_eq!(parse_length("12pt").unwrap(), 12.0);
        assert_eq!(parse_length("  36 ").unwrap(), 36.0);
        assert_eq!(parse_length("1.5pc").unwrap(), 18.0);
    }

    #[test]
    fn test_parse_imperial_and_metric() {
        assert_eq!(parse_length("1in").unwrap(), 72.0);
        assert!((parse_length("25.4mm").unwrap() - 72.0).abs() < 0.001);
        assert!((parse_length("2.54cm").unwrap() - 72.0).abs() < 0.001);
        assert_eq!(parse_length("96px").unwrap(), 72.0);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse_length("12furlongs"),
            Err(PaginationError::Config(_))
        ));
        assert!(parse_length("pt").is_err());
        assert!(parse_length("").is_err());
    }

    #[test]
    fn test_mm_round_trip() {
        assert!((pt_to_mm(mm_to_pt(210.0)) - 210.0).abs() < 0.001);
    }
}
