use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How logical pages map onto sheet faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Arrangement {
    /// One page per sheet, front only
    #[default]
    One,
    /// One spread per sheet: consecutive pages side by side
    Two,
    /// Saddle-stitch sheets, folded and nested
    Booklet,
}

impl Arrangement {
    /// Page slots on one face of a sheet
    pub fn pages_per_face(self) -> usize {
        match self {
            Arrangement::One => 1,
            Arrangement::Two | Arrangement::Booklet => 2,
        }
    }

    /// Page slots on a whole sheet
    pub fn pages_per_sheet(self) -> usize {
        match self {
            Arrangement::One => 1,
            Arrangement::Two => 2,
            Arrangement::Booklet => 4,
        }
    }
}

/// Where the physical sheet size comes from
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SheetSize {
    /// Fit the sheet to the page box plus whatever the marks need
    #[default]
    Auto,
    /// A named paper size; pages are centered on it
    Fixed {
        paper: PaperSize,
        orientation: Orientation,
    },
}

/// Which printer's marks to draw around each page box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MarksPolicy {
    None,
    /// Crop marks at the trim corners
    #[default]
    Crop,
    /// Bleed marks at the bleed corners, with the bleed area shown
    Bleed,
    Both,
}

impl MarksPolicy {
    pub fn crop(self) -> bool {
        matches!(self, MarksPolicy::Crop | MarksPolicy::Both)
    }

    pub fn bleed(self) -> bool {
        matches!(self, MarksPolicy::Bleed | MarksPolicy::Both)
    }

    pub fn any(self) -> bool {
        self != MarksPolicy::None
    }
}

/// Imposition request
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ArrangementConfig {
    pub arrangement: Arrangement,
    pub sheet_size: SheetSize,
    pub marks: MarksPolicy,
}

impl ArrangementConfig {
    pub fn new(arrangement: Arrangement) -> Self {
        Self {
            arrangement,
            ..Default::default()
        }
    }

    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let config = serde_json::from_slice(&bytes)
            .map_err(|e| ImposeError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ImposeError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if let SheetSize::Fixed {
            paper: PaperSize::Custom {
                width_mm,
                height_mm,
            },
            ..
        } = self.sheet_size
        {
            if !(width_mm.is_finite() && height_mm.is_finite())
                || width_mm <= 0.0
                || height_mm <= 0.0
            {
                return Err(ImposeError::Config(format!(
                    "Custom paper size must be positive, got {} x {} mm",
                    width_mm, height_mm
                )));
            }
        }

        Ok(())
    }
}
