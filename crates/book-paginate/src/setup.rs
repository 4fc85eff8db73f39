use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Trimmed page size in points
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PageSize {
    #[cfg_attr(feature = "serde", serde(with = "crate::units::serde_length"))]
    pub width: f32,
    #[cfg_attr(feature = "serde", serde(with = "crate::units::serde_length"))]
    pub height: f32,
}

impl PageSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Page margins in points.
///
/// Inner is the spine side and outer the fore edge, so on a verso page
/// the inner margin sits on the right.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PageMargins {
    #[cfg_attr(feature = "serde", serde(with = "crate::units::serde_length"))]
    pub top: f32,
    #[cfg_attr(feature = "serde", serde(with = "crate::units::serde_length"))]
    pub inner: f32,
    #[cfg_attr(feature = "serde", serde(with = "crate::units::serde_length"))]
    pub outer: f32,
    #[cfg_attr(feature = "serde", serde(with = "crate::units::serde_length"))]
    pub bottom: f32,
}

impl Default for PageMargins {
    fn default() -> Self {
        Self {
            top: 48.0,
            inner: 24.0,
            outer: 24.0,
            bottom: 40.0,
        }
    }
}

impl PageMargins {
    /// Create uniform margins on all sides
    pub fn uniform(margin: f32) -> Self {
        Self {
            top: margin,
            inner: margin,
            outer: margin,
            bottom: margin,
        }
    }
}

/// Page geometry shared by every page of a book
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PageSetup {
    pub size: PageSize,
    pub margin: PageMargins,
    /// Distance artwork extends past the trim edge. Lies outside the
    /// page box, so it never reduces the content box.
    #[cfg_attr(feature = "serde", serde(with = "crate::units::serde_length"))]
    pub bleed: f32,
}

impl Default for PageSetup {
    fn default() -> Self {
        Self {
            size: PageSize::new(288.0, 432.0),
            margin: PageMargins::default(),
            bleed: 12.0,
        }
    }
}

impl PageSetup {
    /// Width and height left for content once margins are removed
    pub fn content_box(&self) -> PageSize {
        PageSize::new(
            self.size.width - self.margin.inner - self.margin.outer,
            self.size.height - self.margin.top - self.margin.bottom,
        )
    }

    /// Page size grown by the bleed on every edge
    pub fn bleed_box(&self) -> PageSize {
        PageSize::new(
            self.size.width + 2.0 * self.bleed,
            self.size.height + 2.0 * self.bleed,
        )
    }

    /// Two facing pages side by side
    pub fn spread_size(&self) -> PageSize {
        PageSize::new(self.size.width * 2.0, self.size.height)
    }

    pub fn is_valid(&self) -> bool {
        is_valid(self)
    }

    /// Like [`PageSetup::is_valid`], but explains what is wrong.
    pub fn validate(&self) -> Result<()> {
        let lengths = [
            self.size.width,
            self.size.height,
            self.margin.top,
            self.margin.inner,
            self.margin.outer,
            self.margin.bottom,
            self.bleed,
        ];
        if lengths.iter().any(|l| !l.is_finite() || *l < 0.0) {
            return Err(PaginationError::InvalidPageSetup(format!(
                "Lengths must be finite and non-negative: {:?}",
                self
            )));
        }

        let content = self.content_box();
        if content.width <= 0.0 || content.height <= 0.0 {
            return Err(PaginationError::InvalidPageSetup(format!(
                "Page is too small. Size: {} x {}, margin: top {} inner {} outer {} bottom {}",
                self.size.width,
                self.size.height,
                self.margin.top,
                self.margin.inner,
                self.margin.outer,
                self.margin.bottom
            )));
        }

        Ok(())
    }

    /// Load a page setup from a JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let setup = serde_json::from_slice(&bytes)
            .map_err(|e| PaginationError::Config(format!("Failed to parse page setup: {}", e)))?;
        Ok(setup)
    }

    /// Save the page setup to a JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            PaginationError::Config(format!("Failed to serialize page setup: {}", e))
        })?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }
}

/// Whether the content box left by `setup` has positive area.
pub fn is_valid(setup: &PageSetup) -> bool {
    setup.validate().is_ok()
}
