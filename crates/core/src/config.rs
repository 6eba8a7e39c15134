use crate::error::{CatalogError, Result};

pub const DEFAULT_PAGE_SIZE: usize = 6;
pub const DEFAULT_LAYOUT_WIDTH: u32 = 1200;

/// Layout settings of a browsing screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselConfig {
    pub page_size: usize,
    /// Width in pixels available to the card grid
    pub layout_width: u32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            layout_width: DEFAULT_LAYOUT_WIDTH,
        }
    }
}

impl CarouselConfig {
    pub fn new(page_size: usize, layout_width: u32) -> Result<Self> {
        let config = Self {
            page_size,
            layout_width,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(CatalogError::InvalidConfiguration(
                "page size must be at least 1".to_string(),
            ));
        }
        if self.layout_width == 0 {
            return Err(CatalogError::InvalidConfiguration(
                "layout width must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(CarouselConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_page_size_rejected() {
        assert!(matches!(
            CarouselConfig::new(0, 800),
            Err(CatalogError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_zero_width_rejected() {
        assert!(matches!(
            CarouselConfig::new(3, 0),
            Err(CatalogError::InvalidConfiguration(_))
        ));
    }
}
