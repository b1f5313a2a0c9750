//! Tab stop positions.
//!
//! Explicit stops are consulted first, in the order they were configured.
//! Once the current position is past every explicit stop, tabs snap to the
//! next multiple of the uniform tab width.

use crate::error::{BreakError, Result};

/// Uniform tab width used until `set` is called.
pub const DEFAULT_TAB_WIDTH: f64 = 40.0;

#[derive(Debug, Clone, PartialEq)]
pub struct TabStops {
    stops: Vec<f64>,
    tab_width: f64,
}

impl Default for TabStops {
    fn default() -> Self {
        Self {
            stops: Vec::new(),
            tab_width: DEFAULT_TAB_WIDTH,
        }
    }
}

impl TabStops {
    pub fn new(stops: &[f64], tab_width: f64) -> Result<Self> {
        let mut tabs = Self::default();
        tabs.set(stops, tab_width)?;
        Ok(tabs)
    }

    /// Replace the explicit stops and the uniform width together.
    ///
    /// An empty `stops` slice means pure uniform tabbing. On error the
    /// previous configuration is left untouched.
    pub fn set(&mut self, stops: &[f64], tab_width: f64) -> Result<()> {
        if tab_width.is_nan() || tab_width <= 0.0 {
            return Err(BreakError::InvalidTabWidth(tab_width));
        }
        self.stops.clear();
        self.stops.extend_from_slice(stops);
        self.tab_width = tab_width;
        Ok(())
    }

    pub fn stops(&self) -> &[f64] {
        &self.stops
    }

    pub fn tab_width(&self) -> f64 {
        self.tab_width
    }

    /// The first tab position strictly greater than `width_so_far`.
    pub fn next_tab(&self, width_so_far: f64) -> f64 {
        if let Some(&stop) = self.stops.iter().find(|&&stop| stop > width_so_far) {
            return stop;
        }
        ((width_so_far / self.tab_width).floor() + 1.0) * self.tab_width
    }
}
