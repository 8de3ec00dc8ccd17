//! Named colormaps.
//!
//! A colormap turns an 8-bit intensity into an RGB color. Colormaps are
//! defined by evenly spaced color stops and expanded into a 256-entry
//! lookup table when registered.

use std::collections::HashMap;

use crate::settings::{ConfigurationError, DEFAULT_COLORMAP};

/// A colormap expanded to one color per intensity.
#[derive(Debug, Clone, PartialEq)]
pub struct Colormap {
    name: String,
    lut: Vec<[u8; 3]>,
}

impl Colormap {
    /// Build a colormap by linear interpolation between evenly spaced stops.
    ///
    /// A single stop gives a constant map; no stops give black.
    pub fn from_stops(name: &str, stops: &[[u8; 3]]) -> Self {
        let lut = (0..256)
            .map(|i| match stops.len() {
                0 => [0, 0, 0],
                1 => stops[0],
                n => {
                    let position = i as f32 / 255.0 * (n - 1) as f32;
                    let lower = (position.floor() as usize).min(n - 2);
                    let t = position - lower as f32;
                    let (a, b) = (stops[lower], stops[lower + 1]);
                    [0, 1, 2].map(|c| {
                        (a[c] as f32 + t * (b[c] as f32 - a[c] as f32)).round() as u8
                    })
                }
            })
            .collect();

        Self {
            name: name.to_string(),
            lut,
        }
    }

    /// Two-point black-to-white ramp.
    pub fn gray() -> Self {
        Self::from_stops(DEFAULT_COLORMAP, &[[0, 0, 0], [255, 255, 255]])
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Color for an intensity.
    pub fn color(&self, intensity: u8) -> [u8; 3] {
        self.lut[intensity as usize]
    }
}

/// Colormaps available to views, keyed by name.
///
/// The table always contains "Gray". Hosts may register more.
#[derive(Debug, Clone)]
pub struct ColormapTable {
    maps: HashMap<String, Colormap>,
}

impl Default for ColormapTable {
    fn default() -> Self {
        let mut table = Self {
            maps: HashMap::new(),
        };
        table.register(Colormap::gray());
        table
    }
}

impl ColormapTable {
    /// Add or replace a colormap.
    pub fn register(&mut self, colormap: Colormap) {
        self.maps.insert(colormap.name.clone(), colormap);
    }

    /// Look up a colormap by name.
    pub fn get(&self, name: &str) -> Result<&Colormap, ConfigurationError> {
        self.maps
            .get(name)
            .ok_or_else(|| ConfigurationError::UnknownColormap(name.to_string()))
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.maps.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
