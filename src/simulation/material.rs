//! Named materials (density + display color) and the display color type

use serde::Deserialize;

/// Display-only RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GRAY: Color = Color::rgb(128, 128, 128);
    pub const LIGHT_GRAY: Color = Color::rgb(192, 192, 192);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const ORANGE: Color = Color::rgb(255, 200, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    Aluminum,
    Cesium,
    Copper,
    Gallium,
    Gold,
    Iridium,
    Iron,
    Lead,
    Lithium,
    Osmium,
    Platinum,
    Silver,
    Uranium,
    Ice,
    Human,
    Styrofoam,
    Wood,
    Neutronium,
}

impl Material {
    /// Density in kg/m^3
    pub fn density(self) -> f64 {
        match self {
            Material::Aluminum => 2700.0,
            Material::Cesium => 1930.0,
            Material::Copper => 8960.0,
            Material::Gallium => 5910.0,
            Material::Gold => 19320.0,
            Material::Iridium => 22560.0,
            Material::Iron => 7860.0,
            Material::Lead => 11340.0,
            Material::Lithium => 534.0,
            Material::Osmium => 22590.0,
            Material::Platinum => 21450.0,
            Material::Silver => 10500.0,
            Material::Uranium => 19100.0,
            Material::Ice => 934.0,
            Material::Human => 1020.0,
            Material::Styrofoam => 45.0,
            Material::Wood => 740.0,
            Material::Neutronium => 5.9e17,
        }
    }

    /// Display color, white unless the material has its own
    pub fn color(self) -> Color {
        match self {
            Material::Aluminum => Color::rgb(132, 135, 137),
            Material::Gold => Color::rgb(255, 215, 0),
            Material::Human => Color::rgb(205, 133, 63),
            _ => Color::WHITE,
        }
    }
}
