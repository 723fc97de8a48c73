//! Colour mapping for cells
//!
//! All colours are linear RGBA in `[0, 1]`.

use firecell_model::{Material, AMBIENT_TEMPERATURE, FULL_OXYGEN, MAX_SMOKE};

/// Temperature shown at full red in the temperature views
pub const HOT_TEMPERATURE: f64 = 1000.0;

const WOOD: [f32; 4] = [0.55, 0.35, 0.17, 1.0];
const CONCRETE: [f32; 4] = [0.72, 0.72, 0.70, 1.0];
const EMBER: [f32; 4] = [0.95, 0.30, 0.05, 1.0];
const SMOKE: [f32; 3] = [0.25, 0.25, 0.25];

/// Base colour of a solid material; air is fully transparent
pub fn material_color(material: Material) -> [f32; 4] {
    match material {
        Material::Air => [0.0; 4],
        Material::Wood => WOOD,
        Material::CellularConcrete => CONCRETE,
    }
}

/// Solid colour, pulled towards ember red while the cell burns
pub fn solid_color(material: Material, burning: bool) -> [f32; 4] {
    let base = material_color(material);
    if burning {
        mix(base, EMBER, 0.6)
    } else {
        base
    }
}

/// Grey whose opacity follows the smoke indicator
pub fn smoke_color(smoke: f64) -> [f32; 4] {
    let density = unit(smoke / MAX_SMOKE);
    [SMOKE[0], SMOKE[1], SMOKE[2], 0.8 * density]
}

/// Flame colour, yellower the hotter the cell
pub fn fire_color(temperature: f64) -> [f32; 4] {
    let heat = heat(temperature);
    [1.0, 0.35 + 0.55 * heat, 0.05, 0.7]
}

/// Blue (ambient) to red ([`HOT_TEMPERATURE`]) gradient
pub fn temperature_color(temperature: f64, alpha: f32) -> [f32; 4] {
    let t = heat(temperature);
    [t, 0.2 * (1.0 - t), 1.0 - t, alpha]
}

/// Transparent at full oxygen, increasingly opaque red as oxygen runs out
pub fn oxygen_color(oxygen: f64) -> [f32; 4] {
    let missing = 1.0 - unit(oxygen / FULL_OXYGEN);
    [0.9, 0.1, 0.1 + 0.5 * (1.0 - missing), 0.05 + 0.6 * missing]
}

/// Temperature scaled to `[0, 1]` between ambient and hot
fn heat(temperature: f64) -> f32 {
    unit((temperature - AMBIENT_TEMPERATURE) / (HOT_TEMPERATURE - AMBIENT_TEMPERATURE))
}

fn unit(v: f64) -> f32 {
    v.clamp(0.0, 1.0) as f32
}

fn mix(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    std::array::from_fn(|i| a[i] + (b[i] - a[i]) * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_gradient_ends() {
        assert_eq!(temperature_color(AMBIENT_TEMPERATURE, 1.0), [0.0, 0.2, 1.0, 1.0]);
        assert_eq!(temperature_color(5000.0, 0.5), [1.0, 0.0, 0.0, 0.5]);
        assert_eq!(temperature_color(-40.0, 1.0), temperature_color(AMBIENT_TEMPERATURE, 1.0));
    }

    #[test]
    fn test_smoke_opacity_follows_density() {
        assert_eq!(smoke_color(0.0)[3], 0.0);
        assert!(smoke_color(50.0)[3] < smoke_color(100.0)[3]);
        assert_eq!(smoke_color(250.0), smoke_color(100.0));
    }

    #[test]
    fn test_oxygen_opacity_grows_as_oxygen_drops() {
        assert!(oxygen_color(FULL_OXYGEN)[3] < oxygen_color(40.0)[3]);
        assert!(oxygen_color(40.0)[3] < oxygen_color(0.0)[3]);
    }

    #[test]
    fn test_burning_solid_is_redder() {
        let cold = solid_color(Material::Wood, false);
        let burning = solid_color(Material::Wood, true);
        assert_eq!(cold, WOOD);
        assert!(burning[0] > cold[0]);
        assert_eq!(burning[3], 1.0);
    }
}
