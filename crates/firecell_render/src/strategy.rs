//! Render modes and the layers they build from a state
//!
//! Every mode turns the cells of a state into one or more [`RenderBatch`]es.
//! Opaque batches can be drawn in any order. Transparent batches come
//! sorted far to near from the camera so they blend correctly, and should
//! be drawn after the opaque ones in the order returned.

use bytemuck::{Pod, Zeroable};
use firecell_math::{IVec3, Vec3};
use firecell_model::{Cell, Material, State};

use crate::camera::Camera;
use crate::color;

/// Per-cube instance data, laid out for a GPU vertex buffer
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct CubeInstance {
    /// Centre of the cube in world space
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl CubeInstance {
    pub fn at_cell(index: IVec3, color: [f32; 4]) -> Self {
        let centre = Vec3::from(index) + Vec3::new(0.5, 0.5, 0.5);
        Self {
            position: centre.to_array(),
            color,
        }
    }
}

/// A named layer of cube instances
#[derive(Clone, Debug, PartialEq)]
pub struct RenderBatch {
    pub name: &'static str,
    pub transparent: bool,
    pub instances: Vec<CubeInstance>,
}

impl RenderBatch {
    pub fn opaque(name: &'static str, instances: Vec<CubeInstance>) -> Self {
        Self {
            name,
            transparent: false,
            instances,
        }
    }

    /// Transparent layer, sorted far to near from `camera`
    pub fn transparent(name: &'static str, mut instances: Vec<CubeInstance>, camera: &Camera) -> Self {
        let eye = camera.position;
        instances.sort_by(|a, b| {
            let da = Vec3::from(a.position).distance(eye);
            let db = Vec3::from(b.position).distance(eye);
            db.total_cmp(&da)
        });
        Self {
            name,
            transparent: true,
            instances,
        }
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Raw bytes for upload into an instance buffer
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }
}

/// Lays out the cells of a state for one render mode
pub trait RenderStrategy: Send + Sync {
    fn build(&self, state: &State, camera: &Camera) -> Vec<RenderBatch>;
}

/// Which aspect of the simulation is shown
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RenderMode {
    /// Solids, smoke and flames
    #[default]
    Standard,
    /// Air coloured by temperature
    TemperatureAir,
    /// Solids coloured by temperature
    TemperatureSolid,
    /// Air coloured by oxygen level
    Oxygen,
}

impl RenderMode {
    pub const ALL: [RenderMode; 4] = [
        RenderMode::Standard,
        RenderMode::TemperatureAir,
        RenderMode::TemperatureSolid,
        RenderMode::Oxygen,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RenderMode::Standard => "standard",
            RenderMode::TemperatureAir => "temperature-air",
            RenderMode::TemperatureSolid => "temperature-solid",
            RenderMode::Oxygen => "oxygen",
        }
    }

    /// The mode after this one, wrapping around
    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn strategy(self) -> Box<dyn RenderStrategy> {
        match self {
            RenderMode::Standard => Box::new(StandardStrategy),
            RenderMode::TemperatureAir => Box::new(TemperatureAirStrategy),
            RenderMode::TemperatureSolid => Box::new(TemperatureSolidStrategy),
            RenderMode::Oxygen => Box::new(OxygenStrategy),
        }
    }

    pub fn build(self, state: &State, camera: &Camera) -> Vec<RenderBatch> {
        let batches = self.strategy().build(state, camera);
        log::trace!(
            "Built {} batches ({} instances) in {} mode",
            batches.len(),
            batches.iter().map(RenderBatch::len).sum::<usize>(),
            self.name()
        );
        batches
    }
}

impl std::fmt::Display for RenderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for RenderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| format!("unknown render mode '{}'", s))
    }
}

/// Instances for every cell accepted by `select`, coloured by `paint`
fn collect(
    state: &State,
    select: impl Fn(&Cell) -> bool,
    paint: impl Fn(&Cell) -> [f32; 4],
) -> Vec<CubeInstance> {
    state
        .indexed_cells()
        .filter(|&(_, cell)| select(cell))
        .map(|(index, cell)| CubeInstance::at_cell(index, paint(cell)))
        .collect()
}

fn is_air(cell: &Cell) -> bool {
    cell.material == Material::Air
}

fn solids(state: &State) -> RenderBatch {
    RenderBatch::opaque(
        "solids",
        collect(state, Cell::is_solid, |c| color::solid_color(c.material, c.is_burning())),
    )
}

/// Opaque solids, then smoke and flames in the air
pub struct StandardStrategy;

impl RenderStrategy for StandardStrategy {
    fn build(&self, state: &State, camera: &Camera) -> Vec<RenderBatch> {
        let smoke = collect(
            state,
            |c| is_air(c) && c.smoke_indicator > 0.0,
            |c| color::smoke_color(c.smoke_indicator),
        );
        let fire = collect(
            state,
            |c| is_air(c) && c.burning_time > 0,
            |c| color::fire_color(c.temperature),
        );
        vec![
            solids(state),
            RenderBatch::transparent("smoke", smoke, camera),
            RenderBatch::transparent("fire", fire, camera),
        ]
    }
}

/// Opaque solids with every air cell tinted by its temperature
pub struct TemperatureAirStrategy;

impl RenderStrategy for TemperatureAirStrategy {
    fn build(&self, state: &State, camera: &Camera) -> Vec<RenderBatch> {
        let air = collect(state, is_air, |c| color::temperature_color(c.temperature, 0.3));
        vec![solids(state), RenderBatch::transparent("air-temperature", air, camera)]
    }
}

/// Solids only, see-through and tinted by their temperature
pub struct TemperatureSolidStrategy;

impl RenderStrategy for TemperatureSolidStrategy {
    fn build(&self, state: &State, camera: &Camera) -> Vec<RenderBatch> {
        let solid = collect(state, Cell::is_solid, |c| color::temperature_color(c.temperature, 0.6));
        vec![RenderBatch::transparent("solid-temperature", solid, camera)]
    }
}

/// Opaque solids with every air cell tinted by its oxygen level
pub struct OxygenStrategy;

impl RenderStrategy for OxygenStrategy {
    fn build(&self, state: &State, camera: &Camera) -> Vec<RenderBatch> {
        let air = collect(state, is_air, |c| color::oxygen_color(c.oxygen_level));
        vec![solids(state), RenderBatch::transparent("oxygen", air, camera)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 3x1x1 row: wood, smoky air, burning hot air
    fn row() -> State {
        let cells = vec![
            Cell::ambient(Material::Wood),
            Cell::air().with_smoke(40.0),
            Cell::air().with_temperature(900.0).with_burning_time(2).with_smoke(10.0),
        ];
        State::new(cells, IVec3::new(3, 1, 1)).unwrap()
    }

    fn camera_at_x(x: f32) -> Camera {
        Camera::new(Vec3::new(x, 0.5, 0.5), 1.0)
    }

    fn batch<'a>(batches: &'a [RenderBatch], name: &str) -> &'a RenderBatch {
        batches.iter().find(|b| b.name == name).unwrap()
    }

    #[test]
    fn test_instance_at_cell_centre() {
        let instance = CubeInstance::at_cell(IVec3::new(1, 2, 3), [1.0; 4]);
        assert_eq!(instance.position, [1.5, 2.5, 3.5]);
        assert_eq!(std::mem::size_of::<CubeInstance>(), 28);
    }

    #[test]
    fn test_standard_layers() {
        let batches = RenderMode::Standard.build(&row(), &camera_at_x(-5.0));
        let names: Vec<_> = batches.iter().map(|b| b.name).collect();
        assert_eq!(names, vec!["solids", "smoke", "fire"]);

        assert!(!batch(&batches, "solids").transparent);
        assert_eq!(batch(&batches, "solids").len(), 1);
        assert_eq!(batch(&batches, "smoke").len(), 2);
        assert_eq!(batch(&batches, "fire").instances[0].position, [2.5, 0.5, 0.5]);
    }

    #[test]
    fn test_transparent_sorted_far_to_near() {
        let smoke_from = |x| {
            let batches = RenderMode::Standard.build(&row(), &camera_at_x(x));
            batch(&batches, "smoke").instances.iter().map(|i| i.position[0]).collect::<Vec<_>>()
        };
        assert_eq!(smoke_from(-5.0), vec![2.5, 1.5]);
        assert_eq!(smoke_from(10.0), vec![1.5, 2.5]);
    }

    #[test]
    fn test_temperature_and_oxygen_modes() {
        let state = row();
        let camera = camera_at_x(-5.0);

        let air = RenderMode::TemperatureAir.build(&state, &camera);
        assert_eq!(batch(&air, "air-temperature").len(), 2);

        let solid = RenderMode::TemperatureSolid.build(&state, &camera);
        assert_eq!(solid.len(), 1);
        assert!(solid[0].transparent);
        assert_eq!(solid[0].len(), 1);

        let oxygen = RenderMode::Oxygen.build(&state, &camera);
        assert_eq!(batch(&oxygen, "oxygen").len(), 2);
        assert_eq!(batch(&oxygen, "solids").len(), 1);
    }

    #[test]
    fn test_batch_bytes() {
        let batches = RenderMode::Standard.build(&row(), &camera_at_x(0.0));
        let smoke = batch(&batches, "smoke");
        assert_eq!(smoke.as_bytes().len(), smoke.len() * std::mem::size_of::<CubeInstance>());
    }

    #[test]
    fn test_mode_names_round_trip_and_cycle() {
        for mode in RenderMode::ALL {
            assert_eq!(mode.name().parse::<RenderMode>().unwrap(), mode);
        }
        assert!("sepia".parse::<RenderMode>().is_err());
        assert_eq!(RenderMode::Oxygen.next(), RenderMode::Standard);
        assert_eq!(RenderMode::Standard.next(), RenderMode::TemperatureAir);
    }
}
