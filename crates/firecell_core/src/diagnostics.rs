//! Aggregate statistics of a state

use firecell_model::{Material, State};

/// Totals and extremes over every cell of one state
///
/// Smoke and oxygen statistics only cover air cells; solids carry neither.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Diagnostics {
    pub cell_count: usize,
    pub solid_cell_count: usize,
    pub air_cell_count: usize,
    pub burning_cell_count: usize,

    pub total_temperature: f64,
    pub solid_temperature: f64,
    pub air_temperature: f64,

    pub total_smoke: f64,
    pub min_smoke: f64,
    pub max_smoke: f64,

    pub total_oxygen: f64,
    pub min_oxygen: f64,
    pub max_oxygen: f64,
}

impl Diagnostics {
    pub fn from_state(state: &State) -> Self {
        let mut d = Self {
            cell_count: state.len(),
            min_smoke: f64::MAX,
            min_oxygen: f64::MAX,
            ..Self::default()
        };

        for cell in state.cells() {
            d.total_temperature += cell.temperature;

            if cell.material == Material::Air {
                d.air_cell_count += 1;
                d.air_temperature += cell.temperature;
                d.total_smoke += cell.smoke_indicator;
                d.min_smoke = d.min_smoke.min(cell.smoke_indicator);
                d.max_smoke = d.max_smoke.max(cell.smoke_indicator);
                d.total_oxygen += cell.oxygen_level;
                d.min_oxygen = d.min_oxygen.min(cell.oxygen_level);
                d.max_oxygen = d.max_oxygen.max(cell.oxygen_level);
            }

            if cell.is_solid() {
                d.solid_cell_count += 1;
                d.solid_temperature += cell.temperature;
            }

            if cell.is_burning() {
                d.burning_cell_count += 1;
            }
        }

        if d.air_cell_count == 0 {
            d.min_smoke = 0.0;
            d.min_oxygen = 0.0;
        }
        d
    }

    pub fn average_temperature(&self) -> f64 {
        average(self.total_temperature, self.cell_count)
    }

    pub fn average_solid_temperature(&self) -> f64 {
        average(self.solid_temperature, self.solid_cell_count)
    }

    pub fn average_air_temperature(&self) -> f64 {
        average(self.air_temperature, self.air_cell_count)
    }
}

impl std::fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Burning cells:             {}", self.burning_cell_count)?;
        writeln!(f, "Average temperature:       {:.0} C", self.average_temperature())?;
        writeln!(f, "Average solid temperature: {:.0} C", self.average_solid_temperature())?;
        writeln!(f, "Average air temperature:   {:.0} C", self.average_air_temperature())?;
        writeln!(
            f,
            "Smoke:  total {:.0}, min {:.0}, max {:.0}",
            self.total_smoke, self.min_smoke, self.max_smoke
        )?;
        write!(
            f,
            "Oxygen: total {:.0}, min {:.0}, max {:.0}",
            self.total_oxygen, self.min_oxygen, self.max_oxygen
        )
    }
}

/// Zero for an empty set instead of NaN
fn average(total: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}
