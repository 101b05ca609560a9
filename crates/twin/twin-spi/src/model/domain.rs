//! Environmental domains
//!
//! The three metrics share the same math. A domain only carries labels,
//! units, and the model name used in the summary export.

use serde::{Deserialize, Serialize};

/// Environmental metric being forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    /// PM2.5 air pollution reduced by biofilters
    AirQuality,
    /// Ocean microplastics degraded by PETase
    Microplastics,
    /// Malaria incidence suppressed by gene drives
    Malaria,
}

impl Domain {
    /// All domains in display and export order.
    pub fn all() -> &'static [Domain] {
        &[Domain::AirQuality, Domain::Microplastics, Domain::Malaria]
    }

    pub fn index(self) -> usize {
        match self {
            Domain::AirQuality => 0,
            Domain::Microplastics => 1,
            Domain::Malaria => 2,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Domain::AirQuality => "Air Pollution",
            Domain::Microplastics => "Plastic Degradation",
            Domain::Malaria => "Malaria Incidence",
        }
    }

    pub fn intervention(self) -> &'static str {
        match self {
            Domain::AirQuality => "Biofilter",
            Domain::Microplastics => "PETase",
            Domain::Malaria => "Gene Drive",
        }
    }

    /// Metric name as written to the summary CSV.
    pub fn metric(self) -> &'static str {
        match self {
            Domain::AirQuality => "PM2.5 Reduction",
            Domain::Microplastics => "Microplastic Degradation",
            Domain::Malaria => "Malaria Incidence Drop",
        }
    }

    /// Model description for the summary CSV.
    pub fn modeled_by(self) -> &'static str {
        match self {
            Domain::AirQuality => "Biofilter Enzyme Model",
            Domain::Microplastics => "Microbial Decay Simulation",
            Domain::Malaria => "Gene Drive Decline Model",
        }
    }

    pub fn y_label(self) -> &'static str {
        match self {
            Domain::AirQuality => "PM2.5 µg/m³",
            Domain::Microplastics => "Residual (%)",
            Domain::Malaria => "Relative Load",
        }
    }

    /// Unit of one time step in the field and script scenarios.
    pub fn time_unit(self) -> &'static str {
        match self {
            Domain::AirQuality => "months",
            Domain::Microplastics | Domain::Malaria => "years",
        }
    }

    /// File stem used by the script-mode export.
    pub fn file_stem(self) -> &'static str {
        match self {
            Domain::AirQuality => "pm25",
            Domain::Microplastics => "plastic",
            Domain::Malaria => "malaria",
        }
    }

    /// Regulatory line drawn on charts (WHO PM2.5 limit).
    pub fn reference_level(self) -> Option<f64> {
        match self {
            Domain::AirQuality => Some(20.0),
            Domain::Microplastics | Domain::Malaria => None,
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}
