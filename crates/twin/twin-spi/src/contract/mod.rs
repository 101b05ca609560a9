//! Contract module containing trait definitions for forecast generation

mod decay_law;
mod smoother;

pub use decay_law::DecayLaw;
pub use smoother::{check_smoothing_input, Smoother, MIN_SMOOTHING_POINTS};
