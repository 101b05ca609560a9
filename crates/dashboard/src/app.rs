//! Application state management for the dashboard.

use std::ops::RangeInclusive;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;

use twin_facade::scenario::{
    FIELD_RESISTANCE_RANGE, GENE_DRIVE_RANGE, IMPACT_RANGE, INTERVENTION_RESISTANCE_RANGE,
    MALARIA_CASES_RANGE, NOISE_RANGE, PETASE_RATE_RANGE, PLASTIC_LOAD_RANGE, PM_EFFICIENCY_RANGE,
    PM_START_RANGE, SEASONALITY_RANGE, STRENGTH_RANGE, TEMPERATURE_RANGE, YEARS_RANGE,
};
use twin_facade::{
    DomainForecast, FieldSettings, InterventionSettings, Result, SmootherSettings,
};

/// Main application state.
pub struct App {
    /// Current active tab
    pub current_tab: Tab,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Status message with expiry
    pub status: Option<Status>,
    pub smoother: SmootherSettings,
    pub intervention: InterventionSettings,
    pub field: FieldSettings,
    /// Seed for the intervention noise
    pub seed: u64,
    /// Index into the current tab's sliders
    pub selected_slider: usize,
    /// Last successful intervention run
    pub intervention_forecasts: Vec<DomainForecast>,
    /// Last successful field run
    pub field_forecasts: Vec<DomainForecast>,
}

/// A status bar message.
#[derive(Debug, Clone)]
pub struct Status {
    pub text: String,
    pub error: bool,
    pub since: Instant,
}

impl App {
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Build with default settings and run both scenarios once.
    pub fn with_seed(seed: u64) -> Self {
        let mut app = Self {
            current_tab: Tab::default(),
            should_quit: false,
            status: None,
            smoother: SmootherSettings::default(),
            intervention: InterventionSettings::default(),
            field: FieldSettings::default(),
            seed,
            selected_slider: 0,
            intervention_forecasts: Vec::new(),
            field_forecasts: Vec::new(),
        };
        app.recompute();
        app
    }

    /// Set a status message that will be displayed temporarily.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(Status {
            text: message.into(),
            error: false,
            since: Instant::now(),
        });
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.status = Some(Status {
            text: message.into(),
            error: true,
            since: Instant::now(),
        });
    }

    /// Clear expired status messages (older than 5 seconds).
    pub fn clear_expired_status(&mut self) {
        if let Some(status) = &self.status {
            if status.since.elapsed().as_secs() > 5 {
                self.status = None;
            }
        }
    }

    pub fn next_tab(&mut self) {
        self.current_tab = self.current_tab.next();
        self.selected_slider = 0;
    }

    pub fn previous_tab(&mut self) {
        self.current_tab = self.current_tab.previous();
        self.selected_slider = 0;
    }

    /// Jump to a specific tab by number (1-3).
    pub fn goto_tab(&mut self, num: u8) {
        self.current_tab = Tab::from_num(num);
        self.selected_slider = 0;
    }

    pub fn sliders(&self) -> &'static [Slider] {
        Slider::for_tab(self.current_tab)
    }

    pub fn selected(&self) -> Option<Slider> {
        self.sliders().get(self.selected_slider).copied()
    }

    pub fn select_next(&mut self) {
        let count = self.sliders().len();
        if count > 0 {
            self.selected_slider = (self.selected_slider + 1) % count;
        }
    }

    pub fn select_previous(&mut self) {
        let count = self.sliders().len();
        if count > 0 {
            self.selected_slider = (self.selected_slider + count - 1) % count;
        }
    }

    pub fn slider_value(&self, slider: Slider) -> f64 {
        match slider {
            Slider::Years => self.intervention.years as f64,
            Slider::Strength => self.intervention.strength_pct,
            Slider::Impact => self.intervention.impact_scale,
            Slider::Noise => self.intervention.noise_level,
            Slider::InterventionResistance => self.intervention.resistance,
            Slider::PmStart => self.field.pm_start,
            Slider::PmEfficiency => self.field.pm_efficiency,
            Slider::Seasonality => self.field.seasonality,
            Slider::PlasticLoad => self.field.plastic_load,
            Slider::PetaseRate => self.field.petase_rate,
            Slider::Temperature => self.field.temperature,
            Slider::MalariaCases => self.field.malaria_cases,
            Slider::GeneDrive => self.field.gene_drive,
            Slider::FieldResistance => self.field.resistance,
        }
    }

    fn set_slider_value(&mut self, slider: Slider, value: f64) {
        let slot = match slider {
            Slider::Years => {
                self.intervention.years = value.round() as usize;
                return;
            }
            Slider::Strength => &mut self.intervention.strength_pct,
            Slider::Impact => &mut self.intervention.impact_scale,
            Slider::Noise => &mut self.intervention.noise_level,
            Slider::InterventionResistance => &mut self.intervention.resistance,
            Slider::PmStart => &mut self.field.pm_start,
            Slider::PmEfficiency => &mut self.field.pm_efficiency,
            Slider::Seasonality => &mut self.field.seasonality,
            Slider::PlasticLoad => &mut self.field.plastic_load,
            Slider::PetaseRate => &mut self.field.petase_rate,
            Slider::Temperature => &mut self.field.temperature,
            Slider::MalariaCases => &mut self.field.malaria_cases,
            Slider::GeneDrive => &mut self.field.gene_drive,
            Slider::FieldResistance => &mut self.field.resistance,
        };
        *slot = value;
    }

    /// Move the selected slider by `steps` increments, clamped to its range.
    pub fn adjust_selected(&mut self, steps: f64) {
        let Some(slider) = self.selected() else {
            return;
        };
        let current = self.slider_value(slider);
        let (min, max) = slider.bounds();
        // Round to the step grid so repeated presses do not drift.
        let raw = current + steps * slider.step();
        let snapped = (raw / slider.step()).round() * slider.step();
        let value = snapped.clamp(min, max);
        if (value - current).abs() < f64::EPSILON {
            return;
        }
        self.set_slider_value(slider, value);
        self.recompute();
    }

    /// Switch to the next smoother and recompute.
    pub fn cycle_smoother(&mut self) {
        self.smoother.kind = self.smoother.kind.next();
        if self.recompute() {
            self.set_status(format!("Model: {}", self.smoother.kind.label()));
        }
    }

    /// Draw a fresh noise seed and recompute.
    pub fn reseed(&mut self) {
        self.seed = rand::random();
        if self.recompute() {
            self.set_status(format!("Seed: {}", self.seed));
        }
    }

    /// Rerun both scenarios. On failure the previous curves stay on screen
    /// and the error is shown; returns whether the rerun succeeded.
    pub fn recompute(&mut self) -> bool {
        match self.try_recompute() {
            Ok(()) => true,
            Err(e) => {
                self.set_error(format!("Error: {}", e));
                false
            }
        }
    }

    fn try_recompute(&mut self) -> Result<()> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let intervention = self.intervention.run(&self.smoother, None, &mut rng)?;
        let field = self.field.run(&self.smoother)?;
        self.intervention_forecasts = intervention;
        self.field_forecasts = field;
        Ok(())
    }

    /// Curves shown on the current tab.
    pub fn forecasts(&self) -> &[DomainForecast] {
        match self.current_tab {
            Tab::Field => &self.field_forecasts,
            Tab::Intervention | Tab::Summary => &self.intervention_forecasts,
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Available tabs in the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Intervention,
    Field,
    Summary,
}

impl Tab {
    pub fn next(self) -> Self {
        match self {
            Tab::Intervention => Tab::Field,
            Tab::Field => Tab::Summary,
            Tab::Summary => Tab::Intervention,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Tab::Intervention => Tab::Summary,
            Tab::Field => Tab::Intervention,
            Tab::Summary => Tab::Field,
        }
    }

    pub fn from_num(num: u8) -> Self {
        match num {
            2 => Tab::Field,
            3 => Tab::Summary,
            _ => Tab::Intervention,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tab::Intervention => 0,
            Tab::Field => 1,
            Tab::Summary => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Tab::Intervention => "Intervention",
            Tab::Field => "Field",
            Tab::Summary => "Summary",
        }
    }

    pub fn all() -> &'static [Tab] {
        &[Tab::Intervention, Tab::Field, Tab::Summary]
    }
}

/// One adjustable scenario parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slider {
    Years,
    Strength,
    Impact,
    Noise,
    InterventionResistance,
    PmStart,
    PmEfficiency,
    Seasonality,
    PlasticLoad,
    PetaseRate,
    Temperature,
    MalariaCases,
    GeneDrive,
    FieldResistance,
}

impl Slider {
    pub fn for_tab(tab: Tab) -> &'static [Slider] {
        match tab {
            Tab::Intervention => &[
                Slider::Years,
                Slider::Strength,
                Slider::Impact,
                Slider::Noise,
                Slider::InterventionResistance,
            ],
            Tab::Field => &[
                Slider::PmStart,
                Slider::PmEfficiency,
                Slider::Seasonality,
                Slider::PlasticLoad,
                Slider::PetaseRate,
                Slider::Temperature,
                Slider::MalariaCases,
                Slider::GeneDrive,
                Slider::FieldResistance,
            ],
            Tab::Summary => &[],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Slider::Years => "Duration (years)",
            Slider::Strength => "Strength (%)",
            Slider::Impact => "Impact scale",
            Slider::Noise => "Variability",
            Slider::InterventionResistance | Slider::FieldResistance => "Mosquito resistance",
            Slider::PmStart => "Initial PM2.5",
            Slider::PmEfficiency => "Filter efficiency",
            Slider::Seasonality => "Seasonality",
            Slider::PlasticLoad => "Plastic load (%)",
            Slider::PetaseRate => "PETase rate",
            Slider::Temperature => "Ocean temperature",
            Slider::MalariaCases => "Baseline cases",
            Slider::GeneDrive => "Gene drive efficacy",
        }
    }

    fn range(self) -> RangeInclusive<f64> {
        match self {
            Slider::Years => (*YEARS_RANGE.start() as f64)..=(*YEARS_RANGE.end() as f64),
            Slider::Strength => STRENGTH_RANGE,
            Slider::Impact => IMPACT_RANGE,
            Slider::Noise => NOISE_RANGE,
            Slider::InterventionResistance => INTERVENTION_RESISTANCE_RANGE,
            Slider::PmStart => PM_START_RANGE,
            Slider::PmEfficiency => PM_EFFICIENCY_RANGE,
            Slider::Seasonality => SEASONALITY_RANGE,
            Slider::PlasticLoad => PLASTIC_LOAD_RANGE,
            Slider::PetaseRate => PETASE_RATE_RANGE,
            Slider::Temperature => TEMPERATURE_RANGE,
            Slider::MalariaCases => MALARIA_CASES_RANGE,
            Slider::GeneDrive => GENE_DRIVE_RANGE,
            Slider::FieldResistance => FIELD_RESISTANCE_RANGE,
        }
    }

    pub fn bounds(self) -> (f64, f64) {
        let range = self.range();
        (*range.start(), *range.end())
    }

    pub fn step(self) -> f64 {
        match self {
            Slider::Years => 1.0,
            Slider::Strength | Slider::PlasticLoad | Slider::PmStart | Slider::MalariaCases => 5.0,
            Slider::Impact | Slider::PmEfficiency | Slider::Temperature => 0.1,
            Slider::Noise => 0.01,
            _ => 0.05,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use twin_facade::SmootherKind;

    #[test]
    fn test_new_app_runs_both_scenarios() {
        let app = App::with_seed(7);
        assert_eq!(app.intervention_forecasts.len(), 3);
        assert_eq!(app.field_forecasts.len(), 3);
        assert_eq!(app.intervention_forecasts[0].result.horizon(), 15);
        assert_eq!(app.field_forecasts[0].result.horizon(), 13);
        assert!(app.status.is_none());
    }

    #[test]
    fn test_tab_navigation_resets_selection() {
        let mut app = App::with_seed(1);
        app.select_next();
        assert_eq!(app.selected(), Some(Slider::Strength));
        app.next_tab();
        assert_eq!(app.current_tab, Tab::Field);
        assert_eq!(app.selected(), Some(Slider::PmStart));
        app.previous_tab();
        app.previous_tab();
        assert_eq!(app.current_tab, Tab::Summary);
        assert_eq!(app.selected(), None);
        app.goto_tab(2);
        assert_eq!(app.current_tab, Tab::Field);
    }

    #[test]
    fn test_selection_wraps() {
        let mut app = App::with_seed(1);
        app.select_previous();
        assert_eq!(app.selected(), Some(Slider::InterventionResistance));
        app.select_next();
        assert_eq!(app.selected(), Some(Slider::Years));
    }

    #[test]
    fn test_years_slider_changes_horizon() {
        let mut app = App::with_seed(3);
        app.adjust_selected(1.0);
        assert_eq!(app.intervention.years, 16);
        assert!(app
            .intervention_forecasts
            .iter()
            .all(|f| f.result.horizon() == 16));
    }

    #[test]
    fn test_adjust_clamps_to_range() {
        let mut app = App::with_seed(3);
        app.select_next();
        for _ in 0..50 {
            app.adjust_selected(1.0);
        }
        assert!((app.intervention.strength_pct - 100.0).abs() < 1e-9);
        for _ in 0..50 {
            app.adjust_selected(-1.0);
        }
        assert!((app.intervention.strength_pct - 10.0).abs() < 1e-9);
        assert!(app.status.is_none());
    }

    #[test]
    fn test_adjust_snaps_to_step() {
        let mut app = App::with_seed(3);
        app.goto_tab(2);
        app.select_next();
        for _ in 0..3 {
            app.adjust_selected(1.0);
        }
        assert!((app.field.pm_efficiency - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_adjust_on_summary_is_noop() {
        let mut app = App::with_seed(3);
        app.goto_tab(3);
        let before = app.intervention;
        app.adjust_selected(1.0);
        assert_eq!(app.intervention, before);
    }

    #[test]
    fn test_cycle_smoother() {
        let mut app = App::with_seed(5);
        app.cycle_smoother();
        assert_eq!(app.smoother.kind, SmootherKind::RandomForest);
        assert_eq!(app.intervention_forecasts.len(), 3);
        assert!(app.status.as_ref().is_some_and(|s| !s.error));
    }

    #[test]
    fn test_same_seed_same_curves() {
        let a = App::with_seed(11);
        let b = App::with_seed(11);
        assert_eq!(a.intervention_forecasts, b.intervention_forecasts);
    }

    #[test]
    fn test_invalid_settings_keep_previous_curves() {
        let mut app = App::with_seed(2);
        let before = app.intervention_forecasts.clone();
        app.intervention.years = 99;
        app.recompute();
        assert_eq!(app.intervention_forecasts, before);
        let status = app.status.as_ref().unwrap();
        assert!(status.error);
        assert!(status.text.contains("years"));
    }

    #[test]
    fn test_failed_recompute_error_survives_model_switch() {
        let mut app = App::with_seed(2);
        app.intervention.years = 99;
        app.cycle_smoother();
        let status = app.status.as_ref().unwrap();
        assert!(status.error);
        assert!(status.text.contains("years"), "{}", status.text);

        app.reseed();
        assert!(app.status.as_ref().unwrap().error);
    }

    #[test]
    fn test_slider_bounds_match_scenario_ranges() {
        assert_eq!(Slider::Years.bounds(), (5.0, 30.0));
        assert_eq!(Slider::Temperature.bounds(), (0.8, 1.5));
        assert_eq!(Slider::FieldResistance.bounds(), (0.0, 0.4));
        assert_eq!(Slider::InterventionResistance.bounds(), (0.0, 0.5));
    }
}
