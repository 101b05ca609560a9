//! # ecotwin
//!
//! Command-line interface for the ecotwin environmental forecaster.

mod output;

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use twin_facade::{
    default_summary, read_table_file, series_file_name, write_series, write_summary,
    CliOverrides, CurveLaw, ForecastGenerator, ForecastParametersBuilder,
    SmootherKind, SummaryRow, TwinConfig,
};

use output::RunReport;

#[derive(Parser)]
#[command(name = "ecotwin")]
#[command(about = "Environmental digital twin forecaster", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Noise seed (drawn at random and logged when omitted)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Smoother (polynomial, random-forest, kernel, none)
    #[arg(short, long, global = true)]
    model: Option<SmootherKind>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the intervention scenario across all three domains
    Simulate(SimulateArgs),

    /// Run the field scenario with per-domain physical parameters
    Field(FieldArgs),

    /// Forecast a single curve
    Forecast(ForecastArgs),

    /// Write the batch report CSV files
    Report(ReportArgs),
}

#[derive(Args, Default)]
struct SimulateArgs {
    /// Forecast duration in years (5-30)
    #[arg(long)]
    years: Option<usize>,

    /// Intervention strength in percent (10-100)
    #[arg(long)]
    strength: Option<f64>,

    /// Intervention impact multiplier (0.1-2.0)
    #[arg(long)]
    impact: Option<f64>,

    /// Environmental variability (0-0.3)
    #[arg(long)]
    noise: Option<f64>,

    /// Mosquito resistance (0-0.5)
    #[arg(long)]
    resistance: Option<f64>,

    /// CSV of (time, value) rows replacing the air-quality curve
    #[arg(long)]
    upload: Option<PathBuf>,

    /// JSON output file
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args, Default)]
struct FieldArgs {
    /// Initial PM2.5 in µg/m³ (40-150)
    #[arg(long)]
    pm_start: Option<f64>,

    /// Filter efficiency (0.1-0.9)
    #[arg(long)]
    pm_efficiency: Option<f64>,

    /// Seasonal variation (0-0.5)
    #[arg(long)]
    seasonality: Option<f64>,

    /// Initial plastic load in percent (50-150)
    #[arg(long)]
    plastic_load: Option<f64>,

    /// PETase decay rate (0.1-0.6)
    #[arg(long)]
    petase_rate: Option<f64>,

    /// Ocean temperature factor (0.8-1.5)
    #[arg(long)]
    temperature: Option<f64>,

    /// Baseline malaria cases (50-200)
    #[arg(long)]
    malaria_cases: Option<f64>,

    /// Gene drive efficacy (0.1-0.5)
    #[arg(long)]
    gene_drive: Option<f64>,

    /// Mosquito resistance (0-0.4)
    #[arg(long)]
    resistance: Option<f64>,

    /// JSON output file
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LawArg {
    Exponential,
    Seasonal,
    Suppressed,
    Linear,
}

#[derive(Args)]
struct ForecastArgs {
    /// Decay law
    #[arg(long, value_enum, default_value = "exponential")]
    law: LawArg,

    /// Number of time steps
    #[arg(long, default_value = "10")]
    horizon: usize,

    /// Value at t = 0
    #[arg(long, default_value = "100.0")]
    base: f64,

    /// Decay coefficient per step
    #[arg(long, default_value = "0.2")]
    decay: f64,

    /// Noise standard deviation as a fraction of the base value
    #[arg(long, default_value = "0.0")]
    noise: f64,

    /// Multiplier on the decay rate
    #[arg(long)]
    scale: Option<f64>,

    /// Fraction of the rate cancelled (suppressed law)
    #[arg(long)]
    resistance: Option<f64>,

    /// Seasonal amplitude (seasonal law)
    #[arg(long, default_value = "0.1")]
    amplitude: f64,

    /// Seasonal period in steps (seasonal law)
    #[arg(long, default_value = "12.0")]
    period: f64,

    /// Final value (linear law)
    #[arg(long)]
    target: Option<f64>,

    /// JSON output file
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args, Default)]
struct ReportArgs {
    /// Output directory
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Derive the summary from the computed curves instead of the published estimates
    #[arg(long)]
    computed: bool,
}

impl LawArg {
    fn to_law(self, args: &ForecastArgs) -> Result<CurveLaw> {
        Ok(match self {
            LawArg::Exponential => CurveLaw::Exponential,
            LawArg::Seasonal => CurveLaw::Seasonal {
                amplitude: args.amplitude,
                period: args.period,
            },
            LawArg::Suppressed => CurveLaw::Suppressed,
            LawArg::Linear => match args.target {
                Some(target) => CurveLaw::Linear { target },
                None => bail!("--target is required for the linear law"),
            },
        })
    }
}

fn load_config(
    path: Option<&Path>,
    seed: Option<u64>,
    model: Option<SmootherKind>,
    output_dir: Option<PathBuf>,
) -> Result<TwinConfig> {
    let overrides = CliOverrides {
        seed,
        model,
        output_dir,
    };
    TwinConfig::load(path, Some(&overrides)).context("Failed to load configuration")
}

fn run_simulate(mut config: TwinConfig, args: SimulateArgs) -> Result<()> {
    let settings = &mut config.intervention;
    if let Some(years) = args.years {
        settings.years = years;
    }
    if let Some(strength) = args.strength {
        settings.strength_pct = strength;
    }
    if let Some(impact) = args.impact {
        settings.impact_scale = impact;
    }
    if let Some(noise) = args.noise {
        settings.noise_level = noise;
    }
    if let Some(resistance) = args.resistance {
        settings.resistance = resistance;
    }
    config.validate()?;

    let upload = match &args.upload {
        Some(path) => Some(
            read_table_file(path)
                .with_context(|| format!("Failed to load upload {}", path.display()))?,
        ),
        None => None,
    };
    if let Some(table) = &upload {
        println!("Loaded {} rows from upload", table.len());
    }

    let seed = config.resolve_seed();
    let mut rng = StdRng::seed_from_u64(seed);
    let forecasts = config
        .intervention
        .run(&config.smoother, upload.as_ref(), &mut rng)?;

    println!("Model: {}", config.smoother.kind.label());
    println!("Seed: {}", seed);
    println!("Decay rate: {:.4}", config.intervention.decay_rate());
    output::print_forecasts(&forecasts);

    let summary: Vec<SummaryRow> = forecasts.iter().map(|f| f.summary_row()).collect();
    output::print_summary(&summary);

    if let Some(path) = args.output {
        output::write_json(
            &path,
            &RunReport {
                scenario: "intervention",
                seed: Some(seed),
                smoother: config.smoother.kind,
                forecasts: &forecasts,
                summary,
            },
        )?;
    }
    Ok(())
}

fn run_field(mut config: TwinConfig, args: FieldArgs) -> Result<()> {
    let settings = &mut config.field;
    let overrides = [
        (args.pm_start, &mut settings.pm_start),
        (args.pm_efficiency, &mut settings.pm_efficiency),
        (args.seasonality, &mut settings.seasonality),
        (args.plastic_load, &mut settings.plastic_load),
        (args.petase_rate, &mut settings.petase_rate),
        (args.temperature, &mut settings.temperature),
        (args.malaria_cases, &mut settings.malaria_cases),
        (args.gene_drive, &mut settings.gene_drive),
        (args.resistance, &mut settings.resistance),
    ];
    for (value, slot) in overrides {
        if let Some(value) = value {
            *slot = value;
        }
    }
    config.validate()?;

    let forecasts = config.field.run(&config.smoother)?;

    println!("Model: {}", config.smoother.kind.label());
    output::print_forecasts(&forecasts);

    let summary: Vec<SummaryRow> = forecasts.iter().map(|f| f.summary_row()).collect();
    output::print_summary(&summary);

    if let Some(path) = args.output {
        output::write_json(
            &path,
            &RunReport {
                scenario: "field",
                seed: None,
                smoother: config.smoother.kind,
                forecasts: &forecasts,
                summary,
            },
        )?;
    }
    Ok(())
}

fn run_forecast(config: TwinConfig, args: ForecastArgs) -> Result<()> {
    let law = args.law.to_law(&args)?;
    let params = ForecastParametersBuilder::new()
        .horizon(args.horizon)
        .base_value(args.base)
        .decay_coefficient(args.decay)
        .noise_std(args.noise)
        .scale(args.scale)
        .resistance(args.resistance)
        .build()
        .context("Invalid forecast parameters")?;

    let generator = ForecastGenerator::from_settings(law, &config.smoother)?;

    let seed = config.resolve_seed();
    let result = generator.generate(&params, &mut StdRng::seed_from_u64(seed))?;

    println!("Law: {}", generator.law_name());
    println!("Model: {}", config.smoother.kind.label());
    println!("Seed: {}", seed);
    output::print_result(&format!("{} curve", law.name()), &result);

    if let Some(path) = args.output {
        let json = serde_json::json!({
            "law": law,
            "smoother": config.smoother.kind,
            "seed": seed,
            "parameters": params,
            "result": result,
            "fit": result.fit_quality(),
        });
        output::write_json(&path, &json)?;
    }
    Ok(())
}

fn run_report(config: TwinConfig, computed: bool) -> Result<()> {
    let forecasts = config.script.run(&config.smoother)?;
    let dir = &config.output.dir;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    if config.output.write_series {
        for forecast in &forecasts {
            let path = dir.join(series_file_name(forecast.domain));
            let file = File::create(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_series(file, &forecast.result)?;
            println!("Wrote {}", path.display());
        }
    }

    let rows = if computed {
        forecasts.iter().map(|f| f.summary_row()).collect()
    } else {
        default_summary()
    };
    let path = config.output.summary_path();
    let file =
        File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;
    write_summary(file, &rows)?;
    println!("Wrote {}", path.display());

    output::print_summary(&rows);
    info!(dir = %dir.display(), computed, "report written");
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        config,
        seed,
        model,
        command,
    } = cli;
    let config_path = config.as_deref();

    match command {
        Commands::Simulate(args) => {
            run_simulate(load_config(config_path, seed, model, None)?, args)
        }
        Commands::Field(args) => run_field(load_config(config_path, seed, model, None)?, args),
        Commands::Forecast(args) => {
            run_forecast(load_config(config_path, seed, model, None)?, args)
        }
        Commands::Report(args) => {
            let config = load_config(config_path, seed, model, args.dir)?;
            run_report(config, args.computed)
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ecotwin=info,twin_core=info,twin_api=info".into()),
        )
        .init();
}

fn main() {
    init_tracing();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    fn config_with_seed() -> TwinConfig {
        TwinConfig {
            seed: Some(1),
            ..TwinConfig::default()
        }
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "ecotwin", "simulate", "--years", "20", "--model", "random-forest", "--seed", "9",
        ])
        .unwrap();
        assert_eq!(cli.seed, Some(9));
        assert_eq!(cli.model, Some(SmootherKind::RandomForest));
        match cli.command {
            Commands::Simulate(args) => assert_eq!(args.years, Some(20)),
            _ => panic!("expected simulate"),
        }
    }

    #[test]
    fn test_unknown_model_rejected() {
        assert!(Cli::try_parse_from(["ecotwin", "field", "--model", "lstm"]).is_err());
    }

    #[test]
    fn test_simulate_writes_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("run.json");
        let args = SimulateArgs {
            years: Some(8),
            output: Some(path.clone()),
            ..SimulateArgs::default()
        };
        run_simulate(config_with_seed(), args).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["scenario"], "intervention");
        assert_eq!(json["seed"], 1);
        assert_eq!(json["smoother"], "polynomial");
        assert_eq!(json["forecasts"].as_array().unwrap().len(), 3);
        assert_eq!(json["forecasts"][0]["domain"], "air_quality");
        assert_eq!(json["summary"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_simulate_rejects_out_of_range_flag() {
        let args = SimulateArgs {
            strength: Some(150.0),
            ..SimulateArgs::default()
        };
        assert!(run_simulate(config_with_seed(), args).is_err());
    }

    #[test]
    fn test_simulate_with_upload() {
        let mut upload = NamedTempFile::new().unwrap();
        writeln!(upload, "Years,PM25\n0,120\n1,100\n2,90").unwrap();
        let args = SimulateArgs {
            upload: Some(upload.path().to_path_buf()),
            ..SimulateArgs::default()
        };
        assert!(run_simulate(config_with_seed(), args).is_ok());
    }

    #[test]
    fn test_simulate_with_malformed_upload() {
        let mut upload = NamedTempFile::new().unwrap();
        writeln!(upload, "Years,PM25\n0,abc").unwrap();
        let args = SimulateArgs {
            upload: Some(upload.path().to_path_buf()),
            ..SimulateArgs::default()
        };
        let err = run_simulate(config_with_seed(), args).unwrap_err();
        assert!(format!("{:#}", err).contains("row 1"));
    }

    #[test]
    fn test_field_overrides() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("field.json");
        let args = FieldArgs {
            temperature: Some(1.5),
            output: Some(path.clone()),
            ..FieldArgs::default()
        };
        run_field(TwinConfig::default(), args).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(json.get("seed").is_none());
        assert_eq!(
            json["forecasts"][0]["result"]["observed"]["points"]
                .as_array()
                .unwrap()
                .len(),
            13
        );
    }

    #[test]
    fn test_forecast_linear_requires_target() {
        let cli = Cli::try_parse_from(["ecotwin", "forecast", "--law", "linear"]).unwrap();
        match cli.command {
            Commands::Forecast(args) => {
                assert!(run_forecast(config_with_seed(), args).is_err());
            }
            _ => panic!("expected forecast"),
        }
    }

    #[test]
    fn test_forecast_rejects_huge_horizon() {
        let horizon = usize::MAX.to_string();
        let cli = Cli::try_parse_from(["ecotwin", "forecast", "--horizon", &horizon]).unwrap();
        match cli.command {
            Commands::Forecast(args) => {
                let err = run_forecast(config_with_seed(), args).unwrap_err();
                assert!(format!("{:#}", err).contains("horizon"));
            }
            _ => panic!("expected forecast"),
        }
    }

    #[test]
    fn test_forecast_writes_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("curve.json");
        let out = path.to_string_lossy().to_string();
        let cli = Cli::try_parse_from([
            "ecotwin", "forecast", "--law", "suppressed", "--horizon", "16", "--resistance",
            "0.1", "--model", "none", "--output", &out,
        ])
        .unwrap();
        let config = TwinConfig {
            seed: Some(3),
            smoother: cli.model.map(Into::into).unwrap_or_default(),
            ..TwinConfig::default()
        };
        match cli.command {
            Commands::Forecast(args) => run_forecast(config, args).unwrap(),
            _ => panic!("expected forecast"),
        }
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["law"]["kind"], "suppressed");
        let last = json["result"]["predicted"]["points"][15]["value"]
            .as_f64()
            .unwrap();
        assert!((last - 6.72).abs() < 0.01);
    }

    #[test]
    fn test_report_writes_files() {
        let dir = tempdir().unwrap();
        let mut config = TwinConfig::default();
        config.output.dir = dir.path().join("out");
        run_report(config, false).unwrap();

        for name in [
            "pm25_model_output.csv",
            "plastic_model_output.csv",
            "malaria_model_output.csv",
            "model_summary_results.csv",
        ] {
            assert!(dir.path().join("out").join(name).exists(), "{} missing", name);
        }
        let summary =
            std::fs::read_to_string(dir.path().join("out/model_summary_results.csv")).unwrap();
        assert_eq!(summary.lines().count(), 4);
        assert!(summary.contains("~70% in 15 years"));
    }

    #[test]
    fn test_report_computed_summary() {
        let dir = tempdir().unwrap();
        let mut config = TwinConfig::default();
        config.output.dir = dir.path().to_path_buf();
        config.output.write_series = false;
        config.smoother = SmootherKind::None.into();
        run_report(config, true).unwrap();

        let summary =
            std::fs::read_to_string(dir.path().join("model_summary_results.csv")).unwrap();
        assert!(summary.contains("PM2.5 Reduction,~50% in 12 months"));
        assert!(summary.contains("in 10 years,Microbial Decay Simulation"));
        assert!(summary.contains("in 15 years,Gene Drive Decline Model"));
        assert!(!dir.path().join("pm25_model_output.csv").exists());
    }
}
