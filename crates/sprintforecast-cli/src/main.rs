//! Command-line front end for sprint forecasting.
//!
//! # Usage
//!
//! ```bash
//! # Monte Carlo summary against fitted capacity history
//! sprintforecast summary --triads backlog.csv --sprint-hours 80 --history capacity.txt
//!
//! # Queue forecast for the hours left in the sprint
//! sprintforecast forecast --triads backlog.csv --remaining 24 --workers 3
//!
//! # Queue forecast with execution and review noise fitted from issue history
//! sprintforecast forecast --triads backlog.csv --remaining 24 \
//!   --empirical --timelines timelines.json
//!
//! # Intake for a team of four over a ten day sprint
//! sprintforecast plan --triads backlog.csv --team 4 --days 10 --json
//! ```
//!
//! Exit codes: 0 success, 2 invalid input, 3 no data, 4 input source failure.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use sprintforecast::distribution::{Distribution, ScaledBeta, SkewT};
use sprintforecast::output::{format_plan, format_result, format_summary, to_json_pretty};
use sprintforecast::sources::{
    load_capacity_history, load_distribution, ColumnTransitionExtractor, DurationExtractor,
    LabelEventExtractor, StageDurations, TimelineFile, TriadFile, TriadSource,
};
use sprintforecast::{
    build_queue_strategies, CapacityPosterior, CapacityStrategy, EmpiricalEngine, Error, ErrorKind,
    ExecutionStrategy, ForecastEngine, IntakePlanner, MomentumModel, QueueForecastEngine,
    QueueSimulator, Result, ReviewPool, ReviewStrategy, RunConfig, SprintForecaster, TriadRecord,
};

/// Forecast sprint completion from three-point ticket estimates
#[derive(Parser, Debug)]
#[command(name = "sprintforecast")]
#[command(about = "Monte Carlo sprint completion forecasts and intake planning")]
#[command(version)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Percentiles, P(goal), Brier and CRPS of simulated completion times
    Summary(SummaryArgs),
    /// Probability of finishing and expected carry-over from a work queue
    Forecast(ForecastArgs),
    /// Recommend which tickets to commit to next sprint
    Plan(PlanArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// CSV of `number,title,optimistic,mode,pessimistic[,deps]`
    #[arg(long)]
    triads: PathBuf,

    /// Root seed of the random stream
    #[arg(long)]
    seed: Option<u64>,

    /// Print JSON instead of a formatted report
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct SummaryArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Nominal sprint length in hours
    #[arg(long)]
    sprint_hours: f64,

    /// Past per-sprint capacity totals, one per line (fits a lognormal posterior)
    #[arg(long, conflicts_with = "capacity")]
    history: Option<PathBuf>,

    /// Capacity distribution config (JSON); default beta(8, 2) on [40, 55]
    #[arg(long)]
    capacity: Option<PathBuf>,

    /// Execution error distribution config (JSON); default skew-t(0, 0.25, 2, 5)
    #[arg(long)]
    exec: Option<PathBuf>,

    /// Monte Carlo paths
    #[arg(long, default_value_t = 10_000)]
    paths: usize,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Extractor {
    /// `dev` / `review` label add and remove events
    Labels,
    /// Project board moves into and out of `dev` / `review` columns
    Columns,
}

#[derive(Args, Debug)]
struct ForecastArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Hours left in the sprint
    #[arg(long)]
    remaining: f64,

    /// Developers working the queue
    #[arg(long, default_value_t = 3)]
    workers: usize,

    /// Dedicated reviewers (reviews share the worker pool if omitted)
    #[arg(long)]
    reviewers: Option<usize>,

    /// Simulated paths
    #[arg(long, default_value_t = 2_000)]
    draws: usize,

    /// Queue horizon as a multiple of the remaining hours
    #[arg(long, default_value_t = 10.0)]
    horizon_factor: f64,

    /// Execution error distribution config (JSON); default skew-t(0, 0.25, 2, 5)
    #[arg(long, conflicts_with = "empirical")]
    exec: Option<PathBuf>,

    /// Review lag distribution config (JSON); default beta(2, 5) on [0.1, 1.5]
    #[arg(long, conflicts_with = "empirical")]
    review: Option<PathBuf>,

    /// Fit execution and review noise from issue history
    #[arg(long, requires = "timelines")]
    empirical: bool,

    /// Bootstrap observed dev durations instead of simulating the queue
    #[arg(long, requires = "timelines", conflicts_with = "empirical")]
    bootstrap: bool,

    /// JSON map of issue number to timeline events
    #[arg(long)]
    timelines: Option<PathBuf>,

    /// How stage boundaries are marked in the timelines
    #[arg(long, value_enum, default_value_t = Extractor::Labels)]
    extractor: Extractor,
}

#[derive(Args, Debug)]
struct PlanArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Past per-sprint capacity totals, one per line (momentum forecast)
    #[arg(long, requires = "target_hours", conflicts_with_all = ["team", "days"])]
    history: Option<PathBuf>,

    /// Capacity the team is aiming for, in hours
    #[arg(long)]
    target_hours: Option<f64>,

    /// Developer head-count (fixed capacity)
    #[arg(long, requires = "days")]
    team: Option<usize>,

    /// Sprint length in working days (fixed capacity)
    #[arg(long, requires = "team")]
    days: Option<f64>,

    /// Focused hours per developer per day
    #[arg(long, default_value_t = 6.0)]
    hours_per_day: f64,

    /// Confidence that the plan fits capacity
    #[arg(long, default_value_t = 0.8)]
    confidence: f64,

    /// Capacity draws for the momentum forecast
    #[arg(long, default_value_t = 10_000)]
    paths: usize,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(exit_code(e.kind()))
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn exit_code(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::Validation => 2,
        ErrorKind::Data => 3,
        ErrorKind::Upstream => 4,
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Summary(args) => summary(args),
        Command::Forecast(args) => forecast(args),
        Command::Plan(args) => plan(args),
    }
}

fn config_for(common: &CommonArgs) -> RunConfig {
    match common.seed {
        Some(seed) => RunConfig::new().seed(seed),
        None => RunConfig::new(),
    }
}

fn fetch_backlog(path: &Path) -> Result<Vec<TriadRecord>> {
    let records = TriadFile::new(path).fetch_triads()?;
    if records.is_empty() {
        return Err(Error::data(format!("no tickets with PERT triads in {}", path.display())));
    }
    Ok(records)
}

fn distribution_or(path: Option<&Path>, default: impl FnOnce() -> Result<Distribution>) -> Result<Distribution> {
    match path {
        Some(p) => load_distribution(p),
        None => default(),
    }
}

fn default_exec() -> Result<Distribution> {
    Ok(SkewT::new(0.0, 0.25, 2.0, 5.0)?.into())
}

fn default_review() -> Result<Distribution> {
    Ok(ScaledBeta::new(2.0, 5.0, 0.1, 1.5)?.into())
}

fn default_capacity() -> Result<Distribution> {
    Ok(ScaledBeta::new(8.0, 2.0, 40.0, 55.0)?.into())
}

fn summary(args: SummaryArgs) -> Result<()> {
    let mut config = config_for(&args.common);
    config.paths = args.paths;
    config.validate()?;
    let tickets = fetch_backlog(&args.common.triads)?
        .into_iter()
        .map(|r| r.ticket)
        .collect();

    let execution = ExecutionStrategy::new(distribution_or(args.exec.as_deref(), default_exec)?)?;
    let capacity = match &args.history {
        Some(path) => CapacityStrategy::from(CapacityPosterior::fit(&load_capacity_history(path)?)?),
        None => CapacityStrategy::new(distribution_or(args.capacity.as_deref(), default_capacity)?)?,
    };

    let forecaster = SprintForecaster::new(tickets, execution, capacity)?;
    let summary = forecaster.summary(args.sprint_hours, config.paths, &config.stream())?;

    if args.common.json {
        println!("{}", to_json_pretty(&summary).map_err(Error::upstream)?);
    } else {
        print!("{}", format_summary(&summary));
    }
    Ok(())
}

fn extract_durations(timelines: &Path, extractor: Extractor, records: &[TriadRecord]) -> Result<StageDurations> {
    let source = TimelineFile::open(timelines)?;
    let numbers: Vec<_> = records.iter().map(TriadRecord::number).collect();
    let durations = match extractor {
        Extractor::Labels => LabelEventExtractor::new(source).extract(&numbers)?,
        Extractor::Columns => ColumnTransitionExtractor::new(source).extract(&numbers)?,
    };
    if durations.dev.is_empty() && durations.review.is_empty() {
        return Err(Error::data("no dev/review history yet for these tickets"));
    }
    Ok(durations)
}

fn forecast(args: ForecastArgs) -> Result<()> {
    let mut config = config_for(&args.common);
    config.draws = args.draws;
    config.workers = args.workers;
    config.horizon_factor = args.horizon_factor;
    if let Some(n) = args.reviewers {
        config.review_pool = ReviewPool::Dedicated(n);
    }
    config.validate()?;

    let records = fetch_backlog(&args.common.triads)?;
    let stream = config.stream();

    let engine: Box<dyn ForecastEngine> = match (&args.timelines, args.empirical, args.bootstrap) {
        (Some(timelines), _, true) => {
            let durations = extract_durations(timelines, args.extractor, &records)?;
            Box::new(EmpiricalEngine::new(durations.dev, args.remaining, stream)?)
        }
        (Some(timelines), true, _) => {
            let durations = extract_durations(timelines, args.extractor, &records)?;
            let (execution, review) = build_queue_strategies(&durations.dev, &durations.review)?;
            let tickets = records.into_iter().map(|r| r.ticket).collect();
            let simulator = QueueSimulator::from_config(tickets, execution, review, &config)?;
            Box::new(QueueForecastEngine::new(simulator, args.remaining, stream))
        }
        _ => {
            let execution = ExecutionStrategy::new(distribution_or(args.exec.as_deref(), default_exec)?)?;
            let review = ReviewStrategy::new(distribution_or(args.review.as_deref(), default_review)?)?;
            let tickets = records.into_iter().map(|r| r.ticket).collect();
            let simulator = QueueSimulator::from_config(tickets, execution, review, &config)?;
            Box::new(QueueForecastEngine::new(simulator, args.remaining, stream))
        }
    };

    tracing::debug!(draws = config.draws, workers = config.workers, seed = config.seed, "running forecast");
    let result = engine.forecast(config.draws)?;

    if args.common.json {
        println!("{}", to_json_pretty(&result).map_err(Error::upstream)?);
    } else {
        print!("{}", format_result(&result));
    }
    Ok(())
}

fn plan(args: PlanArgs) -> Result<()> {
    let mut config = config_for(&args.common);
    config.paths = args.paths;
    config.confidence = args.confidence;
    config.hours_per_dev_day = args.hours_per_day;
    config.validate()?;
    let backlog = fetch_backlog(&args.common.triads)?;

    let planner = match (&args.history, args.target_hours, args.team, args.days) {
        (Some(path), Some(target), _, _) => {
            let model = MomentumModel::fit(&load_capacity_history(path)?, target)?;
            let draws = model.forecast(config.paths, &mut config.stream().substream(0));
            IntakePlanner::new(backlog, draws)?
        }
        (None, _, Some(team), Some(days)) => {
            IntakePlanner::with_fixed_capacity(backlog, team, days, config.hours_per_dev_day)?
        }
        _ => {
            return Err(Error::validation(
                "capacity",
                "pass either --history with --target-hours, or --team with --days",
            ))
        }
    };

    let plan = planner.plan(config.confidence)?;
    if args.common.json {
        println!("{}", to_json_pretty(&plan).map_err(Error::upstream)?);
    } else {
        print!("{}", format_plan(&plan));
    }
    Ok(())
}
