use std::collections::BTreeMap;
use std::env;
use std::time::Instant;

use serde::Serialize;
use sysinfo::{get_current_pid, ProcessRefreshKind, System};
use task_knapsack::{DpSolver, GreedySolver, TableMode, Task};

const SIZES: &[usize] = &[8, 12, 16, 20, 64, 256, 1024, 2048, 4096];

fn main() {
    let options = match Options::parse(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("schedule_compare: {err}");
            Options::print_help();
            std::process::exit(2);
        }
    };

    #[cfg(feature = "tracing")]
    init_tracing();

    eprintln!("\n{}", "=".repeat(80));
    eprintln!("Task Knapsack Compare: full table vs rolling row vs greedy");
    eprintln!("{}", "=".repeat(80));
    eprintln!();
    eprintln!("Each size runs the three solvers on the same deterministic task set and checks:");
    eprintln!("  • full table optimum equals brute force (up to {} tasks)", options.verify_limit);
    eprintln!("  • rolling row chooses exactly the tasks the full table chooses");
    eprintln!("  • greedy fits the budget and never beats the exact optimum");
    eprintln!();
    eprintln!("  wall_s: wall-clock seconds; rss_delta_kib: resident memory growth");
    eprintln!("{}", "=".repeat(80));
    eprintln!();

    let mut sys = System::new();
    let mut measurements = Vec::new();
    let total = SIZES.len();

    for (idx, &n) in SIZES.iter().enumerate() {
        let tasks = deterministic_tasks(n);
        let capacity = capacity_for(n);
        eprintln!("[{}/{}] n={} capacity={}h", idx + 1, total, n, capacity);

        let mut full_chosen = Vec::new();
        let mut full_value = 0u64;
        let m = measure("dp_full", &tasks, capacity, &mut sys, || {
            match DpSolver::new().solve(&tasks, capacity) {
                Ok(result) => {
                    full_chosen = result.chosen_indices.clone();
                    full_value = result.total_value;
                    if n <= options.verify_limit {
                        let expected = brute_force(&tasks, capacity);
                        if expected == result.total_value {
                            (VerificationStatus::Passed, None)
                        } else {
                            (
                                VerificationStatus::Failed,
                                Some(format!("expected {expected}, got {}", result.total_value)),
                            )
                        }
                    } else {
                        (VerificationStatus::NotChecked, None)
                    }
                }
                Err(err) => (VerificationStatus::Failed, Some(err.to_string())),
            }
        });
        report_line(&m, full_value);
        measurements.push(m);

        let mut rolling_value = 0u64;
        let m = measure("dp_rolling", &tasks, capacity, &mut sys, || {
            match DpSolver::new()
                .with_mode(TableMode::Rolling)
                .solve(&tasks, capacity)
            {
                Ok(result) => {
                    rolling_value = result.total_value;
                    if result.chosen_indices == full_chosen {
                        (VerificationStatus::Passed, None)
                    } else {
                        (
                            VerificationStatus::Failed,
                            Some(format!(
                                "chose {} tasks, full table chose {}",
                                result.chosen_indices.len(),
                                full_chosen.len()
                            )),
                        )
                    }
                }
                Err(err) => (VerificationStatus::Failed, Some(err.to_string())),
            }
        });
        report_line(&m, rolling_value);
        measurements.push(m);

        let mut greedy_value = 0u64;
        let m = measure("greedy", &tasks, capacity, &mut sys, || {
            match GreedySolver::new().solve(&tasks, capacity) {
                Ok(result) => {
                    greedy_value = result.total_value;
                    if result.total_units > result.capacity_units {
                        (
                            VerificationStatus::Failed,
                            Some(format!(
                                "used {} of {} units",
                                result.total_units, result.capacity_units
                            )),
                        )
                    } else if result.total_value > full_value {
                        (
                            VerificationStatus::Failed,
                            Some(format!(
                                "greedy {} above optimum {full_value}",
                                result.total_value
                            )),
                        )
                    } else {
                        (VerificationStatus::Passed, None)
                    }
                }
                Err(err) => (VerificationStatus::Failed, Some(err.to_string())),
            }
        });
        report_line(&m, greedy_value);
        measurements.push(m);
        eprintln!();
    }

    print_summary(&measurements, &options);

    if let Err(err) = options.format.write(&measurements) {
        eprintln!("schedule_compare output error: {err}");
        std::process::exit(1);
    }
}

#[cfg(feature = "tracing")]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("task_knapsack=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

struct Options {
    format: OutputFormat,
    verify_limit: usize,
}

impl Options {
    fn parse<I, T>(mut args: I) -> Result<Self, String>
    where
        I: Iterator<Item = T>,
        T: Into<String>,
    {
        let mut format = OutputFormat::Csv;
        let mut verify_limit = 20usize;

        while let Some(arg) = args.next() {
            let arg = arg.into();
            if arg == "--help" || arg == "-h" {
                Options::print_help();
                std::process::exit(0);
            } else if let Some(value) = arg.strip_prefix("--format=") {
                format = OutputFormat::from_str(value)?;
            } else if arg == "--format" {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value after --format".to_string())?
                    .into();
                format = OutputFormat::from_str(&value)?;
            } else if let Some(value) = arg.strip_prefix("--verify-limit=") {
                verify_limit = parse_limit(value)?;
            } else if arg == "--verify-limit" {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value after --verify-limit".to_string())?
                    .into();
                verify_limit = parse_limit(&value)?;
            } else {
                return Err(format!("unrecognized argument '{arg}'"));
            }
        }

        Ok(Self {
            format,
            verify_limit,
        })
    }

    fn print_help() {
        println!(
            "\
Usage: cargo run --bin schedule_compare [-- <options>]

Options:
  --format <csv|table|json>     Output format (default: csv)
  --verify-limit <N>            Largest task count checked by brute force, at most 24 (default: 20)
  -h, --help                    Print this help message

Environment:
  RUST_LOG                      Log filter (default: task_knapsack=info)

Examples:
  cargo run --bin schedule_compare
  cargo run --release --bin schedule_compare -- --format table --verify-limit 16
"
        );
    }
}

fn parse_limit(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(limit) if limit <= 24 => Ok(limit),
        Ok(_) => Err("verify limit above 24 makes brute force impractical".to_string()),
        Err(_) => Err("verify limit must be a non-negative integer".to_string()),
    }
}

#[derive(Copy, Clone)]
enum OutputFormat {
    Csv,
    Table,
    Json,
}

impl OutputFormat {
    fn from_str(value: &str) -> Result<Self, String> {
        match value {
            "csv" => Ok(Self::Csv),
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown format '{other}'")),
        }
    }

    fn write(self, measurements: &[Measurement]) -> Result<(), String> {
        match self {
            OutputFormat::Csv => write_csv(measurements),
            OutputFormat::Table => write_table(measurements),
            OutputFormat::Json => write_json(measurements),
        }
    }
}

#[derive(Clone, Serialize)]
struct Measurement {
    scenario: &'static str,
    tasks: usize,
    capacity_hours: f64,
    wall_s: f64,
    rss_delta_kib: u64,
    status: VerificationStatus,
    detail: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum VerificationStatus {
    NotChecked,
    Passed,
    Failed,
}

impl VerificationStatus {
    fn label(&self) -> &'static str {
        match self {
            VerificationStatus::NotChecked => "not_checked",
            VerificationStatus::Passed => "passed",
            VerificationStatus::Failed => "failed",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            VerificationStatus::Passed => "✓",
            VerificationStatus::Failed => "✗",
            VerificationStatus::NotChecked => "○",
        }
    }
}

fn report_line(m: &Measurement, value: u64) {
    eprintln!(
        "      {} {:<10} value={}, time={:.3}s, rss_delta={} KiB, status={}",
        m.status.icon(),
        m.scenario,
        value,
        m.wall_s,
        m.rss_delta_kib,
        m.status.label()
    );
}

fn print_summary(measurements: &[Measurement], options: &Options) {
    eprintln!("{}", "=".repeat(80));
    eprintln!("Summary");
    eprintln!("{}", "=".repeat(80));

    let count = |status: VerificationStatus| {
        measurements.iter().filter(|m| m.status == status).count()
    };
    let passed = count(VerificationStatus::Passed);
    let failed = count(VerificationStatus::Failed);
    let not_checked = count(VerificationStatus::NotChecked);
    let total = measurements.len().max(1) as f64;
    eprintln!("  ✓ Passed: {} ({:.1}%)", passed, 100.0 * passed as f64 / total);
    eprintln!("  ✗ Failed: {} ({:.1}%)", failed, 100.0 * failed as f64 / total);
    eprintln!(
        "  ○ Not checked (n > {}): {} ({:.1}%)",
        options.verify_limit,
        not_checked,
        100.0 * not_checked as f64 / total
    );
    eprintln!();

    for m in measurements.iter().filter(|m| m.status == VerificationStatus::Failed) {
        eprintln!("  ✗ {} (n={})", m.scenario, m.tasks);
        if let Some(detail) = &m.detail {
            eprintln!("     Error: {detail}");
        }
    }

    let mut by_scenario: BTreeMap<&str, Vec<&Measurement>> = BTreeMap::new();
    for m in measurements {
        by_scenario.entry(m.scenario).or_default().push(m);
    }
    for (scenario, ms) in &by_scenario {
        let max_time = ms.iter().map(|m| m.wall_s).fold(0.0, f64::max);
        let max_mem = ms.iter().map(|m| m.rss_delta_kib).max().unwrap_or(0);
        eprintln!("  {scenario}: max_time={max_time:.3}s, max_rss_delta={max_mem} KiB");
    }
    eprintln!("{}", "=".repeat(80));
    eprintln!();
}

fn measure<F>(
    scenario: &'static str,
    tasks: &[Task],
    capacity_hours: f64,
    sys: &mut System,
    compute: F,
) -> Measurement
where
    F: FnOnce() -> (VerificationStatus, Option<String>),
{
    let before = rss_kib(sys);
    let start = Instant::now();
    let (status, detail) = compute();
    let duration = start.elapsed();
    let after = rss_kib(sys);

    Measurement {
        scenario,
        tasks: tasks.len(),
        capacity_hours,
        wall_s: duration.as_secs_f64(),
        rss_delta_kib: after.saturating_sub(before),
        status,
        detail,
    }
}

fn write_csv(measurements: &[Measurement]) -> Result<(), String> {
    println!("scenario,tasks,capacity_hours,wall_s,rss_delta_kib,status,detail");
    for m in measurements {
        let detail = m
            .detail
            .as_ref()
            .map(|s| s.replace('"', "'"))
            .unwrap_or_default();
        println!(
            "{},{},{},{:.3},{},{},\"{}\"",
            m.scenario,
            m.tasks,
            m.capacity_hours,
            m.wall_s,
            m.rss_delta_kib,
            m.status.label(),
            detail
        );
    }
    Ok(())
}

fn write_table(measurements: &[Measurement]) -> Result<(), String> {
    let col1 = measurements
        .iter()
        .map(|m| m.scenario.len())
        .fold("scenario".len(), usize::max);

    println!(
        "{:<col1$}  {:>6}  {:>10}  {:>10}  {:>14}  {:>12}  detail",
        "scenario", "tasks", "capacity_h", "wall_s", "rss_delta_kib", "status"
    );
    println!(
        "{:-<col1$}  {:-<6}  {:-<10}  {:-<10}  {:-<14}  {:-<12}  {:-<12}",
        "", "", "", "", "", "", ""
    );
    for m in measurements {
        println!(
            "{:<col1$}  {:>6}  {:>10}  {:>10.3}  {:>14}  {:>12}  {}",
            m.scenario,
            m.tasks,
            m.capacity_hours,
            m.wall_s,
            m.rss_delta_kib,
            m.status.label(),
            m.detail.as_deref().unwrap_or("")
        );
    }
    Ok(())
}

fn write_json(measurements: &[Measurement]) -> Result<(), String> {
    let json = serde_json::to_string_pretty(measurements).map_err(|err| err.to_string())?;
    println!("{json}");
    Ok(())
}

fn rss_kib(sys: &mut System) -> u64 {
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    get_current_pid()
        .ok()
        .and_then(|pid| sys.process(pid))
        .map(|process| process.memory() / 1024)
        .unwrap_or(0)
}

/// Durations cycle through 0.5h..4h and productivity through 1..=20.
fn deterministic_tasks(n: usize) -> Vec<Task> {
    (0..n)
        .filter_map(|i| {
            let hours = (1 + (i * 7 + 3) % 8) as f64 / 2.0;
            let productivity = 1 + ((i * 13 + 5) % 20) as u32;
            Task::new(format!("task-{i}"), hours, productivity).ok()
        })
        .collect()
}

/// Roughly a third of the total task duration, on the half-hour grid.
fn capacity_for(n: usize) -> f64 {
    ((n as f64 * 2.25 / 3.0) * 2.0).floor() / 2.0
}

/// Exhaustive optimum over all subsets.
fn brute_force(tasks: &[Task], capacity_hours: f64) -> u64 {
    let capacity = (capacity_hours * 2.0).round() as u64;
    (0u64..1 << tasks.len())
        .filter_map(|mask| {
            let (units, value) = tasks
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .fold((0u64, 0u64), |(u, v), (_, t)| {
                    (u + u64::from(t.duration_units()), v + u64::from(t.productivity()))
                });
            (units <= capacity).then_some(value)
        })
        .max()
        .unwrap_or(0)
}
