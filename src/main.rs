//! legdq - data-quality reports for legislative sessions
//!
//! Reads bills, chambers and sessions from a legislative data snapshot
//! and writes one JSON data-quality report per session.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error, or at least one session failed with --keep-going

mod analysis;
mod cli;
mod config;
mod jurisdiction;
mod models;
mod report;
mod store;

use anyhow::{Context, Result};
use cli::Args;
use config::{Config, CONFIG_FILE_NAME};
use indicatif::{ProgressBar, ProgressStyle};
use models::Chamber;
use std::path::{Path, PathBuf};
use std::time::Instant;
use store::{LegislativeStore, SnapshotStore};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Config is read before logging starts so `general.verbose` applies
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    init_logging(args.log_level(config.general.verbose))?;

    info!("legdq v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    debug!("Config: {:?}", config);

    match run(args, config).await {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Report run failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .legdq.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!("⚠️  {} already exists. Remove it first or edit it manually.", CONFIG_FILE_NAME);
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    println!("   Edit it to set the snapshot path and report directory.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(level: tracing::Level) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}

/// Outcome of generating reports for every session of a jurisdiction.
#[derive(Debug, Default)]
struct RunSummary {
    /// Report files written.
    written: Vec<PathBuf>,
    /// Sessions skipped because they have no bills.
    skipped: Vec<String>,
    /// Sessions that failed (only with keep-going).
    failed: Vec<String>,
}

/// Run the complete report workflow. Returns the exit code.
async fn run(args: Args, config: Config) -> Result<i32> {
    let start_time = Instant::now();

    let state = args.state().to_string();
    let jurisdiction_id = jurisdiction::resolve(&state)?;
    info!("Resolved {} to {}", state, jurisdiction_id);

    println!("📂 Loading data from: {}", config.store.path.display());
    let store = SnapshotStore::open(&config.store.path)
        .await
        .with_context(|| format!("Failed to open data store at {}", config.store.path.display()))?;

    println!("📝 Generating data-quality reports for {}...", state);
    let summary = generate_reports(&store, &jurisdiction_id, &state, &config, args.quiet).await?;

    println!("\n📊 Report Summary:");
    println!("   Reports written: {}", summary.written.len());
    for path in &summary.written {
        println!("     📄 {}", path.display());
    }
    if !summary.skipped.is_empty() {
        println!("   Sessions without bills: {}", summary.skipped.join(", "));
    }
    println!("   Duration: {:.1}s", start_time.elapsed().as_secs_f64());

    if !summary.failed.is_empty() {
        eprintln!(
            "\n⛔ {} session(s) failed: {}",
            summary.failed.len(),
            summary.failed.join(", ")
        );
        return Ok(1);
    }

    println!("\n✅ Done! Reports saved to: {}", config.report.output_dir.display());
    Ok(0)
}

/// Write a report for every session of a jurisdiction that has bills.
///
/// The first failing session aborts the run unless `general.keep_going`
/// is set, in which case the failure is logged and recorded.
async fn generate_reports<S: LegislativeStore>(
    store: &S,
    jurisdiction_id: &str,
    state: &str,
    config: &Config,
    quiet: bool,
) -> Result<RunSummary> {
    let sessions = store.sessions(jurisdiction_id)?;
    let chambers = store.chambers(jurisdiction_id)?;
    info!(
        "Found {} session(s) and {} chamber(s)",
        sessions.len(),
        chambers.len()
    );
    if chambers.is_empty() {
        warn!("No legislative chambers found for {}", jurisdiction_id);
    }

    let progress = session_progress(sessions.len() as u64, quiet)?;
    let mut summary = RunSummary::default();

    for session in &sessions {
        progress.set_message(session.clone());

        match report_session(store, jurisdiction_id, state, session, &chambers, config).await {
            Ok(Some(path)) => summary.written.push(path),
            Ok(None) => summary.skipped.push(session.clone()),
            Err(e) if config.general.keep_going => {
                error!("Session {} failed: {:#}", session, e);
                summary.failed.push(session.clone());
            }
            Err(e) => {
                progress.abandon();
                return Err(e.context(format!("Failed to report session {}", session)));
            }
        }

        progress.inc(1);
    }

    progress.finish_and_clear();
    Ok(summary)
}

/// Build and write one session's report. Returns `None` for a session
/// without bills.
async fn report_session<S: LegislativeStore>(
    store: &S,
    jurisdiction_id: &str,
    state: &str,
    session: &str,
    chambers: &[Chamber],
    config: &Config,
) -> Result<Option<PathBuf>> {
    let bills = store.bills(jurisdiction_id, session)?;

    if bills.is_empty() {
        info!("Session {} has no bills, skipping", session);
        return Ok(None);
    }

    let data = report::build_report(&bills, chambers);
    let path = report::write_report(
        &config.report.output_dir,
        state,
        session,
        &data,
        config.report.pretty,
    )
    .await?;

    info!("Session {}: {} bill(s) -> {}", session, bills.len(), path.display());
    Ok(Some(path))
}

/// Progress bar over sessions, hidden in quiet mode.
fn session_progress(len: u64, quiet: bool) -> Result<ProgressBar> {
    if quiet {
        return Ok(ProgressBar::hidden());
    }

    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    Ok(pb)
}

/// Load configuration from file or use defaults.
///
/// Runs before logging is set up, so problems go to stderr directly.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => Ok(config),
        Ok(None) => Ok(Config::default()),
        Err(e) => {
            eprintln!("⚠️  Failed to load {}: {:#}. Using defaults.", CONFIG_FILE_NAME, e);
            Ok(Config::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use models::{Bill, DataQualityReport};
    use store::StoreError;
    use tempfile::TempDir;

    const VA: &str = "ocd-jurisdiction/country:us/state:va/government";

    async fn fixture_store() -> SnapshotStore {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/virginia.json");
        SnapshotStore::open(&path).await.unwrap()
    }

    fn test_config(output_dir: &Path, keep_going: bool) -> Config {
        let mut config = Config::default();
        config.report.output_dir = output_dir.to_path_buf();
        config.general.keep_going = keep_going;
        config
    }

    /// Store whose bill lookup fails for one session.
    struct FailingStore {
        inner: SnapshotStore,
        broken_session: &'static str,
    }

    impl LegislativeStore for FailingStore {
        fn sessions(&self, jurisdiction_id: &str) -> Result<Vec<String>, StoreError> {
            self.inner.sessions(jurisdiction_id)
        }

        fn chambers(&self, jurisdiction_id: &str) -> Result<Vec<Chamber>, StoreError> {
            self.inner.chambers(jurisdiction_id)
        }

        fn bills(&self, jurisdiction_id: &str, session: &str) -> Result<Vec<Bill>, StoreError> {
            if session == self.broken_session {
                return Err(StoreError::SessionNotFound {
                    jurisdiction: jurisdiction_id.to_string(),
                    session: session.to_string(),
                });
            }
            self.inner.bills(jurisdiction_id, session)
        }
    }

    #[tokio::test]
    async fn test_generate_reports_for_fixture() {
        let dir = TempDir::new().unwrap();
        let config = test_config(dir.path(), false);

        let summary = generate_reports(&fixture_store().await, VA, "Virginia", &config, true)
            .await
            .unwrap();

        assert_eq!(
            summary.written,
            vec![
                dir.path().join("Virginia_2019_data_quality.json"),
                dir.path().join("Virginia_2020_data_quality.json"),
            ]
        );
        assert_eq!(summary.skipped, vec!["2021"]);
        assert!(summary.failed.is_empty());
        assert!(!dir.path().join("Virginia_2021_data_quality.json").exists());
    }

    #[tokio::test]
    async fn test_fixture_report_contents() {
        let dir = TempDir::new().unwrap();
        let config = test_config(dir.path(), false);
        generate_reports(&fixture_store().await, VA, "va", &config, true)
            .await
            .unwrap();

        let json = std::fs::read_to_string(dir.path().join("va_2020_data_quality.json")).unwrap();
        let report: DataQualityReport = serde_json::from_str(&json).unwrap();

        let senate = &report.bills_per_session_data["senate"][0];
        assert_eq!(senate.total_bills, 2);
        assert_eq!(senate.latest_bill_created_id.as_deref(), Some("SB 2"));
        assert_eq!(senate.latest_bill_created_date.as_deref(), Some("2020-01-15"));
        assert_eq!(senate.bill_with_latest_action_id.as_deref(), Some("SB 1"));
        assert_eq!(senate.latest_action_description.as_deref(), Some("Passed Senate"));

        let house = &report.bills_per_session_data["house of delegates"][0];
        assert_eq!(house.total_bills, 3);
        assert_eq!(house.latest_bill_created_id.as_deref(), Some("HB 2"));
        assert_eq!(house.latest_action_date.as_deref(), Some("2020-03-01"));
        assert_eq!(house.earliest_action_date.as_deref(), Some("2020-01-07"));

        let senate_avg = &report.average_num_data["senate"][0];
        assert_eq!(senate_avg.average_sponsors_per_bill, 2);
        assert_eq!(senate_avg.average_actions_per_bill, 2);
        assert_eq!(senate_avg.average_votes_per_bill, 0);

        let house_avg = &report.average_num_data["house of delegates"][0];
        assert_eq!(house_avg.average_sponsors_per_bill, 1);
        assert_eq!(house_avg.average_actions_per_bill, 1);
        assert_eq!(house_avg.average_votes_per_bill, 1);

        let house_gaps = &report.no_sources_data["house of delegates"][0];
        assert_eq!(house_gaps.total_bills_no_sources, 1);
        assert_eq!(house_gaps.total_votes_no_sources, 2);

        let senate_subjects = &report.bill_subjects_data["senate"][0];
        assert_eq!(senate_subjects.overall_number_of_subjects, 3);
        assert_eq!(senate_subjects.number_of_subjects, 2);
        assert_eq!(senate_subjects.number_of_bills_without_subjects, 0);

        let house_subjects = &report.bill_subjects_data["house of delegates"][0];
        assert_eq!(house_subjects.number_of_subjects, 2);
        assert_eq!(house_subjects.number_of_bills_without_subjects, 1);

        // Non-chamber organizations are not reported.
        assert_eq!(report.bills_per_session_data.len(), 2);
    }

    #[tokio::test]
    async fn test_failing_session_aborts_by_default() {
        let dir = TempDir::new().unwrap();
        let config = test_config(dir.path(), false);
        let store = FailingStore {
            inner: fixture_store().await,
            broken_session: "2019",
        };

        let result = generate_reports(&store, VA, "va", &config, true).await;

        assert!(result.is_err());
        assert!(!dir.path().join("va_2020_data_quality.json").exists());
    }

    #[tokio::test]
    async fn test_keep_going_records_failed_session() {
        let dir = TempDir::new().unwrap();
        let config = test_config(dir.path(), true);
        let store = FailingStore {
            inner: fixture_store().await,
            broken_session: "2019",
        };

        let summary = generate_reports(&store, VA, "va", &config, true).await.unwrap();

        assert_eq!(summary.failed, vec!["2019"]);
        assert_eq!(summary.written, vec![dir.path().join("va_2020_data_quality.json")]);
    }

    #[tokio::test]
    async fn test_unknown_jurisdiction_is_an_error() {
        let dir = TempDir::new().unwrap();
        let config = test_config(dir.path(), true);
        let other = "ocd-jurisdiction/country:us/state:md/government";

        let result = generate_reports(&fixture_store().await, other, "md", &config, true).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_config_file_verbose_sets_debug_level() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("legdq.toml");
        std::fs::write(&config_path, "[general]\nverbose = true\n").unwrap();

        let args = Args::try_parse_from(["legdq", "va", "--config", config_path.to_str().unwrap()])
            .unwrap();
        let mut config = load_config(&args).unwrap();
        config.merge_with_args(&args);

        assert!(config.general.verbose);
        assert_eq!(args.log_level(config.general.verbose), tracing::Level::DEBUG);
    }
}
