//! Vortex VSL command-line interface.
//!
//! - Generates embeddable VSL players (HTML/CSS/script snippets)
//! - Validates player configurations
//! - Manages stored projects per owner
//! - Shows the retention curve and simulates playback

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use vx_common::{
    Error, InstanceId, InstanceIdSource, OutputFormat, PlayerConfig, ProjectId,
    RandomInstanceIds, SCHEMA_VERSION,
};
use vx_config::{collect_issues, load_player_config, validate_player_config};
use vx_core::exit_codes::ExitCode;
use vx_core::logging::{generate_run_id, init_logging, LogConfig, LogFormat, LogLevel};
use vx_core::output::{envelope, print_json, report_error};
use vx_core::{schema, PlayerOverrides, Runtime, RuntimeOptions};
use vx_embed::{CopyVariant, EmbedGenerator, PlayerSimulation, PlayerView};
use vx_math::{sample_curve, RetentionCurve, EXPONENT_DEFAULT, MAX_CURVE_POINTS};
use vx_store::{ListOptions, ProjectRecord, ProjectStore, ProjectSummary};

type CmdResult = Result<ExitCode, Error>;

/// Upper bound on simulated timeline rows.
const MAX_PREVIEW_FRAMES: usize = 10_000;

/// Vortex VSL - embeddable video sales letter players
#[derive(Parser)]
#[command(name = "vortex")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "md")]
    format: OutputFormat,

    /// Settings file (default: VORTEX_SETTINGS, then the XDG config dir)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Project store directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Owner identity for stored projects (default: VORTEX_OWNER, settings, "local")
    #[arg(long, global = true)]
    owner: Option<String>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log format on stderr: human or jsonl
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

impl GlobalOpts {
    fn runtime_options(&self) -> RuntimeOptions {
        RuntimeOptions {
            settings: self.settings.clone(),
            data_dir: self.data_dir.clone(),
            owner: self.owner.clone(),
        }
    }

    fn use_color(&self) -> bool {
        !self.no_color && std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal()
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the embed code for a player configuration
    Embed(EmbedArgs),

    /// Check a player configuration file and list every problem
    Validate(ValidateArgs),

    /// Show how the retention curve maps real progress to the displayed bar
    Curve(CurveArgs),

    /// Simulate a viewer unmuting and watching the player
    Preview(PreviewArgs),

    /// Manage stored projects
    Project(ProjectArgs),

    /// Inspect resolved configuration
    Config(ConfigArgs),

    /// Print JSON Schema for persisted types
    Schema(SchemaArgs),

    /// Show version information
    Version,
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Embed(_) => "embed",
            Commands::Validate(_) => "validate",
            Commands::Curve(_) => "curve",
            Commands::Preview(_) => "preview",
            Commands::Project(args) => match args.command {
                ProjectCommands::New { .. } => "project new",
                ProjectCommands::List { .. } => "project list",
                ProjectCommands::Show { .. } => "project show",
                ProjectCommands::Update { .. } => "project update",
                ProjectCommands::Delete { .. } => "project delete",
                ProjectCommands::Embed { .. } => "project embed",
            },
            Commands::Config(_) => "config show",
            Commands::Schema(_) => "schema",
            Commands::Version => "version",
        }
    }
}

#[derive(Args, Debug)]
struct EmbedArgs {
    /// Player configuration JSON (default: player_defaults from settings)
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    overrides: PlayerOverrides,

    #[command(flatten)]
    output: EmbedOutputArgs,
}

#[derive(Args, Debug)]
struct EmbedOutputArgs {
    /// Write the embed code to a file instead of stdout
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Fixed container id, for reproducible output
    #[arg(long)]
    instance_id: Option<String>,

    /// Emit only the player, without install instructions
    #[arg(long)]
    bare: bool,

    /// Minify the player markup (comments are kept)
    #[arg(long)]
    minify: bool,

    /// Language of the CTA and instructions: en, pt-br
    #[arg(long)]
    copy: Option<CopyVariant>,

    /// Skip validation; invalid fields fall back to safe defaults
    #[arg(long)]
    no_validate: bool,
}

#[derive(Args, Debug)]
struct ValidateArgs {
    /// Player configuration JSON
    #[arg(long)]
    config: PathBuf,
}

#[derive(Args, Debug)]
struct CurveArgs {
    /// Curve exponent (clamped to 0.1..1.0)
    #[arg(long, default_value_t = EXPONENT_DEFAULT)]
    exponent: f64,

    /// Number of evenly spaced samples (2 to 1001)
    #[arg(
        long,
        default_value_t = 11,
        value_parser = clap::value_parser!(u64).range(2..=MAX_CURVE_POINTS as u64)
    )]
    points: u64,
}

#[derive(Args, Debug)]
struct PreviewArgs {
    /// Player configuration JSON (default: player_defaults from settings)
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    overrides: PlayerOverrides,

    /// Simulated video duration in seconds
    #[arg(long, default_value_t = 120.0)]
    duration: f64,

    /// Seconds between simulated timeupdate events
    #[arg(long, default_value_t = 10.0)]
    step: f64,
}

#[derive(Args, Debug)]
struct ProjectArgs {
    #[command(subcommand)]
    command: ProjectCommands,
}

#[derive(Subcommand, Debug)]
enum ProjectCommands {
    /// Create a project from a configuration file and/or field flags
    New {
        /// Player configuration JSON (default: player_defaults from settings)
        #[arg(long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        overrides: PlayerOverrides,
    },

    /// List your projects, most recently edited first
    List {
        /// Case-insensitive filter on the display name
        #[arg(long)]
        search: Option<String>,

        /// Maximum number of projects to show
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show one project
    Show {
        /// Project id (vsl-YYYYMMDD-HHMMSS-xxxx)
        id: String,
    },

    /// Replace a project's configuration or individual fields
    Update {
        /// Project id
        id: String,

        /// New player configuration JSON
        #[arg(long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        overrides: PlayerOverrides,
    },

    /// Delete a project
    Delete {
        /// Project id
        id: String,
    },

    /// Generate the embed code for a stored project
    Embed {
        /// Project id
        id: String,

        #[command(flatten)]
        output: EmbedOutputArgs,
    },
}

#[derive(Args, Debug)]
struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show resolved settings, data directory and owner with their sources
    Show,
}

#[derive(Args, Debug)]
struct SchemaArgs {
    /// Type name (all types when omitted)
    name: Option<String>,

    /// List available types
    #[arg(long)]
    list: bool,
}

fn main() {
    let cli = Cli::parse();

    let cli_level = if cli.global.quiet {
        Some(LogLevel::Error)
    } else {
        match cli.global.verbose {
            0 => None,
            1 => Some(LogLevel::Info),
            2 => Some(LogLevel::Debug),
            _ => Some(LogLevel::Trace),
        }
    };
    init_logging(&LogConfig::from_env(cli_level, cli.global.log_format));

    let run_id = generate_run_id();
    let command = cli.command.name();
    let span = tracing::info_span!("vortex", run_id = %run_id);
    let _guard = span.enter();
    debug!(command, format = %cli.global.format, "Command started");

    let global = &cli.global;
    let result = match &cli.command {
        Commands::Embed(args) => run_embed(global, args),
        Commands::Validate(args) => run_validate(global, args),
        Commands::Curve(args) => run_curve(global, args),
        Commands::Preview(args) => run_preview(global, args),
        Commands::Project(args) => run_project(global, args),
        Commands::Config(args) => match args.command {
            ConfigCommands::Show => run_config_show(global),
        },
        Commands::Schema(args) => run_schema(global, args),
        Commands::Version => {
            print_version(global);
            Ok(ExitCode::Clean)
        }
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(err) => {
            debug!(command, code = err.code(), "Command failed");
            report_error(command, &err, global.format, global.use_color())
        }
    };
    std::process::exit(exit_code.as_i32());
}

// ============================================================================
// Shared helpers
// ============================================================================

fn load_runtime(global: &GlobalOpts) -> Result<Runtime, Error> {
    Runtime::load(&global.runtime_options())
}

/// A configuration file, or the settings defaults when no file is given.
fn base_config(runtime: &Runtime, path: Option<&Path>) -> Result<PlayerConfig, Error> {
    match path {
        Some(path) => Ok(load_player_config(path)?),
        None => Ok(runtime.settings.player_defaults.clone()),
    }
}

fn ensure_valid(config: &PlayerConfig) -> Result<(), Error> {
    Ok(validate_player_config(config)?)
}

fn parse_project_id(raw: &str) -> Result<ProjectId, Error> {
    ProjectId::parse(raw.trim()).ok_or_else(|| Error::Validation {
        field: "id".to_string(),
        message: format!("{:?} is not a project id (expected vsl-YYYYMMDD-HHMMSS-xxxx)", raw),
    })
}

fn delay_label(config: &PlayerConfig) -> String {
    match config.content_delay() {
        Some(seconds) => format!("{}s", seconds),
        None => "off".to_string(),
    }
}

// ============================================================================
// embed
// ============================================================================

fn run_embed(global: &GlobalOpts, args: &EmbedArgs) -> CmdResult {
    let runtime = load_runtime(global)?;
    let config = args
        .overrides
        .apply(base_config(&runtime, args.config.as_deref())?);
    emit_embed(global, &runtime, &config, &args.output, "embed", None)
}

fn emit_embed(
    global: &GlobalOpts,
    runtime: &Runtime,
    config: &PlayerConfig,
    out: &EmbedOutputArgs,
    command: &str,
    project: Option<&ProjectId>,
) -> CmdResult {
    if !out.no_validate {
        ensure_valid(config)?;
    }

    let mut options = runtime.embed_options()?;
    if let Some(copy) = out.copy {
        options = options.with_copy(copy);
    }
    if out.bare {
        options = options.with_instructions(false);
    }
    if out.minify {
        options = options.with_minify(true);
    }

    let id = match &out.instance_id {
        Some(raw) => InstanceId::new(raw).ok_or_else(|| Error::Validation {
            field: "instance-id".to_string(),
            message: "must start with a letter and use only letters, digits, '-' or '_'"
                .to_string(),
        })?,
        None => RandomInstanceIds.next_id(),
    };

    let code = EmbedGenerator::new(options).generate_with_id(config, &id)?;

    if let Some(path) = &out.output {
        std::fs::write(path, &code)?;
        info!(path = %path.display(), bytes = code.len(), "Embed code written");
    }

    match global.format {
        OutputFormat::Json => print_json(&envelope(
            command,
            json!({
                "status": "ok",
                "instance_id": id.as_str(),
                "project_id": project.map(|p| p.0.as_str()),
                "display_name": config.display_name,
                "bytes": code.len(),
                "output_path": out.output.as_ref().map(|p| p.display().to_string()),
                "embed_code": code,
            }),
        )),
        OutputFormat::Summary => {
            let target = out
                .output
                .as_ref()
                .map(|p| format!(" -> {}", p.display()))
                .unwrap_or_default();
            println!("[{}] {}: {} bytes{}", id, command, code.len(), target);
        }
        OutputFormat::Exitcode => {}
        OutputFormat::Md => match &out.output {
            Some(path) => println!(
                "Embed code for \"{}\" written to {} ({} bytes, instance {}).",
                config.display_name,
                path.display(),
                code.len(),
                id
            ),
            None if code.ends_with('\n') => print!("{}", code),
            None => println!("{}", code),
        },
    }
    Ok(ExitCode::Clean)
}

// ============================================================================
// validate
// ============================================================================

fn run_validate(global: &GlobalOpts, args: &ValidateArgs) -> CmdResult {
    let config = load_player_config(&args.config)?;
    let issues = collect_issues(&config);
    let path = args.config.display().to_string();

    match global.format {
        OutputFormat::Json => {
            let issues: Vec<_> = issues
                .iter()
                .map(|issue| {
                    json!({
                        "code": issue.code(),
                        "field": issue.field(),
                        "message": issue.to_string(),
                    })
                })
                .collect();
            print_json(&envelope(
                "validate",
                json!({
                    "status": if issues.is_empty() { "valid" } else { "invalid" },
                    "path": path,
                    "issues": issues,
                }),
            ));
        }
        OutputFormat::Summary => {
            if issues.is_empty() {
                println!("[validate] {}: OK", path);
            } else {
                println!("[validate] {}: {} issue(s)", path, issues.len());
            }
        }
        OutputFormat::Exitcode => {}
        OutputFormat::Md => {
            println!("# Configuration Validation");
            println!();
            println!("File: {}", path);
            if issues.is_empty() {
                println!("Status: ✓ Valid");
            } else {
                println!("Status: ✗ {} issue(s)", issues.len());
                println!();
                for issue in &issues {
                    match issue.field() {
                        Some(field) => println!("- `{}`: {}", field, issue),
                        None => println!("- {}", issue),
                    }
                }
            }
        }
    }

    Ok(if issues.is_empty() {
        ExitCode::Clean
    } else {
        ExitCode::IssuesFound
    })
}

// ============================================================================
// curve
// ============================================================================

fn run_curve(global: &GlobalOpts, args: &CurveArgs) -> CmdResult {
    let curve = RetentionCurve::clamped(args.exponent);
    let samples = sample_curve(curve, args.points as usize);

    match global.format {
        OutputFormat::Json => {
            let points: Vec<_> = samples
                .iter()
                .map(|p| {
                    json!({
                        "actual_percent": p.actual_percent,
                        "displayed_percent": p.displayed_percent,
                        "lead": p.lead(),
                    })
                })
                .collect();
            print_json(&envelope(
                "curve",
                json!({
                    "exponent_requested": args.exponent,
                    "exponent": curve.exponent(),
                    "linear": curve.is_linear(),
                    "half_bar_at_percent": curve.fraction_for_percent(50.0) * 100.0,
                    "points": points,
                }),
            ));
        }
        OutputFormat::Summary => println!(
            "[curve] exponent {}: bar shows 50% at {:.1}% watched",
            curve.exponent(),
            curve.fraction_for_percent(50.0) * 100.0
        ),
        OutputFormat::Exitcode => {}
        OutputFormat::Md => {
            println!("# Retention curve (exponent {})", curve.exponent());
            println!();
            if curve.exponent() != args.exponent {
                println!("Requested exponent {} was clamped.", args.exponent);
                println!();
            }
            println!("| Watched | Bar shows | Lead |");
            println!("|--------:|----------:|-----:|");
            for p in &samples {
                println!(
                    "| {:.1}% | {:.1}% | {:+.1} |",
                    p.actual_percent,
                    p.displayed_percent,
                    p.lead()
                );
            }
        }
    }
    Ok(ExitCode::Clean)
}

// ============================================================================
// preview
// ============================================================================

#[derive(Debug, Serialize)]
struct PreviewFrame {
    event: &'static str,
    #[serde(flatten)]
    view: PlayerView,
}

fn positive_seconds(field: &str, value: f64) -> Result<(), Error> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::Validation {
            field: field.to_string(),
            message: "must be a positive number of seconds".to_string(),
        })
    }
}

/// Drive a simulated player: page load, unmute click, playback, end.
fn simulate(config: &PlayerConfig, duration: f64, step: f64) -> Vec<PreviewFrame> {
    let mut sim = PlayerSimulation::new(config);
    let mut frames = vec![PreviewFrame {
        event: "load",
        view: sim.view(),
    }];

    sim.click_overlay();
    frames.push(PreviewFrame {
        event: "unmute",
        view: sim.view(),
    });

    for i in 1.. {
        let t = i as f64 * step;
        if t >= duration {
            break;
        }
        sim.time_update(t, duration);
        frames.push(PreviewFrame {
            event: "timeupdate",
            view: sim.view(),
        });
    }

    sim.time_update(duration, duration);
    sim.ended();
    frames.push(PreviewFrame {
        event: "ended",
        view: sim.view(),
    });
    frames
}

fn run_preview(global: &GlobalOpts, args: &PreviewArgs) -> CmdResult {
    positive_seconds("duration", args.duration)?;
    positive_seconds("step", args.step)?;
    if args.duration / args.step > MAX_PREVIEW_FRAMES as f64 {
        return Err(Error::Validation {
            field: "step".to_string(),
            message: format!(
                "too small for a {}s video (at most {} frames)",
                args.duration, MAX_PREVIEW_FRAMES
            ),
        });
    }

    let runtime = load_runtime(global)?;
    let config = args
        .overrides
        .apply(base_config(&runtime, args.config.as_deref())?);
    let frames = simulate(&config, args.duration, args.step);
    let revealed_at = frames
        .iter()
        .find(|f| f.view.revealed)
        .map(|f| f.view.current_time);

    match global.format {
        OutputFormat::Json => print_json(&envelope(
            "preview",
            json!({
                "duration": args.duration,
                "exponent": config.retention_curve().exponent(),
                "content_delay_seconds": config.content_delay(),
                "revealed_at": revealed_at,
                "frames": frames,
            }),
        )),
        OutputFormat::Summary => println!(
            "[preview] {}s, exponent {}: {} frames, content {}",
            args.duration,
            config.retention_curve().exponent(),
            frames.len(),
            match revealed_at {
                Some(t) => format!("revealed at {}s", t),
                None => "not revealed".to_string(),
            }
        ),
        OutputFormat::Exitcode => {}
        OutputFormat::Md => {
            println!("# Preview: {}", config.display_name);
            println!();
            println!(
                "Duration {}s, curve exponent {}, content delay {}.",
                args.duration,
                config.retention_curve().exponent(),
                delay_label(&config)
            );
            println!();
            println!("| Event | Time | Bar | State | Muted | Revealed |");
            println!("|-------|-----:|----:|-------|-------|----------|");
            for frame in &frames {
                let v = &frame.view;
                println!(
                    "| {} | {:.1}s | {:.1}% | {:?} | {} | {} |",
                    frame.event,
                    v.current_time,
                    v.progress_percent,
                    v.state,
                    if v.muted { "yes" } else { "no" },
                    if v.revealed { "yes" } else { "no" }
                );
            }
        }
    }
    Ok(ExitCode::Clean)
}

// ============================================================================
// project
// ============================================================================

fn run_project(global: &GlobalOpts, args: &ProjectArgs) -> CmdResult {
    let runtime = load_runtime(global)?;
    let store = runtime.store();
    let owner = &runtime.owner;
    debug!(owner = %owner, root = %store.root().display(), "Project store opened");

    match &args.command {
        ProjectCommands::New { config, overrides } => {
            let config = overrides.apply(base_config(&runtime, config.as_deref())?);
            ensure_valid(&config)?;
            let record = store.create(owner, config)?;
            info!(project_id = %record.id, owner = %owner, "Project created");
            print_record(global, "project new", &record);
            Ok(ExitCode::Clean)
        }
        ProjectCommands::List { search, limit } => {
            let mut options = ListOptions::default();
            if let Some(term) = search {
                options = options.with_search(term.clone());
            }
            if let Some(limit) = limit {
                options = options.with_limit(*limit);
            }
            let projects = store.list(owner, &options)?;
            print_project_list(global, &runtime, &projects);
            Ok(ExitCode::Clean)
        }
        ProjectCommands::Show { id } => {
            let record = store.get(owner, &parse_project_id(id)?)?;
            print_record(global, "project show", &record);
            Ok(ExitCode::Clean)
        }
        ProjectCommands::Update {
            id,
            config,
            overrides,
        } => {
            if config.is_none() && overrides.is_empty() {
                return Err(Error::Validation {
                    field: "config".to_string(),
                    message: "nothing to change; pass --config or field flags".to_string(),
                });
            }
            let id = parse_project_id(id)?;
            let base = match config {
                Some(path) => load_player_config(path)?,
                None => store.get(owner, &id)?.config,
            };
            let updated = overrides.apply(base);
            ensure_valid(&updated)?;
            let record = store.update(owner, &id, updated)?;
            info!(project_id = %record.id, "Project updated");
            print_record(global, "project update", &record);
            Ok(ExitCode::Clean)
        }
        ProjectCommands::Delete { id } => {
            let id = parse_project_id(id)?;
            store.delete(owner, &id)?;
            info!(project_id = %id, "Project deleted");
            match global.format {
                OutputFormat::Json => print_json(&envelope(
                    "project delete",
                    json!({"status": "deleted", "project_id": id.0}),
                )),
                OutputFormat::Summary => println!("[{}] project delete: deleted", id),
                OutputFormat::Exitcode => {}
                OutputFormat::Md => println!("Deleted project {}.", id),
            }
            Ok(ExitCode::Clean)
        }
        ProjectCommands::Embed { id, output } => {
            let record = store.get(owner, &parse_project_id(id)?)?;
            emit_embed(
                global,
                &runtime,
                &record.config,
                output,
                "project embed",
                Some(&record.id),
            )
        }
    }
}

fn print_record(global: &GlobalOpts, command: &str, record: &ProjectRecord) {
    match global.format {
        OutputFormat::Json => print_json(&envelope(command, json!({ "project": record }))),
        OutputFormat::Summary => println!(
            "[{}] {}: {} ({})",
            record.id, command, record.config.display_name, record.config.aspect_ratio
        ),
        OutputFormat::Exitcode => {}
        OutputFormat::Md => {
            let config = &record.config;
            println!("# {}", config.display_name);
            println!();
            println!("- ID: {}", record.id);
            println!("- Owner: {}", record.owner);
            println!("- Video: {}", config.video_source);
            println!("- Aspect ratio: {}", config.aspect_ratio);
            println!("- Accent color: {}", config.accent_color);
            println!("- Curve exponent: {}", config.retention_curve_exponent);
            println!("- Content delay: {}", delay_label(config));
            println!("- Views: {}", record.views);
            println!("- Created: {}", record.created_at.to_rfc3339());
            println!("- Last edited: {}", record.last_edited.to_rfc3339());
        }
    }
}

fn print_project_list(global: &GlobalOpts, runtime: &Runtime, projects: &[ProjectSummary]) {
    match global.format {
        OutputFormat::Json => print_json(&envelope(
            "project list",
            json!({
                "owner": runtime.owner,
                "count": projects.len(),
                "projects": projects,
            }),
        )),
        OutputFormat::Summary => println!(
            "[{}] project list: {} project(s)",
            runtime.owner,
            projects.len()
        ),
        OutputFormat::Exitcode => {}
        OutputFormat::Md => {
            println!("# Projects for {}", runtime.owner);
            println!();
            if projects.is_empty() {
                println!("No projects yet. Create one with 'vortex project new'.");
                return;
            }
            println!("| ID | Name | Ratio | Views | Last edited |");
            println!("|----|------|-------|------:|-------------|");
            for p in projects {
                println!(
                    "| {} | {} | {} | {} | {} |",
                    p.id,
                    p.name.replace('|', "\\|"),
                    p.aspect_ratio,
                    p.views,
                    p.last_edited.format("%Y-%m-%d %H:%M")
                );
            }
        }
    }
}

// ============================================================================
// config / schema / version
// ============================================================================

fn run_config_show(global: &GlobalOpts) -> CmdResult {
    let runtime = load_runtime(global)?;
    let settings_path = runtime
        .settings_path
        .path
        .as_ref()
        .map(|p| p.display().to_string());
    let data_root = runtime.data_root().display().to_string();

    match global.format {
        OutputFormat::Json => print_json(&envelope(
            "config show",
            json!({
                "settings": {
                    "path": settings_path,
                    "source": runtime.settings_path.source.to_string(),
                    "using_defaults": runtime.settings_path.path.is_none(),
                },
                "data_dir": {
                    "path": data_root,
                    "source": runtime.data_dir.source.to_string(),
                },
                "owner": {
                    "id": runtime.owner,
                    "source": runtime.owner_source.to_string(),
                },
                "values": runtime.settings,
            }),
        )),
        OutputFormat::Summary => println!(
            "[config] settings={} data_dir={} owner={}",
            settings_path.as_deref().unwrap_or("built-in defaults"),
            data_root,
            runtime.owner
        ),
        OutputFormat::Exitcode => {}
        OutputFormat::Md => {
            println!("# vortex config show");
            println!();
            match &settings_path {
                Some(path) => println!(
                    "Settings: {} ({})",
                    path, runtime.settings_path.source
                ),
                None => println!("Settings: **built-in defaults** (no settings.json found)"),
            }
            println!("Data directory: {} ({})", data_root, runtime.data_dir.source);
            println!("Owner: {} ({})", runtime.owner, runtime.owner_source);
            println!();
            println!("## Embed");
            println!("- Copy: {}", runtime.settings.embed.copy);
            println!("- Minify: {}", runtime.settings.embed.minify);
            println!(
                "- Instructions: {}",
                runtime.settings.embed.include_instructions
            );
            println!("- Video MIME: {}", runtime.settings.embed.video_mime);
            println!();
            println!("## Player defaults");
            let defaults = &runtime.settings.player_defaults;
            println!("- Name: {}", defaults.display_name);
            println!("- Video: {}", defaults.video_source);
            println!("- Aspect ratio: {}", defaults.aspect_ratio);
            println!("- Accent color: {}", defaults.accent_color);
            println!("- Curve exponent: {}", defaults.retention_curve_exponent);
            println!("- Content delay: {}", delay_label(defaults));
        }
    }
    Ok(ExitCode::Clean)
}

fn run_schema(global: &GlobalOpts, args: &SchemaArgs) -> CmdResult {
    if global.format.is_silent() {
        return Ok(ExitCode::Clean);
    }

    if args.list {
        let available = schema::available_schemas();
        match global.format {
            OutputFormat::Json => {
                let types: Vec<_> = available
                    .iter()
                    .map(|(name, description)| json!({"name": name, "description": description}))
                    .collect();
                print_json(&envelope("schema", json!({ "types": types })));
            }
            _ => {
                for (name, description) in available {
                    println!("{:<16} {}", name, description);
                }
            }
        }
        return Ok(ExitCode::Clean);
    }

    match &args.name {
        Some(name) => {
            let schema = schema::generate_schema(name).ok_or_else(|| Error::Validation {
                field: "type".to_string(),
                message: format!("unknown schema type {:?}; run 'vortex schema --list'", name),
            })?;
            print_json(&schema);
        }
        None => print_json(&json!(schema::generate_all_schemas())),
    }
    Ok(ExitCode::Clean)
}

fn print_version(global: &GlobalOpts) {
    let version_info = json!({
        "schema_version": SCHEMA_VERSION,
        "vortex_version": env!("CARGO_PKG_VERSION"),
        "rust_version": env!("CARGO_PKG_RUST_VERSION"),
    });

    match global.format {
        OutputFormat::Json => print_json(&version_info),
        OutputFormat::Exitcode => {}
        _ => {
            println!("vortex {}", env!("CARGO_PKG_VERSION"));
            println!("schema version: {}", SCHEMA_VERSION);
        }
    }
}
