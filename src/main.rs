//! dirs-engine - Digital Intelligence Readiness Score
//!
//! Command-line driver for the DIRS assessment: it plays the wizard (answer
//! questions, fill basic info, submit), the results page and the progress
//! dashboard on top of the library's scoring engine and local store.

use clap::Parser;
use serde::Serialize;
use tracing::{debug, error};

use dirs_engine::assessment::onboarding::{COMMITMENT_OPTIONS, FOCUS_OPTIONS, ROLE_OPTIONS};
use dirs_engine::assessment::{
    build_onboarding, likert_label, questions_for, score_answers, AGE_RANGES, CHAT_QUESTIONS,
    LIKERT_LABELS, QUESTIONS_PER_PILLAR,
};
use dirs_engine::cli::{Cli, Commands, ConfigSubcommand, OnboardSubcommand};
use dirs_engine::config::{self, DirsConfig};
use dirs_engine::dashboard::DashboardView;
use dirs_engine::error::{Error, Result};
use dirs_engine::storage::{Absent, DirsStore, FileStore};
use dirs_engine::types::{AnswerSet, Pillar, ResultsRecord};
use dirs_engine::{logging, version};

type Store = DirsStore<FileStore>;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        error!("{}", e.format_for_log());
        eprint!("{}", e.format_for_terminal());
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<()> {
    // Commands that must work without a valid configuration
    match &cli.command {
        Commands::Version => {
            version::print_version();
            return Ok(());
        }
        Commands::Config {
            subcommand: ConfigSubcommand::Init { path, force },
        } => {
            logging::init_simple(tracing::Level::WARN)?;
            let written = config::init_config(path.as_deref(), *force)?;
            println!("Configuration file created: {}", written.display());
            return Ok(());
        }
        _ => {}
    }

    let mut config = DirsConfig::load(cli.config.as_deref())?;
    if let Some(dir) = &cli.data_dir {
        config.storage.data_dir = dir.clone();
        config.expand_paths();
        config.validate()?;
    }

    let _log_guards = logging::init_logging(&config.logging, cli.verbose, cli.quiet)?;

    let build = version::build_info();
    debug!(
        version = %build.full_version(),
        data_dir = %config.storage.data_dir,
        "Starting dirs-engine"
    );

    let store = DirsStore::new(FileStore::new(config.data_dir()));

    match cli.command {
        Commands::Questions { pillar } => show_questions(pillar),
        Commands::Answer {
            pillar,
            question,
            value,
        } => answer(&store, pillar, question, value)?,
        Commands::Info {
            first_name,
            age_range,
            location,
        } => update_info(&store, first_name, age_range, location)?,
        Commands::Status => show_status(&store),
        Commands::Submit { json } => submit(&store, json)?,
        Commands::Results { json } => {
            let results = store.results().map_err(|_| Error::NoResults)?;
            if json {
                print_json(&results)?;
            } else {
                print_results(&results);
            }
        }
        Commands::History { json } => show_history(&store, json)?,
        Commands::Checkpoint { label } => checkpoint(&store, &label)?,
        Commands::Dashboard { json, demo } => show_dashboard(&store, json, demo)?,
        Commands::Onboard { subcommand } => handle_onboard_command(&store, subcommand)?,
        Commands::Reset { all } => {
            if all {
                store.reset_all()?;
                println!("All DIRS data cleared.");
            } else {
                store.clear_assessment()?;
                println!("Assessment answers cleared.");
            }
        }
        Commands::Config { subcommand } => handle_config_command(&config, subcommand)?,
        Commands::Version => version::print_version(),
    }

    Ok(())
}

// ─────────────────────────────────────────────────────────────────
// Wizard
// ─────────────────────────────────────────────────────────────────

fn show_questions(filter: Option<Pillar>) {
    let pillars: Vec<Pillar> = match filter {
        Some(p) => vec![p],
        None => Pillar::all().to_vec(),
    };

    for pillar in pillars {
        println!("{} ({})", pillar.label(), pillar.slug());
        for (i, question) in questions_for(pillar).iter().enumerate() {
            println!("  {}. {}", i + 1, question);
        }
        println!();
    }

    let scale: Vec<String> = LIKERT_LABELS
        .iter()
        .map(|(value, label)| format!("{} = {}", value, label))
        .collect();
    println!("Scale: {}", scale.join(", "));
}

fn answer(store: &Store, pillar: Pillar, question: usize, value: i32) -> Result<()> {
    let index = question.checked_sub(1).ok_or_else(|| {
        Error::invalid_answer(format!(
            "question number must be between 1 and {}",
            QUESTIONS_PER_PILLAR
        ))
    })?;

    let mut answers = store.assessment().unwrap_or_default();
    answers.set_answer(pillar, index, value)?;
    store.set_assessment(&answers)?;

    println!(
        "{} Q{}: {} ({})",
        pillar.label(),
        question,
        value,
        likert_label(value).unwrap_or("?")
    );
    println!(
        "{}/{} answered for {}",
        answers.answered_count(pillar),
        QUESTIONS_PER_PILLAR,
        pillar.label()
    );
    Ok(())
}

/// Blank input clears a field.
fn optional_text(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Accept "13-18" for the canonical "13–18".
fn match_age_range(value: &str) -> Result<String> {
    let normalize = |s: &str| s.replace('–', "-").to_lowercase();
    let wanted = normalize(value.trim());
    AGE_RANGES
        .iter()
        .find(|&&range| normalize(range) == wanted)
        .map(|range| range.to_string())
        .ok_or_else(|| {
            Error::invalid_answer(format!(
                "age range '{}' must be one of: {}",
                value,
                AGE_RANGES.join(", ")
            ))
        })
}

fn update_info(
    store: &Store,
    first_name: Option<String>,
    age_range: Option<String>,
    location: Option<String>,
) -> Result<()> {
    let mut answers = store.assessment().unwrap_or_default();
    let info = &mut answers.basic_info;

    if let Some(name) = first_name {
        info.first_name = optional_text(name);
    }
    if let Some(range) = age_range {
        info.age_range = match optional_text(range) {
            Some(r) => Some(match_age_range(&r)?),
            None => None,
        };
    }
    if let Some(place) = location {
        info.location = optional_text(place);
    }

    store.set_assessment(&answers)?;
    print_basic_info(&answers);
    Ok(())
}

fn print_basic_info(answers: &AnswerSet) {
    let info = &answers.basic_info;
    let show = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
    println!("First name: {}", show(&info.first_name));
    println!("Age range:  {}", show(&info.age_range));
    println!("Location:   {}", show(&info.location));
}

fn show_status(store: &Store) {
    let answers = match store.assessment() {
        Ok(answers) => answers,
        Err(Absent::Missing) => {
            println!("No answers yet. Run 'dirs-engine questions' to begin.");
            return;
        }
        Err(reason) => {
            println!("Stored answers could not be read ({}). Starting fresh.", reason);
            AnswerSet::new()
        }
    };

    for pillar in Pillar::all() {
        let count = answers.answered_count(*pillar);
        let mark = if answers.is_pillar_complete(*pillar) { "done" } else { "" };
        println!(
            "  {:<22} {}/{} {}",
            pillar.label(),
            count,
            QUESTIONS_PER_PILLAR,
            mark
        );
    }

    match answers.first_incomplete() {
        Some(pillar) => println!("\nNext: {} ({})", pillar.label(), pillar.slug()),
        None => println!("\nAssessment complete. Run 'dirs-engine submit' to score it."),
    }
}

fn submit(store: &Store, json: bool) -> Result<()> {
    let answers = store.assessment().unwrap_or_default();
    let results = score_answers(&answers, store.now())?;
    store.set_results(&results)?;

    if json {
        print_json(&results)?;
    } else {
        print_results(&results);
    }
    Ok(())
}

fn checkpoint(store: &Store, label: &str) -> Result<()> {
    let answers = store.assessment().unwrap_or_default();
    let scored = score_answers(&answers, store.now())?;

    match store.record_checkpoint(label, scored.overall_score, scored.pillar_scores)? {
        Some(progress) => {
            let delta = scored.overall_score - progress.baseline.overall_score;
            println!(
                "Checkpoint '{}' recorded: {} (baseline {}, {:+})",
                label, scored.overall_score, progress.baseline.overall_score, delta
            );
        }
        None => {
            println!("No baseline results yet, checkpoint not recorded.");
            println!("Run 'dirs-engine submit' first to set your baseline.");
        }
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────
// Results and progress
// ─────────────────────────────────────────────────────────────────

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| Error::Internal(format!("Failed to encode JSON: {}", e)))?;
    println!("{}", json);
    Ok(())
}

fn join_labels(pillars: &[Pillar]) -> String {
    pillars
        .iter()
        .map(|p| p.label())
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_results(results: &ResultsRecord) {
    println!(
        "DIRS results ({})",
        results.timestamp.format("%Y-%m-%d %H:%M UTC")
    );
    println!();
    println!("  Overall score:  {} / 100", results.overall_score);
    println!("  Readiness:      {}", results.readiness_level);
    println!("  Pathway:        {}", results.pathway);
    println!();
    println!("  Pillar scores:");
    for (pillar, score) in results.pillar_scores.iter() {
        println!("    {:<22} {:>3}", pillar.label(), score);
    }
    println!();
    println!("  Priority gaps:  {}", join_labels(&results.priority_gaps));
    println!();
    println!("  Recommended modules:");
    for (i, module) in results.recommended_modules.iter().enumerate() {
        println!("    {}. {}", i + 1, module);
    }
}

fn show_history(store: &Store, json: bool) -> Result<()> {
    let history = store.results_history();
    if json {
        return print_json(&history);
    }
    if history.is_empty() {
        println!("No results yet.");
        return Ok(());
    }
    for record in &history {
        println!(
            "{}  {:>3}  {:<12} gaps: {}",
            record.timestamp.format("%Y-%m-%d %H:%M"),
            record.overall_score,
            record.readiness_level,
            join_labels(&record.priority_gaps)
        );
    }
    Ok(())
}

fn show_dashboard(store: &Store, json: bool, demo: bool) -> Result<()> {
    let results = store.results().map_err(|_| Error::NoResults)?;
    let progress = store.progress().ok();
    let view = DashboardView::build(&results, progress.as_ref(), demo);

    if json {
        return print_json(&view);
    }

    println!("Baseline:  {}", view.baseline_score);
    if view.checkpoints.is_empty() {
        println!("No checkpoints yet. Run 'dirs-engine checkpoint <label>' after a module.");
    }
    for point in &view.checkpoints {
        let tag = if point.simulated { "  [demo data]" } else { "" };
        println!("{:<18} {}{}", point.label, point.overall_score, tag);
    }
    println!(
        "Latest:    {} ({:+})",
        view.latest_score,
        view.latest_score - view.baseline_score
    );
    println!();
    println!("  Pillar                 base  now  change");
    for d in &view.pillar_deltas {
        println!(
            "  {:<22} {:>4} {:>4}  {:+}",
            d.pillar.label(),
            d.baseline,
            d.latest,
            d.delta
        );
    }
    println!();
    println!("Next actions: {}", join_labels(&view.next_actions));
    Ok(())
}

// ─────────────────────────────────────────────────────────────────
// Onboarding and configuration
// ─────────────────────────────────────────────────────────────────

fn handle_onboard_command(store: &Store, subcommand: OnboardSubcommand) -> Result<()> {
    match subcommand {
        OnboardSubcommand::Save {
            focus,
            role,
            commitment,
            chat,
        } => {
            let record = build_onboarding(&focus, &role, &commitment, &chat)?;
            let saved = store.set_onboarding(record)?;
            println!(
                "Onboarding saved: {} / {} / {}",
                saved.focus_area, saved.role, saved.commitment
            );
        }
        OnboardSubcommand::Show { json } => match store.onboarding() {
            Ok(record) if json => print_json(&record)?,
            Ok(record) => {
                println!("Focus area: {}", record.focus_area);
                println!("Role:       {}", record.role);
                println!("Commitment: {}", record.commitment);
                for (id, answer) in record.chat_answers.iter().flatten() {
                    println!("  {}: {}", id, answer);
                }
            }
            Err(_) => println!("No onboarding saved."),
        },
        OnboardSubcommand::Options => {
            println!("Focus areas: {}", FOCUS_OPTIONS.join(" | "));
            println!("Roles:       {}", ROLE_OPTIONS.join(" | "));
            println!("Commitment:  {}", COMMITMENT_OPTIONS.join(" | "));
            println!();
            for q in CHAT_QUESTIONS.iter() {
                println!("--chat {}=...  {}", q.id, q.text);
                println!("    {}", q.options.join(" | "));
            }
        }
    }
    Ok(())
}

fn handle_config_command(config: &DirsConfig, subcommand: ConfigSubcommand) -> Result<()> {
    match subcommand {
        ConfigSubcommand::Show => println!("{}", config.to_toml()?),
        // Loading already validated it
        ConfigSubcommand::Validate => println!("Configuration is valid."),
        ConfigSubcommand::Init { .. } => {
            return Err(Error::Internal("config init handled before loading".into()))
        }
    }
    Ok(())
}
