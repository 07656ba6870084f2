//! Crewplan - AI project planner for your terminal.
//!
//! Analyze a project description, generate tasks, and assign them to your
//! team with a hosted generative-language model.

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crewplan::team::{
    Experience, MemberProfile, RosterStore, TeamOverview, DEFAULT_AVAILABILITY, DEFAULT_ROLE,
};
use crewplan::workflow::WorkflowSession;
use crewplan::{tui, App, Config, GeminiProvider};

/// AI project planner for your terminal
#[derive(Parser)]
#[command(name = "crewplan")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive planner (default)
    Run,

    /// Analyze a project description
    Analyze {
        /// Project description text
        description: Option<String>,

        /// Read the description from a file
        #[arg(short, long, conflicts_with = "description")]
        file: Option<PathBuf>,
    },

    /// Run the full pipeline: analyze, generate tasks, optionally assign
    Plan {
        /// Project description text
        description: Option<String>,

        /// Read the description from a file
        #[arg(short, long, conflicts_with = "description")]
        file: Option<PathBuf>,

        /// Also assign the generated tasks to the team
        #[arg(short, long)]
        assign: bool,
    },

    /// Manage the team roster
    Team {
        /// Team operation
        #[command(subcommand)]
        operation: TeamOperation,
    },

    /// Show configuration
    Config {
        /// Show config file path
        #[arg(long)]
        path: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Team roster operations.
#[derive(Subcommand)]
enum TeamOperation {
    /// Add a team member
    Add {
        /// Member name (must be unique)
        name: String,

        /// Comma-separated skills
        #[arg(short, long)]
        skills: String,

        /// Experience level (junior, mid-level, senior)
        #[arg(short, long, default_value = "junior")]
        experience: String,

        /// Role/position
        #[arg(short, long, default_value = DEFAULT_ROLE)]
        role: String,

        /// Availability in hours per week (0-40)
        #[arg(
            short,
            long,
            default_value_t = DEFAULT_AVAILABILITY,
            value_parser = clap::value_parser!(u32).range(0..=40)
        )]
        availability: u32,
    },

    /// Remove a team member
    Remove {
        /// Member name
        name: String,
    },

    /// List team members
    List {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show team statistics and the skills matrix
    Overview,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load a local .env before the model credential is read.
    dotenvy::dotenv().ok();

    // Setup logging
    let filter = if cli.verbose { EnvFilter::new("debug") } else { EnvFilter::new("warn") };

    tracing_subscriber::registry().with(fmt::layer().with_target(false)).with(filter).init();

    // Handle commands
    match cli.command {
        None | Some(Commands::Run) => cmd_run()?,
        Some(Commands::Analyze { description, file }) => cmd_analyze(description, file)?,
        Some(Commands::Plan { description, file, assign }) => {
            cmd_plan(description, file, assign)?;
        }
        Some(Commands::Team { operation }) => cmd_team(&operation)?,
        Some(Commands::Config { path }) => cmd_config(path)?,
        Some(Commands::Completions { shell }) => cmd_completions(shell),
    }

    Ok(())
}

/// Open the interactive TUI planner.
fn cmd_run() -> Result<()> {
    let app = App::new()?;
    tui::run_tui(app)
}

/// Run the analyze stage once and print the result.
fn cmd_analyze(description: Option<String>, file: Option<PathBuf>) -> Result<()> {
    let description = read_description(description, file)?;
    let config = Config::load()?;
    let provider = build_provider(&config)?;

    let rt = tokio::runtime::Runtime::new()?;
    let mut session = WorkflowSession::new();

    println!("Analyzing project...\n");
    let analysis = rt.block_on(session.analyze(&provider, &description))?;
    println!("{analysis}");

    Ok(())
}

/// Chain the stages through one session: analyze, tasks, optionally assign.
fn cmd_plan(description: Option<String>, file: Option<PathBuf>, assign: bool) -> Result<()> {
    let description = read_description(description, file)?;
    let config = Config::load()?;
    let provider = build_provider(&config)?;

    let rt = tokio::runtime::Runtime::new()?;
    let mut session = WorkflowSession::new();

    println!("Analyzing project...\n");
    let analysis = rt.block_on(session.analyze(&provider, &description))?;
    println!("## Project Analysis\n\n{analysis}\n");

    println!("Generating tasks...\n");
    let tasks = rt.block_on(session.generate_tasks(&provider))?;
    println!("## Tasks\n\n{tasks}");

    if assign {
        let store = open_store(&config)?;
        println!("\nMatching tasks to team members...\n");
        let assignments = rt.block_on(session.assign(&provider, store.roster()))?;
        println!("{assignments}");
    }

    Ok(())
}

/// Handle team roster operations.
fn cmd_team(operation: &TeamOperation) -> Result<()> {
    let config = Config::load()?;
    let mut store = open_store(&config)?;

    match operation {
        TeamOperation::Add { name, skills, experience, role, availability } => {
            let experience: Experience =
                experience.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            let skills = MemberProfile::parse_skills(skills);
            if skills.is_empty() {
                anyhow::bail!("please provide at least one skill");
            }

            let profile = MemberProfile::new(skills, experience)
                .with_role(role.clone())
                .with_availability(*availability);
            store.add(name, profile)?;
            println!("Added {name} to the team ({} members)", store.len());
        }

        TeamOperation::Remove { name } => {
            store.remove(name)?;
            println!("Removed {name} from the team ({} members)", store.len());
        }

        TeamOperation::List { format } => match format.as_str() {
            "json" => println!("{}", store.to_pretty_json()),
            _ => {
                if store.is_empty() {
                    println!("No team members yet - add one with `crewplan team add`");
                }
                for (name, profile) in store.roster() {
                    println!(
                        "{name}  {} ({}, {}h/week)",
                        profile.role(),
                        profile.experience,
                        profile.availability()
                    );
                    println!("    {}", profile.skills.join(", "));
                }
            }
        },

        TeamOperation::Overview => {
            let overview = TeamOverview::from_roster(store.roster());
            println!("Team Size:      {}", overview.member_count);
            println!("Total Skills:   {}", overview.distinct_skill_count());
            println!("Senior Members: {}", overview.senior_count);

            if !overview.matrix.is_empty() {
                println!("\nTeam Skills Matrix");
                print_skills_matrix(&overview);
            }
        }
    }

    Ok(())
}

/// Print the member × skill presence matrix as a text table.
fn print_skills_matrix(overview: &TeamOverview) {
    let name_width = overview
        .matrix
        .iter()
        .map(|row| row.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Member".len());

    print!("{:<name_width$}", "Member");
    for skill in &overview.skills {
        print!("  {skill}");
    }
    println!();

    for row in &overview.matrix {
        print!("{:<name_width$}", row.name);
        for (skill, has) in overview.skills.iter().zip(&row.has_skill) {
            let mark = if *has { "✓" } else { "" };
            print!("  {mark:<width$}", width = skill.chars().count());
        }
        println!();
    }
}

/// Show configuration or its path.
fn cmd_config(path: bool) -> Result<()> {
    if path {
        match Config::config_dir() {
            Some(dir) => println!("{}", dir.join("config.toml").display()),
            None => println!("Could not determine config directory"),
        }
        return Ok(());
    }

    let config = Config::load()?;
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

/// Generate shell completions.
fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "crewplan", &mut io::stdout());
}

// Helpers

/// Resolve the project description from the argument or a file.
fn read_description(description: Option<String>, file: Option<PathBuf>) -> Result<String> {
    match (description, file) {
        (Some(description), _) => Ok(description),
        (None, Some(path)) => Ok(std::fs::read_to_string(path)?),
        (None, None) => anyhow::bail!("provide a project description or --file <path>"),
    }
}

/// Construct the configured model provider.
fn build_provider(config: &Config) -> Result<GeminiProvider> {
    let provider = GeminiProvider::new()
        .map_err(|e| anyhow::anyhow!("Failed to initialize model provider: {e}"))?;
    Ok(provider.with_model(config.model.model.clone()))
}

/// Open the roster and run the additive migration pass.
fn open_store(config: &Config) -> Result<RosterStore> {
    let mut store = RosterStore::open(&config.team.data_file);
    store.migrate()?;
    Ok(store)
}
