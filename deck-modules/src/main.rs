//! deck-modules - Manage course modules from the command line
//!
//! Unix-style tool driving the module endpoints headlessly, for scripts
//! and quick fixes that do not warrant opening the dashboard.

use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use libcoursedeck::api::ModulesApi;
use libcoursedeck::types::{ModuleDraft, ModuleUpdate};
use libcoursedeck::{
    ApiError, Config, CoursedeckError, HttpApi, Module, Result, SessionStore,
};

#[derive(Parser, Debug)]
#[command(name = "deck-modules")]
#[command(version)]
#[command(about = "Manage course modules from the command line")]
#[command(long_about = "\
deck-modules - Manage course modules from the command line

DESCRIPTION:
    deck-modules is a Unix-style tool for managing the modules of a course
    without opening the dashboard. It drives the same course-service
    endpoints as deck-tui and shares its configuration and session cache.

COMMANDS:
    list     List the modules of a course
    add      Create a module in a course
    update   Update a module's title or content
    delete   Delete a module

USAGE EXAMPLES:
    # List modules for a course
    deck-modules list 64a1f2

    # List as JSON, filtered by title
    deck-modules list 64a1f2 --format json --filter intro

    # Create a module; prints the new module id
    deck-modules add 64a1f2 \"Week 1: Basics\"

    # Create a module with content from a pipe
    cat notes.md | deck-modules add 64a1f2 \"Week 1: Basics\"

    # Rename a module
    deck-modules update 6700bc --course 64a1f2 --title \"Week 1: Intro\"

    # Delete a module
    deck-modules delete 6700bc

IDENTITY:
    Requests are scoped to a teacher. The id comes from the session cache
    written by deck-tui's sign-in, or from --teacher when set.

CONFIGURATION:
    Configuration file: ~/.config/coursedeck/config.toml
    Session cache:      ~/.local/share/coursedeck/session.json

    Override with environment variables:
        COURSEDECK_CONFIG - Path to config file

EXIT CODES:
    0 - Success
    1 - Operation failed
    2 - Configuration or session error
    3 - Invalid input (bad format, empty title, nothing to update)

For more information, visit: https://github.com/coursedeck/coursedeck
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Teacher id override (default: the signed-in identity)
    #[arg(long, global = true, value_name = "ID")]
    teacher: Option<String>,

    /// Path to an alternate config file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable verbose logging to stderr
    #[arg(short, long, global = true)]
    #[arg(help = "Enable verbose logging to stderr (useful for debugging)")]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the modules of a course
    List {
        /// Course id to list modules for
        course_id: String,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Only show modules whose title contains this text
        #[arg(long)]
        filter: Option<String>,
    },

    /// Create a module in a course
    Add {
        /// Course id the module belongs to
        course_id: String,

        /// Module title
        title: String,

        /// Module content (reads from stdin when piped)
        #[arg(long)]
        content: Option<String>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Update a module's title or content
    Update {
        /// Module id to update
        module_id: String,

        /// Course id the module belongs to
        #[arg(long, value_name = "ID")]
        course: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New content (reads from stdin when piped)
        #[arg(long)]
        content: Option<String>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Delete a module
    Delete {
        /// Module id to delete
        module_id: String,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("error")
            .with_writer(std::io::stderr)
            .init();
    }

    // Run the main logic and handle errors
    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Load configuration
    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load_or_default()?,
    };

    let api = HttpApi::new(&config.api)?;
    let session = SessionStore::from_config(&config)?;
    let teacher = cli.teacher.as_deref();

    // Execute command
    match cli.command {
        Commands::List {
            course_id,
            format,
            filter,
        } => {
            cmd_list(&api, &session, teacher, &course_id, &format, filter.as_deref()).await?;
        }
        Commands::Add {
            course_id,
            title,
            content,
            format,
        } => {
            cmd_add(&api, &session, teacher, &course_id, &title, content, &format).await?;
        }
        Commands::Update {
            module_id,
            course,
            title,
            content,
            format,
        } => {
            cmd_update(&api, &session, teacher, &module_id, &course, title, content, &format)
                .await?;
        }
        Commands::Delete { module_id, format } => {
            cmd_delete(&api, &module_id, &format).await?;
        }
    }

    Ok(())
}

/// Resolve the teacher id: the --teacher flag wins, then the session cache.
fn resolve_teacher(flag: Option<&str>, session: &SessionStore) -> Result<String> {
    if let Some(id) = flag {
        return Ok(id.to_string());
    }
    match session.load()? {
        Some(info) => Ok(info.data.id),
        None => Err(ApiError::MissingTeacherId.into()),
    }
}

fn validate_format(format: &str) -> Result<()> {
    if format != "text" && format != "json" {
        return Err(CoursedeckError::InvalidInput(format!(
            "Invalid format '{}'. Must be 'text' or 'json'",
            format
        )));
    }
    Ok(())
}

/// Content from a pipe, when stdin is not a terminal. Used by add and
/// update when no --content flag was given.
fn read_piped_content() -> Result<Option<String>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|e| CoursedeckError::InvalidInput(format!("Failed to read stdin: {}", e)))?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        Ok(Some(trimmed.to_string()))
    }
}

/// List the modules of a course
async fn cmd_list(
    api: &HttpApi,
    session: &SessionStore,
    teacher: Option<&str>,
    course_id: &str,
    format: &str,
    filter: Option<&str>,
) -> Result<()> {
    validate_format(format)?;
    let teacher_id = resolve_teacher(teacher, session)?;

    let mut modules = api.modules_by_course(course_id, &teacher_id).await?;

    // Same narrowing the dashboard's filter box applies
    if let Some(needle) = filter {
        let needle = needle.trim().to_lowercase();
        if !needle.is_empty() {
            modules.retain(|m| m.title.to_lowercase().contains(&needle));
        }
    }

    if format == "json" {
        output_modules_json(&modules);
    } else {
        output_modules_text(&modules);
    }

    Ok(())
}

/// Output modules in the service's own record shape
fn output_modules_json(modules: &[Module]) {
    println!("{}", serde_json::to_string_pretty(modules).unwrap());
}

/// Output modules as pipe-separated lines: id | title | preview
fn output_modules_text(modules: &[Module]) {
    if modules.is_empty() {
        return;
    }

    for module in modules {
        let preview = module
            .content
            .as_deref()
            .and_then(|c| c.lines().next())
            .map(|line| truncate(line, 50))
            .unwrap_or_default();

        println!("{} | {} | {}", module.id, module.title, preview);
    }
}

/// Truncate to max chars with ellipsis
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}

/// Create a module in a course
async fn cmd_add(
    api: &HttpApi,
    session: &SessionStore,
    teacher: Option<&str>,
    course_id: &str,
    title: &str,
    content: Option<String>,
    format: &str,
) -> Result<()> {
    validate_format(format)?;

    let title = title.trim();
    if title.is_empty() {
        return Err(CoursedeckError::InvalidInput(
            "Title cannot be empty".to_string(),
        ));
    }

    let teacher_id = resolve_teacher(teacher, session)?;

    let content = match content {
        Some(text) => Some(text),
        None => read_piped_content()?,
    };

    let mut draft = ModuleDraft::new(course_id, &teacher_id, title);
    if let Some(text) = &content {
        draft = draft.with_content(text);
    }

    let created = api.create_module(&draft).await?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&created).unwrap());
    } else {
        // Bare id so scripts can capture it
        println!("{}", created.id);
    }

    Ok(())
}

/// Update a module's title or content
#[allow(clippy::too_many_arguments)]
async fn cmd_update(
    api: &HttpApi,
    session: &SessionStore,
    teacher: Option<&str>,
    module_id: &str,
    course_id: &str,
    title: Option<String>,
    content: Option<String>,
    format: &str,
) -> Result<()> {
    validate_format(format)?;

    let content = match content {
        Some(text) => Some(text),
        None => read_piped_content()?,
    };

    if title.is_none() && content.is_none() {
        return Err(CoursedeckError::InvalidInput(
            "Nothing to update. Pass --title, --content, or pipe content on stdin".to_string(),
        ));
    }

    if let Some(title) = &title {
        if title.trim().is_empty() {
            return Err(CoursedeckError::InvalidInput(
                "Title cannot be empty".to_string(),
            ));
        }
    }

    let teacher_id = resolve_teacher(teacher, session)?;

    let mut update = ModuleUpdate::new(course_id, &teacher_id);
    update.title = title.map(|t| t.trim().to_string());
    update.content = content;

    let updated = api.update_module(module_id, &update).await?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&updated).unwrap());
    }

    Ok(())
}

/// Delete a module
async fn cmd_delete(api: &HttpApi, module_id: &str, format: &str) -> Result<()> {
    validate_format(format)?;

    api.delete_module(module_id).await?;

    if format == "json" {
        println!("{}", serde_json::json!({ "deleted": module_id }));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_format_accepts_both_modes() {
        assert!(validate_format("text").is_ok());
        assert!(validate_format("json").is_ok());
        assert!(validate_format("yaml").is_err());
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 50), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
        // Multi-byte chars must not split
        assert_eq!(truncate("héllo wörld", 5), "héllo...");
    }

    #[test]
    fn test_resolve_teacher_prefers_flag() {
        let dir = tempfile::tempdir().unwrap();
        let session = SessionStore::new(dir.path().join("session.json"));

        let id = resolve_teacher(Some("t-override"), &session).unwrap();
        assert_eq!(id, "t-override");
    }

    #[test]
    fn test_resolve_teacher_fails_without_identity() {
        let dir = tempfile::tempdir().unwrap();
        let session = SessionStore::new(dir.path().join("session.json"));

        let err = resolve_teacher(None, &session).unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }
}
