//! Devconsole - Line-driven console over stdin
//!
//! Registers a handful of client settings, applies trailing process
//! arguments to them and then reads command lines until `:quit` or end of
//! input.

use std::{
    error::Error,
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};

use clap::Parser;
use devconsole::{
    Console, ConsoleError, ConsoleSettings, InvokeOutcome, TypedVariable, Vec2, Vec2i, Vec3,
    Vec3f, tracing_config,
};
use tracing::info;

const CLIENT_SETTINGS: &str = "ClientSettings";

#[derive(Parser)]
#[command(name = "devconsole")]
#[command(about = "Interactive developer console")]
struct Cli {
    /// Console settings file (TOML)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Directory config files are written to and loaded from
    #[arg(long, default_value = ".")]
    config_dir: PathBuf,

    /// Also write logs to daily files in this directory
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Variable overrides, e.g. `-- --c_resolution 1920,1080 --c_isFullScreen`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    overrides: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let _guard = match &cli.log_dir {
        Some(log_dir) => Some(tracing_config::init_with_file(log_dir)?),
        None => {
            tracing_config::init()?;
            None
        }
    };

    let settings = match &cli.settings {
        Some(path) => ConsoleSettings::load(path)?,
        None => ConsoleSettings::default(),
    };

    let mut console = Console::with_settings(settings);
    register_client_settings(&mut console)?;

    let applied = console.map_command_line_args(&cli.overrides);
    if applied > 0 {
        info!(applied, "Applied command line overrides");
    }

    run(&mut console, &cli.config_dir)
}

fn register_client_settings(console: &mut Console) -> Result<(), ConsoleError> {
    console.add_variable(
        TypedVariable::new("c_isFullScreen", false).in_config(CLIENT_SETTINGS, "Display"),
    )?;
    console.add_variable(
        TypedVariable::<Vec2i>::new("c_resolution", Vec2::new(1280, 720))
            .in_config(CLIENT_SETTINGS, "Display")
            .on_invoke(|invocation| {
                if let Some(size) = invocation.value.and_then(|value| value.as_vec2i()) {
                    if size.x <= 0 || size.y <= 0 {
                        return Err(format!("invalid resolution {size}").into());
                    }
                    info!(resolution = %size, "Resolution changed");
                }
                Ok(())
            }),
    )?;
    console.add_variable(
        TypedVariable::new("c_gamma", 2.2_f32).in_config(CLIENT_SETTINGS, "Display"),
    )?;
    console.add_variable(
        TypedVariable::<Vec3f>::new("cam_offset", Vec3::new(0.0, 1.5, -3.0))
            .in_config(CLIENT_SETTINGS, "Camera"),
    )?;
    console.register_command("echo", |invocation| {
        let line: Vec<String> = invocation.args.iter().map(ToString::to_string).collect();
        println!("{}", line.join(" "));
        Ok(())
    })?;

    Ok(())
}

/// Reads lines from stdin until `:quit` or end of input.
///
/// # Errors
/// Returns error if stdin or stdout fail.
fn run(console: &mut Console, config_dir: &Path) -> Result<(), Box<dyn Error>> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    print!("> ");
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();

        match trimmed.split_once(' ').unwrap_or((trimmed, "")) {
            (":quit", _) => break,
            (":list", _) => list(console),
            (":save", config) => match console.write_config(config.trim(), config_dir) {
                Ok(path) => println!("saved {}", path.display()),
                Err(e) => eprintln!("error: {e}"),
            },
            (":load", config) => match console.load_config(config.trim(), config_dir) {
                Ok(applied) => println!("loaded {applied} values"),
                Err(e) => eprintln!("error: {e}"),
            },
            _ => match console.parse_command(trimmed) {
                InvokeOutcome::Read(value) => println!("{value}"),
                InvokeOutcome::NotFound => eprintln!("unknown command"),
                InvokeOutcome::Empty | InvokeOutcome::Invoked { .. } | InvokeOutcome::Skipped => {}
            },
        }

        print!("> ");
        stdout.flush()?;
    }

    info!(lines = console.history().len(), "Console closed");

    Ok(())
}

fn list(console: &Console) {
    for name in console.command_names() {
        match console.get_variable(&name) {
            Some(variable) => println!("{variable} ({})", variable.value_kind()),
            None => println!("{name}"),
        }
    }
}
