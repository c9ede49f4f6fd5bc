use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use propsort::config::{FsProbe, SettingsStore, UserSettings};
use propsort::diagnostics::TracingSink;
use propsort::{ConfigLoader, Document};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn, Level};
use tracing_subscriber::{fmt, EnvFilter};

/// Resolve CSS property ordering options for stylesheets
///
/// Looks for the closest stylelint configuration enabling the ordering
/// plugin and falls back to the user settings file otherwise.
#[derive(Parser, Debug)]
#[command(name = "propsort")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Settings file (default: $PROPSORT_SETTINGS or the platform config dir)
    #[arg(short, long, global = true)]
    settings: Option<PathBuf>,

    /// Override a setting, e.g. --set sorting.strategy=alphabetical
    #[arg(long = "set", value_name = "KEY=VALUE", global = true)]
    overrides: Vec<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn", global = true)]
    log_level: String,

    /// Log to file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve the options applying to a stylesheet
    Resolve {
        /// Stylesheet path or document URI (file:, untitled:, ...)
        target: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Print only the rule setting passed to the linter
        #[arg(long)]
        rule: bool,
    },
    /// Print the configuration file found from a directory upwards
    Discover {
        /// Directory to start from
        dir: PathBuf,
    },
    /// Check whether a configuration file enables the ordering plugin
    Detect {
        /// Configuration file
        config: PathBuf,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Human,
}

fn setup_logging(log_level: &str, log_file: Option<PathBuf>) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let subscriber = fmt().with_env_filter(filter).with_target(true);

    if let Some(log_path) = log_file {
        let file = std::fs::File::create(&log_path)
            .with_context(|| format!("Failed to create log file {}", log_path.display()))?;
        subscriber.with_writer(file).with_ansi(false).init();
    } else {
        subscriber.with_writer(std::io::stderr).init();
    }

    Ok(())
}

fn load_settings(
    explicit: Option<&Path>,
    overrides: &[String],
) -> Result<Option<Arc<dyn SettingsStore>>> {
    let mut settings = match explicit {
        Some(path) => Some(
            UserSettings::load(&FsProbe, path)
                .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        ),
        None => match UserSettings::discover(&FsProbe, Arc::new(TracingSink)) {
            Ok(Some((path, settings))) => {
                debug!("Using settings file {}", path.display());
                Some(settings)
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Ignoring settings file: {}", e);
                None
            }
        },
    };

    if !overrides.is_empty() {
        let store = settings.get_or_insert_with(UserSettings::default);
        for assignment in overrides {
            store
                .apply_override(assignment)
                .with_context(|| format!("Invalid --set '{}'", assignment))?;
        }
    }

    Ok(settings.map(|s| Arc::new(s) as Arc<dyn SettingsStore>))
}

/// Relative paths are taken from the current directory
fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(std::env::current_dir()
        .context("Failed to read current directory")?
        .join(path))
}

/// An existing file always wins over reading the target as a URI, so
/// `a:b.css` in the current directory stays a file.
fn parse_target(target: &str) -> Result<Document> {
    let path = absolutize(Path::new(target))?;
    if !path.exists() && target.contains(':') {
        if let Ok(document) = Document::parse(target) {
            return Ok(document);
        }
    }
    Ok(Document::from_path(&path)?)
}

fn main() -> Result<()> {
    let args = Args::parse();

    setup_logging(&args.log_level, args.log_file)?;

    let settings = load_settings(args.settings.as_deref(), &args.overrides)?;
    let loader = ConfigLoader::with_settings(settings);

    match args.command {
        Command::Resolve {
            target,
            format,
            rule,
        } => {
            let document = parse_target(&target)?;
            let resolved = loader.resolve(Some(&document));

            if rule {
                println!("{}", serde_json::to_string(&resolved.options.rule_argument())?);
            } else if format == OutputFormat::Human {
                println!("source: {}", resolved.source);
                if let Some(path) = &resolved.config_path {
                    println!("config: {}", path.display());
                }
                println!("strategy: {}", resolved.options.strategy);
                println!(
                    "emptyLinesBetweenGroups: {}",
                    resolved.options.empty_lines_between_groups
                );
                println!(
                    "sortPropertiesWithinGroups: {}",
                    resolved.options.sort_properties_within_groups
                );
            } else {
                println!("{}", serde_json::to_string_pretty(&resolved)?);
            }
        }
        Command::Discover { dir } => {
            let dir = absolutize(&dir)?;
            match loader.discovery().find(&dir) {
                Some(descriptor) => println!("{}", descriptor.path.display()),
                None => {
                    eprintln!("No configuration file found from {}", dir.display());
                    std::process::exit(1);
                }
            }
        }
        Command::Detect { config } => {
            let config = absolutize(&config)?;
            println!("{}", loader.detector().detect(&config));
        }
    }

    Ok(())
}
