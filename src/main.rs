use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use diagnostico::answers::{clamp_rating, FileStore};
use diagnostico::catalog::validate_catalog;
use diagnostico::session::UnknownQuestion;
use diagnostico::{detail, notice, Session};

const EXIT_SUCCESS: i32 = 0;
const EXIT_USAGE: i32 = 1;
const EXIT_STORAGE: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ResultsFormat {
    Table,
    Tsv,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Answer the questionnaire interactively (default if no subcommand)
    Tui,
    /// Print every question with its current rating
    Questions,
    /// Rate one question (1-5, out-of-range values are clamped)
    Rate {
        /// Question id as shown by `questions`, e.g. finanzas-0
        question_id: String,
        /// Rating from 1 (strongly disagree) to 5 (strongly agree)
        #[arg(allow_hyphen_values = true)]
        rating: i64,
    },
    /// Compute and print the diagnostic
    Results {
        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: ResultsFormat,
    },
    /// Show when answers were last saved
    Status,
    /// Delete all saved answers
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Write a starter config file with the built-in catalog
    Init {
        /// Overwrite an existing file without asking
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "diagnostico")]
#[command(about = "Business self-assessment questionnaire", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/diagnostico/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Directory for saved answers (overrides the config file)
    #[arg(long, global = true)]
    data_dir: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version also land here
            let code = if e.use_stderr() { EXIT_USAGE } else { EXIT_SUCCESS };
            let _ = e.print();
            std::process::exit(code);
        }
    };
    diagnostico::notices::set_verbose(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Tui);
    let config_path = cli.config.map(PathBuf::from);

    // Init only writes a file; it must work even when the current config is broken
    if let Commands::Init { force } = command {
        match diagnostico::config::run_init(config_path, force) {
            Ok(Some(path)) => println!("Configuración escrita en {}", path.display()),
            Ok(None) => println!("Cancelado."),
            Err(e) => {
                eprintln!("Config error: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
        }
        std::process::exit(EXIT_SUCCESS);
    }

    detail!(
        "Config: {}",
        config_path
            .clone()
            .unwrap_or_else(diagnostico::config::get_config_path)
            .display()
    );

    // Load config
    let config = match diagnostico::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate catalog at startup
    let catalog = config.catalog();
    if let Err(errors) = validate_catalog(catalog.categories()) {
        eprintln!("Catalog config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let data_dir = cli
        .data_dir
        .map(PathBuf::from)
        .unwrap_or_else(|| config.data_dir());

    detail!(
        "Catalog: {} categories, {} questions",
        catalog.len(),
        catalog.question_count()
    );
    detail!("Data dir: {}", data_dir.display());

    if let Err(e) = diagnostico::config::ensure_dir(&data_dir) {
        eprintln!("Storage error: {:#}", e);
        std::process::exit(EXIT_STORAGE);
    }

    let mut session = Session::open(catalog, FileStore::new(data_dir));
    detail!("{} answers loaded", session.answers().len());

    let use_colors = diagnostico::output::should_use_colors();

    match command {
        Commands::Tui => {
            let app = diagnostico::tui::App::new(session);
            if let Err(e) = diagnostico::tui::run_tui(app).await {
                eprintln!("Terminal error: {:#}", e);
                std::process::exit(EXIT_STORAGE);
            }
        }
        Commands::Questions => {
            println!(
                "{}",
                diagnostico::output::format_questionnaire(
                    session.catalog(),
                    session.answers(),
                    use_colors
                )
            );
        }
        Commands::Rate {
            question_id,
            rating,
        } => {
            match session.rate(&question_id, clamp_rating(rating)) {
                Ok(stored) => {
                    if i64::from(stored) != rating {
                        notice!("Rating {} clamped to {}", rating, stored);
                    }
                    println!("{} = {}", question_id, stored);
                    println!(
                        "{}",
                        diagnostico::output::format_last_saved(session.last_saved())
                    );
                }
                Err(e) if e.downcast_ref::<UnknownQuestion>().is_some() => {
                    eprintln!("{}. Run `diagnostico questions` to list ids.", e);
                    std::process::exit(EXIT_USAGE);
                }
                Err(e) => {
                    eprintln!("Storage error: {:#}", e);
                    std::process::exit(EXIT_STORAGE);
                }
            }
        }
        Commands::Results { format } => {
            let (_scores, overall) = session.results();
            match format {
                ResultsFormat::Table => println!(
                    "{}",
                    diagnostico::output::format_results(&overall, use_colors)
                ),
                ResultsFormat::Tsv => {
                    let tsv = diagnostico::output::format_results_tsv(&overall);
                    if !tsv.is_empty() {
                        println!("{}", tsv);
                    }
                }
            }
        }
        Commands::Status => {
            println!(
                "{}",
                diagnostico::output::format_last_saved(session.last_saved())
            );
            println!(
                "{}/{} preguntas respondidas",
                session.answered_count(),
                session.catalog().question_count()
            );
        }
        Commands::Reset { yes } => {
            let confirmed = session.reset(|| {
                if yes {
                    Ok(true)
                } else {
                    diagnostico::prompt::prompt_yes_no(
                        "¿Seguro que quieres resetear todas las respuestas?",
                        false,
                    )
                }
            });
            match confirmed {
                Ok(true) => println!("Respuestas reseteadas."),
                Ok(false) => println!("Cancelado."),
                Err(e) => {
                    eprintln!("Reset failed: {:#}", e);
                    std::process::exit(EXIT_STORAGE);
                }
            }
        }
        // Handled before the config was loaded
        Commands::Init { .. } => {}
    }

    std::process::exit(EXIT_SUCCESS);
}
