use clap::{Arg, ArgAction, ArgMatches, Command, error::ErrorKind};
use tracing::info;
use tracing_subscriber::EnvFilter;

use telos::config::ConfigStore;
use telos::context::Context;
use telos::exit_codes;
use telos::ollama::{self, OllamaGenerator};
use telos::pipeline::{Pipeline, Suggestion};

fn cli() -> Command {
    Command::new("telos")
        .about("Turn a natural-language intent into a single shell command")
        .long_about(
            "telos converts an intent like \"find large files\" into one shell command \
             using a local model (Apple's on-device model or an Ollama server) and prints \
             it to stdout for the shell integration to pick up",
        )
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("intent")
                .help("The intent to convert, as free words")
                .num_args(1..),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Show the assembled prompt and backend diagnostics on stderr")
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("config")
                .about("Show or modify configuration")
                .subcommand(Command::new("show").about("Print the current configuration"))
                .subcommand(
                    Command::new("set")
                        .about("Set a configuration value (backend, model, url)")
                        .arg(Arg::new("key").required(true))
                        .arg(Arg::new("value").required(true)),
                ),
        )
        .subcommand(Command::new("models").about("List models available from the Ollama server"))
}

#[tokio::main]
async fn main() {
    std::process::exit(run().await);
}

async fn run() -> i32 {
    let matches = match cli().try_get_matches() {
        Ok(matches) => matches,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => exit_codes::OK,
                _ => exit_codes::USAGE,
            };
            let _ = e.print();
            return code;
        }
    };

    // Everything diagnostic goes to stderr; stdout is reserved for the
    // suggested command.
    let filter = if matches.get_flag("verbose") {
        EnvFilter::new("telos=debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match matches.subcommand() {
        Some(("config", sub)) => handle_config(sub),
        Some(("models", _)) => handle_models().await,
        _ => handle_generate(&matches).await,
    }
}

fn handle_config(matches: &ArgMatches) -> i32 {
    let store = match ConfigStore::open_default() {
        Ok(store) => store,
        Err(e) => {
            eprintln!("config error: {e}");
            return exit_codes::USAGE;
        }
    };

    match matches.subcommand() {
        None | Some(("show", _)) => {
            let config = store.load();
            println!("Current configuration:");
            println!("  backend: {}", config.backend);
            println!("  model:   {}", config.model);
            println!("  url:     {}", config.url);
            println!("\nConfig file: {}", store.path().display());
            exit_codes::OK
        }
        Some(("set", set_matches)) => {
            let key = set_matches.get_one::<String>("key").expect("required arg");
            let value = set_matches.get_one::<String>("value").expect("required arg");

            let mut config = store.load();
            if let Err(e) = config.set(key, value) {
                eprintln!("{e}");
                return exit_codes::USAGE;
            }
            if let Err(e) = store.save(&config) {
                eprintln!("failed to save config: {e}");
                return exit_codes::USAGE;
            }
            println!("Set {key} = {value}");
            exit_codes::OK
        }
        Some((other, _)) => {
            eprintln!("unknown config command: {other}");
            exit_codes::USAGE
        }
    }
}

async fn handle_models() -> i32 {
    let store = match ConfigStore::open_default() {
        Ok(store) => store,
        Err(e) => {
            eprintln!("config error: {e}");
            return exit_codes::USAGE;
        }
    };
    let config = store.load();

    match OllamaGenerator::from_config(&config).list_models().await {
        Ok(models) if models.is_empty() => {
            println!("No models installed. Pull one with: ollama pull llama3.2");
            exit_codes::OK
        }
        Ok(models) => {
            println!("Available models:\n");
            for model in &models {
                let current = if model.name == config.model
                    || model.name.starts_with(&format!("{}:", config.model))
                {
                    " (current)"
                } else {
                    ""
                };
                println!(
                    "  {} ({}){}",
                    model.name,
                    ollama::format_size(model.size),
                    current
                );
            }
            println!("\nSet the model with: telos config set model <name>");
            exit_codes::OK
        }
        Err(e) => {
            eprintln!("failed to list models: {e}");
            eprintln!("is the Ollama server running at {}?", config.url);
            exit_codes::BACKEND
        }
    }
}

async fn handle_generate(matches: &ArgMatches) -> i32 {
    let intent = matches
        .get_many::<String>("intent")
        .unwrap_or_default()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string();

    if intent.is_empty() {
        let mut cmd = cli();
        eprint!("{}", cmd.render_help());
        return exit_codes::USAGE;
    }

    let store = match ConfigStore::open_default() {
        Ok(store) => store,
        Err(e) => {
            eprintln!("config error: {e}");
            return exit_codes::USAGE;
        }
    };
    let config = store.load();

    info!(backend = %config.backend, "processing intent: {intent}");

    let context = Context::collect();
    let pipeline = Pipeline::from_config(&config);

    match pipeline.suggest(&intent, &context).await {
        Ok(Suggestion::Command(command)) => {
            println!("{command}");
            exit_codes::OK
        }
        Ok(Suggestion::Blocked) => exit_codes::BLOCKED,
        Err(e) => {
            eprintln!("model error: {e}");
            exit_codes::BACKEND
        }
    }
}
