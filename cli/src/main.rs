//! CLI entrypoint for localcrew
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use localcrew_application::{
    AnalysisPipeline, DirectoryScanner, GenerationService, InvocationLogger, PromptStore,
    ToolExecutorPort, WatchDirectoryInput, WatchDirectoryUseCase,
};
use localcrew_domain::{ConfigIssue, GenerationOptions, HashtagClassifier, OutputFormat, ToolCall};
use localcrew_infrastructure::{
    ConfigLoader, FileConfig, FsDirectoryScanner, FsPromptStore, JsonlInvocationLogger,
    OllamaGateway, ToolRegistry, default_registry,
};
use localcrew_presentation::{
    Cli, Command, ConsoleFormatter, OutputFormatter, ProgressReporter, WatchReporter,
};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    if cli.show_config {
        for line in ConfigLoader::config_sources(cli.config.as_deref()) {
            println!("{}", line);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    let issues = config.validate();
    if !issues.is_empty() {
        eprint!("{}", ConsoleFormatter::format_issues(&issues));
    }
    if ConfigIssue::has_errors(&issues) {
        bail!("Invalid configuration");
    }

    if !config.output.color {
        ConsoleFormatter::set_color(false);
    }
    let format: OutputFormat = cli
        .format
        .map(Into::into)
        .or(config.output.format)
        .unwrap_or_default();
    let formatter = ConsoleFormatter::new(format);

    info!("Starting localcrew");

    match cli.command {
        Command::Run {
            tool,
            content,
            file,
            variant,
        } => {
            let service = connect(&config).await?;
            let registry = build_registry(&config, service);
            if !registry.has_tool(&tool) {
                bail!(
                    "Unknown tool '{}'. Available: {}",
                    tool,
                    registry.available_tools().join(", ")
                );
            }

            let content = read_content(content, file.as_deref()).await?;
            let mut call = ToolCall::with_content(&tool, content);
            if let Some(variant) = variant {
                call = call.with_arg("variant", variant);
            }

            let progress = ProgressReporter::start(format!("Running {}", tool), cli.quiet);
            let result = registry.execute(&call).await;
            progress.finish();

            print!("{}", ensure_newline(formatter.format_result(&result)));
            Ok(if result.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }

        Command::Tools { schema } => {
            let service = Arc::new(GenerationService::new(
                Arc::new(gateway(&config)?),
                config.ollama.to_settings(),
            ));
            let registry = build_registry(&config, service);
            if schema {
                let schemas = registry.schemas();
                println!("{}", serde_json::to_string_pretty(&schemas)?);
            } else {
                print!("{}", formatter.format_tools(&registry.definitions()));
            }
            Ok(ExitCode::SUCCESS)
        }

        Command::Prompts { tool_type } => {
            let store = FsPromptStore::new(config.prompts.resolved_dir());
            let tool_types = match tool_type {
                Some(tool_type) => vec![tool_type],
                None => store.list_tool_types().into_iter().collect(),
            };
            let prompts: BTreeMap<_, _> = tool_types
                .into_iter()
                .map(|t| {
                    let variants = store.list_variants(&t);
                    (t, variants)
                })
                .collect();
            print!("{}", formatter.format_prompts(&prompts));
            Ok(ExitCode::SUCCESS)
        }

        Command::Models { family, export } => {
            let service = connect(&config).await?;

            if let Some(family) = family {
                let models = service.models_by_family(&family).await;
                let names: Vec<&str> = models.iter().map(|m| m.name.as_str()).collect();
                match format {
                    OutputFormat::Pretty => {
                        for name in names {
                            println!("{}", name);
                        }
                    }
                    _ => println!("{}", serde_json::to_string_pretty(&names)?),
                }
                return Ok(ExitCode::SUCCESS);
            }

            let progress = ProgressReporter::start("Querying models", cli.quiet);
            let report = service.models_report().await;
            progress.finish();

            if let Some(path) = export {
                let yaml = ConsoleFormatter::new(OutputFormat::Yaml).format_models(&report);
                tokio::fs::write(&path, yaml)
                    .await
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                eprintln!("Model report written to {}", path.display());
            }
            print!("{}", formatter.format_models(&report));
            Ok(ExitCode::SUCCESS)
        }

        Command::Generate {
            prompt,
            model,
            temperature,
            json,
        } => {
            let service = connect(&config).await?;
            let mut options = GenerationOptions::new();
            if let Some(temperature) = temperature {
                options = options.with_temperature(temperature);
            }

            let progress = ProgressReporter::start("Generating", cli.quiet);
            if json {
                let output = service
                    .generate_with_json_output(&prompt, model.as_deref(), &options)
                    .await;
                progress.finish();
                println!("{}", serde_json::to_string_pretty(&output)?);
                Ok(if output.is_parsed() {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::FAILURE
                })
            } else {
                let text = service.generate(&prompt, model.as_deref(), &options).await;
                progress.finish();
                println!("{}", text?);
                Ok(ExitCode::SUCCESS)
            }
        }

        Command::Embed { text, model } => {
            let service = connect(&config).await?;
            let embedding = service.get_embeddings(&text, model.as_deref()).await;
            if embedding.is_empty() {
                bail!("Embedding request failed (see log for details)");
            }
            println!("{}", serde_json::to_string(&embedding)?);
            Ok(ExitCode::SUCCESS)
        }

        Command::Watch {
            dir,
            interval,
            once,
        } => {
            let dir = dir.unwrap_or_else(|| config.watcher.resolved_dir());
            let poll_interval = interval
                .map(Duration::from_secs)
                .unwrap_or_else(|| config.watcher.poll_interval());
            if poll_interval.is_zero() {
                bail!("--interval must be at least 1 second");
            }

            let scanner = Arc::new(FsDirectoryScanner::new());
            let mut watcher = WatchDirectoryUseCase::new(
                WatchDirectoryInput::new(&dir).with_poll_interval(poll_interval),
                scanner.clone(),
                Arc::new(HashtagClassifier),
                Arc::new(WatchReporter::new(formatter)),
            );

            if once {
                scanner.ensure_dir(&dir).await?;
                let records = watcher.scan_once().await?;
                info!("Classified {} file(s)", records.len());
                return Ok(ExitCode::SUCCESS);
            }

            let cancel = CancellationToken::new();
            let on_signal = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    info!("Interrupt received, stopping watcher");
                    on_signal.cancel();
                }
            });

            watcher.run(cancel).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Install the tracing subscriber.
///
/// `RUST_LOG` wins over `-v`; with `--log-file` events are also written
/// (without ANSI colors) to that file.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            let name = path
                .file_name()
                .ok_or_else(|| anyhow!("--log-file must name a file"))?;
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}

fn gateway(config: &FileConfig) -> Result<OllamaGateway> {
    OllamaGateway::new(&config.ollama.base_url, config.ollama.request_timeout())
        .context("Failed to create Ollama client")
}

/// Build the generation service, detecting models when configured to
async fn connect(config: &FileConfig) -> Result<Arc<GenerationService>> {
    let gateway = Arc::new(gateway(config)?);
    let service = GenerationService::connect(gateway, config.ollama.to_settings()).await;
    Ok(Arc::new(service))
}

fn build_registry(config: &FileConfig, service: Arc<GenerationService>) -> ToolRegistry {
    let prompts: Arc<dyn PromptStore> = Arc::new(FsPromptStore::new(config.prompts.resolved_dir()));
    let pipeline = Arc::new(AnalysisPipeline::new(service, prompts));
    let registry = default_registry(pipeline);

    match config.logging.invocation_log_path() {
        Some(path) => match JsonlInvocationLogger::new(&path) {
            Some(logger) => {
                info!("Logging tool invocations to {}", logger.path().display());
                let logger: Arc<dyn InvocationLogger> = Arc::new(logger);
                registry.with_logger(logger)
            }
            None => {
                warn!("Invocation log disabled: cannot open {}", path.display());
                registry
            }
        },
        None => registry,
    }
}

/// Content from `--content`, `--file`, or stdin
async fn read_content(content: Option<String>, file: Option<&Path>) -> Result<String> {
    if let Some(content) = content {
        return Ok(content);
    }
    if let Some(path) = file {
        return tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()));
    }

    let mut buffer = String::new();
    tokio::io::stdin()
        .read_to_string(&mut buffer)
        .await
        .context("Failed to read content from stdin")?;
    if buffer.trim().is_empty() {
        bail!("No content given. Use --content, --file or pipe text on stdin.");
    }
    Ok(buffer)
}

fn ensure_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}
