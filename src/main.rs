//! rpcgen CLI entrypoint
//! Parses command-line arguments and dispatches to the library use cases.
#![deny(unsafe_code)]

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

use rpcgen::application::{
    ExportTemplatesUseCase, GenerateClientsUseCase, GenerateRequest, ListTemplatesUseCase,
    OutputService,
};
use rpcgen::config::GeneratorConfig;
use rpcgen::generation::{GenerationOptions, Target};
use rpcgen::infrastructure::generation::default_orchestrator;
use rpcgen::infrastructure::output::{FileSystemOutputService, StdoutOutputService};
use rpcgen::infrastructure::schema::CompositeSchemaLoader;
use rpcgen::infrastructure::templates::{EmbeddedTemplateExporter, EmbeddedTemplateRepository};
use rpcgen::runtime::RpcClient;
use rpcgen::schema::SchemaLoader;

#[derive(Parser)]
#[command(name = "rpcgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Generate clients from a service schema
    Generate {
        /// Path or URL to the schema (JSON or YAML)
        #[arg(long)]
        schema: Option<String>,
        /// Target to generate; repeat for several, all targets when omitted
        #[arg(long = "target")]
        targets: Vec<Target>,
        /// Directory the per-target folders are written to
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Name of the generated client type
        #[arg(long)]
        client_name: Option<String>,
        /// Go package clause
        #[arg(long)]
        go_package: Option<String>,
        /// Kotlin package clause
        #[arg(long)]
        kotlin_package: Option<String>,
        /// Directory of template overrides
        #[arg(long)]
        template_dir: Option<PathBuf>,
        /// Print the generated files instead of writing them
        #[arg(long)]
        stdout: bool,
        /// Config file, `./rpcgen.toml` when omitted and present
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Inspect or export the embedded templates
    Templates {
        #[command(subcommand)]
        action: TemplateActions,
    },
    /// Call a method of a running service
    Call {
        /// Path or URL to the schema (JSON or YAML)
        #[arg(long)]
        schema: String,
        /// Base URL of the service
        #[arg(long)]
        endpoint: String,
        /// Wire name of the method
        #[arg(long)]
        method: String,
        /// JSON object passed as the method input
        #[arg(long)]
        input: Option<String>,
        /// Bearer token
        #[arg(long)]
        token: Option<String>,
    },
}

#[derive(clap::Subcommand, Debug)]
pub enum TemplateActions {
    /// List the embedded templates
    List,
    /// Write the embedded templates to a directory
    Export {
        /// Destination directory
        dir: PathBuf,
    },
}

/// Flags of the generate command
struct GenerateArgs {
    schema: Option<String>,
    targets: Vec<Target>,
    output_dir: Option<PathBuf>,
    options: GenerationOptions,
    template_dir: Option<PathBuf>,
    stdout: bool,
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so `generate --stdout` output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Generate {
            schema,
            targets,
            output_dir,
            client_name,
            go_package,
            kotlin_package,
            template_dir,
            stdout,
            config,
        } => {
            generate(GenerateArgs {
                schema,
                targets,
                output_dir,
                options: GenerationOptions {
                    client_name,
                    go_package,
                    kotlin_package,
                },
                template_dir,
                stdout,
                config,
            })
            .await?
        }
        Commands::Templates { action } => match action {
            TemplateActions::List => {
                println!(
                    "{}",
                    ListTemplatesUseCase::new(EmbeddedTemplateRepository::new()).execute()
                );
            }
            TemplateActions::Export { dir } => {
                let count = ExportTemplatesUseCase::new(EmbeddedTemplateExporter::new())
                    .execute(&dir)
                    .with_context(|| format!("Failed to export templates to {}", dir.display()))?;
                println!("Exported {count} templates to {}", dir.display());
            }
        },
        Commands::Call {
            schema,
            endpoint,
            method,
            input,
            token,
        } => call(&schema, &endpoint, &method, input.as_deref(), token).await?,
    }
    Ok(())
}

/// Generate clients, merging flags over the config file
async fn generate(args: GenerateArgs) -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("Failed to read working directory")?;
    let config = GeneratorConfig::discover(args.config.as_deref(), &cwd)?;

    let schema = args
        .schema
        .or_else(|| config.schema.clone())
        .context("No schema given; pass --schema or set `schema` in rpcgen.toml")?;
    let targets = match (args.targets.is_empty(), config.targets.is_empty()) {
        (false, _) => args.targets,
        (true, false) => config.targets.clone(),
        (true, true) => Target::all(),
    };
    let output_dir = args
        .output_dir
        .or_else(|| config.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    let template_dir = args.template_dir.or_else(|| config.template_dir.clone());
    let options = config.options(args.options);

    info!(
        schema = %schema,
        targets = ?targets,
        output_dir = %output_dir.display(),
        "Generating clients"
    );

    let output: Arc<dyn OutputService> = if args.stdout {
        Arc::new(StdoutOutputService::new())
    } else {
        Arc::new(FileSystemOutputService::new())
    };
    let use_case = GenerateClientsUseCase::new(
        Arc::new(CompositeSchemaLoader::new()),
        Arc::new(default_orchestrator(template_dir)),
        output,
    );

    let response = use_case
        .execute(GenerateRequest {
            schema,
            targets,
            output_dir,
            options,
        })
        .await
        .context("Failed to generate clients")?;

    info!(
        service = %response.service_name,
        artifacts = response.artifacts_count(),
        output_path = %response.output_path.display(),
        "Successfully generated clients"
    );
    Ok(())
}

/// Call one method and print the decoded output
async fn call(
    schema: &str,
    endpoint: &str,
    method: &str,
    input: Option<&str>,
    token: Option<String>,
) -> anyhow::Result<()> {
    let service = CompositeSchemaLoader::new()
        .load(schema)
        .await
        .context("Failed to load schema")?;

    let input = input
        .map(serde_json::from_str::<serde_json::Value>)
        .transpose()
        .context("Failed to parse --input as JSON")?;

    let mut client = RpcClient::new(endpoint, Arc::new(service))?;
    if let Some(token) = token {
        client.set_auth_token(token);
    }

    info!(method, endpoint, "Calling method");
    let output = client.call(method, input).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
