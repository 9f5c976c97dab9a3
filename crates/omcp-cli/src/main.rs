//! `openapi-to-mcp` command line interface.
//!
//! Two modes: `convert` turns a spec file into a configuration file, and
//! `serve` hosts the HTTP conversion service.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use omcp_core::ConvertOptions;
use omcp_openapi::{Converter, SpecLoader};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Convert OpenAPI specifications into MCP server configurations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert an OpenAPI specification file into a configuration file
    Convert {
        /// Path to the OpenAPI specification (JSON or YAML)
        #[arg(long, short)]
        input: PathBuf,

        /// Path to the output configuration file
        #[arg(long, short)]
        output: PathBuf,

        /// Name of the generated MCP server
        #[arg(long, default_value = omcp_core::DEFAULT_SERVER_NAME)]
        server_name: String,

        /// Prefix for generated tool names
        #[arg(long, default_value = "")]
        tool_prefix: String,

        /// Output format
        #[arg(long, value_enum, default_value = "yaml")]
        format: OutputFormat,

        /// Path to an overlay template (YAML) merged onto the output
        #[arg(long)]
        template: Option<PathBuf>,

        /// Path to a file with preamble text for generated response docs
        #[arg(long)]
        response_template: Option<PathBuf>,

        /// Validate the specification before converting
        #[arg(long)]
        validate: bool,
    },

    /// Start the HTTP conversion service
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum OutputFormat {
    Yaml,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            server_name,
            tool_prefix,
            format,
            template,
            response_template,
            validate,
        } => run_convert(
            &input,
            &output,
            server_name,
            tool_prefix,
            format,
            template,
            response_template,
            validate,
        ),
        Commands::Serve { host, port } => serve(&host, port).await,
    }
}

#[allow(clippy::too_many_arguments)]
fn run_convert(
    input: &Path,
    output: &Path,
    server_name: String,
    tool_prefix: String,
    format: OutputFormat,
    template: Option<PathBuf>,
    response_template: Option<PathBuf>,
    validate: bool,
) -> Result<()> {
    let loader = SpecLoader::from_file(&input.to_string_lossy())
        .with_context(|| format!("failed to load OpenAPI spec from {}", input.display()))?;

    if validate {
        loader.validate()?;
    }

    let template = template
        .map(|path| {
            fs::read_to_string(&path)
                .with_context(|| format!("failed to read template {}", path.display()))
        })
        .transpose()?;
    let response_template = response_template
        .map(|path| {
            fs::read_to_string(&path)
                .with_context(|| format!("failed to read response template {}", path.display()))
        })
        .transpose()?;

    let options = ConvertOptions {
        server_name,
        tool_name_prefix: tool_prefix,
        template,
        response_template,
        ..Default::default()
    };

    let config = Converter::new(loader, options).convert()?;

    let rendered = match format {
        OutputFormat::Yaml => config.to_yaml()?,
        OutputFormat::Json => config.to_json_pretty()?,
    };

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    fs::write(output, rendered)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!(
        "Successfully converted OpenAPI specification to MCP configuration: {}",
        output.display()
    );
    Ok(())
}

async fn serve(host: &str, port: u16) -> Result<()> {
    let router = omcp_server::create_router();
    let addr = format!("{host}:{port}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("conversion service listening on {addr}");

    axum::serve(listener, router).await?;
    Ok(())
}
