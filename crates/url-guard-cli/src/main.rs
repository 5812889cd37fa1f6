use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use url_guard_core::report::{render_report, OutputFormat};
use url_guard_core::{
    DefaultAnalyzer, GatewayClient, GatewayOverrides, GatewaySettings, ScanRequest, ScanType,
    UrlAnalyzer,
};
use url_guard_web::AppState;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8787;

#[derive(Parser, Debug)]
#[command(
    name = "url-guard",
    author,
    version,
    about = "AI-assisted URL security analysis"
)]
struct Cli {
    /// Optional config file with [gateway] and [server] tables
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP analysis service
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Analyze a single URL and print the report
    Scan {
        /// Scan category
        #[arg(
            long = "type",
            value_name = "TYPE",
            value_enum,
            default_value_t = ScanTypeArg::Vulnerability
        )]
        scan_type: ScanTypeArg,
        /// Emit the result as JSON instead of human-readable text
        #[arg(long)]
        json: bool,
        url: String,
    },
    /// List supported scan types
    ScanTypes,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ScanTypeArg {
    Malware,
    Vulnerability,
    Legal,
}

impl From<ScanTypeArg> for ScanType {
    fn from(arg: ScanTypeArg) -> Self {
        match arg {
            ScanTypeArg::Malware => ScanType::Malware,
            ScanTypeArg::Vulnerability => ScanType::Vulnerability,
            ScanTypeArg::Legal => ScanType::Legal,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    gateway: GatewayOverrides,
    #[serde(default)]
    server: ServerConfig,
}

#[derive(Debug, Default, Deserialize)]
struct ServerConfig {
    host: Option<String>,
    port: Option<u16>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let file_config = load_config(cli.config.as_deref())?;
    let settings = GatewaySettings::default()
        .with_overrides(&file_config.gateway)
        .with_env();

    match cli.command.unwrap_or(Commands::ScanTypes) {
        Commands::Serve { host, port } => {
            let host = host
                .or(file_config.server.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string());
            let port = port.or(file_config.server.port).unwrap_or(DEFAULT_PORT);
            serve(&settings, &host, port).await?
        }
        Commands::Scan {
            scan_type,
            json,
            url,
        } => scan(&settings, scan_type.into(), &url, json).await?,
        Commands::ScanTypes => list_scan_types(),
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<FileConfig> {
    let Some(path) = path else {
        return Ok(FileConfig::default());
    };
    config::Config::builder()
        .add_source(config::File::from(path))
        .build()
        .and_then(|cfg| cfg.try_deserialize::<FileConfig>())
        .with_context(|| format!("failed to load config from {}", path.display()))
}

fn build_analyzer(settings: &GatewaySettings) -> Result<DefaultAnalyzer<GatewayClient>> {
    let client = GatewayClient::new(settings)?;
    Ok(DefaultAnalyzer::new(Arc::new(client)))
}

async fn serve(settings: &GatewaySettings, host: &str, port: u16) -> Result<()> {
    if settings.api_key.is_none() {
        warn!(
            "{} is not set; analysis requests will fail until it is configured",
            GatewaySettings::API_KEY_ENV
        );
    }
    let addr: SocketAddr = tokio::net::lookup_host((host, port))
        .await
        .with_context(|| format!("failed to resolve {host}:{port}"))?
        .next()
        .ok_or_else(|| anyhow!("no address found for {host}:{port}"))?;

    let state = AppState::new(Arc::new(build_analyzer(settings)?));
    url_guard_web::run_server(state, addr).await
}

async fn scan(settings: &GatewaySettings, scan_type: ScanType, url: &str, json: bool) -> Result<()> {
    let url = url.trim();
    reqwest::Url::parse(url).map_err(|_| anyhow!("Please enter a valid URL: {url}"))?;

    let analyzer = build_analyzer(settings)?;
    let result = analyzer.analyze(&ScanRequest::new(url, scan_type)).await?;

    let format = if json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };
    println!("{}", render_report(url, scan_type, &result, format)?);
    Ok(())
}

fn list_scan_types() {
    println!("{} scan type(s) available", ScanType::ALL.len());
    for scan_type in ScanType::ALL {
        println!(
            "- {id:<14} {title} :: {desc}",
            id = scan_type.as_str(),
            title = scan_type.title(),
            desc = scan_type.description()
        );
    }
}

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tokio=warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}
