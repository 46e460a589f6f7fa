use std::process::ExitCode;

use axum::http::Method;
use clap::Parser;
use log::{debug, info};
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};

use api::service_controller::{FitSettings, ServiceController};
use config::{Config, ConfigError};

mod utils;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

#[derive(Parser, Debug)]
struct Args {
    /// Serve the HTTP API instead of fitting a single point file
    #[arg(short, long)]
    serve: bool,

    /// Point file with one `x,y` pair per line, `-` or nothing reads stdin
    #[arg(short, long)]
    input: Option<String>,

    /// Config file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    simple_logger::SimpleLogger::new().env().init().unwrap();

    let args = Args::parse();
    debug!("Args: {:?}", args);

    let config = load_config(&args.config).expect("Failed to load config file");

    if args.serve {
        run_server(config).await;
        ExitCode::SUCCESS
    } else {
        run_fit(&config, args.input.as_deref())
    }
}

// The default config file is optional for one-off fits.
fn load_config(path: &str) -> Result<Config, ConfigError> {
    match Config::from_file(path) {
        Err(ConfigError::IoError(err))
            if err.kind() == std::io::ErrorKind::NotFound && path == DEFAULT_CONFIG_PATH =>
        {
            info!("No {} found, using default configuration", path);
            Ok(Config::default())
        }
        result => result,
    }
}

fn run_fit(config: &Config, input: Option<&str>) -> ExitCode {
    let outcome = utils::read_input(input).and_then(|text| utils::fit_text(&text, config));

    match outcome {
        Ok(report) => {
            println!("{}", report);
            ExitCode::SUCCESS
        }
        Err(err) => {
            debug!("Fit failed: {:?}", err);
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run_server(config: Config) {
    info!("Starting Least Squares Server");

    let server = config.server().expect("Failed to read server configuration");
    let (app_host, app_port) = (server.host.clone(), server.port);

    let service_controller = ServiceController::new(FitSettings::from(&config));

    let cors = CorsLayer::new().allow_origin(Any).allow_methods([Method::GET, Method::POST]);

    let app = service_controller.router().layer(cors);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", app_host, app_port))
        .await
        .expect("Failed to bind port");
    info!("Listening on {}:{}", app_host, app_port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    info!("Server stopped.");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("Unable to handle ctrl+c");
    };
    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("signal received, starting graceful shutdown");
}
