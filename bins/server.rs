use std::process::ExitCode;

use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

fn init_logging() {
    // load .env first so RUST_LOG / LOG_FORMAT apply
    dotenv().ok();
    common::utils::logging::init_logging_from_env();
    info!(service = "advertisement", event = "logger_init", "tracing subscriber initialized");
}

fn main() -> ExitCode {
    init_logging();

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "advertisement",
            event = "panic",
            %service_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    // config.toml when present, otherwise environment variables
    let cfg = match configs::AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(
                service = "advertisement",
                event = "config_invalid",
                error = %format!("{e:#}"),
                "failed to load configuration"
            );
            return ExitCode::FAILURE;
        }
    };
    let worker_threads = cfg.server.worker_threads;

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads {
        builder.worker_threads(w);
    }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(
                service = "advertisement",
                event = "runtime_build_failed",
                error = %e,
                "failed to build tokio runtime"
            );
            return ExitCode::FAILURE;
        }
    };

    info!(
        service = "advertisement",
        event = "start",
        %service_id,
        pid,
        version,
        threads = worker_threads.unwrap_or_default(),
        "advertisement service starting"
    );

    // server::run owns graceful shutdown and closes the pool before returning
    rt.block_on(async move {
        match server::run(cfg).await {
            Ok(()) => {
                info!(
                    service = "advertisement",
                    event = "stop",
                    %service_id,
                    pid,
                    "server stopped normally"
                );
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!(
                    service = "advertisement",
                    event = "run_failed",
                    error = %e,
                    "server::run returned error"
                );
                ExitCode::FAILURE
            }
        }
    })
}
