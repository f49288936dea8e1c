use std::process;

use inkpost::{
    application::{error::AppError, latency::SimulatedLatency, session::SessionService},
    config,
    domain::{
        filters,
        posts::{self, PostQuery, data},
    },
    infra::{
        error::InfraError,
        http::{self, AppState},
        memory::MemoryRepositories,
        telemetry,
    },
};
use serde::Serialize;
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli().map_err(InfraError::from)?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    match command {
        config::Command::Serve(_) => {
            telemetry::init(&settings.logging).map_err(AppError::from)?;
            run_serve(settings).await
        }
        config::Command::Filters => print_json(filters::catalog()),
        config::Command::Query(args) => run_query(&args),
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let repos = MemoryRepositories::new(settings.seed.enabled);
    let latency = SimulatedLatency::new(settings.workflow.simulated_latency);
    let state = AppState::in_memory(repos, latency, settings.uploads.max_request_len())
        .with_sessions(SessionService::with_idle_timeout(
            settings.sessions.idle_timeout,
        ));
    let router = http::build_router(state);

    let listener = tokio::net::TcpListener::bind(settings.server.addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    info!(
        target = "inkpost::serve",
        addr = %settings.server.addr,
        seed = settings.seed.enabled,
        latency_ms = latency.duration().as_millis(),
        "listening"
    );

    let server = async move {
        axum::serve(listener, router.into_make_service())
            .with_graceful_shutdown(shutdown_signal())
            .await
    };
    let grace = settings.server.graceful_shutdown;

    tokio::select! {
        result = server => {
            result.map_err(|err| AppError::unexpected(format!("server error: {err}")))?;
        }
        _ = async {
            shutdown_signal().await;
            tokio::time::sleep(grace).await;
        } => {
            warn!(
                target = "inkpost::serve",
                grace_secs = grace.as_secs(),
                "graceful shutdown timed out"
            );
        }
    }

    info!(target = "inkpost::serve", "server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(target = "inkpost::serve", error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

fn run_query(args: &config::QueryArgs) -> Result<(), AppError> {
    let published: Vec<_> = data::seed_posts()
        .into_iter()
        .filter(|post| post.is_published())
        .collect();
    let query = PostQuery::new(
        Some(args.search.as_str()),
        Some(args.category.as_str()),
        Some(args.sort.as_str()),
    );
    print_json(&posts::query(&published, &query))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|err| AppError::unexpected(format!("failed to encode output: {err}")))?;
    println!("{json}");
    Ok(())
}
