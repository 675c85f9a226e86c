use astra::Server;
use homefinder::config::AppConfig;
use homefinder::responses::html_error_response;
use homefinder::router::handle;
use homefinder::state::AppState;
use tracing_subscriber::EnvFilter;

fn main() {
    // 1️⃣ Logging: RUST_LOG wins, otherwise our own crate at info
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("homefinder=info")),
        )
        .init();

    // 2️⃣ Configuration from HOMEFINDER_* variables
    let config = AppConfig::from_env();
    let addr = config.addr;
    let workers = config.max_workers;

    // 3️⃣ Loader, storage and the weather snapshot
    let state = match AppState::new(config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "start-up failed");
            std::process::exit(1);
        }
    };

    // A broken embedded dataset is the one thing we cannot serve around.
    match state.loader.load() {
        Ok(loaded) => tracing::info!(
            count = loaded.listings.len(),
            source = loaded.source.as_str(),
            "catalog ready"
        ),
        Err(e) if e.is_fatal() => {
            tracing::error!(error = %e, "no listing data available");
            std::process::exit(1);
        }
        Err(e) => tracing::warn!(error = %e, "initial listing load failed"),
    }

    // 4️⃣ Start the server
    tracing::info!("Starting server at http://{addr}");

    let server = Server::bind(&addr).max_workers(workers);

    let result = server.serve(move |req, _info| match handle(req, &state) {
        Ok(resp) => resp,
        Err(err) => html_error_response(err),
    });

    if let Err(e) = result {
        tracing::error!(error = %e, "server ended with error");
    }

    tracing::info!("Server shut down cleanly.");
}
