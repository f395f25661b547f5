use clap::Parser;
use graphbind_api::RestApi;
use graphbind_storage::MemoryGraph;
use std::sync::Arc;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Reference Rexster-style graph server over an in-memory graph
#[derive(Parser, Debug)]
#[command(name = "graphbind")]
#[command(about = "Serve an in-memory property graph over a Rexster-style REST API", long_about = None)]
struct Args {
    /// HTTP API port
    #[arg(short, long, default_value_t = 8182)]
    port: u16,

    /// Name of the served graph (the `{graph}` in `/graphs/{graph}`)
    #[arg(short, long, default_value = "graph")]
    graph: String,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting graphbind v{}", env!("CARGO_PKG_VERSION"));
    info!("Graph: {}", args.graph);

    let graph = Arc::new(MemoryGraph::new(args.graph.clone()));
    let port = args.port;
    let http_handle = std::thread::spawn(move || {
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(graph, port).await {
                error!("HTTP server error: {}", e);
            }
        })
    });

    info!(
        "Graph API: http://localhost:{}/graphs/{}",
        args.port, args.graph
    );

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}
