use actix_web::middleware::Logger;
use actix_web::web;
use actix_web::App;
use actix_web::HttpServer;
use anyhow::Error;
use cmc_exporter_lib::collector::CoinStats;
use cmc_exporter_lib::config::Config;
use log::info;
use prometheus::Gauge;
use prometheus::Opts;
use prometheus::Registry;
use routes::AppState;

mod routes;

const NAME: &str = "cmc_exporter";
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Constant `cmc_exporter_build_info{version="..."} 1` gauge.
fn build_info() -> Result<Gauge, prometheus::Error> {
    let opts = Opts::new("build_info", "A metric with a constant '1' value labeled by the exporter's version.")
        .namespace(NAME)
        .const_label("version", VERSION);

    let gauge = Gauge::with_opts(opts)?;
    gauge.set(1.0);

    Ok(gauge)
}

fn main() -> Result<(), Error> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::new()?;
    info!("Starting {NAME} {VERSION}");

    // The collector owns a blocking HTTP client which must be created outside of the async runtime
    let registry = Registry::new();
    registry.register(Box::new(build_info()?))?;
    registry.register(Box::new(CoinStats::new(&config.uri, config.timeout)?))?;
    info!("Scraping '{}' with a timeout of {:?}", config.uri, config.timeout);

    actix_web::rt::System::new().block_on(serve(config, registry))?;

    Ok(())
}

async fn serve(config: Config, registry: Registry) -> std::io::Result<()> {
    let state = web::Data::new(AppState {
        registry,
        telemetry_path: config.telemetry_path.clone(),
    });

    info!("Listening on {}, metrics exposed under {}", config.listen_address, config.telemetry_path);

    HttpServer::new(move || {
        let telemetry_path = state.telemetry_path.clone();

        App::new()
            // Clone the state here as otherwise each worker thread would create its own registry and thus
            // its own collector with separate scrape counters
            .app_data(state.clone())
            .configure(|cfg| routes::configure(cfg, &telemetry_path))
            .wrap(Logger::new("[%t] %U, %r"))
    })
    .bind(&config.listen_address)?
    .run()
    .await
}
