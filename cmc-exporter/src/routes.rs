use actix_web::get;
use actix_web::web;
use actix_web::HttpResponse;
use actix_web::Responder;
use log::error;
use prometheus::Encoder;
use prometheus::Registry;
use prometheus::TextEncoder;

pub struct AppState {
    pub registry: Registry,
    pub telemetry_path: String,
}

/// Registers the landing page and the metrics endpoint under `telemetry_path`.
pub fn configure(cfg: &mut web::ServiceConfig, telemetry_path: &str) {
    cfg.service(index).route(telemetry_path, web::get().to(metrics));
}

#[get("/")]
async fn index(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().content_type("text/html; charset=utf-8").body(format!(
        "<html>\n\
         <head><title>CMC Exporter</title></head>\n\
         <body>\n\
         <h1>CMC Exporter</h1>\n\
         <p><a href='{}'>Metrics</a></p>\n\
         </body>\n\
         </html>\n",
        state.telemetry_path
    ))
}

async fn metrics(state: web::Data<AppState>) -> impl Responder {
    // Gathering scrapes CoinMarketCap with a blocking client, hence move it off the worker thread
    let gather_state = state.clone();
    let families = match web::block(move || gather_state.registry.gather()).await {
        Ok(families) => families,
        Err(why) => {
            error!("Failed to gather metrics; {why}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    if let Err(why) = encoder.encode(&families, &mut buffer) {
        error!("Failed to encode metrics; {why}");
        return HttpResponse::InternalServerError().finish();
    }

    HttpResponse::Ok().content_type(encoder.format_type()).body(buffer)
}

#[cfg(test)]
mod tests {
    use super::configure;
    use super::AppState;
    use actix_web::test;
    use actix_web::web;
    use actix_web::App;
    use prometheus::Gauge;
    use prometheus::Opts;
    use prometheus::Registry;

    fn state(telemetry_path: &str) -> web::Data<AppState> {
        let registry = Registry::new();
        let gauge = Gauge::with_opts(Opts::new("cmc_coin_stats_up", "Was the last scrape of the website successful.")).unwrap();
        gauge.set(1.0);
        registry.register(Box::new(gauge)).unwrap();

        web::Data::new(AppState {
            registry,
            telemetry_path: telemetry_path.to_string(),
        })
    }

    #[actix_web::test]
    async fn index() {
        let state = state("/probe");
        let path = state.telemetry_path.clone();
        let app = test::init_service(App::new().app_data(state).configure(|cfg| configure(cfg, &path))).await;

        let body = test::call_and_read_body(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert!(String::from_utf8(body.to_vec()).unwrap().contains("<a href='/probe'>Metrics</a>"));
    }

    #[actix_web::test]
    async fn metrics() {
        let state = state("/metrics");
        let path = state.telemetry_path.clone();
        let app = test::init_service(App::new().app_data(state).configure(|cfg| configure(cfg, &path))).await;

        let response = test::call_service(&app, test::TestRequest::get().uri("/metrics").to_request()).await;
        assert!(response.status().is_success());

        let body = test::read_body(response).await;
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(body.contains("# TYPE cmc_coin_stats_up gauge"));
        assert!(body.contains("cmc_coin_stats_up 1"));
    }

    #[actix_web::test]
    async fn unknown_path() {
        let state = state("/metrics");
        let path = state.telemetry_path.clone();
        let app = test::init_service(App::new().app_data(state).configure(|cfg| configure(cfg, &path))).await;

        let response = test::call_service(&app, test::TestRequest::get().uri("/v1/statistics").to_request()).await;
        assert_eq!(response.status().as_u16(), 404);
    }
}
