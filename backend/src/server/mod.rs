//! Server construction and middleware wiring.

mod config;
#[cfg(feature = "metrics")]
mod metrics;
mod state_builders;

pub use config::ServerConfig;

#[cfg(feature = "metrics")]
use metrics::MetricsLayer;
use state_builders::{BuiltState, Repositories, build_state};

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tokio::task::JoinHandle;

use habitwise::Trace;
#[cfg(debug_assertions)]
use habitwise::doc::ApiDoc;
use habitwise::domain::spawn_reminder_loop;
use habitwise::inbound::http::{configure_api, configure_public};
use habitwise::inbound::http::health::{HealthState, live, ready};
use habitwise::inbound::http::state::HttpState;
use habitwise::inbound::ws;
use habitwise::inbound::ws::state::WsState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    ws_state: web::Data<WsState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        ws_state,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(ws_state)
        .wrap(Trace)
        .service(web::scope("/api/v1").configure(configure_api))
        .configure(configure_public)
        .service(ws::ws_entry)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// A bound server together with its reminder loop.
pub struct RunningServer {
    pub server: Server,
    pub reminders: JoinHandle<()>,
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// Must be called inside a tokio runtime: the reminder dispatcher is spawned
/// here and ticks every `config.reminder_interval`.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is initialised.
/// - `config`: pre-built [`ServerConfig`] with the bind address and resolved adapters.
///
/// # Returns
/// A [`RunningServer`] whose `server` must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when metric registration, binding the
/// socket, or starting the server fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<RunningServer> {
    let server_health_state = health_state.clone();
    let repos = Repositories::from_config(&config);
    let BuiltState {
        http,
        ws,
        reminders,
    } = build_state(&config, &repos)?;
    let http_state = web::Data::new(http);
    let ws_state = web::Data::new(ws);

    #[cfg(feature = "metrics")]
    let metrics_layer = MetricsLayer::from_option(config.prometheus.clone());

    let server = HttpServer::new(move || {
        let app = build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            ws_state: ws_state.clone(),
        });

        #[cfg(feature = "metrics")]
        let app = app.wrap(metrics_layer.clone());

        app
    })
    .bind(config.bind_addr)?
    .run();

    let reminders = spawn_reminder_loop(reminders, config.reminder_interval);
    health_state.mark_ready();
    Ok(RunningServer { server, reminders })
}
