use crate::app::App;
use crate::config::AppConfig;
use crate::db::connection::init_db;
use astra::Server;

mod address;
mod app;
mod auth;
mod config;
mod db;
mod domain;
mod errors;
mod fulfillment;
mod mock;
mod provider;
mod responses;
mod router;
mod service;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    env_logger::init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("configuration error: {e}");
            std::process::exit(1);
        }
    };

    let app = match App::new(config) {
        Ok(app) => app,
        Err(e) => {
            log::error!("could not build the provider client: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = init_db(&app.db, &app.config.schema_path) {
        log::error!("database initialization failed: {e}");
        std::process::exit(1);
    }

    let addr = app.config.addr;
    log::info!(
        "starting server at http://{addr} ({:?} mode, {:?} fulfillment, {} workers)",
        app.service.mode(),
        app.config.fulfillment.mode,
        app.config.max_workers
    );

    let server = Server::bind(&addr).max_workers(app.config.max_workers);

    let result = server.serve(move |req, _info| router::respond(req, &app));

    if let Err(e) = result {
        log::error!("server ended with error: {e}");
    }

    log::info!("server shut down");
}
