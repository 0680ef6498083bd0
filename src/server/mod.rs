use std::io;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::http::protocol::{parse_request, write_response};
use crate::http::{HttpRequest, HttpResponse, StatusCode};
use crate::store::Store;
use crate::url::parse_form;
use crate::Error;

mod handlers;
mod pool;
mod routing;

use pool::ThreadPool;
use routing::Route;


/// Per-connection settings, shared by every worker.
#[derive(Debug)]
struct Settings {
    index_candidates: Vec<PathBuf>,
    max_body_bytes: usize,
    read_timeout: Option<Duration>,
}

pub struct Server {
    listener: TcpListener,
    store: Arc<dyn Store>,
    settings: Arc<Settings>,
    workers: usize,
}

impl Server {
    pub fn bind(config: &Config, store: Arc<dyn Store>) -> io::Result<Self> {
        let listener = TcpListener::bind(config.bind)?;

        Ok(Self {
            listener,
            store,
            settings: Arc::new(Settings {
                index_candidates: config.index_candidates(),
                max_body_bytes: config.max_body_bytes,
                read_timeout: (config.read_timeout_secs > 0)
                    .then(|| Duration::from_secs(config.read_timeout_secs)),
            }),
            workers: config.workers,
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts connections until the listener fails, handing each one to
    /// the worker pool. The pool caps how many are handled at once and
    /// is drained and joined when the loop ends.
    pub fn serve(self) -> io::Result<()> {
        let pool = ThreadPool::new(self.workers);
        info!(addr = %self.listener.local_addr()?, workers = self.workers, "listening");

        while let Ok((stream, peer)) = self.listener.accept() {
            debug!(%peer, "accepted connection");

            let store = Arc::clone(&self.store);
            let settings = Arc::clone(&self.settings);
            pool.execute(move || handle_connection(stream, store, &settings));
        }

        info!("listener closed, draining workers");
        Ok(())
    }
}

/// Runs one connection end to end: frame, route, handle, write. Every
/// failure stays confined to this connection.
fn handle_connection(mut stream: TcpStream, store: Arc<dyn Store>, settings: &Settings) {
    if let Err(e) = stream.set_read_timeout(settings.read_timeout) {
        warn!("failed to set read timeout: {e}");
    }

    let response = match parse_request(&mut stream, settings.max_body_bytes) {
        Ok(request) => dispatch(&request, store.as_ref(), settings),
        Err(Error::BodyTooLarge { declared, limit }) => {
            debug!(declared, limit, "rejecting oversized body");
            HttpResponse::json(
                StatusCode::PayloadTooLarge,
                handlers::error_envelope("Request body too large"),
            )
        }
        Err(e) => {
            debug!("failed to frame request: {e}");
            HttpResponse::text(StatusCode::BadRequest, format!("Error processing HTTP: {e}"))
        }
    };

    if let Err(e) = write_response(&mut stream, &response) {
        debug!("failed to write response: {e}");
    }
    // Dropping the stream closes the connection; there is no keep-alive.
}

/// Routes a framed request and picks the wire status for the envelope.
///
/// Statuses are fixed per route: POST answers 201 and PUT/DELETE 200
/// even when the envelope reports a store failure or a missing row.
/// Only the pre-handler validation check downgrades to 400.
fn dispatch(request: &HttpRequest, store: &dyn Store, settings: &Settings) -> HttpResponse {
    match routing::resolve(request) {
        Route::Preflight => HttpResponse::text(StatusCode::Ok, ""),
        Route::ListShipments => {
            HttpResponse::json(StatusCode::Ok, handlers::list_shipments(store))
        }
        Route::CreateShipment => {
            let body = String::from_utf8_lossy(&request.body);
            let params = parse_form(&body);
            match handlers::validate(&params, false) {
                Some(input) => {
                    HttpResponse::json(StatusCode::Created, handlers::create_shipment(store, &input))
                }
                None => HttpResponse::json(
                    StatusCode::BadRequest,
                    handlers::error_envelope("Missing required fields"),
                ),
            }
        }
        Route::UpdateShipment(id) => {
            let body = String::from_utf8_lossy(&request.body);
            let params = parse_form(&body);
            match handlers::validate(&params, true) {
                Some(input) => {
                    HttpResponse::json(StatusCode::Ok, handlers::update_shipment(store, id, &input))
                }
                None => HttpResponse::json(
                    StatusCode::BadRequest,
                    handlers::error_envelope("Missing required fields"),
                ),
            }
        }
        Route::DeleteShipment(id) => {
            HttpResponse::json(StatusCode::Ok, handlers::delete_shipment(store, id))
        }
        Route::InvalidShipmentId => HttpResponse::json(
            StatusCode::BadRequest,
            handlers::error_envelope("Invalid shipment id"),
        ),
        Route::Index => match handlers::serve_index(&settings.index_candidates) {
            Some(content) => HttpResponse::html(StatusCode::Ok, content),
            None => HttpResponse::text(StatusCode::NotFound, "File not found"),
        },
        Route::NotFound => HttpResponse::text(StatusCode::NotFound, "Not Found"),
    }
}
