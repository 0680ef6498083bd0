use crate::http::{HttpRequest, Method};

pub(crate) const SHIPMENTS_PATH: &str = "/api/shipments";
pub(crate) const SHIPMENT_PREFIX: &str = "/api/shipments/";

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Route {
    /// CORS preflight, answered before any other routing.
    Preflight,
    ListShipments,
    CreateShipment,
    UpdateShipment(i64),
    DeleteShipment(i64),
    /// `/api/shipments/<id>` where `<id>` is not a decimal integer.
    InvalidShipmentId,
    /// `/` or `/index.html`, any method.
    Index,
    NotFound,
}

pub(crate) fn resolve(request: &HttpRequest) -> Route {
    if request.method == Method::Options {
        return Route::Preflight;
    }

    let path = request.path.as_str();
    match &request.method {
        Method::Get if path == SHIPMENTS_PATH => Route::ListShipments,
        Method::Post if path == SHIPMENTS_PATH => Route::CreateShipment,
        Method::Put if path.starts_with(SHIPMENT_PREFIX) => match shipment_id(path) {
            Some(id) => Route::UpdateShipment(id),
            None => Route::InvalidShipmentId,
        },
        Method::Delete if path.starts_with(SHIPMENT_PREFIX) => match shipment_id(path) {
            Some(id) => Route::DeleteShipment(id),
            None => Route::InvalidShipmentId,
        },
        _ if path == "/" || path == "/index.html" => Route::Index,
        _ => Route::NotFound,
    }
}

fn shipment_id(path: &str) -> Option<i64> {
    path[SHIPMENT_PREFIX.len()..].parse().ok()
}
