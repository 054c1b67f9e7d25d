use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Json, Path};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::ApiError;

/// Unwrap a JSON body into an object. A missing, malformed, or non-object
/// body is treated as `{}` so that field validation reports it as missing.
pub fn body_object(body: Result<Json<Value>, JsonRejection>) -> Map<String, Value> {
    match body {
        Ok(Json(Value::Object(map))) => map,
        Ok(Json(other)) => {
            debug!("Ignoring non-object JSON body: {}", other);
            Map::new()
        }
        Err(rejection) => {
            debug!("Unreadable JSON body: {}", rejection);
            Map::new()
        }
    }
}

/// Integer path id. Anything that is not an integer cannot name a row,
/// so it is reported with the same 404 as an unknown id.
pub fn path_id(path: Result<Path<i32>, PathRejection>, not_found: &str) -> Result<i32, ApiError> {
    match path {
        Ok(Path(id)) => Ok(id),
        Err(rejection) => {
            debug!("Invalid path id: {}", rejection);
            Err(ApiError::not_found(not_found))
        }
    }
}
