use std::sync::Arc;

use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::api::transport::{HttpTransport, TransportResponse};
use crate::api::types::{
    AssignRequest, Assignment, AutoScheduleRequest, AutoScheduleResult, CoverageStat,
    ExportPayload, LoadStat, NewStaff, StaffMember,
};
use crate::error::ApiError;
use crate::period::Period;

pub const STAFF_PATH: &str = "/staff";
pub const ROSTER_PATH: &str = "/roster";
pub const ASSIGNMENTS_PATH: &str = "/assignments";
pub const AUTO_SCHEDULE_PATH: &str = "/schedule/auto";
pub const EXPORT_PATH: &str = "/export/roster.csv";
pub const COVERAGE_PATH: &str = "/stats/coverage";
pub const STAFF_LOAD_PATH: &str = "/stats/staff-load";

/// Typed wrapper over the backend endpoints. Cheap to clone.
#[derive(Clone)]
pub struct BackendClient {
    transport: Arc<dyn HttpTransport>,
}

impl BackendClient {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        BackendClient { transport }
    }

    // Staff

    pub async fn list_staff(&self) -> Result<Vec<StaffMember>, ApiError> {
        self.get_json(STAFF_PATH, &[]).await
    }

    /// Creates a staff member. Success is decided by the status alone; the
    /// new id is picked out of the body when present.
    pub async fn create_staff(&self, staff: &NewStaff) -> Result<Option<i64>, ApiError> {
        debug!("POST {}", STAFF_PATH);
        let body = serde_json::to_value(staff).map_err(|e| ApiError::Decode(e.to_string()))?;
        let response = self.transport.post(STAFF_PATH, &body).await?;
        let created = check_status(response)?;
        Ok(created
            .as_ref()
            .and_then(|v| v.get("id"))
            .and_then(Value::as_i64))
    }

    pub async fn delete_staff(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("{}/{}", STAFF_PATH, id)).await
    }

    // Roster

    pub async fn roster(&self, period: &Period) -> Result<Vec<Assignment>, ApiError> {
        self.get_json(ROSTER_PATH, &period.query()).await
    }

    pub async fn assign(&self, request: &AssignRequest) -> Result<Assignment, ApiError> {
        self.post_json(ASSIGNMENTS_PATH, request).await
    }

    pub async fn unassign(&self, assignment_id: i64) -> Result<(), ApiError> {
        self.delete(&format!("{}/{}", ASSIGNMENTS_PATH, assignment_id))
            .await
    }

    pub async fn auto_schedule(
        &self,
        request: &AutoScheduleRequest,
    ) -> Result<AutoScheduleResult, ApiError> {
        self.post_json(AUTO_SCHEDULE_PATH, request).await
    }

    pub async fn export_roster(&self, period: &Period) -> Result<ExportPayload, ApiError> {
        self.get_json(EXPORT_PATH, &period.query()).await
    }

    // Stats

    pub async fn coverage(&self, period: &Period) -> Result<Vec<CoverageStat>, ApiError> {
        self.get_json(COVERAGE_PATH, &period.query()).await
    }

    pub async fn staff_load(&self, period: &Period) -> Result<Vec<LoadStat>, ApiError> {
        self.get_json(STAFF_LOAD_PATH, &period.query()).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        debug!("GET {}", path);
        let response = self.transport.get(path, query).await?;
        decode(path, response)
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        debug!("POST {}", path);
        let body = serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        let response = self.transport.post(path, &body).await?;
        decode(path, response)
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        debug!("DELETE {}", path);
        let response = self.transport.delete(path).await?;
        check_status(response).map(|_| ())
    }
}

fn check_status(response: TransportResponse) -> Result<Option<Value>, ApiError> {
    if response.is_success() {
        Ok(response.body)
    } else {
        Err(ApiError::from_status(
            response.status,
            error_detail(response.body.as_ref()),
        ))
    }
}

fn decode<T: DeserializeOwned>(path: &str, response: TransportResponse) -> Result<T, ApiError> {
    let body = check_status(response)?
        .ok_or_else(|| ApiError::Decode(format!("empty body from {}", path)))?;
    serde_json::from_value(body).map_err(|e| ApiError::Decode(format!("{}: {}", path, e)))
}

/// Human-readable reason from an error body. The backend answers with
/// `{"detail": "..."}`; validation failures carry a list under `detail`.
fn error_detail(body: Option<&Value>) -> String {
    match body {
        None => "no details".to_string(),
        Some(Value::String(text)) => text.trim().to_string(),
        Some(Value::Object(map)) => match map.get("detail") {
            Some(Value::String(text)) => text.clone(),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.get("msg")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                        .unwrap_or_else(|| item.to_string())
                })
                .collect::<Vec<_>>()
                .join("; "),
            Some(other) => other.to_string(),
            None => Value::Object(map.clone()).to_string(),
        },
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn detail_is_extracted_from_error_bodies() {
        assert_eq!(
            error_detail(Some(&json!({"detail": "Staff not found"}))),
            "Staff not found"
        );
        assert_eq!(
            error_detail(Some(&json!({"detail": [
                {"loc": ["body", "name"], "msg": "String should have at least 1 character"},
                {"loc": ["body", "age"], "msg": "Input should be a valid integer"}
            ]}))),
            "String should have at least 1 character; Input should be a valid integer"
        );
        assert_eq!(error_detail(Some(&json!("Bad Gateway\n"))), "Bad Gateway");
        assert_eq!(error_detail(None), "no details");
    }

    #[test]
    fn decode_maps_status_and_shape() {
        let ok: Vec<LoadStat> =
            decode(STAFF_LOAD_PATH, TransportResponse::json(200, json!([]))).unwrap();
        assert!(ok.is_empty());

        let missing = decode::<Vec<LoadStat>>(
            STAFF_PATH,
            TransportResponse::json(404, json!({"detail": "Not Found"})),
        );
        assert_eq!(
            missing.unwrap_err(),
            ApiError::Client {
                status: 404,
                detail: "Not Found".into()
            }
        );

        let wrong_shape =
            decode::<Vec<LoadStat>>(STAFF_LOAD_PATH, TransportResponse::json(200, json!({})));
        assert!(matches!(wrong_shape, Err(ApiError::Decode(_))));

        let empty = decode::<Vec<LoadStat>>(STAFF_LOAD_PATH, TransportResponse::no_content());
        assert!(matches!(empty, Err(ApiError::Decode(_))));
    }
}
