use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{Map, Value, json};

use crate::api::MegaverseApi;
use crate::config::ApiSettings;
use crate::error::{MegaverseError, Result};
use crate::grid::{Coordinate, GoalMap, Grid};
use crate::shape::{Shape, ShapeKind};

/// reqwest-backed client for the Megaverse challenge service.
pub struct MegaverseClient {
    http: reqwest::Client,
    base_url: String,
    candidate_id: String,
}

impl MegaverseClient {
    pub fn new(base_url: &str, candidate_id: impl Into<String>) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            candidate_id: candidate_id.into(),
        }
    }

    pub fn from_settings(settings: &ApiSettings) -> Self {
        Self::new(&settings.base_url, settings.candidate_id.clone())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn goal_url(&self) -> String {
        self.url(&format!("/api/map/{}/goal", self.candidate_id))
    }

    fn coordinate_body(&self, coordinate: Coordinate) -> Map<String, Value> {
        let mut body = Map::new();
        body.insert("row".into(), json!(coordinate.row));
        body.insert("column".into(), json!(coordinate.column));
        body.insert("candidateId".into(), json!(self.candidate_id));
        body
    }

    /// Request body for creating `shape`: `{row, column, candidateId}` plus
    /// `color` or `direction` when the kind carries one.
    pub fn create_body(&self, shape: &Shape, coordinate: Coordinate) -> Value {
        let mut body = self.coordinate_body(coordinate);
        if let Some((field, value)) = shape.attribute() {
            body.insert(field.into(), json!(value));
        }
        Value::Object(body)
    }

    pub fn delete_body(&self, coordinate: Coordinate) -> Value {
        Value::Object(self.coordinate_body(coordinate))
    }

    async fn send_json(&self, method: reqwest::Method, path: &str, body: &Value) -> Result<()> {
        let resp = self
            .http
            .request(method, self.url(path))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;
        expect_ok(resp).await.map(|_| ())
    }
}

#[async_trait]
impl MegaverseApi for MegaverseClient {
    async fn goal_map(&self) -> Result<Grid> {
        let resp = self.http.get(self.goal_url()).send().await?;
        let body = expect_ok(resp).await?;
        let map: GoalMap = serde_json::from_str(&body)?;
        Grid::try_from(map)
    }

    async fn create(&self, shape: &Shape, coordinate: Coordinate) -> Result<()> {
        let body = self.create_body(shape, coordinate);
        self.send_json(reqwest::Method::POST, shape.kind().path(), &body)
            .await
    }

    async fn delete(&self, kind: ShapeKind, coordinate: Coordinate) -> Result<()> {
        let body = self.delete_body(coordinate);
        self.send_json(reqwest::Method::DELETE, kind.path(), &body)
            .await
    }
}

/// Only HTTP 200 counts as success; the body is returned for parsing.
async fn expect_ok(resp: reqwest::Response) -> Result<String> {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();

    if status != StatusCode::OK {
        return Err(MegaverseError::remote_status(status.as_u16(), body));
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = MegaverseClient::new("http://localhost:8080/", "abc");
        assert_eq!(client.goal_url(), "http://localhost:8080/api/map/abc/goal");
        assert_eq!(
            client.url(ShapeKind::Cometh.path()),
            "http://localhost:8080/api/comeths"
        );
    }

    #[test]
    fn test_create_bodies() {
        let client = MegaverseClient::new("http://localhost", "abc");
        let at = Coordinate::new(2, 3);

        assert_eq!(
            client.create_body(&Shape::Polyanet, at),
            json!({"row": 2, "column": 3, "candidateId": "abc"})
        );
        assert_eq!(
            client.create_body(&Shape::soloon("blue"), at),
            json!({"row": 2, "column": 3, "candidateId": "abc", "color": "blue"})
        );
        assert_eq!(
            client.create_body(&Shape::cometh("up"), at),
            json!({"row": 2, "column": 3, "candidateId": "abc", "direction": "up"})
        );
        assert_eq!(
            client.delete_body(at),
            json!({"row": 2, "column": 3, "candidateId": "abc"})
        );
    }
}
