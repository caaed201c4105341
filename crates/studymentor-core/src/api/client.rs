//! Async HTTP client for the study-mentor API.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use super::types::{
    Ack, ChatReply, ChatRequest, GoalAdjustment, Progress, ProgressUpdate, ProgressUpdateReply,
    Quote, RoadmapRecord, RoadmapRequest, RoadmapSet, SelectTrackRequest, StudyTechnique,
    TechniqueList,
};
use crate::error::ApiError;
use crate::mode::Mode;
use crate::storage::ApiSettings;

/// Typed client. Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base: Url,
}

impl ApiClient {
    pub fn new(settings: &ApiSettings) -> Result<Self, ApiError> {
        let base = Url::parse(&settings.base_url)
            .map_err(|_| ApiError::InvalidBaseUrl(settings.base_url.clone()))?;
        if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
            return Err(ApiError::InvalidBaseUrl(settings.base_url.clone()));
        }
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(ApiError::Client)?;
        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidBaseUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        let url = self.endpoint(segments)?;
        tracing::debug!(%url, "GET");
        let resp = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|source| request_failed(&url, source))?;
        decode(&url, resp).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(segments)?;
        tracing::debug!(%url, "POST");
        let resp = self
            .http
            .post(url.clone())
            .json(body)
            .send()
            .await
            .map_err(|source| request_failed(&url, source))?;
        decode(&url, resp).await
    }

    // ── Endpoints ────────────────────────────────────────────────────

    pub async fn chat(&self, message: &str, mode: Mode) -> Result<ChatReply, ApiError> {
        self.post_json(&["api", "chat"], &ChatRequest { message, mode })
            .await
    }

    pub async fn generate_roadmap(&self, request: &RoadmapRequest) -> Result<RoadmapSet, ApiError> {
        self.post_json(&["api", "roadmap", "generate"], request)
            .await
    }

    pub async fn get_roadmap(&self, roadmap_id: &str) -> Result<RoadmapRecord, ApiError> {
        self.get_json(&["api", "roadmap", roadmap_id]).await
    }

    pub async fn select_track(&self, roadmap_id: &str, track_type: &str) -> Result<Ack, ApiError> {
        self.post_json(
            &["api", "roadmap", roadmap_id, "select"],
            &SelectTrackRequest { track_type },
        )
        .await
    }

    pub async fn get_progress(&self, roadmap_id: &str) -> Result<Progress, ApiError> {
        self.get_json(&["api", "progress", roadmap_id]).await
    }

    pub async fn update_progress(
        &self,
        update: &ProgressUpdate,
    ) -> Result<ProgressUpdateReply, ApiError> {
        self.post_json(&["api", "progress", "update"], update).await
    }

    pub async fn adjust_goals(&self, adjustment: &GoalAdjustment) -> Result<Ack, ApiError> {
        self.post_json(
            &["api", "progress", &adjustment.roadmap_id, "adjust"],
            adjustment,
        )
        .await
    }

    pub async fn study_techniques(&self) -> Result<Vec<StudyTechnique>, ApiError> {
        let list: TechniqueList = self.get_json(&["api", "study-techniques"]).await?;
        Ok(list.techniques)
    }

    pub async fn daily_motivation(&self) -> Result<Quote, ApiError> {
        self.get_json(&["api", "motivation", "daily"]).await
    }
}

fn request_failed(url: &Url, source: reqwest::Error) -> ApiError {
    ApiError::Request {
        endpoint: url.path().to_string(),
        source,
    }
}

async fn decode<T: DeserializeOwned>(url: &Url, resp: Response) -> Result<T, ApiError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ApiError::Status {
            endpoint: url.path().to_string(),
            status: status.as_u16(),
            body,
        });
    }
    resp.json::<T>()
        .await
        .map_err(|source| request_failed(url, source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::SkillLevel;
    use mockito::Matcher;
    use serde_json::json;

    fn client_for(server: &mockito::ServerGuard) -> ApiClient {
        ApiClient::new(&ApiSettings {
            base_url: server.url(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[test]
    fn rejects_unusable_base_urls() {
        for bad in ["not a url", "mailto:someone@example.com", "ftp://host/"] {
            let settings = ApiSettings {
                base_url: bad.into(),
                timeout_secs: 5,
            };
            assert!(matches!(
                ApiClient::new(&settings),
                Err(ApiError::InvalidBaseUrl(_))
            ));
        }
    }

    #[test]
    fn endpoint_keeps_base_prefix() {
        let client = ApiClient::new(&ApiSettings {
            base_url: "http://localhost:8000/mentor/".into(),
            timeout_secs: 5,
        })
        .unwrap();
        let url = client.endpoint(&["api", "roadmap", "roadmap_1.5", "select"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/mentor/api/roadmap/roadmap_1.5/select"
        );
    }

    #[tokio::test]
    async fn chat_posts_message_and_mode() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/chat")
            .match_body(Matcher::Json(json!({"message": "hi", "mode": "focus"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"response":"Hello!","timestamp":"2026-01-01T10:00:00"}"#)
            .create_async()
            .await;

        let reply = client_for(&server).chat("hi", Mode::Focus).await.unwrap();
        assert_eq!(reply.response, "Hello!");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn generate_roadmap_decodes_variants() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/roadmap/generate")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "roadmap_id": "roadmap_1",
                    "roadmaps": {
                        "balanced": {
                            "title": "Rust - Balanced Track",
                            "duration": "4 months",
                            "hours_per_week": 10,
                            "description": "Steady progress",
                            "phases": [{"name": "Foundations", "duration": "2-3 weeks", "topics": ["Basics"]}]
                        }
                    }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let request = RoadmapRequest {
            learning_goal: "Rust".into(),
            time_commitment: 10,
            skill_level: SkillLevel::Beginner,
            learning_styles: vec![],
            deadline: None,
            budget: "free".into(),
        };
        let set = client_for(&server).generate_roadmap(&request).await.unwrap();
        assert_eq!(set.roadmap_id, "roadmap_1");
        let balanced = &set.roadmaps["balanced"];
        assert_eq!(balanced.hours_per_week, 10.0);
        assert_eq!(balanced.phases[0].topics, vec!["Basics".to_string()]);
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/progress/missing")
            .with_status(404)
            .with_body(r#"{"detail":"Progress not found"}"#)
            .create_async()
            .await;

        let err = client_for(&server).get_progress("missing").await.unwrap_err();
        match err {
            ApiError::Status { status, body, .. } => {
                assert_eq!(status, 404);
                assert!(body.contains("Progress not found"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/motivation/daily")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let err = client_for(&server).daily_motivation().await.unwrap_err();
        assert!(matches!(err, ApiError::Request { .. }));
    }

    #[tokio::test]
    async fn adjust_goals_targets_roadmap_path() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/progress/roadmap_9/adjust")
            .match_body(Matcher::PartialJson(json!({"new_time_commitment": 6})))
            .with_status(200)
            .with_body(r#"{"status":"success","message":"Goals adjusted successfully"}"#)
            .create_async()
            .await;

        let ack = client_for(&server)
            .adjust_goals(&GoalAdjustment {
                roadmap_id: "roadmap_9".into(),
                new_time_commitment: 6,
                new_deadline: None,
            })
            .await
            .unwrap();
        assert_eq!(ack.status, "success");
        mock.assert_async().await;
    }
}
