//! Typed job data model mirroring the checking service's responses.
//!
//! The HTTP layer stays schema-free; these types give the job operations a
//! stable shape to decode into. Field names and value vocabularies follow
//! the service's wire format exactly.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Server-side lifecycle state of a checking job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JobStatus {
    /// Accepted, waiting for a worker.
    Pending,
    /// Check in progress.
    Running,
    /// Check finished; result file available for download.
    Done,
    /// Check failed; `error_message` explains why.
    Failed,
}

impl JobStatus {
    /// Returns the wire label for display output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Running => "RUNNING",
            Self::Done => "DONE",
            Self::Failed => "FAILED",
        }
    }

    /// Whether the job has reached a final state (no further polling useful).
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

/// How much of the check is delegated to an LLM provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AiMode {
    /// Rule-based check only.
    None,
    /// LLM performs the check directly.
    AiDirect,
    /// Rule-based check with LLM assistance.
    Hybrid,
}

impl AiMode {
    /// Returns the wire label sent in the `ai_mode` form field.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::AiDirect => "AI_DIRECT",
            Self::Hybrid => "HYBRID",
        }
    }
}

/// LLM provider backing the AI modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum Provider {
    /// No provider (rule-based check).
    None,
    /// OpenAI GPT.
    Gpt,
    /// DeepSeek.
    Deepseek,
    /// Alibaba Qwen.
    Qwen,
}

impl Provider {
    /// Returns the wire label sent in the `provider` form field.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Gpt => "GPT",
            Self::Deepseek => "DEEPSEEK",
            Self::Qwen => "QWEN",
        }
    }
}

/// Response to a successful job creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobCreated {
    /// Opaque identifier assigned by the server.
    pub job_id: String,
    /// Initial status (the server currently always reports `PENDING`).
    pub status: JobStatus,
    /// Initial progress percentage.
    pub progress: u8,
}

/// Full job status/result object from `GET /jobs/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobDetails {
    /// Opaque job identifier.
    pub id: String,
    /// Current lifecycle state.
    pub status: JobStatus,
    /// Progress percentage (0-100).
    pub progress: u8,
    /// Mode the job was submitted with.
    pub ai_mode: AiMode,
    /// Provider the job was submitted with.
    pub provider: Provider,
    /// Failure reason when `status` is `FAILED`.
    #[serde(default)]
    pub error_message: Option<String>,
    /// Server-side creation timestamp (opaque string, not interpreted).
    pub created_at: String,
    /// Server-side reference to the result file, when one exists.
    #[serde(default)]
    pub result_file: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_job_status_decodes_wire_labels() {
        for (raw, expected) in [
            ("\"PENDING\"", JobStatus::Pending),
            ("\"RUNNING\"", JobStatus::Running),
            ("\"DONE\"", JobStatus::Done),
            ("\"FAILED\"", JobStatus::Failed),
        ] {
            let status: JobStatus = serde_json::from_str(raw).unwrap();
            assert_eq!(status, expected);
        }
    }

    #[test]
    fn test_job_status_rejects_unknown_label() {
        let result: Result<JobStatus, _> = serde_json::from_str("\"CANCELLED\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_job_status_terminal_states() {
        assert!(JobStatus::Done.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
        assert!(!JobStatus::Pending.is_terminal());
        assert!(!JobStatus::Running.is_terminal());
    }

    #[test]
    fn test_ai_mode_wire_labels_round_trip() {
        for mode in [AiMode::None, AiMode::AiDirect, AiMode::Hybrid] {
            let encoded = serde_json::to_string(&mode).unwrap();
            assert_eq!(encoded, format!("\"{}\"", mode.as_str()));
            let decoded: AiMode = serde_json::from_str(&encoded).unwrap();
            assert_eq!(decoded, mode);
        }
    }

    #[test]
    fn test_provider_wire_labels_round_trip() {
        for provider in [
            Provider::None,
            Provider::Gpt,
            Provider::Deepseek,
            Provider::Qwen,
        ] {
            let encoded = serde_json::to_string(&provider).unwrap();
            assert_eq!(encoded, format!("\"{}\"", provider.as_str()));
        }
    }

    #[test]
    fn test_job_created_decodes_creation_response() {
        let created: JobCreated = serde_json::from_str(
            r#"{"job_id":"3f2b6c","status":"PENDING","progress":0}"#,
        )
        .unwrap();
        assert_eq!(created.job_id, "3f2b6c");
        assert_eq!(created.status, JobStatus::Pending);
        assert_eq!(created.progress, 0);
    }

    #[test]
    fn test_job_details_decodes_full_status_payload() {
        let details: JobDetails = serde_json::from_str(
            r#"{
                "id": "3f2b6c",
                "status": "DONE",
                "progress": 100,
                "ai_mode": "HYBRID",
                "provider": "DEEPSEEK",
                "error_message": null,
                "created_at": "2025-12-15T16:14:27Z",
                "result_file": "results/result_report_20251215_161427.docx"
            }"#,
        )
        .unwrap();
        assert_eq!(details.status, JobStatus::Done);
        assert_eq!(details.progress, 100);
        assert_eq!(details.ai_mode, AiMode::Hybrid);
        assert_eq!(details.provider, Provider::Deepseek);
        assert!(details.error_message.is_none());
        assert!(details.result_file.is_some());
    }

    #[test]
    fn test_job_details_tolerates_missing_optional_fields() {
        let details: JobDetails = serde_json::from_str(
            r#"{
                "id": "3f2b6c",
                "status": "RUNNING",
                "progress": 40,
                "ai_mode": "NONE",
                "provider": "NONE",
                "created_at": "2025-12-15T16:14:27Z"
            }"#,
        )
        .unwrap();
        assert!(details.error_message.is_none());
        assert!(details.result_file.is_none());
    }
}
