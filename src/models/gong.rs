use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Response from `POST /v2/calls/transcript`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptResponse {
    pub call_transcripts: Vec<CallTranscript>,
}

/// The diarized transcript of one call
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallTranscript {
    /// Call id, reported as a decimal string
    pub call_id: String,
    pub transcript: Vec<GongMonologue>,
}

/// One diarized speaker turn as Gong reports it
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GongMonologue {
    pub speaker_id: String,
    #[serde(default)]
    pub topic: Option<String>,
    pub sentences: Vec<GongSentence>,
}

/// A sentence with timestamps already in integer milliseconds
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GongSentence {
    pub start: i64,
    pub end: i64,
    pub text: String,
}

/// Response from `POST /v2/calls/extensive`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CallsResponse {
    pub calls: Vec<CallData>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallData {
    pub meta_data: CallMetaData,
    #[serde(default)]
    pub media: Option<CallMedia>,
    #[serde(default)]
    pub parties: Vec<CallParty>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CallMetaData {
    /// Call id, reported as a decimal string
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub started: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallMedia {
    #[serde(default)]
    pub audio_url: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
}

/// A call participant; `speaker_id` links parties to transcript turns
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallParty {
    #[serde(default)]
    pub speaker_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email_address: Option<String>,
}
