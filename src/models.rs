use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub url: String,
}

/// Fields pulled from one fetched page.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct PageSnapshot {
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub heading: Option<String>,
    pub word_count: usize,
    pub is_https: bool,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisResult {
    Success {
        #[serde(flatten)]
        snapshot: PageSnapshot,
        insights: Vec<String>,
        /// The URL exactly as the user typed it.
        domain: String,
    },
    Failure {
        error: String,
    },
}
