//! 시장 뉴스.

use serde::{Deserialize, Serialize};

/// 뉴스 기사.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub title: Option<String>,
    pub link: Option<String>,
    pub publisher: Option<String>,
    /// 게시 시각 (Unix 초, 알 수 없으면 0)
    #[serde(default)]
    pub provider_publish_time: i64,
    /// 기사 유형 (기본 "STORY")
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    /// 썸네일 URL
    #[serde(default)]
    pub thumbnail: Option<String>,
}

fn default_kind() -> String {
    "STORY".to_string()
}
