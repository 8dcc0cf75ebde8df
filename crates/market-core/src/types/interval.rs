//! 과거 시세 조회를 위한 기간(period)과 캔들 간격(interval) 정의.
//!
//! 업스트림 제공자가 받는 문자열을 그대로 사용합니다
//! (예: `1mo`, `1d`). 캐시 키에도 이 문자열이 들어갑니다.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 과거 시세 조회 기간.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HistoryPeriod {
    /// 1일
    #[serde(rename = "1d")]
    D1,
    /// 5일
    #[serde(rename = "5d")]
    D5,
    /// 1개월
    #[default]
    #[serde(rename = "1mo")]
    Mo1,
    /// 3개월
    #[serde(rename = "3mo")]
    Mo3,
    /// 6개월
    #[serde(rename = "6mo")]
    Mo6,
    /// 1년
    #[serde(rename = "1y")]
    Y1,
    /// 2년
    #[serde(rename = "2y")]
    Y2,
    /// 5년
    #[serde(rename = "5y")]
    Y5,
    /// 10년
    #[serde(rename = "10y")]
    Y10,
    /// 연초 이후
    #[serde(rename = "ytd")]
    Ytd,
    /// 전체 기간
    #[serde(rename = "max")]
    Max,
}

impl HistoryPeriod {
    /// 지원하는 모든 기간.
    pub const ALL: [HistoryPeriod; 11] = [
        HistoryPeriod::D1,
        HistoryPeriod::D5,
        HistoryPeriod::Mo1,
        HistoryPeriod::Mo3,
        HistoryPeriod::Mo6,
        HistoryPeriod::Y1,
        HistoryPeriod::Y2,
        HistoryPeriod::Y5,
        HistoryPeriod::Y10,
        HistoryPeriod::Ytd,
        HistoryPeriod::Max,
    ];

    /// 업스트림 range 문자열.
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryPeriod::D1 => "1d",
            HistoryPeriod::D5 => "5d",
            HistoryPeriod::Mo1 => "1mo",
            HistoryPeriod::Mo3 => "3mo",
            HistoryPeriod::Mo6 => "6mo",
            HistoryPeriod::Y1 => "1y",
            HistoryPeriod::Y2 => "2y",
            HistoryPeriod::Y5 => "5y",
            HistoryPeriod::Y10 => "10y",
            HistoryPeriod::Ytd => "ytd",
            HistoryPeriod::Max => "max",
        }
    }
}

impl fmt::Display for HistoryPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HistoryPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("Invalid period: {}", s))
    }
}

/// 캔들 간격.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BarInterval {
    /// 1분봉
    #[serde(rename = "1m")]
    M1,
    /// 2분봉
    #[serde(rename = "2m")]
    M2,
    /// 5분봉
    #[serde(rename = "5m")]
    M5,
    /// 15분봉
    #[serde(rename = "15m")]
    M15,
    /// 30분봉
    #[serde(rename = "30m")]
    M30,
    /// 60분봉
    #[serde(rename = "60m")]
    M60,
    /// 90분봉
    #[serde(rename = "90m")]
    M90,
    /// 1시간봉
    #[serde(rename = "1h")]
    H1,
    /// 일봉
    #[default]
    #[serde(rename = "1d")]
    D1,
    /// 5일봉
    #[serde(rename = "5d")]
    D5,
    /// 주봉
    #[serde(rename = "1wk")]
    W1,
    /// 월봉
    #[serde(rename = "1mo")]
    Mo1,
    /// 분기봉
    #[serde(rename = "3mo")]
    Mo3,
}

impl BarInterval {
    /// 지원하는 모든 간격.
    pub const ALL: [BarInterval; 13] = [
        BarInterval::M1,
        BarInterval::M2,
        BarInterval::M5,
        BarInterval::M15,
        BarInterval::M30,
        BarInterval::M60,
        BarInterval::M90,
        BarInterval::H1,
        BarInterval::D1,
        BarInterval::D5,
        BarInterval::W1,
        BarInterval::Mo1,
        BarInterval::Mo3,
    ];

    /// 업스트림 interval 문자열.
    pub fn as_str(&self) -> &'static str {
        match self {
            BarInterval::M1 => "1m",
            BarInterval::M2 => "2m",
            BarInterval::M5 => "5m",
            BarInterval::M15 => "15m",
            BarInterval::M30 => "30m",
            BarInterval::M60 => "60m",
            BarInterval::M90 => "90m",
            BarInterval::H1 => "1h",
            BarInterval::D1 => "1d",
            BarInterval::D5 => "5d",
            BarInterval::W1 => "1wk",
            BarInterval::Mo1 => "1mo",
            BarInterval::Mo3 => "3mo",
        }
    }

    /// 분봉/시간봉인지 확인.
    pub fn is_intraday(&self) -> bool {
        matches!(
            self,
            BarInterval::M1
                | BarInterval::M2
                | BarInterval::M5
                | BarInterval::M15
                | BarInterval::M30
                | BarInterval::M60
                | BarInterval::M90
                | BarInterval::H1
        )
    }
}

impl fmt::Display for BarInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BarInterval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|i| i.as_str() == s)
            .ok_or_else(|| format!("Invalid interval: {}", s))
    }
}
