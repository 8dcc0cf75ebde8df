//! 정적 종목 카탈로그.
//!
//! 검색 대상은 고정된 참조 목록이며 사용자 데이터가 아닙니다.

/// 기본 검색 카탈로그 (NSE 대형주, 주요 지수, 귀금속 선물).
const DEFAULT_ENTRIES: &[(&str, &str)] = &[
    ("RELIANCE.NS", "Reliance Industries"),
    ("TCS.NS", "Tata Consultancy Services"),
    ("HDFCBANK.NS", "HDFC Bank"),
    ("INFY.NS", "Infosys"),
    ("ICICIBANK.NS", "ICICI Bank"),
    ("SBIN.NS", "State Bank of India"),
    ("BHARTIARTL.NS", "Bharti Airtel"),
    ("ITC.NS", "ITC Limited"),
    ("KOTAKBANK.NS", "Kotak Mahindra Bank"),
    ("LICI.NS", "Life Insurance Corporation"),
    ("TATAMOTORS.NS", "Tata Motors"),
    ("MARUTI.NS", "Maruti Suzuki"),
    ("SUNPHARMA.NS", "Sun Pharmaceutical"),
    ("AXISBANK.NS", "Axis Bank"),
    ("TITAN.NS", "Titan Company"),
    ("BAJFINANCE.NS", "Bajaj Finance"),
    ("ULTRACEMCO.NS", "UltraTech Cement"),
    ("ASIANPAINT.NS", "Asian Paints"),
    ("WIPRO.NS", "Wipro"),
    ("HCLTECH.NS", "HCL Technologies"),
    ("^NSEI", "NIFTY 50"),
    ("^BSESN", "SENSEX"),
    ("GC=F", "Gold"),
    ("SI=F", "Silver"),
];

/// 원자재 개요에 사용하는 선물 심볼.
pub const COMMODITIES: &[(&str, &str)] = &[
    ("GC=F", "Gold"),
    ("SI=F", "Silver"),
    ("CL=F", "Crude Oil"),
];

/// 카탈로그 항목.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub symbol: String,
    pub name: String,
}

/// 불변 종목 카탈로그.
#[derive(Debug, Clone)]
pub struct SymbolCatalog {
    entries: Vec<CatalogEntry>,
}

impl SymbolCatalog {
    /// (심볼, 이름) 쌍으로 카탈로그를 만듭니다.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            entries: pairs
                .iter()
                .map(|(symbol, name)| CatalogEntry {
                    symbol: symbol.to_string(),
                    name: name.to_string(),
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 심볼 또는 이름에 대한 대소문자 무시 부분 문자열 검색.
    ///
    /// 결과는 카탈로그 순서를 따릅니다. 공백뿐인 질의는 아무것도 찾지 않습니다.
    pub fn search(&self, query: &str) -> Vec<&CatalogEntry> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.entries
            .iter()
            .filter(|entry| {
                entry.symbol.to_lowercase().contains(&needle)
                    || entry.name.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

impl Default for SymbolCatalog {
    fn default() -> Self {
        Self::from_pairs(DEFAULT_ENTRIES)
    }
}
