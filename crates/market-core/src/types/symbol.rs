//! 업스트림 제공자 형식의 심볼 처리.
//!
//! 심볼은 제공자 고유 문법을 그대로 따릅니다:
//! - 거래소 접미사: `RELIANCE.NS`, `500325.BO`
//! - 지수 접두사: `^NSEI`, `^BSESN`
//! - 선물/환율 접미사: `GC=F`, `KRW=X`
//!
//! 파이프라인은 심볼을 정규화하지 않습니다. 여기의 함수들은 입력 검증과
//! 표시용 메타데이터 추정에만 사용됩니다.

use crate::error::{MarketError, MarketResult};

/// 심볼 최대 길이.
pub const MAX_SYMBOL_LEN: usize = 32;

/// 심볼 형식을 검증합니다.
///
/// 빈 문자열, 너무 긴 문자열, 허용되지 않은 문자를 거부합니다.
/// 허용 문자: ASCII 영숫자와 `. ^ = - _ &`
pub fn validate_symbol(symbol: &str) -> MarketResult<()> {
    if symbol.is_empty() {
        return Err(MarketError::InvalidInput("심볼이 비어 있습니다".to_string()));
    }

    if symbol.len() > MAX_SYMBOL_LEN {
        return Err(MarketError::InvalidInput(format!(
            "심볼이 너무 깁니다 ({}자 초과): {}",
            MAX_SYMBOL_LEN, symbol
        )));
    }

    if let Some(c) = symbol
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '^' | '=' | '-' | '_' | '&')))
    {
        return Err(MarketError::InvalidInput(format!(
            "허용되지 않은 문자 '{}': {}",
            c, symbol
        )));
    }

    Ok(())
}

/// 심볼 접미사로 거래소 코드를 추정합니다.
pub fn exchange_for(symbol: &str) -> &'static str {
    if symbol.ends_with(".NS") {
        "NSE"
    } else if symbol.ends_with(".BO") {
        "BSE"
    } else {
        "N/A"
    }
}

/// 심볼 문법으로 상품 유형을 추정합니다.
pub fn quote_type_for(symbol: &str) -> &'static str {
    if symbol.starts_with('^') {
        "INDEX"
    } else if symbol.ends_with("=F") {
        "FUTURE"
    } else if symbol.ends_with("=X") {
        "CURRENCY"
    } else {
        "EQUITY"
    }
}
