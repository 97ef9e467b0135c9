use serde::{Deserialize, Serialize};

use crate::validation::FieldError;

/// 统一响应结构
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResult<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

/// 列表分页信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u64,
}

impl PageMeta {
    pub fn new(total: u64, page: u32, limit: u32) -> Self {
        Self {
            total,
            page,
            limit,
            total_pages: total.div_ceil(limit.max(1) as u64),
        }
    }
}

impl<T> ApiResult<T> {
    pub fn success(message: &str, data: T) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            data: Some(data),
            meta: None,
            errors: None,
        }
    }

    pub fn paged(message: &str, data: T, meta: PageMeta) -> Self {
        Self {
            meta: Some(meta),
            ..Self::success(message, data)
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            data: None,
            meta: None,
            errors: None,
        }
    }
}

impl ApiResult<()> {
    pub fn message(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            data: None,
            meta: None,
            errors: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(PageMeta::new(25, 2, 10).total_pages, 3);
        assert_eq!(PageMeta::new(20, 1, 10).total_pages, 2);
        assert_eq!(PageMeta::new(0, 1, 10).total_pages, 0);
    }

    #[test]
    fn empty_fields_are_omitted() {
        let json = serde_json::to_value(ApiResult::<()>::error("User not found")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "success": false, "message": "User not found" })
        );
    }
}
