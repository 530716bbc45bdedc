//! Query string parameters.

use serde::Deserialize;

use crate::handlers::ApiError;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartQuery {
    pub days: Option<i64>,
}

/// `?isActive=true|false` on the category list
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryListQuery {
    pub is_active: Option<String>,
}

impl CategoryListQuery {
    pub fn is_active(&self) -> Result<Option<bool>, ApiError> {
        match self.is_active.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(v) if v.eq_ignore_ascii_case("true") || v == "1" => Ok(Some(true)),
            Some(v) if v.eq_ignore_ascii_case("false") || v == "0" => Ok(Some(false)),
            Some(v) => Err(ApiError::BadRequest(format!(
                "isActive must be true or false, got '{}'",
                v
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(value: Option<&str>) -> CategoryListQuery {
        CategoryListQuery { is_active: value.map(str::to_string) }
    }

    #[test]
    fn test_is_active_filter_parsing() {
        assert_eq!(query(None).is_active().unwrap(), None);
        assert_eq!(query(Some("true")).is_active().unwrap(), Some(true));
        assert_eq!(query(Some("FALSE")).is_active().unwrap(), Some(false));
        assert_eq!(query(Some("")).is_active().unwrap(), None);
        assert!(query(Some("maybe")).is_active().is_err());
    }
}
