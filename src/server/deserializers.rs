use serde::{Deserialize, Deserializer};

pub fn default_page() -> i64 {
    1
}

// query params arrive as strings; an absent or unparsable page falls back to
// the first page instead of rejecting the request
pub fn deserialize_page_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or_else(default_page))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize)]
    struct PageQuery {
        #[serde(default = "default_page", deserialize_with = "deserialize_page_number")]
        page: i64,
    }

    #[test]
    fn parses_a_plain_number() {
        let query: PageQuery = serde_json::from_value(json!({"page": "3"})).unwrap();
        assert_eq!(query.page, 3);
    }

    #[test]
    fn garbage_falls_back_to_first_page() {
        let query: PageQuery = serde_json::from_value(json!({"page": "abc"})).unwrap();
        assert_eq!(query.page, 1);
    }

    #[test]
    fn absent_param_defaults() {
        let query: PageQuery = serde_json::from_value(json!({})).unwrap();
        assert_eq!(query.page, 1);
    }
}
