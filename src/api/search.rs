//! 画像検索API呼び出し

use serde::Deserialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::Request;

use super::{fetch, API_BASE, STAGE};

/// 検索エンドポイントのレスポンス
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "imagePaths")]
    pub image_paths: Vec<String>,
}

/// 検索を実行して画像URLのリストを返す
///
/// クエリはパーセントエンコードしてクエリ文字列に載せる。
/// 失敗時は呼び出し側でログに残すだけで、表示中のリストは変更しない。
pub async fn search_photos(query: &str) -> Result<Vec<String>, JsValue> {
    let encoded = String::from(js_sys::encode_uri_component(query));
    let url = format!("{}/{}/search?q={}", API_BASE, STAGE, encoded);

    let request = Request::new_with_str(&url)?;
    let resp = fetch(&request).await?;

    let json = JsFuture::from(resp.json()?).await?;
    let response: SearchResponse = serde_wasm_bindgen::from_value(json)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    Ok(response.image_paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_preserves_order_and_length() {
        let body = r#"{"imagePaths": ["https://x/1.jpg", "https://x/2.jpg"]}"#;
        let response: SearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            response.image_paths,
            vec!["https://x/1.jpg", "https://x/2.jpg"]
        );
    }

    #[test]
    fn test_search_response_empty() {
        let body = r#"{"imagePaths": []}"#;
        let response: SearchResponse = serde_json::from_str(body).unwrap();
        assert!(response.image_paths.is_empty());
    }

    #[test]
    fn test_search_response_missing_field_is_an_error() {
        let body = r#"{"paths": []}"#;
        assert!(serde_json::from_str::<SearchResponse>(body).is_err());
    }
}
