//! 検索・アップロードAPI連携
//!
//! 両エンドポイントは不透明な外部コラボレータとして扱う。
//! 認証なし、リトライなし、1操作につき1リクエスト。

pub mod search;
pub mod upload;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, Response};

pub(crate) const API_BASE: &str = "https://bb60usynxd.execute-api.us-east-1.amazonaws.com";
pub(crate) const STAGE: &str = "test-latest";
pub(crate) const UPLOAD_BUCKET: &str = "b2-ccbd-asgn2";

/// fetch実行（共通処理）
pub(crate) async fn fetch(request: &Request) -> Result<Response, JsValue> {
    let window = web_sys::window().unwrap();
    let resp_value = JsFuture::from(window.fetch_with_request(request)).await?;
    let resp: Response = resp_value.dyn_into()?;
    Ok(resp)
}
