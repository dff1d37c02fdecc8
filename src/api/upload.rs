//! 画像アップロード（ストレージへの直接PUT）
//!
//! オブジェクト名はUUID v4 + 元ファイルの拡張子。クライアント生成のため
//! サーバ側の衝突チェックはない（衝突確率が無視できる前提の割り切り）。

use thiserror::Error;
use uuid::Uuid;
use wasm_bindgen::prelude::*;
use web_sys::{File, Request, RequestInit, RequestMode};

use super::{fetch, API_BASE, STAGE, UPLOAD_BUCKET};

/// アップロード失敗
///
/// `Display`出力がそのままステータスメッセージになる。
#[derive(Debug, Error)]
pub enum UploadError {
    /// 2xx以外のHTTPレスポンス（ステータステキストを保持）
    #[error("Failed to upload image: {0}.")]
    Http(String),

    /// fetch自体の失敗（ネットワーク断など）
    #[error("Error uploading image: {0}.")]
    Network(String),
}

/// ラベル文字列の正規化
///
/// 全体を小文字化し、カンマで分割して各タグをトリムし、カンマで連結する。
/// 正規化済みの文字列に再適用しても結果は変わらない。
pub fn normalize_labels(raw: &str) -> String {
    raw.to_lowercase()
        .split(',')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(",")
}

/// 元ファイル名の最後の'.'以降を拡張子として返す
///
/// '.'を含まない名前では名前全体を返す（元の挙動を保持）。
pub fn file_extension(file_name: &str) -> &str {
    match file_name.rsplit_once('.') {
        Some((_, extension)) => extension,
        None => file_name,
    }
}

/// 一意なオブジェクト名を生成する（UUID v4 + 拡張子）
pub fn object_name(file_name: &str) -> String {
    format!("{}.{}", Uuid::new_v4(), file_extension(file_name))
}

/// ファイルをストレージへPUTする
///
/// 本体は生のファイルバイト列、Content-Typeはファイル申告のMIMEタイプ、
/// 正規化済みラベルはメタデータヘッダで送る。レスポンス本文は見ない。
pub async fn upload_photo(file: &File, labels_raw: &str) -> Result<(), UploadError> {
    let name = object_name(&file.name());
    let labels = normalize_labels(labels_raw);
    let encoded_name = String::from(js_sys::encode_uri_component(&name));
    let url = format!(
        "{}/{}/upload/{}/{}",
        API_BASE, STAGE, UPLOAD_BUCKET, encoded_name
    );

    let opts = RequestInit::new();
    opts.set_method("PUT");
    opts.set_mode(RequestMode::Cors);
    let body: &JsValue = file.as_ref();
    opts.set_body(body);

    let request = Request::new_with_str_and_init(&url, &opts).map_err(network_error)?;
    let headers = request.headers();
    headers
        .set("Content-Type", &file.type_())
        .map_err(network_error)?;
    headers
        .set("x-amz-meta-customLabels", &labels)
        .map_err(network_error)?;

    let resp = fetch(&request).await.map_err(network_error)?;

    if resp.ok() {
        Ok(())
    } else {
        Err(UploadError::Http(resp.status_text()))
    }
}

/// 捕捉した例外をステータスメッセージ向けの文字列にする
///
/// Errorオブジェクトは`toString()`相当（例: "TypeError: Failed to fetch"）、
/// 文字列はそのまま使い、それ以外のみDebug表現に落とす。
fn network_error(value: JsValue) -> UploadError {
    let detail = value
        .dyn_ref::<js_sys::Error>()
        .map(|error| String::from(error.to_string()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{:?}", value));
    UploadError::Network(detail)
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn test_network_error_uses_exception_description() {
        let exception: JsValue = js_sys::TypeError::new("Failed to fetch").into();
        let error = network_error(exception);
        assert_eq!(
            error.to_string(),
            "Error uploading image: TypeError: Failed to fetch."
        );
    }

    #[wasm_bindgen_test]
    fn test_network_error_passes_plain_strings_through() {
        let error = network_error(JsValue::from_str("connection reset"));
        assert_eq!(
            error.to_string(),
            "Error uploading image: connection reset."
        );
    }
}
