//! 音声入力バインディング（Web Speech API）
//!
//! web-sysは接頭辞付きの`webkitSpeechRecognition`を扱えないため、
//! ダックタイピングのexternブロックで直接バインドする。
//! コンストラクタは`window`上のプロパティ検出で取得する。

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// プラットフォームのSpeechRecognitionインスタンス（接頭辞の有無を問わない）
    pub type SpeechRecognition;

    #[wasm_bindgen(method, catch)]
    fn start(this: &SpeechRecognition) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch)]
    fn stop(this: &SpeechRecognition) -> Result<(), JsValue>;

    #[wasm_bindgen(method, setter, js_name = "continuous")]
    fn set_continuous(this: &SpeechRecognition, value: bool);

    #[wasm_bindgen(method, setter, js_name = "interimResults")]
    fn set_interim_results(this: &SpeechRecognition, value: bool);

    #[wasm_bindgen(method, setter, js_name = "onresult")]
    fn set_onresult(this: &SpeechRecognition, callback: Option<&js_sys::Function>);

    #[wasm_bindgen(method, setter, js_name = "onend")]
    fn set_onend(this: &SpeechRecognition, callback: Option<&js_sys::Function>);

    /// `onresult`で届く認識イベント
    type RecognitionResultEvent;

    #[wasm_bindgen(method, getter, js_name = "resultIndex")]
    fn result_index(this: &RecognitionResultEvent) -> u32;

    #[wasm_bindgen(method, getter)]
    fn results(this: &RecognitionResultEvent) -> RecognitionResultList;

    type RecognitionResultList;

    #[wasm_bindgen(method, getter)]
    fn length(this: &RecognitionResultList) -> u32;

    #[wasm_bindgen(method)]
    fn item(this: &RecognitionResultList, index: u32) -> RecognitionResult;

    type RecognitionResult;

    #[wasm_bindgen(method, getter, js_name = "isFinal")]
    fn is_final(this: &RecognitionResult) -> bool;

    #[wasm_bindgen(method, js_name = "item")]
    fn alternative(this: &RecognitionResult, index: u32) -> RecognitionAlternative;

    type RecognitionAlternative;

    #[wasm_bindgen(method, getter)]
    fn transcript(this: &RecognitionAlternative) -> String;
}

/// 認識イベントの明示的な表現
///
/// `results`はイベントが報告した全バッチ。`result_index`以降が
/// 今回更新されたセグメント。
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptEvent {
    pub result_index: usize,
    pub results: Vec<TranscriptSegment>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptSegment {
    pub transcript: String,
    pub is_final: bool,
}

/// `result_index`から末尾までのセグメントを順に連結する
///
/// 確定(final)・暫定(interim)を区別せず両方連結する。確定済みテキストが
/// 再度現れて重複しうるが、観測済みの挙動をそのまま保持している。
pub fn merge_transcript(event: &TranscriptEvent) -> String {
    event
        .results
        .iter()
        .skip(event.result_index)
        .map(|segment| segment.transcript.as_str())
        .collect()
}

fn to_transcript_event(event: &RecognitionResultEvent) -> TranscriptEvent {
    let results = event.results();
    let segments = (0..results.length())
        .map(|i| {
            let result = results.item(i);
            TranscriptSegment {
                transcript: result.alternative(0).transcript(),
                is_final: result.is_final(),
            }
        })
        .collect();

    TranscriptEvent {
        result_index: event.result_index() as usize,
        results: segments,
    }
}

/// 音声入力ラッパー
///
/// 認識オブジェクトとコールバックをコンポーネントの生存期間だけ所有する。
/// 公開面は {start, stop, onresult, onend} のみ。
pub struct Dictation {
    recognition: SpeechRecognition,
    _on_result: Closure<dyn FnMut(RecognitionResultEvent)>,
    _on_end: Closure<dyn FnMut()>,
}

impl Dictation {
    /// プラットフォームが音声認識を公開していれば構築する
    ///
    /// `continuous`と`interimResults`は無条件に有効化。
    /// 未対応環境では`None`を返し、呼び出し側のトグルは何もしない。
    pub fn new(
        on_transcript: impl Fn(String) + 'static,
        on_end: impl Fn() + 'static,
    ) -> Option<Self> {
        let recognition = construct_recognition()?;
        recognition.set_continuous(true);
        recognition.set_interim_results(true);

        let on_result = Closure::wrap(Box::new(move |event: RecognitionResultEvent| {
            on_transcript(merge_transcript(&to_transcript_event(&event)));
        }) as Box<dyn FnMut(RecognitionResultEvent)>);
        recognition.set_onresult(Some(on_result.as_ref().unchecked_ref()));

        let on_end = Closure::wrap(Box::new(move || on_end()) as Box<dyn FnMut()>);
        recognition.set_onend(Some(on_end.as_ref().unchecked_ref()));

        Some(Self {
            recognition,
            _on_result: on_result,
            _on_end: on_end,
        })
    }

    pub fn start(&self) {
        if let Err(e) = self.recognition.start() {
            gloo::console::error!("Failed to start speech recognition:", e);
        }
    }

    pub fn stop(&self) {
        if let Err(e) = self.recognition.stop() {
            gloo::console::error!("Failed to stop speech recognition:", e);
        }
    }
}

/// `window.SpeechRecognition || window.webkitSpeechRecognition`を構築する
fn construct_recognition() -> Option<SpeechRecognition> {
    let window = web_sys::window()?;
    let constructor = ["SpeechRecognition", "webkitSpeechRecognition"]
        .iter()
        .find_map(|name| {
            js_sys::Reflect::get(&window, &JsValue::from_str(name))
                .ok()
                .filter(|value| !value.is_undefined())
        })?;
    let constructor: js_sys::Function = constructor.dyn_into().ok()?;
    let instance = js_sys::Reflect::construct(&constructor, &js_sys::Array::new()).ok()?;
    Some(instance.unchecked_into())
}
