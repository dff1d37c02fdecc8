//! メインアプリケーションコンポーネント

use std::future::Future;

use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::File;

use crate::api::{search, upload};
use crate::components::{
    header::Header, results_grid::ResultsGrid, search_panel::SearchPanel,
    upload_form::UploadForm,
};
use crate::speech::Dictation;

/// 表示中のタブ
#[derive(Clone, Copy, PartialEq)]
pub enum Tab {
    Search,
    Upload,
}

/// アップロード試行の表示状態
#[derive(Clone, PartialEq)]
pub enum UploadStatus {
    Idle,
    Success(String),
    Failure(String),
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let (active_tab, set_active_tab) = signal(Tab::Search);

    // 検索状態
    let (query, set_query) = signal(String::new());
    let (results, set_results) = signal(Vec::<String>::new());
    let (loading, set_loading) = signal(false);
    let (recording, set_recording) = signal(false);

    // アップロード状態
    let selected_file = RwSignal::new_local(None::<File>);
    let (labels, set_labels) = signal(String::new());
    let (upload_status, set_upload_status) = signal(UploadStatus::Idle);

    // 認識オブジェクトはマウント時に一度だけ構築する。
    // 未対応環境ではNoneのままで、トグルは何もしない。
    let dictation = StoredValue::new_local(Dictation::new(
        move |transcript| set_query.set(transcript),
        move || set_recording.set(false),
    ));

    // 検索ハンドラ（Enterキーと検索ボタンの両方から呼ばれる）
    let on_search = move |_: ()| {
        let q = query.get_untracked();
        if q.is_empty() {
            return;
        }
        spawn_local(async move {
            drive_search(
                q,
                |q| async move { search::search_photos(&q).await },
                &|flag| set_loading.set(flag),
                |paths| set_results.set(paths),
                |e| {
                    gloo::console::error!("There was an error fetching the search results:", e);
                },
            )
            .await;
        });
    };

    // 音声入力トグルハンドラ
    let on_toggle_voice = move |_: ()| {
        dictation.with_value(|dictation| {
            let Some(dictation) = dictation else {
                return;
            };
            if recording.get_untracked() {
                dictation.stop();
                set_recording.set(false);
            } else {
                dictation.start();
                set_recording.set(true);
            }
        });
    };

    // アップロードハンドラ（ファイル未選択なら何もしない）
    let on_upload = move |_: ()| {
        set_upload_status.set(UploadStatus::Idle);

        let Some((file, labels_raw)) =
            upload_input(selected_file.get_untracked(), labels.get_untracked())
        else {
            return;
        };
        spawn_local(async move {
            let status = match upload::upload_photo(&file, &labels_raw).await {
                Ok(()) => UploadStatus::Success("Successfully uploaded image!".to_string()),
                Err(e) => {
                    gloo::console::error!(
                        "There was an error uploading the file:",
                        e.to_string()
                    );
                    UploadStatus::Failure(e.to_string())
                }
            };
            set_upload_status.set(status);
        });
    };

    view! {
        <div class="page">
            <Header />

            <main class="content">
                <div class="tab-list">
                    <button
                        class="tab-trigger"
                        class:active=move || active_tab.get() == Tab::Search
                        on:click=move |_| set_active_tab.set(Tab::Search)
                    >
                        "Search"
                    </button>
                    <button
                        class="tab-trigger"
                        class:active=move || active_tab.get() == Tab::Upload
                        on:click=move |_| set_active_tab.set(Tab::Upload)
                    >
                        "Upload"
                    </button>
                </div>

                <section class="tab-pane" class:hidden=move || active_tab.get() != Tab::Search>
                    <SearchPanel
                        query=query
                        set_query=set_query
                        recording=recording
                        loading=loading
                        on_search=on_search
                        on_toggle_voice=on_toggle_voice
                    />
                    <ResultsGrid results=results />
                </section>

                <section class="tab-pane" class:hidden=move || active_tab.get() != Tab::Upload>
                    <UploadForm
                        selected_file=selected_file
                        set_labels=set_labels
                        upload_status=upload_status
                        on_upload=on_upload
                    />
                </section>
            </main>
        </div>
    }
}

/// 検索1回分の進行
///
/// loadingは送信前に立て、成否に関わらず完了後に下ろす。
/// 失敗時は結果リストに触らず、ログに残すだけ。
async fn drive_search<Fut, E>(
    query: String,
    fetch: impl FnOnce(String) -> Fut,
    set_loading: &impl Fn(bool),
    on_results: impl FnOnce(Vec<String>),
    on_error: impl FnOnce(E),
) where
    Fut: Future<Output = Result<Vec<String>, E>>,
{
    set_loading(true);
    match fetch(query).await {
        Ok(paths) => on_results(paths),
        Err(e) => on_error(e),
    }
    set_loading(false);
}

/// アップロード試行の入力検証
///
/// ファイル未選択ならNoneを返し、リクエストは一切組み立てない。
fn upload_input<T>(selected: Option<T>, labels_raw: String) -> Option<(T, String)> {
    let file = selected?;
    Some((file, labels_raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::pin::pin;
    use std::task::{Context, Poll, Waker};

    fn poll_ready<F: Future>(future: F) -> F::Output {
        let mut future = pin!(future);
        let mut cx = Context::from_waker(Waker::noop());
        match future.as_mut().poll(&mut cx) {
            Poll::Ready(output) => output,
            Poll::Pending => panic!("future should resolve immediately"),
        }
    }

    #[test]
    fn test_search_sets_loading_around_success() {
        let transitions = RefCell::new(Vec::new());
        let results = RefCell::new(Vec::new());

        poll_ready(drive_search(
            "beach".to_string(),
            |_q| {
                std::future::ready(Ok::<_, String>(vec![
                    "https://x/1.jpg".to_string(),
                    "https://x/2.jpg".to_string(),
                ]))
            },
            &|flag| transitions.borrow_mut().push(flag),
            |paths| *results.borrow_mut() = paths,
            |_e: String| {},
        ));

        assert_eq!(*transitions.borrow(), vec![true, false]);
        assert_eq!(
            *results.borrow(),
            vec!["https://x/1.jpg".to_string(), "https://x/2.jpg".to_string()]
        );
    }

    #[test]
    fn test_search_clears_loading_on_failure_and_keeps_results() {
        let transitions = RefCell::new(Vec::new());
        let results = RefCell::new(vec!["https://x/old.jpg".to_string()]);
        let logged = RefCell::new(None);

        poll_ready(drive_search(
            "dog".to_string(),
            |_q| std::future::ready(Err::<Vec<String>, _>("network down".to_string())),
            &|flag| transitions.borrow_mut().push(flag),
            |paths| *results.borrow_mut() = paths,
            |e: String| *logged.borrow_mut() = Some(e),
        ));

        assert_eq!(*transitions.borrow(), vec![true, false]);
        assert_eq!(*results.borrow(), vec!["https://x/old.jpg".to_string()]);
        assert_eq!(logged.borrow().as_deref(), Some("network down"));
    }

    #[test]
    fn test_upload_input_without_file_is_a_no_op() {
        assert!(upload_input(None::<()>, "cat,dog".to_string()).is_none());
    }

    #[test]
    fn test_upload_input_passes_file_and_labels_through() {
        let input = upload_input(Some("photo.JPG"), " Sunset, Ocean ".to_string());
        assert_eq!(input, Some(("photo.JPG", " Sunset, Ocean ".to_string())));
    }
}
