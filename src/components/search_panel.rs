//! 検索パネルコンポーネント
//!
//! クエリ入力欄、音声入力トグル、検索ボタン、ローディング表示を持つ。

use leptos::prelude::*;

#[component]
pub fn SearchPanel<FS, FV>(
    query: ReadSignal<String>,
    set_query: WriteSignal<String>,
    recording: ReadSignal<bool>,
    loading: ReadSignal<bool>,
    on_search: FS,
    on_toggle_voice: FV,
) -> impl IntoView
where
    FS: Fn(()) + 'static + Clone,
    FV: Fn(()) + 'static + Clone,
{
    let on_keydown = {
        let on_search = on_search.clone();
        move |ev: web_sys::KeyboardEvent| {
            if ev.key() == "Enter" {
                ev.prevent_default();
                on_search(());
            }
        }
    };

    view! {
        <div class="search-panel">
            <div class="search-box">
                <input
                    type="text"
                    id="search"
                    placeholder="Search for images..."
                    prop:value=move || query.get()
                    on:input=move |ev| {
                        set_query.set(event_target_value(&ev));
                    }
                    on:keydown=on_keydown
                />
                <button
                    class="btn-voice"
                    title="Voice Search"
                    on:click={
                        let on_toggle_voice = on_toggle_voice.clone();
                        move |_| on_toggle_voice(())
                    }
                >
                    {move || if recording.get() { "🔴" } else { "🎤" }}
                </button>
            </div>

            <p class="text-muted">
                "* Click the microphone button to record and again to stop when it is flashing."
            </p>

            <div class="search-actions">
                <button
                    class="btn btn-primary"
                    on:click={
                        let on_search = on_search.clone();
                        move |_| on_search(())
                    }
                >
                    "Search"
                </button>
            </div>

            <Show when=move || loading.get()>
                <div class="loading">
                    <div class="spinner"></div>
                </div>
            </Show>
        </div>
    }
}
