//! アップロードフォームコンポーネント
//!
//! 選択済みファイルは再選択でのみ置き換わる（明示的なクリア操作はない）。

use leptos::prelude::*;
use web_sys::{File, HtmlInputElement};

use crate::app::UploadStatus;

#[component]
pub fn UploadForm<FU>(
    selected_file: RwSignal<Option<File>, LocalStorage>,
    set_labels: WriteSignal<String>,
    upload_status: ReadSignal<UploadStatus>,
    on_upload: FU,
) -> impl IntoView
where
    FU: Fn(()) + 'static + Clone,
{
    let on_file_change = move |ev: web_sys::Event| {
        let input = event_target::<HtmlInputElement>(&ev);
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            selected_file.set(Some(file));
        }
    };

    let on_submit = {
        let on_upload = on_upload.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            on_upload(());
        }
    };

    view! {
        <form class="upload-form" on:submit=on_submit>
            <div class="form-group">
                <label for="file">"Upload Photo:"</label>
                <input type="file" id="file" on:change=on_file_change />
            </div>

            <div class="form-group">
                <label for="labels">"Labels:"</label>
                <input
                    type="text"
                    id="labels"
                    placeholder="Enter labels separated by commas..."
                    on:input=move |ev| {
                        set_labels.set(event_target_value(&ev));
                    }
                />
            </div>

            <button type="submit" class="btn btn-primary">"Upload"</button>

            {move || {
                let status = upload_status.get();
                let (class, message) = match &status {
                    UploadStatus::Idle => return None,
                    UploadStatus::Success(message) => ("upload-status success", message.clone()),
                    UploadStatus::Failure(message) => ("upload-status failure", message.clone()),
                };
                Some(view! { <p class=class>{message}</p> })
            }}
        </form>
    }
}
