//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <nav class="header">
            <h1>"Photo Album"</h1>
        </nav>
    }
}
