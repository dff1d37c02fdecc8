//! 検索結果グリッドコンポーネント

use leptos::prelude::*;

/// グリッド項目のキー
///
/// 位置だけのキーでは同じ件数の別リストに差し替えたとき既存ビューが
/// 再利用されてしまう。URLを含めて差し替えを検知し、同一URLの重複にも
/// 位置で一意性を持たせる。
fn result_key(entry: &(usize, String)) -> (usize, String) {
    entry.clone()
}

#[component]
pub fn ResultsGrid(results: ReadSignal<Vec<String>>) -> impl IntoView {
    view! {
        <div class="results-grid">
            <For
                each=move || results.get().into_iter().enumerate()
                key=result_key
                children=move |(index, image_path)| {
                    view! {
                        <a href=image_path.clone() target="_blank" rel="noopener noreferrer">
                            <img
                                src=image_path.clone()
                                alt=format!("Search result {}", index)
                                class="result-image"
                            />
                        </a>
                    }
                }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys_for(paths: &[&str]) -> Vec<(usize, String)> {
        paths
            .iter()
            .map(|path| path.to_string())
            .enumerate()
            .map(|entry| result_key(&entry))
            .collect()
    }

    #[test]
    fn test_same_length_replacement_shares_no_keys() {
        let first = keys_for(&["https://x/beach1.jpg", "https://x/beach2.jpg"]);
        let second = keys_for(&["https://x/dog1.jpg", "https://x/dog2.jpg"]);
        assert!(first.iter().all(|key| !second.contains(key)));
    }

    #[test]
    fn test_unchanged_list_keeps_its_keys() {
        let paths = ["https://x/1.jpg", "https://x/2.jpg"];
        assert_eq!(keys_for(&paths), keys_for(&paths));
    }

    #[test]
    fn test_duplicate_paths_get_distinct_keys() {
        let keys = keys_for(&["https://x/same.jpg", "https://x/same.jpg"]);
        assert_ne!(keys[0], keys[1]);
    }
}
