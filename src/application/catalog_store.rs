//! Voice Catalog Store - 内存音色目录
//!
//! 持有最近一次拉取并规范化后的目录快照，以及随目录一起派生的过滤维度取值。
//! 目录整体替换，条目不可变；voice_id 在目录内唯一。

use tokio::sync::RwLock;

use crate::domain::voice::{FacetIndex, Voice};

#[derive(Debug, Default)]
struct CatalogInner {
    voices: Vec<Voice>,
    facets: FacetIndex,
}

/// 内存音色目录
#[derive(Debug, Default)]
pub struct VoiceCatalogStore {
    inner: RwLock<CatalogInner>,
}

impl VoiceCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 整体替换目录，并重新派生过滤维度
    pub async fn replace(&self, voices: Vec<Voice>) {
        let facets = FacetIndex::derive(&voices);
        let mut inner = self.inner.write().await;
        tracing::info!(voice_count = voices.len(), "Voice catalog replaced");
        inner.voices = voices;
        inner.facets = facets;
    }

    /// 目录快照（保持目录顺序）
    pub async fn snapshot(&self) -> Vec<Voice> {
        self.inner.read().await.voices.clone()
    }

    /// 当前过滤维度取值
    pub async fn facets(&self) -> FacetIndex {
        self.inner.read().await.facets.clone()
    }

    /// 按 ID 查找
    pub async fn find(&self, voice_id: &str) -> Option<Voice> {
        self.inner
            .read()
            .await
            .voices
            .iter()
            .find(|v| v.voice_id == voice_id)
            .cloned()
    }

    /// 目录是否为空（尚未拉取）
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.voices.is_empty()
    }

    /// 目录中第一个音色的 ID（刷新后默认选中用）
    pub async fn first_voice_id(&self) -> Option<String> {
        self.inner
            .read()
            .await
            .voices
            .first()
            .map(|v| v.voice_id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voice(id: &str, native: &str) -> Voice {
        Voice {
            voice_id: id.to_string(),
            name: format!("Voice {}", id),
            emotions: vec![],
            languages: vec![native.to_string()],
            gender: Some("Female".to_string()),
            age_range: None,
            image_url: None,
            native_language: Some(native.to_string()),
            styles: vec![],
            model: None,
        }
    }

    #[tokio::test]
    async fn test_replace_derives_facets() {
        let store = VoiceCatalogStore::new();
        assert!(store.is_empty().await);

        store.replace(vec![voice("v1", "en"), voice("v2", "ko")]).await;

        assert!(!store.is_empty().await);
        assert_eq!(store.facets().await.languages, vec!["en", "ko"]);
        assert_eq!(store.first_voice_id().await.as_deref(), Some("v1"));
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let store = VoiceCatalogStore::new();
        store.replace(vec![voice("v1", "en")]).await;

        assert!(store.find("v1").await.is_some());
        assert!(store.find("missing").await.is_none());
    }
}
