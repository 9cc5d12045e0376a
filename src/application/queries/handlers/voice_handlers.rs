//! Voice Query Handlers - 目录刷新与查询

use std::collections::HashSet;
use std::sync::Arc;

use crate::application::catalog_store::VoiceCatalogStore;
use crate::application::error::ApplicationError;
use crate::application::ports::{
    GatewayError, SettingsStorePort, TtsGatewayPort, VoiceDescriptor,
};
use crate::application::queries::{GetFacets, ListVoices, RefreshVoices};
use crate::domain::voice::{filter_voices, FacetIndex, Voice};

/// RefreshVoices Handler
///
/// 拉取上游目录、规范化语言代码、按 voice_id 去重后整体替换快照。
/// 持久化的选中音色在新目录中不存在时回退到目录第一个。
pub struct RefreshVoicesHandler {
    gateway: Arc<dyn TtsGatewayPort>,
    settings: Arc<dyn SettingsStorePort>,
    catalog: Arc<VoiceCatalogStore>,
}

impl RefreshVoicesHandler {
    pub fn new(
        gateway: Arc<dyn TtsGatewayPort>,
        settings: Arc<dyn SettingsStorePort>,
        catalog: Arc<VoiceCatalogStore>,
    ) -> Self {
        Self {
            gateway,
            settings,
            catalog,
        }
    }

    pub async fn handle(&self, _query: RefreshVoices) -> Result<Vec<Voice>, ApplicationError> {
        let api_key = self
            .settings
            .api_key()
            .await?
            .ok_or_else(|| ApplicationError::unauthorized("API key not configured"))?;

        let descriptors = match self.gateway.fetch_voices(&api_key).await {
            Ok(descriptors) => descriptors,
            Err(GatewayError::Auth) => {
                self.settings.clear_api_key().await?;
                tracing::warn!("Gateway rejected API key during refresh, stored credential cleared");
                return Err(GatewayError::Auth.into());
            }
            Err(e) => return Err(e.into()),
        };

        let mut seen = HashSet::new();
        let mut voices = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            if !seen.insert(descriptor.voice_id.clone()) {
                tracing::warn!(voice_id = %descriptor.voice_id, "Duplicate voice_id in upstream catalog, dropped");
                continue;
            }
            voices.push(descriptor_to_voice(descriptor));
        }

        self.catalog.replace(voices).await;

        // 选中音色失效时回退到目录第一个
        let selected = self.settings.selected_voice().await?;
        let selected_valid = match &selected {
            Some(id) => self.catalog.find(id).await.is_some(),
            None => false,
        };
        if !selected_valid {
            if let Some(first) = self.catalog.first_voice_id().await {
                self.settings.set_selected_voice(&first).await?;
                tracing::info!(voice_id = %first, "Selected voice defaulted to first in catalog");
            }
        }

        Ok(self.catalog.snapshot().await)
    }
}

/// 上游原始条目转规范化后的目录条目
fn descriptor_to_voice(descriptor: VoiceDescriptor) -> Voice {
    Voice {
        voice_id: descriptor.voice_id,
        name: descriptor.name,
        emotions: descriptor.emotions,
        languages: descriptor.languages,
        gender: descriptor.gender,
        age_range: descriptor.age_range,
        image_url: descriptor.image_url,
        native_language: descriptor.native_language,
        styles: descriptor.styles,
        model: descriptor.model,
    }
    .normalize()
}

/// ListVoices Handler
pub struct ListVoicesHandler {
    catalog: Arc<VoiceCatalogStore>,
}

impl ListVoicesHandler {
    pub fn new(catalog: Arc<VoiceCatalogStore>) -> Self {
        Self { catalog }
    }

    pub async fn handle(&self, query: ListVoices) -> Vec<Voice> {
        let snapshot = self.catalog.snapshot().await;
        match query.filters {
            Some(filters) => filter_voices(&snapshot, &filters)
                .into_iter()
                .cloned()
                .collect(),
            None => snapshot,
        }
    }
}

/// GetFacets Handler
pub struct GetFacetsHandler {
    catalog: Arc<VoiceCatalogStore>,
}

impl GetFacetsHandler {
    pub fn new(catalog: Arc<VoiceCatalogStore>) -> Self {
        Self { catalog }
    }

    pub async fn handle(&self, _query: GetFacets) -> FacetIndex {
        self.catalog.facets().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{
        EmotionAnalysis, SpeechRequest, SpeechResult,
    };
    use crate::application::test_support::{seeded_stores, InMemorySettingsStore};
    use async_trait::async_trait;

    struct CatalogGateway {
        descriptors: Vec<VoiceDescriptor>,
    }

    #[async_trait]
    impl TtsGatewayPort for CatalogGateway {
        async fn generate(
            &self,
            _api_key: &str,
            _request: &SpeechRequest,
        ) -> Result<SpeechResult, GatewayError> {
            unreachable!("not used in catalog tests")
        }

        async fn fetch_voices(
            &self,
            _api_key: &str,
        ) -> Result<Vec<VoiceDescriptor>, GatewayError> {
            Ok(self.descriptors.clone())
        }

        async fn analyze_emotion(&self, _text: &str) -> Result<EmotionAnalysis, GatewayError> {
            unreachable!("not used in catalog tests")
        }
    }

    struct AuthRejectGateway;

    #[async_trait]
    impl TtsGatewayPort for AuthRejectGateway {
        async fn generate(
            &self,
            _api_key: &str,
            _request: &SpeechRequest,
        ) -> Result<SpeechResult, GatewayError> {
            Err(GatewayError::Auth)
        }

        async fn fetch_voices(
            &self,
            _api_key: &str,
        ) -> Result<Vec<VoiceDescriptor>, GatewayError> {
            Err(GatewayError::Auth)
        }

        async fn analyze_emotion(&self, _text: &str) -> Result<EmotionAnalysis, GatewayError> {
            Err(GatewayError::Auth)
        }
    }

    fn descriptor(id: &str, native: &str) -> VoiceDescriptor {
        VoiceDescriptor {
            voice_id: id.to_string(),
            name: format!("Voice {}", id),
            emotions: vec!["normal".to_string()],
            languages: vec![native.to_string()],
            gender: Some("Female".to_string()),
            age_range: Some("young-adult".to_string()),
            image_url: None,
            native_language: Some(native.to_string()),
            styles: vec![],
            model: None,
        }
    }

    #[tokio::test]
    async fn test_refresh_normalizes_and_dedups() {
        let gateway = Arc::new(CatalogGateway {
            descriptors: vec![
                descriptor("v1", "JP"),
                descriptor("v2", "en"),
                descriptor("v1", "ko"),
            ],
        });
        let (settings, _) = seeded_stores().await;
        let catalog = Arc::new(VoiceCatalogStore::new());
        let handler = RefreshVoicesHandler::new(gateway, settings, catalog.clone());

        let voices = handler.handle(RefreshVoices).await.unwrap();

        assert_eq!(voices.len(), 2);
        assert_eq!(
            voices[0].native_language.as_deref(),
            Some("ja"),
            "jp must collapse to ja"
        );
        assert_eq!(voices[1].voice_id, "v2");
    }

    #[tokio::test]
    async fn test_refresh_defaults_selection_to_first_voice() {
        let gateway = Arc::new(CatalogGateway {
            descriptors: vec![descriptor("v1", "en"), descriptor("v2", "ko")],
        });
        let (settings, _) = seeded_stores().await;
        settings.set_selected_voice("gone").await.unwrap();
        let handler =
            RefreshVoicesHandler::new(gateway, settings.clone(), Arc::new(VoiceCatalogStore::new()));

        handler.handle(RefreshVoices).await.unwrap();

        assert_eq!(settings.selected_voice().await.unwrap().as_deref(), Some("v1"));
    }

    #[tokio::test]
    async fn test_refresh_keeps_valid_selection() {
        let gateway = Arc::new(CatalogGateway {
            descriptors: vec![descriptor("v1", "en"), descriptor("v2", "ko")],
        });
        let (settings, _) = seeded_stores().await;
        settings.set_selected_voice("v2").await.unwrap();
        let handler =
            RefreshVoicesHandler::new(gateway, settings.clone(), Arc::new(VoiceCatalogStore::new()));

        handler.handle(RefreshVoices).await.unwrap();

        assert_eq!(settings.selected_voice().await.unwrap().as_deref(), Some("v2"));
    }

    #[tokio::test]
    async fn test_refresh_auth_failure_clears_stored_key() {
        let (settings, _) = seeded_stores().await;
        let handler = RefreshVoicesHandler::new(
            Arc::new(AuthRejectGateway),
            settings.clone(),
            Arc::new(VoiceCatalogStore::new()),
        );

        let err = handler.handle(RefreshVoices).await.unwrap_err();

        assert!(matches!(err, ApplicationError::Unauthorized(_)));
        assert_eq!(settings.api_key().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_refresh_without_key_is_unauthorized() {
        let settings = Arc::new(InMemorySettingsStore::default());
        let handler = RefreshVoicesHandler::new(
            Arc::new(CatalogGateway {
                descriptors: vec![],
            }),
            settings,
            Arc::new(VoiceCatalogStore::new()),
        );

        let err = handler.handle(RefreshVoices).await.unwrap_err();
        assert!(matches!(err, ApplicationError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_list_with_filters() {
        let catalog = Arc::new(VoiceCatalogStore::new());
        catalog
            .replace(vec![
                descriptor_to_voice(descriptor("v1", "en")),
                descriptor_to_voice(descriptor("v2", "ko")),
            ])
            .await;
        let handler = ListVoicesHandler::new(catalog);

        let mut filters = crate::domain::voice::VoiceFilters::default();
        filters.selected_languages = vec!["ko".to_string()];
        let voices = handler
            .handle(ListVoices {
                filters: Some(filters),
            })
            .await;

        assert_eq!(voices.len(), 1);
        assert_eq!(voices[0].voice_id, "v2");
    }
}
