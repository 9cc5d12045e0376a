//! In-Memory Preview Cache - 试听音频缓存
//!
//! 按 voice_id 缓存试听音频，进程生命周期内有效，从不落盘。
//! 固定台词 + 默认韵律下同一音色的试听内容确定，后写覆盖无害。

use dashmap::DashMap;

use crate::application::ports::{PreviewAudio, PreviewCachePort};

/// DashMap 实现的试听缓存
#[derive(Default)]
pub struct DashPreviewCache {
    entries: DashMap<String, PreviewAudio>,
}

impl DashPreviewCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreviewCachePort for DashPreviewCache {
    fn get(&self, voice_id: &str) -> Option<PreviewAudio> {
        self.entries.get(voice_id).map(|entry| entry.clone())
    }

    fn put(&self, voice_id: &str, audio: PreviewAudio) {
        self.entries.insert(voice_id.to_string(), audio);
        tracing::debug!(voice_id = %voice_id, cached = self.entries.len(), "Preview audio cached");
    }

    fn contains(&self, voice_id: &str) -> bool {
        self.entries.contains_key(voice_id)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AudioFormat;

    fn audio(bytes: &[u8]) -> PreviewAudio {
        PreviewAudio {
            audio: bytes.to_vec(),
            format: AudioFormat::Wav,
            duration_secs: 1.0,
        }
    }

    #[test]
    fn test_get_put_round_trip() {
        let cache = DashPreviewCache::new();
        assert!(cache.get("v1").is_none());

        cache.put("v1", audio(b"one"));

        assert_eq!(cache.get("v1").unwrap().audio, b"one");
        assert!(cache.contains("v1"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_last_write_wins() {
        let cache = DashPreviewCache::new();
        cache.put("v1", audio(b"first"));
        cache.put("v1", audio(b"second"));

        assert_eq!(cache.get("v1").unwrap().audio, b"second");
        assert_eq!(cache.len(), 1);
    }
}
