//! Voice Context - 过滤引擎
//!
//! 纯同步逻辑：给定完整目录和过滤状态，输出保持原目录顺序的子序列。
//! 所有谓词可选，AND 组合；某个维度的选择集为空表示该维度无约束。

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::catalog::{normalize_language, Voice};

/// 过滤状态
///
/// 由表现层整体替换的瞬态 UI 状态，不做服务端持久化
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoiceFilters {
    /// 名称子串（大小写不敏感）
    #[serde(default)]
    pub search_query: String,
    /// 语言选择集
    #[serde(default)]
    pub selected_languages: Vec<String>,
    /// 年龄段选择集
    #[serde(default)]
    pub selected_ages: Vec<String>,
    /// 风格选择集
    #[serde(default)]
    pub selected_styles: Vec<String>,
    /// 性别选择集
    #[serde(default)]
    pub selected_genders: Vec<String>,
    /// 语言过滤是否只看母语（Native Only 模式）
    #[serde(default)]
    pub native_only: bool,
}

impl VoiceFilters {
    /// 是否所有维度均无约束
    pub fn is_empty(&self) -> bool {
        self.search_query.is_empty()
            && self.selected_languages.is_empty()
            && self.selected_ages.is_empty()
            && self.selected_styles.is_empty()
            && self.selected_genders.is_empty()
    }

    /// 单个音色是否满足全部活跃谓词
    pub fn matches(&self, voice: &Voice) -> bool {
        // 名称子串
        if !self.search_query.is_empty() {
            let query = self.search_query.to_lowercase();
            if !voice.name.to_lowercase().contains(&query) {
                return false;
            }
        }

        // 语言：Native Only 按母语匹配，否则按支持语言交集
        if !self.selected_languages.is_empty() {
            let selected: Vec<String> = self
                .selected_languages
                .iter()
                .map(|l| normalize_language(l))
                .collect();

            if self.native_only {
                let native = normalize_language(voice.native_or_default());
                if !selected.contains(&native) {
                    return false;
                }
            } else {
                // 支持语言列表为空时回退到母语
                let can_speak = if voice.languages.is_empty() {
                    voice
                        .native_language
                        .as_deref()
                        .map(|n| selected.contains(&normalize_language(n)))
                        .unwrap_or(false)
                } else {
                    voice.languages.iter().any(|l| selected.contains(l))
                };
                if !can_speak {
                    return false;
                }
            }
        }

        // 年龄段：精确匹配
        if !self.selected_ages.is_empty() {
            match &voice.age_range {
                Some(age) if self.selected_ages.contains(age) => {}
                _ => return false,
            }
        }

        // 风格：至少一个交集
        if !self.selected_styles.is_empty() {
            let has_style = voice
                .styles
                .iter()
                .any(|s| self.selected_styles.contains(s));
            if !has_style {
                return false;
            }
        }

        // 性别：精确匹配
        if !self.selected_genders.is_empty() {
            match &voice.gender {
                Some(gender) if self.selected_genders.contains(gender) => {}
                _ => return false,
            }
        }

        true
    }
}

/// 应用过滤状态，保持目录顺序
pub fn filter_voices<'a>(catalog: &'a [Voice], filters: &VoiceFilters) -> Vec<&'a Voice> {
    catalog.iter().filter(|v| filters.matches(v)).collect()
}

/// 过滤维度的可用取值列表
///
/// 目录变更时派生一次：对全部音色的相应属性取并集，去重、排序
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FacetIndex {
    pub languages: Vec<String>,
    pub ages: Vec<String>,
    pub styles: Vec<String>,
    pub genders: Vec<String>,
}

impl FacetIndex {
    pub fn derive(catalog: &[Voice]) -> Self {
        let mut languages = BTreeSet::new();
        let mut ages = BTreeSet::new();
        let mut styles = BTreeSet::new();
        let mut genders = BTreeSet::new();

        for voice in catalog {
            if let Some(native) = &voice.native_language {
                languages.insert(native.clone());
            }
            for lang in &voice.languages {
                languages.insert(lang.clone());
            }
            if let Some(age) = &voice.age_range {
                ages.insert(age.clone());
            }
            for style in &voice.styles {
                styles.insert(style.clone());
            }
            if let Some(gender) = &voice.gender {
                genders.insert(gender.clone());
            }
        }

        Self {
            languages: languages.into_iter().collect(),
            ages: ages.into_iter().collect(),
            styles: styles.into_iter().collect(),
            genders: genders.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voice(id: &str, name: &str, native: Option<&str>, languages: &[&str]) -> Voice {
        Voice {
            voice_id: id.to_string(),
            name: name.to_string(),
            emotions: vec![],
            languages: languages.iter().map(|s| s.to_string()).collect(),
            gender: Some("Female".to_string()),
            age_range: Some("Young Adult".to_string()),
            image_url: None,
            native_language: native.map(|s| s.to_string()),
            styles: vec!["Conversational".to_string()],
            model: None,
        }
        .normalize()
    }

    fn sample_catalog() -> Vec<Voice> {
        vec![
            voice("v1", "Olivia", Some("en"), &["en", "es"]),
            voice("v2", "Minsang", Some("ko"), &["ko"]),
        ]
    }

    #[test]
    fn test_empty_filters_return_catalog_in_order() {
        let catalog = sample_catalog();
        let result = filter_voices(&catalog, &VoiceFilters::default());
        let ids: Vec<&str> = result.iter().map(|v| v.voice_id.as_str()).collect();
        assert_eq!(ids, vec!["v1", "v2"]);
    }

    #[test]
    fn test_can_speak_mode_matches_supported_languages() {
        let catalog = sample_catalog();
        let filters = VoiceFilters {
            selected_languages: vec!["es".to_string()],
            native_only: false,
            ..Default::default()
        };
        let ids: Vec<&str> = filter_voices(&catalog, &filters)
            .iter()
            .map(|v| v.voice_id.as_str())
            .collect();
        assert_eq!(ids, vec!["v1"]);
    }

    #[test]
    fn test_native_only_mode_excludes_non_native_speakers() {
        let catalog = sample_catalog();
        let filters = VoiceFilters {
            selected_languages: vec!["es".to_string()],
            native_only: true,
            ..Default::default()
        };
        assert!(filter_voices(&catalog, &filters).is_empty());
    }

    #[test]
    fn test_native_only_keeps_voice_with_matching_native() {
        let catalog = sample_catalog();
        for v in &catalog {
            let filters = VoiceFilters {
                selected_languages: vec![v.native_or_default().to_string()],
                native_only: true,
                ..Default::default()
            };
            assert!(
                filter_voices(&catalog, &filters)
                    .iter()
                    .any(|m| m.voice_id == v.voice_id),
                "voice {} missing under its own native language",
                v.voice_id
            );
        }
    }

    #[test]
    fn test_language_fallback_to_native_when_supported_list_empty() {
        let v = voice("v3", "Hana", Some("ja"), &[]);
        let filters = VoiceFilters {
            selected_languages: vec!["ja".to_string()],
            native_only: false,
            ..Default::default()
        };
        assert!(filters.matches(&v));
    }

    #[test]
    fn test_search_query_is_case_insensitive() {
        let catalog = sample_catalog();
        let filters = VoiceFilters {
            search_query: "oLiV".to_string(),
            ..Default::default()
        };
        let ids: Vec<&str> = filter_voices(&catalog, &filters)
            .iter()
            .map(|v| v.voice_id.as_str())
            .collect();
        assert_eq!(ids, vec!["v1"]);
    }

    #[test]
    fn test_selected_language_input_is_normalized() {
        let catalog = sample_catalog();
        let filters = VoiceFilters {
            selected_languages: vec![" ES ".to_string()],
            ..Default::default()
        };
        assert_eq!(filter_voices(&catalog, &filters).len(), 1);
    }

    #[test]
    fn test_gender_and_age_are_exact_matches() {
        let catalog = sample_catalog();
        let filters = VoiceFilters {
            selected_genders: vec!["Male".to_string()],
            ..Default::default()
        };
        assert!(filter_voices(&catalog, &filters).is_empty());

        let filters = VoiceFilters {
            selected_ages: vec!["Young Adult".to_string()],
            ..Default::default()
        };
        assert_eq!(filter_voices(&catalog, &filters).len(), 2);
    }

    #[test]
    fn test_style_requires_overlap() {
        let catalog = sample_catalog();
        let filters = VoiceFilters {
            selected_styles: vec!["Narration".to_string()],
            ..Default::default()
        };
        assert!(filter_voices(&catalog, &filters).is_empty());
    }

    #[test]
    fn test_facets_are_unioned_deduped_sorted() {
        let catalog = sample_catalog();
        let facets = FacetIndex::derive(&catalog);
        assert_eq!(facets.languages, vec!["en", "es", "ko"]);
        assert_eq!(facets.ages, vec!["Young Adult"]);
        assert_eq!(facets.styles, vec!["Conversational"]);
        assert_eq!(facets.genders, vec!["Female"]);
    }

    #[test]
    fn test_predicates_are_and_combined() {
        let catalog = sample_catalog();
        let filters = VoiceFilters {
            search_query: "Olivia".to_string(),
            selected_languages: vec!["ko".to_string()],
            ..Default::default()
        };
        assert!(filter_voices(&catalog, &filters).is_empty());
    }
}
