//! Voice Context - 音色目录条目
//!
//! 不变量:
//! - voice_id 在目录内唯一
//! - 规范化后语言代码全部为小写（`jp` 折叠为 `ja`）

use serde::{Deserialize, Serialize};

/// 语言代码规范化
///
/// 小写 + 去空白；已废弃的 `jp` 代码折叠为规范的 `ja`
pub fn normalize_language(code: &str) -> String {
    let code = code.trim().to_lowercase();
    if code == "jp" {
        "ja".to_string()
    } else {
        code
    }
}

/// 音色目录条目
///
/// 来自上游网关的 /voices 响应，加载时做一次规范化，之后不可变
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Voice {
    /// 音色唯一 ID
    pub voice_id: String,
    /// 展示名称
    pub name: String,
    /// 该音色支持的情感预设
    #[serde(default)]
    pub emotions: Vec<String>,
    /// 支持的语言代码
    #[serde(default)]
    pub languages: Vec<String>,
    /// 性别（上游未知时为 "Unknown"）
    #[serde(default)]
    pub gender: Option<String>,
    /// 年龄段
    #[serde(default)]
    pub age_range: Option<String>,
    /// 头像 URL
    #[serde(default)]
    pub image_url: Option<String>,
    /// 母语（口音来源）
    #[serde(default)]
    pub native_language: Option<String>,
    /// 风格分类
    #[serde(default)]
    pub styles: Vec<String>,
    /// 上游模型标识
    #[serde(default)]
    pub model: Option<String>,
}

impl Voice {
    /// 规范化语言字段
    ///
    /// 语言代码小写化、`jp` -> `ja`，去重并保持首次出现顺序
    pub fn normalize(mut self) -> Self {
        self.native_language = self.native_language.as_deref().map(normalize_language);

        let mut seen = Vec::with_capacity(self.languages.len());
        for lang in &self.languages {
            let lang = normalize_language(lang);
            if !seen.contains(&lang) {
                seen.push(lang);
            }
        }
        self.languages = seen;
        self
    }

    /// 母语代码，缺失时默认 "en"（与上游网关的默认一致）
    pub fn native_or_default(&self) -> &str {
        self.native_language.as_deref().unwrap_or("en")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voice(native: Option<&str>, languages: &[&str]) -> Voice {
        Voice {
            voice_id: "v1".to_string(),
            name: "Test".to_string(),
            emotions: vec![],
            languages: languages.iter().map(|s| s.to_string()).collect(),
            gender: Some("Female".to_string()),
            age_range: None,
            image_url: None,
            native_language: native.map(|s| s.to_string()),
            styles: vec![],
            model: None,
        }
    }

    #[test]
    fn test_jp_collapses_to_ja() {
        let v = voice(Some("JP"), &["jp", "en"]).normalize();
        assert_eq!(v.native_language.as_deref(), Some("ja"));
        assert_eq!(v.languages, vec!["ja", "en"]);
    }

    #[test]
    fn test_normalize_dedups_preserving_order() {
        let v = voice(None, &["EN", "ja", "jp", "en"]).normalize();
        assert_eq!(v.languages, vec!["en", "ja"]);
    }

    #[test]
    fn test_native_or_default() {
        assert_eq!(voice(None, &[]).native_or_default(), "en");
        assert_eq!(voice(Some("ko"), &[]).normalize().native_or_default(), "ko");
    }
}
