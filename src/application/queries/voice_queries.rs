//! Voice Queries - 音色目录查询定义

use crate::domain::voice::VoiceFilters;

/// 从上游拉取并替换音色目录
#[derive(Debug, Clone)]
pub struct RefreshVoices;

/// 列出目录（可选过滤）
#[derive(Debug, Clone, Default)]
pub struct ListVoices {
    pub filters: Option<VoiceFilters>,
}

/// 当前目录的过滤维度取值
#[derive(Debug, Clone)]
pub struct GetFacets;
