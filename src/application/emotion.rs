//! Emotion Analyzer - 防抖情感分析
//!
//! 智能情感模式开启时，文本每次变更都会重置 500ms 防抖窗口，
//! 窗口静默后才调用网关分析。已发出的 HTTP 请求不在线上取消，
//! 但每次提交携带单调递增的序号，完成时序号旧于已应用结果的响应被丢弃，
//! 避免乱序到达覆盖新结果。

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::application::ports::{EmotionAnalysis, TtsGatewayPort};

/// 默认防抖窗口
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Default)]
struct AnalysisState {
    /// 最近一次提交的序号
    issued: AtomicU64,
    /// 已应用结果的序号
    applied: AtomicU64,
    /// 最近应用的分析结果
    latest: RwLock<Option<EmotionAnalysis>>,
    /// 是否有分析在途
    analyzing: AtomicBool,
    /// 智能情感模式是否开启
    enabled: AtomicBool,
}

impl AnalysisState {
    /// 清空结果并占用一个新序号
    ///
    /// 占用序号让序号守卫把所有更旧的在途响应判为过期，
    /// 清空后的状态不会被迟到的结果复活
    async fn clear(&self, seq: u64) {
        self.applied.store(seq, Ordering::SeqCst);
        *self.latest.write().await = None;
    }
}

/// 防抖情感分析器
pub struct EmotionAnalyzer {
    gateway: Arc<dyn TtsGatewayPort>,
    debounce: Duration,
    state: Arc<AnalysisState>,
}

impl EmotionAnalyzer {
    pub fn new(gateway: Arc<dyn TtsGatewayPort>, debounce: Duration) -> Self {
        Self {
            gateway,
            debounce,
            state: Arc::new(AnalysisState::default()),
        }
    }

    /// 开关智能情感模式；关闭时清空已检测结果
    ///
    /// 关闭同时推进序号，作废还在防抖窗口里的提交和已在途的请求结果
    pub async fn set_enabled(&self, enabled: bool) {
        self.state.enabled.store(enabled, Ordering::SeqCst);
        if !enabled {
            let seq = self.state.issued.fetch_add(1, Ordering::SeqCst) + 1;
            self.state.clear(seq).await;
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.state.enabled.load(Ordering::SeqCst)
    }

    pub fn is_analyzing(&self) -> bool {
        self.state.analyzing.load(Ordering::SeqCst)
    }

    /// 最近应用的分析结果
    pub async fn latest(&self) -> Option<EmotionAnalysis> {
        self.state.latest.read().await.clone()
    }

    /// 提交一次文本变更
    ///
    /// 重置防抖窗口：窗口内若有更新提交，本次不触发分析。
    /// 模式关闭或文本为空时直接清空结果。
    pub async fn submit(&self, text: String) {
        let seq = self.state.issued.fetch_add(1, Ordering::SeqCst) + 1;

        if !self.is_enabled() || text.trim().is_empty() {
            self.state.clear(seq).await;
            return;
        }

        let gateway = self.gateway.clone();
        let state = self.state.clone();
        let debounce = self.debounce;

        tokio::spawn(async move {
            tokio::time::sleep(debounce).await;

            // 防抖：窗口期内来了更新的提交，本次作废
            if state.issued.load(Ordering::SeqCst) != seq {
                return;
            }

            // 窗口期内模式被关闭，不再发请求
            if !state.enabled.load(Ordering::SeqCst) {
                return;
            }

            state.analyzing.store(true, Ordering::SeqCst);
            let result = gateway.analyze_emotion(&text).await;
            state.analyzing.store(false, Ordering::SeqCst);

            // 序号守卫：旧响应永不覆盖新结果
            if seq < state.applied.load(Ordering::SeqCst) {
                tracing::debug!(seq, "Discarding stale emotion analysis result");
                return;
            }

            match result {
                Ok(analysis) => {
                    state.applied.store(seq, Ordering::SeqCst);
                    tracing::debug!(
                        seq,
                        emotion = %analysis.detected_emotion,
                        confidence = analysis.confidence,
                        "Emotion analysis applied"
                    );
                    *state.latest.write().await = Some(analysis);
                }
                Err(e) => {
                    tracing::warn!(seq, error = %e, "Emotion analysis failed");
                    state.applied.store(seq, Ordering::SeqCst);
                    *state.latest.write().await = None;
                }
            }
        });
    }
}
