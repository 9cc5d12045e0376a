//! 韵律控制参数
//!
//! 生成请求携带的全部可调参数，以及表现层的更新动作。
//! 更新动作是带标签的枚举而非字符串键分发，apply 时穷尽匹配。

use serde::{Deserialize, Serialize};

/// 输出音频格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    #[default]
    Wav,
    Mp3,
}

impl AudioFormat {
    /// 未识别的输入回退到 wav（与上游网关默认一致）
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "mp3" => Self::Mp3,
            _ => Self::Wav,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::Mp3 => "mp3",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Wav => "audio/wav",
            Self::Mp3 => "audio/mpeg",
        }
    }
}

/// 韵律控制参数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProsodyControls {
    /// 情感预设
    pub emotion_preset: String,
    /// 情感强度 (0.0 - 2.0)
    pub emotion_intensity: f32,
    /// 语速 (0.5 - 2.0)
    pub speed: f32,
    /// 音调 (-12 - 12)
    pub pitch: i32,
    /// 音量 (0 - 200)
    pub volume: u32,
    /// 输出格式
    pub audio_format: AudioFormat,
}

impl Default for ProsodyControls {
    fn default() -> Self {
        Self {
            emotion_preset: "normal".to_string(),
            emotion_intensity: 1.0,
            speed: 1.0,
            pitch: 0,
            volume: 100,
            audio_format: AudioFormat::Wav,
        }
    }
}

impl ProsodyControls {
    pub fn validate(&self) -> Result<(), &'static str> {
        if !(0.5..=2.0).contains(&self.speed) {
            return Err("语速必须在 0.5 到 2.0 之间");
        }
        if !(-12..=12).contains(&self.pitch) {
            return Err("音调必须在 -12 到 12 之间");
        }
        if self.volume > 200 {
            return Err("音量必须在 0 到 200 之间");
        }
        if !(0.0..=2.0).contains(&self.emotion_intensity) {
            return Err("情感强度必须在 0.0 到 2.0 之间");
        }
        Ok(())
    }

    /// 应用单个更新动作
    ///
    /// 更新后校验；非法值拒绝且不改变原状态
    pub fn apply(&mut self, update: ControlUpdate) -> Result<(), &'static str> {
        let mut next = self.clone();
        match update {
            ControlUpdate::EmotionPreset(preset) => next.emotion_preset = preset,
            ControlUpdate::EmotionIntensity(intensity) => next.emotion_intensity = intensity,
            ControlUpdate::Speed(speed) => next.speed = speed,
            ControlUpdate::Pitch(pitch) => next.pitch = pitch,
            ControlUpdate::Volume(volume) => next.volume = volume,
            ControlUpdate::Format(format) => next.audio_format = format,
        }
        next.validate()?;
        *self = next;
        Ok(())
    }
}

/// 控制面板更新动作
///
/// 每个字段一个变体，替代原先的字符串键 switch
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum ControlUpdate {
    EmotionPreset(String),
    EmotionIntensity(f32),
    Speed(f32),
    Pitch(i32),
    Volume(u32),
    Format(AudioFormat),
}
