//! 引擎配置的加载与保存
//!
//! 配置以 JSON 保存 `AiConfig`，默认位于 `<配置目录>/xiangqi/engine.json`。

use std::path::{Path, PathBuf};

use anyhow::Context;
use xiangqi_ai::AiConfig;

/// 获取默认配置文件路径
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push("xiangqi");
        path.push("engine.json");
        path
    })
}

/// 从文件加载配置，失败时使用默认配置
pub fn load(path: Option<&Path>) -> AiConfig {
    let Some(path) = path.map(Path::to_path_buf).or_else(default_path) else {
        tracing::warn!("无法获取配置目录，使用默认配置");
        return AiConfig::default();
    };

    if !path.exists() {
        tracing::info!("配置文件不存在，使用默认配置");
        return AiConfig::default();
    }

    match std::fs::read_to_string(&path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(config) => {
                tracing::info!("已加载配置: {:?}", path);
                config
            }
            Err(e) => {
                tracing::warn!("配置文件格式无效: {}，使用默认配置", e);
                AiConfig::default()
            }
        },
        Err(e) => {
            tracing::warn!("无法读取配置文件: {}，使用默认配置", e);
            AiConfig::default()
        }
    }
}

/// 保存配置到文件
pub fn save(config: &AiConfig, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("无法创建配置目录: {:?}", parent))?;
    }

    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content).with_context(|| format!("写入配置文件失败: {:?}", path))?;

    tracing::info!("配置已保存: {:?}", path);
    Ok(())
}
