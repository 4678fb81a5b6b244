// ==========================================
// 钢结构BIM施工分析系统 - 提取层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 单构件故障降级处理, 仅批次级故障上抛
// ==========================================

use thiserror::Error;

/// 提取层错误类型
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("空批次: 模型中未提取到任何有效结构构件")]
    EmptyBatch,

    #[error("模型快照不可用: {0}")]
    SnapshotUnavailable(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type ExtractResult<T> = Result<T, ExtractError>;
