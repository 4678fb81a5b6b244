// ==========================================
// 钢结构BIM施工分析系统 - 领域层
// ==========================================
// 职责: 构件/装配体实体与核心枚举类型
// ==========================================

pub mod assembly;
pub mod element;
pub mod types;

pub use assembly::Assembly;
pub use element::{DerivedFields, DerivedStore, ElementRecord};
pub use types::{Category, Orientation};

/// 代表性楼层高程 (mm) — 每次运行由横向装配体高程聚类重算, 不持久化
pub type Level = f64;
