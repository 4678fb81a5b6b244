// ==========================================
// 钢结构BIM施工分析系统 - 提取层
// ==========================================
// 职责: 模型元素 → 构件记录批次
// 流程: 属性解析(回退链) → 紧固件谓词 → 类别分类 → 批次过滤
// ==========================================

pub mod classifier;
pub mod error;
pub mod extractor;
pub mod resolver;

pub use classifier::ElementClassifier;
pub use error::{ExtractError, ExtractResult};
pub use extractor::ElementExtractor;
pub use resolver::PropertyResolver;
