// ==========================================
// 钢结构BIM施工分析系统 - 引擎层
// ==========================================
// 职责: 实现分析业务规则(合并/楼层/排程/派生/聚合)
// 红线: 引擎无持久状态, 全部输入显式传参,
//       同一输入必产出同一输出
// ==========================================

pub mod aggregator;
pub mod consolidator;
pub mod derivation;
pub mod level_detector;
pub mod orchestrator;
pub mod propagator;
pub mod scheduler;
pub mod vertical;

// 重导出核心引擎
pub use aggregator::{AggregateRow, AggregationKey, Measure, QuantityAggregator};
pub use consolidator::AssemblyConsolidator;
pub use derivation::{CostEngine, FootprintEngine, FootprintSummary};
pub use level_detector::LevelDetector;
pub use orchestrator::{AnalyticsPipeline, PipelineError, PipelineResult, RunResult};
pub use propagator::SchedulePropagator;
pub use scheduler::ErectionScheduler;
pub use vertical::VerticalClassifier;
