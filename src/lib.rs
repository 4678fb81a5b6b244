// ==========================================
// 钢结构BIM施工分析系统 - 核心库
// ==========================================
// 技术栈: Rust + serde + chrono
// 系统定位: 4D/5D/6D/7D 决策支持 (结构化数据产出,
//           渲染与模型写入由外部协作方负责)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 模型层 - 模型读取契约与快照实现
pub mod model;

// 提取层 - 模型元素 → 构件记录
pub mod extractor;

// 引擎层 - 分析业务规则
pub mod engine;

// 报表层 - 结构化报表行与导出
pub mod report;

// 回写层 - 元数据注入契约
pub mod injector;

// 配置层 - 运行配置
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{Assembly, Category, DerivedFields, DerivedStore, ElementRecord, Level, Orientation};

// 模型契约
pub use model::{ModelElement, ModelReader, ModelSnapshot, PropertyGroup, PropertyValue};

// 配置
pub use config::{CostRates, ImpactFactors, IsoConfig, PipelineConfig};

// 引擎
pub use engine::{
    AggregateRow, AnalyticsPipeline, AssemblyConsolidator, CostEngine, ErectionScheduler,
    FootprintEngine, LevelDetector, PipelineError, QuantityAggregator, RunResult,
    SchedulePropagator, VerticalClassifier,
};

// 提取
pub use extractor::{ElementClassifier, ElementExtractor, ExtractError, PropertyResolver};

// 报表
pub use report::{CsvExporter, InventoryReport, InventoryRow, PhaseSpan, ScheduleRow, TimelineReport};

// 回写
pub use injector::{InMemorySink, MetadataInjector, MetadataSink, PayloadBuilder};

/// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 系统名称
pub const APP_NAME: &str = "钢结构BIM施工分析系统";
