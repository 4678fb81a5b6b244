// ==========================================
// 钢结构BIM施工分析系统 - 报表层
// ==========================================
// 时间线(4D) + 维护清单(7D) + CSV导出
// ==========================================

pub mod export;
pub mod inventory;
pub mod timeline;

pub use export::{CsvExporter, ExportError, ExportResult};
pub use inventory::{InventoryReport, InventoryRow, MaintenanceOperation, OPERATIONS};
pub use timeline::{DaySummary, PhaseSpan, ScheduleRow, TimelineReport};
