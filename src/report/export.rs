// ==========================================
// 钢结构BIM施工分析系统 - 报表CSV导出
// ==========================================
// 职责: 聚合行/排程行/维护清单行写出为 CSV 文件
// 红线: 仅导出结构化行, 不做任何排版渲染
// ==========================================

use crate::engine::aggregator::AggregateRow;
use crate::report::inventory::InventoryRow;
use crate::report::timeline::ScheduleRow;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV 写出失败: {0}")]
    Csv(#[from] csv::Error),

    #[error("文件IO失败: {0}")]
    Io(#[from] std::io::Error),
}

pub type ExportResult<T> = Result<T, ExportError>;

// ==========================================
// CsvExporter - CSV 导出器
// ==========================================
pub struct CsvExporter;

impl CsvExporter {
    pub fn new() -> Self {
        Self
    }

    /// 导出聚合行(成本或碳足迹)
    pub fn write_aggregate_rows(&self, path: &Path, rows: &[AggregateRow]) -> ExportResult<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(["categoria", "ref", "perfil", "uds", "peso_kg", "cantidad", "valor_unitario"])?;
        for row in rows {
            let units = row.units.to_string();
            let weight = format!("{:.2}", row.weight_kg);
            let quantity = format!("{:.2}", row.quantity);
            let unit_value = format!("{:.2}", row.unit_value);
            writer.write_record([
                row.category.as_report_code(),
                row.tag.as_str(),
                row.profile.as_str(),
                units.as_str(),
                weight.as_str(),
                quantity.as_str(),
                unit_value.as_str(),
            ])?;
        }
        writer.flush()?;
        info!(path = %path.display(), rows = rows.len(), "导出: 聚合行CSV完成");
        Ok(())
    }

    /// 导出排程明细行
    pub fn write_schedule_rows(&self, path: &Path, rows: &[ScheduleRow]) -> ExportResult<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(["fecha", "fase", "ref", "perfil", "peso_kg"])?;
        for row in rows {
            let date = row.date.format("%Y-%m-%d").to_string();
            let weight = format!("{:.2}", row.weight_kg);
            writer.write_record([
                date.as_str(),
                row.phase.as_str(),
                row.assembly_mark.as_str(),
                row.master_profile.as_str(),
                weight.as_str(),
            ])?;
        }
        writer.flush()?;
        info!(path = %path.display(), rows = rows.len(), "导出: 排程CSV完成");
        Ok(())
    }

    /// 导出维护清单行
    pub fn write_inventory_rows(&self, path: &Path, rows: &[InventoryRow]) -> ExportResult<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(["ref", "descripcion", "zona", "uds", "peso_kg"])?;
        for row in rows {
            let units = row.units.to_string();
            let weight = format!("{:.2}", row.weight_kg);
            writer.write_record([
                row.reference.as_str(),
                row.description.as_str(),
                row.zone.as_str(),
                units.as_str(),
                weight.as_str(),
            ])?;
        }
        writer.flush()?;
        info!(path = %path.display(), rows = rows.len(), "导出: 维护清单CSV完成");
        Ok(())
    }
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new()
    }
}
