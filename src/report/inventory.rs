// ==========================================
// 钢结构BIM施工分析系统 - 7D 维护清单报表
// ==========================================
// 职责: 装配体 → 维护清单行 + 固定预防性维护操作表
// 依据: Código Estructural (RD 470/2021) / CTE DB-SE-A
// ==========================================
// 规则: 紧固件不进入设备清单; 分区取阶段标签的
// 楼层部分, 无标签时记 "General"; 每装配体计 1 台
// ==========================================

use crate::domain::Assembly;
use serde::{Deserialize, Serialize};
use tracing::info;

/// 设计使用年限 (年)
pub const SERVICE_LIFE_YEARS: u32 = 50;

/// 参照规范
pub const NORMATIVE_REF: &str = "Código Estructural (RD 470/2021) / CTE DB-SE-A";

// ==========================================
// MaintenanceOperation - 预防性维护操作
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct MaintenanceOperation {
    pub operation: &'static str,
    pub frequency: &'static str,
    pub criterion: &'static str,
}

/// 最低维护操作日历 (CTE/EAE)
pub const OPERATIONS: [MaintenanceOperation; 5] = [
    MaintenanceOperation {
        operation: "Inspección Visual General",
        frequency: "Anual",
        criterion: "Detectar golpes, deformaciones o humedades.",
    },
    MaintenanceOperation {
        operation: "Revisión Pintura/Galvanizado",
        frequency: "Cada 5 años",
        criterion: "Verificar óxido, descascarillado (cat. C3/C4).",
    },
    MaintenanceOperation {
        operation: "Reapriete de Pernos",
        frequency: "1er año / Cada 5",
        criterion: "Comprobar par de apriete en uniones atornilladas.",
    },
    MaintenanceOperation {
        operation: "Limpieza de Elementos",
        frequency: "Según necesidad",
        criterion: "Evitar acumulación de suciedad/sales en rincones.",
    },
    MaintenanceOperation {
        operation: "Inspección Soldaduras",
        frequency: "Cada 10 años",
        criterion: "Revisión visual de cordones principales (fisuras).",
    },
];

// ==========================================
// InventoryRow - 维护清单行
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryRow {
    pub reference: String,      // 装配体编号
    pub description: String,    // 主导截面描述
    pub zone: String,           // 分区(楼层)
    pub units: usize,           // 台数
    pub weight_kg: f64,         // 重量合计
}

// ==========================================
// InventoryReport - 维护清单构建器
// ==========================================
pub struct InventoryReport;

impl InventoryReport {
    pub fn new() -> Self {
        Self
    }

    /// 构建维护清单(按装配体编号升序)
    pub fn rows(&self, assemblies: &[Assembly]) -> Vec<InventoryRow> {
        let mut rows: Vec<InventoryRow> = assemblies
            .iter()
            .map(|assembly| InventoryRow {
                reference: assembly.assembly_mark.clone(),
                description: assembly.master_profile.clone(),
                zone: zone_of(assembly),
                units: 1,
                weight_kg: assembly.total_weight_kg,
            })
            .collect();

        rows.sort_by(|a, b| a.reference.cmp(&b.reference));
        info!(rows = rows.len(), "7D: 维护清单生成完成");
        rows
    }
}

impl Default for InventoryReport {
    fn default() -> Self {
        Self::new()
    }
}

/// 分区: 阶段标签中楼层部分, 无标签时 "General"
fn zone_of(assembly: &Assembly) -> String {
    assembly
        .phase_label
        .as_deref()
        .and_then(|label| label.split('|').next())
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .unwrap_or_else(|| "General".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, Orientation};

    fn assembly(mark: &str, phase: Option<&str>, weight: f64) -> Assembly {
        Assembly {
            assembly_mark: mark.to_string(),
            total_weight_kg: weight,
            min_elevation_mm: 0.0,
            master_index: 0,
            master_profile: "HEB200".to_string(),
            master_category: Category::Rolled,
            members: vec![0],
            orientation: Some(Orientation::Vertical),
            snapped_elevation_mm: Some(0.0),
            phase_label: phase.map(|p| p.to_string()),
            scheduled_date: None,
        }
    }

    #[test]
    fn test_rows_sorted_by_reference() {
        let assemblies = vec![
            assembly("V2", Some("NIVEL +4.00m | VIGAS"), 300.0),
            assembly("C1", Some("NIVEL +0.00m | PILARES"), 500.0),
        ];

        let rows = InventoryReport::new().rows(&assemblies);
        assert_eq!(rows[0].reference, "C1");
        assert_eq!(rows[1].reference, "V2");
        assert_eq!(rows[0].units, 1);
    }

    #[test]
    fn test_zone_from_phase_label() {
        let rows = InventoryReport::new().rows(&[assembly(
            "C1",
            Some("NIVEL +4.00m | PILARES"),
            500.0,
        )]);
        assert_eq!(rows[0].zone, "NIVEL +4.00m");
    }

    #[test]
    fn test_zone_defaults_to_general() {
        let rows = InventoryReport::new().rows(&[assembly("C1", None, 500.0)]);
        assert_eq!(rows[0].zone, "General");
    }

    #[test]
    fn test_operations_table_fixed() {
        assert_eq!(OPERATIONS.len(), 5);
        assert_eq!(OPERATIONS[0].operation, "Inspección Visual General");
        assert_eq!(OPERATIONS[2].frequency, "1er año / Cada 5");
    }
}
