// ==========================================
// 钢结构BIM施工分析系统 - 元数据回写契约
// ==========================================
// 职责: 逐构件生成属性组载荷并经写回方落盘
// 红线: 核心只构建载荷与驱动回写契约,
//       具体模型写入由外部 MetadataSink 实现
// ==========================================
// 规则: 同名属性组先查后写 — 存在则更新, 不存在才创建;
//       无数据的维度组(4D/5D/6D)整组跳过
// ==========================================

use crate::config::IsoConfig;
use crate::domain::{Category, DerivedFields, ElementRecord};
use crate::model::PropertyValue;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// 属性组名 - ISO 19650 管理状态
pub const GROUP_ISO_STATUS: &str = "ISO_19650_STATUS";
/// 属性组名 - 技术数据
pub const GROUP_TECHNICAL: &str = "BIM_DATOS_TECNICOS";
/// 属性组名 - 4D 计划
pub const GROUP_4D: &str = "BIM_4D_PLANIFICACION";
/// 属性组名 - 5D 成本
pub const GROUP_5D: &str = "BIM_5D_COSTES";
/// 属性组名 - 6D 碳足迹
pub const GROUP_6D: &str = "BIM_6D_SOSTENIBILIDAD";

#[derive(Error, Debug)]
pub enum InjectError {
    #[error("写回方失败: {0}")]
    Sink(#[from] anyhow::Error),
}

pub type InjectResult<T> = Result<T, InjectError>;

// ==========================================
// PropertyGroupPayload - 属性组载荷
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyGroupPayload {
    pub name: String,
    pub entries: Vec<(String, PropertyValue)>,
}

// ==========================================
// MetadataSink - 元数据写回契约
// ==========================================
// 调用序约定: 先 has_group 判定, 再 create_group 或 update_group
pub trait MetadataSink {
    /// 构件上是否已存在同名属性组
    fn has_group(&self, element_id: i64, group_name: &str) -> bool;

    /// 创建属性组(仅在不存在时调用)
    fn create_group(&mut self, element_id: i64, payload: &PropertyGroupPayload) -> InjectResult<()>;

    /// 更新既有属性组条目
    fn update_group(&mut self, element_id: i64, payload: &PropertyGroupPayload) -> InjectResult<()>;
}

/// Uniclass 2015 产品编码 (ISO 19650 分类)
pub fn uniclass_code(category: Category) -> &'static str {
    match category {
        Category::Rolled => "Pr_20_29_87_82",
        Category::Plate => "Pr_20_29_87_63",
        Category::Fastener => "Pr_20_29_33_05",
        Category::Grating => "Pr_30_59_32_33",
        Category::Generic => "Pr_20_29_87",
    }
}

// ==========================================
// PayloadBuilder - 属性组载荷构建器
// ==========================================
pub struct PayloadBuilder {
    iso: IsoConfig,
    calc_date: NaiveDate,
}

impl PayloadBuilder {
    pub fn new(iso: IsoConfig, calc_date: NaiveDate) -> Self {
        Self { iso, calc_date }
    }

    /// 构建单构件的全部属性组载荷
    ///
    /// 管理状态与技术数据恒有; 4D/5D/6D 组仅在
    /// 对应派生字段已写入时产出
    pub fn build(
        &self,
        element: &ElementRecord,
        derived: Option<&DerivedFields>,
    ) -> Vec<PropertyGroupPayload> {
        let mut payloads = vec![self.iso_group(element), self.technical_group(element)];

        if let Some(fields) = derived {
            if let Some(group) = self.planning_group(fields) {
                payloads.push(group);
            }
            if let Some(group) = self.cost_group(fields) {
                payloads.push(group);
            }
            if let Some(group) = self.footprint_group(fields) {
                payloads.push(group);
            }
        }

        payloads
    }

    fn iso_group(&self, element: &ElementRecord) -> PropertyGroupPayload {
        PropertyGroupPayload {
            name: GROUP_ISO_STATUS.to_string(),
            entries: vec![
                text("Status", &self.iso.status),
                text("Suitability", &self.iso.suitability),
                text("Revision", &self.iso.revision),
                text("Uniclass2015_Code", uniclass_code(element.category)),
            ],
        }
    }

    fn technical_group(&self, element: &ElementRecord) -> PropertyGroupPayload {
        PropertyGroupPayload {
            name: GROUP_TECHNICAL.to_string(),
            entries: vec![
                text(
                    "BIM_Fecha_Calculo",
                    &self.calc_date.format("%Y-%m-%d").to_string(),
                ),
                text("BIM_Ref_Pieza", &element.tag),
                text("BIM_Ref_Conjunto", &element.assembly_mark),
                text("BIM_Perfil_Maestro", &element.profile_name),
                text("BIM_Categoria_Interna", element.category.as_report_code()),
            ],
        }
    }

    fn planning_group(&self, fields: &DerivedFields) -> Option<PropertyGroupPayload> {
        let date = fields.scheduled_date?;
        Some(PropertyGroupPayload {
            name: GROUP_4D.to_string(),
            entries: vec![
                text("Fecha_Planificada", &date.format("%Y-%m-%d").to_string()),
                text(
                    "Fase_Constructiva",
                    fields.phase_label.as_deref().unwrap_or("General"),
                ),
            ],
        })
    }

    fn cost_group(&self, fields: &DerivedFields) -> Option<PropertyGroupPayload> {
        let cost = fields.cost_eur?;
        Some(PropertyGroupPayload {
            name: GROUP_5D.to_string(),
            entries: vec![
                number("Coste_Material_Eur", cost),
                number("Precio_Unitario", fields.unit_rate_eur_kg.unwrap_or(0.0)),
            ],
        })
    }

    fn footprint_group(&self, fields: &DerivedFields) -> Option<PropertyGroupPayload> {
        let footprint = fields.footprint_kgco2?;
        Some(PropertyGroupPayload {
            name: GROUP_6D.to_string(),
            entries: vec![
                number("Huella_Total_kgCO2eq", footprint),
                number("Factor_Impacto_A1_A3", fields.impact_factor.unwrap_or(0.0)),
            ],
        })
    }
}

fn text(key: &str, value: &str) -> (String, PropertyValue) {
    (key.to_string(), PropertyValue::Text(value.to_string()))
}

fn number(key: &str, value: f64) -> (String, PropertyValue) {
    (key.to_string(), PropertyValue::Number(value))
}

// ==========================================
// MetadataInjector - 回写驱动器
// ==========================================
pub struct MetadataInjector {
    builder: PayloadBuilder,
}

impl MetadataInjector {
    pub fn new(iso: IsoConfig, calc_date: NaiveDate) -> Self {
        Self {
            builder: PayloadBuilder::new(iso, calc_date),
        }
    }

    /// 将批次内全部构件的载荷写入 MetadataSink
    pub fn inject<S: MetadataSink>(
        &self,
        elements: &[ElementRecord],
        store: &crate::domain::DerivedStore,
        sink: &mut S,
    ) -> InjectResult<usize> {
        let mut written = 0;
        for element in elements {
            let payloads = self.builder.build(element, store.get(element.element_id));
            for payload in &payloads {
                // 先查后写
                if sink.has_group(element.element_id, &payload.name) {
                    sink.update_group(element.element_id, payload)?;
                } else {
                    sink.create_group(element.element_id, payload)?;
                }
            }
            debug!(
                element_id = element.element_id,
                groups = payloads.len(),
                "回写: 构件属性组已提交"
            );
            written += 1;
        }
        info!(elements = written, "回写: 元数据注入完成");
        Ok(written)
    }
}

// ==========================================
// InMemorySink - 内存写回方(测试/演练用)
// ==========================================
#[derive(Debug, Default)]
pub struct InMemorySink {
    groups: std::collections::HashMap<i64, Vec<PropertyGroupPayload>>,
    pub created: usize,
    pub updated: usize,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn group(&self, element_id: i64, name: &str) -> Option<&PropertyGroupPayload> {
        self.groups
            .get(&element_id)
            .and_then(|gs| gs.iter().find(|g| g.name == name))
    }
}

impl MetadataSink for InMemorySink {
    fn has_group(&self, element_id: i64, group_name: &str) -> bool {
        self.group(element_id, group_name).is_some()
    }

    fn create_group(&mut self, element_id: i64, payload: &PropertyGroupPayload) -> InjectResult<()> {
        self.groups
            .entry(element_id)
            .or_default()
            .push(payload.clone());
        self.created += 1;
        Ok(())
    }

    fn update_group(&mut self, element_id: i64, payload: &PropertyGroupPayload) -> InjectResult<()> {
        let existing = self
            .groups
            .entry(element_id)
            .or_default()
            .iter_mut()
            .find(|g| g.name == payload.name);
        if let Some(group) = existing {
            group.entries = payload.entries.clone();
        }
        self.updated += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DerivedStore;

    fn record(id: i64, category: Category) -> ElementRecord {
        ElementRecord {
            element_id: id,
            tag: format!("p{}", id),
            assembly_mark: "C1".to_string(),
            category,
            weight_kg: 100.0,
            elevation_mm: 0.0,
            profile_name: "HEB200".to_string(),
            is_fastener: false,
            property_groups: vec![],
        }
    }

    fn injector() -> MetadataInjector {
        MetadataInjector::new(
            IsoConfig::default(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
    }

    #[test]
    fn test_mandatory_groups_always_present() {
        let elements = vec![record(1, Category::Rolled)];
        let store = DerivedStore::new();
        let mut sink = InMemorySink::new();

        injector().inject(&elements, &store, &mut sink).unwrap();

        assert!(sink.has_group(1, GROUP_ISO_STATUS));
        assert!(sink.has_group(1, GROUP_TECHNICAL));
        // 无派生数据 → 维度组不写
        assert!(!sink.has_group(1, GROUP_5D));
    }

    #[test]
    fn test_uniclass_code_per_category() {
        let elements = vec![record(1, Category::Plate)];
        let store = DerivedStore::new();
        let mut sink = InMemorySink::new();

        injector().inject(&elements, &store, &mut sink).unwrap();

        let group = sink.group(1, GROUP_ISO_STATUS).unwrap();
        let code = group
            .entries
            .iter()
            .find(|(k, _)| k == "Uniclass2015_Code")
            .unwrap();
        assert_eq!(code.1, PropertyValue::Text("Pr_20_29_87_63".to_string()));
    }

    #[test]
    fn test_derived_groups_written_when_present() {
        let elements = vec![record(1, Category::Rolled)];
        let mut store = DerivedStore::new();
        let entry = store.entry(1);
        entry.scheduled_date = NaiveDate::from_ymd_opt(2024, 1, 2);
        entry.phase_label = Some("NIVEL +0.00m | PILARES".to_string());
        entry.cost_eur = Some(265.0);
        entry.unit_rate_eur_kg = Some(2.65);
        entry.footprint_kgco2 = Some(185.0);
        entry.impact_factor = Some(1.85);

        let mut sink = InMemorySink::new();
        injector().inject(&elements, &store, &mut sink).unwrap();

        assert!(sink.has_group(1, GROUP_4D));
        assert!(sink.has_group(1, GROUP_5D));
        assert!(sink.has_group(1, GROUP_6D));

        let planning = sink.group(1, GROUP_4D).unwrap();
        assert_eq!(
            planning.entries[0].1,
            PropertyValue::Text("2024-01-02".to_string())
        );
    }

    #[test]
    fn test_upsert_updates_existing_group() {
        let elements = vec![record(1, Category::Rolled)];
        let store = DerivedStore::new();
        let mut sink = InMemorySink::new();

        let inj = injector();
        inj.inject(&elements, &store, &mut sink).unwrap();
        let created_first = sink.created;
        inj.inject(&elements, &store, &mut sink).unwrap();

        // 第二轮全部走更新路径, 不重复创建
        assert_eq!(sink.created, created_first);
        assert!(sink.updated > 0);
    }
}
