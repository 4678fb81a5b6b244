// ==========================================
// 钢结构BIM施工分析系统 - 构件提取器
// ==========================================
// 职责: 遍历模型容器与散件, 产出构件记录批次
// 输入: ModelReader (容器 + 按类型散件)
// 输出: Vec<ElementRecord> (提取后不可变)
// ==========================================
// 规则:
// 1) 先处理容器(装配体/锚栓组)及其子构件, 记录已见标识
// 2) 再处理未见过的散件结构类型
// 3) 钢板缺重兜底 1.0 kg; 重量 ≤ ε 的构件剔除
// 4) 紧固件保留为 is_fastener 记录(仅供成本/碳足迹聚合),
//    结构管线各阶段自行跳过
// ==========================================

use crate::config::PipelineConfig;
use crate::domain::{Category, ElementRecord};
use crate::extractor::classifier::ElementClassifier;
use crate::extractor::error::{ExtractError, ExtractResult};
use crate::extractor::resolver::PropertyResolver;
use crate::model::{ModelElement, ModelReader};
use std::collections::HashSet;
use tracing::{debug, info};

/// 容器类型: 装配体 + 锚栓组
const CONTAINER_CLASSES: [&str; 2] = ["IfcElementAssembly", "IfcMechanicalFastener"];

/// 散件结构类型
const LOOSE_CLASSES: [&str; 6] = [
    "IfcBeam",
    "IfcColumn",
    "IfcPlate",
    "IfcMember",
    "IfcDiscreteAccessory",
    "IfcBuildingElementProxy",
];

// ==========================================
// ElementExtractor - 构件提取器
// ==========================================
pub struct ElementExtractor {
    resolver: PropertyResolver,
    classifier: ElementClassifier,
    min_weight_epsilon_kg: f64,
    plate_weight_floor_kg: f64,
}

impl ElementExtractor {
    /// 构造函数
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            resolver: PropertyResolver::new(config.steel_density_kg_m3),
            classifier: ElementClassifier::new(),
            min_weight_epsilon_kg: config.min_weight_epsilon_kg,
            plate_weight_floor_kg: config.plate_weight_floor_kg,
        }
    }

    /// 提取构件记录批次
    ///
    /// # 参数
    /// - `model`: 模型读取方
    ///
    /// # 返回
    /// - `Ok(records)`: 提取的构件记录(容器子构件 + 散件)
    /// - `Err(EmptyBatch)`: 模型中无任何有效结构构件
    pub fn extract<M: ModelReader>(&self, model: &M) -> ExtractResult<Vec<ElementRecord>> {
        info!("提取: 开始遍历模型容器与散件");

        let mut records: Vec<ElementRecord> = Vec::new();
        let mut seen_ids: HashSet<i64> = HashSet::new();

        // 1. 容器及其子构件
        for container in model.containers() {
            if !CONTAINER_CLASSES.contains(&container.element.ifc_class.as_str()) {
                continue;
            }

            let mut parts: Vec<&ModelElement> = container.members.clone();
            // 无子构件时, 容器自身作为构件处理
            if parts.is_empty() {
                parts.push(container.element);
            }

            for part in parts {
                seen_ids.insert(part.element_id);
                seen_ids.insert(container.element.element_id);

                if let Some(record) = self.build_record(part, Some(container.element)) {
                    records.push(record);
                }
            }
        }

        // 2. 未见过的散件
        for ifc_class in &LOOSE_CLASSES {
            for element in model.elements_by_class(ifc_class) {
                if seen_ids.contains(&element.element_id) {
                    continue;
                }
                seen_ids.insert(element.element_id);

                if let Some(record) = self.build_record(element, None) {
                    records.push(record);
                }
            }
        }

        if records.is_empty() {
            return Err(ExtractError::EmptyBatch);
        }

        info!(total = records.len(), "提取: 完成, 零件编号与装配体编号已分离");
        Ok(records)
    }

    /// 构建单条构件记录(故障降级: 返回 None 表示剔除)
    fn build_record(
        &self,
        element: &ModelElement,
        parent: Option<&ModelElement>,
    ) -> Option<ElementRecord> {
        let profile = self.resolver.resolve_profile(element);
        let name = element.name.clone().unwrap_or_default();
        let is_fastener = self
            .classifier
            .is_fastener(&profile, &name, &element.ifc_class);

        let mut weight = self.resolver.resolve_weight_kg(element);
        // 钢板缺重兜底: 避免无量钢板被静默剔除
        if weight <= self.min_weight_epsilon_kg && self.classifier.is_confirmed_plate(&profile) {
            weight = self.plate_weight_floor_kg;
        }

        if weight <= self.min_weight_epsilon_kg {
            debug!(
                element_id = element.element_id,
                weight_kg = weight,
                "提取: 重量低于阈值, 构件剔除"
            );
            return None;
        }

        let category = if is_fastener {
            Category::Fastener
        } else {
            self.classifier.classify(&profile)
        };

        Some(ElementRecord {
            element_id: element.element_id,
            tag: self.resolver.resolve_tag(element),
            assembly_mark: self.resolver.resolve_assembly_mark(element, parent),
            category,
            weight_kg: weight,
            elevation_mm: self.resolver.resolve_elevation_mm(element, parent),
            profile_name: profile,
            is_fastener,
            property_groups: element.property_groups.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContainerRecord, ModelSnapshot, PropertyGroup, PropertyValue};

    fn element(id: i64, ifc_class: &str, name: &str, weight: Option<f64>) -> ModelElement {
        let mut groups = vec![];
        if let Some(w) = weight {
            groups.push(PropertyGroup {
                name: "Tekla Quantity".to_string(),
                entries: vec![("NetWeight".to_string(), PropertyValue::Number(w))],
            });
        }
        ModelElement {
            element_id: id,
            ifc_class: ifc_class.to_string(),
            name: Some(name.to_string()),
            description: Some(name.to_string()),
            object_type: None,
            property_groups: groups,
            placement_z_mm: None,
        }
    }

    fn extractor() -> ElementExtractor {
        ElementExtractor::new(&PipelineConfig::default())
    }

    #[test]
    fn test_container_members_inherit_parent_assembly_mark() {
        let mut parent = element(1, "IfcElementAssembly", "conjunto", None);
        parent.property_groups.push(PropertyGroup {
            name: "Tekla Assembly".to_string(),
            entries: vec![(
                "Assembly/Cast unit Mark".to_string(),
                PropertyValue::Text("C1".to_string()),
            )],
        });

        let snapshot = ModelSnapshot {
            containers: vec![ContainerRecord {
                element: parent,
                members: vec![
                    element(2, "IfcColumn", "HEB200", Some(300.0)),
                    element(3, "IfcPlate", "PL20", Some(12.0)),
                ],
            }],
            loose_elements: vec![],
        };

        let records = extractor().extract(&snapshot).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.assembly_mark == "C1"));
    }

    #[test]
    fn test_loose_elements_not_double_counted() {
        let beam = element(2, "IfcBeam", "IPE300", Some(100.0));
        let snapshot = ModelSnapshot {
            containers: vec![ContainerRecord {
                element: element(1, "IfcElementAssembly", "conjunto", None),
                members: vec![beam.clone()],
            }],
            loose_elements: vec![beam, element(5, "IfcBeam", "IPE200", Some(80.0))],
        };

        let records = extractor().extract(&snapshot).unwrap();
        // 容器成员 2 号只计一次, 散件 5 号单独计入
        assert_eq!(records.len(), 2);
        assert_eq!(
            records.iter().filter(|r| r.element_id == 2).count(),
            1
        );
    }

    #[test]
    fn test_plate_weight_floor_applied() {
        let snapshot = ModelSnapshot {
            containers: vec![],
            loose_elements: vec![element(9, "IfcPlate", "PL10x200", None)],
        };

        let records = extractor().extract(&snapshot).unwrap();
        assert_eq!(records[0].weight_kg, 1.0);
        assert_eq!(records[0].category, Category::Plate);
    }

    #[test]
    fn test_zero_weight_non_plate_filtered_out() {
        let snapshot = ModelSnapshot {
            containers: vec![],
            loose_elements: vec![
                element(9, "IfcBeam", "IPE300", None),
                element(10, "IfcBeam", "IPE300", Some(50.0)),
            ],
        };

        let records = extractor().extract(&snapshot).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].element_id, 10);
    }

    #[test]
    fn test_fasteners_kept_with_flag() {
        let snapshot = ModelSnapshot {
            containers: vec![],
            loose_elements: vec![element(4, "IfcDiscreteAccessory", "BOLT M20", Some(0.5))],
        };

        let records = extractor().extract(&snapshot).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].is_fastener);
        assert_eq!(records[0].category, Category::Fastener);
    }

    #[test]
    fn test_empty_model_is_batch_fault() {
        let snapshot = ModelSnapshot::default();
        let result = extractor().extract(&snapshot);
        assert!(matches!(result, Err(ExtractError::EmptyBatch)));
    }

    #[test]
    fn test_childless_container_processed_as_part() {
        let snapshot = ModelSnapshot {
            containers: vec![ContainerRecord {
                element: element(1, "IfcElementAssembly", "HEB140", Some(200.0)),
                members: vec![],
            }],
            loose_elements: vec![],
        };

        let records = extractor().extract(&snapshot).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].element_id, 1);
    }
}
