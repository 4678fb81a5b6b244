// ==========================================
// 钢结构BIM施工分析系统 - 模型快照实现
// ==========================================
// 职责: ModelReader 的 JSON 快照实现
// 用途: 模型解析方导出的中间 JSON 文档 → 内存只读快照
// ==========================================
// 说明: 核心不解析原生模型格式; 快照由外部协作方
// (模型读取器)生成, 结构为 容器列表 + 散件列表。
// ==========================================

use super::{ModelContainer, ModelElement, ModelReader};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// 快照加载错误
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("快照文件读取失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("快照 JSON 解析失败: {0}")]
    Parse(#[from] serde_json::Error),
}

// ==========================================
// 容器记录 (ContainerRecord)
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerRecord {
    pub element: ModelElement,
    #[serde(default)]
    pub members: Vec<ModelElement>,
}

// ==========================================
// ModelSnapshot - 模型快照
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelSnapshot {
    #[serde(default)]
    pub containers: Vec<ContainerRecord>,
    #[serde(default)]
    pub loose_elements: Vec<ModelElement>,
}

impl ModelSnapshot {
    /// 从 JSON 文件加载快照
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let raw = fs::read_to_string(path)?;
        let snapshot: ModelSnapshot = serde_json::from_str(&raw)?;
        Ok(snapshot)
    }
}

impl ModelReader for ModelSnapshot {
    fn elements_by_class(&self, ifc_class: &str) -> Vec<&ModelElement> {
        self.loose_elements
            .iter()
            .filter(|e| e.ifc_class == ifc_class)
            .collect()
    }

    fn containers(&self) -> Vec<ModelContainer<'_>> {
        self.containers
            .iter()
            .map(|c| ModelContainer {
                element: &c.element,
                members: c.members.iter().collect(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PropertyValue;
    use std::io::Write;

    fn sample_element(id: i64, ifc_class: &str) -> ModelElement {
        ModelElement {
            element_id: id,
            ifc_class: ifc_class.to_string(),
            name: Some(format!("E{}", id)),
            description: None,
            object_type: None,
            property_groups: vec![],
            placement_z_mm: None,
        }
    }

    #[test]
    fn test_elements_by_class_filters() {
        let snapshot = ModelSnapshot {
            containers: vec![],
            loose_elements: vec![sample_element(1, "IfcBeam"), sample_element(2, "IfcPlate")],
        };
        assert_eq!(snapshot.elements_by_class("IfcBeam").len(), 1);
        assert_eq!(snapshot.elements_by_class("IfcColumn").len(), 0);
    }

    #[test]
    fn test_load_roundtrip() {
        let snapshot = ModelSnapshot {
            containers: vec![ContainerRecord {
                element: sample_element(10, "IfcElementAssembly"),
                members: vec![sample_element(11, "IfcBeam")],
            }],
            loose_elements: vec![sample_element(2, "IfcPlate")],
        };

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", serde_json::to_string(&snapshot).unwrap()).unwrap();

        let loaded = ModelSnapshot::load(file.path()).unwrap();
        assert_eq!(loaded.containers.len(), 1);
        assert_eq!(loaded.containers[0].members[0].element_id, 11);
        assert_eq!(loaded.loose_elements[0].element_id, 2);
    }

    #[test]
    fn test_property_value_untagged_json() {
        let raw = r#"{"name":"Tekla Quantity","entries":[["NetWeight",152.4],["Comment","ok"]]}"#;
        let group: crate::model::PropertyGroup = serde_json::from_str(raw).unwrap();
        assert_eq!(group.get("NetWeight"), Some(&PropertyValue::Number(152.4)));
    }
}
