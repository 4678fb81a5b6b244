// ==========================================
// 钢结构BIM施工分析系统 - 模型读取接口
// ==========================================
// 职责: 定义核心对模型读取方的最小依赖
// 红线: 核心只读模型, 永不回写
// ==========================================
// 接口范围:
// (a) 按结构类型枚举元素
// (b) 枚举容器元素(装配体/锚栓组)及其子构件
// (c) 元素属性组键值查询 (ModelElement 自带快照)
// (d) 属性缺失时的几何放置高程兜底
// ==========================================

mod snapshot;

pub use snapshot::{ContainerRecord, ModelSnapshot, SnapshotError};

use serde::{Deserialize, Serialize};

// ==========================================
// 属性值 (PropertyValue)
// ==========================================
// 属性组中的标量值, 不做运行时反射
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Number(f64),
    Boolean(bool),
    Text(String),
}

impl PropertyValue {
    /// 数值视图(文本值尝试解析, 允许前缀 '+')
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropertyValue::Number(v) => Some(*v),
            PropertyValue::Text(s) => s.trim().trim_start_matches('+').parse::<f64>().ok(),
            PropertyValue::Boolean(_) => None,
        }
    }

    /// 文本视图(数值/布尔转为字符串)
    pub fn as_text(&self) -> String {
        match self {
            PropertyValue::Text(s) => s.clone(),
            PropertyValue::Number(v) => v.to_string(),
            PropertyValue::Boolean(b) => b.to_string(),
        }
    }

    /// 判定值是否为空(空白文本视为缺失)
    pub fn is_empty(&self) -> bool {
        match self {
            PropertyValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

// ==========================================
// 属性组 (PropertyGroup)
// ==========================================
// 键值保持模型导出的原始顺序(回退链依赖顺序遍历)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyGroup {
    pub name: String,
    pub entries: Vec<(String, PropertyValue)>,
}

impl PropertyGroup {
    /// 按键精确查找(返回首个非空值)
    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.entries
            .iter()
            .find(|(k, v)| k == key && !v.is_empty())
            .map(|(_, v)| v)
    }
}

// ==========================================
// 模型元素 (ModelElement)
// ==========================================
// 模型对象的只读快照: 标识 + 描述字段 + 属性组 + 放置高程
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelElement {
    pub element_id: i64,                     // 模型内唯一标识
    pub ifc_class: String,                   // 元素类型, 如 IfcBeam
    pub name: Option<String>,                // 元素名称
    pub description: Option<String>,         // 描述(通常承载截面型号)
    pub object_type: Option<String>,         // 类型文本
    pub property_groups: Vec<PropertyGroup>, // 附着属性组(保持导出顺序)
    pub placement_z_mm: Option<f64>,         // 几何放置高程(属性缺失时兜底)
}

impl ModelElement {
    /// 遍历所有属性组, 返回第一个命中键的非空值
    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.property_groups.iter().find_map(|g| g.get(key))
    }
}

// ==========================================
// 容器视图 (ModelContainer)
// ==========================================
// 装配体/锚栓组容器及其子构件
#[derive(Debug, Clone)]
pub struct ModelContainer<'a> {
    pub element: &'a ModelElement,
    pub members: Vec<&'a ModelElement>,
}

// ==========================================
// ModelReader - 模型读取方接口
// ==========================================
pub trait ModelReader {
    /// 按元素类型枚举(不含容器子构件去重, 由提取器处理)
    fn elements_by_class(&self, ifc_class: &str) -> Vec<&ModelElement>;

    /// 枚举容器元素及其子构件
    fn containers(&self) -> Vec<ModelContainer<'_>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_value_parses_signed_text() {
        let v = PropertyValue::Text("+12.5".to_string());
        assert_eq!(v.as_f64(), Some(12.5));
        assert!(PropertyValue::Text("  ".to_string()).is_empty());
    }

    #[test]
    fn test_property_group_skips_empty_values() {
        let group = PropertyGroup {
            name: "Tekla Common".to_string(),
            entries: vec![
                ("Mark".to_string(), PropertyValue::Text(String::new())),
                ("Mark".to_string(), PropertyValue::Text("p102".to_string())),
            ],
        };
        assert_eq!(group.get("Mark").unwrap().as_text(), "p102");
    }
}
