// ==========================================
// 钢结构BIM施工分析系统 - 属性解析器
// ==========================================
// 职责: 按优先级回退链从属性组解析标量属性
// 红线: 解析失败返回默认值, 不抛错(单构件故障不致命)
// ==========================================
// 单位启发: 高程绝对值 < 200 视为米, ×1000 归一为毫米。
// 已知局限: 真实的 200mm 以下毫米值会被误放大;
// 为与既有交付物保持一致, 该行为按原样保留并以测试固化。
// ==========================================

use crate::model::{ModelElement, PropertyValue};

/// 单位归一阈值: 绝对值低于此值的高程按米解释
const METER_SCALE_THRESHOLD: f64 = 200.0;

/// 高程回退键(精确匹配, 先构件后父容器)
const ELEVATION_KEYS: [&str; 3] = [
    "Assembly/Cast unit bottom elevation",
    "Bottom elevation",
    "Elevation",
];

/// 零件编号回退键
const TAG_KEYS: [&str; 5] = ["Mark", "Reference", "Pos", "Part Position", "Part Mark"];

/// 装配体编号回退键(父容器)
const ASSEMBLY_MARK_PARENT_KEYS: [&str; 3] =
    ["Assembly/Cast unit Mark", "Assembly Mark", "Mark"];

/// 装配体编号回退键(构件自身)
const ASSEMBLY_MARK_OWN_KEYS: [&str; 2] = ["Assembly/Cast unit Mark", "Assembly Mark"];

// ==========================================
// PropertyResolver - 属性解析器
// ==========================================
pub struct PropertyResolver {
    steel_density_kg_m3: f64,
}

impl PropertyResolver {
    /// 构造函数
    ///
    /// # 参数
    /// - `steel_density_kg_m3`: 体积兜底换算密度
    pub fn new(steel_density_kg_m3: f64) -> Self {
        Self { steel_density_kg_m3 }
    }

    /// 通用回退链: 按调用方给定的键优先级返回首个非空文本值
    pub fn resolve_text(&self, element: &ModelElement, candidate_keys: &[&str]) -> Option<String> {
        for key in candidate_keys {
            if let Some(value) = element.property(key) {
                let text = value.as_text();
                if !text.trim().is_empty() {
                    return Some(text.trim().to_string());
                }
            }
        }
        None
    }

    /// 解析净重 (kg)
    ///
    /// 回退链:
    /// 1) 键名(小写)含 netweight 或 mass 的首个正数值
    /// 2) NetVolume / Volume × 密度
    /// 3) 0.0 (由调用方做最低限处理)
    pub fn resolve_weight_kg(&self, element: &ModelElement) -> f64 {
        for group in &element.property_groups {
            for (key, value) in &group.entries {
                let k = key.to_lowercase();
                if let Some(v) = value.as_f64() {
                    if v > 0.0 && (k.contains("netweight") || k.contains("mass")) {
                        return v;
                    }
                }
            }
        }

        for group in &element.property_groups {
            let volume = group
                .get("NetVolume")
                .or_else(|| group.get("Volume"))
                .and_then(|v| v.as_f64());
            if let Some(v) = volume {
                if v > 0.0 {
                    return v * self.steel_density_kg_m3;
                }
            }
        }

        0.0
    }

    /// 解析零件编号
    ///
    /// 回退链: Mark 系列键 → 短名称(<15 字符) → 合成 ID
    pub fn resolve_tag(&self, element: &ModelElement) -> String {
        if let Some(tag) = self.resolve_text(element, &TAG_KEYS) {
            return tag;
        }
        if let Some(name) = &element.name {
            if !name.is_empty() && name.chars().count() < 15 {
                return name.clone();
            }
        }
        format!("ID-{}", element.element_id)
    }

    /// 解析装配体编号
    ///
    /// 回退链: 父容器装配键 → 自身装配键 → 自身零件编号
    /// (散件的装配体即其自身)
    pub fn resolve_assembly_mark(
        &self,
        element: &ModelElement,
        parent: Option<&ModelElement>,
    ) -> String {
        if let Some(parent) = parent {
            if let Some(mark) = self.resolve_text(parent, &ASSEMBLY_MARK_PARENT_KEYS) {
                return mark;
            }
        }
        if let Some(mark) = self.resolve_text(element, &ASSEMBLY_MARK_OWN_KEYS) {
            return mark;
        }
        self.resolve_tag(element)
    }

    /// 解析底部高程 (mm)
    ///
    /// 回退链: 高程键(先构件后父容器) → 几何放置 → 0.0
    /// 几何放置值按模型单位原样使用, 不做米/毫米启发
    pub fn resolve_elevation_mm(
        &self,
        element: &ModelElement,
        parent: Option<&ModelElement>,
    ) -> f64 {
        let mut objects: Vec<&ModelElement> = vec![element];
        if let Some(parent) = parent {
            objects.push(parent);
        }

        for object in objects {
            for group in &object.property_groups {
                for key in &ELEVATION_KEYS {
                    if let Some(value) = group.get(key) {
                        if let Some(v) = value.as_f64() {
                            return normalize_elevation_mm(v);
                        }
                    }
                }
            }
        }

        element.placement_z_mm.unwrap_or(0.0)
    }

    /// 解析截面/型号文本
    ///
    /// 回退链: 描述 → Profile / Profile Name → 类型文本 → 名称 → "S/N"
    pub fn resolve_profile(&self, element: &ModelElement) -> String {
        if let Some(description) = &element.description {
            if !description.trim().is_empty() {
                return description.clone();
            }
        }
        if let Some(profile) = self.resolve_text(element, &["Profile", "Profile Name"]) {
            return profile;
        }
        if let Some(object_type) = &element.object_type {
            if !object_type.trim().is_empty() {
                return object_type.clone();
            }
        }
        element
            .name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| "S/N".to_string())
    }

    /// 解析几何高程差 (mm) — 竖向构件判定使用
    ///
    /// 扫描全部属性组, 键名(小写)含 "bottom elevation" /
    /// "top elevation" 的最后命中值, 各自独立单位归一;
    /// 顶底齐备时返回 |top - bottom|, 否则 0.0
    pub fn geometric_rise_mm(&self, element: &ModelElement) -> f64 {
        let mut bottom: Option<f64> = None;
        let mut top: Option<f64> = None;

        for group in &element.property_groups {
            for (key, value) in &group.entries {
                let k = key.to_lowercase();
                if k.contains("bottom elevation") {
                    if let Some(v) = value.as_f64() {
                        bottom = Some(v);
                    }
                }
                if k.contains("top elevation") {
                    if let Some(v) = value.as_f64() {
                        top = Some(v);
                    }
                }
            }
        }

        match (bottom, top) {
            (Some(b), Some(t)) => {
                (normalize_elevation_mm(t) - normalize_elevation_mm(b)).abs()
            }
            _ => 0.0,
        }
    }
}

/// 高程单位归一: |v| < 200 视为米并 ×1000
fn normalize_elevation_mm(value: f64) -> f64 {
    if value.abs() < METER_SCALE_THRESHOLD {
        value * 1000.0
    } else {
        value
    }
}
