// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use steel_bim_analytics::model::{
    ContainerRecord, ModelElement, ModelSnapshot, PropertyGroup, PropertyValue,
};

// ==========================================
// ModelElement 构建器
// ==========================================

pub struct ElementBuilder {
    element_id: i64,
    ifc_class: String,
    name: Option<String>,
    description: Option<String>,
    object_type: Option<String>,
    common: Vec<(String, PropertyValue)>,
    quantity: Vec<(String, PropertyValue)>,
    placement_z_mm: Option<f64>,
}

impl ElementBuilder {
    pub fn new(element_id: i64, ifc_class: &str) -> Self {
        Self {
            element_id,
            ifc_class: ifc_class.to_string(),
            name: None,
            description: None,
            object_type: None,
            common: Vec::new(),
            quantity: Vec::new(),
            placement_z_mm: None,
        }
    }

    pub fn beam(element_id: i64) -> Self {
        Self::new(element_id, "IfcBeam")
    }

    pub fn column(element_id: i64) -> Self {
        Self::new(element_id, "IfcColumn")
    }

    pub fn plate(element_id: i64) -> Self {
        Self::new(element_id, "IfcPlate")
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn object_type(mut self, object_type: &str) -> Self {
        self.object_type = Some(object_type.to_string());
        self
    }

    pub fn weight_kg(mut self, weight: f64) -> Self {
        self.quantity
            .push(("NetWeight".to_string(), PropertyValue::Number(weight)));
        self
    }

    pub fn mark(mut self, mark: &str) -> Self {
        self.common
            .push(("Mark".to_string(), PropertyValue::Text(mark.to_string())));
        self
    }

    pub fn assembly_mark(mut self, mark: &str) -> Self {
        self.common.push((
            "Assembly/Cast unit Mark".to_string(),
            PropertyValue::Text(mark.to_string()),
        ));
        self
    }

    pub fn bottom_elevation_mm(mut self, z: f64) -> Self {
        self.common.push((
            "Bottom elevation".to_string(),
            PropertyValue::Number(z),
        ));
        self
    }

    pub fn top_elevation_mm(mut self, z: f64) -> Self {
        self.common
            .push(("Top elevation".to_string(), PropertyValue::Number(z)));
        self
    }

    pub fn placement_z_mm(mut self, z: f64) -> Self {
        self.placement_z_mm = Some(z);
        self
    }

    pub fn build(self) -> ModelElement {
        let mut groups = Vec::new();
        if !self.common.is_empty() {
            groups.push(PropertyGroup {
                name: "Tekla Common".to_string(),
                entries: self.common,
            });
        }
        if !self.quantity.is_empty() {
            groups.push(PropertyGroup {
                name: "Tekla Quantity".to_string(),
                entries: self.quantity,
            });
        }
        ModelElement {
            element_id: self.element_id,
            ifc_class: self.ifc_class,
            name: self.name,
            description: self.description,
            object_type: self.object_type,
            property_groups: groups,
            placement_z_mm: self.placement_z_mm,
        }
    }
}

/// 竖向柱装配体(重型截面 + 足够高程差)
pub fn column_assembly(id: i64, mark: &str, weight: f64, base_z_mm: f64) -> ModelElement {
    ElementBuilder::column(id)
        .name(&format!("COLUMNA {}", mark))
        .description("HEB200")
        .mark(&format!("p{}", id))
        .assembly_mark(mark)
        .weight_kg(weight)
        .bottom_elevation_mm(base_z_mm)
        .top_elevation_mm(base_z_mm + 4000.0)
        .build()
}

/// 横向梁(轻截面, 无高程差)
pub fn beam_at_level(id: i64, mark: &str, weight: f64, z_mm: f64) -> ModelElement {
    ElementBuilder::beam(id)
        .name(&format!("VIGA {}", mark))
        .description("IPE300")
        .mark(&format!("p{}", id))
        .assembly_mark(mark)
        .weight_kg(weight)
        .bottom_elevation_mm(z_mm)
        .build()
}

/// 紧固件散件
pub fn loose_bolt(id: i64, weight: f64) -> ModelElement {
    ElementBuilder::new(id, "IfcDiscreteAccessory")
        .name("BOLT M20x60")
        .description("M20")
        .mark(&format!("t{}", id))
        .weight_kg(weight)
        .build()
}

// ==========================================
// ModelSnapshot 构建器
// ==========================================

#[derive(Default)]
pub struct SnapshotBuilder {
    containers: Vec<ContainerRecord>,
    loose_elements: Vec<ModelElement>,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn container(mut self, element: ModelElement, members: Vec<ModelElement>) -> Self {
        self.containers.push(ContainerRecord { element, members });
        self
    }

    pub fn loose(mut self, element: ModelElement) -> Self {
        self.loose_elements.push(element);
        self
    }

    pub fn build(self) -> ModelSnapshot {
        ModelSnapshot {
            containers: self.containers,
            loose_elements: self.loose_elements,
        }
    }
}
