// ==========================================
// Excel 记录转换 - 字段目录
// ==========================================
// 职责: 记录类型 → 有序字段描述（显示名、列宽、跳过标记）
// 红线: 无状态，无副作用；顺序 = 字段声明顺序
// ==========================================

use crate::domain::field::{Field, Record, DEFAULT_COLUMN_WIDTH};
use crate::domain::types::FieldKind;
use std::collections::HashMap;

/// 字段描述
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// 在字段表中的位置
    pub index: usize,
    pub name: &'static str,
    pub display_name: String,
    pub column_width: u16,
    pub skip: bool,
    pub kind: FieldKind,
}

// ==========================================
// FieldCatalog - 某记录类型的字段目录
// ==========================================
pub struct FieldCatalog<T: Record> {
    fields: Vec<Field<T>>,
    descriptors: Vec<FieldDescriptor>,
}

impl<T: Record> FieldCatalog<T> {
    /// 解析记录类型的字段目录
    ///
    /// 未附加导出元数据的字段被静默排除。
    pub fn resolve() -> Self {
        let fields = T::fields();
        let descriptors = fields
            .iter()
            .enumerate()
            .filter_map(|(index, field)| {
                field.meta().map(|meta| FieldDescriptor {
                    index,
                    name: field.name(),
                    display_name: meta
                        .name
                        .clone()
                        .filter(|n| !n.is_empty())
                        .unwrap_or_else(|| field.name().to_string()),
                    column_width: meta.width.unwrap_or(DEFAULT_COLUMN_WIDTH),
                    skip: meta.skip,
                    kind: field.kind(),
                })
            })
            .collect();

        Self {
            fields,
            descriptors,
        }
    }

    /// 全部带元数据的字段（含跳过字段）
    pub fn descriptors(&self) -> &[FieldDescriptor] {
        &self.descriptors
    }

    /// 参与导入导出的字段（不含跳过字段）
    pub fn exported(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.descriptors.iter().filter(|d| !d.skip)
    }

    /// 字段访问器
    pub fn field(&self, descriptor: &FieldDescriptor) -> Option<&Field<T>> {
        self.fields.get(descriptor.index)
    }

    /// 显示名 → 字段描述
    ///
    /// 显示名重复时以先声明的字段为准。
    pub fn title_index(&self) -> HashMap<&str, &FieldDescriptor> {
        let mut index = HashMap::new();
        for descriptor in self.exported() {
            index
                .entry(descriptor.display_name.as_str())
                .or_insert(descriptor);
        }
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::field::ExcelField;
    use crate::excel_field;

    #[derive(Debug, Default)]
    struct Coil {
        coil_no: String,
        weight: f64,
        internal: i32,
        memo: String,
    }

    impl Record for Coil {
        fn fields() -> Vec<Field<Self>> {
            vec![
                excel_field!(Coil, coil_no: String).excel(ExcelField::named("卷号").width(14)),
                excel_field!(Coil, weight: f64).excel(ExcelField::new()),
                excel_field!(Coil, internal: i32).excel(ExcelField::named("内部").skip()),
                excel_field!(Coil, memo: String),
            ]
        }
    }

    #[test]
    fn test_descriptors_in_declaration_order() {
        let catalog = FieldCatalog::<Coil>::resolve();
        let names: Vec<_> = catalog.descriptors().iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["coil_no", "weight", "internal"]);

        let weight = &catalog.descriptors()[1];
        assert_eq!(weight.display_name, "weight");
        assert_eq!(weight.column_width, DEFAULT_COLUMN_WIDTH);
        assert_eq!(weight.kind, FieldKind::Double);
        assert_eq!(catalog.descriptors()[0].column_width, 14);
    }

    #[test]
    fn test_exported_excludes_skip() {
        let catalog = FieldCatalog::<Coil>::resolve();
        let exported: Vec<_> = catalog.exported().map(|d| d.display_name.as_str()).collect();
        assert_eq!(exported, vec!["卷号", "weight"]);

        let index = catalog.title_index();
        assert!(index.contains_key("卷号"));
        assert!(!index.contains_key("内部"));
        assert!(!index.contains_key("memo"));
    }

    #[test]
    fn test_catalog_is_deterministic() {
        let a = FieldCatalog::<Coil>::resolve();
        let b = FieldCatalog::<Coil>::resolve();
        assert_eq!(a.descriptors(), b.descriptors());
    }
}
