// ==========================================
// Excel 记录转换 - 记录与字段定义
// ==========================================
// 职责: 记录类型的字段描述表（编译期检查的访问器）
// 职责: 字段导出元数据（显示名、列宽、跳过标记）
// ==========================================

use crate::domain::types::{FieldKind, Value};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 未设置列宽时的默认列宽（字符数）
pub const DEFAULT_COLUMN_WIDTH: u16 = 20;

// ==========================================
// ExcelField - 字段导出元数据
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcelField {
    /// 表头显示名（为空时使用字段名）
    #[serde(default)]
    pub name: Option<String>,

    /// 列宽（字符数）
    #[serde(default)]
    pub width: Option<u16>,

    /// 是否跳过该字段
    #[serde(default)]
    pub skip: bool,
}

impl ExcelField {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以显示名创建
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn skip(mut self) -> Self {
        self.skip = true;
        self
    }
}

// ==========================================
// FieldType - 可映射的字段类型
// ==========================================
// 实现者: String / i32 / i64 / f32 / f64 / bool / NaiveDateTime / Option<T>
// 自定义类型可声明 KIND = FieldKind::Other，按字符串形式写出
pub trait FieldType {
    /// 字段语义类型
    const KIND: FieldKind;

    /// 转为中间值（None → Value::Null）
    fn to_value(&self) -> Value;

    /// 由同类型的中间值构造
    ///
    /// # 返回
    /// - Some: 类型匹配
    /// - None: 类型不匹配（字段保持原值）
    fn from_value(value: Value) -> Option<Self>
    where
        Self: Sized;
}

impl FieldType for String {
    const KIND: FieldKind = FieldKind::Text;

    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl FieldType for i32 {
    const KIND: FieldKind = FieldKind::Int;

    fn to_value(&self) -> Value {
        Value::Int(*self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Int(v) => Some(v),
            _ => None,
        }
    }
}

impl FieldType for i64 {
    const KIND: FieldKind = FieldKind::Long;

    fn to_value(&self) -> Value {
        Value::Long(*self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Long(v) => Some(v),
            _ => None,
        }
    }
}

impl FieldType for f32 {
    const KIND: FieldKind = FieldKind::Float;

    fn to_value(&self) -> Value {
        Value::Float(*self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Float(v) => Some(v),
            _ => None,
        }
    }
}

impl FieldType for f64 {
    const KIND: FieldKind = FieldKind::Double;

    fn to_value(&self) -> Value {
        Value::Double(*self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Double(v) => Some(v),
            _ => None,
        }
    }
}

impl FieldType for bool {
    const KIND: FieldKind = FieldKind::Bool;

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Bool(v) => Some(v),
            _ => None,
        }
    }
}

impl FieldType for NaiveDateTime {
    const KIND: FieldKind = FieldKind::DateTime;

    fn to_value(&self) -> Value {
        Value::DateTime(*self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::DateTime(v) => Some(v),
            _ => None,
        }
    }
}

impl<T: FieldType> FieldType for Option<T> {
    const KIND: FieldKind = T::KIND;

    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }

    fn from_value(value: Value) -> Option<Self> {
        T::from_value(value).map(Some)
    }
}

// ==========================================
// Field - 单个字段的描述与访问器
// ==========================================
pub struct Field<T> {
    name: &'static str,
    kind: FieldKind,
    excel: Option<ExcelField>,
    getter: Box<dyn Fn(&T) -> Value>,
    setter: Box<dyn Fn(&mut T, Value) -> bool>,
}

impl<T: 'static> Field<T> {
    /// 以字段访问器创建（未导出，需调用 `excel` 附加元数据）
    ///
    /// 通常通过 `excel_field!` 宏调用。
    pub fn new<V>(name: &'static str, get: fn(&T) -> &V, get_mut: fn(&mut T) -> &mut V) -> Self
    where
        V: FieldType + 'static,
    {
        Self {
            name,
            kind: V::KIND,
            excel: None,
            getter: Box::new(move |record| get(record).to_value()),
            setter: Box::new(move |record, value| match V::from_value(value) {
                Some(v) => {
                    *get_mut(record) = v;
                    true
                }
                None => false,
            }),
        }
    }
}

impl<T> Field<T> {
    /// 附加导出元数据
    pub fn excel(mut self, meta: ExcelField) -> Self {
        self.excel = Some(meta);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn meta(&self) -> Option<&ExcelField> {
        self.excel.as_ref()
    }

    /// 读取字段值
    pub fn get(&self, record: &T) -> Value {
        (self.getter)(record)
    }

    /// 写入字段值，类型不匹配时返回 false 且不修改记录
    pub fn set(&self, record: &mut T, value: Value) -> bool {
        (self.setter)(record, value)
    }
}

impl<T> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("excel", &self.excel)
            .finish()
    }
}

// ==========================================
// Record - 可导入导出的记录类型
// ==========================================
// 字段顺序 = 声明顺序，读写两侧一致
pub trait Record: Default + Sized + 'static {
    fn fields() -> Vec<Field<Self>>;
}

/// 构造字段描述
///
/// ```
/// use excel_record::{excel_field, ExcelField, Field, Record};
///
/// #[derive(Default)]
/// struct User {
///     id: i64,
///     name: String,
/// }
///
/// impl Record for User {
///     fn fields() -> Vec<Field<Self>> {
///         vec![
///             excel_field!(User, id: i64).excel(ExcelField::named("编号")),
///             excel_field!(User, name: String).excel(ExcelField::named("姓名").width(12)),
///         ]
///     }
/// }
/// ```
#[macro_export]
macro_rules! excel_field {
    ($record:ty, $field:ident : $ty:ty) => {{
        fn get(record: &$record) -> &$ty {
            &record.$field
        }
        fn get_mut(record: &mut $record) -> &mut $ty {
            &mut record.$field
        }
        $crate::domain::field::Field::<$record>::new(stringify!($field), get, get_mut)
    }};
}
