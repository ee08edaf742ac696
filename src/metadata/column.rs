use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub is_primary_key: bool,
    #[serde(default)]
    pub is_foreign_key: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<u8>,
}

impl ColumnInfo {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            nullable: true,
            ..Default::default()
        }
    }

    pub fn nullable(self, nullable: bool) -> Self {
        Self { nullable, ..self }
    }

    pub fn primary_key(self) -> Self {
        Self {
            is_primary_key: true,
            nullable: false,
            ..self
        }
    }

    pub fn foreign_key(self) -> Self {
        Self {
            is_foreign_key: true,
            ..self
        }
    }

    pub fn with_length(self, max_length: i32) -> Self {
        Self {
            max_length: Some(max_length),
            ..self
        }
    }

    pub fn with_precision(self, precision: u8, scale: u8) -> Self {
        Self {
            precision: Some(precision),
            scale: Some(scale),
            ..self
        }
    }

    /// Display type with its size arguments, e.g. `nvarchar(50)` or `decimal(10,2)`.
    ///
    /// A max length of `-1` is the `(max)` marker used by variable-length types.
    pub fn describe(&self) -> String {
        match (self.max_length, self.precision, self.scale) {
            (Some(-1), _, _) => format!("{}(max)", self.data_type),
            (Some(len), _, _) if len > 0 => format!("{}({len})", self.data_type),
            (_, Some(p), Some(s)) if s > 0 => format!("{}({p},{s})", self.data_type),
            (_, Some(p), _) => format!("{}({p})", self.data_type),
            _ => self.data_type.clone(),
        }
    }
}
