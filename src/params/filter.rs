use crate::domain::model::JoinType;
use crate::domain::ports::{to_server_value, Destroyable, ToServerJson};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

/// Connection of the queried dataset with an external table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct JoinItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreign_table_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub join_filter: Option<String>,
    pub join_type: JoinType,
}

impl JoinItem {
    pub fn new(foreign_table_name: impl Into<String>, join_filter: impl Into<String>) -> Self {
        Self {
            foreign_table_name: Some(foreign_table_name.into()),
            join_filter: Some(join_filter.into()),
            join_type: JoinType::default(),
        }
    }

    pub fn with_join_type(mut self, join_type: JoinType) -> Self {
        self.join_type = join_type;
        self
    }
}

impl Destroyable for JoinItem {
    fn destroy(&mut self) {
        self.foreign_table_name = None;
        self.join_filter = None;
    }
}

impl ToServerJson for JoinItem {
    fn to_server_json(&self) -> Result<serde_json::Value> {
        to_server_value(self)
    }
}

/// Attribute filter applied to one dataset. Only the members that are set reach the server.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct FilterParameter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub join_items: Option<Vec<JoinItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
}

impl FilterParameter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_attribute_filter(mut self, filter: impl Into<String>) -> Self {
        self.attribute_filter = Some(filter.into());
        self
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    pub fn with_group_by(mut self, group_by: impl Into<String>) -> Self {
        self.group_by = Some(group_by.into());
        self
    }

    pub fn with_ids(mut self, ids: Vec<i64>) -> Self {
        self.ids = Some(ids);
        self
    }

    pub fn with_join_item(mut self, item: JoinItem) -> Self {
        self.join_items.get_or_insert_with(Vec::new).push(item);
        self
    }
}

impl Destroyable for FilterParameter {
    fn destroy(&mut self) {
        self.name = None;
        self.attribute_filter = None;
        if let Some(items) = self.join_items.as_mut() {
            items.iter_mut().for_each(Destroyable::destroy);
        }
        self.join_items = None;
        self.ids = None;
        self.order_by = None;
        self.group_by = None;
        self.fields = None;
    }
}

impl ToServerJson for FilterParameter {
    fn to_server_json(&self) -> Result<serde_json::Value> {
        to_server_value(self)
    }
}
