//! Shared model fixtures for unit tests.

use std::sync::Arc;

use crate::model::{ModelDef, PropertyDef, Record};
use crate::value::Value;

pub fn customer_model() -> Arc<ModelDef> {
    Arc::new(
        ModelDef::new("Customer")
            .property("id", PropertyDef::id())
            .property("name", PropertyDef::new().required()),
    )
}

pub fn order_model() -> Arc<ModelDef> {
    Arc::new(
        ModelDef::new("Order")
            .property("id", PropertyDef::id())
            .property("description", PropertyDef::new())
            .property("customerId", PropertyDef::new()),
    )
}

pub fn address_model() -> Arc<ModelDef> {
    Arc::new(
        ModelDef::new("Address")
            .property("id", PropertyDef::id())
            .property("street", PropertyDef::new())
            .property("customerId", PropertyDef::new()),
    )
}

pub fn customer(id: i64, name: &str) -> Record {
    Record::new(customer_model())
        .attr("id", Value::Int(id))
        .attr("name", Value::String(name.into()))
}

pub fn order(id: i64, customer_id: impl Into<Value>, description: &str) -> Record {
    Record::new(order_model())
        .attr("id", Value::Int(id))
        .attr("customerId", customer_id)
        .attr("description", Value::String(description.into()))
}

pub fn address(id: i64, customer_id: impl Into<Value>, street: &str) -> Record {
    Record::new(address_model())
        .attr("id", Value::Int(id))
        .attr("customerId", customer_id)
        .attr("street", Value::String(street.into()))
}
