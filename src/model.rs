//! Model descriptors and the dynamic entity type.
//!
//! A [`ModelDef`] describes a model's declared shape: its name, its
//! properties, and which of those properties identify an instance. A
//! [`Record`] is one instance of a model: the persisted attribute map plus
//! a separate relation map where included related entities are attached,
//! so inclusion never collides with declared attributes.
//!
//! [`ModelResolver`] is the deferred reference used to point relations at
//! models that may not be defined yet, including circular definitions. It
//! resolves on first use and memoizes the result.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Declared shape of one model property.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDef {
    /// Whether this property identifies instances of the model.
    pub id: bool,
    pub required: bool,
}

impl PropertyDef {
    pub fn new() -> Self {
        Self::default()
    }

    /// An identifying property.
    pub fn id() -> Self {
        Self {
            id: true,
            required: true,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// A model descriptor: name plus declared properties.
///
/// Built fluently:
///
/// ```
/// use kinship::{ModelDef, PropertyDef};
///
/// let customer = ModelDef::new("Customer")
///     .property("id", PropertyDef::id())
///     .property("name", PropertyDef::new().required());
/// assert_eq!(customer.id_properties(), ["id"]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDef {
    name: String,
    properties: BTreeMap<String, PropertyDef>,
    // Identifying property names in declaration order
    id_properties: Vec<String>,
}

impl ModelDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: BTreeMap::new(),
            id_properties: Vec::new(),
        }
    }

    /// Declare a property. Redeclaring a name replaces the previous
    /// definition.
    pub fn property(mut self, name: impl Into<String>, def: PropertyDef) -> Self {
        let name = name.into();
        self.id_properties.retain(|p| *p != name);
        if def.id {
            self.id_properties.push(name.clone());
        }
        self.properties.insert(name, def);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn properties(&self) -> &BTreeMap<String, PropertyDef> {
        &self.properties
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    /// Names of the identifying properties, in declaration order.
    pub fn id_properties(&self) -> &[String] {
        &self.id_properties
    }
}

/// Deferred, memoized reference to a [`ModelDef`].
///
/// Relations hold one of these instead of the model itself so that two
/// models can reference each other regardless of definition order. The
/// closure runs on first [`get`](Self::get) and the result is cached;
/// repeated calls return the same descriptor.
#[derive(Clone)]
pub struct ModelResolver {
    resolve: Arc<dyn Fn() -> Arc<ModelDef> + Send + Sync>,
    cell: Arc<OnceCell<Arc<ModelDef>>>,
}

impl ModelResolver {
    pub fn new<F>(resolve: F) -> Self
    where
        F: Fn() -> Arc<ModelDef> + Send + Sync + 'static,
    {
        Self {
            resolve: Arc::new(resolve),
            cell: Arc::new(OnceCell::new()),
        }
    }

    /// Reference to an already-known model.
    pub fn resolved(model: Arc<ModelDef>) -> Self {
        let cell = OnceCell::new();
        let _ = cell.set(model.clone());
        Self {
            resolve: Arc::new(move || model.clone()),
            cell: Arc::new(cell),
        }
    }

    /// Dereference, resolving and memoizing on first use.
    pub fn get(&self) -> Arc<ModelDef> {
        self.cell.get_or_init(|| (self.resolve)()).clone()
    }
}

// Hand-written: the resolving closure has no Debug form.
impl fmt::Debug for ModelResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cell.get() {
            Some(model) => write!(f, "ModelResolver(resolved: {})", model.name()),
            None => write!(f, "ModelResolver(pending)"),
        }
    }
}

/// A dynamic entity: one instance of a model.
///
/// Persisted attributes and included relations are kept in separate maps;
/// [`related`](Self::related) reads the relation view and
/// [`crate::json_helpers::record_to_json`] merges both.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    model: Arc<ModelDef>,
    attributes: HashMap<String, Value>,
    relations: HashMap<String, Record>,
}

impl Record {
    pub fn new(model: Arc<ModelDef>) -> Self {
        Self {
            model,
            attributes: HashMap::new(),
            relations: HashMap::new(),
        }
    }

    pub fn model(&self) -> &Arc<ModelDef> {
        &self.model
    }

    /// Chainable attribute setter, for building fixtures and literals.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// The value of the model's first identifying property, if present.
    pub fn id(&self) -> Option<&Value> {
        let id_property = self.model.id_properties().first()?;
        self.attributes.get(id_property)
    }

    pub fn attributes(&self) -> &HashMap<String, Value> {
        &self.attributes
    }

    pub fn related(&self, name: &str) -> Option<&Record> {
        self.relations.get(name)
    }

    pub fn set_related(&mut self, name: impl Into<String>, related: Record) {
        self.relations.insert(name.into(), related);
    }

    pub fn take_related(&mut self, name: &str) -> Option<Record> {
        self.relations.remove(name)
    }

    pub fn relations(&self) -> &HashMap<String, Record> {
        &self.relations
    }
}
