//! Layers and the layer stack.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::resolve::{Resolved, VisualChannel};
use crate::table::{FieldType, Table};

/// Mark drawn for each row (or row group) of a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkType {
    Line,
    Point,
    Text,
}

impl MarkType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Point => "point",
            Self::Text => "text",
        }
    }
}

/// Visual role of a layer; fixes its mark and geometry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// One line segment per edge
    EdgeLine,
    /// Short segment at the target end of each directed edge
    ArrowLine,
    /// One point per node
    NodePoint,
    /// Node labels read from the `text` column
    LabelText { text: String },
}

impl Role {
    pub const fn mark(&self) -> MarkType {
        match self {
            Self::EdgeLine | Self::ArrowLine => MarkType::Line,
            Self::NodePoint => MarkType::Point,
            Self::LabelText { .. } => MarkType::Text,
        }
    }
}

/// Binding of a column to an encoding channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    pub field: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Named color scheme for the channel's scale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    /// Render the positional axis without title
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub hide_axis: bool,
}

impl FieldDef {
    /// Bind `field`, taking its type from `table`.
    pub fn new(field: impl Into<String>, table: &Table) -> Self {
        let field = field.into();
        let field_type = table.field_type(&field);
        Self {
            field,
            field_type,
            scheme: None,
            hide_axis: false,
        }
    }

    pub const fn typed(field: String, field_type: FieldType) -> Self {
        Self {
            field,
            field_type,
            scheme: None,
            hide_axis: false,
        }
    }
}

/// One renderable unit: a shared table, a mark and its resolved attributes.
///
/// For every visual channel a layer holds either a constant mark property or
/// an encoding, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    role: Role,
    mark: MarkType,
    table: Arc<Table>,
    properties: BTreeMap<String, Value>,
    encoding: BTreeMap<String, FieldDef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    tooltip: Vec<FieldDef>,
}

impl Layer {
    /// Create a layer with no attributes.
    pub fn new(role: Role, table: Arc<Table>) -> Self {
        Self {
            mark: role.mark(),
            role,
            table,
            properties: BTreeMap::new(),
            encoding: BTreeMap::new(),
            tooltip: Vec::new(),
        }
    }

    pub const fn role(&self) -> &Role {
        &self.role
    }

    pub const fn mark(&self) -> MarkType {
        self.mark
    }

    pub const fn table(&self) -> &Arc<Table> {
        &self.table
    }

    pub const fn properties(&self) -> &BTreeMap<String, Value> {
        &self.properties
    }

    pub const fn encoding(&self) -> &BTreeMap<String, FieldDef> {
        &self.encoding
    }

    pub fn tooltip(&self) -> &[FieldDef] {
        &self.tooltip
    }

    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    pub fn channel(&self, name: &str) -> Option<&FieldDef> {
        self.encoding.get(name)
    }

    pub(crate) fn set_property(&mut self, name: &str, value: Value) {
        self.properties.insert(name.to_string(), value);
    }

    pub(crate) fn set_channel(&mut self, name: &str, def: FieldDef) {
        self.encoding.insert(name.to_string(), def);
    }

    pub(crate) fn set_tooltip(&mut self, fields: Vec<FieldDef>) {
        self.tooltip = fields;
    }

    /// Apply a resolved attribute, replacing any earlier value of the other kind.
    pub(crate) fn apply(&mut self, channel: VisualChannel, resolved: &Resolved) {
        match resolved {
            Resolved::Property(value) => {
                self.encoding.remove(channel.encoding_name());
                self.set_property(channel.property_name(), value.clone());
            }
            Resolved::Channel { column, scheme } => {
                self.properties.remove(channel.property_name());
                let mut def = FieldDef::new(column.clone(), &self.table);
                def.scheme.clone_from(scheme);
                self.set_channel(channel.encoding_name(), def);
            }
        }
    }
}

/// Named position in a [`LayerStack`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Edges,
    Arrows,
    Nodes,
    Labels,
}

impl Slot {
    /// All slots in paint order.
    pub const ALL: [Self; 4] = [Self::Edges, Self::Arrows, Self::Nodes, Self::Labels];

    /// Role a fresh layer in this slot takes.
    pub fn default_role(self) -> Role {
        match self {
            Self::Edges => Role::EdgeLine,
            Self::Arrows => Role::ArrowLine,
            Self::Nodes => Role::NodePoint,
            Self::Labels => Role::LabelText {
                text: "label".to_string(),
            },
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Edges => "edges",
            Self::Arrows => "arrows",
            Self::Nodes => "nodes",
            Self::Labels => "labels",
        })
    }
}

/// The composed chart: one optional layer per slot.
///
/// Iteration follows paint order, so edges sit beneath arrows, arrows beneath
/// nodes and labels on top.
///
/// Slots are replaced with an unsynchronized read-modify-write; share a stack
/// across threads only behind a lock.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayerStack {
    edges: Option<Layer>,
    arrows: Option<Layer>,
    nodes: Option<Layer>,
    labels: Option<Layer>,
}

impl LayerStack {
    pub fn new() -> Self {
        Self::default()
    }

    const fn slot_ref(&self, slot: Slot) -> &Option<Layer> {
        match slot {
            Slot::Edges => &self.edges,
            Slot::Arrows => &self.arrows,
            Slot::Nodes => &self.nodes,
            Slot::Labels => &self.labels,
        }
    }

    fn slot_mut(&mut self, slot: Slot) -> &mut Option<Layer> {
        match slot {
            Slot::Edges => &mut self.edges,
            Slot::Arrows => &mut self.arrows,
            Slot::Nodes => &mut self.nodes,
            Slot::Labels => &mut self.labels,
        }
    }

    pub const fn get(&self, slot: Slot) -> Option<&Layer> {
        self.slot_ref(slot).as_ref()
    }

    /// Put `layer` into `slot`, returning the previous occupant.
    pub fn replace(&mut self, slot: Slot, layer: Layer) -> Option<Layer> {
        self.slot_mut(slot).replace(layer)
    }

    pub fn take(&mut self, slot: Slot) -> Option<Layer> {
        self.slot_mut(slot).take()
    }

    /// Occupied slots and their layers in paint order.
    pub fn slots(&self) -> impl Iterator<Item = (Slot, &Layer)> {
        Slot::ALL
            .into_iter()
            .filter_map(|slot| self.get(slot).map(|layer| (slot, layer)))
    }

    /// Layers in paint order.
    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.slots().map(|(_, layer)| layer)
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
