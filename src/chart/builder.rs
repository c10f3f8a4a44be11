//! Layer construction per visual role.
//!
//! Geometry is fixed by the role: positional `x`/`y` channels with their axis
//! suppressed, a `detail` grouping on `edge` for line roles (so each edge's
//! two rows form their own segment), and a middle-baseline `text` channel for
//! labels. Node points are filled. Resolved attributes are applied on top.

use std::sync::Arc;

use serde_json::Value;

use crate::chart::{FieldDef, Layer, LayerStack, Role, Slot};
use crate::error::{ChartError, Result};
use crate::resolve::{Resolved, ResolvedAttributes};
use crate::table::{FieldType, Table};

/// Build a layer for `role` over `table`.
///
/// # Errors
///
/// Returns [`ChartError::UnresolvedColumnReference`] if an encoded column,
/// tooltip field or label column is missing from `table`.
pub fn build(role: Role, table: Arc<Table>, attrs: &ResolvedAttributes) -> Result<Layer> {
    let mut layer = Layer::new(role, table);
    apply_geometry(&mut layer)?;

    for (channel, resolved) in attrs.entries() {
        if let Resolved::Channel { column, .. } = resolved {
            require_column(layer.table(), channel.property_name(), column)?;
        }
        layer.apply(*channel, resolved);
    }

    let mut tooltip = Vec::with_capacity(attrs.tooltip_fields().len());
    for field in attrs.tooltip_fields() {
        require_column(layer.table(), "tooltip", field)?;
        tooltip.push(FieldDef::new(field.clone(), layer.table()));
    }
    layer.set_tooltip(tooltip);

    tracing::debug!(
        role = ?layer.role(),
        rows = layer.table().len(),
        properties = layer.properties().len(),
        channels = layer.encoding().len(),
        "built layer"
    );
    Ok(layer)
}

/// Rebuild the layer in `slot`, leaving every other slot untouched.
///
/// Keeps the slot's current table and role unless `table_override` is given;
/// an empty slot takes the slot's default role. A label slot reads its text
/// from [`ResolvedAttributes::text_field`] when set.
///
/// # Errors
///
/// Returns [`ChartError::EmptySlot`] if the slot is empty and no table is
/// supplied, plus the errors of [`build`].
pub fn rebuild_in_place<'a>(
    stack: &'a mut LayerStack,
    slot: Slot,
    table_override: Option<Arc<Table>>,
    attrs: &ResolvedAttributes,
) -> Result<&'a Layer> {
    let (role, table) = match (stack.get(slot), table_override) {
        (Some(existing), table) => (
            existing.role().clone(),
            table.unwrap_or_else(|| Arc::clone(existing.table())),
        ),
        (None, Some(table)) => (slot.default_role(), table),
        (None, None) => return Err(ChartError::EmptySlot(slot)),
    };
    let role = match (role, attrs.text_field()) {
        (Role::LabelText { .. }, Some(text)) => Role::LabelText {
            text: text.to_string(),
        },
        (role, _) => role,
    };

    let layer = build(role, table, attrs)?;
    stack.replace(slot, layer);
    tracing::debug!(%slot, "rebuilt layer in place");
    stack.get(slot).ok_or(ChartError::EmptySlot(slot))
}

fn apply_geometry(layer: &mut Layer) -> Result<()> {
    for axis in ["x", "y"] {
        require_column(layer.table(), axis, axis)?;
        let mut def = FieldDef::typed(axis.to_string(), FieldType::Quantitative);
        def.hide_axis = true;
        layer.set_channel(axis, def);
    }

    match layer.role().clone() {
        Role::EdgeLine | Role::ArrowLine => {
            require_column(layer.table(), "detail", "edge")?;
            layer.set_channel(
                "detail",
                FieldDef::typed("edge".to_string(), FieldType::Nominal),
            );
        }
        Role::NodePoint => layer.set_property("filled", Value::Bool(true)),
        Role::LabelText { text } => {
            require_column(layer.table(), "text", &text)?;
            let def = FieldDef::new(text, layer.table());
            layer.set_channel("text", def);
            layer.set_property("baseline", Value::from("middle"));
        }
    }
    Ok(())
}

fn require_column(table: &Table, parameter: &'static str, column: &str) -> Result<()> {
    if table.has_column(column) {
        Ok(())
    } else {
        Err(ChartError::UnresolvedColumnReference {
            parameter,
            column: column.to_string(),
        })
    }
}
