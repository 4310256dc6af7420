//! Box geometry: the six positional quantities of a view.
//!
//! Each quantity is a [`Variable`], a named mutable cell. Names are
//! `"<view-name>.<quantity>"` (`"PlotView(3).left"`), unique across a tree,
//! so an external constraint solver can treat every view's quantities as one
//! flat variable set.

use serde::Serialize;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter};
use trellis_common::Rect;

/// One of the six positional quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Quantity {
    /// Left edge.
    Left,
    /// Right edge.
    Right,
    /// Top edge.
    Top,
    /// Bottom edge.
    Bottom,
    /// Horizontal extent.
    Width,
    /// Vertical extent.
    Height,
}

/// A named mutable cell holding one quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    name: String,
    value: f64,
}

impl Variable {
    /// A variable with value zero.
    #[must_use]
    pub fn new(name: String) -> Self {
        Self { name, value: 0.0 }
    }

    /// Stable identity, unique within a tree.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current value.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// Overwrite the value.
    pub const fn set_value(&mut self, value: f64) {
        self.value = value;
    }
}

/// The six quantities of one view.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxGeometry {
    left: Variable,
    right: Variable,
    top: Variable,
    bottom: Variable,
    width: Variable,
    height: Variable,
}

impl BoxGeometry {
    /// Allocate the six variables for the view named `owner`, all zero.
    #[must_use]
    pub fn new(owner: &str) -> Self {
        let var = |q: Quantity| Variable::new(format!("{owner}.{q}"));
        Self {
            left: var(Quantity::Left),
            right: var(Quantity::Right),
            top: var(Quantity::Top),
            bottom: var(Quantity::Bottom),
            width: var(Quantity::Width),
            height: var(Quantity::Height),
        }
    }

    /// The variable for `quantity`.
    #[must_use]
    pub const fn get(&self, quantity: Quantity) -> &Variable {
        match quantity {
            Quantity::Left => &self.left,
            Quantity::Right => &self.right,
            Quantity::Top => &self.top,
            Quantity::Bottom => &self.bottom,
            Quantity::Width => &self.width,
            Quantity::Height => &self.height,
        }
    }

    /// Mutable access to the variable for `quantity`.
    pub const fn get_mut(&mut self, quantity: Quantity) -> &mut Variable {
        match quantity {
            Quantity::Left => &mut self.left,
            Quantity::Right => &mut self.right,
            Quantity::Top => &mut self.top,
            Quantity::Bottom => &mut self.bottom,
            Quantity::Width => &mut self.width,
            Quantity::Height => &mut self.height,
        }
    }

    /// Current value of `quantity`.
    #[must_use]
    pub const fn value(&self, quantity: Quantity) -> f64 {
        self.get(quantity).value()
    }

    /// All six variables, in [`Quantity`] order.
    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        Quantity::iter().map(|q| self.get(q))
    }

    /// Write all six quantities from a placed rectangle: `right` and
    /// `bottom` are the far edges in the parent's coordinate space.
    pub const fn set_rect(&mut self, rect: Rect) {
        self.left.set_value(rect.x);
        self.top.set_value(rect.y);
        self.width.set_value(rect.width);
        self.height.set_value(rect.height);
        self.right.set_value(rect.x + rect.width);
        self.bottom.set_value(rect.y + rect.height);
    }

    /// Snapshot of the current values.
    #[must_use]
    pub const fn layout_bbox(&self) -> LayoutBBox {
        LayoutBBox {
            top: self.top.value,
            left: self.left.value,
            right: self.right.value,
            bottom: self.bottom.value,
            width: self.width.value,
            height: self.height.value,
        }
    }
}

/// Read-only snapshot of a view's geometry. All zero before the first pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LayoutBBox {
    /// Top edge.
    pub top: f64,
    /// Left edge.
    pub left: f64,
    /// Right edge.
    pub right: f64,
    /// Bottom edge.
    pub bottom: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl LayoutBBox {
    /// Value of one quantity.
    #[must_use]
    pub const fn get(&self, quantity: Quantity) -> f64 {
        match quantity {
            Quantity::Left => self.left,
            Quantity::Right => self.right,
            Quantity::Top => self.top,
            Quantity::Bottom => self.bottom,
            Quantity::Width => self.width,
            Quantity::Height => self.height,
        }
    }

    /// `(quantity, value)` pairs in [`Quantity`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Quantity, f64)> + '_ {
        Quantity::iter().map(|q| (q, self.get(q)))
    }
}
