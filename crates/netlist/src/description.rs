//! Serializable circuit description.
//!
//! A description lists signals, combinational cells, clocked registers and
//! named groups. Groups give a subset of cells a port map so a native rule
//! can later stand in for them.
//!
//! ```json
//! {"signals": [{"name": "a", "width": 32}, {"name": "one", "width": 32},
//!              {"name": "sum", "width": 32}],
//!  "cells": [{"op": "const", "value": 1, "output": "one"},
//!            {"op": "add", "inputs": ["a", "one"], "output": "sum"}]}
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cell::CellOp;
use crate::error::DescriptionError;

/// Declared signal.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SignalDescription {
    /// Unique signal name.
    pub name: String,
    /// Width in bits (1..=64).
    pub width: u32,
    /// Power-on value.
    #[serde(default)]
    pub init: u64,
}

/// Combinational cell.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CellDescription {
    /// Operation and its parameters.
    #[serde(flatten)]
    pub op: CellOp,
    /// Input signal names, in operand order.
    #[serde(default)]
    pub inputs: Vec<String>,
    /// Driven signal name.
    pub output: String,
    /// Group the cell belongs to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

/// Rising-edge register.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RegisterDescription {
    /// Data input.
    pub d: String,
    /// Register output.
    pub q: String,
    /// Single-bit clock.
    pub clock: String,
    /// Optional single-bit synchronous reset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reset: Option<String>,
    /// Value loaded while reset is high.
    #[serde(default)]
    pub init: u64,
}

/// Named cell group with a port map from rule port names to signals.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GroupDescription {
    /// Unique group name.
    pub name: String,
    /// Rule port name to signal name.
    pub ports: BTreeMap<String, String>,
}

/// Complete circuit description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CircuitDescription {
    /// Declared signals.
    pub signals: Vec<SignalDescription>,
    /// Combinational cells.
    #[serde(default)]
    pub cells: Vec<CellDescription>,
    /// Clocked registers.
    #[serde(default)]
    pub registers: Vec<RegisterDescription>,
    /// Named groups.
    #[serde(default)]
    pub groups: Vec<GroupDescription>,
}

impl CircuitDescription {
    /// Parses a JSON description.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptionError::Json`] when the text does not match the
    /// description schema.
    pub fn from_json(text: &str) -> Result<Self, DescriptionError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Renders the description as one line of JSON.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptionError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, DescriptionError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Declares a zero-initialised signal.
    pub fn signal(&mut self, name: impl Into<String>, width: u32) -> &mut Self {
        self.signals.push(SignalDescription {
            name: name.into(),
            width,
            init: 0,
        });
        self
    }

    /// Adds an ungrouped cell.
    pub fn cell(&mut self, op: CellOp, inputs: &[&str], output: impl Into<String>) -> &mut Self {
        self.cells.push(CellDescription {
            op,
            inputs: inputs.iter().map(ToString::to_string).collect(),
            output: output.into(),
            group: None,
        });
        self
    }

    /// Adds a constant driver.
    pub fn constant(&mut self, output: impl Into<String>, value: u64) -> &mut Self {
        self.cell(CellOp::Const { value }, &[], output)
    }

    /// Adds a register clocked by `clock` with an optional synchronous reset
    /// to `init`.
    pub fn register(
        &mut self,
        d: impl Into<String>,
        q: impl Into<String>,
        clock: impl Into<String>,
        reset: Option<&str>,
        init: u64,
    ) -> &mut Self {
        self.registers.push(RegisterDescription {
            d: d.into(),
            q: q.into(),
            clock: clock.into(),
            reset: reset.map(ToString::to_string),
            init,
        });
        self
    }

    /// Appends every signal, cell, register and group of `other`.
    pub fn merge(&mut self, other: Self) -> &mut Self {
        self.signals.extend(other.signals);
        self.cells.extend(other.cells);
        self.registers.extend(other.registers);
        self.groups.extend(other.groups);
        self
    }
}
