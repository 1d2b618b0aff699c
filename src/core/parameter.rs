use alloc::sync::Arc;
use core::sync::atomic::{AtomicU32, Ordering};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A thread-safe floating point parameter.
///
/// Stores the bits of an `f32` in an atomic so a control thread can write it
/// while the audio thread reads it. Clones share the same value.
#[derive(Clone, Debug)]
pub struct Parameter {
    value: Arc<AtomicU32>,
}

impl Parameter {
    /// Creates a new Parameter with an initial value.
    pub fn new(value: f32) -> Self {
        Parameter {
            value: Arc::new(AtomicU32::new(value.to_bits())),
        }
    }

    /// Sets the parameter value.
    pub fn set(&self, value: f32) {
        self.value.store(value.to_bits(), Ordering::Relaxed);
    }

    /// Gets the current parameter value.
    pub fn get(&self) -> f32 {
        f32::from_bits(self.value.load(Ordering::Relaxed))
    }
}

/// Plain copy of the runtime parameters, taken once per block.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSnapshot {
    /// Gain applied to the stage-2 output before it is fed back into the vertical line.
    pub vertical_feedback: f32,
    /// Divisor of the pan term in the rear cutoff formula.
    pub pan_division: f32,
    pub upper_cutoff_hz: f32,
    pub lower_cutoff_hz: f32,
}

impl Default for ParamSnapshot {
    fn default() -> Self {
        ParamSnapshot {
            vertical_feedback: 0.0,
            pan_division: 4.0,
            upper_cutoff_hz: 40000.0,
            lower_cutoff_hz: 300.0,
        }
    }
}

/// Runtime-mutable controls shared between a controller and the engine.
///
/// Each field is an independent [`Parameter`]; a controller may update any of
/// them at any time. The engine reads all four through [`SpatialParams::snapshot`]
/// at the start of every block, so one block always sees one value per field.
#[derive(Clone, Debug)]
pub struct SpatialParams {
    pub vertical_feedback: Parameter,
    pub pan_division: Parameter,
    pub upper_cutoff_hz: Parameter,
    pub lower_cutoff_hz: Parameter,
}

impl SpatialParams {
    /// Creates a parameter set holding `initial`.
    pub fn new(initial: ParamSnapshot) -> Self {
        SpatialParams {
            vertical_feedback: Parameter::new(initial.vertical_feedback),
            pan_division: Parameter::new(initial.pan_division),
            upper_cutoff_hz: Parameter::new(initial.upper_cutoff_hz),
            lower_cutoff_hz: Parameter::new(initial.lower_cutoff_hz),
        }
    }

    /// Reads every parameter once.
    pub fn snapshot(&self) -> ParamSnapshot {
        ParamSnapshot {
            vertical_feedback: self.vertical_feedback.get(),
            pan_division: self.pan_division.get(),
            upper_cutoff_hz: self.upper_cutoff_hz.get(),
            lower_cutoff_hz: self.lower_cutoff_hz.get(),
        }
    }

    /// Writes every parameter from `values`.
    pub fn apply(&self, values: &ParamSnapshot) {
        self.vertical_feedback.set(values.vertical_feedback);
        self.pan_division.set(values.pan_division);
        self.upper_cutoff_hz.set(values.upper_cutoff_hz);
        self.lower_cutoff_hz.set(values.lower_cutoff_hz);
    }
}

impl Default for SpatialParams {
    fn default() -> Self {
        SpatialParams::new(ParamSnapshot::default())
    }
}
