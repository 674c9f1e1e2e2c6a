// Copyright 2026 the Roundel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Roundel Imaging Reference Backend.
//!
//! This crate provides a small, stateful implementation of
//! [`ImagingBackend`] for **IR recording and state tracing**.
//!
//! It does not rasterize. Each draw is recorded together with the imaging
//! state in effect at that moment (paint, paint transform, stroke), so tests
//! can assert on what a view asked the backend to do without comparing
//! pixels.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

use roundel_imaging::{Affine, DrawOp, ImagingBackend, ImagingOp, Paint, StateOp, StrokeStyle};

/// Snapshot of the current imaging state inside the backend.
#[derive(Clone, Debug)]
pub struct StateSnapshot {
    /// Current geometry transform.
    pub transform: Affine,
    /// Current paint transform.
    pub paint_transform: Affine,
    /// Current paint, if set.
    pub paint: Option<Paint>,
    /// Current stroke style, if set.
    pub stroke: Option<StrokeStyle>,
}

impl Default for StateSnapshot {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            paint_transform: Affine::IDENTITY,
            paint: None,
            stroke: None,
        }
    }
}

/// Event recorded by the reference backend.
#[derive(Clone, Debug)]
pub enum Event {
    /// State operation and the resulting state snapshot.
    State {
        /// State operation that was applied.
        op: StateOp,
        /// Snapshot after applying the state operation.
        state: StateSnapshot,
    },
    /// Draw operation and the state snapshot used for drawing.
    Draw {
        /// Draw operation that was applied.
        op: DrawOp,
        /// Snapshot at the time of drawing.
        state: StateSnapshot,
    },
}

/// Simple reference implementation of the imaging backend.
#[derive(Default, Debug)]
pub struct RefBackend {
    /// Log of events in the order they were applied.
    events: Vec<Event>,
    /// Underlying imaging ops.
    ops: Vec<ImagingOp>,
    /// Current imaging state.
    state: StateSnapshot,
}

impl RefBackend {
    /// Returns a slice of recorded events.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Returns a slice of raw imaging operations.
    pub fn ops(&self) -> &[ImagingOp] {
        &self.ops
    }

    /// Returns the draw operations with the state each one was drawn with.
    pub fn draws(&self) -> impl Iterator<Item = (&DrawOp, &StateSnapshot)> + '_ {
        self.events.iter().filter_map(|event| match event {
            Event::Draw { op, state } => Some((op, state)),
            Event::State { .. } => None,
        })
    }

    /// Returns the current imaging state.
    pub fn current_state(&self) -> &StateSnapshot {
        &self.state
    }

    /// Clears all recorded events and ops but keeps the current state.
    pub fn clear_events(&mut self) {
        self.events.clear();
        self.ops.clear();
    }
}

impl ImagingBackend for RefBackend {
    fn state(&mut self, op: StateOp) {
        match &op {
            StateOp::SetTransform(tx) => self.state.transform = *tx,
            StateOp::SetPaintTransform(tx) => self.state.paint_transform = *tx,
            StateOp::SetPaint(paint) => self.state.paint = Some(paint.clone()),
            StateOp::SetStroke(style) => self.state.stroke = Some(style.clone()),
        }

        self.ops.push(ImagingOp::State(op.clone()));
        self.events.push(Event::State {
            op,
            state: self.state.clone(),
        });
    }

    fn draw(&mut self, op: DrawOp) {
        self.ops.push(ImagingOp::Draw(op));
        self.events.push(Event::Draw {
            op,
            state: self.state.clone(),
        });
    }
}
