//! Scene arena: shapes, layers and moving layers
//!
//! Layers form a draw-order list (front to back) and a subset of them
//! also sits on the moving-layer list. Both lists are singly linked by
//! index into fixed-capacity arenas, so traversal order is exactly the
//! link order and no node is ever freed.

use thiserror::Error;

use crate::Color;
use crate::geom::{Region, Vec2};
use crate::shape::Shape;

/// Arena capacities
pub const MAX_SHAPES: usize = 8;
pub const MAX_LAYERS: usize = 16;
pub const MAX_MOVERS: usize = 16;

/// Handle to a shape template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeId(u8);

/// Handle to a drawable layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(u8);

/// Handle to a moving-layer record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoverId(u8);

impl ShapeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl LayerId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl MoverId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Errors raised while building a scene
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneError {
    #[error("{what} arena full (capacity {capacity})")]
    Full { what: &'static str, capacity: usize },
    #[error("unknown shape id {0}")]
    UnknownShape(usize),
    #[error("unknown layer id {0}")]
    UnknownLayer(usize),
}

/// A drawable entity
#[derive(Debug, Clone)]
pub struct Layer {
    /// Shared template, never owned by the layer
    pub shape: ShapeId,
    /// Position used by the last committed redraw
    pub pos: Vec2,
    /// Position at the redraw before that (vacated pixels)
    pub pos_last: Vec2,
    /// Position computed by motion/rules, not yet committed
    pub pos_next: Vec2,
    pub color: Color,
    next: Option<LayerId>,
}

/// A layer that moves with a per-step velocity
#[derive(Debug, Clone)]
pub struct MovingLayer {
    pub layer: LayerId,
    pub velocity: Vec2,
    next: Option<MoverId>,
}

/// Unused arena slots
const EMPTY_SHAPE: Shape = Shape::rect(0, 0);
const EMPTY_LAYER: Layer = Layer {
    shape: ShapeId(0),
    pos: Vec2::ZERO,
    pos_last: Vec2::ZERO,
    pos_next: Vec2::ZERO,
    color: 0,
    next: None,
};
const EMPTY_MOVER: MovingLayer = MovingLayer {
    layer: LayerId(0),
    velocity: Vec2::ZERO,
    next: None,
};

/// Fixed-capacity store for every shape, layer and moving layer.
///
/// Storage is sized up front; pushing only fills the next slot.
#[derive(Debug, Clone)]
pub struct Scene {
    shapes: [Shape; MAX_SHAPES],
    layers: [Layer; MAX_LAYERS],
    movers: [MovingLayer; MAX_MOVERS],
    shape_count: usize,
    layer_count: usize,
    mover_count: usize,
    draw_head: Option<LayerId>,
    draw_tail: Option<LayerId>,
    move_head: Option<MoverId>,
    move_tail: Option<MoverId>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub const fn new() -> Self {
        Self {
            shapes: [EMPTY_SHAPE; MAX_SHAPES],
            layers: [EMPTY_LAYER; MAX_LAYERS],
            movers: [EMPTY_MOVER; MAX_MOVERS],
            shape_count: 0,
            layer_count: 0,
            mover_count: 0,
            draw_head: None,
            draw_tail: None,
            move_head: None,
            move_tail: None,
        }
    }

    /// Register a shape template
    pub fn add_shape(&mut self, shape: Shape) -> Result<ShapeId, SceneError> {
        if self.shape_count >= MAX_SHAPES {
            return Err(SceneError::Full {
                what: "shape",
                capacity: MAX_SHAPES,
            });
        }
        let id = ShapeId(self.shape_count as u8);
        self.shapes[self.shape_count] = shape;
        self.shape_count += 1;
        Ok(id)
    }

    /// Append a layer at the back of the draw order (painted behind
    /// every layer already pushed). Its three positions start equal.
    pub fn push_layer(
        &mut self,
        shape: ShapeId,
        pos: Vec2,
        color: Color,
    ) -> Result<LayerId, SceneError> {
        if shape.index() >= self.shape_count {
            return Err(SceneError::UnknownShape(shape.index()));
        }
        if self.layer_count >= MAX_LAYERS {
            return Err(SceneError::Full {
                what: "layer",
                capacity: MAX_LAYERS,
            });
        }
        let id = LayerId(self.layer_count as u8);
        self.layers[self.layer_count] = Layer {
            shape,
            pos,
            pos_last: pos,
            pos_next: pos,
            color,
            next: None,
        };
        self.layer_count += 1;
        match self.draw_tail {
            Some(tail) => self.layers[tail.index()].next = Some(id),
            None => self.draw_head = Some(id),
        }
        self.draw_tail = Some(id);
        Ok(id)
    }

    /// Append a layer to the moving-layer list
    pub fn push_mover(&mut self, layer: LayerId, velocity: Vec2) -> Result<MoverId, SceneError> {
        if layer.index() >= self.layer_count {
            return Err(SceneError::UnknownLayer(layer.index()));
        }
        if self.mover_count >= MAX_MOVERS {
            return Err(SceneError::Full {
                what: "moving layer",
                capacity: MAX_MOVERS,
            });
        }
        let id = MoverId(self.mover_count as u8);
        self.movers[self.mover_count] = MovingLayer {
            layer,
            velocity,
            next: None,
        };
        self.mover_count += 1;
        match self.move_tail {
            Some(tail) => self.movers[tail.index()].next = Some(id),
            None => self.move_head = Some(id),
        }
        self.move_tail = Some(id);
        Ok(id)
    }

    pub fn shape(&self, id: ShapeId) -> &Shape {
        &self.shapes[..self.shape_count][id.index()]
    }

    pub fn layer(&self, id: LayerId) -> &Layer {
        &self.layers[..self.layer_count][id.index()]
    }

    pub fn layer_mut(&mut self, id: LayerId) -> &mut Layer {
        &mut self.layers[..self.layer_count][id.index()]
    }

    pub fn mover(&self, id: MoverId) -> &MovingLayer {
        &self.movers[..self.mover_count][id.index()]
    }

    pub fn mover_mut(&mut self, id: MoverId) -> &mut MovingLayer {
        &mut self.movers[..self.mover_count][id.index()]
    }

    /// Template referenced by a layer
    pub fn shape_of(&self, id: LayerId) -> &Shape {
        self.shape(self.layer(id).shape)
    }

    /// Layer bounds at its committed position
    pub fn bounds(&self, id: LayerId) -> Region {
        self.shape_of(id).bounds(self.layer(id).pos)
    }

    /// Union of the bounds at the previous and current committed
    /// positions: every pixel vacated or newly covered by the layer
    pub fn dirty_region(&self, id: LayerId) -> Region {
        let layer = self.layer(id);
        let shape = self.shape(layer.shape);
        shape.bounds(layer.pos_last).union(&shape.bounds(layer.pos))
    }

    /// Layers front to back
    pub fn draw_order(&self) -> impl Iterator<Item = (LayerId, &Layer)> + '_ {
        let mut cursor = self.draw_head;
        std::iter::from_fn(move || {
            let id = cursor?;
            let layer = &self.layers[id.index()];
            cursor = layer.next;
            Some((id, layer))
        })
    }

    /// Moving layers in list order
    pub fn movers(&self) -> impl Iterator<Item = (MoverId, &MovingLayer)> + '_ {
        let mut cursor = self.move_head;
        std::iter::from_fn(move || {
            let id = cursor?;
            let mover = &self.movers[id.index()];
            cursor = mover.next;
            Some((id, mover))
        })
    }

    /// Whether `id` is reachable from the draw-order list
    pub fn is_drawn(&self, id: LayerId) -> bool {
        self.draw_order().any(|(drawn, _)| drawn == id)
    }

    /// `pos_last <- pos; pos <- pos_next` for every moving layer.
    ///
    /// Callers must hold the tick source disabled for the whole loop.
    pub fn commit_positions(&mut self) {
        let mut cursor = self.move_head;
        while let Some(id) = cursor {
            let mover = &self.movers[id.index()];
            let layer = &mut self.layers[mover.layer.index()];
            layer.pos_last = layer.pos;
            layer.pos = layer.pos_next;
            cursor = mover.next;
        }
    }

    pub fn layer_count(&self) -> usize {
        self.layer_count
    }

    pub fn mover_count(&self) -> usize {
        self.mover_count
    }
}
