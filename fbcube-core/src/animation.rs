/// Animated pose and the frame loop that renders it
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};
use nalgebra::{Point2, Vector2};

use crate::geometry::{EdgeGroup, SolidMesh, CUBE_VERTEX_COUNT};
use crate::projection::{ProjectionAnchor, Projector};
use crate::surface::{Canvas, Color};
use crate::transform::{RotationState, Transform};

/// Colour assignment for the cube's edges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgePalette {
    Uniform(Color),
    PerGroup {
        bottom: Color,
        top: Color,
        connecting: Color,
    },
}

impl EdgePalette {
    pub fn color_for(&self, group: EdgeGroup) -> Color {
        match *self {
            EdgePalette::Uniform(color) => color,
            EdgePalette::PerGroup {
                bottom,
                top,
                connecting,
            } => match group {
                EdgeGroup::Bottom => bottom,
                EdgeGroup::Top => top,
                EdgeGroup::Connecting => connecting,
            },
        }
    }
}

/// Linear motion with reflection off the surface edges
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BounceConfig {
    /// Initial screen-space centre
    pub start: Point2<f32>,
    /// Pixels per tick
    pub velocity: Vector2<f32>,
    /// Distance from an edge at which the centre reflects
    pub margin: f32,
}

impl BounceConfig {
    /// Margin on each axis, shrunk to a quarter of the extent so the two
    /// bands of a small surface stay apart.
    pub fn margins(&self, width: u32, height: u32) -> Vector2<f32> {
        Vector2::new(
            self.margin.min(width as f32 / 4.0).max(0.0),
            self.margin.min(height as f32 / 4.0).max(0.0),
        )
    }

    /// `start` moved between the bands when it lies outside them
    pub fn start_within(&self, width: u32, height: u32) -> Point2<f32> {
        let margins = self.margins(width, height);
        Point2::new(
            self.start.x.clamp(margins.x, width as f32 - margins.x),
            self.start.y.clamp(margins.y, height as f32 - margins.y),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnimationConfig {
    pub half_extent: f32,
    pub viewer_distance: f32,
    /// Added to the rotation angles every tick
    pub rotation_step: RotationState,
    pub frame_delay: Duration,
    pub anchor: ProjectionAnchor,
    pub bounce: Option<BounceConfig>,
    pub palette: EdgePalette,
    /// Stop after this many frames, run forever when `None`
    pub max_frames: Option<u64>,
}

impl AnimationConfig {
    /// Large cube turning slowly about all three axes in the middle of the screen
    pub fn spinning() -> Self {
        const ROTATION_SPEED: f32 = 0.003;
        Self {
            half_extent: 200.0,
            viewer_distance: 400.0,
            rotation_step: RotationState::new(
                ROTATION_SPEED,
                ROTATION_SPEED * 0.5,
                ROTATION_SPEED * 0.25,
            ),
            frame_delay: Duration::from_micros(50_000),
            anchor: ProjectionAnchor::ScreenCenter,
            bounce: None,
            palette: EdgePalette::Uniform(Color::WHITE),
            max_frames: None,
        }
    }

    /// Small cube tumbling about X and Y while bouncing around the screen
    pub fn bouncing() -> Self {
        const ROTATION_SPEED: f32 = 0.02;
        Self {
            half_extent: 50.0,
            viewer_distance: 200.0,
            rotation_step: RotationState::new(ROTATION_SPEED, ROTATION_SPEED, 0.0),
            frame_delay: Duration::from_micros(16_000),
            anchor: ProjectionAnchor::Pose,
            bounce: Some(BounceConfig {
                start: Point2::new(300.0, 200.0),
                velocity: Vector2::new(2.0, 1.5),
                margin: 100.0,
            }),
            palette: EdgePalette::PerGroup {
                bottom: Color::WHITE,
                top: Color::GREEN,
                connecting: Color::RED,
            },
            max_frames: None,
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self::spinning()
    }
}

/// Rotation angles, centre and velocity of the animated cube
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseState {
    pub rotation: RotationState,
    pub spin: RotationState,
    pub center: Point2<f32>,
    pub velocity: Vector2<f32>,
}

impl PoseState {
    pub fn new(config: &AnimationConfig, width: u32, height: u32) -> Self {
        let (center, velocity) = match config.bounce {
            Some(bounce) => (bounce.start_within(width, height), bounce.velocity),
            None => (
                Point2::new((width / 2) as f32, (height / 2) as f32),
                Vector2::zeros(),
            ),
        };

        Self {
            rotation: RotationState::zero(),
            spin: config.rotation_step,
            center,
            velocity,
        }
    }

    /// Step the angles and, when bouncing, the position
    pub fn advance(&mut self, width: u32, height: u32, bounce: Option<&BounceConfig>) {
        self.rotation.advance(&self.spin);

        if let Some(bounce) = bounce {
            self.center += self.velocity;
            self.reflect(width as f32, height as f32, bounce.margins(width, height));
        }
    }

    /// Reverse a velocity component inside the margin band only while it
    /// still points toward that edge, so each crossing flips once.
    fn reflect(&mut self, width: f32, height: f32, margins: Vector2<f32>) {
        if (self.center.x >= width - margins.x && self.velocity.x > 0.0)
            || (self.center.x <= margins.x && self.velocity.x < 0.0)
        {
            self.velocity.x = -self.velocity.x;
        }
        if (self.center.y >= height - margins.y && self.velocity.y > 0.0)
            || (self.center.y <= margins.y && self.velocity.y < 0.0)
        {
            self.velocity.y = -self.velocity.y;
        }
    }
}

/// Shared stop flag, checked once per tick
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Source of the inter-frame delay
pub trait FrameClock {
    fn sleep(&mut self, delay: Duration);
}

/// Blocks the calling thread
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadClock;

impl FrameClock for ThreadClock {
    fn sleep(&mut self, delay: Duration) {
        std::thread::sleep(delay);
    }
}

/// Owns the canvas, the mesh and the pose, and renders one frame per tick
pub struct AnimationLoop<C> {
    canvas: C,
    mesh: SolidMesh,
    pose: PoseState,
    projector: Projector,
    config: AnimationConfig,
    frames: u64,
}

impl<C: Canvas> AnimationLoop<C> {
    pub fn new(canvas: C, config: AnimationConfig) -> Self {
        let (width, height) = (canvas.width(), canvas.height());
        debug!("Animation config: {:?}", config);

        Self {
            mesh: SolidMesh::cube(config.half_extent),
            pose: PoseState::new(&config, width, height),
            projector: Projector::new(width, height, config.viewer_distance),
            canvas,
            config,
            frames: 0,
        }
    }

    pub fn pose(&self) -> &PoseState {
        &self.pose
    }

    pub fn mesh(&self) -> &SolidMesh {
        &self.mesh
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    /// Frames rendered so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Screen positions of the cube's vertices for the current pose.
    ///
    /// Every frame starts again from the base mesh, so rounding never
    /// accumulates in the vertex positions.
    pub fn project_vertices(&self) -> [Point2<i32>; CUBE_VERTEX_COUNT] {
        let center = match self.config.anchor {
            ProjectionAnchor::ScreenCenter => self.projector.screen_center(),
            ProjectionAnchor::Pose => self.pose.center,
        };

        let mut projected = [Point2::origin(); CUBE_VERTEX_COUNT];
        for (slot, vertex) in projected.iter_mut().zip(self.mesh.vertices()) {
            let rotated = Transform::rotate(vertex, &self.pose.rotation);
            *slot = self.projector.project_about(&rotated, &center);
        }
        projected
    }

    /// Clear, then draw all twelve edges for the current pose
    pub fn render_frame(&mut self) {
        self.canvas.clear();

        let projected = self.project_vertices();
        for edge in self.mesh.edges() {
            let color = self.config.palette.color_for(edge.group);
            self.canvas
                .draw_line(projected[edge.start], projected[edge.end], color);
        }

        self.canvas.present();
    }

    /// Render the current pose, then advance it
    pub fn tick(&mut self) {
        self.render_frame();
        self.pose.advance(
            self.projector.width,
            self.projector.height,
            self.config.bounce.as_ref(),
        );
        self.frames += 1;
    }

    /// Tick until cancelled or the frame limit is reached, sleeping the
    /// configured delay after each frame. Returns the number of frames
    /// rendered by this call.
    pub fn run<K: FrameClock>(&mut self, cancel: &CancelToken, clock: &mut K) -> u64 {
        let start = self.frames;
        info!(
            "Animating {}x{} surface, frame delay {:?}",
            self.projector.width, self.projector.height, self.config.frame_delay
        );

        while !cancel.is_cancelled() {
            if let Some(limit) = self.config.max_frames {
                if self.frames - start >= limit {
                    break;
                }
            }

            self.tick();
            clock.sleep(self.config.frame_delay);
        }

        let rendered = self.frames - start;
        info!("Animation stopped after {} frames", rendered);
        rendered
    }
}
