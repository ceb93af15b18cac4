//! Unlit renderer for field markers and the orientation gizmo.
//!
//! Draw calls are recorded during the frame and encoded afterwards:
//! geometry is expanded to clip space on the CPU into one transient vertex
//! buffer, every draw remembers the viewport it was issued with, and a depth
//! clear starts a new render pass.

use std::collections::HashMap;
use std::ops::Range;
use std::sync::Arc;

use cgmath::{Matrix4, Vector4};
use wgpu::util::DeviceExt;

use crate::gfx::geometry::GeometryData;
use crate::gfx::gizmos::{
    Drawable, LabelDesc, MaterialDesc, OverlayRenderer, ResourceHandle, ResourceKind,
    ResourcePool,
};
use crate::gfx::resources::TextureResource;
use crate::gfx::viewport::Viewport;

use super::label_texture::{rasterize_label, LABEL_TEXTURE_SIZE};
use super::pipeline_manager::{PipelineConfig, PipelineManager};
use super::vertex::OverlayVertex;

const OVERLAY_SHADER: &str = "overlay.wgsl";
const OVERLAY_PIPELINE: &str = "Overlay";

/// Texture bound for a draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureBinding {
    White,
    Label(u64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub viewport: Viewport,
    pub vertices: Range<u32>,
    pub texture: TextureBinding,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PassCommands {
    /// Clear depth before the first draw of the pass
    pub clear_depth: bool,
    pub draws: Vec<DrawCommand>,
}

/// Vertices and draw commands recorded for one frame
#[derive(Debug, Default)]
pub struct DrawList {
    vertices: Vec<OverlayVertex>,
    passes: Vec<PassCommands>,
}

impl DrawList {
    pub fn reset(&mut self) {
        self.vertices.clear();
        self.passes.clear();
        self.passes.push(PassCommands::default());
    }

    /// Starts a new pass that clears depth
    pub fn split_pass(&mut self) {
        self.passes.push(PassCommands {
            clear_depth: true,
            draws: Vec::new(),
        });
    }

    /// Expands `geometry` through `mvp` and records one draw
    pub fn push(
        &mut self,
        geometry: &GeometryData,
        material: &MaterialDesc,
        mvp: Matrix4<f32>,
        opacity: f32,
        viewport: Viewport,
    ) {
        if geometry.indices.is_empty() {
            return;
        }

        let mut color = material.color;
        color[3] *= opacity.clamp(0.0, 1.0);

        let start = self.vertices.len() as u32;
        for &index in &geometry.indices {
            let Some(position) = geometry.vertices.get(index as usize) else {
                log::warn!("Geometry index {} out of range, draw truncated", index);
                break;
            };
            let clip = mvp * Vector4::new(position[0], position[1], position[2], 1.0);
            self.vertices.push(OverlayVertex {
                position: clip.into(),
                color,
                tex_coords: geometry.tex_coord(index as usize),
            });
        }
        let end = self.vertices.len() as u32;

        let texture = match material.texture {
            Some(handle) => TextureBinding::Label(handle.id),
            None => TextureBinding::White,
        };

        if self.passes.is_empty() {
            self.passes.push(PassCommands::default());
        }
        if let Some(pass) = self.passes.last_mut() {
            pass.draws.push(DrawCommand {
                viewport,
                vertices: start..end,
                texture,
            });
        }
    }

    pub fn vertices(&self) -> &[OverlayVertex] {
        &self.vertices
    }

    pub fn passes(&self) -> &[PassCommands] {
        &self.passes
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

struct LabelTexture {
    _texture: TextureResource,
    bind_group: wgpu::BindGroup,
}

/// wgpu implementation of [`OverlayRenderer`] and [`ResourcePool`]
pub struct WgpuOverlayRenderer {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    pipeline_manager: PipelineManager,
    texture_layout: wgpu::BindGroupLayout,
    white: wgpu::BindGroup,
    geometries: HashMap<u64, GeometryData>,
    materials: HashMap<u64, MaterialDesc>,
    labels: HashMap<u64, LabelTexture>,
    next_id: u64,
    viewport: Viewport,
    target_size: (u32, u32),
    draw_list: DrawList,
}

impl WgpuOverlayRenderer {
    pub fn new(
        device: Arc<wgpu::Device>,
        queue: Arc<wgpu::Queue>,
        color_format: wgpu::TextureFormat,
    ) -> Self {
        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Label Texture Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let mut pipeline_manager = PipelineManager::new(device.clone());
        pipeline_manager.load_shader(OVERLAY_SHADER, include_str!("shaders/overlay.wgsl"));
        pipeline_manager.register_pipeline(
            OVERLAY_PIPELINE,
            PipelineConfig::default_with_shader(OVERLAY_SHADER)
                .with_label("Overlay Pipeline")
                .with_cull_mode(None)
                .with_bind_group_layouts(vec![texture_layout.clone()])
                .with_depth(TextureResource::DEPTH_FORMAT, wgpu::CompareFunction::LessEqual)
                .with_color_targets(vec![Some(wgpu::ColorTargetState {
                    format: color_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })]),
        );

        let white_texture = TextureResource::create_white(&device, &queue);
        let white = create_texture_bind_group(&device, &texture_layout, &white_texture, "White");

        let mut draw_list = DrawList::default();
        draw_list.reset();

        Self {
            device,
            queue,
            pipeline_manager,
            texture_layout,
            white,
            geometries: HashMap::new(),
            materials: HashMap::new(),
            labels: HashMap::new(),
            next_id: 0,
            viewport: Viewport::new(0.0, 0.0, 1.0, 1.0),
            target_size: (1, 1),
            draw_list,
        }
    }

    /// Drops last frame's commands and resets the viewport to the full target
    pub fn begin_frame(&mut self, width: u32, height: u32) {
        self.target_size = (width.max(1), height.max(1));
        self.viewport = Viewport::full(self.target_size.0, self.target_size.1);
        self.draw_list.reset();
    }

    /// Encodes the recorded draws on top of `color_view`.
    pub fn encode(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        color_view: &wgpu::TextureView,
        depth_view: &wgpu::TextureView,
    ) {
        if self.draw_list.is_empty() {
            return;
        }

        let vertex_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Overlay Vertex Buffer"),
                contents: bytemuck::cast_slice(self.draw_list.vertices()),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let Some(pipeline) = self.pipeline_manager.get_pipeline(OVERLAY_PIPELINE) else {
            log::error!("Overlay pipeline unavailable, skipping overlay draws");
            return;
        };

        let (target_width, target_height) = self.target_size;

        for pass in self.draw_list.passes() {
            if pass.draws.is_empty() {
                continue;
            }

            let depth_load = if pass.clear_depth {
                wgpu::LoadOp::Clear(1.0)
            } else {
                wgpu::LoadOp::Load
            };

            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Overlay Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: color_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: depth_load,
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_pipeline(pipeline);
            render_pass.set_vertex_buffer(0, vertex_buffer.slice(..));

            for draw in &pass.draws {
                let Some(viewport) = clamp_viewport(draw.viewport, target_width, target_height)
                else {
                    continue;
                };
                let bind_group = match draw.texture {
                    TextureBinding::White => &self.white,
                    TextureBinding::Label(id) => match self.labels.get(&id) {
                        Some(label) => &label.bind_group,
                        None => &self.white,
                    },
                };

                render_pass.set_viewport(
                    viewport.x,
                    viewport.y,
                    viewport.width,
                    viewport.height,
                    0.0,
                    1.0,
                );
                render_pass.set_bind_group(0, bind_group, &[]);
                render_pass.draw(draw.vertices.clone(), 0..1);
            }
        }
    }

    fn allocate(&mut self, kind: ResourceKind) -> ResourceHandle {
        self.next_id += 1;
        ResourceHandle {
            kind,
            id: self.next_id,
        }
    }
}

/// Clips a viewport to the render target, `None` when nothing is left
fn clamp_viewport(viewport: Viewport, width: u32, height: u32) -> Option<Viewport> {
    let x = viewport.x.max(0.0);
    let y = viewport.y.max(0.0);
    let right = (viewport.x + viewport.width).min(width as f32);
    let bottom = (viewport.y + viewport.height).min(height as f32);
    if right <= x || bottom <= y {
        return None;
    }
    Some(Viewport::new(x, y, right - x, bottom - y))
}

fn create_texture_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    texture: &TextureResource,
    label: &str,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(&format!("{} Bind Group", label)),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&texture.view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&texture.sampler),
            },
        ],
    })
}

impl OverlayRenderer for WgpuOverlayRenderer {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn clear_depth(&mut self) {
        self.draw_list.split_pass();
    }

    fn draw(&mut self, drawables: &[Drawable], view_projection: Matrix4<f32>) {
        for drawable in drawables {
            let (Some(geometry), Some(material)) = (
                self.geometries.get(&drawable.geometry.id),
                self.materials.get(&drawable.material.id),
            ) else {
                log::warn!("Skipping draw with released or unknown resources");
                continue;
            };
            self.draw_list.push(
                geometry,
                material,
                view_projection * drawable.transform,
                drawable.opacity,
                self.viewport,
            );
        }
    }
}

impl ResourcePool for WgpuOverlayRenderer {
    fn create_geometry(&mut self, geometry: GeometryData) -> ResourceHandle {
        let handle = self.allocate(ResourceKind::Geometry);
        self.geometries.insert(handle.id, geometry);
        handle
    }

    fn create_material(&mut self, material: MaterialDesc) -> ResourceHandle {
        let handle = self.allocate(ResourceKind::Material);
        self.materials.insert(handle.id, material);
        handle
    }

    fn create_label_texture(&mut self, label: &LabelDesc) -> ResourceHandle {
        let handle = self.allocate(ResourceKind::LabelTexture);
        let name = format!(
            "Label {}",
            label.text.as_deref().unwrap_or("(blank)")
        );
        let pixels = rasterize_label(label);
        let texture = TextureResource::create_from_rgba_data(
            &self.device,
            &self.queue,
            &pixels,
            LABEL_TEXTURE_SIZE,
            LABEL_TEXTURE_SIZE,
            &name,
        );
        let bind_group =
            create_texture_bind_group(&self.device, &self.texture_layout, &texture, &name);
        self.labels.insert(
            handle.id,
            LabelTexture {
                _texture: texture,
                bind_group,
            },
        );
        handle
    }

    fn release(&mut self, handle: ResourceHandle) {
        let released = match handle.kind {
            ResourceKind::Geometry => self.geometries.remove(&handle.id).is_some(),
            ResourceKind::Material => self.materials.remove(&handle.id).is_some(),
            ResourceKind::LabelTexture => self.labels.remove(&handle.id).is_some(),
        };
        if !released {
            log::warn!("Release of unknown {:?} resource {}", handle.kind, handle.id);
        }
    }
}
