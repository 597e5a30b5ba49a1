//! A fullscreen pass that draws an infinite ground grid from camera uniforms.
//!
//! The pass renders one oversized triangle. The fragment shader unprojects
//! each pixel with the inverse projection, turns the ray into world space
//! with the camera's world matrix, and intersects it with the `y = 0` plane.
//! Minor lines are `spacing` apart, major lines every ten; the X and Z axes
//! are tinted red and blue.
//!
//! # Example
//!
//! ```no_run
//! # fn demo(gpu: &stagehand::GpuContext, stage: &stagehand::Stage, pass: &mut wgpu::RenderPass) {
//! use stagehand::GridPass;
//!
//! let grid = GridPass::new(gpu).with_spacing(0.5);
//! grid.render(gpu, pass, &stage.uniforms());
//! # }
//! ```

use crate::camera::CameraUniforms;
use crate::gpu::GpuContext;

/// Uniforms bound at `@group(0) @binding(0)` of `grid.wgsl`.
///
/// The layout matches WGSL alignment: `resolution` starts on the 8-byte
/// boundary after the camera block's padded `position`.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GridUniforms {
    pub camera: CameraUniforms,
    /// Render target size in pixels.
    pub resolution: [f32; 2],
    /// World units between minor lines.
    pub spacing: f32,
    pub _padding: f32,
}

pub struct GridPass {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    spacing: f32,
}

impl GridPass {
    pub fn new(gpu: &GpuContext) -> Self {
        let device = &gpu.device;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Grid Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/grid.wgsl").into()),
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Grid Uniforms"),
            size: std::mem::size_of::<GridUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Grid Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Grid Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Grid Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Grid Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: gpu.config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            uniform_buffer,
            bind_group,
            spacing: 1.0,
        }
    }

    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Uploads `camera` and draws the grid.
    pub fn render(&self, gpu: &GpuContext, render_pass: &mut wgpu::RenderPass, camera: &CameraUniforms) {
        let uniforms = GridUniforms {
            camera: *camera,
            resolution: [gpu.width() as f32, gpu.height() as f32],
            spacing: self.spacing,
            _padding: 0.0,
        };
        gpu.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniforms]));

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.draw(0..3, 0..1);
    }
}
