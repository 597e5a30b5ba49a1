use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::{DeviceEvent, DeviceId, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use stagehand::{
    CameraConfig, EventTranslator, GpuContext, GridPass, LoggingConfig, OrbitConfig, Stage,
    StageConfig, WasdConfig, WindowPointerLock, init_logging,
};

struct Running {
    window: Arc<Window>,
    gpu: GpuContext,
    grid: GridPass,
    stage: Stage,
    translator: EventTranslator,
}

#[derive(Default)]
struct App {
    running: Option<Running>,
}

impl Running {
    fn new(event_loop: &ActiveEventLoop) -> Result<Self, Box<dyn std::error::Error>> {
        let attrs = WindowAttributes::default()
            .with_title("stagehand")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));
        let window = Arc::new(event_loop.create_window(attrs)?);
        let size = window.inner_size();

        let gpu = GpuContext::new(window.clone())?;
        let grid = GridPass::new(&gpu);

        let mut stage = Stage::new(
            StageConfig::new(size.width.max(1), size.height.max(1))
                .camera(CameraConfig::new().position([0.0, 4.0, 12.0]))
                .orbit(OrbitConfig::new().capture_pointer_lock(true))
                .wasd(WasdConfig::new().speed(0.15)),
        )?;
        stage.set_pointer_lock(WindowPointerLock::new(window.clone()));

        Ok(Self {
            window,
            gpu,
            grid,
            stage,
            translator: EventTranslator::new(),
        })
    }

    fn redraw(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.stage.tick()?;

        let output = match self.gpu.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (width, height) = (self.gpu.width(), self.gpu.height());
                self.gpu.resize(width, height);
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Grid Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.grid
                .render(&self.gpu, &mut render_pass, &self.stage.uniforms());
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return;
        }
        match Running::new(event_loop) {
            Ok(running) => {
                running.window.request_redraw();
                self.running = Some(running);
            }
            Err(e) => {
                log::error!("failed to start: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(running) = self.running.as_mut() else {
            return;
        };

        if let Some(input) = running.translator.translate(&event) {
            running.stage.handle_event(&input);
        }

        match event {
            WindowEvent::CloseRequested => {
                running.stage.dispose();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                running.gpu.resize(size.width, size.height);
                running.stage.resize(size.width, size.height);
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = running.redraw() {
                    log::error!("frame failed: {}", e);
                    event_loop.exit();
                    return;
                }
                running.window.request_redraw();
            }
            _ => (),
        }
    }

    // Drags keep turning the orbit while the cursor is locked.
    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _id: DeviceId, event: DeviceEvent) {
        let Some(running) = self.running.as_mut() else {
            return;
        };
        if let Some(input) = running.translator.translate_device(&event) {
            running.stage.handle_event(&input);
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(LoggingConfig::new().filter("info,wgpu_core=warn,wgpu_hal=warn"));

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::default();
    event_loop.run_app(&mut app)?;
    Ok(())
}
