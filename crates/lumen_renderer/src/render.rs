//! Pixel dispatch.
//!
//! With one thread the image is rendered row by row on the calling thread.
//! Otherwise a rayon pool of workers pulls flattened pixel indices from a
//! shared atomic cursor and sends finished pixels over a channel; the calling
//! thread writes them to the output and reports progress.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc::{self, Sender};
use std::thread;
use std::time::Instant;

use log::{debug, info};
use lumen_math::Color;

use crate::{
    error::{RenderError, RenderResult},
    Camera, PixelWriter, RayTracer,
};

type PixelMessage = RenderResult<(u32, u32, Color)>;

impl Camera {
    /// Render every pixel of `writer`.
    ///
    /// The ray tracer, view plane size and distance must be set, the view
    /// plane dimensions must be positive and the writer must have a non-empty
    /// resolution; otherwise this fails before any pixel is traced.
    pub fn render_image<W: PixelWriter>(&self, writer: &mut W) -> RenderResult<()> {
        let ray_tracer = self
            .ray_tracer
            .as_deref()
            .ok_or(RenderError::MissingResource("ray tracer"))?;
        if !self.view_plane_size_set() {
            return Err(RenderError::MissingResource("view plane size"));
        }
        if !self.view_plane_distance_set() {
            return Err(RenderError::MissingResource("view plane distance"));
        }
        if !self.view_plane_valid() {
            return Err(RenderError::InvalidConfiguration(
                "view plane size and distance must be positive and finite",
            ));
        }
        let (nx, ny) = writer.resolution();
        if nx == 0 || ny == 0 {
            return Err(RenderError::MissingResource("image writer"));
        }

        info!("Rendering {}x{} pixels", nx, ny);
        let start = Instant::now();

        if self.threads == 1 {
            debug!("Rendering on the calling thread");
            self.render_sequential(ray_tracer, writer, nx, ny)?;
        } else {
            self.render_parallel(ray_tracer, writer, nx, ny)?;
        }

        info!("Render finished in {:.2?}", start.elapsed());
        Ok(())
    }

    fn render_sequential<W: PixelWriter>(
        &self,
        ray_tracer: &dyn RayTracer,
        writer: &mut W,
        nx: u32,
        ny: u32,
    ) -> RenderResult<()> {
        let mut progress = Progress::new(nx as usize * ny as usize);
        for i in 0..ny {
            for j in 0..nx {
                let color = self.render_pixel(ray_tracer, nx, ny, j, i)?;
                writer.write_pixel(j, i, color);
                progress.advance();
            }
        }
        Ok(())
    }

    fn render_parallel<W: PixelWriter>(
        &self,
        ray_tracer: &dyn RayTracer,
        writer: &mut W,
        nx: u32,
        ny: u32,
    ) -> RenderResult<()> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .thread_name(|i| format!("render-worker-{i}"))
            .build()?;
        let workers = pool.current_num_threads();
        debug!("Rendering with {} worker threads", workers);

        let total = nx as usize * ny as usize;
        let cursor = &AtomicUsize::new(0);
        let cancelled = &AtomicBool::new(false);
        let (tx, rx) = mpsc::channel::<PixelMessage>();

        thread::scope(|s| {
            let dispatcher = s.spawn(move || {
                panic::catch_unwind(AssertUnwindSafe(|| {
                    pool.scope(|scope| {
                        for _ in 0..workers {
                            let tx = tx.clone();
                            scope.spawn(move |_| {
                                self.render_worker(ray_tracer, nx, ny, cursor, cancelled, tx)
                            });
                        }
                    });
                }))
                // Last sender dropped here, which ends the monitor loop
            });

            let mut progress = Progress::new(total);
            let mut first_error = None;
            for message in rx {
                match message {
                    Ok((x, y, color)) => {
                        writer.write_pixel(x, y, color);
                        progress.advance();
                    }
                    Err(err) => {
                        first_error.get_or_insert(err);
                    }
                }
            }

            if let Some(err) = first_error {
                return Err(err);
            }
            match dispatcher.join() {
                Ok(Ok(())) => Ok(()),
                Ok(Err(payload)) | Err(payload) => {
                    Err(RenderError::WorkerPanicked(panic_message(payload.as_ref())))
                }
            }
        })
    }

    /// Draw pixels from the cursor until it runs out or the render is
    /// cancelled.
    fn render_worker(
        &self,
        ray_tracer: &dyn RayTracer,
        nx: u32,
        ny: u32,
        cursor: &AtomicUsize,
        cancelled: &AtomicBool,
        tx: Sender<PixelMessage>,
    ) {
        let _guard = CancelOnPanic(cancelled);
        let total = nx as usize * ny as usize;
        while !cancelled.load(Ordering::Relaxed) {
            let index = cursor.fetch_add(1, Ordering::Relaxed);
            if index >= total {
                break;
            }
            let x = (index % nx as usize) as u32;
            let y = (index / nx as usize) as u32;

            let message = self.render_pixel(ray_tracer, nx, ny, x, y).map(|color| (x, y, color));
            if message.is_err() {
                cancelled.store(true, Ordering::Relaxed);
            }
            if tx.send(message).is_err() {
                break;
            }
        }
    }

    fn render_pixel(&self, ray_tracer: &dyn RayTracer, nx: u32, ny: u32, x: u32, y: u32) -> RenderResult<Color> {
        self.pixel_color(ray_tracer, nx, ny, x, y)
            .map_err(|source| RenderError::Pixel {
                x,
                y,
                source: Box::new(source),
            })
    }
}

/// Stops the other workers when a worker unwinds.
struct CancelOnPanic<'a>(&'a AtomicBool);

impl Drop for CancelOnPanic<'_> {
    fn drop(&mut self) {
        if thread::panicking() {
            self.0.store(true, Ordering::Relaxed);
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Completed-pixel counter that logs each new whole percentage.
struct Progress {
    total: usize,
    done: usize,
    percent: usize,
}

impl Progress {
    fn new(total: usize) -> Self {
        Self {
            total,
            done: 0,
            percent: 0,
        }
    }

    /// Count one pixel; returns the new percentage when it increased.
    fn advance(&mut self) -> Option<usize> {
        self.done += 1;
        let percent = self.done * 100 / self.total;
        if percent <= self.percent {
            return None;
        }
        self.percent = percent;
        info!("Rendered {}%", percent);
        Some(percent)
    }
}
