use crate::coords::ColorRgba;
use crate::device::{BufferRequest, GraphicsHost, RenderDevice, SetupError};
use crate::geometry::QuadMesh;

use super::ClearPass;

const VERTEX_BUFFER_LABEL: &str = "quad vertices";
const CLEAR_PASS_LABEL: &str = "clearpass clear";

/// Device-owned vertex buffer holding exactly one serialized mesh.
///
/// Written once at upload and never updated; it lives as long as its session.
#[derive(Debug)]
pub struct VertexBuffer<B> {
    buffer: B,
    size: u64,
    vertex_count: u32,
}

impl<B> VertexBuffer<B> {
    /// Allocates a buffer sized to the mesh and fills it with a single write.
    pub fn upload<D>(device: &D, mesh: &QuadMesh) -> Self
    where
        D: RenderDevice<Buffer = B>,
    {
        let bytes = mesh.as_bytes();
        let size = bytes.len() as u64;
        debug_assert_eq!(size, QuadMesh::BYTE_LEN);

        let buffer = device.create_buffer(&BufferRequest::vertex(VERTEX_BUFFER_LABEL, size));
        device.write_buffer(&buffer, 0, bytes);

        Self {
            buffer,
            size,
            vertex_count: mesh.vertices().len() as u32,
        }
    }

    #[inline]
    pub fn raw(&self) -> &B {
        &self.buffer
    }

    /// Size in bytes, equal to the declared size at creation.
    #[inline]
    pub fn size(&self) -> u64 {
        self.size
    }

    #[inline]
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }
}

/// Everything that must stay alive after the single submission.
pub struct Session<D: RenderDevice> {
    device: D,
    vertex_buffer: VertexBuffer<D::Buffer>,
}

impl<D: RenderDevice> Session<D> {
    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn vertex_buffer(&self) -> &VertexBuffer<D::Buffer> {
        &self.vertex_buffer
    }
}

/// Runs the whole startup sequence against `host`.
///
/// Order: adapter, device (and surface configuration), vertex buffer upload,
/// one clear pass recorded on the current surface texture, one submission.
/// Any failure returns before later steps run; nothing is retried.
pub async fn startup<H>(
    host: H,
    mesh: &QuadMesh,
    clear: ColorRgba,
) -> Result<Session<H::Device>, SetupError>
where
    H: GraphicsHost,
{
    let adapter = host.request_adapter().await?;
    let device = host.request_device(adapter).await?;
    log::debug!("device ready, surface format {:?}", device.surface_format());

    let vertex_buffer = VertexBuffer::upload(&device, mesh);
    log::debug!(
        "uploaded {} vertices ({} bytes)",
        vertex_buffer.vertex_count(),
        vertex_buffer.size()
    );

    let commands = device.record_clear_pass(&ClearPass::new(CLEAR_PASS_LABEL, clear))?;
    device.submit(commands);
    log::info!("submitted clear pass {:?}", clear);

    Ok(Session {
        device,
        vertex_buffer,
    })
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        RequestAdapter,
        RequestDevice,
        CreateBuffer {
            id: usize,
            label: Option<String>,
            size: u64,
            usage: wgpu::BufferUsages,
        },
        WriteBuffer {
            id: usize,
            offset: u64,
            data: Vec<u8>,
        },
        RecordClearPass {
            label: Option<String>,
            color: ColorRgba,
        },
        Submit(usize),
    }

    type Journal = Rc<RefCell<Vec<Call>>>;

    #[derive(Default)]
    struct Failures {
        adapter: bool,
        device: bool,
        surface: bool,
    }

    struct RecordingHost {
        journal: Journal,
        fail: Failures,
    }

    struct RecordingDevice {
        journal: Journal,
        fail_surface: bool,
        next_id: Cell<usize>,
    }

    /// Stand-in for a finished command buffer, tagged with its recording order.
    struct Recorded(usize);

    impl RecordingHost {
        fn new(fail: Failures) -> (Self, Journal) {
            let journal = Journal::default();
            (
                Self {
                    journal: journal.clone(),
                    fail,
                },
                journal,
            )
        }
    }

    impl GraphicsHost for RecordingHost {
        type Adapter = ();
        type Device = RecordingDevice;

        async fn request_adapter(&self) -> Result<(), SetupError> {
            self.journal.borrow_mut().push(Call::RequestAdapter);
            if self.fail.adapter {
                return Err(SetupError::NoAdapter("none attached".to_string()));
            }
            Ok(())
        }

        async fn request_device(self, _adapter: ()) -> Result<RecordingDevice, SetupError> {
            self.journal.borrow_mut().push(Call::RequestDevice);
            if self.fail.device {
                return Err(SetupError::DeviceRequest("limits exceeded".to_string()));
            }
            Ok(RecordingDevice {
                journal: self.journal,
                fail_surface: self.fail.surface,
                next_id: Cell::new(0),
            })
        }
    }

    impl RenderDevice for RecordingDevice {
        type Buffer = usize;
        type Commands = Recorded;

        fn surface_format(&self) -> wgpu::TextureFormat {
            wgpu::TextureFormat::Bgra8Unorm
        }

        fn create_buffer(&self, request: &BufferRequest<'_>) -> usize {
            let id = self.next_id.get();
            self.next_id.set(id + 1);
            self.journal.borrow_mut().push(Call::CreateBuffer {
                id,
                label: request.label.map(str::to_string),
                size: request.size,
                usage: request.usage,
            });
            id
        }

        fn write_buffer(&self, buffer: &usize, offset: u64, data: &[u8]) {
            self.journal.borrow_mut().push(Call::WriteBuffer {
                id: *buffer,
                offset,
                data: data.to_vec(),
            });
        }

        fn record_clear_pass(&self, pass: &ClearPass<'_>) -> Result<Recorded, SetupError> {
            if self.fail_surface {
                return Err(SetupError::Surface("surface lost".to_string()));
            }
            let mut journal = self.journal.borrow_mut();
            journal.push(Call::RecordClearPass {
                label: pass.label.map(str::to_string),
                color: pass.color,
            });
            Ok(Recorded(journal.len()))
        }

        fn submit(&self, commands: Recorded) {
            self.journal.borrow_mut().push(Call::Submit(commands.0));
        }
    }

    fn run(fail: Failures) -> (Result<Session<RecordingDevice>, SetupError>, Vec<Call>) {
        let (host, journal) = RecordingHost::new(fail);
        let mesh = QuadMesh::default();
        let result = pollster::block_on(startup(host, &mesh, ColorRgba::DEEP_BLUE));
        let calls = journal.borrow().clone();
        (result, calls)
    }

    fn position(calls: &[Call], pred: impl Fn(&Call) -> bool) -> usize {
        calls.iter().position(pred).expect("call not recorded")
    }

    // ── fatal acquisition ─────────────────────────────────────────────────

    #[test]
    fn adapter_failure_aborts_before_any_resource() {
        let (result, calls) = run(Failures { adapter: true, ..Default::default() });

        assert!(matches!(result.err(), Some(SetupError::NoAdapter(_))));
        assert_eq!(calls, vec![Call::RequestAdapter]);
    }

    #[test]
    fn device_failure_aborts_before_any_resource() {
        let (result, calls) = run(Failures { device: true, ..Default::default() });

        assert!(matches!(result.err(), Some(SetupError::DeviceRequest(_))));
        assert_eq!(calls, vec![Call::RequestAdapter, Call::RequestDevice]);
    }

    #[test]
    fn surface_failure_never_submits() {
        let (result, calls) = run(Failures { surface: true, ..Default::default() });

        assert!(matches!(result.err(), Some(SetupError::Surface(_))));
        assert!(!calls.iter().any(|c| matches!(c, Call::Submit(_))));
    }

    // ── successful run ────────────────────────────────────────────────────

    #[test]
    fn records_and_submits_exactly_once() {
        let (result, calls) = run(Failures::default());
        assert!(result.is_ok());

        let recorded = calls.iter().filter(|c| matches!(c, Call::RecordClearPass { .. })).count();
        let submitted: Vec<_> = calls
            .iter()
            .filter_map(|c| match c {
                Call::Submit(n) => Some(*n),
                _ => None,
            })
            .collect();

        assert_eq!(recorded, 1);
        assert_eq!(submitted.len(), 1);

        // The submitted unit is the one that was recorded.
        let record_at = position(&calls, |c| matches!(c, Call::RecordClearPass { .. }));
        assert_eq!(submitted[0], record_at + 1);
    }

    #[test]
    fn buffer_is_sized_and_written_before_the_pass() {
        let (_, calls) = run(Failures::default());
        let mesh = QuadMesh::default();

        assert_eq!(
            calls[2],
            Call::CreateBuffer {
                id: 0,
                label: Some("quad vertices".to_string()),
                size: 48,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            }
        );
        assert_eq!(
            calls[3],
            Call::WriteBuffer {
                id: 0,
                offset: 0,
                data: mesh.as_bytes().to_vec(),
            }
        );

        let writes = calls.iter().filter(|c| matches!(c, Call::WriteBuffer { .. })).count();
        assert_eq!(writes, 1);

        let write_at = position(&calls, |c| matches!(c, Call::WriteBuffer { .. }));
        let record_at = position(&calls, |c| matches!(c, Call::RecordClearPass { .. }));
        assert!(write_at < record_at);
    }

    #[test]
    fn pass_clears_to_deep_blue() {
        let (_, calls) = run(Failures::default());

        let color = calls.iter().find_map(|c| match c {
            Call::RecordClearPass { color, .. } => Some(*color),
            _ => None,
        });
        assert_eq!(color, Some(ColorRgba::new(0.0, 0.0, 0.4, 1.0)));
    }

    #[test]
    fn session_keeps_the_vertex_buffer() {
        let (result, _) = run(Failures::default());
        let Ok(session) = result else { panic!("startup failed") };

        let vb = session.vertex_buffer();
        assert_eq!(*vb.raw(), 0);
        assert_eq!(vb.size(), 48);
        assert_eq!(vb.vertex_count(), 6);
        assert_eq!(session.device().surface_format(), wgpu::TextureFormat::Bgra8Unorm);
    }
}
