//! TCP driver for the display daemon.
//!
//! Outgoing traffic is single-byte commands followed by fixed-size
//! payloads; incoming traffic is key-event reports consumed by a dedicated
//! receive thread. All writes and the disconnect-on-error path serialize
//! behind one lock so a paint write and a teardown never interleave.

use std::io::{Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Context;
use tracing::{debug, warn};

use crate::driver::control::{ControlSet, ControlValue};
use crate::driver::keys::{Key, KeyState, key_for_code};
use crate::foundation::error::{KeylcdError, KeylcdResult};
use crate::raster::codec::pack_frame;

/// Horizontal resolution of the device raster.
pub const LCD_WIDTH: u32 = 320;
/// Vertical resolution of the device raster.
pub const LCD_HEIGHT: u32 = 240;
/// Bits per pixel of the device's native raster format.
pub const LCD_BPP: u32 = 16;

/// Socket timeout for connect and writes. A stalled receiver fails the
/// write (and disconnects) instead of blocking the render loop forever.
const IO_TIMEOUT: Duration = Duration::from_secs(4);
/// Receive poll interval; timeouts are idle ticks, not errors.
const RECV_TIMEOUT: Duration = Duration::from_secs(1);

bitflags::bitflags! {
    /// M-key indicator lights.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct MKeyLights: u8 {
        /// M1 light.
        const M1 = 1 << 0;
        /// M2 light.
        const M2 = 1 << 1;
        /// M3 light.
        const M3 = 1 << 2;
        /// MR (record) light.
        const MR = 1 << 3;
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// Daemon endpoint configuration.
pub struct DaemonConfig {
    /// Daemon host.
    pub host: String,
    /// Daemon TCP port.
    pub port: u16,
    /// Device model name used for theme resource resolution.
    pub model: String,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 15551,
            model: "kbd320".to_string(),
        }
    }
}

/// Callback invoked by the receive thread for each key-event report.
pub type KeyCallback = Box<dyn Fn(&[Key], KeyState) + Send + 'static>;

/// Driver for a daemon-managed keyboard LCD.
///
/// Owns the connection lifecycle, the control surface and the paint
/// contract. Painting validates and encodes the raster before anything is
/// written: a frame of the wrong size is dropped with a warning, never
/// partially transmitted.
pub struct DaemonDriver {
    config: DaemonConfig,
    stream: Arc<Mutex<Option<TcpStream>>>,
    running: Arc<AtomicBool>,
    controls: ControlSet,
}

impl DaemonDriver {
    /// Create a disconnected driver with the default device controls.
    pub fn new(config: DaemonConfig) -> Self {
        Self {
            config,
            stream: Arc::new(Mutex::new(None)),
            running: Arc::new(AtomicBool::new(false)),
            controls: ControlSet::device_defaults(),
        }
    }

    /// Raster size of the device.
    pub fn size(&self) -> (u32, u32) {
        (LCD_WIDTH, LCD_HEIGHT)
    }

    /// Bits per pixel of the device raster format.
    pub fn bpp(&self) -> u32 {
        LCD_BPP
    }

    /// Model name used for theme resource resolution.
    pub fn model_name(&self) -> &str {
        &self.config.model
    }

    /// Current control set.
    pub fn controls(&self) -> &ControlSet {
        &self.controls
    }

    /// Mutable control set. Call [`DaemonDriver::update_control`]
    /// afterwards to push a change to the device.
    pub fn controls_mut(&mut self) -> &mut ControlSet {
        &mut self.controls
    }

    /// Whether a connection is currently open.
    pub fn is_connected(&self) -> bool {
        self.lock_stream().is_some()
    }

    /// Connect to the daemon and push all controls.
    pub fn connect(&mut self) -> KeylcdResult<()> {
        if self.is_connected() {
            return Err(KeylcdError::protocol("already connected"));
        }

        let addr = (self.config.host.as_str(), self.config.port)
            .to_socket_addrs()
            .with_context(|| format!("resolve daemon host '{}'", self.config.host))?
            .next()
            .ok_or_else(|| KeylcdError::protocol("daemon host resolved to no address"))?;
        let stream = TcpStream::connect_timeout(&addr, IO_TIMEOUT)
            .with_context(|| format!("connect to display daemon at {addr}"))?;
        stream.set_write_timeout(Some(IO_TIMEOUT)).context("set write timeout")?;
        stream.set_read_timeout(Some(RECV_TIMEOUT)).context("set read timeout")?;

        *self.lock_stream() = Some(stream);
        debug!(%addr, "connected to display daemon");

        for control in self.controls.iter().map(|c| c.id.clone()).collect::<Vec<_>>() {
            self.update_control(&control)?;
        }
        Ok(())
    }

    /// Close the connection and stop the receive thread cooperatively.
    pub fn disconnect(&mut self) -> KeylcdResult<()> {
        if !self.is_connected() {
            return Err(KeylcdError::protocol("not connected"));
        }
        self.running.store(false, Ordering::SeqCst);
        let mut guard = self.lock_stream();
        if let Some(stream) = guard.take() {
            let _ = stream.shutdown(std::net::Shutdown::Both);
        }
        Ok(())
    }

    /// Disconnect and connect again.
    pub fn reconnect(&mut self) -> KeylcdResult<()> {
        if self.is_connected() {
            self.disconnect()?;
        }
        self.connect()
    }

    /// Push a control's current value to the device.
    pub fn update_control(&mut self, id: &str) -> KeylcdResult<()> {
        let Some(control) = self.controls.get(id) else {
            return Err(KeylcdError::validation(format!("unknown control '{id}'")));
        };
        match (id, control.value) {
            ("backlight_colour", ControlValue::Color(r, g, b)) => {
                self.write_out(&[b'B', r, g, b])
            }
            ("lcd_brightness", ControlValue::Scalar(v)) => {
                self.write_out(&[b'L', v.clamp(0, 255) as u8])
            }
            // Foreground/background inform theme rendering only.
            _ => Ok(()),
        }
    }

    /// Set the M-key indicator lights.
    pub fn set_mkey_lights(&self, lights: MKeyLights) -> KeylcdResult<()> {
        let mut val = 0u8;
        if lights.contains(MKeyLights::M1) {
            val |= 0x80;
        }
        if lights.contains(MKeyLights::M2) {
            val |= 0x40;
        }
        if lights.contains(MKeyLights::M3) {
            val |= 0x20;
        }
        if lights.contains(MKeyLights::MR) {
            val |= 0x10;
        }
        self.write_out(&[b'M', val])
    }

    /// Start receiving key events, invoking `callback` for every report.
    ///
    /// The receive loop runs on a dedicated background thread and is torn
    /// down cooperatively by [`DaemonDriver::disconnect`].
    pub fn grab_keyboard(&mut self, callback: KeyCallback) -> KeylcdResult<()> {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(KeylcdError::protocol("already grabbing keyboard"));
        }
        let reader = {
            let guard = self.lock_stream();
            let Some(stream) = guard.as_ref() else {
                self.running.store(false, Ordering::SeqCst);
                return Err(KeylcdError::protocol("not connected"));
            };
            stream.try_clone().context("clone stream for receive thread")?
        };

        let stream = Arc::clone(&self.stream);
        let running = Arc::clone(&self.running);
        std::thread::Builder::new()
            .name("keylcd-recv".to_string())
            .spawn(move || receive_loop(reader, stream, running, callback))
            .context("spawn receive thread")?;

        self.write_out(b"GK")
    }

    /// Transmit a finished raster.
    ///
    /// The surface is rotated/flipped to scan order and packed to 16-bit
    /// color; the packed buffer must be exactly
    /// `width * height * bpp / 8` bytes or the frame is dropped with a
    /// warning. Painting while disconnected is a no-op.
    pub fn paint(&self, surface: &resvg::tiny_skia::Pixmap) -> KeylcdResult<()> {
        if !self.is_connected() {
            return Ok(());
        }

        let packed = pack_frame(surface);
        let expected = (LCD_WIDTH * LCD_HEIGHT * LCD_BPP / 8) as usize;
        if packed.len() != expected {
            warn!(
                expected,
                got = packed.len(),
                "invalid paint buffer size; frame dropped"
            );
            return Ok(());
        }

        let mut msg = Vec::with_capacity(1 + packed.len());
        msg.push(b'I');
        msg.extend_from_slice(&packed);
        self.write_out(&msg)
    }

    /// Write a framed message, disconnecting on failure.
    fn write_out(&self, buf: &[u8]) -> KeylcdResult<()> {
        let mut guard = self.lock_stream();
        let Some(stream) = guard.as_mut() else {
            self.running.store(false, Ordering::SeqCst);
            return Err(KeylcdError::protocol("not connected"));
        };
        if let Err(e) = stream.write_all(buf) {
            // Implicit disconnect: the connection is unusable now.
            self.running.store(false, Ordering::SeqCst);
            if let Some(stream) = guard.take() {
                let _ = stream.shutdown(std::net::Shutdown::Both);
            }
            return Err(KeylcdError::protocol(format!("write failed: {e}")));
        }
        Ok(())
    }

    fn lock_stream(&self) -> std::sync::MutexGuard<'_, Option<TcpStream>> {
        self.stream.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Drop for DaemonDriver {
    fn drop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(stream) = self.lock_stream().take() {
            let _ = stream.shutdown(std::net::Shutdown::Both);
        }
    }
}

fn receive_loop(
    mut reader: TcpStream,
    stream: Arc<Mutex<Option<TcpStream>>>,
    running: Arc<AtomicBool>,
    callback: KeyCallback,
) {
    while running.load(Ordering::SeqCst) {
        match read_report(&mut reader) {
            Ok(Some((down, up))) => {
                if !down.is_empty() {
                    callback(&down, KeyState::Down);
                }
                if !up.is_empty() {
                    callback(&up, KeyState::Up);
                }
            }
            Ok(None) => {} // idle tick
            Err(e) => {
                if running.swap(false, Ordering::SeqCst) {
                    warn!(error = %e, "key-event receive failed; disconnecting");
                    // Same lock as writes: teardown never interleaves a write.
                    let mut guard = stream.lock().unwrap_or_else(|e| e.into_inner());
                    if let Some(stream) = guard.take() {
                        let _ = stream.shutdown(std::net::Shutdown::Both);
                    }
                }
                return;
            }
        }
    }
}

type KeyReport = (Vec<Key>, Vec<Key>);

/// Read one key-event report: down count + codes, then up count + codes.
/// `Ok(None)` signals a read timeout (no data this tick).
fn read_report(reader: &mut TcpStream) -> std::io::Result<Option<KeyReport>> {
    let down_count = match read_u8(reader) {
        Ok(n) => n,
        Err(e) if e.kind() == std::io::ErrorKind::WouldBlock
            || e.kind() == std::io::ErrorKind::TimedOut =>
        {
            return Ok(None);
        }
        Err(e) => return Err(e),
    };
    let down = read_keys(reader, down_count)?;
    let up_count = read_u8(reader)?;
    let up = read_keys(reader, up_count)?;
    Ok(Some((down, up)))
}

fn read_keys(reader: &mut TcpStream, count: u8) -> std::io::Result<Vec<Key>> {
    let mut keys = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let mut code = [0u8; 4];
        reader.read_exact(&mut code)?;
        let code = u32::from_le_bytes(code);
        match key_for_code(code) {
            Some(key) => keys.push(key),
            None => warn!(code, "unknown key code"),
        }
    }
    Ok(keys)
}

fn read_u8(reader: &mut TcpStream) -> std::io::Result<u8> {
    let mut b = [0u8; 1];
    reader.read_exact(&mut b)?;
    Ok(b[0])
}

#[cfg(test)]
#[path = "../../tests/unit/driver/daemon.rs"]
mod tests;
