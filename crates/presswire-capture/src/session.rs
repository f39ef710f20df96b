//! Live packet capture sessions
//!
//! A session owns one promiscuous pcap handle with the watch-set filter
//! installed and hands out captured frames as a blocking iterator. Opening
//! an interface commonly requires CAP_NET_RAW or root; that is a documented
//! precondition of the daemon, not something retried here.

use pcap::{Active, Capture};
use thiserror::Error;
use tracing::{debug, warn};

/// Snapshot length large enough for a full Ethernet frame
const SNAPLEN: i32 = 65536;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("failed to open interface {interface:?}: {source}")]
    InterfaceOpen {
        interface: String,
        #[source]
        source: pcap::Error,
    },
    #[error("capture engine rejected filter {filter:?}: {source}")]
    FilterInstall {
        filter: String,
        #[source]
        source: pcap::Error,
    },
}

/// An owned copy of one captured link-layer frame.
///
/// Alive for a single run-loop iteration; the only field the pipeline
/// consumes is the Ethernet source address.
#[derive(Debug)]
pub struct CaptureFrame {
    data: Vec<u8>,
}

impl CaptureFrame {
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// A live capture handle bound to one interface.
///
/// Created once at startup and owned exclusively by the run loop; dropping
/// it releases the underlying OS resource.
pub struct CaptureSession {
    interface: String,
    capture: Capture<Active>,
}

impl CaptureSession {
    /// Open `interface` in promiscuous mode and install `filter`.
    ///
    /// The read timeout is zero: pulling a frame blocks until one arrives,
    /// so an idle daemon burns no CPU waiting.
    pub fn open(interface: &str, filter: &str) -> Result<Self, CaptureError> {
        let mut capture = Capture::from_device(interface)
            .and_then(|c| c.promisc(true).snaplen(SNAPLEN).timeout(0).open())
            .map_err(|source| CaptureError::InterfaceOpen {
                interface: interface.to_string(),
                source,
            })?;

        capture
            .filter(filter, true)
            .map_err(|source| CaptureError::FilterInstall {
                filter: filter.to_string(),
                source,
            })?;

        debug!(interface = %interface, "Capture session open");
        Ok(Self {
            interface: interface.to_string(),
            capture,
        })
    }

    pub fn interface(&self) -> &str {
        &self.interface
    }

    /// Blocking, unbounded iterator over captured frames.
    ///
    /// Non-restartable: the iterator ends only when the underlying handle is
    /// closed or reports a terminal error.
    pub fn frames(&mut self) -> Frames<'_> {
        Frames { session: self }
    }
}

/// Iterator handed out by [`CaptureSession::frames`].
pub struct Frames<'a> {
    session: &'a mut CaptureSession,
}

impl Iterator for Frames<'_> {
    type Item = CaptureFrame;

    fn next(&mut self) -> Option<CaptureFrame> {
        loop {
            match self.session.capture.next_packet() {
                Ok(packet) => {
                    return Some(CaptureFrame {
                        data: packet.data.to_vec(),
                    })
                }
                // A read-timeout tick carries no frame; keep waiting.
                Err(pcap::Error::TimeoutExpired) => continue,
                Err(e) => {
                    warn!(
                        interface = %self.session.interface,
                        error = %e,
                        "Capture session ended"
                    );
                    return None;
                }
            }
        }
    }
}
