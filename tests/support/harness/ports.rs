// ABOUTME: Process-wide host port reservation for parallel cases.
// ABOUTME: Probes candidates by binding 127.0.0.1 and records reservations until released.

use parking_lot::Mutex;
use std::collections::HashSet;
use std::net::{Ipv4Addr, TcpListener};
use std::ops::Range;
use std::sync::LazyLock;
use thiserror::Error;

pub const DEFAULT_RANGE: Range<u16> = 30000..40000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PortError {
    #[error("no free port left in {start}..{end}")]
    Exhausted { start: u16, end: u16 },

    #[error("port {0} is already in use")]
    InUse(u16),
}

pub struct PortRegistry {
    range: Range<u16>,
    reserved: Mutex<HashSet<u16>>,
}

impl PortRegistry {
    pub fn new(range: Range<u16>) -> Self {
        Self {
            range,
            reserved: Mutex::new(HashSet::new()),
        }
    }

    /// Reserve `preferred`, or any free port in the range when it is 0.
    pub fn acquire(&self, preferred: u16) -> Result<u16, PortError> {
        // Held across the test bind so two callers cannot pick the same port.
        let mut reserved = self.reserved.lock();

        if preferred != 0 {
            if reserved.contains(&preferred) || !is_bindable(preferred) {
                return Err(PortError::InUse(preferred));
            }
            reserved.insert(preferred);
            return Ok(preferred);
        }

        let port = self
            .range
            .clone()
            .find(|p| !reserved.contains(p) && is_bindable(*p))
            .ok_or(PortError::Exhausted {
                start: self.range.start,
                end: self.range.end,
            })?;
        reserved.insert(port);
        tracing::debug!(port, "reserved host port");
        Ok(port)
    }

    pub fn release(&self, port: u16) {
        self.reserved.lock().remove(&port);
    }

    pub fn is_reserved(&self, port: u16) -> bool {
        self.reserved.lock().contains(&port)
    }
}

fn is_bindable(port: u16) -> bool {
    TcpListener::bind((Ipv4Addr::LOCALHOST, port)).is_ok()
}

static GLOBAL: LazyLock<PortRegistry> = LazyLock::new(|| PortRegistry::new(DEFAULT_RANGE));

pub fn acquire(preferred: u16) -> Result<u16, PortError> {
    GLOBAL.acquire(preferred)
}

pub fn release(port: u16) {
    GLOBAL.release(port);
}
