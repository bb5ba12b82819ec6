//! Printer discovery and raw byte transport.
//!
//! Three target forms are supported:
//! - `usb://0x04f9:0x2042`, a vendor:product pair, resolved to /dev/usb/lp*
//! - `file:///dev/usb/lp0`, an explicit device node
//! - a bare name, a CUPS queue, spooled raw via `lp`

use std::path::PathBuf;
use std::str::FromStr;

use serde::Serialize;
use tokio::process::Command;
use tracing::{debug, info};

use crate::{BROTHER_VENDOR_ID, QL700_PRODUCT_ID, QlError, Result};

/// A printer discovered on this machine.
#[derive(Debug, Clone, Serialize)]
pub struct DiscoveredPrinter {
    /// Identifier usable as a `--printer` argument.
    pub identifier: String,
    pub name: String,
    pub status: String,
}

/// Parsed printer identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrinterTarget {
    Usb { vendor: u16, product: u16 },
    File(PathBuf),
    Queue(String),
}

impl FromStr for PrinterTarget {
    type Err = QlError;

    fn from_str(s: &str) -> Result<Self> {
        if let Some(rest) = s.strip_prefix("usb://") {
            let spec = rest.split('/').next().unwrap_or(rest);
            let (vendor, product) = spec
                .split_once(':')
                .ok_or_else(|| QlError::InvalidIdentifier(s.to_string()))?;
            let parse_hex = |v: &str| {
                u16::from_str_radix(v.trim_start_matches("0x"), 16)
                    .map_err(|_| QlError::InvalidIdentifier(s.to_string()))
            };
            return Ok(PrinterTarget::Usb {
                vendor: parse_hex(vendor)?,
                product: parse_hex(product)?,
            });
        }
        if let Some(path) = s.strip_prefix("file://") {
            if path.is_empty() {
                return Err(QlError::InvalidIdentifier(s.to_string()));
            }
            return Ok(PrinterTarget::File(PathBuf::from(path)));
        }
        if s.trim().is_empty() {
            return Err(QlError::InvalidIdentifier(s.to_string()));
        }
        Ok(PrinterTarget::Queue(s.to_string()))
    }
}

impl PrinterTarget {
    /// Send a raster command stream to this printer, blocking until the
    /// bytes are handed off to the device or spooler.
    pub async fn send(&self, payload: &[u8]) -> Result<()> {
        match self {
            PrinterTarget::File(path) => {
                debug!(path = %path.display(), bytes = payload.len(), "writing to device node");
                tokio::fs::write(path, payload).await?;
                Ok(())
            }
            PrinterTarget::Usb { vendor, product } => {
                let node = find_usb_device_node(*vendor, *product).await?;
                debug!(node = %node.display(), bytes = payload.len(), "writing to usb printer");
                tokio::fs::write(&node, payload).await?;
                Ok(())
            }
            PrinterTarget::Queue(name) => spool_raw(name, payload).await,
        }
    }
}

/// Resolve a vendor:product pair to a /dev/usb/lp* node via sysfs,
/// falling back to the first present node when sysfs has no IDs.
async fn find_usb_device_node(vendor: u16, product: u16) -> Result<PathBuf> {
    let mut fallback = None;

    for idx in 0..10u32 {
        let node = PathBuf::from(format!("/dev/usb/lp{idx}"));
        if tokio::fs::metadata(&node).await.is_err() {
            continue;
        }
        fallback.get_or_insert_with(|| node.clone());

        let sys = format!("/sys/class/usbmisc/lp{idx}/device/../idVendor");
        let sys_product = format!("/sys/class/usbmisc/lp{idx}/device/../idProduct");
        let (Ok(v), Ok(p)) = (
            tokio::fs::read_to_string(&sys).await,
            tokio::fs::read_to_string(&sys_product).await,
        ) else {
            continue;
        };

        let matches = u16::from_str_radix(v.trim(), 16) == Ok(vendor)
            && u16::from_str_radix(p.trim(), 16) == Ok(product);
        if matches {
            return Ok(node);
        }
    }

    fallback.ok_or_else(|| QlError::DeviceNotFound(format!("usb://{vendor:#06x}:{product:#06x}")))
}

/// Spool raw bytes to a CUPS queue with `lp -d <queue> -o raw`.
async fn spool_raw(queue: &str, payload: &[u8]) -> Result<()> {
    let tmp_dir = std::env::temp_dir().join("ql-labeler-print");
    tokio::fs::create_dir_all(&tmp_dir).await?;
    let tmp_file = tmp_dir.join("current_job.bin");
    tokio::fs::write(&tmp_file, payload).await?;

    let output = Command::new("lp")
        .arg("-d")
        .arg(queue)
        .arg("-o")
        .arg("raw")
        .arg(&tmp_file)
        .output()
        .await
        .map_err(|e| QlError::Spooler(format!("failed to run lp: {e}")))?;

    let _ = tokio::fs::remove_file(&tmp_file).await;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(QlError::Spooler(format!("lp failed: {}", stderr.trim())));
    }

    info!(queue, bytes = payload.len(), "job spooled");
    Ok(())
}

/// Discover printers: Brother USB device nodes plus CUPS queues.
pub async fn discover() -> Vec<DiscoveredPrinter> {
    let mut printers = discover_usb().await;
    printers.extend(discover_cups().await);
    printers
}

async fn discover_usb() -> Vec<DiscoveredPrinter> {
    let mut found = Vec::new();
    for idx in 0..10u32 {
        let node = format!("/dev/usb/lp{idx}");
        if tokio::fs::metadata(&node).await.is_err() {
            continue;
        }
        let vendor = tokio::fs::read_to_string(format!("/sys/class/usbmisc/lp{idx}/device/../idVendor"))
            .await
            .ok()
            .and_then(|v| u16::from_str_radix(v.trim(), 16).ok());
        if vendor == Some(BROTHER_VENDOR_ID) {
            found.push(DiscoveredPrinter {
                identifier: format!("usb://{BROTHER_VENDOR_ID:#06x}:{QL700_PRODUCT_ID:#06x}"),
                name: format!("Brother QL (lp{idx})"),
                status: "present".to_string(),
            });
        }
    }
    found
}

async fn discover_cups() -> Vec<DiscoveredPrinter> {
    let Ok(output) = Command::new("lpstat").arg("-p").output().await else {
        return Vec::new();
    };
    if !output.status.success() {
        return Vec::new();
    }
    parse_lpstat_output(&String::from_utf8_lossy(&output.stdout))
}

fn parse_lpstat_output(stdout: &str) -> Vec<DiscoveredPrinter> {
    let mut printers = Vec::new();

    for line in stdout.lines() {
        let trimmed = line.trim();
        let Some(rest) = trimmed.strip_prefix("printer ") else {
            continue;
        };

        let mut parts = rest.splitn(2, ' ');
        let Some(name) = parts.next() else {
            continue;
        };
        let status = parts
            .next()
            .and_then(|s| s.strip_prefix("is "))
            .map(|s| s.trim().trim_end_matches('.').to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "unknown".to_string());

        printers.push(DiscoveredPrinter {
            identifier: name.to_string(),
            name: name.to_string(),
            status,
        });
    }

    printers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_usb_identifier() {
        let target: PrinterTarget = "usb://0x04f9:0x2042".parse().unwrap();
        assert_eq!(
            target,
            PrinterTarget::Usb {
                vendor: 0x04f9,
                product: 0x2042
            }
        );
    }

    #[test]
    fn parses_usb_identifier_with_serial_suffix() {
        let target: PrinterTarget = "usb://0x04f9:0x2042/000M6Z401370".parse().unwrap();
        assert!(matches!(target, PrinterTarget::Usb { .. }));
    }

    #[test]
    fn parses_file_identifier() {
        let target: PrinterTarget = "file:///dev/usb/lp0".parse().unwrap();
        assert_eq!(target, PrinterTarget::File(PathBuf::from("/dev/usb/lp0")));
    }

    #[test]
    fn bare_name_is_cups_queue() {
        let target: PrinterTarget = "Brother_QL_700".parse().unwrap();
        assert_eq!(target, PrinterTarget::Queue("Brother_QL_700".to_string()));
    }

    #[test]
    fn malformed_usb_identifier_errors() {
        assert!("usb://garbage".parse::<PrinterTarget>().is_err());
        assert!("usb://0xZZZZ:0x2042".parse::<PrinterTarget>().is_err());
        assert!("".parse::<PrinterTarget>().is_err());
    }

    #[test]
    fn parse_lpstat_lines() {
        let input = "printer Brother_QL_700 is idle. enabled since Thu 01 Jan 00:00:00 1970\n\
                     printer Other is disabled. since Thu 01 Jan 00:00:00 1970\n";
        let printers = parse_lpstat_output(input);

        assert_eq!(printers.len(), 2);
        assert_eq!(printers[0].name, "Brother_QL_700");
        assert_eq!(
            printers[0].status,
            "idle. enabled since Thu 01 Jan 00:00:00 1970"
        );
    }

    #[tokio::test]
    async fn file_target_writes_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("printer.bin");
        let target = PrinterTarget::File(path.clone());

        target.send(&[0x1b, 0x40, 0x1a]).await.unwrap();
        let written = tokio::fs::read(&path).await.unwrap();
        assert_eq!(written, vec![0x1b, 0x40, 0x1a]);
    }
}
