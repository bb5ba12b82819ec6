//! QL-series raster protocol command builders.
//!
//! Escape prefix: 0x1B 0x69 ('ESC i'). Raster data lines use the
//! 'g' opcode with a fixed 90-byte payload (720 pins, MSB first).

use crate::{HEAD_PINS, TAPE_62_OFFSET};

/// Bytes per raster line (720 pins / 8).
pub const RASTER_LINE_BYTES: usize = 90;

const ESC: u8 = 0x1b;

// -- Command opcodes --
const CMD_INITIALIZE: u8 = 0x40; // ESC @
const CMD_STATUS_REQUEST: u8 = 0x53; // ESC i S
const CMD_SWITCH_MODE: u8 = 0x61; // ESC i a
const CMD_PRINT_INFO: u8 = 0x7a; // ESC i z
const CMD_AUTOCUT: u8 = 0x4d; // ESC i M
const CMD_CUT_EVERY: u8 = 0x41; // ESC i A
const CMD_EXPANDED_MODE: u8 = 0x4b; // ESC i K
const CMD_FEED_MARGIN: u8 = 0x64; // ESC i d
const CMD_COMPRESSION: u8 = 0x4d; // M (no ESC i prefix)
const CMD_RASTER_LINE: u8 = 0x67; // g
const CMD_PRINT_PAGE: u8 = 0x0c; // FF
const CMD_PRINT_LAST_PAGE: u8 = 0x1a; // EOF

// Print information flags.
const PI_RECOVER: u8 = 0x80;
const PI_KIND: u8 = 0x02;
const PI_WIDTH: u8 = 0x04;
const PI_QUALITY: u8 = 0x40;

/// Media type byte for continuous tape.
const MEDIA_CONTINUOUS: u8 = 0x0a;

/// Feed margin in dots for continuous tape.
const CONTINUOUS_FEED_MARGIN: u16 = 35;

/// Per-job print options.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
    /// Cut the tape after the page.
    pub cut: bool,
    /// High-quality (slower) printing.
    pub hq: bool,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self { cut: true, hq: true }
    }
}

/// 200 zero bytes; clears any partially received command.
pub fn invalidate() -> Vec<u8> {
    vec![0u8; 200]
}

/// ESC @: reset the printer to raster defaults.
pub fn initialize() -> Vec<u8> {
    vec![ESC, CMD_INITIALIZE]
}

/// ESC i S: request a status report.
pub fn status_request() -> Vec<u8> {
    vec![ESC, 0x69, CMD_STATUS_REQUEST]
}

/// ESC i a 1: switch to raster command mode.
pub fn switch_to_raster_mode() -> Vec<u8> {
    vec![ESC, 0x69, CMD_SWITCH_MODE, 0x01]
}

/// ESC i z: print information: media kind, tape width, raster line count.
pub fn print_information(width_mm: u8, raster_lines: u32, hq: bool, first_page: bool) -> Vec<u8> {
    let mut flags = PI_RECOVER | PI_KIND | PI_WIDTH;
    if hq {
        flags |= PI_QUALITY;
    }
    let mut cmd = vec![ESC, 0x69, CMD_PRINT_INFO, flags, MEDIA_CONTINUOUS, width_mm, 0x00];
    cmd.extend_from_slice(&raster_lines.to_le_bytes());
    cmd.push(if first_page { 0x00 } else { 0x01 });
    cmd.push(0x00);
    cmd
}

/// ESC i M: enable or disable the auto-cutter.
pub fn autocut(enabled: bool) -> Vec<u8> {
    vec![ESC, 0x69, CMD_AUTOCUT, if enabled { 0x40 } else { 0x00 }]
}

/// ESC i A: cut after every n pages.
pub fn cut_every(pages: u8) -> Vec<u8> {
    vec![ESC, 0x69, CMD_CUT_EVERY, pages]
}

/// ESC i K: expanded mode; bit 3 cuts at the end of the job.
pub fn expanded_mode(cut_at_end: bool) -> Vec<u8> {
    vec![ESC, 0x69, CMD_EXPANDED_MODE, if cut_at_end { 0x08 } else { 0x00 }]
}

/// ESC i d: feed margin in dots (2 bytes LE).
pub fn feed_margin(dots: u16) -> Vec<u8> {
    let mut cmd = vec![ESC, 0x69, CMD_FEED_MARGIN];
    cmd.extend_from_slice(&dots.to_le_bytes());
    cmd
}

/// M 0: disable TIFF compression (raster lines sent uncompressed).
pub fn no_compression() -> Vec<u8> {
    vec![CMD_COMPRESSION, 0x00]
}

/// FF or EOF: end the current page; EOF feeds and finishes the job.
pub fn end_page(last: bool) -> Vec<u8> {
    vec![if last { CMD_PRINT_LAST_PAGE } else { CMD_PRINT_PAGE }]
}

/// Everything sent before the raster data of a page.
pub fn page_preamble(
    width_mm: u8,
    raster_lines: u32,
    opts: &PrintOptions,
    first_page: bool,
) -> Vec<u8> {
    let mut out = Vec::new();
    if first_page {
        out.extend(invalidate());
        out.extend(initialize());
        out.extend(status_request());
    }
    out.extend(switch_to_raster_mode());
    out.extend(print_information(width_mm, raster_lines, opts.hq, first_page));
    out.extend(autocut(opts.cut));
    if opts.cut {
        out.extend(cut_every(1));
    }
    out.extend(expanded_mode(opts.cut));
    out.extend(feed_margin(CONTINUOUS_FEED_MARGIN));
    out.extend(no_compression());
    out
}

/// Pack one monochrome pixel row (0=white, 1=black, left to right) into
/// a raster line command. Pixels map onto pins starting at the 62mm
/// tape offset; bit 7 of byte 0 is the leftmost pin.
pub fn encode_row(row: &[u8]) -> Vec<u8> {
    let mut payload = [0u8; RASTER_LINE_BYTES];
    for (x, &px) in row.iter().enumerate() {
        if px == 0 {
            continue;
        }
        let pin = x as u32 + TAPE_62_OFFSET;
        if pin >= HEAD_PINS {
            break;
        }
        payload[(pin / 8) as usize] |= 0x80 >> (pin % 8);
    }

    let mut cmd = Vec::with_capacity(3 + RASTER_LINE_BYTES);
    cmd.push(CMD_RASTER_LINE);
    cmd.push(0x00);
    cmd.push(RASTER_LINE_BYTES as u8);
    cmd.extend_from_slice(&payload);
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalidate_is_200_zeros() {
        let cmd = invalidate();
        assert_eq!(cmd.len(), 200);
        assert!(cmd.iter().all(|&b| b == 0));
    }

    #[test]
    fn initialize_is_esc_at() {
        assert_eq!(initialize(), vec![0x1b, 0x40]);
    }

    #[test]
    fn print_information_structure() {
        let cmd = print_information(62, 0x0102_0304, true, true);
        assert_eq!(&cmd[..3], &[0x1b, 0x69, 0x7a]);
        assert_eq!(cmd[3], 0x80 | 0x02 | 0x04 | 0x40); // flags with quality
        assert_eq!(cmd[4], 0x0a); // continuous media
        assert_eq!(cmd[5], 62); // tape width in mm
        assert_eq!(cmd[6], 0x00); // length (continuous)
        assert_eq!(&cmd[7..11], &[0x04, 0x03, 0x02, 0x01]); // raster lines LE
        assert_eq!(cmd[11], 0x00); // first page
    }

    #[test]
    fn autocut_toggles_flag_byte() {
        assert_eq!(autocut(true)[3], 0x40);
        assert_eq!(autocut(false)[3], 0x00);
    }

    #[test]
    fn feed_margin_little_endian() {
        let cmd = feed_margin(35);
        assert_eq!(&cmd[3..], &[35, 0]);
    }

    #[test]
    fn encode_row_has_fixed_length() {
        let row = vec![0u8; 696];
        let cmd = encode_row(&row);
        assert_eq!(cmd.len(), 3 + RASTER_LINE_BYTES);
        assert_eq!(&cmd[..3], &[0x67, 0x00, 90]);
        assert!(cmd[3..].iter().all(|&b| b == 0));
    }

    #[test]
    fn encode_row_maps_first_pixel_past_offset() {
        let mut row = vec![0u8; 696];
        row[0] = 1;
        let cmd = encode_row(&row);
        // Pin 12 lands in byte 1, four bits down from the MSB.
        assert_eq!(cmd[3 + 1], 0x80 >> 4);
    }

    #[test]
    fn encode_row_all_black_sets_printable_span() {
        let row = vec![1u8; 696];
        let cmd = encode_row(&row);
        let payload = &cmd[3..];
        let set_bits: u32 = payload.iter().map(|b| b.count_ones()).sum();
        assert_eq!(set_bits, 696);
    }

    #[test]
    fn page_end_bytes() {
        assert_eq!(end_page(false), vec![0x0c]);
        assert_eq!(end_page(true), vec![0x1a]);
    }

    #[test]
    fn first_page_preamble_starts_with_invalidate() {
        let opts = PrintOptions::default();
        let pre = page_preamble(62, 271, &opts, true);
        assert!(pre.len() > 200);
        assert!(pre[..200].iter().all(|&b| b == 0));
        assert_eq!(&pre[200..202], &[0x1b, 0x40]);
    }

    #[test]
    fn later_page_preamble_skips_invalidate() {
        let opts = PrintOptions::default();
        let pre = page_preamble(62, 271, &opts, false);
        assert_eq!(&pre[..4], &[0x1b, 0x69, 0x61, 0x01]);
    }
}
