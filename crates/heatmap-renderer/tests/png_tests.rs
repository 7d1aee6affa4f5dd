//! Tests for PNG encoding of heatmap buffers.
//!
//! Chunks are parsed back out of the encoded bytes so that headers, CRCs and
//! the decompressed scanlines can be checked directly.

use std::io::Read;

use heatmap_common::HeatmapError;
use heatmap_renderer::png::{create_png, create_png_auto, create_png_indexed, create_png_rgba16};

// ============================================================================
// Helper functions
// ============================================================================

struct Chunk {
    kind: [u8; 4],
    data: Vec<u8>,
}

/// Split an encoded PNG into chunks, verifying every CRC on the way.
fn parse_chunks(png: &[u8]) -> Vec<Chunk> {
    assert_eq!(&png[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
    let mut chunks = Vec::new();
    let mut pos = 8;
    while pos < png.len() {
        let len = u32::from_be_bytes(png[pos..pos + 4].try_into().unwrap()) as usize;
        let kind: [u8; 4] = png[pos + 4..pos + 8].try_into().unwrap();
        let data = png[pos + 8..pos + 8 + len].to_vec();
        let crc = u32::from_be_bytes(png[pos + 8 + len..pos + 12 + len].try_into().unwrap());
        assert_eq!(crc, crc32fast::hash(&png[pos + 4..pos + 8 + len]), "bad CRC");
        chunks.push(Chunk { kind, data });
        pos += 12 + len;
    }
    chunks
}

fn find<'a>(chunks: &'a [Chunk], kind: &[u8; 4]) -> Option<&'a Chunk> {
    chunks.iter().find(|c| &c.kind == kind)
}

fn inflate(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    flate2::read::ZlibDecoder::new(data)
        .read_to_end(&mut out)
        .unwrap();
    out
}

/// A heatmap-like image: a few legend colors on a transparent background.
fn legend_pixels(width: usize, height: usize) -> Vec<u8> {
    let colors = [[0, 0, 0, 0], [50, 52, 144, 255], [0, 158, 84, 128], [235, 46, 46, 255]];
    (0..width * height)
        .flat_map(|i| colors[(i / 7) % colors.len()])
        .collect()
}

// ============================================================================
// Auto selection
// ============================================================================

#[test]
fn test_auto_uses_palette_for_legend_colors() {
    let pixels = legend_pixels(16, 16);
    let png = create_png_auto(&pixels, 16, 16).unwrap();
    let chunks = parse_chunks(&png);

    let ihdr = find(&chunks, b"IHDR").unwrap();
    assert_eq!(ihdr.data[8], 8);
    assert_eq!(ihdr.data[9], 3); // indexed

    assert_eq!(find(&chunks, b"PLTE").unwrap().data.len(), 4 * 3);
    let trns = find(&chunks, b"tRNS").unwrap();
    assert!(trns.data.contains(&0));
    assert!(trns.data.contains(&128));
    assert_eq!(&chunks.last().unwrap().kind, b"IEND");
}

#[test]
fn test_auto_palette_for_large_image() {
    // big enough for the parallel extraction path
    let pixels = legend_pixels(128, 128);
    let png = create_png_auto(&pixels, 128, 128).unwrap();
    let chunks = parse_chunks(&png);
    assert_eq!(find(&chunks, b"IHDR").unwrap().data[9], 3);

    let raw = inflate(&find(&chunks, b"IDAT").unwrap().data);
    assert_eq!(raw.len(), 128 * (1 + 128));
}

#[test]
fn test_auto_falls_back_to_rgba() {
    let pixels: Vec<u8> = (0..300u32)
        .flat_map(|i| [(i % 256) as u8, (i / 256) as u8, 7, 255])
        .collect();
    let png = create_png_auto(&pixels, 300, 1).unwrap();
    let chunks = parse_chunks(&png);

    assert_eq!(find(&chunks, b"IHDR").unwrap().data[9], 6);
    assert!(find(&chunks, b"PLTE").is_none());
}

#[test]
fn test_opaque_palette_has_no_trns() {
    let pixels = [255, 0, 0, 255, 0, 255, 0, 255];
    let png = create_png_auto(&pixels, 2, 1).unwrap();
    assert!(find(&parse_chunks(&png), b"tRNS").is_none());
}

// ============================================================================
// Scanline content
// ============================================================================

#[test]
fn test_rgba8_scanlines() {
    let pixels = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16];
    let png = create_png(&pixels, 2, 2).unwrap();
    let chunks = parse_chunks(&png);

    let ihdr = &find(&chunks, b"IHDR").unwrap().data;
    assert_eq!(u32::from_be_bytes(ihdr[0..4].try_into().unwrap()), 2);
    assert_eq!(u32::from_be_bytes(ihdr[4..8].try_into().unwrap()), 2);

    let raw = inflate(&find(&chunks, b"IDAT").unwrap().data);
    assert_eq!(
        raw,
        vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 0, 9, 10, 11, 12, 13, 14, 15, 16]
    );
}

#[test]
fn test_rgba16_rescales_channels() {
    let pixels = [0, 1, 128, 255];
    let png = create_png_rgba16(&pixels, 1, 1).unwrap();
    let chunks = parse_chunks(&png);

    let ihdr = &find(&chunks, b"IHDR").unwrap().data;
    assert_eq!(ihdr[8], 16);
    assert_eq!(ihdr[9], 6);

    let raw = inflate(&find(&chunks, b"IDAT").unwrap().data);
    let samples: Vec<u16> = raw[1..]
        .chunks_exact(2)
        .map(|b| u16::from_be_bytes([b[0], b[1]]))
        .collect();
    assert_eq!(samples, vec![0, 257, 128 * 257, 65535]);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_size_mismatch_rejected() {
    let result = create_png(&[0, 0, 0, 0], 2, 2);
    assert!(matches!(result, Err(HeatmapError::EncodingError(_))));
    assert!(create_png_rgba16(&[], 0, 0).is_err());
}

#[test]
fn test_indexed_length_mismatch_rejected() {
    let result = create_png_indexed(2, 2, &[[0, 0, 0, 255]], &[0, 0, 0]);
    assert!(matches!(result, Err(HeatmapError::EncodingError(_))));
}
