//! Image output: PNG with gamma mapping, EXR for linear HDR, and live
//! preview over the TEV network protocol.
//!
//! The renderer hands over a linear f32 buffer; each sink applies its own
//! transfer. PNG gets the gamma-2 (square root) display mapping, EXR keeps
//! the linear values untouched for post-processing.

use std::net::TcpStream;

use exr::prelude::write_rgb_file;
use image::{ImageBuffer, Rgb};
use log::{debug, info, warn};
use tev_client::{PacketCreateImage, PacketUpdateImage, TevClient};

use lumenpath::interval::Interval;

/// Linear HDR render output, row 0 first.
pub type RenderImage = ImageBuffer<Rgb<f32>, Vec<f32>>;

/// Gamma-2 transfer for display: clamp negative radiance, then square root.
fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Map one linear channel value to an 8-bit display value.
fn to_display_byte(linear: f32) -> u8 {
    const INTENSITY: Interval = Interval { min: 0.0, max: 0.999 };
    (256.0 * INTENSITY.clamp(linear_to_gamma(linear))) as u8
}

/// Save a linear f32 image as an 8-bit PNG with gamma-2 mapping.
///
/// I/O errors are logged as warnings; rendering output must never abort the
/// program after the render itself has finished.
pub fn save_image_as_png(image: &RenderImage, output_path: &str) {
    let u8_image: ImageBuffer<Rgb<u8>, Vec<u8>> =
        ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
            let pixel = image.get_pixel(x, y);
            Rgb([
                to_display_byte(pixel[0]),
                to_display_byte(pixel[1]),
                to_display_byte(pixel[2]),
            ])
        });

    match u8_image.save(output_path) {
        Ok(_) => info!("Image saved as {}", output_path),
        Err(e) => warn!("Failed to save image: {}", e),
    }
}

/// Save a linear f32 image as EXR with full HDR precision, no gamma applied.
pub fn save_image_as_exr(image: &RenderImage, output_path: &str) {
    let result = write_rgb_file(
        output_path,
        image.width() as usize,
        image.height() as usize,
        |x, y| {
            let pixel = image.get_pixel(x as u32, y as u32);
            (pixel[0], pixel[1], pixel[2])
        },
    );

    match result {
        Ok(_) => info!("HDR image saved as EXR: {}", output_path),
        Err(e) => warn!("Failed to save EXR image: {}", e),
    }
}

/// Send a linear f32 image to a TEV viewer for display.
///
/// TEV expects planar channel data, so the interleaved buffer is rearranged
/// before transmission. Connection or protocol failures are logged and
/// otherwise ignored.
pub fn send_image_to_tev(image: &RenderImage, tev_address: &str) {
    // Add default port if not specified
    let tev_address = if tev_address.contains(':') {
        tev_address.to_string()
    } else {
        format!("{}:14158", tev_address)
    };

    let stream = match TcpStream::connect(&tev_address) {
        Ok(stream) => stream,
        Err(e) => {
            warn!("Failed to connect to TEV on {}: {}", tev_address, e);
            return;
        }
    };
    if let Err(e) = stream.set_nodelay(true) {
        debug!("Failed to set TCP_NODELAY: {}", e);
    }

    let mut client = TevClient::wrap(stream);
    let (width, height) = (image.width(), image.height());

    let create_packet = PacketCreateImage {
        image_name: "lumenpath_output",
        width,
        height,
        channel_names: &["R", "G", "B"],
        grab_focus: true,
    };
    if let Err(e) = client.send(create_packet) {
        warn!("Failed to create image in TEV: {}", e);
        return;
    }

    // Interleaved RGBRGB... to planar RRR...GGG...BBB...
    let pixel_count = (width * height) as usize;
    let mut planar = Vec::with_capacity(pixel_count * 3);
    for channel in 0..3usize {
        planar.extend(image.pixels().map(|pixel| pixel[channel]));
    }

    let update_packet = PacketUpdateImage {
        image_name: "lumenpath_output",
        grab_focus: false,
        channel_names: &["R", "G", "B"],
        x: 0,
        y: 0,
        width,
        height,
        channel_offsets: &[0, pixel_count as u64, 2 * pixel_count as u64],
        channel_strides: &[1, 1, 1],
        data: &planar,
    };
    match client.send(update_packet) {
        Ok(_) => info!("Image sent to TEV at {}", tev_address),
        Err(e) => warn!("Failed to send image data to TEV: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mapping_is_gamma_2_and_clamped() {
        assert_eq!(to_display_byte(0.0), 0);
        assert_eq!(to_display_byte(-1.0), 0);
        // sqrt(0.25) = 0.5 -> 128
        assert_eq!(to_display_byte(0.25), 128);
        // HDR values saturate at the top of the 8-bit range.
        assert_eq!(to_display_byte(9.0), 255);
        assert_eq!(to_display_byte(1.0), 255);
    }
}
