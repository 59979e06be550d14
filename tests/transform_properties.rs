//! End-to-end properties of the background removal transform
//!
//! These tests exercise the public API the way library consumers do: build
//! images in memory, run the transform, and assert on the output pixels.

use bgstrip::{
    recolor, remove_background_from_bytes, remove_background_from_file,
    remove_background_from_image, sample_background, BackgroundRemovalProcessor, BgStripError,
    OutputFormat, ReachabilityMask, RemovalConfig,
};
use image::{DynamicImage, Rgba, RgbaImage};

fn rgba_image(width: u32, height: u32, color: Rgba<u8>) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, color))
}

#[test]
fn output_dimensions_equal_input_dimensions() {
    let config = RemovalConfig::default();
    for (width, height) in [(1, 1), (2, 7), (64, 64), (33, 17)] {
        let image = rgba_image(width, height, Rgba([128, 128, 128, 255]));
        let result = remove_background_from_image(&image, &config).unwrap();
        assert_eq!(result.dimensions(), (width, height));
    }
}

#[test]
fn uniform_image_sampled_color_is_exact() {
    let color = Rgba([17, 93, 201, 255]);
    let image = RgbaImage::from_pixel(9, 6, color);
    assert_eq!(sample_background(&image).unwrap(), color);
}

#[test]
fn non_uniform_top_row_uses_truncated_mean() {
    // 2-wide row of two distinct known colors; expect exact truncated means.
    let mut image = RgbaImage::new(2, 2);
    image.put_pixel(0, 0, Rgba([100, 7, 255, 255]));
    image.put_pixel(1, 0, Rgba([101, 8, 0, 255]));
    image.put_pixel(0, 1, Rgba([0, 0, 0, 255]));
    image.put_pixel(1, 1, Rgba([0, 0, 0, 255]));

    // (100+101)/2=100, (7+8)/2=7, (255+0)/2=127
    assert_eq!(
        sample_background(&image).unwrap(),
        Rgba([100, 7, 127, 255])
    );
}

#[test]
fn all_background_image_becomes_fully_transparent() {
    let color = Rgba([200, 150, 100, 255]);
    let result =
        remove_background_from_image(&rgba_image(8, 5, color), &RemovalConfig::default()).unwrap();

    let rgba = result.image.to_rgba8();
    for pixel in rgba.pixels() {
        assert_eq!(*pixel, Rgba([255, 255, 255, 0]));
    }

    let stats = result.statistics();
    assert_eq!(stats.transparent_pixels, 40);
    assert_eq!(stats.opaque_pixels, 0);
}

#[test]
fn single_foreground_pixel_keeps_original_rgba() {
    let background = Rgba([50, 50, 50, 255]);
    let foreground = Rgba([10, 220, 35, 255]);
    let mut buffer = RgbaImage::from_pixel(7, 7, background);
    buffer.put_pixel(3, 4, foreground);

    let result = remove_background_from_image(
        &DynamicImage::ImageRgba8(buffer),
        &RemovalConfig::default(),
    )
    .unwrap();

    let rgba = result.image.to_rgba8();
    for (x, y, pixel) in rgba.enumerate_pixels() {
        if (x, y) == (3, 4) {
            assert_eq!(*pixel, foreground);
        } else {
            assert_eq!(*pixel, Rgba([255, 255, 255, 0]));
        }
    }
}

#[test]
fn mask_is_uniformly_true_after_fill() {
    // Regression pin for the carried-over fill semantics: nothing gates the
    // fill, so every cell of the padded canvas is reached.
    for (width, height) in [(1, 1), (3, 9), (40, 25)] {
        let mask = ReachabilityMask::flood_filled(width, height);
        let (mask_width, mask_height) = mask.dimensions();
        assert_eq!((mask_width, mask_height), (width + 2, height + 2));
        for y in 0..mask_height {
            for x in 0..mask_width {
                assert!(mask.get(x, y));
            }
        }
    }
}

#[test]
fn transform_is_not_idempotent_in_general() {
    // After one pass the top row of a cleared image is transparent white;
    // rerunning the whole transform on the output samples white as the new
    // background and clears the formerly-foreground white pixels too.
    let background = Rgba([0, 0, 0, 255]);
    let white = Rgba([255, 255, 255, 255]);
    let mut buffer = RgbaImage::from_pixel(3, 3, background);
    buffer.put_pixel(1, 1, white);

    let config = RemovalConfig::default();
    let once = remove_background_from_image(&DynamicImage::ImageRgba8(buffer), &config).unwrap();
    let once_rgba = once.image.to_rgba8();
    assert_eq!(*once_rgba.get_pixel(1, 1), white);

    let twice = remove_background_from_image(&once.image, &config).unwrap();
    let twice_rgba = twice.image.to_rgba8();
    assert_eq!(*twice_rgba.get_pixel(1, 1), Rgba([255, 255, 255, 0]));
}

#[test]
fn recolor_pass_alone_is_idempotent() {
    let background = Rgba([33, 44, 55, 255]);
    let mut buffer = RgbaImage::from_pixel(6, 6, background);
    buffer.put_pixel(2, 3, Rgba([1, 2, 3, 255]));
    buffer.put_pixel(5, 5, Rgba([250, 250, 250, 255]));

    let sampled = sample_background(&buffer).unwrap();
    let mask = ReachabilityMask::flood_filled(6, 6);

    let once = recolor(&buffer, sampled, &mask);
    let twice = recolor(&once, sampled, &mask);
    assert_eq!(once, twice);
}

#[test]
fn zero_area_image_fails_with_invalid_image() {
    let config = RemovalConfig::default();
    for (width, height) in [(0, 0), (0, 5), (5, 0)] {
        let image = DynamicImage::ImageRgba8(RgbaImage::new(width, height));
        let err = remove_background_from_image(&image, &config).unwrap_err();
        assert!(
            matches!(err, BgStripError::InvalidImage(_)),
            "expected InvalidImage for {}x{}",
            width,
            height
        );
    }
}

#[test]
fn undecodable_bytes_fail_with_unsupported_format() {
    let err = remove_background_from_bytes(b"definitely not an image", &RemovalConfig::default())
        .unwrap_err();
    assert!(matches!(err, BgStripError::UnsupportedFormat(_)));
}

#[test]
fn bytes_round_trip_through_png() {
    let background = Rgba([90, 90, 90, 255]);
    let mut buffer = RgbaImage::from_pixel(4, 4, background);
    buffer.put_pixel(2, 2, Rgba([200, 0, 0, 255]));

    let mut png_bytes = Vec::new();
    DynamicImage::ImageRgba8(buffer)
        .write_to(
            &mut std::io::Cursor::new(&mut png_bytes),
            image::ImageFormat::Png,
        )
        .unwrap();

    let result = remove_background_from_bytes(&png_bytes, &RemovalConfig::default()).unwrap();
    let output_bytes = result.to_bytes(OutputFormat::Png, 100).unwrap();

    // PNG keeps the alpha channel; the decoded output must show the cleared
    // background and the surviving foreground pixel.
    let decoded = image::load_from_memory(&output_bytes).unwrap().to_rgba8();
    assert_eq!(*decoded.get_pixel(0, 0), Rgba([255, 255, 255, 0]));
    assert_eq!(*decoded.get_pixel(2, 2), Rgba([200, 0, 0, 255]));
}

#[test]
fn file_round_trip_preserves_transparency() {
    let temp_dir = tempfile::tempdir().unwrap();
    let input_path = temp_dir.path().join("input.png");
    let output_path = temp_dir.path().join("output.png");

    let background = Rgba([123, 231, 132, 255]);
    let mut buffer = RgbaImage::from_pixel(10, 10, background);
    buffer.put_pixel(5, 5, Rgba([0, 0, 0, 255]));
    buffer.save(&input_path).unwrap();

    let result = remove_background_from_file(&input_path, &RemovalConfig::default()).unwrap();
    assert_eq!(result.input_path.as_deref(), Some(input_path.to_str().unwrap()));
    result.save_png(&output_path).unwrap();

    let reloaded = image::open(&output_path).unwrap().to_rgba8();
    assert_eq!(*reloaded.get_pixel(0, 0), Rgba([255, 255, 255, 0]));
    assert_eq!(*reloaded.get_pixel(5, 5), Rgba([0, 0, 0, 255]));
}

#[test]
fn jpeg_input_is_supported() {
    // JPEG decoding may shift pixel values; use a uniform image so the top
    // row mean still matches every pixel exactly after decode.
    let buffer = image::RgbImage::from_pixel(16, 16, image::Rgb([255, 255, 255]));
    let mut jpeg_bytes = Vec::new();
    DynamicImage::ImageRgb8(buffer)
        .write_to(
            &mut std::io::Cursor::new(&mut jpeg_bytes),
            image::ImageFormat::Jpeg,
        )
        .unwrap();

    let result = remove_background_from_bytes(&jpeg_bytes, &RemovalConfig::default()).unwrap();
    assert_eq!(result.dimensions(), (16, 16));
}

#[test]
fn processor_can_be_reused_across_images() {
    let processor = BackgroundRemovalProcessor::new(RemovalConfig::default()).unwrap();

    let first = processor
        .process_image(&rgba_image(3, 3, Rgba([1, 1, 1, 255])))
        .unwrap();
    let second = processor
        .process_image(&rgba_image(5, 2, Rgba([2, 2, 2, 255])))
        .unwrap();

    assert_eq!(first.dimensions(), (3, 3));
    assert_eq!(second.dimensions(), (5, 2));
}

#[test]
fn timings_are_recorded() {
    let result = remove_background_from_image(
        &rgba_image(32, 32, Rgba([5, 5, 5, 255])),
        &RemovalConfig::default(),
    )
    .unwrap();

    let timings = result.timings();
    // Individual stages may round to 0ms on fast machines; the totals must
    // still be internally consistent.
    assert!(timings.total_ms >= timings.other_overhead_ms());
    assert_eq!(timings.image_encode_ms, None);
}
