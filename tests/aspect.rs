use image::{Rgba, RgbaImage};
use refract::{
    cover_region, crop, Bitmap, CancelToken, CroppedFrame, FrameLoop, FrameTarget, FrameUniforms,
    InputState, Result, Tick, Viewport,
};

fn checker(width: u32, height: u32) -> Bitmap {
    let pixels = RgbaImage::from_fn(width, height, |x, y| {
        let v = if (x / 3 + y / 3) % 2 == 0 { 230 } else { 20 };
        Rgba([v, (x % 256) as u8, (y % 256) as u8, 255])
    });
    Bitmap::new(pixels).unwrap()
}

#[test]
fn every_target_size_is_filled_exactly() {
    let sources = [(1, 1), (640, 480), (480, 640), (97, 13), (13, 97)];
    let targets = [(1, 1), (1920, 1080), (1080, 1920), (7, 300), (300, 7)];
    for &(sw, sh) in &sources {
        let bitmap = checker(sw, sh);
        for &(tw, th) in &targets {
            let frame = crop(&bitmap, Viewport::new(tw, th).unwrap(), 0.0);
            assert_eq!((frame.width(), frame.height()), (tw, th), "source {sw}x{sh}");
        }
    }
}

#[test]
fn wider_sources_keep_full_height_and_center_horizontally() {
    for &(sw, sh, tw, th) in &[(1920u32, 1080u32, 800u32, 600u32), (500, 100, 3, 2), (1000, 10, 1, 1)] {
        let region = cover_region(sw, sh, Viewport::new(tw, th).unwrap());
        let expected_width = f64::from(sh) * f64::from(tw) / f64::from(th);
        assert_eq!(region.height, f64::from(sh));
        assert_eq!(region.y, 0.0);
        assert!((region.width - expected_width).abs() < 1e-9);
        assert!((region.x - (f64::from(sw) - expected_width) / 2.0).abs() < 1e-9);
    }
}

#[test]
fn taller_or_equal_sources_keep_full_width_and_center_vertically() {
    for &(sw, sh, tw, th) in &[(1080u32, 1920u32, 800u32, 600u32), (100, 500, 2, 3), (16, 9, 32, 18)] {
        let region = cover_region(sw, sh, Viewport::new(tw, th).unwrap());
        let expected_height = f64::from(sw) * f64::from(th) / f64::from(tw);
        assert_eq!(region.width, f64::from(sw));
        assert_eq!(region.x, 0.0);
        assert!((region.height - expected_height).abs() < 1e-9);
        assert!((region.y - (f64::from(sh) - expected_height) / 2.0).abs() < 1e-9);
    }
}

#[test]
fn sharp_crop_is_repeatable() {
    let bitmap = checker(333, 222);
    let target = Viewport::new(160, 90).unwrap();
    assert_eq!(crop(&bitmap, target, 0.0), crop(&bitmap, target, 0.0));
}

#[derive(Default)]
struct Recorder {
    uploads: Vec<CroppedFrame>,
    uniforms: Vec<FrameUniforms>,
    draws: usize,
}

impl FrameTarget for Recorder {
    fn upload_offsets(&mut self, frame: &CroppedFrame) -> Result<()> {
        self.uploads.push(frame.clone());
        Ok(())
    }

    fn write_uniforms(&mut self, uniforms: &FrameUniforms) -> Result<()> {
        self.uniforms.push(*uniforms);
        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        self.draws += 1;
        Ok(())
    }
}

#[test]
fn square_image_on_wide_viewport_starts_sharp() {
    let image = checker(120, 120);
    let offsets = checker(120, 120);
    let viewport = Viewport::new(160, 90).unwrap();

    // Square source on a 16:9 target crops vertically.
    let region = cover_region(image.width(), image.height(), viewport);
    assert_eq!(region.width, 120.0);
    assert_eq!(region.height, 67.5);
    assert_eq!(region.y, 26.25);

    let primary = crop(&image, viewport, 0.0);

    let input = InputState::new();
    let mut frames = FrameLoop::new(offsets, viewport, CancelToken::new());
    frames.start(0.0);
    let mut target = Recorder::default();
    let tick = frames.tick(16.0, input.snapshot(), &mut target).unwrap();

    assert_eq!(tick, Tick::Continue);
    assert_eq!(target.uploads.len(), 1);
    assert_eq!(target.uploads[0], primary);
    assert_ne!(target.uploads[0].as_bytes().as_ptr(), primary.as_bytes().as_ptr());
    assert_eq!(target.uniforms[0].wheel, [0.0, 0.0]);
    assert_eq!(target.draws, 1);
}

#[test]
fn wheel_events_between_frames_reach_the_next_frame() {
    let viewport = Viewport::new(40, 30).unwrap();
    let mut input = InputState::new();
    let mut frames = FrameLoop::new(checker(80, 60), viewport, CancelToken::new());
    frames.start(0.0);
    let mut target = Recorder::default();

    frames.tick(16.0, input.snapshot(), &mut target).unwrap();
    input.wheel(3.0, -2.0);
    input.wheel(1.0, 5.0);
    input.pointer_moved(40.0, 0.0, viewport);
    frames.tick(32.0, input.snapshot(), &mut target).unwrap();

    let second = target.uniforms[1];
    assert_eq!(second.wheel, [4.0, 3.0]);
    assert_eq!(second.mouse, [1.0, 1.0]);
    assert_eq!(second.time, 32.0);
    assert_eq!(target.uploads[1], crop(&checker(80, 60), viewport, 4.0));
}
