//! Demo showing basic voxcloud usage.
//!
//! This demo builds a synthetic head-like phantom (fat shell, fluid, gray and
//! white matter, a bony skull) and prints point counts for a few settings.
//! Run with `RUST_LOG=info` to see the rebuild log.

use voxcloud::*;

const SIZE: u32 = 48;

fn phantom_slices(intercept: f64) -> Vec<Vec<u16>> {
    let center = (SIZE as f32 - 1.0) / 2.0;
    let offset = 32768.0 - intercept;
    (0..SIZE)
        .map(|z| {
            let mut slice = Vec::with_capacity((SIZE * SIZE) as usize);
            for y in 0..SIZE {
                for x in 0..SIZE {
                    let p = Vec3::new(x as f32, y as f32, z as f32) - Vec3::splat(center);
                    let r = p.length() / center;
                    let hu = match r {
                        r if r < 0.35 => 25.0,   // white matter
                        r if r < 0.6 => 40.0,    // gray matter
                        r if r < 0.7 => 5.0,     // fluid
                        r if r < 0.85 => 700.0,  // bone
                        r if r < 0.95 => -100.0, // fat
                        _ => -1000.0,            // air
                    };
                    slice.push((hu + offset) as u16);
                }
            }
            slice
        })
        .collect()
}

fn main() -> Result<()> {
    init_logging();

    let intercept = -1024.0;
    let slices = phantom_slices(intercept);
    let window = Window::from_center_width(40.0, 400.0);
    let grid = volume_from_slices(
        SIZE,
        SIZE,
        slices.iter().map(Vec::as_slice),
        window,
        intercept,
    )?
    .with_spacing(Vec3::new(0.8, 0.8, 1.5))?;

    let mut viewer = Viewer::default();
    viewer.replace_volume(grid);
    println!("binary window: {} points", viewer.points().len());

    viewer.set_category_mode(CategoryMode::Banded);
    println!("banded: {} points", viewer.points().len());

    viewer.set_contours(true);
    for neighborhood in [
        Neighborhood::Six,
        Neighborhood::Eighteen,
        Neighborhood::TwentySix,
    ] {
        viewer.set_neighborhood(neighborhood);
        println!("contours ({neighborhood:?}): {} points", viewer.points().len());
    }

    viewer.set_projection_mode(ProjectionMode::Perspective);
    viewer.pointer_pressed(PointerButton::Primary, Vec2::ZERO);
    viewer.pointer_moved(Vec2::new(60.0, 20.0));
    viewer.wheel(240.0);

    let frame = viewer.frame(16.0 / 9.0);
    println!(
        "frame: {} points, alpha {}, {} bytes to upload",
        frame.points.len(),
        frame.alpha,
        as_bytes(frame.points).len()
    );
    println!("options: {}", viewer.options().to_json()?);
    Ok(())
}
