use rand::Rng;
use tracing::debug;

use crate::core::RandomSource;
use crate::error::VizResult;
use crate::render::Color;
use crate::texture::gradient::{ColorRamp, LinearGradient};
use crate::texture::raster::Raster;

pub const PLANET_TEXTURE_WIDTH: u32 = 512;
pub const PLANET_TEXTURE_HEIGHT: u32 = 256;
pub const SPECKLE_COUNT: usize = 1000;
pub const SPECKLE_MAX_SIZE: f64 = 3.0;
pub const SPECKLE_ALPHA: f64 = 0.3;
/// Upper bound (exclusive) of each speckle RGB channel, in 0..=255 units.
pub const SPECKLE_CHANNEL_MAX: f64 = 100.0;

/// Ocean, land, mountain and ice bands from left to right.
pub fn planet_ramp() -> VizResult<ColorRamp> {
    ColorRamp::new()
        .with_stop(0.0, Color::from_hex(0x1e3a8a))?
        .with_stop(0.3, Color::from_hex(0x059669))?
        .with_stop(0.7, Color::from_hex(0x92400e))?
        .with_stop(1.0, Color::from_hex(0xf3f4f6))
}

/// Synthesizes the base planet texture.
///
/// The banded gradient is deterministic. Speckle placement and color come
/// from `source`, so only a seeded source reproduces the exact raster.
pub fn synthesize_planet_texture(source: RandomSource) -> VizResult<Raster> {
    let mut raster = Raster::new(PLANET_TEXTURE_WIDTH, PLANET_TEXTURE_HEIGHT)?;
    let width = f64::from(PLANET_TEXTURE_WIDTH);
    let height = f64::from(PLANET_TEXTURE_HEIGHT);

    let gradient = LinearGradient::new((0.0, 0.0), (width, 0.0), planet_ramp()?);
    raster.fill(&gradient);

    let mut rng = source.rng();
    for _ in 0..SPECKLE_COUNT {
        let x = rng.gen_range(0.0..width);
        let y = rng.gen_range(0.0..height);
        let size = rng.gen_range(0.0..SPECKLE_MAX_SIZE);
        let speckle = Color::from_rgb8(
            rng.gen_range(0.0..SPECKLE_CHANNEL_MAX),
            rng.gen_range(0.0..SPECKLE_CHANNEL_MAX),
            rng.gen_range(0.0..SPECKLE_CHANNEL_MAX),
            SPECKLE_ALPHA,
        );
        raster.fill_rect(x, y, size, size, &speckle);
    }

    debug!(
        width = PLANET_TEXTURE_WIDTH,
        height = PLANET_TEXTURE_HEIGHT,
        speckles = SPECKLE_COUNT,
        "synthesized planet texture"
    );
    Ok(raster)
}
