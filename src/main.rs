/*
 * Beanbag Particles
 *
 * A sandbox of soft triangles, squares and circles that fall, clump together
 * and can be flung around by dragging the pointer. Neighbouring particles are
 * found with a uniform grid rebuilt every frame.
 *
 * Set RUST_LOG (e.g. RUST_LOG=beanbag=debug) to see more of what happens.
 */

use beanbag::app;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    nannou::app(app::model).update(app::update).run();
}
