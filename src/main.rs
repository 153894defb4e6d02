use clap::Parser;
use log::{error, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

mod cli;
mod logger;
mod output;
mod scenes;

use cli::Args;
use logger::init_logger;
use output::{save_image_as_exr, save_image_as_png, send_image_to_tev};

fn main() {
    let args = Args::parse();

    init_logger(args.debug_level.into());

    info!("Lumenpath {}", env!("CARGO_PKG_VERSION"));
    info!(
        "Scene: {:?}, width: {}, samples per pixel: {}, max depth: {}, seed: {}",
        args.scene, args.width, args.samples_per_pixel, args.max_depth, args.seed
    );

    let mut scene_rng = ChaCha8Rng::seed_from_u64(args.seed);
    let (world, mut camera) = scenes::build(args.scene, &mut scene_rng);
    camera.image_width = args.width;
    camera.samples_per_pixel = args.samples_per_pixel;
    camera.max_depth = args.max_depth;
    camera.seed = args.seed;

    let image = camera.render(&world);

    let should_send_to_tev = args.tev || args.tev_address.is_some();
    if should_send_to_tev {
        let tev_address = args.tev_address.as_deref().unwrap_or("localhost:14158");
        send_image_to_tev(&image, tev_address);
    }

    if args.output.ends_with(".exr") {
        save_image_as_exr(&image, &args.output);
    } else if args.output.ends_with(".png") {
        save_image_as_png(&image, &args.output);
    } else {
        error!(
            "Unsupported file extension '{}'. Only .png and .exr formats are supported.",
            std::path::Path::new(&args.output)
                .extension()
                .unwrap_or_default()
                .to_string_lossy()
        );
        std::process::exit(1);
    }
}
